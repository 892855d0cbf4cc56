//! The interactive command loop and command dispatch.
//!
//! One round trip per entered command, strictly sequential: the next command
//! is not read until the previous round trip has completed or failed. A
//! Ctrl-C while a round trip is in flight abandons it; the loop continues.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use band_model::{BandId, IdentityRegistry, MusicBand};
use band_net::{ExchangeDriver, ExchangeError, Request, Response};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::generator;
use crate::script;
use crate::session::Session;

/// Everything a command needs to execute: the driver, the identifier
/// registry, the operator session, and the generator's randomness source.
pub struct Client {
    pub driver: ExchangeDriver,
    pub registry: IdentityRegistry,
    pub session: Session,
    pub rng: StdRng,
}

impl Client {
    /// Wrap a connected driver with fresh client state.
    #[must_use]
    pub fn new(driver: ExchangeDriver) -> Self {
        Self {
            driver,
            registry: IdentityRegistry::new(),
            session: Session::new(),
            rng: StdRng::from_entropy(),
        }
    }
}

/// Run the interactive loop until `exit` or end of input.
pub async fn run(client: &mut Client) -> Result<()> {
    println!("Connected to {}.", client.driver.server());
    println!("Type `help` for the command list, `exit` to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" {
            break;
        }

        let mut visited = Vec::new();
        if let Err(err) = dispatch(client, line, &mut visited).await {
            println!("{err}");
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Returns `true` if `verb` creates or replaces a record and therefore
/// carries a generated band payload.
fn needs_payload(verb: &str) -> bool {
    matches!(verb, "add" | "add_if_max" | "update_by_id")
}

/// For a `remove_by_id` line, the identifier being removed.
fn removed_id(line: &str) -> Option<BandId> {
    let mut parts = line.split_whitespace();
    if parts.next() != Some("remove_by_id") {
        return None;
    }
    parts.next()?.parse().ok().map(BandId::from_raw)
}

/// Execute one command line: build the request, perform the round trip, and
/// report the outcome to the operator.
///
/// `visited` tracks script files already being replayed, to refuse recursive
/// `execute_script` inclusion.
pub async fn dispatch(client: &mut Client, line: &str, visited: &mut Vec<PathBuf>) -> Result<()> {
    let verb = line.split_whitespace().next().unwrap_or_default();

    if verb == "execute_script" {
        let Some(path) = line.split_whitespace().nth(1) else {
            println!("usage: execute_script <path>");
            return Ok(());
        };
        return script::run(client, PathBuf::from(path), visited).await;
    }

    if verb == "login" || verb == "register" {
        let mut parts = line.split_whitespace().skip(1);
        let (Some(login), Some(password)) = (parts.next(), parts.next()) else {
            println!("usage: {verb} <login> <password>");
            return Ok(());
        };
        client.session.sign_in(login, password);
    }

    let payload = if needs_payload(verb) {
        let draft = generator::random_draft(&mut client.rng);
        let band = MusicBand::create(&mut client.registry, draft);
        println!("generated: {band}");
        Some(band)
    } else {
        None
    };

    let request = Request::new(line, payload, client.session.credentials());
    let Some(response) = exchange(client, &request).await? else {
        return Ok(());
    };

    if response.is_denied() {
        println!("denied: {}", response.message);
        return Ok(());
    }

    println!("{}", response.message);
    if let Some(id) = removed_id(line) {
        // The record is gone server-side; its id goes back to the free pool.
        client.registry.release(id);
        debug!(%id, "released removed id");
    }
    Ok(())
}

/// Perform the round trip, abandoning it if an interrupt arrives first.
///
/// Returns `Ok(None)` when interrupted; transport failures become the
/// operator-facing "could not communicate" indication.
async fn exchange(client: &mut Client, request: &Request) -> Result<Option<Response>> {
    let outcome: Result<Response, ExchangeError> = tokio::select! {
        res = client.driver.perform_exchange(request) => res,
        _ = tokio::signal::ctrl_c() => {
            warn!(command = request.command, "interrupted; round trip abandoned");
            return Ok(None);
        }
    };
    match outcome {
        Ok(response) => Ok(Some(response)),
        Err(err) => anyhow::bail!("could not communicate with the server: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_commands() {
        assert!(needs_payload("add"));
        assert!(needs_payload("add_if_max"));
        assert!(needs_payload("update_by_id"));
        assert!(!needs_payload("help"));
        assert!(!needs_payload("remove_by_id"));
        assert!(!needs_payload("login"));
    }

    #[test]
    fn test_removed_id_parses_the_argument() {
        assert_eq!(
            removed_id("remove_by_id 1000042"),
            Some(BandId::from_raw(1_000_042))
        );
        assert_eq!(removed_id("remove_by_id"), None);
        assert_eq!(removed_id("remove_by_id nonsense"), None);
        assert_eq!(removed_id("show"), None);
    }
}
