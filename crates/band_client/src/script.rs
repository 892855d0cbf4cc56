//! Script replay: batch execution of commands from a file.
//!
//! Scripts hold one command per line; blank lines and `#` comments are
//! skipped. Exchanges run strictly one at a time, through the same dispatch
//! path as the interactive loop. A script that includes itself (directly or
//! through another script) is skipped rather than replayed forever.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::repl::{self, Client};

/// Replay the commands in `path`.
///
/// `visited` holds the canonical paths of scripts currently being replayed;
/// re-entering one of them is refused.
///
/// # Errors
///
/// Fails if the file cannot be read or a replayed command's round trip
/// fails; remaining commands are not executed.
pub async fn run(client: &mut Client, path: PathBuf, visited: &mut Vec<PathBuf>) -> Result<()> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("opening script {}", path.display()))?;
    if visited.contains(&canonical) {
        println!(
            "skipping {}: recursive script inclusion",
            path.display()
        );
        return Ok(());
    }
    visited.push(canonical);

    let commands = read_commands(&path)?;
    info!(path = %path.display(), commands = commands.len(), "executing script");

    for command in &commands {
        println!("> {command}");
        // Boxed: execute_script lines re-enter dispatch.
        Box::pin(repl::dispatch(client, command, visited)).await?;
    }

    visited.pop();
    Ok(())
}

/// Read a script file into its executable command lines.
///
/// # Errors
///
/// Fails if the file cannot be read.
fn read_commands(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
