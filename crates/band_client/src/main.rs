//! # band_client
//!
//! Interactive command client for the remote band collection.
//!
//! ## Startup sequence
//!
//! 1. Parse the server address and options from the command line.
//! 2. Bind an ephemeral UDP port aimed at the server.
//! 3. Enter the interactive loop, or replay a script with `--script`.

mod generator;
mod repl;
mod script;
mod session;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use band_net::{ExchangeConfig, ExchangeDriver};

#[derive(Parser, Debug)]
#[command(name = "band_client")]
#[command(about = "Interactive client for the remote band collection", long_about = None)]
struct Args {
    /// Server host name or address.
    host: String,

    /// Server UDP port.
    port: u16,

    /// Replay commands from a script file instead of reading stdin.
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// How long to wait for a reply before a round trip fails, in milliseconds.
    #[arg(long, default_value_t = 5000)]
    reply_timeout_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("band_client=info".parse()?))
        .init();

    let args = Args::parse();

    let server: SocketAddr = tokio::net::lookup_host((args.host.as_str(), args.port))
        .await
        .with_context(|| format!("resolving {}:{}", args.host, args.port))?
        .next()
        .with_context(|| format!("no address found for {}:{}", args.host, args.port))?;

    let config = ExchangeConfig {
        reply_timeout: Duration::from_millis(args.reply_timeout_ms),
        ..ExchangeConfig::default()
    };
    let driver = ExchangeDriver::connect(server, config).await?;
    info!(%server, "client ready");

    let mut client = repl::Client::new(driver);
    if let Some(path) = args.script {
        let mut visited = Vec::new();
        script::run(&mut client, path, &mut visited).await?;
    } else {
        repl::run(&mut client).await?;
    }

    Ok(())
}
