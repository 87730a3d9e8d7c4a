//! Binary crate for the weather proxy server.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Wiring configuration into the HTTP router
//! - Process lifecycle (bind, serve, shutdown)

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod handler;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = cli::Args::parse();
    args.run().await
}
