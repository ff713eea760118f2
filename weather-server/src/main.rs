//! Binary crate for the `weather` proxy.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Serving the HTTP proxy
//! - Human-friendly output formatting for one-shot lookups

use clap::Parser;

mod cli;
mod output;
mod server;
mod telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is normal outside development.
    dotenv::dotenv().ok();
    telemetry::init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
