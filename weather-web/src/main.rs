//! Binary crate for the `weather` web app.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Loading configuration once at startup
//! - Serving the search page or running a one-shot lookup

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
