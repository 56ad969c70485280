//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - The interactive session loop
//! - Terminal prompts and animations
//! - Human-friendly output formatting

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod console;
mod render;
mod session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cmd = cli::Cli::parse();
    cmd.run().await
}

/// Logs go to stderr, and only when RUST_LOG is set, so they never mix with
/// the prompt by default.
fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
