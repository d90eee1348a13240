//! Courtside - Entry Point
//!
//! Binary entry point for the operator CLI. Lives in the `courtside` facade
//! crate next to the library it drives.

use clap::Parser;
use courtside::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(Cli::parse()).await
}
