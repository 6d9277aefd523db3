//! Shared Container Factory - Entry Point
//!
//! Binary entry point for the `scf` command line. See [`scf::cli`] for the
//! available commands.

use clap::Parser;
use scf::cli::{Cli, run};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run(Cli::parse())
}
