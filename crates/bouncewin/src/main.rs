#![warn(missing_docs)]

//! Entry point for the `bouncewin` binary.

mod cli;
mod error;
mod session;

use std::process;

use clap::Parser;
use tracing::error;
use winutils::RealWinOps;

use crate::{cli::Cli, error::Result};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("bouncewin: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and bounce.
fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log);
    session::run(&RealWinOps, &cli)?;
    Ok(())
}
