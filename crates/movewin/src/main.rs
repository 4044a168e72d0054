#![warn(missing_docs)]

//! Entry point for the `movewin` binary.

mod cli;
mod error;
mod mover;

use std::process;

use clap::Parser;
use tracing::error;
use winutils::RealWinOps;

use crate::{cli::Cli, error::Result};

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            error!("{err}");
            eprintln!("movewin: {err}");
            process::exit(1);
        }
    }
}

/// Parse CLI arguments, install logging, and move.
fn run() -> Result<bool> {
    let cli = Cli::parse();
    logging::init(&cli.log);
    mover::run(&RealWinOps, &cli)
}
