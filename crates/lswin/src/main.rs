#![warn(missing_docs)]

//! Entry point for the `lswin` binary.

mod cli;
mod error;
mod list;

use std::{io, process};

use clap::Parser;
use tracing::{error, warn};
use winutils::RealWinOps;

use crate::{cli::Cli, error::Result};

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            error!("{err}");
            eprintln!("lswin: {err}");
            process::exit(1);
        }
    }
}

/// Parse CLI arguments, install logging, and print the listing.
fn run() -> Result<bool> {
    let cli = Cli::parse();
    logging::init(&cli.log);
    if !permissions::screen_recording_ok() {
        warn!("screen recording permission not granted; window titles may be blank");
    }
    let stdout = io::stdout();
    list::run(&RealWinOps, &cli, &mut stdout.lock())
}
