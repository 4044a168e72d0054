//! Command-line interface definitions for bouncewin.

use std::time::Duration;

use clap::Parser;
use logging::LogArgs;
use winutils::ResolveMode;

/// Command-line interface for the `bouncewin` binary.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bouncewin",
    about = "Bounce a window around the main display",
    version
)]
pub struct Cli {
    /// Logging controls shared across the window tools.
    #[command(flatten)]
    pub log: LogArgs,

    /// Delay between steps (e.g. "1ms", "16ms", "1s").
    #[arg(long, default_value = "1ms", value_parser = humantime::parse_duration)]
    pub interval: Duration,

    /// Pixels moved per step along each axis.
    #[arg(long, default_value_t = 1.0, value_name = "PX")]
    pub speed: f64,

    /// Stop after N steps instead of running until interrupted.
    #[arg(long, value_name = "N")]
    pub ticks: Option<u64>,

    /// How to find the Accessibility window: auto, id or geometry.
    #[arg(long, default_value_t = ResolveMode::Auto, value_name = "MODE")]
    pub resolve: ResolveMode,

    /// Glob matched against "App - Title"; the first window when omitted.
    pub pattern: Option<String>,
}
