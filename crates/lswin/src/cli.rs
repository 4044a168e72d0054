//! Command-line interface definitions for lswin.

use clap::Parser;
use logging::LogArgs;
use winutils::WindowId;

/// Command-line interface for the `lswin` binary.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "lswin",
    about = "List on-screen windows, optionally filtered by a glob on \"App - Title\"",
    version
)]
pub struct Cli {
    /// Logging controls shared across the window tools.
    #[command(flatten)]
    pub log: LogArgs,

    /// Shell glob matched against "App - Title"; wrapped in `*` unless it
    /// already starts/ends with one. Case-sensitive.
    #[arg(value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Also show pid, window id and layer.
    #[arg(short, long)]
    pub long: bool,

    /// Only list the window with this CGWindowID.
    #[arg(long, value_name = "ID")]
    pub id: Option<WindowId>,

    /// Print matches as a JSON array instead of text.
    #[arg(long, conflicts_with = "long")]
    pub json: bool,
}
