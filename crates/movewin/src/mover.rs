//! Select the target window and move it.

use tracing::{info, warn};
use winutils::{MoveOutcome, Resolver, Strategy, WinOps, ax_check, move_window, place::select};

use crate::{cli::Cli, error::Result};

/// Move the window the command line selects.
///
/// Arguments are validated before authorization, and nothing touches the
/// window server until both pass. With `--occurrence N` the Nth matching
/// record is used under id resolution; under geometry resolution the first
/// record is used and the Nth pixel-identical AX window is taken.
///
/// Returns `Ok(true)` when the window now has the requested geometry, either
/// because it was moved or because it was already there.
pub fn run<O: WinOps + ?Sized>(ops: &O, cli: &Cli) -> Result<bool> {
    let (selector, req) = cli.target()?;
    ax_check(ops)?;
    let resolver = Resolver::new(cli.resolve.strategy(ops));
    let records = ops.list_windows();
    let found = select(&records, &selector);
    info!(count = found.len(), ?selector, "movewin: matching windows");
    let (pick, skip) = match resolver.strategy() {
        Strategy::WindowId => (cli.occurrence, 0),
        Strategy::Geometry => (0, cli.occurrence),
    };
    let Some(target) = found.get(pick) else {
        warn!(?selector, occurrence = cli.occurrence, "movewin: no window matched");
        return Ok(false);
    };
    let outcome = move_window(ops, &resolver, target, &req, skip)?;
    if outcome == MoveOutcome::Unresolved {
        warn!(
            app = %target.app,
            title = %target.title,
            strategy = ?resolver.strategy(),
            "movewin: window is not reachable through Accessibility"
        );
    }
    Ok(outcome.is_success())
}
