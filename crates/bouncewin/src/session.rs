//! Find the window to bounce and drive the animation.

use tracing::info;
use winutils::{GlobPattern, Resolver, WinOps, ax_check, bounce, matching};

use crate::{
    cli::Cli,
    error::{Error, Result},
};

/// Bounce the first matching window; returns the number of steps taken.
///
/// Fails before any window operation when Accessibility is not granted.
/// Otherwise only returns when `--ticks` bounds the run or the window goes
/// away.
pub fn run<O: WinOps + ?Sized>(ops: &O, cli: &Cli) -> Result<u64> {
    ax_check(ops)?;
    let raw = cli.pattern.clone().unwrap_or_default();
    let pattern = GlobPattern::new(raw.as_str());
    let records = ops.list_windows();
    let Some(record) = matching(&records, Some(&pattern)).next() else {
        return Err(Error::NotFound(raw));
    };
    let resolver = Resolver::new(cli.resolve.strategy(ops));
    let Some(win) = resolver.resolve(ops, record, 0) else {
        return Err(Error::Unresolved(record.display_title()));
    };
    info!(
        app = %record.app,
        title = %record.title,
        speed = cli.speed,
        interval = ?cli.interval,
        "bouncewin: start"
    );
    Ok(bounce::run(ops, &win, cli.speed, cli.interval, cli.ticks)?)
}
