//! Bounce a window around the main display.

use std::{thread, time::Duration};

use tracing::{debug, trace};

use crate::{
    error::Result,
    geom::{CGPoint, CGSize},
    ops::WinOps,
    screen::Display,
};

/// Reflecting motion inside the region a window's origin may occupy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bouncer {
    min: CGPoint,
    max: CGPoint,
    velocity: CGPoint,
}

impl Bouncer {
    /// Keep a window of `size` fully on `display` and below the menu bar,
    /// moving `speed` pixels per tick on each axis.
    pub fn new(display: &Display, size: CGSize, speed: f64) -> Self {
        let f = &display.frame;
        let speed = speed.abs();
        Self {
            min: CGPoint::new(f.left(), f.top() + display.menu_bar),
            max: CGPoint::new(f.right() - size.width, f.bottom() - size.height),
            velocity: CGPoint::new(speed, speed),
        }
    }

    /// Current per-tick displacement.
    pub fn velocity(&self) -> CGPoint {
        self.velocity
    }

    /// Next position after `pos`, reflecting off any edge it has reached.
    pub fn step(&mut self, pos: CGPoint) -> CGPoint {
        self.velocity.x = reflect(pos.x, self.min.x, self.max.x, self.velocity.x);
        self.velocity.y = reflect(pos.y, self.min.y, self.max.y, self.velocity.y);
        CGPoint::new(pos.x + self.velocity.x, pos.y + self.velocity.y)
    }
}

fn reflect(p: f64, min: f64, max: f64, v: f64) -> f64 {
    if p <= min {
        v.abs()
    } else if p >= max {
        -v.abs()
    } else {
        v
    }
}

/// Animate `win` until `ticks` steps have run, or forever when `None`.
///
/// Each tick reads the current position, so a window dragged by the user
/// keeps bouncing from wherever it was dropped. Any AX failure (typically
/// the window closing) ends the loop with that error.
pub fn run<O: WinOps + ?Sized>(
    ops: &O,
    win: &O::Window,
    speed: f64,
    interval: Duration,
    ticks: Option<u64>,
) -> Result<u64> {
    let size = ops.ax_size(win)?;
    let screen = ops.main_display();
    let mut bouncer = Bouncer::new(&screen, size, speed);
    debug!(?screen, ?size, speed, ?interval, "bounce: start");
    let mut n: u64 = 0;
    while ticks.is_none_or(|max| n < max) {
        let pos = ops.ax_position(win)?;
        let next = bouncer.step(pos);
        trace!(?pos, ?next, "bounce: tick");
        ops.ax_set_position(win, next)?;
        n += 1;
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }
    Ok(n)
}
