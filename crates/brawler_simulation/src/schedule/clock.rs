//! Simulation clock.

use bevy::prelude::*;

/// Monotonic simulation time, advanced once per tick by the driver.
///
/// Every combat window is an absolute timestamp against `now`.
/// Systems only read it; `advance` is the single writer.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    now: f64,
    tick: u64,
}

impl SimClock {
    /// Seconds since the encounter started.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of ticks driven so far (0 before the first tick).
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Advance by `dt` seconds. Negative or NaN deltas count as zero so time
    /// never runs backwards.
    pub fn advance(&mut self, dt: f32) {
        let dt = if dt.is_finite() { f64::from(dt.max(0.0)) } else { 0.0 };
        self.now += dt;
        self.tick += 1;
    }

    /// Absolute timestamp `delay` seconds from now.
    pub fn after(&self, delay: f32) -> f64 {
        self.now + f64::from(delay.max(0.0))
    }
}
