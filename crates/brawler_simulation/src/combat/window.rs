//! TimedWindow - absolute expiry timestamp against `SimClock`.

use bevy::prelude::*;

/// Активное окно: `now < expiry`.
///
/// Used for attack-busy, stun and (via the anchor in `Combatant`) cooldown
/// periods. Owned by exactly one combatant.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct TimedWindow {
    expiry: f64,
}

impl Default for TimedWindow {
    fn default() -> Self {
        Self::inactive()
    }
}

impl TimedWindow {
    pub const fn inactive() -> Self {
        Self {
            expiry: f64::NEG_INFINITY,
        }
    }

    pub fn is_active(&self, now: f64) -> bool {
        now < self.expiry
    }

    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Open (or re-open) the window for `duration` seconds from `now`.
    pub fn open(&mut self, now: f64, duration: f32) {
        self.expiry = now + f64::from(duration.max(0.0));
    }

    /// Force-close at `now`. Never moves an already-expired window.
    pub fn close(&mut self, now: f64) {
        self.expiry = self.expiry.min(now);
    }

    pub fn remaining(&self, now: f64) -> f64 {
        (self.expiry - now).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_lifecycle() {
        let mut window = TimedWindow::default();
        assert!(!window.is_active(0.0));

        window.open(1.0, 0.5);
        assert!(window.is_active(1.0));
        assert!(window.is_active(1.49));
        assert!(!window.is_active(1.5)); // now < expiry, строго
        assert_eq!(window.remaining(1.25), 0.25);

        window.close(1.2);
        assert!(!window.is_active(1.2));
        assert_eq!(window.remaining(1.2), 0.0);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut window = TimedWindow::default();
        window.open(0.0, 1.0);
        window.close(2.0); // already expired at 1.0
        assert_eq!(window.expiry(), 1.0);

        let before = window;
        window.close(3.0);
        assert_eq!(window, before);

        let mut never_opened = TimedWindow::inactive();
        never_opened.close(5.0);
        assert_eq!(never_opened, TimedWindow::inactive());
    }
}
