//! Session countdown.

use serde::Serialize;

/// Countdown that gates scoring.
///
/// Created stopped. Once it reaches zero it stays stopped until [`reset`](Self::reset).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionClock {
    time_limit: f32,
    remaining: f32,
    running: bool,
    expired: bool,
}

impl SessionClock {
    pub fn new(time_limit: f32) -> Self {
        let time_limit = time_limit.max(0.0);
        Self {
            time_limit,
            remaining: time_limit,
            running: false,
            expired: false,
        }
    }

    /// Start counting down. Returns `false` if already running or expired.
    pub fn start(&mut self) -> bool {
        if self.running || self.expired {
            return false;
        }
        self.running = true;
        true
    }

    /// Count down by `dt`. Returns `true` exactly once, on the expiring tick.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
        if self.remaining <= 0.0 {
            self.running = false;
            self.expired = true;
            return true;
        }
        false
    }

    /// Back to the full time limit, stopped.
    pub fn reset(&mut self) {
        self.remaining = self.time_limit;
        self.running = false;
        self.expired = false;
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn elapsed(&self) -> f32 {
        self.time_limit - self.remaining
    }

    pub fn time_limit(&self) -> f32 {
        self.time_limit
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_stopped() {
        let mut clock = SessionClock::new(90.0);
        assert!(!clock.is_running());
        assert!(!clock.tick(1.0));
        assert_eq!(clock.remaining(), 90.0);
    }

    #[test]
    fn test_expires_exactly_once() {
        let mut clock = SessionClock::new(1.0);
        assert!(clock.start());
        assert!(!clock.start());

        let mut fired = 0;
        for _ in 0..30 {
            if clock.tick(0.1) {
                fired += 1;
            }
            assert!(clock.remaining() >= 0.0);
        }
        assert_eq!(fired, 1);
        assert_eq!(clock.remaining(), 0.0);
        assert!(clock.is_expired());
        assert!(!clock.is_running());
        assert!(!clock.start(), "cannot restart an expired clock");
    }

    #[test]
    fn test_large_tick_clamps() {
        let mut clock = SessionClock::new(0.5);
        clock.start();
        assert!(clock.tick(3.0));
        assert_eq!(clock.remaining(), 0.0);
        assert_eq!(clock.elapsed(), 0.5);
    }

    #[test]
    fn test_reset() {
        let mut clock = SessionClock::new(2.0);
        clock.start();
        clock.tick(5.0);
        clock.reset();
        assert_eq!(clock.remaining(), 2.0);
        assert!(!clock.is_expired());
        assert!(clock.start());
    }
}
