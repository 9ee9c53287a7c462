//! Frame pacing
//!
//! Turns frame-callback timestamps (milliseconds, as handed to
//! `requestAnimationFrame` callbacks) into simulation deltas.
//!
//! - The first timestamp only primes the pacer.
//! - Gaps longer than `max_frame_dt` (tab hidden, debugger pause) are
//!   skipped rather than simulated in one huge step.
//! - On constrained devices callbacks arriving sooner than the target
//!   interval are dropped without consuming the elapsed time, capping the
//!   simulation rate (30 Hz by default).

/// Converts timestamps into frame deltas.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    last_ms: Option<f64>,
    max_frame_dt: f32,
    /// Minimum milliseconds between simulated frames (0 = unlimited)
    min_interval_ms: f64,
}

impl FramePacer {
    pub fn new(max_frame_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_frame_dt,
            min_interval_ms: 0.0,
        }
    }

    /// Pacer limited to at most `hz` simulated frames per second.
    pub fn constrained(max_frame_dt: f32, hz: f32) -> Self {
        let mut pacer = Self::new(max_frame_dt);
        pacer.set_target_rate(Some(hz));
        pacer
    }

    /// Enable (`Some(hz)`) or disable (`None`) the rate limit.
    pub fn set_target_rate(&mut self, hz: Option<f32>) {
        self.min_interval_ms = match hz {
            Some(hz) if hz > 0.0 => 1000.0 / hz as f64,
            _ => 0.0,
        };
    }

    pub fn is_constrained(&self) -> bool {
        self.min_interval_ms > 0.0
    }

    /// Delta for a frame callback at `now_ms`, or `None` to skip it.
    pub fn tick(&mut self, now_ms: f64) -> Option<f32> {
        let Some(last) = self.last_ms else {
            self.last_ms = Some(now_ms);
            return None;
        };

        let elapsed_ms = now_ms - last;
        if self.min_interval_ms > 0.0 && elapsed_ms < self.min_interval_ms {
            return None;
        }

        self.last_ms = Some(now_ms);
        let dt = (elapsed_ms / 1000.0) as f32;
        (dt.is_finite() && dt > 0.0 && dt <= self.max_frame_dt).then_some(dt)
    }

    /// Forget the last timestamp (e.g. after the page was hidden).
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_primes() {
        let mut pacer = FramePacer::new(0.2);
        assert_eq!(pacer.tick(1000.0), None);
        let dt = pacer.tick(1016.0).unwrap();
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_long_gap_skipped() {
        let mut pacer = FramePacer::new(0.2);
        pacer.tick(0.0);
        assert_eq!(pacer.tick(500.0), None);
        // The reference moved on, so the next normal frame is fine
        assert!(pacer.tick(516.0).is_some());
    }

    #[test]
    fn test_non_increasing_timestamp_skipped() {
        let mut pacer = FramePacer::new(0.2);
        pacer.tick(100.0);
        assert_eq!(pacer.tick(100.0), None);
        assert_eq!(pacer.tick(90.0), None);
    }

    #[test]
    fn test_constrained_drops_early_callbacks() {
        let mut pacer = FramePacer::constrained(0.2, 30.0);
        assert!(pacer.is_constrained());
        pacer.tick(0.0);

        assert_eq!(pacer.tick(16.7), None);
        // Time is not consumed by the dropped callback
        let dt = pacer.tick(33.4).unwrap();
        assert!((dt - 0.0334).abs() < 1e-5);
        assert_eq!(pacer.tick(50.0), None);
    }

    #[test]
    fn test_limit_can_be_lifted() {
        let mut pacer = FramePacer::constrained(0.2, 30.0);
        pacer.set_target_rate(None);
        assert!(!pacer.is_constrained());
        pacer.tick(0.0);
        assert!(pacer.tick(16.0).is_some());
    }
}
