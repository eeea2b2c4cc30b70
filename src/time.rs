//! Fixed-interval timer using an accumulator pattern.
//!
//! `draw_web()` calls at ~60fps with variable delta. IntervalTimer converts
//! this into a whole number of interval firings, making production
//! deterministic and fully testable without a real clock.
//!
//! A frame delta larger than `max_delta_ms` is clamped, so a tab returning
//! from the background catches up at most that much time.

#[derive(Debug, Clone)]
pub struct IntervalTimer {
    /// Milliseconds between firings
    interval_ms: f64,
    /// Largest frame delta accepted in one update
    max_delta_ms: f64,
    /// Accumulated milliseconds not yet consumed as firings
    accumulator: f64,
    /// Timestamp of the last update (ms), None until the first frame
    last_timestamp: Option<f64>,
}

impl IntervalTimer {
    /// Arm a timer that fires every `interval_ms`.
    /// `max_delta_ms` caps how much time a single frame may contribute.
    pub fn new(interval_ms: f64, max_delta_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(1.0),
            max_delta_ms: max_delta_ms.max(0.0),
            accumulator: 0.0,
            last_timestamp: None,
        }
    }

    /// Feed wall-clock timestamp (from `performance.now()` or similar).
    /// Returns how many intervals elapsed since the previous call.
    ///
    /// The first call only anchors the clock and never fires.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            // Clamp to avoid a burst of firings if the tab was backgrounded
            Some(prev) => (now_ms - prev).clamp(0.0, self.max_delta_ms),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let fires = (self.accumulator / self.interval_ms) as u32;
        self.accumulator -= fires as f64 * self.interval_ms;
        fires
    }
}
