//! Passive production scheduler.
//!
//! Owns the single production timer. Buying minions never adjusts the
//! running timer in place: `reconfigure` cancels it and arms a fresh one.
//!
//! Time only counts while frames are drawn. A hidden tab stops animation
//! frames, and the first frame back is capped at `max_frame_delta_ms`, so
//! production paused in the background is not paid out on return.

use crate::time::IntervalTimer;

use super::logic;
use super::state::GameState;

/// Cadence tunables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Interval with a single minion.
    pub base_ms: u64,
    /// Reduction per minion beyond the first.
    pub step_ms: u64,
    /// Fastest allowed interval.
    pub floor_ms: u64,
    /// Frame delta cap handed to the timer.
    pub max_frame_delta_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            base_ms: 1000,
            step_ms: 100,
            floor_ms: 200,
            max_frame_delta_ms: 1000,
        }
    }
}

impl SchedulerConfig {
    /// Interval between ticks for `owned` minions, or `None` when idle.
    pub fn interval_for(&self, owned: u32) -> Option<u64> {
        if owned == 0 {
            return None;
        }
        let reduction = u64::from(owned - 1).saturating_mul(self.step_ms);
        Some(self.base_ms.saturating_sub(reduction).max(self.floor_ms))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerStatus {
    Idle,
    Running { interval_ms: u64 },
}

pub struct Scheduler {
    config: SchedulerConfig,
    /// `None` while idle.
    timer: Option<IntervalTimer>,
    interval_ms: Option<u64>,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            timer: None,
            interval_ms: None,
        }
    }

    pub fn status(&self) -> SchedulerStatus {
        match (self.timer.as_ref(), self.interval_ms) {
            (Some(_), Some(interval_ms)) => SchedulerStatus::Running { interval_ms },
            _ => SchedulerStatus::Idle,
        }
    }

    pub fn interval_ms(&self) -> Option<u64> {
        self.interval_ms
    }

    /// Stop production and drop the timer.
    pub fn cancel(&mut self) {
        if self.timer.take().is_some() {
            log::debug!("scheduler: timer cancelled");
        }
        self.interval_ms = None;
    }

    /// Cancel any running timer, then arm one at the cadence for `owned` minions.
    pub fn reconfigure(&mut self, owned: u32) {
        self.cancel();
        if let Some(interval_ms) = self.config.interval_for(owned) {
            self.timer = Some(IntervalTimer::new(
                interval_ms as f64,
                self.config.max_frame_delta_ms as f64,
            ));
            self.interval_ms = Some(interval_ms);
            log::info!("scheduler: {owned} minion(s), ticking every {interval_ms}ms");
        }
    }

    /// Feed the frame clock and run one `tick` per elapsed interval.
    /// Returns the number of ticks fired.
    pub fn advance(&mut self, state: &mut GameState, now_ms: f64) -> u32 {
        let Some(timer) = self.timer.as_mut() else {
            return 0;
        };
        let fires = timer.update(now_ms);
        for _ in 0..fires {
            let produced = logic::tick(state, 1);
            log::debug!("scheduler: tick produced {produced}");
        }
        fires
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}
