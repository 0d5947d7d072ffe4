//! Per-frame animation clock.
//!
//! A clock reports normalized progress for one phase and stops itself after
//! delivering the tick with `t == 1`. The engine holds at most one clock at a
//! time; starting a phase cancels whatever clock was running.

use serde::{Deserialize, Serialize};

/// Identity of one clock instance. Stop requests carry the id they were
/// issued for, so a late request never cancels a successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClockId(pub u64);

/// What a tick handler wants the clock to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockAction {
    Continue,
    Stop,
}

/// One delivered tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockTick {
    pub clock: ClockId,
    pub elapsed_secs: f64,
    /// Linear progress in [0, 1].
    pub t: f64,
    /// True on the final tick (`t == 1`).
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct AnimationClock {
    id: ClockId,
    duration_secs: f64,
    elapsed_secs: f64,
    running: bool,
}

impl AnimationClock {
    pub fn new(id: ClockId, duration_secs: f64) -> Self {
        Self {
            id,
            duration_secs,
            elapsed_secs: 0.0,
            running: true,
        }
    }

    pub fn id(&self) -> ClockId {
        self.id
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by `dt_secs` and return the tick to deliver, or `None` once
    /// the clock is stopped. Negative steps count as zero.
    pub fn advance(&mut self, dt_secs: f64) -> Option<ClockTick> {
        if !self.running {
            return None;
        }
        if dt_secs.is_finite() && dt_secs > 0.0 {
            self.elapsed_secs += dt_secs;
        }

        let finished = self.elapsed_secs >= self.duration_secs;
        let t = if finished {
            1.0
        } else {
            (self.elapsed_secs / self.duration_secs).clamp(0.0, 1.0)
        };
        if finished {
            self.running = false;
        }

        Some(ClockTick {
            clock: self.id,
            elapsed_secs: self.elapsed_secs.min(self.duration_secs),
            t,
            finished,
        })
    }

    /// Stop the clock. Returns whether it was running; calling it again is a no-op.
    pub fn cancel(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reaches_one_and_stops() {
        let mut clock = AnimationClock::new(ClockId(1), 0.5);
        let mut ticks = Vec::new();
        while let Some(tick) = clock.advance(0.1) {
            ticks.push(tick);
            assert!(ticks.len() < 100, "clock never finished");
        }
        let last = ticks.last().unwrap();
        assert_eq!(last.t, 1.0);
        assert!(last.finished);
        assert_eq!(ticks.iter().filter(|t| t.finished).count(), 1);
        assert!(!clock.is_running());
        assert!(clock.advance(0.1).is_none());
    }

    #[test]
    fn test_progress_is_monotone() {
        let mut clock = AnimationClock::new(ClockId(2), 1.0);
        let mut prev = 0.0;
        for dt in [0.1, 0.0, -0.3, 0.25, 0.4, 0.4] {
            if let Some(tick) = clock.advance(dt) {
                assert!(tick.t >= prev);
                prev = tick.t;
            }
        }
        assert_eq!(prev, 1.0);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut clock = AnimationClock::new(ClockId(3), 1.0);
        assert!(clock.cancel());
        assert!(!clock.cancel());
        assert!(clock.advance(0.5).is_none());
    }

    #[test]
    fn test_oversized_step_finishes_in_one_tick() {
        let mut clock = AnimationClock::new(ClockId(4), 1.0);
        let tick = clock.advance(5.0).unwrap();
        assert!(tick.finished);
        assert_eq!(tick.elapsed_secs, 1.0);
    }
}
