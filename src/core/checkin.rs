//! Periodic "are you safe" scheduling.
//!
//! Tick-based like the escalation session: the caller advances the
//! scheduler on its own cadence and gets told when a safety check is due.
//! A check that ends with a safety confirmation re-anchors the interval;
//! any other ending leaves the anchor alone, so the next check comes due
//! on the original schedule.

use log::info;

/// Default ticks between checks (one minute at 1 tick/second).
pub const DEFAULT_INTERVAL_TICKS: u32 = 60;

pub struct CheckinScheduler {
    enabled: bool,
    interval_ticks: u32,
    since_last_check: u32,
}

impl CheckinScheduler {
    pub fn new(interval_ticks: u32, enabled: bool) -> Self {
        Self {
            enabled,
            interval_ticks: interval_ticks.max(1),
            since_last_check: 0,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Advance by `ticks`. Returns true when a safety check is due.
    pub fn advance(&mut self, ticks: u32) -> bool {
        if !self.enabled {
            return false;
        }
        self.since_last_check = self.since_last_check.saturating_add(ticks);
        if self.since_last_check >= self.interval_ticks {
            info!("periodic safety check due");
            self.since_last_check = 0;
            true
        } else {
            false
        }
    }

    /// The user confirmed safety; restart the interval from now.
    pub fn mark_safe(&mut self) {
        self.since_last_check = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_on_interval() {
        let mut scheduler = CheckinScheduler::new(60, true);
        // Coarse 10-tick polling, like the runtime loop.
        for _ in 0..5 {
            assert!(!scheduler.advance(10));
        }
        assert!(scheduler.advance(10));
        // Interval restarts after firing.
        assert!(!scheduler.advance(10));
    }

    #[test]
    fn test_disabled_never_fires() {
        let mut scheduler = CheckinScheduler::new(10, false);
        for _ in 0..100 {
            assert!(!scheduler.advance(10));
        }
    }

    #[test]
    fn test_mark_safe_reanchors() {
        let mut scheduler = CheckinScheduler::new(60, true);
        scheduler.advance(50);
        scheduler.mark_safe();
        assert!(!scheduler.advance(50));
        assert!(scheduler.advance(10));
    }

    #[test]
    fn test_unsafe_outcome_keeps_anchor() {
        let mut scheduler = CheckinScheduler::new(60, true);
        scheduler.advance(50);
        // No mark_safe: the next poll still counts from the old anchor.
        assert!(scheduler.advance(10));
    }
}
