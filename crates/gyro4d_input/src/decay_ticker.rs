//! Fixed-period ticker for momentum decay
//!
//! The ticker never sleeps or spawns anything. The host asks for the
//! [`next_deadline`](DecayTicker::next_deadline), parks its event loop until
//! then, and calls [`due_ticks`](DecayTicker::due_ticks) when it wakes.
//! Cancelling just clears the schedule, so it takes effect immediately and
//! can be repeated safely.

use std::time::{Duration, Instant};

/// Default decay period (~60 Hz)
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Most ticks released by one [`DecayTicker::due_ticks`] call
///
/// After a longer stall the schedule restarts from the wake-up time
/// instead of replaying every missed tick.
pub const MAX_CATCH_UP_TICKS: u32 = 8;

/// Cancellable fixed-period schedule
#[derive(Clone, Debug)]
pub struct DecayTicker {
    period: Duration,
    next_tick: Option<Instant>,
}

impl Default for DecayTicker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

impl DecayTicker {
    /// Create a stopped ticker
    ///
    /// Periods below one millisecond are raised to one millisecond.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next_tick: None,
        }
    }

    /// Tick period
    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start (or restart) the schedule with the first tick due at `now`
    pub fn start(&mut self, now: Instant) {
        self.next_tick = Some(now);
    }

    /// Stop the schedule
    pub fn cancel(&mut self) {
        self.next_tick = None;
    }

    /// Whether a schedule is active
    #[inline]
    pub fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    /// When the next tick is due, if running
    #[inline]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Number of ticks due at `now`, advancing the schedule past them
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let next = match self.next_tick {
            Some(next) if now >= next => next,
            _ => return 0,
        };

        let behind = now.duration_since(next).as_nanos() / self.period.as_nanos();
        let due = behind.saturating_add(1);

        if due > MAX_CATCH_UP_TICKS as u128 {
            self.next_tick = Some(now + self.period);
            MAX_CATCH_UP_TICKS
        } else {
            let due = due as u32;
            self.next_tick = Some(next + self.period * due);
            due
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_stopped_ticker_never_ticks() {
        let mut t = DecayTicker::default();
        assert!(!t.is_running());
        assert_eq!(t.next_deadline(), None);
        assert_eq!(t.due_ticks(Instant::now()), 0);
    }

    #[test]
    fn test_first_tick_is_immediate() {
        let mut t = DecayTicker::default();
        let t0 = Instant::now();
        t.start(t0);
        assert_eq!(t.due_ticks(t0), 1);
        assert_eq!(t.next_deadline(), Some(t0 + ms(16)));
    }

    #[test]
    fn test_no_tick_before_deadline() {
        let mut t = DecayTicker::default();
        let t0 = Instant::now();
        t.start(t0);
        t.due_ticks(t0);
        assert_eq!(t.due_ticks(t0 + ms(15)), 0);
        assert_eq!(t.due_ticks(t0 + ms(16)), 1);
    }

    #[test]
    fn test_catches_up_missed_ticks() {
        let mut t = DecayTicker::default();
        let t0 = Instant::now();
        t.start(t0);
        // Due at 0, 16, 32, 48
        assert_eq!(t.due_ticks(t0 + ms(50)), 4);
        assert_eq!(t.next_deadline(), Some(t0 + ms(64)));
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut t = DecayTicker::default();
        let t0 = Instant::now();
        t.start(t0);
        let wake = t0 + ms(1000);
        assert_eq!(t.due_ticks(wake), MAX_CATCH_UP_TICKS);
        assert_eq!(t.next_deadline(), Some(wake + ms(16)));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut t = DecayTicker::default();
        let t0 = Instant::now();
        t.start(t0);
        t.cancel();
        t.cancel();
        assert!(!t.is_running());
        assert_eq!(t.due_ticks(t0 + ms(100)), 0);
    }

    #[test]
    fn test_zero_period_is_raised() {
        let t = DecayTicker::new(Duration::ZERO);
        assert_eq!(t.period(), ms(1));
    }
}
