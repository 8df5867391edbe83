//! Game clock used to time fire and ice effects.
//!
//! The clock ticks once per completed player turn. Effect durations are
//! measured in full rounds, so a duration of `n` rounds expires
//! `n * turns_per_loop` ticks after it was applied.

use serde::{Deserialize, Serialize};

/// Monotonic turn counter owned by one game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    now: u64,
    turns_per_loop: u64,
}

impl Clock {
    /// Start a clock at 0 for a game with `turns_per_loop` players.
    #[must_use]
    pub fn new(turns_per_loop: usize) -> Self {
        assert!(turns_per_loop > 0, "A round needs at least one turn");
        Self {
            now: 0,
            turns_per_loop: turns_per_loop as u64,
        }
    }

    /// Current tick.
    #[must_use]
    pub const fn now(self) -> u64 {
        self.now
    }

    /// Ticks in one full round (the player count).
    #[must_use]
    pub const fn turns_per_loop(self) -> u64 {
        self.turns_per_loop
    }

    /// Tick at which an effect lasting `rounds` full rounds expires.
    ///
    /// Saturates, so an absurd duration means "never expires".
    #[must_use]
    pub const fn rounds_from_now(self, rounds: u64) -> u64 {
        self.now.saturating_add(rounds.saturating_mul(self.turns_per_loop))
    }

    /// Whether a timer expiring at `until` is still running.
    ///
    /// `None` is the "never set" sentinel and is never active.
    #[must_use]
    pub fn is_active(self, until: Option<u64>) -> bool {
        until.is_some_and(|tick| self.now < tick)
    }

    /// Advance by one player turn.
    pub fn advance(&mut self) {
        self.now = self.now.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_scale_with_players() {
        let mut clock = Clock::new(3);
        for _ in 0..5 {
            clock.advance();
        }
        assert_eq!(clock.rounds_from_now(1), 8);
        assert_eq!(clock.rounds_from_now(2), 11);
        assert_eq!(clock.rounds_from_now(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_timer_expiry() {
        let mut clock = Clock::new(2);
        let until = Some(clock.rounds_from_now(1));

        assert!(clock.is_active(until));
        clock.advance();
        assert!(clock.is_active(until));
        clock.advance();
        assert!(!clock.is_active(until));
        assert!(!clock.is_active(None));
    }

    #[test]
    #[should_panic(expected = "at least one turn")]
    fn test_zero_loop_rejected() {
        let _ = Clock::new(0);
    }
}
