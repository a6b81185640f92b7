use std::time::{Duration, Instant};

use crate::constants::{EXPECTED_MOVES_REMAINING, SOFT_TO_HARD_LIMIT_RATIO};

/// How much wall-clock time the search may consume.
#[derive(Debug, Clone, Copy)]
pub enum TimeBudget {
    /// Time remaining on the game clock plus the per-move increment; the
    /// search takes one slice of it.
    Clock {
        remaining: Duration,
        increment: Duration,
    },
    /// A fixed amount for this move alone.
    PerMove(Duration),
}

/// Tracks elapsed search time against a soft and a hard limit. The root
/// loop stops starting new depths at the soft limit; the move loop aborts
/// at the hard limit and keeps the best move found so far.
#[derive(Debug, Clone, Copy)]
pub struct TimeManager {
    start_time: Instant,
    soft_limit: Option<Duration>,
    hard_limit: Option<Duration>,
}

impl TimeManager {
    pub fn start(budget: Option<TimeBudget>) -> Self {
        let start_time = Instant::now();

        let (soft_limit, hard_limit) = match budget {
            None => (None, None),
            Some(TimeBudget::PerMove(slice)) => (Some(slice), Some(slice)),
            Some(TimeBudget::Clock {
                remaining,
                increment,
            }) => {
                // One slice of the remaining clock, but never more than a
                // quarter of it when the increment dominates.
                let slice = (remaining / EXPECTED_MOVES_REMAINING + increment).min(remaining / 4);
                (Some(slice.mul_f64(SOFT_TO_HARD_LIMIT_RATIO)), Some(slice))
            }
        };

        Self {
            start_time,
            soft_limit,
            hard_limit,
        }
    }

    /// Time since the search began.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Check if we should stop starting new iterations.
    pub fn is_soft_limit_reached(&self) -> bool {
        matches!(self.soft_limit, Some(limit) if self.elapsed() >= limit)
    }

    /// Check if we must abort immediately.
    pub fn is_hard_limit_reached(&self) -> bool {
        matches!(self.hard_limit, Some(limit) if self.elapsed() >= limit)
    }
}
