use std::time::{Duration, Instant};

/// A single pending "turn the error animation off" deadline.
///
/// Starting the flash again replaces the pending deadline, so overlapping
/// flashes produce exactly one revert. Time is always passed in by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorFlash {
    duration: Duration,
    revert_at: Option<Instant>,
}

impl ErrorFlash {
    pub fn new(duration: Duration) -> Self {
        ErrorFlash {
            duration,
            revert_at: None,
        }
    }

    /// Schedule the revert at `now + duration`, cancelling any earlier one.
    pub fn start(&mut self, now: Instant) {
        self.revert_at = Some(now + self.duration);
    }

    /// A revert is pending.
    pub fn is_active(&self) -> bool {
        self.revert_at.is_some()
    }

    /// True exactly once: on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.revert_at {
            Some(deadline) if now >= deadline => {
                self.revert_at = None;
                true
            }
            _ => false,
        }
    }
}
