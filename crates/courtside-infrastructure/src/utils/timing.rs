//! Deadline timer for retry loops
//!
//! Budgets are measured from `start()` rather than added to it, so an
//! unbounded budget such as `Duration::MAX` never overflows an `Instant`.

use std::time::{Duration, Instant};

/// Time spent since an operation began, checked against a budget
///
/// ```ignore
/// let timer = TimedOperation::start();
/// loop {
///     if attempt() { break; }
///     let Some(pause) = timer.next_pause(budget, interval) else { break };
///     sleep(pause).await;
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    /// Begin timing now
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since `start()`, for log fields
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Budget left, or `None` once it is spent
    pub fn remaining(&self, budget: Duration) -> Option<Duration> {
        budget
            .checked_sub(self.start.elapsed())
            .filter(|left| !left.is_zero())
    }

    /// How long to wait before the next attempt: `interval`, cut short at
    /// the end of the budget. `None` when no further attempt fits.
    pub fn next_pause(&self, budget: Duration, interval: Duration) -> Option<Duration> {
        self.remaining(budget).map(|left| left.min(interval))
    }
}
