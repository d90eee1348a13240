//! Token bucket state
//!
//! The refill formula here is the single source of truth. The distributed
//! realization runs a server-side script that must stay textually equivalent
//! to [`BucketState::refill_and_take`].

use crate::constants::SECONDS_PER_MINUTE;
use serde::{Deserialize, Serialize};

/// Tokens left in a bucket and the time they were last refilled
///
/// Invariant: `0 <= tokens <= rate` once the bucket has been refilled at
/// least once under a given rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketState {
    /// Tokens currently available
    pub tokens: f64,
    /// UNIX epoch seconds of the last refill
    pub last_refill: f64,
}

impl BucketState {
    /// A freshly created bucket starts full
    pub fn full(rate: f64, now: f64) -> Self {
        Self {
            tokens: rate,
            last_refill: now,
        }
    }

    /// Add the tokens accrued since the last refill, capped at `rate`
    ///
    /// Elapsed time is clamped at zero, so a clock that moves backwards never
    /// removes tokens.
    pub fn refill(&mut self, now: f64, rate: f64) {
        let elapsed = (now - self.last_refill).max(0.0);
        let refill = elapsed * (rate / SECONDS_PER_MINUTE);
        self.tokens = rate.min(self.tokens + refill);
        self.last_refill = now;
    }

    /// Refill, then take `amount` tokens if that many are available
    ///
    /// # Returns
    /// True when the tokens were deducted; on false the bucket is refilled
    /// but nothing is deducted.
    pub fn refill_and_take(&mut self, now: f64, rate: f64, amount: f64) -> bool {
        self.refill(now, rate);
        if self.tokens >= amount {
            self.tokens -= amount;
            true
        } else {
            false
        }
    }
}
