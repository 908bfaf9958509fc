//! Wall-clock budget types.
//!
//! Generation is best-effort: a budget bounds how long a call may run, and
//! expiry is never an error. Callers get whatever was accumulated.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Wall-clock allowance for a single generation call.
///
/// Non-finite or negative second counts collapse to zero, so an invalid
/// budget expires immediately instead of running forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Budget(Duration);

impl Budget {
    pub const DEFAULT_SECS: u64 = 120;

    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self(duration)
    }

    #[must_use]
    pub fn from_secs_f64(secs: f64) -> Self {
        if secs.is_finite() && secs > 0.0 {
            Self(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
        } else {
            Self(Duration::ZERO)
        }
    }

    #[must_use]
    pub const fn as_duration(self) -> Duration {
        self.0
    }

    /// Start the clock.
    #[must_use]
    pub fn start(self) -> Deadline {
        Deadline {
            started: Instant::now(),
            budget: self.0,
        }
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self(Duration::from_secs(Self::DEFAULT_SECS))
    }
}

impl From<f64> for Budget {
    fn from(secs: f64) -> Self {
        Self::from_secs_f64(secs)
    }
}

impl From<Budget> for f64 {
    fn from(budget: Budget) -> Self {
        budget.0.as_secs_f64()
    }
}

/// A running budget. Checked cooperatively at loop granularity.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    #[must_use]
    pub fn expired(&self) -> bool {
        self.elapsed() > self.budget
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.elapsed())
    }
}
