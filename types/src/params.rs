//! Search ranges and generation requests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Budget, GrammarFlags};

/// Inclusive integer interval `[start, end]` searched for primes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRange {
    pub start: i64,
    pub end: i64,
}

impl SearchRange {
    #[must_use]
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// `end - start`, or 0 for an inverted range. Saturates at `i64::MAX`.
    #[must_use]
    pub const fn interval(&self) -> i64 {
        if self.end > self.start {
            self.end.saturating_sub(self.start)
        } else {
            0
        }
    }

    #[must_use]
    pub const fn contains(&self, n: i64) -> bool {
        self.start <= n && n <= self.end
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("at least one grammar layer (G1, G2, G3) must be enabled")]
    NoGrammarLayer,
    #[error("start ({start}) must be less than end ({end})")]
    EmptyRange { start: i64, end: i64 },
}

/// A request for a grammar-driven chain (or a safe-prime set derived from one).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub range: SearchRange,
    pub target_count: usize,
    pub flags: GrammarFlags,
    pub budget: Budget,
}

impl GenerationParams {
    #[must_use]
    pub fn new(range: SearchRange, target_count: usize) -> Self {
        Self {
            range,
            target_count,
            flags: GrammarFlags::default(),
            budget: Budget::default(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: GrammarFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    /// Reject requests the generator would answer with an empty chain.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !self.flags.any() {
            return Err(ParamsError::NoGrammarLayer);
        }
        if self.range.start >= self.range.end {
            return Err(ParamsError::EmptyRange {
                start: self.range.start,
                end: self.range.end,
            });
        }
        Ok(())
    }
}
