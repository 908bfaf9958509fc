//! Chains of primes and the safe-prime pairs derived from them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{MODULUS, TARGET_RESIDUE};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("a chain with {primes} primes needs {} gaps, got {gaps}", .primes.saturating_sub(1))]
    GapCountMismatch { primes: usize, gaps: usize },
}

/// An ordered sequence of primes with the gap that led to each one.
///
/// # Invariants
///
/// - `gaps().len() == primes().len() - 1` for a non-empty chain
/// - both sequences are empty for an empty chain
///
/// Primes are kept in discovery order. Anomalous excursions may use signed
/// gaps, so the sequence is not guaranteed to be increasing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Chain {
    primes: Vec<i64>,
    gaps: Vec<i64>,
}

impl Chain {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            primes: Vec::new(),
            gaps: Vec::new(),
        }
    }

    #[must_use]
    pub fn seeded(seed: i64) -> Self {
        Self {
            primes: vec![seed],
            gaps: Vec::new(),
        }
    }

    /// Rebuild a chain from parallel sequences, e.g. rows read back from disk.
    pub fn from_parts(primes: Vec<i64>, gaps: Vec<i64>) -> Result<Self, ChainError> {
        let expected = primes.len().saturating_sub(1);
        if gaps.len() != expected {
            return Err(ChainError::GapCountMismatch {
                primes: primes.len(),
                gaps: gaps.len(),
            });
        }
        Ok(Self { primes, gaps })
    }

    /// Append `prime`, reached from the current tail by `gap`.
    ///
    /// On an empty chain the prime becomes the seed and `gap` is discarded.
    pub fn push(&mut self, prime: i64, gap: i64) {
        if !self.primes.is_empty() {
            self.gaps.push(gap);
        }
        self.primes.push(prime);
    }

    #[must_use]
    pub fn primes(&self) -> &[i64] {
        &self.primes
    }

    #[must_use]
    pub fn gaps(&self) -> &[i64] {
        &self.gaps
    }

    #[must_use]
    pub fn tail(&self) -> Option<i64> {
        self.primes.last().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.primes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }
}

/// A Sophie Germain prime `p` and its safe prime `q = 2p + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SafePrimePair {
    pub source: i64,
    pub safe: i64,
}

impl SafePrimePair {
    /// Pair `source` with its doubled-plus-one companion, or `None` on overflow.
    #[must_use]
    pub fn from_source(source: i64) -> Option<Self> {
        let safe = source.checked_mul(2)?.checked_add(1)?;
        Some(Self { source, safe })
    }

    #[must_use]
    pub const fn both_in_target_residue(&self) -> bool {
        self.source.rem_euclid(MODULUS) == TARGET_RESIDUE
            && self.safe.rem_euclid(MODULUS) == TARGET_RESIDUE
    }
}

/// Ordered safe-prime pairs in the order their sources appeared in the chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SafePrimeSet {
    pairs: Vec<SafePrimePair>,
}

impl SafePrimeSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn push(&mut self, pair: SafePrimePair) {
        self.pairs.push(pair);
    }

    #[must_use]
    pub fn pairs(&self) -> &[SafePrimePair] {
        &self.pairs
    }

    #[must_use]
    pub fn safe_primes(&self) -> Vec<i64> {
        self.pairs.iter().map(|pair| pair.safe).collect()
    }

    #[must_use]
    pub fn source_primes(&self) -> Vec<i64> {
        self.pairs.iter().map(|pair| pair.source).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_on_empty_chain_seeds_it() {
        let mut chain = Chain::new();
        chain.push(29, 99);
        assert_eq!(chain.primes(), &[29]);
        assert!(chain.gaps().is_empty());

        chain.push(89, 2);
        assert_eq!(chain.primes(), &[29, 89]);
        assert_eq!(chain.gaps(), &[2]);
        assert_eq!(chain.tail(), Some(89));
    }

    #[test]
    fn from_parts_checks_gap_count() {
        assert!(Chain::from_parts(vec![29, 89], vec![2]).is_ok());
        assert!(Chain::from_parts(Vec::new(), Vec::new()).is_ok());
        assert_eq!(
            Chain::from_parts(vec![29, 89], vec![]),
            Err(ChainError::GapCountMismatch { primes: 2, gaps: 0 })
        );
        assert_eq!(
            Chain::from_parts(vec![], vec![1]),
            Err(ChainError::GapCountMismatch { primes: 0, gaps: 1 })
        );
    }

    #[test]
    fn safe_pair_doubles_plus_one() {
        let pair = SafePrimePair::from_source(29).unwrap();
        assert_eq!(pair.safe, 59);
        assert!(pair.both_in_target_residue());
        assert!(SafePrimePair::from_source(i64::MAX).is_none());
    }

    #[test]
    fn safe_set_splits_into_parallel_lists() {
        let mut set = SafePrimeSet::new();
        set.push(SafePrimePair::from_source(29).unwrap());
        set.push(SafePrimePair::from_source(89).unwrap());
        assert_eq!(set.source_primes(), vec![29, 89]);
        assert_eq!(set.safe_primes(), vec![59, 179]);
        assert_eq!(set.len(), 2);
    }
}
