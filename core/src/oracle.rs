//! Memoized primality oracle.
//!
//! Trial division is enough at the scale the laboratory works at (a few
//! million at most). Every verdict is cached, so the repeated
//! `is_prime(p) && is_prime(2p + 1)` checks of the walk stay cheap.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use germain_types::SearchRange;

/// Hit/miss counters for a [`PrimalityCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Integer -> verdict map shared by every consumer of a session.
///
/// Grows monotonically and is never evicted. The lock is only held for the
/// lookup and the insert, never across trial division, so concurrent
/// generators may share one cache.
#[derive(Debug, Default)]
pub struct PrimalityCache {
    verdicts: Mutex<HashMap<i64, bool>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl PrimalityCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic primality test. Any integer is a valid input.
    pub fn is_prime(&self, n: i64) -> bool {
        if let Some(&verdict) = self.lock().get(&n) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return verdict;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let verdict = trial_division(n);
        self.lock().insert(n, verdict);
        verdict
    }

    /// `p` is prime and so is its safe companion `2p + 1`.
    ///
    /// A companion that overflows `i64` counts as not prime.
    pub fn is_sophie_germain(&self, p: i64) -> bool {
        self.is_prime(p) && safe_companion(p).is_some_and(|q| self.is_prime(q))
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.lock().len(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<i64, bool>> {
        // A panic while holding the lock cannot leave a half-written verdict.
        self.verdicts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// `2p + 1`, or `None` on overflow.
#[must_use]
pub fn safe_companion(p: i64) -> Option<i64> {
    p.checked_mul(2)?.checked_add(1)
}

fn trial_division(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let limit = n.isqrt();
    let mut divisor = 3;
    while divisor <= limit {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Every Sophie Germain prime in `range`, across all residue families.
pub fn enumerate_sophie_germain(oracle: &PrimalityCache, range: &SearchRange) -> Vec<i64> {
    if range.start > range.end {
        return Vec::new();
    }
    (range.start.max(2)..=range.end)
        .filter(|&p| oracle.is_sophie_germain(p))
        .collect()
}
