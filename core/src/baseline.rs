//! Grammar-free control sample.
//!
//! Same residue class and primality constraints as the generator, no gap
//! grammar: integers are drawn uniformly from the range and kept when they
//! qualify.

use std::collections::BTreeSet;

use rand::{Rng, RngExt};

use germain_types::{Chain, MODULUS, SearchRange};

use crate::oracle::PrimalityCache;
use crate::residue::in_target_residue;

/// Each requested element allows this many draws before giving up.
pub const DRAWS_PER_ELEMENT: usize = 200;

/// Rejection-sample up to `count` distinct in-class Sophie Germain primes
/// from `range`, returned ascending with gaps `(b - a) / 30`.
pub fn sample_baseline<R: Rng + ?Sized>(
    range: &SearchRange,
    count: usize,
    oracle: &PrimalityCache,
    rng: &mut R,
) -> Chain {
    if range.start > range.end || count == 0 {
        return Chain::new();
    }

    let max_draws = count.saturating_mul(DRAWS_PER_ELEMENT);
    let mut collected = BTreeSet::new();
    let mut draws = 0;
    while collected.len() < count && draws < max_draws {
        draws += 1;
        let n = rng.random_range(range.start..=range.end);
        if in_target_residue(n) && oracle.is_sophie_germain(n) {
            collected.insert(n);
        }
    }

    if collected.len() < count {
        tracing::debug!(
            found = collected.len(),
            count,
            draws,
            "Baseline draw cap reached"
        );
    }

    let mut chain = Chain::new();
    let mut previous = None;
    for prime in collected {
        let gap = previous.map_or(0, |previous| (prime - previous) / MODULUS);
        chain.push(prime, gap);
        previous = Some(prime);
    }
    chain
}
