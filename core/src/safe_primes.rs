//! Safe primes derived from a grammar chain.

use rand::Rng;

use germain_types::{Chain, Deadline, GenerationParams, SafePrimePair, SafePrimeSet};

use crate::generator::generate_chain;
use crate::grammar::RuleSet;
use crate::hooks::ProgressHooks;
use crate::oracle::PrimalityCache;
use crate::residue::in_target_residue;

/// Chain length requested to end up with `target` safe pairs.
#[must_use]
pub fn overshoot(target: usize) -> usize {
    target.saturating_mul(5).max(target.saturating_add(10))
}

/// Generate an oversized chain and keep the first `target_count` sources whose
/// companion `2p + 1` is an in-class prime.
///
/// Chain generation and the filter each get the full budget. The filter's
/// clock starts once the chain is built, so an oversized target that runs the
/// chain out of time still leaves the filter its own window.
pub fn derive_safe_primes<R, H>(
    params: &GenerationParams,
    rules: &RuleSet,
    oracle: &PrimalityCache,
    rng: &mut R,
    hooks: &mut H,
) -> SafePrimeSet
where
    R: Rng + ?Sized,
    H: ProgressHooks + ?Sized,
{
    let target = params.target_count;
    if target == 0 {
        return SafePrimeSet::new();
    }

    let oversized = GenerationParams {
        target_count: overshoot(target),
        ..*params
    };
    let chain = generate_chain(&oversized, rules, oracle, rng, hooks);

    let deadline = params.budget.start();
    let set = filter_safe_primes(&chain, target, oracle, &deadline);
    tracing::info!(
        chain = chain.len(),
        pairs = set.len(),
        target,
        "Safe primes derived"
    );
    set
}

/// Scan `chain` in order for sources with an in-class prime companion.
pub fn filter_safe_primes(
    chain: &Chain,
    target: usize,
    oracle: &PrimalityCache,
    deadline: &Deadline,
) -> SafePrimeSet {
    let mut set = SafePrimeSet::new();
    for &source in chain.primes() {
        if set.len() >= target || deadline.expired() {
            break;
        }
        if !in_target_residue(source) {
            continue;
        }
        let Some(pair) = SafePrimePair::from_source(source) else {
            continue;
        };
        if !in_target_residue(pair.safe) || !oracle.is_prime(pair.safe) {
            continue;
        }
        set.push(pair);
    }
    set
}
