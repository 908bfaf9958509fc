//! Session context: the rule tables and primality cache shared by every call.

use rand::Rng;

use germain_types::{
    Chain, GenerationParams, GrammarFlags, SafePrimeSet, SearchRange, TransitionRow,
};

use crate::analysis::{ComparisonReport, analyze};
use crate::baseline::sample_baseline;
use crate::feasibility::recommended_max;
use crate::generator::generate_chain;
use crate::grammar::RuleSet;
use crate::hooks::ProgressHooks;
use crate::oracle::{CacheStats, PrimalityCache, enumerate_sophie_germain};
use crate::safe_primes::derive_safe_primes;
use crate::transitions::{TransitionAnalysis, analyze_transitions, transition_rows};

/// Owns the grammar and the primality cache for a run of the laboratory.
///
/// `Session` is `Sync`: generators on several threads may share one and its cache.
#[derive(Debug, Default)]
pub struct Session {
    rules: RuleSet,
    cache: PrimalityCache,
}

impl Session {
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            cache: PrimalityCache::new(),
        }
    }

    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    #[must_use]
    pub fn oracle(&self) -> &PrimalityCache {
        &self.cache
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn generate_chain<R, H>(&self, params: &GenerationParams, rng: &mut R, hooks: &mut H) -> Chain
    where
        R: Rng + ?Sized,
        H: ProgressHooks + ?Sized,
    {
        generate_chain(params, &self.rules, &self.cache, rng, hooks)
    }

    pub fn generate_safe_primes<R, H>(
        &self,
        params: &GenerationParams,
        rng: &mut R,
        hooks: &mut H,
    ) -> SafePrimeSet
    where
        R: Rng + ?Sized,
        H: ProgressHooks + ?Sized,
    {
        derive_safe_primes(params, &self.rules, &self.cache, rng, hooks)
    }

    pub fn generate_baseline<R: Rng + ?Sized>(
        &self,
        range: &SearchRange,
        count: usize,
        rng: &mut R,
    ) -> Chain {
        sample_baseline(range, count, &self.cache, rng)
    }

    #[must_use]
    pub fn analyze(&self, grammar: &Chain, baseline: &Chain, safe: &SafePrimeSet) -> ComparisonReport {
        analyze(grammar, baseline, safe)
    }

    #[must_use]
    pub fn recommended_max(&self, interval: i64, flags: GrammarFlags) -> u64 {
        recommended_max(interval, flags)
    }

    #[must_use]
    pub fn enumerate_sophie_germain(&self, range: &SearchRange) -> Vec<i64> {
        enumerate_sophie_germain(&self.cache, range)
    }

    #[must_use]
    pub fn transition_rows(&self, primes: &[i64]) -> Vec<TransitionRow> {
        transition_rows(primes)
    }

    #[must_use]
    pub fn analyze_transitions(&self, rows: &[TransitionRow]) -> TransitionAnalysis {
        analyze_transitions(rows)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::hooks::NoHooks;

    #[test]
    fn session_is_shareable_across_threads() {
        let session = Arc::new(Session::default());
        let handles: Vec<_> = (0..4)
            .map(|seed| {
                let session = Arc::clone(&session);
                thread::spawn(move || {
                    let mut rng = StdRng::seed_from_u64(seed);
                    session.generate_baseline(&SearchRange::new(0, 20_000), 5, &mut rng)
                })
            })
            .collect();

        for handle in handles {
            let chain = handle.join().unwrap();
            assert!(chain.len() <= 5);
        }
        assert!(session.cache_stats().entries > 0);
    }

    #[test]
    fn cache_is_shared_between_calls() {
        let session = Session::default();
        let params = GenerationParams::new(SearchRange::new(0, 20_000), 3);
        let mut rng = StdRng::seed_from_u64(42);
        let _ = session.generate_chain(&params, &mut rng, &mut NoHooks);
        let misses = session.cache_stats().misses;

        let mut rng = StdRng::seed_from_u64(42);
        let _ = session.generate_chain(&params, &mut rng, &mut NoHooks);
        assert_eq!(session.cache_stats().misses, misses);
    }
}
