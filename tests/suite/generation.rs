//! Chain generator behaviour across grammar configurations

use germain_core::{NoHooks, PrimalityCache, RuleSet, Session, generate_chain};
use germain_types::{Budget, GenerationParams, GrammarFlags, GrammarTuning, SearchRange};

use crate::common::{assert_valid_chain, rng};

fn params(end: i64, count: usize) -> GenerationParams {
    GenerationParams::new(SearchRange::new(0, end), count)
}

#[test]
fn seeded_run_is_deterministic_and_complete() {
    let session = Session::default();
    let params = params(20_000, 5);

    let first = session.generate_chain(&params, &mut rng(42), &mut NoHooks);
    let second = session.generate_chain(&params, &mut rng(42), &mut NoHooks);

    assert_eq!(first.len(), 5);
    assert_eq!(first, second);
    assert_eq!(first.primes()[0], 29);
    assert_valid_chain(&first, session.oracle());
}

#[test]
fn fresh_cache_does_not_change_the_result() {
    let params = params(20_000, 5);
    let warm = Session::default();
    let _ = warm.generate_chain(&params, &mut rng(7), &mut NoHooks);
    let from_warm = warm.generate_chain(&params, &mut rng(42), &mut NoHooks);
    let from_cold = Session::default().generate_chain(&params, &mut rng(42), &mut NoHooks);
    assert_eq!(from_warm, from_cold);
}

#[test]
fn every_layer_combination_yields_valid_chains() {
    let session = Session::default();
    for bits in 1..8_u8 {
        let flags = GrammarFlags {
            g1: bits & 1 != 0,
            g2: bits & 2 != 0,
            g3: bits & 4 != 0,
        };
        let params = params(50_000, 6)
            .with_flags(flags)
            .with_budget(Budget::from_secs_f64(2.0));
        for seed in 0..3 {
            let chain = session.generate_chain(&params, &mut rng(seed), &mut NoHooks);
            assert!(chain.len() <= 6, "{flags}: {} elements", chain.len());
            assert_valid_chain(&chain, session.oracle());
        }
    }
}

#[test]
fn gaps_match_consecutive_differences() {
    let session = Session::default();
    let chain = session.generate_chain(&params(100_000, 12), &mut rng(3), &mut NoHooks);
    for (gap, pair) in chain.gaps().iter().zip(chain.primes().windows(2)) {
        assert_eq!(pair[1] - pair[0], 30 * gap);
    }
}

#[test]
fn frequent_excursions_keep_the_gap_invariant() {
    let tuning = GrammarTuning {
        sequence_threshold: 0.5,
        major_threshold: 0.6,
        minor_threshold: 0.7,
        ..GrammarTuning::default()
    };
    let rules = RuleSet::standard().with_tuning(tuning);
    let oracle = PrimalityCache::new();
    let params = params(200_000, 10).with_budget(Budget::from_secs_f64(2.0));

    for seed in 0..5 {
        let chain = generate_chain(&params, &rules, &oracle, &mut rng(seed), &mut NoHooks);
        assert!(chain.len() <= 10);
        assert_valid_chain(&chain, &oracle);
    }
}

#[test]
fn invalid_requests_are_empty_not_errors() {
    let session = Session::default();

    let none = params(20_000, 5).with_flags(GrammarFlags::NONE);
    assert!(session.generate_chain(&none, &mut rng(1), &mut NoHooks).is_empty());

    let inverted = GenerationParams::new(SearchRange::new(500, 100), 5);
    assert!(session.generate_chain(&inverted, &mut rng(1), &mut NoHooks).is_empty());

    // no in-class Sophie Germain prime in [30, 80]
    let seedless = GenerationParams::new(SearchRange::new(30, 80), 5);
    assert!(session.generate_chain(&seedless, &mut rng(1), &mut NoHooks).is_empty());

    let zero = params(20_000, 0);
    assert!(session.generate_chain(&zero, &mut rng(1), &mut NoHooks).is_empty());
}

#[test]
fn progress_hooks_observe_the_walk() {
    use germain_core::ProgressHooks;

    #[derive(Default)]
    struct Recorder {
        calls: usize,
        max_current: usize,
        total: usize,
    }

    impl ProgressHooks for Recorder {
        fn on_progress(&mut self, current: usize, total: usize) {
            self.calls += 1;
            self.max_current = self.max_current.max(current);
            self.total = total;
        }
    }

    let session = Session::default();
    let mut recorder = Recorder::default();
    let chain = session.generate_chain(&params(20_000, 5), &mut rng(42), &mut recorder);

    assert!(recorder.calls >= chain.len().saturating_sub(1));
    assert_eq!(recorder.total, 5);
    assert!(recorder.max_current < 5);
}
