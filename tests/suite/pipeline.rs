//! Safe primes, baseline and analysis wired together through a session

use std::collections::HashSet;

use germain_config::GermainConfig;
use germain_core::{NoHooks, RuleSet, Session, recommended_max};
use germain_types::{Budget, Family, GenerationParams, GrammarFlags, SearchRange};

use crate::common::{assert_valid_chain, config_file, rng};

#[test]
fn safe_pairs_satisfy_the_companion_relation() {
    let session = Session::default();
    let params = GenerationParams::new(SearchRange::new(0, 100_000), 5)
        .with_budget(Budget::from_secs_f64(5.0));
    let set = session.generate_safe_primes(&params, &mut rng(42), &mut NoHooks);

    // Every in-class chain element has an in-class companion, so the set
    // fills as long as the chain reaches five elements.
    assert_eq!(set.len(), 5);
    for pair in set.pairs() {
        assert_eq!(pair.safe, 2 * pair.source + 1);
        assert_eq!(pair.source.rem_euclid(30), 29);
        assert_eq!(pair.safe.rem_euclid(30), 29);
        assert!(session.oracle().is_prime(pair.source));
        assert!(session.oracle().is_prime(pair.safe));
    }
}

#[test]
fn baseline_is_distinct_and_sorted() {
    let session = Session::default();
    let chain = session.generate_baseline(&SearchRange::new(0, 200_000), 25, &mut rng(8));

    let unique: HashSet<i64> = chain.primes().iter().copied().collect();
    assert_eq!(unique.len(), chain.len());
    assert!(chain.primes().is_sorted());
    assert_valid_chain(&chain, session.oracle());
}

#[test]
fn degenerate_baseline_ranges_terminate() {
    let session = Session::default();
    assert!(
        session
            .generate_baseline(&SearchRange::new(100, 100), 3, &mut rng(1))
            .is_empty()
    );
    assert!(
        session
            .generate_baseline(&SearchRange::new(100, 0), 3, &mut rng(1))
            .is_empty()
    );
}

#[test]
fn recommendation_for_the_standard_interval() {
    assert_eq!(recommended_max(100_000, GrammarFlags::ALL), 17);
    assert_eq!(Session::default().recommended_max(100_000, GrammarFlags::ALL), 17);
}

#[test]
fn full_comparison() {
    let session = Session::default();
    let params = GenerationParams::new(SearchRange::new(0, 100_000), 8)
        .with_budget(Budget::from_secs_f64(5.0));

    let grammar = session.generate_chain(&params, &mut rng(42), &mut NoHooks);
    let baseline = session.generate_baseline(&params.range, grammar.len(), &mut rng(43));
    let safe = session.generate_safe_primes(&params, &mut rng(44), &mut NoHooks);
    let report = session.analyze(&grammar, &baseline, &safe);

    assert_eq!(report.grammar.len, grammar.len());
    assert_eq!(report.baseline.len, baseline.len());
    assert_eq!(report.safe_primes, safe.len());
    for p in &report.differences.grammar_only {
        assert!(grammar.primes().contains(p));
        assert!(!safe.source_primes().contains(p));
    }
    // every grammar prime sits in the 348 family
    let cell = report.transitions.cell(Family::F348, Family::F348).unwrap();
    assert_eq!(cell.samples, grammar.len().saturating_sub(2));
    assert_eq!(report.transitions.totals.rows, grammar.len().saturating_sub(1));

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["transitions"]["cells"].as_array().unwrap().len() == 9);
}

#[test]
fn lab_enumeration_feeds_transition_analysis() {
    let session = Session::default();
    let primes = session.enumerate_sophie_germain(&SearchRange::new(11, 1_000));
    assert_eq!(&primes[..6], &[11, 23, 29, 41, 53, 83]);

    let rows = session.transition_rows(&primes);
    assert_eq!(rows.len(), primes.len() - 1);
    let analysis = session.analyze_transitions(&rows);
    assert_eq!(analysis.totals.rows, rows.len());
    assert_eq!(
        analysis.totals.g1 + analysis.totals.g3,
        rows.len(),
        "G1 and G3 partition the deltas"
    );
    assert_eq!(analysis.symmetry.len(), 3);
}

#[test]
fn configured_tuning_reaches_the_session() {
    let file = config_file(
        r"
[search]
end = 30000
count = 4

[grammar]
g3 = false

[tuning]
g2_soft_accept = 0.0
",
    );
    let config = GermainConfig::load(Some(file.path())).unwrap().unwrap();
    let session = Session::new(RuleSet::standard().with_tuning(config.tuning()));
    assert_eq!(session.rules().tuning().g2_soft_accept, 0.0);

    let params = GenerationParams::new(config.range(), config.count())
        .with_flags(config.flags())
        .with_budget(Budget::from_secs_f64(2.0));
    let chain = session.generate_chain(&params, &mut rng(5), &mut NoHooks);
    assert!(chain.len() <= 4);
    for pair in chain.gaps().windows(2) {
        assert!(session.rules().permits(pair[0], pair[1]));
    }
}
