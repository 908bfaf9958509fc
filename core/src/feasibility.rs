//! Rough chain-length recommendation for an interval and grammar.
//!
//! The density of in-class Sophie Germain primes falls off slowly with
//! magnitude; one per ~2000 integers is a conservative estimate at laboratory
//! scale. G2 and G3 each reject a share of otherwise valid candidates.

use germain_types::GrammarFlags;

const INTEGERS_PER_ELEMENT: f64 = 2000.0;
const G2_FACTOR: f64 = 0.7;
const G3_FACTOR: f64 = 0.5;
const FLOOR: u64 = 5;

/// `max(5, floor(interval / 2000 × (0.7 if G2) × (0.5 if G3)))`.
#[must_use]
pub fn recommended_max(interval: i64, flags: GrammarFlags) -> u64 {
    let mut estimate = interval.max(0) as f64 / INTEGERS_PER_ELEMENT;
    if flags.g2 {
        estimate *= G2_FACTOR;
    }
    if flags.g3 {
        estimate *= G3_FACTOR;
    }
    (estimate.floor() as u64).max(FLOOR)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feasibility {
    Feasible,
    ExceedsRecommendation {
        requested: usize,
        recommended: u64,
        what: &'static str,
    },
}

impl Feasibility {
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        matches!(self, Feasibility::Feasible)
    }
}

/// Compare requested chain and safe-prime counts against the recommendation.
///
/// The chain is checked first; only the first excess is reported.
#[must_use]
pub fn check_feasibility(
    interval: i64,
    flags: GrammarFlags,
    requested_chain: usize,
    requested_safe: usize,
) -> Feasibility {
    let recommended = recommended_max(interval, flags);
    let exceeds = |requested: usize| u64::try_from(requested).map_or(true, |n| n > recommended);

    if exceeds(requested_chain) {
        return Feasibility::ExceedsRecommendation {
            requested: requested_chain,
            recommended,
            what: "chain",
        };
    }
    if exceeds(requested_safe) {
        return Feasibility::ExceedsRecommendation {
            requested: requested_safe,
            recommended,
            what: "safe primes",
        };
    }
    Feasibility::Feasible
}
