//! Comparative statistics between a grammar chain, a random baseline and the
//! safe-prime set derived from the grammar.
//!
//! Everything here is a pure function of its inputs.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use serde::Serialize;

use germain_types::{Chain, SafePrimeSet};

use crate::transitions::{TransitionAnalysis, analyze_transitions, transition_rows};

/// Motifs listed per chain in a [`ComparisonReport`].
pub const REPORT_TOP_MOTIFS: usize = 5;

/// Arithmetic mean, NaN for an empty slice.
#[must_use]
pub fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

/// Mean of floats, `None` for an empty slice.
#[must_use]
pub(crate) fn mean_f64(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// A value and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranked<T> {
    pub value: T,
    pub count: usize,
}

/// Count occurrences and rank by descending count. Ties keep first-encounter order.
pub fn rank_by_frequency<T, I>(items: I) -> Vec<Ranked<T>>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut slots: HashMap<T, usize> = HashMap::new();
    let mut ranked: Vec<Ranked<T>> = Vec::new();
    for item in items {
        if let Some(&slot) = slots.get(&item) {
            ranked[slot].count += 1;
        } else {
            slots.insert(item.clone(), ranked.len());
            ranked.push(Ranked {
                value: item,
                count: 1,
            });
        }
    }
    // stable: equal counts stay in encounter order
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// Frequency table of gap n-grams.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MotifTable {
    ranked: Vec<Ranked<Vec<i64>>>,
}

impl MotifTable {
    /// Count every window of `width` consecutive values.
    #[must_use]
    pub fn from_windows(values: &[i64], width: usize) -> Self {
        if width == 0 {
            return Self::default();
        }
        Self::from_motifs(values.windows(width).map(<[i64]>::to_vec))
    }

    #[must_use]
    pub fn from_motifs<I: IntoIterator<Item = Vec<i64>>>(motifs: I) -> Self {
        Self {
            ranked: rank_by_frequency(motifs),
        }
    }

    #[must_use]
    pub fn top(&self, n: usize) -> &[Ranked<Vec<i64>>] {
        &self.ranked[..n.min(self.ranked.len())]
    }

    #[must_use]
    pub fn most_frequent(&self) -> Option<&Ranked<Vec<i64>>> {
        self.ranked.first()
    }

    #[must_use]
    pub fn count_of(&self, motif: &[i64]) -> usize {
        self.ranked
            .iter()
            .find(|entry| entry.value == motif)
            .map_or(0, |entry| entry.count)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Primes of the grammar chain without a derived safe prime, and sources of
/// the safe set that the grammar chain does not contain. Both sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetDifference {
    pub grammar_only: Vec<i64>,
    pub safe_only: Vec<i64>,
}

impl SetDifference {
    #[must_use]
    pub fn between(grammar: &[i64], safe_sources: &[i64]) -> Self {
        let grammar: BTreeSet<i64> = grammar.iter().copied().collect();
        let sources: BTreeSet<i64> = safe_sources.iter().copied().collect();
        Self {
            grammar_only: grammar.difference(&sources).copied().collect(),
            safe_only: sources.difference(&grammar).copied().collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grammar_only.is_empty() && self.safe_only.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainSummary {
    pub len: usize,
    /// NaN (JSON `null`) without gaps.
    pub mean_gap: f64,
    pub top_bigrams: Vec<Ranked<Vec<i64>>>,
    pub top_trigrams: Vec<Ranked<Vec<i64>>>,
}

impl ChainSummary {
    #[must_use]
    pub fn of(chain: &Chain, top: usize) -> Self {
        Self {
            len: chain.len(),
            mean_gap: mean(chain.gaps()),
            top_bigrams: MotifTable::from_windows(chain.gaps(), 2).top(top).to_vec(),
            top_trigrams: MotifTable::from_windows(chain.gaps(), 3).top(top).to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub grammar: ChainSummary,
    pub baseline: ChainSummary,
    pub safe_primes: usize,
    pub differences: SetDifference,
    pub transitions: TransitionAnalysis,
}

/// Compare a grammar chain with its random baseline and derived safe primes.
#[must_use]
pub fn analyze(grammar: &Chain, baseline: &Chain, safe: &SafePrimeSet) -> ComparisonReport {
    ComparisonReport {
        grammar: ChainSummary::of(grammar, REPORT_TOP_MOTIFS),
        baseline: ChainSummary::of(baseline, REPORT_TOP_MOTIFS),
        safe_primes: safe.len(),
        differences: SetDifference::between(grammar.primes(), &safe.source_primes()),
        transitions: analyze_transitions(&transition_rows(grammar.primes())),
    }
}
