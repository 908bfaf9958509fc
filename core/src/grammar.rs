//! The three-layer gap grammar.
//!
//! - **G1** common gaps: the nominal alphabet of the walk
//! - **G2** permitted ordered gap pairs: bigrams outside this set are discouraged
//! - **G3** anomalies: a minor tier, a major tier, and fixed multi-step excursions
//!
//! Gaps are multiples of the modulus: a gap `k` moves the tail by `30 * k`.

use std::collections::HashSet;

use germain_types::GrammarTuning;

const COMMON_GAPS: [i64; 12] = [1, 2, 3, 4, 5, 7, 8, 9, 12, 13, 14, 15];

const PERMITTED_BIGRAMS: [(i64, i64); 15] = [
    (1, 8),
    (8, 5),
    (5, 1),
    (2, 13),
    (13, 2),
    (7, 4),
    (4, 7),
    (1, 12),
    (12, 1),
    (9, 3),
    (3, 8),
    (5, 4),
    (4, 9),
    (8, 13),
    (13, 7),
];

const MINOR_ANOMALIES: [i64; 13] = [3, 4, 6, 9, 11, 14, 15, 16, 18, 19, 20, 21, 22];

const MAJOR_ANOMALIES: [i64; 10] = [24, 28, 29, 30, 31, 34, 36, 37, 42, 44];

const EXCURSIONS: [&[i64]; 29] = [
    &[20, 29, 3],
    &[19, 30],
    &[4, 11],
    &[15, 30],
    &[21, 21, 23, 11, 3, 3, 4, 4, 24, 3, 22],
    &[15, 9],
    &[4, 3, 14],
    &[9, 44],
    &[19, 3, 18],
    &[26, 15, 15, 3, 10, 16],
    &[42, 6, 22],
    &[17, 3],
    &[11, 10],
    &[22, 9, 4, 14],
    &[3, 44, 17],
    &[20, 14],
    &[24, 18, 20],
    &[27, 34],
    &[18, 19, 30],
    &[32, 10, 9],
    &[24, 71, 17, 4],
    &[15, 19],
    &[3, 3],
    &[37, 18, 36, 22],
    &[34, 21],
    &[4, 14],
    &[4, 21, 4],
    &[15, 4, 31, 11],
    &[19, 36, 14, 6, 15],
];

/// Read-only rule tables shared by every generation call of a session.
#[derive(Debug, Clone)]
pub struct RuleSet {
    common: Vec<i64>,
    bigrams: HashSet<(i64, i64)>,
    minor: Vec<i64>,
    major: Vec<i64>,
    excursions: Vec<Vec<i64>>,
    tuning: GrammarTuning,
}

impl RuleSet {
    /// The laboratory grammar.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            common: COMMON_GAPS.to_vec(),
            bigrams: PERMITTED_BIGRAMS.into_iter().collect(),
            minor: MINOR_ANOMALIES.to_vec(),
            major: MAJOR_ANOMALIES.to_vec(),
            excursions: EXCURSIONS.iter().map(|seq| seq.to_vec()).collect(),
            tuning: GrammarTuning::default(),
        }
    }

    #[must_use]
    pub fn with_tuning(mut self, tuning: GrammarTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Replace the fixed excursions. Empty sequences are dropped.
    #[must_use]
    pub fn with_excursions(mut self, excursions: Vec<Vec<i64>>) -> Self {
        self.excursions = excursions.into_iter().filter(|seq| !seq.is_empty()).collect();
        self
    }

    #[must_use]
    pub fn with_common_gaps(mut self, common: Vec<i64>) -> Self {
        self.common = common;
        self
    }

    #[must_use]
    pub fn common_gaps(&self) -> &[i64] {
        &self.common
    }

    #[must_use]
    pub fn minor_anomalies(&self) -> &[i64] {
        &self.minor
    }

    #[must_use]
    pub fn major_anomalies(&self) -> &[i64] {
        &self.major
    }

    #[must_use]
    pub fn excursions(&self) -> &[Vec<i64>] {
        &self.excursions
    }

    #[must_use]
    pub fn tuning(&self) -> &GrammarTuning {
        &self.tuning
    }

    /// Is the ordered pair `(previous, next)` a G2 transition?
    #[must_use]
    pub fn permits(&self, previous: i64, next: i64) -> bool {
        self.bigrams.contains(&(previous, next))
    }

    /// Permitted transitions, sorted, for reporting.
    #[must_use]
    pub fn permitted_bigrams(&self) -> Vec<(i64, i64)> {
        let mut pairs: Vec<_> = self.bigrams.iter().copied().collect();
        pairs.sort_unstable();
        pairs
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}
