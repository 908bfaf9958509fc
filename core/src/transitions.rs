//! Residue-family transition analysis over consecutive primes.
//!
//! Input is a list of [`TransitionRow`]s, built here from a prime sequence or
//! read back from a persisted table by an outer layer. The analysis covers:
//!
//! - classification totals (G1/G2/G3 per delta)
//! - delta summary (extremes, mean, most frequent deltas and transitions)
//! - a 3×3 family transition matrix
//! - per-cell delta motifs: row `i` files the motif `(delta[i], delta[i + 1])`
//!   under the cell `(departure_family[i], arrival_family[i])`
//! - global delta trigrams
//! - the auto vs inter mean-delta check and the inverse-symmetry check

use serde::Serialize;

use germain_types::{Family, TransitionRow};

use crate::analysis::{MotifTable, Ranked, mean, mean_f64, rank_by_frequency};

/// Motifs ranked per cell.
pub const CELL_RANKS: usize = 3;
/// Entries in the delta, transition and trigram top lists.
pub const TOP_LIST: usize = 10;

/// Family pairs checked for inverse symmetry, in clockwise order.
pub const CLOCKWISE: [(Family, Family); 3] = [
    (Family::F132, Family::F276),
    (Family::F276, Family::F348),
    (Family::F348, Family::F132),
];

/// One row per consecutive pair of `primes`, indexed from 0.
#[must_use]
pub fn transition_rows(primes: &[i64]) -> Vec<TransitionRow> {
    primes
        .windows(2)
        .enumerate()
        .map(|(index, pair)| TransitionRow::between(index, pair[0], pair[1]))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationTotals {
    pub rows: usize,
    pub g1: usize,
    pub g2: usize,
    pub g3: usize,
}

impl ClassificationTotals {
    #[must_use]
    pub fn of(rows: &[TransitionRow]) -> Self {
        rows.iter().fold(
            Self {
                rows: rows.len(),
                ..Self::default()
            },
            |mut totals, row| {
                totals.g1 += usize::from(row.class.g1);
                totals.g2 += usize::from(row.class.g2);
                totals.g3 += usize::from(row.class.g3);
                totals
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeltaSummary {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub mean: Option<f64>,
    pub top_deltas: Vec<Ranked<i64>>,
    pub departure_families: Vec<Ranked<Family>>,
    pub top_transitions: Vec<Ranked<(Family, Family)>>,
}

impl DeltaSummary {
    #[must_use]
    pub fn of(rows: &[TransitionRow]) -> Self {
        let deltas: Vec<i64> = rows.iter().map(|row| row.delta).collect();
        let mut top_deltas = rank_by_frequency(deltas.iter().copied());
        top_deltas.truncate(TOP_LIST);
        let mut top_transitions =
            rank_by_frequency(rows.iter().map(|row| (row.departure_family, row.arrival_family)));
        top_transitions.truncate(TOP_LIST);

        Self {
            min: deltas.iter().copied().min(),
            max: deltas.iter().copied().max(),
            mean: (!deltas.is_empty()).then(|| mean(&deltas)),
            top_deltas,
            departure_families: rank_by_frequency(rows.iter().map(|row| row.departure_family)),
            top_transitions,
        }
    }
}

/// Signature statistics of one `(departure, arrival)` family cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionCell {
    pub departure: Family,
    pub arrival: Family,
    /// Motifs filed under this cell.
    pub samples: usize,
    pub mean_delta: Option<f64>,
    /// The most frequent motifs, best first.
    pub ranks: Vec<Ranked<Vec<i64>>>,
}

impl TransitionCell {
    #[must_use]
    pub fn top_motif(&self) -> Option<&[i64]> {
        self.ranks.first().map(|entry| entry.value.as_slice())
    }

    #[must_use]
    pub fn is_auto(&self) -> bool {
        self.departure == self.arrival
    }
}

/// Do self-transitions cost more than transitions between families?
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AutoInterCheck {
    /// Mean of the diagonal cells' mean deltas, 0 without data.
    pub auto_mean: f64,
    /// Mean of the off-diagonal cells' mean deltas, 0 without data.
    pub inter_mean: f64,
    pub auto_exceeds_inter: bool,
}

/// Top motif of `p -> q` against the reversed top motif of `q -> p`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymmetryCheck {
    pub forward: (Family, Family),
    pub forward_motif: Option<Vec<i64>>,
    pub reverse_motif: Option<Vec<i64>>,
    /// `None` when either cell has no motif.
    pub matches: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionAnalysis {
    pub totals: ClassificationTotals,
    pub deltas: DeltaSummary,
    /// Row counts by `[departure][arrival]` in [`Family::KNOWN`] order.
    pub matrix: [[usize; 3]; 3],
    /// Nine cells, row-major in [`Family::KNOWN`] order.
    pub cells: Vec<TransitionCell>,
    pub top_trigrams: Vec<Ranked<Vec<i64>>>,
    pub auto_inter: AutoInterCheck,
    pub symmetry: Vec<SymmetryCheck>,
    /// Mean of the per-cell mean deltas along the clockwise cycle.
    pub clockwise_mean: Option<f64>,
}

impl TransitionAnalysis {
    #[must_use]
    pub fn cell(&self, departure: Family, arrival: Family) -> Option<&TransitionCell> {
        let (row, column) = (departure.index()?, arrival.index()?);
        self.cells.get(row * 3 + column)
    }
}

#[derive(Default)]
struct CellAccumulator {
    motifs: Vec<Vec<i64>>,
    deltas: Vec<i64>,
}

#[must_use]
pub fn analyze_transitions(rows: &[TransitionRow]) -> TransitionAnalysis {
    let mut matrix = [[0_usize; 3]; 3];
    for row in rows {
        if let (Some(departure), Some(arrival)) =
            (row.departure_family.index(), row.arrival_family.index())
        {
            matrix[departure][arrival] += 1;
        }
    }

    let mut accumulators: [CellAccumulator; 9] = Default::default();
    for pair in rows.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        let (Some(departure), Some(arrival)) = (
            current.departure_family.index(),
            current.arrival_family.index(),
        ) else {
            continue;
        };
        let accumulator = &mut accumulators[departure * 3 + arrival];
        accumulator.motifs.push(vec![current.delta, next.delta]);
        accumulator.deltas.push(current.delta);
    }

    let cells: Vec<TransitionCell> = accumulators
        .into_iter()
        .enumerate()
        .map(|(slot, accumulator)| {
            let table = MotifTable::from_motifs(accumulator.motifs);
            TransitionCell {
                departure: Family::KNOWN[slot / 3],
                arrival: Family::KNOWN[slot % 3],
                samples: accumulator.deltas.len(),
                mean_delta: (!accumulator.deltas.is_empty()).then(|| mean(&accumulator.deltas)),
                ranks: table.top(CELL_RANKS).to_vec(),
            }
        })
        .collect();

    let deltas: Vec<i64> = rows.iter().map(|row| row.delta).collect();
    let top_trigrams = MotifTable::from_windows(&deltas, 3).top(TOP_LIST).to_vec();

    let mut analysis = TransitionAnalysis {
        totals: ClassificationTotals::of(rows),
        deltas: DeltaSummary::of(rows),
        matrix,
        cells,
        top_trigrams,
        auto_inter: AutoInterCheck {
            auto_mean: 0.0,
            inter_mean: 0.0,
            auto_exceeds_inter: false,
        },
        symmetry: Vec::new(),
        clockwise_mean: None,
    };
    analysis.auto_inter = auto_inter_check(&analysis.cells);
    analysis.symmetry = CLOCKWISE
        .iter()
        .map(|&(p, q)| symmetry_check(&analysis, p, q))
        .collect();
    let clockwise: Vec<f64> = CLOCKWISE
        .iter()
        .filter_map(|&(p, q)| analysis.cell(p, q).and_then(|cell| cell.mean_delta))
        .collect();
    analysis.clockwise_mean = mean_f64(&clockwise);

    tracing::debug!(
        rows = rows.len(),
        anomalies = analysis.totals.g3,
        "Transition analysis complete"
    );
    analysis
}

fn auto_inter_check(cells: &[TransitionCell]) -> AutoInterCheck {
    let (autos, inters): (Vec<&TransitionCell>, Vec<&TransitionCell>) =
        cells.iter().partition(|cell| cell.is_auto());
    let cell_means = |cells: Vec<&TransitionCell>| -> f64 {
        let means: Vec<f64> = cells.iter().filter_map(|cell| cell.mean_delta).collect();
        mean_f64(&means).unwrap_or(0.0)
    };
    let auto_mean = cell_means(autos);
    let inter_mean = cell_means(inters);
    AutoInterCheck {
        auto_mean,
        inter_mean,
        auto_exceeds_inter: auto_mean > inter_mean,
    }
}

fn symmetry_check(analysis: &TransitionAnalysis, p: Family, q: Family) -> SymmetryCheck {
    let forward_motif = analysis
        .cell(p, q)
        .and_then(TransitionCell::top_motif)
        .map(<[i64]>::to_vec);
    let reverse_motif = analysis
        .cell(q, p)
        .and_then(TransitionCell::top_motif)
        .map(<[i64]>::to_vec);
    let matches = match (&forward_motif, &reverse_motif) {
        (Some(forward), Some(reverse)) => {
            let reversed: Vec<i64> = reverse.iter().rev().copied().collect();
            Some(*forward == reversed)
        }
        _ => None,
    };
    SymmetryCheck {
        forward: (p, q),
        forward_motif,
        reverse_motif,
        matches,
    }
}
