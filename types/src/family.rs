//! Residue families and the transition rows built between consecutive primes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::MODULUS;

/// Three-way partition of primes by residue modulo 30.
///
/// Families are labelled by the angle of their residue on the mod-30 wheel:
/// 29 -> 348°, 23 -> 276°, 11 -> 132°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Family {
    #[serde(rename = "132")]
    F132,
    #[serde(rename = "276")]
    F276,
    #[serde(rename = "348")]
    F348,
    #[serde(rename = "?")]
    Unknown,
}

impl Family {
    /// The labelled families, in matrix order.
    pub const KNOWN: [Family; 3] = [Family::F132, Family::F276, Family::F348];

    #[must_use]
    pub const fn of(p: i64) -> Self {
        match p.rem_euclid(MODULUS) {
            29 => Family::F348,
            23 => Family::F276,
            11 => Family::F132,
            _ => Family::Unknown,
        }
    }

    /// Row/column index in a 3×3 transition matrix, `None` for unknown.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Family::F132 => Some(0),
            Family::F276 => Some(1),
            Family::F348 => Some(2),
            Family::Unknown => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Family::F132 => "132",
            Family::F276 => "276",
            Family::F348 => "348",
            Family::Unknown => "?",
        }
    }

    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "132" => Family::F132,
            "276" => Family::F276,
            "348" => Family::F348,
            _ => Family::Unknown,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Grammar-layer flags for a raw delta between consecutive primes.
///
/// - G1: fundamental alphabet {6, 12, 18, 24}
/// - G2: stable bricks {6, 12}
/// - G3: anomaly, anything outside the G1 alphabet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaClass {
    pub g1: bool,
    pub g2: bool,
    pub g3: bool,
}

impl DeltaClass {
    const FUNDAMENTAL: [i64; 4] = [6, 12, 18, 24];
    const STABLE: [i64; 2] = [6, 12];

    #[must_use]
    pub fn classify(delta: i64) -> Self {
        let g1 = Self::FUNDAMENTAL.contains(&delta);
        Self {
            g1,
            g2: Self::STABLE.contains(&delta),
            g3: !g1,
        }
    }
}

/// One step between consecutive primes, in the row layout shared with
/// persisted tables: `n, p, fam_p, q, fam_q, delta, G1, G2, G3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRow {
    pub index: usize,
    pub departure: i64,
    pub departure_family: Family,
    pub arrival: i64,
    pub arrival_family: Family,
    pub delta: i64,
    pub class: DeltaClass,
}

impl TransitionRow {
    #[must_use]
    pub fn between(index: usize, departure: i64, arrival: i64) -> Self {
        let delta = arrival - departure;
        Self {
            index,
            departure,
            departure_family: Family::of(departure),
            arrival,
            arrival_family: Family::of(arrival),
            delta,
            class: DeltaClass::classify(delta),
        }
    }

    #[must_use]
    pub fn is_self_transition(&self) -> bool {
        self.departure_family == self.arrival_family
    }
}
