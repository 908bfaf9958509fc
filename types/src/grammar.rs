use std::fmt;

use serde::{Deserialize, Serialize};

// Default value function for serde (bool::default() is false, so only true needs a fn)
const fn default_true() -> bool {
    true
}

/// Which grammar layers drive gap selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarFlags {
    /// G1: draw nominal gaps from the common-gap alphabet.
    #[serde(default = "default_true")]
    pub g1: bool,
    /// G2: discourage gap bigrams outside the permitted transitions.
    #[serde(default = "default_true")]
    pub g2: bool,
    /// G3: inject rare anomalous gaps and excursions.
    #[serde(default = "default_true")]
    pub g3: bool,
}

impl GrammarFlags {
    pub const ALL: Self = Self {
        g1: true,
        g2: true,
        g3: true,
    };

    pub const NONE: Self = Self {
        g1: false,
        g2: false,
        g3: false,
    };

    #[must_use]
    pub const fn any(self) -> bool {
        self.g1 || self.g2 || self.g3
    }
}

impl Default for GrammarFlags {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Display for GrammarFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active: Vec<&str> = [(self.g1, "G1"), (self.g2, "G2"), (self.g3, "G3")]
            .into_iter()
            .filter_map(|(on, name)| on.then_some(name))
            .collect();
        if active.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&active.join(", "))
        }
    }
}

/// Probabilities and ranges steering the stochastic walk.
///
/// ```toml
/// [tuning]
/// sequence_threshold = 0.001
/// major_threshold = 0.01
/// minor_threshold = 0.03
/// g2_soft_accept = 0.5
/// free_gap_max = 40
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarTuning {
    /// Draws below this fire a fixed anomalous excursion.
    pub sequence_threshold: f64,
    /// Draws below this (and above `sequence_threshold`) take a major-tier gap.
    pub major_threshold: f64,
    /// Draws below this (and above `major_threshold`) take a minor-tier gap.
    pub minor_threshold: f64,
    /// Probability that a gap bigram outside G2 is kept anyway.
    ///
    /// G2 is a soft constraint: disallowed transitions are discouraged, not
    /// forbidden. 0.0 makes it a hard grammar, 1.0 disables it.
    pub g2_soft_accept: f64,
    /// Upper bound of the uniform gap used when G1 is off.
    pub free_gap_max: i64,
}

impl Default for GrammarTuning {
    fn default() -> Self {
        Self {
            sequence_threshold: 0.001,
            major_threshold: 0.01,
            minor_threshold: 0.03,
            g2_soft_accept: 0.5,
            free_gap_max: 40,
        }
    }
}
