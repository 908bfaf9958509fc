//! Residue filter for the target class 29 mod 30.

use germain_types::{MODULUS, TARGET_RESIDUE};

/// A residue class `residue mod modulus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidueClass {
    modulus: i64,
    residue: i64,
}

impl ResidueClass {
    /// 29 mod 30, the "angle 348°" class every chain lives in.
    pub const TARGET: Self = Self {
        modulus: MODULUS,
        residue: TARGET_RESIDUE,
    };

    #[must_use]
    pub const fn modulus(self) -> i64 {
        self.modulus
    }

    #[must_use]
    pub const fn residue(self) -> i64 {
        self.residue
    }

    /// Euclidean remainder, so negative inputs never match by accident.
    #[must_use]
    pub const fn contains(self, n: i64) -> bool {
        n.rem_euclid(self.modulus) == self.residue
    }

    /// Smallest `n >= start` in the class, `None` when it would pass `i64::MAX`.
    /// The scan is at most `modulus - 1` steps.
    #[must_use]
    pub const fn first_at_or_after(self, start: i64) -> Option<i64> {
        let mut n = start;
        while !self.contains(n) {
            n = match n.checked_add(1) {
                Some(next) => next,
                None => return None,
            };
        }
        Some(n)
    }
}

#[must_use]
pub const fn in_target_residue(n: i64) -> bool {
    ResidueClass::TARGET.contains(n)
}

#[must_use]
pub const fn first_in_residue_at_or_after(start: i64) -> Option<i64> {
    ResidueClass::TARGET.first_at_or_after(start)
}
