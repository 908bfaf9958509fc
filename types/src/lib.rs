//! Core domain types for Germain.
//!
//! This crate contains pure domain types with no IO, no randomness, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod budget;
mod chain;
mod family;
mod grammar;
mod params;

pub use budget::{Budget, Deadline};
pub use chain::{Chain, ChainError, SafePrimePair, SafePrimeSet};
pub use family::{DeltaClass, Family, TransitionRow};
pub use grammar::{GrammarFlags, GrammarTuning};
pub use params::{GenerationParams, ParamsError, SearchRange};

/// Step modulus of every chain: consecutive elements differ by `MODULUS * k`.
pub const MODULUS: i64 = 30;

/// Residue of the target class ("angle 348°").
pub const TARGET_RESIDUE: i64 = 29;
