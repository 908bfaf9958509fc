//! Core logic for the Germain laboratory.
//!
//! This crate contains the primality oracle, the grammar-constrained chain
//! generator, the safe-prime filter, the random baseline sampler and the
//! comparative analyzer. [`Session`] bundles the rule tables and the
//! primality cache and is the usual entry point.
//!
//! Generation is single-threaded, synchronous and never fails: invalid
//! requests, exhausted budgets and empty ranges yield empty or partial
//! results, reported through `tracing`.

pub mod analysis;
mod baseline;
pub mod feasibility;
pub mod generator;
pub mod grammar;
pub mod hooks;
pub mod oracle;
pub mod residue;
mod safe_primes;
mod session;
pub mod transitions;

pub use analysis::{ChainSummary, ComparisonReport, MotifTable, Ranked, SetDifference, analyze, mean};
pub use baseline::{DRAWS_PER_ELEMENT, sample_baseline};
pub use feasibility::{Feasibility, check_feasibility, recommended_max};
pub use generator::{ChainWalk, Draw, Phase, Rejection, StepOutcome, generate_chain};
pub use grammar::RuleSet;
pub use hooks::{NoHooks, ProgressHooks, TracingHooks, estimate_remaining};
pub use oracle::{CacheStats, PrimalityCache, enumerate_sophie_germain, safe_companion};
pub use residue::{ResidueClass, first_in_residue_at_or_after, in_target_residue};
pub use safe_primes::{derive_safe_primes, filter_safe_primes, overshoot};
pub use session::Session;
pub use transitions::{
    AutoInterCheck, ClassificationTotals, DeltaSummary, SymmetryCheck, TransitionAnalysis,
    TransitionCell, analyze_transitions, transition_rows,
};
