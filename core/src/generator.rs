//! Grammar-constrained chain generator.
//!
//! The walk starts from the first Sophie Germain prime of the target residue
//! class at or after `start`, then repeatedly draws a gap `k` and tries the
//! candidate `tail + 30 * k`. Randomness and state are kept apart:
//!
//! ```text
//! ChainWalk::draw(rng) -> Draw              (all randomness consumed here)
//! ChainWalk::apply(draw, limit) -> StepOutcome   (deterministic)
//! ```
//!
//! # Phases
//!
//! ```text
//! Seeking --seed found--> Normal --anomaly drawn--> PostAnomaly
//!                           ^                            |
//!                           +--normal gap accepted-------+
//! ```
//!
//! Anomalies never chain: while in `PostAnomaly` the G3 tiers are skipped and
//! every draw comes from the normal branch.

use rand::{Rng, RngExt};

use germain_types::{Chain, GenerationParams, GrammarFlags, MODULUS, SearchRange};

use crate::grammar::RuleSet;
use crate::hooks::{ProgressHooks, estimate_remaining};
use crate::oracle::PrimalityCache;
use crate::residue::{first_in_residue_at_or_after, in_target_residue};

/// Time hooks fire once every this many attempts.
const TIME_HOOK_INTERVAL: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No seed prime yet.
    Seeking,
    /// Anomalies may fire on the next draw.
    Normal,
    /// The last drawn step was anomalous; anomalies are suppressed.
    PostAnomaly,
}

/// The random part of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw {
    /// Apply the fixed excursion at this index of the rule set.
    Excursion(usize),
    Gap {
        gap: i64,
        /// Drawn from a G3 tier.
        anomalous: bool,
        /// The G2 bigram check fired and lost its soft-acceptance roll.
        discouraged: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Unseeded,
    Discouraged,
    OutOfRange,
    OffResidue,
    NotSophieGermain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Accepted { prime: i64, gap: i64 },
    /// An excursion ran; `accepted` of its intermediates joined the chain.
    Excursion { accepted: usize },
    Rejected(Rejection),
}

/// State of one generation walk.
#[derive(Debug)]
pub struct ChainWalk<'a> {
    rules: &'a RuleSet,
    oracle: &'a PrimalityCache,
    flags: GrammarFlags,
    range: SearchRange,
    chain: Chain,
    previous_gap: Option<i64>,
    phase: Phase,
}

impl<'a> ChainWalk<'a> {
    #[must_use]
    pub fn new(
        rules: &'a RuleSet,
        oracle: &'a PrimalityCache,
        flags: GrammarFlags,
        range: SearchRange,
    ) -> Self {
        Self {
            rules,
            oracle,
            flags,
            range,
            chain: Chain::new(),
            previous_gap: None,
            phase: Phase::Seeking,
        }
    }

    /// Find the first in-class Sophie Germain prime in the range and start the chain there.
    pub fn seed(&mut self) -> Option<i64> {
        let first = first_in_residue_at_or_after(self.range.start)?;
        if first > self.range.end {
            return None;
        }
        let seed = (first..=self.range.end)
            .step_by(MODULUS as usize)
            .find(|&n| self.oracle.is_sophie_germain(n))?;

        self.chain = Chain::seeded(seed);
        self.previous_gap = None;
        self.phase = Phase::Normal;
        Some(seed)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    #[must_use]
    pub fn into_chain(self) -> Chain {
        self.chain
    }

    /// Consume randomness for one step.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Draw {
        let tuning = self.rules.tuning();
        let r: f64 = rng.random();

        let mut anomaly = None;
        if self.flags.g3 && self.phase != Phase::PostAnomaly {
            let excursions = self.rules.excursions();
            if r < tuning.sequence_threshold && !excursions.is_empty() {
                return Draw::Excursion(rng.random_range(0..excursions.len()));
            }
            if r < tuning.major_threshold {
                anomaly = pick(rng, self.rules.major_anomalies());
            } else if r < tuning.minor_threshold {
                anomaly = pick(rng, self.rules.minor_anomalies());
            }
        }

        let (gap, anomalous) = match anomaly {
            Some(gap) => (gap, true),
            None => (self.normal_gap(rng), false),
        };

        let disallowed = self.flags.g2
            && self
                .previous_gap
                .is_some_and(|previous| !self.rules.permits(previous, gap));
        let discouraged = disallowed && rng.random::<f64>() >= tuning.g2_soft_accept;

        Draw::Gap {
            gap,
            anomalous,
            discouraged,
        }
    }

    fn normal_gap<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        if self.flags.g1
            && let Some(gap) = pick(rng, self.rules.common_gaps())
        {
            return gap;
        }
        rng.random_range(1..=self.rules.tuning().free_gap_max.max(1))
    }

    /// Apply a draw. Excursions never grow the chain beyond `limit` elements.
    pub fn apply(&mut self, draw: Draw, limit: usize) -> StepOutcome {
        let Some(tail) = self.chain.tail() else {
            return StepOutcome::Rejected(Rejection::Unseeded);
        };

        match draw {
            Draw::Excursion(index) => {
                self.phase = Phase::PostAnomaly;
                let rules = self.rules;
                let Some(sequence) = rules.excursions().get(index) else {
                    return StepOutcome::Excursion { accepted: 0 };
                };

                let mut accepted = 0;
                let mut tail = tail;
                for &gap in sequence {
                    if self.chain.len() >= limit {
                        break;
                    }
                    // Failed intermediates are skipped; the tail stays put.
                    if let Ok(prime) = self.candidate(tail, gap) {
                        self.chain.push(prime, gap);
                        self.previous_gap = Some(gap);
                        tail = prime;
                        accepted += 1;
                    }
                }
                StepOutcome::Excursion { accepted }
            }
            Draw::Gap {
                gap,
                anomalous,
                discouraged,
            } => {
                if anomalous {
                    self.phase = Phase::PostAnomaly;
                }
                if discouraged {
                    return StepOutcome::Rejected(Rejection::Discouraged);
                }

                match self.candidate(tail, gap) {
                    Ok(prime) => {
                        self.chain.push(prime, gap);
                        self.previous_gap = Some(gap);
                        if !anomalous {
                            self.phase = Phase::Normal;
                        }
                        StepOutcome::Accepted { prime, gap }
                    }
                    Err(rejection) => StepOutcome::Rejected(rejection),
                }
            }
        }
    }

    fn candidate(&self, tail: i64, gap: i64) -> Result<i64, Rejection> {
        let candidate = gap
            .checked_mul(MODULUS)
            .and_then(|step| tail.checked_add(step))
            .ok_or(Rejection::OutOfRange)?;
        if candidate > self.range.end {
            return Err(Rejection::OutOfRange);
        }
        if !in_target_residue(candidate) {
            return Err(Rejection::OffResidue);
        }
        if !self.oracle.is_sophie_germain(candidate) {
            return Err(Rejection::NotSophieGermain);
        }
        Ok(candidate)
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, values: &[i64]) -> Option<i64> {
    if values.is_empty() {
        return None;
    }
    Some(values[rng.random_range(0..values.len())])
}

/// Build a chain of in-class Sophie Germain primes under the grammar in `rules`.
///
/// Best effort: the result holds at most `target_count` primes and may be
/// shorter (or empty) when the budget expires, the range has no seed, or the
/// request is invalid. None of these are errors.
pub fn generate_chain<R, H>(
    params: &GenerationParams,
    rules: &RuleSet,
    oracle: &PrimalityCache,
    rng: &mut R,
    hooks: &mut H,
) -> Chain
where
    R: Rng + ?Sized,
    H: ProgressHooks + ?Sized,
{
    if let Err(err) = params.validate() {
        tracing::warn!(%err, "Chain generation request rejected");
        return Chain::new();
    }
    let target = params.target_count;
    if target == 0 {
        return Chain::new();
    }

    let deadline = params.budget.start();
    let mut walk = ChainWalk::new(rules, oracle, params.flags, params.range);
    let Some(seed) = walk.seed() else {
        tracing::info!(
            start = params.range.start,
            end = params.range.end,
            "No Sophie Germain seed in range"
        );
        return Chain::new();
    };
    tracing::debug!(seed, grammar = %params.flags, "Chain seeded");

    let mut attempts: u64 = 0;
    let mut rejections = RejectionTally::default();
    while walk.chain().len() < target {
        if deadline.expired() {
            tracing::info!(
                found = walk.chain().len(),
                target,
                attempts,
                "Chain generation budget expired"
            );
            break;
        }
        attempts += 1;

        hooks.on_progress(walk.chain().len(), target);
        if attempts % TIME_HOOK_INTERVAL == 0 {
            let elapsed = deadline.elapsed();
            hooks.on_time(
                elapsed,
                estimate_remaining(elapsed, walk.chain().len(), target),
            );
        }

        let draw = walk.draw(rng);
        if let StepOutcome::Rejected(rejection) = walk.apply(draw, target) {
            rejections.record(rejection);
        }
    }

    tracing::debug!(
        attempts,
        discouraged = rejections.discouraged,
        out_of_range = rejections.out_of_range,
        not_sophie_germain = rejections.not_sophie_germain,
        "Chain walk statistics"
    );
    walk.into_chain()
}

#[derive(Debug, Default)]
struct RejectionTally {
    discouraged: u64,
    out_of_range: u64,
    not_sophie_germain: u64,
}

impl RejectionTally {
    fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::Discouraged => self.discouraged += 1,
            Rejection::OutOfRange => self.out_of_range += 1,
            Rejection::NotSophieGermain => self.not_sophie_germain += 1,
            Rejection::Unseeded | Rejection::OffResidue => {}
        }
    }
}
