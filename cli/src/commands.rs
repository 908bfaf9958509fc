//! Subcommand execution: merge configuration and flags, run the core, render.

use anyhow::{Result, bail};
use rand::rngs::StdRng;
use serde::Serialize;

use germain_config::GermainConfig;
use germain_core::{
    ComparisonReport, Feasibility, Session, TracingHooks, TransitionAnalysis, check_feasibility,
};
use germain_types::{Budget, Chain, GenerationParams, GrammarFlags, SafePrimeSet, SearchRange};

use crate::args::{RangeArgs, RunArgs};
use crate::render;

/// First value the lab enumeration starts from.
pub const LAB_START: i64 = 11;

pub struct Context {
    pub config: GermainConfig,
    pub session: Session,
    pub rng: StdRng,
    pub seed: u64,
    pub json: bool,
}

impl Context {
    fn range(&self, args: RangeArgs) -> SearchRange {
        let configured = self.config.range();
        SearchRange::new(
            args.start.unwrap_or(configured.start),
            args.end.unwrap_or(configured.end),
        )
    }

    fn params(&self, run: &RunArgs, count: usize) -> GenerationParams {
        let budget = run
            .budget
            .map_or_else(|| self.config.budget(), Budget::from_secs_f64);
        GenerationParams::new(self.range(run.range), count)
            .with_flags(run.grammar.apply(self.config.flags()))
            .with_budget(budget)
    }
}

fn ensure_feasible(feasibility: Feasibility, force: bool) -> Result<()> {
    let Feasibility::ExceedsRecommendation {
        requested,
        recommended,
        what,
    } = feasibility
    else {
        return Ok(());
    };

    tracing::warn!(
        requested,
        recommended,
        what,
        "Requested count exceeds the recommendation for this range"
    );
    if !force {
        bail!(
            "{requested} {what} requested but about {recommended} are feasible in this range; \
             widen the range, lower the count or pass --force"
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct ChainOutput<'a> {
    seed: u64,
    range: SearchRange,
    flags: GrammarFlags,
    chain: &'a Chain,
}

#[derive(Serialize)]
struct SafeOutput<'a> {
    seed: u64,
    range: SearchRange,
    flags: GrammarFlags,
    pairs: &'a SafePrimeSet,
}

#[derive(Serialize)]
struct CompareOutput<'a> {
    seed: u64,
    range: SearchRange,
    flags: GrammarFlags,
    grammar: &'a Chain,
    baseline: &'a Chain,
    safe: &'a SafePrimeSet,
    report: &'a ComparisonReport,
}

#[derive(Serialize)]
struct RecommendOutput {
    range: SearchRange,
    interval: i64,
    flags: GrammarFlags,
    recommended: u64,
}

#[derive(Serialize)]
struct LabOutput<'a> {
    range: SearchRange,
    primes: usize,
    analysis: &'a TransitionAnalysis,
}

pub fn chain(ctx: &mut Context, run: &RunArgs) -> Result<()> {
    let params = ctx.params(run, run.count.unwrap_or_else(|| ctx.config.count()));
    ensure_feasible(
        check_feasibility(params.range.interval(), params.flags, params.target_count, 0),
        run.force,
    )?;

    let chain = ctx
        .session
        .generate_chain(&params, &mut ctx.rng, &mut TracingHooks);
    let output = ChainOutput {
        seed: ctx.seed,
        range: params.range,
        flags: params.flags,
        chain: &chain,
    };
    render::print_one(ctx.json, &output, |out| {
        render::chain(out.chain, &params, out.seed)
    })
}

pub fn safe(ctx: &mut Context, run: &RunArgs) -> Result<()> {
    let params = ctx.params(run, run.count.unwrap_or_else(|| ctx.config.safe_count()));
    ensure_feasible(
        check_feasibility(params.range.interval(), params.flags, 0, params.target_count),
        run.force,
    )?;

    let set = ctx
        .session
        .generate_safe_primes(&params, &mut ctx.rng, &mut TracingHooks);
    let output = SafeOutput {
        seed: ctx.seed,
        range: params.range,
        flags: params.flags,
        pairs: &set,
    };
    render::print_one(ctx.json, &output, |out| {
        render::safe_primes(out.pairs, &params, out.seed)
    })
}

pub fn baseline(ctx: &mut Context, range: RangeArgs, count: Option<usize>) -> Result<()> {
    let range = ctx.range(range);
    let count = count.unwrap_or_else(|| ctx.config.count());

    let chain = ctx.session.generate_baseline(&range, count, &mut ctx.rng);
    let output = ChainOutput {
        seed: ctx.seed,
        range,
        flags: GrammarFlags::NONE,
        chain: &chain,
    };
    render::print_one(ctx.json, &output, |out| {
        render::baseline(out.chain, &range, count, out.seed)
    })
}

pub fn compare(ctx: &mut Context, run: &RunArgs, safe_count: Option<usize>) -> Result<()> {
    let params = ctx.params(run, run.count.unwrap_or_else(|| ctx.config.count()));
    let safe_count = safe_count.unwrap_or_else(|| ctx.config.safe_count());
    ensure_feasible(
        check_feasibility(
            params.range.interval(),
            params.flags,
            params.target_count,
            safe_count,
        ),
        run.force,
    )?;

    let grammar = ctx
        .session
        .generate_chain(&params, &mut ctx.rng, &mut TracingHooks);
    // The baseline is sized to what the grammar actually produced.
    let baseline = ctx
        .session
        .generate_baseline(&params.range, grammar.len(), &mut ctx.rng);
    let safe_params = GenerationParams {
        target_count: safe_count,
        ..params
    };
    let safe = ctx
        .session
        .generate_safe_primes(&safe_params, &mut ctx.rng, &mut TracingHooks);
    let report = ctx.session.analyze(&grammar, &baseline, &safe);

    let output = CompareOutput {
        seed: ctx.seed,
        range: params.range,
        flags: params.flags,
        grammar: &grammar,
        baseline: &baseline,
        safe: &safe,
        report: &report,
    };
    render::print_one(ctx.json, &output, |out| render::report(out.report))
}

pub fn recommend(ctx: &Context, range: RangeArgs, flags: GrammarFlags) -> Result<()> {
    let range = ctx.range(range);
    let output = RecommendOutput {
        range,
        interval: range.interval(),
        flags,
        recommended: ctx.session.recommended_max(range.interval(), flags),
    };
    render::print_one(ctx.json, &output, |out| {
        format!(
            "Range [{}, {}] with {}: at most ~{} elements recommended\n",
            out.range.start, out.range.end, out.flags, out.recommended
        )
    })
}

pub fn lab(ctx: &Context, limit: i64) -> Result<()> {
    let range = SearchRange::new(LAB_START, limit);
    let primes = ctx.session.enumerate_sophie_germain(&range);
    tracing::info!(limit, found = primes.len(), "Sophie Germain enumeration finished");

    let rows = ctx.session.transition_rows(&primes);
    let analysis = ctx.session.analyze_transitions(&rows);
    let output = LabOutput {
        range,
        primes: primes.len(),
        analysis: &analysis,
    };
    render::print_one(ctx.json, &output, |out| {
        render::lab(&out.range, &primes, out.analysis)
    })
}
