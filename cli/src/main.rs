//! Germain CLI: Sophie Germain chain laboratory.
//!
//! ```text
//! main() -> Cli::parse() -> init_tracing() -> GermainConfig::load()
//!        -> Session + seeded StdRng -> commands::<subcommand>() -> render
//! ```
//!
//! Reports go to stdout (text, or JSON with `--json`); logs go to stderr.

mod args;
mod commands;
mod render;

use anyhow::{Context as _, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use germain_config::GermainConfig;
use germain_core::{RuleSet, Session};

use crate::args::{Cli, Commands};
use crate::commands::Context;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = GermainConfig::load(cli.config.as_deref())
        .context("failed to load configuration")?
        .unwrap_or_default();

    let seed = match cli.seed.or(config.seed()) {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u64>();
            tracing::info!(seed, "No seed configured, drew a fresh one");
            seed
        }
    };

    let session = Session::new(RuleSet::standard().with_tuning(config.tuning()));
    let mut ctx = Context {
        config,
        session,
        rng: StdRng::seed_from_u64(seed),
        seed,
        json: cli.json,
    };

    let outcome = match &cli.command {
        Commands::Chain(run) => commands::chain(&mut ctx, run),
        Commands::Safe(run) => commands::safe(&mut ctx, run),
        Commands::Baseline { range, count } => commands::baseline(&mut ctx, *range, *count),
        Commands::Compare { run, safe_count } => commands::compare(&mut ctx, run, *safe_count),
        Commands::Recommend { range, grammar } => {
            let flags = grammar.apply(ctx.config.flags());
            commands::recommend(&ctx, *range, flags)
        }
        Commands::Lab { limit } => commands::lab(&ctx, *limit),
    };
    outcome?;

    let stats = ctx.session.cache_stats();
    tracing::debug!(
        hits = stats.hits,
        misses = stats.misses,
        entries = stats.entries,
        "Primality cache"
    );
    Ok(())
}
