use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use germain_types::GrammarFlags;

/// Upper bound of the lab enumeration when `--limit` is not given.
pub const DEFAULT_LAB_LIMIT: i64 = 10_000;

#[derive(Parser, Debug)]
#[command(
    name = "germain",
    version,
    about = "Sophie Germain chain laboratory: grammar-driven generation and comparative analysis"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Config file (default: ~/.germain/config.toml)"
    )]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "RNG seed, for reproducible runs")]
    pub seed: Option<u64>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a grammar-constrained chain
    Chain(RunArgs),
    /// Derive safe primes 2p+1 from a grammar chain
    Safe(RunArgs),
    /// Sample in-class Sophie Germain primes without grammar
    Baseline {
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long)]
        count: Option<usize>,
    },
    /// Chain, baseline and safe primes, then the comparative report
    Compare {
        #[command(flatten)]
        run: RunArgs,
        #[arg(long)]
        safe_count: Option<usize>,
    },
    /// Recommended maximum chain length for a range
    Recommend {
        #[command(flatten)]
        range: RangeArgs,
        #[command(flatten)]
        grammar: GrammarArgs,
    },
    /// Enumerate Sophie Germain primes up to a limit and analyse family transitions
    Lab {
        #[arg(long, default_value_t = DEFAULT_LAB_LIMIT)]
        limit: i64,
    },
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct RangeArgs {
    /// Lower bound of the search range (inclusive)
    #[arg(long)]
    pub start: Option<i64>,
    /// Upper bound of the search range (inclusive)
    #[arg(long)]
    pub end: Option<i64>,
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct GrammarArgs {
    /// Disable G1 (common-gap alphabet)
    #[arg(long)]
    pub no_g1: bool,
    /// Disable G2 (bigram transitions)
    #[arg(long)]
    pub no_g2: bool,
    /// Disable G3 (anomalies and excursions)
    #[arg(long)]
    pub no_g3: bool,
}

impl GrammarArgs {
    /// Switch off the layers named on the command line.
    #[must_use]
    pub fn apply(self, flags: GrammarFlags) -> GrammarFlags {
        GrammarFlags {
            g1: flags.g1 && !self.no_g1,
            g2: flags.g2 && !self.no_g2,
            g3: flags.g3 && !self.no_g3,
        }
    }
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub range: RangeArgs,
    /// Number of elements to generate
    #[arg(long)]
    pub count: Option<usize>,
    #[command(flatten)]
    pub grammar: GrammarArgs,
    /// Wall-clock budget per generation call
    #[arg(long, value_name = "SECONDS")]
    pub budget: Option<f64>,
    /// Run even when the count exceeds the recommendation
    #[arg(long)]
    pub force: bool,
}
