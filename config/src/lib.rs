//! Configuration for the Germain laboratory.
//!
//! Read from `~/.germain/config.toml` (or an explicit path). Every key is
//! optional; command-line flags override whatever the file sets.
//!
//! ```toml
//! [search]
//! start = 0
//! end = 100000
//! count = 15
//! safe_count = 10
//! budget_seconds = 120
//! seed = 42
//!
//! [grammar]
//! g1 = true
//! g2 = true
//! g3 = false
//!
//! [tuning]
//! g2_soft_accept = 0.5
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use germain_types::{Budget, GrammarFlags, GrammarTuning, SearchRange};

/// Range searched when neither the file nor the command line sets one.
pub const DEFAULT_RANGE: SearchRange = SearchRange::new(0, 100_000);
pub const DEFAULT_COUNT: usize = 15;
pub const DEFAULT_SAFE_COUNT: usize = 10;

#[derive(Debug, Default, Deserialize)]
pub struct GermainConfig {
    pub search: Option<SearchConfig>,
    pub grammar: Option<GrammarFlags>,
    pub tuning: Option<GrammarTuning>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct SearchConfig {
    pub start: Option<i64>,
    pub end: Option<i64>,
    /// Grammar chain length.
    pub count: Option<usize>,
    /// Number of safe-prime pairs.
    pub safe_count: Option<usize>,
    pub budget_seconds: Option<f64>,
    /// Fixed RNG seed; a fresh one is drawn per run otherwise.
    pub seed: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl GermainConfig {
    /// Load `explicit`, or the default location when `None`.
    ///
    /// A missing file at the default location is not an error (`Ok(None)`);
    /// a missing explicit file is.
    pub fn load(explicit: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(None),
            },
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read { path, source: err });
            }
        };

        match Self::parse(&content) {
            Ok(config) => {
                tracing::debug!(?path, "Loaded config");
                Ok(Some(config))
            }
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse { path, source: err })
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    #[must_use]
    pub fn search(&self) -> SearchConfig {
        self.search.unwrap_or_default()
    }

    #[must_use]
    pub fn range(&self) -> SearchRange {
        let search = self.search();
        SearchRange::new(
            search.start.unwrap_or(DEFAULT_RANGE.start),
            search.end.unwrap_or(DEFAULT_RANGE.end),
        )
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.search().count.unwrap_or(DEFAULT_COUNT)
    }

    #[must_use]
    pub fn safe_count(&self) -> usize {
        self.search().safe_count.unwrap_or(DEFAULT_SAFE_COUNT)
    }

    #[must_use]
    pub fn budget(&self) -> Budget {
        self.search()
            .budget_seconds
            .map_or_else(Budget::default, Budget::from_secs_f64)
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.search().seed
    }

    #[must_use]
    pub fn flags(&self) -> GrammarFlags {
        self.grammar.unwrap_or_default()
    }

    #[must_use]
    pub fn tuning(&self) -> GrammarTuning {
        self.tuning.unwrap_or_default()
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".germain").join("config.toml"))
}
