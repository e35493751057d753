//! Solver configuration, loadable from TOML.
//!
//! ```
//! use cubesolver::config::SolverConfig;
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     max_length = 22
//!     timeout_secs = 1.5
//!     phase1_candidates = 3
//! "#).unwrap();
//!
//! assert_eq!(config.max_length, 22);
//! assert_eq!(config.time_limit(), Some(Duration::from_millis(1500)));
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::search::SearchLimits;

/// Settings of a [crate::session::Session] and of every solve it runs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// No solution longer than this is returned.
    pub max_length: usize,

    /// Stop the search after this many seconds and return the best solution found so far.
    pub timeout_secs: Option<f32>,

    /// Number of phase 1 maneuvers completed to a solution before the search stops. More
    /// candidates give shorter solutions at the cost of time.
    pub phase1_candidates: usize,

    /// Stop as soon as a solution of at most this length is found.
    pub target_length: usize,

    /// Directory holding the persisted tables. Tables are built in memory when unset.
    pub table_dir: Option<PathBuf>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_length: 24,
            timeout_secs: None,
            phase1_candidates: 1,
            target_length: 0,
            table_dir: None,
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_timeout_secs(mut self, secs: f32) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn with_phase1_candidates(mut self, candidates: usize) -> Self {
        self.phase1_candidates = candidates;
        self
    }

    pub fn with_table_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.table_dir = Some(dir.into());
        self
    }

    /// Returns the time limit, if any. Negative or non finite values mean no limit.
    pub fn time_limit(&self) -> Option<Duration> {
        self.timeout_secs
            .and_then(|secs| Duration::try_from_secs_f32(secs).ok())
    }

    /// Search limits for a solve started at `start`.
    pub fn limits(&self, start: Instant) -> SearchLimits {
        SearchLimits {
            max_length: self.max_length,
            target_length: self.target_length,
            phase1_candidates: self.phase1_candidates.max(1),
            deadline: self.time_limit().map(|limit| start + limit),
        }
    }
}
