use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tracing::{error, info};

use crate::config::SolverConfig;
use crate::error::Error;
use crate::solver::Solver;
use crate::tables::SolverTables;

/// Owns the solver tables of one configuration.
///
/// The tables are set up on first use. Concurrent first callers block until the one build finishes
/// and then share its result. A failed setup leaves the session empty, so a later call tries again.
#[derive(Debug, Default)]
pub struct Session {
    config: SolverConfig,
    tables: Mutex<Option<Arc<SolverTables>>>,
    builds: AtomicUsize,
}

impl Session {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            tables: Mutex::new(None),
            builds: AtomicUsize::new(0),
        }
    }

    /// A session over tables which are already set up.
    pub fn with_tables(config: SolverConfig, tables: Arc<SolverTables>) -> Self {
        Self {
            config,
            tables: Mutex::new(Some(tables)),
            builds: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Load or build the tables unless that already happened. Idempotent.
    pub fn setup(&self) -> Result<Arc<SolverTables>, Error> {
        let mut slot = self
            .tables
            .lock()
            .map_err(|_| Error::SetupFailed("session lock poisoned".to_string()))?;
        if let Some(tables) = slot.as_ref() {
            return Ok(Arc::clone(tables));
        }

        let start = Instant::now();
        let tables = SolverTables::load_or_build(self.config.table_dir.as_deref()).map_err(|e| {
            error!(error = %e, "solver setup failed");
            match e {
                Error::SetupFailed(_) => e,
                other => Error::SetupFailed(other.to_string()),
            }
        })?;
        let tables = Arc::new(tables);
        *slot = Some(Arc::clone(&tables));
        self.builds.fetch_add(1, Ordering::SeqCst);
        info!(elapsed = ?start.elapsed(), "solver tables ready");
        Ok(tables)
    }

    pub fn is_ready(&self) -> bool {
        self.tables.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }

    /// Number of times this session loaded or built its tables.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    /// A solver over the tables of this session, setting them up if needed.
    pub fn solver(&self) -> Result<Solver, Error> {
        Ok(Solver::new(self.setup()?, self.config.clone()))
    }

    pub fn solve_scramble(&self, scramble: &str) -> Result<String, Error> {
        self.solver()?.solve_scramble(scramble)
    }

    pub fn solve_from_state(&self, facelets: &str) -> Result<String, Error> {
        self.solver()?.solve_from_state(facelets)
    }
}
