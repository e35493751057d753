use std::fs;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::coord::EdgeMergeTables;
use crate::error::Error;
use crate::moves::MoveTables;
use crate::pruning::PruningTables;
use crate::{decode_table, write_table, CONFIG};

/// File name of the persisted tables inside the table directory.
pub const TABLES_FILE: &str = "solver_tables.bin";

/// Bumped whenever the layout of [SolverTables] changes.
pub const FORMAT_VERSION: u32 = 1;

/// All data tables.
///
/// * `mv`: [MoveTables]
/// * `pr`: [PruningTables]
/// * `em`: [EdgeMergeTables]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverTables {
    pub mv: MoveTables,
    pub pr: PruningTables,
    pub em: EdgeMergeTables,
}

#[derive(Serialize)]
struct TablesFileRef<'a> {
    version: u32,
    tables: &'a SolverTables,
}

#[derive(Deserialize)]
struct TablesFile {
    version: u32,
    tables: SolverTables,
}

impl SolverTables {
    /// Generate every table from scratch.
    pub fn build() -> Result<Self, Error> {
        let start = Instant::now();
        let mv = MoveTables::new();
        info!(elapsed = ?start.elapsed(), "move tables built");
        let em = EdgeMergeTables::new();
        let pr = PruningTables::new(&mv)?;
        info!(elapsed = ?start.elapsed(), "pruning tables built");
        Ok(Self { mv, pr, em })
    }

    /// Load the tables from `dir`, or build them and store them there.
    ///
    /// Without a directory the tables are only built in memory. A file of another format version
    /// or a corrupt file is replaced.
    pub fn load_or_build(dir: Option<&Path>) -> Result<Self, Error> {
        let Some(dir) = dir else {
            return Self::build();
        };
        let path = dir.join(TABLES_FILE);
        if path.exists() {
            let start = Instant::now();
            let bytes = fs::read(&path)
                .map_err(|e| Error::SetupFailed(format!("reading {}: {e}", path.display())))?;
            match Self::decode(&bytes) {
                Ok(Some(tables)) => {
                    info!(path = %path.display(), elapsed = ?start.elapsed(), "tables loaded");
                    return Ok(tables);
                }
                Ok(None) => warn!(path = %path.display(), "table file has another format version, rebuilding"),
                Err(e) => warn!(path = %path.display(), error = %e, "table file is corrupt, rebuilding"),
            }
        }
        let tables = Self::build()?;
        tables
            .store(dir)
            .map_err(|e| Error::SetupFailed(format!("writing {}: {e}", path.display())))?;
        Ok(tables)
    }

    /// Write the tables to `<dir>/solver_tables.bin`.
    pub fn store(&self, dir: &Path) -> Result<(), Error> {
        fs::create_dir_all(dir)?;
        let path = dir.join(TABLES_FILE);
        write_table(
            &path,
            &TablesFileRef {
                version: FORMAT_VERSION,
                tables: self,
            },
        )?;
        info!(path = %path.display(), "tables stored");
        Ok(())
    }

    /// Decode a table file. `Ok(None)` means the file was written with another format version.
    pub fn decode(bytes: &[u8]) -> Result<Option<Self>, Error> {
        let (version, _): (u32, usize) = bincode::serde::decode_from_slice(bytes, CONFIG)?;
        if version != FORMAT_VERSION {
            return Ok(None);
        }
        let file: TablesFile = decode_table(bytes)?;
        debug_assert_eq!(file.version, version);
        Ok(Some(file.tables))
    }
}
