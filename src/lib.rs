//! A crate for solving the 3x3 Rubik's cube with a two phase search in the style of
//! [Kociemba's algorithm](http://kociemba.org/cube.htm).
//!
//! A cube is given either as a scramble (`"R U R' U'"`) or as a 54 character facelet string, see
//! [facelet]. The [session::Session] sets up the move and pruning tables once and hands out
//! [solver::Solver]s which share them.
//!
//! ```no_run
//! use cubesolver::session::Session;
//!
//! let session = Session::default();
//! let solution = session.solve_scramble("R U R' U' F2 D L'").unwrap();
//! println!("{solution}");
//! ```

#[macro_use]
extern crate lazy_static;

/// Module containing functions for scrambling the cube.
pub mod scramble;

pub mod config;
pub mod error;

/// Module containing 3x3 cube constants.
pub mod constants;
pub mod coord;
pub mod cubie;
pub mod facelet;
pub mod moves;
pub mod pruning;
pub mod search;
pub mod session;
pub mod solver;
pub mod tables;

use std::{fs, path::Path};

use bincode::{
    config::{standard, Configuration},
    error::DecodeError,
    serde::{decode_from_slice, encode_to_vec},
};
use serde::{de::DeserializeOwned, Serialize};

pub use crate::config::SolverConfig;
pub use crate::error::Error;
pub use crate::moves::Move;
pub use crate::search::CancelToken;
pub use crate::session::Session;
pub use crate::solver::{SolutionResult, Solver};

pub(crate) const CONFIG: Configuration = standard();

pub fn write_table<P, T: Serialize>(path: P, table: &T) -> Result<(), Error>
where
    P: AsRef<Path>,
{
    let encoded = encode_to_vec(table, CONFIG)?;
    fs::write(path, encoded)?;
    Ok(())
}

pub fn decode_table<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Error> {
    let (decoded, written) = decode_from_slice(bytes, CONFIG)?;
    let additional = bytes.len() - written;

    if additional != 0 {
        return Err(DecodeError::UnexpectedEnd { additional })?;
    }
    Ok(decoded)
}

/// Tables shared by all tests of the crate, built once.
#[cfg(test)]
pub(crate) fn test_tables() -> &'static std::sync::Arc<tables::SolverTables> {
    lazy_static! {
        static ref TABLES: std::sync::Arc<tables::SolverTables> =
            std::sync::Arc::new(tables::SolverTables::build().unwrap());
    }
    &TABLES
}
