use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::Error;
use crate::moves::{Move, MoveTables};

const UNFILLED: u8 = 0xff;

/// The pruning tables cut the search tree during the search.
///
/// Every entry is the exact number of moves needed to solve the projection of the cube onto the
/// two coordinates of the table, which is a lower bound for solving the whole phase. The search
/// uses the maximum over the tables of a phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruningTables {
    /// Phase 1 distance indexed by `N_TWIST * slice + twist`.
    pub slice_twist_depth: Vec<u8>,
    /// Phase 1 distance indexed by `N_FLIP * slice + flip`.
    pub slice_flip_depth: Vec<u8>,
    /// Phase 2 distance indexed by `N_PERM_4 * corners + slice_sorted`.
    pub cornslice_depth: Vec<u8>,
    /// Phase 2 distance indexed by `N_PERM_4 * ud_edges + slice_sorted`.
    pub edgeslice_depth: Vec<u8>,
}

impl PruningTables {
    pub fn new(mv: &MoveTables) -> Result<Self, Error> {
        Ok(Self {
            slice_twist_depth: create_phase1_twist_prun_table(mv)?,
            slice_flip_depth: create_phase1_flip_prun_table(mv)?,
            cornslice_depth: create_phase2_cornsliceprun_table(mv)?,
            edgeslice_depth: create_phase2_edgesliceprun_table(mv)?,
        })
    }

    /// Lower bound for the number of moves to reach the subgroup H where flip = slice = twist = 0.
    #[inline]
    pub fn phase1_depth(&self, twist: u16, flip: u16, slice: u16) -> u8 {
        let slice = slice as usize;
        self.slice_twist_depth[N_TWIST * slice + twist as usize]
            .max(self.slice_flip_depth[N_FLIP * slice + flip as usize])
    }

    /// Lower bound for the number of phase 2 moves to solve a cube in H.
    #[inline]
    pub fn phase2_depth(&self, corners: u16, ud_edges: u16, slice_sorted: u16) -> u8 {
        self.cornslice_depth(corners, slice_sorted)
            .max(self.edgeslice_depth[N_PERM_4 * ud_edges as usize + slice_sorted as usize])
    }

    /// With this table we do a fast precheck at the beginning of phase 2.
    #[inline]
    pub fn cornslice_depth(&self, corners: u16, slice_sorted: u16) -> u8 {
        self.cornslice_depth[N_PERM_4 * corners as usize + slice_sorted as usize]
    }
}

/// Breadth first search over `size` coordinate pairs starting at index 0 (the solved cube).
///
/// `next(idx, m)` gives the index after move m. Every index must be reachable, an unfilled entry
/// means the move tables are inconsistent.
fn distance_table(
    name: &str,
    size: usize,
    moves: &[Move],
    next: impl Fn(usize, Move) -> usize,
) -> Result<Vec<u8>, Error> {
    let mut table = vec![UNFILLED; size];
    table[0] = 0;
    let mut frontier = vec![0usize];
    let mut done = 1;
    let mut depth = 0u8;
    while !frontier.is_empty() {
        let mut next_frontier = Vec::new();
        for &idx in &frontier {
            for &m in moves {
                let idx1 = next(idx, m);
                if table[idx1] == UNFILLED {
                    table[idx1] = depth + 1;
                    next_frontier.push(idx1);
                }
            }
        }
        done += next_frontier.len();
        depth += 1;
        tracing::trace!(table = name, depth, done, total = size, "pruning table layer");
        frontier = next_frontier;
    }
    if done != size {
        return Err(Error::SetupFailed(format!(
            "{name} pruning table has {} unreachable entries",
            size - done
        )));
    }
    tracing::debug!(table = name, max_depth = depth - 1, "pruning table done");
    Ok(table)
}

/// Create the slice_twist_depth pruning table for phase 1.
fn create_phase1_twist_prun_table(mv: &MoveTables) -> Result<Vec<u8>, Error> {
    distance_table("phase1_slice_twist", N_SLICE * N_TWIST, &ALL_MOVES, |idx, m| {
        let slice = (idx / N_TWIST) as u16;
        let twist = (idx % N_TWIST) as u16;
        N_TWIST * mv.slice(slice, m) as usize + mv.twist(twist, m) as usize
    })
}

/// Create the slice_flip_depth pruning table for phase 1.
fn create_phase1_flip_prun_table(mv: &MoveTables) -> Result<Vec<u8>, Error> {
    distance_table("phase1_slice_flip", N_SLICE * N_FLIP, &ALL_MOVES, |idx, m| {
        let slice = (idx / N_FLIP) as u16;
        let flip = (idx % N_FLIP) as u16;
        N_FLIP * mv.slice(slice, m) as usize + mv.flip(flip, m) as usize
    })
}

/// Create the cornslice_depth pruning table for phase 2.
fn create_phase2_cornsliceprun_table(mv: &MoveTables) -> Result<Vec<u8>, Error> {
    distance_table("phase2_cornslice", N_CORNERS * N_PERM_4, &PHASE2_MOVES, |idx, m| {
        let corners = (idx / N_PERM_4) as u16;
        let slice_sorted = (idx % N_PERM_4) as u16;
        N_PERM_4 * mv.corners(corners, m) as usize + mv.slice_sorted(slice_sorted, m) as usize
    })
}

/// Create the edgeslice_depth pruning table for phase 2.
fn create_phase2_edgesliceprun_table(mv: &MoveTables) -> Result<Vec<u8>, Error> {
    distance_table("phase2_edgeslice", N_UD_EDGES * N_PERM_4, &PHASE2_MOVES, |idx, m| {
        let ud_edges = (idx / N_PERM_4) as u16;
        let slice_sorted = (idx % N_PERM_4) as u16;
        N_PERM_4 * mv.ud_edges(ud_edges, m) as usize + mv.slice_sorted(slice_sorted, m) as usize
    })
}
