//! Two phase IDA* search over the coordinate level.
//!
//! Phase 1 brings the cube into the subgroup H = <U, D, R2, F2, L2, B2> with all 18 moves, phase 2
//! solves a cube of H with the 10 moves that keep it inside H. Every phase 1 maneuver found by the
//! iterative deepening is completed with the shortest phase 2 maneuver that fits into the remaining
//! budget, so the result is optimal for its phase split but not necessarily globally optimal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, trace};

use crate::constants::*;
use crate::coord::CoordCube;
use crate::cubie::CubieCube;
use crate::error::Error;
use crate::moves::Move;
use crate::tables::SolverTables;

/// How often (in visited nodes) the search looks at the cancel flag and the deadline.
const CHECK_INTERVAL: u64 = 1024;

/// A flag shared between a running search and whoever wants to stop it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Bounds and stop conditions of one search.
///
/// * `max_length`: no maneuver longer than this is returned.
/// * `target_length`: the search stops as soon as a maneuver of at most this length is known.
/// * `phase1_candidates`: the search stops after this many phase 1 maneuvers were completed to a
///   (each time shorter) solution.
/// * `deadline`: the search stops at this instant and returns the best maneuver found so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_length: usize,
    pub target_length: usize,
    pub phase1_candidates: usize,
    pub deadline: Option<Instant>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_length: 24,
            target_length: 0,
            phase1_candidates: 1,
            deadline: None,
        }
    }
}

/// A solving maneuver and the length of its phase 1 part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    pub moves: Vec<Move>,
    pub phase1_length: usize,
}

/// The state of one search. Tables are shared, everything else is private to the search.
pub struct Search<'a> {
    tables: &'a SolverTables,
    limits: SearchLimits,
    cancel: &'a CancelToken,
    co_cube: CoordCube,
    sofar_phase1: Vec<Move>,
    sofar_phase2: Vec<Move>,
    best: Option<Found>,
    candidates: usize,
    nodes: u64,
    stopped: bool,
    done: bool,
}

impl<'a> Search<'a> {
    pub fn new(
        cc: &CubieCube,
        tables: &'a SolverTables,
        limits: SearchLimits,
        cancel: &'a CancelToken,
    ) -> Result<Self, Error> {
        Ok(Self {
            tables,
            limits,
            cancel,
            co_cube: CoordCube::from_cubie(cc)?,
            sofar_phase1: Vec::new(),
            sofar_phase2: Vec::new(),
            best: None,
            candidates: 0,
            nodes: 0,
            stopped: false,
            done: false,
        })
    }

    /// Number of nodes visited so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Run the search to completion.
    pub fn run(&mut self) -> Result<Found, Error> {
        let max_length = self.limits.max_length.min(MAX_SOLUTION_LENGTH);
        let cdc = self.co_cube;
        if cdc == CoordCube::default() {
            return Ok(Found {
                moves: Vec::new(),
                phase1_length: 0,
            });
        }
        if self.cancel.is_cancelled() {
            return Err(Error::SearchTimedOut);
        }
        let dist = self
            .tables
            .pr
            .phase1_depth(cdc.twist, cdc.flip, cdc.slice_sorted / N_PERM_4 as u16);
        debug!(phase1_lower_bound = dist, max_length, "search started");

        for togo1 in dist as usize..=max_length {
            if self.stopped || self.done {
                break;
            }
            if self.best.as_ref().is_some_and(|b| b.moves.len() <= togo1) {
                // a longer phase 1 can not give a shorter maneuver
                break;
            }
            trace!(togo1, nodes = self.nodes, "phase 1 depth");
            self.search(cdc.twist, cdc.flip, cdc.slice_sorted, dist, togo1);
        }

        match self.best.take() {
            Some(found) => {
                debug!(
                    length = found.moves.len(),
                    phase1_length = found.phase1_length,
                    nodes = self.nodes,
                    "search finished"
                );
                Ok(found)
            }
            None if self.stopped => {
                debug!(nodes = self.nodes, "search stopped without a solution");
                Err(Error::SearchTimedOut)
            }
            None if max_length < GODS_NUMBER => {
                debug!(max_length, nodes = self.nodes, "no solution within the requested length");
                Err(Error::NoSolutionWithinLength { max_length })
            }
            None => {
                error!(
                    max_length,
                    cube = %cdc,
                    "no solution within the length bound, tables or coordinates are inconsistent"
                );
                Err(Error::SearchExhausted { max_length })
            }
        }
    }

    /// Count a node and look at the stop signals from time to time.
    fn tick(&mut self) -> bool {
        self.nodes += 1;
        if self.nodes % CHECK_INTERVAL == 0 {
            let expired = self.limits.deadline.is_some_and(|d| Instant::now() >= d);
            if expired || self.cancel.is_cancelled() {
                self.stopped = true;
            }
        }
        self.stopped || self.done
    }

    /// Length bound (exclusive) for any new maneuver.
    fn length_bound(&self) -> usize {
        match &self.best {
            Some(b) => b.moves.len(),
            None => self.limits.max_length.min(MAX_SOLUTION_LENGTH) + 1,
        }
    }

    fn last_move(&self) -> Option<Move> {
        self.sofar_phase2
            .last()
            .or_else(|| self.sofar_phase1.last())
            .copied()
    }

    fn search(&mut self, twist: u16, flip: u16, slice_sorted: u16, dist: u8, togo_phase1: usize) {
        if self.tick() {
            return;
        }
        if togo_phase1 == 0 {
            self.start_phase2(slice_sorted);
            return;
        }
        let tables = self.tables;
        for m in ALL_MOVES {
            // dist = 0 means that we already are in the subgroup H. If there are less than 5 moves left
            // this forces all remaining moves to be phase 2 moves. So we can forbid these at the end of phase 1
            // and generate these moves in phase 2.
            if m.is_phase2() && (togo_phase1 == 1 || (dist == 0 && togo_phase1 < 5)) {
                continue;
            }
            if let Some(prev) = self.sofar_phase1.last() {
                if !m.may_follow(*prev) {
                    continue;
                }
            }

            let twist_new = tables.mv.twist(twist, m);
            let flip_new = tables.mv.flip(flip, m);
            let slice_sorted_new = tables.mv.slice_sorted(slice_sorted, m);
            let dist_new =
                tables
                    .pr
                    .phase1_depth(twist_new, flip_new, slice_sorted_new / N_PERM_4 as u16);
            if dist_new as usize >= togo_phase1 {
                // impossible to reach subgroup H in togo_phase1 - 1 moves
                continue;
            }

            self.sofar_phase1.push(m);
            self.search(twist_new, flip_new, slice_sorted_new, dist_new, togo_phase1 - 1);
            self.sofar_phase1.pop();
            if self.stopped || self.done {
                return;
            }
        }
    }

    /// Phase 1 is solved: compute the phase 2 coordinates and look for the shortest completion.
    fn start_phase2(&mut self, slice_sorted: u16) {
        let tables = self.tables;
        let phase1_length = self.sofar_phase1.len();
        let bound = self.length_bound();
        if bound <= phase1_length {
            return;
        }
        // do not use more than togo2_limit - 1 moves in phase 2
        let togo2_limit = bound - phase1_length;

        let mut cdc = self.co_cube;
        for &m in &self.sofar_phase1 {
            cdc.corners = tables.mv.corners(cdc.corners, m);
        }
        if tables.pr.cornslice_depth(cdc.corners, slice_sorted) as usize >= togo2_limit {
            // precheck speeds up the computation
            return;
        }
        for &m in &self.sofar_phase1 {
            cdc.u_edges = tables.mv.u_edges(cdc.u_edges, m);
            cdc.d_edges = tables.mv.d_edges(cdc.d_edges, m);
        }
        let ud_edges = tables.em.ud_edges(cdc.u_edges, cdc.d_edges);

        let dist2 = tables.pr.phase2_depth(cdc.corners, ud_edges, slice_sorted) as usize;
        for togo2 in dist2..togo2_limit {
            self.sofar_phase2.clear();
            if self.search_phase2(cdc.corners, ud_edges, slice_sorted, togo2) {
                break;
            }
            if self.stopped {
                return;
            }
        }
    }

    /// Depth first search in phase 2 with exactly `togo_phase2` moves left. Returns true when a
    /// maneuver was stored.
    fn search_phase2(&mut self, corners: u16, ud_edges: u16, slice_sorted: u16, togo_phase2: usize) -> bool {
        if self.tick() {
            return false;
        }
        if togo_phase2 == 0 {
            // the pruning tables only give 0 for the solved cube
            self.store_solution();
            return true;
        }
        let tables = self.tables;
        for m in PHASE2_MOVES {
            if let Some(prev) = self.last_move() {
                if !m.may_follow(prev) {
                    continue;
                }
            }
            let corners_new = tables.mv.corners(corners, m);
            let ud_edges_new = tables.mv.ud_edges(ud_edges, m);
            let slice_sorted_new = tables.mv.slice_sorted(slice_sorted, m);
            let dist_new = tables.pr.phase2_depth(corners_new, ud_edges_new, slice_sorted_new);
            if dist_new as usize >= togo_phase2 {
                // impossible to reach solved cube in togo_phase2 - 1 moves
                continue;
            }
            self.sofar_phase2.push(m);
            let found = self.search_phase2(corners_new, ud_edges_new, slice_sorted_new, togo_phase2 - 1);
            self.sofar_phase2.pop();
            if found {
                return true;
            }
            if self.stopped {
                return false;
            }
        }
        false
    }

    fn store_solution(&mut self) {
        let mut moves = self.sofar_phase1.clone();
        moves.extend_from_slice(&self.sofar_phase2);
        debug!(
            length = moves.len(),
            phase1_length = self.sofar_phase1.len(),
            nodes = self.nodes,
            "solution found"
        );
        self.candidates += 1;
        if moves.len() <= self.limits.target_length || self.candidates >= self.limits.phase1_candidates {
            self.done = true;
        }
        self.best = Some(Found {
            phase1_length: self.sofar_phase1.len(),
            moves,
        });
    }
}

#[cfg(test)]
mod test {
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::scramble::scramble_from_str;
    use crate::test_tables;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run(cc: &CubieCube, limits: SearchLimits) -> Result<Found, Error> {
        let cancel = CancelToken::new();
        Search::new(cc, test_tables(), limits, &cancel)?.run()
    }

    fn assert_valid_sequence(moves: &[Move]) {
        for w in moves.windows(2) {
            assert!(w[1].may_follow(w[0]), "{} may not follow {}", w[1], w[0]);
        }
    }

    #[test]
    fn test_solved_cube() {
        let found = run(&CubieCube::default(), SearchLimits::default()).unwrap();
        assert!(found.moves.is_empty());
        assert_eq!(found.phase1_length, 0);
    }

    #[test]
    fn test_phase2_only() {
        let moves = scramble_from_str("U R2 D' F2 L2").unwrap();
        let cc = CubieCube::from(&moves);
        let found = run(&cc, SearchLimits::default()).unwrap();
        assert_eq!(found.phase1_length, 0);
        assert!(found.moves.len() <= 5);
        assert!(cc.apply_moves(&found.moves).is_solved());
    }

    #[test]
    fn test_random_cubes() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..5 {
            let mut cc = CubieCube::default();
            cc.randomize_with(&mut rng);
            let found = run(&cc, SearchLimits::default()).unwrap();
            assert!(found.moves.len() <= 24);
            assert!(cc.apply_moves(&found.moves).is_solved());
            assert!(found.moves[..found.phase1_length].last().map_or(true, |m| !m.is_phase2()));
            assert_valid_sequence(&found.moves);
        }
    }

    #[test]
    fn test_more_candidates_never_longer() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut cc = CubieCube::default();
        cc.randomize_with(&mut rng);
        let first = run(&cc, SearchLimits::default()).unwrap();
        let better = run(
            &cc,
            SearchLimits {
                phase1_candidates: 4,
                deadline: Some(Instant::now() + Duration::from_secs(10)),
                ..SearchLimits::default()
            },
        )
        .unwrap();
        assert!(better.moves.len() <= first.moves.len());
        assert!(cc.apply_moves(&better.moves).is_solved());
    }

    #[test]
    fn test_bound_too_small() {
        let moves = scramble_from_str("R U R' U' F").unwrap();
        let cc = CubieCube::from(&moves);
        let err = run(
            &cc,
            SearchLimits {
                max_length: 2,
                ..SearchLimits::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::NoSolutionWithinLength { max_length: 2 }));
    }

    #[test]
    fn test_exhausted_with_broken_tables() {
        let mut tables = test_tables().as_ref().clone();
        tables.pr.slice_twist_depth.fill(0xfe);
        let cc = CubieCube::from(&scramble_from_str("R").unwrap());
        let cancel = CancelToken::new();
        let err = Search::new(&cc, &tables, SearchLimits::default(), &cancel)
            .unwrap()
            .run()
            .unwrap_err();
        assert!(matches!(err, Error::SearchExhausted { max_length: 24 }));
    }

    #[test]
    fn test_cancelled_search_times_out() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut cc = CubieCube::default();
        cc.randomize_with(&mut rng);
        let cancel = CancelToken::new();
        cancel.cancel();
        let err = Search::new(&cc, test_tables(), SearchLimits::default(), &cancel)
            .unwrap()
            .run()
            .unwrap_err();
        assert!(matches!(err, Error::SearchTimedOut));
    }

    #[test]
    fn test_cancel_while_running_keeps_best() {
        let tables = test_tables();
        let mut rng = StdRng::seed_from_u64(11);
        let mut cc = CubieCube::default();
        cc.randomize_with(&mut rng);
        let limits = SearchLimits {
            phase1_candidates: usize::MAX,
            ..SearchLimits::default()
        };

        let cancel = CancelToken::new();
        let canceller = {
            let cancel = cancel.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_secs(1));
                cancel.cancel();
            })
        };
        let start = Instant::now();
        let mut search = Search::new(&cc, tables, limits, &cancel).unwrap();
        let found = search.run().unwrap();
        let elapsed = start.elapsed();
        canceller.join().unwrap();

        assert!(elapsed < Duration::from_secs(5), "search ran for {elapsed:?} after cancel");
        assert!(cc.apply_moves(&found.moves).is_solved());
        assert!(found.moves.len() <= 24);
        assert_valid_sequence(&found.moves);
    }

    #[test]
    fn test_expired_deadline_keeps_best() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut cc = CubieCube::default();
        cc.randomize_with(&mut rng);
        let limits = SearchLimits {
            phase1_candidates: usize::MAX,
            deadline: Some(Instant::now() + Duration::from_secs(2)),
            ..SearchLimits::default()
        };
        // either the deadline fires with a solution at hand or the search proves the bound optimal
        let found = run(&cc, limits).unwrap();
        assert!(cc.apply_moves(&found.moves).is_solved());
    }
}
