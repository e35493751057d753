use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SolverConfig;
use crate::cubie::CubieCube;
use crate::error::Error;
use crate::moves::Move;
use crate::scramble::{scramble_from_str, scramble_to_str};
use crate::search::{CancelToken, Search};
use crate::tables::SolverTables;

/// Solution result:
/// * solution: a Move vector.
/// * phase1_length: number of leading moves which bring the cube into the subgroup H.
/// * solve_time: time to get solution (not including the time to set up the tables).
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SolutionResult {
    pub solution: Vec<Move>,
    pub phase1_length: usize,
    pub solve_time: Duration,
}

impl SolutionResult {
    pub fn len(&self) -> usize {
        self.solution.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solution.is_empty()
    }
}

impl fmt::Display for SolutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", scramble_to_str(&self.solution))
    }
}

/// Solves cubes given as scrambles or facelet strings against one shared set of tables.
///
/// # Examples
/// ```no_run
/// use cubesolver::session::Session;
///
/// let session = Session::default();
/// let solver = session.solver().unwrap();
/// let solution = solver
///     .solve_from_state("RLLBUFUUUBDURRBBUBRLRRFDFDDLLLUDFLRRDDFRLFDBUBFFLBBDUF")
///     .unwrap();
/// println!("{solution}");
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    tables: Arc<SolverTables>,
    config: SolverConfig,
}

impl Solver {
    pub fn new(tables: Arc<SolverTables>, config: SolverConfig) -> Self {
        Self { tables, config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve the cube obtained by applying `scramble` to the solved cube.
    pub fn solve_scramble(&self, scramble: &str) -> Result<String, Error> {
        let moves = scramble_from_str(scramble)?;
        let cc = CubieCube::from(&moves);
        Ok(self.solve(&cc)?.to_string())
    }

    /// Solve the cube described by a 54 character facelet string.
    pub fn solve_from_state(&self, facelets: &str) -> Result<String, Error> {
        let cc = CubieCube::from_facelets(facelets)?;
        Ok(self.solve(&cc)?.to_string())
    }

    /// Find a maneuver which brings the cube defined by `from` into the position defined by `goal`.
    pub fn solve_between(&self, from: &str, goal: &str) -> Result<SolutionResult, Error> {
        let cc0 = CubieCube::from_facelets(from)?;
        let ccg = CubieCube::from_facelets(goal)?;
        // cc0 * S = ccg  <=> (ccg^-1 * cc0) * S = Id
        let mut cc = ccg.inverse_cubie_cube();
        cc.multiply(cc0);
        self.solve(&cc)
    }

    pub fn solve(&self, cc: &CubieCube) -> Result<SolutionResult, Error> {
        self.solve_with_cancel(cc, &CancelToken::new())
    }

    /// Solve `cc`, stopping early when `cancel` fires or the configured time limit passes.
    pub fn solve_with_cancel(&self, cc: &CubieCube, cancel: &CancelToken) -> Result<SolutionResult, Error> {
        let start_time = Instant::now();
        let limits = self.config.limits(start_time);
        let mut search = Search::new(cc, &self.tables, limits, cancel)?;
        let found = search.run()?;
        let solve_time = start_time.elapsed();
        debug!(
            length = found.moves.len(),
            nodes = search.nodes(),
            ?solve_time,
            "cube solved"
        );
        Ok(SolutionResult {
            solution: found.moves,
            phase1_length: found.phase1_length,
            solve_time,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::ALL_MOVES;
    use crate::facelet::FaceCube;
    use crate::scramble::gen_scramble_with_rng;
    use crate::test_tables;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SOLVED: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

    fn solver() -> Solver {
        Solver::new(test_tables().clone(), SolverConfig::default())
    }

    fn solves(scramble: &str, solution: &str) -> bool {
        let moves = scramble_from_str(scramble).unwrap();
        let fix = scramble_from_str(solution).unwrap();
        CubieCube::from(&moves).apply_moves(&fix).is_solved()
    }

    /// Length of the shortest maneuver, by plain iterative deepening.
    fn optimal_length(cc: &CubieCube, limit: usize) -> Option<usize> {
        fn dfs(cc: &CubieCube, prev: Option<Move>, togo: usize) -> bool {
            if togo == 0 {
                return cc.is_solved();
            }
            ALL_MOVES
                .into_iter()
                .filter(|m| prev.map_or(true, |p| m.may_follow(p)))
                .any(|m| dfs(&cc.apply_move(m), Some(m), togo - 1))
        }
        (0..=limit).find(|&depth| dfs(cc, None, depth))
    }

    #[test]
    fn test_solve_scramble() {
        let solution = solver().solve_scramble("R U R' U'").unwrap();
        assert!(solves("R U R' U'", &solution));
        assert!(scramble_from_str(&solution).unwrap().len() <= 24);
    }

    #[test]
    fn test_solve_from_state() {
        let s = "RLLBUFUUUBDURRBBUBRLRRFDFDDLLLUDFLRRDDFRLFDBUBFFLBBDUF";
        let solution = solver().solve_from_state(s).unwrap();
        let cc = CubieCube::from_facelets(s).unwrap();
        let fix = scramble_from_str(&solution).unwrap();
        assert!(fix.len() <= 24);
        assert!(cc.apply_moves(&fix).is_solved());
    }

    #[test]
    fn test_solved_input_gives_empty_solution() {
        assert_eq!(solver().solve_from_state(SOLVED).unwrap(), "");
        assert_eq!(solver().solve_scramble("").unwrap(), "");
        assert_eq!(solver().solve_scramble("R R'").unwrap(), "");
    }

    #[test]
    fn test_invalid_inputs() {
        let solver = solver();
        assert!(matches!(
            solver.solve_scramble("R U X2"),
            Err(Error::InvalidMoveToken(_))
        ));
        assert!(matches!(
            solver.solve_from_state(&SOLVED[1..]),
            Err(Error::InvalidFaceletString(_))
        ));

        let mut s: Vec<char> = SOLVED.chars().collect();
        s[0] = 'R';
        let s: String = s.into_iter().collect();
        assert!(matches!(
            solver.solve_from_state(&s),
            Err(Error::InvalidFaceletString(_))
        ));

        // the URF corner twisted in place
        let mut s: Vec<char> = SOLVED.chars().collect();
        s[8] = 'F';
        s[9] = 'U';
        s[20] = 'R';
        let s: String = s.into_iter().collect();
        assert!(matches!(
            solver.solve_from_state(&s),
            Err(Error::UnreachableState(_))
        ));

        // two edges swapped
        let mut cc = CubieCube::default();
        cc.ep.swap(0, 1);
        let s = FaceCube::from(&cc).to_string();
        assert!(matches!(
            solver.solve_from_state(&s),
            Err(Error::UnreachableState(_))
        ));
    }

    #[test]
    fn test_random_scrambles() {
        let solver = solver();
        let mut rng = StdRng::seed_from_u64(2024);
        for length in [1, 5, 12, 25] {
            let scramble = scramble_to_str(&gen_scramble_with_rng(&mut rng, length));
            let solution = solver.solve_scramble(&scramble).unwrap();
            assert!(solves(&scramble, &solution), "{scramble} / {solution}");
            assert!(scramble_from_str(&solution).unwrap().len() <= 24);
        }
    }

    #[test]
    fn test_short_scrambles_are_solved_optimally_with_all_candidates() {
        let solver = Solver::new(
            test_tables().clone(),
            SolverConfig::default().with_phase1_candidates(usize::MAX),
        );
        for scramble in ["F R", "L' B2 D", "R U R' U'", "U R2 D'"] {
            let cc = CubieCube::from(&scramble_from_str(scramble).unwrap());
            let optimal = optimal_length(&cc, 4).unwrap();
            let result = solver.solve(&cc).unwrap();
            assert_eq!(result.len(), optimal, "{scramble} / {result}");
            assert!(cc.apply_moves(&result.solution).is_solved());
        }
    }

    #[test]
    fn test_solve_between() {
        let goal = FaceCube::from(&CubieCube::from(&scramble_from_str("F2 R").unwrap())).to_string();
        let from = FaceCube::from(&CubieCube::from(&scramble_from_str("U L' B").unwrap())).to_string();
        let result = solver().solve_between(&from, &goal).unwrap();
        let mut cc = CubieCube::from_facelets(&from).unwrap();
        cc.multiply_moves(&result.solution);
        assert_eq!(FaceCube::from(&cc).to_string(), goal);
        assert!(solver().solve_between(SOLVED, SOLVED).unwrap().is_empty());
    }

    #[test]
    fn test_max_length_below_distance() {
        let solver = Solver::new(test_tables().clone(), SolverConfig::default().with_max_length(0));
        assert!(matches!(
            solver.solve_scramble("R"),
            Err(Error::NoSolutionWithinLength { max_length: 0 })
        ));
        assert_eq!(solver.solve_scramble("R R'").unwrap(), "");
    }

    #[test]
    fn test_cancelled_solve() {
        let mut rng = StdRng::seed_from_u64(77);
        let mut cc = CubieCube::default();
        cc.randomize_with(&mut rng);
        let cancel = CancelToken::new();
        cancel.cancel();
        assert!(matches!(
            solver().solve_with_cancel(&cc, &cancel),
            Err(Error::SearchTimedOut)
        ));
    }

    #[test]
    fn test_result_display() {
        let result = SolutionResult {
            solution: scramble_from_str("U R2 F'").unwrap(),
            phase1_length: 3,
            solve_time: Duration::from_millis(3),
        };
        assert_eq!(result.to_string(), "U R2 F'");
        assert_eq!(result.len(), 3);
    }
}
