//! The cubie level of the cube.
//!
//! A cube is described by the permutation and orientation of its 8 corners and 12 edges. The
//! coordinates used by the search are projections of this representation, computed by the
//! `get_*` methods and turned back into a representative cube by the `set_*` methods.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::Error;
use crate::facelet::{Color, FaceCube, CORNER_COLOR, CORNER_FACELET, EDGE_COLOR, EDGE_FACELET};
use crate::moves::{Move, B_MOVE, D_MOVE, F_MOVE, L_MOVE, R_MOVE, U_MOVE};

use self::Corner::*;
use self::Edge::*;

/// The names of the corner positions of the cube. Corner URF e.g. has an U(p), a R(ight) and a F(ront) facelet.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Corner {
    URF,
    UFL,
    ULB,
    UBR,
    DFR,
    DLF,
    DBL,
    DRB,
}

pub const ALL_CORNERS: [Corner; 8] = [URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB];

/// The names of the edge positions of the cube. Edge UR e.g. has an U(p) and R(ight) facelet.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Edge {
    UR,
    UF,
    UL,
    UB,
    DR,
    DF,
    DL,
    DB,
    FR,
    FL,
    BL,
    BR,
}

pub const ALL_EDGES: [Edge; 12] = [UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR];

const SLICE_EDGES: [Edge; 4] = [FR, FL, BL, BR];
const U_EDGES: [Edge; 4] = [UR, UF, UL, UB];
const D_EDGES: [Edge; 4] = [DR, DF, DL, DB];

/// Binomial coefficient n choose k, 0 when k > n.
pub fn c_nk(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut s = 1;
    for i in 0..k {
        s = s * (n - i) / (i + 1);
    }
    s
}

/// Cube on the cubie level.
///
/// * `cp`: corner permutation, `cp[i]` is the corner sitting in position i.
/// * `co`: corner orientation, 0..3.
/// * `ep`: edge permutation.
/// * `eo`: edge orientation, 0..2.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct CubieCube {
    pub cp: [Corner; 8],
    pub co: [u8; 8],
    pub ep: [Edge; 12],
    pub eo: [u8; 12],
}

impl Default for CubieCube {
    /// The solved cube.
    fn default() -> Self {
        Self {
            cp: ALL_CORNERS,
            co: [0; 8],
            ep: ALL_EDGES,
            eo: [0; 12],
        }
    }
}

impl fmt::Display for CubieCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", FaceCube::from(self))
    }
}

lazy_static! {
    /// The cube after each of the 18 moves, indexed by `Move as usize`.
    static ref MOVE_CUBES: [CubieCube; N_MOVE] = {
        let bmc = basic_move_cubes();
        let mut mc = [CubieCube::default(); N_MOVE];
        for (i, basic) in bmc.iter().enumerate() {
            let mut cc = CubieCube::default();
            for k in 0..3 {
                cc.multiply(*basic);
                mc[3 * i + k] = cc;
            }
        }
        mc
    };
}

/// The six clockwise quarter turns, in the face order U, R, F, D, L, B.
pub fn basic_move_cubes() -> [CubieCube; 6] {
    [U_MOVE, R_MOVE, F_MOVE, D_MOVE, L_MOVE, B_MOVE]
}

/// The cubie cube reached from the solved cube by a single move.
pub fn move_cube(m: Move) -> CubieCube {
    MOVE_CUBES[m as usize]
}

impl TryFrom<&FaceCube> for CubieCube {
    type Error = Error;

    /// Build the cubie cube of a facelet cube.
    ///
    /// Fails with [`Error::UnreachableState`] when the stickers of a corner or edge position do
    /// not belong to any real piece. The permutation and orientation invariants are checked by
    /// [`CubieCube::verify`].
    fn try_from(fc: &FaceCube) -> Result<Self, Self::Error> {
        let mut cc = CubieCube::default();
        for i in 0..8 {
            let fac = CORNER_FACELET[i];
            // get the facelet with the U or D color
            let ori = (0..3)
                .find(|&ori| matches!(fc.f[fac[ori] as usize], Color::U | Color::D))
                .ok_or(Error::UnreachableState("corner without U or D facelet"))?;
            let col1 = fc.f[fac[(ori + 1) % 3] as usize];
            let col2 = fc.f[fac[(ori + 2) % 3] as usize];
            let j = (0..8)
                .find(|&j| col1 == CORNER_COLOR[j][1] && col2 == CORNER_COLOR[j][2])
                .ok_or(Error::UnreachableState("corner with impossible colors"))?;
            // in cornerposition i we have cornercubie j
            cc.cp[i] = ALL_CORNERS[j];
            cc.co[i] = ori as u8;
        }
        for i in 0..12 {
            let a = fc.f[EDGE_FACELET[i][0] as usize];
            let b = fc.f[EDGE_FACELET[i][1] as usize];
            let (j, ori) = (0..12)
                .find_map(|j| {
                    if a == EDGE_COLOR[j][0] && b == EDGE_COLOR[j][1] {
                        Some((j, 0))
                    } else if a == EDGE_COLOR[j][1] && b == EDGE_COLOR[j][0] {
                        Some((j, 1))
                    } else {
                        None
                    }
                })
                .ok_or(Error::UnreachableState("edge with impossible colors"))?;
            cc.ep[i] = ALL_EDGES[j];
            cc.eo[i] = ori;
        }
        if FaceCube::from(&cc) != *fc {
            return Err(Error::UnreachableState("facelets do not form real pieces"));
        }
        Ok(cc)
    }
}

impl From<&[Move]> for CubieCube {
    /// Apply a move sequence to the solved cube.
    fn from(moves: &[Move]) -> Self {
        CubieCube::default().apply_moves(moves)
    }
}

impl From<&Vec<Move>> for CubieCube {
    fn from(moves: &Vec<Move>) -> Self {
        CubieCube::from(moves.as_slice())
    }
}

impl CubieCube {
    /// Parse and validate a cube definition string.
    pub fn from_facelets(cube_string: &str) -> Result<Self, Error> {
        let fc = FaceCube::try_from(cube_string)?;
        let cc = CubieCube::try_from(&fc)?;
        cc.verify()?;
        Ok(cc)
    }

    pub fn is_solved(&self) -> bool {
        *self == CubieCube::default()
    }

    /// Multiply this cubie cube with another cubie cube b, restricted to the corners.
    pub fn corner_multiply(&mut self, b: CubieCube) {
        let mut c_perm = [URF; 8];
        let mut c_ori = [0; 8];
        for c in 0..8 {
            let bp = b.cp[c] as usize;
            c_perm[c] = self.cp[bp];
            c_ori[c] = (self.co[bp] + b.co[c]) % 3;
        }
        self.cp = c_perm;
        self.co = c_ori;
    }

    /// Multiply this cubie cube with another cubie cube b, restricted to the edges.
    pub fn edge_multiply(&mut self, b: CubieCube) {
        let mut e_perm = [UR; 12];
        let mut e_ori = [0; 12];
        for e in 0..12 {
            let bp = b.ep[e] as usize;
            e_perm[e] = self.ep[bp];
            e_ori[e] = (self.eo[bp] + b.eo[e]) % 2;
        }
        self.ep = e_perm;
        self.eo = e_ori;
    }

    pub fn multiply(&mut self, b: CubieCube) {
        self.corner_multiply(b);
        self.edge_multiply(b);
    }

    /// Apply a sequence of moves in place.
    pub fn multiply_moves(&mut self, moves: &[Move]) {
        for &m in moves {
            self.multiply(move_cube(m));
        }
    }

    pub fn apply_move(&self, m: Move) -> Self {
        let mut cc = *self;
        cc.multiply(move_cube(m));
        cc
    }

    pub fn apply_moves(&self, moves: &[Move]) -> Self {
        let mut cc = *self;
        cc.multiply_moves(moves);
        cc
    }

    /// Return the inverse of this cubie cube.
    pub fn inverse_cubie_cube(&self) -> Self {
        let mut d = CubieCube::default();
        for e in 0..12 {
            d.ep[self.ep[e] as usize] = ALL_EDGES[e];
        }
        for e in 0..12 {
            d.eo[e] = self.eo[d.ep[e] as usize];
        }
        for c in 0..8 {
            d.cp[self.cp[c] as usize] = ALL_CORNERS[c];
        }
        for c in 0..8 {
            d.co[c] = (3 - self.co[d.cp[c] as usize]) % 3;
        }
        d
    }

    /// Give the parity of the corner permutation.
    pub fn corner_parity(&self) -> u8 {
        let mut s = 0;
        for i in (1..8).rev() {
            for j in 0..i {
                if self.cp[j] > self.cp[i] {
                    s += 1;
                }
            }
        }
        s % 2
    }

    /// Give the parity of the edge permutation. A solvable cube has the same corner and edge parity.
    pub fn edge_parity(&self) -> u8 {
        let mut s = 0;
        for i in (1..12).rev() {
            for j in 0..i {
                if self.ep[j] > self.ep[i] {
                    s += 1;
                }
            }
        }
        s % 2
    }

    /// Check if cubiecube is valid.
    pub fn verify(&self) -> Result<(), Error> {
        let mut edge_count = [0; 12];
        for e in self.ep {
            edge_count[e as usize] += 1;
        }
        if edge_count.iter().any(|&n| n != 1) {
            return Err(Error::UnreachableState("some edges are undefined"));
        }
        if self.eo.iter().map(|&o| o as usize).sum::<usize>() % 2 != 0 {
            return Err(Error::UnreachableState("total edge flip is wrong"));
        }

        let mut corner_count = [0; 8];
        for c in self.cp {
            corner_count[c as usize] += 1;
        }
        if corner_count.iter().any(|&n| n != 1) {
            return Err(Error::UnreachableState("some corners are undefined"));
        }
        if self.co.iter().map(|&o| o as usize).sum::<usize>() % 3 != 0 {
            return Err(Error::UnreachableState("total corner twist is wrong"));
        }

        if self.edge_parity() != self.corner_parity() {
            return Err(Error::UnreachableState("wrong edge and corner parity"));
        }
        Ok(())
    }

    /// Turn this cube into a random cube drawn from `rng`. The probability is the same for all
    /// possible states.
    pub fn randomize_with<R: Rng>(&mut self, rng: &mut R) {
        self.ep.shuffle(rng);
        self.cp.shuffle(rng);
        if self.edge_parity() != self.corner_parity() {
            self.cp.swap(0, 1);
        }
        self.set_flip(rng.gen_range(0..N_FLIP) as u16);
        self.set_twist(rng.gen_range(0..N_TWIST) as u16);
    }

    // ---- coordinates ----

    /// The twist of the 8 corners. 0 <= twist < 2187 in phase 1, twist = 0 in phase 2.
    pub fn get_twist(&self) -> u16 {
        self.co[..7].iter().fold(0, |ret, &o| 3 * ret + o as u16)
    }

    pub fn set_twist(&mut self, twist: u16) {
        let mut twist = twist;
        let mut twistparity = 0;
        for i in (0..7).rev() {
            self.co[i] = (twist % 3) as u8;
            twistparity += self.co[i];
            twist /= 3;
        }
        self.co[7] = (3 - twistparity % 3) % 3;
    }

    /// The flip of the 12 edges. 0 <= flip < 2048 in phase 1, flip = 0 in phase 2.
    pub fn get_flip(&self) -> u16 {
        self.eo[..11].iter().fold(0, |ret, &o| 2 * ret + o as u16)
    }

    pub fn set_flip(&mut self, flip: u16) {
        let mut flip = flip;
        let mut flipparity = 0;
        for i in (0..11).rev() {
            self.eo[i] = (flip % 2) as u8;
            flipparity += self.eo[i];
            flip /= 2;
        }
        self.eo[11] = (2 - flipparity % 2) % 2;
    }

    /// The location of the UD-slice edges FR, FL, BL and BR ignoring their permutation.
    ///
    /// 0 <= slice < 495 in phase 1, slice = 0 in phase 2.
    pub fn get_slice(&self) -> u16 {
        let (a, _) = locate_edges(&self.ep, &SLICE_EDGES);
        a as u16
    }

    pub fn set_slice(&mut self, idx: u16) {
        self.ep = place_edges(idx as usize, SLICE_EDGES, [UR, UF, UL, UB, DR, DF, DL, DB]);
    }

    /// The permutation and location of the UD-slice edges FR, FL, BL and BR.
    ///
    /// 0 <= slice_sorted < 11880 in phase 1, 0 <= slice_sorted < 24 in phase 2, slice_sorted = 0 for solved cube.
    pub fn get_slice_sorted(&self) -> u16 {
        let (a, edge4) = locate_edges(&self.ep, &SLICE_EDGES);
        (N_PERM_4 * a + perm4_index(edge4, &SLICE_EDGES)) as u16
    }

    pub fn set_slice_sorted(&mut self, idx: u16) {
        let idx = idx as usize;
        let slice_edge = perm4_from_index(idx % N_PERM_4, SLICE_EDGES);
        self.ep = place_edges(idx / N_PERM_4, slice_edge, [UR, UF, UL, UB, DR, DF, DL, DB]);
    }

    /// The permutation and location of edges UR, UF, UL and UB.
    ///
    /// 0 <= u_edges < 11880 in phase 1, 0 <= u_edges < 1680 in phase 2, u_edges = 1656 for solved cube.
    pub fn get_u_edges(&self) -> u16 {
        let mut ep_mod = self.ep;
        ep_mod.rotate_right(4);
        let (a, edge4) = locate_edges(&ep_mod, &U_EDGES);
        (N_PERM_4 * a + perm4_index(edge4, &U_EDGES)) as u16
    }

    pub fn set_u_edges(&mut self, idx: u16) {
        let idx = idx as usize;
        let u_edge = perm4_from_index(idx % N_PERM_4, U_EDGES);
        self.ep = place_edges(idx / N_PERM_4, u_edge, [DR, DF, DL, DB, FR, FL, BL, BR]);
        self.ep.rotate_left(4);
    }

    /// The permutation and location of the edges DR, DF, DL and DB.
    ///
    /// 0 <= d_edges < 11880 in phase 1, 0 <= d_edges < 1680 in phase 2, d_edges = 0 for solved cube.
    pub fn get_d_edges(&self) -> u16 {
        let mut ep_mod = self.ep;
        ep_mod.rotate_right(4);
        let (a, edge4) = locate_edges(&ep_mod, &D_EDGES);
        (N_PERM_4 * a + perm4_index(edge4, &D_EDGES)) as u16
    }

    pub fn set_d_edges(&mut self, idx: u16) {
        let idx = idx as usize;
        let d_edge = perm4_from_index(idx % N_PERM_4, D_EDGES);
        self.ep = place_edges(idx / N_PERM_4, d_edge, [FR, FL, BL, BR, UR, UF, UL, UB]);
        self.ep.rotate_left(4);
    }

    /// The permutation of the 8 corners. 0 <= corners < 40320, corners = 0 for solved cube.
    pub fn get_corners(&self) -> u16 {
        let mut perm = self.cp;
        let mut b = 0;
        for j in (1..8).rev() {
            let mut k = 0;
            while perm[j] as usize != j {
                perm[..=j].rotate_left(1);
                k += 1;
            }
            b = (j + 1) * b + k;
        }
        b as u16
    }

    pub fn set_corners(&mut self, idx: u16) {
        let mut idx = idx as usize;
        self.cp = ALL_CORNERS;
        for j in 0..8 {
            let k = idx % (j + 1);
            idx /= j + 1;
            self.cp[..=j].rotate_right(k);
        }
    }

    /// The permutation of the 8 U and D edges.
    ///
    /// Only defined in phase 2, where these edges stay in the U and D faces. Returns `None` when
    /// an UD-slice edge sits in the U or D face.
    pub fn get_ud_edges(&self) -> Option<u16> {
        if self.ep[..8].iter().any(|e| SLICE_EDGES.contains(e)) {
            return None;
        }
        let mut perm = [UR; 8];
        perm.copy_from_slice(&self.ep[..8]);
        let mut b = 0;
        for j in (1..8).rev() {
            let mut k = 0;
            while perm[j] as usize != j {
                perm[..=j].rotate_left(1);
                k += 1;
            }
            b = (j + 1) * b + k;
        }
        Some(b as u16)
    }

    /// Set the U and D edges from a phase 2 coordinate; the UD-slice edges are not affected.
    pub fn set_ud_edges(&mut self, idx: u16) {
        let mut idx = idx as usize;
        self.ep[..8].copy_from_slice(&ALL_EDGES[..8]);
        for j in 0..8 {
            let k = idx % (j + 1);
            idx /= j + 1;
            self.ep[..=j].rotate_right(k);
        }
    }
}

/// Find the positions of the four edges in `group` within `ep`.
///
/// Returns the combination index a < 12 choose 4 of the occupied positions and the four edges
/// in the order of their positions.
fn locate_edges(ep: &[Edge; 12], group: &[Edge; 4]) -> (usize, [Edge; 4]) {
    let mut a = 0;
    let mut x = 0;
    let mut edge4 = [UR; 4];
    for j in (0..12).rev() {
        if group.contains(&ep[j]) {
            a += c_nk(11 - j, x + 1);
            edge4[3 - x] = ep[j];
            x += 1;
        }
    }
    (a, edge4)
}

/// Index b < 4! of the permutation of four edges relative to the order of `group`.
fn perm4_index(mut edge4: [Edge; 4], group: &[Edge; 4]) -> usize {
    let mut b = 0;
    for j in (1..4).rev() {
        let mut k = 0;
        while edge4[j] != group[j] {
            edge4[..=j].rotate_left(1);
            k += 1;
        }
        b = (j + 1) * b + k;
    }
    b
}

fn perm4_from_index(mut b: usize, mut group: [Edge; 4]) -> [Edge; 4] {
    for j in 1..4 {
        let k = b % (j + 1);
        b /= j + 1;
        group[..=j].rotate_right(k);
    }
    group
}

/// Place four edges at the positions given by the combination index `a` and fill the remaining
/// positions with `other` in order.
fn place_edges(mut a: usize, edge4: [Edge; 4], other: [Edge; 8]) -> [Edge; 12] {
    let mut ep = [None; 12];
    let mut x = 4;
    for j in 0..12 {
        if x > 0 && a >= c_nk(11 - j, x) {
            ep[j] = Some(edge4[4 - x]);
            a -= c_nk(11 - j, x);
            x -= 1;
        }
    }
    let mut rest = other.into_iter();
    ep.map(|e| e.or_else(|| rest.next()).unwrap_or(UR))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::moves::Move::*;
    use crate::scramble::scramble_from_str;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_c_nk() {
        assert_eq!(c_nk(12, 4), 495);
        assert_eq!(c_nk(8, 4), 70);
        assert_eq!(c_nk(3, 4), 0);
        assert_eq!(c_nk(5, 0), 1);
    }

    #[test]
    fn test_solved_coordinates() {
        let cc = CubieCube::default();
        assert!(cc.is_solved());
        assert_eq!(cc.get_twist(), 0);
        assert_eq!(cc.get_flip(), 0);
        assert_eq!(cc.get_slice(), 0);
        assert_eq!(cc.get_slice_sorted(), 0);
        assert_eq!(cc.get_u_edges(), 1656);
        assert_eq!(cc.get_d_edges(), 0);
        assert_eq!(cc.get_corners(), 0);
        assert_eq!(cc.get_ud_edges(), Some(0));
    }

    #[test]
    fn test_move_order_four_times_identity() {
        for m in ALL_MOVES {
            let mut cc = CubieCube::default();
            for _ in 0..4 {
                cc = cc.apply_move(m);
            }
            assert!(cc.is_solved(), "{m} four times");
        }
    }

    #[test]
    fn test_sexy_move_order() {
        let sexy = [R, U, R3, U3];
        let mut cc = CubieCube::default();
        for i in 1..=6 {
            cc.multiply_moves(&sexy);
            assert_eq!(cc.is_solved(), i == 6);
        }
    }

    #[test]
    fn test_inverse() {
        let moves = scramble_from_str("R U R' U' F L' D' B2 R' U'").unwrap();
        let cc = CubieCube::from(&moves);
        let mut prod = cc;
        prod.multiply(cc.inverse_cubie_cube());
        assert!(prod.is_solved());
    }

    #[test]
    fn test_facelet_roundtrip() {
        let s = "RLLBUFUUUBDURRBBUBRLRRFDFDDLLLUDFLRRDDFRLFDBUBFFLBBDUF";
        let cc = CubieCube::from_facelets(s).unwrap();
        assert_eq!(FaceCube::from(&cc).to_string(), s);
        assert_eq!(cc.to_string(), s);
    }

    #[test]
    fn test_moves_match_facelets() {
        // R applied to a solved cube moves the F colors to the U face right column
        let cc = CubieCube::default().apply_move(R);
        let fc = FaceCube::from(&cc);
        assert_eq!(
            fc.to_string(),
            "UUFUUFUUFRRRRRRRRRFFDFFDFFDDDBDDBDDBLLLLLLLLLUBBUBBUBB"
        );
    }

    #[test]
    fn test_coordinate_roundtrips() {
        let mut cc = CubieCube::default();
        for i in (0..N_TWIST as u16).step_by(7) {
            cc.set_twist(i);
            assert_eq!(cc.get_twist(), i);
        }
        for i in (0..N_FLIP as u16).step_by(7) {
            cc.set_flip(i);
            assert_eq!(cc.get_flip(), i);
        }
        for i in 0..N_SLICE as u16 {
            cc.set_slice(i);
            assert_eq!(cc.get_slice(), i);
        }
        for i in (0..N_SLICE_SORTED as u16).step_by(13) {
            cc.set_slice_sorted(i);
            assert_eq!(cc.get_slice_sorted(), i);
            cc.set_u_edges(i);
            assert_eq!(cc.get_u_edges(), i);
            cc.set_d_edges(i);
            assert_eq!(cc.get_d_edges(), i);
        }
        for i in (0..N_CORNERS as u16).step_by(37) {
            cc.set_corners(i);
            assert_eq!(cc.get_corners(), i);
        }
        let mut cc = CubieCube::default();
        for i in (0..N_UD_EDGES as u16).step_by(37) {
            cc.set_ud_edges(i);
            assert_eq!(cc.get_ud_edges(), Some(i));
        }
    }

    #[test]
    fn test_ud_edges_undefined_outside_phase2() {
        let cc = CubieCube::default().apply_move(R);
        assert_eq!(cc.get_ud_edges(), None);
        let cc = CubieCube::default().apply_move(R2);
        assert!(cc.get_ud_edges().is_some());
    }

    #[test]
    fn test_randomize_is_solvable() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            let mut cc = CubieCube::default();
            cc.randomize_with(&mut rng);
            assert!(cc.verify().is_ok());
            seen.insert(cc);
        }
        assert_eq!(seen.len(), 100);
    }

    #[test]
    fn test_twisted_corner_is_unreachable() {
        let mut s: Vec<char> = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB"
            .chars()
            .collect();
        // rotate the stickers of the URF corner (U9, R1, F3)
        s[8] = 'F';
        s[9] = 'U';
        s[20] = 'R';
        let s: String = s.into_iter().collect();
        let err = CubieCube::from_facelets(&s).unwrap_err();
        assert!(matches!(err, Error::UnreachableState("total corner twist is wrong")));
    }

    #[test]
    fn test_flipped_edge_is_unreachable() {
        let mut s: Vec<char> = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB"
            .chars()
            .collect();
        // flip the UR edge (U6, R2)
        s[5] = 'R';
        s[10] = 'U';
        let s: String = s.into_iter().collect();
        let err = CubieCube::from_facelets(&s).unwrap_err();
        assert!(matches!(err, Error::UnreachableState("total edge flip is wrong")));
    }

    #[test]
    fn test_swapped_edges_are_unreachable() {
        let mut cc = CubieCube::default();
        cc.ep.swap(0, 1);
        let s = FaceCube::from(&cc).to_string();
        let err = CubieCube::from_facelets(&s).unwrap_err();
        assert!(matches!(err, Error::UnreachableState("wrong edge and corner parity")));
    }

    #[test]
    fn test_impossible_corner_colors() {
        let mut s: Vec<char> = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB"
            .chars()
            .collect();
        // exchange the U sticker of URF with the D sticker of DFR
        s.swap(8, 29);
        let s: String = s.into_iter().collect();
        let err = CubieCube::from_facelets(&s).unwrap_err();
        assert!(matches!(err, Error::UnreachableState("facelets do not form real pieces")));
    }
}
