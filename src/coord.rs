use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::cubie::Edge::{self, *};
use crate::cubie::CubieCube;
use crate::error::Error;
use crate::moves::{Move, MoveTables};

/// Represent a cube on the coordinate level.
///
/// In phase 1 a state is uniquely determined by the three coordinates flip, twist and slice = slice_sorted / 24.
///
/// In phase 2 a state is uniquely determined by the three coordinates corners, ud_edges and slice_sorted % 24.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CoordCube {
    pub twist: u16,        // twist of corners
    pub flip: u16,         // flip of edges
    pub slice_sorted: u16, // Position of FR, FL, BL, BR edges. Valid in phase 1 (<11880) and phase 2 (<24)
    // The phase 1 slice coordinate is given by slice_sorted / 24
    pub u_edges: u16, // Valid in phase 1 (<11880) and phase 2 (<1680). 1656 is the index of solved u_edges.
    pub d_edges: u16, // Valid in phase 1 (<11880) and phase 2 (<1680)
    pub corners: u16, // corner permutation. Valid in phase1 and phase2
    pub ud_edges: Option<u16>, // permutation of the ud-edges. Valid only in phase 2
}

impl Default for CoordCube {
    fn default() -> Self {
        Self {
            twist: 0,
            flip: 0,
            slice_sorted: 0,
            u_edges: 1656,
            d_edges: 0,
            corners: 0,
            ud_edges: Some(0),
        }
    }
}

impl fmt::Display for CoordCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(twist: {}, flip: {}, slice: {}, U-edges: {}, D-edges: {}, E-edges: {}, Corners: {}, UD-Edges: {:?})",
            self.twist,
            self.flip,
            self.slice_sorted / N_PERM_4 as u16,
            self.u_edges,
            self.d_edges,
            self.slice_sorted,
            self.corners,
            self.ud_edges
        )
    }
}

impl CoordCube {
    /// Build a CoordCube from CubieCube(cc).
    pub fn from_cubie(cc: &CubieCube) -> Result<Self, Error> {
        cc.verify()?;
        Ok(Self {
            twist: cc.get_twist(),
            flip: cc.get_flip(),
            slice_sorted: cc.get_slice_sorted(),
            u_edges: cc.get_u_edges(),
            d_edges: cc.get_d_edges(),
            corners: cc.get_corners(),
            ud_edges: cc.get_ud_edges(),
        })
    }

    /// Rebuild a representative cubie cube from the coordinates.
    ///
    /// The corners are fixed by twist and corners, the edges by the positions of the slice, U and
    /// D edge groups together with flip.
    pub fn to_cubie(&self) -> CubieCube {
        let mut cc = CubieCube::default();
        cc.set_corners(self.corners);
        cc.set_twist(self.twist);

        let mut slice = CubieCube::default();
        slice.set_slice_sorted(self.slice_sorted);
        let mut u = CubieCube::default();
        u.set_u_edges(self.u_edges);
        let mut d = CubieCube::default();
        d.set_d_edges(self.d_edges);
        for i in 0..12 {
            cc.ep[i] = [slice.ep[i], u.ep[i], d.ep[i]]
                .into_iter()
                .find(|e| in_group(*e, i, &slice, &u, &d))
                .unwrap_or(slice.ep[i]);
        }
        cc.set_flip(self.flip);
        cc
    }

    /// Whether the cube is in the subgroup H = <U, D, R2, F2, L2, B2>.
    pub fn in_phase2(&self) -> bool {
        self.twist == SOLVED && self.flip == SOLVED && self.slice_sorted < N_PERM_4 as u16
    }

    /// Update phase 1 coordinates when move is apply.
    ///
    /// The ud_edges coordinate is recomputed from u_edges and d_edges whenever the cube lands in phase 2.
    pub fn phase1_move(&mut self, m: Move, mv: &MoveTables, em: &EdgeMergeTables) {
        self.twist = mv.twist(self.twist, m);
        self.flip = mv.flip(self.flip, m);
        self.slice_sorted = mv.slice_sorted(self.slice_sorted, m);
        self.u_edges = mv.u_edges(self.u_edges, m); // u_edges and d_edges retrieve ud_edges easily
        self.d_edges = mv.d_edges(self.d_edges, m); // if phase 1 is finished and phase 2 starts
        self.corners = mv.corners(self.corners, m);
        self.ud_edges = if self.slice_sorted < N_PERM_4 as u16 {
            Some(em.ud_edges(self.u_edges, self.d_edges))
        } else {
            None
        };
    }

    /// Update phase 2 coordinates when move is apply.
    ///
    /// Only defined for phase 2 moves on a cube in phase 2.
    pub fn phase2_move(&mut self, m: Move, mv: &MoveTables) {
        self.slice_sorted = mv.slice_sorted(self.slice_sorted, m);
        self.corners = mv.corners(self.corners, m);
        self.u_edges = mv.u_edges(self.u_edges, m);
        self.d_edges = mv.d_edges(self.d_edges, m);
        self.ud_edges = self.ud_edges.map(|ud| mv.ud_edges(ud, m));
    }
}

// slice edges come from the slice_sorted cube, U edges from the u_edges cube, D edges from the d_edges cube
fn in_group(e: Edge, i: usize, slice: &CubieCube, u: &CubieCube, d: &CubieCube) -> bool {
    match e {
        FR | FL | BL | BR => slice.ep[i] == e,
        UR | UF | UL | UB => u.ep[i] == e,
        DR | DF | DL | DB => d.ep[i] == e,
    }
}

/// EdgeMergeTables stores the initial phase 2 ud_edges coordinate from the u_edges and d_edges coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeMergeTables {
    pub upd_ud_edges: Vec<u16>,
}

impl Default for EdgeMergeTables {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeMergeTables {
    pub fn new() -> Self {
        Self {
            upd_ud_edges: create_phase2_edgemerge_table(),
        }
    }

    /// ud_edges of a phase 2 cube with the given u_edges and d_edges coordinates.
    #[inline]
    pub fn ud_edges(&self, u_edges: u16, d_edges: u16) -> u16 {
        self.upd_ud_edges[N_PERM_4 * u_edges as usize + d_edges as usize % N_PERM_4]
    }
}

/// phase2_edgemerge retrieves the initial phase 2 ud_edges coordinate from the u_edges and d_edges coordinates.
fn create_phase2_edgemerge_table() -> Vec<u16> {
    let mut u_edges_plus_d_edges_to_ud_edges: Vec<u16> = vec![0; N_U_EDGES_PHASE2 * N_PERM_4];
    let mut c_u = CubieCube::default();
    let mut c_d = CubieCube::default();
    let mut c_ud = CubieCube::default();
    let edge_u = [UR, UF, UL, UB];
    let edge_d = [DR, DF, DL, DB];

    for i in 0..N_U_EDGES_PHASE2 {
        c_u.set_u_edges(i as u16);
        for j in 0..N_CHOOSE_8_4 {
            c_d.set_d_edges((j * N_PERM_4) as u16);
            // the U and D edges must fill the 8 positions of the U and D faces without collision
            let invalid = (0..8).any(|e| edge_u.contains(&c_u.ep[e]) == edge_d.contains(&c_d.ep[e]));
            if invalid {
                continue;
            }
            for k in 0..N_PERM_4 {
                c_d.set_d_edges((j * N_PERM_4 + k) as u16);
                for e in 0..8 {
                    c_ud.ep[e] = if edge_u.contains(&c_u.ep[e]) {
                        c_u.ep[e]
                    } else {
                        c_d.ep[e]
                    };
                }
                u_edges_plus_d_edges_to_ud_edges[N_PERM_4 * i + k] =
                    c_ud.get_ud_edges().unwrap_or(0);
            }
        }
    }
    u_edges_plus_d_edges_to_ud_edges
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::facelet::FaceCube;
    use crate::moves::Move::*;
    use crate::scramble::scramble_from_str;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_coordcube_of_solved() {
        let cdc = CoordCube::from_cubie(&CubieCube::default()).unwrap();
        assert_eq!(cdc, CoordCube::default());
        assert!(cdc.in_phase2());
    }

    #[test]
    fn test_coordcube_rejects_unsolvable() {
        let mut cc = CubieCube::default();
        cc.co[0] = 1;
        assert!(matches!(
            CoordCube::from_cubie(&cc),
            Err(Error::UnreachableState(_))
        ));
    }

    #[test]
    fn test_decode_encode() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let mut cc = CubieCube::default();
            cc.randomize_with(&mut rng);
            let cdc = CoordCube::from_cubie(&cc).unwrap();
            assert_eq!(cdc.to_cubie(), cc);
        }
        let fc = FaceCube::try_from("RLLBUFUUUBDURRBBUBRLRRFDFDDLLLUDFLRRDDFRLFDBUBFFLBBDUF").unwrap();
        let cc = CubieCube::try_from(&fc).unwrap();
        let cdc = CoordCube::from_cubie(&cc).unwrap();
        assert_eq!(cdc.ud_edges, None);
        assert_eq!(cdc.to_cubie(), cc);
    }

    #[test]
    fn test_create_phase2_edgemerge_table() {
        let em = EdgeMergeTables::new();
        assert_eq!(em.upd_ud_edges.len(), 40320);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            // a random phase 2 cube
            let mut cc = CubieCube::default();
            cc.set_corners(rand::Rng::gen_range(&mut rng, 0..N_CORNERS) as u16);
            cc.set_ud_edges(rand::Rng::gen_range(&mut rng, 0..N_UD_EDGES) as u16);
            assert_eq!(
                Some(em.ud_edges(cc.get_u_edges(), cc.get_d_edges())),
                cc.get_ud_edges()
            );
        }
    }

    #[test]
    fn test_phase_moves_track_cubie_cube() {
        let mv = MoveTables::new();
        let em = EdgeMergeTables::new();
        let moves = scramble_from_str("R U R' U' F L' D' B2 R' U'").unwrap();
        let mut cc = CubieCube::default();
        let mut cdc = CoordCube::default();
        for m in moves {
            cc = cc.apply_move(m);
            cdc.phase1_move(m, &mv, &em);
            assert_eq!(cdc, CoordCube::from_cubie(&cc).unwrap());
        }

        let mut cc = CubieCube::default();
        let mut cdc = CoordCube::default();
        for m in [U, R2, D3, F2, B2, L2, U2] {
            cc = cc.apply_move(m);
            cdc.phase2_move(m, &mv);
            assert_eq!(cdc, CoordCube::from_cubie(&cc).unwrap());
        }
    }
}
