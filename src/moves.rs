use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use self::Move::*;
use crate::constants::*;
use crate::cubie::{self, Corner::*, CubieCube, Edge::*};
use crate::error::Error;
use crate::facelet::Color;

/// Layer moves, Up, Right, Front, Down, Left, Back.
///
/// $ clockwise, $2 double, $3 counter-clockwise.
///
/// The declaration order is the canonical move order: the search tries moves in this order and
/// `Move as usize` indexes the move tables.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Move {
    U, U2, U3,
    R, R2, R3,
    F, F2, F3,
    D, D2, D3,
    L, L2, L3,
    B, B2, B3,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            U3 => write!(f, "U'"),
            D3 => write!(f, "D'"),
            R3 => write!(f, "R'"),
            L3 => write!(f, "L'"),
            F3 => write!(f, "F'"),
            B3 => write!(f, "B'"),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" => Ok(R),
            "R'" => Ok(R3),
            "R2" | "R2'" => Ok(R2),
            "L" => Ok(L),
            "L'" => Ok(L3),
            "L2" | "L2'" => Ok(L2),
            "U" => Ok(U),
            "U'" => Ok(U3),
            "U2" | "U2'" => Ok(U2),
            "D" => Ok(D),
            "D'" => Ok(D3),
            "D2" | "D2'" => Ok(D2),
            "F" => Ok(F),
            "F'" => Ok(F3),
            "F2" | "F2'" => Ok(F2),
            "B" => Ok(B),
            "B'" => Ok(B3),
            "B2" | "B2'" => Ok(B2),
            _ => Err(Error::InvalidMoveToken(s.to_string())),
        }
    }
}

#[rustfmt::skip]
impl Move {
    /// The face turned by this move.
    pub fn face(self) -> Color {
        ALL_COLORS[self as usize / 3]
    }

    /// Whether `other` turns the face opposite to `self` and comes first in the canonical order.
    pub fn is_inverse(&self, other: Move) -> bool {
        matches!(
            (&self, other),
            (U | U2 | U3, D | D2 | D3)
            | (R | R2 | R3, L | L2 | L3)
            | (F | F2 | F3, B | B2 | B3),
        )
    }

    pub fn is_same_layer(&self, other: Move) -> bool {
        self.face() == other.face()
    }

    /// Whether this move keeps a cube inside the phase 2 subgroup.
    pub fn is_phase2(self) -> bool {
        matches!(self, U | U2 | U3 | D | D2 | D3 | R2 | F2 | L2 | B2)
    }

    /// Whether `self` may follow `prev` in a search path.
    ///
    /// Moves on the same face are never adjacent and moves on opposite faces only appear in the
    /// order U before D, R before L, F before B.
    pub fn may_follow(self, prev: Move) -> bool {
        !(self.is_same_layer(prev) || self.is_inverse(prev))
    }

    pub fn get_inverse(self) -> Self {
        match self {
            U => U3,
            U3 => U,
            D => D3,
            D3 => D,
            R => R3,
            R3 => R,
            L => L3,
            L3 => L,
            F => F3,
            F3 => F,
            B => B3,
            B3 => B,
            _ => self,
        }
    }
}

/// The basic six cube moves described by permutations and changes in orientation.
///
/// U_MOVE
pub const U_MOVE: CubieCube = CubieCube {
    cp: [UBR, URF, UFL, ULB, DFR, DLF, DBL, DRB],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UB, UR, UF, UL, DR, DF, DL, DB, FR, FL, BL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// R_MOVE
pub const R_MOVE: CubieCube = CubieCube {
    cp: [DFR, UFL, ULB, URF, DRB, DLF, DBL, UBR], //permutation of the corners
    co: [2, 0, 0, 1, 1, 0, 0, 2],                 //changes of the orientations of the corners
    ep: [FR, UF, UL, UB, BR, DF, DL, DB, DR, FL, BL, UR], //permutation of the edges
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],     //changes of the permutations of the edges
};

/// F_MOVE
pub const F_MOVE: CubieCube = CubieCube {
    cp: [UFL, DLF, ULB, UBR, URF, DFR, DBL, DRB],
    co: [1, 2, 0, 0, 2, 1, 0, 0],
    ep: [UR, FL, UL, UB, DR, FR, DL, DB, UF, DF, BL, BR],
    eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
};

/// D_MOVE
pub const D_MOVE: CubieCube = CubieCube {
    cp: [URF, UFL, ULB, UBR, DLF, DBL, DRB, DFR],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UR, UF, UL, UB, DF, DL, DB, DR, FR, FL, BL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// L_MOVE
pub const L_MOVE: CubieCube = CubieCube {
    cp: [URF, ULB, DBL, UBR, DFR, UFL, DLF, DRB],
    co: [0, 1, 2, 0, 0, 2, 1, 0],
    ep: [UR, UF, BL, UB, DR, DF, FL, DB, FR, UL, DL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// B_MOVE
pub const B_MOVE: CubieCube = CubieCube {
    cp: [URF, UFL, UBR, DRB, DFR, DLF, ULB, DBL],
    co: [0, 0, 1, 2, 0, 0, 2, 1],
    ep: [UR, UF, UL, BR, DR, DF, DL, BL, FR, FL, UB, DB],
    eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
};

/// Transition tables for all coordinates: `table[N_MOVE * coord + move]` is the coordinate after the move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTables {
    pub twist_move: Vec<u16>,
    pub flip_move: Vec<u16>,
    pub u_edges_move: Vec<u16>,
    pub d_edges_move: Vec<u16>,
    pub ud_edges_move: Vec<u16>,
    pub corners_move: Vec<u16>,
    pub slice_sorted_move: Vec<u16>,
}

impl Default for MoveTables {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveTables {
    pub fn new() -> Self {
        Self {
            twist_move: move_twist(),
            flip_move: move_flip(),
            u_edges_move: move_u_edges(),
            d_edges_move: move_d_edges(),
            ud_edges_move: move_ud_edges(),
            corners_move: move_corners(),
            slice_sorted_move: move_slice_sorted(),
        }
    }

    #[inline]
    pub fn twist(&self, twist: u16, m: Move) -> u16 {
        self.twist_move[N_MOVE * twist as usize + m as usize]
    }

    #[inline]
    pub fn flip(&self, flip: u16, m: Move) -> u16 {
        self.flip_move[N_MOVE * flip as usize + m as usize]
    }

    #[inline]
    pub fn slice_sorted(&self, slice_sorted: u16, m: Move) -> u16 {
        self.slice_sorted_move[N_MOVE * slice_sorted as usize + m as usize]
    }

    /// Move the phase 1 slice coordinate through the slice_sorted table.
    #[inline]
    pub fn slice(&self, slice: u16, m: Move) -> u16 {
        self.slice_sorted(slice * N_PERM_4 as u16, m) / N_PERM_4 as u16
    }

    #[inline]
    pub fn u_edges(&self, u_edges: u16, m: Move) -> u16 {
        self.u_edges_move[N_MOVE * u_edges as usize + m as usize]
    }

    #[inline]
    pub fn d_edges(&self, d_edges: u16, m: Move) -> u16 {
        self.d_edges_move[N_MOVE * d_edges as usize + m as usize]
    }

    /// Only valid for phase 2 moves.
    #[inline]
    pub fn ud_edges(&self, ud_edges: u16, m: Move) -> u16 {
        self.ud_edges_move[N_MOVE * ud_edges as usize + m as usize]
    }

    #[inline]
    pub fn corners(&self, corners: u16, m: Move) -> u16 {
        self.corners_move[N_MOVE * corners as usize + m as usize]
    }
}

/// Fill a move table by setting every coordinate value on a representative cube and turning each
/// face four times, recording the coordinate after the first three turns.
fn build_move_table(
    n: usize,
    set: impl Fn(&mut CubieCube, u16),
    turn: impl Fn(&mut CubieCube, CubieCube),
    get: impl Fn(&CubieCube) -> u16,
    keep: impl Fn(Color, usize) -> bool,
) -> Vec<u16> {
    let mut a = CubieCube::default();
    let bmc = cubie::basic_move_cubes();
    let mut table = vec![0; n * N_MOVE];
    for i in 0..n {
        set(&mut a, i as u16);
        for j in ALL_COLORS {
            // six faces U, R, F, D, L, B
            for k in 0..3 {
                // three moves for each face, for example U, U2, U3 = U'
                turn(&mut a, bmc[j as usize]);
                if keep(j, k) {
                    table[N_MOVE * i + 3 * j as usize + k] = get(&a);
                }
            }
            turn(&mut a, bmc[j as usize]); // 4. move restores face
        }
    }
    table
}

fn all_moves(_: Color, _: usize) -> bool {
    true
}

/// Move table for the twists of the corners.
///
/// The twist coordinate describes the 3^7 = 2187 possible orientations of the 8 corners
///
/// 0 <= twist < 2187 in phase 1, twist = 0 in phase 2
pub fn move_twist() -> Vec<u16> {
    build_move_table(
        N_TWIST,
        CubieCube::set_twist,
        CubieCube::corner_multiply,
        CubieCube::get_twist,
        all_moves,
    )
}

/// Move table for the flip of the edges.
///
/// The flip coordinate describes the 2^11 = 2048 possible orientations of the 12 edges
///
/// 0 <= flip < 2048 in phase 1, flip = 0 in phase 2
pub fn move_flip() -> Vec<u16> {
    build_move_table(
        N_FLIP,
        CubieCube::set_flip,
        CubieCube::edge_multiply,
        CubieCube::get_flip,
        all_moves,
    )
}

/// Move table for the four UD-slice edges FR, FL, Bl and BR.
///
/// The slice_sorted coordinate describes the 12!/8! = 11880 possible positions of the FR, FL, BL and BR edges.
///
/// Though for phase 1 only the "unsorted" slice coordinate with Binomial(12,4) = 495 positions is relevant, using the
/// slice_sorted coordinate gives us the permutation of the FR, FL, BL and BR edges at the beginning of phase 2 for free.
///
/// 0 <= slice_sorted < 11880 in phase 1, 0 <= slice_sorted < 24 in phase 2, slice_sorted = 0 for solved cube
pub fn move_slice_sorted() -> Vec<u16> {
    build_move_table(
        N_SLICE_SORTED,
        CubieCube::set_slice_sorted,
        CubieCube::edge_multiply,
        CubieCube::get_slice_sorted,
        all_moves,
    )
}

/// Move table for the u_edges coordinate for transition phase 1 -> phase 2
///
/// The u_edges coordinate describes the 12!/8! = 11880 possible positions of the UR, UF, UL and UB edges. It is needed at
/// the end of phase 1 to set up the coordinates of phase 2
///
/// 0 <= u_edges < 11880 in phase 1, 0 <= u_edges < 1680 in phase 2, u_edges = 1656 for solved cube.
pub fn move_u_edges() -> Vec<u16> {
    build_move_table(
        N_SLICE_SORTED,
        CubieCube::set_u_edges,
        CubieCube::edge_multiply,
        CubieCube::get_u_edges,
        all_moves,
    )
}

/// Move table for the d_edges coordinate for transition phase 1 -> phase 2
///
/// 0 <= d_edges < 11880 in phase 1, 0 <= d_edges < 1680 in phase 2, d_edges = 0 for solved cube.
pub fn move_d_edges() -> Vec<u16> {
    build_move_table(
        N_SLICE_SORTED,
        CubieCube::set_d_edges,
        CubieCube::edge_multiply,
        CubieCube::get_d_edges,
        all_moves,
    )
}

/// Move table for the edges in the U-face and D-face.
///
/// The ud_edges coordinate describes the 40320 permutations of the edges UR, UF, UL, UB, DR, DF, DL and DB in phase 2
///
/// ud_edges undefined in phase 1, 0 <= ud_edges < 40320 in phase 2, ud_edges = 0 for solved cube.
/// Entries for moves outside phase 2 are 0.
pub fn move_ud_edges() -> Vec<u16> {
    build_move_table(
        N_UD_EDGES,
        CubieCube::set_ud_edges,
        CubieCube::edge_multiply,
        |a| a.get_ud_edges().unwrap_or(0),
        // only R2, F2, L2 and B2 in phase 2
        |j, k| matches!(j, Color::U | Color::D) || k == 1,
    )
}

/// Move table for the corners coordinate in phase 2
///
/// The corners coordinate describes the 8! = 40320 permutations of the corners.
///
/// 0 <= corners < 40320 defined but unused in phase 1, 0 <= corners < 40320 in phase 2, corners = 0 for solved cube
pub fn move_corners() -> Vec<u16> {
    build_move_table(
        N_CORNERS,
        CubieCube::set_corners,
        CubieCube::corner_multiply,
        CubieCube::get_corners,
        all_moves,
    )
}
