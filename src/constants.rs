use crate::facelet::Color;
use crate::moves::Move::{self, *};

// Coordinate ranges.
pub const N_PERM_4: usize = 24;
pub const N_CHOOSE_8_4: usize = 70;
pub const N_MOVE: usize = 18; // number of possible face moves

pub const N_TWIST: usize = 2187; // 3^7 possible corner orientations in phase 1
pub const N_FLIP: usize = 2048; // 2^11 possible edge orientations in phase 1
pub const N_SLICE: usize = 495; // 12 choose 4 possible positions of FR, FL, BL, BR edges in phase 1
pub const N_SLICE_SORTED: usize = 11880; // 12!/8! permutations of FR, FL, BL, BR edges in phase 1
pub const N_U_EDGES_PHASE2: usize = 1680; // u_edges < 1680 once the U-edges are out of the slice
pub const N_CORNERS: usize = 40320; // 8! corner permutations
pub const N_UD_EDGES: usize = 40320; // 8! permutations of the edges in the U-face and D-face in phase 2

pub const SOLVED: u16 = 0; // 0 is index of solved state (except for u_edges coordinate)

/// Upper bound for the length of any solution the engine will look for.
pub const MAX_SOLUTION_LENGTH: usize = 30;

/// Every cube can be solved in this many moves.
pub const GODS_NUMBER: usize = 20;

pub const ALL_COLORS: [Color; 6] = [
    Color::U,
    Color::R,
    Color::F,
    Color::D,
    Color::L,
    Color::B,
];

#[rustfmt::skip]
pub const ALL_MOVES: [Move; N_MOVE] = [
    U, U2, U3,
    R, R2, R3,
    F, F2, F3,
    D, D2, D3,
    L, L2, L3,
    B, B2, B3,
];

/// The moves which keep a cube inside the subgroup H = <U, D, R2, F2, L2, B2>.
#[rustfmt::skip]
pub const PHASE2_MOVES: [Move; 10] = [
    U, U2, U3,
    R2, F2,
    D, D2, D3,
    L2, B2,
];
