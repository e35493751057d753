//! The facelet level of the cube.
//!
//! A cube definition string has 54 characters, 9 per face, with the faces in the order U, R, F, D, L, B:
//!
//! ```text
//!              |************|
//!              |*U1**U2**U3*|
//!              |************|
//!              |*U4**U5**U6*|
//!              |************|
//!              |*U7**U8**U9*|
//!              |************|
//! |************|************|************|************|
//! |*L1**L2**L3*|*F1**F2**F3*|*R1**R2**R3*|*B1**B2**B3*|
//! |************|************|************|************|
//! |*L4**L5**L6*|*F4**F5**F6*|*R4**R5**R6*|*B4**B5**B6*|
//! |************|************|************|************|
//! |*L7**L8**L9*|*F7**F8**F9*|*R7**R8**R9*|*B7**B8**B9*|
//! |************|************|************|************|
//!              |************|
//!              |*D1**D2**D3*|
//!              |************|
//!              |*D4**D5**D6*|
//!              |************|
//!              |*D7**D8**D9*|
//!              |************|
//! ```
//!
//! Byte offsets: U1..U9 = 0..9, R1..R9 = 9..18, F1..F9 = 18..27, D1..D9 = 27..36, L1..L9 = 36..45,
//! B1..B9 = 45..54. A solved cube is `UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB`.
//!
//! Any six distinct characters may be used as colors: the character at the center of a face
//! (offsets 4, 13, 22, 31, 40, 49) is the color of that face. Whitespace is not stripped, a
//! string with surrounding blanks or a trailing newline is rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::ALL_COLORS;
use crate::cubie::CubieCube;
use crate::error::Error;

/// Number of facelets.
pub const N_FACELETS: usize = 54;

/// Offsets of the six center facelets, in face order.
pub const CENTERS: [usize; 6] = [4, 13, 22, 31, 40, 49];

/// Names the facelet positions of the cube.
#[rustfmt::skip]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Facelet {
    U1, U2, U3, U4, U5, U6, U7, U8, U9,
    R1, R2, R3, R4, R5, R6, R7, R8, R9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9,
    D1, D2, D3, D4, D5, D6, D7, D8, D9,
    L1, L2, L3, L4, L5, L6, L7, L8, L9,
    B1, B2, B3, B4, B5, B6, B7, B8, B9,
}

/// The names of the colors of the cube facelets: White, Red, Green, Yellow, Orange, Blue.
///
/// A color is named after the face it belongs to on the solved cube.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl Color {
    pub fn as_char(self) -> char {
        match self {
            Color::U => 'U',
            Color::R => 'R',
            Color::F => 'F',
            Color::D => 'D',
            Color::L => 'L',
            Color::B => 'B',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

use self::Facelet::*;

/// Map the corner positions to facelet positions.
#[rustfmt::skip]
pub const CORNER_FACELET: [[Facelet; 3]; 8] = [
    [U9, R1, F3], [U7, F1, L3], [U1, L1, B3], [U3, B1, R3],
    [D3, F9, R7], [D1, L9, F7], [D7, B9, L7], [D9, R9, B7],
];

/// Map the edge positions to facelet positions.
#[rustfmt::skip]
pub const EDGE_FACELET: [[Facelet; 2]; 12] = [
    [U6, R2], [U8, F2], [U4, L2], [U2, B2], [D6, R8], [D2, F8],
    [D4, L8], [D8, B8], [F6, R4], [F4, L6], [B6, L4], [B4, R6],
];

/// Map the corner positions to facelet colors.
#[rustfmt::skip]
pub const CORNER_COLOR: [[Color; 3]; 8] = [
    [Color::U, Color::R, Color::F], [Color::U, Color::F, Color::L],
    [Color::U, Color::L, Color::B], [Color::U, Color::B, Color::R],
    [Color::D, Color::F, Color::R], [Color::D, Color::L, Color::F],
    [Color::D, Color::B, Color::L], [Color::D, Color::R, Color::B],
];

/// Map the edge positions to facelet colors.
#[rustfmt::skip]
pub const EDGE_COLOR: [[Color; 2]; 12] = [
    [Color::U, Color::R], [Color::U, Color::F], [Color::U, Color::L], [Color::U, Color::B],
    [Color::D, Color::R], [Color::D, Color::F], [Color::D, Color::L], [Color::D, Color::B],
    [Color::F, Color::R], [Color::F, Color::L], [Color::B, Color::L], [Color::B, Color::R],
];

/// Cube on the facelet level.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FaceCube {
    pub f: [Color; N_FACELETS],
}

impl Default for FaceCube {
    fn default() -> Self {
        let mut f = [Color::U; N_FACELETS];
        for (i, color) in ALL_COLORS.into_iter().enumerate() {
            f[9 * i..9 * i + 9].fill(color);
        }
        Self { f }
    }
}

impl FaceCube {
    /// The nine facelets of one face, in reading order.
    pub fn face(&self, face: Color) -> &[Color; 9] {
        let start = 9 * face as usize;
        self.f[start..start + 9]
            .try_into()
            .expect("a face is exactly nine facelets")
    }

    pub fn faces(&self) -> impl Iterator<Item = (Color, &[Color; 9])> + '_ {
        ALL_COLORS.into_iter().map(move |c| (c, self.face(c)))
    }
}

impl fmt::Display for FaceCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = self.f.iter().map(|c| c.as_char()).collect();
        write!(f, "{s}")
    }
}

impl TryFrom<&str> for FaceCube {
    type Error = Error;

    /// Parse a cube definition string.
    ///
    /// The center of each face names the color of that face, so `"UUUU..."` and a string using
    /// any other six symbols are read the same way.
    fn try_from(cube_string: &str) -> Result<Self, Self::Error> {
        let chars: Vec<char> = cube_string.chars().collect();
        let chars: [char; N_FACELETS] = chars.try_into().map_err(|v: Vec<char>| {
            Error::InvalidFaceletString(format!("expected 54 facelets, got {}", v.len()))
        })?;

        let centers = CENTERS.map(|i| chars[i]);
        for (i, c) in centers.iter().enumerate() {
            if centers[..i].contains(c) {
                return Err(Error::InvalidFaceletString(format!(
                    "center color {c:?} appears on more than one face"
                )));
            }
        }

        let mut f = [Color::U; N_FACELETS];
        let mut count = [0usize; 6];
        for (i, ch) in chars.iter().enumerate() {
            let face = centers.iter().position(|c| c == ch).ok_or_else(|| {
                Error::InvalidFaceletString(format!("color {ch:?} at facelet {i} is not a center color"))
            })?;
            f[i] = ALL_COLORS[face];
            count[face] += 1;
        }

        if let Some(face) = count.iter().position(|&n| n != 9) {
            return Err(Error::InvalidFaceletString(format!(
                "color {:?} occurs {} times, expected 9",
                centers[face], count[face]
            )));
        }
        Ok(Self { f })
    }
}

impl From<&CubieCube> for FaceCube {
    /// Return a facelet representation of the cube.
    fn from(cc: &CubieCube) -> Self {
        let mut fc = FaceCube::default();
        for (i, &corner) in cc.cp.iter().enumerate() {
            let j = corner as usize;
            let ori = cc.co[i] as usize;
            for k in 0..3 {
                fc.f[CORNER_FACELET[i][(k + ori) % 3] as usize] = CORNER_COLOR[j][k];
            }
        }
        for (i, &edge) in cc.ep.iter().enumerate() {
            let j = edge as usize;
            let ori = cc.eo[i] as usize;
            for k in 0..2 {
                fc.f[EDGE_FACELET[i][(k + ori) % 2] as usize] = EDGE_COLOR[j][k];
            }
        }
        fc
    }
}
