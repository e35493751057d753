use rand::Rng;

use crate::constants::ALL_MOVES;
use crate::error::Error;
use crate::moves::Move;

/// Parse a whitespace separated move sequence like `"R U R' U2"`.
pub fn scramble_from_str(s: &str) -> Result<Vec<Move>, Error> {
    s.split_whitespace().map(str::parse).collect()
}

/// Format a move sequence with single spaces, the empty sequence gives an empty string.
pub fn scramble_to_str(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A random scramble of `length` moves.
pub fn gen_scramble(length: usize) -> Vec<Move> {
    gen_scramble_with_rng(&mut rand::thread_rng(), length)
}

/// A random scramble of `length` moves drawn from `rng`.
///
/// No move turns the face of its predecessor, and moves of opposite faces appear in canonical order.
pub fn gen_scramble_with_rng<R: Rng>(rng: &mut R, length: usize) -> Vec<Move> {
    let mut scramble: Vec<Move> = Vec::with_capacity(length);
    while scramble.len() < length {
        let m = ALL_MOVES[rng.gen_range(0..ALL_MOVES.len())];
        if scramble.last().map_or(true, |&prev| m.may_follow(prev)) {
            scramble.push(m);
        }
    }
    scramble
}
