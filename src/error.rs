use bincode::error::{DecodeError, EncodeError};
use thiserror::Error;

/// Errors returned by the solving engine.
#[derive(Debug, Error)]
pub enum Error {
    /// The facelet string has a wrong length, wrong centers or a wrong color multiset.
    #[error("invalid facelet string: {0}")]
    InvalidFaceletString(String),

    /// The facelet string is well formed but does not describe a cube reachable from the solved state.
    #[error("unreachable cube state: {0}")]
    UnreachableState(&'static str),

    #[error("invalid move token: {0:?}")]
    InvalidMoveToken(String),

    #[error("search timed out before a solution was found")]
    SearchTimedOut,

    /// No solution within a bound every cube can be solved in. For a validated cube this means
    /// the tables or the coordinate encoding are broken.
    #[error("no solution found within {max_length} moves")]
    SearchExhausted { max_length: usize },

    /// The cube needs more moves than the caller allowed.
    #[error("no solution within the requested {max_length} moves")]
    NoSolutionWithinLength { max_length: usize },

    #[error("solver setup failed: {0}")]
    SetupFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
}
