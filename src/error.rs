//! Error types for the search core
//!
//! Search failures are fatal to the call that raised them. Opening book
//! failures live in [`crate::book::BookError`] and are never fatal.

use thiserror::Error;

/// Errors raised by a search invocation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Search was asked to pick a move in a position without legal moves
    #[error("no legal moves in the root position")]
    NoLegalMoves,

    /// Search depth must be at least one ply
    #[error("search depth must be at least 1 ply")]
    ZeroDepth,

    /// The evaluator produced a value inside the mate band
    #[error("evaluator returned {value}, outside the allowed range of +/-{limit}")]
    EvaluationOutOfRange { value: i32, limit: i32 },

    /// The rules engine reported a position that is neither terminal nor playable
    #[error("position is not game over but has no legal moves")]
    InconsistentPosition,
}

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
