//! Error and skip-reason types for position reconstruction.

use serde::Serialize;
use thiserror::Error;

/// Why a single move token was not applied during replay.
///
/// None of these abort a replay; the token is skipped and the next one is
/// tried against the unchanged position.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("not a move (blank or game result)")]
    NotAMove,

    #[error("invalid notation: {0}")]
    InvalidNotation(String),

    #[error("illegal in current position: {0}")]
    Illegal(String),

    #[error("ambiguous move (strict mode)")]
    Ambiguous,

    #[error("coordinate notation not accepted (strict mode)")]
    CoordinateRejected,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must have 8 ranks, got {0}")]
    RankCount(usize),

    #[error("rank {rank} must have 8 squares, got {len}")]
    FileCount { rank: usize, len: usize },
}
