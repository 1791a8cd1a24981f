use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("invalid square: {0:?}")]
    InvalidSquare(String),

    #[error("invalid move {0:?}, expected from+to squares like e2e4")]
    InvalidUci(String),

    #[error(transparent)]
    NotReady(#[from] NotReady),
}

/// Board has not been laid out yet. Not an error: retry after a delay.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("board not ready (undersized bounding box)")]
pub struct NotReady;
