//! Position reconstruction for the board overlay.
//!
//! Turns the move list scraped from a live game into a FEN, either by full
//! replay ([`reconstruct`]) or, when only a piece grid is available, by an
//! approximate placement-only conversion ([`grid`]).

pub mod error;
pub mod grid;
pub mod notation;
pub mod reconstruct;

pub use error::{GridError, SkipReason};
pub use shakmaty::Color;
pub use reconstruct::{
    reconstruct, reconstruct_strict, replay, replay_strict, replay_with_mode, side_to_move,
    MoveOutcome, ReplayMode, ReplayReport, STANDARD_START_FEN,
};

/// How a FEN was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconstruction {
    /// Full replay; every FEN field reflects the game.
    Replayed(ReplayReport),
    /// Placement from a grid with placeholder state fields.
    Approximate(String),
}

impl Reconstruction {
    pub fn fen(&self) -> &str {
        match self {
            Reconstruction::Replayed(report) => &report.fen,
            Reconstruction::Approximate(fen) => fen,
        }
    }

    pub fn is_approximate(&self) -> bool {
        matches!(self, Reconstruction::Approximate(_))
    }
}
