//! Approximate FEN from a raw piece grid.
//!
//! Used when the page exposes piece placement but no move list. Only the
//! placement field is real: side to move, castling, en passant and the
//! clocks are fixed placeholders, so the result can be wrong about whose
//! turn it is.

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Placeholder fields appended after the placement.
pub const APPROXIMATE_SUFFIX: &str = "w KQkq - 0 1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPiece {
    #[serde(rename = "color")]
    pub side: Side,
    #[serde(rename = "type")]
    pub kind: PieceKind,
}

impl GridPiece {
    pub fn new(side: Side, kind: PieceKind) -> Self {
        Self { side, kind }
    }

    fn fen_char(self) -> char {
        let c = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.side {
            Side::White => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }
}

/// Placement field of a FEN. Row 0 of `grid` is rank 8, column 0 is file a.
pub fn placement_from_grid<R: AsRef<[Option<GridPiece>]>>(grid: &[R]) -> Result<String, GridError> {
    if grid.len() != 8 {
        return Err(GridError::RankCount(grid.len()));
    }

    let mut placement = String::with_capacity(64);
    for (rank_idx, row) in grid.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != 8 {
            return Err(GridError::FileCount {
                rank: rank_idx,
                len: row.len(),
            });
        }

        let mut empty = 0u8;
        for square in row {
            match square {
                Some(piece) => {
                    if empty > 0 {
                        placement.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    placement.push(piece.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            placement.push(char::from(b'0' + empty));
        }
        if rank_idx < 7 {
            placement.push('/');
        }
    }
    Ok(placement)
}

/// Full FEN with placeholder state. See the module docs for what is guessed.
pub fn approximate_fen_from_grid<R: AsRef<[Option<GridPiece>]>>(grid: &[R]) -> Result<String, GridError> {
    let placement = placement_from_grid(grid)?;
    let fen = format!("{placement} {APPROXIMATE_SUFFIX}");
    tracing::debug!(fen = %fen, "Built approximate FEN from grid");
    Ok(fen)
}
