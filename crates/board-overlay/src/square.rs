//! Squares, board orientation, and the board's on-screen box.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Boards smaller than this in either dimension are still being laid out.
pub const MIN_BOARD_DIMENSION: f64 = 100.0;

/// A square such as `e4`. File and rank are stored zero-based
/// (`a` = 0, rank `1` = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SquareRef {
    file: u8,
    rank: u8,
}

impl SquareRef {
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self { file, rank })
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Row from the top of a White-oriented board: rank 8 is row 0.
    pub fn row_from_top(self) -> u8 {
        7 - self.rank
    }
}

impl FromStr for SquareRef {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [f @ b'a'..=b'h', r @ b'1'..=b'8'] => Ok(Self {
                file: f - b'a',
                rank: r - b'1',
            }),
            _ => Err(GeometryError::InvalidSquare(s.to_string())),
        }
    }
}

impl fmt::Display for SquareRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", char::from(b'a' + self.file), char::from(b'1' + self.rank))
    }
}

/// Which side sits at the bottom of the rendered board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    White,
    /// Flipped: mirrored on both axes.
    Black,
}

impl Orientation {
    /// From the page's `board-orientation` attribute. Anything other than
    /// `"black"`, including a missing attribute, is White.
    pub fn from_attribute(attr: Option<&str>) -> Self {
        match attr {
            Some("black") => Orientation::Black,
            _ => Orientation::White,
        }
    }

    pub fn is_flipped(self) -> bool {
        self == Orientation::Black
    }

    /// `player_color` value sent to the analysis service.
    pub fn player_color(self) -> &'static str {
        match self {
            Orientation::White => "white",
            Orientation::Black => "black",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// The board container's rectangle in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn square(size: f64) -> Self {
        Self::new(0.0, 0.0, size, size)
    }

    pub fn is_ready(&self) -> bool {
        self.width >= MIN_BOARD_DIMENSION && self.height >= MIN_BOARD_DIMENSION
    }

    /// Board is assumed square, so the cell size comes from the width.
    pub fn cell_size(&self) -> f64 {
        self.width / 8.0
    }

    /// Centre in container-local coordinates.
    pub fn local_center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Centre of `square`'s cell, local to the board container.
pub fn square_center(square: SquareRef, orientation: Orientation, bbox: &BoundingBox) -> Point {
    let cell = bbox.cell_size();
    let (col, row) = if orientation.is_flipped() {
        (7 - square.file(), 7 - square.row_from_top())
    } else {
        (square.file(), square.row_from_top())
    };
    Point::new(
        f64::from(col) * cell + cell / 2.0,
        f64::from(row) * cell + cell / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let sq: SquareRef = "e4".parse().unwrap();
        assert_eq!((sq.file(), sq.rank()), (4, 3));
        assert_eq!(sq.to_string(), "e4");
        assert_eq!("h8".parse::<SquareRef>().unwrap().row_from_top(), 0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "e", "i1", "a9", "a0", "E4", "e44"] {
            assert!(bad.parse::<SquareRef>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_orientation_attribute() {
        assert_eq!(Orientation::from_attribute(Some("black")), Orientation::Black);
        assert_eq!(Orientation::from_attribute(Some("white")), Orientation::White);
        assert_eq!(Orientation::from_attribute(None), Orientation::White);
        assert_eq!(Orientation::Black.player_color(), "black");
    }

    #[test]
    fn test_readiness_threshold() {
        assert!(BoundingBox::square(100.0).is_ready());
        assert!(!BoundingBox::new(0.0, 0.0, 99.9, 800.0).is_ready());
        assert!(!BoundingBox::new(0.0, 0.0, 800.0, 0.0).is_ready());
    }

    #[test]
    fn test_square_centers_white_orientation() {
        let bbox = BoundingBox::square(800.0);
        let a8 = square_center("a8".parse().unwrap(), Orientation::White, &bbox);
        assert_eq!(a8, Point::new(50.0, 50.0));
        let e2 = square_center("e2".parse().unwrap(), Orientation::White, &bbox);
        assert_eq!(e2, Point::new(450.0, 650.0));
    }

    #[test]
    fn test_square_centers_flipped() {
        let bbox = BoundingBox::square(800.0);
        let a8 = square_center("a8".parse().unwrap(), Orientation::Black, &bbox);
        assert_eq!(a8, Point::new(750.0, 750.0));
        let e2 = square_center("e2".parse().unwrap(), Orientation::Black, &bbox);
        assert_eq!(e2, Point::new(350.0, 150.0));
    }
}
