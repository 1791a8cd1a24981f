//! Arrow overlay geometry for an on-page chess board.
//!
//! Maps squares to pixel positions for either board orientation, builds
//! the arrow shaft and chevron for a recommended move, and keeps at most
//! one arrow on the page at a time.

pub mod annotation;
pub mod arrow;
pub mod error;
pub mod placement;
pub mod square;

pub use annotation::{
    Annotation, AnnotationSlot, AnnotationSurface, ArrowStyle, MemorySurface, ARROW_MARKER,
};
pub use arrow::{compute_arrow, compute_arrow_uci, parse_uci_squares, ArrowGeometry};
pub use error::{GeometryError, NotReady};
pub use placement::{place_after_settle, BoardFrame, BoardHost, PlacementOutcome, PlacementTiming, StaticBoard};
pub use square::{square_center, BoundingBox, Orientation, Point, SquareRef, MIN_BOARD_DIMENSION};
