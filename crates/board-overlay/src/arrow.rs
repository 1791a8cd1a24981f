//! Arrow geometry: a line between two square centres with a chevron head.

use std::f64::consts::FRAC_PI_6;

use serde::Serialize;

use crate::error::{GeometryError, NotReady};
use crate::square::{square_center, BoundingBox, Orientation, Point, SquareRef};

/// Chevron arm length as a fraction of the cell size.
pub const HEAD_LENGTH_RATIO: f64 = 0.3;

/// Angle between each chevron arm and the reversed shaft.
pub const HEAD_ANGLE: f64 = FRAC_PI_6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArrowGeometry {
    pub from: Point,
    pub to: Point,
    pub head_left: Point,
    pub head_right: Point,
    pub cell_size: f64,
}

impl ArrowGeometry {
    pub fn midpoint(&self) -> Point {
        self.from.midpoint(self.to)
    }

    /// SVG path: the shaft, then each chevron arm starting at the tip.
    pub fn svg_path(&self) -> String {
        let Self {
            from,
            to,
            head_left,
            head_right,
            ..
        } = self;
        format!(
            "M {} {} L {} {} M {} {} L {} {} M {} {} L {} {}",
            from.x, from.y, to.x, to.y,
            to.x, to.y, head_left.x, head_left.y,
            to.x, to.y, head_right.x, head_right.y,
        )
    }
}

/// Arrow from `from` to `to` for a board at `bbox`.
///
/// Returns [`NotReady`] when the box is below the minimum usable size.
pub fn compute_arrow(
    from: SquareRef,
    to: SquareRef,
    orientation: Orientation,
    bbox: &BoundingBox,
) -> Result<ArrowGeometry, NotReady> {
    if !bbox.is_ready() {
        return Err(NotReady);
    }

    let cell_size = bbox.cell_size();
    let start = square_center(from, orientation, bbox);
    let tip = square_center(to, orientation, bbox);

    let angle = (tip.y - start.y).atan2(tip.x - start.x);
    let head_len = cell_size * HEAD_LENGTH_RATIO;
    let arm = |theta: f64| Point::new(tip.x - head_len * theta.cos(), tip.y - head_len * theta.sin());

    Ok(ArrowGeometry {
        from: start,
        to: tip,
        head_left: arm(angle - HEAD_ANGLE),
        head_right: arm(angle + HEAD_ANGLE),
        cell_size,
    })
}

/// [`compute_arrow`] for a coordinate move such as `e2e4`.
pub fn compute_arrow_uci(
    uci: &str,
    orientation: Orientation,
    bbox: &BoundingBox,
) -> Result<ArrowGeometry, GeometryError> {
    let (from, to) = parse_uci_squares(uci)?;
    Ok(compute_arrow(from, to, orientation, bbox)?)
}

/// Split a coordinate move (`e2e4`, `e7e8q`) into its two squares.
/// Anything past the fourth character is ignored.
pub fn parse_uci_squares(uci: &str) -> Result<(SquareRef, SquareRef), GeometryError> {
    let (from, to) = match (uci.get(0..2), uci.get(2..4)) {
        (Some(f), Some(t)) => (f, t),
        _ => return Err(GeometryError::InvalidUci(uci.to_string())),
    };
    let invalid = |_| GeometryError::InvalidUci(uci.to_string());
    Ok((from.parse().map_err(invalid)?, to.parse().map_err(invalid)?))
}
