//! Deferred arrow placement against a live board.
//!
//! The page needs a moment to settle after a move before the board box is
//! trustworthy, so placement waits a fixed delay first. A board that is
//! present but still undersized is retried on a timer; a board that is
//! missing altogether abandons the placement.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::annotation::{Annotation, AnnotationSlot, AnnotationSurface, ArrowStyle};
use crate::arrow::compute_arrow;
use crate::square::{BoundingBox, Orientation, SquareRef};

/// What the page currently shows: the board's orientation and its
/// container's box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoardFrame {
    pub orientation: Orientation,
    pub bbox: BoundingBox,
}

/// Page lookup for the board element and its container.
pub trait BoardHost {
    /// `None` when either the board or its container is not in the page.
    fn locate(&self) -> Option<BoardFrame>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementTiming {
    pub settle_delay: Duration,
    pub not_ready_retry: Duration,
    /// `None` retries an undersized board indefinitely.
    pub max_not_ready_retries: Option<u32>,
}

impl Default for PlacementTiming {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(100),
            not_ready_retry: Duration::from_millis(500),
            max_not_ready_retries: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed,
    /// Board or container missing after the settle delay.
    Abandoned,
    /// Board stayed undersized for every allowed retry.
    GaveUp { attempts: u32 },
}

/// Wait for the page to settle, then draw an arrow from `from` to `to`.
pub async fn place_after_settle<H, S>(
    slot: &mut AnnotationSlot,
    host: &H,
    surface: &mut S,
    from: SquareRef,
    to: SquareRef,
    style: &ArrowStyle,
    timing: &PlacementTiming,
) -> PlacementOutcome
where
    H: BoardHost + ?Sized,
    S: AnnotationSurface + ?Sized,
{
    let mut retries = 0u32;
    loop {
        tokio::time::sleep(timing.settle_delay).await;

        let Some(frame) = host.locate() else {
            info!("Board not found for arrow placement, giving up");
            return PlacementOutcome::Abandoned;
        };

        match compute_arrow(from, to, frame.orientation, &frame.bbox) {
            Ok(geometry) => {
                debug!(%from, %to, orientation = ?frame.orientation, "Placing arrow");
                slot.place(surface, Annotation::new(geometry, style.clone(), &frame.bbox));
                return PlacementOutcome::Placed;
            }
            Err(_not_ready) => {
                if timing.max_not_ready_retries.is_some_and(|max| retries >= max) {
                    warn!(attempts = retries + 1, "Board never reached a usable size");
                    return PlacementOutcome::GaveUp {
                        attempts: retries + 1,
                    };
                }
                retries += 1;
                debug!(
                    width = frame.bbox.width,
                    height = frame.bbox.height,
                    retry_in_ms = timing.not_ready_retry.as_millis() as u64,
                    "Board undersized, retrying"
                );
                tokio::time::sleep(timing.not_ready_retry).await;
            }
        }
    }
}

/// A board that never changes.
#[derive(Debug, Clone, Copy)]
pub struct StaticBoard(pub Option<BoardFrame>);

impl BoardHost for StaticBoard {
    fn locate(&self) -> Option<BoardFrame> {
        self.0
    }
}
