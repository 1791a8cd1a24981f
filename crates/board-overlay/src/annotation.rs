//! The single on-board arrow and the surface it is drawn on.
//!
//! At most one arrow exists at a time. [`AnnotationSlot`] owns the current
//! one; placing a new arrow always removes every element carrying the
//! marker class first, so a stale arrow left behind by an earlier page
//! state is removed too.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::arrow::ArrowGeometry;
use crate::square::BoundingBox;

/// Class attribute identifying our overlay elements on the page.
pub const ARROW_MARKER: &str = "chess-arrow";

pub const DEFAULT_ARROW_COLOR: &str = "#00ff00";
pub const DEFAULT_ARROW_WIDTH: f64 = 8.0;
pub const ARROW_OPACITY: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowStyle {
    pub color: String,
    pub width: f64,
    pub opacity: f64,
}

impl ArrowStyle {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
            opacity: ARROW_OPACITY,
        }
    }
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self::new(DEFAULT_ARROW_COLOR, DEFAULT_ARROW_WIDTH)
    }
}

/// A rendered-ready arrow: geometry, style, and the size of the overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub marker: &'static str,
    pub geometry: ArrowGeometry,
    pub style: ArrowStyle,
    pub width: f64,
    pub height: f64,
}

impl Annotation {
    pub fn new(geometry: ArrowGeometry, style: ArrowStyle, bbox: &BoundingBox) -> Self {
        Self {
            marker: ARROW_MARKER,
            geometry,
            style,
            width: bbox.width,
            height: bbox.height,
        }
    }

    pub fn svg_path(&self) -> String {
        self.geometry.svg_path()
    }

    /// Overlay element, absolutely positioned at the container's top-left
    /// and transparent to pointer events.
    pub fn to_svg(&self) -> String {
        format!(
            concat!(
                r#"<svg class="{marker}" width="{w}" height="{h}" "#,
                r#"style="position:absolute;top:0;left:0;pointer-events:none;z-index:1000">"#,
                r#"<path d="{d}" stroke="{color}" stroke-width="{sw}" fill="none" style="opacity:{op}"/>"#,
                "</svg>"
            ),
            marker = self.marker,
            w = self.width,
            h = self.height,
            d = self.svg_path(),
            color = self.style.color,
            sw = self.style.width,
            op = self.style.opacity,
        )
    }
}

/// Where overlays and the status line are drawn. Implemented by the page
/// bridge; [`MemorySurface`] keeps everything in memory.
pub trait AnnotationSurface {
    /// Remove every element with `marker` as its class. Returns how many
    /// were removed; zero is fine.
    fn remove_marked(&mut self, marker: &str) -> usize;

    fn insert(&mut self, annotation: &Annotation);

    /// Replace the status text shown next to the board.
    fn show_status(&mut self, text: &str);
}

/// Owner of the one current arrow.
#[derive(Debug, Default)]
pub struct AnnotationSlot {
    current: Option<Annotation>,
}

impl AnnotationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Annotation> {
        self.current.as_ref()
    }

    /// Remove the current arrow, and any marked leftovers, from `surface`.
    pub fn clear<S: AnnotationSurface + ?Sized>(&mut self, surface: &mut S) {
        let removed = surface.remove_marked(ARROW_MARKER);
        if removed > 0 {
            debug!(removed, "Cleared arrows");
        }
        self.current = None;
    }

    /// Replace whatever is on the surface with `annotation`.
    pub fn place<S: AnnotationSurface + ?Sized>(&mut self, surface: &mut S, annotation: Annotation) {
        self.clear(surface);
        surface.insert(&annotation);
        self.current = Some(annotation);
    }
}

/// In-memory surface: a list of `(class, svg)` elements plus the status line.
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    pub elements: Vec<(String, String)>,
    pub status: Option<String>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_marked(&self, marker: &str) -> usize {
        self.elements.iter().filter(|(class, _)| class == marker).count()
    }
}

impl AnnotationSurface for MemorySurface {
    fn remove_marked(&mut self, marker: &str) -> usize {
        let before = self.elements.len();
        self.elements.retain(|(class, _)| class != marker);
        before - self.elements.len()
    }

    fn insert(&mut self, annotation: &Annotation) {
        self.elements
            .push((annotation.marker.to_string(), annotation.to_svg()));
    }

    fn show_status(&mut self, text: &str) {
        self.status = Some(text.to_string());
    }
}
