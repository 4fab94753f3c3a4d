//! # Geometry Primitives
//!
//! Value objects shared by the document schema and the snap engine.
//! Coordinates are document-space `f64`s; screen-space values only appear
//! when a [`Viewport`] projects them.

use serde::{Deserialize, Serialize};

/// A point in document space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Quantize both axes independently to `grid_size`
    pub fn quantized(&self, grid_size: f64) -> Self {
        Self {
            x: quantize(self.x, grid_size),
            y: quantize(self.y, grid_size),
        }
    }
}

/// Width and height of a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions strictly positive and finite
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Camera state of a page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }

    /// `screen = document * zoom + pan`
    pub fn to_screen(&self, point: Position) -> Position {
        Position {
            x: point.x * self.zoom + self.x,
            y: point.y * self.zoom + self.y,
        }
    }

    /// Inverse of [`Viewport::to_screen`]. A degenerate zoom leaves the point unscaled.
    pub fn to_document(&self, point: Position) -> Position {
        let zoom = if self.zoom.is_finite() && self.zoom > 0.0 {
            self.zoom
        } else {
            1.0
        };

        Position {
            x: (point.x - self.x) / zoom,
            y: (point.y - self.y) / zoom,
        }
    }
}

/// Axis-aligned bounds of a node, used for alignment comparisons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Position,
    pub size: Size,
}

impl Rect {
    pub fn new(origin: Position, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn left(&self) -> f64 {
        self.origin.x
    }

    pub fn center_x(&self) -> f64 {
        self.origin.x + self.size.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn top(&self) -> f64 {
        self.origin.y
    }

    pub fn center_y(&self) -> f64 {
        self.origin.y + self.size.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Left edge, center and right edge
    pub fn x_anchors(&self) -> [f64; 3] {
        [self.left(), self.center_x(), self.right()]
    }

    /// Top edge, center and bottom edge
    pub fn y_anchors(&self) -> [f64; 3] {
        [self.top(), self.center_y(), self.bottom()]
    }
}

/// Round `value` to the nearest multiple of `grid_size`.
///
/// Ties round away from zero (`f64::round`), so `15` snaps to `20` and `-15`
/// to `-20` on a grid of `10`. A non-positive or non-finite grid leaves the
/// value untouched, and so does a grid fine enough to overflow the result.
pub fn quantize(value: f64, grid_size: f64) -> f64 {
    if !(grid_size.is_finite() && grid_size > 0.0) || !value.is_finite() {
        return value;
    }

    let snapped = (value / grid_size).round() * grid_size;
    if snapped.is_finite() {
        snapped
    } else {
        value
    }
}
