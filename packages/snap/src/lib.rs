//! # Drawboard Snap
//!
//! Grid quantization and alignment guides for nodes being dragged or resized.
//!
//! ## Usage
//!
//! ```rust
//! use drawboard_document::{NodeKind, NodeRecord, Position};
//! use drawboard_snap::compute_snap;
//!
//! let anchor = NodeRecord::new("a", NodeKind::Rectangle, Position::new(0.0, 200.0), "layer-1");
//! let moving = NodeRecord::new("b", NodeKind::Rectangle, Position::new(14.0, 16.0), "layer-1");
//!
//! let result = compute_snap(&moving, [&anchor], 10.0, true);
//! assert_eq!(result.position, Position::new(10.0, 20.0));
//! ```

mod engine;
mod guides;
mod options;

pub use engine::{
    alignment_candidates, compute_resize_snap, compute_snap, compute_snap_on_page,
    compute_snap_with_options, ResizeSnapResult, SnapResult,
};
pub use guides::{Guide, GuideAxis, Guides};
pub use options::{SnapOptions, DEFAULT_TOLERANCE_PX};
