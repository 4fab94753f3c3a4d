//! # Snap Engine
//!
//! Runs on every pointer-move frame of a drag or resize, so each call is a
//! single pass over the candidate nodes with no allocation beyond the
//! result.
//!
//! Grid snapping and alignment guides are independent:
//! - `snap_enabled = false` (or a non-positive grid) leaves the position as is
//! - guides are always computed, against the resulting position
//!
//! Guides compare the left edge, center and right edge (top, center and bottom
//! for the other axis) of the moving node against the same anchors of every
//! candidate. The closest pair within tolerance wins; on a tie the earlier
//! candidate is kept. Guides are reported but do not move the node.

use crate::guides::{Guide, GuideAxis, Guides};
use crate::options::SnapOptions;
use drawboard_document::{quantize, NodeRecord, Page, Position, Rect, Size};
use serde::Serialize;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapResult {
    pub position: Position,
    pub guides: Guides,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResizeSnapResult {
    pub position: Position,
    pub size: Size,
    pub guides: Guides,
}

/// Snap a node being moved, with the default tolerance at zoom 1
pub fn compute_snap<'a>(
    moving: &NodeRecord,
    candidates: impl IntoIterator<Item = &'a NodeRecord>,
    grid_size: f64,
    snap_enabled: bool,
) -> SnapResult {
    compute_snap_with_options(moving, candidates, grid_size, snap_enabled, &SnapOptions::default())
}

pub fn compute_snap_with_options<'a>(
    moving: &NodeRecord,
    candidates: impl IntoIterator<Item = &'a NodeRecord>,
    grid_size: f64,
    snap_enabled: bool,
    options: &SnapOptions,
) -> SnapResult {
    let position = if snap_enabled {
        moving.position.quantized(grid_size)
    } else {
        moving.position
    };

    let guides = find_guides(
        &moving.id,
        Rect::new(position, moving.size),
        candidates,
        options.document_tolerance(),
    );

    SnapResult { position, guides }
}

/// Snap a node being resized: the position and the size both land on the grid.
/// A snapped dimension never collapses below one grid step.
pub fn compute_resize_snap<'a>(
    moving: &NodeRecord,
    candidates: impl IntoIterator<Item = &'a NodeRecord>,
    grid_size: f64,
    snap_enabled: bool,
    options: &SnapOptions,
) -> ResizeSnapResult {
    let (position, size) = if snap_enabled && grid_size.is_finite() && grid_size > 0.0 {
        (
            moving.position.quantized(grid_size),
            Size::new(
                quantize(moving.size.width, grid_size).max(grid_size),
                quantize(moving.size.height, grid_size).max(grid_size),
            ),
        )
    } else {
        (moving.position, moving.size)
    };

    let guides = find_guides(
        &moving.id,
        Rect::new(position, size),
        candidates,
        options.document_tolerance(),
    );

    ResizeSnapResult {
        position,
        size,
        guides,
    }
}

/// Candidates for alignment: nodes on visible layers of `page`, minus the moving node
pub fn alignment_candidates<'a>(page: &'a Page, moving_id: &'a str) -> impl Iterator<Item = &'a NodeRecord> + 'a {
    page.visible_nodes().filter(move |n| n.id != moving_id)
}

/// Snap against the page's own grid settings, viewport zoom and visible nodes
pub fn compute_snap_on_page(page: &Page, moving: &NodeRecord, tolerance_px: f64) -> SnapResult {
    let options = SnapOptions::with_tolerance(tolerance_px).zoomed(page.viewport.zoom);
    let result = compute_snap_with_options(
        moving,
        alignment_candidates(page, &moving.id),
        page.settings.grid_size,
        page.settings.snap_enabled,
        &options,
    );

    trace!(
        page_id = %page.id,
        node_id = %moving.id,
        x = result.position.x,
        y = result.position.y,
        guides = result.guides.iter().count(),
        "Computed snap"
    );

    result
}

struct Closest<'a> {
    distance: f64,
    coordinate: f64,
    node_id: &'a str,
}

fn consider<'a>(best: &mut Option<Closest<'a>>, distance: f64, coordinate: f64, node_id: &'a str) {
    let better = match best {
        Some(current) => distance < current.distance,
        None => true,
    };

    if better {
        *best = Some(Closest {
            distance,
            coordinate,
            node_id,
        });
    }
}

fn find_guides<'a>(
    moving_id: &str,
    bounds: Rect,
    candidates: impl IntoIterator<Item = &'a NodeRecord>,
    tolerance: f64,
) -> Guides {
    let mut best_x: Option<Closest<'a>> = None;
    let mut best_y: Option<Closest<'a>> = None;

    let moving_x = bounds.x_anchors();
    let moving_y = bounds.y_anchors();

    for candidate in candidates {
        if candidate.id == moving_id {
            continue;
        }

        let other = candidate.bounds();

        for a in moving_x {
            for b in other.x_anchors() {
                let distance = (a - b).abs();
                if distance <= tolerance {
                    consider(&mut best_x, distance, b, &candidate.id);
                }
            }
        }

        for a in moving_y {
            for b in other.y_anchors() {
                let distance = (a - b).abs();
                if distance <= tolerance {
                    consider(&mut best_y, distance, b, &candidate.id);
                }
            }
        }
    }

    Guides {
        vertical: best_x.map(|c| Guide {
            axis: GuideAxis::Vertical,
            coordinate: c.coordinate,
            node_id: c.node_id.to_string(),
        }),
        horizontal: best_y.map(|c| Guide {
            axis: GuideAxis::Horizontal,
            coordinate: c.coordinate,
            node_id: c.node_id.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawboard_document::NodeKind;

    fn node(id: &str, x: f64, y: f64, width: f64, height: f64) -> NodeRecord {
        let mut node = NodeRecord::new(id, NodeKind::Rectangle, Position::new(x, y), "layer-1");
        node.size = Size::new(width, height);
        node
    }

    #[test]
    fn test_grid_snap() {
        let others: Vec<NodeRecord> = vec![];

        let result = compute_snap(&node("m", 14.0, 16.0, 10.0, 10.0), &others, 10.0, true);
        assert_eq!(result.position, Position::new(10.0, 20.0));
    }

    #[test]
    fn test_grid_disabled() {
        let others: Vec<NodeRecord> = vec![];
        let moving = node("m", 14.0, 16.0, 10.0, 10.0);

        assert_eq!(compute_snap(&moving, &others, 0.0, true).position, moving.position);
        assert_eq!(compute_snap(&moving, &others, 10.0, false).position, moving.position);
    }

    #[test]
    fn test_closest_anchor_wins() {
        // left edges 3 apart, right edge of moving 1 away from other's center
        let others = vec![node("a", 103.0, 500.0, 40.0, 40.0)];
        let moving = node("m", 100.0, 0.0, 22.0, 10.0);

        let result = compute_snap(&moving, &others, 10.0, false);
        let vertical = result.guides.vertical.expect("vertical guide");
        assert_eq!(vertical.coordinate, 123.0);
        assert_eq!(vertical.node_id, "a");
        assert!(result.guides.horizontal.is_none());
    }

    #[test]
    fn test_tie_keeps_first_candidate() {
        let others = vec![node("a", 0.0, 102.0, 10.0, 10.0), node("b", 0.0, 98.0, 10.0, 10.0)];
        let moving = node("m", 500.0, 100.0, 10.0, 10.0);

        let result = compute_snap(&moving, &others, 10.0, false);
        assert_eq!(result.guides.horizontal.map(|g| g.node_id), Some("a".to_string()));
    }

    #[test]
    fn test_moving_node_is_ignored() {
        let moving = node("m", 0.0, 0.0, 10.0, 10.0);
        let others = vec![moving.clone()];

        assert!(compute_snap(&moving, &others, 10.0, true).guides.is_empty());
    }

    #[test]
    fn test_resize_snap_keeps_a_grid_step() {
        let others: Vec<NodeRecord> = vec![];
        let moving = node("m", 12.0, 27.0, 3.0, 44.0);

        let result = compute_resize_snap(&moving, &others, 10.0, true, &SnapOptions::default());
        assert_eq!(result.position, Position::new(10.0, 30.0));
        assert_eq!(result.size, Size::new(10.0, 40.0));

        let result = compute_resize_snap(&moving, &others, 10.0, false, &SnapOptions::default());
        assert_eq!(result.size, moving.size);
    }
}
