//! Snap engine against whole pages

use drawboard_document::{
    migrate, Layer, NodeKind, NodeRecord, Page, Position, Size, Viewport,
};
use drawboard_snap::{
    alignment_candidates, compute_snap, compute_snap_on_page, compute_snap_with_options, GuideAxis,
    SnapOptions,
};
use serde_json::json;

fn rect(id: &str, x: f64, y: f64, layer: &str) -> NodeRecord {
    let mut node = NodeRecord::new(id, NodeKind::Rectangle, Position::new(x, y), layer);
    node.size = Size::new(100.0, 50.0);
    node
}

fn page_with_hidden_layer() -> Page {
    let mut page = Page::new("p1", "Page");
    let mut hidden = Layer::new("hidden", "Hidden", 1);
    hidden.is_visible = false;
    page.layers.push(hidden);
    page.nodes = vec![
        rect("visible", 0.0, 0.0, "layer-1"),
        rect("ghost", 302.0, 402.0, "hidden"),
        rect("moving", 300.0, 400.0, "layer-1"),
    ];
    page
}

#[test]
fn test_grid_snap_examples() {
    let moving = rect("m", 14.0, 16.0, "layer-1");
    let none: Vec<NodeRecord> = Vec::new();

    let result = compute_snap(&moving, &none, 10.0, true);
    assert_eq!(result.position.x, 10.0);
    assert_eq!(result.position.y, 20.0);

    assert_eq!(compute_snap(&moving, &none, 0.0, true).position, moving.position);
    assert_eq!(compute_snap(&moving, &none, -4.0, true).position, moving.position);
    assert_eq!(compute_snap(&moving, &none, 10.0, false).position, moving.position);
}

#[test]
fn test_guides_without_grid_snap() {
    let anchor = rect("anchor", 0.0, 0.0, "layer-1");
    let moving = rect("m", 3.0, 300.0, "layer-1");

    let result = compute_snap(&moving, [&anchor], 10.0, false);
    assert_eq!(result.position, moving.position);

    let guide = result.guides.vertical.expect("left edges align");
    assert_eq!(guide.axis, GuideAxis::Vertical);
    assert_eq!(guide.coordinate, 0.0);
    assert!(result.guides.horizontal.is_none());
}

#[test]
fn test_guides_use_snapped_position() {
    // raw x=6 is 6 units from every anchor, snapped x=10 is 2 units away
    let anchor = rect("anchor", 12.0, 0.0, "layer-1");
    let moving = rect("m", 6.0, 300.0, "layer-1");

    let raw = compute_snap(&moving, [&anchor], 10.0, false);
    assert!(raw.guides.vertical.is_none());

    let result = compute_snap(&moving, [&anchor], 10.0, true);
    assert_eq!(result.position.x, 10.0);

    let guide = result.guides.vertical.expect("left edges align after snapping");
    assert_eq!(guide.coordinate, 12.0);
}

#[test]
fn test_tolerance_is_in_screen_pixels() {
    let anchor = rect("anchor", 0.0, 0.0, "layer-1");
    let moving = rect("m", 4.0, 300.0, "layer-1");

    let at_1x = compute_snap_with_options(&moving, [&anchor], 10.0, false, &SnapOptions::default());
    assert!(at_1x.guides.vertical.is_some());

    // 4 document units are 8 screen pixels at 2x, outside a 5px tolerance
    let at_2x = compute_snap_with_options(
        &moving,
        [&anchor],
        10.0,
        false,
        &SnapOptions::default().zoomed(2.0),
    );
    assert!(at_2x.guides.vertical.is_none());
}

#[test]
fn test_hidden_layers_are_not_candidates() {
    let page = page_with_hidden_layer();

    let ids: Vec<&str> = alignment_candidates(&page, "moving").map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["visible"]);

    let moving = page.node("moving").unwrap().clone();
    let result = compute_snap_on_page(&page, &moving, 5.0);
    assert!(result.guides.is_empty(), "only the hidden node is within tolerance");
}

#[test]
fn test_snap_on_migrated_page() {
    let doc = migrate(&json!({
        "version": 1,
        "nodes": [
            { "id": "a", "type": "rectangle", "position": { "x": 0, "y": 0 },
              "size": { "width": 100, "height": 50 } },
            { "id": "b", "type": "rectangle", "position": { "x": 203, "y": 52 },
              "size": { "width": 100, "height": 50 } }
        ],
        "edges": [],
        "viewport": { "x": 40, "y": 40, "zoom": 1 },
        "settings": { "snapEnabled": true, "gridSize": 25 }
    }));

    let page = doc.active_page().unwrap();
    let moving = page.node("b").unwrap();
    let result = compute_snap_on_page(page, moving, 5.0);

    assert_eq!(result.position, Position::new(200.0, 50.0));

    let guide = result.guides.horizontal.expect("top edge meets bottom edge");
    assert_eq!(guide.coordinate, 50.0);
    assert_eq!(guide.node_id, "a");
    assert_eq!(guide.to_screen(&Viewport::new(40.0, 40.0, 1.0)), 90.0);
}
