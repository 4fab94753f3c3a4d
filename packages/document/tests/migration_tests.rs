//! Migration and normalization through the public API

use drawboard_document::{
    check_references, migrate, migrate_detailed, to_stored_style, DiagramDocument, EdgeStyle,
    MigrationSource, NodeKind, PageSettings, Position, Viewport,
};
use serde_json::{json, Value};

fn assert_structurally_valid(doc: &DiagramDocument) {
    assert_eq!(doc.data_version, 2);
    assert!(!doc.pages.is_empty());
    assert!(doc.active_page().is_some(), "activePageId must resolve");

    for page in &doc.pages {
        assert!(!page.layers.is_empty());
        assert!(page.active_layer().is_some(), "activeLayerId must resolve");
    }

    let unrepaired: Vec<_> = check_references(doc).into_iter().filter(|i| i.is_repairable()).collect();
    assert!(unrepaired.is_empty(), "{:?}", unrepaired);
}

fn current_document() -> Value {
    json!({
        "dataVersion": 2,
        "activePageId": "p2",
        "pages": [
            {
                "id": "p1",
                "name": "Overview",
                "viewport": { "x": 10, "y": 20, "zoom": 1.5 },
                "settings": { "snapEnabled": true, "gridSize": 16 },
                "layers": [
                    { "id": "base", "name": "Base", "order": 0, "isVisible": true, "isLocked": false },
                    { "id": "notes", "name": "Notes", "order": 5, "isVisible": false, "isLocked": true }
                ],
                "activeLayerId": "notes",
                "nodes": [
                    {
                        "id": "n1",
                        "type": "rectangle",
                        "position": { "x": 0, "y": 0 },
                        "size": { "width": 100, "height": 50 },
                        "text": "Start",
                        "style": { "fill": "#fff", "stroke": "#000", "textColor": "#000" },
                        "layerId": "base"
                    },
                    {
                        "id": "n2",
                        "type": "dataTable",
                        "position": { "x": 200, "y": 0 },
                        "size": { "width": 240, "height": 160 },
                        "text": "users",
                        "style": { "fill": "#fff", "stroke": "#64748b", "textColor": "#0f172a" },
                        "layerId": "notes"
                    }
                ],
                "edges": [
                    { "id": "e1", "source": "n1", "target": "n2", "style": "step", "layerId": "base" }
                ]
            },
            {
                "id": "p2",
                "name": "Details",
                "layers": [{ "id": "only", "name": "Only", "order": 0 }],
                "activeLayerId": "only"
            }
        ]
    })
}

#[test]
fn test_current_document_is_kept() {
    let migration = migrate_detailed(&current_document());
    assert_eq!(migration.source, MigrationSource::Current);

    let doc = migration.document;
    assert_structurally_valid(&doc);
    assert_eq!(doc.active_page_id, "p2");
    assert_eq!(doc.pages.len(), 2);

    let page = &doc.pages[0];
    assert_eq!(page.viewport, Viewport::new(10.0, 20.0, 1.5));
    assert_eq!(page.settings.grid_size, 16.0);
    assert_eq!(page.nodes[1].kind, NodeKind::DataTable);
    assert_eq!(page.edges[0].style, EdgeStyle::Step);
    assert!(page.layers[1].is_locked);
}

#[test]
fn test_migrate_is_idempotent() {
    let once = migrate(&current_document());
    let twice = migrate(&once.to_json().unwrap());
    assert_eq!(once, twice);

    let legacy = migrate(&json!({ "version": 1, "nodes": [], "edges": [] }));
    assert_eq!(migrate(&legacy.to_json().unwrap()), legacy);
}

#[test]
fn test_legacy_migration_preserves_content() {
    let viewport = json!({ "x": -40, "y": 12.5, "zoom": 0.75 });
    let settings = json!({ "snapEnabled": false, "gridSize": 25 });
    let input = json!({
        "version": 1,
        "nodes": [
            { "id": "n1", "type": "sticky", "position": { "x": 1, "y": 2 }, "text": "todo" },
            { "id": "n2", "type": "ellipse", "position": { "x": 300, "y": 2 },
              "size": { "width": 80, "height": 80 } }
        ],
        "edges": [
            { "id": "e1", "source": "n1", "target": "n2", "style": "default" }
        ],
        "viewport": viewport,
        "settings": settings
    });

    let migration = migrate_detailed(&input);
    assert_eq!(migration.source, MigrationSource::Legacy);

    let doc = migration.document;
    assert_structurally_valid(&doc);
    assert_eq!(doc.pages.len(), 1);

    let page = &doc.pages[0];
    assert_eq!(page.id, "page-1");
    assert_eq!(page.name, "Page 1");
    assert_eq!(page.layers.len(), 1);
    assert_eq!(page.layers[0].name, "Layer 1");

    let layer_id = &page.layers[0].id;
    assert_eq!(page.nodes.len(), 2);
    assert!(page.nodes.iter().all(|n| &n.layer_id == layer_id));
    assert_eq!(page.edges.len(), 1);
    assert_eq!(&page.edges[0].layer_id, layer_id);
    assert_eq!(page.edges[0].style, EdgeStyle::Bezier);

    assert_eq!(page.nodes[0].text, "todo");
    assert_eq!(page.nodes[1].position, Position::new(300.0, 2.0));
    assert_eq!(page.viewport, Viewport::new(-40.0, 12.5, 0.75));
    assert_eq!(
        page.settings,
        PageSettings {
            snap_enabled: false,
            grid_size: 25.0
        }
    );
}

#[test]
fn test_legacy_defaults_for_missing_viewport_and_settings() {
    let doc = migrate(&json!({ "version": 1, "nodes": [], "edges": [] }));

    let page = &doc.pages[0];
    assert_eq!(page.viewport, Viewport::default());
    assert_eq!(page.settings, PageSettings::default());
}

#[test]
fn test_reference_repair() {
    let mut input = current_document();
    input["activePageId"] = json!("deleted-page");
    input["pages"][0]["activeLayerId"] = json!("deleted-layer");
    input["pages"][0]["nodes"][1]["layerId"] = json!("only");
    input["pages"][0]["edges"][0]["layerId"] = json!("ghost");

    let doc = migrate(&input);
    assert_structurally_valid(&doc);

    assert_eq!(doc.active_page_id, "p1");

    let page = &doc.pages[0];
    assert_eq!(page.active_layer_id, "base");
    assert_eq!(page.nodes.len(), 2, "nodes on a foreign layer are reassigned, not dropped");
    assert_eq!(page.nodes[1].layer_id, "base");
    assert_eq!(page.edges.len(), 1);
    assert_eq!(page.edges[0].layer_id, "base");
}

#[test]
fn test_edges_to_missing_nodes_are_kept() {
    let mut input = current_document();
    input["pages"][0]["edges"] = json!([
        { "id": "ok", "source": "n1", "target": "n2", "layerId": "base" },
        { "id": "dangling", "source": "n1", "target": "n9", "layerId": "base" }
    ]);

    let doc = migrate(&input);
    let ids: Vec<&str> = doc.pages[0].edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["ok", "dangling"]);
    assert_eq!(doc.pages[0].edges[1].target, "n9");

    let issues = check_references(&doc);
    assert_eq!(issues.len(), 1);
    assert!(!issues[0].is_repairable());

    // a load and save cycle keeps the edge
    let reloaded = migrate(&doc.to_json().unwrap());
    assert_eq!(reloaded.pages[0].edges.len(), 2);
}

#[test]
fn test_malformed_inputs_become_empty_document() {
    let inputs = vec![
        json!(null),
        json!({}),
        json!([]),
        json!(true),
        json!({ "dataVersion": 2, "pages": "nope" }),
        json!({ "dataVersion": 2, "pages": [{ "id": "p", "name": "P", "layers": [] }] }),
        json!({ "version": 1, "nodes": [{ "id": 3 }] }),
        json!({ "version": "1" }),
    ];

    for input in inputs {
        let migration = migrate_detailed(&input);
        assert_eq!(migration.source, MigrationSource::Fallback, "input: {}", input);
        assert_eq!(migration.document, DiagramDocument::new_empty());
        assert_structurally_valid(&migration.document);
    }
}

#[test]
fn test_empty_document_shape() {
    let doc = DiagramDocument::new_empty();
    assert_structurally_valid(&doc);

    assert_eq!(doc.pages.len(), 1);
    let page = &doc.pages[0];
    assert_eq!(page.layers.len(), 1);
    assert!(page.nodes.is_empty());
    assert!(page.edges.is_empty());
    assert_eq!(page.viewport, Viewport::new(0.0, 0.0, 1.0));

    let json = doc.to_json().unwrap();
    assert_eq!(json["dataVersion"], 2);
    assert_eq!(json["activePageId"], "page-1");
    assert_eq!(json["pages"][0]["activeLayerId"], "layer-1");
}

#[test]
fn test_edge_style_decoding_in_documents() {
    let mut input = current_document();
    input["pages"][0]["edges"] = json!([
        { "id": "a", "source": "n1", "target": "n2", "style": "simplebezier", "layerId": "base" },
        { "id": "b", "source": "n1", "target": "n2", "style": "wiggly", "layerId": "base" },
        { "id": "c", "source": "n1", "target": "n2", "layerId": "base" }
    ]);

    let page = migrate(&input).pages.remove(0);
    let styles: Vec<EdgeStyle> = page.edges.iter().map(|e| e.style).collect();
    assert_eq!(styles, vec![EdgeStyle::Bezier, EdgeStyle::Smoothstep, EdgeStyle::Smoothstep]);

    assert_eq!(to_stored_style(Some("default")), EdgeStyle::Bezier);
    assert_eq!(to_stored_style(None), EdgeStyle::Smoothstep);
}
