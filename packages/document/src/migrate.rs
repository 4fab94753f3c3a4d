//! # Version Migrator
//!
//! Turns anything read back from storage into a current document.
//!
//! ## Dispatch
//!
//! The first parser that accepts the input wins:
//!
//! 1. **Current** (`dataVersion: 2`): validated, then normalized.
//! 2. **Legacy** (`version: 1`): a single page of nodes and edges without
//!    layers. Wrapped into page `page-1` / layer `layer-1`. Values the current
//!    range rules reject (non-positive sizes, grid or zoom) take their defaults.
//! 3. **Fallback**: anything else, including `null` and garbage, becomes a
//!    fresh empty document.
//!
//! Migration never fails. A diagram whose stored state cannot be read opens
//! as an empty canvas.
//!
//! ## Normalization
//!
//! - at least one page, and at least one layer per page
//! - nodes and edges on an unknown layer move to the page's first layer
//! - a dangling `activeLayerId` / `activePageId` points at the first layer / page
//!
//! Nothing is ever removed. An edge whose source or target is not a node of
//! its page is kept as stored; [`crate::check_references`] reports it.

use crate::schema::{
    DiagramDocument, EdgeRecord, Layer, NodeRecord, Page, PageSettings, DATA_VERSION,
    DEFAULT_LAYER_ID, DEFAULT_LAYER_NAME, DEFAULT_PAGE_ID, DEFAULT_PAGE_NAME, LEGACY_DATA_VERSION,
};
use crate::geometry::Viewport;
use crate::validator::{check_ranges, validate_current};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Which parser produced a migrated document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationSource {
    /// Input already had the current shape
    Current,
    /// Input was a version 1 single-page document
    Legacy,
    /// Input was unreadable; an empty document was substituted
    Fallback,
}

/// Migrated document plus where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    pub document: DiagramDocument,
    pub source: MigrationSource,
}

/// Single-page shape written before pages and layers existed
#[derive(Deserialize)]
struct LegacyDocument {
    version: u32,

    #[serde(default)]
    nodes: Vec<NodeRecord>,

    #[serde(default)]
    edges: Vec<EdgeRecord>,

    #[serde(default)]
    viewport: Viewport,

    #[serde(default)]
    settings: PageSettings,
}

/// Convert any decoded JSON into a current document
pub fn migrate(input: &Value) -> DiagramDocument {
    migrate_detailed(input).document
}

/// [`migrate`], also reporting which parser accepted the input
pub fn migrate_detailed(input: &Value) -> Migration {
    if let Some(document) = try_current(input) {
        return Migration {
            document: normalize(document),
            source: MigrationSource::Current,
        };
    }

    if let Some(document) = try_legacy(input) {
        let nodes: usize = document.pages.iter().map(|p| p.nodes.len()).sum();
        info!(nodes, "Migrated legacy single-page document");
        return Migration {
            document: normalize(document),
            source: MigrationSource::Legacy,
        };
    }

    warn!("Stored document is unreadable - starting from an empty document");
    Migration {
        document: DiagramDocument::new_empty(),
        source: MigrationSource::Fallback,
    }
}

/// Decode text and migrate it. Text that is not JSON falls back to an empty document.
pub fn migrate_str(text: &str) -> Migration {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => migrate_detailed(&value),
        Err(e) => {
            warn!(error = %e, "Stored document is not valid JSON - starting from an empty document");
            Migration {
                document: DiagramDocument::new_empty(),
                source: MigrationSource::Fallback,
            }
        }
    }
}

fn try_current(input: &Value) -> Option<DiagramDocument> {
    match validate_current(input) {
        Ok(document) => Some(document),
        Err(e) => {
            debug!(error = %e, "Not a current document");
            None
        }
    }
}

fn try_legacy(input: &Value) -> Option<DiagramDocument> {
    if !input.is_object() {
        return None;
    }

    let legacy = match LegacyDocument::deserialize(input) {
        Ok(legacy) => legacy,
        Err(e) => {
            debug!(error = %e, "Not a legacy document");
            return None;
        }
    };

    if legacy.version != LEGACY_DATA_VERSION {
        debug!(version = legacy.version, "Unknown legacy version");
        return None;
    }

    let mut page = Page::new(DEFAULT_PAGE_ID, DEFAULT_PAGE_NAME);
    page.viewport = legacy_viewport(legacy.viewport);
    page.settings = legacy_settings(legacy.settings);
    page.nodes = legacy
        .nodes
        .into_iter()
        .map(|node| NodeRecord {
            layer_id: DEFAULT_LAYER_ID.to_string(),
            size: if node.size.is_positive() {
                node.size
            } else {
                debug!(node_id = %node.id, "Legacy node has a non-positive size - using the default");
                node.kind.default_size()
            },
            ..node
        })
        .collect();
    page.edges = legacy
        .edges
        .into_iter()
        .map(|edge| EdgeRecord {
            layer_id: DEFAULT_LAYER_ID.to_string(),
            ..edge
        })
        .collect();

    let document = DiagramDocument {
        data_version: DATA_VERSION,
        active_page_id: DEFAULT_PAGE_ID.to_string(),
        pages: vec![page],
    };

    // The result is persisted as a current document, so it must pass the current range rules
    if let Err(e) = check_ranges(&document) {
        debug!(error = %e, "Legacy document has out-of-range values");
        return None;
    }

    Some(document)
}

fn legacy_viewport(viewport: Viewport) -> Viewport {
    let pan_ok = viewport.x.is_finite() && viewport.y.is_finite();
    let zoom_ok = viewport.zoom.is_finite() && viewport.zoom > 0.0;

    if pan_ok && zoom_ok {
        viewport
    } else {
        debug!(x = viewport.x, y = viewport.y, zoom = viewport.zoom, "Legacy viewport is out of range - using the default");
        Viewport::default()
    }
}

fn legacy_settings(settings: PageSettings) -> PageSettings {
    if settings.grid_size.is_finite() && settings.grid_size > 0.0 {
        settings
    } else {
        debug!(grid_size = settings.grid_size, "Legacy grid size is out of range - using the default");
        PageSettings {
            grid_size: PageSettings::default().grid_size,
            ..settings
        }
    }
}

/// Repair dangling layer and page references and re-establish the structural guarantees
pub fn normalize(mut doc: DiagramDocument) -> DiagramDocument {
    doc.data_version = DATA_VERSION;

    if doc.pages.is_empty() {
        debug!("Document has no pages - adding a default page");
        doc.pages.push(Page::new(DEFAULT_PAGE_ID, DEFAULT_PAGE_NAME));
    }

    for page in &mut doc.pages {
        normalize_page(page);
    }

    if doc.active_page().is_none() {
        if let Some(first) = doc.pages.first() {
            debug!(from = %doc.active_page_id, to = %first.id, "Repairing activePageId");
            doc.active_page_id = first.id.clone();
        }
    }

    doc
}

fn normalize_page(page: &mut Page) {
    if page.layers.is_empty() {
        debug!(page_id = %page.id, "Page has no layers - adding a default layer");
        page.layers.push(Layer::new(DEFAULT_LAYER_ID, DEFAULT_LAYER_NAME, 0));
    }

    let layer_ids: HashSet<String> = page.layers.iter().map(|l| l.id.clone()).collect();
    let fallback_layer = match page.layers.first() {
        Some(layer) => layer.id.clone(),
        None => return,
    };

    let mut reassigned = 0usize;
    for node in &mut page.nodes {
        if !layer_ids.contains(&node.layer_id) {
            node.layer_id = fallback_layer.clone();
            reassigned += 1;
        }
    }
    for edge in &mut page.edges {
        if !layer_ids.contains(&edge.layer_id) {
            edge.layer_id = fallback_layer.clone();
            reassigned += 1;
        }
    }

    if reassigned > 0 {
        debug!(page_id = %page.id, reassigned, "Normalized page references");
    }

    if !layer_ids.contains(&page.active_layer_id) {
        debug!(page_id = %page.id, from = %page.active_layer_id, to = %fallback_layer, "Repairing activeLayerId");
        page.active_layer_id = fallback_layer;
    }
}
