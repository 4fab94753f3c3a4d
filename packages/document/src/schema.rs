//! # Document Schema
//!
//! The current (version 2) shape of a diagram document.
//!
//! ```text
//! DiagramDocument
//!   └── pages[]            (≥1, activePageId points at one of them)
//!         ├── layers[]     (≥1, activeLayerId points at one of them)
//!         ├── nodes[]      (layerId → layer on the same page)
//!         └── edges[]      (source/target → node on the same page)
//! ```
//!
//! Cross references are plain string ids into the flat sequences of the
//! owning page. Dangling ids are representable here on purpose; repairing
//! them is [`crate::normalize`]'s job.

use crate::edge_style::EdgeStyle;
use crate::geometry::{Position, Rect, Size, Viewport};
use serde::{Deserialize, Serialize};

/// Tag of the current persisted shape
pub const DATA_VERSION: u32 = 2;

/// Tag of the single-page shape that predates pages and layers
pub const LEGACY_DATA_VERSION: u32 = 1;

pub const DEFAULT_PAGE_ID: &str = "page-1";
pub const DEFAULT_PAGE_NAME: &str = "Page 1";
pub const DEFAULT_LAYER_ID: &str = "layer-1";
pub const DEFAULT_LAYER_NAME: &str = "Layer 1";
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Root aggregate of a diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramDocument {
    pub data_version: u32,

    /// Soft pointer into `pages`
    #[serde(default)]
    pub active_page_id: String,

    pub pages: Vec<Page>,
}

impl DiagramDocument {
    /// A fresh document: one page with one layer, nothing on it
    pub fn new_empty() -> Self {
        Self {
            data_version: DATA_VERSION,
            active_page_id: DEFAULT_PAGE_ID.to_string(),
            pages: vec![Page::new(DEFAULT_PAGE_ID, DEFAULT_PAGE_NAME)],
        }
    }

    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn page_mut(&mut self, id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == id)
    }

    /// The page `activePageId` points at, if it resolves
    pub fn active_page(&self) -> Option<&Page> {
        self.page(&self.active_page_id)
    }

    pub fn active_page_mut(&mut self) -> Option<&mut Page> {
        let id = self.active_page_id.clone();
        self.page_mut(&id)
    }

    /// Current persisted layout
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl Default for DiagramDocument {
    fn default() -> Self {
        Self::new_empty()
    }
}

/// Grid settings of a page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSettings {
    pub snap_enabled: bool,
    pub grid_size: f64,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            snap_enabled: true,
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

/// An independently viewported canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub viewport: Viewport,

    #[serde(default)]
    pub settings: PageSettings,

    pub layers: Vec<Layer>,

    /// Soft pointer into `layers`
    #[serde(default)]
    pub active_layer_id: String,

    #[serde(default)]
    pub nodes: Vec<NodeRecord>,

    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl Page {
    /// Empty page with a single default layer
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            viewport: Viewport::default(),
            settings: PageSettings::default(),
            layers: vec![Layer::new(DEFAULT_LAYER_ID, DEFAULT_LAYER_NAME, 0)],
            active_layer_id: DEFAULT_LAYER_ID.to_string(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn has_layer(&self, id: &str) -> bool {
        self.layer(id).is_some()
    }

    pub fn active_layer(&self) -> Option<&Layer> {
        self.layer(&self.active_layer_id)
    }

    pub fn node(&self, id: &str) -> Option<&NodeRecord> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Layers in paint order, bottom first. Equal orders keep their stored sequence.
    pub fn layers_by_order(&self) -> Vec<&Layer> {
        let mut layers: Vec<&Layer> = self.layers.iter().collect();
        layers.sort_by_key(|l| l.order);
        layers
    }

    pub fn nodes_on_layer<'a>(&'a self, layer_id: &'a str) -> impl Iterator<Item = &'a NodeRecord> + 'a {
        self.nodes.iter().filter(move |n| n.layer_id == layer_id)
    }

    /// Nodes whose layer resolves and is visible
    pub fn visible_nodes(&self) -> impl Iterator<Item = &NodeRecord> + '_ {
        self.nodes
            .iter()
            .filter(move |n| self.layer(&n.layer_id).map(|l| l.is_visible).unwrap_or(false))
    }
}

/// Z-ordered grouping of nodes and edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: String,
    pub name: String,

    /// Paint order; only the relative ordering matters
    pub order: i64,

    #[serde(default = "default_true")]
    pub is_visible: bool,

    #[serde(default)]
    pub is_locked: bool,
}

fn default_true() -> bool {
    true
}

impl Layer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order,
            is_visible: true,
            is_locked: false,
        }
    }
}

/// Shape kind of a node. Unknown tags are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Rectangle,
    Ellipse,
    Sticky,
    TextNode,
    DataTable,
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Rectangle => "rectangle",
            NodeKind::Ellipse => "ellipse",
            NodeKind::Sticky => "sticky",
            NodeKind::TextNode => "textNode",
            NodeKind::DataTable => "dataTable",
            NodeKind::Other(tag) => tag,
        }
    }

    pub fn default_size(&self) -> Size {
        match self {
            NodeKind::Ellipse => Size::new(120.0, 120.0),
            NodeKind::Sticky => Size::new(200.0, 200.0),
            NodeKind::TextNode => Size::new(160.0, 40.0),
            NodeKind::DataTable => Size::new(240.0, 160.0),
            NodeKind::Rectangle | NodeKind::Other(_) => Size::new(160.0, 80.0),
        }
    }

    pub fn default_style(&self) -> NodeStyle {
        match self {
            NodeKind::Sticky => NodeStyle::new("#fef08a", "#eab308", "#422006"),
            NodeKind::TextNode => NodeStyle::new("transparent", "transparent", "#111827"),
            NodeKind::DataTable => NodeStyle::new("#ffffff", "#64748b", "#0f172a"),
            NodeKind::Rectangle | NodeKind::Ellipse | NodeKind::Other(_) => {
                NodeStyle::new("#ffffff", "#1f2937", "#111827")
            }
        }
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "rectangle" => NodeKind::Rectangle,
            "ellipse" => NodeKind::Ellipse,
            "sticky" => NodeKind::Sticky,
            "textNode" => NodeKind::TextNode,
            "dataTable" => NodeKind::DataTable,
            _ => NodeKind::Other(tag),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    pub fill: String,
    pub stroke: String,
    pub text_color: String,
}

impl NodeStyle {
    pub fn new(fill: &str, stroke: &str, text_color: &str) -> Self {
        Self {
            fill: fill.to_string(),
            stroke: stroke.to_string(),
            text_color: text_color.to_string(),
        }
    }
}

/// A placed shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "NodeRecordRaw")]
pub struct NodeRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub position: Position,
    pub size: Size,
    pub text: String,
    pub style: NodeStyle,
    pub layer_id: String,
}

impl NodeRecord {
    /// Node with the kind's default size and style
    pub fn new(
        id: impl Into<String>,
        kind: NodeKind,
        position: Position,
        layer_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            size: kind.default_size(),
            style: kind.default_style(),
            kind,
            position,
            text: String::new(),
            layer_id: layer_id.into(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.size)
    }
}

/// Persisted node as found on disk: size, style, text and layer may be missing
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeRecordRaw {
    id: String,
    #[serde(rename = "type")]
    kind: NodeKind,
    position: Position,
    size: Option<Size>,
    text: Option<String>,
    style: Option<NodeStyleRaw>,
    layer_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeStyleRaw {
    fill: Option<String>,
    stroke: Option<String>,
    text_color: Option<String>,
}

impl From<NodeRecordRaw> for NodeRecord {
    fn from(raw: NodeRecordRaw) -> Self {
        let defaults = raw.kind.default_style();
        let style = match raw.style {
            Some(style) => NodeStyle {
                fill: style.fill.unwrap_or(defaults.fill),
                stroke: style.stroke.unwrap_or(defaults.stroke),
                text_color: style.text_color.unwrap_or(defaults.text_color),
            },
            None => defaults,
        };

        Self {
            id: raw.id,
            size: raw.size.unwrap_or_else(|| raw.kind.default_size()),
            kind: raw.kind,
            position: raw.position,
            text: raw.text.unwrap_or_default(),
            style,
            layer_id: raw.layer_id.unwrap_or_default(),
        }
    }
}

/// A directed connector between two nodes of the same page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    pub id: String,
    pub source: String,
    pub target: String,

    #[serde(default)]
    pub style: EdgeStyle,

    #[serde(default)]
    pub layer_id: String,
}

impl EdgeRecord {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        layer_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            style: EdgeStyle::default(),
            layer_id: layer_id.into(),
        }
    }
}
