//! # Edge Style Resolver
//!
//! Maps the stored edge-style vocabulary onto the connector kinds used by the
//! rendering layer.
//!
//! The stored vocabulary is closed: `smoothstep`, `straight`, `step`, `bezier`.
//! Decoding is total. Rendering-layer synonyms for a bezier curve (`default`,
//! `simplebezier`) decode to `bezier`; anything else, including a missing
//! value, decodes to `smoothstep`. The two fallbacks differ on purpose: the
//! field default is `smoothstep` even though `bezier` is what the renderer
//! calls its default.

use crate::schema::EdgeRecord;
use serde::{Deserialize, Serialize};

/// Stored routing style of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum EdgeStyle {
    #[default]
    Smoothstep,
    Straight,
    Step,
    Bezier,
}

impl EdgeStyle {
    pub const ALL: [EdgeStyle; 4] = [
        EdgeStyle::Smoothstep,
        EdgeStyle::Straight,
        EdgeStyle::Step,
        EdgeStyle::Bezier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeStyle::Smoothstep => "smoothstep",
            EdgeStyle::Straight => "straight",
            EdgeStyle::Step => "step",
            EdgeStyle::Bezier => "bezier",
        }
    }
}

impl From<Option<String>> for EdgeStyle {
    fn from(raw: Option<String>) -> Self {
        to_stored_style(raw.as_deref())
    }
}

impl From<EdgeStyle> for String {
    fn from(style: EdgeStyle) -> Self {
        style.as_str().to_string()
    }
}

impl std::fmt::Display for EdgeStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connector kind understood by the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderConnectorKind {
    /// The renderer's bezier connector
    Default,
    Straight,
    Step,
    SmoothStep,
}

/// Line kind drawn while a connection is being dragged out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingLineKind {
    Bezier,
    Straight,
    Step,
    SmoothStep,
}

/// Arrowhead drawn at the target end of a styled edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerKind {
    Arrow,
    ArrowClosed,
}

pub fn to_render_kind(style: EdgeStyle) -> RenderConnectorKind {
    match style {
        EdgeStyle::Smoothstep => RenderConnectorKind::SmoothStep,
        EdgeStyle::Straight => RenderConnectorKind::Straight,
        EdgeStyle::Step => RenderConnectorKind::Step,
        EdgeStyle::Bezier => RenderConnectorKind::Default,
    }
}

pub fn to_routing_kind(style: EdgeStyle) -> RoutingLineKind {
    match style {
        EdgeStyle::Smoothstep => RoutingLineKind::SmoothStep,
        EdgeStyle::Straight => RoutingLineKind::Straight,
        EdgeStyle::Step => RoutingLineKind::Step,
        EdgeStyle::Bezier => RoutingLineKind::Bezier,
    }
}

/// Decode a raw style value. Never fails.
pub fn to_stored_style(raw: Option<&str>) -> EdgeStyle {
    match raw {
        Some("bezier") | Some("default") | Some("simplebezier") => EdgeStyle::Bezier,
        Some("straight") => EdgeStyle::Straight,
        Some("step") => EdgeStyle::Step,
        Some("smoothstep") => EdgeStyle::Smoothstep,
        _ => EdgeStyle::Smoothstep,
    }
}

/// An edge prepared for the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledEdge {
    pub edge: EdgeRecord,
    pub render_kind: RenderConnectorKind,
    pub animated: bool,
    pub marker_end: MarkerKind,
}

/// Restyle a batch of edges uniformly. The input slice is left untouched.
pub fn apply_edge_style(edges: &[EdgeRecord], style: EdgeStyle, animated: bool) -> Vec<StyledEdge> {
    let render_kind = to_render_kind(style);

    edges
        .iter()
        .map(|edge| StyledEdge {
            edge: EdgeRecord {
                style,
                ..edge.clone()
            },
            render_kind,
            animated,
            marker_end: MarkerKind::ArrowClosed,
        })
        .collect()
}
