//! # Structural Validator
//!
//! Decides whether arbitrary decoded JSON is a current-version document.
//!
//! Validation checks shape and value ranges only. A document that passes may
//! still carry dangling `activePageId`, `activeLayerId` or `layerId`
//! references; [`check_references`] reports those and [`crate::normalize`]
//! repairs them. Edges pointing at a missing node are reported too, but are
//! kept as stored.

use crate::schema::{DiagramDocument, Page, DATA_VERSION};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Document is not a JSON object")]
    NotAnObject,

    #[error("Unsupported data version: {0}")]
    UnsupportedVersion(String),

    #[error("Shape error: {0}")]
    Shape(String),

    #[error("{0} must not be empty")]
    EmptyCollection(String),

    #[error("{path} is out of range: {reason}")]
    OutOfRange { path: String, reason: &'static str },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Accept `input` iff it is a well-formed version 2 document
pub fn validate_current(input: &Value) -> ValidationResult<DiagramDocument> {
    check_version_tag(input)?;

    let doc = DiagramDocument::deserialize(input)
        .map_err(|e| ValidationError::Shape(e.to_string()))?;

    check_ranges(&doc)?;
    Ok(doc)
}

/// Fast-path dispatch on `dataVersion` before the full decode
fn check_version_tag(input: &Value) -> ValidationResult<()> {
    let object = input.as_object().ok_or(ValidationError::NotAnObject)?;

    match object.get("dataVersion") {
        Some(tag) if tag.as_u64() == Some(DATA_VERSION as u64) => Ok(()),
        Some(tag) => Err(ValidationError::UnsupportedVersion(tag.to_string())),
        None => Err(ValidationError::UnsupportedVersion("missing".to_string())),
    }
}

pub(crate) fn check_ranges(doc: &DiagramDocument) -> ValidationResult<()> {
    if doc.pages.is_empty() {
        return Err(ValidationError::EmptyCollection("pages".to_string()));
    }

    for (index, page) in doc.pages.iter().enumerate() {
        check_page(page, &format!("pages[{}]", index))?;
    }

    Ok(())
}

fn check_page(page: &Page, path: &str) -> ValidationResult<()> {
    if page.layers.is_empty() {
        return Err(ValidationError::EmptyCollection(format!("{}.layers", path)));
    }

    let viewport = &page.viewport;
    ensure(viewport.x.is_finite() && viewport.y.is_finite(), || format!("{}.viewport", path), "pan must be finite")?;
    ensure(viewport.zoom.is_finite() && viewport.zoom > 0.0, || format!("{}.viewport.zoom", path), "must be finite and positive")?;

    let grid_size = page.settings.grid_size;
    ensure(grid_size.is_finite() && grid_size > 0.0, || format!("{}.settings.gridSize", path), "must be finite and positive")?;

    for (index, node) in page.nodes.iter().enumerate() {
        ensure(node.position.is_finite(), || format!("{}.nodes[{}].position", path, index), "must be finite")?;
        ensure(node.size.is_positive(), || format!("{}.nodes[{}].size", path, index), "width and height must be positive")?;
    }

    Ok(())
}

fn ensure(ok: bool, path: impl FnOnce() -> String, reason: &'static str) -> ValidationResult<()> {
    if ok {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { path: path(), reason })
    }
}

/// A cross reference that does not resolve within its scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReferenceIssue {
    #[serde(rename_all = "camelCase")]
    ActivePage { active_page_id: String },

    #[serde(rename_all = "camelCase")]
    ActiveLayer { page_id: String, active_layer_id: String },

    #[serde(rename_all = "camelCase")]
    NodeLayer { page_id: String, node_id: String, layer_id: String },

    #[serde(rename_all = "camelCase")]
    EdgeLayer { page_id: String, edge_id: String, layer_id: String },

    #[serde(rename_all = "camelCase")]
    EdgeEndpoint { page_id: String, edge_id: String, node_id: String },
}

impl ReferenceIssue {
    /// Whether [`crate::normalize`] resolves this issue
    pub fn is_repairable(&self) -> bool {
        !matches!(self, ReferenceIssue::EdgeEndpoint { .. })
    }
}

impl fmt::Display for ReferenceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceIssue::ActivePage { active_page_id } => {
                write!(f, "activePageId '{}' does not match any page", active_page_id)
            }
            ReferenceIssue::ActiveLayer { page_id, active_layer_id } => write!(
                f,
                "page '{}': activeLayerId '{}' does not match any layer",
                page_id, active_layer_id
            ),
            ReferenceIssue::NodeLayer { page_id, node_id, layer_id } => write!(
                f,
                "page '{}': node '{}' is on unknown layer '{}'",
                page_id, node_id, layer_id
            ),
            ReferenceIssue::EdgeLayer { page_id, edge_id, layer_id } => write!(
                f,
                "page '{}': edge '{}' is on unknown layer '{}'",
                page_id, edge_id, layer_id
            ),
            ReferenceIssue::EdgeEndpoint { page_id, edge_id, node_id } => write!(
                f,
                "page '{}': edge '{}' points at unknown node '{}'",
                page_id, edge_id, node_id
            ),
        }
    }
}

/// Report every dangling reference without repairing anything
pub fn check_references(doc: &DiagramDocument) -> Vec<ReferenceIssue> {
    let mut issues = Vec::new();

    if doc.active_page().is_none() {
        issues.push(ReferenceIssue::ActivePage {
            active_page_id: doc.active_page_id.clone(),
        });
    }

    for page in &doc.pages {
        let layer_ids: HashSet<&str> = page.layers.iter().map(|l| l.id.as_str()).collect();
        let node_ids: HashSet<&str> = page.nodes.iter().map(|n| n.id.as_str()).collect();

        if !layer_ids.contains(page.active_layer_id.as_str()) {
            issues.push(ReferenceIssue::ActiveLayer {
                page_id: page.id.clone(),
                active_layer_id: page.active_layer_id.clone(),
            });
        }

        for node in &page.nodes {
            if !layer_ids.contains(node.layer_id.as_str()) {
                issues.push(ReferenceIssue::NodeLayer {
                    page_id: page.id.clone(),
                    node_id: node.id.clone(),
                    layer_id: node.layer_id.clone(),
                });
            }
        }

        for edge in &page.edges {
            if !layer_ids.contains(edge.layer_id.as_str()) {
                issues.push(ReferenceIssue::EdgeLayer {
                    page_id: page.id.clone(),
                    edge_id: edge.id.clone(),
                    layer_id: edge.layer_id.clone(),
                });
            }

            for endpoint in [&edge.source, &edge.target] {
                if !node_ids.contains(endpoint.as_str()) {
                    issues.push(ReferenceIssue::EdgeEndpoint {
                        page_id: page.id.clone(),
                        edge_id: edge.id.clone(),
                        node_id: endpoint.clone(),
                    });
                }
            }
        }
    }

    issues
}
