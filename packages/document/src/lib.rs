//! # Drawboard Document
//!
//! The versioned diagram document model and the engine that reads any stored
//! shape of it back into the current one.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ storage: persisted JSON (any version)       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ migrate: current → legacy → empty fallback  │
//! │  - validate_current (shape + ranges)        │
//! │  - legacy single-page wrapping              │
//! │  - normalize (dangling reference repair)    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ DiagramDocument (dataVersion 2)             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Migration is total**: no stored state prevents an editor from opening
//! 2. **Ids, not pointers**: pages own flat node/edge/layer sequences
//! 3. **Values in, values out**: every transformation returns a new document
//!
//! ## Usage
//!
//! ```rust
//! use drawboard_document::{migrate, MigrationSource, migrate_detailed};
//! use serde_json::json;
//!
//! let stored = json!({
//!     "version": 1,
//!     "nodes": [{ "id": "a", "type": "rectangle", "position": { "x": 0, "y": 0 } }],
//!     "edges": []
//! });
//!
//! let migration = migrate_detailed(&stored);
//! assert_eq!(migration.source, MigrationSource::Legacy);
//!
//! let doc = migration.document;
//! assert_eq!(doc.pages[0].nodes[0].layer_id, "layer-1");
//! assert_eq!(migrate(&doc.to_json().unwrap()), doc);
//! ```

pub mod edge_style;
pub mod geometry;
mod migrate;
pub mod schema;
mod validator;

pub use edge_style::{
    apply_edge_style, to_render_kind, to_routing_kind, to_stored_style, EdgeStyle, MarkerKind,
    RenderConnectorKind, RoutingLineKind, StyledEdge,
};
pub use geometry::{quantize, Position, Rect, Size, Viewport};
pub use migrate::{migrate, migrate_detailed, migrate_str, normalize, Migration, MigrationSource};
pub use schema::{
    DiagramDocument, EdgeRecord, Layer, NodeKind, NodeRecord, NodeStyle, Page, PageSettings,
    DATA_VERSION, LEGACY_DATA_VERSION,
};
pub use validator::{check_references, validate_current, ReferenceIssue, ValidationError, ValidationResult};
