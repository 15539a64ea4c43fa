//! In-memory host document model.
//!
//! This module provides:
//! - [`Document`] - Node arena with pages, selection and the canvas camera
//! - [`NodeKind`] - Closed set of node variants (page, frame, shape, text, component, ...)
//! - [`Paint`] / [`Rgb`] - Fill descriptors
//! - [`TextProps`] / [`Mixed`] - Text styling, with the `mixed` sentinel
//! - [`DocumentTree`] - Nested serde form used to load and save documents

pub mod node;
pub mod paint;
pub mod text;
pub mod tree;


pub use node::{
    AutoLayout, AxisSizing, FrameProps, InstanceProps, LayoutMode, Node, NodeId, NodeKind,
    Padding, PageProps, ShapeKind, ShapeProps,
};
pub use paint::{OpaquePaint, Paint, Rgb, SolidPaint};
pub use text::{
    LetterSpacing, LetterSpacingUnit, LineHeight, Mixed, TextAlign, TextAutoResize, TextProps,
    MIXED_MARKER,
};
pub use tree::{Document, DocumentError, DocumentTree, NodeTree};

use crate::Result;
use std::path::Path;

/// Load a document from its JSON tree form.
pub async fn load_document(path: &Path) -> Result<Document> {
    let content = tokio::fs::read_to_string(path).await?;
    let tree: DocumentTree = serde_json::from_str(&content)?;
    Ok(Document::from_tree(tree)?)
}

/// Save a document (attached nodes only) in its JSON tree form.
pub async fn save_document(doc: &Document, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(&doc.to_tree())?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, content).await?;
    Ok(())
}
