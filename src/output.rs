use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::collector::{DesignInventory, InventoryStats};
use crate::document::NodeId;
use crate::error::ErrorPayload;
use crate::fonts::FontName;
use crate::messages::Notification;

/// Schema version for output payloads.
pub const DSG_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum DsgOutput {
    Scan(ScanOutput),
    Generate(GenerateOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutput {
    pub version: String,
    pub document: String,
    pub page: NodeId,
    pub stats: InventoryStats,
    pub inventory: DesignInventory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutput {
    pub version: String,
    pub document: String,
    /// Page that was scanned.
    pub source_page: NodeId,
    /// Generated report page; absent when generation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<InventoryStats>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_styles: Vec<FontName>,
    pub notifications: Vec<Notification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<PathBuf>,
}

impl GenerateOutput {
    pub fn succeeded(&self) -> bool {
        self.page.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}
