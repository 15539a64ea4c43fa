//! Aggregate tables produced by a collection pass.

use serde::{Deserialize, Serialize};

use crate::document::{LetterSpacing, LineHeight, Mixed, NodeId};
use crate::fonts::FontName;

/// Family / weight label used when a text node mixes fonts across its characters.
pub const MIXED_LABEL: &str = "Mixed";
/// Lowercase sentinel used inside grouping keys.
pub const MIXED_KEY: &str = "mixed";

/// One distinct solid fill color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorEntry {
    /// Uppercase `#RRGGBB`; also the grouping key.
    pub hex: String,
    pub count: usize,
    /// Nodes whose fills contributed to this entry, one per occurrence.
    pub nodes: Vec<NodeId>,
}

/// One distinct (family, size, weight) combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyleEntry {
    pub key: String,
    pub family: String,
    pub size: Mixed<f32>,
    pub weight: String,
    pub line_height: Mixed<LineHeight>,
    pub letter_spacing: Mixed<LetterSpacing>,
    pub count: usize,
    pub sample: String,
}

impl TextStyleEntry {
    /// Numeric size used for ordering; mixed sizes sort as 0.
    pub fn sort_size(&self) -> f32 {
        self.size.uniform().copied().unwrap_or(0.0)
    }

    pub fn font_name(&self) -> FontName {
        FontName::new(self.family.clone(), self.weight.clone())
    }

    pub fn size_label(&self) -> String {
        match self.size {
            Mixed::Uniform(size) => format!("{size}px"),
            Mixed::Mixed => MIXED_KEY.to_string(),
        }
    }
}

/// One master component, in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentEntry {
    pub id: NodeId,
    pub name: String,
    pub width: f32,
    pub height: f32,
}

/// The three ordered aggregate tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignInventory {
    /// Sorted by descending count.
    pub colors: Vec<ColorEntry>,
    /// Sorted by descending font size; ties keep encounter order.
    pub text_styles: Vec<TextStyleEntry>,
    /// First-seen order.
    pub components: Vec<ComponentEntry>,
}

impl DesignInventory {
    pub fn stats(&self) -> InventoryStats {
        InventoryStats {
            colors: self.colors.len(),
            text_styles: self.text_styles.len(),
            components: self.components.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.text_styles.is_empty() && self.components.is_empty()
    }
}

/// Sizes of the three aggregates, as reported to the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub colors: usize,
    pub text_styles: usize,
    pub components: usize,
}
