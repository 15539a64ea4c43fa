//! Reporter: turns a [`DesignInventory`] into a generated design system page.
//!
//! The report is one page holding a vertical container frame named
//! [`CONTAINER_NAME`], with up to three sections in fixed order: Colors,
//! Typography, Components. Empty aggregates produce no section.
//!
//! The two label fonts must resolve before anything else is built; failure
//! there aborts the run. A typography style whose own font cannot be resolved
//! is skipped and the run continues. Nodes created before a failure are left
//! in the document.

mod sections;

#[cfg(test)]
mod tests;

use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::collector::{DesignInventory, InventoryStats};
use crate::config::ReportConfig;
use crate::document::{AutoLayout, AxisSizing, Document, FrameProps, NodeId, NodeKind, Padding};
use crate::fonts::{FontLoader, FontName, FontRegistry, LoadedFont};
use crate::layout::apply_layout;
use crate::Result;

/// Name of the top-level report frame; reselection looks it up by this name.
pub const CONTAINER_NAME: &str = "Design System";

const CONTAINER_WIDTH: f32 = 1400.0;
const CONTAINER_OFFSET: f32 = 40.0;
const CONTAINER_SPACING: f32 = 80.0;
const CONTAINER_PADDING: f32 = 40.0;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOutcome {
    pub page: NodeId,
    pub container: NodeId,
    pub stats: InventoryStats,
    /// Typography styles left out because their font could not be resolved.
    pub skipped_styles: Vec<FontName>,
}

/// Regular and bold label fonts, resolved once per run.
pub(crate) struct LabelFonts {
    pub regular: LoadedFont,
    pub bold: LoadedFont,
}

pub struct Reporter<'a> {
    config: &'a ReportConfig,
    fonts: FontRegistry<'a>,
}

impl<'a> Reporter<'a> {
    pub fn new(config: &'a ReportConfig, loader: &'a dyn FontLoader, font_timeout: Duration) -> Self {
        Self {
            config,
            fonts: FontRegistry::new(loader, font_timeout),
        }
    }

    pub async fn generate(
        mut self,
        doc: &mut Document,
        inventory: &DesignInventory,
    ) -> Result<ReportOutcome> {
        let page = doc.create_page(&self.config.page_name);
        let container = doc.create_frame(CONTAINER_NAME);
        configure_frame(
            doc,
            &container,
            CONTAINER_WIDTH,
            100.0,
            AutoLayout::vertical(CONTAINER_SPACING)
                .with_counter_sizing(AxisSizing::Auto)
                .with_padding(Padding::uniform(CONTAINER_PADDING)),
        )?;
        if let Some(node) = doc.get_mut(&container) {
            node.x = CONTAINER_OFFSET;
            node.y = CONTAINER_OFFSET;
        }
        doc.append_child(&page, &container)?;

        let family = &self.config.label_family;
        let labels = LabelFonts {
            bold: self.fonts.resolve(&FontName::new(family, "Bold")).await?,
            regular: self.fonts.resolve(&FontName::new(family, "Regular")).await?,
        };

        if !inventory.colors.is_empty() {
            debug!(count = inventory.colors.len(), "building colors section");
            let section = sections::colors(doc, &labels, &inventory.colors)?;
            doc.append_child(&container, &section)?;
        }

        let mut skipped_styles = Vec::new();
        if !inventory.text_styles.is_empty() {
            debug!(count = inventory.text_styles.len(), "building typography section");
            let (section, skipped) = sections::typography(
                doc,
                &labels,
                &mut self.fonts,
                self.config,
                &inventory.text_styles,
            )
            .await?;
            skipped_styles = skipped;
            doc.append_child(&container, &section)?;
        }

        if !inventory.components.is_empty() {
            debug!(count = inventory.components.len(), "building components section");
            let section = sections::components(doc, &labels, &inventory.components)?;
            doc.append_child(&container, &section)?;
        }

        apply_layout(doc, &container)?;
        doc.set_current_page(&page)?;
        doc.scroll_and_zoom_into_view(std::slice::from_ref(&container))?;

        let stats = inventory.stats();
        info!(
            page = %page,
            colors = stats.colors,
            text_styles = stats.text_styles,
            components = stats.components,
            skipped = skipped_styles.len(),
            "design system generated"
        );
        Ok(ReportOutcome {
            page,
            container,
            stats,
            skipped_styles,
        })
    }
}

/// Turn `id` into a transparent auto-layout frame of the given size.
pub(crate) fn configure_frame(
    doc: &mut Document,
    id: &NodeId,
    width: f32,
    height: f32,
    layout: AutoLayout,
) -> Result<()> {
    let node = doc
        .get_mut(id)
        .ok_or_else(|| crate::document::DocumentError::NodeNotFound(id.clone()))?;
    node.resize(width, height);
    node.kind = NodeKind::Frame(FrameProps {
        fills: Vec::new(),
        corner_radius: 0.0,
        layout,
    });
    Ok(())
}
