//! Builders for the three report sections.

use tracing::warn;

use super::{configure_frame, LabelFonts};
use crate::collector::{ColorEntry, ComponentEntry, TextStyleEntry};
use crate::color::hex_to_rgb;
use crate::config::ReportConfig;
use crate::document::{
    AutoLayout, Document, DocumentError, Mixed, NodeId, NodeKind, Paint, Rgb, TextAlign,
    TextAutoResize,
};
use crate::fonts::{FontName, FontRegistry, LoadedFont};
use crate::Result;

const SECTION_WIDTH: f32 = 1320.0;
const SECTION_SPACING: f32 = 32.0;
const TITLE_SIZE: f32 = 32.0;

const COLOR_GRID_SPACING: f32 = 20.0;
const COLOR_ITEM_SPACING: f32 = 10.0;
const SWATCH_SIZE: f32 = 120.0;
const SWATCH_RADIUS: f32 = 8.0;
const COLOR_LABEL_SIZE: f32 = 14.0;
const COLOR_LABEL_HEIGHT: f32 = 40.0;

const TYPE_ITEM_SPACING: f32 = 8.0;
const DETAIL_SIZE: f32 = 12.0;
const DETAIL_GRAY: Rgb = Rgb::new(0.5, 0.5, 0.5);

const COMPONENT_GRID_SPACING: f32 = 32.0;
const COMPONENT_ITEM_SPACING: f32 = 12.0;
const COMPONENT_MIN_WIDTH: f32 = 100.0;
const COMPONENT_LABEL_SIZE: f32 = 12.0;

/// A fixed-width vertical section frame with a bold title as its first child.
fn section(doc: &mut Document, labels: &LabelFonts, name: &str) -> Result<NodeId> {
    let frame = doc.create_frame(name);
    configure_frame(doc, &frame, SECTION_WIDTH, 100.0, AutoLayout::vertical(SECTION_SPACING))?;
    let title = doc.create_text(&labels.bold, TITLE_SIZE, name);
    doc.append_child(&frame, &title)?;
    Ok(frame)
}

fn grid(doc: &mut Document, name: &str, spacing: f32) -> Result<NodeId> {
    let frame = doc.create_frame(name);
    configure_frame(doc, &frame, SECTION_WIDTH, 100.0, AutoLayout::horizontal_wrap(spacing))?;
    Ok(frame)
}

fn text_mut<'d>(
    doc: &'d mut Document,
    id: &NodeId,
) -> Result<&'d mut crate::document::TextProps> {
    match doc.get_mut(id).map(|n| &mut n.kind) {
        Some(NodeKind::Text(props)) => Ok(props),
        _ => Err(DocumentError::NodeNotFound(id.clone()).into()),
    }
}

pub(super) fn colors(
    doc: &mut Document,
    labels: &LabelFonts,
    colors: &[ColorEntry],
) -> Result<NodeId> {
    let section = section(doc, labels, "Colors")?;
    let grid = grid(doc, "Color Grid", COLOR_GRID_SPACING)?;

    for entry in colors {
        let item = doc.create_frame(&entry.hex);
        configure_frame(
            doc,
            &item,
            SWATCH_SIZE,
            SWATCH_SIZE + COLOR_ITEM_SPACING + COLOR_LABEL_HEIGHT,
            AutoLayout::vertical(COLOR_ITEM_SPACING),
        )?;

        let swatch = doc.create_rectangle("Swatch");
        if let Some(node) = doc.get_mut(&swatch) {
            node.resize(SWATCH_SIZE, SWATCH_SIZE);
            if let NodeKind::Shape(shape) = &mut node.kind {
                shape.fills = vec![Paint::solid(hex_to_rgb(&entry.hex)?)];
                shape.corner_radius = SWATCH_RADIUS;
            }
        }

        let label = doc.create_text(
            &labels.regular,
            COLOR_LABEL_SIZE,
            &format!("{}\n{} uses", entry.hex, entry.count),
        );
        {
            let text = text_mut(doc, &label)?;
            text.text_align = TextAlign::Center;
            text.auto_resize = TextAutoResize::None;
        }
        if let Some(node) = doc.get_mut(&label) {
            node.resize(SWATCH_SIZE, COLOR_LABEL_HEIGHT);
        }

        doc.append_child(&item, &swatch)?;
        doc.append_child(&item, &label)?;
        doc.append_child(&grid, &item)?;
    }

    doc.append_child(&section, &grid)?;
    Ok(section)
}

/// Returns the section and the fonts of styles that were skipped.
pub(super) async fn typography(
    doc: &mut Document,
    labels: &LabelFonts,
    fonts: &mut FontRegistry<'_>,
    config: &ReportConfig,
    styles: &[TextStyleEntry],
) -> Result<(NodeId, Vec<FontName>)> {
    let section = section(doc, labels, "Typography")?;
    let mut skipped = Vec::new();

    for style in styles {
        let font = style.font_name();
        let loaded = match fonts.resolve(&font).await {
            Ok(loaded) => loaded,
            Err(err) => {
                warn!(font = %font, error = %err, "could not load font; skipping style");
                skipped.push(font);
                continue;
            }
        };
        let item = style_item(doc, labels, &loaded, config, style)?;
        doc.append_child(&section, &item)?;
    }

    Ok((section, skipped))
}

fn style_item(
    doc: &mut Document,
    labels: &LabelFonts,
    font: &LoadedFont,
    config: &ReportConfig,
    style: &TextStyleEntry,
) -> Result<NodeId> {
    let size_label = style.size_label();
    let item = doc.create_frame(&format!("{} {} {}", style.family, style.weight, size_label));
    configure_frame(doc, &item, SECTION_WIDTH, 100.0, AutoLayout::vertical(TYPE_ITEM_SPACING))?;

    let sample_size = match style.size {
        Mixed::Uniform(size) => size,
        Mixed::Mixed => config.mixed_size_fallback,
    };
    let sample_text = if style.sample.is_empty() {
        config.sample_fallback.as_str()
    } else {
        style.sample.as_str()
    };
    let sample = doc.create_text(font, sample_size, sample_text);
    {
        let text = text_mut(doc, &sample)?;
        text.line_height = style.line_height;
        text.letter_spacing = style.letter_spacing;
    }

    let detail = doc.create_text(
        &labels.regular,
        DETAIL_SIZE,
        &format!(
            "{} {} • {} • {} uses",
            style.family, style.weight, size_label, style.count
        ),
    );
    text_mut(doc, &detail)?.fills = vec![Paint::solid(DETAIL_GRAY)];

    doc.append_child(&item, &sample)?;
    doc.append_child(&item, &detail)?;
    Ok(item)
}

pub(super) fn components(
    doc: &mut Document,
    labels: &LabelFonts,
    components: &[ComponentEntry],
) -> Result<NodeId> {
    let section = section(doc, labels, "Components")?;
    let grid = grid(doc, "Component Grid", COMPONENT_GRID_SPACING)?;

    for entry in components {
        let item = doc.create_frame(&entry.name);
        configure_frame(
            doc,
            &item,
            entry.width.max(COMPONENT_MIN_WIDTH),
            100.0,
            AutoLayout::vertical(COMPONENT_ITEM_SPACING),
        )?;

        let instance = doc.create_instance(&entry.id)?;
        let label = doc.create_text(&labels.regular, COMPONENT_LABEL_SIZE, &entry.name);

        doc.append_child(&item, &instance)?;
        doc.append_child(&item, &label)?;
        doc.append_child(&grid, &item)?;
    }

    doc.append_child(&section, &grid)?;
    Ok(section)
}
