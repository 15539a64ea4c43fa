//! Auto-layout flow engine.
//!
//! Sizes and positions are computed bottom-up: children first, then the frame
//! that contains them. Child coordinates are relative to their parent frame.

use crate::document::{
    AutoLayout, AxisSizing, Document, DocumentError, LayoutMode, NodeId, NodeKind, TextAutoResize,
    TextProps,
};

/// Average glyph advance as a fraction of the font size.
pub const CHAR_WIDTH_EM: f32 = 0.6;

/// Size used to measure text whose font size is mixed.
const MIXED_MEASURE_SIZE: f32 = 12.0;

/// Lay out `root` and every node beneath it.
pub fn apply_layout(doc: &mut Document, root: &NodeId) -> Result<(), DocumentError> {
    let node = doc
        .get(root)
        .ok_or_else(|| DocumentError::NodeNotFound(root.clone()))?;

    match &node.kind {
        NodeKind::Text(text) => {
            let (width, height) = measure_text(text, node.width, node.height);
            if let Some(node) = doc.get_mut(root) {
                node.resize(width, height);
            }
        }
        kind if kind.can_have_children() => {
            let children = node.children.clone();
            let layout = kind.auto_layout().copied();
            for child in &children {
                apply_layout(doc, child)?;
            }
            if let Some(layout) = layout.filter(|l| l.mode != LayoutMode::None) {
                arrange(doc, root, &children, &layout)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Measure a text box as `(width, height)` given its current box.
pub fn measure_text(text: &TextProps, width: f32, height: f32) -> (f32, f32) {
    let size = text
        .font_size
        .uniform()
        .copied()
        .unwrap_or(MIXED_MEASURE_SIZE);
    let line_height = text
        .line_height
        .uniform()
        .copied()
        .unwrap_or_default()
        .to_pixels(size);
    let char_width = size * CHAR_WIDTH_EM;
    let lines: Vec<usize> = text
        .characters
        .split('\n')
        .map(|line| line.chars().count())
        .collect();

    match text.auto_resize {
        TextAutoResize::WidthAndHeight => {
            let longest = lines.iter().copied().max().unwrap_or(0);
            (longest as f32 * char_width, lines.len() as f32 * line_height)
        }
        TextAutoResize::Height => {
            let per_line = if char_width > 0.0 {
                ((width / char_width).floor() as usize).max(1)
            } else {
                usize::MAX
            };
            let wrapped: usize = lines
                .iter()
                .map(|&len| len.div_ceil(per_line).max(1))
                .sum();
            (width, wrapped as f32 * line_height)
        }
        TextAutoResize::None => (width, height),
    }
}

struct Item {
    id: NodeId,
    width: f32,
    height: f32,
}

fn arrange(
    doc: &mut Document,
    frame: &NodeId,
    children: &[NodeId],
    layout: &AutoLayout,
) -> Result<(), DocumentError> {
    let items: Vec<Item> = children
        .iter()
        .filter_map(|id| doc.get(id))
        .filter(|node| node.visible)
        .map(|node| Item {
            id: node.id.clone(),
            width: node.width,
            height: node.height,
        })
        .collect();

    let node = doc
        .get(frame)
        .ok_or_else(|| DocumentError::NodeNotFound(frame.clone()))?;
    let (frame_width, frame_height) = (node.width, node.height);
    let pad = layout.padding;
    let spacing = layout.item_spacing;

    let mut positions: Vec<(f32, f32)> = Vec::with_capacity(items.len());
    let (mut width, mut height) = (frame_width, frame_height);

    match (layout.mode, layout.wrap) {
        (LayoutMode::Vertical, _) => {
            let mut cursor = pad.top;
            for item in &items {
                positions.push((pad.left, cursor));
                cursor += item.height + spacing;
            }
            let main = span(items.iter().map(|i| i.height), spacing);
            let cross = items.iter().map(|i| i.width).fold(0.0, f32::max);
            if layout.primary_sizing == AxisSizing::Auto {
                height = pad.top + main + pad.bottom;
            }
            if layout.counter_sizing == AxisSizing::Auto {
                width = pad.left + cross + pad.right;
            }
        }
        (LayoutMode::Horizontal, false) => {
            let mut cursor = pad.left;
            for item in &items {
                positions.push((cursor, pad.top));
                cursor += item.width + spacing;
            }
            let main = span(items.iter().map(|i| i.width), spacing);
            let cross = items.iter().map(|i| i.height).fold(0.0, f32::max);
            if layout.primary_sizing == AxisSizing::Auto {
                width = pad.left + main + pad.right;
            }
            if layout.counter_sizing == AxisSizing::Auto {
                height = pad.top + cross + pad.bottom;
            }
        }
        (LayoutMode::Horizontal, true) => {
            // Wrapping keeps the primary axis fixed; lines break at the inner width.
            let limit = frame_width - pad.left - pad.right;
            let line_spacing = layout.counter_axis_spacing.unwrap_or(spacing);
            let (mut x, mut line_top, mut line_height) = (0.0f32, 0.0f32, 0.0f32);
            let mut line_has_items = false;
            for item in &items {
                if line_has_items && x + item.width > limit {
                    line_top += line_height + line_spacing;
                    x = 0.0;
                    line_height = 0.0;
                }
                positions.push((pad.left + x, pad.top + line_top));
                x += item.width + spacing;
                line_height = line_height.max(item.height);
                line_has_items = true;
            }
            if layout.counter_sizing == AxisSizing::Auto {
                height = pad.top + line_top + line_height + pad.bottom;
            }
        }
        (LayoutMode::None, _) => return Ok(()),
    }

    for (item, (x, y)) in items.iter().zip(positions) {
        if let Some(child) = doc.get_mut(&item.id) {
            child.x = x;
            child.y = y;
        }
    }
    if let Some(node) = doc.get_mut(frame) {
        node.resize(width, height);
    }
    Ok(())
}

/// Total length of `sizes` laid end to end with `spacing` between them.
fn span(sizes: impl Iterator<Item = f32>, spacing: f32) -> f32 {
    let (total, count) = sizes.fold((0.0, 0usize), |(sum, n), s| (sum + s, n + 1));
    if count == 0 {
        0.0
    } else {
        total + spacing * (count - 1) as f32
    }
}
