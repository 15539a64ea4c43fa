//! Collector: walks a node tree and aggregates colors, text styles and components.
//!
//! Traversal is depth-first and pre-order. A locked or hidden node prunes its
//! whole subtree. Nodes lacking a capability (fills, text, children) simply do
//! not contribute; collection never fails.

mod aggregates;


pub use aggregates::{
    ColorEntry, ComponentEntry, DesignInventory, InventoryStats, TextStyleEntry, MIXED_KEY,
    MIXED_LABEL,
};

use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

use crate::color::rgb_to_hex;
use crate::document::{Document, Mixed, Node, NodeId, NodeKind, TextProps};

/// Default number of characters kept as a typography sample.
pub const DEFAULT_SAMPLE_LENGTH: usize = 50;
/// Sample used when the first text node of a style is empty.
pub const DEFAULT_SAMPLE_FALLBACK: &str = "Sample text";

#[derive(Debug, Clone)]
pub struct CollectOptions {
    pub sample_length: usize,
    pub sample_fallback: String,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            sample_length: DEFAULT_SAMPLE_LENGTH,
            sample_fallback: DEFAULT_SAMPLE_FALLBACK.to_string(),
        }
    }
}

/// Collect from the top-level children of `page`.
pub fn collect_page(doc: &Document, page: &NodeId, options: &CollectOptions) -> DesignInventory {
    collect(doc, doc.children(page), options)
}

/// Collect from `roots` and their subtrees.
pub fn collect(doc: &Document, roots: &[NodeId], options: &CollectOptions) -> DesignInventory {
    let mut collector = Collector::new(options);
    for root in roots {
        collector.visit(doc, root);
    }
    let inventory = collector.finish();
    debug!(
        colors = inventory.colors.len(),
        text_styles = inventory.text_styles.len(),
        components = inventory.components.len(),
        "collection finished"
    );
    inventory
}

struct Collector<'o> {
    options: &'o CollectOptions,
    colors: Vec<ColorEntry>,
    color_index: HashMap<String, usize>,
    text_styles: Vec<TextStyleEntry>,
    style_index: HashMap<String, usize>,
    components: Vec<ComponentEntry>,
    component_index: HashMap<NodeId, usize>,
}

impl<'o> Collector<'o> {
    fn new(options: &'o CollectOptions) -> Self {
        Self {
            options,
            colors: Vec::new(),
            color_index: HashMap::new(),
            text_styles: Vec::new(),
            style_index: HashMap::new(),
            components: Vec::new(),
            component_index: HashMap::new(),
        }
    }

    fn visit(&mut self, doc: &Document, id: &NodeId) {
        let Some(node) = doc.get(id) else {
            return;
        };
        if node.is_pruned() {
            return;
        }

        self.record_fills(node);
        match &node.kind {
            NodeKind::Text(text) => self.record_text(text),
            NodeKind::Component(_) => self.record_component(node),
            _ => {}
        }

        if node.kind.can_have_children() {
            for child in &node.children {
                self.visit(doc, child);
            }
        }
    }

    fn record_fills(&mut self, node: &Node) {
        let Some(fills) = node.kind.fills() else {
            return;
        };
        for color in fills.iter().filter_map(|paint| paint.visible_solid_color()) {
            let hex = rgb_to_hex(&color);
            let idx = match self.color_index.get(&hex) {
                Some(&idx) => idx,
                None => {
                    self.colors.push(ColorEntry {
                        hex: hex.clone(),
                        count: 0,
                        nodes: Vec::new(),
                    });
                    self.color_index.insert(hex, self.colors.len() - 1);
                    self.colors.len() - 1
                }
            };
            let entry = &mut self.colors[idx];
            entry.count += 1;
            entry.nodes.push(node.id.clone());
        }
    }

    fn record_text(&mut self, text: &TextProps) {
        let (family, weight_key, weight) = match &text.font_name {
            Mixed::Uniform(font) => (font.family.clone(), font.style.clone(), font.style.clone()),
            Mixed::Mixed => (
                MIXED_LABEL.to_string(),
                MIXED_KEY.to_string(),
                MIXED_LABEL.to_string(),
            ),
        };
        let key = format!("{}-{}-{}", family, text.font_size, weight_key);

        if let Some(&idx) = self.style_index.get(&key) {
            self.text_styles[idx].count += 1;
            return;
        }

        self.text_styles.push(TextStyleEntry {
            key: key.clone(),
            family,
            size: text.font_size,
            weight,
            line_height: text.line_height,
            letter_spacing: text.letter_spacing,
            count: 1,
            sample: self.sample(&text.characters),
        });
        self.style_index.insert(key, self.text_styles.len() - 1);
    }

    fn sample(&self, characters: &str) -> String {
        let sample: String = characters.chars().take(self.options.sample_length).collect();
        if sample.is_empty() {
            self.options.sample_fallback.clone()
        } else {
            sample
        }
    }

    fn record_component(&mut self, node: &Node) {
        if self.component_index.contains_key(&node.id) {
            return;
        }
        self.components.push(ComponentEntry {
            id: node.id.clone(),
            name: node.name.clone(),
            width: node.width,
            height: node.height,
        });
        self.component_index
            .insert(node.id.clone(), self.components.len() - 1);
    }

    fn finish(mut self) -> DesignInventory {
        // Both sorts are stable, so ties keep encounter order.
        self.colors.sort_by(|a, b| b.count.cmp(&a.count));
        self.text_styles.sort_by(|a, b| {
            b.sort_size()
                .partial_cmp(&a.sort_size())
                .unwrap_or(Ordering::Equal)
        });
        DesignInventory {
            colors: self.colors,
            text_styles: self.text_styles,
            components: self.components,
        }
    }
}
