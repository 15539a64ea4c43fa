//! Node variants of the host document tree.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::paint::Paint;
use super::text::TextProps;

/// Unique identity of a node within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// Sizing behavior along one axis of an auto-layout frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisSizing {
    #[default]
    Fixed,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub const fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoLayout {
    pub mode: LayoutMode,
    pub primary_sizing: AxisSizing,
    pub counter_sizing: AxisSizing,
    pub item_spacing: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter_axis_spacing: Option<f32>,
    pub padding: Padding,
    pub wrap: bool,
}

impl AutoLayout {
    pub fn vertical(item_spacing: f32) -> Self {
        Self {
            mode: LayoutMode::Vertical,
            primary_sizing: AxisSizing::Auto,
            counter_sizing: AxisSizing::Fixed,
            item_spacing,
            ..Self::default()
        }
    }

    pub fn horizontal_wrap(item_spacing: f32) -> Self {
        Self {
            mode: LayoutMode::Horizontal,
            primary_sizing: AxisSizing::Auto,
            counter_sizing: AxisSizing::Auto,
            item_spacing,
            wrap: true,
            ..Self::default()
        }
    }

    pub fn with_counter_sizing(mut self, sizing: AxisSizing) -> Self {
        self.counter_sizing = sizing;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }
}

/// Properties shared by frames, components and instances.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameProps {
    pub fills: Vec<Paint>,
    pub corner_radius: f32,
    pub layout: AutoLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Polygon,
    Star,
    Vector,
    Line,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapeProps {
    pub shape: ShapeKind,
    pub fills: Vec<Paint>,
    pub corner_radius: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageProps {
    pub selection: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceProps {
    pub main_component: NodeId,
    #[serde(flatten)]
    pub frame: FrameProps,
}

/// Closed set of node variants; traversal dispatches on this tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Page(PageProps),
    Frame(FrameProps),
    Group,
    Shape(ShapeProps),
    Text(TextProps),
    Component(FrameProps),
    Instance(InstanceProps),
}

impl NodeKind {
    /// Fill paints, for variants that can be filled.
    pub fn fills(&self) -> Option<&[Paint]> {
        match self {
            NodeKind::Frame(frame) | NodeKind::Component(frame) => Some(&frame.fills),
            NodeKind::Instance(instance) => Some(&instance.frame.fills),
            NodeKind::Shape(shape) => Some(&shape.fills),
            NodeKind::Text(text) => Some(&text.fills),
            NodeKind::Page(_) | NodeKind::Group => None,
        }
    }

    pub fn can_have_children(&self) -> bool {
        matches!(
            self,
            NodeKind::Page(_)
                | NodeKind::Frame(_)
                | NodeKind::Group
                | NodeKind::Component(_)
                | NodeKind::Instance(_)
        )
    }

    /// Auto-layout settings, for frame-like variants.
    pub fn auto_layout(&self) -> Option<&AutoLayout> {
        match self {
            NodeKind::Frame(frame) | NodeKind::Component(frame) => Some(&frame.layout),
            NodeKind::Instance(instance) => Some(&instance.frame.layout),
            _ => None,
        }
    }
}

/// A node stored in the document arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub visible: bool,
    pub locked: bool,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(id: NodeId, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id,
            name: name.into(),
            visible: true,
            locked: false,
            parent: None,
            children: Vec::new(),
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            kind,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Locked or hidden nodes are pruned together with their subtree.
    pub fn is_pruned(&self) -> bool {
        self.locked || !self.visible
    }
}
