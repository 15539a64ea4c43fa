//! The document arena: nodes, pages, selection and the canvas camera.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use super::node::{FrameProps, InstanceProps, Node, NodeId, NodeKind, PageProps, ShapeProps};
use super::paint::Paint;
use super::text::{Mixed, TextProps};
use crate::fonts::LoadedFont;
use crate::viewport::{Bounds, CanvasView, Viewport};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Document has no pages")]
    NoPages,

    #[error("Duplicate node id: {0}")]
    DuplicateId(NodeId),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node {0} is not a page")]
    NotAPage(NodeId),

    #[error("Node {0} cannot have children")]
    NotAContainer(NodeId),

    #[error("Node {0} is not a component")]
    NotAComponent(NodeId),

    #[error("Pages can only be top-level: {0}")]
    NestedPage(NodeId),

    #[error("Appending {child} to {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    #[error("Instance {instance} references missing component {component}")]
    MissingComponent { instance: NodeId, component: NodeId },
}

/// Nested, serializable form of a node and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTree {
    pub id: NodeId,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeTree>,
}

fn default_true() -> bool {
    true
}

/// Nested, serializable form of a whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTree {
    #[serde(default)]
    pub name: String,
    pub pages: Vec<NodeTree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas: Option<CanvasView>,
}

#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    nodes: HashMap<NodeId, Node>,
    pages: Vec<NodeId>,
    current_page: NodeId,
    next_id: u64,
    canvas: CanvasView,
}

impl Document {
    /// Create a document with a single empty page.
    pub fn new(name: impl Into<String>) -> Self {
        let page_id = NodeId::new("0:1");
        let page = Node::new(page_id.clone(), "Page 1", NodeKind::Page(PageProps::default()));
        let mut nodes = HashMap::new();
        nodes.insert(page_id.clone(), page);
        Self {
            name: name.into(),
            nodes,
            pages: vec![page_id.clone()],
            current_page: page_id,
            next_id: 1,
            canvas: CanvasView::default(),
        }
    }

    pub fn from_tree(tree: DocumentTree) -> Result<Self, DocumentError> {
        if tree.pages.is_empty() {
            return Err(DocumentError::NoPages);
        }

        let mut doc = Self {
            name: tree.name,
            nodes: HashMap::new(),
            pages: Vec::with_capacity(tree.pages.len()),
            current_page: tree.pages[0].id.clone(),
            next_id: 1,
            canvas: tree.canvas.unwrap_or_default(),
        };

        for page in tree.pages {
            if !matches!(page.kind, NodeKind::Page(_)) {
                return Err(DocumentError::NotAPage(page.id));
            }
            doc.pages.push(page.id.clone());
            doc.insert_tree(page, None)?;
        }

        for node in doc.nodes.values() {
            if let NodeKind::Instance(instance) = &node.kind {
                let resolves = doc
                    .nodes
                    .get(&instance.main_component)
                    .is_some_and(|n| matches!(n.kind, NodeKind::Component(_)));
                if !resolves {
                    return Err(DocumentError::MissingComponent {
                        instance: node.id.clone(),
                        component: instance.main_component.clone(),
                    });
                }
            }
        }

        if let Some(current) = tree.current_page {
            doc.set_current_page(&current)?;
        }
        Ok(doc)
    }

    fn insert_tree(&mut self, tree: NodeTree, parent: Option<NodeId>) -> Result<(), DocumentError> {
        if self.nodes.contains_key(&tree.id) {
            return Err(DocumentError::DuplicateId(tree.id));
        }
        if parent.is_some() && matches!(tree.kind, NodeKind::Page(_)) {
            return Err(DocumentError::NestedPage(tree.id));
        }
        if !tree.children.is_empty() && !tree.kind.can_have_children() {
            return Err(DocumentError::NotAContainer(tree.id));
        }

        let id = tree.id.clone();
        let children: Vec<NodeId> = tree.children.iter().map(|c| c.id.clone()).collect();
        self.nodes.insert(
            id.clone(),
            Node {
                id: id.clone(),
                name: tree.name,
                visible: tree.visible,
                locked: tree.locked,
                parent,
                children,
                x: tree.x,
                y: tree.y,
                width: tree.width,
                height: tree.height,
                kind: tree.kind,
            },
        );
        for child in tree.children {
            self.insert_tree(child, Some(id.clone()))?;
        }
        Ok(())
    }

    /// Nested form of every page; detached nodes are not included.
    pub fn to_tree(&self) -> DocumentTree {
        DocumentTree {
            name: self.name.clone(),
            pages: self.pages.iter().filter_map(|id| self.subtree(id)).collect(),
            current_page: Some(self.current_page.clone()),
            canvas: Some(self.canvas),
        }
    }

    pub fn subtree(&self, id: &NodeId) -> Option<NodeTree> {
        let node = self.nodes.get(id)?;
        Some(NodeTree {
            id: node.id.clone(),
            name: node.name.clone(),
            visible: node.visible,
            locked: node.locked,
            x: node.x,
            y: node.y,
            width: node.width,
            height: node.height,
            kind: node.kind.clone(),
            children: node
                .children
                .iter()
                .filter_map(|child| self.subtree(child))
                .collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    fn node(&self, id: &NodeId) -> Result<&Node, DocumentError> {
        self.nodes
            .get(id)
            .ok_or_else(|| DocumentError::NodeNotFound(id.clone()))
    }

    fn node_mut(&mut self, id: &NodeId) -> Result<&mut Node, DocumentError> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| DocumentError::NodeNotFound(id.clone()))
    }

    pub fn children(&self, id: &NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn pages(&self) -> &[NodeId] {
        &self.pages
    }

    pub fn current_page(&self) -> &NodeId {
        &self.current_page
    }

    pub fn set_current_page(&mut self, page: &NodeId) -> Result<(), DocumentError> {
        match self.node(page)?.kind {
            NodeKind::Page(_) => {
                self.current_page = page.clone();
                Ok(())
            }
            _ => Err(DocumentError::NotAPage(page.clone())),
        }
    }

    /// Find a page by id, falling back to an exact name match.
    pub fn find_page(&self, id_or_name: &str) -> Option<&NodeId> {
        self.pages
            .iter()
            .find(|id| id.as_str() == id_or_name)
            .or_else(|| {
                self.pages.iter().find(|id| {
                    self.nodes
                        .get(id)
                        .is_some_and(|node| node.name == id_or_name)
                })
            })
    }

    pub fn canvas(&self) -> &CanvasView {
        &self.canvas
    }

    /// Screen size used when fitting nodes into view.
    pub fn set_screen(&mut self, screen: Viewport) {
        self.canvas.screen = screen;
    }

    fn generate_id(&mut self) -> NodeId {
        loop {
            let id = NodeId::new(format!("{}:{}", self.pages.len() + 1000, self.next_id));
            self.next_id += 1;
            if !self.nodes.contains_key(&id) {
                return id;
            }
        }
    }

    fn insert_detached(&mut self, name: &str, kind: NodeKind) -> NodeId {
        let id = self.generate_id();
        self.nodes.insert(id.clone(), Node::new(id.clone(), name, kind));
        id
    }

    pub fn create_page(&mut self, name: &str) -> NodeId {
        let id = self.insert_detached(name, NodeKind::Page(PageProps::default()));
        self.pages.push(id.clone());
        id
    }

    /// Frames start with a white fill, like a host-created frame.
    pub fn create_frame(&mut self, name: &str) -> NodeId {
        let frame = FrameProps {
            fills: vec![Paint::solid(super::paint::Rgb::new(1.0, 1.0, 1.0))],
            ..FrameProps::default()
        };
        self.insert_detached(name, NodeKind::Frame(frame))
    }

    pub fn create_rectangle(&mut self, name: &str) -> NodeId {
        self.insert_detached(name, NodeKind::Shape(ShapeProps::default()))
    }

    /// Create a text node; requires the font to have been resolved first.
    pub fn create_text(&mut self, font: &LoadedFont, font_size: f32, characters: &str) -> NodeId {
        let text = TextProps {
            characters: characters.to_string(),
            font_name: Mixed::Uniform(font.name().clone()),
            font_size: Mixed::Uniform(font_size),
            line_height: Mixed::default(),
            letter_spacing: Mixed::default(),
            fills: vec![Paint::solid(super::paint::Rgb::new(0.0, 0.0, 0.0))],
            text_align: Default::default(),
            auto_resize: Default::default(),
        };
        let name: String = characters.chars().take(64).collect();
        self.insert_detached(&name, NodeKind::Text(text))
    }

    /// Create a detached instance of `component`, deep-copying its subtree.
    pub fn create_instance(&mut self, component: &NodeId) -> Result<NodeId, DocumentError> {
        let source = self.node(component)?;
        let NodeKind::Component(frame) = &source.kind else {
            return Err(DocumentError::NotAComponent(component.clone()));
        };
        let kind = NodeKind::Instance(InstanceProps {
            main_component: component.clone(),
            frame: frame.clone(),
        });
        let source = source.clone();

        let id = self.generate_id();
        let mut instance = source.clone();
        instance.id = id.clone();
        instance.parent = None;
        instance.x = 0.0;
        instance.y = 0.0;
        instance.kind = kind;
        instance.children = Vec::with_capacity(source.children.len());
        self.nodes.insert(id.clone(), instance);

        for child in &source.children {
            let copy = self.clone_subtree(child, &id)?;
            self.node_mut(&id)?.children.push(copy);
        }
        Ok(id)
    }

    fn clone_subtree(&mut self, source: &NodeId, parent: &NodeId) -> Result<NodeId, DocumentError> {
        let original = self.node(source)?.clone();
        let id = self.generate_id();
        let mut copy = original.clone();
        copy.id = id.clone();
        copy.parent = Some(parent.clone());
        copy.children = Vec::with_capacity(original.children.len());
        // A nested master is copied as an instance of itself.
        if let NodeKind::Component(frame) = &original.kind {
            copy.kind = NodeKind::Instance(InstanceProps {
                main_component: source.clone(),
                frame: frame.clone(),
            });
        }
        self.nodes.insert(id.clone(), copy);
        for child in &original.children {
            let child_copy = self.clone_subtree(child, &id)?;
            self.node_mut(&id)?.children.push(child_copy);
        }
        Ok(id)
    }

    fn is_ancestor(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let mut cursor = Some(node.clone());
        while let Some(id) = cursor {
            if &id == ancestor {
                return true;
            }
            cursor = self.nodes.get(&id).and_then(|n| n.parent.clone());
        }
        false
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), DocumentError> {
        if !self.node(parent)?.kind.can_have_children() {
            return Err(DocumentError::NotAContainer(parent.clone()));
        }
        if matches!(self.node(child)?.kind, NodeKind::Page(_)) {
            return Err(DocumentError::NestedPage(child.clone()));
        }
        if self.is_ancestor(child, parent) {
            return Err(DocumentError::Cycle {
                parent: parent.clone(),
                child: child.clone(),
            });
        }

        if let Some(old_parent) = self.node(child)?.parent.clone() {
            if let Some(old) = self.nodes.get_mut(&old_parent) {
                old.children.retain(|c| c != child);
            }
        }
        self.node_mut(child)?.parent = Some(parent.clone());
        self.node_mut(parent)?.children.push(child.clone());
        Ok(())
    }

    /// First descendant of `root` (pre-order, root excluded) matching `predicate`.
    pub fn find_one<F>(&self, root: &NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Node) -> bool,
    {
        let mut stack: Vec<&NodeId> = self.children(root).iter().rev().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if predicate(node) {
                return Some(id.clone());
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    pub fn selection(&self, page: &NodeId) -> &[NodeId] {
        match self.nodes.get(page).map(|n| &n.kind) {
            Some(NodeKind::Page(props)) => &props.selection,
            _ => &[],
        }
    }

    pub fn set_selection(&mut self, page: &NodeId, nodes: Vec<NodeId>) -> Result<(), DocumentError> {
        match &mut self.node_mut(page)?.kind {
            NodeKind::Page(props) => {
                props.selection = nodes;
                Ok(())
            }
            _ => Err(DocumentError::NotAPage(page.clone())),
        }
    }

    /// Bounds in page coordinates; child positions are relative to their parent.
    pub fn absolute_bounds(&self, id: &NodeId) -> Option<Bounds> {
        let node = self.nodes.get(id)?;
        let (mut x, mut y) = (node.x, node.y);
        let mut parent = node.parent.as_ref();
        while let Some(pid) = parent {
            let p = self.nodes.get(pid)?;
            if matches!(p.kind, NodeKind::Page(_)) {
                break;
            }
            x += p.x;
            y += p.y;
            parent = p.parent.as_ref();
        }
        Some(Bounds {
            x,
            y,
            width: node.width,
            height: node.height,
        })
    }

    /// Center the canvas on the union of `nodes` and zoom to fit.
    pub fn scroll_and_zoom_into_view(&mut self, nodes: &[NodeId]) -> Result<(), DocumentError> {
        let mut union: Option<Bounds> = None;
        for id in nodes {
            let bounds = self
                .absolute_bounds(id)
                .ok_or_else(|| DocumentError::NodeNotFound(id.clone()))?;
            union = Some(match union {
                Some(acc) => acc.union(bounds),
                None => bounds,
            });
        }
        if let Some(bounds) = union {
            self.canvas.fit(bounds);
        }
        Ok(())
    }
}
