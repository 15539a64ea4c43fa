//! Node tree builders shared by unit tests.

use crate::document::{
    Document, DocumentTree, FrameProps, Mixed, NodeId, NodeKind, NodeTree, PageProps, Paint, Rgb,
    ShapeProps, TextProps,
};
use crate::fonts::FontName;

fn node(id: &str, name: &str, kind: NodeKind, children: Vec<NodeTree>) -> NodeTree {
    NodeTree {
        id: NodeId::new(id),
        name: name.to_string(),
        visible: true,
        locked: false,
        x: 0.0,
        y: 0.0,
        width: 100.0,
        height: 100.0,
        kind,
        children,
    }
}

pub fn rect(id: &str, r: f32, g: f32, b: f32) -> NodeTree {
    node(
        id,
        "Rectangle",
        NodeKind::Shape(ShapeProps {
            fills: vec![Paint::solid(Rgb::new(r, g, b))],
            ..ShapeProps::default()
        }),
        vec![],
    )
}

pub fn text(id: &str, family: &str, style: &str, size: f32, characters: &str) -> NodeTree {
    styled_text(
        id,
        Mixed::Uniform(FontName::new(family, style)),
        Mixed::Uniform(size),
        characters,
    )
}

pub fn styled_text(
    id: &str,
    font_name: Mixed<FontName>,
    font_size: Mixed<f32>,
    characters: &str,
) -> NodeTree {
    node(
        id,
        characters,
        NodeKind::Text(TextProps {
            characters: characters.to_string(),
            font_name,
            font_size,
            line_height: Mixed::default(),
            letter_spacing: Mixed::default(),
            fills: vec![],
            text_align: Default::default(),
            auto_resize: Default::default(),
        }),
        vec![],
    )
}

pub fn frame(id: &str, children: Vec<NodeTree>) -> NodeTree {
    node(id, "Frame", NodeKind::Frame(FrameProps::default()), children)
}

pub fn group(id: &str, children: Vec<NodeTree>) -> NodeTree {
    node(id, "Group", NodeKind::Group, children)
}

pub fn component(id: &str, name: &str, width: f32, children: Vec<NodeTree>) -> NodeTree {
    let mut tree = node(id, name, NodeKind::Component(FrameProps::default()), children);
    tree.width = width;
    tree.height = 40.0;
    tree
}

pub fn hidden(mut tree: NodeTree) -> NodeTree {
    tree.visible = false;
    tree
}

pub fn locked(mut tree: NodeTree) -> NodeTree {
    tree.locked = true;
    tree
}

pub fn page(id: &str, children: Vec<NodeTree>) -> NodeTree {
    node(id, "Page 1", NodeKind::Page(PageProps::default()), children)
}

pub fn document(children: Vec<NodeTree>) -> Document {
    Document::from_tree(DocumentTree {
        name: "Fixture".to_string(),
        pages: vec![page("0:1", children)],
        current_page: None,
        canvas: None,
    })
    .expect("fixture document should be valid")
}
