//! Paint descriptors attached to fillable nodes.

use serde::{Deserialize, Serialize};

/// RGB color with channels in the 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// A single paint in a node's `fills` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    Solid(SolidPaint),
    GradientLinear(OpaquePaint),
    GradientRadial(OpaquePaint),
    Image(OpaquePaint),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidPaint {
    pub color: Rgb,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

/// Non-solid paints are carried through untouched; only visibility matters here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OpaquePaint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

impl Paint {
    pub fn solid(color: Rgb) -> Self {
        Paint::Solid(SolidPaint {
            color,
            visible: None,
            opacity: None,
        })
    }

    /// Returns the color of a solid paint that is not explicitly hidden.
    pub fn visible_solid_color(&self) -> Option<Rgb> {
        match self {
            Paint::Solid(solid) if solid.visible != Some(false) => Some(solid.color),
            _ => None,
        }
    }
}
