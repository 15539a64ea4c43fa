//! Text node properties, including the `mixed` sentinel for per-character styling.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::paint::Paint;
use crate::fonts::FontName;

/// Serialized marker for a property that varies across a text node's characters.
pub const MIXED_MARKER: &str = "mixed";

/// A text property that is either uniform across the node or mixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mixed<T> {
    Uniform(T),
    Mixed,
}

impl<T> Mixed<T> {
    pub fn uniform(&self) -> Option<&T> {
        match self {
            Mixed::Uniform(value) => Some(value),
            Mixed::Mixed => None,
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, Mixed::Mixed)
    }
}

impl<T: Default> Default for Mixed<T> {
    fn default() -> Self {
        Mixed::Uniform(T::default())
    }
}

impl<T: fmt::Display> fmt::Display for Mixed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mixed::Uniform(value) => value.fmt(f),
            Mixed::Mixed => f.write_str(MIXED_MARKER),
        }
    }
}

impl<T: Serialize> Serialize for Mixed<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Mixed::Uniform(value) => value.serialize(serializer),
            Mixed::Mixed => serializer.serialize_str(MIXED_MARKER),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MixedRepr<T> {
    Value(T),
    Marker(String),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Mixed<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match MixedRepr::<T>::deserialize(deserializer)? {
            MixedRepr::Value(value) => Ok(Mixed::Uniform(value)),
            MixedRepr::Marker(marker) if marker.eq_ignore_ascii_case(MIXED_MARKER) => {
                Ok(Mixed::Mixed)
            }
            MixedRepr::Marker(other) => Err(de::Error::custom(format!(
                "expected a value or \"{MIXED_MARKER}\", got \"{other}\""
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineHeight {
    #[default]
    Auto,
    Pixels(f32),
    Percent(f32),
}

impl LineHeight {
    /// Resolved line height in pixels for a given font size.
    pub fn to_pixels(self, font_size: f32) -> f32 {
        match self {
            LineHeight::Auto => font_size * 1.2,
            LineHeight::Pixels(px) => px,
            LineHeight::Percent(pct) => font_size * pct / 100.0,
        }
    }
}

impl fmt::Display for LineHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineHeight::Auto => f.write_str("auto"),
            LineHeight::Pixels(px) => write!(f, "{px}px"),
            LineHeight::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LetterSpacingUnit {
    Pixels,
    #[default]
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LetterSpacing {
    pub value: f32,
    pub unit: LetterSpacingUnit,
}

impl fmt::Display for LetterSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            LetterSpacingUnit::Pixels => write!(f, "{}px", self.value),
            LetterSpacingUnit::Percent => write!(f, "{}%", self.value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// How a text box reacts to its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAutoResize {
    #[default]
    WidthAndHeight,
    Height,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    #[serde(default)]
    pub characters: String,
    pub font_name: Mixed<FontName>,
    pub font_size: Mixed<f32>,
    #[serde(default)]
    pub line_height: Mixed<LineHeight>,
    #[serde(default)]
    pub letter_spacing: Mixed<LetterSpacing>,
    #[serde(default)]
    pub fills: Vec<Paint>,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default)]
    pub auto_resize: TextAutoResize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_font_size_parses_from_marker() {
        let size: Mixed<f32> = serde_json::from_str("\"mixed\"").expect("parse");
        assert!(size.is_mixed());
        let size: Mixed<f32> = serde_json::from_str("14").expect("parse");
        assert_eq!(size, Mixed::Uniform(14.0));
    }

    #[test]
    fn mixed_rejects_unknown_marker() {
        let result: Result<Mixed<f32>, _> = serde_json::from_str("\"varies\"");
        assert!(result.is_err());
    }

    #[test]
    fn mixed_serializes_marker() {
        let value: Mixed<FontName> = Mixed::Mixed;
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"mixed\"");
    }

    #[test]
    fn line_height_resolves_pixels() {
        assert!((LineHeight::Auto.to_pixels(10.0) - 12.0).abs() < f32::EPSILON);
        assert!((LineHeight::Pixels(24.0).to_pixels(10.0) - 24.0).abs() < f32::EPSILON);
        assert!((LineHeight::Percent(150.0).to_pixels(10.0) - 15.0).abs() < f32::EPSILON);
    }

    #[test]
    fn line_height_uses_unit_tag() {
        let lh: LineHeight =
            serde_json::from_str(r#"{"unit":"PIXELS","value":24}"#).expect("parse");
        assert_eq!(lh, LineHeight::Pixels(24.0));
        let auto: LineHeight = serde_json::from_str(r#"{"unit":"AUTO"}"#).expect("parse");
        assert_eq!(auto, LineHeight::Auto);
    }
}
