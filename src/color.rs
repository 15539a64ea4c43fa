//! Hex conversions for fill colors.
//!
//! Channels are quantized to 8 bits, so `hex_to_rgb(rgb_to_hex(c))` is within
//! 1/255 of `c` per channel rather than exactly equal.

use palette::Srgb;
use thiserror::Error;

use crate::document::Rgb;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Invalid hex color '{0}': expected #RRGGBB")]
    InvalidFormat(String),
    #[error("Invalid hex digits in '{0}'")]
    InvalidDigits(String),
}

/// Quantize a float color to bytes. Out-of-range channels are clamped and NaN maps to 0.
pub fn quantize(color: &Rgb) -> Srgb<u8> {
    let channel = |v: f32| -> f32 {
        if v.is_nan() {
            0.0
        } else {
            v.clamp(0.0, 1.0)
        }
    };
    Srgb::new(channel(color.r), channel(color.g), channel(color.b)).into_format::<u8>()
}

/// Uppercase `#RRGGBB` key for a float color, e.g. `(1.0, 0.0, 0.0)` -> `#FF0000`.
pub fn rgb_to_hex(color: &Rgb) -> String {
    let rgb = quantize(color);
    format!("#{:02X}{:02X}{:02X}", rgb.red, rgb.green, rgb.blue)
}

/// Inverse of [`rgb_to_hex`]: each channel is parsed and divided by 255.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorParseError> {
    let digits = hex
        .strip_prefix('#')
        .filter(|d| d.len() == 6 && d.is_ascii())
        .ok_or_else(|| ColorParseError::InvalidFormat(hex.to_string()))?;

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| ColorParseError::InvalidDigits(hex.to_string()))
    };
    let bytes = Srgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?);
    let float: Srgb<f32> = bytes.into_format();
    Ok(Rgb::new(float.red, float.green, float.blue))
}
