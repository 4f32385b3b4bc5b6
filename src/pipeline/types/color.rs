//! Canonical RGB colors and the channel-order boundary.
//!
//! Every [`Color`] is stored in RGB order. Image buffers may be RGB or BGR
//! (see [`ChannelOrder`]); converting between the two happens only through
//! [`Color::to_native`] and [`Color::from_native`].
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::HexParseError;

/// Factor applied per darkening step.
pub const DARKEN_FACTOR: f64 = 0.9;

/// Three 8-bit channels in RGB order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Channel layout of an image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness: `0.299R + 0.587G + 0.114B`.
    pub fn brightness(&self) -> f64 {
        0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64
    }

    /// Unweighted Euclidean distance in RGB space.
    pub fn distance(&self, other: &Color) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    pub fn is_black(&self) -> bool {
        *self == Self::BLACK
    }

    /// Channels laid out in `order`, ready to be written into an image buffer.
    pub fn to_native(self, order: ChannelOrder) -> [u8; 3] {
        match order {
            ChannelOrder::Rgb => [self.r, self.g, self.b],
            ChannelOrder::Bgr => [self.b, self.g, self.r],
        }
    }

    /// Reads channels laid out in `order` back into RGB.
    pub fn from_native(channels: [u8; 3], order: ChannelOrder) -> Self {
        match order {
            ChannelOrder::Rgb => Self::new(channels[0], channels[1], channels[2]),
            ChannelOrder::Bgr => Self::new(channels[2], channels[1], channels[0]),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&rgb_to_hex(*self))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        rgb_to_hex(color)
    }
}

impl TryFrom<String> for Color {
    type Error = HexParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        hex_to_rgb(&value)
    }
}

impl From<[u8; 3]> for Color {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// Parses six hex digits, optionally prefixed with `#` or `0x`.
pub fn hex_to_rgb(input: &str) -> Result<Color, HexParseError> {
    let trimmed = input.trim();
    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(HexParseError(input.to_string()));
    }

    let byte = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| HexParseError(input.to_string()))
    };
    Ok(Color::new(byte(0..2)?, byte(2..4)?, byte(4..6)?))
}

/// Formats as lowercase `#rrggbb`.
pub fn rgb_to_hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// One darkening step: every channel multiplied by `factor` and floored.
pub fn darken_color(color: Color, factor: f64) -> Color {
    let scale = |c: u8| (c as f64 * factor).floor().clamp(0.0, 255.0) as u8;
    Color::new(scale(color.r), scale(color.g), scale(color.b))
}
