use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use super::color::{hex_to_rgb, Color};
use crate::error::PaletteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwatchCategory {
    Foundation,
    Eyeshadow,
    Lipstick,
}

impl fmt::Display for SwatchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SwatchCategory::Foundation => "foundation",
            SwatchCategory::Eyeshadow => "eyeshadow",
            SwatchCategory::Lipstick => "lipstick",
        };
        f.write_str(name)
    }
}

/// Palette entry as it appears in the JSON source.
#[derive(Debug, Clone, Deserialize)]
struct SwatchEntry {
    hex: String,
    #[serde(default)]
    name: Option<String>,
}

/// All three lists are required so a misspelled key fails at load time.
#[derive(Debug, Deserialize)]
struct PaletteFile {
    foundation_colors: Vec<SwatchEntry>,
    eyeshadow_colors: Vec<SwatchEntry>,
    lipstick_colors: Vec<SwatchEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Swatch {
    pub color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Swatch {
    pub fn new(color: Color) -> Self {
        Self { color, name: None }
    }

    pub fn named(color: Color, name: impl Into<String>) -> Self {
        Self {
            color,
            name: Some(name.into()),
        }
    }
}

/// The three colors chosen for a face, all in RGB.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Swatches {
    pub foundation: Color,
    pub eyeshadow: Color,
    pub lipstick: Color,
    /// How many darkening steps the lipstick went through.
    pub lipstick_darken_steps: u32,
}

/// Candidate colors per cosmetic category, in source order.
///
/// Hex strings are parsed when the palette is built, so a loaded palette only
/// ever holds valid colors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Palette {
    pub foundation: Vec<Swatch>,
    pub eyeshadow: Vec<Swatch>,
    pub lipstick: Vec<Swatch>,
}

impl Palette {
    pub fn new(foundation: Vec<Swatch>, eyeshadow: Vec<Swatch>, lipstick: Vec<Swatch>) -> Self {
        Self {
            foundation,
            eyeshadow,
            lipstick,
        }
    }

    pub fn from_colors(foundation: &[Color], eyeshadow: &[Color], lipstick: &[Color]) -> Self {
        let wrap = |colors: &[Color]| colors.iter().copied().map(Swatch::new).collect();
        Self::new(wrap(foundation), wrap(eyeshadow), wrap(lipstick))
    }

    pub fn from_json_str(json: &str) -> Result<Self, PaletteError> {
        let file: PaletteFile = serde_json::from_str(json)?;
        Ok(Self {
            foundation: parse_entries(SwatchCategory::Foundation, file.foundation_colors)?,
            eyeshadow: parse_entries(SwatchCategory::Eyeshadow, file.eyeshadow_colors)?,
            lipstick: parse_entries(SwatchCategory::Lipstick, file.lipstick_colors)?,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PaletteError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| PaletteError::Io(e, path.display().to_string()))?;
        let palette = Self::from_json_str(&json)?;

        tracing::info!(
            path = %path.display(),
            foundation = palette.foundation.len(),
            eyeshadow = palette.eyeshadow.len(),
            lipstick = palette.lipstick.len(),
            "Loaded palette"
        );
        for category in palette.empty_categories() {
            tracing::warn!("Palette category {} is empty; matching will fail", category);
        }
        Ok(palette)
    }

    pub fn category(&self, category: SwatchCategory) -> &[Swatch] {
        match category {
            SwatchCategory::Foundation => &self.foundation,
            SwatchCategory::Eyeshadow => &self.eyeshadow,
            SwatchCategory::Lipstick => &self.lipstick,
        }
    }

    pub fn empty_categories(&self) -> Vec<SwatchCategory> {
        [
            SwatchCategory::Foundation,
            SwatchCategory::Eyeshadow,
            SwatchCategory::Lipstick,
        ]
        .into_iter()
        .filter(|c| self.category(*c).is_empty())
        .collect()
    }
}

fn parse_entries(
    category: SwatchCategory,
    entries: Vec<SwatchEntry>,
) -> Result<Vec<Swatch>, PaletteError> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let color = hex_to_rgb(&entry.hex).map_err(|_| PaletteError::MalformedHex {
                category,
                index,
                value: entry.hex.clone(),
            })?;
            Ok(Swatch {
                color,
                name: entry.name,
            })
        })
        .collect()
}
