use thiserror::Error;

use crate::pipeline::types::SwatchCategory;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No face detected in the input image")]
    NoFaceDetected,
    #[error("Palette Error: {0}")]
    Palette(#[from] PaletteError),
    #[error("Catalog Error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Configuration Error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    InvalidSettings(String),
    #[error("Image Error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("Pipeline Error: {0}")]
    Pipeline(String),
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
}

// Palette Error Type
#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("Failed to read palette file {1}: {0}")]
    Io(std::io::Error, String),
    #[error("Failed to parse palette: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Malformed hex color {value:?} at {category}[{index}]")]
    MalformedHex {
        category: SwatchCategory,
        index: usize,
        value: String,
    },
    #[error("Palette category {0} has no colors")]
    EmptyCategory(SwatchCategory),
}

// Catalog Error Type
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file {1}: {0}")]
    Io(std::io::Error, String),
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Malformed hex color: {0:?}")]
pub struct HexParseError(pub String);
