use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Prefix for environment overrides, e.g. `MAKEUP__RENDER__LIPSTICK_OPACITY=0.5`.
pub const ENV_PREFIX: &str = "MAKEUP";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub palette_path: PathBuf,
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    pub log_level: String,
    pub render: RenderSettings,
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RenderSettings {
    pub foundation_opacity: f32,
    pub lipstick_opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogSettings {
    pub pool_size: usize,
    pub sample_size: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    pub foundation: CatalogQuery,
    pub lipstick: CatalogQuery,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogQuery {
    pub season: String,
    pub skin_type: String,
}

impl CatalogQuery {
    pub fn new(season: impl Into<String>, skin_type: impl Into<String>) -> Self {
        Self {
            season: season.into(),
            skin_type: skin_type.into(),
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            foundation_opacity: 0.3,
            lipstick_opacity: 0.3,
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            pool_size: 10,
            sample_size: 3,
            seed: None,
            foundation: CatalogQuery::new("Summer", "Oily"),
            lipstick: CatalogQuery::new("all seasons", "Dry"),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            palette_path: PathBuf::from("palette.json"),
            catalog_path: None,
            log_level: "info".to_string(),
            render: RenderSettings::default(),
            catalog: CatalogSettings::default(),
        }
    }
}

impl Settings {
    /// Layers built-in defaults, an optional TOML/JSON file and `MAKEUP__*`
    /// environment variables, in that order.
    pub fn load(file: Option<&Path>) -> Result<Self, AppError> {
        let defaults = Settings::default();
        let mut builder = config::Config::builder()
            .set_default("palette_path", defaults.palette_path.display().to_string())?
            .set_default("log_level", defaults.log_level.clone())?
            .set_default(
                "render.foundation_opacity",
                defaults.render.foundation_opacity as f64,
            )?
            .set_default(
                "render.lipstick_opacity",
                defaults.render.lipstick_opacity as f64,
            )?
            .set_default("catalog.pool_size", defaults.catalog.pool_size as u64)?
            .set_default("catalog.sample_size", defaults.catalog.sample_size as u64)?
            .set_default("catalog.foundation.season", defaults.catalog.foundation.season)?
            .set_default(
                "catalog.foundation.skin_type",
                defaults.catalog.foundation.skin_type,
            )?
            .set_default("catalog.lipstick.season", defaults.catalog.lipstick.season)?
            .set_default(
                "catalog.lipstick.skin_type",
                defaults.catalog.lipstick.skin_type,
            )?;

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), AppError> {
        for (name, value) in [
            ("render.foundation_opacity", self.render.foundation_opacity),
            ("render.lipstick_opacity", self.render.lipstick_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AppError::InvalidSettings(format!(
                    "{name} must be between 0.0 and 1.0, got {value}"
                )));
            }
        }

        if self.catalog.pool_size == 0 {
            return Err(AppError::InvalidSettings(
                "catalog.pool_size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn with_palette_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.palette_path = path.into();
        self
    }

    pub fn with_render(mut self, render: RenderSettings) -> Self {
        self.render = render;
        self
    }
}
