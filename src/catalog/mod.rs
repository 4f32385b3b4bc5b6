//! Product recommendations from a season/skin-type tagged catalog.
mod product;
mod recommender;

pub use product::{Product, ProductSummary};
pub use recommender::{contains_word, recommend, recommend_with_rng};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{CatalogQuery, CatalogSettings};
use crate::error::CatalogError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, alias = "Foundation")]
    pub foundation: Vec<Product>,
    #[serde(default, alias = "Lipstick")]
    pub lipstick: Vec<Product>,
}

/// Foundation and lipstick picks for one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recommendations {
    pub foundation: Vec<ProductSummary>,
    pub lipstick: Vec<ProductSummary>,
}

impl Catalog {
    pub fn new(foundation: Vec<Product>, lipstick: Vec<Product>) -> Self {
        Self {
            foundation,
            lipstick,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(e, path.display().to_string()))?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            foundation = catalog.foundation.len(),
            lipstick = catalog.lipstick.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    pub fn recommend_foundation(
        &self,
        query: &CatalogQuery,
        settings: &CatalogSettings,
    ) -> Vec<ProductSummary> {
        recommend(
            &self.foundation,
            &query.season,
            &query.skin_type,
            settings.pool_size,
            settings.sample_size,
            settings.seed,
        )
    }

    pub fn recommend_lipstick(
        &self,
        query: &CatalogQuery,
        settings: &CatalogSettings,
    ) -> Vec<ProductSummary> {
        recommend(
            &self.lipstick,
            &query.season,
            &query.skin_type,
            settings.pool_size,
            settings.sample_size,
            settings.seed,
        )
    }

    /// Runs both categories with the queries configured in `settings`.
    pub fn recommend_all(&self, settings: &CatalogSettings) -> Recommendations {
        Recommendations {
            foundation: self.recommend_foundation(&settings.foundation, settings),
            lipstick: self.recommend_lipstick(&settings.lipstick, settings),
        }
    }
}
