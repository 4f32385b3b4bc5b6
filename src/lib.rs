pub mod catalog;
pub mod config;
pub mod error;
pub mod pipeline;

pub use catalog::{Catalog, Product, ProductSummary, Recommendations};
pub use config::Settings;
pub use error::{AppError, CatalogError, PaletteError};
pub use pipeline::{MakeupEngine, MakeupService};
