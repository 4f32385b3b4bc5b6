pub mod color_extraction_step;
pub mod composite_step;
pub mod mask_step;
pub mod palette_match_step;

pub use color_extraction_step::ColorExtractionStep;
pub use composite_step::CompositeStep;
pub use mask_step::MaskStep;
pub use palette_match_step::PaletteMatchStep;
