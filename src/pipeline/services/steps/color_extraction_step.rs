use crate::error::AppError;
use crate::pipeline::services::color_extractor::{mean_lip_color, mean_skin_color};
use crate::pipeline::services::orchestration::{MakeupContext, ProcessingStep};

/// Measures the mean skin and lip colors inside the masks.
pub struct ColorExtractionStep;

impl ColorExtractionStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ColorExtractionStep {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStep for ColorExtractionStep {
    fn process(&self, context: &mut MakeupContext) -> Result<(), AppError> {
        let masks = context.masks()?;
        let skin = mean_skin_color(&context.image, &masks.face);
        let lip = mean_lip_color(&context.image, &masks.lips);
        tracing::debug!("Measured skin {} and lips {}", skin, lip);

        context.skin_color = Some(skin);
        context.lip_color = Some(lip);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ColorExtractionStep"
    }
}
