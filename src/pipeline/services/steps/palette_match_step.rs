use std::sync::Arc;

use crate::error::AppError;
use crate::pipeline::services::orchestration::{MakeupContext, ProcessingStep};
use crate::pipeline::services::palette_matcher::select_swatches;
use crate::pipeline::types::Palette;

/// Chooses foundation, eyeshadow and lipstick from the shared palette.
pub struct PaletteMatchStep {
    palette: Arc<Palette>,
}

impl PaletteMatchStep {
    pub fn new(palette: Arc<Palette>) -> Self {
        Self { palette }
    }
}

impl ProcessingStep for PaletteMatchStep {
    fn process(&self, context: &mut MakeupContext) -> Result<(), AppError> {
        let (skin, lip) = context.colors()?;
        let swatches = select_swatches(skin, lip, &self.palette)?;
        context.swatches = Some(swatches);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "PaletteMatchStep"
    }
}
