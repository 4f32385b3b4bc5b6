use std::sync::Arc;

use crate::error::AppError;
use crate::pipeline::services::mask_builder::MaskBuilder;
use crate::pipeline::services::orchestration::{MakeupContext, ProcessingStep};
use crate::pipeline::types::FeatureRegions;

/// Builds the skin and lips masks from the request's landmarks.
pub struct MaskStep {
    regions: Arc<FeatureRegions>,
}

impl MaskStep {
    pub fn new(regions: Arc<FeatureRegions>) -> Self {
        Self { regions }
    }
}

impl ProcessingStep for MaskStep {
    fn process(&self, context: &mut MakeupContext) -> Result<(), AppError> {
        let (width, height) = context.image.dimensions();
        let masks = MaskBuilder::new(&self.regions).build_masks(&context.landmarks, width, height);
        context.masks = Some(masks);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "MaskStep"
    }
}
