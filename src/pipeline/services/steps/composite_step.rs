use crate::config::RenderSettings;
use crate::error::AppError;
use crate::pipeline::services::compositor::composite;
use crate::pipeline::services::orchestration::{MakeupContext, ProcessingStep};

/// Paints the foundation over the skin mask, then the lipstick over the lips
/// mask of the foundation-tinted image.
pub struct CompositeStep {
    render: RenderSettings,
}

impl CompositeStep {
    pub fn new(render: RenderSettings) -> Self {
        Self { render }
    }
}

impl ProcessingStep for CompositeStep {
    fn process(&self, context: &mut MakeupContext) -> Result<(), AppError> {
        let masks = context.masks()?;
        let swatches = context.swatches()?;

        let with_foundation = composite(
            &context.image,
            &masks.face,
            swatches.foundation,
            self.render.foundation_opacity,
        );
        let rendered = composite(
            &with_foundation,
            &masks.lips,
            swatches.lipstick,
            self.render.lipstick_opacity,
        );

        context.rendered = Some(rendered);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "CompositeStep"
    }
}
