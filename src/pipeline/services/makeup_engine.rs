use std::sync::Arc;

use crate::config::{RenderSettings, Settings};
use crate::error::AppError;
use crate::pipeline::services::orchestration::{
    MakeupContext, ProcessingPipeline, StepInstrumentation,
};
use crate::pipeline::services::steps::{
    ColorExtractionStep, CompositeStep, MaskStep, PaletteMatchStep,
};
use crate::pipeline::types::{FaceImage, FeatureRegions, LandmarkMap, MakeupOutcome, MakeupRequest, Palette};

/// Process-wide handle holding the read-only palette and region table.
///
/// Built once at startup and cloned into request handlers; clones share the
/// same palette.
#[derive(Debug, Clone)]
pub struct MakeupEngine {
    palette: Arc<Palette>,
    regions: Arc<FeatureRegions>,
    render: RenderSettings,
}

impl MakeupEngine {
    pub fn new(palette: Palette, regions: FeatureRegions, render: RenderSettings) -> Self {
        Self {
            palette: Arc::new(palette),
            regions: Arc::new(regions),
            render,
        }
    }

    /// Loads the palette named in `settings`. Malformed palettes fail here,
    /// before any request is served.
    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        let palette = Palette::load(&settings.palette_path)?;
        Ok(Self::new(palette, FeatureRegions::face_mesh(), settings.render))
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn regions(&self) -> &FeatureRegions {
        &self.regions
    }

    pub fn render_settings(&self) -> RenderSettings {
        self.render
    }

    /// Mask → colors → swatches → composite, each step instrumented.
    pub fn pipeline(&self) -> ProcessingPipeline {
        ProcessingPipeline::new()
            .add_step(Box::new(
                MaskStep::new(self.regions.clone()).instrumented("build_masks"),
            ))
            .add_step(Box::new(
                ColorExtractionStep::new().instrumented("extract_colors"),
            ))
            .add_step(Box::new(
                PaletteMatchStep::new(self.palette.clone()).instrumented("match_palette"),
            ))
            .add_step(Box::new(
                CompositeStep::new(self.render).instrumented("composite"),
            ))
    }

    /// Runs the full pipeline for one request.
    pub fn process(&self, request: MakeupRequest) -> Result<MakeupOutcome, AppError> {
        let request_id = request.id;
        let context = MakeupContext::from_request(request).inspect_err(|e| {
            tracing::info!(request = %request_id, "Request rejected: {}", e);
        })?;

        let context = self.pipeline().process(context)?;
        let outcome = context.into_outcome()?;

        tracing::info!(
            request = %request_id,
            foundation = %outcome.report.swatches.foundation,
            eyeshadow = %outcome.report.swatches.eyeshadow,
            lipstick = %outcome.report.swatches.lipstick,
            "Rendered makeup"
        );
        Ok(outcome)
    }

    /// Shorthand for [`MakeupEngine::process`] on a fresh request.
    pub fn render(
        &self,
        image: FaceImage,
        landmarks: Option<LandmarkMap>,
    ) -> Result<MakeupOutcome, AppError> {
        self.process(MakeupRequest::new(image, landmarks))
    }
}
