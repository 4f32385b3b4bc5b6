use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use uuid::Uuid;

use crate::error::AppError;
use crate::pipeline::types::{
    Color, FaceImage, FaceMasks, LandmarkMap, MakeupOutcome, MakeupReport, MakeupRequest,
    Swatches,
};

/// Per-request state threaded through the processing steps.
///
/// Each step fills in its own slot; later steps fail with a pipeline error if
/// a slot they depend on is still empty.
#[derive(Debug)]
pub struct MakeupContext {
    pub request_id: Uuid,
    pub received_at: DateTime<Utc>,
    pub image: FaceImage,
    pub landmarks: LandmarkMap,
    pub masks: Option<FaceMasks>,
    pub skin_color: Option<Color>,
    pub lip_color: Option<Color>,
    pub swatches: Option<Swatches>,
    pub rendered: Option<FaceImage>,
    pub timings: IndexMap<String, u64>,
}

impl MakeupContext {
    pub fn new(image: FaceImage, landmarks: LandmarkMap) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            received_at: Utc::now(),
            image,
            landmarks,
            masks: None,
            skin_color: None,
            lip_color: None,
            swatches: None,
            rendered: None,
            timings: IndexMap::new(),
        }
    }

    /// Starts a context from a request, rejecting requests with no face.
    pub fn from_request(request: MakeupRequest) -> Result<Self, AppError> {
        let landmarks = request.landmarks.ok_or(AppError::NoFaceDetected)?;
        Ok(Self {
            request_id: request.id,
            received_at: request.received_at,
            ..Self::new(request.image, landmarks)
        })
    }

    pub fn record_timing(&mut self, step: &str, duration_us: u64) {
        self.timings.insert(step.to_string(), duration_us);
    }

    pub fn masks(&self) -> Result<&FaceMasks, AppError> {
        self.masks
            .as_ref()
            .ok_or_else(|| missing("masks"))
    }

    pub fn colors(&self) -> Result<(Color, Color), AppError> {
        match (self.skin_color, self.lip_color) {
            (Some(skin), Some(lip)) => Ok((skin, lip)),
            _ => Err(missing("region colors")),
        }
    }

    pub fn swatches(&self) -> Result<&Swatches, AppError> {
        self.swatches
            .as_ref()
            .ok_or_else(|| missing("swatches"))
    }

    /// Finishes the request once every step has run.
    pub fn into_outcome(self) -> Result<MakeupOutcome, AppError> {
        let (skin_color, lip_color) = self.colors()?;
        let swatches = self.swatches()?.clone();
        let image = self.rendered.ok_or_else(|| missing("rendered image"))?;

        Ok(MakeupOutcome {
            report: MakeupReport {
                request_id: self.request_id,
                received_at: self.received_at,
                skin_color,
                lip_color,
                swatches,
                step_timings_us: self.timings,
            },
            image,
        })
    }
}

fn missing(what: &str) -> AppError {
    AppError::Pipeline(format!("{what} not available; was the producing step skipped?"))
}
