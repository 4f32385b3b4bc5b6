use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

use super::{Color, FaceImage, LandmarkMap, Swatches};

/// One makeup rendering request: an image plus whatever the detector found.
#[derive(Debug, Clone)]
pub struct MakeupRequest {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    pub image: FaceImage,
    /// `None` when no face was detected.
    pub landmarks: Option<LandmarkMap>,
}

impl MakeupRequest {
    pub fn new(image: FaceImage, landmarks: Option<LandmarkMap>) -> Self {
        Self {
            id: Uuid::new_v4(),
            received_at: Utc::now(),
            image,
            landmarks,
        }
    }
}

/// Serializable summary of a finished request.
#[derive(Debug, Clone, Serialize)]
pub struct MakeupReport {
    pub request_id: Uuid,
    pub received_at: DateTime<Utc>,
    pub skin_color: Color,
    pub lip_color: Color,
    pub swatches: Swatches,
    pub step_timings_us: IndexMap<String, u64>,
}

#[derive(Debug, Clone)]
pub struct MakeupOutcome {
    pub report: MakeupReport,
    /// Rendered image, same size and channel order as the input.
    pub image: FaceImage,
}
