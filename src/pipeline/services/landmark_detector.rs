use std::path::Path;

use crate::error::AppError;
use crate::pipeline::types::{FaceImage, LandmarkMap};

/// Seam for the external face-landmark model.
///
/// `None` means no face was found; the request pipeline stops there.
pub trait LandmarkDetector: Send + Sync {
    fn detect(&self, image: &FaceImage) -> Option<LandmarkMap>;
    fn name(&self) -> &'static str;
}

/// Landmarks computed ahead of time, e.g. exported by a separate detector run.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedLandmarks {
    landmarks: Option<LandmarkMap>,
}

impl PrecomputedLandmarks {
    pub fn new(landmarks: Option<LandmarkMap>) -> Self {
        Self { landmarks }
    }

    /// Reads a JSON object of `"index": [x, y]` pairs. A `null` document
    /// stands for "no face detected".
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let landmarks: Option<LandmarkMap> = serde_json::from_str(&json)?;
        if let Some(map) = &landmarks {
            tracing::debug!("Loaded {} landmarks from {}", map.len(), path.as_ref().display());
        }
        Ok(Self::new(landmarks))
    }
}

impl LandmarkDetector for PrecomputedLandmarks {
    fn detect(&self, _image: &FaceImage) -> Option<LandmarkMap> {
        self.landmarks.clone()
    }

    fn name(&self) -> &'static str {
        "PrecomputedLandmarks"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn null_document_means_no_face() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"null").unwrap();
        let detector = PrecomputedLandmarks::load(file.path()).unwrap();

        let image = FaceImage::from_rgb(RgbImage::new(2, 2));
        assert!(detector.detect(&image).is_none());
    }

    #[test]
    fn returns_loaded_landmarks() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"0": [1, 2]}"#).unwrap();
        let detector = PrecomputedLandmarks::load(file.path()).unwrap();

        let image = FaceImage::from_rgb(RgbImage::new(2, 2));
        let landmarks = detector.detect(&image).unwrap();
        assert_eq!(landmarks.len(), 1);
    }
}
