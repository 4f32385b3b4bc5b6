use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Integer pixel coordinate of a detected landmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for PixelPoint {
    fn from(p: [i32; 2]) -> Self {
        Self::new(p[0], p[1])
    }
}

impl From<PixelPoint> for [i32; 2] {
    fn from(p: PixelPoint) -> Self {
        [p.x, p.y]
    }
}

/// Landmark index to pixel coordinate, as produced by the face detector.
///
/// Missing indices are normal (landmarks that fell outside the frame) and are
/// skipped by every consumer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkMap(HashMap<u32, PixelPoint>);

impl LandmarkMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: u32, point: PixelPoint) {
        self.0.insert(index, point);
    }

    pub fn get(&self, index: u32) -> Option<PixelPoint> {
        self.0.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Looks up `indices` in order, dropping the ones with no entry.
    pub fn resolve(&self, indices: &[u32]) -> Vec<PixelPoint> {
        indices.iter().filter_map(|&idx| self.get(idx)).collect()
    }
}

impl FromIterator<(u32, PixelPoint)> for LandmarkMap {
    fn from_iter<I: IntoIterator<Item = (u32, PixelPoint)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

pub const LEFT_EYE: &str = "LEFT_EYE";
pub const RIGHT_EYE: &str = "RIGHT_EYE";

/// Outer lip contour in the 468-point face mesh scheme.
pub const OUTER_LIP_CONTOUR: &[u32] = &[
    61, 146, 91, 181, 84, 17, 314, 405, 321, 375, 291, 409, 270, 269, 267, 0, 37, 39, 40, 185,
];

/// Named polygons over the face mesh landmark scheme.
///
/// Built once and shared read-only. Iteration follows insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRegions {
    regions: IndexMap<String, Vec<u32>>,
    excluded: Vec<String>,
    lip_contour: Vec<u32>,
}

impl FeatureRegions {
    pub fn new(
        regions: IndexMap<String, Vec<u32>>,
        excluded: Vec<String>,
        lip_contour: Vec<u32>,
    ) -> Self {
        Self {
            regions,
            excluded,
            lip_contour,
        }
    }

    /// Region table of the 468-point face mesh, with the eyes excluded from
    /// the skin mask.
    pub fn face_mesh() -> Self {
        let table: [(&str, &[u32]); 13] = [
            ("BLUSH_LEFT", &[50]),
            ("BLUSH_RIGHT", &[280]),
            (
                LEFT_EYE,
                &[33, 246, 161, 160, 159, 158, 157, 173, 133, 155, 154, 153, 145, 144, 163, 7, 33],
            ),
            (
                RIGHT_EYE,
                &[
                    362, 298, 384, 385, 386, 387, 388, 466, 263, 249, 390, 373, 374, 380, 381, 382,
                    362,
                ],
            ),
            (
                "EYELINER_LEFT",
                &[
                    243, 112, 26, 22, 23, 24, 110, 25, 226, 130, 33, 7, 163, 144, 145, 153, 154,
                    155, 133, 243,
                ],
            ),
            (
                "EYELINER_RIGHT",
                &[
                    463, 362, 382, 381, 380, 374, 373, 390, 249, 263, 359, 446, 255, 339, 254, 253,
                    252, 256, 341, 463,
                ],
            ),
            (
                "EYESHADOW_LEFT",
                &[
                    226, 247, 30, 29, 27, 28, 56, 190, 243, 173, 157, 158, 159, 160, 161, 246, 33,
                    130, 226,
                ],
            ),
            (
                "EYESHADOW_RIGHT",
                &[
                    463, 414, 286, 258, 257, 259, 260, 467, 446, 359, 263, 466, 388, 387, 386, 385,
                    384, 398, 362, 463,
                ],
            ),
            (
                "FACE",
                &[
                    152, 148, 176, 149, 150, 136, 172, 58, 132, 93, 234, 127, 162, 21, 54, 103, 67,
                    109, 10, 338, 297, 332, 284, 251, 389, 454, 323, 401, 361, 435, 288, 397, 365,
                    379, 378, 400, 377, 152,
                ],
            ),
            (
                "LIP_UPPER",
                &[
                    61, 185, 40, 39, 37, 0, 267, 269, 270, 409, 291, 308, 415, 310, 312, 13, 82,
                    81, 80, 191, 78,
                ],
            ),
            (
                "LIP_LOWER",
                &[
                    61, 146, 91, 181, 84, 17, 314, 405, 321, 375, 291, 308, 324, 402, 317, 14, 87,
                    178, 88, 95, 78, 61,
                ],
            ),
            ("EYEBROW_LEFT", &[55, 107, 66, 105, 63, 70, 46, 53, 52, 65, 55]),
            ("EYEBROW_RIGHT", &[285, 336, 296, 334, 293, 300, 276, 283, 295, 285]),
        ];

        let regions = table
            .iter()
            .map(|(name, indices)| (name.to_string(), indices.to_vec()))
            .collect();

        Self::new(
            regions,
            vec![LEFT_EYE.to_string(), RIGHT_EYE.to_string()],
            OUTER_LIP_CONTOUR.to_vec(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&[u32]> {
        self.regions.get(name).map(Vec::as_slice)
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.iter().any(|e| e == name)
    }

    /// Regions that make up the skin mask, in table order.
    pub fn skin_regions(&self) -> impl Iterator<Item = (&str, &[u32])> {
        self.regions
            .iter()
            .filter(|(name, _)| !self.is_excluded(name))
            .map(|(name, indices)| (name.as_str(), indices.as_slice()))
    }

    pub fn lip_contour(&self) -> &[u32] {
        &self.lip_contour
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl Default for FeatureRegions {
    fn default() -> Self {
        Self::face_mesh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_skips_missing_indices() {
        let landmarks: LandmarkMap = [(1, PixelPoint::new(1, 1)), (3, PixelPoint::new(3, 3))]
            .into_iter()
            .collect();
        let points = landmarks.resolve(&[0, 1, 2, 3, 4]);
        assert_eq!(points, vec![PixelPoint::new(1, 1), PixelPoint::new(3, 3)]);
    }

    #[test]
    fn skin_regions_leave_out_the_eyes() {
        let regions = FeatureRegions::face_mesh();
        assert_eq!(regions.len(), 13);
        let names: Vec<&str> = regions.skin_regions().map(|(n, _)| n).collect();
        assert_eq!(names.len(), 11);
        assert!(!names.contains(&LEFT_EYE));
        assert!(!names.contains(&RIGHT_EYE));
        assert_eq!(names.first(), Some(&"BLUSH_LEFT"));
    }

    #[test]
    fn landmark_map_parses_from_json() {
        let landmarks: LandmarkMap = serde_json::from_str(r#"{"10": [120, 40], "152": [118, 230]}"#).unwrap();
        assert_eq!(landmarks.len(), 2);
        assert_eq!(landmarks.get(152), Some(PixelPoint::new(118, 230)));
        assert_eq!(landmarks.get(7), None);
    }
}
