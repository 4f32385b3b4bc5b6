//! Rasterizes landmark polygons into skin and lip masks.
use image::Luma;
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;

use crate::pipeline::types::{FaceMasks, FeatureRegions, LandmarkMap, Mask, PixelPoint};

/// Value written into filled mask pixels.
pub const MASK_ON: u8 = 255;

pub struct MaskBuilder<'a> {
    regions: &'a FeatureRegions,
}

impl<'a> MaskBuilder<'a> {
    pub fn new(regions: &'a FeatureRegions) -> Self {
        Self { regions }
    }

    /// Fills every non-excluded region into the face mask and the lip contour
    /// into the lips mask. Unresolved landmark indices are dropped; a region
    /// with no resolved points contributes nothing.
    pub fn build_masks(&self, landmarks: &LandmarkMap, width: u32, height: u32) -> FaceMasks {
        let mut face = Mask::new(width, height);
        let mut lips = Mask::new(width, height);

        for (name, indices) in self.regions.skin_regions() {
            let points = landmarks.resolve(indices);
            if points.is_empty() {
                tracing::trace!("Region {} has no resolved landmarks", name);
                continue;
            }
            fill_polygon(&mut face, &points, MASK_ON);
        }

        let lip_points = landmarks.resolve(self.regions.lip_contour());
        if !lip_points.is_empty() {
            fill_polygon(&mut lips, &lip_points, MASK_ON);
        }

        FaceMasks { face, lips }
    }
}

/// Convenience wrapper over [`MaskBuilder::build_masks`].
pub fn build_masks(
    regions: &FeatureRegions,
    landmarks: &LandmarkMap,
    width: u32,
    height: u32,
) -> FaceMasks {
    MaskBuilder::new(regions).build_masks(landmarks, width, height)
}

/// Fills a closed polygon (interior and boundary) with `value`.
///
/// The polygon is first clipped to the mask grown by one pixel on each side,
/// so landmarks far outside the frame cost nothing extra. One- and two-point
/// outlines still mark the pixels they cover, and a closing vertex equal to
/// the first one is ignored.
pub fn fill_polygon(mask: &mut Mask, points: &[PixelPoint], value: u8) {
    let (width, height) = mask.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let outline = clip_to_frame(points, width, height);
    let color = Luma([value]);
    match outline.as_slice() {
        [] => {}
        [p] => {
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < width && (p.y as u32) < height {
                mask.put_pixel(p.x as u32, p.y as u32, color);
            }
        }
        [a, b] => {
            draw_line_segment_mut(mask, (a.x as f32, a.y as f32), (b.x as f32, b.y as f32), color)
        }
        _ => draw_polygon_mut(mask, &outline, color),
    }
}

/// One side of the clip rectangle.
#[derive(Debug, Clone, Copy)]
enum Boundary {
    Left(f64),
    Right(f64),
    Top(f64),
    Bottom(f64),
}

impl Boundary {
    fn inside(self, (x, y): (f64, f64)) -> bool {
        match self {
            Boundary::Left(v) => x >= v,
            Boundary::Right(v) => x <= v,
            Boundary::Top(v) => y >= v,
            Boundary::Bottom(v) => y <= v,
        }
    }

    /// Crossing of segment `a`-`b` with this side. Only called when exactly
    /// one endpoint is inside, so the segment is never parallel to it.
    fn intersect(self, (ax, ay): (f64, f64), (bx, by): (f64, f64)) -> (f64, f64) {
        match self {
            Boundary::Left(v) | Boundary::Right(v) => {
                let t = (v - ax) / (bx - ax);
                (v, ay + t * (by - ay))
            }
            Boundary::Top(v) | Boundary::Bottom(v) => {
                let t = (v - ay) / (by - ay);
                (ax + t * (bx - ax), v)
            }
        }
    }
}

/// Sutherland-Hodgman clip of a closed outline against `[-1, width] x [-1, height]`,
/// rounded back to pixels with repeated vertices removed.
fn clip_to_frame(points: &[PixelPoint], width: u32, height: u32) -> Vec<Point<i32>> {
    let mut outline: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (f64::from(p.x), f64::from(p.y)))
        .collect();

    for boundary in [
        Boundary::Left(-1.0),
        Boundary::Right(f64::from(width)),
        Boundary::Top(-1.0),
        Boundary::Bottom(f64::from(height)),
    ] {
        outline = clip_against(&outline, boundary);
    }

    let mut pixels: Vec<Point<i32>> = outline
        .into_iter()
        .map(|(x, y)| Point::new(x.round() as i32, y.round() as i32))
        .collect();
    pixels.dedup();
    while pixels.len() > 1 && pixels.first() == pixels.last() {
        pixels.pop();
    }
    pixels
}

fn clip_against(outline: &[(f64, f64)], boundary: Boundary) -> Vec<(f64, f64)> {
    let mut clipped = Vec::with_capacity(outline.len() + 2);
    let Some(&last) = outline.last() else {
        return clipped;
    };

    let mut prev = last;
    for &cur in outline {
        match (boundary.inside(prev), boundary.inside(cur)) {
            (true, true) => clipped.push(cur),
            (false, true) => {
                clipped.push(boundary.intersect(prev, cur));
                clipped.push(cur);
            }
            (true, false) => clipped.push(boundary.intersect(prev, cur)),
            (false, false) => {}
        }
        prev = cur;
    }
    clipped
}
