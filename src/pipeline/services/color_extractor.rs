//! Representative color of a masked image region.
use crate::pipeline::types::{Color, FaceImage, Mask};

/// Used when the skin mask yields no usable pixels.
pub const SKIN_FALLBACK: Color = Color::new(200, 180, 160);
/// Used when the lips mask yields no usable pixels.
pub const LIP_FALLBACK: Color = Color::new(150, 50, 70);

/// Mean color of the pixels selected by `mask`, returned in RGB.
///
/// Pixels whose channels are all zero are treated as "no data" and skipped,
/// which also drops genuinely black skin or lips. With nothing left the
/// `fallback` is returned unchanged. Channel means are rounded to the nearest
/// integer. Only the area shared by the image and the mask is sampled.
pub fn mean_region_color(image: &FaceImage, mask: &Mask, fallback: Color) -> Color {
    let pixels = image.pixels();
    let width = pixels.width().min(mask.width());
    let height = pixels.height().min(mask.height());

    let mut sums = [0u64; 3];
    let mut count = 0u64;
    for y in 0..height {
        for x in 0..width {
            if mask.get_pixel(x, y).0[0] == 0 {
                continue;
            }
            let px = pixels.get_pixel(x, y).0;
            if px == [0, 0, 0] {
                continue;
            }
            for (sum, channel) in sums.iter_mut().zip(px) {
                *sum += channel as u64;
            }
            count += 1;
        }
    }

    if count == 0 {
        tracing::debug!("Masked region is empty, using fallback {}", fallback);
        return fallback;
    }

    let mean = |sum: u64| ((sum as f64 / count as f64).round()).clamp(0.0, 255.0) as u8;
    let native = [mean(sums[0]), mean(sums[1]), mean(sums[2])];
    Color::from_native(native, image.order())
}

pub fn mean_skin_color(image: &FaceImage, face_mask: &Mask) -> Color {
    mean_region_color(image, face_mask, SKIN_FALLBACK)
}

pub fn mean_lip_color(image: &FaceImage, lips_mask: &Mask) -> Color {
    mean_region_color(image, lips_mask, LIP_FALLBACK)
}
