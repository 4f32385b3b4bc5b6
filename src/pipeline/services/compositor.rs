//! Alpha blending of a solid color into a masked region.
use crate::pipeline::types::{Color, FaceImage, Mask};

/// Clamps `opacity` into `[0, 1]`. NaN counts as 0 (no change).
pub fn clamp_opacity(opacity: f32) -> f32 {
    if opacity.is_nan() {
        tracing::warn!("Opacity is NaN, treating it as 0");
        return 0.0;
    }
    let clamped = opacity.clamp(0.0, 1.0);
    if clamped != opacity {
        tracing::warn!("Opacity {} outside [0, 1], clamped to {}", opacity, clamped);
    }
    clamped
}

/// Blends `color` (RGB) into every masked pixel of `image` and returns the
/// result as a new image in the same channel order.
///
/// Masked pixels become `round(pixel * (1 - opacity) + color * opacity)`;
/// unmasked pixels are copied as-is. Out-of-range opacity is clamped.
pub fn composite(image: &FaceImage, mask: &Mask, color: Color, opacity: f32) -> FaceImage {
    let alpha = clamp_opacity(opacity) as f64;
    let overlay = color.to_native(image.order());

    let mut out = image.pixels().clone();
    let width = out.width().min(mask.width());
    let height = out.height().min(mask.height());

    for y in 0..height {
        for x in 0..width {
            if mask.get_pixel(x, y).0[0] == 0 {
                continue;
            }
            let px = out.get_pixel_mut(x, y);
            for (channel, &tint) in px.0.iter_mut().zip(overlay.iter()) {
                let blended = *channel as f64 * (1.0 - alpha) + tint as f64 * alpha;
                *channel = blended.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    FaceImage::new(out, image.order())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::ChannelOrder;
    use image::{ImageBuffer, Luma, Rgb, RgbImage};

    fn gradient() -> RgbImage {
        ImageBuffer::from_fn(6, 4, |x, y| Rgb([(x * 40) as u8, (y * 60) as u8, 77]))
    }

    fn left_half_mask() -> Mask {
        ImageBuffer::from_fn(6, 4, |x, _| Luma([if x < 3 { 255 } else { 0 }]))
    }

    #[test]
    fn zero_opacity_is_identity() {
        let image = FaceImage::from_rgb(gradient());
        let out = composite(&image, &left_half_mask(), Color::new(255, 0, 0), 0.0);
        assert_eq!(out.pixels(), image.pixels());
    }

    #[test]
    fn full_opacity_replaces_masked_pixels_only() {
        let image = FaceImage::from_rgb(gradient());
        let color = Color::new(200, 100, 50);
        let out = composite(&image, &left_half_mask(), color, 1.0);
        for (x, y, px) in out.pixels().enumerate_pixels() {
            if x < 3 {
                assert_eq!(px.0, [200, 100, 50]);
            } else {
                assert_eq!(px, image.pixels().get_pixel(x, y));
            }
        }
    }

    #[test]
    fn full_opacity_writes_native_order() {
        let image = FaceImage::new(gradient(), ChannelOrder::Bgr);
        let out = composite(&image, &left_half_mask(), Color::new(200, 100, 50), 1.0);
        assert_eq!(out.pixels().get_pixel(0, 0).0, [50, 100, 200]);
        assert_eq!(out.order(), ChannelOrder::Bgr);
    }

    #[test]
    fn partial_opacity_rounds() {
        let image = FaceImage::from_rgb(ImageBuffer::from_pixel(1, 1, Rgb([100, 0, 255])));
        let mask = ImageBuffer::from_pixel(1, 1, Luma([1]));
        let out = composite(&image, &mask, Color::new(201, 255, 0), 0.5);
        // 150.5 -> 151, 127.5 -> 128, 127.5 -> 128
        assert_eq!(out.pixels().get_pixel(0, 0).0, [151, 128, 128]);
    }

    #[test]
    fn input_is_not_mutated() {
        let image = FaceImage::from_rgb(gradient());
        let before = image.pixels().clone();
        let out = composite(&image, &left_half_mask(), Color::new(1, 2, 3), 0.7);
        assert_eq!(image.pixels(), &before);
        assert!(!out.shares_buffer_with(&image));
    }

    #[test]
    fn opacity_is_clamped() {
        assert_eq!(clamp_opacity(-0.5), 0.0);
        assert_eq!(clamp_opacity(1.5), 1.0);
        assert_eq!(clamp_opacity(f32::NAN), 0.0);
        assert_eq!(clamp_opacity(0.3), 0.3);

        let image = FaceImage::from_rgb(gradient());
        let over = composite(&image, &left_half_mask(), Color::new(9, 9, 9), 4.0);
        let full = composite(&image, &left_half_mask(), Color::new(9, 9, 9), 1.0);
        assert_eq!(over.pixels(), full.pixels());
    }
}
