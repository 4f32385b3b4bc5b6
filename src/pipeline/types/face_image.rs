use image::{DynamicImage, GrayImage, RgbImage};
use std::sync::Arc;

use super::ChannelOrder;
use crate::error::AppError;

/// Single-channel inclusion grid; any nonzero value marks the region.
pub type Mask = GrayImage;

/// Skin and lip masks for one image. Built independently of each other.
#[derive(Debug, Clone)]
pub struct FaceMasks {
    pub face: Mask,
    pub lips: Mask,
}

/// A 3-channel image buffer together with the order its channels are stored in.
///
/// The buffer is kept in its native order; nothing in the crate reorders it
/// in place. Pixel data is shared, so cloning is cheap.
#[derive(Debug, Clone)]
pub struct FaceImage {
    pixels: Arc<RgbImage>,
    order: ChannelOrder,
}

impl FaceImage {
    pub fn new(pixels: RgbImage, order: ChannelOrder) -> Self {
        Self {
            pixels: Arc::new(pixels),
            order,
        }
    }

    pub fn from_rgb(pixels: RgbImage) -> Self {
        Self::new(pixels, ChannelOrder::Rgb)
    }

    /// Wraps an interleaved 3-channel buffer of `width * height * 3` bytes.
    pub fn from_raw(
        width: u32,
        height: u32,
        data: Vec<u8>,
        order: ChannelOrder,
    ) -> Result<Self, AppError> {
        let len = data.len();
        let pixels = RgbImage::from_raw(width, height, data).ok_or_else(|| {
            AppError::InvalidImage(format!(
                "{len} bytes cannot hold a {width}x{height} 3-channel image"
            ))
        })?;
        Ok(Self::new(pixels, order))
    }

    /// Decodes a dynamic image into RGB, then re-lays it out in `order`.
    pub fn from_dynamic(image: &DynamicImage, order: ChannelOrder) -> Self {
        let mut rgb = image.to_rgb8();
        if order == ChannelOrder::Bgr {
            swap_red_blue(&mut rgb);
        }
        Self::new(rgb, order)
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Copy of the buffer in RGB order, e.g. for encoding to disk.
    pub fn to_rgb(&self) -> RgbImage {
        let mut rgb = self.pixels.as_ref().clone();
        if self.order == ChannelOrder::Bgr {
            swap_red_blue(&mut rgb);
        }
        rgb
    }

    pub fn shares_buffer_with(&self, other: &FaceImage) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

fn swap_red_blue(image: &mut RgbImage) {
    for px in image.pixels_mut() {
        px.0.swap(0, 2);
    }
}
