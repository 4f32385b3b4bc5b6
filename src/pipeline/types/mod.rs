mod color;
mod face_image;
mod landmarks;
mod makeup_request;
mod palette;

pub use color::{darken_color, hex_to_rgb, rgb_to_hex, ChannelOrder, Color, DARKEN_FACTOR};
pub use face_image::{FaceImage, FaceMasks, Mask};
pub use landmarks::{
    FeatureRegions, LandmarkMap, PixelPoint, LEFT_EYE, OUTER_LIP_CONTOUR, RIGHT_EYE,
};
pub use makeup_request::{MakeupOutcome, MakeupReport, MakeupRequest};
pub use palette::{Palette, Swatch, SwatchCategory, Swatches};
