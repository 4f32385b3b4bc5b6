pub mod color_extractor;
pub mod compositor;
pub mod landmark_detector;
pub mod mask_builder;
pub mod palette_matcher;

pub mod makeup_engine;
pub mod makeup_service;
pub mod orchestration;
pub mod steps;

pub use color_extractor::{mean_lip_color, mean_region_color, mean_skin_color};
pub use compositor::{clamp_opacity, composite};
pub use landmark_detector::{LandmarkDetector, PrecomputedLandmarks};
pub use mask_builder::{build_masks, fill_polygon, MaskBuilder};
pub use palette_matcher::{darken_until_below, nearest_swatch, select_swatches, Darkened};

pub use makeup_engine::MakeupEngine;
pub use makeup_service::MakeupService;
