pub mod services;
pub mod types;

pub use services::{MakeupEngine, MakeupService};
pub use types::{ChannelOrder, Color, FaceImage, LandmarkMap, MakeupOutcome, MakeupReport, MakeupRequest, Palette};
