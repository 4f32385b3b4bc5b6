use image::{ImageBuffer, Rgb, RgbImage};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use makeup_engine::config::{RenderSettings, Settings};
use makeup_engine::error::{AppError, PaletteError};
use makeup_engine::pipeline::types::{
    ChannelOrder, Color, FaceImage, FeatureRegions, LandmarkMap, PixelPoint,
};
use makeup_engine::MakeupEngine;

const SKIN: [u8; 3] = [200, 160, 140];

const PALETTE: &str = r##"{
    "foundation_colors": [{"hex": "#F5D6C6"}, {"hex": "#C89878"}, {"hex": "#5A3A28"}],
    "eyeshadow_colors": [{"hex": "#8E7CC3"}, {"hex": "#B08060"}],
    "lipstick_colors": [{"hex": "#F0B0C0"}, {"hex": "#B0305A"}]
}"##;

fn json_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn ring(indices: &[u32], cx: f64, cy: f64, radius: f64) -> Vec<(u32, PixelPoint)> {
    let n = indices.len() as f64;
    indices
        .iter()
        .enumerate()
        .map(|(i, &idx)| {
            let theta = i as f64 / n * std::f64::consts::TAU;
            let x = (cx + radius * theta.cos()).round() as i32;
            let y = (cy + radius * theta.sin()).round() as i32;
            (idx, PixelPoint::new(x, y))
        })
        .collect()
}

/// Face outline on a circle and the outer lip contour on a smaller one below
/// the center.
fn synthetic_landmarks() -> LandmarkMap {
    let regions = FeatureRegions::face_mesh();
    let mut face = regions.get("FACE").unwrap().to_vec();
    face.pop();
    ring(&face, 50.0, 50.0, 40.0)
        .into_iter()
        .chain(ring(regions.lip_contour(), 50.0, 70.0, 8.0))
        .collect()
}

fn engine(palette_path: &Path) -> MakeupEngine {
    let settings = Settings::default().with_palette_path(palette_path);
    MakeupEngine::from_settings(&settings).unwrap()
}

fn blend(src: u8, tint: u8, alpha: f64) -> u8 {
    (src as f64 * (1.0 - alpha) + tint as f64 * alpha).round() as u8
}

#[test]
fn renders_foundation_and_lipstick_from_a_palette_file() {
    let palette = json_file(PALETTE);
    let engine = engine(palette.path());

    let image = FaceImage::from_rgb(ImageBuffer::from_pixel(100, 100, Rgb(SKIN)));
    let outcome = engine.render(image, Some(synthetic_landmarks())).unwrap();
    let report = &outcome.report;

    assert_eq!(report.skin_color, Color::new(200, 160, 140));
    assert_eq!(report.lip_color, Color::new(200, 160, 140));
    assert_eq!(report.swatches.foundation, Color::new(0xc8, 0x98, 0x78));
    assert_eq!(report.swatches.eyeshadow, Color::new(0xb0, 0x80, 0x60));
    assert!(report.swatches.lipstick.brightness() < report.swatches.foundation.brightness());

    let out = outcome.image.pixels();
    assert_eq!(out.dimensions(), (100, 100));
    assert_eq!(out.get_pixel(0, 0).0, SKIN);
    assert_eq!(out.get_pixel(99, 99).0, SKIN);

    let f = report.swatches.foundation;
    let foundation_only = [
        blend(SKIN[0], f.r, 0.3),
        blend(SKIN[1], f.g, 0.3),
        blend(SKIN[2], f.b, 0.3),
    ];
    assert_eq!(out.get_pixel(50, 35).0, foundation_only);

    let l = report.swatches.lipstick;
    let with_lipstick = [
        blend(foundation_only[0], l.r, 0.3),
        blend(foundation_only[1], l.g, 0.3),
        blend(foundation_only[2], l.b, 0.3),
    ];
    assert_eq!(out.get_pixel(50, 70).0, with_lipstick);
}

#[test]
fn bgr_input_gives_the_same_colors_as_rgb() {
    let palette = json_file(PALETTE);
    let engine = engine(palette.path());

    let rgb: RgbImage = ImageBuffer::from_fn(100, 100, |x, y| {
        Rgb([150 + (x % 50) as u8, 120 + (y % 40) as u8, 100])
    });
    let mut bgr = rgb.clone();
    for px in bgr.pixels_mut() {
        px.0.swap(0, 2);
    }

    let from_rgb = engine
        .render(FaceImage::new(rgb, ChannelOrder::Rgb), Some(synthetic_landmarks()))
        .unwrap();
    let from_bgr = engine
        .render(FaceImage::new(bgr, ChannelOrder::Bgr), Some(synthetic_landmarks()))
        .unwrap();

    assert_eq!(from_rgb.report.skin_color, from_bgr.report.skin_color);
    assert_eq!(from_rgb.report.lip_color, from_bgr.report.lip_color);
    assert_eq!(from_rgb.report.swatches, from_bgr.report.swatches);
    assert_eq!(from_bgr.image.order(), ChannelOrder::Bgr);
    assert_eq!(from_rgb.image.to_rgb(), from_bgr.image.to_rgb());
}

#[test]
fn zero_opacity_leaves_the_image_untouched() {
    let palette = json_file(PALETTE);
    let settings = Settings::default()
        .with_palette_path(palette.path())
        .with_render(RenderSettings {
            foundation_opacity: 0.0,
            lipstick_opacity: 0.0,
        });
    let engine = MakeupEngine::from_settings(&settings).unwrap();

    let input: RgbImage = ImageBuffer::from_pixel(100, 100, Rgb(SKIN));
    let outcome = engine
        .render(FaceImage::from_rgb(input.clone()), Some(synthetic_landmarks()))
        .unwrap();
    assert_eq!(outcome.image.pixels(), &input);
}

#[test]
fn landmarks_outside_the_frame_fall_back_to_default_colors() {
    let palette = json_file(PALETTE);
    let engine = engine(palette.path());

    let far_away: LandmarkMap = ring(&[10, 338, 297, 332], 500.0, 500.0, 20.0)
        .into_iter()
        .collect();
    let input: RgbImage = ImageBuffer::from_pixel(40, 40, Rgb(SKIN));
    let outcome = engine
        .render(FaceImage::from_rgb(input.clone()), Some(far_away))
        .unwrap();

    assert_eq!(outcome.report.skin_color, Color::new(200, 180, 160));
    assert_eq!(outcome.report.lip_color, Color::new(150, 50, 70));
    assert_eq!(outcome.image.pixels(), &input);
}

#[test]
fn no_face_and_bad_palettes_are_errors() {
    let palette = json_file(PALETTE);
    let engine = engine(palette.path());
    let image = FaceImage::from_rgb(ImageBuffer::from_pixel(8, 8, Rgb(SKIN)));
    assert!(matches!(engine.render(image, None), Err(AppError::NoFaceDetected)));

    let broken = json_file(
        r##"{"foundation_colors": [{"hex": "#F5D6C6"}, {"hex": "#12345G"}], "eyeshadow_colors": [], "lipstick_colors": []}"##,
    );
    let result = MakeupEngine::from_settings(&Settings::default().with_palette_path(broken.path()));
    match result {
        Err(AppError::Palette(PaletteError::MalformedHex { index, value, .. })) => {
            assert_eq!(index, 1);
            assert_eq!(value, "#12345G");
        }
        other => panic!("expected malformed hex error, got {other:?}"),
    }

    let misspelled = json_file(
        r##"{"foundation_colors": [{"hex": "#F5D6C6"}], "eyeshadow_colors": [{"hex": "#8E7CC3"}], "lipstick_color": [{"hex": "#B0305A"}]}"##,
    );
    let result = MakeupEngine::from_settings(&Settings::default().with_palette_path(misspelled.path()));
    assert!(matches!(result, Err(AppError::Palette(PaletteError::Parse(_)))));
}
