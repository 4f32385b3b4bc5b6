mod args;

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

use makeup_engine::catalog::{Catalog, Recommendations};
use makeup_engine::config::{CatalogQuery, Settings};
use makeup_engine::error::AppError;
use makeup_engine::pipeline::services::{LandmarkDetector, PrecomputedLandmarks};
use makeup_engine::pipeline::types::{ChannelOrder, FaceImage, MakeupReport, MakeupRequest};
use makeup_engine::{MakeupEngine, MakeupService};

use crate::args::CliArgs;

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Serialize)]
struct CliReport<'a> {
    #[serde(flatten)]
    report: &'a MakeupReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendations: Option<Recommendations>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = CliArgs::parse();
    let mut settings = Settings::load(args.config.as_deref())?;
    init_logging(&settings.log_level);

    apply_overrides(&mut settings, &args);

    let engine = MakeupEngine::from_settings(&settings)?;
    let order = if args.bgr {
        ChannelOrder::Bgr
    } else {
        ChannelOrder::Rgb
    };
    let image = FaceImage::from_dynamic(&image::open(&args.image)?, order);
    let detector = PrecomputedLandmarks::load(&args.landmarks)?;
    let landmarks = detector.detect(&image);
    tracing::info!(
        image = %args.image.display(),
        detector = detector.name(),
        landmarks = landmarks.as_ref().map_or(0, |l| l.len()),
        "Processing image"
    );

    let outcome = MakeupService::new(engine)
        .oneshot(MakeupRequest::new(image, landmarks))
        .await?;

    if let Some(path) = &args.output {
        outcome.image.to_rgb().save(path)?;
        tracing::info!("Wrote {}", path.display());
    }

    let recommendations = match &settings.catalog_path {
        Some(path) => Some(Catalog::load(path)?.recommend_all(&settings.catalog)),
        None => None,
    };

    let report = CliReport {
        report: &outcome.report,
        output: args.output.clone(),
        recommendations,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn apply_overrides(settings: &mut Settings, args: &CliArgs) {
    let queries: [&mut CatalogQuery; 2] = [
        &mut settings.catalog.foundation,
        &mut settings.catalog.lipstick,
    ];
    for query in queries {
        if let Some(season) = &args.season {
            query.season = season.clone();
        }
        if let Some(skin_type) = &args.skin_type {
            query.skin_type = skin_type.clone();
        }
    }
    if args.seed.is_some() {
        settings.catalog.seed = args.seed;
    }
}
