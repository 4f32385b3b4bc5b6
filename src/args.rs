//! Command-line arguments for the makeup renderer.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Render makeup onto a face image and suggest matching products.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Input face image.
    #[arg(short, long)]
    pub image: PathBuf,

    /// JSON file of landmark index to `[x, y]` pixel pairs, or `null` for no face.
    #[arg(short, long)]
    pub landmarks: PathBuf,

    /// Where to write the rendered image. Format follows the extension.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Optional settings file (TOML or JSON).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Process the image internally in BGR channel order. The written output is
    /// RGB either way.
    #[arg(long, action = ArgAction::SetTrue)]
    pub bgr: bool,

    /// Season for product recommendations, overriding both configured queries.
    #[arg(long)]
    pub season: Option<String>,

    /// Skin type for product recommendations, overriding both configured queries.
    #[arg(long = "skin-type")]
    pub skin_type: Option<String>,

    /// Seed for reproducible product sampling.
    #[arg(long)]
    pub seed: Option<u64>,
}
