//! Shadow depth estimation application for hand-to-face proximity tracking.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use shadow_depth::app::{AppConfig, ShadowDepthApp, VideoSource};
use shadow_depth::config::Config;
use shadow_depth::depth::CalibrationState;
use shadow_depth::detection::ReplayObserver;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera index to use
    #[arg(long, default_value = "0")]
    cam: i32,

    /// Video file to process instead of a camera
    #[arg(short, long)]
    video: Option<String>,

    /// Recorded detector observation track (YAML) to replay
    #[arg(short, long)]
    track: String,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Write the session history (YAML) to this path at exit
    #[arg(long)]
    history_out: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Shadow Depth Estimation");

    let pipeline = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {config_path}");
        match Config::from_file(config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config file: {e}. Using defaults.");
                Config::default()
            }
        }
    } else {
        Config::default()
    };
    pipeline.validate().context("invalid pipeline configuration")?;

    let observer = ReplayObserver::from_file(&args.track)
        .with_context(|| format!("failed to load observation track {}", args.track))?;
    info!("Loaded {} recorded observations", observer.remaining());

    let config = AppConfig {
        video_source: if let Some(video_path) = args.video {
            VideoSource::File(video_path)
        } else {
            VideoSource::Camera(args.cam)
        },
        pipeline,
    };

    let mut app = ShadowDepthApp::new(config, Box::new(observer))?;

    let history = app.run_with(|_frame, report| {
        if let Some(depth) = &report.depth {
            println!(
                "depth {:.2} cm via {} -> {} (shadow {} px)",
                depth.cm, depth.provenance, report.action, report.shadow_area
            );
        }
        Ok(())
    })?;

    match app.session().calibration() {
        CalibrationState::Calibrated { k } => info!("Session ended calibrated with k = {k:.2}"),
        CalibrationState::Uncalibrated => {
            warn!("Session ended uncalibrated; depth came from geometry only");
        }
    }

    info!("Frames with depth data: {}", history.len());
    if let Some(stats) = history.depth_stats() {
        info!(
            "Depth cm: mean {:.2}, std {:.2}, range {:.2}-{:.2}",
            stats.mean, stats.std_dev, stats.min, stats.max
        );
    }
    if let Some(correlation) = history.depth_area_correlation() {
        info!("Depth vs sqrt(shadow area) correlation: {correlation:.3}");
    }

    if let Some(path) = args.history_out {
        history.to_file(&path).context("failed to write session history")?;
        info!("Session history written to {path}");
    }

    Ok(())
}
