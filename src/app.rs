//! Frame-loop runtime wiring the capture source, the external detector and
//! the processing session together.
//!
//! The loop is single-threaded and synchronous: one frame is fully
//! processed before the next is read, and the stop signal is checked only
//! at iteration boundaries so the session state is always consistent at
//! exit.

use crate::analytics::SessionHistory;
use crate::config::Config;
use crate::detection::FaceHandObserver;
use crate::session::{FrameReport, ShadowDepthSession};
use crate::{Error, Result};
use log::info;
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture, CAP_PROP_BUFFERSIZE};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Video source type
#[derive(Debug, Clone)]
pub enum VideoSource {
    /// Webcam index
    Camera(i32),
    /// Video file path
    File(String),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Camera index or video file path
    pub video_source: VideoSource,

    /// Pipeline configuration
    pub pipeline: Config,
}

/// Shadow depth estimation application
pub struct ShadowDepthApp {
    capture: VideoCapture,
    observer: Box<dyn FaceHandObserver>,
    session: ShadowDepthSession,
    stop: Arc<AtomicBool>,
}

impl ShadowDepthApp {
    /// Create the application around a capture source and an external
    /// detector collaborator.
    pub fn new(config: AppConfig, observer: Box<dyn FaceHandObserver>) -> Result<Self> {
        let capture = match &config.video_source {
            VideoSource::Camera(index) => {
                info!("Opening camera {index}");
                let mut capture = VideoCapture::new(*index, videoio::CAP_ANY)?;

                // Buffer size 1 keeps webcam latency low
                capture.set(CAP_PROP_BUFFERSIZE, 1.0)?;

                capture
            }
            VideoSource::File(path) => {
                info!("Opening video file: {path}");
                VideoCapture::from_file(path, videoio::CAP_ANY)?
            }
        };

        if !capture.is_opened()? {
            return Err(Error::InvalidInput(format!(
                "Failed to open video source {:?}",
                config.video_source
            )));
        }

        Ok(Self {
            capture,
            observer,
            session: ShadowDepthSession::new(config.pipeline),
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Flag checked once per iteration to request a clean stop
    #[must_use]
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    #[must_use]
    pub fn session(&self) -> &ShadowDepthSession {
        &self.session
    }

    /// Run the frame loop to exhaustion or until stopped, discarding
    /// per-frame reports.
    pub fn run(&mut self) -> Result<SessionHistory> {
        self.run_with(|_, _| Ok(()))
    }

    /// Run the frame loop, handing each frame and its report to the
    /// rendering/recording collaborator.
    pub fn run_with<F>(&mut self, mut sink: F) -> Result<SessionHistory>
    where
        F: FnMut(&Mat, &FrameReport) -> Result<()>,
    {
        info!("Starting shadow depth frame loop");
        let mut frame_count = 0u64;

        loop {
            if self.stop.load(Ordering::Relaxed) {
                info!("Stop requested after {frame_count} frames");
                break;
            }

            let mut frame = Mat::default();
            if !self.capture.read(&mut frame)? || frame.empty() {
                info!("Video source exhausted after {frame_count} frames");
                break;
            }

            let observation = self.observer.observe(&frame)?;
            let report = self.session.process_frame(&frame, &observation)?;

            sink(&frame, &report)?;
            frame_count += 1;
        }

        let history = self.session.take_history();
        info!(
            "Session finished: {} of {frame_count} frames produced a depth",
            history.len()
        );

        Ok(history)
    }
}
