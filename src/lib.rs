//! Hand-to-face shadow depth estimation library.
//!
//! This library estimates the distance between a user's hand and face from
//! a video stream using two complementary signals:
//! - the physical behavior of the shadow the hand casts on the face
//!   (segmented with `OpenCV`, calibrated online against a single touch
//!   observation), and
//! - the geometry of detected hand/face landmarks as a calibration-free
//!   fallback.
//!
//! The per-frame pipeline is:
//! 1. An external detector supplies a face box and hand landmarks
//! 2. Shadow segmentation on the face region, biased toward the hand
//! 3. Light-direction estimation with temporal stabilization
//! 4. Depth from shadow physics when calibrated, from geometry otherwise
//! 5. Classification into discrete proximity states
//!
//! Landmark detection, capture encoding, overlay drawing and offline
//! plotting are external collaborators; the library only consumes and
//! produces their interfaces.
//!
//! # Examples
//!
//! ## Processing a frame
//!
//! ```no_run
//! use shadow_depth::config::Config;
//! use shadow_depth::detection::{FaceBox, FrameObservation, HandLandmarks, LandmarkPoint};
//! use shadow_depth::session::ShadowDepthSession;
//! use opencv::{imgcodecs, prelude::*};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = ShadowDepthSession::new(Config::default());
//!
//! let frame = imgcodecs::imread("frame.jpg", imgcodecs::IMREAD_COLOR)?;
//! let observation = FrameObservation {
//!     face: Some(FaceBox::new(100, 100, 200, 200)),
//!     hand: Some(HandLandmarks::new(vec![LandmarkPoint { x: 0.4, y: 0.35 }])),
//! };
//!
//! let report = session.process_frame(&frame, &observation)?;
//! if let Some(depth) = &report.depth {
//!     println!("{:.2} cm via {} -> {}", depth.cm, depth.provenance, report.action);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Running the frame loop against a recorded detector track
//!
//! ```no_run
//! use shadow_depth::app::{AppConfig, ShadowDepthApp, VideoSource};
//! use shadow_depth::config::Config;
//! use shadow_depth::detection::ReplayObserver;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let observer = ReplayObserver::from_file("session.track.yaml")?;
//! let config = AppConfig {
//!     video_source: VideoSource::File("session.avi".to_string()),
//!     pipeline: Config::default(),
//! };
//!
//! let mut app = ShadowDepthApp::new(config, Box::new(observer))?;
//! let history = app.run()?;
//! println!("{} frames produced a depth", history.len());
//! # Ok(())
//! # }
//! ```

/// Discrete proximity classification of the selected depth
pub mod action;

/// Session history and summary statistics for offline analytics
pub mod analytics;

/// Frame-loop runtime around a capture source and an external detector
pub mod app;

/// Configuration management
pub mod config;

/// Constants used throughout the application
pub mod constants;

/// Depth estimation models and per-frame selection
pub mod depth;

/// Face/hand detector collaborator interface
pub mod detection;

/// Error types and result handling
pub mod error;

/// Light-direction estimation with temporal stabilization
pub mod light;

/// Per-frame processing session and its exposed report
pub mod session;

/// Shadow segmentation for the face region
pub mod shadow;

/// Region extraction and coordinate utilities
pub mod utils;

pub use error::{Error, Result};
