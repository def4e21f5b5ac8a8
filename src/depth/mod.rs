//! Depth estimation models.
//!
//! Two independent models estimate the hand-to-face distance: a
//! self-calibrating shadow-physics model and a geometric fallback based on
//! landmark distances. The hybrid selector picks one per frame.

/// Geometric depth model using the face width as a pixel-to-cm reference
pub mod geometric;

/// Self-calibrating shadow-physics depth model
pub mod physics;

/// Per-frame selection between the two models
pub mod hybrid;

pub use geometric::GeometricDepthModel;
pub use hybrid::{select_depth, DepthEstimate, Provenance};
pub use physics::{CalibrationState, ShadowPhysicsModel};
