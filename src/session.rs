//! Per-frame processing session.
//!
//! [`ShadowDepthSession`] owns the only state that crosses frame
//! boundaries: the physics model's calibration, the light-direction
//! buffer, and the recorded history. Each concurrent video session must
//! own its own instance; instances are never shared.

use crate::action::ActionState;
use crate::analytics::{DepthSample, SessionHistory};
use crate::config::Config;
use crate::depth::{select_depth, CalibrationState, DepthEstimate, GeometricDepthModel, ShadowPhysicsModel};
use crate::detection::FrameObservation;
use crate::light::{estimate_light_direction, resolve_light_direction, DirectionStabilizer};
use crate::shadow::ShadowSegmenter;
use crate::utils::face_region;
use crate::Result;
use log::{debug, info};
use nalgebra::Vector2;
use opencv::core::Mat;
use opencv::prelude::*;

/// Inputs for the external heatmap/overlay renderer
#[derive(Debug)]
pub struct ShadowVisualization {
    /// Contrast-enhanced grayscale face region
    pub gray_region: Mat,

    /// Binary shadow mask aligned to the region
    pub shadow_mask: Mat,

    /// Selected depth for the frame, in centimeters
    pub depth_cm: f64,
}

/// Everything the pipeline exposes for one processed frame
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Proximity classification of the selected depth
    pub action: ActionState,

    /// Selected depth (cm, rounded to 2 decimals) with provenance, when available
    pub depth: Option<DepthEstimate>,

    /// Shadow pixel-area count
    pub shadow_area: i32,

    /// Stabilized or centroid-overridden light direction, when available
    pub light_direction: Option<Vector2<f64>>,

    /// Whether the physics calibration transition fired on this frame
    pub calibration_fired: bool,

    /// Renderer inputs, present whenever a depth was produced
    pub visualization: Option<ShadowVisualization>,
}

/// Session-scoped pipeline state and per-frame processing
pub struct ShadowDepthSession {
    config: Config,
    segmenter: ShadowSegmenter,
    geometric: GeometricDepthModel,
    physics: ShadowPhysicsModel,
    stabilizer: DirectionStabilizer,
    history: Vec<DepthSample>,
}

impl ShadowDepthSession {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let segmenter = ShadowSegmenter::new(config.segmentation.clone());
        let geometric = GeometricDepthModel::new(config.geometry.clone());
        let physics = ShadowPhysicsModel::new(config.physics.clone());
        let stabilizer = DirectionStabilizer::new(config.light.buffer_capacity, config.light.min_samples);

        Self {
            config,
            segmenter,
            geometric,
            physics,
            stabilizer,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(Config::default())
    }

    /// Process one frame with its detector observation.
    ///
    /// Missing detections degrade the report rather than failing it; the
    /// only error sources are failed image operations.
    pub fn process_frame(&mut self, frame: &Mat, observation: &FrameObservation) -> Result<FrameReport> {
        let Some(face) = observation.face else {
            return Ok(FrameReport::default());
        };

        let frame_width = frame.cols();
        let frame_height = frame.rows();

        let Some(face) = face.clamped_to(frame_width, frame_height) else {
            debug!("face box {face:?} lies outside the frame, treating as absent");
            return Ok(FrameReport::default());
        };

        let region = face_region(frame, &face)?;
        let hand_hint = observation.wrist_in_face(&face, frame_width, frame_height);

        let shadow = self.segmenter.segment(&region, hand_hint)?;
        let shadow_area = shadow.area()?;

        if let Some(raw) = estimate_light_direction(&region, &self.config.light)? {
            self.stabilizer.push(raw);
        }
        let light_direction =
            resolve_light_direction(&shadow, &self.stabilizer, self.config.light.centroid_min_pixels)?;

        let geometry = self
            .geometric
            .estimate(observation.hand.as_ref(), Some(&face), frame_width, frame_height);

        let calibration_fired = match self.physics.try_calibrate(f64::from(shadow_area)) {
            Some(k) => {
                info!("shadow physics calibrated: k = {k:.2} (area = {shadow_area} px)");
                true
            }
            None => false,
        };

        let physics = self.physics.estimate(f64::from(shadow_area));
        let selected = select_depth(physics, geometry);

        let (action, depth, visualization) = match selected {
            Some(estimate) => {
                let action = ActionState::classify(estimate.cm, &self.config.classification);
                let rounded = round_cm(estimate.cm);

                self.history.push(DepthSample {
                    depth_cm: rounded,
                    shadow_area,
                    provenance: estimate.provenance,
                });

                let visualization = ShadowVisualization {
                    gray_region: shadow.enhanced,
                    shadow_mask: shadow.mask,
                    depth_cm: rounded,
                };

                (
                    action,
                    Some(DepthEstimate {
                        cm: rounded,
                        provenance: estimate.provenance,
                    }),
                    Some(visualization),
                )
            }
            None => (ActionState::NoAction, None, None),
        };

        Ok(FrameReport {
            action,
            depth,
            shadow_area,
            light_direction,
            calibration_fired,
            visualization,
        })
    }

    /// Current calibration state of the physics model
    #[must_use]
    pub fn calibration(&self) -> CalibrationState {
        self.physics.state()
    }

    /// History recorded so far
    #[must_use]
    pub fn history(&self) -> &[DepthSample] {
        &self.history
    }

    /// Drain the recorded history for the analytics collaborator
    pub fn take_history(&mut self) -> SessionHistory {
        SessionHistory::new(std::mem::take(&mut self.history))
    }
}

/// Round a depth to the 2 decimals exposed at the interface
fn round_cm(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
