//! Self-calibrating shadow-physics depth model.
//!
//! The apparent size of the shadow a hand casts on the face shrinks as the
//! hand moves away from it, following an inverse-square relation between
//! shadow area and occluder distance. The single scalar relating the two is
//! learned online: the first frame whose shadow area exceeds the calibration
//! trigger is interpreted as the hand touching the face at a fixed reference
//! distance, and the constant is locked for the remainder of the session.
//!
//! The raw inverse-square law underestimates depth once the hand moves a
//! moderate distance away in this optical setup, so the raw value passes
//! through a non-linear expansion with empirically tuned gamma and scale
//! before clipping. Those are configuration, not physical law.

use crate::config::PhysicsConfig;
use crate::constants::EPSILON;

/// Calibration state of the physics model.
///
/// The transition to `Calibrated` fires exactly once per session; the
/// constant never changes or resets afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationState {
    /// No qualifying touch observed yet; the model abstains
    Uncalibrated,

    /// Locked calibration constant relating shadow area to distance
    Calibrated {
        /// `reference_distance_cm * sqrt(trigger_area)`
        k: f64,
    },
}

impl CalibrationState {
    #[must_use]
    pub fn is_calibrated(&self) -> bool {
        matches!(self, CalibrationState::Calibrated { .. })
    }

    /// The locked constant, when calibrated
    #[must_use]
    pub fn constant(&self) -> Option<f64> {
        match self {
            CalibrationState::Uncalibrated => None,
            CalibrationState::Calibrated { k } => Some(*k),
        }
    }
}

/// Shadow-physics depth model with one-shot online self-calibration
#[derive(Debug, Clone)]
pub struct ShadowPhysicsModel {
    config: PhysicsConfig,
    state: CalibrationState,
}

impl ShadowPhysicsModel {
    #[must_use]
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            state: CalibrationState::Uncalibrated,
        }
    }

    #[must_use]
    pub fn state(&self) -> CalibrationState {
        self.state
    }

    /// Offer a frame's shadow area to the calibrator.
    ///
    /// Returns `Some(k)` the one time the transition fires: the first frame
    /// whose area exceeds the calibration trigger, interpreted as the hand
    /// touching the face at the reference distance. All later calls return
    /// `None` and leave the constant untouched.
    pub fn try_calibrate(&mut self, shadow_area: f64) -> Option<f64> {
        if self.state.is_calibrated() || shadow_area <= self.config.calibration_trigger_area {
            return None;
        }

        let k = self.config.reference_distance_cm * shadow_area.sqrt();
        self.state = CalibrationState::Calibrated { k };
        Some(k)
    }

    /// Pre-expansion depth `k / sqrt(area)`, `None` while uncalibrated or
    /// when the area is below the reliability floor.
    #[must_use]
    pub fn raw_depth(&self, shadow_area: f64) -> Option<f64> {
        let k = self.state.constant()?;

        if shadow_area <= self.config.min_reliable_area {
            return None;
        }

        Some(k / (shadow_area.sqrt() + EPSILON))
    }

    /// Depth estimate in centimeters: the raw inverse-square value expanded
    /// by `scale * raw^gamma` and clipped to the configured bounds.
    #[must_use]
    pub fn estimate(&self, shadow_area: f64) -> Option<f64> {
        let raw = self.raw_depth(shadow_area)?;
        let expanded = self.config.scale_factor * raw.powf(self.config.gamma);

        Some(expanded.clamp(self.config.clip_min_cm, self.config.clip_max_cm))
    }
}
