//! Discrete proximity classification of the selected depth.

use crate::config::ClassificationConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Proximity state derived from the per-frame depth estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActionState {
    /// Hand touching the face
    Touching,

    /// Hand near the face
    Near,

    /// Hand approaching the face
    Approaching,

    /// Hand away from the face
    Away,

    /// No depth could be produced this frame
    #[default]
    NoAction,
}

impl ActionState {
    /// Classify a depth value against the configured thresholds
    #[must_use]
    pub fn classify(depth_cm: f64, config: &ClassificationConfig) -> Self {
        if depth_cm < config.touch_cm {
            ActionState::Touching
        } else if depth_cm < config.near_cm {
            ActionState::Near
        } else if depth_cm < config.approach_cm {
            ActionState::Approaching
        } else {
            ActionState::Away
        }
    }

    /// Classify an optional depth, mapping absence to `NoAction`
    #[must_use]
    pub fn classify_opt(depth_cm: Option<f64>, config: &ClassificationConfig) -> Self {
        depth_cm.map_or(ActionState::NoAction, |cm| Self::classify(cm, config))
    }

    /// Human-readable label for overlay rendering
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ActionState::Touching => "Touching Face",
            ActionState::Near => "Near Face",
            ActionState::Approaching => "Hand Approaching",
            ActionState::Away => "Hand Away",
            ActionState::NoAction => "No Action",
        }
    }
}

impl fmt::Display for ActionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
