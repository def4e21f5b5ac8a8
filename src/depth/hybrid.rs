//! Per-frame selection between the physics and geometric depth models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which model produced a depth estimate; informational only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Physics,
    Geometry,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Physics => write!(f, "physics"),
            Provenance::Geometry => write!(f, "geometry"),
        }
    }
}

/// A selected depth value with its provenance tag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthEstimate {
    /// Distance in centimeters
    pub cm: f64,

    /// Model that produced the value
    pub provenance: Provenance,
}

/// Prefer the physics model whenever it produced a value, fall back to
/// geometry otherwise, abstain when neither is available.
#[must_use]
pub fn select_depth(physics: Option<f64>, geometry: Option<f64>) -> Option<DepthEstimate> {
    if let Some(cm) = physics {
        return Some(DepthEstimate {
            cm,
            provenance: Provenance::Physics,
        });
    }

    geometry.map(|cm| DepthEstimate {
        cm,
        provenance: Provenance::Geometry,
    })
}
