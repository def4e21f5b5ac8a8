//! Session history for the offline analytics collaborator.
//!
//! Every frame that produced a depth contributes one sample; the ordered
//! collection is handed over at session end together with summary
//! statistics and the depth-to-shadow-area relationship the offline plots
//! visualize.

use crate::depth::Provenance;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One frame's recorded estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthSample {
    /// Selected depth in centimeters, rounded to 2 decimals
    pub depth_cm: f64,

    /// Shadow pixel-area count for the frame
    pub shadow_area: i32,

    /// Model that produced the depth
    pub provenance: Provenance,
}

/// Statistical summary of a sample series
#[derive(Debug, Clone, Copy)]
pub struct Statistics {
    /// Mean value of the data
    pub mean: f64,
    /// Standard deviation of the data
    pub std_dev: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Range (max - min)
    pub range: f64,
}

/// Ordered history of all frames where a depth was produced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionHistory {
    samples: Vec<DepthSample>,
}

impl SessionHistory {
    #[must_use]
    pub fn new(samples: Vec<DepthSample>) -> Self {
        Self { samples }
    }

    #[must_use]
    pub fn samples(&self) -> &[DepthSample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Summary statistics over the recorded depths
    #[must_use]
    pub fn depth_stats(&self) -> Option<Statistics> {
        calculate_stats(self.samples.iter().map(|s| s.depth_cm))
    }

    /// Summary statistics over the recorded shadow areas
    #[must_use]
    pub fn area_stats(&self) -> Option<Statistics> {
        calculate_stats(self.samples.iter().map(|s| f64::from(s.shadow_area)))
    }

    /// Pearson correlation between depth and `sqrt(shadow_area)`, the
    /// relationship the physics model assumes. `None` with fewer than two
    /// samples or when either series is constant.
    #[must_use]
    pub fn depth_area_correlation(&self) -> Option<f64> {
        if self.samples.len() < 2 {
            return None;
        }

        let depths: Vec<f64> = self.samples.iter().map(|s| s.depth_cm).collect();
        let roots: Vec<f64> = self.samples.iter().map(|s| f64::from(s.shadow_area).sqrt()).collect();

        #[allow(clippy::cast_precision_loss)]
        let n = depths.len() as f64;
        let mean_d = depths.iter().sum::<f64>() / n;
        let mean_r = roots.iter().sum::<f64>() / n;

        let mut covariance = 0.0;
        let mut var_d = 0.0;
        let mut var_r = 0.0;
        for (d, r) in depths.iter().zip(&roots) {
            covariance += (d - mean_d) * (r - mean_r);
            var_d += (d - mean_d).powi(2);
            var_r += (r - mean_r).powi(2);
        }

        let denominator = (var_d * var_r).sqrt();
        if denominator == 0.0 {
            return None;
        }

        Some(covariance / denominator)
    }

    /// Save the history to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Observation(format!("Failed to serialize history: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn calculate_stats(values: impl Iterator<Item = f64>) -> Option<Statistics> {
    let data: Vec<f64> = values.collect();
    if data.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;

    let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(Statistics {
        mean,
        std_dev,
        min,
        max,
        range: max - min,
    })
}
