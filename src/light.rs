//! Light-direction estimation with temporal stabilization.
//!
//! The raw estimate is a first-derivative measurement on a noisy signal
//! (mean Sobel gradients over the face region), so it jitters heavily from
//! frame to frame. [`DirectionStabilizer`] damps it over a bounded rolling
//! window. Once a shadow is clearly present, its centroid relative to the
//! face center encodes the occluder-to-light geometry directly and
//! overrides the gradient estimate entirely.

use crate::config::LightConfig;
use crate::constants::EPSILON;
use crate::shadow::{to_gray, ShadowMap};
use crate::Result;
use nalgebra::Vector2;
use opencv::core::{self, Mat, Size, CV_64F};
use opencv::imgproc;
use opencv::prelude::*;
use std::collections::VecDeque;

/// Estimate the direction light arrives from, in image-plane coordinates.
///
/// Returns `None` when the gradient signal is degenerate (near-zero norm),
/// e.g. on a uniformly lit region.
///
/// # Errors
///
/// Returns an error if an image operation fails.
pub fn estimate_light_direction(face_region: &Mat, config: &LightConfig) -> Result<Option<Vector2<f64>>> {
    if face_region.empty() {
        return Ok(None);
    }

    let gray = to_gray(face_region)?;

    let mut blurred = Mat::default();
    imgproc::gaussian_blur_def(
        &gray,
        &mut blurred,
        Size::new(config.blur_kernel, config.blur_kernel),
        0.0,
    )?;

    let mut grad_x = Mat::default();
    imgproc::sobel(
        &blurred,
        &mut grad_x,
        CV_64F,
        1,
        0,
        config.sobel_kernel_size,
        1.0,
        0.0,
        core::BORDER_DEFAULT,
    )?;

    let mut grad_y = Mat::default();
    imgproc::sobel(
        &blurred,
        &mut grad_y,
        CV_64F,
        0,
        1,
        config.sobel_kernel_size,
        1.0,
        0.0,
        core::BORDER_DEFAULT,
    )?;

    let mean_x = core::mean_def(&grad_x)?[0];
    let mean_y = core::mean_def(&grad_y)?[0];

    Ok(normalize(Vector2::new(mean_x, mean_y)))
}

/// Direction from the shadow centroid toward the face-region center.
///
/// Only defined when the mask holds more than `min_pixels` marked pixels;
/// this estimate takes priority over the stabilized gradient estimate.
///
/// # Errors
///
/// Returns an error if an image operation fails.
pub fn shadow_centroid_direction(shadow: &ShadowMap, min_pixels: i32) -> Result<Option<Vector2<f64>>> {
    if shadow.area()? <= min_pixels {
        return Ok(None);
    }

    let Some((centroid_x, centroid_y)) = shadow.centroid()? else {
        return Ok(None);
    };

    let center_x = f64::from(shadow.mask.cols()) / 2.0;
    let center_y = f64::from(shadow.mask.rows()) / 2.0;

    Ok(normalize(Vector2::new(center_x - centroid_x, center_y - centroid_y)))
}

/// Resolve the light direction emitted for one frame: the shadow-centroid
/// correction when available, otherwise the stabilized gradient estimate.
///
/// # Errors
///
/// Returns an error if an image operation fails.
pub fn resolve_light_direction(
    shadow: &ShadowMap,
    stabilizer: &DirectionStabilizer,
    min_pixels: i32,
) -> Result<Option<Vector2<f64>>> {
    if let Some(direction) = shadow_centroid_direction(shadow, min_pixels)? {
        return Ok(Some(direction));
    }

    Ok(stabilizer.smoothed())
}

fn normalize(vector: Vector2<f64>) -> Option<Vector2<f64>> {
    let norm = vector.norm();
    if norm <= EPSILON {
        return None;
    }

    Some(vector / (norm + EPSILON))
}

/// Rolling-window smoother for light-direction vectors
#[derive(Debug, Clone)]
pub struct DirectionStabilizer {
    capacity: usize,
    min_samples: usize,
    buffer: VecDeque<Vector2<f64>>,
}

impl DirectionStabilizer {
    /// Create a stabilizer holding up to `capacity` samples; the smoothed
    /// output is emitted only once more than `min_samples` are held.
    #[must_use]
    pub fn new(capacity: usize, min_samples: usize) -> Self {
        Self {
            capacity,
            min_samples,
            buffer: VecDeque::with_capacity(capacity),
        }
    }

    /// Push a raw sample, evicting the oldest beyond capacity
    pub fn push(&mut self, direction: Vector2<f64>) {
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }

        self.buffer.push_back(direction);
    }

    /// Re-normalized mean of the buffered samples, `None` until the buffer
    /// holds more than the minimum sample count
    #[must_use]
    pub fn smoothed(&self) -> Option<Vector2<f64>> {
        if self.buffer.len() <= self.min_samples {
            return None;
        }

        let sum = self
            .buffer
            .iter()
            .fold(Vector2::zeros(), |acc: Vector2<f64>, v| acc + v);
        #[allow(clippy::cast_precision_loss)]
        let mean = sum / self.buffer.len() as f64;

        normalize(mean)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Reset the stabilizer
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}
