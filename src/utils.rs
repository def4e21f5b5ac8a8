//! Utility functions for region extraction and coordinate handling.

use crate::detection::FaceBox;
use crate::Result;
use opencv::core::Mat;
use opencv::prelude::*;

/// Extract an owned copy of the face region from a frame.
///
/// The box must already be clamped to the frame bounds.
///
/// # Errors
///
/// Returns an error if the ROI lies outside the frame.
pub fn face_region(frame: &Mat, face: &FaceBox) -> Result<Mat> {
    let roi = Mat::roi(frame, face.to_rect())?;
    roi.try_clone().map_err(Into::into)
}

/// Clamp and convert f64 to i32 for pixel coordinates
#[must_use]
#[allow(clippy::cast_precision_loss)] // Acceptable for clamping bounds
#[allow(clippy::cast_possible_truncation)] // Clamping ensures safe truncation
pub fn f64_to_i32_clamp(value: f64, min: i32, max: i32) -> i32 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    let clamped = value.clamp(f64::from(min), f64::from(max));

    (clamped as i32).clamp(min, max)
}
