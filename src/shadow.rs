//! Shadow segmentation for the face region.
//!
//! Detects the shadow a hand casts on the face by combining darkness
//! detection (inverse adaptive thresholding on a contrast-normalized
//! grayscale region) with an optional hand-proximity prior: pixels far from
//! the detected hand are down-weighted, since a true hand-cast shadow sits
//! spatially near the hand.

use crate::config::SegmentationConfig;
use crate::constants::EPSILON;
use crate::{Error, Result};
use opencv::core::{self, Mat, Scalar, Size, CV_8UC1};
use opencv::imgproc;
use opencv::prelude::*;

/// Segmentation result for one face region
#[derive(Debug)]
pub struct ShadowMap {
    /// Binary mask, 255 where a pixel is classified as shadowed
    pub mask: Mat,

    /// Contrast-enhanced grayscale region the mask was derived from
    pub enhanced: Mat,

    /// Average brightness of the contrast-enhanced region
    pub avg_intensity: f64,
}

impl ShadowMap {
    /// Number of pixels classified as shadowed
    pub fn area(&self) -> Result<i32> {
        core::count_non_zero(&self.mask).map_err(Into::into)
    }

    /// Pixel centroid of the mask, `None` for an empty mask
    pub fn centroid(&self) -> Result<Option<(f64, f64)>> {
        let moments = imgproc::moments(&self.mask, true)?;

        if moments.m00 <= EPSILON {
            return Ok(None);
        }

        Ok(Some((moments.m10 / moments.m00, moments.m01 / moments.m00)))
    }
}

/// Shadow segmenter, a pure function of its inputs
#[derive(Debug, Clone)]
pub struct ShadowSegmenter {
    config: SegmentationConfig,
}

impl ShadowSegmenter {
    #[must_use]
    pub fn new(config: SegmentationConfig) -> Self {
        Self { config }
    }

    /// Segment the shadow in a face region.
    ///
    /// `hand_hint` is the wrist position in region-local pixel coordinates;
    /// when present, the darkness mask is reweighted by proximity to it.
    /// An all-zero mask is a valid result.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty input region or a failed image operation.
    pub fn segment(&self, face_region: &Mat, hand_hint: Option<(i32, i32)>) -> Result<ShadowMap> {
        if face_region.empty() {
            return Err(Error::InvalidInput("Cannot segment an empty face region".to_string()));
        }

        let gray = to_gray(face_region)?;

        // Local contrast normalization reduces lighting-condition sensitivity
        let mut enhanced = Mat::default();
        let mut clahe = imgproc::create_clahe(
            self.config.clahe_clip_limit,
            Size::new(self.config.clahe_tile_size, self.config.clahe_tile_size),
        )?;
        clahe.apply(&gray, &mut enhanced)?;

        let mut blurred = Mat::default();
        imgproc::gaussian_blur_def(
            &enhanced,
            &mut blurred,
            Size::new(self.config.blur_kernel, self.config.blur_kernel),
            0.0,
        )?;

        // Darker-than-local-neighborhood pixels are shadow candidates; a
        // single global threshold fails under non-uniform face lighting
        let mut mask = Mat::default();
        imgproc::adaptive_threshold(
            &blurred,
            &mut mask,
            255.0,
            imgproc::ADAPTIVE_THRESH_GAUSSIAN_C,
            imgproc::THRESH_BINARY_INV,
            self.config.adaptive_block_size,
            self.config.adaptive_offset,
        )?;

        if let Some((hand_x, hand_y)) = hand_hint {
            mask = self.weight_by_hand_proximity(&mask, hand_x, hand_y)?;
        }

        let mask = self.cleanup(&mask)?;

        let avg_intensity = core::mean_def(&enhanced)?[0];

        Ok(ShadowMap {
            mask,
            enhanced,
            avg_intensity,
        })
    }

    /// Reweight mask pixels by an exponential falloff on the distance to the
    /// hand position, then re-binarize.
    fn weight_by_hand_proximity(&self, mask: &Mat, hand_x: i32, hand_y: i32) -> Result<Mat> {
        let rows = mask.rows();
        let cols = mask.cols();
        let falloff = f64::from(cols) * self.config.hand_weight_falloff;

        let mut weighted = Mat::new_rows_cols_with_default(rows, cols, CV_8UC1, Scalar::all(0.0))?;

        for row in 0..rows {
            for col in 0..cols {
                let value = *mask.at_2d::<u8>(row, col)?;
                if value == 0 {
                    continue;
                }

                let dx = f64::from(col - hand_x);
                let dy = f64::from(row - hand_y);
                let distance = (dx * dx + dy * dy).sqrt();
                let weight = (-distance / (falloff + EPSILON)).exp();

                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let scaled = (f64::from(value) * weight) as u8;
                *weighted.at_2d_mut::<u8>(row, col)? = scaled;
            }
        }

        let mut binarized = Mat::default();
        imgproc::threshold(
            &weighted,
            &mut binarized,
            self.config.reweight_threshold,
            255.0,
            imgproc::THRESH_BINARY,
        )?;

        Ok(binarized)
    }

    /// Morphological opening removes speckle noise, closing fills small gaps
    fn cleanup(&self, mask: &Mat) -> Result<Mat> {
        let kernel = imgproc::get_structuring_element_def(
            imgproc::MORPH_RECT,
            Size::new(self.config.morph_kernel_size, self.config.morph_kernel_size),
        )?;

        let mut opened = Mat::default();
        imgproc::morphology_ex_def(mask, &mut opened, imgproc::MORPH_OPEN, &kernel)?;

        let mut closed = Mat::default();
        imgproc::morphology_ex_def(&opened, &mut closed, imgproc::MORPH_CLOSE, &kernel)?;

        Ok(closed)
    }
}

/// Convert a region to single-channel grayscale
pub(crate) fn to_gray(region: &Mat) -> Result<Mat> {
    if region.channels() == 1 {
        return region.try_clone().map_err(Into::into);
    }

    let mut gray = Mat::default();
    imgproc::cvt_color_def(region, &mut gray, imgproc::COLOR_BGR2GRAY)?;
    Ok(gray)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::CV_8UC3;

    fn uniform_bgr(rows: i32, cols: i32, value: f64) -> Mat {
        Mat::new_rows_cols_with_default(rows, cols, CV_8UC3, Scalar::all(value)).unwrap()
    }

    fn mask_with_block(rows: i32, cols: i32, x: i32, y: i32, side: i32) -> Mat {
        let mut mask = Mat::new_rows_cols_with_default(rows, cols, CV_8UC1, Scalar::all(0.0)).unwrap();
        for row in y..y + side {
            for col in x..x + side {
                *mask.at_2d_mut::<u8>(row, col).unwrap() = 255;
            }
        }
        mask
    }

    #[test]
    fn test_uniform_region_yields_empty_mask() {
        let segmenter = ShadowSegmenter::new(SegmentationConfig::default());
        let region = uniform_bgr(100, 100, 180.0);

        let shadow = segmenter.segment(&region, None).unwrap();
        assert_eq!(shadow.area().unwrap(), 0);
        assert!(shadow.avg_intensity > 0.0);
    }

    #[test]
    fn test_empty_region_is_rejected() {
        let segmenter = ShadowSegmenter::new(SegmentationConfig::default());
        assert!(segmenter.segment(&Mat::default(), None).is_err());
    }

    #[test]
    fn test_grayscale_input_is_accepted() {
        let segmenter = ShadowSegmenter::new(SegmentationConfig::default());
        let region = Mat::new_rows_cols_with_default(64, 64, CV_8UC1, Scalar::all(128.0)).unwrap();

        let shadow = segmenter.segment(&region, None).unwrap();
        assert_eq!(shadow.area().unwrap(), 0);
    }

    #[test]
    fn test_hand_proximity_keeps_near_pixels_and_drops_far() {
        let segmenter = ShadowSegmenter::new(SegmentationConfig::default());

        // Two blocks, one at the hand position, one across the region
        let mut mask = mask_with_block(100, 100, 10, 10, 8);
        for row in 80..88 {
            for col in 80..88 {
                *mask.at_2d_mut::<u8>(row, col).unwrap() = 255;
            }
        }

        let weighted = segmenter.weight_by_hand_proximity(&mask, 12, 12).unwrap();

        assert_eq!(*weighted.at_2d::<u8>(12, 12).unwrap(), 255);
        // ~102 px from the hand, the exponential falloff pushes it below threshold
        assert_eq!(*weighted.at_2d::<u8>(84, 84).unwrap(), 0);
    }

    #[test]
    fn test_cleanup_removes_single_pixel_speckle() {
        let segmenter = ShadowSegmenter::new(SegmentationConfig::default());

        let mut mask = Mat::new_rows_cols_with_default(50, 50, CV_8UC1, Scalar::all(0.0)).unwrap();
        *mask.at_2d_mut::<u8>(25, 25).unwrap() = 255;

        let cleaned = segmenter.cleanup(&mask).unwrap();
        assert_eq!(core::count_non_zero(&cleaned).unwrap(), 0);
    }

    #[test]
    fn test_cleanup_preserves_solid_block() {
        let segmenter = ShadowSegmenter::new(SegmentationConfig::default());
        let mask = mask_with_block(50, 50, 20, 20, 10);

        let cleaned = segmenter.cleanup(&mask).unwrap();
        assert_eq!(core::count_non_zero(&cleaned).unwrap(), 100);
    }

    #[test]
    fn test_centroid_of_block_mask() {
        let shadow = ShadowMap {
            mask: mask_with_block(100, 100, 10, 20, 10),
            enhanced: Mat::new_rows_cols_with_default(100, 100, CV_8UC1, Scalar::all(128.0)).unwrap(),
            avg_intensity: 128.0,
        };

        let (cx, cy) = shadow.centroid().unwrap().unwrap();
        assert!((cx - 14.5).abs() < 1e-9);
        assert!((cy - 24.5).abs() < 1e-9);
    }

    #[test]
    fn test_centroid_of_empty_mask_is_none() {
        let shadow = ShadowMap {
            mask: Mat::new_rows_cols_with_default(32, 32, CV_8UC1, Scalar::all(0.0)).unwrap(),
            enhanced: Mat::new_rows_cols_with_default(32, 32, CV_8UC1, Scalar::all(128.0)).unwrap(),
            avg_intensity: 128.0,
        };

        assert!(shadow.centroid().unwrap().is_none());
    }
}
