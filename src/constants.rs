//! Constants used throughout the application.
//!
//! Every value here is a tunable parameter, not a physical law; the
//! configuration defaults in [`crate::config`] are built from these.

/// Reference hand-to-face distance assumed during calibration (hand touching face)
pub const CALIBRATION_REFERENCE_CM: f64 = 2.0;

/// Shadow area above which the first observation is interpreted as a touch
pub const CALIBRATION_TRIGGER_AREA: f64 = 800.0;

/// Shadow area below which shadow measurements are treated as noise
pub const MIN_RELIABLE_SHADOW_AREA: f64 = 400.0;

/// Non-linear response expansion exponent
pub const EXPANSION_GAMMA: f64 = 1.7;

/// Scale factor applied to the expanded depth
pub const EXPANSION_SCALE: f64 = 1.2;

/// Lower clip bound for physics depth output
pub const DEPTH_CLIP_MIN_CM: f64 = 1.5;

/// Upper clip bound for physics depth output
pub const DEPTH_CLIP_MAX_CM: f64 = 40.0;

/// Capacity of the light-direction rolling buffer
pub const LIGHT_BUFFER_CAPACITY: usize = 40;

/// Smoothed light direction is trusted only above this many buffered samples
pub const LIGHT_MIN_SAMPLES: usize = 10;

/// Shadow mask pixel count above which the centroid overrides the gradient estimate
pub const CENTROID_OVERRIDE_MIN_PIXELS: i32 = 50;

/// Average human face width used as the pixel-to-centimeter reference
pub const AVERAGE_FACE_WIDTH_CM: f64 = 14.0;

/// CLAHE contrast normalization clip limit
pub const CLAHE_CLIP_LIMIT: f64 = 2.0;

/// CLAHE tile grid side length
pub const CLAHE_TILE_SIZE: i32 = 8;

/// Gaussian blur kernel side for shadow segmentation
pub const SEGMENTATION_BLUR_KERNEL: i32 = 5;

/// Adaptive threshold neighborhood side length (must be odd)
pub const ADAPTIVE_BLOCK_SIZE: i32 = 15;

/// Adaptive threshold offset subtracted from the local mean
pub const ADAPTIVE_OFFSET: f64 = 4.0;

/// Hand-proximity weight falloff as a fraction of region width
pub const HAND_WEIGHT_FALLOFF: f64 = 0.3;

/// Re-binarization threshold applied after hand-proximity weighting
pub const REWEIGHT_THRESHOLD: f64 = 30.0;

/// Morphological open/close kernel side length
pub const MORPH_KERNEL_SIZE: i32 = 3;

/// Gaussian blur kernel side for light-direction estimation
pub const LIGHT_BLUR_KERNEL: i32 = 7;

/// Sobel aperture size for light-direction gradients
pub const SOBEL_KERNEL_SIZE: i32 = 5;

/// Depth below which the hand is classified as touching the face
pub const TOUCH_THRESHOLD_CM: f64 = 3.0;

/// Depth below which the hand is classified as near the face
pub const NEAR_THRESHOLD_CM: f64 = 7.0;

/// Depth below which the hand is classified as approaching
pub const APPROACH_THRESHOLD_CM: f64 = 15.0;

/// Numeric precision epsilon for guarded divisions and normalizations
pub const EPSILON: f64 = 1e-6;
