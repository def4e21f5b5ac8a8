//! Configuration management for the shadow depth estimation pipeline

use crate::constants;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Shadow segmentation parameters
    pub segmentation: SegmentationConfig,

    /// Light-direction estimation parameters
    pub light: LightConfig,

    /// Geometric depth model parameters
    pub geometry: GeometryConfig,

    /// Shadow physics depth model parameters
    pub physics: PhysicsConfig,

    /// Action classification thresholds
    pub classification: ClassificationConfig,
}

/// Shadow segmentation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// CLAHE contrast normalization clip limit
    pub clahe_clip_limit: f64,

    /// CLAHE tile grid side length
    pub clahe_tile_size: i32,

    /// Gaussian blur kernel side (must be odd)
    pub blur_kernel: i32,

    /// Adaptive threshold neighborhood side (must be odd and > 1)
    pub adaptive_block_size: i32,

    /// Offset subtracted from the local mean by the adaptive threshold
    pub adaptive_offset: f64,

    /// Hand-proximity weight falloff as a fraction of region width
    pub hand_weight_falloff: f64,

    /// Re-binarization threshold after hand-proximity weighting (0-255)
    pub reweight_threshold: f64,

    /// Morphological open/close kernel side
    pub morph_kernel_size: i32,
}

/// Light-direction estimation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightConfig {
    /// Gaussian blur kernel side (must be odd)
    pub blur_kernel: i32,

    /// Sobel aperture size (must be odd)
    pub sobel_kernel_size: i32,

    /// Rolling buffer capacity in frames
    pub buffer_capacity: usize,

    /// Smoothed output is emitted only above this many buffered samples
    pub min_samples: usize,

    /// Mask pixel count above which the shadow centroid overrides the gradient estimate
    pub centroid_min_pixels: i32,
}

/// Geometric depth model parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Assumed average human face width in centimeters
    pub face_width_cm: f64,
}

/// Shadow physics depth model parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Hand-to-face distance assumed at the calibration touch
    pub reference_distance_cm: f64,

    /// Shadow area that triggers the one-time calibration
    pub calibration_trigger_area: f64,

    /// Shadow area below which the model abstains
    pub min_reliable_area: f64,

    /// Non-linear response expansion exponent
    pub gamma: f64,

    /// Scale factor applied to the expanded depth
    pub scale_factor: f64,

    /// Lower output clip bound in centimeters
    pub clip_min_cm: f64,

    /// Upper output clip bound in centimeters
    pub clip_max_cm: f64,
}

/// Action classification thresholds, all in centimeters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Below this the hand is touching the face
    pub touch_cm: f64,

    /// Below this the hand is near the face
    pub near_cm: f64,

    /// Below this the hand is approaching; at or above it is away
    pub approach_cm: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            clahe_clip_limit: constants::CLAHE_CLIP_LIMIT,
            clahe_tile_size: constants::CLAHE_TILE_SIZE,
            blur_kernel: constants::SEGMENTATION_BLUR_KERNEL,
            adaptive_block_size: constants::ADAPTIVE_BLOCK_SIZE,
            adaptive_offset: constants::ADAPTIVE_OFFSET,
            hand_weight_falloff: constants::HAND_WEIGHT_FALLOFF,
            reweight_threshold: constants::REWEIGHT_THRESHOLD,
            morph_kernel_size: constants::MORPH_KERNEL_SIZE,
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            blur_kernel: constants::LIGHT_BLUR_KERNEL,
            sobel_kernel_size: constants::SOBEL_KERNEL_SIZE,
            buffer_capacity: constants::LIGHT_BUFFER_CAPACITY,
            min_samples: constants::LIGHT_MIN_SAMPLES,
            centroid_min_pixels: constants::CENTROID_OVERRIDE_MIN_PIXELS,
        }
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            face_width_cm: constants::AVERAGE_FACE_WIDTH_CM,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            reference_distance_cm: constants::CALIBRATION_REFERENCE_CM,
            calibration_trigger_area: constants::CALIBRATION_TRIGGER_AREA,
            min_reliable_area: constants::MIN_RELIABLE_SHADOW_AREA,
            gamma: constants::EXPANSION_GAMMA,
            scale_factor: constants::EXPANSION_SCALE,
            clip_min_cm: constants::DEPTH_CLIP_MIN_CM,
            clip_max_cm: constants::DEPTH_CLIP_MAX_CM,
        }
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            touch_cm: constants::TOUCH_THRESHOLD_CM,
            near_cm: constants::NEAR_THRESHOLD_CM,
            approach_cm: constants::APPROACH_THRESHOLD_CM,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        // Segmentation kernels
        if self.segmentation.blur_kernel <= 0 || self.segmentation.blur_kernel % 2 == 0 {
            return Err(Error::Config("Segmentation blur kernel must be odd and positive".to_string()));
        }
        if self.segmentation.adaptive_block_size <= 1 || self.segmentation.adaptive_block_size % 2 == 0 {
            return Err(Error::Config(
                "Adaptive threshold block size must be odd and greater than 1".to_string(),
            ));
        }
        if self.segmentation.morph_kernel_size <= 0 {
            return Err(Error::Config("Morphological kernel size must be positive".to_string()));
        }
        if self.segmentation.clahe_clip_limit <= 0.0 || self.segmentation.clahe_tile_size <= 0 {
            return Err(Error::Config("CLAHE parameters must be positive".to_string()));
        }
        if self.segmentation.hand_weight_falloff <= 0.0 {
            return Err(Error::Config("Hand weight falloff must be positive".to_string()));
        }
        if !(0.0..=255.0).contains(&self.segmentation.reweight_threshold) {
            return Err(Error::Config("Reweight threshold must be between 0 and 255".to_string()));
        }

        // Light estimation
        if self.light.blur_kernel <= 0 || self.light.blur_kernel % 2 == 0 {
            return Err(Error::Config("Light blur kernel must be odd and positive".to_string()));
        }
        if self.light.sobel_kernel_size <= 0 || self.light.sobel_kernel_size % 2 == 0 {
            return Err(Error::Config("Sobel kernel size must be odd and positive".to_string()));
        }
        if self.light.buffer_capacity == 0 {
            return Err(Error::Config("Light buffer capacity must be greater than 0".to_string()));
        }
        if self.light.min_samples >= self.light.buffer_capacity {
            return Err(Error::Config(
                "Light buffer capacity must exceed the minimum sample count".to_string(),
            ));
        }

        // Geometry
        if self.geometry.face_width_cm <= 0.0 {
            return Err(Error::Config("Face width must be positive".to_string()));
        }

        // Physics
        if self.physics.reference_distance_cm <= 0.0 {
            return Err(Error::Config("Calibration reference distance must be positive".to_string()));
        }
        if self.physics.min_reliable_area < 0.0 || self.physics.calibration_trigger_area < self.physics.min_reliable_area {
            return Err(Error::Config(
                "Calibration trigger area must be at least the minimum reliable area".to_string(),
            ));
        }
        if self.physics.gamma <= 0.0 || self.physics.scale_factor <= 0.0 {
            return Err(Error::Config("Expansion gamma and scale factor must be positive".to_string()));
        }
        if self.physics.clip_min_cm >= self.physics.clip_max_cm {
            return Err(Error::Config("Depth clip bounds must satisfy min < max".to_string()));
        }

        // Classification thresholds must be strictly ascending
        if self.classification.touch_cm >= self.classification.near_cm
            || self.classification.near_cm >= self.classification.approach_cm
        {
            return Err(Error::Config(
                "Classification thresholds must be strictly ascending".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Shadow Depth Estimation Configuration

# Shadow segmentation
segmentation:
  clahe_clip_limit: 2.0
  clahe_tile_size: 8
  blur_kernel: 5
  adaptive_block_size: 15
  adaptive_offset: 4.0
  hand_weight_falloff: 0.3
  reweight_threshold: 30.0
  morph_kernel_size: 3

# Light-direction estimation
light:
  blur_kernel: 7
  sobel_kernel_size: 5
  buffer_capacity: 40
  min_samples: 10
  centroid_min_pixels: 50

# Geometric depth model
geometry:
  face_width_cm: 14.0

# Shadow physics depth model
physics:
  reference_distance_cm: 2.0
  calibration_trigger_area: 800.0
  min_reliable_area: 400.0
  gamma: 1.7
  scale_factor: 1.2
  clip_min_cm: 1.5
  clip_max_cm: 40.0

# Action classification thresholds (cm)
classification:
  touch_cm: 3.0
  near_cm: 7.0
  approach_cm: 15.0
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_example_config_parses_to_defaults() {
        let config: Config = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.physics.calibration_trigger_area, 800.0);
        assert_eq!(config.light.buffer_capacity, 40);
        assert_eq!(config.classification.approach_cm, 15.0);
    }

    #[test]
    fn test_even_block_size_rejected() {
        let mut config = Config::default();
        config.segmentation.adaptive_block_size = 16;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_clip_bounds_rejected() {
        let mut config = Config::default();
        config.physics.clip_min_cm = 50.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_buffer_capacity_must_exceed_min_samples() {
        let mut config = Config::default();
        config.light.buffer_capacity = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unordered_thresholds_rejected() {
        let mut config = Config::default();
        config.classification.near_cm = 2.0;
        assert!(config.validate().is_err());
    }
}
