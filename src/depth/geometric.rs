//! Geometric depth estimation from hand and face landmark positions.
//!
//! More robust than the shadow-based model under flat indoor lighting, and
//! requires no calibration; this is the fallback whenever the physics model
//! abstains.

use crate::config::GeometryConfig;
use crate::constants::EPSILON;
use crate::detection::{FaceBox, HandLandmarks};

/// Depth model converting wrist-to-face pixel distance into centimeters
/// using the face-box width as the scale reference.
#[derive(Debug, Clone)]
pub struct GeometricDepthModel {
    config: GeometryConfig,
}

impl GeometricDepthModel {
    #[must_use]
    pub fn new(config: GeometryConfig) -> Self {
        Self { config }
    }

    /// Estimate the hand-to-face distance in centimeters.
    ///
    /// Returns `None` when either detection is missing or the face box is
    /// degenerate.
    #[must_use]
    pub fn estimate(
        &self,
        hand: Option<&HandLandmarks>,
        face: Option<&FaceBox>,
        frame_width: i32,
        frame_height: i32,
    ) -> Option<f64> {
        let hand = hand?;
        let face = face?;
        let wrist = hand.wrist()?;

        let hand_x = wrist.x * f64::from(frame_width);
        let hand_y = wrist.y * f64::from(frame_height);

        let (face_x, face_y) = face.center();

        let pixel_distance = ((hand_x - face_x).powi(2) + (hand_y - face_y).powi(2)).sqrt();

        let pixels_per_cm = f64::from(face.width) / self.config.face_width_cm;
        if pixels_per_cm <= EPSILON {
            return None;
        }

        Some(pixel_distance / pixels_per_cm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::LandmarkPoint;

    fn model() -> GeometricDepthModel {
        GeometricDepthModel::new(GeometryConfig::default())
    }

    fn hand_at(x: f64, y: f64) -> HandLandmarks {
        HandLandmarks::new(vec![LandmarkPoint { x, y }])
    }

    #[test]
    fn test_missing_inputs_abstain() {
        let face = FaceBox::new(100, 100, 200, 200);
        let hand = hand_at(0.5, 0.5);

        assert!(model().estimate(None, Some(&face), 640, 480).is_none());
        assert!(model().estimate(Some(&hand), None, 640, 480).is_none());
        assert!(model()
            .estimate(Some(&HandLandmarks::default()), Some(&face), 640, 480)
            .is_none());
    }

    #[test]
    fn test_known_distance() {
        // Wrist at (480, 240), face center at (200, 200):
        // pixel distance = sqrt(280^2 + 40^2) = sqrt(80000)
        let face = FaceBox::new(100, 100, 200, 200);
        let hand = hand_at(0.75, 0.5);

        let depth = model().estimate(Some(&hand), Some(&face), 640, 480).unwrap();
        let expected = 80000.0_f64.sqrt() / (200.0 / 14.0);
        assert!((depth - expected).abs() < 1e-9);
    }

    #[test]
    fn test_scale_consistency() {
        // Doubling both the pixel distance and the face width leaves the
        // centimeter distance unchanged
        let face = FaceBox::new(100, 100, 200, 200);
        let hand = hand_at(0.75, 0.5);
        let depth = model().estimate(Some(&hand), Some(&face), 640, 480).unwrap();

        let face_2x = FaceBox::new(200, 200, 400, 400);
        let depth_2x = model().estimate(Some(&hand), Some(&face_2x), 1280, 960).unwrap();

        assert!((depth - depth_2x).abs() < 1e-9);
    }

    #[test]
    fn test_zero_width_face_abstains() {
        let face = FaceBox::new(100, 100, 0, 200);
        let hand = hand_at(0.75, 0.5);

        assert!(model().estimate(Some(&hand), Some(&face), 640, 480).is_none());
    }
}
