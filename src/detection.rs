//! Face/hand detector collaborator interface.
//!
//! The pipeline does not run landmark detection itself; an external detector
//! supplies a face bounding box and a set of normalized hand landmarks per
//! frame through the [`FaceHandObserver`] trait. [`ReplayObserver`] replays a
//! recorded observation track for offline runs and tests.

use crate::utils::f64_to_i32_clamp;
use crate::{Error, Result};
use opencv::core::{Mat, Rect};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;

/// Axis-aligned face bounding box in frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceBox {
    #[must_use]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Center of the box in pixel coordinates
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.x) + f64::from(self.width) / 2.0,
            f64::from(self.y) + f64::from(self.height) / 2.0,
        )
    }

    /// Whether a pixel position falls inside the box
    #[must_use]
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    /// Clamp the box to the frame bounds, or `None` when nothing remains
    #[must_use]
    pub fn clamped_to(&self, frame_width: i32, frame_height: i32) -> Option<FaceBox> {
        let x = self.x.max(0);
        let y = self.y.max(0);
        let width = (self.x + self.width).min(frame_width) - x;
        let height = (self.y + self.height).min(frame_height) - y;

        if width <= 0 || height <= 0 {
            return None;
        }

        Some(FaceBox { x, y, width, height })
    }

    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A single landmark point in normalized (0-1) frame coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
}

/// Ordered hand landmark points, wrist at index 0
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HandLandmarks {
    pub points: Vec<LandmarkPoint>,
}

impl HandLandmarks {
    #[must_use]
    pub fn new(points: Vec<LandmarkPoint>) -> Self {
        Self { points }
    }

    /// The wrist landmark, if any points were detected
    #[must_use]
    pub fn wrist(&self) -> Option<LandmarkPoint> {
        self.points.first().copied()
    }

    /// Wrist position denormalized to frame pixel coordinates
    #[must_use]
    pub fn wrist_pixel(&self, frame_width: i32, frame_height: i32) -> Option<(i32, i32)> {
        let wrist = self.wrist()?;
        let px = f64_to_i32_clamp(wrist.x * f64::from(frame_width), 0, frame_width);
        let py = f64_to_i32_clamp(wrist.y * f64::from(frame_height), 0, frame_height);
        Some((px, py))
    }
}

/// What the detector collaborator supplies for one frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameObservation {
    /// Detected face bounding box, at most one per frame
    pub face: Option<FaceBox>,

    /// Detected hand landmarks, at most one hand per frame
    pub hand: Option<HandLandmarks>,
}

impl FrameObservation {
    /// Wrist position in face-local pixel coordinates, when the wrist's
    /// projected position falls inside the face box.
    #[must_use]
    pub fn wrist_in_face(&self, face: &FaceBox, frame_width: i32, frame_height: i32) -> Option<(i32, i32)> {
        let hand = self.hand.as_ref()?;
        let (px, py) = hand.wrist_pixel(frame_width, frame_height)?;

        if !face.contains(px, py) {
            return None;
        }

        Some((px - face.x, py - face.y))
    }
}

/// Per-frame source of detector observations
pub trait FaceHandObserver {
    /// Observe one frame and report detections, absent when nothing was found
    fn observe(&mut self, frame: &Mat) -> Result<FrameObservation>;
}

/// Observer that replays a recorded observation track.
///
/// Frames past the end of the track report no detections.
pub struct ReplayObserver {
    track: VecDeque<FrameObservation>,
}

impl ReplayObserver {
    #[must_use]
    pub fn new(track: Vec<FrameObservation>) -> Self {
        Self { track: track.into() }
    }

    /// Load a track from a YAML file containing a sequence of observations
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let track: Vec<FrameObservation> =
            serde_yaml::from_str(&content).map_err(|e| Error::Observation(format!("Failed to parse track: {e}")))?;

        Ok(Self::new(track))
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.track.len()
    }
}

impl FaceHandObserver for ReplayObserver {
    fn observe(&mut self, _frame: &Mat) -> Result<FrameObservation> {
        Ok(self.track.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_box_center() {
        let face = FaceBox::new(100, 100, 200, 200);
        assert_eq!(face.center(), (200.0, 200.0));
    }

    #[test]
    fn test_clamp_inside_frame_is_identity() {
        let face = FaceBox::new(10, 20, 50, 60);
        assert_eq!(face.clamped_to(640, 480), Some(face));
    }

    #[test]
    fn test_clamp_trims_overhang() {
        let face = FaceBox::new(-10, 400, 100, 200);
        let clamped = face.clamped_to(640, 480).unwrap();
        assert_eq!(clamped, FaceBox::new(0, 400, 90, 80));
    }

    #[test]
    fn test_clamp_rejects_degenerate_box() {
        assert!(FaceBox::new(700, 10, 50, 50).clamped_to(640, 480).is_none());
        assert!(FaceBox::new(10, 10, 0, 50).clamped_to(640, 480).is_none());
    }

    #[test]
    fn test_wrist_requires_points() {
        assert!(HandLandmarks::default().wrist().is_none());

        let hand = HandLandmarks::new(vec![LandmarkPoint { x: 0.5, y: 0.25 }]);
        assert_eq!(hand.wrist_pixel(640, 480), Some((320, 120)));
    }

    #[test]
    fn test_wrist_in_face_local_coordinates() {
        let observation = FrameObservation {
            face: Some(FaceBox::new(100, 100, 200, 200)),
            hand: Some(HandLandmarks::new(vec![LandmarkPoint { x: 0.25, y: 0.3125 }])),
        };
        let face = observation.face.unwrap();

        // Wrist at pixel (160, 150) falls inside the box
        assert_eq!(observation.wrist_in_face(&face, 640, 480), Some((60, 50)));
    }

    #[test]
    fn test_wrist_outside_face_is_none() {
        let observation = FrameObservation {
            face: Some(FaceBox::new(100, 100, 200, 200)),
            hand: Some(HandLandmarks::new(vec![LandmarkPoint { x: 0.9, y: 0.9 }])),
        };
        let face = observation.face.unwrap();

        assert!(observation.wrist_in_face(&face, 640, 480).is_none());
    }

    #[test]
    fn test_replay_observer_exhaustion() {
        let mut observer = ReplayObserver::new(vec![FrameObservation {
            face: Some(FaceBox::new(0, 0, 10, 10)),
            hand: None,
        }]);
        let frame = Mat::default();

        let first = observer.observe(&frame).unwrap();
        assert!(first.face.is_some());

        let second = observer.observe(&frame).unwrap();
        assert_eq!(second, FrameObservation::default());
    }

    #[test]
    fn test_observation_yaml_round_trip() {
        let observation = FrameObservation {
            face: Some(FaceBox::new(100, 100, 200, 200)),
            hand: Some(HandLandmarks::new(vec![LandmarkPoint { x: 0.5, y: 0.5 }])),
        };

        let yaml = serde_yaml::to_string(&vec![observation.clone()]).unwrap();
        let parsed: Vec<FrameObservation> = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, vec![observation]);
    }
}
