//! Edge case tests for degenerate detector output and boundary conditions

mod test_helpers;

use shadow_depth::action::ActionState;
use shadow_depth::config::Config;
use shadow_depth::detection::{FaceBox, FrameObservation, HandLandmarks, LandmarkPoint};
use shadow_depth::session::ShadowDepthSession;
use test_helpers::uniform_bgr;

/// A face box entirely outside the frame is treated as no detection
#[test]
fn test_out_of_frame_face_box_is_absent() {
    let mut session = ShadowDepthSession::with_defaults();
    let frame = uniform_bgr(480, 640, 180.0);
    let observation = FrameObservation {
        face: Some(FaceBox::new(700, 500, 100, 100)),
        hand: None,
    };

    let report = session.process_frame(&frame, &observation).unwrap();
    assert_eq!(report.action, ActionState::NoAction);
    assert!(report.depth.is_none());
}

/// A partially out-of-frame face box is clamped and still processed
#[test]
fn test_overhanging_face_box_is_clamped() {
    let mut session = ShadowDepthSession::with_defaults();
    let frame = uniform_bgr(480, 640, 180.0);
    let observation = FrameObservation {
        face: Some(FaceBox::new(-50, -50, 200, 200)),
        hand: None,
    };

    let report = session.process_frame(&frame, &observation).unwrap();
    assert_eq!(report.shadow_area, 0);
    assert_eq!(report.action, ActionState::NoAction);
}

/// A zero-size face box is treated as no detection
#[test]
fn test_degenerate_face_box_is_absent() {
    let mut session = ShadowDepthSession::with_defaults();
    let frame = uniform_bgr(480, 640, 180.0);
    let observation = FrameObservation {
        face: Some(FaceBox::new(100, 100, 0, 0)),
        hand: None,
    };

    let report = session.process_frame(&frame, &observation).unwrap();
    assert_eq!(report.action, ActionState::NoAction);
}

/// Hand landmarks without any points behave like a missing hand
#[test]
fn test_empty_hand_landmarks_abstain() {
    let mut session = ShadowDepthSession::with_defaults();
    let frame = uniform_bgr(480, 640, 180.0);
    let observation = FrameObservation {
        face: Some(FaceBox::new(100, 100, 200, 200)),
        hand: Some(HandLandmarks::default()),
    };

    let report = session.process_frame(&frame, &observation).unwrap();
    assert_eq!(report.action, ActionState::NoAction);
    assert!(report.depth.is_none());
}

/// A wrist outside the face box must not produce a segmentation hint, but
/// geometry still works
#[test]
fn test_wrist_outside_face_still_measures_geometry() {
    let mut session = ShadowDepthSession::with_defaults();
    let frame = uniform_bgr(480, 640, 180.0);
    let observation = FrameObservation {
        face: Some(FaceBox::new(100, 100, 200, 200)),
        hand: Some(HandLandmarks::new(vec![LandmarkPoint { x: 0.95, y: 0.95 }])),
    };

    let report = session.process_frame(&frame, &observation).unwrap();
    assert!(report.depth.is_some());
    assert_eq!(report.action, ActionState::Away);
}

/// A wrist inside the face box classifies as touching on a shadowless frame
#[test]
fn test_wrist_on_face_center_is_touching() {
    let mut session = ShadowDepthSession::with_defaults();
    let frame = uniform_bgr(480, 640, 180.0);

    // Wrist at pixel (208, 208), face center (200, 200): 11.3 px away,
    // 0.79 cm at 200 px face width
    let observation = FrameObservation {
        face: Some(FaceBox::new(100, 100, 200, 200)),
        hand: Some(HandLandmarks::new(vec![LandmarkPoint { x: 0.325, y: 0.4333333 }])),
    };

    let report = session.process_frame(&frame, &observation).unwrap();
    let depth = report.depth.unwrap();
    assert!(depth.cm < 3.0);
    assert_eq!(report.action, ActionState::Touching);
}

/// Tiny face regions segment without error
#[test]
fn test_tiny_face_region_processes() {
    let mut session = ShadowDepthSession::with_defaults();
    let frame = uniform_bgr(480, 640, 180.0);
    let observation = FrameObservation {
        face: Some(FaceBox::new(10, 10, 4, 4)),
        hand: None,
    };

    let report = session.process_frame(&frame, &observation).unwrap();
    assert_eq!(report.action, ActionState::NoAction);
}

/// Config round trip through a file preserves validation
#[test]
fn test_config_file_round_trip() {
    let dir = std::env::temp_dir();
    let path = dir.join("shadow_depth_config_test.yaml");

    let config = Config::default();
    config.to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert!(loaded.validate().is_ok());
    assert_eq!(loaded.physics.gamma, config.physics.gamma);
    assert_eq!(loaded.light.buffer_capacity, config.light.buffer_capacity);

    std::fs::remove_file(&path).ok();
}
