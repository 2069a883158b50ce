#[allow(dead_code)]
mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use arview_core::camera::{CameraSession, CameraState, FacingMode, StillCamera};
use arview_core::error::ArError;

use common::{solid, CountingCamera, BLUE, GREEN};

#[test]
fn test_switching_twice_leaves_one_stream_live() {
    let camera = CountingCamera::new();
    let live = Arc::clone(&camera.live);
    let mut session = CameraSession::new(camera);

    session.start(FacingMode::Environment).unwrap();
    assert_eq!(live.load(Ordering::SeqCst), 2);

    assert_eq!(session.switch_facing().unwrap(), FacingMode::User);
    assert_eq!(session.switch_facing().unwrap(), FacingMode::Environment);

    assert_eq!(live.load(Ordering::SeqCst), 2);
    assert_eq!(session.stream().unwrap().live_tracks(), 2);
    assert_eq!(session.state(), CameraState::Live(FacingMode::Environment));
    assert_eq!(
        session.source().acquisitions,
        vec![FacingMode::Environment, FacingMode::User, FacingMode::Environment]
    );
}

#[test]
fn test_close_releases_and_refuses_restart() {
    let camera = CountingCamera::new();
    let live = Arc::clone(&camera.live);
    let mut session = CameraSession::new(camera);

    session.start(FacingMode::User).unwrap();
    session.close();
    assert_eq!(live.load(Ordering::SeqCst), 0);
    assert_eq!(session.state(), CameraState::Closed);
    assert!(session.stream().is_none());
    assert!(matches!(session.start(FacingMode::User), Err(ArError::Camera(_))));
    assert_eq!(live.load(Ordering::SeqCst), 0);
}

#[test]
fn test_drop_releases_stream() {
    let camera = CountingCamera::new();
    let live = Arc::clone(&camera.live);
    {
        let mut session = CameraSession::new(camera);
        session.start(FacingMode::Environment).unwrap();
        assert_eq!(live.load(Ordering::SeqCst), 2);
    }
    assert_eq!(live.load(Ordering::SeqCst), 0);
}

#[test]
fn test_early_return_releases_stream() {
    let camera = CountingCamera::new();
    let live = Arc::clone(&camera.live);
    let result: Result<(), ArError> = (|| {
        let mut session = CameraSession::new(camera);
        session.start(FacingMode::Environment)?;
        assert_eq!(live.load(Ordering::SeqCst), 2);
        Err(ArError::NotReady)
    })();
    assert!(result.is_err());
    assert_eq!(live.load(Ordering::SeqCst), 0);
}

#[test]
fn test_permission_denied_is_terminal() {
    let mut session = CameraSession::new(CountingCamera::denying());

    let err = session.start(FacingMode::Environment).unwrap_err();
    assert!(matches!(err, ArError::PermissionDenied(_)));
    assert_eq!(session.state(), CameraState::Denied);
    assert!(session.stream().is_none());

    assert!(matches!(session.switch_facing(), Err(ArError::PermissionDenied(_))));
    assert!(session.source().acquisitions.is_empty());
}

#[test]
fn test_still_camera_serves_facing_specific_frames() {
    let camera = StillCamera::new(solid(32, 24, BLUE)).with_user_frame(solid(16, 16, GREEN));
    let mut session = CameraSession::new(camera);

    session.start(FacingMode::Environment).unwrap();
    let frame = session.stream().unwrap().capture_frame().unwrap();
    assert_eq!(frame.get_pixel(0, 0).0, BLUE);
    assert_eq!(session.source().live_track_count(), 1);

    session.switch_facing().unwrap();
    let stream = session.stream().unwrap();
    assert_eq!(stream.dimensions().unwrap().width, 16);
    assert_eq!(stream.capture_frame().unwrap().get_pixel(0, 0).0, GREEN);
    assert_eq!(session.source().live_track_count(), 1);

    session.release();
    assert_eq!(session.source().live_track_count(), 0);
    assert_eq!(session.state(), CameraState::Idle);
}

#[test]
fn test_empty_still_frame_is_unavailable() {
    let mut session = CameraSession::new(StillCamera::new(image::RgbaImage::new(0, 0)));
    assert!(matches!(
        session.start(FacingMode::Environment),
        Err(ArError::Camera(_))
    ));
    assert_eq!(session.state(), CameraState::Idle);
}

#[test]
fn test_facing_toggle() {
    assert_eq!(FacingMode::default(), FacingMode::Environment);
    assert_eq!(FacingMode::Environment.toggled(), FacingMode::User);
    assert_eq!(FacingMode::User.toggled(), FacingMode::Environment);
}
