#[allow(dead_code)]
mod common;

use std::time::{Duration, UNIX_EPOCH};

use arview_core::camera::FacingMode;
use arview_core::compose::{CompositeResult, Compositor, InfoCard, SnapshotRequest};
use arview_core::config::ExportConfig;
use arview_core::error::ArError;
use arview_core::export::{download_filename, export, share_text, DirectorySink, ShareResult};
use arview_core::geometry::Viewport;
use arview_core::overlay::{ModelHandle, OverlaySpec};
use arview_core::snapshot::NoOpReporter;
use arview_core::transform::Transform;

use common::{decode, solid, FailingRasterizer, RecordingSink, TestStream, BLUE};

fn composite() -> CompositeResult {
    Compositor::default()
        .composite(
            &TestStream::new(solid(64, 48, BLUE)),
            &OverlaySpec::rendered_model(ModelHandle::new("m")),
            &FailingRasterizer,
            &SnapshotRequest {
                viewport: Viewport::new(400.0, 800.0).unwrap(),
                transform: Transform::IDENTITY,
                facing: FacingMode::Environment,
                info: None,
            },
            &NoOpReporter,
        )
        .unwrap()
}

fn nigiri() -> InfoCard {
    InfoCard {
        title: "Salmon Nigiri".into(),
        description: "Fresh salmon".into(),
        price: 6.5,
    }
}

#[test]
fn test_native_share_used_when_available() {
    let result = composite();
    let sink = RecordingSink::new(true);
    let now = UNIX_EPOCH + Duration::from_millis(1_700_000_000_123);

    let outcome = export(&result, Some(&nigiri()), &ExportConfig::default(), &sink, now).unwrap();

    assert_eq!(
        outcome,
        ShareResult::Shared {
            filename: "sushi-vision-ar.png".into()
        }
    );
    let shared = sink.shared.lock().unwrap();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].0, "sushi-vision-ar.png");
    assert_eq!(shared[0].1, "I viewed Salmon Nigiri in AR! #SushiVision");
    assert_eq!(shared[0].2, result.png.len());
    assert!(sink.downloads.lock().unwrap().is_empty());
}

#[test]
fn test_rejected_share_falls_back_to_download() {
    let result = composite();
    let mut sink = RecordingSink::new(true);
    sink.reject = true;
    let now = UNIX_EPOCH + Duration::from_millis(1_700_000_000_123);

    let outcome = export(&result, None, &ExportConfig::default(), &sink, now).unwrap();

    assert_eq!(
        outcome,
        ShareResult::Downloaded {
            filename: "sushi-vision-1700000000123.png".into()
        }
    );
    let downloads = sink.downloads.lock().unwrap();
    assert_eq!(downloads.len(), 1);
    assert_eq!(downloads[0].1, result.png.len());
}

#[test]
fn test_unsupported_share_goes_straight_to_download() {
    let result = composite();
    let sink = RecordingSink::new(false);
    let outcome = export(&result, None, &ExportConfig::default(), &sink, UNIX_EPOCH).unwrap();

    assert!(matches!(outcome, ShareResult::Downloaded { .. }));
    assert!(sink.shared.lock().unwrap().is_empty());
    assert_eq!(sink.downloads.lock().unwrap().len(), 1);
}

#[test]
fn test_download_failure_is_reported() {
    let result = composite();
    let mut sink = RecordingSink::new(false);
    sink.fail_download = true;
    let err = export(&result, None, &ExportConfig::default(), &sink, UNIX_EPOCH).unwrap_err();
    assert!(matches!(err, ArError::Export(_)));
}

#[test]
fn test_directory_sink_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("shots");
    let sink = DirectorySink::new(&out);
    let result = composite();
    let now = UNIX_EPOCH + Duration::from_millis(42);

    let outcome = export(&result, None, &ExportConfig::default(), &sink, now).unwrap();

    let ShareResult::Downloaded { filename } = outcome else {
        panic!("directory sink cannot share natively");
    };
    assert_eq!(filename, "sushi-vision-42.png");
    let bytes = std::fs::read(out.join(&filename)).unwrap();
    assert_eq!(bytes, result.png);
    assert_eq!(decode(&bytes).dimensions(), (64, 48));
}

#[test]
fn test_share_text_substitution() {
    let template = ExportConfig::default().share_text;
    assert_eq!(
        share_text(&template, Some(&nigiri())),
        "I viewed Salmon Nigiri in AR! #SushiVision"
    );
    assert_eq!(share_text(&template, None), "I viewed in AR! #SushiVision");
}

#[test]
fn test_download_filename_uses_millis() {
    let now = UNIX_EPOCH + Duration::from_millis(1_234);
    assert_eq!(download_filename("shot", now), "shot-1234.png");
    assert_eq!(download_filename("shot", UNIX_EPOCH), "shot-0.png");
}
