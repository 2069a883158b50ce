use std::time::SystemTime;

use crate::camera::VideoStream;
use crate::compose::{Compositor, SnapshotRequest};
use crate::error::Result;
use crate::export::{export, ShareResult, ShareSink};
use crate::overlay::{ModelRasterizer, OverlaySpec};

/// Snapshot processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotStage {
    CaptureFrame,
    Overlay,
    InfoCard,
    Encode,
    Export,
}

impl std::fmt::Display for SnapshotStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CaptureFrame => write!(f, "Capturing frame"),
            Self::Overlay => write!(f, "Drawing overlay"),
            Self::InfoCard => write!(f, "Drawing info card"),
            Self::Encode => write!(f, "Encoding PNG"),
            Self::Export => write!(f, "Sharing"),
        }
    }
}

/// Thread-safe progress reporting for a snapshot.
///
/// All methods have default no-op implementations.
pub trait SnapshotReporter: Send + Sync {
    /// A new stage has started.
    fn begin_stage(&self, _stage: SnapshotStage) {}

    /// The snapshot is finished, successfully or not.
    fn finish(&self) {}
}

/// Reporter that ignores every update.
pub struct NoOpReporter;
impl SnapshotReporter for NoOpReporter {}

/// What a completed snapshot produced.
#[derive(Clone, Debug)]
pub struct SnapshotOutcome {
    pub width: u32,
    pub height: u32,
    pub overlay_drawn: bool,
    pub export: ShareResult,
}

/// Composite the current frame and hand the result to `sink`.
///
/// Fails only when the stream is not ready or the final download tier fails.
pub fn take_snapshot(
    compositor: &Compositor,
    stream: &dyn VideoStream,
    overlay: &OverlaySpec,
    rasterizer: &dyn ModelRasterizer,
    request: &SnapshotRequest,
    sink: &dyn ShareSink,
    reporter: &dyn SnapshotReporter,
) -> Result<SnapshotOutcome> {
    let outcome = run(compositor, stream, overlay, rasterizer, request, sink, reporter);
    reporter.finish();
    outcome
}

fn run(
    compositor: &Compositor,
    stream: &dyn VideoStream,
    overlay: &OverlaySpec,
    rasterizer: &dyn ModelRasterizer,
    request: &SnapshotRequest,
    sink: &dyn ShareSink,
    reporter: &dyn SnapshotReporter,
) -> Result<SnapshotOutcome> {
    let result = compositor.composite(stream, overlay, rasterizer, request, reporter)?;

    reporter.begin_stage(SnapshotStage::Export);
    let export = export(
        &result,
        request.info.as_ref(),
        &compositor.config().export,
        sink,
        SystemTime::now(),
    )?;

    Ok(SnapshotOutcome {
        width: result.width,
        height: result.height,
        overlay_drawn: result.overlay_drawn,
        export,
    })
}
