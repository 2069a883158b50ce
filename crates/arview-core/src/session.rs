use std::sync::Arc;

use tracing::{debug, info};

use crate::camera::{CameraSession, CameraSource, CameraState, FacingMode};
use crate::compose::{Compositor, InfoCard, SnapshotRequest};
use crate::config::ArConfig;
use crate::error::{ArError, Result};
use crate::export::ShareSink;
use crate::geometry::Viewport;
use crate::overlay::{ModelRasterizer, OverlaySpec, DEFAULT_ORBIT};
use crate::snapshot::{take_snapshot, SnapshotOutcome, SnapshotReporter};
use crate::transform::{GestureEvent, Transform, TransformController};

/// One open AR view: camera stream, overlay placement and snapshot pipeline.
pub struct ArSession<S: CameraSource> {
    camera: CameraSession<S>,
    controller: TransformController,
    overlay: OverlaySpec,
    rasterizer: Arc<dyn ModelRasterizer>,
    compositor: Compositor,
    info: Option<InfoCard>,
}

impl<S: CameraSource> ArSession<S> {
    pub fn new(
        source: S,
        overlay: OverlaySpec,
        rasterizer: Arc<dyn ModelRasterizer>,
        info: Option<InfoCard>,
        config: ArConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            camera: CameraSession::new(source),
            controller: TransformController::new(config.transform),
            overlay,
            rasterizer,
            compositor: Compositor::new(config),
            info,
        })
    }

    pub fn start(&mut self, facing: FacingMode) -> Result<()> {
        self.camera.start(facing)
    }

    pub fn switch_camera(&mut self) -> Result<FacingMode> {
        self.camera.switch_facing()
    }

    /// Release the camera. The session cannot be restarted afterwards.
    pub fn close(&mut self) {
        self.camera.close();
        info!("AR session closed");
    }

    pub fn camera(&self) -> &CameraSession<S> {
        &self.camera
    }

    pub fn camera_state(&self) -> CameraState {
        self.camera.state()
    }

    pub fn handle_gesture(&mut self, event: &GestureEvent) {
        self.controller.handle(event);
    }

    pub fn controller(&self) -> &TransformController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut TransformController {
        &mut self.controller
    }

    pub fn transform(&self) -> Transform {
        self.controller.transform()
    }

    /// Re-center and unscale the overlay; a model viewer also returns to its default orbit.
    pub fn reset_view(&mut self) {
        self.controller.reset();
        if let OverlaySpec::RenderedModel { source } = &self.overlay {
            debug!(model = %source, orbit = %DEFAULT_ORBIT, "Resetting model orbit");
            self.rasterizer.reset_orbit(source, DEFAULT_ORBIT);
        }
    }

    /// Freeze the current transform and context for a snapshot.
    pub fn snapshot_request(&self, viewport: Viewport) -> SnapshotRequest {
        SnapshotRequest {
            viewport,
            transform: self.controller.transform(),
            facing: self.camera.facing(),
            info: self.info.clone(),
        }
    }

    pub fn snapshot(
        &self,
        viewport: Viewport,
        sink: &dyn ShareSink,
        reporter: &dyn SnapshotReporter,
    ) -> Result<SnapshotOutcome> {
        let stream = self.camera.stream().ok_or_else(|| match self.camera.state() {
            CameraState::Denied => ArError::PermissionDenied("camera access was refused".into()),
            _ => ArError::NoStream,
        })?;
        let request = self.snapshot_request(viewport);
        take_snapshot(
            &self.compositor,
            stream,
            &self.overlay,
            self.rasterizer.as_ref(),
            &request,
            sink,
            reporter,
        )
    }
}
