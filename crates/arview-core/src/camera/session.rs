use tracing::{debug, info, warn};

use crate::error::{ArError, Result};

use super::{CameraError, CameraSource, FacingMode, VideoStream};

/// Stops the wrapped stream's tracks when dropped.
struct ActiveStream {
    facing: FacingMode,
    stream: Box<dyn VideoStream>,
}

impl Drop for ActiveStream {
    fn drop(&mut self) {
        self.stream.stop();
        debug!(facing = %self.facing, "Camera stream released");
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraState {
    Idle,
    Live(FacingMode),
    /// Terminal: the user refused camera access.
    Denied,
    Closed,
}

/// Owns at most one camera stream and guarantees it is released on every exit path.
pub struct CameraSession<S: CameraSource> {
    source: S,
    active: Option<ActiveStream>,
    facing: FacingMode,
    denied: bool,
    closed: bool,
}

impl<S: CameraSource> CameraSession<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            active: None,
            facing: FacingMode::default(),
            denied: false,
            closed: false,
        }
    }

    /// Open a stream for `facing`, releasing the current one first.
    pub fn start(&mut self, facing: FacingMode) -> Result<()> {
        if self.closed {
            return Err(ArError::Camera("session closed".into()));
        }
        if self.denied {
            return Err(ArError::PermissionDenied(
                "camera access was refused for this session".into(),
            ));
        }

        self.release();
        self.facing = facing;

        match self.source.acquire(facing) {
            Ok(stream) => {
                let active = ActiveStream { facing, stream };
                info!(
                    facing = %facing,
                    dimensions = ?active.stream.dimensions(),
                    "Camera stream acquired"
                );
                self.active = Some(active);
                Ok(())
            }
            Err(CameraError::PermissionDenied(msg)) => {
                warn!(facing = %facing, "Camera access denied: {msg}");
                self.denied = true;
                Err(ArError::PermissionDenied(msg))
            }
            Err(CameraError::Unavailable(msg)) => Err(ArError::Camera(msg)),
        }
    }

    /// Toggle between front and back camera. Returns the new facing mode.
    pub fn switch_facing(&mut self) -> Result<FacingMode> {
        let next = self.facing.toggled();
        self.start(next)?;
        Ok(next)
    }

    /// Stop the active stream, if any.
    pub fn release(&mut self) {
        self.active = None;
    }

    /// Release the stream and refuse further acquisition.
    pub fn close(&mut self) {
        self.release();
        self.closed = true;
    }

    pub fn stream(&self) -> Option<&dyn VideoStream> {
        self.active.as_ref().map(|a| a.stream.as_ref())
    }

    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    pub fn state(&self) -> CameraState {
        if self.closed {
            CameraState::Closed
        } else if self.denied {
            CameraState::Denied
        } else if let Some(active) = &self.active {
            CameraState::Live(active.facing)
        } else {
            CameraState::Idle
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: CameraSource> Drop for CameraSession<S> {
    fn drop(&mut self) {
        self.release();
    }
}
