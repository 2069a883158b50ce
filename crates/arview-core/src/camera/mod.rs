mod session;
mod still;

pub use session::{CameraSession, CameraState};
pub use still::{StillCamera, StillStream};

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Result;
use crate::geometry::VideoSize;

/// Which physical camera to open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacingMode {
    #[default]
    Environment,
    User,
}

impl FacingMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Environment => Self::User,
            Self::User => Self::Environment,
        }
    }
}

impl std::fmt::Display for FacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Environment => write!(f, "environment"),
            Self::User => write!(f, "user"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("camera unavailable: {0}")]
    Unavailable(String),
}

/// A live video stream. Dropping it without `stop()` leaks hardware handles, so the
/// session wraps every acquired stream in a guard that stops it.
pub trait VideoStream: Send {
    /// Native frame size, `None` until the stream metadata has arrived.
    fn dimensions(&self) -> Option<VideoSize>;

    /// Copy the current frame at native resolution.
    fn capture_frame(&self) -> Result<RgbaImage>;

    /// Number of tracks still running.
    fn live_tracks(&self) -> usize;

    /// Stop every track. Must be idempotent.
    fn stop(&mut self);
}

/// Host capability that opens camera streams.
pub trait CameraSource {
    fn acquire(
        &mut self,
        facing: FacingMode,
    ) -> std::result::Result<Box<dyn VideoStream>, CameraError>;
}
