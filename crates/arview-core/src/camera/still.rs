use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use image::RgbaImage;

use crate::error::Result;
use crate::geometry::VideoSize;

use super::{CameraError, CameraSource, FacingMode, VideoStream};

/// Camera source that serves a still image as the live frame.
///
/// Every acquisition opens one track; `live_track_count()` reports how many are
/// running across all streams handed out.
pub struct StillCamera {
    environment: RgbaImage,
    user: Option<RgbaImage>,
    live: Arc<AtomicUsize>,
}

impl StillCamera {
    pub fn new(frame: RgbaImage) -> Self {
        Self {
            environment: frame,
            user: None,
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(image::open(path)?.to_rgba8()))
    }

    /// Use a different frame for the user-facing camera.
    pub fn with_user_frame(mut self, frame: RgbaImage) -> Self {
        self.user = Some(frame);
        self
    }

    pub fn live_track_count(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

impl CameraSource for StillCamera {
    fn acquire(
        &mut self,
        facing: FacingMode,
    ) -> std::result::Result<Box<dyn VideoStream>, CameraError> {
        let frame = match (facing, &self.user) {
            (FacingMode::User, Some(user)) => user.clone(),
            _ => self.environment.clone(),
        };
        if frame.width() == 0 || frame.height() == 0 {
            return Err(CameraError::Unavailable("still frame is empty".into()));
        }
        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StillStream {
            frame,
            live: Arc::clone(&self.live),
            running: true,
        }))
    }
}

pub struct StillStream {
    frame: RgbaImage,
    live: Arc<AtomicUsize>,
    running: bool,
}

impl VideoStream for StillStream {
    fn dimensions(&self) -> Option<VideoSize> {
        VideoSize::new(self.frame.width(), self.frame.height()).ok()
    }

    fn capture_frame(&self) -> Result<RgbaImage> {
        Ok(self.frame.clone())
    }

    fn live_tracks(&self) -> usize {
        usize::from(self.running)
    }

    fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }
}
