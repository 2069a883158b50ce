use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use arview_core::camera::{CameraError, CameraSource, FacingMode, VideoStream};
use arview_core::error::Result;
use arview_core::export::{ShareError, SharePayload, ShareSink};
use arview_core::geometry::VideoSize;
use arview_core::overlay::{CameraOrbit, ModelHandle, ModelRasterizer, RasterizeError};

pub const BLUE: [u8; 4] = [0, 0, 255, 255];
pub const RED: [u8; 4] = [255, 0, 0, 255];
pub const GREEN: [u8; 4] = [0, 255, 0, 255];

pub fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

pub fn png_bytes(image: &RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode test png");
    bytes
}

pub fn decode(png: &[u8]) -> RgbaImage {
    image::load_from_memory(png).expect("decode png").to_rgba8()
}

/// Stream whose metadata can be withheld to simulate a stream that is still starting.
pub struct TestStream {
    pub frame: RgbaImage,
    pub ready: bool,
    live: Arc<AtomicUsize>,
    running: bool,
}

impl TestStream {
    pub fn new(frame: RgbaImage) -> Self {
        Self {
            frame,
            ready: true,
            live: Arc::new(AtomicUsize::new(1)),
            running: true,
        }
    }

    pub fn not_ready(frame: RgbaImage) -> Self {
        Self {
            ready: false,
            ..Self::new(frame)
        }
    }
}

impl VideoStream for TestStream {
    fn dimensions(&self) -> Option<VideoSize> {
        if self.ready {
            VideoSize::new(self.frame.width(), self.frame.height()).ok()
        } else {
            None
        }
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

/// Camera that opens two tracks (video + audio style) per acquisition and counts them.
pub struct CountingCamera {
    pub live: Arc<AtomicUsize>,
    pub acquisitions: Vec<FacingMode>,
    pub deny: bool,
}

impl CountingCamera {
    pub fn new() -> Self {
        Self {
            live: Arc::new(AtomicUsize::new(0)),
            acquisitions: Vec::new(),
            deny: false,
        }
    }

    pub fn denying() -> Self {
        Self {
            deny: true,
            ..Self::new()
        }
    }
}

struct CountingStream {
    frame: RgbaImage,
    tracks: usize,
    live: Arc<AtomicUsize>,
}

impl VideoStream for CountingStream {
    fn dimensions(&self) -> Option<VideoSize> {
        VideoSize::new(self.frame.width(), self.frame.height()).ok()
    }

    fn capture_frame(&self) -> Result<RgbaImage> {
        Ok(self.frame.clone())
    }

    fn live_tracks(&self) -> usize {
        self.tracks
    }

    fn stop(&mut self) {
        self.live.fetch_sub(self.tracks, Ordering::SeqCst);
        self.tracks = 0;
    }
}

impl CameraSource for CountingCamera {
    fn acquire(
        &mut self,
        facing: FacingMode,
    ) -> std::result::Result<Box<dyn VideoStream>, CameraError> {
        if self.deny {
            return Err(CameraError::PermissionDenied("NotAllowedError".into()));
        }
        self.acquisitions.push(facing);
        self.live.fetch_add(2, Ordering::SeqCst);
        let color = match facing {
            FacingMode::Environment => BLUE,
            FacingMode::User => GREEN,
        };
        Ok(Box::new(CountingStream {
            frame: solid(64, 48, color),
            tracks: 2,
            live: Arc::clone(&self.live),
        }))
    }
}

/// Rasterizer that always returns the same image and records orbit resets.
pub struct FixedRasterizer {
    pub image: DynamicImage,
    pub resets: Mutex<Vec<CameraOrbit>>,
}

impl FixedRasterizer {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image: DynamicImage::ImageRgba8(image),
            resets: Mutex::new(Vec::new()),
        }
    }
}

impl ModelRasterizer for FixedRasterizer {
    fn rasterize(
        &self,
        _model: &ModelHandle,
        _timeout: Duration,
    ) -> std::result::Result<DynamicImage, RasterizeError> {
        Ok(self.image.clone())
    }

    fn reset_orbit(&self, _model: &ModelHandle, orbit: CameraOrbit) {
        self.resets.lock().unwrap().push(orbit);
    }
}

/// Rasterizer that records the budget it was handed on each call.
pub struct TimeoutRecordingRasterizer {
    pub image: DynamicImage,
    pub timeouts: Mutex<Vec<Duration>>,
}

impl TimeoutRecordingRasterizer {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image: DynamicImage::ImageRgba8(image),
            timeouts: Mutex::new(Vec::new()),
        }
    }
}

impl ModelRasterizer for TimeoutRecordingRasterizer {
    fn rasterize(
        &self,
        _model: &ModelHandle,
        timeout: Duration,
    ) -> std::result::Result<DynamicImage, RasterizeError> {
        self.timeouts.lock().unwrap().push(timeout);
        Ok(self.image.clone())
    }
}

pub struct FailingRasterizer;

impl ModelRasterizer for FailingRasterizer {
    fn rasterize(
        &self,
        _model: &ModelHandle,
        timeout: Duration,
    ) -> std::result::Result<DynamicImage, RasterizeError> {
        Err(RasterizeError::Timeout(timeout))
    }
}

/// Rasterizer that announces entry and then blocks until released.
pub struct GatedRasterizer {
    image: DynamicImage,
    entered: Mutex<mpsc::Sender<()>>,
    release: Mutex<mpsc::Receiver<()>>,
}

impl GatedRasterizer {
    pub fn new(image: RgbaImage) -> (Self, mpsc::Receiver<()>, mpsc::Sender<()>) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        (
            Self {
                image: DynamicImage::ImageRgba8(image),
                entered: Mutex::new(entered_tx),
                release: Mutex::new(release_rx),
            },
            entered_rx,
            release_tx,
        )
    }
}

impl ModelRasterizer for GatedRasterizer {
    fn rasterize(
        &self,
        _model: &ModelHandle,
        timeout: Duration,
    ) -> std::result::Result<DynamicImage, RasterizeError> {
        let _ = self.entered.lock().unwrap().send(());
        match self.release.lock().unwrap().recv_timeout(Duration::from_secs(10)) {
            Ok(()) => Ok(self.image.clone()),
            Err(_) => Err(RasterizeError::Timeout(timeout)),
        }
    }
}

/// Records what reached each export tier.
pub struct RecordingSink {
    pub native: bool,
    pub reject: bool,
    pub fail_download: bool,
    pub shared: Mutex<Vec<(String, String, usize)>>,
    pub downloads: Mutex<Vec<(String, usize)>>,
}

impl RecordingSink {
    pub fn new(native: bool) -> Self {
        Self {
            native,
            reject: false,
            fail_download: false,
            shared: Mutex::new(Vec::new()),
            downloads: Mutex::new(Vec::new()),
        }
    }
}

impl ShareSink for RecordingSink {
    fn can_share(&self, payload: &SharePayload<'_>) -> bool {
        self.native && payload.mime_type == "image/png"
    }

    fn share(&self, payload: &SharePayload<'_>) -> std::result::Result<(), ShareError> {
        if self.reject {
            return Err(ShareError::Rejected("AbortError".into()));
        }
        self.shared.lock().unwrap().push((
            payload.filename.clone(),
            payload.text.clone(),
            payload.bytes.len(),
        ));
        Ok(())
    }

    fn download(&self, bytes: &[u8], filename: &str) -> std::result::Result<(), ShareError> {
        if self.fail_download {
            return Err(ShareError::Io(std::io::Error::other("disk full")));
        }
        self.downloads
            .lock()
            .unwrap()
            .push((filename.to_string(), bytes.len()));
        Ok(())
    }
}
