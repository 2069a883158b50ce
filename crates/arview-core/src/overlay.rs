use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use image::DynamicImage;
use thiserror::Error;
use tracing::warn;

/// Opaque reference to a loaded 3D model owned by the host's model viewer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModelHandle(String);

impl ModelHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What is shown on top of the camera feed. Fixed for one AR session.
#[derive(Clone, Debug)]
pub enum OverlaySpec {
    /// Encoded image bytes (PNG, JPEG, ...).
    StaticImage { raster: Vec<u8> },
    /// A model whose current view is rasterized on demand.
    RenderedModel { source: ModelHandle },
}

impl OverlaySpec {
    pub fn static_image(raster: Vec<u8>) -> Self {
        Self::StaticImage { raster }
    }

    pub fn rendered_model(source: ModelHandle) -> Self {
        Self::RenderedModel { source }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::StaticImage { .. } => "static-image",
            Self::RenderedModel { .. } => "rendered-model",
        }
    }
}

/// Model viewer camera orbit: azimuth, polar angle, and distance relative to the framed size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraOrbit {
    pub theta_deg: f64,
    pub phi_deg: f64,
    pub radius_percent: f64,
}

/// Orbit the viewer returns to when the view is reset.
pub const DEFAULT_ORBIT: CameraOrbit = CameraOrbit {
    theta_deg: 0.0,
    phi_deg: 75.0,
    radius_percent: 105.0,
};

impl std::fmt::Display for CameraOrbit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}deg {}deg {}%",
            self.theta_deg, self.phi_deg, self.radius_percent
        )
    }
}

/// Why an overlay raster could not be produced. Always recovered by omitting the overlay.
#[derive(Error, Debug)]
pub enum RasterizeError {
    #[error("rasterization timed out after {0:?}")]
    Timeout(Duration),

    #[error("model is not loaded")]
    NotLoaded,

    #[error("rasterization failed: {0}")]
    Failed(String),

    #[error("overlay decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// External capability that turns a model's current view into pixels.
pub trait ModelRasterizer: Send + Sync {
    /// Render the model's current frame.
    ///
    /// The compositor calls this on the snapshot thread and does not interrupt it, so
    /// implementations must return [`RasterizeError::Timeout`] once `timeout` has elapsed
    /// rather than block.
    fn rasterize(
        &self,
        model: &ModelHandle,
        timeout: Duration,
    ) -> std::result::Result<DynamicImage, RasterizeError>;

    /// Ask the viewer to move its camera back to `orbit`.
    fn reset_orbit(&self, _model: &ModelHandle, _orbit: CameraOrbit) {}
}

/// Rasterizer for sessions that never show a model.
pub struct NoRasterizer;

impl ModelRasterizer for NoRasterizer {
    fn rasterize(
        &self,
        _model: &ModelHandle,
        _timeout: Duration,
    ) -> std::result::Result<DynamicImage, RasterizeError> {
        Err(RasterizeError::NotLoaded)
    }
}

/// Serves a pre-rendered model snapshot from disk.
pub struct FileRasterizer {
    path: PathBuf,
}

impl FileRasterizer {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl ModelRasterizer for FileRasterizer {
    fn rasterize(
        &self,
        _model: &ModelHandle,
        _timeout: Duration,
    ) -> std::result::Result<DynamicImage, RasterizeError> {
        Ok(image::open(&self.path)?)
    }
}

/// Produce the overlay pixels for either variant.
pub(crate) fn resolve_overlay(
    overlay: &OverlaySpec,
    rasterizer: &dyn ModelRasterizer,
    timeout: Duration,
) -> std::result::Result<DynamicImage, RasterizeError> {
    match overlay {
        OverlaySpec::StaticImage { raster } => Ok(image::load_from_memory(raster)?),
        OverlaySpec::RenderedModel { source } => {
            let started = Instant::now();
            let result = rasterizer.rasterize(source, timeout);
            let elapsed = started.elapsed();
            if elapsed > timeout {
                warn!(
                    model = source.as_str(),
                    ?elapsed,
                    ?timeout,
                    "Rasterizer overran its budget"
                );
            }
            result
        }
    }
}
