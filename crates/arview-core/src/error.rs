use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArError {
    #[error("Camera permission denied: {0}")]
    PermissionDenied(String),

    #[error("Video stream not ready: native resolution unknown")]
    NotReady,

    #[error("No active camera stream")]
    NoStream,

    #[error("Camera error: {0}")]
    Camera(String),

    #[error("Invalid video dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid viewport: {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ArError>;
