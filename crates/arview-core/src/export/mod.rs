mod directory;

pub use directory::DirectorySink;

use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tracing::{debug, info};

use crate::compose::{CompositeResult, InfoCard};
use crate::config::ExportConfig;
use crate::error::{ArError, Result};

pub const PNG_MIME: &str = "image/png";

/// What is offered to the native share sheet.
#[derive(Clone, Debug)]
pub struct SharePayload<'a> {
    pub bytes: &'a [u8],
    pub filename: String,
    pub mime_type: &'static str,
    pub title: String,
    pub text: String,
}

/// How the snapshot reached the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShareResult {
    Shared { filename: String },
    Downloaded { filename: String },
}

/// Native share failures. All of them fall through to the download tier.
#[derive(Error, Debug)]
pub enum ShareError {
    #[error("native share is not supported")]
    Unsupported,

    #[error("share rejected: {0}")]
    Rejected(String),

    #[error("share I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Host share/download capability.
pub trait ShareSink {
    /// Whether the native share tier exists and accepts this payload.
    fn can_share(&self, payload: &SharePayload<'_>) -> bool;

    fn share(&self, payload: &SharePayload<'_>) -> std::result::Result<(), ShareError>;

    /// Offer `bytes` as a downloadable file named `filename`.
    fn download(&self, bytes: &[u8], filename: &str) -> std::result::Result<(), ShareError>;
}

/// Share text with `{name}` substituted and whitespace collapsed.
pub fn share_text(template: &str, info: Option<&InfoCard>) -> String {
    let name = info.map_or("", |i| i.title.as_str());
    template
        .replace("{name}", name)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// `{prefix}-{unix_millis}.png`.
pub fn download_filename(prefix: &str, now: SystemTime) -> String {
    let millis = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("{prefix}-{millis}.png")
}

/// Try native share once, then download once.
pub fn export(
    result: &CompositeResult,
    info: Option<&InfoCard>,
    config: &ExportConfig,
    sink: &dyn ShareSink,
    now: SystemTime,
) -> Result<ShareResult> {
    let payload = SharePayload {
        bytes: &result.png,
        filename: result.filename.clone(),
        mime_type: PNG_MIME,
        title: config.share_title.clone(),
        text: share_text(&config.share_text, info),
    };

    if sink.can_share(&payload) {
        match sink.share(&payload) {
            Ok(()) => {
                info!(filename = %payload.filename, "Snapshot shared");
                return Ok(ShareResult::Shared {
                    filename: payload.filename,
                });
            }
            Err(e) => debug!("Native share failed, falling back to download: {e}"),
        }
    } else {
        debug!("Native share unavailable, falling back to download");
    }

    let filename = download_filename(&config.download_prefix, now);
    sink.download(&result.png, &filename)
        .map_err(|e| ArError::Export(format!("download of {filename} failed: {e}")))?;
    info!(filename = %filename, "Snapshot downloaded");
    Ok(ShareResult::Downloaded { filename })
}
