mod blend;
mod card;
mod shadow;
mod text;

pub use blend::{blend_pixel, fit_contain};
pub use card::{card_rect, draw_info_card, format_price, truncate_description, InfoCard};
pub use shadow::gaussian_blur_array;
pub use text::{draw_text, glyph_scale, text_width};

use std::io::Cursor;

use image::imageops;
use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::{debug, info, warn};

use crate::camera::{FacingMode, VideoStream};
use crate::config::ArConfig;
use crate::consts::SHADOW_BLUR_TO_SIGMA;
use crate::error::{ArError, Result};
use crate::geometry::{OverlayPlacement, Rect, VideoSize, Viewport};
use crate::overlay::{resolve_overlay, ModelRasterizer, OverlaySpec};
use crate::snapshot::{SnapshotReporter, SnapshotStage};
use crate::transform::Transform;

/// Everything the compositor needs from the UI, captured at the moment the user pressed
/// the shutter. The transform is a copy, so later gestures cannot reach it.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapshotRequest {
    pub viewport: Viewport,
    pub transform: Transform,
    pub facing: FacingMode,
    pub info: Option<InfoCard>,
}

/// A flattened, PNG-encoded snapshot.
#[derive(Clone, Debug)]
pub struct CompositeResult {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub filename: String,
    /// False when the overlay could not be rasterized and was left out.
    pub overlay_drawn: bool,
    pub placement: OverlayPlacement,
}

/// Flattens camera frame, overlay and info card into one raster.
#[derive(Clone, Debug, Default)]
pub struct Compositor {
    config: ArConfig,
}

impl Compositor {
    pub fn new(config: ArConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ArConfig {
        &self.config
    }

    /// Where the overlay described by `transform` lands in the video buffer.
    pub fn placement(
        &self,
        viewport: Viewport,
        video: VideoSize,
        transform: &Transform,
    ) -> OverlayPlacement {
        let base_size = self.config.overlay.base_size(viewport);
        OverlayPlacement::compute(viewport, video, transform, base_size)
    }

    pub fn composite(
        &self,
        stream: &dyn VideoStream,
        overlay: &OverlaySpec,
        rasterizer: &dyn ModelRasterizer,
        request: &SnapshotRequest,
        reporter: &dyn SnapshotReporter,
    ) -> Result<CompositeResult> {
        let mut video = stream.dimensions().ok_or(ArError::NotReady)?;
        let transform = request.transform;

        reporter.begin_stage(SnapshotStage::CaptureFrame);
        let mut canvas = stream.capture_frame()?;
        if (canvas.width(), canvas.height()) != (video.width, video.height) {
            debug!(
                reported = ?video,
                captured = ?canvas.dimensions(),
                "Captured frame differs from stream metadata, using captured size"
            );
            video = VideoSize::new(canvas.width(), canvas.height())?;
        }
        if request.facing == FacingMode::User && self.config.compositor.mirror_user_facing {
            imageops::flip_horizontal_in_place(&mut canvas);
        }

        let placement = self.placement(request.viewport, video, &transform);
        debug!(
            ratio = placement.fit.ratio,
            center_x = placement.video_center.x,
            center_y = placement.video_center.y,
            size = placement.video_size,
            "Overlay mapped into video space"
        );

        reporter.begin_stage(SnapshotStage::Overlay);
        let timeout = self.config.compositor.rasterize_timeout();
        let overlay_drawn = match resolve_overlay(overlay, rasterizer, timeout) {
            Ok(raster) => {
                self.draw_overlay(&mut canvas, overlay, &raster, &placement);
                true
            }
            Err(e) => {
                warn!(kind = overlay.kind(), "Overlay unavailable, compositing without it: {e}");
                false
            }
        };

        if let Some(info) = &request.info {
            reporter.begin_stage(SnapshotStage::InfoCard);
            draw_info_card(&mut canvas, info, &self.config.card);
        }

        reporter.begin_stage(SnapshotStage::Encode);
        let png = encode_png(&canvas)?;
        info!(
            width = canvas.width(),
            height = canvas.height(),
            bytes = png.len(),
            overlay_drawn,
            "Snapshot composited"
        );

        Ok(CompositeResult {
            png,
            width: canvas.width(),
            height: canvas.height(),
            filename: self.config.export.share_filename.clone(),
            overlay_drawn,
            placement,
        })
    }

    fn draw_overlay(
        &self,
        canvas: &mut RgbaImage,
        overlay: &OverlaySpec,
        raster: &DynamicImage,
        placement: &OverlayPlacement,
    ) {
        let target = fit_contain(raster.width(), raster.height(), placement.video_rect());
        let shadow = match overlay {
            OverlaySpec::StaticImage { .. } if self.config.shadow.enabled => {
                Some(&self.config.shadow)
            }
            _ => None,
        };

        // Keep enough of the sprite around the canvas for the shadow to bleed in.
        let margin = shadow.map_or(0.0, |s| {
            (s.blur * SHADOW_BLUR_TO_SIGMA * 3.0).ceil() as f64
                + s.offset_x.unsigned_abs().max(s.offset_y.unsigned_abs()) as f64
        });
        let clip = Rect::new(
            -margin,
            -margin,
            canvas.width() as f64 + 2.0 * margin,
            canvas.height() as f64 + 2.0 * margin,
        );

        let Some((sprite, x, y)) = blend::resample_clipped(raster, target, clip) else {
            debug!("Overlay lies entirely outside the frame");
            return;
        };
        if let Some(style) = shadow {
            shadow::draw_drop_shadow(canvas, &sprite, x, y, style);
        }
        blend::blit(canvas, &sprite, x, y);
    }
}

/// Lossless encode of the final canvas.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
