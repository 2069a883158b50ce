use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    CARD_DESCRIPTION_KEEP, CARD_DESCRIPTION_LIMIT, COMPACT_OVERLAY_SIZE,
    DEFAULT_RASTERIZE_TIMEOUT_MS, MAX_FONT_SIZE_PX, MAX_OVERLAY_SIZE, MAX_SCALE, MAX_SHADOW_BLUR,
    MIN_SCALE, WIDE_BREAKPOINT, WIDE_OVERLAY_SIZE,
};
use crate::error::{ArError, Result};
use crate::geometry::Viewport;

/// Straight (non-premultiplied) RGBA color.
pub type Rgba8 = [u8; 4];

const GOLD: Rgba8 = [251, 191, 36, 255];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArConfig {
    #[serde(default)]
    pub transform: TransformConfig,
    #[serde(default)]
    pub overlay: OverlaySizing,
    #[serde(default)]
    pub shadow: ShadowConfig,
    #[serde(default)]
    pub card: CardConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub compositor: CompositorConfig,
}

impl ArConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: ArConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ArError::InvalidConfig(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        let t = &self.transform;
        if !(t.min_scale > 0.0 && t.min_scale <= t.max_scale && t.max_scale.is_finite()) {
            return Err(ArError::InvalidConfig(format!(
                "scale limits must satisfy 0 < min <= max (got {}..{})",
                t.min_scale, t.max_scale
            )));
        }

        match self.overlay {
            OverlaySizing::Breakpoint {
                compact,
                wide,
                breakpoint,
            } => {
                if !overlay_size_ok(compact) || !overlay_size_ok(wide) {
                    return Err(ArError::InvalidConfig(format!(
                        "overlay sizes must be in (0, {MAX_OVERLAY_SIZE}] (got {compact}, {wide})"
                    )));
                }
                if !(0.0..=MAX_OVERLAY_SIZE).contains(&breakpoint) {
                    return Err(ArError::InvalidConfig(format!(
                        "overlay breakpoint must be in [0, {MAX_OVERLAY_SIZE}] (got {breakpoint})"
                    )));
                }
            }
            OverlaySizing::Fixed { size } => {
                if !overlay_size_ok(size) {
                    return Err(ArError::InvalidConfig(format!(
                        "overlay size must be in (0, {MAX_OVERLAY_SIZE}] (got {size})"
                    )));
                }
            }
        }

        if !(0.0..=MAX_SHADOW_BLUR).contains(&self.shadow.blur) {
            return Err(ArError::InvalidConfig(format!(
                "shadow blur must be in [0, {MAX_SHADOW_BLUR}] (got {})",
                self.shadow.blur
            )));
        }

        let c = &self.card;
        if c.width == 0 || c.height == 0 {
            return Err(ArError::InvalidConfig("card dimensions must be > 0".into()));
        }
        for (name, style) in [
            ("title", &c.title),
            ("description", &c.description),
            ("price", &c.price),
        ] {
            if !(style.size_px > 0.0 && style.size_px <= MAX_FONT_SIZE_PX) {
                return Err(ArError::InvalidConfig(format!(
                    "card.{name}.size_px must be in (0, {MAX_FONT_SIZE_PX}] (got {})",
                    style.size_px
                )));
            }
        }
        if c.description_keep > c.description_limit {
            return Err(ArError::InvalidConfig(
                "card description_keep must not exceed description_limit".into(),
            ));
        }

        if self.export.share_filename.trim().is_empty() {
            return Err(ArError::InvalidConfig("share filename must not be empty".into()));
        }

        Ok(())
    }
}

// NaN fails both comparisons.
fn overlay_size_ok(size: f64) -> bool {
    size > 0.0 && size <= MAX_OVERLAY_SIZE
}

/// Clamp bounds for the user scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
        }
    }
}

/// Untransformed overlay edge length in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum OverlaySizing {
    /// `compact` below `breakpoint` viewport width, `wide` at or above it.
    Breakpoint {
        compact: f64,
        wide: f64,
        breakpoint: f64,
    },
    Fixed {
        size: f64,
    },
}

impl OverlaySizing {
    pub fn base_size(&self, viewport: Viewport) -> f64 {
        match *self {
            Self::Breakpoint {
                compact,
                wide,
                breakpoint,
            } => {
                if viewport.width < breakpoint {
                    compact
                } else {
                    wide
                }
            }
            Self::Fixed { size } => size,
        }
    }
}

impl Default for OverlaySizing {
    fn default() -> Self {
        Self::Breakpoint {
            compact: COMPACT_OVERLAY_SIZE,
            wide: WIDE_OVERLAY_SIZE,
            breakpoint: WIDE_BREAKPOINT,
        }
    }
}

impl std::fmt::Display for OverlaySizing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Breakpoint {
                compact,
                wide,
                breakpoint,
            } => write!(f, "{compact}px / {wide}px (breakpoint {breakpoint}px)"),
            Self::Fixed { size } => write!(f, "{size}px"),
        }
    }
}

/// Drop shadow drawn under static image overlays, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    pub enabled: bool,
    pub color: Rgba8,
    /// Canvas-style blur amount; the Gaussian sigma is half of it.
    pub blur: f32,
    pub offset_x: i64,
    pub offset_y: i64,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: [0, 0, 0, 179],
            blur: 30.0,
            offset_x: 0,
            offset_y: 20,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size_px: f32,
    pub bold: bool,
    pub color: Rgba8,
    /// Baseline distance from the card's top edge.
    pub baseline: i64,
}

/// Fixed layout of the info card, anchored to the canvas bottom-left.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub width: u32,
    pub height: u32,
    pub margin_left: i64,
    pub margin_bottom: i64,
    pub corner_radius: f64,
    pub fill: Rgba8,
    pub border: Rgba8,
    pub border_width: f64,
    pub padding_left: i64,
    pub description_limit: usize,
    pub description_keep: usize,
    pub currency_symbol: String,
    pub title: TextStyle,
    pub description: TextStyle,
    pub price: TextStyle,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            width: 550,
            height: 350,
            margin_left: 40,
            margin_bottom: 40,
            corner_radius: 30.0,
            fill: [15, 15, 20, 230],
            border: [251, 191, 36, 153],
            border_width: 4.0,
            padding_left: 30,
            title: TextStyle {
                size_px: 42.0,
                bold: true,
                color: GOLD,
                baseline: 60,
            },
            description: TextStyle {
                size_px: 30.0,
                bold: false,
                color: [229, 229, 229, 255],
                baseline: 110,
            },
            price: TextStyle {
                size_px: 36.0,
                bold: true,
                color: GOLD,
                baseline: 200,
            },
            description_limit: CARD_DESCRIPTION_LIMIT,
            description_keep: CARD_DESCRIPTION_KEEP,
            currency_symbol: "$".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Filename offered to the native share tier.
    pub share_filename: String,
    /// Download filenames are `{prefix}-{unix_millis}.png`.
    pub download_prefix: String,
    pub share_title: String,
    /// `{name}` is replaced by the dish title, or removed when there is none.
    pub share_text: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            share_filename: "sushi-vision-ar.png".into(),
            download_prefix: "sushi-vision".into(),
            share_title: "My Sushi Vision creation".into(),
            share_text: "I viewed {name} in AR! #SushiVision".into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorConfig {
    /// Flip the user-facing camera frame so the snapshot matches the mirrored preview.
    pub mirror_user_facing: bool,
    /// Budget handed to each
    /// [`ModelRasterizer::rasterize`](crate::overlay::ModelRasterizer::rasterize) call. The
    /// rasterizer is trusted to honor it; the compositor only logs an overrun.
    pub rasterize_timeout_ms: u64,
}

impl CompositorConfig {
    pub fn rasterize_timeout(&self) -> Duration {
        Duration::from_millis(self.rasterize_timeout_ms)
    }
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            mirror_user_facing: true,
            rasterize_timeout_ms: DEFAULT_RASTERIZE_TIMEOUT_MS,
        }
    }
}
