/// Lower bound of the user-controlled overlay scale.
pub const MIN_SCALE: f64 = 0.5;

/// Upper bound of the user-controlled overlay scale.
pub const MAX_SCALE: f64 = 3.0;

/// Overlay box edge (CSS px) on compact viewports.
pub const COMPACT_OVERLAY_SIZE: f64 = 288.0;

/// Overlay box edge (CSS px) on wide viewports.
pub const WIDE_OVERLAY_SIZE: f64 = 384.0;

/// Viewport width (CSS px) at and above which the wide overlay size applies.
pub const WIDE_BREAKPOINT: f64 = 640.0;

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f64 = 1e-9;

/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Ratio between an HTML canvas `shadowBlur` value and the Gaussian sigma it produces.
pub const SHADOW_BLUR_TO_SIGMA: f32 = 0.5;

/// Default time budget for rasterizing a 3D model frame.
pub const DEFAULT_RASTERIZE_TIMEOUT_MS: u64 = 3_000;

/// Descriptions longer than this many characters are truncated on the info card.
pub const CARD_DESCRIPTION_LIMIT: usize = 45;

/// Characters kept from a truncated description, before the ellipsis.
pub const CARD_DESCRIPTION_KEEP: usize = 42;

/// Largest accepted info-card font size, in pixels.
pub const MAX_FONT_SIZE_PX: f32 = 200.0;

/// Largest accepted drop-shadow blur radius.
pub const MAX_SHADOW_BLUR: f32 = 200.0;

/// Largest accepted overlay box edge or breakpoint, in CSS px.
pub const MAX_OVERLAY_SIZE: f64 = 4096.0;
