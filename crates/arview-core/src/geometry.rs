use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{ArError, Result};
use crate::transform::Transform;

/// A position in screen or video pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// On-screen container size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ArError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Native pixel dimensions of the camera stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSize {
    pub width: u32,
    pub height: u32,
}

impl VideoSize {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ArError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }
}

/// Axis-aligned rectangle, top-left origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Square of edge `size` centered on `center`.
    pub fn centered_square(center: Point, size: f64) -> Self {
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Relationship between the raw video buffer and its cover-fit rendering in the viewport.
///
/// The preview scales the video uniformly until it fills the viewport and crops the
/// overflow, so `offset_x`/`offset_y` are usually negative on one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    pub ratio: f64,
    pub rendered_width: f64,
    pub rendered_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl CoverFit {
    pub fn new(viewport: Viewport, video: VideoSize) -> Self {
        let vw = video.width as f64;
        let vh = video.height as f64;
        let ratio = (viewport.width / vw).max(viewport.height / vh);
        let rendered_width = vw * ratio;
        let rendered_height = vh * ratio;
        Self {
            ratio,
            rendered_width,
            rendered_height,
            offset_x: (viewport.width - rendered_width) / 2.0,
            offset_y: (viewport.height - rendered_height) / 2.0,
        }
    }

    pub fn screen_to_video(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.offset_x) / self.ratio,
            (p.y - self.offset_y) / self.ratio,
        )
    }

    pub fn video_to_screen(&self, p: Point) -> Point {
        Point::new(
            p.x * self.ratio + self.offset_x,
            p.y * self.ratio + self.offset_y,
        )
    }

    pub fn screen_len_to_video(&self, len: f64) -> f64 {
        len / self.ratio
    }
}

/// Where the overlay lands, both on screen and in the raw video buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayPlacement {
    pub fit: CoverFit,
    pub screen_center: Point,
    pub screen_size: f64,
    pub video_center: Point,
    pub video_size: f64,
}

impl OverlayPlacement {
    /// Map the transformed overlay box from screen space into video pixel space.
    ///
    /// `base_size` is the untransformed overlay edge in screen pixels.
    pub fn compute(
        viewport: Viewport,
        video: VideoSize,
        transform: &Transform,
        base_size: f64,
    ) -> Self {
        let fit = CoverFit::new(viewport, video);
        let screen_center = viewport.center() + transform.offset();
        let screen_size = base_size * transform.scale;
        Self {
            fit,
            screen_center,
            screen_size,
            video_center: fit.screen_to_video(screen_center),
            video_size: fit.screen_len_to_video(screen_size),
        }
    }

    /// The overlay box in video pixel space.
    pub fn video_rect(&self) -> Rect {
        Rect::centered_square(self.video_center, self.video_size)
    }
}
