mod controller;
mod gesture;

pub use controller::{GestureState, TransformController};
pub use gesture::{GestureEvent, GestureScript};

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// User-driven placement of the overlay.
///
/// `offset_x`/`offset_y` displace the overlay center from the viewport center in screen
/// pixels; `scale` multiplies the base overlay size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        offset_x: 0.0,
        offset_y: 0.0,
        scale: 1.0,
    };

    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::fmt::Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "offset ({:.1}, {:.1}) scale {:.3}",
            self.offset_x, self.offset_y, self.scale
        )
    }
}
