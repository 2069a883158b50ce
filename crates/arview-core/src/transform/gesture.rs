use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::Point;

use super::{Transform, TransformController};

/// Raw input as delivered by the host UI layer, in screen coordinates.
///
/// Touch events carry every touch point active at the time of the event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerLeave,
    TouchStart { touches: Vec<Point> },
    TouchMove { touches: Vec<Point> },
    TouchEnd {
        #[serde(default)]
        touches: Vec<Point>,
    },
}

/// A recorded sequence of gesture events.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureScript {
    #[serde(default)]
    pub events: Vec<GestureEvent>,
}

impl GestureScript {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Feed every event through `controller` and return the resulting transform.
    pub fn replay(&self, controller: &mut TransformController) -> Transform {
        for event in &self.events {
            controller.handle(event);
        }
        controller.transform()
    }
}
