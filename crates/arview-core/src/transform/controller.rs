use tracing::debug;

use crate::config::TransformConfig;
use crate::consts::EPSILON;
use crate::geometry::Point;

use super::gesture::GestureEvent;
use super::Transform;

/// Current gesture phase together with the anchors it needs.
///
/// A pinch always supersedes a drag, so the two can never be active at once.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    /// `anchor` is the pointer position minus the offset at drag start.
    Dragging { anchor: Point },
    Pinching { initial_distance: f64, initial_scale: f64 },
}

/// Turns pointer and touch input into the overlay [`Transform`].
#[derive(Clone, Debug)]
pub struct TransformController {
    transform: Transform,
    gesture: GestureState,
    limits: TransformConfig,
}

impl TransformController {
    pub fn new(limits: TransformConfig) -> Self {
        Self {
            transform: Transform::IDENTITY,
            gesture: GestureState::Idle,
            limits,
        }
    }

    /// Snapshot of the current transform.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, GestureState::Dragging { .. })
    }

    pub fn is_pinching(&self) -> bool {
        matches!(self.gesture, GestureState::Pinching { .. })
    }

    pub fn begin_drag(&mut self, pos: Point) {
        if self.is_pinching() {
            return;
        }
        self.gesture = GestureState::Dragging {
            anchor: pos - self.transform.offset(),
        };
    }

    pub fn continue_drag(&mut self, pos: Point) {
        if let GestureState::Dragging { anchor } = self.gesture {
            let offset = pos - anchor;
            self.transform.offset_x = offset.x;
            self.transform.offset_y = offset.y;
        }
    }

    pub fn end_drag(&mut self) {
        if self.is_dragging() {
            self.gesture = GestureState::Idle;
        }
    }

    /// Start a pinch from two touch points, cancelling any drag in progress.
    pub fn begin_pinch(&mut self, a: Point, b: Point) {
        self.gesture = GestureState::Pinching {
            initial_distance: a.distance(b),
            initial_scale: self.transform.scale,
        };
    }

    pub fn continue_pinch(&mut self, a: Point, b: Point) {
        let GestureState::Pinching {
            initial_distance,
            initial_scale,
        } = self.gesture
        else {
            return;
        };

        if !initial_distance.is_finite() || initial_distance < EPSILON {
            debug!(initial_distance, "Ignoring pinch with degenerate start distance");
            return;
        }

        let candidate = initial_scale * (a.distance(b) / initial_distance);
        if !candidate.is_finite() {
            return;
        }
        self.transform.scale = candidate.clamp(self.limits.min_scale, self.limits.max_scale);
    }

    pub fn end_pinch(&mut self) {
        if self.is_pinching() {
            self.gesture = GestureState::Idle;
        }
    }

    /// Back to centered, unscaled placement. Any gesture in progress is dropped.
    pub fn reset(&mut self) {
        self.transform = Transform::IDENTITY;
        self.gesture = GestureState::Idle;
    }

    /// Dispatch one raw host event.
    pub fn handle(&mut self, event: &GestureEvent) {
        match event {
            GestureEvent::PointerDown { x, y } => self.begin_drag(Point::new(*x, *y)),
            GestureEvent::PointerMove { x, y } => self.continue_drag(Point::new(*x, *y)),
            GestureEvent::PointerUp | GestureEvent::PointerLeave => self.end_drag(),
            GestureEvent::TouchStart { touches } => match touches.as_slice() {
                [only] => {
                    self.gesture = GestureState::Idle;
                    self.begin_drag(*only);
                }
                [a, b] => self.begin_pinch(*a, *b),
                _ => {}
            },
            GestureEvent::TouchMove { touches } => match touches.as_slice() {
                [only] => self.continue_drag(*only),
                [a, b] => self.continue_pinch(*a, *b),
                _ => {}
            },
            GestureEvent::TouchEnd { .. } => self.gesture = GestureState::Idle,
        }
    }
}

impl Default for TransformController {
    fn default() -> Self {
        Self::new(TransformConfig::default())
    }
}
