use crate::core::{constants::MIN_PINCH_DISTANCE, geo::Point};
use crate::input::events::TouchPoint;

/// Which input started a pan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanSource {
    Touch,
    Mouse,
}

/// Gesture in progress on the preview
///
/// Pinching and panning are mutually exclusive: the touch count picks one,
/// and entering either replaces whatever was active before.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Two fingers are down. `start_distance` is the finger spread that
    /// corresponds to the committed scale.
    Pinching { start_distance: f64 },
    /// One pointer is dragging the zoomed view. `drag_start` is the pointer
    /// position minus the committed pan, so `pan = pointer - drag_start`.
    Panning {
        drag_start: Point,
        source: PanSource,
    },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    pub fn is_pinching(&self) -> bool {
        matches!(self, GestureState::Pinching { .. })
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, GestureState::Panning { .. })
    }

    /// Begins a pan anchored so that the committed pan is reproduced at
    /// `pointer`
    pub fn pan_from(pointer: Point, committed_pan: Point, source: PanSource) -> Self {
        GestureState::Panning {
            drag_start: pointer.subtract(&committed_pan),
            source,
        }
    }
}

/// Distance between the first two touches, if there are at least two
pub fn touch_spread(touches: &[TouchPoint]) -> Option<f64> {
    match touches {
        [a, b, ..] => Some(a.position.distance_to(&b.position)),
        _ => None,
    }
}

/// Whether a measured finger spread can serve as a pinch baseline
pub fn is_usable_baseline(distance: f64) -> bool {
    distance.is_finite() && distance > MIN_PINCH_DISTANCE
}

/// Unclamped pinch scale. `None` when the baseline cannot produce a ratio.
pub fn pinch_scale(base_scale: f64, start_distance: f64, distance: f64) -> Option<f64> {
    if !is_usable_baseline(start_distance) || !distance.is_finite() {
        return None;
    }
    Some(base_scale * distance / start_distance)
}

/// Re-solves the pan so the point at `anchor` (offset from the element
/// center) stays put when the scale changes from `old_scale` to `new_scale`
pub fn anchored_pan(pan: Point, anchor: Point, old_scale: f64, new_scale: f64) -> Point {
    let ratio = new_scale / old_scale;
    pan.subtract(&anchor).multiply(ratio).add(&anchor)
}
