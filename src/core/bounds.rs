use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Screen-space rectangle occupied by the preview element, as reported by
/// the host's bounding-rect query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Creates new bounds from two points
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates bounds from a DOM-style rect (left, top, width, height)
    pub fn from_rect(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(Point::new(left, top), Point::new(left + width, top + height))
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Offset of `point` from the center of the bounds
    pub fn offset_from_center(&self, point: &Point) -> Point {
        point.subtract(&self.center())
    }
}
