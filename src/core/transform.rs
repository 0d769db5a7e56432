use crate::core::constants::MIN_SCALE;
use crate::core::geo::Point;

/// A scale plus translation applied to the preview element
///
/// `pan` is expressed in screen pixels. When rendered as CSS the translation
/// is divided by `scale` because `translate` runs inside the scaled space,
/// so the element moves exactly `pan` pixels on screen at any zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Scale factor (1.0 = no scaling)
    pub scale: f64,
    /// Screen-space translation in pixels
    pub pan: Point,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn new(scale: f64, pan: Point) -> Self {
        Self { scale, pan }
    }

    /// Create identity transform (no change)
    pub fn identity() -> Self {
        Self::new(MIN_SCALE, Point::origin())
    }

    /// Translation as written into the CSS `translate()` term
    pub fn css_translate(&self) -> Point {
        self.pan.divide(self.scale)
    }

    /// CSS `transform` value: `scale(S) translate(Xpx,Ypx)`
    pub fn to_css(&self) -> String {
        let translate = self.css_translate();
        format!(
            "scale({}) translate({}px,{}px)",
            self.scale, translate.x, translate.y
        )
    }

    /// Maps an element-local offset (relative to the element center, where
    /// the transform origin sits) to its on-screen offset from the same center
    pub fn apply(&self, local: Point) -> Point {
        local.multiply(self.scale).add(&self.pan)
    }

    /// Inverse of [`Transform::apply`]
    pub fn invert(&self, screen: Point) -> Point {
        screen.subtract(&self.pan).divide(self.scale)
    }
}

/// The live transform together with the values committed at the end of the
/// previous gesture, which serve as the baseline for the next one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    pub scale: f64,
    pub pan: Point,
    pub last_scale: f64,
    pub last_pan: Point,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportTransform {
    pub fn new() -> Self {
        Self {
            scale: MIN_SCALE,
            pan: Point::origin(),
            last_scale: MIN_SCALE,
            last_pan: Point::origin(),
        }
    }

    /// The transform currently shown
    pub fn current(&self) -> Transform {
        Transform::new(self.scale, self.pan)
    }

    /// The transform as of the last commit
    pub fn committed(&self) -> Transform {
        Transform::new(self.last_scale, self.last_pan)
    }

    /// Copies the live values into the committed baseline
    pub fn commit(&mut self) {
        self.last_scale = self.scale;
        self.last_pan = self.pan;
    }

    pub fn commit_pan(&mut self) {
        self.last_pan = self.pan;
    }

    /// Whether there are live changes that have not been committed
    pub fn is_dirty(&self) -> bool {
        self.current() != self.committed()
    }

    /// Zeroes both the live and the committed pan
    pub fn clear_pan(&mut self) {
        self.pan = Point::origin();
        self.last_pan = Point::origin();
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
