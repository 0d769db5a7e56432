use crate::core::{bounds::Bounds, geo::Point};

/// Input events consumed by the preview zoom controller
///
/// Touch events carry every touch that is *currently* on the surface, the
/// way the DOM `TouchEvent.touches` list does: for `TouchEnd` that is the set
/// of touches that remain after the lift.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// One or more fingers touched down
    TouchStart { touches: Vec<TouchPoint> },
    /// At least one active finger moved
    TouchMove { touches: Vec<TouchPoint> },
    /// A finger lifted or the touch was cancelled
    TouchEnd { touches: Vec<TouchPoint> },
    /// Scroll wheel tick over the element
    Wheel {
        delta_y: f64,
        position: Point,
        bounds: Bounds,
    },
    /// Mouse button pressed over the element
    MouseDown { position: Point },
    /// Mouse moved anywhere in the window
    MouseMove { position: Point },
    /// Mouse button released anywhere in the window
    MouseUp { position: Point },
}

/// Individual touch point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Point,
}

impl TouchPoint {
    pub fn new(id: u64, position: Point) -> Self {
        Self { id, position }
    }
}

/// Whether an event was consumed by the controller
///
/// `Handled` tells the host to suppress the platform default so the page
/// does not scroll or zoom underneath the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

impl EventHandled {
    pub fn is_handled(self) -> bool {
        matches!(self, EventHandled::Handled)
    }
}

/// Pointer cursor shown over the preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Zoomed in and ready to be dragged
    Grab,
    /// A mouse drag is in progress
    Grabbing,
}

impl Cursor {
    /// CSS `cursor` keyword
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
        }
    }
}
