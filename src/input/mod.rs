pub mod events;
pub mod gestures;
pub mod handler;

// Re-export the essential types
pub use events::{Cursor, EventHandled, InputEvent, TouchPoint};
pub use gestures::{GestureState, PanSource};
pub use handler::{NullSink, TransformController, TransformSink};
