//! Prelude module for common camview types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use camview::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    config::{DeviceConfig, ZoomConfig},
    constants::{MAX_SCALE, MIN_SCALE, WHEEL_ZOOM_STEP},
    geo::Point,
    transform::{Transform, ViewportTransform},
};

pub use crate::input::{
    events::{Cursor, EventHandled, InputEvent, TouchPoint},
    gestures::{GestureState, PanSource},
    handler::{NullSink, TransformController, TransformSink},
};

pub use crate::device::{
    client::DeviceClient,
    types::{ConnectReply, Credentials, DeviceStatus, SdFile, WifiNetwork, WifiScan, WifiStatus},
};

#[cfg(feature = "wasm")]
pub use crate::web::{ElementSink, PreviewZoom};

pub use crate::{Error as ViewerError, Result};
