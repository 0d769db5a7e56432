//! # camview
//!
//! Zoom-and-pan for a network camera's live preview, plus a typed client for
//! the camera's HTTP control API.
//!
//! The heart of the crate is [`TransformController`]: it turns pinch, wheel
//! and drag input into a clamped scale-and-translate transform and hands that
//! transform to a [`TransformSink`] whenever it changes. The controller has
//! no host dependencies, so the same state machine drives the DOM binding in
//! [`web`] (feature `wasm`) and the headless tests.

pub mod core;
pub mod device;
pub mod input;
pub mod prelude;
#[cfg(feature = "wasm")]
pub mod web;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    config::{DeviceConfig, ZoomConfig},
    geo::Point,
    transform::{Transform, ViewportTransform},
};

pub use crate::input::{
    events::{Cursor, EventHandled, InputEvent, TouchPoint},
    gestures::GestureState,
    handler::{NullSink, TransformController, TransformSink},
};

pub use crate::device::{client::DeviceClient, types::Credentials};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Device rejected the credentials")]
    Unauthorized,

    #[error("Device error: {0}")]
    Device(String),
}

/// Error type alias for convenience
pub type Error = ViewerError;

/// Installs `env_logger` as the `log` backend. Safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
