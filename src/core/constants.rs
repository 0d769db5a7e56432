//! Zoom limits and input tuning shared by the controller, its configuration
//! and the device client.

/// Smallest scale the preview can be zoomed out to (fills the element).
pub const MIN_SCALE: f64 = 1.0;

/// Largest scale the preview can be zoomed in to.
pub const MAX_SCALE: f64 = 4.0;

/// Scale change applied by a single wheel tick.
pub const WHEEL_ZOOM_STEP: f64 = 0.1;

/// Two scales closer than this are treated as equal.
pub const SCALE_EPSILON: f64 = 1e-9;

/// Pinch baselines shorter than this (in pixels) cannot produce a ratio.
pub const MIN_PINCH_DISTANCE: f64 = 1e-6;

/// How often the control panel refreshes device status.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// Per-request timeout for the device API.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;
