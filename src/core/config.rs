//! Configuration for the zoom controller and the device client
//!
//! Both structs are plain serde types so a host page or the CLI can load them
//! from JSON. Construction helpers validate eagerly; the controller itself
//! never has to deal with out-of-range limits.

use crate::core::constants::{
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_REQUEST_TIMEOUT_MS, MAX_SCALE, MIN_SCALE, SCALE_EPSILON,
    WHEEL_ZOOM_STEP,
};
use crate::device::types::Credentials;
use crate::{Result, ViewerError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning for the preview zoom-and-pan controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Lower scale limit; at this scale panning is disabled
    pub min_scale: f64,
    /// Upper scale limit
    pub max_scale: f64,
    /// Scale change per wheel tick
    pub wheel_step: f64,
    /// Snap the pan offset back to zero whenever the scale lands on `min_scale`
    pub reset_pan_at_min_scale: bool,
    pub touch_enabled: bool,
    pub wheel_enabled: bool,
    pub mouse_drag_enabled: bool,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            wheel_step: WHEEL_ZOOM_STEP,
            reset_pan_at_min_scale: false,
            touch_enabled: true,
            wheel_enabled: true,
            mouse_drag_enabled: true,
        }
    }
}

impl ZoomConfig {
    /// Parses a JSON document and validates the result
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ZoomConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the limits describe a usable, non-empty scale range
    pub fn validate(&self) -> Result<()> {
        if !self.min_scale.is_finite() || !self.max_scale.is_finite() {
            return Err(ViewerError::InvalidConfig(
                "scale limits must be finite".to_string(),
            ));
        }
        if self.min_scale <= 0.0 {
            return Err(ViewerError::InvalidConfig(format!(
                "min_scale must be positive, got {}",
                self.min_scale
            )));
        }
        if self.max_scale < self.min_scale {
            return Err(ViewerError::InvalidConfig(format!(
                "max_scale ({}) is below min_scale ({})",
                self.max_scale, self.min_scale
            )));
        }
        if !self.wheel_step.is_finite() || self.wheel_step <= 0.0 {
            return Err(ViewerError::InvalidConfig(format!(
                "wheel_step must be a positive number, got {}",
                self.wheel_step
            )));
        }
        Ok(())
    }

    /// Clamps a scale into `[min_scale, max_scale]`, snapping values within
    /// rounding error of a limit onto the limit
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        let scale = scale.clamp(self.min_scale, self.max_scale);
        if (scale - self.min_scale).abs() <= SCALE_EPSILON {
            self.min_scale
        } else if (self.max_scale - scale).abs() <= SCALE_EPSILON {
            self.max_scale
        } else {
            scale
        }
    }

    /// Whether `scale` sits on the lower limit, where panning is gated off
    pub fn is_min_scale(&self, scale: f64) -> bool {
        scale <= self.min_scale
    }
}

/// Connection settings for the camera's HTTP control API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Base URL of the device, e.g. `http://192.168.4.1`
    pub base_url: String,
    #[serde(default)]
    pub credentials: Option<Credentials>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl DeviceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: None,
            timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = ZoomConfig::default();
        assert_eq!(config.min_scale, 1.0);
        assert_eq!(config.max_scale, 4.0);
        assert_eq!(config.wheel_step, 0.1);
        assert!(!config.reset_pan_at_min_scale);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_clamp_scale() {
        let config = ZoomConfig::default();
        assert_eq!(config.clamp_scale(0.2), 1.0);
        assert_eq!(config.clamp_scale(2.5), 2.5);
        assert_eq!(config.clamp_scale(9.0), 4.0);
        assert_eq!(config.clamp_scale(1.0 + 1e-12), 1.0);
        assert!(config.clamp_scale(f64::NAN).is_nan());
        assert!(config.is_min_scale(1.0));
        assert!(!config.is_min_scale(1.1));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let config = ZoomConfig {
            min_scale: 3.0,
            max_scale: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ViewerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_bad_step_and_nan() {
        let zero_step = ZoomConfig {
            wheel_step: 0.0,
            ..Default::default()
        };
        assert!(zero_step.validate().is_err());

        let nan_limit = ZoomConfig {
            max_scale: f64::NAN,
            ..Default::default()
        };
        assert!(nan_limit.validate().is_err());

        let negative_min = ZoomConfig {
            min_scale: -1.0,
            ..Default::default()
        };
        assert!(negative_min.validate().is_err());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = ZoomConfig::from_json(r#"{"max_scale": 8.0, "reset_pan_at_min_scale": true}"#)
            .expect("valid config");
        assert_eq!(config.max_scale, 8.0);
        assert_eq!(config.min_scale, 1.0);
        assert!(config.reset_pan_at_min_scale);
        assert!(config.wheel_enabled);
    }

    #[test]
    fn test_from_json_reports_errors() {
        assert!(matches!(
            ZoomConfig::from_json("not json"),
            Err(ViewerError::Serialization(_))
        ));
        assert!(matches!(
            ZoomConfig::from_json(r#"{"wheel_step": -0.5}"#),
            Err(ViewerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_device_config_defaults() {
        let config: DeviceConfig =
            serde_json::from_str(r#"{"base_url": "http://192.168.4.1"}"#).expect("valid config");
        assert_eq!(config.timeout(), Duration::from_millis(5000));
        assert_eq!(config.poll_interval(), Duration::from_secs(2));
        assert!(config.credentials.is_none());
    }
}
