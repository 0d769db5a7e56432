//! Payloads exchanged with the camera's JSON control API

use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP Basic credentials for the device
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        let token = BASE64_ENGINE.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `GET /api/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceStatus {
    pub status: Option<String>,
    pub rtsp: Option<String>,
    pub onvif: Option<String>,
    pub motion: bool,
    pub recording: bool,
}

impl DeviceStatus {
    /// Status text, "Online" when the device reports none
    pub fn status_label(&self) -> &str {
        match self.status.as_deref() {
            Some(status) if !status.is_empty() => status,
            _ => "Online",
        }
    }

    pub fn motion_label(&self) -> &'static str {
        if self.motion {
            "Detected"
        } else {
            "None"
        }
    }
}

/// One entry of `GET /api/sd/list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdFile {
    pub name: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
}

impl SdFile {
    pub fn size_kb(&self) -> f64 {
        self.size as f64 / 1024.0
    }

    /// Size as shown in the file table, e.g. `12.5 KB`
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.size_kb())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct SdDeleteRequest<'a> {
    pub file: &'a str,
}

/// `GET /api/wifi/scan`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiScan {
    pub networks: Vec<WifiNetwork>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WifiNetwork {
    pub ssid: String,
    /// Signal strength in dBm
    pub rssi: i32,
    #[serde(rename = "encType", default)]
    pub enc_type: i32,
}

impl WifiNetwork {
    /// Signal quality on a 0–100 scale, linear between -100 dBm and -50 dBm
    pub fn signal_percent(&self) -> u8 {
        let rssi = self.rssi.clamp(-100, -50);
        (2 * (rssi + 100)) as u8
    }

    pub fn is_secured(&self) -> bool {
        self.enc_type > 0
    }
}

/// `GET /api/wifi/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiStatus {
    pub connected: bool,
    pub ssid: Option<String>,
    pub ip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct WifiConnectRequest<'a> {
    pub ssid: &'a str,
    pub password: &'a str,
}

/// Reply to `POST /api/wifi/connect`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectReply {
    pub success: bool,
    pub message: Option<String>,
}
