//! Client side of the camera's HTTP control API: status, SD card, Wi-Fi and
//! device configuration endpoints.

pub mod client;
pub mod types;

pub use client::DeviceClient;
pub use types::{
    ConnectReply, Credentials, DeviceStatus, SdFile, WifiNetwork, WifiScan, WifiStatus,
};
