use crate::{
    core::config::DeviceConfig,
    device::types::{
        ConnectReply, Credentials, DeviceStatus, SdDeleteRequest, SdFile, WifiConnectRequest,
        WifiScan, WifiStatus,
    },
    Result, ViewerError,
};
use reqwest::{header::AUTHORIZATION, Method, RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};

/// Async client for the camera's JSON control API
///
/// Every request carries the Basic credentials, if any are set. A 401 from
/// the device surfaces as [`ViewerError::Unauthorized`] so callers can show
/// the login prompt again.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    http: reqwest::Client,
    base: Url,
    credentials: Option<Credentials>,
}

impl DeviceClient {
    pub fn new(config: DeviceConfig) -> Result<Self> {
        let base = parse_base_url(&config.base_url)?;

        #[cfg(not(target_arch = "wasm32"))]
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        #[cfg(target_arch = "wasm32")]
        let http = reqwest::Client::new();

        Ok(Self {
            http,
            base,
            credentials: config.credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.credentials.is_some()
    }

    /// Stores `credentials` and checks them against the status endpoint.
    /// On failure the credentials are dropped again.
    pub async fn login(&mut self, credentials: Credentials) -> Result<DeviceStatus> {
        log::info!("logging in to {} as {}", self.base, credentials.username);
        self.credentials = Some(credentials);
        match self.status().await {
            Ok(status) => Ok(status),
            Err(e) => {
                log::warn!("login to {} failed: {}", self.base, e);
                self.credentials = None;
                Err(e)
            }
        }
    }

    pub fn logout(&mut self) {
        self.credentials = None;
    }

    /// Absolute URL for an API path such as `api/status`
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ViewerError::InvalidUrl(format!("{}: {}", path, e)))
    }

    /// Link that downloads a recording from the SD card
    pub fn sd_download_url(&self, file: &str) -> Result<Url> {
        let mut url = self.endpoint("api/sd/download")?;
        url.query_pairs_mut().append_pair("file", file);
        Ok(url)
    }

    /// Link to a single JPEG frame
    pub fn snapshot_url(&self) -> Result<Url> {
        self.endpoint("snapshot")
    }

    pub async fn status(&self) -> Result<DeviceStatus> {
        self.get_json("api/status").await
    }

    pub async fn sd_files(&self) -> Result<Vec<SdFile>> {
        self.get_json("api/sd/list").await
    }

    pub async fn delete_sd_file(&self, file: &str) -> Result<()> {
        log::info!("deleting {} from SD card", file);
        self.post_json("api/sd/delete", &SdDeleteRequest { file })
            .await
            .map(drop)
    }

    pub async fn wifi_scan(&self) -> Result<WifiScan> {
        self.get_json("api/wifi/scan").await
    }

    pub async fn wifi_status(&self) -> Result<WifiStatus> {
        self.get_json("api/wifi/status").await
    }

    /// Asks the device to join `ssid`. The device restarts if it succeeds.
    pub async fn wifi_connect(&self, ssid: &str, password: &str) -> Result<ConnectReply> {
        log::info!("requesting wifi connection to {}", ssid);
        let response = self
            .post_json("api/wifi/connect", &WifiConnectRequest { ssid, password })
            .await?;
        Ok(response.json().await?)
    }

    /// Sets one configuration key, e.g. `("resolution", "VGA")`
    pub async fn set_config(&self, key: &str, value: serde_json::Value) -> Result<()> {
        let mut body = serde_json::Map::new();
        body.insert(key.to_string(), value);
        self.post_json("api/config", &body).await.map(drop)
    }

    pub async fn toggle_recording(&self) -> Result<()> {
        self.post_empty("api/record").await
    }

    pub async fn reboot(&self) -> Result<()> {
        log::warn!("rebooting {}", self.base);
        self.post_empty("api/reboot").await
    }

    pub async fn factory_reset(&self) -> Result<()> {
        log::warn!("factory reset requested for {}", self.base);
        self.post_empty("api/factory_reset").await
    }

    /// Fetches status every `period` until `on_update` returns `false`.
    /// Failed fetches are handed to the callback rather than ending the loop.
    #[cfg(feature = "tokio-runtime")]
    pub async fn poll_status<F>(&self, period: std::time::Duration, mut on_update: F)
    where
        F: FnMut(Result<DeviceStatus>) -> bool,
    {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let update = self.status().await;
            if let Err(e) = &update {
                log::debug!("status poll failed: {}", e);
            }
            if !on_update(update) {
                break;
            }
        }
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        let builder = self.http.request(method, url);
        Ok(match &self.credentials {
            Some(credentials) => builder.header(AUTHORIZATION, credentials.authorization_header()),
            None => builder,
        })
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response> {
        let response = builder.send().await?;
        match response.status() {
            StatusCode::UNAUTHORIZED => Err(ViewerError::Unauthorized),
            status if !status.is_success() => Err(ViewerError::Device(format!(
                "{} returned {}",
                path, status
            ))),
            _ => Ok(response),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        log::debug!("GET {}", path);
        let builder = self.request(Method::GET, path)?;
        let response = self.send(builder, path).await?;
        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        log::debug!("POST {}", path);
        let builder = self.request(Method::POST, path)?.json(body);
        self.send(builder, path).await
    }

    async fn post_empty(&self, path: &str) -> Result<()> {
        log::debug!("POST {}", path);
        let builder = self.request(Method::POST, path)?;
        self.send(builder, path).await.map(drop)
    }
}

/// Parses the device base URL, adding a scheme and trailing slash so that
/// relative API paths join underneath it
fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ViewerError::InvalidUrl("device URL is empty".to_string()));
    }
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };
    let mut url =
        Url::parse(&with_scheme).map_err(|e| ViewerError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
