// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP implementation of the Yale cloud API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::Serialize;

use crate::error::{Error, ProtocolError};
use crate::protocol::YaleApi;
use crate::response::{self, ApiResponse, CommandReply, CycleData, DeviceSnapshot, ModeEntry};
use crate::types::LockCode;

// ============================================================================
// ApiConfig - Connection parameters
// ============================================================================

/// Configuration for the HTTP API client.
///
/// The access token is obtained by the host; this library only forwards it.
///
/// # Examples
///
/// ```
/// use yale_smart_lib::protocol::ApiConfig;
/// use std::time::Duration;
///
/// let config = ApiConfig::new()
///     .with_token("access-token")
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url(), "https://mob.yalehomesystem.co.uk/yapi");
/// ```
#[derive(Clone)]
pub struct ApiConfig {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl ApiConfig {
    /// Default API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://mob.yalehomesystem.co.uk/yapi";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration pointing at the public API.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the API root. A trailing `/` is removed.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the bearer token sent with every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the API root.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns whether a token is configured.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates an [`HttpClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not HTTP(S) or the client cannot be
    /// created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ProtocolError::InvalidAddress(self.base_url));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            base_url: self.base_url,
            client,
            token: self.token,
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP client for the Yale Smart Living cloud API.
///
/// # Examples
///
/// ```no_run
/// use yale_smart_lib::protocol::{ApiConfig, YaleApi};
///
/// # async fn example() -> yale_smart_lib::Result<()> {
/// let client = ApiConfig::new().with_token("access-token").into_client()?;
/// for device in client.get_device_list().await? {
///     println!("{} {}", device.name(), device.canonical_state()?);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    token: Option<String>,
}

#[derive(Serialize)]
struct LockRequest<'a> {
    device_id: &'a str,
    request_value: &'a str,
}

#[derive(Serialize)]
struct UnlockRequest<'a> {
    device_id: &'a str,
    pincode: &'a str,
}

impl HttpClient {
    const CYCLE_PATH: &'static str = "/api/panel/cycle/";
    const DEVICE_STATUS_PATH: &'static str = "/api/panel/device_status/";
    const LOCK_PATH: &'static str = "/api/panel/device_control/";
    const UNLOCK_PATH: &'static str = "/api/minigw/unlock/";
    const MODE_PATH: &'static str = "/api/panel/mode/";

    /// Returns the API root.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn device_status_url(&self, device_id: &str) -> String {
        format!(
            "{}?device_id={}",
            self.build_url(Self::DEVICE_STATUS_PATH),
            urlencoding::encode(device_id)
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, ProtocolError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::AuthenticationFailed);
        }

        if !response.status().is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(body = %body, "Received HTTP response");

        Ok(body)
    }

    async fn get(&self, url: &str) -> Result<String, ProtocolError> {
        tracing::debug!(url = %url, "Sending HTTP GET");
        self.send(self.client.get(url)).await
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<String, ProtocolError> {
        tracing::debug!(url = %url, "Sending HTTP POST");
        self.send(self.client.post(url).json(body)).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl YaleApi for HttpClient {
    async fn get_device_list(&self) -> Result<Vec<DeviceSnapshot>, Error> {
        let body = self.get(&self.build_url(Self::CYCLE_PATH)).await?;
        let envelope: ApiResponse<CycleData> = response::parse(&body)?;
        Ok(envelope.into_data()?.device_status)
    }

    async fn lock(&self, device_id: &str) -> Result<bool, Error> {
        let request = LockRequest {
            device_id,
            request_value: "1",
        };
        let body = self.post(&self.build_url(Self::LOCK_PATH), &request).await?;
        let reply: CommandReply = response::parse(&body)?;
        Ok(reply.accepted()?)
    }

    async fn unlock(&self, device_id: &str, code: &LockCode) -> Result<bool, Error> {
        let request = UnlockRequest {
            device_id,
            pincode: code.as_str(),
        };
        let body = self.post(&self.build_url(Self::UNLOCK_PATH), &request).await?;
        let reply: CommandReply = response::parse(&body)?;
        Ok(reply.accepted()?)
    }

    async fn get_device_state(&self, device_id: &str) -> Result<DeviceSnapshot, Error> {
        let body = self.get(&self.device_status_url(device_id)).await?;
        let envelope: ApiResponse<DeviceSnapshot> = response::parse(&body)?;
        Ok(envelope.into_data()?)
    }

    async fn get_armed_status(&self) -> Result<String, Error> {
        let body = self.get(&self.build_url(Self::MODE_PATH)).await?;
        let envelope: ApiResponse<Vec<ModeEntry>> = response::parse(&body)?;
        Ok(ModeEntry::first_mode(envelope.into_data()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url(), ApiConfig::DEFAULT_BASE_URL);
        assert!(!config.has_token());
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn config_trims_trailing_slash() {
        let config = ApiConfig::new().with_base_url("http://127.0.0.1:8080/yapi/");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080/yapi");
    }

    #[test]
    fn config_debug_redacts_token() {
        let config = ApiConfig::new().with_token("secret-token");
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn into_client_rejects_non_http_url() {
        let result = ApiConfig::new().with_base_url("ftp://example.com").into_client();
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }

    #[test]
    fn build_urls() {
        let client = ApiConfig::new()
            .with_base_url("http://localhost:9000")
            .into_client()
            .unwrap();
        assert_eq!(
            client.build_url(HttpClient::CYCLE_PATH),
            "http://localhost:9000/api/panel/cycle/"
        );
        assert_eq!(
            client.device_status_url("RF 01/2"),
            "http://localhost:9000/api/panel/device_status/?device_id=RF%2001%2F2"
        );
    }
}
