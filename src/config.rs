// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration settings.
//!
//! Hosts usually persist these as JSON alongside their credentials:
//!
//! ```
//! use std::time::Duration;
//! use yale_smart_lib::config::Settings;
//!
//! let settings = Settings::from_json(r#"{
//!     "token": "access-token",
//!     "code": "123456",
//!     "scan_interval_secs": 30,
//!     "confirm": {"max_attempts": 20}
//! }"#).unwrap();
//!
//! assert_eq!(settings.scan_interval(), Duration::from_secs(30));
//! assert_eq!(settings.confirm_policy().unwrap().max_attempts(), 20);
//! assert!(settings.default_code().unwrap().is_some());
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::confirm::ConfirmPolicy;
use crate::error::{ParseError, ValueError};
use crate::types::LockCode;

const fn default_scan_interval_secs() -> u64 {
    15
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_max_attempts() -> u32 {
    ConfirmPolicy::DEFAULT_MAX_ATTEMPTS
}

#[allow(clippy::cast_possible_truncation)]
const fn default_delay_ms() -> u64 {
    ConfirmPolicy::DEFAULT_DELAY.as_millis() as u64
}

/// Confirmation loop settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfirmSettings {
    /// Polls before a command is reported unconfirmed.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Milliseconds between polls.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for ConfirmSettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}

/// Settings for one Yale account.
#[derive(Clone, Deserialize)]
pub struct Settings {
    /// API root; the public endpoint when absent.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Bearer token obtained by the host.
    #[serde(default)]
    pub token: Option<String>,
    /// Code used when an unlock request carries none.
    #[serde(default)]
    pub code: Option<String>,
    /// Seconds between device list polls.
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,
    /// Seconds before an API request is abandoned.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Confirmation loop limits.
    #[serde(default)]
    pub confirm: ConfirmSettings,
}

impl Settings {
    /// Parses settings from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] for malformed input.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Returns how often the host should call
    /// [`Coordinator::refresh`](crate::coordinator::Coordinator::refresh).
    #[must_use]
    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the validated default unlock code.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidLockCode`] if a code is set but malformed.
    pub fn default_code(&self) -> Result<Option<LockCode>, ValueError> {
        self.code.as_deref().map(LockCode::new).transpose()
    }

    /// Returns the confirmation policy.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::OutOfRange`] for an invalid attempt count.
    pub fn confirm_policy(&self) -> Result<ConfirmPolicy, ValueError> {
        ConfirmPolicy::new(
            self.confirm.max_attempts,
            Duration::from_millis(self.confirm.delay_ms),
        )
    }

    /// Builds the HTTP API client configuration.
    #[cfg(feature = "http")]
    #[must_use]
    pub fn api_config(&self) -> crate::protocol::ApiConfig {
        let mut config = crate::protocol::ApiConfig::new().with_timeout(self.timeout());
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.as_str());
        }
        if let Some(token) = &self.token {
            config = config.with_token(token.as_str());
        }
        config
    }

    /// Builds a coordinator wired with these settings.
    ///
    /// # Errors
    ///
    /// Returns error if the code or confirmation settings are invalid, or the
    /// HTTP client cannot be created.
    #[cfg(feature = "http")]
    pub fn into_coordinator(
        self,
    ) -> Result<crate::coordinator::Coordinator<crate::protocol::HttpClient>, crate::Error> {
        let policy = self.confirm_policy()?;
        let code = self.default_code()?;
        let client = self.api_config().into_client()?;

        let mut coordinator =
            crate::coordinator::Coordinator::new(client).with_confirm_policy(policy);
        if let Some(code) = code {
            coordinator = coordinator.with_default_code(code);
        }
        Ok(coordinator)
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("code", &self.code.as_ref().map(|_| "<redacted>"))
            .field("scan_interval_secs", &self.scan_interval_secs)
            .field("timeout_secs", &self.timeout_secs)
            .field("confirm", &self.confirm)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_object() {
        let settings = Settings::from_json("{}").unwrap();
        assert!(settings.base_url.is_none());
        assert!(settings.token.is_none());
        assert_eq!(settings.scan_interval(), Duration::from_secs(15));
        assert_eq!(settings.timeout(), Duration::from_secs(10));
        assert_eq!(settings.confirm, ConfirmSettings::default());
        assert_eq!(settings.confirm_policy().unwrap(), ConfirmPolicy::default());
        assert_eq!(settings.default_code().unwrap(), None);
    }

    #[test]
    fn invalid_code_rejected() {
        let settings = Settings::from_json(r#"{"code": "12ab"}"#).unwrap();
        assert_eq!(settings.default_code(), Err(ValueError::InvalidLockCode));
    }

    #[test]
    fn zero_attempts_rejected() {
        let settings = Settings::from_json(r#"{"confirm": {"max_attempts": 0}}"#).unwrap();
        assert!(matches!(
            settings.confirm_policy(),
            Err(ValueError::OutOfRange { actual: 0, .. })
        ));
    }

    #[test]
    fn partial_confirm_section_keeps_defaults() {
        let settings = Settings::from_json(r#"{"confirm": {"delay_ms": 250}}"#).unwrap();
        let policy = settings.confirm_policy().unwrap();
        assert_eq!(policy.max_attempts(), 30);
        assert_eq!(policy.delay(), Duration::from_millis(250));
    }

    #[test]
    fn debug_redacts_secrets() {
        let settings = Settings::from_json(r#"{"token": "tok-123", "code": "654321"}"#).unwrap();
        let debug = format!("{settings:?}");
        assert!(!debug.contains("tok-123"));
        assert!(!debug.contains("654321"));
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            Settings::from_json("{"),
            Err(ParseError::Json(_))
        ));
    }

    #[cfg(feature = "http")]
    #[test]
    fn api_config_from_settings() {
        let settings = Settings::from_json(
            r#"{"base_url": "http://127.0.0.1:1234/", "token": "t", "timeout_secs": 3}"#,
        )
        .unwrap();
        let config = settings.api_config();
        assert_eq!(config.base_url(), "http://127.0.0.1:1234");
        assert!(config.has_token());
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }

    #[cfg(feature = "http")]
    #[test]
    fn into_coordinator_applies_policy() {
        let settings = Settings::from_json(
            r#"{"base_url": "http://127.0.0.1:1234", "confirm": {"max_attempts": 5}}"#,
        )
        .unwrap();
        let coordinator = settings.into_coordinator().unwrap();
        assert_eq!(coordinator.confirm_policy().max_attempts(), 5);
    }
}
