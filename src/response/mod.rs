// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for parsing Yale cloud API replies.
//!
//! Every endpoint wraps its payload in the same envelope:
//!
//! ```json
//! {"result": true, "message": "OK!", "data": { ... }}
//! ```

mod snapshot;

pub use snapshot::DeviceSnapshot;

use serde::Deserialize;

use crate::error::ParseError;

/// Common envelope around every API payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    result: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default = "Option::default")]
    data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Returns the `result` flag, if present.
    #[must_use]
    pub fn result(&self) -> Option<bool> {
        self.result
    }

    /// Returns the server message, if present.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Consumes the envelope and returns its payload.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingField`] if `data` is absent or `null`.
    pub fn into_data(self) -> Result<T, ParseError> {
        self.data
            .ok_or_else(|| ParseError::MissingField("data".to_string()))
    }
}

/// Payload of the cycle endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CycleData {
    /// Every device known to the panel.
    #[serde(default)]
    pub device_status: Vec<DeviceSnapshot>,
}

/// One area of the panel mode endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ModeEntry {
    /// Arming mode of the area, e.g. `arm`, `home` or `disarm`.
    #[serde(default)]
    pub mode: Option<String>,
}

impl ModeEntry {
    /// Returns the mode of the first area.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingField`] if there is no area or it has no
    /// mode.
    pub fn first_mode(entries: Vec<Self>) -> Result<String, ParseError> {
        entries
            .into_iter()
            .next()
            .and_then(|entry| entry.mode)
            .ok_or_else(|| ParseError::MissingField("mode".to_string()))
    }
}

/// Reply to a lock or unlock command.
///
/// # Examples
///
/// ```
/// use yale_smart_lib::response::CommandReply;
///
/// let reply: CommandReply = serde_json::from_str(r#"{"result": true}"#).unwrap();
/// assert!(reply.accepted().unwrap());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CommandReply {
    #[serde(default)]
    result: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

impl CommandReply {
    /// Returns whether the API accepted the command.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingField`] if `result` is absent.
    pub fn accepted(&self) -> Result<bool, ParseError> {
        self.result
            .ok_or_else(|| ParseError::MissingField("result".to_string()))
    }

    /// Returns the server message, if present.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Parses a JSON body into `T`.
///
/// # Errors
///
/// Returns [`ParseError::Json`] if the body does not match `T`.
pub fn parse<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ParseError> {
    serde_json::from_str(body).map_err(Into::into)
}
