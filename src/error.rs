// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Yale Smart Living library.
//!
//! Failures fall into a small taxonomy:
//!
//! - [`ProtocolError`]: transport failures talking to the cloud API. These are
//!   never retried by this library and include authentication failures.
//! - [`ParseError`]: malformed input from the API, such as an unparseable
//!   status bitmask. These are rejected rather than mapped to a default state.
//! - [`ValueError`]: a caller supplied a value outside its constraints.
//! - [`DeviceError`]: the requested operation does not apply to the device.
//!
//! A command whose state never converges is not an error; it is reported as
//! [`CommandOutcome::TimedOut`](crate::types::CommandOutcome::TimedOut).

use thiserror::Error;

use crate::types::{CanonicalState, DeviceKind};

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the remote API.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred during device operations.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// The operation was abandoned through its cancellation token.
    #[error("operation cancelled")]
    Cancelled,
}

impl Error {
    /// Returns `true` if this error came from the transport layer.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }

    /// Returns `true` if the remote API rejected the credentials.
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Protocol(ProtocolError::AuthenticationFailed))
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u32,
        /// Maximum allowed value.
        max: u32,
        /// The actual value that was provided.
        actual: u32,
    },

    /// A lock code is not exactly six digits.
    #[error("invalid lock code: expected six digits")]
    InvalidLockCode,

    /// An unknown canonical state string was provided.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A state that no lock command can produce was used as a command target.
    #[error("state {0} cannot be the target of a lock command")]
    NotCommandable(CanonicalState),
}

/// Errors related to communication with the cloud API.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,
}

/// Errors related to parsing API responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// The secondary lock status is not a hexadecimal integer.
    #[error("invalid status2 bitmask {value:?}: expected hex digits")]
    InvalidStatus2 {
        /// The raw value as received.
        value: String,
    },
}

/// Errors related to device operations.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// No device with this address was present in the last refresh.
    #[error("device not found: {0}")]
    NotFound(String),

    /// The operation needs a different kind of device.
    #[error("{operation} is not supported by {kind} devices")]
    UnsupportedKind {
        /// The operation that was attempted.
        operation: &'static str,
        /// The kind of the targeted device.
        kind: DeviceKind,
    },

    /// Unlocking needs a code and none was given or configured.
    #[error("code required but none provided")]
    CodeRequired,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 1,
            max: 1000,
            actual: 0,
        };
        assert_eq!(err.to_string(), "value 0 is out of range [1, 1000]");
    }

    #[test]
    fn not_commandable_display() {
        let err = ValueError::NotCommandable(CanonicalState::Open);
        assert_eq!(
            err.to_string(),
            "state open cannot be the target of a lock command"
        );
    }

    #[test]
    fn invalid_status2_display() {
        let err = ParseError::InvalidStatus2 {
            value: "zz".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid status2 bitmask \"zz\": expected hex digits"
        );
    }

    #[test]
    fn transport_classification() {
        let err: Error = ProtocolError::AuthenticationFailed.into();
        assert!(err.is_transport());
        assert!(err.is_authentication());

        let err: Error = ParseError::MissingField("data".to_string()).into();
        assert!(!err.is_transport());
        assert!(!err.is_authentication());
    }

    #[test]
    fn device_error_display() {
        let err = DeviceError::UnsupportedKind {
            operation: "lock",
            kind: DeviceKind::DoorContact,
        };
        assert_eq!(
            err.to_string(),
            "lock is not supported by door_contact devices"
        );
        assert_eq!(
            DeviceError::CodeRequired.to_string(),
            "code required but none provided"
        );
    }
}
