// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device status snapshot parsing.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::ParseError;
use crate::normalize::{normalize_contact, normalize_lock};
use crate::types::{CanonicalState, DeviceAddress, DeviceKind};

/// One polled reading of a device's raw status fields.
///
/// The API reports each device as a JSON object like:
///
/// ```json
/// {
///   "type": "device_type.door_lock",
///   "name": "Front door",
///   "address": "RF:0a:1b",
///   "device_id": "1234",
///   "status1": "device_status.lock",
///   "status2": "35"
/// }
/// ```
///
/// # Examples
///
/// ```
/// use yale_smart_lib::response::DeviceSnapshot;
/// use yale_smart_lib::types::{CanonicalState, DeviceKind};
///
/// let json = r#"{"type": "device_type.door_contact", "name": "Back door",
///               "address": "RF:02", "device_id": "7", "status1": "device_status.dc_open"}"#;
/// let snapshot: DeviceSnapshot = serde_json::from_str(json).unwrap();
/// assert_eq!(snapshot.kind(), Some(DeviceKind::DoorContact));
/// assert_eq!(snapshot.canonical_state().unwrap(), CanonicalState::Open);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceSnapshot {
    #[serde(rename = "type")]
    vendor_type: String,
    #[serde(default)]
    name: String,
    address: DeviceAddress,
    #[serde(default)]
    device_id: String,
    #[serde(default)]
    mac: Option<String>,
    #[serde(rename = "status1", default)]
    raw_status1: Option<String>,
    #[serde(rename = "status2", default)]
    raw_status2: Option<String>,
    #[serde(skip, default = "Utc::now")]
    polled_at: DateTime<Utc>,
}

impl DeviceSnapshot {
    /// Creates a snapshot with empty status fields.
    #[must_use]
    pub fn new(
        kind: DeviceKind,
        name: impl Into<String>,
        address: impl AsRef<str>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            vendor_type: kind.vendor_type().to_string(),
            name: name.into(),
            address: DeviceAddress::new(address),
            device_id: device_id.into(),
            mac: None,
            raw_status1: None,
            raw_status2: None,
            polled_at: Utc::now(),
        }
    }

    /// Sets the `status1` token.
    #[must_use]
    pub fn with_status1(mut self, status1: impl Into<String>) -> Self {
        self.raw_status1 = Some(status1.into());
        self
    }

    /// Sets the `status2` bitmask.
    #[must_use]
    pub fn with_status2(mut self, status2: impl Into<String>) -> Self {
        self.raw_status2 = Some(status2.into());
        self
    }

    /// Returns the kind, or `None` for vendor types this library skips.
    #[must_use]
    pub fn kind(&self) -> Option<DeviceKind> {
        DeviceKind::from_vendor_type(&self.vendor_type)
    }

    /// Returns the raw vendor type string.
    #[must_use]
    pub fn vendor_type(&self) -> &str {
        &self.vendor_type
    }

    /// Returns the user-assigned device name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the separator-free address.
    #[must_use]
    pub fn address(&self) -> &DeviceAddress {
        &self.address
    }

    /// Returns the identifier commands are addressed to.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the MAC address, if reported.
    #[must_use]
    pub fn mac(&self) -> Option<&str> {
        self.mac.as_deref()
    }

    /// Returns the raw `status1` token, or an empty string if absent.
    #[must_use]
    pub fn raw_status1(&self) -> &str {
        self.raw_status1.as_deref().unwrap_or_default()
    }

    /// Returns the raw `status2` bitmask, or an empty string if absent.
    #[must_use]
    pub fn raw_status2(&self) -> &str {
        self.raw_status2.as_deref().unwrap_or_default()
    }

    /// Returns when this snapshot was parsed.
    #[must_use]
    pub fn polled_at(&self) -> DateTime<Utc> {
        self.polled_at
    }

    /// Derives the canonical state using the rule for this device's kind.
    ///
    /// PIR sensors and unsupported kinds have no status rule and report
    /// [`CanonicalState::Unavailable`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidStatus2`] if a lock's bitmask is malformed.
    pub fn canonical_state(&self) -> Result<CanonicalState, ParseError> {
        match self.kind() {
            Some(DeviceKind::DoorLock) => normalize_lock(self.raw_status1(), self.raw_status2()),
            Some(DeviceKind::DoorContact) => Ok(normalize_contact(self.raw_status1())),
            Some(DeviceKind::Pir) | None => Ok(CanonicalState::Unavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lock_with_null_status2() {
        let json = r#"{
            "type": "device_type.door_lock",
            "name": "Entre",
            "address": "RF:aa:bb",
            "device_id": "42",
            "status1": "device_status.lock",
            "status2": null
        }"#;
        let snapshot: DeviceSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.kind(), Some(DeviceKind::DoorLock));
        assert_eq!(snapshot.address().as_str(), "RFaabb");
        assert_eq!(snapshot.raw_status2(), "");
        assert_eq!(snapshot.canonical_state().unwrap(), CanonicalState::Locked);
    }

    #[test]
    fn parse_lock_bitmask_wins() {
        let json = r#"{
            "type": "device_type.door_lock",
            "address": "RF:01",
            "status1": "device_status.lock",
            "status2": "1"
        }"#;
        let snapshot: DeviceSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.canonical_state().unwrap(), CanonicalState::Unlocked);
    }

    #[test]
    fn unsupported_kind_is_unavailable() {
        let json = r#"{"type": "device_type.keypad", "address": "RF:09", "status1": "device_status.dc_open"}"#;
        let snapshot: DeviceSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.kind(), None);
        assert_eq!(snapshot.vendor_type(), "device_type.keypad");
        assert_eq!(snapshot.canonical_state().unwrap(), CanonicalState::Unavailable);
    }

    #[test]
    fn builder_sets_status_fields() {
        let snapshot = DeviceSnapshot::new(DeviceKind::DoorLock, "Front", "RF:01", "1")
            .with_status1("device_status.unlock")
            .with_status2("zz");
        assert_eq!(snapshot.raw_status1(), "device_status.unlock");
        assert!(matches!(
            snapshot.canonical_state(),
            Err(ParseError::InvalidStatus2 { .. })
        ));
    }

    #[test]
    fn null_status1_is_unavailable() {
        let json = r#"{"type": "device_type.door_contact", "address": "RF:07", "status1": null}"#;
        let snapshot: DeviceSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.raw_status1(), "");
        assert_eq!(snapshot.canonical_state().unwrap(), CanonicalState::Unavailable);
    }

    #[test]
    fn missing_address_is_an_error() {
        let json = r#"{"type": "device_type.pir", "name": "Hall"}"#;
        assert!(serde_json::from_str::<DeviceSnapshot>(json).is_err());
    }
}
