// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device identity types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of device reported in the vendor's device-status list.
///
/// Only these three kinds are classified; other vendor types (keypads,
/// sirens, panels) are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    /// A door lock.
    DoorLock,
    /// A door or window contact sensor.
    DoorContact,
    /// A passive infrared motion sensor.
    Pir,
}

impl DeviceKind {
    /// Returns the vendor type string, e.g. `device_type.door_lock`.
    #[must_use]
    pub const fn vendor_type(&self) -> &'static str {
        match self {
            Self::DoorLock => "device_type.door_lock",
            Self::DoorContact => "device_type.door_contact",
            Self::Pir => "device_type.pir",
        }
    }

    /// Maps a vendor type string to a kind.
    ///
    /// Returns `None` for vendor types this library does not handle.
    #[must_use]
    pub fn from_vendor_type(s: &str) -> Option<Self> {
        match s {
            "device_type.door_lock" => Some(Self::DoorLock),
            "device_type.door_contact" => Some(Self::DoorContact),
            "device_type.pir" => Some(Self::Pir),
            _ => None,
        }
    }

    /// Returns the short snake case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DoorLock => "door_lock",
            Self::DoorContact => "door_contact",
            Self::Pir => "pir",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable device identifier derived from the vendor address.
///
/// The vendor reports addresses like `RF:0a:1b`; the separators are dropped so
/// that the same device always maps to the same identifier.
///
/// # Examples
///
/// ```
/// use yale_smart_lib::types::DeviceAddress;
///
/// let addr = DeviceAddress::new("RF:0a:1b");
/// assert_eq!(addr.as_str(), "RF0a1b");
/// assert_eq!(addr, DeviceAddress::new("RF0a1b"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DeviceAddress(String);

impl DeviceAddress {
    /// Creates an address, stripping `:` separators.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().replace(':', ""))
    }

    /// Returns the normalized address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DeviceAddress {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for DeviceAddress {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<DeviceAddress> for String {
    fn from(value: DeviceAddress) -> Self {
        value.0
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_type_mapping() {
        for kind in [DeviceKind::DoorLock, DeviceKind::DoorContact, DeviceKind::Pir] {
            assert_eq!(DeviceKind::from_vendor_type(kind.vendor_type()), Some(kind));
        }
        assert_eq!(DeviceKind::from_vendor_type("device_type.keypad"), None);
    }

    #[test]
    fn address_strips_separators() {
        assert_eq!(DeviceAddress::new("RF:01:02").as_str(), "RF0102");
        assert_eq!(DeviceAddress::from("abc").to_string(), "abc");
    }

    #[test]
    fn address_deserializes_normalized() {
        let addr: DeviceAddress = serde_json::from_str("\"RF:ff\"").unwrap();
        assert_eq!(addr.as_str(), "RFff");
    }
}
