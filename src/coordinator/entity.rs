// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity descriptors handed to the host framework.

use serde::Serialize;

use super::data::Device;
use crate::types::{CanonicalState, DeviceAddress, DeviceKind};

/// Integration domain used in device identifiers.
pub const DOMAIN: &str = "yale_smart_alarm";
/// Identifier of the hub every device is attached through.
pub const VIA_DEVICE: &str = "yale_smart_living";
/// Manufacturer reported for every device.
pub const MANUFACTURER: &str = "Yale";
/// Model reported for every device.
pub const MODEL: &str = "main";

/// Device registry metadata for an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// Device name.
    pub name: String,
    /// Manufacturer.
    pub manufacturer: &'static str,
    /// Model.
    pub model: &'static str,
    /// `(domain, address)` identifier.
    pub identifiers: (&'static str, String),
    /// `(domain, hub)` the device is reached through.
    pub via_device: (&'static str, &'static str),
}

/// A host-facing entity for one classified device.
///
/// # Examples
///
/// ```
/// use yale_smart_lib::coordinator::Entity;
/// use yale_smart_lib::types::{DeviceAddress, DeviceKind};
///
/// let entity = Entity::new(DeviceKind::DoorContact, "Back door", DeviceAddress::new("RF:02"));
/// assert_eq!(entity.unique_id(), "RF02_door_window");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    kind: DeviceKind,
    name: String,
    address: DeviceAddress,
}

impl Entity {
    /// Creates an entity.
    #[must_use]
    pub fn new(kind: DeviceKind, name: impl Into<String>, address: DeviceAddress) -> Self {
        Self {
            kind,
            name: name.into(),
            address,
        }
    }

    /// Returns the device kind.
    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Returns the entity name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the device address.
    #[must_use]
    pub fn address(&self) -> &DeviceAddress {
        &self.address
    }

    /// Returns the identifier the host stores this entity under.
    #[must_use]
    pub fn unique_id(&self) -> String {
        match self.kind {
            DeviceKind::DoorLock => self.address.to_string(),
            DeviceKind::DoorContact => format!("{}_door_window", self.address),
            DeviceKind::Pir => format!("{}_pir", self.address),
        }
    }

    /// Returns the device registry metadata.
    #[must_use]
    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            name: self.name.clone(),
            manufacturer: MANUFACTURER,
            model: MODEL,
            identifiers: (DOMAIN, self.address.to_string()),
            via_device: (DOMAIN, VIA_DEVICE),
        }
    }
}

impl From<&Device> for Entity {
    fn from(device: &Device) -> Self {
        Self::new(device.kind(), device.name(), device.address().clone())
    }
}

/// Lock entity rule: `true` only for [`CanonicalState::Locked`].
#[must_use]
pub fn is_locked(state: CanonicalState) -> bool {
    state == CanonicalState::Locked
}

/// Contact entity rule: `true` only for [`CanonicalState::Open`].
#[must_use]
pub fn is_open(state: CanonicalState) -> bool {
    state == CanonicalState::Open
}

/// Pattern the host should enforce on unlock codes.
#[must_use]
pub const fn code_format() -> &'static str {
    r"^\d{6}$"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_ids_per_kind() {
        let address = DeviceAddress::new("RF:0a");
        assert_eq!(
            Entity::new(DeviceKind::DoorLock, "a", address.clone()).unique_id(),
            "RF0a"
        );
        assert_eq!(
            Entity::new(DeviceKind::DoorContact, "b", address.clone()).unique_id(),
            "RF0a_door_window"
        );
        assert_eq!(
            Entity::new(DeviceKind::Pir, "c", address).unique_id(),
            "RF0a_pir"
        );
    }

    #[test]
    fn device_info_fields() {
        let info = Entity::new(DeviceKind::DoorLock, "Entre", DeviceAddress::new("RF:01"))
            .device_info();
        assert_eq!(info.name, "Entre");
        assert_eq!(info.manufacturer, "Yale");
        assert_eq!(info.model, "main");
        assert_eq!(info.identifiers, (DOMAIN, "RF01".to_string()));
        assert_eq!(info.via_device, (DOMAIN, "yale_smart_living"));
    }

    #[test]
    fn state_predicates() {
        assert!(is_locked(CanonicalState::Locked));
        assert!(!is_locked(CanonicalState::Unavailable));
        assert!(is_open(CanonicalState::Open));
        assert!(!is_open(CanonicalState::Closed));
    }
}
