// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Classification of a polled device list.

use crate::error::ParseError;
use crate::response::DeviceSnapshot;
use crate::types::{CanonicalState, DeviceAddress, DeviceKind};

/// A classified device paired with its canonical state.
#[derive(Debug, Clone)]
pub struct Device {
    kind: DeviceKind,
    state: CanonicalState,
    snapshot: DeviceSnapshot,
}

impl Device {
    /// Returns the device kind.
    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Returns the canonical state derived from the snapshot.
    #[must_use]
    pub fn state(&self) -> CanonicalState {
        self.state
    }

    /// Returns the device address.
    #[must_use]
    pub fn address(&self) -> &DeviceAddress {
        self.snapshot.address()
    }

    /// Returns the device name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.snapshot.name()
    }

    /// Returns the snapshot this device was built from.
    #[must_use]
    pub fn snapshot(&self) -> &DeviceSnapshot {
        &self.snapshot
    }
}

/// Devices from one poll, grouped by kind in API order.
#[derive(Debug, Clone, Default)]
pub struct DeviceData {
    /// Door locks.
    pub locks: Vec<Device>,
    /// Door and window contacts.
    pub door_windows: Vec<Device>,
    /// PIR motion sensors.
    pub pirs: Vec<Device>,
}

impl DeviceData {
    /// Groups snapshots by kind and derives each device's state.
    ///
    /// Snapshots of unsupported vendor types are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidStatus2`] if any lock reports a malformed
    /// bitmask. No partial result is returned.
    pub fn classify(snapshots: Vec<DeviceSnapshot>) -> Result<Self, ParseError> {
        let mut data = Self::default();

        for snapshot in snapshots {
            let Some(kind) = snapshot.kind() else {
                tracing::debug!(
                    vendor_type = snapshot.vendor_type(),
                    address = %snapshot.address(),
                    "Skipping unsupported device"
                );
                continue;
            };

            let state = snapshot.canonical_state()?;
            let device = Device {
                kind,
                state,
                snapshot,
            };

            match kind {
                DeviceKind::DoorLock => data.locks.push(device),
                DeviceKind::DoorContact => data.door_windows.push(device),
                DeviceKind::Pir => data.pirs.push(device),
            }
        }

        tracing::debug!(
            locks = data.locks.len(),
            door_windows = data.door_windows.len(),
            pirs = data.pirs.len(),
            "Classified devices"
        );

        Ok(data)
    }

    /// Iterates over every classified device.
    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.locks
            .iter()
            .chain(&self.door_windows)
            .chain(&self.pirs)
    }

    /// Finds a device by address.
    #[must_use]
    pub fn find(&self, address: &DeviceAddress) -> Option<&Device> {
        self.iter().find(|d| d.address() == address)
    }

    /// Records a confirmed state for the device at `address`.
    ///
    /// Returns `false` if no such device was classified.
    pub(crate) fn set_state(&mut self, address: &DeviceAddress, state: CanonicalState) -> bool {
        match self
            .locks
            .iter_mut()
            .chain(&mut self.door_windows)
            .chain(&mut self.pirs)
            .find(|d| d.address() == address)
        {
            Some(device) => {
                device.state = state;
                true
            }
            None => false,
        }
    }

    /// Returns the total number of classified devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.len() + self.door_windows.len() + self.pirs.len()
    }

    /// Returns `true` if no device was classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<DeviceSnapshot> {
        vec![
            DeviceSnapshot::new(DeviceKind::DoorLock, "Front", "RF:01", "1")
                .with_status1("device_status.lock"),
            DeviceSnapshot::new(DeviceKind::DoorContact, "Window", "RF:02", "2")
                .with_status1("device_status.dc_open"),
            DeviceSnapshot::new(DeviceKind::Pir, "Hall", "RF:03", "3"),
            DeviceSnapshot::new(DeviceKind::DoorContact, "Back", "RF:04", "4")
                .with_status1("device_status.dc_close"),
        ]
    }

    #[test]
    fn groups_each_snapshot_under_its_own_kind() {
        let data = DeviceData::classify(sample()).unwrap();

        assert_eq!(data.locks.len(), 1);
        assert_eq!(data.locks[0].name(), "Front");
        assert_eq!(data.locks[0].state(), CanonicalState::Locked);

        let contacts: Vec<_> = data.door_windows.iter().map(Device::name).collect();
        assert_eq!(contacts, ["Window", "Back"]);
        assert_eq!(data.door_windows[0].state(), CanonicalState::Open);
        assert_eq!(data.door_windows[1].state(), CanonicalState::Closed);

        assert_eq!(data.pirs.len(), 1);
        assert_eq!(data.pirs[0].name(), "Hall");
        assert_eq!(data.pirs[0].kind(), DeviceKind::Pir);
        assert_eq!(data.len(), 4);
    }

    #[test]
    fn find_by_address() {
        let data = DeviceData::classify(sample()).unwrap();
        let device = data.find(&DeviceAddress::new("RF:04")).unwrap();
        assert_eq!(device.name(), "Back");
        assert!(data.find(&DeviceAddress::new("RF:99")).is_none());
    }

    #[test]
    fn malformed_lock_fails_whole_poll() {
        let mut snapshots = sample();
        snapshots.push(
            DeviceSnapshot::new(DeviceKind::DoorLock, "Garage", "RF:05", "5").with_status2("xyz"),
        );
        assert!(matches!(
            DeviceData::classify(snapshots),
            Err(ParseError::InvalidStatus2 { .. })
        ));
    }

    #[test]
    fn set_state_rewrites_one_device() {
        let mut data = DeviceData::classify(sample()).unwrap();

        assert!(data.set_state(&DeviceAddress::new("RF:01"), CanonicalState::Unlocked));
        assert_eq!(data.locks[0].state(), CanonicalState::Unlocked);
        assert_eq!(data.door_windows[0].state(), CanonicalState::Open);

        assert!(!data.set_state(&DeviceAddress::new("RF:99"), CanonicalState::Locked));
    }

    #[test]
    fn empty_poll() {
        let data = DeviceData::classify(Vec::new()).unwrap();
        assert!(data.is_empty());
    }
}
