// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Translation of vendor status fields into [`CanonicalState`].
//!
//! The cloud API reports door contacts through a `status1` token such as
//! `device_status.dc_open`, and locks through either a `status1` token or a
//! hexadecimal bitmask in `status2`. When the bitmask is present it wins.
//!
//! # Examples
//!
//! ```
//! use yale_smart_lib::normalize::{normalize_contact, normalize_lock};
//! use yale_smart_lib::types::CanonicalState;
//!
//! assert_eq!(normalize_contact("device_status.dc_close"), CanonicalState::Closed);
//! assert_eq!(normalize_lock("device_status.unlock", "").unwrap(), CanonicalState::Unlocked);
//! // Door closed (bit 4) and bolt thrown (bit 0).
//! assert_eq!(normalize_lock("", "11").unwrap(), CanonicalState::Locked);
//! ```

use bitflags::bitflags;

use crate::error::ParseError;
use crate::types::CanonicalState;

/// `status1` marker of a closed door contact.
pub const CONTACT_CLOSED: &str = "device_status.dc_close";
/// `status1` marker of an open door contact.
pub const CONTACT_OPEN: &str = "device_status.dc_open";
/// `status1` marker of a locked door lock.
pub const LOCK_LOCKED: &str = "device_status.lock";
/// `status1` marker of an unlocked door lock.
pub const LOCK_UNLOCKED: &str = "device_status.unlock";

bitflags! {
    /// Bits of the `status2` lock bitmask.
    ///
    /// Bits other than the two named below are retained but carry no meaning
    /// for the lock state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LockStatusBits: u32 {
        /// Set while the bolt is thrown.
        const LOCKED = 0b0000_0001;
        /// Set while the door is closed.
        const CLOSED = 0b0001_0000;
    }
}

/// Hex digits that fit in the low 32 bits.
const LOW_DIGITS: usize = 8;

impl LockStatusBits {
    /// Parses a base-16 bitmask such as `"35"` or `"0x11"`.
    ///
    /// Only ASCII hex digits are accepted after an optional `0x` prefix.
    /// Masks wider than 32 bits keep their low 32 bits.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidStatus2`] if the value is not hexadecimal.
    pub fn parse(hex: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidStatus2 {
            value: hex.to_string(),
        };

        let trimmed = hex.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let low = &digits[digits.len().saturating_sub(LOW_DIGITS)..];
        u32::from_str_radix(low, 16)
            .map(Self::from_bits_retain)
            .map_err(|_| invalid())
    }

    /// Returns `true` if the door is reported closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.contains(Self::CLOSED)
    }

    /// Returns `true` if the bolt is reported thrown.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.contains(Self::LOCKED)
    }

    /// Returns the canonical state. An open door is never reported locked.
    #[must_use]
    pub const fn state(&self) -> CanonicalState {
        if self.contains(Self::CLOSED.union(Self::LOCKED)) {
            CanonicalState::Locked
        } else {
            CanonicalState::Unlocked
        }
    }
}

/// Normalizes a door contact `status1` value.
#[must_use]
pub fn normalize_contact(raw_status: &str) -> CanonicalState {
    if raw_status.contains(CONTACT_CLOSED) {
        CanonicalState::Closed
    } else if raw_status.contains(CONTACT_OPEN) {
        CanonicalState::Open
    } else {
        CanonicalState::Unavailable
    }
}

/// Normalizes a door lock from its `status1` token and `status2` bitmask.
///
/// An empty (or whitespace only) `status2_hex` falls back to `status1`.
///
/// # Errors
///
/// Returns [`ParseError::InvalidStatus2`] if `status2_hex` is present but not
/// hexadecimal.
pub fn normalize_lock(status1: &str, status2_hex: &str) -> Result<CanonicalState, ParseError> {
    if !status2_hex.trim().is_empty() {
        return Ok(LockStatusBits::parse(status2_hex)?.state());
    }

    // "device_status.lock" is not a substring of "device_status.unlock".
    if status1.contains(LOCK_LOCKED) {
        Ok(CanonicalState::Locked)
    } else if status1.contains(LOCK_UNLOCKED) {
        Ok(CanonicalState::Unlocked)
    } else {
        Ok(CanonicalState::Unavailable)
    }
}
