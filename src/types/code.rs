// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Six digit code required to unlock a door lock.
///
/// The code is validated on construction. `Debug` output is redacted.
///
/// # Examples
///
/// ```
/// use yale_smart_lib::types::LockCode;
///
/// let code = LockCode::new("123456").unwrap();
/// assert_eq!(code.as_str(), "123456");
/// assert!(LockCode::new("12345").is_err());
/// assert!(LockCode::new("12a456").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LockCode(String);

impl LockCode {
    /// Number of digits in a code.
    pub const LENGTH: usize = 6;

    /// Creates a code from a string of exactly six ASCII digits.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidLockCode`] for any other input.
    pub fn new(code: impl Into<String>) -> Result<Self, ValueError> {
        let code = code.into();
        if code.len() == Self::LENGTH && code.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(code))
        } else {
            Err(ValueError::InvalidLockCode)
        }
    }

    /// Returns the digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LockCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LockCode(******)")
    }
}

impl FromStr for LockCode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_length_and_non_digits() {
        assert_eq!(LockCode::new(""), Err(ValueError::InvalidLockCode));
        assert_eq!(LockCode::new("1234567"), Err(ValueError::InvalidLockCode));
        assert_eq!(LockCode::new("12 456"), Err(ValueError::InvalidLockCode));
        assert_eq!(LockCode::new("١٢٣٤٥٦"), Err(ValueError::InvalidLockCode));
    }

    #[test]
    fn debug_is_redacted() {
        let code: LockCode = "217521".parse().unwrap();
        assert_eq!(format!("{code:?}"), "LockCode(******)");
    }
}
