// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canonical device states and command outcomes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// The closed vocabulary a vendor status is reduced to.
///
/// # Examples
///
/// ```
/// use yale_smart_lib::types::CanonicalState;
///
/// assert_eq!(CanonicalState::Locked.as_str(), "locked");
/// assert_eq!("open".parse::<CanonicalState>().unwrap(), CanonicalState::Open);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalState {
    /// A door or window contact reports open.
    Open,
    /// A door or window contact reports closed.
    Closed,
    /// A lock is engaged on a closed door.
    Locked,
    /// A lock is released, or its door is open.
    Unlocked,
    /// The status could not be classified.
    #[default]
    Unavailable,
}

impl CanonicalState {
    /// Returns the lowercase string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
            Self::Unavailable => "unavailable",
        }
    }

    /// Returns `true` unless the state is [`Unavailable`](Self::Unavailable).
    #[must_use]
    pub const fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

impl fmt::Display for CanonicalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "locked" => Ok(Self::Locked),
            "unlocked" => Ok(Self::Unlocked),
            "unavailable" => Ok(Self::Unavailable),
            _ => Err(ValueError::InvalidState(s.to_string())),
        }
    }
}

/// Result of a confirmed lock or unlock command.
///
/// `TimedOut` means every request succeeded but the device never reported
/// the expected state within the attempt budget. Callers must treat it as
/// unconfirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandOutcome {
    /// The device reported locked.
    Locked,
    /// The device reported unlocked.
    Unlocked,
    /// The state did not converge in time.
    TimedOut,
}

impl CommandOutcome {
    /// Returns the outcome that confirms a command targeting `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::NotCommandable`] unless `expected` is
    /// [`CanonicalState::Locked`] or [`CanonicalState::Unlocked`].
    pub fn for_target(expected: CanonicalState) -> Result<Self, ValueError> {
        match expected {
            CanonicalState::Locked => Ok(Self::Locked),
            CanonicalState::Unlocked => Ok(Self::Unlocked),
            other => Err(ValueError::NotCommandable(other)),
        }
    }

    /// Returns `true` if the command was confirmed.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        !matches!(self, Self::TimedOut)
    }

    /// Returns the confirmed state, or `None` for a timeout.
    #[must_use]
    pub const fn state(&self) -> Option<CanonicalState> {
        match self {
            Self::Locked => Some(CanonicalState::Locked),
            Self::Unlocked => Some(CanonicalState::Unlocked),
            Self::TimedOut => None,
        }
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locked => f.write_str("locked"),
            Self::Unlocked => f.write_str("unlocked"),
            Self::TimedOut => f.write_str("timed out"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_from_str() {
        assert_eq!("LOCKED".parse::<CanonicalState>().unwrap(), CanonicalState::Locked);
        assert_eq!(
            "unavailable".parse::<CanonicalState>().unwrap(),
            CanonicalState::Unavailable
        );
        assert!(matches!(
            "ajar".parse::<CanonicalState>(),
            Err(ValueError::InvalidState(s)) if s == "ajar"
        ));
    }

    #[test]
    fn state_serde_lowercase() {
        let json = serde_json::to_string(&CanonicalState::Unlocked).unwrap();
        assert_eq!(json, "\"unlocked\"");
        let state: CanonicalState = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(state, CanonicalState::Closed);
    }

    #[test]
    fn default_is_unavailable() {
        assert_eq!(CanonicalState::default(), CanonicalState::Unavailable);
        assert!(!CanonicalState::default().is_available());
    }

    #[test]
    fn outcome_for_target() {
        assert_eq!(
            CommandOutcome::for_target(CanonicalState::Locked).unwrap(),
            CommandOutcome::Locked
        );
        assert_eq!(
            CommandOutcome::for_target(CanonicalState::Unlocked).unwrap(),
            CommandOutcome::Unlocked
        );
        for state in [
            CanonicalState::Open,
            CanonicalState::Closed,
            CanonicalState::Unavailable,
        ] {
            assert_eq!(
                CommandOutcome::for_target(state),
                Err(ValueError::NotCommandable(state))
            );
        }
    }

    #[test]
    fn outcome_state() {
        assert_eq!(CommandOutcome::Locked.state(), Some(CanonicalState::Locked));
        assert_eq!(CommandOutcome::TimedOut.state(), None);
        assert!(!CommandOutcome::TimedOut.is_confirmed());
    }
}
