// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Confirmation that a lock or unlock command took effect.
//!
//! The cloud API acknowledges a command before the lock has moved. After a
//! command is issued, [`confirm`] polls the device until it reports the
//! expected state, giving up after a bounded number of attempts.
//!
//! # Examples
//!
//! ```
//! use yale_smart_lib::confirm::{ConfirmPolicy, confirm};
//! use yale_smart_lib::types::{CanonicalState, CommandOutcome};
//! use yale_smart_lib::Error;
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> yale_smart_lib::Result<()> {
//! let outcome = confirm(
//!     async { Ok::<_, Error>(true) },
//!     || async { Ok::<_, Error>(CanonicalState::Locked) },
//!     CanonicalState::Locked,
//!     &ConfirmPolicy::default(),
//!     &CancellationToken::new(),
//! )
//! .await?;
//! assert_eq!(outcome, CommandOutcome::Locked);
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::{Error, ValueError};
use crate::types::{CanonicalState, CommandOutcome};

/// Limits for the confirmation loop.
///
/// Worst-case blocking time is `max_attempts * delay` (15 seconds with the
/// defaults).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use yale_smart_lib::confirm::ConfirmPolicy;
///
/// let policy = ConfirmPolicy::new(10, Duration::from_millis(200)).unwrap();
/// assert_eq!(policy.max_wait(), Duration::from_secs(2));
///
/// assert!(ConfirmPolicy::new(0, Duration::from_millis(200)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl ConfirmPolicy {
    /// Default number of polls.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;
    /// Default wait between polls.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);
    /// Largest accepted number of polls.
    pub const MAX_ATTEMPTS_LIMIT: u32 = 1000;

    /// Creates a policy.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::OutOfRange`] if `max_attempts` is zero or above
    /// [`MAX_ATTEMPTS_LIMIT`](Self::MAX_ATTEMPTS_LIMIT).
    pub fn new(max_attempts: u32, delay: Duration) -> Result<Self, ValueError> {
        if max_attempts == 0 || max_attempts > Self::MAX_ATTEMPTS_LIMIT {
            return Err(ValueError::OutOfRange {
                min: 1,
                max: Self::MAX_ATTEMPTS_LIMIT,
                actual: max_attempts,
            });
        }
        Ok(Self {
            max_attempts,
            delay,
        })
    }

    /// Returns the number of polls before giving up.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the wait between polls.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns the upper bound on time spent waiting between polls.
    ///
    /// Saturates at [`Duration::MAX`].
    #[must_use]
    pub fn max_wait(&self) -> Duration {
        self.delay
            .checked_mul(self.max_attempts)
            .unwrap_or(Duration::MAX)
    }
}

impl Default for ConfirmPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            delay: Self::DEFAULT_DELAY,
        }
    }
}

/// Issues a command and polls until the device reports `expected`.
///
/// `issue` is awaited once. Its boolean acknowledgement is informational: the
/// device may lag or act despite a negative reply, so polling always follows.
/// `poll` is called up to `policy.max_attempts()` times with `policy.delay()`
/// between calls and no delay before the first call.
///
/// # Errors
///
/// - [`ValueError::NotCommandable`] if `expected` is not `Locked` or
///   `Unlocked`, before `issue` runs.
/// - Any error from `issue` or `poll`, returned immediately.
/// - [`Error::Cancelled`] if `cancel` fires before an outcome is known.
pub async fn confirm<I, P, F>(
    issue: I,
    mut poll: P,
    expected: CanonicalState,
    policy: &ConfirmPolicy,
    cancel: &CancellationToken,
) -> Result<CommandOutcome, Error>
where
    I: Future<Output = Result<bool, Error>>,
    P: FnMut() -> F,
    F: Future<Output = Result<CanonicalState, Error>>,
{
    let outcome = CommandOutcome::for_target(expected)?;

    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let accepted = issue.await?;
    if !accepted {
        tracing::warn!(%expected, "Command was not acknowledged, polling anyway");
    }

    let mut attempts = 0;
    loop {
        if cancel.is_cancelled() {
            tracing::debug!(attempts, "Confirmation cancelled");
            return Err(Error::Cancelled);
        }

        let state = poll().await?;
        attempts += 1;
        tracing::debug!(attempt = attempts, %state, %expected, "Polled state");

        if state == expected {
            return Ok(outcome);
        }

        if attempts >= policy.max_attempts() {
            tracing::warn!(
                attempts,
                %expected,
                last_state = %state,
                "State did not converge"
            );
            return Ok(CommandOutcome::TimedOut);
        }

        tokio::select! {
            () = cancel.cancelled() => {
                tracing::debug!(attempts, "Confirmation cancelled");
                return Err(Error::Cancelled);
            }
            () = tokio::time::sleep(policy.delay()) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::ProtocolError;

    #[test]
    fn policy_defaults() {
        let policy = ConfirmPolicy::default();
        assert_eq!(policy.max_attempts(), 30);
        assert_eq!(policy.delay(), Duration::from_millis(500));
        assert_eq!(policy.max_wait(), Duration::from_secs(15));
    }

    #[test]
    fn policy_rejects_out_of_range_attempts() {
        assert!(ConfirmPolicy::new(1, Duration::ZERO).is_ok());
        assert!(ConfirmPolicy::new(1000, Duration::ZERO).is_ok());
        assert_eq!(
            ConfirmPolicy::new(1001, Duration::ZERO),
            Err(ValueError::OutOfRange {
                min: 1,
                max: 1000,
                actual: 1001
            })
        );
    }

    #[test]
    fn max_wait_saturates() {
        let policy = ConfirmPolicy::new(2, Duration::MAX).unwrap();
        assert_eq!(policy.max_wait(), Duration::MAX);
    }

    #[tokio::test]
    async fn rejects_non_lock_target_before_issuing() {
        let issued = Cell::new(false);
        let result = confirm(
            async {
                issued.set(true);
                Ok::<_, Error>(true)
            },
            || async { Ok::<_, Error>(CanonicalState::Open) },
            CanonicalState::Open,
            &ConfirmPolicy::default(),
            &CancellationToken::new(),
        )
        .await;

        assert!(matches!(
            result,
            Err(Error::Value(ValueError::NotCommandable(CanonicalState::Open)))
        ));
        assert!(!issued.get());
    }

    #[tokio::test]
    async fn issue_error_skips_polling() {
        let polls = Cell::new(0u32);
        let result = confirm(
            async { Err::<bool, Error>(ProtocolError::AuthenticationFailed.into()) },
            || {
                polls.set(polls.get() + 1);
                async { Ok::<_, Error>(CanonicalState::Locked) }
            },
            CanonicalState::Locked,
            &ConfirmPolicy::default(),
            &CancellationToken::new(),
        )
        .await;

        assert!(matches!(result, Err(e) if e.is_authentication()));
        assert_eq!(polls.get(), 0);
    }

    #[tokio::test]
    async fn already_cancelled_does_not_issue() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let issued = Cell::new(false);

        let result = confirm(
            async {
                issued.set(true);
                Ok::<_, Error>(true)
            },
            || async { Ok::<_, Error>(CanonicalState::Locked) },
            CanonicalState::Locked,
            &ConfirmPolicy::default(),
            &cancel,
        )
        .await;

        assert!(matches!(result, Err(Error::Cancelled)));
        assert!(!issued.get());
    }

    #[tokio::test]
    async fn rejected_command_still_confirms() {
        let outcome = confirm(
            async { Ok::<_, Error>(false) },
            || async { Ok::<_, Error>(CanonicalState::Unlocked) },
            CanonicalState::Unlocked,
            &ConfirmPolicy::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, CommandOutcome::Unlocked);
    }
}
