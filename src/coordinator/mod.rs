// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polling coordinator for a Yale account.
//!
//! The [`Coordinator`] owns the API client handle and the last-known state of
//! every device. The host decides when to call [`Coordinator::refresh`]
//! (typically every [`Settings::scan_interval`](crate::config::Settings::scan_interval))
//! and reads entity state between refreshes.
//!
//! # Examples
//!
//! ```no_run
//! use yale_smart_lib::coordinator::Coordinator;
//! use yale_smart_lib::protocol::ApiConfig;
//! use yale_smart_lib::types::DeviceAddress;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> yale_smart_lib::Result<()> {
//! let client = ApiConfig::new().with_token("access-token").into_client()?;
//! let coordinator = Coordinator::new(client);
//!
//! coordinator.refresh().await?;
//! for entity in coordinator.entities() {
//!     println!("{} -> {}", entity.unique_id(), coordinator.state(entity.address()));
//! }
//!
//! let outcome = coordinator
//!     .lock(&DeviceAddress::new("RF:01"), &CancellationToken::new())
//!     .await?;
//! println!("lock confirmed: {}", outcome.is_confirmed());
//! # Ok(())
//! # }
//! ```

mod data;
mod entity;

pub use data::{Device, DeviceData};
pub use entity::{
    DOMAIN, DeviceInfo, Entity, MANUFACTURER, MODEL, VIA_DEVICE, code_format, is_locked, is_open,
};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;

use crate::confirm::{ConfirmPolicy, confirm};
use crate::error::{DeviceError, Error};
use crate::normalize::normalize_lock;
use crate::protocol::YaleApi;
use crate::types::{CanonicalState, CommandOutcome, DeviceAddress, DeviceKind, LockCode};

/// Last successful refresh, replaced as a unit.
#[derive(Debug, Default)]
struct Latest {
    data: Arc<DeviceData>,
    armed_status: Option<String>,
    refreshed_at: Option<DateTime<Utc>>,
}

/// Coordinates polling and lock commands for one account.
///
/// Device states live only in the [`DeviceData`] of the last refresh. A
/// confirmed lock command rewrites the lock's state there, so
/// [`state`](Self::state) and [`data`](Self::data) always agree.
pub struct Coordinator<A> {
    api: A,
    default_code: Option<LockCode>,
    policy: ConfirmPolicy,
    latest: RwLock<Latest>,
}

impl<A: YaleApi> Coordinator<A> {
    /// Creates a coordinator around an API client.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            default_code: None,
            policy: ConfirmPolicy::default(),
            latest: RwLock::new(Latest::default()),
        }
    }

    /// Sets the code used when [`unlock`](Self::unlock) is called without one.
    #[must_use]
    pub fn with_default_code(mut self, code: LockCode) -> Self {
        self.default_code = Some(code);
        self
    }

    /// Sets the confirmation limits for lock commands.
    #[must_use]
    pub fn with_confirm_policy(mut self, policy: ConfirmPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the API client.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns the confirmation policy.
    #[must_use]
    pub fn confirm_policy(&self) -> &ConfirmPolicy {
        &self.policy
    }

    /// Polls the device list and panel mode and replaces the last-known
    /// states.
    ///
    /// # Errors
    ///
    /// Returns transport and parse errors unchanged. On error, the previous
    /// data is kept.
    pub async fn refresh(&self) -> Result<Arc<DeviceData>, Error> {
        let fetched = async {
            let snapshots = self.api.get_device_list().await?;
            let armed_status = self.api.get_armed_status().await?;
            Ok::<_, Error>((snapshots, armed_status))
        };

        let (snapshots, armed_status) = match fetched.await {
            Ok(fetched) => fetched,
            Err(e) if e.is_authentication() => {
                tracing::error!(error = %e, "Authentication failed. Check credentials");
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        let data = Arc::new(DeviceData::classify(snapshots)?);

        *self.latest.write() = Latest {
            data: Arc::clone(&data),
            armed_status: Some(armed_status),
            refreshed_at: Some(Utc::now()),
        };

        Ok(data)
    }

    /// Returns the data from the last successful refresh.
    #[must_use]
    pub fn data(&self) -> Arc<DeviceData> {
        Arc::clone(&self.latest.read().data)
    }

    /// Returns the panel mode from the last refresh, as the API reported it.
    #[must_use]
    pub fn armed_status(&self) -> Option<String> {
        self.latest.read().armed_status.clone()
    }

    /// Returns when the last successful refresh finished.
    #[must_use]
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.latest.read().refreshed_at
    }

    /// Returns the last-known state of a device, or `Unavailable` if unknown.
    #[must_use]
    pub fn state(&self, address: &DeviceAddress) -> CanonicalState {
        self.latest
            .read()
            .data
            .find(address)
            .map(Device::state)
            .unwrap_or_default()
    }

    /// Returns `true` if the lock at `address` is known to be locked.
    #[must_use]
    pub fn is_locked(&self, address: &DeviceAddress) -> bool {
        is_locked(self.state(address))
    }

    /// Returns `true` if the contact at `address` is known to be open.
    #[must_use]
    pub fn is_open(&self, address: &DeviceAddress) -> bool {
        is_open(self.state(address))
    }

    /// Returns one entity per classified device.
    #[must_use]
    pub fn entities(&self) -> Vec<Entity> {
        self.latest.read().data.iter().map(Entity::from).collect()
    }

    /// Locks the door lock at `address` and waits for confirmation.
    ///
    /// # Errors
    ///
    /// See [`unlock`](Self::unlock).
    pub async fn lock(
        &self,
        address: &DeviceAddress,
        cancel: &CancellationToken,
    ) -> Result<CommandOutcome, Error> {
        self.set_lock_state(address, CanonicalState::Locked, None, cancel)
            .await
    }

    /// Unlocks the door lock at `address` and waits for confirmation.
    ///
    /// Uses `code`, falling back to the default code.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::NotFound`] if the address was not in the last refresh.
    /// - [`DeviceError::UnsupportedKind`] if the device is not a lock.
    /// - [`DeviceError::CodeRequired`] if no code is available.
    /// - Transport, parse and cancellation errors from [`confirm`].
    pub async fn unlock(
        &self,
        address: &DeviceAddress,
        code: Option<LockCode>,
        cancel: &CancellationToken,
    ) -> Result<CommandOutcome, Error> {
        let Some(code) = code.or_else(|| self.default_code.clone()) else {
            tracing::error!(%address, "Code required but none provided");
            return Err(DeviceError::CodeRequired.into());
        };
        self.set_lock_state(address, CanonicalState::Unlocked, Some(&code), cancel)
            .await
    }

    async fn set_lock_state(
        &self,
        address: &DeviceAddress,
        target: CanonicalState,
        code: Option<&LockCode>,
        cancel: &CancellationToken,
    ) -> Result<CommandOutcome, Error> {
        let operation = if target == CanonicalState::Locked {
            "lock"
        } else {
            "unlock"
        };

        let (device_id, name) = {
            let latest = self.latest.read();
            let device = latest
                .data
                .find(address)
                .ok_or_else(|| DeviceError::NotFound(address.to_string()))?;
            if device.kind() != DeviceKind::DoorLock {
                return Err(DeviceError::UnsupportedKind {
                    operation,
                    kind: device.kind(),
                }
                .into());
            }
            (
                device.snapshot().device_id().to_string(),
                device.name().to_string(),
            )
        };

        tracing::debug!(%address, name = %name, operation, "Sending lock command");

        let api = &self.api;
        let id = device_id.as_str();
        let issue = async move {
            match code {
                Some(code) => api.unlock(id, code).await,
                None => api.lock(id).await,
            }
        };
        let poll = move || async move {
            let snapshot = api.get_device_state(id).await?;
            Ok::<_, Error>(normalize_lock(
                snapshot.raw_status1(),
                snapshot.raw_status2(),
            )?)
        };

        let outcome = confirm(issue, poll, target, &self.policy, cancel).await?;

        match outcome.state() {
            Some(state) => {
                tracing::info!(%address, name = %name, %state, "Lock command confirmed");
                let mut latest = self.latest.write();
                Arc::make_mut(&mut latest.data).set_state(address, state);
            }
            None => {
                tracing::warn!(%address, name = %name, operation, "Lock command unconfirmed");
            }
        }

        Ok(outcome)
    }
}

impl<A> std::fmt::Debug for Coordinator<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("policy", &self.policy)
            .field("latest", &*self.latest.read())
            .finish_non_exhaustive()
    }
}
