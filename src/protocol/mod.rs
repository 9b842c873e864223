// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client implementations for the Yale Smart Living cloud API.
//!
//! The [`YaleApi`] trait is the seam between this library's logic and the
//! transport. [`HttpClient`] implements it over HTTPS; tests and hosts with
//! their own client can supply another implementation.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{ApiConfig, HttpClient};

use crate::error::Error;
use crate::response::DeviceSnapshot;
use crate::types::LockCode;

/// Operations the cloud API offers to this library.
///
/// Implementations report transport failures as [`Error::Protocol`] and do
/// not retry. Malformed payloads are reported as [`Error::Parse`].
#[allow(async_fn_in_trait)]
pub trait YaleApi {
    /// Fetches the status of every device on the account.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body cannot be parsed.
    async fn get_device_list(&self) -> Result<Vec<DeviceSnapshot>, Error>;

    /// Asks the lock to engage. Returns whether the API accepted the command.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body cannot be parsed.
    async fn lock(&self, device_id: &str) -> Result<bool, Error>;

    /// Asks the lock to release. Returns whether the API accepted the command.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body cannot be parsed.
    async fn unlock(&self, device_id: &str, code: &LockCode) -> Result<bool, Error>;

    /// Fetches the current status of a single device.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body cannot be parsed.
    async fn get_device_state(&self, device_id: &str) -> Result<DeviceSnapshot, Error>;

    /// Fetches the panel's arming mode as reported, e.g. `disarm` or `home`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body cannot be parsed.
    async fn get_armed_status(&self) -> Result<String, Error>;
}

impl<A: YaleApi> YaleApi for &A {
    async fn get_device_list(&self) -> Result<Vec<DeviceSnapshot>, Error> {
        (**self).get_device_list().await
    }

    async fn lock(&self, device_id: &str) -> Result<bool, Error> {
        (**self).lock(device_id).await
    }

    async fn unlock(&self, device_id: &str, code: &LockCode) -> Result<bool, Error> {
        (**self).unlock(device_id, code).await
    }

    async fn get_device_state(&self, device_id: &str) -> Result<DeviceSnapshot, Error> {
        (**self).get_device_state(device_id).await
    }

    async fn get_armed_status(&self) -> Result<String, Error> {
        (**self).get_armed_status().await
    }
}

impl<A: YaleApi> YaleApi for std::sync::Arc<A> {
    async fn get_device_list(&self) -> Result<Vec<DeviceSnapshot>, Error> {
        (**self).get_device_list().await
    }

    async fn lock(&self, device_id: &str) -> Result<bool, Error> {
        (**self).lock(device_id).await
    }

    async fn unlock(&self, device_id: &str, code: &LockCode) -> Result<bool, Error> {
        (**self).unlock(device_id, code).await
    }

    async fn get_device_state(&self, device_id: &str) -> Result<DeviceSnapshot, Error> {
        (**self).get_device_state(device_id).await
    }

    async fn get_armed_status(&self) -> Result<String, Error> {
        (**self).get_armed_status().await
    }
}
