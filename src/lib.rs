// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Yale Smart Living Lib - A Rust library to poll and control Yale Smart
//! Living locks and sensors.
//!
//! This library turns the vendor cloud API into a handful of typed devices
//! and gives lock commands a bounded confirmation step.
//!
//! # Supported Devices
//!
//! - **Door locks**: lock/unlock with confirmation, state from status bitmask
//! - **Door/window contacts**: open/closed
//! - **PIR sensors**: discovery only
//!
//! # Quick Start
//!
//! ```no_run
//! use yale_smart_lib::config::Settings;
//! use yale_smart_lib::types::DeviceAddress;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> yale_smart_lib::Result<()> {
//!     let settings = Settings::from_json(r#"{"token": "access-token", "code": "123456"}"#)?;
//!     let coordinator = settings.into_coordinator()?;
//!
//!     let data = coordinator.refresh().await?;
//!     for lock in &data.locks {
//!         println!("{}: {}", lock.name(), lock.state());
//!     }
//!
//!     let outcome = coordinator
//!         .unlock(&DeviceAddress::new("RF:01"), None, &CancellationToken::new())
//!         .await?;
//!     if !outcome.is_confirmed() {
//!         eprintln!("unlock not confirmed");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Status Normalization
//!
//! ```
//! use yale_smart_lib::{CanonicalState, normalize_contact, normalize_lock};
//!
//! assert_eq!(normalize_contact("device_status.dc_open"), CanonicalState::Open);
//! assert_eq!(normalize_lock("device_status.lock", "").unwrap(), CanonicalState::Locked);
//! ```

pub mod config;
pub mod confirm;
pub mod coordinator;
pub mod error;
pub mod normalize;
pub mod protocol;
pub mod response;
pub mod types;

pub use confirm::{ConfirmPolicy, confirm};
pub use coordinator::{Coordinator, Device, DeviceData, Entity};
pub use error::{DeviceError, Error, ParseError, ProtocolError, Result, ValueError};
pub use normalize::{normalize_contact, normalize_lock};
#[cfg(feature = "http")]
pub use protocol::{ApiConfig, HttpClient};
pub use protocol::YaleApi;
pub use response::DeviceSnapshot;
pub use types::{CanonicalState, CommandOutcome, DeviceAddress, DeviceKind, LockCode};
