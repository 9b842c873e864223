// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared across the library.
//!
//! # Types
//!
//! - [`CanonicalState`] - Open/Closed/Locked/Unlocked/Unavailable
//! - [`CommandOutcome`] - Result of a confirmed lock command
//! - [`DeviceKind`] - Door lock, door contact or PIR
//! - [`DeviceAddress`] - Separator-free vendor address
//! - [`LockCode`] - Six digit unlock code

mod code;
mod device;
mod state;

pub use code::LockCode;
pub use device::{DeviceAddress, DeviceKind};
pub use state::{CanonicalState, CommandOutcome};
