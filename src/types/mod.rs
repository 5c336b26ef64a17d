// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Prosenic vacuum control.
//!
//! Each type maps the device's raw data point values to a closed set of
//! variants, so invalid values are rejected at the edge instead of being sent
//! to the device.
//!
//! # Types
//!
//! - [`Field`] - Data point codes (1, 11, 25, ...)
//! - [`Fault`] - Hardware fault bit flags
//! - [`CurrentState`] - Operating state codes (0-8)
//! - [`VacuumActivity`] - Activity shown by the hub
//! - [`CleaningMode`] - Settable cleaning modes
//! - [`Direction`] - Remote control directions
//! - [`FanSpeed`] - Suction levels

mod cleaning_mode;
mod current_state;
mod direction;
mod fault;
mod field;
mod speed;

pub use cleaning_mode::CleaningMode;
pub use current_state::{CurrentState, VacuumActivity};
pub use direction::Direction;
pub use fault::Fault;
pub use field::Field;
pub use speed::FanSpeed;
