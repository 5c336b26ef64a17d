// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status report parsing.
//!
//! The device reports its state as a map of data point codes to raw values.
//! This module turns such a map into typed [`StateChange`](crate::state::StateChange)s.
//!
//! # Examples
//!
//! ```
//! use prosenic_vacuum::state::StateChange;
//! use prosenic_vacuum::telemetry::parse_status;
//! use prosenic_vacuum::types::{CurrentState, Fault};
//!
//! let dps = serde_json::json!({"11": 512, "38": 1});
//! let changes = parse_status(dps.as_object().unwrap());
//!
//! assert_eq!(changes, vec![
//!     StateChange::Fault(Fault::TRAPPED),
//!     StateChange::CurrentState(CurrentState::CleanSmart),
//! ]);
//! ```

mod dps_parser;

pub use dps_parser::{Dps, extract_dps, parse_data_point, parse_status};
