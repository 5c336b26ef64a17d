// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vacuum state management types.
//!
//! [`VacuumState`] holds what the device last reported, while
//! [`StateChange`] represents individual changes that can be applied.
//!
//! # Examples
//!
//! ```
//! use prosenic_vacuum::state::{StateChange, VacuumState};
//!
//! let mut state = VacuumState::new();
//! state.apply(&StateChange::Battery(76));
//!
//! assert_eq!(state.battery(), Some(76));
//! ```

mod state_change;
mod vacuum_state;

pub use state_change::StateChange;
pub use vacuum_state::{
    ATTR_CLEANED_AREA, ATTR_CLEANING_TIME, ATTR_ERROR, ATTR_MOP_EQUIPPED, VacuumState,
};
