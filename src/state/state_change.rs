// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! A status report is turned into a list of [`StateChange`]s, one per
//! recognized data point, which are then applied to a
//! [`VacuumState`](super::VacuumState). Applying reports whether anything
//! actually changed, so only real changes reach event subscribers.
//!
//! # Examples
//!
//! ```
//! use prosenic_vacuum::state::{StateChange, VacuumState};
//! use prosenic_vacuum::types::FanSpeed;
//!
//! let mut state = VacuumState::new();
//!
//! assert!(state.apply(&StateChange::FanSpeed(FanSpeed::Strong)));
//! // Applying the same value again is not a change
//! assert!(!state.apply(&StateChange::FanSpeed(FanSpeed::Strong)));
//! ```

use crate::types::{CurrentState, FanSpeed, Fault, Field};

/// A change to one tracked property of the vacuum.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum StateChange {
    /// Active fault flags changed.
    Fault(Fault),

    /// Operating state changed.
    CurrentState(CurrentState),

    /// Suction level changed.
    FanSpeed(FanSpeed),

    /// Battery percentage changed.
    Battery(u8),

    /// Area cleaned in the current run changed.
    CleanArea(u32),

    /// Minutes spent in the current run changed.
    CleanTime(u32),

    /// Mop attachment fitted or removed.
    MopEquipped(bool),
}

impl StateChange {
    /// Returns the data point this change came from.
    #[must_use]
    pub fn field(&self) -> Field {
        match self {
            Self::Fault(_) => Field::Fault,
            Self::CurrentState(_) => Field::CurrentState,
            Self::FanSpeed(_) => Field::FanSpeed,
            Self::Battery(_) => Field::Battery,
            Self::CleanArea(_) => Field::CleanArea,
            Self::CleanTime(_) => Field::CleanTime,
            Self::MopEquipped(_) => Field::SweepOrMop,
        }
    }
}
