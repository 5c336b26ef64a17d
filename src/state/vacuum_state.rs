// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vacuum state tracking.

use serde_json::{Map, Value};

use crate::types::{CurrentState, FanSpeed, Fault, VacuumActivity};

use super::StateChange;

/// Attribute key holding the active fault names.
pub const ATTR_ERROR: &str = "error";
/// Attribute key holding the area cleaned in the current run.
pub const ATTR_CLEANED_AREA: &str = "cleaned_area";
/// Attribute key holding the minutes spent in the current run.
pub const ATTR_CLEANING_TIME: &str = "cleaning_time";
/// Attribute key telling whether the mop attachment is fitted.
///
/// Earlier releases of this integration exposed it as `mob_equipped`.
/// Hub automations written against that key need renaming.
pub const ATTR_MOP_EQUIPPED: &str = "mop_equipped";

/// Tracked state of a Prosenic vacuum.
///
/// Everything except the fan speed starts out unknown and is filled in as
/// status reports arrive. The fan speed starts at [`FanSpeed::Normal`].
///
/// # Examples
///
/// ```
/// use prosenic_vacuum::state::{StateChange, VacuumState};
/// use prosenic_vacuum::types::{CurrentState, Fault, VacuumActivity};
///
/// let mut state = VacuumState::new();
/// assert_eq!(state.activity(), None);
///
/// state.apply(&StateChange::CurrentState(CurrentState::CleanSmart));
/// assert_eq!(state.activity(), Some(VacuumActivity::Cleaning));
///
/// // Any fault overrides the operating state
/// state.apply(&StateChange::Fault(Fault::TRAPPED));
/// assert_eq!(state.activity(), Some(VacuumActivity::Error));
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VacuumState {
    /// Active fault flags.
    fault: Fault,
    /// Operating state code, once reported.
    current_state: Option<CurrentState>,
    /// Suction level.
    fan_speed: FanSpeed,
    /// Battery percentage.
    battery: Option<u8>,
    /// Area cleaned in the current run.
    clean_area: Option<u32>,
    /// Minutes spent in the current run.
    clean_time: Option<u32>,
    /// Whether the mop attachment is fitted.
    mop_equipped: Option<bool>,
}

impl VacuumState {
    /// Creates a new state with nothing reported yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the hub activity.
    ///
    /// A non-empty fault set always yields [`VacuumActivity::Error`].
    /// Otherwise the operating state decides; `None` until it is reported.
    #[must_use]
    pub fn activity(&self) -> Option<VacuumActivity> {
        if !self.fault.is_empty() {
            return Some(VacuumActivity::Error);
        }
        self.current_state.as_ref().map(CurrentState::activity)
    }

    /// Returns the active fault flags.
    #[must_use]
    pub fn fault(&self) -> Fault {
        self.fault
    }

    /// Returns the operating state, if reported.
    #[must_use]
    pub fn current_state(&self) -> Option<CurrentState> {
        self.current_state
    }

    /// Returns `true` if the device last reported the paused state.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.current_state == Some(CurrentState::Pause)
    }

    /// Returns the suction level.
    #[must_use]
    pub fn fan_speed(&self) -> FanSpeed {
        self.fan_speed
    }

    /// Returns the battery percentage, if reported.
    #[must_use]
    pub fn battery(&self) -> Option<u8> {
        self.battery
    }

    /// Returns the area cleaned in the current run, if reported.
    #[must_use]
    pub fn clean_area(&self) -> Option<u32> {
        self.clean_area
    }

    /// Returns the minutes spent in the current run, if reported.
    #[must_use]
    pub fn clean_time(&self) -> Option<u32> {
        self.clean_time
    }

    /// Returns `true` if the mop attachment was reported as fitted.
    #[must_use]
    pub fn mop_equipped(&self) -> bool {
        self.mop_equipped.unwrap_or(false)
    }

    /// Returns the custom attributes shown next to the entity.
    ///
    /// Only reported values appear. The error attribute is present while
    /// at least one fault is active.
    #[must_use]
    pub fn attributes(&self) -> Map<String, Value> {
        let mut attrs = Map::new();
        if !self.fault.is_empty() {
            attrs.insert(ATTR_ERROR.to_string(), Value::from(self.fault.to_string()));
        }
        if let Some(area) = self.clean_area {
            attrs.insert(ATTR_CLEANED_AREA.to_string(), Value::from(area));
        }
        if let Some(minutes) = self.clean_time {
            attrs.insert(ATTR_CLEANING_TIME.to_string(), Value::from(minutes));
        }
        if let Some(mop) = self.mop_equipped {
            attrs.insert(ATTR_MOP_EQUIPPED.to_string(), Value::Bool(mop));
        }
        attrs
    }

    /// Applies a state change.
    ///
    /// Returns `true` if the state actually changed.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::Fault(fault) => replace(&mut self.fault, *fault),
            StateChange::CurrentState(state) => replace(&mut self.current_state, Some(*state)),
            StateChange::FanSpeed(speed) => replace(&mut self.fan_speed, *speed),
            StateChange::Battery(level) => replace(&mut self.battery, Some(*level)),
            StateChange::CleanArea(area) => replace(&mut self.clean_area, Some(*area)),
            StateChange::CleanTime(minutes) => replace(&mut self.clean_time, Some(*minutes)),
            StateChange::MopEquipped(mop) => replace(&mut self.mop_equipped, Some(*mop)),
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
