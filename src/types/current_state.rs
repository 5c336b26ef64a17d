// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating state codes and the hub-facing vacuum activity.
//!
//! The device reports a small integer on the CURRENT_STATE data point. Each
//! known code maps to exactly one [`VacuumActivity`]. Code 6 shows up on real
//! devices but is undocumented by the vendor, so it is kept as its own
//! variant and reported as [`VacuumActivity::Unknown`] instead of being
//! guessed.

use std::fmt;

use crate::error::ValueError;

/// Operating state as reported by the device.
///
/// # Examples
///
/// ```
/// use prosenic_vacuum::types::{CurrentState, VacuumActivity};
///
/// let state = CurrentState::from_code(4).unwrap();
/// assert_eq!(state, CurrentState::GoingCharging);
/// assert_eq!(state.activity(), VacuumActivity::Returning);
///
/// assert_eq!(CurrentState::from_code(6).unwrap().activity(), VacuumActivity::Unknown);
/// assert!(CurrentState::from_code(42).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CurrentState {
    /// Standing by (0).
    StandBy,
    /// Smart cleaning (1).
    CleanSmart,
    /// Mopping (2).
    Mopping,
    /// Wall-follow cleaning (3).
    CleanWallFollow,
    /// Heading back to the dock (4).
    GoingCharging,
    /// Charging on the dock (5).
    Charging,
    /// Undocumented code 6.
    Undocumented,
    /// Paused (7).
    Pause,
    /// Single-room cleaning (8).
    CleanSingle,
}

impl CurrentState {
    /// Maps a raw operating state code.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidStateCode` for codes outside 0-8.
    pub const fn from_code(code: i64) -> Result<Self, ValueError> {
        match code {
            0 => Ok(Self::StandBy),
            1 => Ok(Self::CleanSmart),
            2 => Ok(Self::Mopping),
            3 => Ok(Self::CleanWallFollow),
            4 => Ok(Self::GoingCharging),
            5 => Ok(Self::Charging),
            6 => Ok(Self::Undocumented),
            7 => Ok(Self::Pause),
            8 => Ok(Self::CleanSingle),
            _ => Err(ValueError::InvalidStateCode(code)),
        }
    }

    /// Returns the raw code.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::StandBy => 0,
            Self::CleanSmart => 1,
            Self::Mopping => 2,
            Self::CleanWallFollow => 3,
            Self::GoingCharging => 4,
            Self::Charging => 5,
            Self::Undocumented => 6,
            Self::Pause => 7,
            Self::CleanSingle => 8,
        }
    }

    /// Returns the hub activity this state is displayed as.
    #[must_use]
    pub const fn activity(&self) -> VacuumActivity {
        match self {
            Self::StandBy => VacuumActivity::Idle,
            Self::CleanSmart | Self::CleanWallFollow | Self::CleanSingle => {
                VacuumActivity::Cleaning
            }
            Self::Mopping => VacuumActivity::Mopping,
            Self::GoingCharging => VacuumActivity::Returning,
            Self::Charging => VacuumActivity::Docked,
            Self::Undocumented => VacuumActivity::Unknown,
            Self::Pause => VacuumActivity::Paused,
        }
    }
}

/// Activity of the vacuum entity as shown by the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VacuumActivity {
    /// Not doing anything.
    Idle,
    /// Vacuuming.
    Cleaning,
    /// Mopping.
    Mopping,
    /// Returning to the dock.
    Returning,
    /// Sitting on the dock.
    Docked,
    /// Paused mid-run.
    Paused,
    /// At least one fault flag is active.
    Error,
    /// The device reported a state with no documented meaning.
    Unknown,
}

impl VacuumActivity {
    /// Returns the hub state string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Cleaning => "cleaning",
            Self::Mopping => "mopping",
            Self::Returning => "returning",
            Self::Docked => "docked",
            Self::Paused => "paused",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for VacuumActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
