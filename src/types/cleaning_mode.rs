// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cleaning modes for the CLEANING_MODE data point.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// A settable cleaning mode.
///
/// The device also reports `idle` on this data point, but that value cannot
/// be written and is not modelled.
///
/// # Examples
///
/// ```
/// use prosenic_vacuum::types::CleaningMode;
///
/// assert_eq!(CleaningMode::ChargeGo.as_str(), "chargego");
/// // The device spells spiral this way.
/// assert_eq!(CleaningMode::Spiral.as_str(), "sprial");
/// assert_eq!("mop".parse::<CleaningMode>().unwrap(), CleaningMode::Mop);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CleaningMode {
    /// Automatic full clean.
    #[serde(rename = "smart")]
    Smart,
    /// Follow the walls.
    #[serde(rename = "wallfollow")]
    WallFollow,
    /// Mop the floor.
    #[serde(rename = "mop")]
    Mop,
    /// Go back to the dock.
    #[serde(rename = "chargego")]
    ChargeGo,
    /// Spiral spot clean.
    #[serde(rename = "sprial")]
    Spiral,
    /// Single-room clean.
    #[serde(rename = "single")]
    Single,
}

impl CleaningMode {
    /// All settable modes.
    pub const ALL: [Self; 6] = [
        Self::Smart,
        Self::WallFollow,
        Self::Mop,
        Self::ChargeGo,
        Self::Spiral,
        Self::Single,
    ];

    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Smart => "smart",
            Self::WallFollow => "wallfollow",
            Self::Mop => "mop",
            Self::ChargeGo => "chargego",
            Self::Spiral => "sprial",
            Self::Single => "single",
        }
    }
}

impl fmt::Display for CleaningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CleaningMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ValueError::InvalidCleaningMode(s.to_string()))
    }
}
