// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tuya data point codes used by Prosenic vacuums.

use std::fmt;
use std::str::FromStr;

use crate::error::{ParseError, ValueError};

/// A numbered data point (DP) of the vacuum's local protocol.
///
/// # Examples
///
/// ```
/// use prosenic_vacuum::types::Field;
///
/// assert_eq!(Field::FanSpeed.code(), 27);
/// assert_eq!(Field::from_code(38).unwrap(), Field::CurrentState);
/// assert!(Field::CleaningMode.is_writable());
/// assert!(!Field::Battery.is_writable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Main power switch (rw).
    Power,
    /// Active fault flags (ro).
    Fault,
    /// Cleaning mode command (rw).
    CleaningMode,
    /// Remote control direction (rw).
    DirectionControl,
    /// Suction level (rw).
    FanSpeed,
    /// Operating state code (ro).
    CurrentState,
    /// Battery percentage (ro).
    Battery,
    /// Cleaning history blob (ro).
    CleanRecord,
    /// Area cleaned in the current run (ro).
    CleanArea,
    /// Minutes spent in the current run (ro).
    CleanTime,
    /// Whether the mop attachment is fitted (ro).
    SweepOrMop,
}

impl Field {
    /// All data points, in code order.
    pub const ALL: [Self; 11] = [
        Self::Power,
        Self::Fault,
        Self::CleaningMode,
        Self::DirectionControl,
        Self::FanSpeed,
        Self::CurrentState,
        Self::Battery,
        Self::CleanRecord,
        Self::CleanArea,
        Self::CleanTime,
        Self::SweepOrMop,
    ];

    /// Returns the numeric data point code.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Power => 1,
            Self::Fault => 11,
            Self::CleaningMode => 25,
            Self::DirectionControl => 26,
            Self::FanSpeed => 27,
            Self::CurrentState => 38,
            Self::Battery => 39,
            Self::CleanRecord => 40,
            Self::CleanArea => 41,
            Self::CleanTime => 42,
            Self::SweepOrMop => 49,
        }
    }

    /// Looks up a data point by its numeric code.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownDataPoint` for codes the vacuum does not use.
    pub fn from_code(code: i64) -> Result<Self, ValueError> {
        Self::ALL
            .into_iter()
            .find(|f| i64::from(f.code()) == code)
            .ok_or(ValueError::UnknownDataPoint(code))
    }

    /// Returns the upper-case name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Power => "POWER",
            Self::Fault => "FAULT",
            Self::CleaningMode => "CLEANING_MODE",
            Self::DirectionControl => "DIRECTION_CONTROL",
            Self::FanSpeed => "FAN_SPEED",
            Self::CurrentState => "CURRENT_STATE",
            Self::Battery => "BATTERY",
            Self::CleanRecord => "CLEAN_RECORD",
            Self::CleanArea => "CLEAN_AREA",
            Self::CleanTime => "CLEAN_TIME",
            Self::SweepOrMop => "SWEEP_OR_MOP",
        }
    }

    /// Returns `true` if the hub may write this data point.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        matches!(
            self,
            Self::Power | Self::CleaningMode | Self::DirectionControl | Self::FanSpeed
        )
    }

    /// Returns `true` for data points that only carry commands and are
    /// ignored when they show up in a status report.
    #[must_use]
    pub const fn is_write_only(&self) -> bool {
        matches!(
            self,
            Self::Power | Self::CleaningMode | Self::DirectionControl
        )
    }

    /// Returns the key used for this data point in a status mapping.
    #[must_use]
    pub fn key(&self) -> String {
        self.code().to_string()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.code())
    }
}

impl FromStr for Field {
    type Err = ParseError;

    /// Parses a status mapping key such as `"27"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code: i64 = s
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidKey(s.to_string()))?;
        Ok(Self::from_code(code)?)
    }
}
