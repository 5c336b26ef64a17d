// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Suction levels for the FAN_SPEED data point.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Suction level of the vacuum.
///
/// The wire values are the device's own spellings, including the
/// upper-case `ECO`. Parsing is exact: the hub offers the values from
/// [`FanSpeed::names`] and anything else is rejected.
///
/// # Examples
///
/// ```
/// use prosenic_vacuum::types::FanSpeed;
///
/// let speed: FanSpeed = "strong".parse().unwrap();
/// assert_eq!(speed, FanSpeed::Strong);
/// assert_eq!(FanSpeed::Eco.as_str(), "ECO");
/// assert!("turbo".parse::<FanSpeed>().is_err());
/// assert_eq!(FanSpeed::default(), FanSpeed::Normal);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum FanSpeed {
    /// Quiet, low suction.
    #[serde(rename = "ECO")]
    Eco,
    /// Standard suction.
    #[default]
    #[serde(rename = "normal")]
    Normal,
    /// Maximum suction.
    #[serde(rename = "strong")]
    Strong,
}

impl FanSpeed {
    /// All speeds in the order the hub lists them.
    pub const ALL: [Self; 3] = [Self::Eco, Self::Normal, Self::Strong];

    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eco => "ECO",
            Self::Normal => "normal",
            Self::Strong => "strong",
        }
    }

    /// Returns every wire value, for the hub's fan speed list.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FanSpeed {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|speed| speed.as_str() == s)
            .ok_or_else(|| ValueError::InvalidFanSpeed(s.to_string()))
    }
}
