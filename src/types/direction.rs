// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Remote control directions for the DIRECTION_CONTROL data point.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// A remote control movement.
///
/// Parsing accepts the wire value (`turnleft`) as well as the name form
/// (`TURN_LEFT`, `turn_left`), case-insensitively.
///
/// # Examples
///
/// ```
/// use prosenic_vacuum::types::Direction;
///
/// assert_eq!("turnleft".parse::<Direction>().unwrap(), Direction::TurnLeft);
/// assert_eq!("TURN_LEFT".parse::<Direction>().unwrap(), Direction::TurnLeft);
/// assert_eq!("Stop".parse::<Direction>().unwrap(), Direction::Stop);
/// assert!("up".parse::<Direction>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// Drive forward.
    #[serde(rename = "forward")]
    Forward,
    /// Drive backward.
    #[serde(rename = "backward")]
    Backward,
    /// Rotate left.
    #[serde(rename = "turnleft")]
    TurnLeft,
    /// Rotate right.
    #[serde(rename = "turnright")]
    TurnRight,
    /// Stop moving.
    #[serde(rename = "stop")]
    Stop,
}

impl Direction {
    /// All directions in the order the hub lists them.
    pub const ALL: [Self; 5] = [
        Self::Forward,
        Self::Backward,
        Self::TurnLeft,
        Self::TurnRight,
        Self::Stop,
    ];

    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::TurnLeft => "turnleft",
            Self::TurnRight => "turnright",
            Self::Stop => "stop",
        }
    }

    /// Returns every wire value, for the hub's direction list.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_')
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|direction| direction.as_str() == normalized)
            .ok_or_else(|| ValueError::InvalidDirection(s.to_string()))
    }
}
