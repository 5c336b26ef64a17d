// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hardware fault flags reported on the FAULT data point.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::error::ValueError;

/// Set of simultaneously active hardware faults.
///
/// Any non-empty set puts the vacuum into the error activity, whatever the
/// operating state code says.
///
/// # Examples
///
/// ```
/// use prosenic_vacuum::types::Fault;
///
/// let fault = Fault::SIDE_BRUSH | Fault::DUST_BIN;
/// assert!(fault.contains(Fault::DUST_BIN));
/// assert_eq!(fault.to_string(), "SIDE_BRUSH|DUST_BIN");
/// assert!(Fault::NO_ERROR.is_empty());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub struct Fault(u32);

impl Fault {
    /// No active fault.
    pub const NO_ERROR: Self = Self(0);
    /// Side brush blocked.
    pub const SIDE_BRUSH: Self = Self(1);
    /// Roller brush blocked.
    pub const ROLLER_BRUSH: Self = Self(2);
    /// Left wheel stuck.
    pub const LEFT_WHEEL: Self = Self(4);
    /// Right wheel stuck.
    pub const RIGHT_WHEEL: Self = Self(8);
    /// Dust bin missing or full.
    pub const DUST_BIN: Self = Self(16);
    /// Lifted off the ground.
    pub const OFF_GROUND: Self = Self(32);
    /// Collision sensor fault.
    pub const COLLISION_SENSOR: Self = Self(64);
    /// Water tank missing or empty.
    pub const WATER_TANK: Self = Self(128);
    /// Virtual wall fault.
    pub const VIRTUAL_WALL: Self = Self(256);
    /// Robot is trapped.
    pub const TRAPPED: Self = Self(512);
    /// Unspecified fault.
    pub const UNKNOWN: Self = Self(1024);

    const NAMED: [(Self, &'static str); 11] = [
        (Self::SIDE_BRUSH, "SIDE_BRUSH"),
        (Self::ROLLER_BRUSH, "ROLLER_BRUSH"),
        (Self::LEFT_WHEEL, "LEFT_WHEEL"),
        (Self::RIGHT_WHEEL, "RIGHT_WHEEL"),
        (Self::DUST_BIN, "DUST_BIN"),
        (Self::OFF_GROUND, "OFF_GROUND"),
        (Self::COLLISION_SENSOR, "COLLISION_SENSOR"),
        (Self::WATER_TANK, "WATER_TANK"),
        (Self::VIRTUAL_WALL, "VIRTUAL_WALL"),
        (Self::TRAPPED, "TRAPPED"),
        (Self::UNKNOWN, "UNKNOWN"),
    ];

    /// Creates a fault set from a raw data point value.
    ///
    /// Bits above the documented flags are kept so they still count as an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidFault` for negative values or values wider
    /// than 32 bits.
    pub fn from_raw(value: i64) -> Result<Self, ValueError> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| ValueError::InvalidFault(value))
    }

    /// Returns the raw bit pattern.
    #[must_use]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Returns `true` if no fault is active.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if every flag in `other` is active.
    #[must_use]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the names of the active documented flags.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }

    fn undocumented_bits(&self) -> u32 {
        Self::NAMED
            .iter()
            .fold(self.0, |bits, (flag, _)| bits & !flag.0)
    }
}

impl BitOr for Fault {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Fault {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "NO_ERROR");
        }
        let mut parts: Vec<String> = self.names().into_iter().map(String::from).collect();
        let extra = self.undocumented_bits();
        if extra != 0 {
            parts.push(format!("{extra:#x}"));
        }
        write!(f, "{}", parts.join("|"))
    }
}
