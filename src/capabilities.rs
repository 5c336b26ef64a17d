// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Supported-feature flags advertised to the hub.
//!
//! The hub asks every vacuum entity for a bitmask of the operations it
//! implements and hides controls for the rest. The bit values are the hub's
//! own; Prosenic vacuums advertise a fixed set, [`SupportedFeatures::PROSENIC`].

use std::fmt;
use std::ops::BitOr;

/// Bitmask of vacuum operations the entity supports.
///
/// # Examples
///
/// ```
/// use prosenic_vacuum::SupportedFeatures;
///
/// let features = SupportedFeatures::PROSENIC;
/// assert!(features.contains(SupportedFeatures::FAN_SPEED));
/// assert!(!features.contains(SupportedFeatures::LOCATE));
/// assert_eq!(features.bits(), 13_436);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SupportedFeatures(u32);

impl SupportedFeatures {
    /// Turn on.
    pub const TURN_ON: Self = Self(1);
    /// Turn off.
    pub const TURN_OFF: Self = Self(2);
    /// Pause a run.
    pub const PAUSE: Self = Self(4);
    /// Stop moving.
    pub const STOP: Self = Self(8);
    /// Return to the dock.
    pub const RETURN_HOME: Self = Self(16);
    /// Select a fan speed.
    pub const FAN_SPEED: Self = Self(32);
    /// Report the battery level.
    pub const BATTERY: Self = Self(64);
    /// Report a status string.
    pub const STATUS: Self = Self(128);
    /// Send raw commands.
    pub const SEND_COMMAND: Self = Self(256);
    /// Locate the robot.
    pub const LOCATE: Self = Self(512);
    /// Spot clean.
    pub const CLEAN_SPOT: Self = Self(1024);
    /// Provide a map.
    pub const MAP: Self = Self(2048);
    /// Report an activity state.
    pub const STATE: Self = Self(4096);
    /// Start a run.
    pub const START: Self = Self(8192);

    /// The feature set of Prosenic vacuums.
    pub const PROSENIC: Self = Self(
        Self::STATE.0
            | Self::STOP.0
            | Self::RETURN_HOME.0
            | Self::FAN_SPEED.0
            | Self::BATTERY.0
            | Self::CLEAN_SPOT.0
            | Self::START.0
            | Self::PAUSE.0,
    );

    /// Creates a feature set from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Returns `true` if every feature in `other` is supported.
    #[must_use]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for SupportedFeatures {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for SupportedFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}
