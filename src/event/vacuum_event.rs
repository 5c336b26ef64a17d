// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vacuum event types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::StateChange;
use crate::types::VacuumActivity;

/// Events emitted by a vacuum entity.
///
/// # Examples
///
/// ```
/// use prosenic_vacuum::event::VacuumEvent;
/// use prosenic_vacuum::state::StateChange;
///
/// let event = VacuumEvent::state_changed("Kitchen", StateChange::Battery(80), None);
/// assert_eq!(event.name(), "Kitchen");
/// assert!(event.is_state_change());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VacuumEvent {
    /// A status report changed one tracked property.
    StateChanged {
        /// Name of the entity.
        name: String,
        /// The change that was applied.
        change: StateChange,
        /// Activity after the change was applied.
        activity: Option<VacuumActivity>,
        /// When the change was applied.
        timestamp: DateTime<Utc>,
    },

    /// The entity became reachable or unreachable.
    AvailabilityChanged {
        /// Name of the entity.
        name: String,
        /// Whether the last status fetch succeeded.
        available: bool,
        /// When the transition was observed.
        timestamp: DateTime<Utc>,
    },
}

impl VacuumEvent {
    /// Creates a state change event stamped with the current time.
    #[must_use]
    pub fn state_changed(
        name: impl Into<String>,
        change: StateChange,
        activity: Option<VacuumActivity>,
    ) -> Self {
        Self::StateChanged {
            name: name.into(),
            change,
            activity,
            timestamp: Utc::now(),
        }
    }

    /// Creates an availability event stamped with the current time.
    #[must_use]
    pub fn availability_changed(name: impl Into<String>, available: bool) -> Self {
        Self::AvailabilityChanged {
            name: name.into(),
            available,
            timestamp: Utc::now(),
        }
    }

    /// Returns the name of the entity that emitted this event.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::StateChanged { name, .. } | Self::AvailabilityChanged { name, .. } => name,
        }
    }

    /// Returns when the event was created.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::StateChanged { timestamp, .. } | Self::AvailabilityChanged { timestamp, .. } => {
                *timestamp
            }
        }
    }

    /// Returns `true` if this is a state change event.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }

    /// Returns `true` if this is an availability event.
    #[must_use]
    pub fn is_availability(&self) -> bool {
        matches!(self, Self::AvailabilityChanged { .. })
    }
}
