// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vacuum command definitions.
//!
//! A command is a single data point write: a [`Field`] and the JSON value to
//! store in it. The device client sends it as `{"<code>": <value>}`.
//!
//! | Command | Data point | Example value |
//! |---------|------------|---------------|
//! | [`VacuumCommand::CleaningMode`] | 25 | `"smart"`, `"chargego"` |
//! | [`VacuumCommand::Direction`] | 26 | `"forward"`, `"stop"` |
//! | [`VacuumCommand::FanSpeed`] | 27 | `"ECO"`, `"strong"` |
//!
//! # Examples
//!
//! ```
//! use prosenic_vacuum::command::{Command, VacuumCommand};
//! use prosenic_vacuum::types::{CleaningMode, Field};
//!
//! let cmd = VacuumCommand::from(CleaningMode::ChargeGo);
//! assert_eq!(cmd.field(), Field::CleaningMode);
//! assert_eq!(cmd.value(), serde_json::json!("chargego"));
//! assert_eq!(cmd.to_dps(), serde_json::json!({"25": "chargego"}));
//! ```

use serde_json::Value;

use crate::types::{CleaningMode, Direction, FanSpeed, Field};

/// A data point write that can be sent to the vacuum.
pub trait Command {
    /// Returns the data point this command writes.
    fn field(&self) -> Field;

    /// Returns the value to write.
    fn value(&self) -> Value;

    /// Returns the command as a one-entry DPS object.
    fn to_dps(&self) -> Value {
        let mut dps = serde_json::Map::new();
        dps.insert(self.field().key(), self.value());
        Value::Object(dps)
    }
}

/// The writes the vacuum entity issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VacuumCommand {
    /// Start a cleaning mode, or toggle pause when repeated.
    CleaningMode(CleaningMode),
    /// Move by remote control.
    Direction(Direction),
    /// Change the suction level.
    FanSpeed(FanSpeed),
}

impl VacuumCommand {
    /// Returns the cleaning mode if this command selects one.
    ///
    /// The entity remembers it so that `start` can resume after a pause.
    #[must_use]
    pub const fn cleaning_mode(&self) -> Option<CleaningMode> {
        match self {
            Self::CleaningMode(mode) => Some(*mode),
            _ => None,
        }
    }
}

impl Command for VacuumCommand {
    fn field(&self) -> Field {
        match self {
            Self::CleaningMode(_) => Field::CleaningMode,
            Self::Direction(_) => Field::DirectionControl,
            Self::FanSpeed(_) => Field::FanSpeed,
        }
    }

    fn value(&self) -> Value {
        match self {
            Self::CleaningMode(mode) => Value::from(mode.as_str()),
            Self::Direction(direction) => Value::from(direction.as_str()),
            Self::FanSpeed(speed) => Value::from(speed.as_str()),
        }
    }
}

impl From<CleaningMode> for VacuumCommand {
    fn from(mode: CleaningMode) -> Self {
        Self::CleaningMode(mode)
    }
}

impl From<Direction> for VacuumCommand {
    fn from(direction: Direction) -> Self {
        Self::Direction(direction)
    }
}

impl From<FanSpeed> for VacuumCommand {
    fn from(speed: FanSpeed) -> Self {
        Self::FanSpeed(speed)
    }
}
