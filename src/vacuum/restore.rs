// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Delayed fan speed restoration.
//!
//! Some Prosenic models fall back to their default suction whenever they
//! receive a command. When restoration is enabled, every successful command
//! schedules a one-shot task that waits [`REMEMBER_FAN_SPEED_DELAY`] and then
//! writes the stored fan speed again.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::command::VacuumCommand;
use crate::protocol::Protocol;
use crate::types::{CleaningMode, FanSpeed};

/// Delay between a command and the fan speed restoration it triggers.
pub const REMEMBER_FAN_SPEED_DELAY: Duration = Duration::from_secs(6);

/// What the entity remembers between commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CommandMemory {
    /// Cleaning mode of the last command, cleared by any other command.
    pub(crate) last_command: Option<CleaningMode>,
    /// Fan speed last chosen through the entity.
    pub(crate) fan_speed: FanSpeed,
}

/// Owns the pending restoration tasks of one entity.
///
/// Tasks are independent: a later command never cancels an earlier
/// restoration. All pending tasks are aborted when the restorer is dropped.
#[derive(Debug)]
pub(crate) struct FanSpeedRestorer {
    delay: Duration,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl FanSpeedRestorer {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Spawns a restoration task.
    ///
    /// The fan speed is read from `memory` when the delay elapses, so a
    /// speed chosen in the meantime wins.
    pub(crate) fn schedule<P: Protocol>(
        &self,
        name: &str,
        protocol: Arc<P>,
        memory: Arc<Mutex<CommandMemory>>,
    ) {
        let delay = self.delay;
        let name = name.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let speed = memory.lock().fan_speed;
            tracing::debug!(name = %name, fan_speed = %speed, "Restoring stored fan speed");
            if let Err(e) = protocol
                .send_command(&VacuumCommand::FanSpeed(speed))
                .await
            {
                tracing::error!(
                    name = %name,
                    fan_speed = %speed,
                    error = %e,
                    "Could not restore the fan speed"
                );
            }
        });

        let mut tasks = self.tasks.lock();
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
    }

    /// Returns the number of restorations that have not completed yet.
    pub(crate) fn pending(&self) -> usize {
        self.tasks
            .lock()
            .iter()
            .filter(|task| !task.is_finished())
            .count()
    }

    /// Aborts every pending restoration.
    pub(crate) fn abort_all(&self) {
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
    }
}

impl Drop for FanSpeedRestorer {
    fn drop(&mut self) {
        self.abort_all();
    }
}
