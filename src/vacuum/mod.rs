// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The Prosenic vacuum entity.
//!
//! [`Vacuum`] keeps the last known device state, turns hub operations into
//! data point writes, and remembers enough about past commands to resume
//! after a pause and to restore the chosen fan speed.
//!
//! # Examples
//!
//! ```ignore
//! use prosenic_vacuum::Vacuum;
//! use prosenic_vacuum::protocol::TuyaClient;
//!
//! # async fn example() {
//! let client = TuyaClient::new("bf1234567890abcdef", "192.168.1.60", "0123456789abcdef", "3.3");
//! let vacuum = Vacuum::new("Kitchen", client, true);
//!
//! vacuum.update().await;
//! vacuum.set_fan_speed("strong").await;
//! vacuum.start().await;
//! # }
//! ```

mod restore;

pub use restore::REMEMBER_FAN_SPEED_DELAY;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::capabilities::SupportedFeatures;
use crate::command::{Command, VacuumCommand};
use crate::entity::{Entity, Pollable, VacuumControl, VacuumEntity};
use crate::event::{EVENT_CHANNEL_CAPACITY, VacuumEvent};
use crate::protocol::Protocol;
use crate::state::{StateChange, VacuumState};
use crate::telemetry::parse_status;
use crate::types::{CleaningMode, Direction, FanSpeed, VacuumActivity};

use restore::{CommandMemory, FanSpeedRestorer};

/// A Prosenic robot vacuum exposed to the hub.
///
/// The type parameter `P` is the device client. Use
/// `TuyaClient` (feature `tuya`) for real devices.
pub struct Vacuum<P: Protocol> {
    name: String,
    protocol: Arc<P>,
    remember_fan_speed: bool,
    state: Arc<RwLock<VacuumState>>,
    memory: Arc<Mutex<CommandMemory>>,
    available: AtomicBool,
    events: broadcast::Sender<VacuumEvent>,
    restorer: FanSpeedRestorer,
    poller: Mutex<Option<JoinHandle<()>>>,
}

impl<P: Protocol> Vacuum<P> {
    /// Creates an entity around a device client.
    ///
    /// The entity starts unavailable with no known state.
    pub fn new(name: impl Into<String>, protocol: P, remember_fan_speed: bool) -> Self {
        Self::with_restore_delay(name, protocol, remember_fan_speed, REMEMBER_FAN_SPEED_DELAY)
    }

    /// Creates an entity with a custom fan speed restoration delay.
    pub fn with_restore_delay(
        name: impl Into<String>,
        protocol: P,
        remember_fan_speed: bool,
        delay: Duration,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            name: name.into(),
            protocol: Arc::new(protocol),
            remember_fan_speed,
            state: Arc::new(RwLock::new(VacuumState::new())),
            memory: Arc::new(Mutex::new(CommandMemory::default())),
            available: AtomicBool::new(false),
            events,
            restorer: FanSpeedRestorer::new(delay),
            poller: Mutex::new(None),
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the device client.
    #[must_use]
    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    /// Returns `true` if fan speed restoration is enabled.
    #[must_use]
    pub fn remembers_fan_speed(&self) -> bool {
        self.remember_fan_speed
    }

    /// Returns a snapshot of the last known device state.
    #[must_use]
    pub fn state(&self) -> VacuumState {
        self.state.read().clone()
    }

    /// Returns `true` if the last status fetch succeeded.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Acquire)
    }

    /// Returns the cleaning mode a later `start` or `pause` would re-send.
    #[must_use]
    pub fn last_command(&self) -> Option<CleaningMode> {
        self.memory.lock().last_command
    }

    /// Returns the fan speed that restoration would write.
    #[must_use]
    pub fn stored_fan_speed(&self) -> FanSpeed {
        self.memory.lock().fan_speed
    }

    /// Returns the number of fan speed restorations still waiting.
    #[must_use]
    pub fn pending_restorations(&self) -> usize {
        self.restorer.pending()
    }

    /// Subscribes to state and availability events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<VacuumEvent> {
        self.events.subscribe()
    }

    /// Returns the number of live event subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }

    fn publish(&self, event: VacuumEvent) {
        // No subscribers is not an error
        let _ = self.events.send(event);
    }

    // ========== Polling ==========

    /// Fetches the device status and applies it.
    ///
    /// On success the entity becomes available and every change is
    /// published. On failure the error is logged and the entity becomes
    /// unavailable; the known state is kept.
    pub async fn update(&self) {
        match self.protocol.status().await {
            Ok(dps) => {
                let changes = parse_status(&dps);
                tracing::debug!(
                    name = %self.name,
                    data_points = dps.len(),
                    changes = changes.len(),
                    "Received status"
                );
                for (change, activity) in self.apply_changes(changes) {
                    self.publish(VacuumEvent::state_changed(&self.name, change, activity));
                }
                self.set_available(true);
            }
            Err(e) => {
                tracing::error!(
                    name = %self.name,
                    error = %e,
                    "Got exception while fetching the state"
                );
                self.set_available(false);
            }
        }
    }

    fn apply_changes(
        &self,
        changes: Vec<StateChange>,
    ) -> Vec<(StateChange, Option<VacuumActivity>)> {
        let mut state = self.state.write();
        let mut applied = Vec::with_capacity(changes.len());
        for change in changes {
            if state.apply(&change) {
                let activity = state.activity();
                tracing::trace!(name = %self.name, field = %change.field(), "Applied change");
                applied.push((change, activity));
            }
        }
        applied
    }

    fn set_available(&self, available: bool) {
        if self.available.swap(available, Ordering::AcqRel) != available {
            tracing::info!(name = %self.name, available, "Availability changed");
            self.publish(VacuumEvent::availability_changed(&self.name, available));
        }
    }

    /// Polls the device every `interval` until shut down or dropped.
    ///
    /// The first poll happens one interval from now. A slow poll delays the
    /// next one instead of queueing extra polls. Calling this again replaces
    /// the previous loop.
    ///
    /// A zero `interval` is rejected: the error is logged and any running
    /// loop keeps its current interval.
    pub fn start_polling(self: &Arc<Self>, interval: Duration) {
        if interval.is_zero() {
            tracing::error!(name = %self.name, "Refusing to poll with a zero interval");
            return;
        }

        let weak = Arc::downgrade(self);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let Some(vacuum) = weak.upgrade() else {
                    break;
                };
                vacuum.update().await;
            }
        });

        if let Some(previous) = self.poller.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Returns `true` while a polling loop is running.
    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.poller
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stops polling and aborts pending fan speed restorations.
    pub fn shutdown(&self) {
        if let Some(poller) = self.poller.lock().take() {
            poller.abort();
        }
        self.restorer.abort_all();
        tracing::debug!(name = %self.name, "Vacuum shut down");
    }

    // ========== Operations ==========

    /// Starts cleaning.
    ///
    /// Resumes the remembered cleaning mode when the vacuum is paused.
    /// Otherwise starts a smart clean, or mopping when the mop is fitted.
    pub async fn start(&self) {
        let (paused, mop_equipped) = {
            let state = self.state.read();
            (state.is_paused(), state.mop_equipped())
        };

        let mode = match self.last_command() {
            Some(mode) if paused => mode,
            _ if mop_equipped => CleaningMode::Mop,
            _ => CleaningMode::Smart,
        };
        self.execute(VacuumCommand::CleaningMode(mode)).await;
    }

    /// Pauses cleaning.
    ///
    /// The device toggles pause when it receives its running mode again, so
    /// this re-sends the remembered cleaning mode. Does nothing without one
    /// or when already paused.
    pub async fn pause(&self) {
        if self.state.read().is_paused() {
            return;
        }
        if let Some(mode) = self.last_command() {
            self.execute(VacuumCommand::CleaningMode(mode)).await;
        }
    }

    /// Stops moving.
    pub async fn stop(&self) {
        self.execute(VacuumCommand::Direction(Direction::Stop)).await;
    }

    /// Sends the vacuum back to its dock.
    pub async fn return_to_base(&self) {
        self.execute(VacuumCommand::CleaningMode(CleaningMode::ChargeGo))
            .await;
    }

    /// Cleans the area around the vacuum in a spiral.
    pub async fn clean_spot(&self) {
        self.execute(VacuumCommand::CleaningMode(CleaningMode::Spiral))
            .await;
    }

    /// Sets the fan speed from its wire value (`ECO`, `normal`, `strong`).
    ///
    /// The speed is also stored for restoration. Unknown values are logged
    /// and nothing is sent.
    pub async fn set_fan_speed(&self, fan_speed: &str) {
        let speed = match fan_speed.parse::<FanSpeed>() {
            Ok(speed) => speed,
            Err(e) => {
                tracing::error!(
                    name = %self.name,
                    error = %e,
                    valid = ?FanSpeed::names(),
                    "Fan speed not recognized"
                );
                return;
            }
        };

        self.execute(VacuumCommand::FanSpeed(speed)).await;
        self.memory.lock().fan_speed = speed;
    }

    /// Moves the vacuum in a direction (`forward`, `backward`, `turnleft`,
    /// `turnright`, `stop`).
    ///
    /// Names such as `TURN_LEFT` are accepted too. Unknown values are logged
    /// and nothing is sent.
    pub async fn remote_control(&self, direction: &str) {
        match direction.parse::<Direction>() {
            Ok(direction) => self.execute(VacuumCommand::Direction(direction)).await,
            Err(e) => {
                tracing::error!(
                    name = %self.name,
                    error = %e,
                    valid = ?Direction::names(),
                    "Direction not recognized"
                );
            }
        }
    }

    /// Writes one data point.
    ///
    /// Remembers the cleaning mode of the command, or forgets it for any
    /// other command. After a successful write, schedules a fan speed
    /// restoration when enabled.
    async fn execute(&self, command: VacuumCommand) {
        self.memory.lock().last_command = command.cleaning_mode();

        match self.protocol.send_command(&command).await {
            Ok(()) => {
                tracing::debug!(
                    name = %self.name,
                    field = %command.field(),
                    value = %command.value(),
                    "Command sent"
                );
                if self.remember_fan_speed {
                    self.restorer.schedule(
                        &self.name,
                        Arc::clone(&self.protocol),
                        Arc::clone(&self.memory),
                    );
                }
            }
            Err(e) => {
                tracing::error!(
                    name = %self.name,
                    field = %command.field(),
                    value = %command.value(),
                    error = %e,
                    "Could not execute command"
                );
            }
        }
    }
}

impl<P: Protocol> Drop for Vacuum<P> {
    fn drop(&mut self) {
        if let Some(poller) = self.poller.get_mut().take() {
            poller.abort();
        }
    }
}

impl<P: Protocol> std::fmt::Debug for Vacuum<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vacuum")
            .field("name", &self.name)
            .field("available", &self.is_available())
            .field("remember_fan_speed", &self.remember_fan_speed)
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

impl<P: Protocol> Entity for Vacuum<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn available(&self) -> bool {
        self.is_available()
    }

    fn extra_state_attributes(&self) -> Map<String, Value> {
        self.state.read().attributes()
    }
}

impl<P: Protocol> Pollable for Vacuum<P> {
    async fn update(&self) {
        Vacuum::update(self).await;
    }
}

impl<P: Protocol> VacuumEntity for Vacuum<P> {
    fn activity(&self) -> Option<VacuumActivity> {
        self.state.read().activity()
    }

    fn battery_level(&self) -> Option<u8> {
        self.state.read().battery()
    }

    fn fan_speed(&self) -> &'static str {
        self.state.read().fan_speed().as_str()
    }

    fn fan_speed_list(&self) -> Vec<&'static str> {
        FanSpeed::names()
    }

    fn supported_features(&self) -> SupportedFeatures {
        SupportedFeatures::PROSENIC
    }

    fn direction_list(&self) -> Vec<&'static str> {
        Direction::names()
    }
}

impl<P: Protocol> VacuumControl for Vacuum<P> {
    async fn start(&self) {
        Vacuum::start(self).await;
    }

    async fn pause(&self) {
        Vacuum::pause(self).await;
    }

    async fn stop(&self) {
        Vacuum::stop(self).await;
    }

    async fn return_to_base(&self) {
        Vacuum::return_to_base(self).await;
    }

    async fn clean_spot(&self) {
        Vacuum::clean_spot(self).await;
    }

    async fn set_fan_speed(&self, fan_speed: &str) {
        Vacuum::set_fan_speed(self, fan_speed).await;
    }

    async fn remote_control(&self, direction: &str) {
        Vacuum::remote_control(self, direction).await;
    }
}
