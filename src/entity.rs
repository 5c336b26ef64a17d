// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Capability traits exposed to the home automation hub.
//!
//! The hub sees a vacuum through four small traits instead of a base class:
//!
//! - [`Entity`]: identity, availability and extra attributes
//! - [`Pollable`]: periodic state refresh
//! - [`VacuumEntity`]: read-only vacuum properties
//! - [`VacuumControl`]: imperative vacuum operations
//!
//! [`Vacuum`](crate::Vacuum) implements all of them.

use std::future::Future;

use serde_json::{Map, Value};

use crate::capabilities::SupportedFeatures;
use crate::types::VacuumActivity;

/// Something the hub can display.
pub trait Entity {
    /// Display name.
    fn name(&self) -> &str;

    /// Whether the last state refresh succeeded.
    fn available(&self) -> bool;

    /// Whether the hub must poll for updates.
    fn should_poll(&self) -> bool {
        true
    }

    /// Additional attributes shown next to the state.
    fn extra_state_attributes(&self) -> Map<String, Value>;
}

/// An entity whose state is refreshed by polling.
pub trait Pollable: Entity {
    /// Fetches and applies the current device state.
    ///
    /// Failures are logged and reflected in [`Entity::available`]; they are
    /// never returned.
    fn update(&self) -> impl Future<Output = ()> + Send;
}

/// Read-only vacuum properties.
pub trait VacuumEntity: Entity {
    /// Current activity, `None` until the device reported its state.
    fn activity(&self) -> Option<VacuumActivity>;

    /// Battery percentage, `None` until reported.
    fn battery_level(&self) -> Option<u8>;

    /// Fan speed wire value.
    fn fan_speed(&self) -> &'static str;

    /// Every accepted fan speed wire value.
    fn fan_speed_list(&self) -> Vec<&'static str>;

    /// Operations this vacuum supports.
    fn supported_features(&self) -> SupportedFeatures;

    /// Every accepted remote control direction.
    fn direction_list(&self) -> Vec<&'static str>;
}

/// Imperative vacuum operations.
///
/// All operations are fire-and-forget: a failed command is logged, never
/// returned.
pub trait VacuumControl: VacuumEntity {
    /// Starts cleaning, or resumes the paused cleaning mode.
    fn start(&self) -> impl Future<Output = ()> + Send;

    /// Pauses the running cleaning mode.
    fn pause(&self) -> impl Future<Output = ()> + Send;

    /// Stops moving.
    fn stop(&self) -> impl Future<Output = ()> + Send;

    /// Sends the vacuum back to its dock.
    fn return_to_base(&self) -> impl Future<Output = ()> + Send;

    /// Cleans the area around the vacuum.
    fn clean_spot(&self) -> impl Future<Output = ()> + Send;

    /// Sets the fan speed from its wire value.
    fn set_fan_speed(&self, fan_speed: &str) -> impl Future<Output = ()> + Send;

    /// Moves the vacuum in the given direction.
    fn remote_control(&self, direction: &str) -> impl Future<Output = ()> + Send;
}
