// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Prosenic robot vacuum integration for home automation hubs.
//!
//! Prosenic vacuums are Tuya devices controlled over the local network.
//! This library maps their data points to a vacuum entity a hub can poll
//! and command.
//!
//! # Supported Features
//!
//! - **State mapping**: operating state, faults, battery, fan speed, cleaned
//!   area, cleaning time and mop attachment
//! - **Commands**: start, pause, stop, return to base, spot cleaning, fan
//!   speed and remote control
//! - **Resume after pause**: the last cleaning mode is remembered
//! - **Fan speed restoration**: optionally re-sends the chosen fan speed a
//!   few seconds after every command
//! - **Events**: state and availability changes on a broadcast channel
//!
//! # Quick Start
//!
//! ```ignore
//! use prosenic_vacuum::platform::{DEFAULT_SCAN_INTERVAL, VacuumRegistry, setup_platform};
//! use prosenic_vacuum::protocol::TuyaClient;
//! use prosenic_vacuum::PlatformConfig;
//!
//! #[tokio::main]
//! async fn main() -> prosenic_vacuum::Result<()> {
//!     let config = PlatformConfig::new("192.168.1.60", "bf1234567890abcdef", "0123456789abcdef")
//!         .with_name("Living room")
//!         .with_remember_fan_speed(true);
//!
//!     let registry = VacuumRegistry::new();
//!     let vacuum = setup_platform(&config, &registry, TuyaClient::from_config).await?;
//!     vacuum.start_polling(DEFAULT_SCAN_INTERVAL);
//!
//!     let mut events = vacuum.subscribe();
//!     vacuum.set_fan_speed("strong").await;
//!     vacuum.start().await;
//!
//!     while let Ok(event) = events.recv().await {
//!         println!("{event:?}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Device clients
//!
//! The entity talks to the device through the [`Protocol`](protocol::Protocol)
//! trait. Enable the `tuya` feature for a client backed by the `rustuya`
//! crate, or implement the trait yourself.

mod capabilities;
pub mod command;
pub mod config;
pub mod entity;
pub mod error;
pub mod event;
pub mod platform;
pub mod protocol;
pub mod state;
pub mod telemetry;
pub mod types;
mod vacuum;

pub use capabilities::SupportedFeatures;
pub use command::{Command, VacuumCommand};
pub use config::PlatformConfig;
pub use entity::{Entity, Pollable, VacuumControl, VacuumEntity};
pub use error::{ConfigError, Error, ParseError, ProtocolError, Result, ValueError};
pub use event::VacuumEvent;
pub use platform::{VacuumRegistry, setup_platform};
pub use state::{StateChange, VacuumState};
pub use types::{
    CleaningMode, CurrentState, Direction, FanSpeed, Fault, Field, VacuumActivity,
};
pub use vacuum::{REMEMBER_FAN_SPEED_DELAY, Vacuum};
