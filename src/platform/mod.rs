// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform setup.
//!
//! [`setup_platform`] turns a [`PlatformConfig`] into a registered, already
//! refreshed [`Vacuum`]. The device client is built by a connector closure so
//! that any [`Protocol`] implementation can be plugged in.
//!
//! # Examples
//!
//! ```ignore
//! use prosenic_vacuum::platform::{DEFAULT_SCAN_INTERVAL, VacuumRegistry, setup_platform};
//! use prosenic_vacuum::protocol::TuyaClient;
//! use prosenic_vacuum::PlatformConfig;
//!
//! # async fn example() -> prosenic_vacuum::Result<()> {
//! let registry = VacuumRegistry::new();
//! let config = PlatformConfig::new("192.168.1.60", "bf1234567890abcdef", "0123456789abcdef");
//!
//! let vacuum = setup_platform(&config, &registry, TuyaClient::from_config).await?;
//! vacuum.start_polling(DEFAULT_SCAN_INTERVAL);
//! # Ok(())
//! # }
//! ```

mod registry;

pub use registry::VacuumRegistry;

use std::sync::Arc;
use std::time::Duration;

use crate::config::PlatformConfig;
use crate::error::Error;
use crate::protocol::Protocol;
use crate::vacuum::Vacuum;

/// Interval at which the hub polls vacuum entities by default.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(20);

/// Sets up one vacuum from its configuration.
///
/// Validates the configuration, builds the device client with `connect`,
/// registers the entity under its host and refreshes it once before
/// returning it. Polling is left to the caller.
///
/// # Errors
///
/// Returns `Error::Config` if the configuration is invalid. Nothing is
/// registered in that case. Device communication failures are not errors:
/// the entity is returned unavailable.
pub async fn setup_platform<P, F>(
    config: &PlatformConfig,
    registry: &VacuumRegistry<P>,
    connect: F,
) -> Result<Arc<Vacuum<P>>, Error>
where
    P: Protocol,
    F: FnOnce(&PlatformConfig) -> P,
{
    config.validate()?;

    tracing::info!(host = %config.host, "Initializing with host");

    let protocol = connect(config);
    let vacuum = Arc::new(Vacuum::new(
        config.name.clone(),
        protocol,
        config.remember_fan_speed,
    ));

    registry.insert(config.host.clone(), Arc::clone(&vacuum)).await;
    vacuum.update().await;

    Ok(vacuum)
}
