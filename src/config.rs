// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform configuration.
//!
//! A [`PlatformConfig`] describes one vacuum: where it lives on the network,
//! how to authenticate with it, and how the entity should behave.
//!
//! # Examples
//!
//! ```
//! use prosenic_vacuum::PlatformConfig;
//!
//! let config = PlatformConfig::from_json(r#"{
//!     "host": "192.168.1.60",
//!     "device_id": "bf1234567890abcdef",
//!     "local_key": "0123456789abcdef",
//!     "remember_fan_speed": true
//! }"#).unwrap();
//!
//! assert_eq!(config.name, "Prosenic Vacuum cleaner");
//! assert!(config.remember_fan_speed);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ParseError};

/// Entity name used when none is configured.
pub const DEFAULT_NAME: &str = "Prosenic Vacuum cleaner";

/// Tuya protocol version spoken by Prosenic vacuums.
pub const DEFAULT_PROTOCOL_VERSION: &str = "3.3";

/// Protocol versions the device client can speak.
pub const SUPPORTED_PROTOCOL_VERSIONS: [&str; 4] = ["3.1", "3.3", "3.4", "3.5"];

const LOCAL_KEY_MIN_LEN: usize = 15;
const LOCAL_KEY_MAX_LEN: usize = 16;

/// Configuration for a single vacuum.
///
/// Unknown keys are ignored when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Network address of the vacuum.
    pub host: String,
    /// Tuya device identifier.
    pub device_id: String,
    /// Pre-shared local key.
    pub local_key: String,
    /// Display name of the entity.
    #[serde(default = "default_name")]
    pub name: String,
    /// Re-send the last chosen fan speed shortly after every command.
    #[serde(default)]
    pub remember_fan_speed: bool,
    /// Tuya protocol version.
    #[serde(default = "default_protocol_version")]
    pub protocol_version: String,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_protocol_version() -> String {
    DEFAULT_PROTOCOL_VERSION.to_string()
}

impl PlatformConfig {
    /// Creates a configuration with the required options and defaults for
    /// the rest.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        device_id: impl Into<String>,
        local_key: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            device_id: device_id.into(),
            local_key: local_key.into(),
            name: default_name(),
            remember_fan_speed: false,
            protocol_version: default_protocol_version(),
        }
    }

    /// Parses a configuration from JSON.
    ///
    /// The result is not validated; call [`validate`](Self::validate).
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the input is not a valid configuration
    /// object.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the entity name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Enables or disables fan speed restoration.
    #[must_use]
    pub fn with_remember_fan_speed(mut self, remember: bool) -> Self {
        self.remember_fan_speed = remember;
        self
    }

    /// Sets the Tuya protocol version.
    #[must_use]
    pub fn with_protocol_version(mut self, version: impl Into<String>) -> Self {
        self.protocol_version = version.into();
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required option is empty, the local key is
    /// not 15 to 16 characters long, or the protocol version is unsupported.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Missing("host"));
        }
        if self.device_id.trim().is_empty() {
            return Err(ConfigError::Missing("device_id"));
        }

        let key_len = self.local_key.chars().count();
        if key_len == 0 {
            return Err(ConfigError::Missing("local_key"));
        }
        if !(LOCAL_KEY_MIN_LEN..=LOCAL_KEY_MAX_LEN).contains(&key_len) {
            return Err(ConfigError::InvalidLocalKeyLength(key_len));
        }

        if !SUPPORTED_PROTOCOL_VERSIONS.contains(&self.protocol_version.as_str()) {
            return Err(ConfigError::UnsupportedVersion(
                self.protocol_version.clone(),
            ));
        }
        Ok(())
    }
}
