// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tuya local API client backed by `rustuya`.

use std::time::Duration;

use futures_util::StreamExt;
use rustuya::Device;
use serde_json::Value;

use crate::config::PlatformConfig;
use crate::error::ProtocolError;
use crate::protocol::{Protocol, decode_status_payload};
use crate::telemetry::Dps;
use crate::types::Field;

/// Device client speaking the Tuya local protocol.
///
/// `rustuya` answers status queries asynchronously on the device's message
/// stream, so [`status`](Protocol::status) subscribes first, sends the query,
/// then waits for the first non-empty message and decodes it with
/// [`decode_status_payload`].
///
/// Must be created inside a tokio runtime: the underlying device spawns its
/// connection task on construction.
///
/// # Examples
///
/// ```no_run
/// use prosenic_vacuum::protocol::{Protocol, TuyaClient};
///
/// # async fn example() -> Result<(), prosenic_vacuum::ProtocolError> {
/// let client = TuyaClient::new("bf1234567890abcdef", "192.168.1.60", "0123456789abcdef", "3.3");
/// let dps = client.status().await?;
/// println!("battery: {:?}", dps.get("39"));
/// # Ok(())
/// # }
/// ```
pub struct TuyaClient {
    device: Device,
    timeout: Duration,
}

impl TuyaClient {
    /// Default time to wait for a status answer.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a client from the device identifier, host, local key and
    /// protocol version.
    #[must_use]
    pub fn new(device_id: &str, host: &str, local_key: &str, version: &str) -> Self {
        Self {
            device: Device::new(device_id, host, local_key, version),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Creates a client from a validated platform configuration.
    #[must_use]
    pub fn from_config(config: &PlatformConfig) -> Self {
        Self::new(
            &config.device_id,
            &config.host,
            &config.local_key,
            &config.protocol_version,
        )
    }

    /// Sets how long to wait for a status answer.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Stops the underlying connection task.
    pub async fn close(&self) {
        self.device.stop().await;
    }

    async fn next_status(&self) -> Result<Dps, ProtocolError> {
        let stream = self.device.listener();
        tokio::pin!(stream);

        self.device.status().await;

        while let Some(message) = stream.next().await {
            let message = message.map_err(|e| ProtocolError::ConnectionFailed(e.to_string()))?;
            match decode_status_payload(&message.payload) {
                Ok(Some(dps)) => return Ok(dps),
                Ok(None) => tracing::trace!(cmd = message.cmd, "Skipping empty message"),
                Err(e) => {
                    tracing::debug!(cmd = message.cmd, error = %e, "Rejected status answer");
                    return Err(e);
                }
            }
        }

        Err(ProtocolError::ChannelClosed(
            "device message stream ended".to_string(),
        ))
    }
}

impl Protocol for TuyaClient {
    async fn status(&self) -> Result<Dps, ProtocolError> {
        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
        tokio::time::timeout(self.timeout, self.next_status())
            .await
            .map_err(|_| ProtocolError::Timeout(timeout_ms))?
    }

    async fn set_value(&self, field: Field, value: Value) -> Result<(), ProtocolError> {
        tracing::debug!(field = %field, value = %value, "Setting data point");
        self.device.set_value(u32::from(field.code()), value).await;
        Ok(())
    }
}
