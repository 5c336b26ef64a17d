// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device client abstraction.
//!
//! The vacuum entity talks to the robot through a [`Protocol`]
//! implementation: something that can fetch the current data point values
//! and write a single data point. The encrypted Tuya local protocol itself
//! lives in the client library, not here.
//!
//! # Implementations
//!
//! - `TuyaClient` (feature `tuya`): backed by the `rustuya` crate
//!
//! Tests and alternative transports can implement the trait directly.

#[cfg(feature = "tuya")]
mod tuya;

#[cfg(feature = "tuya")]
pub use tuya::TuyaClient;

use std::future::Future;

use serde_json::Value;

use crate::command::Command;
use crate::error::ProtocolError;
use crate::telemetry::{Dps, extract_dps};
use crate::types::Field;

const KEY_ERR_CODE: &str = "Err";
const KEY_ERR_MSG: &str = "Error";

/// A client able to read and write the vacuum's data points.
///
/// Implementations must be shareable across tasks: the entity keeps the
/// client behind an `Arc` and uses it from delayed follow-up tasks.
pub trait Protocol: Send + Sync + 'static {
    /// Fetches the current value of every data point.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the device cannot be reached or answers
    /// with something other than a status report.
    fn status(&self) -> impl Future<Output = Result<Dps, ProtocolError>> + Send;

    /// Writes a single data point.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the write could not be delivered.
    fn set_value(
        &self,
        field: Field,
        value: Value,
    ) -> impl Future<Output = Result<(), ProtocolError>> + Send;

    /// Sends a typed command.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the write could not be delivered.
    fn send_command<C: Command + Sync>(
        &self,
        command: &C,
    ) -> impl Future<Output = Result<(), ProtocolError>> + Send {
        self.set_value(command.field(), command.value())
    }
}

/// Decodes one message payload received while waiting for a status answer.
///
/// Returns `Ok(None)` for an empty payload, which the device sends as a bare
/// acknowledgement.
///
/// # Errors
///
/// Returns `ProtocolError::Device` when the payload is an error report
/// (`{"Err": <code>, "Error": <message>}`), and
/// `ProtocolError::MalformedResponse` when it is not JSON or carries neither
/// an error report nor a `dps` object.
///
/// # Examples
///
/// ```
/// use prosenic_vacuum::protocol::decode_status_payload;
///
/// let dps = decode_status_payload(br#"{"dps": {"39": 64}}"#).unwrap().unwrap();
/// assert_eq!(dps["39"], 64);
///
/// assert!(decode_status_payload(b"").unwrap().is_none());
/// assert!(decode_status_payload(br#"{"t": 1700000000}"#).is_err());
/// ```
pub fn decode_status_payload(payload: &[u8]) -> Result<Option<Dps>, ProtocolError> {
    if payload.is_empty() {
        return Ok(None);
    }
    let payload: Value = serde_json::from_slice(payload)
        .map_err(|e| ProtocolError::MalformedResponse(format!("not JSON: {e}")))?;

    if let Some(code) = payload.get(KEY_ERR_CODE) {
        return Err(ProtocolError::Device {
            code: code.as_str().map_or_else(|| code.to_string(), String::from),
            message: payload
                .get(KEY_ERR_MSG)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        });
    }

    extract_dps(&payload)
        .map(Some)
        .map_err(|e| ProtocolError::MalformedResponse(e.to_string()))
}
