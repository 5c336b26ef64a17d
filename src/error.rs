// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Prosenic vacuum library.
//!
//! Errors are grouped by concern: value validation, device communication,
//! data point parsing and configuration. The vacuum entity itself never
//! returns these to the hub; it logs them and degrades to "unavailable" or
//! "skip". They surface only from lower-level APIs and from platform setup.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the device.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while mapping a data point.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The platform configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised when a raw value does not name a known variant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The string is not one of the fan speed wire values.
    #[error("invalid fan speed: {0}")]
    InvalidFanSpeed(String),

    /// The string is not a known remote control direction.
    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    /// The string is not a settable cleaning mode.
    #[error("invalid cleaning mode: {0}")]
    InvalidCleaningMode(String),

    /// The operating state code is outside the vendor table.
    #[error("unknown operating state code: {0}")]
    InvalidStateCode(i64),

    /// The fault value is negative or does not fit the flag set.
    #[error("invalid fault value: {0}")]
    InvalidFault(i64),

    /// The numeric code is not a known data point.
    #[error("unknown data point: {0}")]
    UnknownDataPoint(i64),
}

/// Errors related to device communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The device answered with an error report.
    #[error("device reported error {code}: {message}")]
    Device {
        /// Numeric error code reported by the client.
        code: String,
        /// Human-readable message reported by the client.
        message: String,
    },

    /// The device answered with something that is not a status payload.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Internal channel was closed.
    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

/// Errors related to coercing data point values.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// The data point key is not numeric.
    #[error("data point key is not numeric: {0}")]
    InvalidKey(String),

    /// The raw value has the wrong type for its data point.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The data point that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },

    /// The raw value is well-typed but names no known variant.
    #[error(transparent)]
    Value(#[from] ValueError),
}

/// Errors raised while validating the platform configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required key is missing or empty.
    #[error("missing required option: {0}")]
    Missing(&'static str),

    /// The local key has the wrong length.
    #[error("local key must be 15 to 16 characters long, got {0}")]
    InvalidLocalKeyLength(usize),

    /// The protocol version is not supported by the device client.
    #[error("unsupported protocol version: {0}")]
    UnsupportedVersion(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::InvalidFanSpeed("turbo".to_string());
        assert_eq!(err.to_string(), "invalid fan speed: turbo");
    }

    #[test]
    fn error_from_value_error() {
        let err: Error = ValueError::InvalidStateCode(6).into();
        assert!(matches!(err, Error::Value(ValueError::InvalidStateCode(6))));
    }

    #[test]
    fn parse_error_wraps_value_error_transparently() {
        let err: ParseError = ValueError::InvalidDirection("up".to_string()).into();
        assert_eq!(err.to_string(), "invalid direction: up");
    }

    #[test]
    fn protocol_error_display() {
        let err = ProtocolError::Device {
            code: "914".to_string(),
            message: "Check device key or version".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "device reported error 914: Check device key or version"
        );
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidLocalKeyLength(12);
        assert_eq!(
            err.to_string(),
            "local key must be 15 to 16 characters long, got 12"
        );
    }
}
