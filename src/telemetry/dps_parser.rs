// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parser for Tuya status reports.
//!
//! A status report is a JSON object keyed by data point code, for example
//! `{"11": 0, "27": "strong", "38": 5, "39": 100}`. Every entry is handled on
//! its own: an unknown code or a value of the wrong type is logged and
//! skipped, and the rest of the report is still applied.

use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::state::StateChange;
use crate::types::{CurrentState, FanSpeed, Fault, Field};

/// Data point values keyed by code, as sent by the device.
pub type Dps = Map<String, Value>;

const KEY_DPS: &str = "dps";

/// Parses every entry of a status report into state changes.
///
/// Write-only data points and the clean record are ignored. Entries that
/// fail to parse are logged at warn level and skipped.
///
/// # Examples
///
/// ```
/// use prosenic_vacuum::state::StateChange;
/// use prosenic_vacuum::telemetry::parse_status;
/// use prosenic_vacuum::types::FanSpeed;
///
/// let dps = serde_json::json!({"1": true, "27": "strong", "39": 88, "99": 1});
/// let changes = parse_status(dps.as_object().unwrap());
///
/// assert_eq!(
///     changes,
///     vec![StateChange::FanSpeed(FanSpeed::Strong), StateChange::Battery(88)]
/// );
/// ```
#[must_use]
pub fn parse_status(dps: &Dps) -> Vec<StateChange> {
    let mut changes = Vec::with_capacity(dps.len());
    for (key, value) in dps {
        match parse_data_point(key, value) {
            Ok(Some(change)) => changes.push(change),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    key = %key,
                    value = %value,
                    error = %e,
                    "An error occurred while processing a data point, skipping"
                );
            }
        }
    }
    changes
}

/// Parses a single status entry.
///
/// Returns `Ok(None)` for data points that are recognized but carry nothing
/// to track.
///
/// # Errors
///
/// Returns `ParseError` if the key is not a known data point or the value
/// cannot be coerced to the data point's type.
pub fn parse_data_point(key: &str, value: &Value) -> Result<Option<StateChange>, ParseError> {
    let field: Field = key.parse()?;
    if field.is_write_only() {
        return Ok(None);
    }

    let change = match field {
        Field::Fault => StateChange::Fault(Fault::from_raw(coerce_int(field, value)?)?),
        Field::CurrentState => {
            StateChange::CurrentState(CurrentState::from_code(coerce_int(field, value)?)?)
        }
        Field::FanSpeed => StateChange::FanSpeed(coerce_str(field, value)?.parse::<FanSpeed>()?),
        Field::Battery => StateChange::Battery(coerce_ranged(field, value)?),
        Field::CleanArea => StateChange::CleanArea(coerce_ranged(field, value)?),
        Field::CleanTime => StateChange::CleanTime(coerce_ranged(field, value)?),
        Field::SweepOrMop => StateChange::MopEquipped(coerce_bool(field, value)?),
        Field::CleanRecord => {
            tracing::trace!(value = %value, "Ignoring clean record");
            return Ok(None);
        }
        Field::Power | Field::CleaningMode | Field::DirectionControl => return Ok(None),
    };
    Ok(Some(change))
}

/// Pulls the data point object out of a decoded status payload.
///
/// # Errors
///
/// Returns `ParseError::MissingField` if there is no `dps` object.
pub fn extract_dps(payload: &Value) -> Result<Dps, ParseError> {
    payload
        .get(KEY_DPS)
        .and_then(Value::as_object)
        .cloned()
        .ok_or_else(|| ParseError::MissingField(KEY_DPS.to_string()))
}

fn invalid(field: Field, message: impl Into<String>) -> ParseError {
    ParseError::InvalidValue {
        field: field.name().to_string(),
        message: message.into(),
    }
}

fn coerce_int(field: Field, value: &Value) -> Result<i64, ParseError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => {
                    // Safe: integral and well inside the i64 range
                    #[allow(clippy::cast_possible_truncation)]
                    let i = f as i64;
                    Ok(i)
                }
                _ => Err(invalid(field, format!("{n} is not an integer"))),
            }
        }
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| invalid(field, format!("{s:?} is not an integer"))),
        other => Err(invalid(field, format!("expected an integer, got {other}"))),
    }
}

fn coerce_ranged<T: TryFrom<i64>>(field: Field, value: &Value) -> Result<T, ParseError> {
    let raw = coerce_int(field, value)?;
    T::try_from(raw).map_err(|_| invalid(field, format!("{raw} is out of range")))
}

fn coerce_bool(field: Field, value: &Value) -> Result<bool, ParseError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        _ => coerce_int(field, value).map(|i| i != 0),
    }
}

fn coerce_str(field: Field, value: &Value) -> Result<&str, ParseError> {
    value
        .as_str()
        .ok_or_else(|| invalid(field, format!("expected a string, got {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dps(value: Value) -> Dps {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn parse_full_report() {
        let report = dps(json!({
            "1": true,
            "11": 0,
            "25": "smart",
            "26": "stop",
            "27": "ECO",
            "38": 1,
            "39": 64,
            "40": "2024012312",
            "41": 15,
            "42": 22,
            "49": false
        }));

        let changes = parse_status(&report);
        assert_eq!(
            changes,
            vec![
                StateChange::Fault(Fault::NO_ERROR),
                StateChange::FanSpeed(FanSpeed::Eco),
                StateChange::CurrentState(CurrentState::CleanSmart),
                StateChange::Battery(64),
                StateChange::CleanArea(15),
                StateChange::CleanTime(22),
                StateChange::MopEquipped(false),
            ]
        );
    }

    #[test]
    fn write_only_points_are_ignored() {
        for key in ["1", "25", "26"] {
            assert_eq!(parse_data_point(key, &json!("x")).unwrap(), None);
        }
    }

    #[test]
    fn clean_record_is_ignored() {
        assert_eq!(parse_data_point("40", &json!("abc")).unwrap(), None);
    }

    #[test]
    fn unknown_code_is_an_error() {
        assert!(matches!(
            parse_data_point("99", &json!(1)),
            Err(ParseError::Value(_))
        ));
        assert!(matches!(
            parse_data_point("dps", &json!(1)),
            Err(ParseError::InvalidKey(_))
        ));
    }

    #[test]
    fn bad_entries_do_not_stop_the_rest() {
        let report = dps(json!({
            "27": "turbo",
            "38": 42,
            "39": "full",
            "42": 7
        }));
        assert_eq!(parse_status(&report), vec![StateChange::CleanTime(7)]);
    }

    #[test]
    fn integers_coerce_from_strings_and_bools() {
        assert_eq!(
            parse_data_point("39", &json!("57")).unwrap(),
            Some(StateChange::Battery(57))
        );
        assert_eq!(
            parse_data_point("11", &json!(true)).unwrap(),
            Some(StateChange::Fault(Fault::SIDE_BRUSH))
        );
        assert_eq!(
            parse_data_point("42", &json!(30.0)).unwrap(),
            Some(StateChange::CleanTime(30))
        );
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(parse_data_point("39", &json!(300)).is_err());
        assert!(parse_data_point("41", &json!(-5)).is_err());
        assert!(parse_data_point("11", &json!(-1)).is_err());
        assert!(parse_data_point("42", &json!(1.5)).is_err());
    }

    #[test]
    fn undocumented_state_code_is_kept() {
        assert_eq!(
            parse_data_point("38", &json!(6)).unwrap(),
            Some(StateChange::CurrentState(CurrentState::Undocumented))
        );
    }

    #[test]
    fn mop_flag_coercion() {
        assert_eq!(
            parse_data_point("49", &json!(1)).unwrap(),
            Some(StateChange::MopEquipped(true))
        );
        assert_eq!(
            parse_data_point("49", &json!("false")).unwrap(),
            Some(StateChange::MopEquipped(false))
        );
        assert!(parse_data_point("49", &json!(null)).is_err());
    }

    #[test]
    fn fan_speed_must_be_a_string() {
        assert!(matches!(
            parse_data_point("27", &json!(2)),
            Err(ParseError::InvalidValue { .. })
        ));
    }

    #[test]
    fn extract_dps_from_payload() {
        let payload = json!({"devId": "abc", "dps": {"39": 12}});
        let extracted = extract_dps(&payload).unwrap();
        assert_eq!(extracted.get("39"), Some(&json!(12)));

        assert!(matches!(
            extract_dps(&json!({"Err": "905"})),
            Err(ParseError::MissingField(_))
        ));
    }
}
