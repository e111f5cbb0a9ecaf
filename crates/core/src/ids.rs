//! Syntactic identifier checks.
//!
//! An identifier is valid when it is a positive `i64` written in canonical
//! decimal form (no sign, no leading zeros). Validity says nothing about
//! whether a row with that id exists.

use serde_json::Value;

use crate::error::CoreError;
use crate::types::DbId;

/// Parse an identifier taken from a path segment or query parameter.
pub fn parse_id(raw: &str) -> Result<DbId, CoreError> {
    let canonical = !raw.is_empty()
        && !raw.starts_with('0')
        && raw.bytes().all(|b| b.is_ascii_digit());
    if !canonical {
        return Err(CoreError::InvalidId);
    }
    raw.parse::<DbId>().map_err(|_| CoreError::InvalidId)
}

/// Parse an identifier taken from a JSON body: a digit string or a positive
/// integer.
pub fn parse_id_value(value: &Value) -> Result<DbId, CoreError> {
    match value {
        Value::String(raw) => parse_id(raw),
        Value::Number(n) => n
            .as_i64()
            .filter(|id| *id > 0)
            .ok_or(CoreError::InvalidId),
        _ => Err(CoreError::InvalidId),
    }
}

/// Parse an optional reference from a JSON body.
///
/// Falsy values (absent, `null`, `false`, `""`, `0`) mean "no reference".
pub fn parse_optional_id_value(value: Option<&Value>) -> Result<Option<DbId>, CoreError> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(raw)) if raw.is_empty() => Ok(None),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(other) => parse_id_value(other).map(Some),
    }
}

/// Parse an optional query-string identifier. An empty string means "absent".
pub fn parse_optional_id(raw: Option<&str>) -> Result<Option<DbId>, CoreError> {
    match raw {
        None | Some("") => Ok(None),
        Some(raw) => parse_id(raw).map(Some),
    }
}

/// Parse every member of an id list; a single bad member rejects the list.
/// Order and duplicates are preserved.
pub fn parse_id_list(values: &[Value]) -> Result<Vec<DbId>, CoreError> {
    values.iter().map(parse_id_value).collect()
}
