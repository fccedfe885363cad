//! Checked accessors over schema-less JSON.
//!
//! Responses are parsed into [`serde_json::Value`] and then every field the
//! client relies on is extracted through these helpers, so a response of the
//! wrong shape surfaces as an [`ApiError`] instead of a panic.

use serde_json::{Map, Value};

use crate::error::{ApiError, Result};

/// Parse `bytes` as JSON and require the top level to be an object.
pub(crate) fn parse_object(bytes: &[u8]) -> Result<Map<String, Value>> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::UnexpectedShape {
            field: "<root>",
            expected: "an object",
        }),
    }
}

pub(crate) fn required<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value> {
    object.get(field).ok_or(ApiError::MissingField { field })
}

pub(crate) fn required_str<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str> {
    required(object, field)?
        .as_str()
        .ok_or(ApiError::UnexpectedShape {
            field,
            expected: "a string",
        })
}
