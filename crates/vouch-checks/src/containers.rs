//! Length, emptiness, and key checks for strings, arrays, and objects.
//!
//! Length is counted in characters for strings and entries for arrays and
//! objects; values without a length (numbers, booleans, null) fail every
//! check in this family.

use serde_json::Value;
use vouch_core::{AssertionError, GuardGroup};

use crate::params;

fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(inner) => Some(inner.chars().count()),
        Value::Array(inner) => Some(inner.len()),
        Value::Object(inner) => Some(inner.len()),
        Value::Null | Value::Bool(_) | Value::Number(_) => None,
    }
}

fn measurable_input(input: &Value, message: Option<&str>) -> Result<usize, AssertionError> {
    length_of(input).ok_or_else(|| AssertionError::failed("value has no length", message))
}

/// Assert that the input has length zero.
pub fn is_empty(
    input: &Value,
    _params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    let length = measurable_input(input, message)?;
    if length == 0 {
        Ok(())
    } else {
        Err(AssertionError::failed(
            format!("value has length {length}, not 0"),
            message,
        ))
    }
}

/// Assert that the input has nonzero length.
pub fn is_not_empty(
    input: &Value,
    _params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    let length = measurable_input(input, message)?;
    if length > 0 {
        Ok(())
    } else {
        Err(AssertionError::failed("value is empty", message))
    }
}

/// Assert that the input's length is exactly the parameter.
pub fn is_length_exactly(
    input: &Value,
    params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    let length = measurable_input(input, message)?;
    let expected = params::number(params, 0, message)? as usize;
    if length == expected {
        Ok(())
    } else {
        Err(AssertionError::failed(
            format!("value has length {length}, not {expected}"),
            message,
        ))
    }
}

/// Assert that the input's length is at least the parameter.
pub fn is_length_at_least(
    input: &Value,
    params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    let length = measurable_input(input, message)?;
    let minimum = params::number(params, 0, message)? as usize;
    if length >= minimum {
        Ok(())
    } else {
        Err(AssertionError::failed(
            format!("value has length {length}, below the minimum {minimum}"),
            message,
        ))
    }
}

/// Assert that the input is an object carrying the key parameter.
pub fn has_key(
    input: &Value,
    params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    let key = params::string(params, 0, message)?;
    let object = input
        .as_object()
        .ok_or_else(|| AssertionError::failed("value is not an object", message))?;
    if object.contains_key(key) {
        Ok(())
    } else {
        Err(AssertionError::failed(
            format!("object is missing key `{key}`"),
            message,
        ))
    }
}

/// The container guard group.
pub fn group() -> GuardGroup {
    GuardGroup::new("containers")
        .with_assertion("is_empty", is_empty)
        .with_assertion("is_not_empty", is_not_empty)
        .with_assertion("is_length_exactly", is_length_exactly)
        .with_assertion("is_length_at_least", is_length_at_least)
        .with_assertion("has_key", has_key)
}
