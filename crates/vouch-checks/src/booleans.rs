//! Boolean and truthiness checks.
//!
//! Truthiness follows the conventions of dynamic values: `null` is falsy,
//! booleans are themselves, numbers are truthy unless zero, strings are
//! truthy unless empty, and arrays and objects are always truthy (an empty
//! array is still a present value).

use serde_json::Value;
use vouch_core::{AssertionError, GuardGroup, Override};

/// Truthiness of a dynamic value.
pub fn truthiness(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(inner) => *inner,
        Value::Number(number) => number.as_f64().is_some_and(|inner| inner != 0.0),
        Value::String(inner) => !inner.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Assert that the input is truthy.
pub fn is_truthy(
    input: &Value,
    _params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    if truthiness(input) {
        Ok(())
    } else {
        Err(AssertionError::failed("value is not truthy", message))
    }
}

/// Assert that the input is falsy.
pub fn is_falsy(
    input: &Value,
    _params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    if truthiness(input) {
        Err(AssertionError::failed("value is not falsy", message))
    } else {
        Ok(())
    }
}

/// Assert that the input is exactly `true`.
pub fn is_true(
    input: &Value,
    _params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    if input == &Value::Bool(true) {
        Ok(())
    } else {
        Err(AssertionError::failed("value is not true", message))
    }
}

/// Assert that the input is exactly `false`.
pub fn is_false(
    input: &Value,
    _params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    if input == &Value::Bool(false) {
        Ok(())
    } else {
        Err(AssertionError::failed("value is not false", message))
    }
}

// Custom check forms: truthiness is already a bool, no need to round-trip
// through an error.
fn check_is_truthy(input: &Value, _params: &[Value]) -> bool {
    truthiness(input)
}

fn check_is_falsy(input: &Value, _params: &[Value]) -> bool {
    !truthiness(input)
}

/// The boolean guard group.
pub fn group() -> GuardGroup {
    GuardGroup::new("booleans")
        .with_assertion("is_truthy", is_truthy)
        .with_assertion("is_falsy", is_falsy)
        .with_assertion("is_true", is_true)
        .with_assertion("is_false", is_false)
        .with_check_override("is_truthy", Override::Custom(check_is_truthy))
        .with_check_override("is_falsy", Override::Custom(check_is_falsy))
}
