//! Equality and membership checks.

use serde_json::Value;
use vouch_core::{AssertionError, GuardGroup};

use crate::params;

/// Assert that the input equals the expected-value parameter.
///
/// Equality is structural value equality; numbers compare by representation,
/// so `1` and `1.0` are distinct, matching the strictness of the original
/// call forms.
pub fn strict_equals(
    input: &Value,
    params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    let expected = params::required(params, 0, "the expected value", message)?;
    if input == expected {
        Ok(())
    } else {
        Err(AssertionError::failed(
            format!("{input} does not equal {expected}"),
            message,
        ))
    }
}

/// Assert that the input is one of the entries of the array parameter.
pub fn is_in(
    input: &Value,
    params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    let allowed = params::required(params, 0, "an array of allowed values", message)?
        .as_array()
        .ok_or_else(|| {
            AssertionError::failed("check parameter 0 is not an array", message)
        })?;
    if allowed.contains(input) {
        Ok(())
    } else {
        Err(AssertionError::failed(
            format!("{input} is not an allowed value"),
            message,
        ))
    }
}

/// The equality guard group.
pub fn group() -> GuardGroup {
    GuardGroup::new("equality")
        .with_assertion("strict_equals", strict_equals)
        .with_assertion("is_in", is_in)
}
