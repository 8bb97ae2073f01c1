//! String checks.

use regex::Regex;
use serde_json::Value;
use vouch_core::{AssertionError, GuardGroup};

use crate::params;

fn string_input<'a>(input: &'a Value, message: Option<&str>) -> Result<&'a str, AssertionError> {
    input
        .as_str()
        .ok_or_else(|| AssertionError::failed("value is not a string", message))
}

/// Assert that the input is a string.
pub fn is_string(
    input: &Value,
    _params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    string_input(input, message).map(|_| ())
}

/// Assert that the input matches the regex pattern parameter.
///
/// An invalid pattern fails the assertion; derived `check` forms therefore
/// report `false` for it rather than panicking.
pub fn matches(
    input: &Value,
    params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    let actual = string_input(input, message)?;
    let pattern = params::string(params, 0, message)?;
    let regex = Regex::new(pattern).map_err(|_| {
        AssertionError::failed(format!("check parameter `{pattern}` is not a valid pattern"), message)
    })?;
    if regex.is_match(actual) {
        Ok(())
    } else {
        Err(AssertionError::failed(
            format!("`{actual}` does not match `{pattern}`"),
            message,
        ))
    }
}

/// Assert that the input contains the substring parameter.
pub fn includes(
    input: &Value,
    params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    let actual = string_input(input, message)?;
    let needle = params::string(params, 0, message)?;
    if actual.contains(needle) {
        Ok(())
    } else {
        Err(AssertionError::failed(
            format!("`{actual}` does not include `{needle}`"),
            message,
        ))
    }
}

/// The string guard group.
pub fn group() -> GuardGroup {
    GuardGroup::new("strings")
        .with_assertion("is_string", is_string)
        .with_assertion("matches", matches)
        .with_assertion("includes", includes)
}
