//! Shared parameter extraction for check assertions.
//!
//! Check parameters travel as a `&[Value]` slice; a missing or mistyped
//! parameter fails the assertion like any other mismatch, so derived `check`
//! forms swallow it to `false`.

use serde_json::Value;
use vouch_core::AssertionError;

/// Fetch a required parameter, failing with a descriptive base message.
pub(crate) fn required<'a>(
    params: &'a [Value],
    index: usize,
    expected: &str,
    message: Option<&str>,
) -> Result<&'a Value, AssertionError> {
    params.get(index).ok_or_else(|| {
        AssertionError::failed(
            format!("missing check parameter {index}: expected {expected}"),
            message,
        )
    })
}

/// Fetch a required numeric parameter.
pub(crate) fn number(
    params: &[Value],
    index: usize,
    message: Option<&str>,
) -> Result<f64, AssertionError> {
    required(params, index, "a number", message)?
        .as_f64()
        .ok_or_else(|| {
            AssertionError::failed(format!("check parameter {index} is not a number"), message)
        })
}

/// Fetch a required string parameter.
pub(crate) fn string<'a>(
    params: &'a [Value],
    index: usize,
    message: Option<&'_ str>,
) -> Result<&'a str, AssertionError> {
    required(params, index, "a string", message)?
        .as_str()
        .ok_or_else(|| {
            AssertionError::failed(format!("check parameter {index} is not a string"), message)
        })
}
