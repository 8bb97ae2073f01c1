//! Null-presence checks.
//!
//! `check_wrap` is omitted for both checks: a wrapped nullish result cannot
//! be told apart from the `None` failure sentinel, so the form is
//! meaningless here. The other three forms derive as usual.

use serde_json::Value;
use vouch_core::{AssertionError, GuardGroup, Override};

/// Assert that the input is `null`.
pub fn is_null(
    input: &Value,
    _params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    if input.is_null() {
        Ok(())
    } else {
        Err(AssertionError::failed("value is not null", message))
    }
}

/// Assert that the input is anything but `null`.
pub fn is_defined(
    input: &Value,
    _params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    if input.is_null() {
        Err(AssertionError::failed("value is not defined", message))
    } else {
        Ok(())
    }
}

/// The nullish guard group.
pub fn group() -> GuardGroup {
    GuardGroup::new("nullish")
        .with_assertion("is_null", is_null)
        .with_assertion("is_defined", is_defined)
        .with_check_wrap_override("is_null", Override::Omit)
        .with_check_wrap_override("is_defined", Override::Omit)
}
