//! The unconditional failure check.
//!
//! `fail` exists only as a base assertion: a check that always reports
//! `false`, a wrap that never returns, and a wait that never resolves would
//! all be useless, so every derived form is omitted.

use serde_json::Value;
use vouch_core::{AssertionError, GuardGroup, Override};

/// Always fail, combining the caller's message with the fixed base message.
pub fn fail(
    _input: &Value,
    _params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    Err(AssertionError::failed("Failure triggered.", message))
}

/// The failure guard group.
pub fn group() -> GuardGroup {
    GuardGroup::new("failure")
        .with_assertion("fail", fail)
        .with_check_override("fail", Override::Omit)
        .with_assert_wrap_override("fail", Override::Omit)
        .with_check_wrap_override("fail", Override::Omit)
        .with_wait_until_override("fail", Override::Omit)
}
