//! UUID checks.

use serde_json::Value;
use uuid::Uuid;
use vouch_core::{AssertionError, GuardGroup};

/// Length of the canonical hyphenated form.
const HYPHENATED_LENGTH: usize = 36;

/// Assert that the input is a canonical hyphenated UUID string.
///
/// Only the hyphenated form counts; the parser's other accepted spellings
/// (simple, braced, URN) do not.
pub fn is_uuid(
    input: &Value,
    _params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    let passed = input
        .as_str()
        .is_some_and(|text| text.len() == HYPHENATED_LENGTH && Uuid::parse_str(text).is_ok());
    if passed {
        Ok(())
    } else {
        Err(AssertionError::failed("value is not a uuid", message))
    }
}

/// The UUID guard group.
pub fn group() -> GuardGroup {
    GuardGroup::new("uuids").with_assertion("is_uuid", is_uuid)
}
