//! Numeric comparison checks.
//!
//! The comparison limit travels as the first check parameter. A non-numeric
//! input or limit fails the assertion.

use serde_json::Value;
use vouch_core::{AssertionError, GuardGroup};

use crate::params;

fn numeric_input(input: &Value, message: Option<&str>) -> Result<f64, AssertionError> {
    input
        .as_f64()
        .ok_or_else(|| AssertionError::failed("value is not a number", message))
}

/// Assert that the input is a number.
pub fn is_number(
    input: &Value,
    _params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    numeric_input(input, message).map(|_| ())
}

/// Assert that the input is strictly above the limit parameter.
pub fn is_above(
    input: &Value,
    params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    let actual = numeric_input(input, message)?;
    let limit = params::number(params, 0, message)?;
    if actual > limit {
        Ok(())
    } else {
        Err(AssertionError::failed(
            format!("{actual} is not above {limit}"),
            message,
        ))
    }
}

/// Assert that the input is at least the limit parameter.
pub fn is_at_least(
    input: &Value,
    params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    let actual = numeric_input(input, message)?;
    let limit = params::number(params, 0, message)?;
    if actual >= limit {
        Ok(())
    } else {
        Err(AssertionError::failed(
            format!("{actual} is not at least {limit}"),
            message,
        ))
    }
}

/// Assert that the input is strictly below the limit parameter.
pub fn is_below(
    input: &Value,
    params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    let actual = numeric_input(input, message)?;
    let limit = params::number(params, 0, message)?;
    if actual < limit {
        Ok(())
    } else {
        Err(AssertionError::failed(
            format!("{actual} is not below {limit}"),
            message,
        ))
    }
}

/// Assert that the input is at most the limit parameter.
pub fn is_at_most(
    input: &Value,
    params: &[Value],
    message: Option<&str>,
) -> Result<(), AssertionError> {
    let actual = numeric_input(input, message)?;
    let limit = params::number(params, 0, message)?;
    if actual <= limit {
        Ok(())
    } else {
        Err(AssertionError::failed(
            format!("{actual} is not at most {limit}"),
            message,
        ))
    }
}

/// The numeric guard group.
pub fn group() -> GuardGroup {
    GuardGroup::new("numbers")
        .with_assertion("is_number", is_number)
        .with_assertion("is_above", is_above)
        .with_assertion("is_at_least", is_at_least)
        .with_assertion("is_below", is_below)
        .with_assertion("is_at_most", is_at_most)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_is_number() {
        assert!(is_number(&json!(3), &[], None).is_ok());
        assert!(is_number(&json!(3.5), &[], None).is_ok());
        assert!(is_number(&json!("3"), &[], None).is_err());
        assert!(is_number(&Value::Null, &[], None).is_err());
    }

    #[test]
    fn test_is_above_boundary() {
        let limit = [json!(5)];
        assert!(is_above(&json!(6), &limit, None).is_ok());
        assert!(is_above(&json!(5), &limit, None).is_err());
        assert!(is_above(&json!(4), &limit, None).is_err());
    }

    #[test]
    fn test_missing_limit_fails() {
        assert!(is_above(&json!(6), &[], None).is_err());
        assert!(is_at_most(&json!(6), &[json!("limit")], None).is_err());
    }

    #[test]
    fn test_failure_message_names_both_sides() {
        let error = is_below(&json!(9), &[json!(2)], None).unwrap_err();
        assert_eq!(error.to_string(), "9 is not below 2");
    }

    proptest! {
        #[test]
        fn prop_comparisons_agree_with_f64_ordering(actual in -1e9f64..1e9, limit in -1e9f64..1e9) {
            let input = json!(actual);
            let params = [json!(limit)];

            prop_assert_eq!(is_above(&input, &params, None).is_ok(), actual > limit);
            prop_assert_eq!(is_at_least(&input, &params, None).is_ok(), actual >= limit);
            prop_assert_eq!(is_below(&input, &params, None).is_ok(), actual < limit);
            prop_assert_eq!(is_at_most(&input, &params, None).is_ok(), actual <= limit);
        }
    }
}
