//! Vouch: derived guard forms and polling waits over dynamic values.
//!
//! One canonical assertion per check; four derived call forms. The facade
//! builds the process-wide guard registry once, from every check family in
//! [`vouch_checks`], and keeps it immutable for the life of the process.
//!
//! ```
//! use serde_json::json;
//! use vouch::guards;
//!
//! let registry = guards();
//!
//! // Boolean pass/fail:
//! assert!(registry.check("is_above").unwrap().eval(&json!(7), &[json!(5)]));
//!
//! // Narrow-and-pass-through in one expression:
//! let value = registry
//!     .assert_wrap("is_uuid")
//!     .unwrap()
//!     .eval(json!("67e55044-10b1-426f-9247-bb680e5fe0c8"), &[], None)
//!     .unwrap();
//! assert!(value.is_string());
//! ```

#![deny(unsafe_code)]

use std::sync::LazyLock;

use serde_json::Value;

pub use vouch_checks as checks;
pub use vouch_core::{
    AssertFn, AssertWrapFn, AssertWrapGuard, AssertionError, CheckFn, CheckGuard, CheckName,
    CheckWrapFn, CheckWrapGuard, DerivedForm, GuardGroup, GuardSet, Override, RegistryError,
    WaitError, WaitGuard, WaitUntilOptions, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT,
};

static GUARDS: LazyLock<GuardSet> = LazyLock::new(|| {
    GuardSet::build(vouch_checks::all_groups()).expect("built-in guard groups are consistent")
});

/// The process-wide guard registry, built on first use.
pub fn guards() -> &'static GuardSet {
    &GUARDS
}

/// The directly callable base assertion: assert that a value is truthy.
///
/// Equivalent to the registry's `is_truthy` assertion; exists so the most
/// common check needs no name lookup.
pub fn assert_that(input: &Value, message: Option<&str>) -> Result<(), AssertionError> {
    vouch_checks::booleans::is_truthy(input, &[], message)
}
