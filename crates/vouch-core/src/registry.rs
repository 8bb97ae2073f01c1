//! Guard registry: derived-form tables built from guard groups.
//!
//! [`GuardSet::build`] walks every group's assertion table once and, per
//! derived form, resolves the override precedence into a concrete table
//! entry. The resulting set is immutable; lookups return `None` both for
//! names that were never registered and for forms a check explicitly omits.

use std::collections::BTreeMap;
use std::future::Future;

use serde_json::Value;
use tracing::debug;

use crate::error::{AssertionError, RegistryError, WaitError};
use crate::group::{
    AssertFn, AssertWrapFn, CheckFn, CheckName, CheckWrapFn, DerivedForm, GuardGroup, Override,
};
use crate::wait::{self, WaitUntilOptions};

/// A `check` table entry: pass/fail as a `bool`, all failures swallowed.
#[derive(Debug, Clone, Copy)]
pub enum CheckGuard {
    /// Auto-derived from the canonical assertion.
    Derived(AssertFn),
    /// Explicit replacement.
    Custom(CheckFn),
}

impl CheckGuard {
    /// Evaluate the check. Never panics, never propagates a failure.
    pub fn eval(&self, input: &Value, params: &[Value]) -> bool {
        match self {
            Self::Derived(assertion) => assertion(input, params, None).is_ok(),
            Self::Custom(check) => check(input, params),
        }
    }
}

/// An `assert_wrap` table entry: run the assertion, hand back the input.
#[derive(Debug, Clone, Copy)]
pub enum AssertWrapGuard {
    /// Auto-derived from the canonical assertion.
    Derived(AssertFn),
    /// Explicit replacement.
    Custom(AssertWrapFn),
}

impl AssertWrapGuard {
    /// Evaluate the assertion; on success the input value is returned
    /// unchanged, on failure the [`AssertionError`] propagates as-is.
    pub fn eval(
        &self,
        input: Value,
        params: &[Value],
        message: Option<&str>,
    ) -> Result<Value, AssertionError> {
        match self {
            Self::Derived(assertion) => {
                assertion(&input, params, message)?;
                Ok(input)
            }
            Self::Custom(wrap) => wrap(input, params, message),
        }
    }
}

/// A `check_wrap` table entry: like `assert_wrap`, with failure as `None`.
#[derive(Debug, Clone, Copy)]
pub enum CheckWrapGuard {
    /// Auto-derived from the canonical assertion.
    Derived(AssertFn),
    /// Explicit replacement.
    Custom(CheckWrapFn),
}

impl CheckWrapGuard {
    /// Evaluate the check; the input comes back on success, failures are
    /// swallowed into `None`. No message parameter exists on this form.
    pub fn eval(&self, input: Value, params: &[Value]) -> Option<Value> {
        match self {
            Self::Derived(assertion) => match assertion(&input, params, None) {
                Ok(()) => Some(input),
                Err(_) => None,
            },
            Self::Custom(wrap) => wrap(input, params),
        }
    }
}

/// A `wait_until` table entry: the per-poll predicate for one check.
///
/// The predicate is the canonical assertion unless the group supplied a
/// custom wait-until override; the polling protocol around it is uniform
/// either way.
#[derive(Debug, Clone, Copy)]
pub struct WaitGuard {
    check: CheckName,
    predicate: AssertFn,
}

impl WaitGuard {
    /// Poll `callback` until its resolved value satisfies this check.
    ///
    /// Resolves with the callback's value itself. An unmet assertion is
    /// retried on the configured interval until the timeout elapses; a
    /// callback error aborts immediately. See [`crate::WaitUntilOptions`]
    /// for the timing defaults.
    pub async fn wait<F, Fut>(
        &self,
        callback: F,
        params: &[Value],
        options: WaitUntilOptions,
        message: Option<&str>,
    ) -> Result<Value, WaitError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = anyhow::Result<Value>>,
    {
        wait::poll(self.check, self.predicate, params, callback, options, message).await
    }
}

/// The immutable registry of canonical assertions and their derived forms.
///
/// Built exactly once from a list of [`GuardGroup`]s; never mutated after.
#[derive(Debug, Default)]
pub struct GuardSet {
    assertions: BTreeMap<CheckName, AssertFn>,
    checks: BTreeMap<CheckName, CheckGuard>,
    assert_wraps: BTreeMap<CheckName, AssertWrapGuard>,
    check_wraps: BTreeMap<CheckName, CheckWrapGuard>,
    wait_untils: BTreeMap<CheckName, WaitGuard>,
}

impl GuardSet {
    /// Build the derived-form tables from the given groups.
    ///
    /// Per check and per derived form: no override entry derives from the
    /// canonical assertion, [`Override::Custom`] installs the replacement
    /// verbatim, and [`Override::Omit`] leaves the name out of that table.
    /// Resolution is independent per form.
    ///
    /// Fails if two groups register the same check name, or if an override
    /// table names a check its group does not assert.
    pub fn build(groups: impl IntoIterator<Item = GuardGroup>) -> Result<Self, RegistryError> {
        let mut set = Self::default();
        let mut registered_by: BTreeMap<CheckName, &'static str> = BTreeMap::new();

        for group in groups {
            check_override_keys(&group)?;

            for (&check, &assertion) in group.assertions() {
                if let Some(&first) = registered_by.get(check) {
                    return Err(RegistryError::DuplicateCheck {
                        name: check.to_string(),
                        first: first.to_string(),
                        second: group.name().to_string(),
                    });
                }
                registered_by.insert(check, group.name());

                set.assertions.insert(check, assertion);

                match group.check_overrides().get(check) {
                    None => {
                        set.checks.insert(check, CheckGuard::Derived(assertion));
                    }
                    Some(Override::Custom(custom)) => {
                        set.checks.insert(check, CheckGuard::Custom(*custom));
                    }
                    Some(Override::Omit) => {}
                }

                match group.assert_wrap_overrides().get(check) {
                    None => {
                        set.assert_wraps
                            .insert(check, AssertWrapGuard::Derived(assertion));
                    }
                    Some(Override::Custom(custom)) => {
                        set.assert_wraps
                            .insert(check, AssertWrapGuard::Custom(*custom));
                    }
                    Some(Override::Omit) => {}
                }

                match group.check_wrap_overrides().get(check) {
                    None => {
                        set.check_wraps
                            .insert(check, CheckWrapGuard::Derived(assertion));
                    }
                    Some(Override::Custom(custom)) => {
                        set.check_wraps
                            .insert(check, CheckWrapGuard::Custom(*custom));
                    }
                    Some(Override::Omit) => {}
                }

                match group.wait_until_overrides().get(check) {
                    None => {
                        set.wait_untils.insert(
                            check,
                            WaitGuard {
                                check,
                                predicate: assertion,
                            },
                        );
                    }
                    Some(Override::Custom(custom)) => {
                        set.wait_untils.insert(
                            check,
                            WaitGuard {
                                check,
                                predicate: *custom,
                            },
                        );
                    }
                    Some(Override::Omit) => {}
                }
            }
        }

        debug!(checks = set.assertions.len(), "Built guard registry");
        Ok(set)
    }

    /// Look up the canonical assertion for a check.
    pub fn assertion(&self, check: &str) -> Option<AssertFn> {
        self.assertions.get(check).copied()
    }

    /// Look up the `check` form. `None` means unknown or omitted.
    pub fn check(&self, check: &str) -> Option<&CheckGuard> {
        self.checks.get(check)
    }

    /// Look up the `assert_wrap` form. `None` means unknown or omitted.
    pub fn assert_wrap(&self, check: &str) -> Option<&AssertWrapGuard> {
        self.assert_wraps.get(check)
    }

    /// Look up the `check_wrap` form. `None` means unknown or omitted.
    pub fn check_wrap(&self, check: &str) -> Option<&CheckWrapGuard> {
        self.check_wraps.get(check)
    }

    /// Look up the `wait_until` form. `None` means unknown or omitted.
    pub fn wait_until(&self, check: &str) -> Option<&WaitGuard> {
        self.wait_untils.get(check)
    }

    /// All registered check names, in order.
    pub fn names(&self) -> impl Iterator<Item = CheckName> + '_ {
        self.assertions.keys().copied()
    }

    /// Number of registered checks.
    pub fn len(&self) -> usize {
        self.assertions.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }
}

/// Reject override entries that name checks the group never asserts.
fn check_override_keys(group: &GuardGroup) -> Result<(), RegistryError> {
    let orphan = |form: DerivedForm, name: CheckName| RegistryError::OrphanOverride {
        group: group.name().to_string(),
        form,
        name: name.to_string(),
    };

    for &name in group.check_overrides().keys() {
        if !group.assertions().contains_key(name) {
            return Err(orphan(DerivedForm::Check, name));
        }
    }
    for &name in group.assert_wrap_overrides().keys() {
        if !group.assertions().contains_key(name) {
            return Err(orphan(DerivedForm::AssertWrap, name));
        }
    }
    for &name in group.check_wrap_overrides().keys() {
        if !group.assertions().contains_key(name) {
            return Err(orphan(DerivedForm::CheckWrap, name));
        }
    }
    for &name in group.wait_until_overrides().keys() {
        if !group.assertions().contains_key(name) {
            return Err(orphan(DerivedForm::WaitUntil, name));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn is_positive(
        input: &Value,
        _params: &[Value],
        message: Option<&str>,
    ) -> Result<(), AssertionError> {
        let passed = input.as_f64().is_some_and(|number| number > 0.0);
        if passed {
            Ok(())
        } else {
            Err(AssertionError::failed("value is not positive", message))
        }
    }

    fn is_even(
        input: &Value,
        _params: &[Value],
        message: Option<&str>,
    ) -> Result<(), AssertionError> {
        let passed = input.as_i64().is_some_and(|number| number % 2 == 0);
        if passed {
            Ok(())
        } else {
            Err(AssertionError::failed("value is not even", message))
        }
    }

    fn check_always_true(_input: &Value, _params: &[Value]) -> bool {
        true
    }

    fn demo_group() -> GuardGroup {
        GuardGroup::new("demo")
            .with_assertion("is_positive", is_positive)
            .with_assertion("is_even", is_even)
    }

    #[test]
    fn test_absent_override_derives_every_form() {
        let set = GuardSet::build([demo_group()]).unwrap();

        assert!(set.assertion("is_positive").is_some());
        assert!(set.check("is_positive").is_some());
        assert!(set.assert_wrap("is_positive").is_some());
        assert!(set.check_wrap("is_positive").is_some());
        assert!(set.wait_until("is_positive").is_some());
    }

    #[test]
    fn test_custom_override_bypasses_derivation() {
        let group = demo_group().with_check_override("is_positive", Override::Custom(check_always_true));
        let set = GuardSet::build([group]).unwrap();

        // The custom check ignores the canonical assertion entirely.
        assert!(set.check("is_positive").unwrap().eval(&json!(-3), &[]));
        // Other forms still derive from the canonical assertion.
        assert!(set
            .assert_wrap("is_positive")
            .unwrap()
            .eval(json!(-3), &[], None)
            .is_err());
    }

    #[test]
    fn test_omit_is_independent_per_form() {
        let group = demo_group().with_check_wrap_override("is_positive", Override::Omit);
        let set = GuardSet::build([group]).unwrap();

        assert!(set.check_wrap("is_positive").is_none());
        assert!(set.check("is_positive").is_some());
        assert!(set.assert_wrap("is_positive").is_some());
        assert!(set.wait_until("is_positive").is_some());
        // The sibling check keeps all four forms.
        assert!(set.check_wrap("is_even").is_some());
    }

    #[test]
    fn test_unknown_name_is_absent_everywhere() {
        let set = GuardSet::build([demo_group()]).unwrap();

        assert!(set.assertion("no_such_check").is_none());
        assert!(set.check("no_such_check").is_none());
        assert!(set.wait_until("no_such_check").is_none());
    }

    #[test]
    fn test_duplicate_check_rejected() {
        let other = GuardGroup::new("other").with_assertion("is_positive", is_positive);
        let error = GuardSet::build([demo_group(), other]).unwrap_err();

        assert_eq!(
            error,
            RegistryError::DuplicateCheck {
                name: "is_positive".to_string(),
                first: "demo".to_string(),
                second: "other".to_string(),
            }
        );
    }

    #[test]
    fn test_orphan_override_rejected() {
        let group = demo_group().with_wait_until_override("is_missing", Override::Omit);
        let error = GuardSet::build([group]).unwrap_err();

        assert_eq!(
            error,
            RegistryError::OrphanOverride {
                group: "demo".to_string(),
                form: DerivedForm::WaitUntil,
                name: "is_missing".to_string(),
            }
        );
    }

    #[test]
    fn test_derived_check_swallows_failures() {
        let set = GuardSet::build([demo_group()]).unwrap();
        let check = set.check("is_positive").unwrap();

        assert!(check.eval(&json!(2), &[]));
        assert!(!check.eval(&json!(-2), &[]));
        assert!(!check.eval(&json!("not a number"), &[]));
    }

    #[test]
    fn test_assert_wrap_returns_input_unchanged() {
        let set = GuardSet::build([demo_group()]).unwrap();
        let wrap = set.assert_wrap("is_positive").unwrap();

        let input = json!(7);
        assert_eq!(wrap.eval(input.clone(), &[], None).unwrap(), input);

        let error = wrap.eval(json!(-7), &[], Some("bad sample")).unwrap_err();
        assert_eq!(error.to_string(), "bad sample: value is not positive");
    }

    #[test]
    fn test_check_wrap_converts_failure_to_none() {
        let set = GuardSet::build([demo_group()]).unwrap();
        let wrap = set.check_wrap("is_even").unwrap();

        assert_eq!(wrap.eval(json!(4), &[]), Some(json!(4)));
        assert_eq!(wrap.eval(json!(5), &[]), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_until_custom_predicate_replaces_canonical() {
        let group = demo_group().with_wait_until_override("is_positive", Override::Custom(is_even));
        let set = GuardSet::build([group]).unwrap();
        let guard = set.wait_until("is_positive").unwrap();

        // The custom predicate accepts -2 even though the canonical
        // assertion would reject it.
        let value = guard
            .wait(
                || async { Ok(json!(-2)) },
                &[],
                WaitUntilOptions::default(),
                None,
            )
            .await
            .unwrap();
        assert_eq!(value, json!(-2));
    }

    #[test]
    fn test_names_are_sorted_and_counted() {
        let set = GuardSet::build([demo_group()]).unwrap();

        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["is_even", "is_positive"]);
    }
}
