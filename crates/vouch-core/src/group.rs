//! Guard-group definition contract.
//!
//! A checks module supplies one [`GuardGroup`]: a table of canonical
//! assertions plus optional per-form override tables. This is the only
//! interface the core consumes from its suppliers.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::error::AssertionError;

/// Name a check is registered under, e.g. `"is_truthy"`.
pub type CheckName = &'static str;

/// The canonical assertion: one hand-written function per check, from which
/// the sibling call forms are derived.
///
/// `params` carries the check's extra arguments (thresholds, patterns,
/// expected values); `message` is the caller's optional failure message,
/// folded into the [`AssertionError`] on failure.
pub type AssertFn = fn(&Value, &[Value], Option<&str>) -> Result<(), AssertionError>;

/// An explicit replacement for a derived `check` form.
pub type CheckFn = fn(&Value, &[Value]) -> bool;

/// An explicit replacement for a derived `assert_wrap` form.
pub type AssertWrapFn = fn(Value, &[Value], Option<&str>) -> Result<Value, AssertionError>;

/// An explicit replacement for a derived `check_wrap` form.
pub type CheckWrapFn = fn(Value, &[Value]) -> Option<Value>;

/// One of the four derived call forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DerivedForm {
    /// Boolean pass/fail form.
    Check,
    /// Pass-through-on-success form.
    AssertWrap,
    /// Pass-through-or-`None` form.
    CheckWrap,
    /// Polling wait form.
    WaitUntil,
}

impl fmt::Display for DerivedForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DerivedForm::Check => write!(f, "check"),
            DerivedForm::AssertWrap => write!(f, "assert_wrap"),
            DerivedForm::CheckWrap => write!(f, "check_wrap"),
            DerivedForm::WaitUntil => write!(f, "wait_until"),
        }
    }
}

/// Per-check customization of one derived form.
///
/// An absent override table entry means the form is auto-derived from the
/// canonical assertion; a present entry either replaces the derivation or
/// omits the form for that check entirely.
#[derive(Debug, Clone, Copy)]
pub enum Override<F> {
    /// Use this function verbatim, bypassing auto-derivation.
    Custom(F),
    /// Do not expose this derived form for this check.
    Omit,
}

/// The bundle a checks module contributes to the registry: canonical
/// assertions plus the override tables for each derived form.
///
/// Override-table keys must name assertions the same group registers;
/// [`GuardSet::build`](crate::GuardSet::build) rejects anything else.
#[derive(Debug, Clone, Default)]
pub struct GuardGroup {
    name: &'static str,
    assertions: BTreeMap<CheckName, AssertFn>,
    check_overrides: BTreeMap<CheckName, Override<CheckFn>>,
    assert_wrap_overrides: BTreeMap<CheckName, Override<AssertWrapFn>>,
    check_wrap_overrides: BTreeMap<CheckName, Override<CheckWrapFn>>,
    wait_until_overrides: BTreeMap<CheckName, Override<AssertFn>>,
}

impl GuardGroup {
    /// Create an empty group. The name is used in build diagnostics only.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Register a canonical assertion.
    pub fn with_assertion(mut self, check: CheckName, assertion: AssertFn) -> Self {
        self.assertions.insert(check, assertion);
        self
    }

    /// Set the `check` override for a check.
    pub fn with_check_override(mut self, check: CheckName, over: Override<CheckFn>) -> Self {
        self.check_overrides.insert(check, over);
        self
    }

    /// Set the `assert_wrap` override for a check.
    pub fn with_assert_wrap_override(
        mut self,
        check: CheckName,
        over: Override<AssertWrapFn>,
    ) -> Self {
        self.assert_wrap_overrides.insert(check, over);
        self
    }

    /// Set the `check_wrap` override for a check.
    pub fn with_check_wrap_override(
        mut self,
        check: CheckName,
        over: Override<CheckWrapFn>,
    ) -> Self {
        self.check_wrap_overrides.insert(check, over);
        self
    }

    /// Set the `wait_until` override for a check. A custom entry replaces the
    /// predicate the poll loop tests each resolved value against; the polling
    /// protocol itself is uniform.
    pub fn with_wait_until_override(mut self, check: CheckName, over: Override<AssertFn>) -> Self {
        self.wait_until_overrides.insert(check, over);
        self
    }

    /// The group's diagnostic name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The canonical assertions this group registers.
    pub fn assertions(&self) -> &BTreeMap<CheckName, AssertFn> {
        &self.assertions
    }

    pub(crate) fn check_overrides(&self) -> &BTreeMap<CheckName, Override<CheckFn>> {
        &self.check_overrides
    }

    pub(crate) fn assert_wrap_overrides(&self) -> &BTreeMap<CheckName, Override<AssertWrapFn>> {
        &self.assert_wrap_overrides
    }

    pub(crate) fn check_wrap_overrides(&self) -> &BTreeMap<CheckName, Override<CheckWrapFn>> {
        &self.check_wrap_overrides
    }

    pub(crate) fn wait_until_overrides(&self) -> &BTreeMap<CheckName, Override<AssertFn>> {
        &self.wait_until_overrides
    }
}
