//! Error types for the guard framework.
//!
//! Three failure families, kept distinct on purpose: [`AssertionError`] for
//! a check that did not hold, [`WaitError`] for a polling wait that settled
//! without success, and [`RegistryError`] for an inconsistent guard-group
//! registration.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Fallback text when an assertion failure carries no message at all.
const FALLBACK_MESSAGE: &str = "Assertion failed.";

/// A canonical assertion did not hold.
///
/// Carries a generated base message describing the failed condition and an
/// optional user-supplied message. When both exist they are combined as
/// `"<user>: <base>"`; when only one exists, that one is used; when neither
/// exists, a generic fallback is used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct AssertionError {
    base: Option<String>,
    user: Option<String>,
}

impl AssertionError {
    /// Build a failure from a generated base message plus the optional user
    /// message forwarded by the call site.
    pub fn failed(base: impl Into<String>, user: Option<&str>) -> Self {
        Self {
            base: Some(base.into()),
            user: user.map(str::to_owned),
        }
    }

    /// Build a failure carrying only the user message.
    pub fn user_only(user: impl Into<String>) -> Self {
        Self {
            base: None,
            user: Some(user.into()),
        }
    }

    /// The generated base message, if any.
    pub fn base_message(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// The user-supplied message, if any.
    pub fn user_message(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

impl fmt::Display for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.user, &self.base) {
            (Some(user), Some(base)) => write!(f, "{user}: {base}"),
            (Some(user), None) => write!(f, "{user}"),
            (None, Some(base)) => write!(f, "{base}"),
            (None, None) => write!(f, "{FALLBACK_MESSAGE}"),
        }
    }
}

/// A polling wait settled without success.
///
/// Distinct from [`AssertionError`]: an unmet assertion inside the poll loop
/// is retried, so the only terminal failures are running out of time and the
/// polled callback itself failing.
#[derive(Debug, Error)]
pub enum WaitError {
    /// The condition never held within the allotted time.
    TimedOut {
        /// Configured timeout that elapsed.
        timeout: Duration,
        /// Number of attempts made before giving up.
        attempts: u32,
        /// Caller-supplied failure message, if any.
        message: Option<String>,
    },

    /// The polled callback failed. This aborts the wait immediately; it is
    /// never retried.
    Callback {
        /// Caller-supplied failure message, if any.
        message: Option<String>,
        /// The callback's original error.
        #[source]
        source: anyhow::Error,
    },
}

impl fmt::Display for WaitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimedOut {
                timeout,
                attempts,
                message,
            } => {
                if let Some(message) = message {
                    write!(f, "{message}: ")?;
                }
                write!(
                    f,
                    "condition was not met within {}ms ({attempts} attempts)",
                    timeout.as_millis()
                )
            }
            Self::Callback { message, source } => {
                if let Some(message) = message {
                    write!(f, "{message}: ")?;
                }
                write!(f, "polled callback failed: {source}")
            }
        }
    }
}

/// A guard-group registration is inconsistent.
///
/// Raised by [`GuardSet::build`](crate::GuardSet::build); a consistent set of
/// compiled-in groups never produces these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two groups both registered an assertion under the same check name.
    #[error("check `{name}` is registered by both group `{first}` and group `{second}`")]
    DuplicateCheck {
        /// The contested check name.
        name: String,
        /// Group that registered the name first.
        first: String,
        /// Group that registered it again.
        second: String,
    },

    /// An override table names a check the same group never asserts.
    #[error("group `{group}` has a {form} override for `{name}`, which it does not assert")]
    OrphanOverride {
        /// Group carrying the orphan entry.
        group: String,
        /// Which derived-form table the entry sits in.
        form: crate::DerivedForm,
        /// The unknown check name.
        name: String,
    },
}
