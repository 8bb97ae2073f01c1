//! Polling wait engine.
//!
//! `wait_until` repeatedly invokes an async callback and tests its resolved
//! value against a check's assertion until the assertion holds, the timeout
//! elapses, or the callback itself fails.
//!
//! The protocol is deliberately rigid:
//!
//! 1. The first attempt happens immediately; there is no initial delay.
//! 2. An unmet assertion is "not yet": the engine sleeps for the configured
//!    interval and tries again. The timeout is checked only after a failed
//!    attempt, so a timeout shorter than the interval still gets one attempt.
//! 3. A callback error is fatal. It is never retried, and it aborts the wait
//!    before any timeout bookkeeping.
//!
//! Suspension happens only at the inter-poll sleep and while awaiting the
//! callback, so concurrent waits interleave freely and share no state.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace};

use crate::error::WaitError;
use crate::group::AssertFn;

/// Default delay between polling attempts.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Default overall deadline for a polling wait.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(10);

/// Timing configuration for a polling wait.
///
/// Construct with struct-update syntax or the `with_*` methods to override
/// one field and keep the package default for the other:
///
/// ```
/// use std::time::Duration;
/// use vouch_core::WaitUntilOptions;
///
/// let options = WaitUntilOptions::default().with_timeout(Duration::from_secs(2));
/// assert_eq!(options.interval, vouch_core::DEFAULT_POLL_INTERVAL);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WaitUntilOptions {
    /// Delay between attempts.
    pub interval: Duration,

    /// Overall deadline, measured from the start of the wait.
    pub timeout: Duration,
}

impl Default for WaitUntilOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_POLL_TIMEOUT,
        }
    }
}

impl WaitUntilOptions {
    /// Set the polling interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the overall timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Drive one polling wait to a terminal state.
///
/// Resolves with the callback's value once `predicate` accepts it. The
/// predicate sees each resolved value with no user message; the caller's
/// `message` only decorates the terminal error.
pub(crate) async fn poll<F, Fut>(
    check: &str,
    predicate: AssertFn,
    params: &[Value],
    mut callback: F,
    options: WaitUntilOptions,
    message: Option<&str>,
) -> Result<Value, WaitError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<Value>>,
{
    let started = Instant::now();
    let mut attempts: u32 = 0;

    debug!(
        check,
        interval_ms = options.interval.as_millis() as u64,
        timeout_ms = options.timeout.as_millis() as u64,
        "Polling until condition holds"
    );

    loop {
        attempts += 1;

        let value = match callback().await {
            Ok(value) => value,
            Err(source) => {
                debug!(check, attempts, "Polled callback failed; aborting wait");
                return Err(WaitError::Callback {
                    message: message.map(str::to_owned),
                    source,
                });
            }
        };

        match predicate(&value, params, None) {
            Ok(()) => {
                debug!(check, attempts, "Condition held");
                return Ok(value);
            }
            Err(unmet) => {
                trace!(check, attempts, %unmet, "Condition not yet met");

                if started.elapsed() >= options.timeout {
                    debug!(check, attempts, "Timed out waiting for condition");
                    return Err(WaitError::TimedOut {
                        timeout: options.timeout,
                        attempts,
                        message: message.map(str::to_owned),
                    });
                }

                sleep(options.interval).await;
            }
        }
    }
}
