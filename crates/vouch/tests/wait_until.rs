//! Polling-wait behavior through the public registry surface.
//!
//! All timing tests run on tokio's paused clock, so sleeps auto-advance and
//! the assertions on elapsed time are exact rather than racy.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::time::Instant;
use vouch::{guards, WaitError, WaitUntilOptions};

fn fast_options() -> WaitUntilOptions {
    WaitUntilOptions {
        interval: Duration::from_millis(10),
        timeout: Duration::from_millis(50),
    }
}

#[tokio::test(start_paused = true)]
async fn resolves_with_the_callback_value_after_two_delays() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&calls);
    let started = Instant::now();

    let value = guards()
        .wait_until("is_true")
        .unwrap()
        .wait(
            move || {
                let counter = Arc::clone(&counter);
                async move {
                    let call = counter.fetch_add(1, Ordering::SeqCst);
                    Ok(json!(call >= 2))
                }
            },
            &[],
            fast_options(),
            None,
        )
        .await
        .unwrap();

    assert_eq!(value, json!(true));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    // Two failed attempts means exactly two interval sleeps.
    assert_eq!(started.elapsed(), Duration::from_millis(20));
}

#[tokio::test(start_paused = true)]
async fn falsy_success_values_are_legitimate() {
    let value = guards()
        .wait_until("is_false")
        .unwrap()
        .wait(|| async { Ok(json!(false)) }, &[], fast_options(), None)
        .await
        .unwrap();

    assert_eq!(value, json!(false));
}

#[tokio::test(start_paused = true)]
async fn times_out_with_a_timeout_flavored_error() {
    let started = Instant::now();

    let error = guards()
        .wait_until("is_true")
        .unwrap()
        .wait(
            || async { Ok(json!(false)) },
            &[],
            fast_options(),
            Some("flag never rose"),
        )
        .await
        .unwrap_err();

    assert!(started.elapsed() >= Duration::from_millis(50));
    assert!(matches!(error, WaitError::TimedOut { .. }));
    let text = error.to_string();
    assert!(text.starts_with("flag never rose: "));
    assert!(text.contains("50ms"));
}

#[tokio::test(start_paused = true)]
async fn callback_errors_fail_immediately() {
    let started = Instant::now();

    let error = guards()
        .wait_until("is_true")
        .unwrap()
        .wait(
            || async { Err(anyhow::anyhow!("boom")) },
            &[],
            fast_options(),
            None,
        )
        .await
        .unwrap_err();

    // Rejected before any polling delay, let alone the timeout.
    assert_eq!(started.elapsed(), Duration::ZERO);
    assert!(matches!(error, WaitError::Callback { .. }));
    assert!(error.to_string().contains("boom"));
}

#[tokio::test(start_paused = true)]
async fn parameterized_checks_poll_with_their_params() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&calls);

    let value = guards()
        .wait_until("is_above")
        .unwrap()
        .wait(
            move || {
                let counter = Arc::clone(&counter);
                async move { Ok(json!(counter.fetch_add(1, Ordering::SeqCst))) }
            },
            &[json!(3)],
            fast_options(),
            None,
        )
        .await
        .unwrap();

    assert_eq!(value, json!(4));
}

#[tokio::test(start_paused = true)]
async fn concurrent_waits_are_independent() {
    // Two waits over different checks, interleaved on one runtime.
    let slow = guards().wait_until("is_true").unwrap().wait(
        || async { Ok(json!(false)) },
        &[],
        WaitUntilOptions {
            interval: Duration::from_millis(10),
            timeout: Duration::from_millis(30),
        },
        None,
    );
    let quick = guards().wait_until("is_defined").unwrap().wait(
        || async { Ok(json!("ready")) },
        &[],
        fast_options(),
        None,
    );

    let (slow_result, quick_result) = tokio::join!(slow, quick);
    assert!(slow_result.is_err());
    assert_eq!(quick_result.unwrap(), json!("ready"));
}

#[tokio::test(start_paused = true)]
async fn default_options_cover_slow_conditions() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&calls);

    // 30 attempts at the default 100ms interval sits well inside the
    // default 10s timeout.
    let value = guards()
        .wait_until("is_not_empty")
        .unwrap()
        .wait(
            move || {
                let counter = Arc::clone(&counter);
                async move {
                    let call = counter.fetch_add(1, Ordering::SeqCst);
                    if call >= 30 {
                        Ok(json!([call]))
                    } else {
                        Ok(json!([]))
                    }
                }
            },
            &[],
            WaitUntilOptions::default(),
            None,
        )
        .await
        .unwrap();

    assert_eq!(value, json!([30]));
}
