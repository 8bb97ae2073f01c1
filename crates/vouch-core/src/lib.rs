//! Guard framework core for Vouch.
//!
//! A *check* is defined once, as a canonical assertion over a dynamic
//! [`serde_json::Value`]. From that single definition the framework derives
//! four sibling call forms:
//!
//! - **check**: run the assertion, report pass/fail as a `bool`.
//! - **assert_wrap**: run the assertion, hand the input back on success.
//! - **check_wrap**: like assert_wrap, but failure becomes `None`.
//! - **wait_until**: poll an async callback until its result satisfies the
//!   assertion, with interval/timeout control.
//!
//! # Key Concepts
//!
//! - [`GuardGroup`]: the definition contract supplied by a checks module:
//!   a table of canonical assertions plus optional per-form override tables.
//! - [`Override`]: a per-check customization of one derived form, either an
//!   explicit replacement or an omission.
//! - [`GuardSet`]: the immutable registry of all derived forms, built once
//!   from a list of guard groups.
//! - [`WaitUntilOptions`]: interval/timeout configuration for polling waits.
//!
//! # Design Principles
//!
//! 1. One canonical assertion per check; siblings are derived, never
//!    hand-duplicated.
//! 2. Derivation is ordinary control flow over explicit tables. No proxies,
//!    no dynamic property synthesis.
//! 3. The registry is constructed exactly once and never mutated.
//! 4. Failures surface as returned errors; the framework never logs in place
//!    of returning.

#![deny(unsafe_code)]

mod error;
mod group;
mod registry;
mod wait;

pub use error::*;
pub use group::*;
pub use registry::*;
pub use wait::*;
