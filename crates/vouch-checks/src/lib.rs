//! Canonical assertion suppliers for the Vouch guard framework.
//!
//! Each module here covers one check family and contributes a single
//! [`vouch_core::GuardGroup`]: the canonical assertions plus whatever
//! override wiring the family needs. The core knows nothing about the
//! families; [`all_groups`] is the whole contract.
//!
//! Every assertion has the same shape (input value, extra parameters,
//! optional caller message), so any of them can stand behind all four
//! derived call forms.

#![deny(unsafe_code)]

mod params;

pub mod booleans;
pub mod containers;
pub mod equality;
pub mod failure;
pub mod nullish;
pub mod numbers;
pub mod strings;
pub mod uuids;

use vouch_core::GuardGroup;

/// Every guard group this crate supplies, ready for
/// [`GuardSet::build`](vouch_core::GuardSet::build).
pub fn all_groups() -> Vec<GuardGroup> {
    vec![
        booleans::group(),
        containers::group(),
        equality::group(),
        failure::group(),
        nullish::group(),
        numbers::group(),
        strings::group(),
        uuids::group(),
    ]
}
