//! Refresh-token rotation with reuse detection.
//!
//! The state of a presented refresh token is derived on every call from two
//! facts: does its signature verify, and is it in its owner's active set.
//!
//! | verifies | in active set | outcome                                  |
//! |----------|---------------|------------------------------------------|
//! | no       | -             | reject, nothing changes                  |
//! | yes      | yes           | rotate                                   |
//! | yes      | no            | reuse: wipe the owner's active set, reject |
//!
//! A token that is in the set but fails verification (typically expired)
//! is dropped from the set on its own.
//!
//! A verified token that left the set through a rotation committed during
//! the current call, or within the reuse grace window, belongs to a
//! concurrent duplicate request. It is rejected without touching the set.

mod engine;

#[cfg(test)]
mod tests;

pub use engine::{RefreshRotationEngine, RevocationResult};
