//! Shared crate-wide constants for Switchgear.
//!
//! Centralizes magic values and default labels used across modules.
//! Adjusting these here will propagate through the crate.

/// Subsystem tag stamped on every emitted fact.
pub const SUBSYSTEM: &str = "switchgear";

/// UUIDv5 namespace tag for deterministic order/step IDs.
pub const NS_TAG: &str = "https://switchgear/order";

/// Order text used when a rollback re-issues a transition to restore the
/// pre-execution position. The original order text is appended.
pub const ROLLBACK_ORDER_PREFIX: &str = "rollback of";
