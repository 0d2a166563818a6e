//! Error types used across Switchgear.
//!
//! Interlock rejections are deliberately NOT represented here: a denied
//! transition is logged and silently skipped (the device keeps its position),
//! so the caller's `Result` stays `Ok`. Only fatal faults, the class that
//! aborts and unwinds a transaction, carry an error value.
use thiserror::Error;

use super::position::SwitchPosition;

/// Fatal fault raised inside an operation's execute path.
///
/// A fault always propagates to the order executor and triggers a full
/// rollback of everything executed so far in the current transaction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Fault {
    /// A verification operation found the device in an unexpected position.
    #[error("verification failed on {device}: expected {expected}, actual {actual} ({order})")]
    VerificationMismatch {
        device: String,
        expected: SwitchPosition,
        actual: SwitchPosition,
        order: String,
    },
    /// A post-transition hook reported a failure.
    #[error("post-transition hook failed on {device}: {msg} ({order})")]
    Hook {
        device: String,
        order: String,
        msg: String,
    },
    /// An operation failed in a way the engine has no dedicated variant for,
    /// e.g. a concurrent branch panicked.
    #[error("unexpected fault: {0}")]
    Unexpected(String),
}

/// Convenient alias for results returning a `Fault`.
pub type Result<T> = std::result::Result<T, Fault>;
