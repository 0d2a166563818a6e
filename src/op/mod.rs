//! Operation abstraction: reversible units of work over devices.

pub mod group;
pub mod single;
pub mod verify;

pub use group::{CompositeOperation, ConcurrentOperation};
pub use single::SwitchOperation;
pub use verify::VerifyOperation;

use crate::logging::AuditCtx;
use crate::types::Result;

/// A reversible unit of work in the command-execution engine.
///
/// `Send + Sync` because concurrent groups execute sub-operations on worker
/// threads that share them by reference.
pub trait Operation: Send + Sync {
    /// Apply the operation's effect. A returned fault aborts the enclosing
    /// transaction and triggers rollback.
    fn execute(&self, ctx: &AuditCtx<'_>) -> Result<()>;

    /// Compensate a prior `execute`. Must be safe to call when `execute`
    /// never ran or did not complete; in that case nothing is restored.
    fn undo(&self, ctx: &AuditCtx<'_>);

    /// Stable one-line description, used for deterministic order/step IDs
    /// and as a log field.
    fn describe(&self) -> String;
}
