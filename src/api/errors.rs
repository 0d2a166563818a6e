use thiserror::Error;
use uuid::Uuid;

use crate::types::Fault;

/// Terminal failure of one order executor transaction.
///
/// Carries the fault, the 0-indexed step that raised it, and confirmation
/// that the undo stack was unwound. After this error the transaction is
/// closed; retrying requires a fresh plan.
#[derive(Debug, Error)]
#[error("order {order_uuid} faulted at step {step}: {fault}")]
pub struct OrderError {
    pub order_uuid: Uuid,
    pub step: usize,
    pub fault: Fault,
    /// True once the undo stack has been fully unwound.
    pub rolled_back: bool,
}
