use uuid::Uuid;

/// Life-cycle of one order executor transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecState {
    /// Empty plan, nothing executed.
    Idle,
    /// Iterating the plan.
    Running,
    /// All operations executed; undo stack retained for audit.
    Committed,
    /// A fault occurred and the undo stack was fully unwound.
    RolledBack,
}

/// Outcome of a successfully committed transaction.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Number of operations executed (equals the plan length on success).
    pub executed: usize,
    /// Deterministic ID of the order that ran.
    pub order_uuid: Uuid,
    /// Wall-clock duration of the run.
    pub duration_ms: u64,
}
