use std::thread;

use super::Operation;
use crate::logging::AuditCtx;
use crate::types::{Fault, Result};

/// Strictly ordered group of sub-operations.
///
/// Execute runs children in list order; the first fault propagates
/// immediately, leaving later children un-executed. Undo runs every child's
/// undo in reverse list order; children that never executed compensate
/// nothing via their own snapshot guards.
pub struct CompositeOperation {
    ops: Vec<Box<dyn Operation>>,
}

impl CompositeOperation {
    pub fn new(ops: Vec<Box<dyn Operation>>) -> Self {
        Self { ops }
    }

    pub fn push(&mut self, op: Box<dyn Operation>) {
        self.ops.push(op);
    }
}

impl Operation for CompositeOperation {
    fn execute(&self, ctx: &AuditCtx<'_>) -> Result<()> {
        for op in &self.ops {
            op.execute(ctx)?;
        }
        Ok(())
    }

    fn undo(&self, ctx: &AuditCtx<'_>) {
        for op in self.ops.iter().rev() {
            op.undo(ctx);
        }
    }

    fn describe(&self) -> String {
        let inner: Vec<String> = self.ops.iter().map(|op| op.describe()).collect();
        format!("seq[{}]", inner.join("; "))
    }
}

/// Unordered group whose sub-operations run in parallel.
///
/// Execute spawns one worker per child and joins them all before returning;
/// a fault never surfaces while a sibling is still in flight, and there is no
/// cancellation. Callers must keep branches device-disjoint; the engine
/// provides no atomicity across branches touching the same device.
///
/// Undo is sequential, reverse list order, never concurrent, and replays
/// every child regardless of which branches completed before a fault.
pub struct ConcurrentOperation {
    ops: Vec<Box<dyn Operation>>,
}

impl ConcurrentOperation {
    pub fn new(ops: Vec<Box<dyn Operation>>) -> Self {
        Self { ops }
    }

    pub fn push(&mut self, op: Box<dyn Operation>) {
        self.ops.push(op);
    }
}

impl Operation for ConcurrentOperation {
    fn execute(&self, ctx: &AuditCtx<'_>) -> Result<()> {
        let mut results: Vec<Result<()>> = Vec::with_capacity(self.ops.len());
        thread::scope(|s| {
            let handles: Vec<_> = self
                .ops
                .iter()
                .map(|op| s.spawn(move || op.execute(ctx)))
                .collect();
            for handle in handles {
                results.push(handle.join().unwrap_or_else(|_| {
                    Err(Fault::Unexpected("concurrent branch panicked".to_string()))
                }));
            }
        });
        // All branches have finished; surface the first fault in list order.
        results.into_iter().find(|r| r.is_err()).unwrap_or(Ok(()))
    }

    fn undo(&self, ctx: &AuditCtx<'_>) {
        for op in self.ops.iter().rev() {
            op.undo(ctx);
        }
    }

    fn describe(&self) -> String {
        let inner: Vec<String> = self.ops.iter().map(|op| op.describe()).collect();
        format!("par[{}]", inner.join("; "))
    }
}
