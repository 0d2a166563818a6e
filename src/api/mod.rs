// Facade for API module; delegates to submodules under src/api/

use std::time::Instant;

use log::Level;
use serde_json::json;
use uuid::Uuid;

use crate::logging::{AuditCtx, AuditSink, FactsEmitter, StageLogger};
use crate::op::Operation;
use crate::types::{ids, ExecState, RunReport};

pub mod direct;
pub mod errors;

pub use direct::{turn_off, turn_on};
pub use errors::OrderError;

/// Drives an ordered plan of operations as one transaction.
///
/// Invariant: the undo stack, read bottom-to-top, is always the prefix of the
/// plan that has executed successfully, in order. On any fault the stack is
/// unwound top-to-bottom before the fault is surfaced; a committed
/// transaction retains the stack for audit until `clear`.
pub struct OrderExecutor<E: FactsEmitter, A: AuditSink> {
    facts: E,
    audit: A,
    plan: Vec<Box<dyn Operation>>,
    undo_stack: Vec<usize>,
    state: ExecState,
}

impl<E: FactsEmitter, A: AuditSink> OrderExecutor<E, A> {
    pub fn new(facts: E, audit: A) -> Self {
        Self {
            facts,
            audit,
            plan: Vec::new(),
            undo_stack: Vec::new(),
            state: ExecState::Idle,
        }
    }

    /// Append an operation to the plan.
    pub fn append(&mut self, op: Box<dyn Operation>) {
        self.plan.push(op);
    }

    pub fn state(&self) -> ExecState {
        self.state
    }

    pub fn plan_len(&self) -> usize {
        self.plan.len()
    }

    /// Depth of the undo stack (successfully executed operations of the
    /// current or last transaction).
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Deterministic ID of the current plan.
    pub fn order_uuid(&self) -> Uuid {
        let steps: Vec<String> = self.plan.iter().map(|op| op.describe()).collect();
        ids::order_id(steps.iter().map(String::as_str))
    }

    /// Run the plan as one transaction.
    ///
    /// Operations execute in plan order; each success lands on the undo
    /// stack. The first fault stops the advance, unwinds the stack in
    /// reverse, and is returned once with full context; no automatic retry.
    /// Interlock rejections inside operations are not faults and do not
    /// interrupt the plan.
    pub fn run(&mut self) -> Result<RunReport, OrderError> {
        let t0 = Instant::now();
        let steps: Vec<String> = self.plan.iter().map(|op| op.describe()).collect();
        let order_uuid = ids::order_id(steps.iter().map(String::as_str));
        let ctx = AuditCtx::new(&self.facts, &self.audit, order_uuid.to_string());
        let slog = StageLogger::new(&ctx);

        self.state = ExecState::Running;
        self.undo_stack.clear();
        self.audit
            .log(Level::Info, &format!("order {order_uuid}: starting ({} steps)", steps.len()));

        for (idx, op) in self.plan.iter().enumerate() {
            slog.execute_attempt()
                .step(idx)
                .field("op", json!(steps[idx]))
                .field("step_id", json!(ids::step_id(&order_uuid, &steps[idx], idx).to_string()))
                .emit_success();
            match op.execute(&ctx) {
                Ok(()) => self.undo_stack.push(idx),
                Err(fault) => {
                    self.audit.log(
                        Level::Error,
                        &format!("order {order_uuid}: fault at step {idx}: {fault}; rolling back"),
                    );
                    slog.execute_result()
                        .step(idx)
                        .field("op", json!(steps[idx]))
                        .field("error", json!(fault.to_string()))
                        .emit_failure();

                    let unwound = self.undo_stack.len();
                    for &done in self.undo_stack.iter().rev() {
                        self.plan[done].undo(&ctx);
                        slog.rollback()
                            .step(done)
                            .field("op", json!(steps[done]))
                            .emit_success();
                    }
                    self.undo_stack.clear();
                    slog.rollback_summary()
                        .field("unwound", json!(unwound))
                        .emit_success();
                    self.audit
                        .log(Level::Info, &format!("order {order_uuid}: rollback complete"));

                    self.state = ExecState::RolledBack;
                    return Err(OrderError {
                        order_uuid,
                        step: idx,
                        fault,
                        rolled_back: true,
                    });
                }
            }
        }

        let executed = self.undo_stack.len();
        let duration_ms = u64::try_from(t0.elapsed().as_millis()).unwrap_or(u64::MAX);
        slog.execute_result()
            .field("executed", json!(executed))
            .field("duration_ms", json!(duration_ms))
            .emit_success();
        self.audit
            .log(Level::Info, &format!("order {order_uuid}: committed"));
        self.state = ExecState::Committed;
        Ok(RunReport {
            executed,
            order_uuid,
            duration_ms,
        })
    }

    /// Discard the plan and the undo stack unconditionally. Never invokes
    /// undo; used between transactions.
    pub fn clear(&mut self) {
        let order_uuid = self.order_uuid();
        let ctx = AuditCtx::new(&self.facts, &self.audit, order_uuid.to_string());
        let slog = StageLogger::new(&ctx);
        slog.plan_cleared()
            .field("discarded_plan", json!(self.plan.len()))
            .field("discarded_undo", json!(self.undo_stack.len()))
            .emit_success();
        self.audit
            .log(Level::Info, &format!("order {order_uuid}: plan cleared"));
        self.plan.clear();
        self.undo_stack.clear();
        self.state = ExecState::Idle;
    }
}
