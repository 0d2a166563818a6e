// Audit helpers that emit structured facts across Switchgear stages.
//
// Side-effects:
// - Emits JSON facts via `FactsEmitter` for the following stages:
//   `transition`, `interlock`, `verify`, `execute.attempt`, `execute.result`,
//   `rollback` steps, `rollback.summary`, and `plan.cleared`.
// - Ensures a minimal envelope is present on every fact: `schema_version`,
//   `ts`, `order_id`, `stage`, `decision`.
use serde_json::{json, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use super::FactsEmitter;
use crate::constants::SUBSYSTEM;

pub(crate) const SCHEMA_VERSION: i64 = 1;

pub const TS_ZERO: &str = "1970-01-01T00:00:00Z";

pub fn now_iso() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| TS_ZERO.to_string())
}

/// Per-transaction emission context: the facts sink, the audit sink, and the
/// deterministic order ID stamped on every fact.
///
/// Passed by reference through every operation's execute/undo; a fresh one is
/// built per transaction (or per one-shot operation) rather than mutating any
/// shared logger state.
pub struct AuditCtx<'a> {
    pub facts: &'a dyn FactsEmitter,
    pub audit: &'a dyn super::AuditSink,
    pub order_id: String,
    pub ts: String,
}

impl<'a> AuditCtx<'a> {
    pub fn new(
        facts: &'a dyn FactsEmitter,
        audit: &'a dyn super::AuditSink,
        order_id: String,
    ) -> Self {
        Self {
            facts,
            audit,
            order_id,
            ts: now_iso(),
        }
    }
}

/// Stage for typed audit emission.
#[derive(Clone, Copy, Debug)]
pub enum Stage {
    Transition,
    Interlock,
    Verify,
    ExecuteAttempt,
    ExecuteResult,
    Rollback,
    RollbackSummary,
    PlanCleared,
}

impl Stage {
    fn as_event(&self) -> &'static str {
        match self {
            Stage::Transition => "transition",
            Stage::Interlock => "interlock",
            Stage::Verify => "verify",
            Stage::ExecuteAttempt => "execute.attempt",
            Stage::ExecuteResult => "execute.result",
            Stage::Rollback => "rollback",
            Stage::RollbackSummary => "rollback.summary",
            Stage::PlanCleared => "plan.cleared",
        }
    }
}

/// Decision severity for audit events.
#[derive(Clone, Copy, Debug)]
pub enum Decision {
    Success,
    Failure,
    Warn,
}

impl Decision {
    fn as_str(&self) -> &'static str {
        match self {
            Decision::Success => "success",
            Decision::Failure => "failure",
            Decision::Warn => "warn",
        }
    }
}

/// Builder facade over fact emission with a centralized envelope.
pub struct StageLogger<'a> {
    ctx: &'a AuditCtx<'a>,
}

impl<'a> StageLogger<'a> {
    pub fn new(ctx: &'a AuditCtx<'a>) -> Self {
        Self { ctx }
    }

    pub fn transition(&'a self) -> EventBuilder<'a> {
        EventBuilder::new(self.ctx, Stage::Transition)
    }
    pub fn interlock(&'a self) -> EventBuilder<'a> {
        EventBuilder::new(self.ctx, Stage::Interlock)
    }
    pub fn verify(&'a self) -> EventBuilder<'a> {
        EventBuilder::new(self.ctx, Stage::Verify)
    }
    pub fn execute_attempt(&'a self) -> EventBuilder<'a> {
        EventBuilder::new(self.ctx, Stage::ExecuteAttempt)
    }
    pub fn execute_result(&'a self) -> EventBuilder<'a> {
        EventBuilder::new(self.ctx, Stage::ExecuteResult)
    }
    pub fn rollback(&'a self) -> EventBuilder<'a> {
        EventBuilder::new(self.ctx, Stage::Rollback)
    }
    pub fn rollback_summary(&'a self) -> EventBuilder<'a> {
        EventBuilder::new(self.ctx, Stage::RollbackSummary)
    }
    pub fn plan_cleared(&'a self) -> EventBuilder<'a> {
        EventBuilder::new(self.ctx, Stage::PlanCleared)
    }
}

pub struct EventBuilder<'a> {
    ctx: &'a AuditCtx<'a>,
    stage: Stage,
    fields: serde_json::Map<String, Value>,
}

impl<'a> EventBuilder<'a> {
    fn new(ctx: &'a AuditCtx<'a>, stage: Stage) -> Self {
        let mut fields = serde_json::Map::new();
        fields.insert("stage".to_string(), json!(stage.as_event()));
        Self { ctx, stage, fields }
    }

    pub fn device(mut self, name: impl Into<String>) -> Self {
        self.fields.insert("device".into(), json!(name.into()));
        self
    }

    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.fields.insert("order".into(), json!(order.into()));
        self
    }

    pub fn step(mut self, idx: usize) -> Self {
        self.fields.insert("step".into(), json!(idx));
        self
    }

    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn merge(mut self, extra: Value) -> Self {
        if let Some(obj) = extra.as_object() {
            for (k, v) in obj.iter() {
                self.fields.insert(k.clone(), v.clone());
            }
        }
        self
    }

    pub fn emit(self, decision: Decision) {
        let mut fields = Value::Object(self.fields);
        if let Some(obj) = fields.as_object_mut() {
            obj.entry("schema_version").or_insert(json!(SCHEMA_VERSION));
            obj.entry("ts").or_insert(json!(self.ctx.ts));
            obj.entry("order_id").or_insert(json!(self.ctx.order_id));
            obj.entry("decision").or_insert(json!(decision.as_str()));
        }
        self.ctx
            .facts
            .emit(SUBSYSTEM, self.stage.as_event(), decision.as_str(), fields);
    }

    pub fn emit_success(self) {
        self.emit(Decision::Success)
    }
    pub fn emit_failure(self) {
        self.emit(Decision::Failure)
    }
    pub fn emit_warn(self) {
        self.emit(Decision::Warn)
    }
}
