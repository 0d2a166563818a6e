pub mod audit;

pub use audit::{now_iso, AuditCtx, Decision, EventBuilder, Stage, StageLogger, TS_ZERO};

use log::Level;
use serde_json::Value;

/// Sink for machine-readable facts. One fact per emitted event, carrying the
/// structured fields of its stage (device, prev/target, order, reason).
///
/// `Send + Sync` is required because concurrent groups execute operations on
/// worker threads that share the emitter by reference.
pub trait FactsEmitter: Send + Sync {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value);
}

/// Sink for human-readable, leveled audit lines.
pub trait AuditSink: Send + Sync {
    fn log(&self, level: Level, msg: &str);
}

/// Default sink: forwards facts as JSON lines and audit messages through the
/// `log` macros, so any `log`-compatible backend can subscribe.
#[derive(Default)]
pub struct JsonlSink;

impl FactsEmitter for JsonlSink {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value) {
        log::debug!(target: "switchgear::facts", "{subsystem} {event} {decision} {fields}");
    }
}

impl AuditSink for JsonlSink {
    fn log(&self, level: Level, msg: &str) {
        log::log!(target: "switchgear::audit", level, "{msg}");
    }
}
