//! Switching device with an interlock-gated position state machine.
//!
//! A `Device` is created once per physical apparatus and shared as
//! `Arc<Device>` between operations; its position is only ever mutated through
//! [`Device::transition`], never directly. The interlock predicate is
//! evaluated against the *target* position before every change and can be
//! replaced at runtime with topology-dependent logic.
use std::sync::{Mutex, PoisonError};

use log::Level;

use crate::logging::{AuditCtx, StageLogger};
use crate::types::{DeviceType, Fault, Result, SwitchPosition};

/// Verdict of an interlock predicate for a proposed target position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InterlockDecision {
    Allow,
    Deny(String),
}

/// Interlock predicate: target position in, verdict out. Pure from the
/// engine's perspective.
pub type InterlockFn = Box<dyn Fn(SwitchPosition) -> InterlockDecision + Send + Sync>;

/// Hook fired with the order text after every successful transition, used to
/// trigger dependent recalculation elsewhere. An `Err` propagates out of the
/// transition as a fatal fault.
pub type TransitionHook = Box<dyn Fn(&str) -> std::result::Result<(), String> + Send + Sync>;

pub struct Device {
    name: String,
    kind: DeviceType,
    position: Mutex<SwitchPosition>,
    interlock: Mutex<InterlockFn>,
    hook: Mutex<Option<TransitionHook>>,
}

impl Device {
    /// Create a device with a permissive (always-allow) interlock and no hook.
    pub fn new(name: impl Into<String>, kind: DeviceType, initial: SwitchPosition) -> Self {
        Self {
            name: name.into(),
            kind,
            position: Mutex::new(initial),
            interlock: Mutex::new(Box::new(|_| InterlockDecision::Allow)),
            hook: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DeviceType {
        self.kind
    }

    pub fn position(&self) -> SwitchPosition {
        *self
            .position
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the interlock predicate. Allowed at any time, not just at
    /// construction, so the surrounding application can swap in
    /// topology-dependent safety logic.
    pub fn set_interlock(&self, interlock: InterlockFn) {
        *self
            .interlock
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = interlock;
    }

    /// Install or remove the post-transition hook.
    pub fn set_transition_hook(&self, hook: Option<TransitionHook>) {
        *self.hook.lock().unwrap_or_else(PoisonError::into_inner) = hook;
    }

    /// Attempt a transition to `target` on behalf of `order`.
    ///
    /// A denied interlock is NOT an error: the rejection is recorded (fact +
    /// error-level audit line) and the device keeps its position; callers
    /// must not assume the position changed. Only a failing post-transition
    /// hook produces an `Err`.
    pub fn transition(&self, ctx: &AuditCtx<'_>, order: &str, target: SwitchPosition) -> Result<()> {
        let verdict = {
            let interlock = self
                .interlock
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            (*interlock)(target)
        };
        let slog = StageLogger::new(ctx);
        if let InterlockDecision::Deny(reason) = verdict {
            slog.interlock()
                .device(self.name.as_str())
                .order(order)
                .field("target", serde_json::json!(target))
                .field("reason", serde_json::json!(reason.clone()))
                .emit_failure();
            ctx.audit.log(
                Level::Error,
                &format!(
                    "interlock denied {} -> {target} ({order}): {reason}",
                    self.name
                ),
            );
            return Ok(());
        }

        let prev = {
            let mut pos = self
                .position
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let prev = *pos;
            *pos = target;
            prev
        };
        slog.transition()
            .device(self.name.as_str())
            .order(order)
            .field("prev", serde_json::json!(prev))
            .field("target", serde_json::json!(target))
            .emit_success();
        ctx.audit.log(
            Level::Info,
            &format!("{} transitioned {prev} -> {target} ({order})", self.name),
        );

        let hook = self.hook.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(hook) = hook.as_ref() {
            hook(order).map_err(|msg| Fault::Hook {
                device: self.name.clone(),
                order: order.to_string(),
                msg,
            })?;
        }
        Ok(())
    }
}
