use std::sync::Arc;

use log::Level;

use super::Operation;
use crate::device::Device;
use crate::logging::{AuditCtx, StageLogger};
use crate::types::{Fault, Result, SwitchPosition};

/// Subscriber fired with a human-readable confirmation string after a
/// successful verification.
pub type ConfirmFn = Box<dyn Fn(&str) + Send + Sync>;

/// Asserts that a device sits in a required position.
///
/// A mismatch is a fatal fault and aborts the enclosing transaction; there is
/// no local recovery. Verification mutates nothing, so undo is a no-op.
pub struct VerifyOperation {
    device: Arc<Device>,
    required: SwitchPosition,
    order: String,
    on_confirmed: Option<ConfirmFn>,
}

impl VerifyOperation {
    pub fn new(device: Arc<Device>, required: SwitchPosition, order: impl Into<String>) -> Self {
        Self {
            device,
            required,
            order: order.into(),
            on_confirmed: None,
        }
    }

    /// Subscribe to the confirmation notification.
    pub fn with_confirmation(mut self, f: ConfirmFn) -> Self {
        self.on_confirmed = Some(f);
        self
    }
}

impl Operation for VerifyOperation {
    fn execute(&self, ctx: &AuditCtx<'_>) -> Result<()> {
        let actual = self.device.position();
        let slog = StageLogger::new(ctx);
        if actual == self.required {
            slog.verify()
                .device(self.device.name())
                .order(self.order.as_str())
                .field("expected", serde_json::json!(self.required))
                .emit_success();
            ctx.audit.log(
                Level::Info,
                &format!("{} confirmed {} ({})", self.device.name(), self.required, self.order),
            );
            if let Some(f) = &self.on_confirmed {
                f(&format!(
                    "{} confirmed in position {}",
                    self.device.name(),
                    self.required
                ));
            }
            return Ok(());
        }
        slog.verify()
            .device(self.device.name())
            .order(self.order.as_str())
            .field("expected", serde_json::json!(self.required))
            .field("actual", serde_json::json!(actual))
            .emit_failure();
        Err(Fault::VerificationMismatch {
            device: self.device.name().to_string(),
            expected: self.required,
            actual,
            order: self.order.clone(),
        })
    }

    fn undo(&self, _ctx: &AuditCtx<'_>) {
        // Verification never mutates device state.
    }

    fn describe(&self) -> String {
        format!("verify {} == {} ({})", self.device.name(), self.required, self.order)
    }
}
