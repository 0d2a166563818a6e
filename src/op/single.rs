use std::sync::{Arc, Mutex, PoisonError};

use log::Level;

use super::Operation;
use crate::constants::ROLLBACK_ORDER_PREFIX;
use crate::device::Device;
use crate::logging::AuditCtx;
use crate::types::{Result, SwitchPosition};

/// Drives one device to a target position on behalf of a switching order.
///
/// The position immediately before execution is cached so `undo` can restore
/// it. The restore goes back through the interlock: if the interlock has
/// since changed its mind, the rollback is silently denied like any other
/// transition (accepted tension between forward safety and rollback safety).
pub struct SwitchOperation {
    device: Arc<Device>,
    target: SwitchPosition,
    order: String,
    prev: Mutex<Option<SwitchPosition>>,
}

impl SwitchOperation {
    pub fn new(device: Arc<Device>, target: SwitchPosition, order: impl Into<String>) -> Self {
        Self {
            device,
            target,
            order: order.into(),
            prev: Mutex::new(None),
        }
    }
}

impl Operation for SwitchOperation {
    fn execute(&self, ctx: &AuditCtx<'_>) -> Result<()> {
        // Snapshot before the transition; an interlock denial leaves the
        // position as-is, in which case undo restores the identical value.
        *self.prev.lock().unwrap_or_else(PoisonError::into_inner) = Some(self.device.position());
        self.device.transition(ctx, &self.order, self.target)
    }

    fn undo(&self, ctx: &AuditCtx<'_>) {
        let prev = self
            .prev
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(prev) = prev else {
            // Never executed; nothing to compensate.
            return;
        };
        let order = format!("{ROLLBACK_ORDER_PREFIX} {}", self.order);
        if let Err(fault) = self.device.transition(ctx, &order, prev) {
            // Undo has no fault channel of its own; record and move on so the
            // rest of the stack still unwinds.
            ctx.audit.log(
                Level::Error,
                &format!("rollback transition failed on {}: {fault}", self.device.name()),
            );
        }
    }

    fn describe(&self) -> String {
        format!("switch {} -> {} ({})", self.device.name(), self.target, self.order)
    }
}
