//! One-shot switching helpers outside a transaction.
//!
//! Each helper builds the corresponding single-device operation and executes
//! it immediately against a fresh audit context; no executor or undo stack is
//! involved.

use std::sync::Arc;

use crate::device::Device;
use crate::logging::{AuditCtx, AuditSink, FactsEmitter};
use crate::op::{Operation, SwitchOperation};
use crate::types::{ids, Result, SwitchPosition};

/// Close the device (drive it to `On`) immediately.
pub fn turn_on(
    device: &Arc<Device>,
    order: &str,
    facts: &dyn FactsEmitter,
    audit: &dyn AuditSink,
) -> Result<()> {
    switch_now(device, SwitchPosition::On, order, facts, audit)
}

/// Open the device (drive it to `Off`) immediately.
pub fn turn_off(
    device: &Arc<Device>,
    order: &str,
    facts: &dyn FactsEmitter,
    audit: &dyn AuditSink,
) -> Result<()> {
    switch_now(device, SwitchPosition::Off, order, facts, audit)
}

fn switch_now(
    device: &Arc<Device>,
    target: SwitchPosition,
    order: &str,
    facts: &dyn FactsEmitter,
    audit: &dyn AuditSink,
) -> Result<()> {
    let op = SwitchOperation::new(Arc::clone(device), target, order);
    let desc = op.describe();
    let order_uuid = ids::order_id([desc.as_str()]);
    let ctx = AuditCtx::new(facts, audit, order_uuid.to_string());
    op.execute(&ctx)
}
