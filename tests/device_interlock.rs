//! Device-level behavior: interlock gating, idempotent transitions, hooks.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use common::{breaker, TestAudit, TestEmitter};
use switchgear::device::{Device, InterlockDecision};
use switchgear::logging::AuditCtx;
use switchgear::types::{DeviceType, Fault, SwitchPosition};

fn ctx<'a>(facts: &'a TestEmitter, audit: &'a TestAudit) -> AuditCtx<'a> {
    AuditCtx::new(facts, audit, "test-order".to_string())
}

#[test]
fn denied_transition_leaves_position_unchanged_and_emits_rejection() {
    let facts = TestEmitter::default();
    let audit = TestAudit;
    let dev = breaker("BR-7", SwitchPosition::Off);
    dev.set_interlock(Box::new(|_| {
        InterlockDecision::Deny("earthing switch still closed".to_string())
    }));

    let c = ctx(&facts, &audit);
    // A denial is a silent no-op, not a fault.
    dev.transition(&c, "close BR-7", SwitchPosition::On).unwrap();
    assert_eq!(dev.position(), SwitchPosition::Off);

    let rejections = facts.events_named("interlock");
    assert_eq!(rejections.len(), 1);
    let (decision, fields) = &rejections[0];
    assert_eq!(decision, "failure");
    assert_eq!(fields["device"], "BR-7");
    assert_eq!(fields["reason"], "earthing switch still closed");
    assert!(facts.events_named("transition").is_empty());
}

#[test]
fn repeated_denials_never_move_the_device() {
    let facts = TestEmitter::default();
    let audit = TestAudit;
    let dev = breaker("BR-7", SwitchPosition::Off);
    dev.set_interlock(Box::new(|_| InterlockDecision::Deny("locked out".to_string())));

    let c = ctx(&facts, &audit);
    for target in [
        SwitchPosition::On,
        SwitchPosition::IntermediateState,
        SwitchPosition::BadState,
        SwitchPosition::On,
    ] {
        dev.transition(&c, "attempt", target).unwrap();
        assert_eq!(dev.position(), SwitchPosition::Off);
    }
    assert_eq!(facts.events_named("interlock").len(), 4);
}

#[test]
fn allowed_transition_updates_position_and_emits_transition_fact() {
    let facts = TestEmitter::default();
    let audit = TestAudit;
    let dev = breaker("BR-1", SwitchPosition::Off);

    let c = ctx(&facts, &audit);
    dev.transition(&c, "close BR-1", SwitchPosition::On).unwrap();
    assert_eq!(dev.position(), SwitchPosition::On);

    let transitions = facts.events_named("transition");
    assert_eq!(transitions.len(), 1);
    let (decision, fields) = &transitions[0];
    assert_eq!(decision, "success");
    assert_eq!(fields["prev"], "Off");
    assert_eq!(fields["target"], "On");
    assert_eq!(fields["order"], "close BR-1");
}

#[test]
fn transition_to_current_position_is_a_legal_noop_equivalent() {
    let facts = TestEmitter::default();
    let audit = TestAudit;
    let dev = breaker("BR-1", SwitchPosition::On);
    let hook_calls = Arc::new(AtomicUsize::new(0));
    let calls = Arc::clone(&hook_calls);
    dev.set_transition_hook(Some(Box::new(move |_order| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })));

    let c = ctx(&facts, &audit);
    dev.transition(&c, "re-close", SwitchPosition::On).unwrap();

    // Still goes through interlock and hook; position identical before/after.
    assert_eq!(dev.position(), SwitchPosition::On);
    assert_eq!(hook_calls.load(Ordering::SeqCst), 1);
    assert_eq!(facts.events_named("transition").len(), 1);
}

#[test]
fn hook_receives_order_text_and_its_error_is_a_fault() {
    let facts = TestEmitter::default();
    let audit = TestAudit;
    let dev = Arc::new(Device::new(
        "DS-2",
        DeviceType::Disconnector,
        SwitchPosition::Off,
    ));
    let seen = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = Arc::clone(&seen);
    dev.set_transition_hook(Some(Box::new(move |order| {
        sink.lock().unwrap().push(order.to_string());
        Ok(())
    })));

    let c = ctx(&facts, &audit);
    dev.transition(&c, "open DS-2", SwitchPosition::On).unwrap();
    assert_eq!(seen.lock().unwrap().as_slice(), ["open DS-2".to_string()]);

    dev.set_transition_hook(Some(Box::new(|_| Err("recalculation failed".to_string()))));
    let err = dev
        .transition(&c, "open again", SwitchPosition::Off)
        .unwrap_err();
    match err {
        Fault::Hook { device, msg, .. } => {
            assert_eq!(device, "DS-2");
            assert_eq!(msg, "recalculation failed");
        }
        other => panic!("expected hook fault, got {other:?}"),
    }
    // The transition itself happened before the hook fired.
    assert_eq!(dev.position(), SwitchPosition::Off);
}

#[test]
fn interlock_is_replaceable_at_runtime() {
    let facts = TestEmitter::default();
    let audit = TestAudit;
    let dev = breaker("BR-3", SwitchPosition::Off);
    dev.set_interlock(Box::new(|_| InterlockDecision::Deny("topology unsafe".to_string())));

    let c = ctx(&facts, &audit);
    dev.transition(&c, "close", SwitchPosition::On).unwrap();
    assert_eq!(dev.position(), SwitchPosition::Off);

    // Topology changed; the gate opens.
    dev.set_interlock(Box::new(|target| {
        if target == SwitchPosition::BadState {
            InterlockDecision::Deny("never drive into bad-state".to_string())
        } else {
            InterlockDecision::Allow
        }
    }));
    dev.transition(&c, "close", SwitchPosition::On).unwrap();
    assert_eq!(dev.position(), SwitchPosition::On);
    dev.transition(&c, "wreck", SwitchPosition::BadState).unwrap();
    assert_eq!(dev.position(), SwitchPosition::On);
}
