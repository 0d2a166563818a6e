//! Shared test helpers for the switchgear crate integration tests.

use std::sync::{Arc, Mutex};

use log::Level;
use serde_json::Value;

use switchgear::device::Device;
use switchgear::logging::{AuditSink, FactsEmitter};
use switchgear::types::{DeviceType, SwitchPosition};

/// A simple in-memory emitter to capture facts during tests.
#[derive(Clone, Default, Debug)]
pub struct TestEmitter {
    pub events: Arc<Mutex<Vec<(String, String, String, Value)>>>,
}

impl FactsEmitter for TestEmitter {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value) {
        self.events
            .lock()
            .unwrap()
            .push((subsystem.into(), event.into(), decision.into(), fields));
    }
}

impl TestEmitter {
    /// All captured facts for a given event name.
    #[allow(dead_code)]
    pub fn events_named(&self, event: &str) -> Vec<(String, Value)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, e, _, _)| e == event)
            .map(|(_, _, d, f)| (d.clone(), f.clone()))
            .collect()
    }
}

/// A no-op audit sink for tests.
#[derive(Clone, Default)]
pub struct TestAudit;

impl AuditSink for TestAudit {
    fn log(&self, _level: Level, _msg: &str) {}
}

/// Circuit breaker with a permissive interlock, the usual test subject.
#[allow(dead_code)]
pub fn breaker(name: &str, initial: SwitchPosition) -> Arc<Device> {
    Arc::new(Device::new(name, DeviceType::CircuitBreaker, initial))
}
