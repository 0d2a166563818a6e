//! Deterministic UUIDv5 identifiers for orders and their steps.
//!
//! The UUID namespace is derived from a stable tag (`NS_TAG`) so that
//! `order_id` and `step_id` are reproducible across runs for the same
//! sequence of operation descriptions.
use std::fmt::Write;

use uuid::Uuid;

use crate::constants::NS_TAG;

fn namespace() -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, NS_TAG.as_bytes())
}

/// Compute a deterministic UUIDv5 for an order from its operation
/// descriptions in plan order.
///
/// Two plans whose operations describe themselves identically (including
/// ordering) share the same `order_id`.
#[must_use]
pub fn order_id<'a>(steps: impl IntoIterator<Item = &'a str>) -> Uuid {
    let ns = namespace();
    let mut s = String::new();
    for step in steps {
        s.push_str(step);
        s.push('\n');
    }
    Uuid::new_v5(&ns, s.as_bytes())
}

/// Compute a deterministic UUIDv5 for a step as a function of the order ID,
/// the step's description and its stable position index.
#[must_use]
pub fn step_id(order_id: &Uuid, step: &str, idx: usize) -> Uuid {
    let mut s = String::from(step);
    let _ = write!(s, "#{idx}");
    Uuid::new_v5(order_id, s.as_bytes())
}
