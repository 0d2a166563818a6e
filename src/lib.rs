#![forbid(unsafe_code)]
//! Switchgear: transactional, interlock-gated execution of switching orders.
//!
//! Safety model highlights:
//! - Every device transition passes through the device's interlock predicate;
//!   a denied transition leaves state untouched and is recorded as a fact.
//! - An order runs as one transaction: executed operations land on an undo
//!   stack, and any fatal fault unwinds the stack in reverse before the fault
//!   is surfaced to the caller.
//! - Concurrent groups join all branches before a fault propagates; undo is
//!   always sequential and reverse-ordered.

pub mod api;
pub mod constants;
pub mod device;
pub mod logging;
pub mod op;
pub mod types;

pub use api::*;
