use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of switching device. Immutable per device, set at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceType {
    CircuitBreaker,
    Disconnector,
    EarthingSwitch,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeviceType::CircuitBreaker => "circuit-breaker",
            DeviceType::Disconnector => "disconnector",
            DeviceType::EarthingSwitch => "earthing-switch",
        };
        f.write_str(s)
    }
}

/// Operational position of a switching device.
///
/// No position is terminal and every transition is representable; legality of
/// a given transition is the interlock's concern, not the type's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwitchPosition {
    IntermediateState,
    Off,
    On,
    BadState,
}

impl fmt::Display for SwitchPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SwitchPosition::IntermediateState => "intermediate",
            SwitchPosition::Off => "off",
            SwitchPosition::On => "on",
            SwitchPosition::BadState => "bad-state",
        };
        f.write_str(s)
    }
}
