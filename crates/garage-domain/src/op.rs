//! Closed set of vehicle operations

use serde::{Deserialize, Serialize};

/// Operation kinds the fleet store can dispatch to the selected vehicle.
///
/// Amounts are optional where the vehicle has a per-variant default step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleOp {
    PowerOn,
    PowerOff,
    Honk,
    Accelerate(Option<u32>),
    Brake(Option<u32>),
    EngageTurbo,
    DisengageTurbo,
    LoadCargo(u32),
    UnloadCargo(u32),
}
