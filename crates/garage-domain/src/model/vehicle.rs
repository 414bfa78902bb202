//! Vehicle variants and their state machine
//!
//! The vehicle hierarchy is a closed set of tagged variants sharing the
//! common identity/ignition/maintenance state. Every mutating operation
//! returns an [`ActionOutcome`] with an explicit severity; refused
//! operations leave the vehicle untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::MaintenanceRecord;
use crate::op::VehicleOp;
use garage_types::ActionOutcome;

const BASE_MAX_SPEED: u32 = 180;
const CAR_MAX_SPEED: u32 = 200;
const SPORTS_CAR_MAX_SPEED: u32 = 320;
const TRUCK_MAX_SPEED: u32 = 140;

const CAR_ACCEL_STEP: u32 = 10;
const SPORTS_CAR_ACCEL_STEP: u32 = 25;
const TRUCK_ACCEL_STEP: u32 = 8;
const BRAKE_STEP: u32 = 10;

const TURBO_FACTOR: f64 = 1.8;

/// Closed set of vehicle variants with their variant-specific state
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum VehicleKind {
    Base,
    Car {
        speed: u32,
    },
    SportsCar {
        speed: u32,
        turbo_engaged: bool,
    },
    Truck {
        speed: u32,
        cargo_capacity: u32,
        current_cargo: u32,
    },
}

/// A vehicle in the fleet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub model: String,
    pub color: String,
    pub powered_on: bool,
    /// Kept sorted by date, most recent first
    pub maintenance_log: Vec<MaintenanceRecord>,
    pub kind: VehicleKind,
}

impl Vehicle {
    pub fn base(model: impl Into<String>, color: impl Into<String>) -> Self {
        Self::with_kind(model, color, VehicleKind::Base)
    }

    pub fn car(model: impl Into<String>, color: impl Into<String>) -> Self {
        Self::with_kind(model, color, VehicleKind::Car { speed: 0 })
    }

    pub fn sports_car(model: impl Into<String>, color: impl Into<String>) -> Self {
        Self::with_kind(
            model,
            color,
            VehicleKind::SportsCar {
                speed: 0,
                turbo_engaged: false,
            },
        )
    }

    pub fn truck(
        model: impl Into<String>,
        color: impl Into<String>,
        cargo_capacity: u32,
    ) -> Self {
        Self::with_kind(
            model,
            color,
            VehicleKind::Truck {
                speed: 0,
                cargo_capacity,
                current_cargo: 0,
            },
        )
    }

    fn with_kind(model: impl Into<String>, color: impl Into<String>, kind: VehicleKind) -> Self {
        Self {
            model: model.into(),
            color: color.into(),
            powered_on: false,
            maintenance_log: Vec::new(),
            kind,
        }
    }

    /// Rebuild a vehicle from persisted state.
    ///
    /// Speed and cargo are clamped back into range and the maintenance log
    /// is re-sorted, so the vehicle invariants hold even for hand-edited
    /// store files.
    pub fn restore(
        model: String,
        color: String,
        powered_on: bool,
        maintenance_log: Vec<MaintenanceRecord>,
        kind: VehicleKind,
    ) -> Self {
        let mut vehicle = Self {
            model,
            color,
            powered_on,
            maintenance_log,
            kind,
        };
        let max = vehicle.max_speed();
        if let Some(speed) = vehicle.speed_mut() {
            if *speed > max {
                *speed = max;
            }
        }
        if let VehicleKind::Truck {
            cargo_capacity,
            current_cargo,
            ..
        } = &mut vehicle.kind
        {
            if *current_cargo > *cargo_capacity {
                *current_cargo = *cargo_capacity;
            }
        }
        vehicle
            .maintenance_log
            .sort_by(|a, b| b.date.cmp(&a.date));
        vehicle
    }

    /// Display name of the variant
    pub fn variant_name(&self) -> &'static str {
        match self.kind {
            VehicleKind::Base => "Vehicle",
            VehicleKind::Car { .. } => "Car",
            VehicleKind::SportsCar { .. } => "Sports Car",
            VehicleKind::Truck { .. } => "Truck",
        }
    }

    /// Top speed in km/h; a per-variant constant, never persisted
    pub fn max_speed(&self) -> u32 {
        match self.kind {
            VehicleKind::Base => BASE_MAX_SPEED,
            VehicleKind::Car { .. } => CAR_MAX_SPEED,
            VehicleKind::SportsCar { .. } => SPORTS_CAR_MAX_SPEED,
            VehicleKind::Truck { .. } => TRUCK_MAX_SPEED,
        }
    }

    /// Current speed in km/h; None for the base variant, which has no
    /// motion state
    pub fn speed(&self) -> Option<u32> {
        match self.kind {
            VehicleKind::Base => None,
            VehicleKind::Car { speed }
            | VehicleKind::SportsCar { speed, .. }
            | VehicleKind::Truck { speed, .. } => Some(speed),
        }
    }

    fn speed_mut(&mut self) -> Option<&mut u32> {
        match &mut self.kind {
            VehicleKind::Base => None,
            VehicleKind::Car { speed }
            | VehicleKind::SportsCar { speed, .. }
            | VehicleKind::Truck { speed, .. } => Some(speed),
        }
    }

    /// Apply one operation; the single dispatch point used by the fleet
    /// store across all variants
    pub fn apply(&mut self, op: VehicleOp) -> ActionOutcome {
        match op {
            VehicleOp::PowerOn => self.power_on(),
            VehicleOp::PowerOff => self.power_off(),
            VehicleOp::Honk => self.honk(),
            VehicleOp::Accelerate(amount) => self.accelerate(amount),
            VehicleOp::Brake(amount) => self.brake(amount),
            VehicleOp::EngageTurbo => self.engage_turbo(),
            VehicleOp::DisengageTurbo => self.disengage_turbo(),
            VehicleOp::LoadCargo(weight) => self.load_cargo(weight),
            VehicleOp::UnloadCargo(weight) => self.unload_cargo(weight),
        }
    }

    pub fn power_on(&mut self) -> ActionOutcome {
        if self.powered_on {
            return ActionOutcome::warning(format!(
                "{} '{}' is already powered on.",
                self.variant_name(),
                self.model
            ));
        }
        self.powered_on = true;
        ActionOutcome::success(format!(
            "{} '{}' powered on.",
            self.variant_name(),
            self.model
        ))
    }

    /// Power off; refused while the vehicle is moving
    pub fn power_off(&mut self) -> ActionOutcome {
        if !self.powered_on {
            return ActionOutcome::warning(format!(
                "{} '{}' is already powered off.",
                self.variant_name(),
                self.model
            ));
        }
        if let Some(speed) = self.speed() {
            if speed > 0 {
                return ActionOutcome::error(format!(
                    "{} '{}' cannot be powered off while moving ({} km/h). Stop first.",
                    self.variant_name(),
                    self.model,
                    speed
                ));
            }
        }
        self.powered_on = false;
        ActionOutcome::success(format!(
            "{} '{}' powered off.",
            self.variant_name(),
            self.model
        ))
    }

    pub fn honk(&self) -> ActionOutcome {
        if !self.powered_on {
            return ActionOutcome::error(format!(
                "{} '{}' must be powered on to honk.",
                self.variant_name(),
                self.model
            ));
        }
        let horn = match self.kind {
            VehicleKind::Base => "Beep! Beep!",
            VehicleKind::Car { .. } => "Honk! Honk!",
            VehicleKind::SportsCar { .. } => "Vroom! Pa-pa-pa!",
            VehicleKind::Truck { .. } => "HOOONK! HOOONK!",
        };
        ActionOutcome::success(format!(
            "{} '{}': {}",
            self.variant_name(),
            self.model,
            horn
        ))
    }

    /// Increase speed by the given amount (or the variant default),
    /// clamping at the variant's top speed
    pub fn accelerate(&mut self, amount: Option<u32>) -> ActionOutcome {
        let effective = match self.effective_acceleration(amount) {
            Some(effective) => effective,
            None => return self.unsupported("accelerate"),
        };
        if !self.powered_on {
            return ActionOutcome::error(format!(
                "{} '{}' is powered off. Cannot accelerate.",
                self.variant_name(),
                self.model
            ));
        }

        let max = self.max_speed();
        let name = self.variant_name();
        let current = self.speed().unwrap_or(0);
        let target = current.saturating_add(effective);
        if target > max {
            if let Some(speed) = self.speed_mut() {
                *speed = max;
            }
            return ActionOutcome::warning(format!(
                "{} '{}' reached its maximum speed of {} km/h.",
                name, self.model, max
            ));
        }
        if let Some(speed) = self.speed_mut() {
            *speed = target;
        }

        let message = match self.kind {
            VehicleKind::SportsCar {
                turbo_engaged: true,
                ..
            } => format!(
                "{} '{}' accelerating with turbo to {} km/h.",
                name, self.model, target
            ),
            VehicleKind::Truck { current_cargo, .. } => format!(
                "{} '{}' accelerating to {} km/h (cargo: {} kg).",
                name, self.model, target, current_cargo
            ),
            _ => format!("{} '{}' accelerating to {} km/h.", name, self.model, target),
        };
        ActionOutcome::success(message)
    }

    /// Decrease speed by the given amount (or the default step), floor 0
    pub fn brake(&mut self, amount: Option<u32>) -> ActionOutcome {
        if matches!(self.kind, VehicleKind::Base) {
            return self.unsupported("brake");
        }
        if !self.powered_on {
            return ActionOutcome::error(format!(
                "{} '{}' is powered off.",
                self.variant_name(),
                self.model
            ));
        }
        let name = self.variant_name();
        let current = self.speed().unwrap_or(0);
        if current == 0 {
            return ActionOutcome::warning(format!(
                "{} '{}' is already stopped.",
                name, self.model
            ));
        }
        let target = current.saturating_sub(amount.unwrap_or(BRAKE_STEP));
        if let Some(speed) = self.speed_mut() {
            *speed = target;
        }
        ActionOutcome::success(format!(
            "{} '{}' braking to {} km/h.",
            name, self.model, target
        ))
    }

    pub fn engage_turbo(&mut self) -> ActionOutcome {
        match &mut self.kind {
            VehicleKind::SportsCar { turbo_engaged, .. } => {
                if !self.powered_on {
                    return ActionOutcome::error(format!(
                        "'{}' is powered off. Cannot engage the turbo.",
                        self.model
                    ));
                }
                if *turbo_engaged {
                    return ActionOutcome::warning(format!(
                        "Turbo is already engaged on '{}'.",
                        self.model
                    ));
                }
                *turbo_engaged = true;
                ActionOutcome::success(format!("Turbo engaged on '{}'!", self.model))
            }
            _ => self.unsupported("turbo-on"),
        }
    }

    pub fn disengage_turbo(&mut self) -> ActionOutcome {
        match &mut self.kind {
            VehicleKind::SportsCar { turbo_engaged, .. } => {
                if !*turbo_engaged {
                    return ActionOutcome::warning(format!(
                        "Turbo is already disengaged on '{}'.",
                        self.model
                    ));
                }
                *turbo_engaged = false;
                ActionOutcome::success(format!("Turbo disengaged on '{}'.", self.model))
            }
            _ => self.unsupported("turbo-off"),
        }
    }

    /// Load cargo; the truck must be powered off and the total must stay
    /// within capacity
    pub fn load_cargo(&mut self, weight: u32) -> ActionOutcome {
        match &mut self.kind {
            VehicleKind::Truck {
                cargo_capacity,
                current_cargo,
                ..
            } => {
                if self.powered_on {
                    return ActionOutcome::error(
                        "Power off the truck before loading or unloading.",
                    );
                }
                if weight == 0 {
                    return ActionOutcome::error("Cargo weight must be positive.");
                }
                if current_cargo.saturating_add(weight) > *cargo_capacity {
                    let headroom = *cargo_capacity - *current_cargo;
                    return ActionOutcome::error(format!(
                        "Cargo capacity ({} kg) exceeded. You can load {} kg more.",
                        cargo_capacity, headroom
                    ));
                }
                *current_cargo += weight;
                ActionOutcome::success(format!(
                    "'{}' loaded with {} kg. Total cargo: {} kg.",
                    self.model, weight, current_cargo
                ))
            }
            _ => self.unsupported("load"),
        }
    }

    /// Unload cargo; the truck must be powered off and cannot go below
    /// empty
    pub fn unload_cargo(&mut self, weight: u32) -> ActionOutcome {
        match &mut self.kind {
            VehicleKind::Truck { current_cargo, .. } => {
                if self.powered_on {
                    return ActionOutcome::error(
                        "Power off the truck before loading or unloading.",
                    );
                }
                if weight == 0 {
                    return ActionOutcome::error("Cargo weight must be positive.");
                }
                if weight > *current_cargo {
                    return ActionOutcome::error(format!(
                        "Cannot unload {} kg. Current cargo: {} kg.",
                        weight, current_cargo
                    ));
                }
                *current_cargo -= weight;
                ActionOutcome::success(format!(
                    "'{}' unloaded {} kg. Remaining cargo: {} kg.",
                    self.model, weight, current_cargo
                ))
            }
            _ => self.unsupported("unload"),
        }
    }

    /// Validate and append a maintenance record, keeping the log sorted
    /// most recent first. Returns false (and changes nothing) for an
    /// invalid record.
    pub fn add_maintenance(&mut self, record: MaintenanceRecord) -> bool {
        if !record.is_valid() {
            return false;
        }
        self.maintenance_log.push(record);
        self.maintenance_log
            .sort_by(|a, b| b.date.cmp(&a.date));
        true
    }

    /// Formatted maintenance entries, filtered at day granularity against
    /// the caller's notion of today: scheduled services (`upcoming`) or
    /// past history
    pub fn maintenance_entries(
        &self,
        upcoming: bool,
        today: NaiveDate,
    ) -> impl Iterator<Item = String> + '_ {
        self.maintenance_log
            .iter()
            .filter(move |record| {
                if upcoming {
                    record.date >= today
                } else {
                    record.date < today
                }
            })
            .map(MaintenanceRecord::format)
    }

    /// Multi-line human-readable summary of the vehicle
    pub fn describe(&self) -> String {
        let state = if self.powered_on {
            "powered on"
        } else {
            "powered off"
        };
        let mut info = format!(
            "== {}: {} ==\nColor: {}\nState: {}",
            self.variant_name(),
            self.model,
            self.color,
            state
        );
        if let Some(speed) = self.speed() {
            info.push_str(&format!(
                "\nSpeed: {} km/h (max: {} km/h)",
                speed,
                self.max_speed()
            ));
        }
        match self.kind {
            VehicleKind::SportsCar { turbo_engaged, .. } => {
                info.push_str(&format!(
                    "\nTurbo: {}",
                    if turbo_engaged { "engaged" } else { "disengaged" }
                ));
            }
            VehicleKind::Truck {
                cargo_capacity,
                current_cargo,
                ..
            } => {
                info.push_str(&format!(
                    "\nCargo: {} kg / {} kg",
                    current_cargo, cargo_capacity
                ));
            }
            _ => {}
        }
        info
    }

    /// Speed increment this variant would actually apply; None when the
    /// variant has no motion state
    fn effective_acceleration(&self, amount: Option<u32>) -> Option<u32> {
        match self.kind {
            VehicleKind::Base => None,
            VehicleKind::Car { .. } => Some(amount.unwrap_or(CAR_ACCEL_STEP)),
            VehicleKind::SportsCar { turbo_engaged, .. } => {
                let base = amount.unwrap_or(SPORTS_CAR_ACCEL_STEP);
                if turbo_engaged {
                    Some((base as f64 * TURBO_FACTOR).round() as u32)
                } else {
                    Some(base)
                }
            }
            VehicleKind::Truck {
                cargo_capacity,
                current_cargo,
                ..
            } => {
                let base = amount.unwrap_or(TRUCK_ACCEL_STEP);
                // capacity * 1.1 keeps the division defined for a zero
                // capacity; the factor bottoms out at 0.1 and the step at 1
                let load_factor =
                    (1.0 - current_cargo as f64 / (cargo_capacity as f64 * 1.1)).max(0.1);
                Some(((base as f64 * load_factor).round() as u32).max(1))
            }
        }
    }

    fn unsupported(&self, op: &str) -> ActionOutcome {
        ActionOutcome::error(format!(
            "Operation '{}' is not supported by this {}.",
            op,
            self.variant_name()
        ))
    }
}
