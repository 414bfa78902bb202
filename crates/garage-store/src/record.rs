//! Serialized vehicle records
//!
//! The persisted form of a vehicle is a flat record discriminated by
//! `variantTag`. Runtime-only state (per-variant top speed) is not stored.

use garage_domain::{MaintenanceRecord, Vehicle, VehicleKind};
use serde::{Deserialize, Serialize};

const TAG_VEHICLE: &str = "Vehicle";
const TAG_CAR: &str = "Car";
const TAG_SPORTS_CAR: &str = "SportsCar";
const TAG_TRUCK: &str = "Truck";

/// Flat persisted form of a vehicle
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub variant_tag: String,
    pub model: String,
    pub color: String,
    #[serde(default)]
    pub powered_on: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turbo_engaged: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_cargo: Option<u32>,
    #[serde(default)]
    pub maintenance_log: Vec<MaintenanceRecord>,
}

impl From<&Vehicle> for VehicleRecord {
    fn from(vehicle: &Vehicle) -> Self {
        let (variant_tag, speed, turbo_engaged, cargo_capacity, current_cargo) =
            match vehicle.kind {
                VehicleKind::Base => (TAG_VEHICLE, None, None, None, None),
                VehicleKind::Car { speed } => (TAG_CAR, Some(speed), None, None, None),
                VehicleKind::SportsCar {
                    speed,
                    turbo_engaged,
                } => (TAG_SPORTS_CAR, Some(speed), Some(turbo_engaged), None, None),
                VehicleKind::Truck {
                    speed,
                    cargo_capacity,
                    current_cargo,
                } => (
                    TAG_TRUCK,
                    Some(speed),
                    None,
                    Some(cargo_capacity),
                    Some(current_cargo),
                ),
            };
        Self {
            variant_tag: variant_tag.to_string(),
            model: vehicle.model.clone(),
            color: vehicle.color.clone(),
            powered_on: vehicle.powered_on,
            speed,
            turbo_engaged,
            cargo_capacity,
            current_cargo,
            maintenance_log: vehicle.maintenance_log.clone(),
        }
    }
}

impl VehicleRecord {
    /// Rebuild the runtime vehicle from this record.
    ///
    /// Total over every input: missing fields default, an unknown tag is
    /// logged and re-hydrated as the base variant with its common fields
    /// and maintenance log intact.
    pub fn into_vehicle(self) -> Vehicle {
        let kind = match self.variant_tag.as_str() {
            TAG_VEHICLE => VehicleKind::Base,
            TAG_CAR => VehicleKind::Car {
                speed: self.speed.unwrap_or(0),
            },
            TAG_SPORTS_CAR => VehicleKind::SportsCar {
                speed: self.speed.unwrap_or(0),
                turbo_engaged: self.turbo_engaged.unwrap_or(false),
            },
            TAG_TRUCK => VehicleKind::Truck {
                speed: self.speed.unwrap_or(0),
                cargo_capacity: self.cargo_capacity.unwrap_or(0),
                current_cargo: self.current_cargo.unwrap_or(0),
            },
            other => {
                log::warn!(
                    "Unknown vehicle tag '{}' in saved data; loading '{}' as a base vehicle",
                    other,
                    self.model
                );
                VehicleKind::Base
            }
        };
        Vehicle::restore(
            self.model,
            self.color,
            self.powered_on,
            self.maintenance_log,
            kind,
        )
    }
}
