//! Persistent store for the vehicle fleet
//!
//! One store per process: an ordered vehicle collection plus a selection
//! cursor, saved to a JSON blob in the store directory after every
//! mutation. Loading dispatches on each record's `variantTag`; a corrupt
//! blob resets the fleet rather than half-loading it.

pub mod record;
pub mod schedule;

pub use record::VehicleRecord;
pub use schedule::{Reminder, ReminderDue, UpcomingAppointment};

use chrono::NaiveDate;
use garage_domain::{MaintenanceRecord, Vehicle, VehicleOp};
use garage_types::{ActionOutcome, Error, Result, VehicleClass};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const FLEET_FILE: &str = "fleet.json";
const SELECTION_FILE: &str = "selection.json";

/// File-backed fleet of vehicles with a selection cursor
pub struct FleetStore {
    fleet_path: PathBuf,
    selection_path: PathBuf,
    vehicles: Vec<Vehicle>,
    selected: Option<usize>,
}

impl FleetStore {
    /// Create or load a store in the given directory.
    ///
    /// A corrupt fleet blob is discarded: the store starts empty and the
    /// broken file is removed so the next save writes a clean one.
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let fleet_path = store_dir.join(FLEET_FILE);
        let selection_path = store_dir.join(SELECTION_FILE);

        let vehicles = if fleet_path.exists() {
            let file = File::open(&fleet_path)?;
            let reader = BufReader::new(file);
            match serde_json::from_reader::<_, Vec<VehicleRecord>>(reader) {
                Ok(records) => records
                    .into_iter()
                    .map(VehicleRecord::into_vehicle)
                    .collect(),
                Err(e) => {
                    log::error!(
                        "Saved fleet data was corrupted and has been reset ({})",
                        e
                    );
                    if let Err(e) = fs::remove_file(&fleet_path) {
                        log::warn!("Could not remove the corrupted fleet file: {}", e);
                    }
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let selected = Self::read_selection(&selection_path, vehicles.len());

        Ok(Self {
            fleet_path,
            selection_path,
            vehicles,
            selected,
        })
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_vehicle(&self) -> Option<&Vehicle> {
        self.selected.map(|index| &self.vehicles[index])
    }

    /// Validate inputs, build the vehicle, append it and persist
    pub fn add_vehicle(
        &mut self,
        class: VehicleClass,
        model: &str,
        color: &str,
        cargo_capacity: Option<u32>,
    ) -> Result<&Vehicle> {
        let model = model.trim();
        let color = color.trim();
        if model.is_empty() || color.is_empty() {
            return Err(Error::Validation(
                "model and color are required".to_string(),
            ));
        }

        let vehicle = match class {
            VehicleClass::Vehicle => Vehicle::base(model, color),
            VehicleClass::Car => Vehicle::car(model, color),
            VehicleClass::SportsCar => Vehicle::sports_car(model, color),
            VehicleClass::Truck => {
                let capacity = cargo_capacity.ok_or_else(|| {
                    Error::Validation("a truck needs a cargo capacity".to_string())
                })?;
                if capacity == 0 {
                    return Err(Error::Validation(
                        "cargo capacity must be a positive number".to_string(),
                    ));
                }
                Vehicle::truck(model, color, capacity)
            }
        };

        self.vehicles.push(vehicle);
        self.persist()?;
        let index = self.vehicles.len() - 1;
        Ok(&self.vehicles[index])
    }

    /// Remove the vehicle at `index`, keeping the selection cursor
    /// consistent: removing the selected vehicle clears it, removing an
    /// earlier one shifts it down
    pub fn remove_vehicle(&mut self, index: usize) -> Result<Vehicle> {
        if index >= self.vehicles.len() {
            return Err(Error::IndexOutOfRange(index));
        }
        let removed = self.vehicles.remove(index);
        match self.selected {
            Some(selected) if selected == index => self.selected = None,
            Some(selected) if selected > index => self.selected = Some(selected - 1),
            _ => {}
        }
        self.persist()?;
        self.persist_selection()?;
        Ok(removed)
    }

    /// Move the selection cursor. An out-of-range index clears the
    /// selection instead of failing. Returns the new cursor.
    pub fn select(&mut self, index: usize) -> Result<Option<usize>> {
        self.selected = if index < self.vehicles.len() {
            Some(index)
        } else {
            None
        };
        self.persist_selection()?;
        Ok(self.selected)
    }

    /// Apply one operation to the selected vehicle and persist.
    ///
    /// Works uniformly across every variant; the vehicle itself decides
    /// whether it supports the operation.
    pub fn dispatch(&mut self, op: VehicleOp) -> Result<ActionOutcome> {
        let index = self.selected.ok_or(Error::NoSelection)?;
        let outcome = self.vehicles[index].apply(op);
        self.persist()?;
        Ok(outcome)
    }

    /// Validate and append a maintenance record on the selected vehicle.
    /// Returns false for an invalid record (nothing is stored).
    pub fn add_maintenance(&mut self, record: MaintenanceRecord) -> Result<bool> {
        let index = self.selected.ok_or(Error::NoSelection)?;
        let added = self.vehicles[index].add_maintenance(record);
        if added {
            self.persist()?;
        }
        Ok(added)
    }

    /// Every scheduled service (`date >= today`) across the fleet, soonest
    /// first
    pub fn upcoming_appointments(&self, today: NaiveDate) -> Vec<UpcomingAppointment> {
        let mut appointments: Vec<_> = self
            .vehicles
            .iter()
            .flat_map(|vehicle| {
                vehicle
                    .maintenance_log
                    .iter()
                    .filter(move |record| record.date >= today)
                    .map(move |record| UpcomingAppointment {
                        vehicle: format!("{} '{}'", vehicle.variant_name(), vehicle.model),
                        date: record.date,
                        details: record.format(),
                    })
            })
            .collect();
        appointments.sort_by_key(|appointment| appointment.date);
        appointments
    }

    /// Services due today or tomorrow
    pub fn reminders(&self, today: NaiveDate) -> Vec<Reminder> {
        let tomorrow = today.succ_opt();
        self.vehicles
            .iter()
            .flat_map(|vehicle| {
                vehicle.maintenance_log.iter().filter_map(move |record| {
                    let due = if record.date == today {
                        ReminderDue::Today
                    } else if Some(record.date) == tomorrow {
                        ReminderDue::Tomorrow
                    } else {
                        return None;
                    };
                    Some(Reminder {
                        due,
                        vehicle: format!("{} '{}'", vehicle.variant_name(), vehicle.model),
                        service_type: record.service_type.clone(),
                    })
                })
            })
            .collect()
    }

    /// Write the fleet blob. The in-memory fleet stays authoritative if
    /// the write fails.
    fn persist(&self) -> Result<()> {
        let records: Vec<VehicleRecord> =
            self.vehicles.iter().map(VehicleRecord::from).collect();
        let file = File::create(&self.fleet_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &records)?;
        Ok(())
    }

    fn persist_selection(&self) -> Result<()> {
        let content = serde_json::to_string(&self.selected)?;
        fs::write(&self.selection_path, content)?;
        Ok(())
    }

    /// Read the persisted cursor; unreadable or out-of-range cursors
    /// collapse to no selection
    fn read_selection(path: &Path, fleet_len: usize) -> Option<usize> {
        let content = fs::read_to_string(path).ok()?;
        let selected: Option<usize> = serde_json::from_str(&content).ok()?;
        selected.filter(|index| *index < fleet_len)
    }
}
