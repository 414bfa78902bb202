//! Integration tests for the fleet store round trip

use chrono::NaiveDate;
use garage_domain::{MaintenanceRecord, VehicleKind, VehicleOp};
use garage_store::FleetStore;
use garage_types::{Error, Severity, VehicleClass};
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn populated_store(dir: std::path::PathBuf) -> FleetStore {
    let mut store = FleetStore::open(dir).expect("open store");
    store
        .add_vehicle(VehicleClass::Car, "Beetle", "blue", None)
        .unwrap();
    store
        .add_vehicle(VehicleClass::SportsCar, "Ferrari", "red", None)
        .unwrap();
    store
        .add_vehicle(VehicleClass::Truck, "Scania", "white", Some(1000))
        .unwrap();
    store
}

#[test]
fn test_save_load_round_trip() {
    let dir = tempdir().unwrap();
    {
        let mut store = populated_store(dir.path().to_path_buf());

        // mutate some state through the dispatch point
        store.select(1).unwrap();
        store.dispatch(VehicleOp::PowerOn).unwrap();
        store.dispatch(VehicleOp::EngageTurbo).unwrap();
        store.dispatch(VehicleOp::Accelerate(Some(40))).unwrap();

        store.select(2).unwrap();
        store.dispatch(VehicleOp::LoadCargo(250)).unwrap();
        store
            .add_maintenance(MaintenanceRecord::new(
                date(2026, 9, 1),
                "Oil change",
                300.0,
                Some("full synthetic".to_string()),
            ))
            .unwrap();
    }

    let store = FleetStore::open(dir.path().to_path_buf()).expect("reopen store");
    let vehicles = store.vehicles();
    assert_eq!(vehicles.len(), 3);

    assert_eq!(vehicles[0].variant_name(), "Car");
    assert_eq!(vehicles[0].model, "Beetle");
    assert!(!vehicles[0].powered_on);

    assert!(vehicles[1].powered_on);
    // round(40 * 1.8) = 72 with the turbo engaged
    assert_eq!(
        vehicles[1].kind,
        VehicleKind::SportsCar {
            speed: 72,
            turbo_engaged: true
        }
    );

    assert_eq!(
        vehicles[2].kind,
        VehicleKind::Truck {
            speed: 0,
            cargo_capacity: 1000,
            current_cargo: 250
        }
    );
    assert_eq!(vehicles[2].maintenance_log.len(), 1);
    assert_eq!(vehicles[2].maintenance_log[0].service_type, "Oil change");
    assert_eq!(vehicles[2].maintenance_log[0].date, date(2026, 9, 1));

    // the cursor survives the restart
    assert_eq!(store.selected_index(), Some(2));
}

#[test]
fn test_corrupt_blob_resets_to_empty() {
    let dir = tempdir().unwrap();
    {
        populated_store(dir.path().to_path_buf());
    }
    let fleet_path = dir.path().join("fleet.json");
    std::fs::write(&fleet_path, "{ not valid json").unwrap();

    let store = FleetStore::open(dir.path().to_path_buf()).expect("open after corruption");
    assert!(store.vehicles().is_empty());
    // the broken blob is discarded, not half-loaded
    assert!(!fleet_path.exists());
}

#[test]
fn test_unknown_tag_loads_as_base_vehicle() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("fleet.json"),
        r#"[{
            "variantTag": "Hovercraft",
            "model": "Wave",
            "color": "teal",
            "poweredOn": false,
            "maintenanceLog": [
                {"date": "2026-02-01", "serviceType": "Skirt repair", "cost": 80.0}
            ]
        }]"#,
    )
    .unwrap();

    let store = FleetStore::open(dir.path().to_path_buf()).expect("open store");
    assert_eq!(store.vehicles().len(), 1);
    let vehicle = &store.vehicles()[0];
    assert_eq!(vehicle.kind, VehicleKind::Base);
    assert_eq!(vehicle.model, "Wave");
    assert_eq!(vehicle.maintenance_log.len(), 1);
}

#[test]
fn test_add_vehicle_validation() {
    let dir = tempdir().unwrap();
    let mut store = FleetStore::open(dir.path().to_path_buf()).unwrap();

    assert!(matches!(
        store.add_vehicle(VehicleClass::Car, "  ", "blue", None),
        Err(Error::Validation(_))
    ));
    assert!(matches!(
        store.add_vehicle(VehicleClass::Truck, "Scania", "white", None),
        Err(Error::Validation(_))
    ));
    assert!(matches!(
        store.add_vehicle(VehicleClass::Truck, "Scania", "white", Some(0)),
        Err(Error::Validation(_))
    ));
    assert!(store.vehicles().is_empty());
}

#[test]
fn test_remove_adjusts_selection() {
    let dir = tempdir().unwrap();
    let mut store = populated_store(dir.path().to_path_buf());

    // removing before the selected vehicle shifts the cursor down
    store.select(2).unwrap();
    store.remove_vehicle(0).unwrap();
    assert_eq!(store.selected_index(), Some(1));

    // removing the selected vehicle clears the cursor
    store.remove_vehicle(1).unwrap();
    assert_eq!(store.selected_index(), None);
    assert_eq!(store.vehicles().len(), 1);
}

#[test]
fn test_remove_out_of_range() {
    let dir = tempdir().unwrap();
    let mut store = populated_store(dir.path().to_path_buf());
    assert!(matches!(
        store.remove_vehicle(7),
        Err(Error::IndexOutOfRange(7))
    ));
    assert_eq!(store.vehicles().len(), 3);
}

#[test]
fn test_select_out_of_range_clears() {
    let dir = tempdir().unwrap();
    let mut store = populated_store(dir.path().to_path_buf());
    store.select(1).unwrap();
    assert_eq!(store.selected_index(), Some(1));

    assert_eq!(store.select(9).unwrap(), None);
    assert_eq!(store.selected_index(), None);
}

#[test]
fn test_stale_cursor_collapses_on_load() {
    let dir = tempdir().unwrap();
    {
        let mut store = populated_store(dir.path().to_path_buf());
        store.select(2).unwrap();
    }
    // shrink the fleet behind the cursor's back
    std::fs::write(dir.path().join("fleet.json"), "[]").unwrap();

    let store = FleetStore::open(dir.path().to_path_buf()).unwrap();
    assert_eq!(store.selected_index(), None);
}

#[test]
fn test_dispatch_without_selection() {
    let dir = tempdir().unwrap();
    let mut store = populated_store(dir.path().to_path_buf());
    assert!(matches!(
        store.dispatch(VehicleOp::PowerOn),
        Err(Error::NoSelection)
    ));
}

#[test]
fn test_dispatch_is_uniform_across_variants() {
    let dir = tempdir().unwrap();
    let mut store = populated_store(dir.path().to_path_buf());

    for index in 0..store.vehicles().len() {
        store.select(index).unwrap();
        let outcome = store.dispatch(VehicleOp::PowerOn).unwrap();
        assert_eq!(outcome.severity, Severity::Success);
        let outcome = store.dispatch(VehicleOp::Honk).unwrap();
        assert_eq!(outcome.severity, Severity::Success);
    }

    // unsupported operations are reported, never errors
    store.select(0).unwrap();
    let outcome = store.dispatch(VehicleOp::EngageTurbo).unwrap();
    assert!(outcome.is_rejection());
    assert!(outcome.message.contains("not supported"));
}

#[test]
fn test_invalid_maintenance_is_not_persisted() {
    let dir = tempdir().unwrap();
    let mut store = populated_store(dir.path().to_path_buf());
    store.select(0).unwrap();

    let added = store
        .add_maintenance(MaintenanceRecord::new(date(2026, 9, 1), "  ", 10.0, None))
        .unwrap();
    assert!(!added);
    assert!(store.vehicles()[0].maintenance_log.is_empty());
}

#[test]
fn test_upcoming_panel_sorted_ascending() {
    let dir = tempdir().unwrap();
    let mut store = populated_store(dir.path().to_path_buf());
    let today = date(2026, 8, 8);

    store.select(0).unwrap();
    store
        .add_maintenance(MaintenanceRecord::new(date(2026, 12, 1), "Tires", 0.0, None))
        .unwrap();
    store
        .add_maintenance(MaintenanceRecord::new(date(2026, 8, 9), "Wash", 0.0, None))
        .unwrap();
    // past entries stay out of the panel
    store
        .add_maintenance(MaintenanceRecord::new(date(2026, 1, 5), "Brakes", 0.0, None))
        .unwrap();
    store.select(2).unwrap();
    store
        .add_maintenance(MaintenanceRecord::new(date(2026, 8, 8), "Inspection", 0.0, None))
        .unwrap();

    let appointments = store.upcoming_appointments(today);
    assert_eq!(appointments.len(), 3);
    assert_eq!(appointments[0].date, date(2026, 8, 8));
    assert_eq!(appointments[0].vehicle, "Truck 'Scania'");
    assert_eq!(appointments[1].date, date(2026, 8, 9));
    assert_eq!(appointments[2].date, date(2026, 12, 1));
}

#[test]
fn test_reminders_for_today_and_tomorrow() {
    use garage_store::ReminderDue;

    let dir = tempdir().unwrap();
    let mut store = populated_store(dir.path().to_path_buf());
    let today = date(2026, 8, 8);

    store.select(0).unwrap();
    store
        .add_maintenance(MaintenanceRecord::new(today, "Inspection", 0.0, None))
        .unwrap();
    store
        .add_maintenance(MaintenanceRecord::new(date(2026, 8, 9), "Wash", 0.0, None))
        .unwrap();
    store
        .add_maintenance(MaintenanceRecord::new(date(2026, 8, 20), "Tires", 0.0, None))
        .unwrap();

    let reminders = store.reminders(today);
    assert_eq!(reminders.len(), 2);
    assert!(reminders
        .iter()
        .any(|r| r.due == ReminderDue::Today && r.service_type == "Inspection"));
    assert!(reminders
        .iter()
        .any(|r| r.due == ReminderDue::Tomorrow && r.service_type == "Wash"));
}
