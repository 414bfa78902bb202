//! Output formatting module

use chrono::NaiveDate;
use garage_domain::{MaintenanceRecord, Vehicle};
use garage_store::{Reminder, ReminderDue, UpcomingAppointment, VehicleRecord};
use garage_types::{ActionOutcome, OutputFormat, Result, Severity};

/// Print an action outcome with its severity prefix
pub fn action(format: OutputFormat, outcome: &ActionOutcome) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        println!("{} {}", severity_prefix(outcome.severity), outcome.message);
    }
    Ok(())
}

fn severity_prefix(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "[OK]",
        Severity::Info => "[INFO]",
        Severity::Warning => "[WARN]",
        Severity::Error => "[ERROR]",
    }
}

/// Print the fleet with its selection marker
pub fn fleet_list(
    format: OutputFormat,
    vehicles: &[Vehicle],
    selected: Option<usize>,
) -> Result<()> {
    if format == OutputFormat::Json {
        let records: Vec<VehicleRecord> = vehicles.iter().map(VehicleRecord::from).collect();
        let content = serde_json::to_string_pretty(&serde_json::json!({
            "selectedIndex": selected,
            "vehicles": records,
        }))?;
        println!("{}", content);
        return Ok(());
    }

    if vehicles.is_empty() {
        println!("The garage is empty. Add a vehicle with 'garage add'.");
        return Ok(());
    }

    println!("Garage");
    println!("======");
    for (index, vehicle) in vehicles.iter().enumerate() {
        let marker = if selected == Some(index) { "*" } else { " " };
        println!(
            "{} [{}] {}: {} ({})",
            marker,
            index,
            vehicle.variant_name(),
            vehicle.model,
            vehicle.color
        );
    }
    Ok(())
}

/// Print the detail panel for one vehicle
pub fn vehicle_details(format: OutputFormat, vehicle: &Vehicle, today: NaiveDate) -> Result<()> {
    if format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&VehicleRecord::from(vehicle))?;
        println!("{}", content);
        return Ok(());
    }

    println!("{}", vehicle.describe());

    println!("\nMaintenance history");
    println!("-------------------");
    let mut empty = true;
    for line in vehicle.maintenance_entries(false, today) {
        println!("{}", line);
        empty = false;
    }
    if empty {
        println!("No maintenance history.");
    }

    println!("\nScheduled services");
    println!("------------------");
    let mut empty = true;
    for line in vehicle.maintenance_entries(true, today) {
        println!("{}", line);
        empty = false;
    }
    if empty {
        println!("No upcoming services.");
    }
    Ok(())
}

/// Print one side of the selected vehicle's maintenance log
pub fn maintenance_log(
    format: OutputFormat,
    vehicle: &Vehicle,
    upcoming: bool,
    today: NaiveDate,
) -> Result<()> {
    if format == OutputFormat::Json {
        let records: Vec<&MaintenanceRecord> = vehicle
            .maintenance_log
            .iter()
            .filter(|record| {
                if upcoming {
                    record.date >= today
                } else {
                    record.date < today
                }
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let title = if upcoming {
        "Scheduled services"
    } else {
        "Maintenance history"
    };
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));

    let mut empty = true;
    for line in vehicle.maintenance_entries(upcoming, today) {
        println!("{}", line);
        empty = false;
    }
    if empty {
        println!(
            "{}",
            if upcoming {
                "No upcoming services."
            } else {
                "No maintenance history."
            }
        );
    }
    Ok(())
}

/// Print the fleet-wide schedule panel, reminders first
pub fn upcoming_panel(
    format: OutputFormat,
    appointments: &[UpcomingAppointment],
    reminders: &[Reminder],
) -> Result<()> {
    if format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&serde_json::json!({
            "reminders": reminders,
            "appointments": appointments,
        }))?;
        println!("{}", content);
        return Ok(());
    }

    for reminder in reminders {
        let (prefix, when) = match reminder.due {
            ReminderDue::Today => (severity_prefix(Severity::Warning), "today"),
            ReminderDue::Tomorrow => (severity_prefix(Severity::Info), "tomorrow"),
        };
        println!(
            "{} Reminder: {} for {} is due {}.",
            prefix, reminder.service_type, reminder.vehicle, when
        );
    }
    if !reminders.is_empty() {
        println!();
    }

    println!("Upcoming services");
    println!("=================");
    if appointments.is_empty() {
        println!("No upcoming services scheduled in the garage.");
        return Ok(());
    }
    for appointment in appointments {
        println!("{}: {}", appointment.vehicle, appointment.details);
    }
    Ok(())
}
