//! Command handlers

use crate::cli::{Cli, Commands, MaintenanceCommands};
use crate::config::Config;
use crate::output;
use chrono::{Local, NaiveDate};
use garage_domain::{MaintenanceRecord, VehicleOp};
use garage_store::FleetStore;
use garage_types::{ActionOutcome, Error, OutputFormat, Result};
use std::path::PathBuf;

pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let Cli {
        command,
        format,
        data_dir,
    } = cli;
    let format = format.unwrap_or(config.output_format);
    let today = Local::now().date_naive();

    match command {
        Commands::Add {
            class,
            model,
            color,
            capacity,
        } => {
            let mut store = open_store(data_dir, &config)?;
            let vehicle = store.add_vehicle(class, &model, &color, capacity)?;
            let message = format!(
                "{} '{}' added to the garage.",
                vehicle.variant_name(),
                vehicle.model
            );
            output::action(format, &ActionOutcome::success(message))
        }
        Commands::Remove { index } => {
            let mut store = open_store(data_dir, &config)?;
            let removed = store.remove_vehicle(index)?;
            output::action(
                format,
                &ActionOutcome::info(format!(
                    "{} '{}' removed from the garage.",
                    removed.variant_name(),
                    removed.model
                )),
            )
        }
        Commands::List => {
            let store = open_store(data_dir, &config)?;
            output::fleet_list(format, store.vehicles(), store.selected_index())
        }
        Commands::Select { index } => {
            let mut store = open_store(data_dir, &config)?;
            match store.select(index)? {
                Some(selected) => {
                    let vehicle = &store.vehicles()[selected];
                    output::action(
                        format,
                        &ActionOutcome::success(format!(
                            "Selected vehicle {}: {} '{}'.",
                            selected,
                            vehicle.variant_name(),
                            vehicle.model
                        )),
                    )
                }
                None => output::action(
                    format,
                    &ActionOutcome::warning(format!(
                        "Index {} is out of range; selection cleared.",
                        index
                    )),
                ),
            }
        }
        Commands::Show => {
            let store = open_store(data_dir, &config)?;
            let vehicle = store.selected_vehicle().ok_or(Error::NoSelection)?;
            output::vehicle_details(format, vehicle, today)
        }
        Commands::PowerOn => run_op(data_dir, &config, format, VehicleOp::PowerOn),
        Commands::PowerOff => run_op(data_dir, &config, format, VehicleOp::PowerOff),
        Commands::Honk => run_op(data_dir, &config, format, VehicleOp::Honk),
        Commands::Accelerate { amount } => {
            run_op(data_dir, &config, format, VehicleOp::Accelerate(amount))
        }
        Commands::Brake { amount } => run_op(data_dir, &config, format, VehicleOp::Brake(amount)),
        Commands::TurboOn => run_op(data_dir, &config, format, VehicleOp::EngageTurbo),
        Commands::TurboOff => run_op(data_dir, &config, format, VehicleOp::DisengageTurbo),
        Commands::Load { weight } => {
            run_op(data_dir, &config, format, VehicleOp::LoadCargo(weight))
        }
        Commands::Unload { weight } => {
            run_op(data_dir, &config, format, VehicleOp::UnloadCargo(weight))
        }
        Commands::Maintenance(command) => {
            run_maintenance(data_dir, &config, format, today, command)
        }
        Commands::Config {
            show,
            set_data_dir,
            set_format,
        } => run_config(config, show, set_data_dir, set_format),
    }
}

/// All vehicle operations funnel through the store's single dispatch point
fn run_op(
    data_dir: Option<PathBuf>,
    config: &Config,
    format: OutputFormat,
    op: VehicleOp,
) -> Result<()> {
    let mut store = open_store(data_dir, config)?;
    let outcome = store.dispatch(op)?;
    output::action(format, &outcome)
}

fn run_maintenance(
    data_dir: Option<PathBuf>,
    config: &Config,
    format: OutputFormat,
    today: NaiveDate,
    command: MaintenanceCommands,
) -> Result<()> {
    let mut store = open_store(data_dir, config)?;
    match command {
        MaintenanceCommands::Add {
            date,
            service,
            cost,
            description,
        } => {
            let date = parse_date(&date)?;
            if cost < 0.0 {
                return Err(Error::Validation("cost must not be negative".to_string()));
            }
            let record = MaintenanceRecord::new(date, service, cost, description);
            if store.add_maintenance(record)? {
                output::action(
                    format,
                    &ActionOutcome::success("Maintenance service recorded."),
                )
            } else {
                output::action(
                    format,
                    &ActionOutcome::error(
                        "Maintenance data is invalid. Check the service type and cost.",
                    ),
                )
            }
        }
        MaintenanceCommands::Log { upcoming } => {
            let vehicle = store.selected_vehicle().ok_or(Error::NoSelection)?;
            output::maintenance_log(format, vehicle, upcoming, today)
        }
        MaintenanceCommands::Upcoming => {
            let appointments = store.upcoming_appointments(today);
            let reminders = store.reminders(today);
            output::upcoming_panel(format, &appointments, &reminders)
        }
    }
}

fn run_config(
    mut config: Config,
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_format: Option<OutputFormat>,
) -> Result<()> {
    let mut changed = false;
    if let Some(dir) = set_data_dir {
        config.data_dir = Some(dir);
        changed = true;
    }
    if let Some(format) = set_format {
        config.output_format = format;
        changed = true;
    }
    if changed {
        config.save()?;
        println!("Configuration saved.");
    }
    if show || !changed {
        println!("Config file:     {}", Config::config_path()?.display());
        println!("Store directory: {}", config.data_dir()?.display());
        println!("Output format:   {}", config.output_format);
    }
    Ok(())
}

fn open_store(data_dir: Option<PathBuf>, config: &Config) -> Result<FleetStore> {
    let store_dir = match data_dir {
        Some(dir) => dir,
        None => config.data_dir()?,
    };
    FleetStore::open(store_dir)
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        Error::Validation(format!(
            "'{}' is not a valid date (expected YYYY-MM-DD)",
            input
        ))
    })
}
