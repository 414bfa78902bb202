//! CLI definition using clap

use clap::{Parser, Subcommand};
use garage_types::{OutputFormat, VehicleClass};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "garage")]
#[command(version)]
#[command(about = "Manage a garage of vehicles from the command line")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Store directory override
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a vehicle to the garage
    Add {
        /// Vehicle variant
        class: VehicleClass,

        /// Model name
        model: String,

        /// Color
        color: String,

        /// Cargo capacity in kg (trucks only)
        #[arg(long)]
        capacity: Option<u32>,
    },

    /// Remove a vehicle by its list index
    Remove {
        index: usize,
    },

    /// List the vehicles in the garage
    List,

    /// Select the vehicle to operate on
    Select {
        index: usize,
    },

    /// Show details for the selected vehicle
    Show,

    /// Power on the selected vehicle
    PowerOn,

    /// Power off the selected vehicle (refused while moving)
    PowerOff,

    /// Honk the selected vehicle's horn
    Honk,

    /// Accelerate the selected vehicle
    Accelerate {
        /// Speed increment in km/h; defaults per variant
        amount: Option<u32>,
    },

    /// Brake the selected vehicle
    Brake {
        /// Speed decrement in km/h
        amount: Option<u32>,
    },

    /// Engage the turbo (sports cars only)
    TurboOn,

    /// Disengage the turbo (sports cars only)
    TurboOff,

    /// Load cargo onto the selected truck (powered off only)
    Load {
        /// Weight in kg
        weight: u32,
    },

    /// Unload cargo from the selected truck (powered off only)
    Unload {
        /// Weight in kg
        weight: u32,
    },

    /// Maintenance records and schedules
    #[command(subcommand)]
    Maintenance(MaintenanceCommands),

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set the store directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set the default output format
        #[arg(long)]
        set_format: Option<OutputFormat>,
    },
}

#[derive(Subcommand)]
pub enum MaintenanceCommands {
    /// Record or schedule a service for the selected vehicle
    Add {
        /// Service date (YYYY-MM-DD)
        date: String,

        /// Service type (e.g. "Oil change")
        service: String,

        /// Service cost
        #[arg(long, default_value_t = 0.0)]
        cost: f64,

        /// Additional details
        #[arg(long)]
        description: Option<String>,
    },

    /// Show the selected vehicle's maintenance log
    Log {
        /// Show scheduled (future) services instead of past history
        #[arg(long)]
        upcoming: bool,
    },

    /// Show upcoming services across the whole garage
    Upcoming,
}
