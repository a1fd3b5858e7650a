use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "eterna", author, version, about = "Household energy savings estimator", long_about = None)]
pub struct Cli {
    /// Set the logging level (overrides the config file)
    #[arg(long)]
    pub log_level: Option<tracing::Level>,

    /// Configuration file (defaults to ~/.eterna/config/eterna.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate savings, CO2 reduction and bill for a household
    Estimate {
        #[command(flatten)]
        profile: ProfileArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },
    /// Profile files
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Write a JSON export of profile and estimate
    Export {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Output file (defaults to eterna_profile_YYYYMMDD.json in the export dir)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
    },
    /// Simulated telemetry (random placeholder figures, not estimates)
    Sim {
        #[command(subcommand)]
        command: SimCommands,
    },
    /// Configuration file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

/// Household description: an optional profile file plus per-field overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    /// Profile file (YAML or JSON)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub profile: Option<PathBuf>,
    /// Apartment, Villa, Townhouse or Duplex
    #[arg(long)]
    pub home_type: Option<String>,
    #[arg(long)]
    pub ac_units: Option<u32>,
    #[arg(long)]
    pub family_size: Option<u32>,
    /// Emirate, e.g. "Abu Dhabi"
    #[arg(long)]
    pub location: Option<String>,
    /// Monthly bill target in AED
    #[arg(long)]
    pub bill_target: Option<f64>,
    /// Room name; repeat for several rooms (replaces the profile's rooms)
    #[arg(long = "room")]
    pub rooms: Vec<String>,
    /// File listing one room per line
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub rooms_file: Option<PathBuf>,
    /// Reject out-of-range values and unknown labels instead of repairing them
    #[arg(long)]
    pub strict: bool,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Write the default profile
    Init {
        /// Output file (.yaml or .json); stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Load, repair and print a profile
    Show {
        #[command(flatten)]
        profile: ProfileArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },
}

#[derive(Subcommand, Debug)]
pub enum SimCommands {
    /// Simulated device orchestration cycles
    Orchestrate {
        #[arg(
            long,
            default_value_t = eterna_sim::DEFAULT_CYCLES as u32,
            value_parser = clap::value_parser!(u32).range(1..=eterna_sim::MAX_CYCLES as i64)
        )]
        cycles: u32,
        /// Device name; repeat for several (defaults to a typical villa)
        #[arg(long = "device")]
        devices: Vec<String>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },
    /// Simulated daily bill forecast starting today
    Forecast {
        #[arg(
            long,
            default_value_t = eterna_sim::DEFAULT_FORECAST_DAYS as u32,
            value_parser = clap::value_parser!(u32).range(1..=eterna_sim::MAX_FORECAST_DAYS as i64)
        )]
        days: u32,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },
    /// Simulated impact of a home improvement
    WhatIf {
        /// add-solar-panels, upgrade-ac, smart-pool, better-insulation, add-guest-wing
        #[arg(long)]
        scenario: String,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Simulated room-by-room flow for the profile's rooms
    Rooms {
        #[command(flatten)]
        profile: ProfileArgs,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Fixed early-warning list
    Warnings,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
    /// Print the configuration file location
    Path,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned human-readable table
    #[default]
    Plain,
    /// Pretty-printed JSON
    Json,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
