//! Simulated telemetry pages. Every figure here is random; none of it comes
//! from the estimator.

use std::io::{self, Write};

use anyhow::Result;
use chrono::Local;
use serde::Serialize;
use tabwriter::TabWriter;
use tracing::info;

use eterna_cli::cli::{OutputFormat, SimCommands};
use eterna_sim::{early_warnings, SimulatedTelemetry, WhatIfScenario, DEFAULT_DEVICES};

use super::input::resolve_profile;

pub fn handle(command: &SimCommands) -> Result<()> {
    match command {
        SimCommands::Orchestrate {
            cycles,
            devices,
            seed,
            format,
        } => {
            let devices: Vec<String> = if devices.is_empty() {
                DEFAULT_DEVICES.iter().map(|d| d.to_string()).collect()
            } else {
                devices.clone()
            };
            let rounds = SimulatedTelemetry::new(*seed).orchestrate(*cycles as usize, &devices);
            if *format == OutputFormat::Json {
                return print_json(&rounds);
            }
            let mut w = TabWriter::new(io::stdout());
            writeln!(w, "CYCLE\tDEVICE\tSTATE\tSAVES")?;
            for round in &rounds {
                for status in &round.devices {
                    writeln!(
                        w,
                        "{}\t{}\t{}\t{}",
                        round.cycle,
                        status.device,
                        status.state.label(),
                        status.savings
                    )?;
                }
            }
            w.flush()?;
        }
        SimCommands::Forecast { days, seed, format } => {
            let start = Local::now().date_naive();
            let points = SimulatedTelemetry::new(*seed).bill_forecast(start, *days as usize);
            if *format == OutputFormat::Json {
                return print_json(&points);
            }
            let mut w = TabWriter::new(io::stdout());
            writeln!(w, "DATE\tPREDICTED\tACTUAL")?;
            for p in &points {
                writeln!(w, "{}\t{}\t{}", p.date, p.predicted, p.actual)?;
            }
            w.flush()?;
        }
        SimCommands::WhatIf { scenario, seed } => {
            let scenario: WhatIfScenario = scenario.parse()?;
            let impact = SimulatedTelemetry::new(*seed).what_if(scenario);
            info!("Simulated what-if for {}", scenario.label());
            println!(
                "{}: +{}% efficiency, {} saved per month",
                scenario.label(),
                impact.efficiency_gain_pct,
                impact.monthly_savings
            );
        }
        SimCommands::Rooms { profile, seed } => {
            let (profile, _diagnostics) = resolve_profile(profile)?;
            let flow = SimulatedTelemetry::new(*seed).room_flow(&profile.rooms);
            let mut w = TabWriter::new(io::stdout());
            writeln!(w, "ROOM\tFLOW")?;
            for (room, watts) in &flow {
                writeln!(w, "{room}\t{watts}")?;
            }
            w.flush()?;
        }
        SimCommands::Warnings => {
            for warning in early_warnings() {
                println!("{}", warning.title);
                println!("  {}", warning.problem);
                println!("  {}", warning.solution);
            }
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(io::stdout(), value)?;
    println!();
    Ok(())
}
