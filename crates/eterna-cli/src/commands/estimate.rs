use std::io::{self, Write};

use anyhow::Result;
use tabwriter::TabWriter;
use tracing::info;

use eterna_cli::cli::{OutputFormat, ProfileArgs};
use eterna_core::{EternaConfig, UserProfile};
use eterna_estimator::{EstimateReport, TargetStatus};

use super::input::{build_estimator, resolve_profile};

pub fn handle(config: &EternaConfig, args: &ProfileArgs, format: OutputFormat) -> Result<()> {
    let (profile, _diagnostics) = resolve_profile(args)?;
    let estimator = build_estimator(config)?;
    info!(
        "Estimating savings for {} ({} AC units, {} people)",
        profile.home_type, profile.ac_units, profile.family_size
    );
    let report = estimator.report(&profile);
    match format {
        OutputFormat::Plain => print_report(&profile, &report),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(io::stdout(), &report)?;
            println!();
            Ok(())
        }
    }
}

fn print_report(profile: &UserProfile, report: &EstimateReport) -> Result<()> {
    let r = &report.result;
    let mut w = TabWriter::new(io::stdout());
    writeln!(
        w,
        "Home\t{} in {}, {} AC units, {} people",
        profile.home_type, profile.location, profile.ac_units, profile.family_size
    )?;
    writeln!(w, "Base usage\t{}", r.base_usage)?;
    for (category, amount) in r.category_savings.iter() {
        writeln!(w, "Savings: {}\t{}", category.name(), amount)?;
    }
    writeln!(w, "Total savings / month\t{}", r.total_savings)?;
    writeln!(w, "Annual savings\t{}", r.annual_savings)?;
    writeln!(w, "CO2 reduction\t{}", r.co2_reduction)?;
    writeln!(w, "Trees equivalent\t{:.2}", r.trees_equivalent)?;
    writeln!(
        w,
        "Efficiency\t{:.0}% ({})",
        r.efficiency_score, report.rating
    )?;
    writeln!(w, "Predicted bill\t{}", r.predicted_bill)?;

    let t = &report.target;
    let relation = match t.status {
        TargetStatus::AboveTarget => "above",
        TargetStatus::OnTarget => "below",
    };
    writeln!(
        w,
        "Bill target\t{} vs {} ({} {} target, {:.1}% achieved)",
        t.current_bill,
        t.target,
        t.difference.abs(),
        relation,
        t.progress_pct
    )?;
    w.flush()?;

    if !report.rooms.is_empty() {
        println!();
        let mut w = TabWriter::new(io::stdout());
        writeln!(w, "ROOM\tUSAGE")?;
        for room in &report.rooms {
            writeln!(w, "{}\t{}", room.name, room.usage)?;
        }
        w.flush()?;
    }

    println!();
    let mut w = TabWriter::new(io::stdout());
    writeln!(w, "TIP\tACTION\tSAVES")?;
    for tip in &report.tips {
        writeln!(
            w,
            "{}\t{}\tAED {:.0}+",
            tip.title,
            tip.description,
            tip.savings_hint.value()
        )?;
    }
    w.flush()?;
    Ok(())
}
