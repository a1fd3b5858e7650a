use std::io::{self, Write};

use anyhow::Result;
use tabwriter::TabWriter;
use tracing::info;

use eterna_cli::cli::{OutputFormat, ProfileCommands};
use eterna_core::UserProfile;
use eterna_session::save_profile;

use super::input::resolve_profile;

pub fn handle(command: &ProfileCommands) -> Result<()> {
    match command {
        ProfileCommands::Init { out } => {
            let profile = UserProfile::default();
            match out {
                Some(path) => {
                    save_profile(path, &profile)?;
                    info!("Wrote default profile to {}", path.display());
                    println!("Wrote default profile to {}", path.display());
                }
                None => print!("{}", serde_yaml::to_string(&profile)?),
            }
            Ok(())
        }
        ProfileCommands::Show { profile, format } => {
            let (profile, diagnostics) = resolve_profile(profile)?;
            match format {
                OutputFormat::Json => {
                    let doc = serde_json::json!({
                        "profile": profile,
                        "diagnostics": diagnostics,
                    });
                    serde_json::to_writer_pretty(io::stdout(), &doc)?;
                    println!();
                }
                OutputFormat::Plain => {
                    let mut w = TabWriter::new(io::stdout());
                    writeln!(w, "Home type\t{}", profile.home_type)?;
                    writeln!(w, "Location\t{}", profile.location)?;
                    writeln!(w, "AC units\t{}", profile.ac_units)?;
                    writeln!(w, "Family size\t{}", profile.family_size)?;
                    writeln!(w, "Bill target\t{}", profile.bill_target)?;
                    writeln!(w, "Rooms\t{}", profile.rooms.join(", "))?;
                    writeln!(w, "Appliances\t{}", profile.appliances.join(", "))?;
                    w.flush()?;
                    if diagnostics.has_issues() {
                        print!("{diagnostics}");
                    }
                }
            }
            Ok(())
        }
    }
}
