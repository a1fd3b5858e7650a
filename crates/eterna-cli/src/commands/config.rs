use std::path::Path;

use anyhow::{bail, Result};
use tracing::info;

use eterna_cli::cli::ConfigCommands;
use eterna_core::{save_config, EternaConfig};

use super::input::config_path;

pub fn handle(
    command: &ConfigCommands,
    explicit: Option<&Path>,
    effective: &EternaConfig,
) -> Result<()> {
    match command {
        ConfigCommands::Init { force } => {
            let path = config_path(explicit)?;
            if path.exists() && !force {
                bail!(
                    "config file '{}' already exists (use --force to overwrite)",
                    path.display()
                );
            }
            save_config(&path, &EternaConfig::default())?;
            info!("Wrote default configuration to {}", path.display());
            println!("Wrote default configuration to {}", path.display());
        }
        ConfigCommands::Show => print!("{}", toml::to_string_pretty(effective)?),
        ConfigCommands::Path => println!("{}", config_path(explicit)?.display()),
    }
    Ok(())
}
