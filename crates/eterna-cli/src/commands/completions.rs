use std::{fs, io, path::Path};

use anyhow::Result;
use clap_complete::{generate, Shell};

use eterna_cli::cli::build_cli_command;

pub fn handle(shell: Shell, out: Option<&Path>) -> Result<()> {
    let mut cmd = build_cli_command();
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let mut file = fs::File::create(path)?;
            generate(shell, &mut cmd, "eterna", &mut file);
            println!("Wrote {shell:?} completion to {}", path.display());
        }
        None => generate(shell, &mut cmd, "eterna", &mut io::stdout()),
    }
    Ok(())
}
