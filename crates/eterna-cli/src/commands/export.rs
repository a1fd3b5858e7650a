use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use eterna_cli::cli::ProfileArgs;
use eterna_core::EternaConfig;
use eterna_session::{default_export_name, write_export, ExportDocument};

use super::input::{build_estimator, resolve_profile};
use super::telemetry::record_run_timed;

pub fn handle(config: &EternaConfig, args: &ProfileArgs, out: Option<&Path>) -> Result<()> {
    let start = Instant::now();
    let now = Utc::now();
    let export_dir = PathBuf::from(&config.data.export_dir);
    let target = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| export_dir.join(default_export_name(now)));

    let mut home_type = String::new();
    let res = (|| -> Result<()> {
        let (profile, _diagnostics) = resolve_profile(args)?;
        home_type = profile.home_type.to_string();
        let estimator = build_estimator(config)?;
        let doc = ExportDocument::build(&profile, &estimator, now);
        let path = write_export(&doc, Some(&target), &export_dir)?;
        info!("Exported {} profile to {}", profile.home_type, path.display());
        println!("Exported profile and estimate to {}", path.display());
        Ok(())
    })();

    let profile_param = args
        .profile
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "default".to_string());
    let out_param = target.display().to_string();
    record_run_timed(
        &target,
        "export",
        &[
            ("profile", &profile_param),
            ("home_type", &home_type),
            ("out", &out_param),
        ],
        start,
        &res,
    );
    res
}
