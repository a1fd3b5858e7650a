use std::{path::Path, time::Instant};

use tracing::{error, info};

use eterna_cli::manifest::record_manifest;

/// Record a run manifest for a command that wrote `out`. Failure to record
/// never fails the command itself.
pub fn record_run_timed(
    out: &Path,
    command: &str,
    params: &[(&str, &str)],
    start: Instant,
    result: &anyhow::Result<()>,
) {
    let duration_ms = start.elapsed().as_millis();
    let status = if result.is_ok() { "success" } else { "failure" };
    match record_manifest(out, command, params, status, Some(duration_ms)) {
        Ok(path) => info!("Recorded run manifest {}", path.display()),
        Err(err) => error!("Failed to record run manifest: {err:#}"),
    }
}
