use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use eterna_core::UserProfile;
use eterna_estimator::{EstimateReport, Estimator};

/// Downloadable snapshot of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub profile: UserProfile,
    pub report: EstimateReport,
    pub export_date: DateTime<Utc>,
}

impl ExportDocument {
    pub fn build(profile: &UserProfile, estimator: &Estimator, at: DateTime<Utc>) -> Self {
        Self {
            profile: profile.clone(),
            report: estimator.report(profile),
            export_date: at,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing export document")
    }
}

/// `eterna_profile_YYYYMMDD.json`
pub fn default_export_name(at: DateTime<Utc>) -> String {
    format!("eterna_profile_{}.json", at.format("%Y%m%d"))
}

/// Write `doc` to `out`, or to `dir/<default name>` when `out` is `None`.
pub fn write_export(doc: &ExportDocument, out: Option<&Path>, dir: &Path) -> Result<PathBuf> {
    let path = match out {
        Some(path) => path.to_path_buf(),
        None => dir.join(default_export_name(doc.export_date)),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating export directory '{}'", parent.display()))?;
    }
    fs::write(&path, doc.to_json()?)
        .with_context(|| format!("writing export '{}'", path.display()))?;
    info!("export written to {}", path.display());
    Ok(path)
}

pub fn read_export(path: &Path) -> Result<ExportDocument> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading export '{}'", path.display()))?;
    serde_json::from_str(&json).context("parsing export document")
}
