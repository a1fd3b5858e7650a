//! Turning command-line arguments into a profile and an estimator.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use eterna_cli::cli::ProfileArgs;
use eterna_core::{
    default_config_path, load_config, Aed, Diagnostics, Emirate, EternaConfig, EternaError,
    HomeType, UserProfile,
};
use eterna_estimator::Estimator;
use eterna_session::{parse_room_list, read_profile};

/// Config file in effect: `--config` or the default location.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(default_config_path()?),
    }
}

/// Load configuration, falling back to defaults when no home directory exists.
pub fn load_effective_config(explicit: Option<&Path>) -> Result<EternaConfig> {
    match config_path(explicit) {
        Ok(path) => {
            let config = load_config(&path)
                .with_context(|| format!("loading config '{}'", path.display()))?;
            debug!(path = %path.display(), "configuration loaded");
            Ok(config)
        }
        Err(err) => {
            warn!("no config location ({err:#}), using defaults");
            Ok(EternaConfig::default())
        }
    }
}

pub fn build_estimator(config: &EternaConfig) -> Result<Estimator> {
    Ok(Estimator::new(config.coefficients.clone())?)
}

/// Profile file (or the default profile) with flag overrides applied, then
/// repaired, or checked when `--strict` is set.
pub fn resolve_profile(args: &ProfileArgs) -> Result<(UserProfile, Diagnostics)> {
    let mut diagnostics = Diagnostics::new();
    let mut profile = match &args.profile {
        Some(path) => {
            let loaded = read_profile(path)?;
            // a --home-type flag replaces the file's label below
            if let Some(label) = loaded.unknown_home_type.filter(|_| args.home_type.is_none()) {
                if args.strict {
                    return Err(EternaError::Parse(format!(
                        "unknown home type '{label}' in '{}'; expected one of Apartment, Villa, Townhouse, Duplex",
                        path.display()
                    ))
                    .into());
                }
                diagnostics.add_field_warning(
                    "fallback",
                    "home_type",
                    &format!("unknown home type '{label}', using Townhouse"),
                );
            }
            loaded.profile
        }
        None => UserProfile::default(),
    };

    if let Some(label) = &args.home_type {
        profile.home_type = if args.strict {
            label.parse::<HomeType>()?
        } else {
            HomeType::from_label(label).unwrap_or_else(|| {
                diagnostics.add_field_warning(
                    "fallback",
                    "home_type",
                    &format!("unknown home type '{label}', using Townhouse"),
                );
                HomeType::Townhouse
            })
        };
    }
    if let Some(ac_units) = args.ac_units {
        profile.ac_units = ac_units;
    }
    if let Some(family_size) = args.family_size {
        profile.family_size = family_size;
    }
    if let Some(location) = &args.location {
        profile.location = location.parse::<Emirate>()?;
    }
    if let Some(target) = args.bill_target {
        profile.bill_target = Aed(target);
    }
    if !args.rooms.is_empty() {
        profile.rooms = args.rooms.clone();
    }
    if let Some(path) = &args.rooms_file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading rooms file '{}'", path.display()))?;
        profile.rooms = parse_room_list(&text);
    }

    if args.strict {
        profile.validate()?;
    } else {
        diagnostics.merge(profile.sanitize());
    }
    for issue in &diagnostics.issues {
        warn!("{issue}");
    }
    Ok((profile, diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = ProfileArgs {
            home_type: Some("Villa".into()),
            ac_units: Some(3),
            family_size: Some(5),
            location: Some("sharjah".into()),
            rooms: vec!["Pool".into()],
            ..ProfileArgs::default()
        };
        let (profile, diag) = resolve_profile(&args).unwrap();
        assert_eq!(profile.home_type, HomeType::Villa);
        assert_eq!(profile.location, Emirate::Sharjah);
        assert_eq!(profile.rooms, vec!["Pool"]);
        assert!(!diag.has_issues());
    }

    #[test]
    fn test_lenient_mode_repairs() {
        let args = ProfileArgs {
            home_type: Some("Castle".into()),
            ac_units: Some(0),
            ..ProfileArgs::default()
        };
        let (profile, diag) = resolve_profile(&args).unwrap();
        assert_eq!(profile.home_type, HomeType::Townhouse);
        assert_eq!(profile.ac_units, 1);
        assert_eq!(diag.warning_count(), 2);
    }

    #[test]
    fn test_unknown_home_type_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("castle.yaml");
        fs::write(&path, "home_type: Castle\nac_units: 3\n").unwrap();

        let lenient = ProfileArgs {
            profile: Some(path.clone()),
            ..ProfileArgs::default()
        };
        let (profile, diag) = resolve_profile(&lenient).unwrap();
        assert_eq!(profile.home_type, HomeType::Townhouse);
        assert_eq!(diag.for_field("home_type").count(), 1);

        let strict = ProfileArgs {
            strict: true,
            ..lenient.clone()
        };
        let err = resolve_profile(&strict).unwrap_err();
        assert!(err.to_string().contains("Castle"));

        let overridden = ProfileArgs {
            home_type: Some("Villa".into()),
            ..strict
        };
        let (profile, diag) = resolve_profile(&overridden).unwrap();
        assert_eq!(profile.home_type, HomeType::Villa);
        assert!(!diag.has_issues());
    }

    #[test]
    fn test_strict_mode_rejects() {
        let args = ProfileArgs {
            home_type: Some("Castle".into()),
            strict: true,
            ..ProfileArgs::default()
        };
        assert!(resolve_profile(&args).is_err());

        let args = ProfileArgs {
            family_size: Some(16),
            strict: true,
            ..ProfileArgs::default()
        };
        let err = resolve_profile(&args).unwrap_err();
        assert!(err.to_string().contains("family_size 16"));
    }
}
