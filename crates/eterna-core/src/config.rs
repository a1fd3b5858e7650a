//! Estimator coefficients and workspace configuration.
//!
//! Every number the estimator multiplies by lives in [`Coefficients`]. The
//! defaults are the published product assumptions; a TOML file can override
//! any subset of them. Configuration sits in `~/.eterna/config/eterna.toml`
//! unless a path is given explicitly.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EternaError, EternaResult};
use crate::profile::HomeType;

/// Base load model for one home type: `fixed + per_ac_unit*ac + per_person*family`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageModel {
    pub fixed_w: f64,
    pub per_ac_unit_w: f64,
    pub per_person_w: f64,
}

impl UsageModel {
    pub const fn new(fixed_w: f64, per_ac_unit_w: f64, per_person_w: f64) -> Self {
        Self {
            fixed_w,
            per_ac_unit_w,
            per_person_w,
        }
    }
}

/// Base usage models per home type. Duplex has no model of its own and uses
/// the townhouse entry, as does any unrecognized home type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseUsageCoefficients {
    #[serde(default = "default_villa")]
    pub villa: UsageModel,
    #[serde(default = "default_apartment")]
    pub apartment: UsageModel,
    #[serde(default = "default_townhouse")]
    pub townhouse: UsageModel,
}

impl BaseUsageCoefficients {
    pub fn model_for(&self, home_type: HomeType) -> &UsageModel {
        match home_type {
            HomeType::Villa => &self.villa,
            HomeType::Apartment => &self.apartment,
            HomeType::Townhouse | HomeType::Duplex => &self.townhouse,
        }
    }
}

impl Default for BaseUsageCoefficients {
    fn default() -> Self {
        Self {
            villa: default_villa(),
            apartment: default_apartment(),
            townhouse: default_townhouse(),
        }
    }
}

fn default_villa() -> UsageModel {
    UsageModel::new(1800.0, 150.0, 80.0)
}

fn default_apartment() -> UsageModel {
    UsageModel::new(1200.0, 120.0, 60.0)
}

fn default_townhouse() -> UsageModel {
    UsageModel::new(1500.0, 130.0, 70.0)
}

/// Monthly savings per category, AED.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsCoefficients {
    #[serde(default = "default_ac_per_unit")]
    pub ac_per_unit: f64,
    /// Fraction of base usage (W) credited to AC savings
    #[serde(default = "default_ac_usage_factor")]
    pub ac_usage_factor: f64,
    /// Flat pool saving, villas only
    #[serde(default = "default_pool_villa")]
    pub pool_villa: f64,
    #[serde(default = "default_kitchen_per_person")]
    pub kitchen_per_person: f64,
    #[serde(default = "default_kitchen_fixed")]
    pub kitchen_fixed: f64,
    #[serde(default = "default_lighting_usage_factor")]
    pub lighting_usage_factor: f64,
    #[serde(default = "default_months_per_year")]
    pub months_per_year: f64,
}

impl Default for SavingsCoefficients {
    fn default() -> Self {
        Self {
            ac_per_unit: default_ac_per_unit(),
            ac_usage_factor: default_ac_usage_factor(),
            pool_villa: default_pool_villa(),
            kitchen_per_person: default_kitchen_per_person(),
            kitchen_fixed: default_kitchen_fixed(),
            lighting_usage_factor: default_lighting_usage_factor(),
            months_per_year: default_months_per_year(),
        }
    }
}

fn default_ac_per_unit() -> f64 {
    40.0
}

fn default_ac_usage_factor() -> f64 {
    0.15
}

fn default_pool_villa() -> f64 {
    85.0
}

fn default_kitchen_per_person() -> f64 {
    15.0
}

fn default_kitchen_fixed() -> f64 {
    20.0
}

fn default_lighting_usage_factor() -> f64 {
    0.08
}

fn default_months_per_year() -> f64 {
    12.0
}

/// Environmental conversions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactCoefficients {
    /// kg CO₂ avoided per AED saved
    #[serde(default = "default_co2_per_aed")]
    pub co2_kg_per_aed: f64,
    /// kg CO₂ one tree absorbs
    #[serde(default = "default_co2_per_tree")]
    pub co2_kg_per_tree: f64,
}

impl Default for ImpactCoefficients {
    fn default() -> Self {
        Self {
            co2_kg_per_aed: default_co2_per_aed(),
            co2_kg_per_tree: default_co2_per_tree(),
        }
    }
}

fn default_co2_per_aed() -> f64 {
    0.137
}

fn default_co2_per_tree() -> f64 {
    8.5
}

/// `min(cap, base + per_ac_unit*ac + per_person*family)`, floored at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyCoefficients {
    #[serde(default = "default_efficiency_base")]
    pub base: f64,
    #[serde(default = "default_efficiency_per_ac")]
    pub per_ac_unit: f64,
    #[serde(default = "default_efficiency_per_person")]
    pub per_person: f64,
    #[serde(default = "default_efficiency_cap")]
    pub cap: f64,
}

impl Default for EfficiencyCoefficients {
    fn default() -> Self {
        Self {
            base: default_efficiency_base(),
            per_ac_unit: default_efficiency_per_ac(),
            per_person: default_efficiency_per_person(),
            cap: default_efficiency_cap(),
        }
    }
}

fn default_efficiency_base() -> f64 {
    60.0
}

fn default_efficiency_per_ac() -> f64 {
    3.0
}

fn default_efficiency_per_person() -> f64 {
    2.0
}

fn default_efficiency_cap() -> f64 {
    95.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingCoefficients {
    /// AED per watt of base usage per month
    #[serde(default = "default_tariff")]
    pub aed_per_watt: f64,
}

impl Default for BillingCoefficients {
    fn default() -> Self {
        Self {
            aed_per_watt: default_tariff(),
        }
    }
}

fn default_tariff() -> f64 {
    0.35
}

/// Per-room load estimate. First keyword that matches a room name wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomCoefficients {
    #[serde(default = "default_room_fallback")]
    pub fallback_w: f64,
    #[serde(default = "default_bedroom")]
    pub bedroom_w: f64,
    #[serde(default = "default_living")]
    pub living_w: f64,
    #[serde(default = "default_kitchen")]
    pub kitchen_w: f64,
    /// Pool load, villas only
    #[serde(default = "default_pool_room")]
    pub pool_villa_w: f64,
    #[serde(default = "default_room_per_person")]
    pub per_person_w: f64,
}

impl Default for RoomCoefficients {
    fn default() -> Self {
        Self {
            fallback_w: default_room_fallback(),
            bedroom_w: default_bedroom(),
            living_w: default_living(),
            kitchen_w: default_kitchen(),
            pool_villa_w: default_pool_room(),
            per_person_w: default_room_per_person(),
        }
    }
}

fn default_room_fallback() -> f64 {
    200.0
}

fn default_bedroom() -> f64 {
    350.0
}

fn default_living() -> f64 {
    450.0
}

fn default_kitchen() -> f64 {
    400.0
}

fn default_pool_room() -> f64 {
    600.0
}

fn default_room_per_person() -> f64 {
    10.0
}

/// Full coefficient table consumed by the estimator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Coefficients {
    #[serde(default)]
    pub base_usage: BaseUsageCoefficients,
    #[serde(default)]
    pub savings: SavingsCoefficients,
    #[serde(default)]
    pub impact: ImpactCoefficients,
    #[serde(default)]
    pub efficiency: EfficiencyCoefficients,
    #[serde(default)]
    pub billing: BillingCoefficients,
    #[serde(default)]
    pub rooms: RoomCoefficients,
}

impl Coefficients {
    /// Reject tables that would break the non-negativity of the outputs,
    /// divide by zero or carry a non-finite efficiency term.
    pub fn validate(&self) -> EternaResult<()> {
        let mut bad = Vec::new();
        let mut check = |name: &str, value: f64| {
            if !value.is_finite() || value < 0.0 {
                bad.push(format!("{name} = {value}"));
            }
        };
        for (kind, model) in [
            ("villa", &self.base_usage.villa),
            ("apartment", &self.base_usage.apartment),
            ("townhouse", &self.base_usage.townhouse),
        ] {
            check(&format!("base_usage.{kind}.fixed_w"), model.fixed_w);
            check(&format!("base_usage.{kind}.per_ac_unit_w"), model.per_ac_unit_w);
            check(&format!("base_usage.{kind}.per_person_w"), model.per_person_w);
        }
        let s = &self.savings;
        check("savings.ac_per_unit", s.ac_per_unit);
        check("savings.ac_usage_factor", s.ac_usage_factor);
        check("savings.pool_villa", s.pool_villa);
        check("savings.kitchen_per_person", s.kitchen_per_person);
        check("savings.kitchen_fixed", s.kitchen_fixed);
        check("savings.lighting_usage_factor", s.lighting_usage_factor);
        check("savings.months_per_year", s.months_per_year);
        check("impact.co2_kg_per_aed", self.impact.co2_kg_per_aed);
        check("billing.aed_per_watt", self.billing.aed_per_watt);
        check("efficiency.cap", self.efficiency.cap);
        // the score is floored at zero, so these may be negative
        let e = &self.efficiency;
        for (name, value) in [
            ("efficiency.base", e.base),
            ("efficiency.per_ac_unit", e.per_ac_unit),
            ("efficiency.per_person", e.per_person),
        ] {
            if !value.is_finite() {
                bad.push(format!("{name} = {value}"));
            }
        }
        if self.impact.co2_kg_per_tree <= 0.0 || !self.impact.co2_kg_per_tree.is_finite() {
            bad.push(format!(
                "impact.co2_kg_per_tree = {} (must be > 0)",
                self.impact.co2_kg_per_tree
            ));
        }
        if bad.is_empty() {
            Ok(())
        } else {
            Err(EternaError::Config(format!(
                "invalid coefficients: {}",
                bad.join(", ")
            )))
        }
    }
}

/// Workspace configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EternaConfig {
    #[serde(default)]
    pub coefficients: Coefficients,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Where `export` writes when no output path is given
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
        }
    }
}

fn default_export_dir() -> String {
    ".".to_string()
}

/// The ETERNA home directory (defaults to ~/.eterna)
pub fn eterna_home() -> EternaResult<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".eterna"))
        .ok_or_else(|| EternaError::Config("cannot determine home directory".into()))
}

/// Location: ~/.eterna/config/eterna.toml
pub fn default_config_path() -> EternaResult<PathBuf> {
    Ok(eterna_home()?.join("config").join("eterna.toml"))
}

/// Load configuration from `path`; a missing file yields the defaults.
pub fn load_config(path: &Path) -> EternaResult<EternaConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(EternaConfig::default());
    }
    let contents = fs::read_to_string(path)?;
    let config: EternaConfig = toml::from_str(&contents)?;
    config.coefficients.validate()?;
    Ok(config)
}

pub fn save_config(path: &Path, config: &EternaConfig) -> EternaResult<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_coefficients(contents: &str) -> EternaResult<Coefficients> {
        let coefficients: Coefficients = toml::from_str(contents)?;
        coefficients.validate()?;
        Ok(coefficients)
    }

    #[test]
    fn test_default_coefficients_are_valid() {
        let coefficients = Coefficients::default();
        assert!(coefficients.validate().is_ok());
        assert_eq!(coefficients.base_usage.villa.fixed_w, 1800.0);
        assert_eq!(coefficients.savings.pool_villa, 85.0);
        assert_eq!(coefficients.impact.co2_kg_per_tree, 8.5);
        assert_eq!(coefficients.efficiency.cap, 95.0);
        assert_eq!(coefficients.billing.aed_per_watt, 0.35);
    }

    #[test]
    fn test_duplex_uses_townhouse_model() {
        let base = BaseUsageCoefficients::default();
        assert_eq!(base.model_for(HomeType::Duplex), &base.townhouse);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let coefficients = parse_coefficients(
            r#"
[savings]
pool_villa = 100.0

[base_usage.villa]
fixed_w = 2000.0
per_ac_unit_w = 150.0
per_person_w = 80.0
"#,
        )
        .unwrap();
        assert_eq!(coefficients.savings.pool_villa, 100.0);
        assert_eq!(coefficients.savings.ac_per_unit, 40.0);
        assert_eq!(coefficients.base_usage.villa.fixed_w, 2000.0);
        assert_eq!(coefficients.base_usage.apartment.fixed_w, 1200.0);
    }

    #[test]
    fn test_zero_tree_factor_rejected() {
        let err = parse_coefficients("[impact]\nco2_kg_per_tree = 0.0\n").unwrap_err();
        assert!(matches!(err, EternaError::Config(_)));
        assert!(err.to_string().contains("co2_kg_per_tree"));
    }

    #[test]
    fn test_non_finite_efficiency_terms_rejected() {
        let err = parse_coefficients("[efficiency]\nbase = nan\n").unwrap_err();
        assert!(err.to_string().contains("efficiency.base"));
        let err = parse_coefficients("[efficiency]\nper_person = inf\n").unwrap_err();
        assert!(err.to_string().contains("efficiency.per_person"));

        let tuned = parse_coefficients("[efficiency]\nbase = -10.0\nper_ac_unit = -1.0\n").unwrap();
        assert_eq!(tuned.efficiency.base, -10.0);
    }

    #[test]
    fn test_negative_coefficient_rejected() {
        let err = parse_coefficients("[billing]\naed_per_watt = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("billing.aed_per_watt"));
    }

    #[test]
    fn test_config_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("eterna.toml");
        let mut config = EternaConfig::default();
        config.logging.level = "debug".into();
        config.coefficients.savings.kitchen_fixed = 25.0;
        save_config(&path, &config).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.logging.level, "debug");
        assert_eq!(loaded.coefficients.savings.kitchen_fixed, 25.0);
        assert_eq!(loaded.data.export_dir, ".");
    }

    #[test]
    fn test_missing_config_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.coefficients, Coefficients::default());
    }
}
