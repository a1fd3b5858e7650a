//! # eterna-core: household energy domain model
//!
//! Shared types for the ETERNA workspace. The estimator, the simulated
//! telemetry stub, session handling and the CLI all speak in these terms.
//!
//! ## Quick Start
//!
//! ```rust
//! use eterna_core::*;
//!
//! let mut profile = UserProfile::new(HomeType::Villa, 3, 5)
//!     .with_location(Emirate::AbuDhabi)
//!     .with_rooms(["Master Bedroom", "Kitchen", "Pool"]);
//!
//! // Repair out-of-range values at the boundary instead of failing later
//! let diagnostics = profile.sanitize();
//! assert!(!diagnostics.has_issues());
//!
//! let coefficients = Coefficients::default();
//! assert_eq!(coefficients.base_usage.model_for(profile.home_type).fixed_w, 1800.0);
//! ```
//!
//! ## Modules
//!
//! - [`profile`] - [`UserProfile`], [`HomeType`], [`Emirate`] and boundary validation
//! - [`config`] - [`Coefficients`] for every formula constant, plus the TOML config file
//! - [`units`] - [`Watts`], [`Aed`], [`KgCo2`] newtypes
//! - [`diagnostics`] - warnings collected while sanitizing input
//! - [`error`] - [`EternaError`] and [`EternaResult`]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod profile;
pub mod units;

pub use config::{
    default_config_path, eterna_home, load_config, save_config, BaseUsageCoefficients,
    BillingCoefficients, Coefficients, DataConfig, EfficiencyCoefficients, EternaConfig,
    ImpactCoefficients, LoggingConfig, RoomCoefficients, SavingsCoefficients, UsageModel,
};
pub use diagnostics::{DiagnosticIssue, Diagnostics, Severity};
pub use error::{EternaError, EternaResult};
pub use profile::{
    Emirate, HomeType, UserProfile, AC_UNITS_RANGE, BILL_TARGET_RANGE, FAMILY_SIZE_RANGE,
};
pub use units::{Aed, KgCo2, Watts};
