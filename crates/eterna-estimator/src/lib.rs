//! # eterna-estimator: deterministic savings estimation
//!
//! Maps a [`UserProfile`] to base usage, per-category savings, CO₂ reduction,
//! an efficiency score and a bill prediction. Every function here is pure:
//! no I/O, no shared state, same input gives bit-identical output.
//!
//! ```
//! use eterna_core::{HomeType, UserProfile};
//! use eterna_estimator::Estimator;
//!
//! let estimator = Estimator::default();
//! let result = estimator.compute(&UserProfile::new(HomeType::Villa, 3, 5));
//! assert_eq!(result.base_usage.value(), 2650.0);
//! assert_eq!(result.efficiency_score, 79.0);
//! ```
//!
//! Beyond the core numbers, [`Estimator::report`] bundles the per-room load
//! breakdown, personalized tips and the bill-target comparison shown next to
//! them.

use serde::{Deserialize, Serialize};

use eterna_core::{Coefficients, EternaResult, UserProfile};

pub mod estimate;
pub mod rooms;
pub mod target;
pub mod tips;

pub use estimate::{
    base_usage, category_savings, efficiency_score, estimate, gross_bill, CategorySavings,
    EstimationResult, SavingsCategory,
};
pub use rooms::{room_load, room_usage, RoomUsage};
pub use target::{bill_target_progress, EfficiencyRating, TargetProgress, TargetStatus};
pub use tips::{recommendations, Recommendation, TipKind, MAX_TIPS};

/// Stateless estimator bound to one coefficient table.
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    coefficients: Coefficients,
}

/// Result plus the presentation extras derived from the same profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateReport {
    pub result: EstimationResult,
    pub rating: EfficiencyRating,
    pub rooms: Vec<RoomUsage>,
    pub tips: Vec<Recommendation>,
    pub target: TargetProgress,
}

impl Estimator {
    /// Build an estimator after checking the table for negative or
    /// non-finite entries.
    pub fn new(coefficients: Coefficients) -> EternaResult<Self> {
        coefficients.validate()?;
        Ok(Self { coefficients })
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    pub fn compute(&self, profile: &UserProfile) -> EstimationResult {
        estimate(profile, &self.coefficients)
    }

    pub fn room_usage(&self, profile: &UserProfile) -> Vec<RoomUsage> {
        room_usage(profile, &self.coefficients)
    }

    /// Whole-dirham monthly bill from base load, before savings.
    pub fn current_bill(&self, profile: &UserProfile) -> eterna_core::Aed {
        gross_bill(base_usage(profile, &self.coefficients), &self.coefficients).floor()
    }

    pub fn target_progress(&self, profile: &UserProfile) -> TargetProgress {
        bill_target_progress(self.current_bill(profile), profile.bill_target)
    }

    pub fn report(&self, profile: &UserProfile) -> EstimateReport {
        let result = self.compute(profile);
        EstimateReport {
            rating: EfficiencyRating::from_score(result.efficiency_score),
            rooms: self.room_usage(profile),
            tips: recommendations(profile),
            target: self.target_progress(profile),
            result,
        }
    }
}
