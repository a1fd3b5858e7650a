use serde::{Deserialize, Serialize};
use tracing::debug;

use eterna_core::{Aed, Coefficients, HomeType, KgCo2, UserProfile, Watts};

/// Savings bucket reported by the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingsCategory {
    Ac,
    Pool,
    Kitchen,
    Lighting,
}

impl SavingsCategory {
    pub const ALL: [SavingsCategory; 4] = [
        SavingsCategory::Ac,
        SavingsCategory::Pool,
        SavingsCategory::Kitchen,
        SavingsCategory::Lighting,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SavingsCategory::Ac => "ac",
            SavingsCategory::Pool => "pool",
            SavingsCategory::Kitchen => "kitchen",
            SavingsCategory::Lighting => "lighting",
        }
    }
}

/// Monthly savings per category, AED.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategorySavings {
    pub ac: Aed,
    pub pool: Aed,
    pub kitchen: Aed,
    pub lighting: Aed,
}

impl CategorySavings {
    pub fn get(&self, category: SavingsCategory) -> Aed {
        match category {
            SavingsCategory::Ac => self.ac,
            SavingsCategory::Pool => self.pool,
            SavingsCategory::Kitchen => self.kitchen,
            SavingsCategory::Lighting => self.lighting,
        }
    }

    /// Categories in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (SavingsCategory, Aed)> + '_ {
        SavingsCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    pub fn total(&self) -> Aed {
        self.ac + self.pool + self.kitchen + self.lighting
    }
}

/// Everything derived from one profile. Recomputed on every submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub base_usage: Watts,
    pub category_savings: CategorySavings,
    pub total_savings: Aed,
    pub annual_savings: Aed,
    pub co2_reduction: KgCo2,
    pub trees_equivalent: f64,
    /// 0 to the configured cap (95 by default)
    pub efficiency_score: f64,
    /// May be negative when modelled savings exceed the modelled bill
    pub predicted_bill: Aed,
}

/// Base load in watts for the profile's home type and counts.
pub fn base_usage(profile: &UserProfile, coefficients: &Coefficients) -> Watts {
    let model = coefficients.base_usage.model_for(profile.home_type);
    Watts(
        model.fixed_w
            + model.per_ac_unit_w * f64::from(profile.ac_units)
            + model.per_person_w * f64::from(profile.family_size),
    )
}

pub fn category_savings(
    profile: &UserProfile,
    base: Watts,
    coefficients: &Coefficients,
) -> CategorySavings {
    let s = &coefficients.savings;
    CategorySavings {
        ac: Aed(s.ac_per_unit * f64::from(profile.ac_units) + s.ac_usage_factor * base.value()),
        pool: if profile.home_type == HomeType::Villa {
            Aed(s.pool_villa)
        } else {
            Aed(0.0)
        },
        kitchen: Aed(s.kitchen_per_person * f64::from(profile.family_size) + s.kitchen_fixed),
        lighting: Aed(s.lighting_usage_factor * base.value()),
    }
}

/// Synthetic score from counts alone, capped and floored at zero.
pub fn efficiency_score(profile: &UserProfile, coefficients: &Coefficients) -> f64 {
    let e = &coefficients.efficiency;
    let raw = e.base
        + e.per_ac_unit * f64::from(profile.ac_units)
        + e.per_person * f64::from(profile.family_size);
    raw.min(e.cap).max(0.0)
}

/// Monthly bill implied by the base load before any savings.
pub fn gross_bill(base: Watts, coefficients: &Coefficients) -> Aed {
    Aed(base.value() * coefficients.billing.aed_per_watt)
}

/// Compute every derived figure for `profile`. Total over the profile domain.
pub fn estimate(profile: &UserProfile, coefficients: &Coefficients) -> EstimationResult {
    let base = base_usage(profile, coefficients);
    let category_savings = category_savings(profile, base, coefficients);
    let total_savings = category_savings.total();
    let co2_reduction = KgCo2(coefficients.impact.co2_kg_per_aed * total_savings.value());

    let result = EstimationResult {
        base_usage: base,
        category_savings,
        total_savings,
        annual_savings: total_savings * coefficients.savings.months_per_year,
        co2_reduction,
        trees_equivalent: co2_reduction.value() / coefficients.impact.co2_kg_per_tree,
        efficiency_score: efficiency_score(profile, coefficients),
        predicted_bill: gross_bill(base, coefficients) - total_savings,
    };
    debug!(
        home_type = %profile.home_type,
        ac_units = profile.ac_units,
        family_size = profile.family_size,
        base_w = result.base_usage.value(),
        total_aed = result.total_savings.value(),
        "estimate computed"
    );
    result
}
