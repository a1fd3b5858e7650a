//! Bill-target comparison and efficiency rating.

use serde::{Deserialize, Serialize};

use eterna_core::Aed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    AboveTarget,
    OnTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetProgress {
    pub current_bill: Aed,
    pub target: Aed,
    /// `current_bill - target`; positive when over budget
    pub difference: Aed,
    /// 0..=100
    pub progress_pct: f64,
    pub status: TargetStatus,
}

/// Compare a monthly bill with the household's target.
///
/// At or below target counts as 100 %. Above target, progress shrinks by the
/// overshoot relative to the target and bottoms out at 0; a zero target is
/// treated as fully missed.
pub fn bill_target_progress(current_bill: Aed, target: Aed) -> TargetProgress {
    let difference = current_bill - target;
    let (progress_pct, status) = if current_bill > target {
        let pct = if target.value() > 0.0 {
            ((1.0 - difference.value() / target.value()) * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        (pct, TargetStatus::AboveTarget)
    } else {
        (100.0, TargetStatus::OnTarget)
    };
    TargetProgress {
        current_bill,
        target,
        difference,
        progress_pct,
        status,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyRating {
    Excellent,
    Good,
    NeedsImprovement,
}

impl EfficiencyRating {
    pub fn from_score(score: f64) -> Self {
        if score > 80.0 {
            EfficiencyRating::Excellent
        } else if score > 65.0 {
            EfficiencyRating::Good
        } else {
            EfficiencyRating::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EfficiencyRating::Excellent => "Excellent",
            EfficiencyRating::Good => "Good",
            EfficiencyRating::NeedsImprovement => "Needs improvement",
        }
    }
}

impl std::fmt::Display for EfficiencyRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_under_target_is_complete() {
        let p = bill_target_progress(Aed(300.0), Aed(400.0));
        assert_eq!(p.status, TargetStatus::OnTarget);
        assert_eq!(p.progress_pct, 100.0);
        assert_eq!(p.difference, Aed(-100.0));
    }

    #[test]
    fn test_over_target_scales_down() {
        // The default profile: floor(1680 * 0.35) = 588 against 400
        let p = bill_target_progress(Aed(588.0), Aed(400.0));
        assert_eq!(p.status, TargetStatus::AboveTarget);
        assert!((p.progress_pct - 53.0).abs() < 1e-9);
    }

    #[test]
    fn test_double_target_bottoms_out() {
        let p = bill_target_progress(Aed(900.0), Aed(400.0));
        assert_eq!(p.progress_pct, 0.0);
    }

    #[test]
    fn test_zero_target() {
        let p = bill_target_progress(Aed(10.0), Aed(0.0));
        assert_eq!(p.progress_pct, 0.0);
        assert_eq!(p.status, TargetStatus::AboveTarget);
    }

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(EfficiencyRating::from_score(81.0), EfficiencyRating::Excellent);
        assert_eq!(EfficiencyRating::from_score(80.0), EfficiencyRating::Good);
        assert_eq!(EfficiencyRating::from_score(65.0), EfficiencyRating::NeedsImprovement);
        assert_eq!(EfficiencyRating::Good.to_string(), "Good");
    }
}
