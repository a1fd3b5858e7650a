use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use eterna_core::{Diagnostics, UserProfile};
use eterna_estimator::{EstimationResult, Estimator};

/// Profile and latest result for one interactive session.
///
/// Owned by the caller and passed to whatever renders it. There is no history:
/// every update overwrites the previous result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    profile: UserProfile,
    result: Option<EstimationResult>,
    updated_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(UserProfile::default())
    }
}

impl Session {
    /// Start a session without computing anything yet.
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            result: None,
            updated_at: Utc::now(),
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn result(&self) -> Option<&EstimationResult> {
        self.result.as_ref()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace the profile (after clamping it) and recompute.
    pub fn update_profile(
        &mut self,
        profile: UserProfile,
        estimator: &Estimator,
    ) -> (&EstimationResult, Diagnostics) {
        let (profile, diagnostics) = profile.sanitized();
        for issue in diagnostics.warnings() {
            info!("profile adjusted: {issue}");
        }
        self.profile = profile;
        (self.recalculate(estimator), diagnostics)
    }

    /// Recompute from the current profile, overwriting the previous result.
    pub fn recalculate(&mut self, estimator: &Estimator) -> &EstimationResult {
        self.updated_at = Utc::now();
        self.result.insert(estimator.compute(&self.profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eterna_core::{Aed, HomeType, Watts};

    #[test]
    fn test_new_session_has_no_result() {
        let session = Session::default();
        assert!(session.result().is_none());
        assert_eq!(session.profile(), &UserProfile::default());
    }

    #[test]
    fn test_update_overwrites_result() {
        let estimator = Estimator::default();
        let mut session = Session::default();
        session.recalculate(&estimator);
        assert_eq!(session.result().unwrap().base_usage, Watts(1680.0));

        let (result, diag) =
            session.update_profile(UserProfile::new(HomeType::Villa, 3, 5), &estimator);
        assert_eq!(result.base_usage, Watts(2650.0));
        assert!(!diag.has_issues());
        assert_eq!(session.profile().home_type, HomeType::Villa);
    }

    #[test]
    fn test_update_clamps_before_computing() {
        let estimator = Estimator::default();
        let mut session = Session::default();
        let profile = UserProfile::new(HomeType::Apartment, 50, 2).with_bill_target(Aed(400.0));
        let (result, diag) = session.update_profile(profile, &estimator);
        // 10 AC units after clamping
        assert_eq!(result.base_usage, Watts(1200.0 + 1200.0 + 120.0));
        assert_eq!(diag.warning_count(), 1);
        assert_eq!(session.profile().ac_units, 10);
    }
}
