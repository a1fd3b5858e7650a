//! Personalized savings tips.

use serde::{Deserialize, Serialize};

use eterna_core::{Aed, HomeType, UserProfile};

/// At most this many tips are shown.
pub const MAX_TIPS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipKind {
    AcOptimization,
    PoolManagement,
    FamilyScheduling,
    KitchenEfficiency,
    PeakAvoidance,
    StandbyPower,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: TipKind,
    pub title: String,
    pub description: String,
    /// Lower bound of the advertised monthly saving
    pub savings_hint: Aed,
}

impl Recommendation {
    fn new(kind: TipKind, title: &str, description: impl Into<String>, savings: f64) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description: description.into(),
            savings_hint: Aed(savings),
        }
    }
}

/// Profile-specific tips first, then the two generic ones, truncated to
/// [`MAX_TIPS`].
pub fn recommendations(profile: &UserProfile) -> Vec<Recommendation> {
    let mut tips = Vec::new();
    if profile.ac_units > 3 {
        tips.push(Recommendation::new(
            TipKind::AcOptimization,
            "AC Optimization",
            format!("Optimize {} AC units", profile.ac_units),
            120.0,
        ));
    }
    if profile.home_type == HomeType::Villa {
        tips.push(Recommendation::new(
            TipKind::PoolManagement,
            "Pool Management",
            "Smart pool scheduling",
            85.0,
        ));
    }
    if profile.family_size > 4 {
        tips.push(Recommendation::new(
            TipKind::FamilyScheduling,
            "Family Scheduling",
            "Coordinate family usage",
            65.0,
        ));
    }
    if profile.has_room_containing("kitchen") {
        tips.push(Recommendation::new(
            TipKind::KitchenEfficiency,
            "Kitchen Efficiency",
            "Optimize cooking hours",
            45.0,
        ));
    }
    tips.push(Recommendation::new(
        TipKind::PeakAvoidance,
        "Peak Avoidance",
        "Shift heavy usage",
        75.0,
    ));
    tips.push(Recommendation::new(
        TipKind::StandbyPower,
        "Standby Power",
        "Reduce ghost loads",
        35.0,
    ));
    tips.truncate(MAX_TIPS);
    tips
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(profile: &UserProfile) -> Vec<TipKind> {
        recommendations(profile).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_default_profile_tips() {
        // Apartment, 2 AC units, family of 4, has a kitchen
        assert_eq!(
            kinds(&UserProfile::default()),
            vec![
                TipKind::KitchenEfficiency,
                TipKind::PeakAvoidance,
                TipKind::StandbyPower
            ]
        );
    }

    #[test]
    fn test_large_villa_truncates_to_four() {
        let profile = UserProfile::new(HomeType::Villa, 6, 8);
        let tips = recommendations(&profile);
        assert_eq!(tips.len(), MAX_TIPS);
        assert_eq!(tips[0].description, "Optimize 6 AC units");
        assert_eq!(
            tips.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TipKind::AcOptimization,
                TipKind::PoolManagement,
                TipKind::FamilyScheduling,
                TipKind::KitchenEfficiency
            ]
        );
    }

    #[test]
    fn test_no_rooms_gets_generic_tips_only() {
        let profile = UserProfile::new(HomeType::Townhouse, 1, 1).with_rooms(Vec::<String>::new());
        let tips = recommendations(&profile);
        assert_eq!(tips.len(), 2);
        assert_eq!(tips[1].savings_hint, Aed(35.0));
    }
}
