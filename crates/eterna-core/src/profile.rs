//! Household profile: the only input the estimator reads.
//!
//! A profile is a fixed record with explicit defaults. Files written before a
//! field existed still load, because every field falls back to the value of
//! [`UserProfile::default`].

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::diagnostics::Diagnostics;
use crate::error::{EternaError, EternaResult};
use crate::units::Aed;

/// Accepted number of AC units.
pub const AC_UNITS_RANGE: RangeInclusive<u32> = 1..=10;
/// Accepted number of household members.
pub const FAMILY_SIZE_RANGE: RangeInclusive<u32> = 1..=15;
/// Accepted monthly bill target in AED.
pub const BILL_TARGET_RANGE: RangeInclusive<f64> = 100.0..=2000.0;

/// Kind of dwelling.
///
/// Deserialization is lenient: an unrecognized label becomes
/// [`HomeType::Townhouse`], whose coefficients are also the default branch of
/// the usage formula. Use [`str::parse`] for strict parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HomeType {
    #[default]
    Apartment,
    Villa,
    Townhouse,
    Duplex,
}

impl HomeType {
    pub const ALL: [HomeType; 4] = [
        HomeType::Apartment,
        HomeType::Villa,
        HomeType::Townhouse,
        HomeType::Duplex,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HomeType::Apartment => "Apartment",
            HomeType::Villa => "Villa",
            HomeType::Townhouse => "Townhouse",
            HomeType::Duplex => "Duplex",
        }
    }

    /// Parse a label, returning `None` when it is not one of the four kinds.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(&normalized))
    }

    /// Parse a label, falling back to `Townhouse` when it is unknown.
    pub fn from_label_lenient(label: &str) -> Self {
        Self::from_label(label).unwrap_or_else(|| {
            warn!(label, "unrecognized home type, using Townhouse");
            HomeType::Townhouse
        })
    }
}

impl fmt::Display for HomeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HomeType {
    type Err = EternaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| {
            EternaError::Parse(format!(
                "unknown home type '{s}'; expected one of Apartment, Villa, Townhouse, Duplex"
            ))
        })
    }
}

impl From<String> for HomeType {
    fn from(value: String) -> Self {
        Self::from_label_lenient(&value)
    }
}

impl From<HomeType> for String {
    fn from(value: HomeType) -> Self {
        value.label().to_string()
    }
}

/// UAE emirate. Shown next to the profile; no formula reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Emirate {
    #[default]
    Dubai,
    AbuDhabi,
    Sharjah,
    Ajman,
    RasAlKhaimah,
    Fujairah,
    UmmAlQuwain,
}

impl Emirate {
    pub const ALL: [Emirate; 7] = [
        Emirate::Dubai,
        Emirate::AbuDhabi,
        Emirate::Sharjah,
        Emirate::Ajman,
        Emirate::RasAlKhaimah,
        Emirate::Fujairah,
        Emirate::UmmAlQuwain,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Emirate::Dubai => "Dubai",
            Emirate::AbuDhabi => "Abu Dhabi",
            Emirate::Sharjah => "Sharjah",
            Emirate::Ajman => "Ajman",
            Emirate::RasAlKhaimah => "Ras Al Khaimah",
            Emirate::Fujairah => "Fujairah",
            Emirate::UmmAlQuwain => "Umm Al Quwain",
        }
    }

    /// Accepts "Abu Dhabi", "abu-dhabi" and "abu_dhabi" alike.
    pub fn from_label(label: &str) -> Option<Self> {
        let squash = |s: &str| -> String {
            s.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect()
        };
        let wanted = squash(label);
        Self::ALL
            .into_iter()
            .find(|emirate| squash(emirate.label()) == wanted)
    }
}

impl fmt::Display for Emirate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Emirate {
    type Err = EternaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| EternaError::Parse(format!("unknown emirate '{s}'")))
    }
}

impl From<String> for Emirate {
    fn from(value: String) -> Self {
        Self::from_label(&value).unwrap_or_else(|| {
            warn!(label = %value, "unrecognized emirate, using Dubai");
            Emirate::Dubai
        })
    }
}

impl From<Emirate> for String {
    fn from(value: Emirate) -> Self {
        value.label().to_string()
    }
}

/// Declared household characteristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub home_type: HomeType,
    pub ac_units: u32,
    pub family_size: u32,
    pub location: Emirate,
    pub bill_target: Aed,
    pub rooms: Vec<String>,
    pub appliances: Vec<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            home_type: HomeType::Apartment,
            ac_units: 2,
            family_size: 4,
            location: Emirate::Dubai,
            bill_target: Aed(400.0),
            rooms: vec![
                "Living Room".to_string(),
                "Master Bedroom".to_string(),
                "Kitchen".to_string(),
            ],
            appliances: vec![
                "AC".to_string(),
                "Refrigerator".to_string(),
                "Washing Machine".to_string(),
            ],
        }
    }
}

impl UserProfile {
    /// Profile with the given counts and default everything else.
    pub fn new(home_type: HomeType, ac_units: u32, family_size: u32) -> Self {
        Self {
            home_type,
            ac_units,
            family_size,
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: Emirate) -> Self {
        self.location = location;
        self
    }

    pub fn with_bill_target(mut self, target: Aed) -> Self {
        self.bill_target = target;
        self
    }

    pub fn with_rooms<I, S>(mut self, rooms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rooms = rooms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_appliances<I, S>(mut self, appliances: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.appliances = appliances.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_room_containing(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.rooms
            .iter()
            .any(|room| room.to_lowercase().contains(&needle))
    }

    /// Clamp every bounded field into its accepted range and drop blank room
    /// and appliance names. Each repair is reported as a warning.
    pub fn sanitize(&mut self) -> Diagnostics {
        let mut diag = Diagnostics::new();

        self.ac_units = clamp_count(self.ac_units, &AC_UNITS_RANGE, "ac_units", &mut diag);
        self.family_size =
            clamp_count(self.family_size, &FAMILY_SIZE_RANGE, "family_size", &mut diag);

        let target = self.bill_target.value();
        if !target.is_finite() {
            let fallback = Self::default().bill_target;
            diag.add_field_warning(
                "clamp",
                "bill_target",
                &format!("{target} replaced by {}", fallback.value()),
            );
            self.bill_target = fallback;
        } else {
            let clamped = target.clamp(*BILL_TARGET_RANGE.start(), *BILL_TARGET_RANGE.end());
            if clamped != target {
                diag.add_field_warning(
                    "clamp",
                    "bill_target",
                    &format!("{target} clamped to {clamped}"),
                );
                self.bill_target = Aed(clamped);
            }
        }

        let before = self.rooms.len();
        self.rooms = tidy_names(std::mem::take(&mut self.rooms));
        if self.rooms.len() != before {
            diag.add_field_warning(
                "tidy",
                "rooms",
                &format!("dropped {} blank entries", before - self.rooms.len()),
            );
        }
        self.appliances = tidy_names(std::mem::take(&mut self.appliances));

        diag
    }

    /// Consuming form of [`UserProfile::sanitize`].
    pub fn sanitized(mut self) -> (Self, Diagnostics) {
        let diag = self.sanitize();
        (self, diag)
    }

    /// Every out-of-range field as a field error. Nothing is modified.
    pub fn check(&self) -> Diagnostics {
        let mut diag = Diagnostics::new();
        if !AC_UNITS_RANGE.contains(&self.ac_units) {
            diag.add_field_error(
                "range",
                "ac_units",
                &format!(
                    "ac_units {} outside {}..={}",
                    self.ac_units,
                    AC_UNITS_RANGE.start(),
                    AC_UNITS_RANGE.end()
                ),
            );
        }
        if !FAMILY_SIZE_RANGE.contains(&self.family_size) {
            diag.add_field_error(
                "range",
                "family_size",
                &format!(
                    "family_size {} outside {}..={}",
                    self.family_size,
                    FAMILY_SIZE_RANGE.start(),
                    FAMILY_SIZE_RANGE.end()
                ),
            );
        }
        if !BILL_TARGET_RANGE.contains(&self.bill_target.value()) {
            diag.add_field_error(
                "range",
                "bill_target",
                &format!(
                    "bill_target {} outside {}..={}",
                    self.bill_target.value(),
                    BILL_TARGET_RANGE.start(),
                    BILL_TARGET_RANGE.end()
                ),
            );
        }
        diag
    }

    /// Strict boundary check: reject instead of clamping.
    pub fn validate(&self) -> EternaResult<()> {
        let diag = self.check();
        if !diag.has_errors() {
            return Ok(());
        }
        let problems: Vec<&str> = diag.errors().map(|issue| issue.message.as_str()).collect();
        Err(EternaError::Validation(problems.join("; ")))
    }
}

fn clamp_count(
    value: u32,
    range: &RangeInclusive<u32>,
    field: &str,
    diag: &mut Diagnostics,
) -> u32 {
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        diag.add_field_warning("clamp", field, &format!("{value} clamped to {clamped}"));
    }
    clamped
}

fn tidy_names(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_matches_session_bootstrap() {
        let profile = UserProfile::default();
        assert_eq!(profile.home_type, HomeType::Apartment);
        assert_eq!(profile.ac_units, 2);
        assert_eq!(profile.family_size, 4);
        assert_eq!(profile.location, Emirate::Dubai);
        assert_eq!(profile.bill_target, Aed(400.0));
        assert_eq!(profile.rooms.len(), 3);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_home_type_parsing() {
        assert_eq!("villa".parse::<HomeType>().unwrap(), HomeType::Villa);
        assert_eq!(" Duplex ".parse::<HomeType>().unwrap(), HomeType::Duplex);
        assert!("castle".parse::<HomeType>().is_err());
        assert_eq!(HomeType::from_label_lenient("castle"), HomeType::Townhouse);
    }

    #[test]
    fn test_emirate_label_variants() {
        assert_eq!(Emirate::from_label("abu-dhabi"), Some(Emirate::AbuDhabi));
        assert_eq!(Emirate::from_label("Ras Al Khaimah"), Some(Emirate::RasAlKhaimah));
        assert_eq!(Emirate::from_label("umm_al_quwain"), Some(Emirate::UmmAlQuwain));
        assert_eq!(Emirate::from_label("Muscat"), None);
    }

    #[test]
    fn test_sanitize_clamps_and_reports() {
        let mut profile = UserProfile::new(HomeType::Villa, 0, 40)
            .with_bill_target(Aed(50.0))
            .with_rooms(["Kitchen", "  ", "Pool "]);
        let diag = profile.sanitize();
        assert_eq!(profile.ac_units, 1);
        assert_eq!(profile.family_size, 15);
        assert_eq!(profile.bill_target, Aed(100.0));
        assert_eq!(profile.rooms, vec!["Kitchen", "Pool"]);
        assert_eq!(diag.for_field("ac_units").count(), 1);
        assert_eq!(diag.for_field("family_size").count(), 1);
        assert_eq!(diag.for_field("bill_target").count(), 1);
        assert_eq!(diag.for_field("rooms").count(), 1);
    }

    #[test]
    fn test_sanitize_leaves_valid_profile_untouched() {
        let (profile, diag) = UserProfile::default().sanitized();
        assert_eq!(profile, UserProfile::default());
        assert!(!diag.has_issues());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let err = UserProfile::new(HomeType::Apartment, 11, 0)
            .validate()
            .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("ac_units 11"));
        assert!(text.contains("family_size 0"));
    }

    #[test]
    fn test_check_reports_field_errors_without_repairing() {
        let profile = UserProfile::new(HomeType::Villa, 3, 5).with_bill_target(Aed(50.0));
        let diag = profile.check();
        assert_eq!(diag.error_count(), 1);
        assert_eq!(diag.warning_count(), 0);
        assert_eq!(diag.for_field("bill_target").count(), 1);
        assert_eq!(profile.bill_target, Aed(50.0));
        assert!(!UserProfile::default().check().has_issues());
    }

    #[test]
    fn test_room_lookup_is_case_insensitive() {
        let profile = UserProfile::default().with_rooms(["Open KITCHEN", "Study"]);
        assert!(profile.has_room_containing("kitchen"));
        assert!(!profile.has_room_containing("pool"));
    }
}
