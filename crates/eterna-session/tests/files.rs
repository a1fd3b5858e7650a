use chrono::{TimeZone, Utc};
use eterna_core::{Aed, Emirate, HomeType, UserProfile};
use eterna_estimator::Estimator;
use eterna_session::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn load_yaml_and_json_profiles() {
    let dir = tempdir().unwrap();

    let yaml = dir.path().join("home.yaml");
    fs::write(
        &yaml,
        "home_type: Villa\nac_units: 3\nfamily_size: 5\nlocation: Abu Dhabi\n",
    )
    .unwrap();
    let profile = load_profile(&yaml).unwrap();
    assert_eq!(profile.home_type, HomeType::Villa);
    assert_eq!(profile.location, Emirate::AbuDhabi);

    let json = dir.path().join("home.json");
    fs::write(&json, r#"{"home_type": "Duplex", "ac_units": 1}"#).unwrap();
    let profile = load_profile(&json).unwrap();
    assert_eq!(profile.home_type, HomeType::Duplex);
    assert_eq!(profile.family_size, 4);
}

#[test]
fn unknown_home_type_label_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("castle.yaml");
    fs::write(&path, "home_type: Castle\nac_units: 2\n").unwrap();
    let loaded = read_profile(&path).unwrap();
    assert_eq!(loaded.profile.home_type, HomeType::Townhouse);
    assert_eq!(loaded.unknown_home_type.as_deref(), Some("Castle"));

    let json = dir.path().join("villa.json");
    fs::write(&json, r#"{"home_type": " villa "}"#).unwrap();
    let loaded = read_profile(&json).unwrap();
    assert_eq!(loaded.profile.home_type, HomeType::Villa);
    assert_eq!(loaded.unknown_home_type, None);

    let bare = dir.path().join("bare.json");
    fs::write(&bare, "{}").unwrap();
    assert_eq!(read_profile(&bare).unwrap().unknown_home_type, None);
}

#[test]
fn unknown_extension_falls_back_to_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("profile.txt");
    fs::write(&path, r#"{"ac_units": 7}"#).unwrap();
    assert_eq!(load_profile(&path).unwrap().ac_units, 7);
}

#[test]
fn malformed_profile_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    let err = load_profile(&path).unwrap_err();
    assert!(format!("{err:#}").contains("parsing profile json"));

    let missing = dir.path().join("missing.yaml");
    let err = load_profile(&missing).unwrap_err();
    assert!(format!("{err:#}").contains("missing.yaml"));
}

#[test]
fn save_then_load_profile() {
    let dir = tempdir().unwrap();
    let profile = UserProfile::new(HomeType::Townhouse, 4, 6)
        .with_bill_target(Aed(750.0))
        .with_rooms(["Study", "Guest Room"]);
    for name in ["nested/p.yaml", "p.json"] {
        let path = dir.path().join(name);
        save_profile(&path, &profile).unwrap();
        assert_eq!(load_profile(&path).unwrap(), profile);
    }
}

#[test]
fn export_writes_default_name_and_reads_back() {
    let dir = tempdir().unwrap();
    let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    let profile = UserProfile::new(HomeType::Villa, 3, 5);
    let doc = ExportDocument::build(&profile, &Estimator::default(), at);

    let path = write_export(&doc, None, dir.path()).unwrap();
    assert_eq!(path, dir.path().join("eterna_profile_20240601.json"));

    let back = read_export(&path).unwrap();
    assert_eq!(back.profile, profile);
    assert_eq!(back.export_date, at);
    assert_eq!(back.report, doc.report);

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["profile"]["home_type"], "Villa");
    assert_eq!(raw["report"]["result"]["base_usage"], 2650.0);
}
