use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use eterna_core::{HomeType, UserProfile};

/// A profile read from disk, plus the `home_type` label it carried when that
/// label was not one of the known kinds (the profile then holds Townhouse).
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedProfile {
    pub profile: UserProfile,
    pub unknown_home_type: Option<String>,
}

#[derive(Deserialize)]
struct RawLabels {
    #[serde(default)]
    home_type: Option<String>,
}

/// Load a stored profile. YAML for `.yaml`/`.yml`, JSON for `.json`, and for
/// any other extension YAML first with a JSON fallback.
pub fn load_profile(path: &Path) -> Result<UserProfile> {
    Ok(read_profile(path)?.profile)
}

/// [`load_profile`] that also reports a home type label which fell back to
/// Townhouse during deserialization.
pub fn read_profile(path: &Path) -> Result<LoadedProfile> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading profile '{}'", path.display()))?;
    debug!(path = %path.display(), "loading profile");
    let ext = path.extension().and_then(|ext| ext.to_str());
    let profile: UserProfile = parse_document(&data, ext)?;
    let labels: RawLabels = parse_document(&data, ext)?;
    let unknown_home_type = labels
        .home_type
        .filter(|label| HomeType::from_label(label).is_none());
    Ok(LoadedProfile {
        profile,
        unknown_home_type,
    })
}

fn parse_document<T: DeserializeOwned>(data: &str, ext: Option<&str>) -> Result<T> {
    match ext {
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            serde_yaml::from_str(data).context("parsing profile yaml")
        }
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            serde_json::from_str(data).context("parsing profile json")
        }
        _ => serde_yaml::from_str(data)
            .or_else(|_| serde_json::from_str(data))
            .context("parsing profile"),
    }
}

/// Write a profile, picking JSON for `.json` and YAML otherwise.
pub fn save_profile(path: &Path, profile: &UserProfile) -> Result<()> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let contents = if is_json {
        serde_json::to_string_pretty(profile).context("serializing profile json")?
    } else {
        serde_yaml::to_string(profile).context("serializing profile yaml")?
    };
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating directory '{}'", dir.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("writing profile '{}'", path.display()))
}

/// One name per line, trimmed, blank lines dropped.
pub fn parse_room_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_room_list() {
        let rooms = parse_room_list("Master Bedroom\n\n  Kitchen  \r\nGuest Room\n");
        assert_eq!(rooms, vec!["Master Bedroom", "Kitchen", "Guest Room"]);
        assert!(parse_room_list("   \n").is_empty());
    }
}
