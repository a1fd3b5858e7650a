//! Per-room load breakdown.

use serde::{Deserialize, Serialize};

use eterna_core::{Coefficients, HomeType, UserProfile, Watts};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomUsage {
    pub name: String,
    pub usage: Watts,
}

/// Load of a single room, matched on keywords in its name. The first match in
/// the order bedroom, living, kitchen, pool wins; pools only count at villas.
pub fn room_load(name: &str, profile: &UserProfile, coefficients: &Coefficients) -> Watts {
    let rooms = &coefficients.rooms;
    let lower = name.to_lowercase();
    let base = if lower.contains("bedroom") {
        rooms.bedroom_w
    } else if lower.contains("living") {
        rooms.living_w
    } else if lower.contains("kitchen") {
        rooms.kitchen_w
    } else if lower.contains("pool") && profile.home_type == HomeType::Villa {
        rooms.pool_villa_w
    } else {
        rooms.fallback_w
    };
    Watts(base + rooms.per_person_w * f64::from(profile.family_size))
}

/// One entry per declared room, in declaration order.
pub fn room_usage(profile: &UserProfile, coefficients: &Coefficients) -> Vec<RoomUsage> {
    profile
        .rooms
        .iter()
        .map(|name| RoomUsage {
            name: name.clone(),
            usage: room_load(name, profile, coefficients),
        })
        .collect()
}
