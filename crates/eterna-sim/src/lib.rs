//! Simulated telemetry.
//!
//! Nothing in this crate is measured. These are the placeholder numbers the
//! dashboard shows where a real meter feed would go: "live" orchestration
//! cycles, a 30-day bill forecast, what-if scenario impacts and room-by-room
//! flow. Keep them away from anything that presents itself as an estimate;
//! deterministic figures come from `eterna-estimator`.
//!
//! A seed makes every sequence reproducible.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use eterna_core::{Aed, EternaError, Watts};

pub const DEFAULT_CYCLES: usize = 20;
pub const MAX_CYCLES: usize = 1000;
pub const DEFAULT_FORECAST_DAYS: usize = 30;
pub const MAX_FORECAST_DAYS: usize = 3650;

pub const DEFAULT_DEVICES: [&str; 6] = [
    "Master Bedroom AC",
    "Living Room AC",
    "Pool Pump",
    "Kitchen Appliances",
    "Outdoor Lighting",
    "Entertainment",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceState {
    Optimizing,
    Optimized,
    Efficient,
}

impl DeviceState {
    const ALL: [DeviceState; 3] = [
        DeviceState::Optimizing,
        DeviceState::Optimized,
        DeviceState::Efficient,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DeviceState::Optimizing => "Optimizing",
            DeviceState::Optimized => "Optimized",
            DeviceState::Efficient => "Efficient",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatus {
    pub device: String,
    pub state: DeviceState,
    /// Claimed monthly saving, 5..=25 AED
    pub savings: Aed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationCycle {
    /// 1-based
    pub cycle: usize,
    pub devices: Vec<DeviceStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted: Aed,
    pub actual: Aed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WhatIfScenario {
    AddSolarPanels,
    UpgradeAc,
    SmartPool,
    BetterInsulation,
    AddGuestWing,
}

impl WhatIfScenario {
    pub const ALL: [WhatIfScenario; 5] = [
        WhatIfScenario::AddSolarPanels,
        WhatIfScenario::UpgradeAc,
        WhatIfScenario::SmartPool,
        WhatIfScenario::BetterInsulation,
        WhatIfScenario::AddGuestWing,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WhatIfScenario::AddSolarPanels => "Add Solar Panels",
            WhatIfScenario::UpgradeAc => "Upgrade AC",
            WhatIfScenario::SmartPool => "Smart Pool",
            WhatIfScenario::BetterInsulation => "Better Insulation",
            WhatIfScenario::AddGuestWing => "Add Guest Wing",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            WhatIfScenario::AddSolarPanels => "add-solar-panels",
            WhatIfScenario::UpgradeAc => "upgrade-ac",
            WhatIfScenario::SmartPool => "smart-pool",
            WhatIfScenario::BetterInsulation => "better-insulation",
            WhatIfScenario::AddGuestWing => "add-guest-wing",
        }
    }
}

impl fmt::Display for WhatIfScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WhatIfScenario {
    type Err = EternaError;

    /// Accepts the slug ("upgrade-ac") or the label ("Upgrade AC").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.slug() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|s| s.slug()).collect();
                EternaError::Parse(format!(
                    "unknown scenario '{s}'; expected one of {}",
                    known.join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioImpact {
    pub scenario: WhatIfScenario,
    /// 15..=40
    pub efficiency_gain_pct: u32,
    /// 150..=400 AED
    pub monthly_savings: Aed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EarlyWarning {
    pub title: &'static str,
    pub problem: &'static str,
    pub solution: &'static str,
}

const EARLY_WARNINGS: [EarlyWarning; 4] = [
    EarlyWarning {
        title: "AC Overuse Detected",
        problem: "Bill will increase 28%",
        solution: "Optimize now to save AED 185",
    },
    EarlyWarning {
        title: "Peak Hour Spike",
        problem: "3PM usage 45% above normal",
        solution: "Shift usage to save AED 95",
    },
    EarlyWarning {
        title: "Standby Power Waste",
        problem: "AED 65 monthly ghost load",
        solution: "Smart plugs can save 80%",
    },
    EarlyWarning {
        title: "Pool Pump Inefficiency",
        problem: "Running 4 extra hours daily",
        solution: "Optimize schedule: Save AED 120",
    },
];

/// The fixed warning list shown on the bill page.
pub fn early_warnings() -> &'static [EarlyWarning] {
    &EARLY_WARNINGS
}

/// Random-number source for all simulated figures.
pub struct SimulatedTelemetry {
    rng: StdRng,
}

impl SimulatedTelemetry {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed
            .map(StdRng::seed_from_u64)
            .unwrap_or_else(StdRng::from_entropy);
        Self { rng }
    }

    /// `cycles` rounds over `devices`, each device getting a random state and
    /// a random claimed saving.
    pub fn orchestrate<S: AsRef<str>>(
        &mut self,
        cycles: usize,
        devices: &[S],
    ) -> Vec<OrchestrationCycle> {
        debug!(cycles, devices = devices.len(), "simulating orchestration");
        (1..=cycles)
            .map(|cycle| OrchestrationCycle {
                cycle,
                devices: devices
                    .iter()
                    .map(|device| DeviceStatus {
                        device: device.as_ref().to_string(),
                        state: *DeviceState::ALL
                            .choose(&mut self.rng)
                            .unwrap_or(&DeviceState::Optimizing),
                        savings: Aed(f64::from(self.rng.gen_range(5u32..=25))),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Daily bill points starting at `start`: a 5 AED/day upward trend on a
    /// 400 AED baseline, with noise on both the prediction and the "actual".
    /// The series ends early if it would run past the last representable date.
    pub fn bill_forecast(&mut self, start: NaiveDate, days: usize) -> Vec<ForecastPoint> {
        (0..days)
            .map_while(|i| {
                let date = start.checked_add_days(Days::new(i as u64))?;
                let predicted = 400.0 + 5.0 * i as f64 + f64::from(self.rng.gen_range(-20i32..=20));
                let actual = predicted + f64::from(self.rng.gen_range(-30i32..=30));
                Some(ForecastPoint {
                    date,
                    predicted: Aed(predicted),
                    actual: Aed(actual),
                })
            })
            .collect()
    }

    pub fn what_if(&mut self, scenario: WhatIfScenario) -> ScenarioImpact {
        ScenarioImpact {
            scenario,
            efficiency_gain_pct: self.rng.gen_range(15..=40),
            monthly_savings: Aed(f64::from(self.rng.gen_range(150u32..=400))),
        }
    }

    /// Random 200..=600 W per room.
    pub fn room_flow<S: AsRef<str>>(&mut self, rooms: &[S]) -> Vec<(String, Watts)> {
        rooms
            .iter()
            .map(|room| {
                (
                    room.as_ref().to_string(),
                    Watts(f64::from(self.rng.gen_range(200u32..=600))),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_runs_repeat() {
        let a = SimulatedTelemetry::new(Some(7)).orchestrate(3, &DEFAULT_DEVICES);
        let b = SimulatedTelemetry::new(Some(7)).orchestrate(3, &DEFAULT_DEVICES);
        assert_eq!(a, b);
    }

    #[test]
    fn test_orchestration_shape_and_ranges() {
        let cycles = SimulatedTelemetry::new(Some(1)).orchestrate(DEFAULT_CYCLES, &DEFAULT_DEVICES);
        assert_eq!(cycles.len(), DEFAULT_CYCLES);
        assert_eq!(cycles[0].cycle, 1);
        assert_eq!(cycles[DEFAULT_CYCLES - 1].cycle, DEFAULT_CYCLES);
        for cycle in &cycles {
            assert_eq!(cycle.devices.len(), DEFAULT_DEVICES.len());
            for status in &cycle.devices {
                assert!((5.0..=25.0).contains(&status.savings.value()));
            }
        }
    }

    #[test]
    fn test_forecast_dates_and_noise_bounds() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let points = SimulatedTelemetry::new(Some(42)).bill_forecast(start, DEFAULT_FORECAST_DAYS);
        assert_eq!(points.len(), 30);
        assert_eq!(points[29].date, NaiveDate::from_ymd_opt(2024, 4, 9).unwrap());
        for (i, point) in points.iter().enumerate() {
            let trend = 400.0 + 5.0 * i as f64;
            assert!((point.predicted.value() - trend).abs() <= 20.0);
            assert!((point.actual.value() - point.predicted.value()).abs() <= 30.0);
        }
    }

    #[test]
    fn test_forecast_stops_at_last_date() {
        let near_end = NaiveDate::MAX.pred_opt().unwrap().pred_opt().unwrap();
        let points = SimulatedTelemetry::new(Some(5)).bill_forecast(near_end, 5);
        assert_eq!(points.len(), 3);
        assert_eq!(points[2].date, NaiveDate::MAX);

        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(SimulatedTelemetry::new(Some(5)).bill_forecast(start, 0).is_empty());
    }

    #[test]
    fn test_what_if_ranges() {
        let mut sim = SimulatedTelemetry::new(Some(3));
        for scenario in WhatIfScenario::ALL {
            let impact = sim.what_if(scenario);
            assert_eq!(impact.scenario, scenario);
            assert!((15..=40).contains(&impact.efficiency_gain_pct));
            assert!((150.0..=400.0).contains(&impact.monthly_savings.value()));
        }
    }

    #[test]
    fn test_scenario_parsing() {
        assert_eq!(
            "Upgrade AC".parse::<WhatIfScenario>().unwrap(),
            WhatIfScenario::UpgradeAc
        );
        assert_eq!(
            "add_solar_panels".parse::<WhatIfScenario>().unwrap(),
            WhatIfScenario::AddSolarPanels
        );
        assert!("teleport".parse::<WhatIfScenario>().is_err());
    }

    #[test]
    fn test_room_flow_range() {
        let flow = SimulatedTelemetry::new(Some(9)).room_flow(&["Kitchen", "Pool"]);
        assert_eq!(flow.len(), 2);
        assert!(flow
            .iter()
            .all(|(_, w)| (200.0..=600.0).contains(&w.value())));
    }

    #[test]
    fn test_early_warnings_fixed() {
        assert_eq!(early_warnings().len(), 4);
        assert_eq!(early_warnings()[0].title, "AC Overuse Detected");
    }
}
