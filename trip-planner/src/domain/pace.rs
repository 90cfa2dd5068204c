//! Named pace presets.

use std::str::FromStr;

use serde::Serialize;

use super::error::DomainError;

/// Planning parameters selected by the traveller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaceConfig {
    pub name: &'static str,

    /// Driving hours per day the traveller is happy with.
    pub max_daily_driving_hours: f64,

    /// Most roadside stops to schedule on one day.
    pub max_roadside_stops: usize,

    /// Attractions with a shorter typical visit (hours) are skipped.
    pub min_activity_time: f64,

    /// Initial lodging search radius around an overnight candidate.
    pub accommodation_radius_m: f64,

    /// Initial attraction search radius around a roadside candidate.
    pub poi_radius_m: f64,

    /// Attractions kept per roadside stop.
    pub max_pois_per_stop: usize,
}

impl PaceConfig {
    /// Fewer, longer stops and short driving days.
    pub const RELAXED: PaceConfig = PaceConfig {
        name: "relaxed",
        max_daily_driving_hours: 4.0,
        max_roadside_stops: 2,
        min_activity_time: 1.5,
        accommodation_radius_m: 16_000.0,
        poi_radius_m: 16_000.0,
        max_pois_per_stop: 5,
    };

    pub const MODERATE: PaceConfig = PaceConfig {
        name: "moderate",
        max_daily_driving_hours: 6.0,
        max_roadside_stops: 3,
        min_activity_time: 1.0,
        accommodation_radius_m: 16_000.0,
        poi_radius_m: 12_000.0,
        max_pois_per_stop: 5,
    };

    /// Long days and many quick stops.
    pub const ACTIVE: PaceConfig = PaceConfig {
        name: "active",
        max_daily_driving_hours: 8.0,
        max_roadside_stops: 5,
        min_activity_time: 0.5,
        accommodation_radius_m: 16_000.0,
        poi_radius_m: 8_000.0,
        max_pois_per_stop: 4,
    };

    pub const PRESETS: [PaceConfig; 3] = [Self::RELAXED, Self::MODERATE, Self::ACTIVE];

    /// Look up a preset by name (case-insensitive).
    pub fn preset(name: &str) -> Result<PaceConfig, DomainError> {
        let wanted = name.trim();
        Self::PRESETS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(wanted))
            .cloned()
            .ok_or_else(|| DomainError::UnknownPace(name.to_string()))
    }
}

impl Default for PaceConfig {
    fn default() -> Self {
        Self::MODERATE
    }
}

impl FromStr for PaceConfig {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::preset(s)
    }
}
