//! Tunables for itinerary planning.

use std::time::Duration;

use super::plan::PlanError;

/// Smallest accepted `spacing_factor`. Overnight stops are never closer than
/// this share of the ideal daily distance.
pub const MIN_SPACING_FACTOR: f64 = 0.2;

/// Configuration parameters for itinerary planning.
///
/// Factors are fractions of the ideal daily distance unless noted.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Minimum gap between two overnight stops. At least
    /// [`MIN_SPACING_FACTOR`].
    pub spacing_factor: f64,

    /// Maximum deviation of an overnight stop from its day boundary.
    pub tolerance_factor: f64,

    /// Weight of the lodging count in the overnight score.
    /// The score is `distance_from_target / ideal - lodging_count * weight`.
    pub accommodation_weight: f64,

    /// Cap on overnight candidates sampled per trip.
    pub max_overnight_candidates: usize,

    /// Overnight sampling interval.
    pub overnight_sample_fraction: f64,

    /// Cap on roadside candidates sampled per trip.
    pub max_roadside_candidates: usize,

    /// Roadside sampling interval. Denser than overnight sampling.
    pub roadside_sample_fraction: f64,

    /// Roadside stops kept before day-bucketing, as a multiple of the
    /// pace's `max_roadside_stops`.
    pub roadside_cap_factor: usize,

    /// Share of the daily driving hours available for activities.
    pub activity_budget_factor: f64,

    /// Share of `max_roadside_stops` kept on an over-budget day.
    pub truncate_factor: f64,

    /// Number of radius steps tried (R, 2R, 3R, ...).
    pub radius_escalation_steps: usize,

    /// Lodging options kept per overnight stop.
    pub lodging_limit: usize,

    /// Placeholders generated when every radius step came back empty.
    /// Must be positive so a scouted candidate is never left empty.
    pub synthetic_poi_count: usize,

    /// Food options per day.
    pub food_limit: usize,

    /// Food search radius around a day's end point (meters).
    pub food_radius_m: f64,

    /// Candidates scouted concurrently.
    pub batch_size: usize,

    /// Per-call timeout for collaborator queries (seconds).
    pub request_timeout_secs: u64,
}

impl PlannerConfig {
    /// Returns the collaborator timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Check that every tunable is usable.
    pub fn validate(&self) -> Result<(), PlanError> {
        let fractions = [
            ("spacing_factor", self.spacing_factor),
            ("tolerance_factor", self.tolerance_factor),
            ("overnight_sample_fraction", self.overnight_sample_fraction),
            ("roadside_sample_fraction", self.roadside_sample_fraction),
            ("activity_budget_factor", self.activity_budget_factor),
            ("truncate_factor", self.truncate_factor),
        ];
        for (name, value) in fractions {
            if !(value > 0.0 && value <= 1.0) {
                return Err(PlanError::InvalidConfig(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }
        if self.spacing_factor < MIN_SPACING_FACTOR {
            return Err(PlanError::InvalidConfig(format!(
                "spacing_factor must be at least {MIN_SPACING_FACTOR}, got {}",
                self.spacing_factor
            )));
        }
        if !(self.accommodation_weight >= 0.0) {
            return Err(PlanError::InvalidConfig(format!(
                "accommodation_weight must be non-negative, got {}",
                self.accommodation_weight
            )));
        }
        if !(self.food_radius_m > 0.0) {
            return Err(PlanError::InvalidConfig(format!(
                "food_radius_m must be positive, got {}",
                self.food_radius_m
            )));
        }
        let counts = [
            ("max_overnight_candidates", self.max_overnight_candidates),
            ("max_roadside_candidates", self.max_roadside_candidates),
            ("roadside_cap_factor", self.roadside_cap_factor),
            ("radius_escalation_steps", self.radius_escalation_steps),
            ("lodging_limit", self.lodging_limit),
            ("synthetic_poi_count", self.synthetic_poi_count),
            ("batch_size", self.batch_size),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(PlanError::InvalidConfig(format!("{name} must be positive")));
            }
        }
        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            spacing_factor: 0.25,
            tolerance_factor: 0.45,
            accommodation_weight: 0.05,
            max_overnight_candidates: 24,
            overnight_sample_fraction: 0.1,
            max_roadside_candidates: 30,
            roadside_sample_fraction: 0.05,
            roadside_cap_factor: 4,
            activity_budget_factor: 0.6,
            truncate_factor: 0.7,
            radius_escalation_steps: 3,
            lodging_limit: 10,
            synthetic_poi_count: 3,
            food_limit: 5,
            food_radius_m: 2_000.0,
            batch_size: 4,
            request_timeout_secs: 20,
        }
    }
}
