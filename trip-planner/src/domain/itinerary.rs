//! Day plans and the finished itinerary.

use chrono::NaiveDate;
use serde::Serialize;

use super::poi::PointOfInterest;
use super::stop::Stop;

/// One day of driving.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    /// 1-based day number.
    pub day_index: usize,
    pub date: Option<NaiveDate>,
    /// Where the day ends. The final day ends at the destination and has none.
    pub overnight_stop: Option<Stop>,
    pub roadside_stops: Vec<Stop>,
    pub food_options: Vec<PointOfInterest>,
    pub driving_distance_meters: f64,
    /// Estimated from the route's average speed.
    pub driving_hours: f64,
    pub total_activity_hours: f64,
    /// Roadside stops were dropped to fit the activity budget.
    pub over_budget: bool,
}

/// A planned trip, one entry per requested day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    pub pace: &'static str,
    pub total_distance_m: f64,
    pub total_duration_s: f64,
    pub ideal_daily_distance_m: f64,
    pub days: Vec<DayPlan>,
}

impl Itinerary {
    /// Overnight stops in travel order.
    pub fn overnight_stops(&self) -> impl Iterator<Item = &Stop> {
        self.days.iter().filter_map(|d| d.overnight_stop.as_ref())
    }

    /// Sum of per-day driving distances.
    pub fn planned_distance_m(&self) -> f64 {
        self.days.iter().map(|d| d.driving_distance_meters).sum()
    }
}
