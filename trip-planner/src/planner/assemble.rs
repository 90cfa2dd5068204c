//! Itinerary assembly.
//!
//! Buckets the selected stops into fixed-width day bands of
//! `ideal_daily_distance` and derives per-day driving distance, driving time
//! and activity totals. Days that would exceed the activity budget keep fewer
//! roadside stops instead of failing.

use std::cmp::Ordering;

use chrono::{Days, NaiveDate};

use crate::domain::{DayPlan, Itinerary, PaceConfig, Route, Stop};

use super::config::PlannerConfig;

/// The stretch of road belonging to one day.
///
/// Bands are closed on both ends; a stop exactly on a boundary belongs to the
/// earlier day. The last band runs to the end of the route.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DayBand {
    start: f64,
    end: f64,
    first: bool,
    last: bool,
}

impl DayBand {
    fn new(ideal: f64, day: usize, days: usize) -> Self {
        Self {
            start: ideal * (day - 1) as f64,
            end: ideal * day as f64,
            first: day == 1,
            last: day == days,
        }
    }

    fn contains(&self, d: f64) -> bool {
        let after_start = d > self.start || (self.first && d >= self.start);
        let before_end = d <= self.end || self.last;
        after_start && before_end
    }
}

/// Builds the day-by-day plan from selected stops.
#[derive(Debug, Clone, Copy)]
pub struct Assembler<'a> {
    pace: &'a PaceConfig,
    config: &'a PlannerConfig,
}

impl<'a> Assembler<'a> {
    pub fn new(pace: &'a PaceConfig, config: &'a PlannerConfig) -> Self {
        Self { pace, config }
    }

    /// Assemble `days` day plans.
    ///
    /// `overnight` must be sorted by distance. Food options are left empty
    /// for the caller to fill.
    pub fn assemble(
        &self,
        route: &Route,
        days: usize,
        overnight: &[Stop],
        roadside: &[Stop],
        start_date: Option<NaiveDate>,
    ) -> Itinerary {
        let total = route.total_distance_m();
        let ideal = if days > 0 { total / days as f64 } else { 0.0 };
        let speed = route.average_speed_mps();

        let mut next_night = 0;
        let mut previous_end = 0.0;
        let mut plans = Vec::with_capacity(days);

        for day in 1..=days {
            let band = DayBand::new(ideal, day, days);

            let overnight_stop = if band.last {
                None
            } else {
                pick_overnight(band, days - day, overnight, &mut next_night)
            };

            let end = if band.last {
                total
            } else {
                overnight_stop
                    .as_ref()
                    .map_or(band.end, Stop::distance_from_start)
                    .max(previous_end)
            };
            let driving_distance_meters = end - previous_end;
            previous_end = end;

            let (roadside_stops, over_budget) = self.roadside_for(band, roadside);
            let total_activity_hours: f64 = roadside_stops.iter().map(Stop::activity_hours).sum();

            plans.push(DayPlan {
                day_index: day,
                date: start_date.and_then(|d| d.checked_add_days(Days::new(day as u64 - 1))),
                overnight_stop,
                roadside_stops,
                food_options: Vec::new(),
                driving_distance_meters,
                driving_hours: speed.map_or(0.0, |mps| driving_distance_meters / mps / 3600.0),
                total_activity_hours,
                over_budget,
            });
        }

        Itinerary {
            pace: self.pace.name,
            total_distance_m: total,
            total_duration_s: route.total_duration_s(),
            ideal_daily_distance_m: ideal,
            days: plans,
        }
    }

    /// Roadside stops for one band, best first up to the pace's limit, then
    /// trimmed further if the activity budget is exceeded. Returned in route
    /// order, with whether trimming happened.
    fn roadside_for(&self, band: DayBand, roadside: &[Stop]) -> (Vec<Stop>, bool) {
        let mut stops: Vec<&Stop> = roadside
            .iter()
            .filter(|s| band.contains(s.distance_from_start()))
            .collect();
        stops.sort_by(|a, b| by_priority(a, b));
        stops.truncate(self.pace.max_roadside_stops);

        let budget = self.pace.max_daily_driving_hours * self.config.activity_budget_factor;
        let hours: f64 = stops.iter().map(|s| s.activity_hours()).sum();
        let over_budget = hours > budget;
        if over_budget {
            let keep =
                (self.pace.max_roadside_stops as f64 * self.config.truncate_factor).floor() as usize;
            stops.truncate(keep);
        }

        stops.sort_by(|a, b| a.distance_from_start().total_cmp(&b.distance_from_start()));
        (stops.into_iter().cloned().collect(), over_budget)
    }
}

/// The next overnight stop in route order, taken if it lies no further than
/// the end of `band`, or if the stops left would otherwise outnumber the
/// `nights_left` (this one included). Every stop is used when there are no
/// more stops than nights.
fn pick_overnight(
    band: DayBand,
    nights_left: usize,
    overnight: &[Stop],
    next_night: &mut usize,
) -> Option<Stop> {
    let stop = overnight.get(*next_night)?;
    let stops_left = overnight.len() - *next_night;
    if stop.distance_from_start() <= band.end || stops_left >= nights_left {
        *next_night += 1;
        Some(stop.clone())
    } else {
        None
    }
}

/// Best attraction first, then longer visits, then earlier on the route.
fn by_priority(a: &Stop, b: &Stop) -> Ordering {
    b.best_priority()
        .cmp(&a.best_priority())
        .then_with(|| b.activity_hours().total_cmp(&a.activity_hours()))
        .then_with(|| a.distance_from_start().total_cmp(&b.distance_from_start()))
}
