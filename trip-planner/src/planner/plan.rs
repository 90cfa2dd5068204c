//! The planning pipeline.
//!
//! sample -> scout -> rank -> select -> assemble -> food. Only the scout,
//! naming and food steps suspend; they run per candidate in batches of
//! `batch_size` and are joined before the next stage, so stop order never
//! depends on completion order.

use std::future::Future;

use chrono::NaiveDate;
use futures::future::join_all;
use tracing::{debug, info};

use crate::domain::{
    Candidate, Category, Itinerary, PaceConfig, Route, Stop, StopKind, fallback_stop_name,
};

use super::assemble::Assembler;
use super::config::PlannerConfig;
use super::overnight::{OvernightCandidate, OvernightSelector, uncovered_boundaries};
use super::provider::{LodgingProvider, PoiProvider, ReverseGeocoder};
use super::rank::{rank_food, rank_lodging, rank_pois};
use super::roadside::{RoadsideCandidate, select_roadside};
use super::sampler::{RouteSampler, Sampling};
use super::scout::Scout;

/// Error from itinerary planning.
///
/// Only invalid input is reported; collaborator failures are absorbed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Day count below one
    #[error("days must be at least 1, got {0}")]
    InvalidDays(usize),

    /// Route has zero length
    #[error("route has no distance to plan over")]
    DegenerateRoute,

    /// A tunable is out of range
    #[error("invalid planner configuration: {0}")]
    InvalidConfig(String),
}

/// Best-effort progress callback: `(percent, message)`.
pub type Progress<'p> = &'p (dyn Fn(u8, &str) + Sync);

/// Itinerary planner over a set of place providers.
pub struct Planner<'a, L, P, G> {
    lodging: &'a L,
    pois: &'a [P],
    names: &'a G,
    config: &'a PlannerConfig,
    preferences: &'a [Category],
    start_date: Option<NaiveDate>,
}

impl<'a, L, P, G> Planner<'a, L, P, G>
where
    L: LodgingProvider,
    P: PoiProvider,
    G: ReverseGeocoder,
{
    /// Create a new planner.
    pub fn new(lodging: &'a L, pois: &'a [P], names: &'a G, config: &'a PlannerConfig) -> Self {
        Self {
            lodging,
            pois,
            names,
            config,
            preferences: &[],
            start_date: None,
        }
    }

    /// Categories to boost (and, when any match, restrict to) at roadside stops.
    pub fn with_preferences(mut self, preferences: &'a [Category]) -> Self {
        self.preferences = preferences;
        self
    }

    /// Date of the first day.
    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Plan `days` days of driving along `route`.
    pub async fn plan_itinerary(
        &self,
        route: &Route,
        days: usize,
        pace: &PaceConfig,
        on_progress: Option<Progress<'_>>,
    ) -> Result<Itinerary, PlanError> {
        if days == 0 {
            return Err(PlanError::InvalidDays(days));
        }
        if !(route.total_distance_m() > 0.0) {
            return Err(PlanError::DegenerateRoute);
        }
        self.config.validate()?;

        let total = route.total_distance_m();
        let ideal = total / days as f64;
        info!(
            days,
            pace = pace.name,
            total_km = total / 1000.0,
            "Planning itinerary"
        );

        let sampler = RouteSampler::new(route);
        let scout = Scout::new(self.lodging, self.pois, self.config);

        report(on_progress, 10, "Searching for places to stay");
        let overnight_stops = self
            .overnight_stops(&sampler, &scout, days, ideal, pace)
            .await;

        report(on_progress, 45, "Finding roadside attractions");
        let roadside_stops = self.roadside_stops(&sampler, &scout, ideal, pace).await;

        report(on_progress, 75, "Assembling itinerary");
        let mut itinerary = Assembler::new(pace, self.config).assemble(
            route,
            days,
            &overnight_stops,
            &roadside_stops,
            self.start_date,
        );

        report(on_progress, 85, "Finding places to eat");
        self.add_food(&sampler, &scout, &mut itinerary).await;

        info!(
            days = itinerary.days.len(),
            overnight = itinerary.overnight_stops().count(),
            roadside = itinerary
                .days
                .iter()
                .map(|d| d.roadside_stops.len())
                .sum::<usize>(),
            "Itinerary planned"
        );
        report(on_progress, 100, "Done");
        Ok(itinerary)
    }

    /// Exactly `days - 1` overnight stops in route order: selected candidates
    /// with lodging, plus basic stops on uncovered day boundaries.
    async fn overnight_stops(
        &self,
        sampler: &RouteSampler<'_>,
        scout: &Scout<'_, L, P>,
        days: usize,
        ideal: f64,
        pace: &PaceConfig,
    ) -> Vec<Stop> {
        if days < 2 {
            return Vec::new();
        }

        let samples = sampler.sample(
            Sampling::Interval(ideal * self.config.overnight_sample_fraction),
            self.config.max_overnight_candidates,
        );
        debug!(candidates = samples.len(), "Scouting overnight candidates");

        let radius = pace.accommodation_radius_m;
        let limit = self.config.lodging_limit;
        let scouted = self
            .batched(samples, |candidate| async move {
                let lodging = scout.lodging_near(&candidate, radius, limit).await;
                OvernightCandidate { candidate, lodging }
            })
            .await;

        let selected = OvernightSelector::new(self.config).select(scouted, days, ideal);
        if selected.is_empty() {
            info!("No lodging found along the route, using basic stops");
        }

        let taken: Vec<f64> = selected.iter().map(|c| c.distance_from_start()).collect();
        let needed = (days - 1).saturating_sub(selected.len());
        let basic = uncovered_boundaries(&taken, days, ideal, needed)
            .into_iter()
            .map(|d| (sampler.point_at(d), StopKind::Basic));

        let mut unnamed: Vec<(Candidate, StopKind)> = selected
            .into_iter()
            .map(|c| {
                let accommodations = rank_lodging(c.lodging, limit);
                (c.candidate, StopKind::Overnight { accommodations })
            })
            .chain(basic)
            .collect();
        unnamed.sort_by(|a, b| a.0.distance_from_start.total_cmp(&b.0.distance_from_start));

        self.batched(unnamed, |(candidate, kind)| self.name_stop(candidate, kind))
            .await
    }

    async fn roadside_stops(
        &self,
        sampler: &RouteSampler<'_>,
        scout: &Scout<'_, L, P>,
        ideal: f64,
        pace: &PaceConfig,
    ) -> Vec<Stop> {
        let samples = sampler.sample(
            Sampling::Interval(ideal * self.config.roadside_sample_fraction),
            self.config.max_roadside_candidates,
        );
        debug!(candidates = samples.len(), "Scouting roadside candidates");

        let radius = pace.poi_radius_m;
        let keep = pace.max_pois_per_stop;
        let preferences = self.preferences;
        let scouted = self
            .batched(samples, |candidate| async move {
                // Over-fetch so ranking has something to choose from.
                let found = scout.pois_near(&candidate, radius, keep * 2).await;
                RoadsideCandidate {
                    candidate,
                    attractions: rank_pois(found, preferences, keep),
                }
            })
            .await;

        let selected = select_roadside(scouted, pace, self.config);
        debug!(stops = selected.len(), "Roadside stops selected");

        let unnamed: Vec<(Candidate, StopKind)> = selected
            .into_iter()
            .map(|c| {
                let kind = StopKind::Roadside {
                    attractions: c.attractions,
                };
                (c.candidate, kind)
            })
            .collect();
        self.batched(unnamed, |(candidate, kind)| self.name_stop(candidate, kind))
            .await
    }

    /// Food near each day's end point: the overnight stop, or the point on
    /// the route where the day's driving ends.
    async fn add_food(
        &self,
        sampler: &RouteSampler<'_>,
        scout: &Scout<'_, L, P>,
        itinerary: &mut Itinerary,
    ) {
        let mut end = 0.0;
        let points: Vec<_> = itinerary
            .days
            .iter()
            .map(|day| {
                end += day.driving_distance_meters;
                day.overnight_stop
                    .as_ref()
                    .map_or_else(|| sampler.point_at(end).position(), Stop::position)
            })
            .collect();

        let limit = self.config.food_limit;
        let food = self
            .batched(points, |at| async move {
                rank_food(scout.food_near(at, limit).await, limit)
            })
            .await;

        for (day, options) in itinerary.days.iter_mut().zip(food) {
            day.food_options = options;
        }
    }

    /// Promote a candidate to a stop, named by the reverse geocoder when it
    /// answers in time.
    async fn name_stop(&self, candidate: Candidate, kind: StopKind) -> Stop {
        let lookup = self.names.lookup(candidate.position());
        let found = match tokio::time::timeout(self.config.request_timeout(), lookup).await {
            Ok(found) => found,
            Err(_) => {
                debug!(at = %candidate.position(), "Reverse geocode timed out");
                None
            }
        };
        let (name, full_address) = match found {
            Some(place) => (place.name, Some(place.full_address)),
            None => (fallback_stop_name(candidate.distance_from_start), None),
        };
        Stop {
            candidate,
            name,
            full_address,
            kind,
        }
    }

    /// Run `f` over `items` with at most `batch_size` calls in flight,
    /// keeping input order.
    async fn batched<T, R, Fut>(&self, items: Vec<T>, f: impl Fn(T) -> Fut) -> Vec<R>
    where
        Fut: Future<Output = R>,
    {
        let mut results = Vec::with_capacity(items.len());
        let mut items = items.into_iter();
        loop {
            let batch: Vec<Fut> = items.by_ref().take(self.config.batch_size).map(&f).collect();
            if batch.is_empty() {
                break;
            }
            results.extend(join_all(batch).await);
        }
        results
    }
}

fn report(on_progress: Option<Progress<'_>>, percent: u8, message: &str) {
    debug!(percent, message, "Planning progress");
    if let Some(callback) = on_progress {
        callback(percent, message);
    }
}
