//! Candidate data scouting.
//!
//! Fetches lodging and attractions around a candidate from the external
//! providers. Every provider call is independently fallible: an error or
//! timeout becomes an empty list for that provider only. Searches widen the
//! radius (R, 2R, 3R, ...) until something comes back, and fall back to a
//! small set of synthetic placeholders so a visited candidate never ends up
//! with nothing at all.

use std::future::Future;

use futures::future::join_all;
use tracing::debug;

use crate::domain::{
    Candidate, Category, LatLon, LodgingOption, PoiSource, PointOfInterest,
};

use super::config::PlannerConfig;
use super::provider::{LodgingProvider, PoiKind, PoiProvider, ProviderError, SearchArea};

/// Placeholder attractions, in the order they are generated.
const SYNTHETIC_POIS: &[(&str, Category)] = &[
    ("Local attractions", Category::Attraction),
    ("Scenic viewpoint", Category::Viewpoint),
    ("Historic town centre", Category::Cultural),
    ("Town park", Category::Park),
];

/// Placeholder lodging, in the order it is generated.
const SYNTHETIC_LODGING: &[(&str, Category)] = &[
    ("Hotels nearby", Category::Hotel),
    ("Motels nearby", Category::Motel),
    ("Campgrounds nearby", Category::Campground),
    ("Guest houses nearby", Category::Guesthouse),
];

/// Queries the place providers around route candidates.
pub struct Scout<'a, L, P> {
    lodging: &'a L,
    pois: &'a [P],
    config: &'a PlannerConfig,
}

impl<'a, L, P> Scout<'a, L, P>
where
    L: LodgingProvider,
    P: PoiProvider,
{
    pub fn new(lodging: &'a L, pois: &'a [P], config: &'a PlannerConfig) -> Self {
        Self {
            lodging,
            pois,
            config,
        }
    }

    /// Lodging around `candidate`, widening the radius until something is found.
    ///
    /// Falls back to synthetic placeholders when every step is empty.
    pub async fn lodging_near(
        &self,
        candidate: &Candidate,
        radius_m: f64,
        limit: usize,
    ) -> Vec<LodgingOption> {
        for step in 1..=self.config.radius_escalation_steps {
            let area = SearchArea::new(candidate.position(), radius_m * step as f64, limit);
            let found = self
                .guarded("lodging", area.center, self.lodging.search_lodging(area))
                .await;
            if !found.is_empty() {
                return found;
            }
        }

        debug!(
            distance_km = candidate.distance_from_start / 1000.0,
            "No lodging found, using placeholders"
        );
        synthetic_lodging(candidate, self.config.synthetic_poi_count)
    }

    /// Attractions from every provider around `candidate`, unranked.
    ///
    /// Widens the radius until any provider returns something, and falls back
    /// to synthetic placeholders when every step is empty.
    pub async fn pois_near(
        &self,
        candidate: &Candidate,
        radius_m: f64,
        limit: usize,
    ) -> Vec<PointOfInterest> {
        for step in 1..=self.config.radius_escalation_steps {
            let area = SearchArea::new(candidate.position(), radius_m * step as f64, limit);
            let found = self.all_providers(area, PoiKind::Attractions).await;
            if !found.is_empty() {
                return found;
            }
        }

        debug!(
            distance_km = candidate.distance_from_start / 1000.0,
            "No attractions found, using placeholders"
        );
        synthetic_pois(candidate, self.config.synthetic_poi_count)
    }

    /// Food around `at` from every provider, unranked. May be empty.
    pub async fn food_near(&self, at: LatLon, limit: usize) -> Vec<PointOfInterest> {
        let area = SearchArea::new(at, self.config.food_radius_m, limit);
        self.all_providers(area, PoiKind::Food).await
    }

    /// Query every POI provider concurrently and concatenate the results in
    /// provider order.
    async fn all_providers(&self, area: SearchArea, kind: PoiKind) -> Vec<PointOfInterest> {
        let calls = self
            .pois
            .iter()
            .map(|provider| self.guarded("poi", area.center, provider.search_pois(area, kind)));
        join_all(calls).await.into_iter().flatten().collect()
    }

    /// Run one provider call with a timeout, turning any failure into an
    /// empty list.
    async fn guarded<T>(
        &self,
        provider: &'static str,
        at: LatLon,
        call: impl Future<Output = Result<Vec<T>, ProviderError>>,
    ) -> Vec<T> {
        let timeout = self.config.request_timeout();
        let result = match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(timeout)),
        };
        match result {
            Ok(found) => found,
            Err(e) => {
                debug!(provider, at = %at, error = %e, "Provider call failed, using empty");
                Vec::new()
            }
        }
    }
}

/// Generic lodging placeholders at the candidate's position.
pub fn synthetic_lodging(candidate: &Candidate, count: usize) -> Vec<LodgingOption> {
    let km = candidate.distance_from_start / 1000.0;
    SYNTHETIC_LODGING
        .iter()
        .take(count)
        .map(|(label, category)| LodgingOption {
            title: format!("{label} (km {km:.0})"),
            lat: candidate.lat,
            lon: candidate.lon,
            distance_meters: 0.0,
            category: *category,
            stars: None,
            phone: None,
            source: PoiSource::Synthetic,
        })
        .collect()
}

/// Generic attraction placeholders at the candidate's position.
pub fn synthetic_pois(candidate: &Candidate, count: usize) -> Vec<PointOfInterest> {
    let km = candidate.distance_from_start / 1000.0;
    SYNTHETIC_POIS
        .iter()
        .take(count)
        .map(|(label, category)| PointOfInterest {
            title: format!("{label} (km {km:.0})"),
            lat: candidate.lat,
            lon: candidate.lon,
            distance_meters: 0.0,
            category: *category,
            source: PoiSource::Synthetic,
            url: None,
        })
        .collect()
}
