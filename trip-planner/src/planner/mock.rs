//! In-memory collaborators for planner tests.

use std::sync::Mutex;
use std::time::Duration;

use crate::domain::{Category, LatLon, LodgingOption, PoiSource, PointOfInterest, Route};

use super::provider::{
    Geocoder, LodgingProvider, Place, PlaceName, PoiKind, PoiProvider, ProviderError,
    ReverseGeocoder, RouteProvider, SearchArea,
};

/// Serves fixed places, filtered by distance from the query point.
#[derive(Default)]
pub struct MockPlaces {
    pub lodging: Vec<LodgingOption>,
    pub pois: Vec<PointOfInterest>,
    pub fail: bool,
    pub delay: Option<Duration>,
    calls: Mutex<Vec<SearchArea>>,
}

impl MockPlaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_lodging(mut self, title: &str, at: LatLon) -> Self {
        self.lodging.push(lodging(title, at));
        self
    }

    pub fn with_poi(mut self, title: &str, category: Category, at: LatLon) -> Self {
        self.pois.push(poi(title, category, at, PoiSource::Osm));
        self
    }

    /// Every search area this provider was asked about, in call order.
    pub fn calls(&self) -> Vec<SearchArea> {
        self.calls.lock().unwrap().clone()
    }

    pub fn radii(&self) -> Vec<f64> {
        self.calls().iter().map(|a| a.radius_m).collect()
    }

    async fn begin(&self, area: SearchArea) -> Result<(), ProviderError> {
        self.calls.lock().unwrap().push(area);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(ProviderError::Api {
                status: 503,
                message: "unavailable".into(),
            });
        }
        Ok(())
    }
}

fn within<T>(
    items: &[T],
    area: SearchArea,
    position: impl Fn(&T) -> LatLon,
    set_distance: impl Fn(&mut T, f64),
) -> Vec<T>
where
    T: Clone,
{
    let mut found: Vec<(f64, T)> = items
        .iter()
        .filter_map(|item| {
            let d = area.center.haversine_m(&position(item));
            (d <= area.radius_m).then(|| {
                let mut item = item.clone();
                set_distance(&mut item, d);
                (d, item)
            })
        })
        .collect();
    found.sort_by(|a, b| a.0.total_cmp(&b.0));
    found.into_iter().take(area.limit).map(|(_, t)| t).collect()
}

impl LodgingProvider for MockPlaces {
    async fn search_lodging(&self, area: SearchArea) -> Result<Vec<LodgingOption>, ProviderError> {
        self.begin(area).await?;
        Ok(within(
            &self.lodging,
            area,
            |l| l.position(),
            |l, d| l.distance_meters = d,
        ))
    }
}

impl PoiProvider for MockPlaces {
    async fn search_pois(
        &self,
        area: SearchArea,
        kind: PoiKind,
    ) -> Result<Vec<PointOfInterest>, ProviderError> {
        self.begin(area).await?;
        let matching: Vec<PointOfInterest> = self
            .pois
            .iter()
            .filter(|p| (p.category == Category::Food) == (kind == PoiKind::Food))
            .cloned()
            .collect();
        Ok(within(
            &matching,
            area,
            |p| p.position(),
            |p, d| p.distance_meters = d,
        ))
    }
}

/// Names every coordinate after its rounded position, or fails on demand.
#[derive(Default)]
pub struct MockNames {
    pub fail: bool,
}

impl ReverseGeocoder for MockNames {
    async fn lookup(&self, at: LatLon) -> Option<PlaceName> {
        if self.fail {
            return None;
        }
        Some(PlaceName {
            name: format!("Town {:.1}", at.lon),
            full_address: format!("Town {:.1}, Mockshire", at.lon),
        })
    }
}

/// Resolves a fixed list of names, case-insensitively.
#[derive(Default)]
pub struct MockGeocoder {
    pub places: Vec<(String, LatLon)>,
}

impl MockGeocoder {
    pub fn with_place(mut self, name: &str, at: LatLon) -> Self {
        self.places.push((name.to_string(), at));
        self
    }
}

impl Geocoder for MockGeocoder {
    async fn resolve(&self, text: &str) -> Result<Place, ProviderError> {
        self.places
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(text.trim()))
            .map(|(name, at)| Place {
                position: *at,
                display_name: name.clone(),
            })
            .ok_or_else(|| ProviderError::NotFound(text.to_string()))
    }
}

/// Straight-line routes at a steady 25 m/s, split into one-degree steps.
#[derive(Default)]
pub struct MockRouter {
    pub no_route: bool,
}

impl RouteProvider for MockRouter {
    async fn route(&self, from: LatLon, to: LatLon) -> Result<Route, ProviderError> {
        if self.no_route {
            return Err(ProviderError::NoRoute { from, to });
        }
        let degrees = (to.lat - from.lat).abs().max((to.lon - from.lon).abs());
        let steps = (degrees.ceil() as usize).max(1);
        let vertices: Vec<LatLon> = (0..=steps)
            .map(|i| from.lerp(&to, i as f64 / steps as f64))
            .collect();
        let distance: f64 = vertices.windows(2).map(|w| w[0].haversine_m(&w[1])).sum();
        Route::new(vertices, distance, distance / 25.0).map_err(|e| ProviderError::Json {
            message: e.to_string(),
        })
    }
}

pub fn lodging(title: &str, at: LatLon) -> LodgingOption {
    LodgingOption {
        title: title.to_string(),
        lat: at.lat,
        lon: at.lon,
        distance_meters: 0.0,
        category: Category::Hotel,
        stars: None,
        phone: None,
        source: PoiSource::Osm,
    }
}

pub fn poi(title: &str, category: Category, at: LatLon, source: PoiSource) -> PointOfInterest {
    PointOfInterest {
        title: title.to_string(),
        lat: at.lat,
        lon: at.lon,
        distance_meters: 0.0,
        category,
        source,
        url: None,
    }
}
