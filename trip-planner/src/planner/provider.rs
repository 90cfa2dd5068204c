//! Collaborator contracts consumed by the planner.
//!
//! These abstractions allow the planner to be tested with in-memory data and
//! let the HTTP layer plug in real clients. Every method returns a `Send`
//! future so planning can run inside multi-threaded request handlers.

use std::future::Future;

use crate::domain::{LatLon, LodgingOption, PointOfInterest, Route};

/// Error from a collaborator call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Provider answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Provider asked us to slow down
    #[error("rate limited by provider")]
    RateLimited,

    /// Response body could not be parsed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Geocoder had no match for the query
    #[error("no place found for {0:?}")]
    NotFound(String),

    /// Router could not connect the two points
    #[error("no route between {from} and {to}")]
    NoRoute { from: LatLon, to: LatLon },

    /// Call did not finish in time
    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Http(err.to_string())
    }
}

/// A circular search area around a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchArea {
    pub center: LatLon,
    pub radius_m: f64,
    pub limit: usize,
}

impl SearchArea {
    pub fn new(center: LatLon, radius_m: f64, limit: usize) -> Self {
        Self {
            center,
            radius_m,
            limit,
        }
    }
}

/// What kind of places a POI search should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoiKind {
    Attractions,
    Food,
}

/// A resolved place name.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub position: LatLon,
    pub display_name: String,
}

/// Human-readable description of a coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceName {
    pub name: String,
    pub full_address: String,
}

/// Free-text place search.
pub trait Geocoder: Sync {
    /// Resolve `text` to a position. Fails with [`ProviderError::NotFound`]
    /// when nothing matches.
    fn resolve(&self, text: &str) -> impl Future<Output = Result<Place, ProviderError>> + Send;
}

/// Coordinate to place-name lookup.
pub trait ReverseGeocoder: Sync {
    /// Look up a name for `at`. Failures are reported as `None`.
    fn lookup(&self, at: LatLon) -> impl Future<Output = Option<PlaceName>> + Send;
}

/// Driving route between two points.
pub trait RouteProvider: Sync {
    /// Fails with [`ProviderError::NoRoute`] when the points are not connected.
    fn route(
        &self,
        from: LatLon,
        to: LatLon,
    ) -> impl Future<Output = Result<Route, ProviderError>> + Send;
}

/// Places to stay near a point.
pub trait LodgingProvider: Sync {
    fn search_lodging(
        &self,
        area: SearchArea,
    ) -> impl Future<Output = Result<Vec<LodgingOption>, ProviderError>> + Send;
}

/// Attractions or food near a point.
pub trait PoiProvider: Sync {
    fn search_pois(
        &self,
        area: SearchArea,
        kind: PoiKind,
    ) -> impl Future<Output = Result<Vec<PointOfInterest>, ProviderError>> + Send;
}
