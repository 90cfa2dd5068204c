//! Data transfer objects for web requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Itinerary, LatLon, PaceConfig};

/// A trip endpoint: either a place name to geocode or a coordinate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PlaceInput {
    Coordinates { lat: f64, lon: f64 },
    Text(String),
}

/// Request to plan a multi-day itinerary.
#[derive(Debug, Deserialize)]
pub struct PlanItineraryRequest {
    /// Where the trip starts
    pub start: PlaceInput,

    /// Where the trip ends
    pub end: PlaceInput,

    /// Number of driving days (at least 1)
    pub days: i64,

    /// Pace preset name (defaults to moderate)
    pub pace: Option<String>,

    /// Preferred attraction categories, e.g. `["museum", "nature"]`
    #[serde(default)]
    pub preferences: Vec<String>,

    /// Date of the first day
    pub start_date: Option<NaiveDate>,
}

/// A resolved trip endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPlace {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl ResolvedPlace {
    pub fn new(name: impl Into<String>, at: LatLon) -> Self {
        Self {
            name: name.into(),
            lat: at.lat,
            lon: at.lon,
        }
    }

    pub fn position(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }
}

/// Response for a planned itinerary.
#[derive(Debug, Serialize)]
pub struct PlanItineraryResponse {
    pub start: ResolvedPlace,
    pub end: ResolvedPlace,
    pub itinerary: Itinerary,
}

/// Available pace presets.
#[derive(Debug, Serialize)]
pub struct PacesResponse {
    pub paces: Vec<PaceConfig>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
