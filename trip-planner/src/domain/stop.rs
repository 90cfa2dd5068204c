//! Candidates along the route and the stops selected from them.

use serde::{Deserialize, Serialize};

use super::geo::LatLon;
use super::poi::{LodgingOption, PointOfInterest};

/// A point on the route at a target distance from the start.
///
/// Produced by interpolating between two adjacent route vertices;
/// `source_segment_index` is the index of the first of those vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub lat: f64,
    pub lon: f64,
    pub distance_from_start: f64,
    pub source_segment_index: usize,
}

impl Candidate {
    pub fn position(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }
}

/// What a stop is for, with the places attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StopKind {
    /// End of a driving day, with somewhere to sleep.
    Overnight { accommodations: Vec<LodgingOption> },
    /// A daytime visit.
    Roadside { attractions: Vec<PointOfInterest> },
    /// Fallback overnight position with no lodging data.
    Basic,
}

/// A candidate promoted to a stop in the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub name: String,
    pub full_address: Option<String>,
    #[serde(flatten)]
    pub kind: StopKind,
}

impl Stop {
    pub fn distance_from_start(&self) -> f64 {
        self.candidate.distance_from_start
    }

    pub fn position(&self) -> LatLon {
        self.candidate.position()
    }

    pub fn accommodations(&self) -> &[LodgingOption] {
        match &self.kind {
            StopKind::Overnight { accommodations } => accommodations,
            _ => &[],
        }
    }

    pub fn attractions(&self) -> &[PointOfInterest] {
        match &self.kind {
            StopKind::Roadside { attractions } => attractions,
            _ => &[],
        }
    }

    /// Sum of typical visit times over this stop's attractions.
    pub fn activity_hours(&self) -> f64 {
        self.attractions().iter().map(|a| a.visit_hours()).sum()
    }

    /// Highest category priority among this stop's attractions.
    pub fn best_priority(&self) -> u8 {
        self.attractions()
            .iter()
            .map(|a| a.category.priority())
            .max()
            .unwrap_or(0)
    }
}

/// Fallback display name for a stop whose reverse geocode failed.
pub fn fallback_stop_name(distance_from_start: f64) -> String {
    format!("Stop at {:.0} km", distance_from_start / 1000.0)
}
