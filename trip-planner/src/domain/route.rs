//! Route geometry and the cumulative distance index built over it.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::geo::LatLon;

/// A driving route as returned by the routing collaborator.
///
/// The vertex list always holds at least two points, and distance and
/// duration are finite and non-negative. A route is immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    vertices: Vec<LatLon>,
    total_distance_m: f64,
    total_duration_s: f64,
}

impl Route {
    /// Build a route, validating geometry and metrics.
    pub fn new(
        vertices: Vec<LatLon>,
        total_distance_m: f64,
        total_duration_s: f64,
    ) -> Result<Self, DomainError> {
        if vertices.len() < 2 {
            return Err(DomainError::TooFewVertices(vertices.len()));
        }
        if !total_distance_m.is_finite() || total_distance_m < 0.0 {
            return Err(DomainError::InvalidRouteMetric {
                field: "distance",
                value: total_distance_m,
            });
        }
        if !total_duration_s.is_finite() || total_duration_s < 0.0 {
            return Err(DomainError::InvalidRouteMetric {
                field: "duration",
                value: total_duration_s,
            });
        }
        Ok(Self {
            vertices,
            total_distance_m,
            total_duration_s,
        })
    }

    pub fn vertices(&self) -> &[LatLon] {
        &self.vertices
    }

    pub fn total_distance_m(&self) -> f64 {
        self.total_distance_m
    }

    pub fn total_duration_s(&self) -> f64 {
        self.total_duration_s
    }

    pub fn start(&self) -> LatLon {
        self.vertices[0]
    }

    pub fn end(&self) -> LatLon {
        self.vertices[self.vertices.len() - 1]
    }

    /// Average speed over the whole route in m/s, if the route has a duration.
    pub fn average_speed_mps(&self) -> Option<f64> {
        (self.total_duration_s > 0.0).then(|| self.total_distance_m / self.total_duration_s)
    }

    /// Build the cumulative distance index for this route.
    pub fn distance_index(&self) -> CumulativeDistanceIndex {
        CumulativeDistanceIndex::build(&self.vertices)
    }
}

/// Cumulative great-circle distance at each route vertex.
///
/// `cumulative[0] == 0` and the sequence is non-decreasing. Built once per
/// route and only ever derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeDistanceIndex {
    cumulative: Vec<f64>,
    segments: Vec<f64>,
}

impl CumulativeDistanceIndex {
    fn build(vertices: &[LatLon]) -> Self {
        let segments: Vec<f64> = vertices
            .windows(2)
            .map(|pair| pair[0].haversine_m(&pair[1]))
            .collect();

        let mut cumulative = Vec::with_capacity(vertices.len());
        let mut running = 0.0;
        cumulative.push(running);
        for length in &segments {
            running += length;
            cumulative.push(running);
        }

        Self {
            cumulative,
            segments,
        }
    }

    /// Total geometric length of the polyline in meters.
    pub fn geometric_length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Cumulative distance at vertex `i`.
    pub fn at_vertex(&self, i: usize) -> Option<f64> {
        self.cumulative.get(i).copied()
    }

    /// Length of segment `i` (between vertices `i` and `i + 1`).
    pub fn segment_length(&self, i: usize) -> Option<f64> {
        self.segments.get(i).copied()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Find the segment containing geometric distance `d`.
    ///
    /// Returns the segment index and the fraction of that segment covered.
    /// `d` is clamped to the polyline, so the last segment absorbs overshoot.
    pub fn locate(&self, d: f64) -> (usize, f64) {
        if self.segments.is_empty() {
            return (0, 0.0);
        }
        let d = d.clamp(0.0, self.geometric_length());

        // First vertex strictly beyond d, minus one, is the segment start.
        let upper = self.cumulative.partition_point(|&c| c <= d);
        let segment = upper.saturating_sub(1).min(self.segments.len() - 1);

        let length = self.segments[segment];
        if length <= 0.0 {
            return (segment, 0.0);
        }
        let ratio = ((d - self.cumulative[segment]) / length).clamp(0.0, 1.0);
        (segment, ratio)
    }
}
