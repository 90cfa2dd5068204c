//! Route sampling.
//!
//! Turns a route into candidate points spaced evenly by distance from the
//! start. Target distances are expressed in route (road) meters; the
//! polyline's great-circle length is scaled onto the road distance so every
//! candidate satisfies `0 <= distance_from_start <= total_distance_m`.

use crate::domain::{Candidate, CumulativeDistanceIndex, Route};

/// How densely to sample a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sampling {
    /// One candidate every `n` meters.
    Interval(f64),
    /// A fixed number of evenly spaced candidates.
    Count(usize),
}

/// Interpolates candidate points along a route.
///
/// Holds the route's cumulative distance index so repeated lookups do not
/// rebuild it.
#[derive(Debug, Clone)]
pub struct RouteSampler<'a> {
    route: &'a Route,
    index: CumulativeDistanceIndex,
    /// Geometric meters per road meter.
    scale: f64,
}

impl<'a> RouteSampler<'a> {
    pub fn new(route: &'a Route) -> Self {
        let index = route.distance_index();
        let total = route.total_distance_m();
        let scale = if total > 0.0 {
            index.geometric_length() / total
        } else {
            0.0
        };
        Self {
            route,
            index,
            scale,
        }
    }

    pub fn route(&self) -> &Route {
        self.route
    }

    /// Candidate at `target` meters from the start.
    ///
    /// Targets at or before the start return the first vertex; targets at or
    /// beyond the end return the last.
    pub fn point_at(&self, target: f64) -> Candidate {
        let vertices = self.route.vertices();
        let total = self.route.total_distance_m();

        if target <= 0.0 || total <= 0.0 {
            let first = vertices[0];
            return Candidate {
                lat: first.lat,
                lon: first.lon,
                distance_from_start: 0.0,
                source_segment_index: 0,
            };
        }
        if target >= total {
            let last = vertices[vertices.len() - 1];
            return Candidate {
                lat: last.lat,
                lon: last.lon,
                distance_from_start: total,
                source_segment_index: self.index.segment_count().saturating_sub(1),
            };
        }

        let (segment, ratio) = self.index.locate(target * self.scale);
        let position = vertices[segment].lerp(&vertices[segment + 1], ratio);
        Candidate {
            lat: position.lat,
            lon: position.lon,
            distance_from_start: target,
            source_segment_index: segment,
        }
    }

    /// Sample interior points of the route, ordered by distance.
    ///
    /// At most `max` candidates are returned. When an interval would produce
    /// more, the route is re-spaced evenly into `max` points instead.
    pub fn sample(&self, sampling: Sampling, max: usize) -> Vec<Candidate> {
        let total = self.route.total_distance_m();
        if total <= 0.0 || max == 0 {
            return Vec::new();
        }

        let wanted = match sampling {
            Sampling::Interval(interval) if interval > 0.0 && interval.is_finite() => {
                let count = ((total / interval).ceil() as usize).saturating_sub(1);
                if count <= max {
                    return (1..=count)
                        .map(|k| self.point_at(interval * k as f64))
                        .collect();
                }
                count
            }
            Sampling::Interval(_) => return Vec::new(),
            Sampling::Count(count) => count,
        };

        let count = wanted.min(max);
        let step = total / (count + 1) as f64;
        (1..=count).map(|k| self.point_at(step * k as f64)).collect()
    }
}
