//! Roadside stop selection.
//!
//! Roadside candidates are sampled more densely than overnight ones. A
//! candidate becomes a stop only if at least one real attraction near it is
//! worth the detour at the traveller's pace.

use std::cmp::Ordering;

use crate::domain::{Candidate, PaceConfig, PointOfInterest};

use super::config::PlannerConfig;

/// A sampled candidate with its ranked attractions.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadsideCandidate {
    pub candidate: Candidate,
    pub attractions: Vec<PointOfInterest>,
}

impl RoadsideCandidate {
    pub fn distance_from_start(&self) -> f64 {
        self.candidate.distance_from_start
    }

    fn best_priority(&self) -> u8 {
        self.attractions
            .iter()
            .map(|a| a.category.priority())
            .max()
            .unwrap_or(0)
    }
}

/// Keep candidates with attractions worth visiting, capped to
/// `max_roadside_stops * roadside_cap_factor`, in route order.
///
/// Attractions shorter than the pace's `min_activity_time` and synthetic
/// placeholders are dropped first. When over the cap, the candidates with the
/// highest-priority attractions are kept.
pub fn select_roadside(
    candidates: Vec<RoadsideCandidate>,
    pace: &PaceConfig,
    config: &PlannerConfig,
) -> Vec<RoadsideCandidate> {
    let mut kept: Vec<RoadsideCandidate> = candidates
        .into_iter()
        .filter_map(|mut c| {
            c.attractions
                .retain(|a| !a.is_synthetic() && a.visit_hours() >= pace.min_activity_time);
            (!c.attractions.is_empty()).then_some(c)
        })
        .collect();

    let cap = pace.max_roadside_stops * config.roadside_cap_factor;
    if kept.len() > cap {
        kept.sort_by(by_priority);
        kept.truncate(cap);
    }

    kept.sort_by(|a, b| a.distance_from_start().total_cmp(&b.distance_from_start()));
    kept
}

/// Best attraction priority first, then more attractions, then earlier on
/// the route.
fn by_priority(a: &RoadsideCandidate, b: &RoadsideCandidate) -> Ordering {
    b.best_priority()
        .cmp(&a.best_priority())
        .then_with(|| b.attractions.len().cmp(&a.attractions.len()))
        .then_with(|| a.distance_from_start().total_cmp(&b.distance_from_start()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, PoiSource};

    fn attraction(title: &str, category: Category, source: PoiSource) -> PointOfInterest {
        PointOfInterest {
            title: title.to_string(),
            lat: 0.0,
            lon: 0.0,
            distance_meters: 500.0,
            category,
            source,
            url: None,
        }
    }

    fn at(d: f64, attractions: Vec<PointOfInterest>) -> RoadsideCandidate {
        RoadsideCandidate {
            candidate: Candidate {
                lat: 0.0,
                lon: 0.0,
                distance_from_start: d,
                source_segment_index: 0,
            },
            attractions,
        }
    }

    #[test]
    fn short_visits_are_filtered_by_pace() {
        let config = PlannerConfig::default();
        let candidates = vec![
            at(
                10.0,
                vec![
                    attraction("Lookout", Category::Viewpoint, PoiSource::Osm),
                    attraction("Museum", Category::Museum, PoiSource::Osm),
                ],
            ),
            at(20.0, vec![attraction("Only Lookout", Category::Viewpoint, PoiSource::Osm)]),
        ];

        let relaxed = select_roadside(candidates.clone(), &PaceConfig::RELAXED, &config);
        assert_eq!(relaxed.len(), 1);
        assert_eq!(relaxed[0].attractions.len(), 1);
        assert_eq!(relaxed[0].attractions[0].title, "Museum");

        let active = select_roadside(candidates, &PaceConfig::ACTIVE, &config);
        assert_eq!(active.len(), 2);
    }

    #[test]
    fn placeholder_only_candidates_are_dropped() {
        let config = PlannerConfig::default();
        let candidates = vec![at(
            10.0,
            vec![attraction("Local attractions", Category::Attraction, PoiSource::Synthetic)],
        )];

        assert!(select_roadside(candidates, &PaceConfig::ACTIVE, &config).is_empty());
    }

    #[test]
    fn capped_by_priority_then_returned_in_route_order() {
        let config = PlannerConfig {
            roadside_cap_factor: 1,
            ..PlannerConfig::default()
        };
        // Moderate pace keeps three stops.
        let candidates = vec![
            at(100.0, vec![attraction("Park", Category::Park, PoiSource::Osm)]),
            at(200.0, vec![attraction("Zoo", Category::Zoo, PoiSource::Osm)]),
            at(300.0, vec![attraction("Museum", Category::Museum, PoiSource::Osm)]),
            at(400.0, vec![attraction("Garden", Category::Park, PoiSource::Osm)]),
        ];

        let kept = select_roadside(candidates, &PaceConfig::MODERATE, &config);

        let distances: Vec<f64> = kept.iter().map(|c| c.distance_from_start()).collect();
        assert_eq!(distances, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn empty_input() {
        let config = PlannerConfig::default();
        assert!(select_roadside(vec![], &PaceConfig::MODERATE, &config).is_empty());
    }
}
