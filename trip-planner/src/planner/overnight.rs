//! Overnight stop selection.
//!
//! Picks the candidates that end each driving day. Each day boundary
//! (`ideal * d`) is matched to the best unselected candidate within the
//! tolerance band, trading closeness to the boundary against how much lodging
//! is around. Candidates without real lodging never become overnight stops;
//! boundaries left uncovered are filled with basic stops by the caller via
//! [`uncovered_boundaries`].

use tracing::debug;

use crate::domain::{Candidate, LodgingOption};

use super::config::PlannerConfig;

/// A sampled candidate with the lodging found around it.
#[derive(Debug, Clone, PartialEq)]
pub struct OvernightCandidate {
    pub candidate: Candidate,
    pub lodging: Vec<LodgingOption>,
}

impl OvernightCandidate {
    /// Number of real (non-placeholder) lodging options.
    pub fn accommodation_score(&self) -> usize {
        self.lodging.iter().filter(|l| !l.is_synthetic()).count()
    }

    pub fn distance_from_start(&self) -> f64 {
        self.candidate.distance_from_start
    }
}

/// Chooses overnight stops among scouted candidates.
#[derive(Debug, Clone, Copy)]
pub struct OvernightSelector<'a> {
    config: &'a PlannerConfig,
}

impl<'a> OvernightSelector<'a> {
    pub fn new(config: &'a PlannerConfig) -> Self {
        Self { config }
    }

    /// Select up to `days - 1` overnight stops, sorted by distance.
    ///
    /// Returns an empty list when no candidate has any lodging. Fewer than
    /// `days - 1` stops come back only when the spacing rule leaves no
    /// candidate for a boundary.
    pub fn select(
        &self,
        candidates: Vec<OvernightCandidate>,
        days: usize,
        ideal: f64,
    ) -> Vec<OvernightCandidate> {
        let mut pool: Vec<OvernightCandidate> = candidates
            .into_iter()
            .filter(|c| c.accommodation_score() > 0)
            .collect();
        if pool.is_empty() || days < 2 || !(ideal > 0.0) {
            return Vec::new();
        }

        pool.sort_by(|a, b| {
            b.accommodation_score()
                .cmp(&a.accommodation_score())
                .then_with(|| {
                    let da = (a.distance_from_start() - ideal).abs();
                    let db = (b.distance_from_start() - ideal).abs();
                    da.total_cmp(&db)
                })
        });

        let spacing = ideal * self.config.spacing_factor;
        let tolerance = ideal * self.config.tolerance_factor;
        let weight = self.config.accommodation_weight;

        let mut selected: Vec<usize> = Vec::with_capacity(days - 1);
        for day in 1..days {
            let target = ideal * day as f64;
            let available = |i: &usize| {
                let d = pool[*i].distance_from_start();
                !selected.contains(i)
                    && selected
                        .iter()
                        .all(|&s| (pool[s].distance_from_start() - d).abs() >= spacing)
            };
            let score = |i: &usize| {
                let c = &pool[*i];
                (c.distance_from_start() - target).abs() / ideal
                    - c.accommodation_score() as f64 * weight
            };

            let within_tolerance = (0..pool.len())
                .filter(available)
                .filter(|&i| (pool[i].distance_from_start() - target).abs() <= tolerance)
                .min_by(|a, b| score(a).total_cmp(&score(b)));

            let pick = within_tolerance.or_else(|| {
                (0..pool.len()).filter(available).min_by(|&a, &b| {
                    let da = (pool[a].distance_from_start() - target).abs();
                    let db = (pool[b].distance_from_start() - target).abs();
                    da.total_cmp(&db)
                })
            });

            match pick {
                Some(i) => selected.push(i),
                None => debug!(day, target_km = target / 1000.0, "No overnight candidate"),
            }
        }

        selected.sort_unstable();
        let mut chosen: Vec<OvernightCandidate> = pool
            .into_iter()
            .enumerate()
            .filter(|(i, _)| selected.binary_search(i).is_ok())
            .map(|(_, c)| c)
            .collect();
        chosen.sort_by(|a, b| a.distance_from_start().total_cmp(&b.distance_from_start()));
        chosen
    }
}

/// Day boundaries (`ideal * d` meters) that still need a basic stop.
///
/// Given the distances of already selected stops, returns `count` boundary
/// distances in ascending order. Boundaries farthest from any selected stop
/// are used first, ties going to the earlier day.
pub fn uncovered_boundaries(selected: &[f64], days: usize, ideal: f64, count: usize) -> Vec<f64> {
    let mut boundaries: Vec<f64> = (1..days).map(|d| ideal * d as f64).collect();
    let mut occupied: Vec<f64> = selected.to_vec();
    let mut chosen = Vec::with_capacity(count);

    for _ in 0..count {
        let clearance = |b: f64| {
            occupied
                .iter()
                .map(|s| (s - b).abs())
                .fold(f64::INFINITY, f64::min)
        };
        let best = boundaries
            .iter()
            .enumerate()
            .max_by(|(ia, a), (ib, b)| {
                clearance(**a)
                    .total_cmp(&clearance(**b))
                    .then_with(|| ib.cmp(ia))
            })
            .map(|(i, _)| i);
        let Some(i) = best else { break };
        let boundary = boundaries.remove(i);
        occupied.push(boundary);
        chosen.push(boundary);
    }

    chosen.sort_by(f64::total_cmp);
    chosen
}
