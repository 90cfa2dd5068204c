//! Merging and ranking of place lists.
//!
//! Results from several providers are merged, duplicates (same normalised
//! title) are dropped, and the remainder is ordered so the most useful places
//! come first. Truncation to the caller's limit always happens last.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::domain::{Category, LodgingOption, PoiSource, PointOfInterest, normalize_title};

/// Common view over places that can be deduplicated.
pub trait Listing {
    fn title(&self) -> &str;
    fn distance_meters(&self) -> f64;
    fn source(&self) -> PoiSource;
}

impl Listing for PointOfInterest {
    fn title(&self) -> &str {
        &self.title
    }
    fn distance_meters(&self) -> f64 {
        self.distance_meters
    }
    fn source(&self) -> PoiSource {
        self.source
    }
}

impl Listing for LodgingOption {
    fn title(&self) -> &str {
        &self.title
    }
    fn distance_meters(&self) -> f64 {
        self.distance_meters
    }
    fn source(&self) -> PoiSource {
        self.source
    }
}

/// Drop entries whose normalised title was already seen.
///
/// When two entries collide, the closer one is kept; equal distances fall
/// back to source order (OSM, then Wikipedia, then synthetic). The output
/// keeps the order in which each title first appeared.
pub fn deduplicate<T: Listing>(items: Vec<T>) -> Vec<T> {
    let mut result: Vec<T> = Vec::with_capacity(items.len());
    let mut seen: HashMap<String, usize> = HashMap::new();

    for item in items {
        let key = normalize_title(item.title());
        match seen.get(&key) {
            Some(&idx) => {
                if is_better(&item, &result[idx]) {
                    result[idx] = item;
                }
            }
            None => {
                seen.insert(key, result.len());
                result.push(item);
            }
        }
    }

    result
}

fn is_better<T: Listing>(candidate: &T, existing: &T) -> bool {
    match candidate
        .distance_meters()
        .total_cmp(&existing.distance_meters())
    {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => candidate.source() < existing.source(),
    }
}

/// Rank attractions for one location.
///
/// Ordering:
/// 1. Preferred categories first
/// 2. Category priority (higher is better)
/// 3. Distance (closer is better)
///
/// If `preferences` is non-empty, only preferred categories are kept unless
/// that would leave nothing, in which case the full ranked list is returned.
pub fn rank_pois(
    pois: Vec<PointOfInterest>,
    preferences: &[Category],
    limit: usize,
) -> Vec<PointOfInterest> {
    let mut pois = deduplicate(pois);
    let preferred = |p: &PointOfInterest| preferences.contains(&p.category);

    pois.sort_by(|a, b| {
        // Primary: preference boost
        let boost_cmp = preferred(b).cmp(&preferred(a));
        if boost_cmp != Ordering::Equal {
            return boost_cmp;
        }

        // Secondary: category priority
        let priority_cmp = b.category.priority().cmp(&a.category.priority());
        if priority_cmp != Ordering::Equal {
            return priority_cmp;
        }

        // Tertiary: distance
        a.distance_meters
            .total_cmp(&b.distance_meters)
            .then_with(|| a.title.cmp(&b.title))
    });

    if !preferences.is_empty() && pois.iter().any(preferred) {
        pois.retain(preferred);
    }

    pois.truncate(limit);
    pois
}

/// Rank lodging: real listings before placeholders, then by stars, then
/// distance.
pub fn rank_lodging(lodging: Vec<LodgingOption>, limit: usize) -> Vec<LodgingOption> {
    let mut lodging = deduplicate(lodging);
    lodging.sort_by(|a, b| {
        a.is_synthetic()
            .cmp(&b.is_synthetic())
            .then_with(|| b.stars.cmp(&a.stars))
            .then_with(|| a.distance_meters.total_cmp(&b.distance_meters))
    });
    lodging.truncate(limit);
    lodging
}

/// Rank food options by distance only.
pub fn rank_food(food: Vec<PointOfInterest>, limit: usize) -> Vec<PointOfInterest> {
    let mut food = deduplicate(food);
    food.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    food.truncate(limit);
    food
}
