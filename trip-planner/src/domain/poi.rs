//! Points of interest, lodging options and the category table.
//!
//! Category metadata (ranking priority, typical visit time, icon) lives in a
//! static table rather than in branching logic. Categories that are missing
//! from the table fall back to [`UNKNOWN_PRIORITY`] and
//! [`UNKNOWN_VISIT_HOURS`].

use serde::{Deserialize, Serialize};

use super::geo::LatLon;

/// Ranking priority for categories missing from the table.
pub const UNKNOWN_PRIORITY: u8 = 1;

/// Typical visit time for categories missing from the table.
pub const UNKNOWN_VISIT_HOURS: f64 = 1.5;

/// Icon name for categories missing from the table.
pub const UNKNOWN_ICON: &str = "marker";

/// Kind of place, normalised from provider tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Museum,
    Cultural,
    Zoo,
    Family,
    Entertainment,
    Nature,
    Viewpoint,
    Food,
    Park,
    Attraction,
    Hotel,
    Motel,
    Guesthouse,
    Hostel,
    Campground,
    Other,
}

/// Static metadata for one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryProfile {
    pub category: Category,
    pub label: &'static str,
    /// Higher ranks first.
    pub priority: u8,
    /// Typical time spent visiting, in hours.
    pub visit_hours: f64,
    pub icon: &'static str,
}

const fn profile(
    category: Category,
    label: &'static str,
    priority: u8,
    visit_hours: f64,
    icon: &'static str,
) -> CategoryProfile {
    CategoryProfile {
        category,
        label,
        priority,
        visit_hours,
        icon,
    }
}

/// Category metadata table. `Category::Other` is intentionally absent.
pub const CATEGORY_TABLE: &[CategoryProfile] = &[
    profile(Category::Museum, "Museum", 5, 2.0, "museum"),
    profile(Category::Cultural, "Cultural site", 5, 1.5, "landmark"),
    profile(Category::Zoo, "Zoo", 4, 3.0, "zoo"),
    profile(Category::Family, "Family attraction", 4, 2.5, "family"),
    profile(Category::Entertainment, "Entertainment", 3, 2.5, "ticket"),
    profile(Category::Nature, "Nature", 3, 1.5, "tree"),
    profile(Category::Viewpoint, "Viewpoint", 3, 0.5, "binoculars"),
    profile(Category::Food, "Food", 3, 1.0, "utensils"),
    profile(Category::Park, "Park", 2, 1.0, "park"),
    profile(Category::Attraction, "Attraction", 1, 1.5, "star"),
    profile(Category::Hotel, "Hotel", 1, 0.0, "bed"),
    profile(Category::Motel, "Motel", 1, 0.0, "bed"),
    profile(Category::Guesthouse, "Guest house", 1, 0.0, "bed"),
    profile(Category::Hostel, "Hostel", 1, 0.0, "bed"),
    profile(Category::Campground, "Campground", 1, 0.0, "tent"),
];

impl Category {
    /// Table entry for this category, if it has one.
    pub fn profile(self) -> Option<&'static CategoryProfile> {
        CATEGORY_TABLE.iter().find(|p| p.category == self)
    }

    pub fn priority(self) -> u8 {
        self.profile().map_or(UNKNOWN_PRIORITY, |p| p.priority)
    }

    pub fn visit_hours(self) -> f64 {
        self.profile().map_or(UNKNOWN_VISIT_HOURS, |p| p.visit_hours)
    }

    pub fn icon(self) -> &'static str {
        self.profile().map_or(UNKNOWN_ICON, |p| p.icon)
    }

    pub fn label(self) -> &'static str {
        self.profile().map_or("Place", |p| p.label)
    }

    /// Parse a user-facing category name, e.g. from request preferences.
    ///
    /// Accepts the snake_case names and a few common synonyms.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let category = match name.as_str() {
            "museum" | "museums" | "gallery" => Category::Museum,
            "cultural" | "culture" | "history" | "historic" => Category::Cultural,
            "zoo" | "aquarium" => Category::Zoo,
            "family" => Category::Family,
            "entertainment" | "theme_park" => Category::Entertainment,
            "nature" | "outdoors" => Category::Nature,
            "viewpoint" | "scenic" => Category::Viewpoint,
            "food" | "restaurant" => Category::Food,
            "park" | "parks" => Category::Park,
            "attraction" => Category::Attraction,
            _ => return None,
        };
        Some(category)
    }
}

/// Where a record came from.
///
/// Used for dedup tie-breaks and display only, never for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoiSource {
    Osm,
    Wikipedia,
    /// Placeholder generated when every provider came back empty.
    Synthetic,
}

/// An attraction, restaurant or other place near the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub title: String,
    pub lat: f64,
    pub lon: f64,
    /// Distance from the query point.
    pub distance_meters: f64,
    pub category: Category,
    pub source: PoiSource,
    pub url: Option<String>,
}

impl PointOfInterest {
    pub fn position(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }

    pub fn is_synthetic(&self) -> bool {
        self.source == PoiSource::Synthetic
    }

    /// Typical visit time for this place, in hours.
    pub fn visit_hours(&self) -> f64 {
        self.category.visit_hours()
    }
}

/// A place to stay overnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LodgingOption {
    pub title: String,
    pub lat: f64,
    pub lon: f64,
    /// Distance from the query point.
    pub distance_meters: f64,
    pub category: Category,
    pub stars: Option<u8>,
    pub phone: Option<String>,
    pub source: PoiSource,
}

impl LodgingOption {
    pub fn position(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }

    pub fn is_synthetic(&self) -> bool {
        self.source == PoiSource::Synthetic
    }
}

/// Normalise a title for duplicate detection: trimmed and case-folded.
pub fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
