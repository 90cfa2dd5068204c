//! Domain types for the road trip planner.
//!
//! This module contains the core domain model: route geometry, places near
//! the route, selected stops and the day-by-day itinerary. Types with
//! invariants enforce them at construction time.

mod error;
mod geo;
mod itinerary;
mod pace;
mod poi;
mod route;
mod stop;

pub use error::DomainError;
pub use geo::{EARTH_RADIUS_M, LatLon};
pub use itinerary::{DayPlan, Itinerary};
pub use pace::PaceConfig;
pub use poi::{
    CATEGORY_TABLE, Category, CategoryProfile, LodgingOption, PoiSource, PointOfInterest,
    UNKNOWN_ICON, UNKNOWN_PRIORITY, UNKNOWN_VISIT_HOURS, normalize_title,
};
pub use route::{CumulativeDistanceIndex, Route};
pub use stop::{Candidate, Stop, StopKind, fallback_stop_name};
