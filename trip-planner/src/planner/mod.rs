//! Multi-day itinerary planner.
//!
//! This module turns a driving route and a day count into a day-by-day plan:
//! "Where should I sleep each night, and what is worth stopping for on the
//! way?"
//!
//! The route is sampled into candidate points, each candidate is scouted for
//! lodging and attractions through the provider traits, and the results are
//! ranked, selected and bucketed into days. Provider failures only ever
//! shrink the data available for one candidate.

mod assemble;
mod config;
mod overnight;
mod plan;
mod provider;
mod rank;
mod roadside;
mod sampler;
mod scout;
mod throttle;

#[cfg(test)]
pub(crate) mod mock;
#[cfg(test)]
mod plan_tests;

pub use assemble::Assembler;
pub use config::{MIN_SPACING_FACTOR, PlannerConfig};
pub use overnight::{OvernightCandidate, OvernightSelector, uncovered_boundaries};
pub use plan::{PlanError, Planner, Progress};
pub use provider::{
    Geocoder, LodgingProvider, Place, PlaceName, PoiKind, PoiProvider, ProviderError,
    ReverseGeocoder, RouteProvider, SearchArea,
};
pub use rank::{deduplicate, rank_food, rank_lodging, rank_pois};
pub use roadside::{RoadsideCandidate, select_roadside};
pub use sampler::{RouteSampler, Sampling};
pub use scout::{Scout, synthetic_lodging, synthetic_pois};
pub use throttle::{RateLimiter, Throttled};
