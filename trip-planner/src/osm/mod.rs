//! OpenStreetMap-family HTTP collaborators.
//!
//! Concrete implementations of the planner's provider traits:
//! - Nominatim for geocoding and reverse geocoding
//! - OSRM for driving routes (GeoJSON geometry, `[lon, lat]` pairs)
//! - Overpass for lodging, attractions and food, mapped from OSM tags
//! - Wikipedia geosearch as a second attraction source
//!
//! The public instances of these services expect a descriptive User-Agent
//! and roughly one request per second; wrap clients in
//! [`Throttled`](crate::planner::Throttled) with the limiter from
//! [`OsmConfig::limiter`].

mod config;
mod convert;
mod http;
mod types;

pub mod nominatim;
pub mod osrm;
pub mod overpass;
pub mod wikipedia;

pub use config::{DEFAULT_USER_AGENT, OsmConfig, OsmEndpoints};
pub use convert::{ATTRACTION_TAGS, FOOD_TAGS, LODGING_TAGS, WIKI_TITLE_WORDS};
pub use nominatim::NominatimClient;
pub use osrm::OsrmClient;
pub use overpass::OverpassClient;
pub use types::{
    NominatimAddress, NominatimPlace, OsrmResponse, OverpassElement, OverpassResponse,
    WikiGeoSearchResponse,
};
pub use wikipedia::WikipediaClient;
