//! Response DTOs for the OSM-family services.
//!
//! These map directly to the JSON the services return. Fields are optional
//! wherever the services omit them rather than sending null.

use std::collections::HashMap;

use serde::Deserialize;

/// One hit from Nominatim `/search` or the body of `/reverse`.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    /// Latitude as a decimal string.
    pub lat: String,

    /// Longitude as a decimal string.
    pub lon: String,

    pub display_name: Option<String>,

    /// Present when `addressdetails=1`.
    pub address: Option<NominatimAddress>,
}

/// Structured address parts. Nominatim only sends the levels that apply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NominatimAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub hamlet: Option<String>,
    pub municipality: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// Reverse lookups that miss come back as `{"error": "..."}` with status 200.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NominatimReverse {
    Place(NominatimPlace),
    Error { error: String },
}

/// OSRM `/route/v1` response.
#[derive(Debug, Clone, Deserialize)]
pub struct OsrmResponse {
    /// `"Ok"` on success, otherwise an error code such as `"NoRoute"`.
    pub code: String,

    pub message: Option<String>,

    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OsrmRoute {
    /// Metres.
    pub distance: f64,

    /// Seconds.
    pub duration: f64,

    pub geometry: GeoJsonLineString,
}

/// GeoJSON LineString. Coordinates are `[lon, lat]`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoJsonLineString {
    pub coordinates: Vec<[f64; 2]>,
}

/// Overpass API `[out:json]` response.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,

    /// Runtime errors are reported here with a 200 status.
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverpassElement {
    /// `node`, `way` or `relation`.
    #[serde(rename = "type")]
    pub element_type: String,

    pub id: u64,

    /// Nodes carry their position directly.
    pub lat: Option<f64>,
    pub lon: Option<f64>,

    /// Ways and relations carry a centre with `out center`.
    pub center: Option<OverpassCenter>,

    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OverpassCenter {
    pub lat: f64,
    pub lon: f64,
}

/// MediaWiki `list=geosearch` response.
#[derive(Debug, Clone, Deserialize)]
pub struct WikiGeoSearchResponse {
    pub query: Option<WikiGeoSearchQuery>,
    pub error: Option<WikiError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WikiGeoSearchQuery {
    #[serde(default)]
    pub geosearch: Vec<WikiGeoSearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WikiGeoSearchHit {
    pub pageid: u64,
    pub title: String,
    pub lat: f64,
    pub lon: f64,

    /// Metres from the query point.
    pub dist: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WikiError {
    pub code: String,
    pub info: Option<String>,
}
