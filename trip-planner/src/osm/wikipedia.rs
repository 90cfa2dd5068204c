//! Wikipedia geosearch as a second source of attractions.

use crate::domain::PointOfInterest;
use crate::planner::{PoiKind, PoiProvider, ProviderError, SearchArea};

use super::config::OsmConfig;
use super::convert::wiki_to_poi;
use super::http::HttpClient;
use super::types::WikiGeoSearchResponse;

/// English Wikipedia.
pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";

/// Largest radius the geosearch API accepts, in metres.
pub const MAX_RADIUS_M: f64 = 10_000.0;

/// Largest page count the geosearch API accepts.
const MAX_LIMIT: usize = 500;

/// Client for a MediaWiki `list=geosearch` endpoint.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    http: HttpClient,
}

impl WikipediaClient {
    pub fn new(config: &OsmConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }
}

fn geosearch_query(area: &SearchArea) -> [(&'static str, String); 6] {
    [
        ("action", "query".to_string()),
        ("list", "geosearch".to_string()),
        (
            "gscoord",
            format!("{:.6}|{:.6}", area.center.lat, area.center.lon),
        ),
        (
            "gsradius",
            format!("{:.0}", area.radius_m.clamp(10.0, MAX_RADIUS_M)),
        ),
        ("gslimit", area.limit.clamp(1, MAX_LIMIT).to_string()),
        ("format", "json".to_string()),
    ]
}

fn pois_from_response(
    response: WikiGeoSearchResponse,
    base_url: &str,
) -> Result<Vec<PointOfInterest>, ProviderError> {
    if let Some(error) = response.error {
        return Err(ProviderError::Api {
            status: 200,
            message: format!("{}: {}", error.code, error.info.unwrap_or_default()),
        });
    }
    let hits = response.query.map(|q| q.geosearch).unwrap_or_default();
    Ok(hits.iter().map(|hit| wiki_to_poi(hit, base_url)).collect())
}

impl PoiProvider for WikipediaClient {
    async fn search_pois(
        &self,
        area: SearchArea,
        kind: PoiKind,
    ) -> Result<Vec<PointOfInterest>, ProviderError> {
        // Articles are landmarks, not restaurants.
        if kind == PoiKind::Food {
            return Ok(Vec::new());
        }
        let response: WikiGeoSearchResponse = self
            .http
            .get_json("/w/api.php", &geosearch_query(&area))
            .await?;
        let mut pois = pois_from_response(response, self.http.base_url())?;
        pois.truncate(area.limit);
        Ok(pois)
    }
}
