//! Overpass API search for lodging, attractions and food.

use tracing::{debug, trace};

use crate::domain::{Category, LodgingOption, PointOfInterest};
use crate::planner::{LodgingProvider, PoiKind, PoiProvider, ProviderError, SearchArea};

use super::config::OsmConfig;
use super::convert::{ATTRACTION_TAGS, FOOD_TAGS, LODGING_TAGS, tag_filters, to_lodging, to_poi};
use super::http::HttpClient;
use super::types::OverpassResponse;

/// Main public Overpass instance.
pub const DEFAULT_BASE_URL: &str = "https://overpass-api.de";

/// Server-side query timeout, in seconds.
const QUERY_TIMEOUT_SECS: u32 = 25;

/// Overpass returns elements in id order, so ask for more than needed and
/// keep the closest.
const OVERFETCH: usize = 4;

/// Client for an Overpass API server.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    http: HttpClient,
}

impl OverpassClient {
    pub fn new(config: &OsmConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    async fn run(&self, query: String) -> Result<OverpassResponse, ProviderError> {
        trace!(query = %query, "Overpass query");
        let response: OverpassResponse = self
            .http
            .get_json("/api/interpreter", &[("data", query)])
            .await?;
        if let Some(remark) = &response.remark {
            // Runtime errors (e.g. query timeout) still carry partial elements.
            debug!(remark = %remark, elements = response.elements.len(), "Overpass remark");
        }
        Ok(response)
    }
}

/// Overpass QL for named elements matching `table` within the search area.
pub fn build_query(area: &SearchArea, table: &[(&str, &str, Category)]) -> String {
    let around = format!(
        "(around:{:.0},{:.6},{:.6})",
        area.radius_m, area.center.lat, area.center.lon
    );
    let clauses: String = tag_filters(table)
        .into_iter()
        .map(|filter| format!("nwr{filter}[\"name\"]{around};"))
        .collect();
    format!(
        "[out:json][timeout:{QUERY_TIMEOUT_SECS}];({clauses});out center {};",
        area.limit.max(1) * OVERFETCH
    )
}

/// Sort by distance from the search centre and keep `limit`.
fn closest<T>(mut items: Vec<T>, limit: usize, distance: impl Fn(&T) -> f64) -> Vec<T> {
    items.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
    items.truncate(limit);
    items
}

impl LodgingProvider for OverpassClient {
    async fn search_lodging(&self, area: SearchArea) -> Result<Vec<LodgingOption>, ProviderError> {
        let response = self.run(build_query(&area, LODGING_TAGS)).await?;
        let found: Vec<LodgingOption> = response
            .elements
            .iter()
            .filter_map(|e| to_lodging(e, area.center))
            .collect();
        Ok(closest(found, area.limit, |l| l.distance_meters))
    }
}

impl PoiProvider for OverpassClient {
    async fn search_pois(
        &self,
        area: SearchArea,
        kind: PoiKind,
    ) -> Result<Vec<PointOfInterest>, ProviderError> {
        let table = match kind {
            PoiKind::Attractions => ATTRACTION_TAGS,
            PoiKind::Food => FOOD_TAGS,
        };
        let response = self.run(build_query(&area, table)).await?;
        let found: Vec<PointOfInterest> = response
            .elements
            .iter()
            .filter_map(|e| to_poi(e, area.center, table))
            .collect();
        Ok(closest(found, area.limit, |p| p.distance_meters))
    }
}
