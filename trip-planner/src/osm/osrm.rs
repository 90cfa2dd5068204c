//! OSRM driving routes.

use tracing::debug;

use crate::domain::{LatLon, Route};
use crate::planner::{ProviderError, RouteProvider};

use super::config::OsmConfig;
use super::http::{HttpClient, parse_json};
use super::types::OsrmResponse;

/// Public OSRM demo server.
pub const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Client for an OSRM server.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: HttpClient,
}

impl OsrmClient {
    pub fn new(config: &OsmConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }
}

/// Path for a driving route. OSRM takes `lon,lat` pairs.
fn route_path(from: LatLon, to: LatLon) -> String {
    format!(
        "/route/v1/driving/{:.6},{:.6};{:.6},{:.6}",
        from.lon, from.lat, to.lon, to.lat
    )
}

/// Build a route from an OSRM response.
///
/// OSRM reports unroutable pairs with a 400 status and a JSON body, so the
/// body is interpreted before the status.
fn route_from_response(
    status: u16,
    body: &str,
    from: LatLon,
    to: LatLon,
) -> Result<Route, ProviderError> {
    let response: OsrmResponse = match parse_json(body) {
        Ok(r) => r,
        Err(_) if !(200..300).contains(&status) => {
            return Err(ProviderError::Api {
                status,
                message: body.chars().take(200).collect(),
            });
        }
        Err(e) => return Err(e),
    };

    match response.code.as_str() {
        "Ok" => {}
        "NoRoute" | "NoSegment" => return Err(ProviderError::NoRoute { from, to }),
        code => {
            return Err(ProviderError::Api {
                status,
                message: format!("{code}: {}", response.message.unwrap_or_default()),
            });
        }
    }

    let best = response
        .routes
        .into_iter()
        .next()
        .ok_or(ProviderError::NoRoute { from, to })?;

    let vertices: Vec<LatLon> = best
        .geometry
        .coordinates
        .iter()
        .map(|&[lon, lat]| LatLon::new(lat, lon))
        .collect();

    Route::new(vertices, best.distance, best.duration).map_err(|e| ProviderError::Json {
        message: e.to_string(),
    })
}

impl RouteProvider for OsrmClient {
    async fn route(&self, from: LatLon, to: LatLon) -> Result<Route, ProviderError> {
        let query = [
            ("overview", "full".to_string()),
            ("geometries", "geojson".to_string()),
        ];
        let (status, body) = self.http.get_text(&route_path(from, to), &query).await?;
        let route = route_from_response(status, &body, from, to)?;
        debug!(
            from = %from,
            to = %to,
            km = route.total_distance_m() / 1000.0,
            vertices = route.vertices().len(),
            "Route fetched"
        );
        Ok(route)
    }
}
