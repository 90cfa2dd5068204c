//! Nominatim geocoding and reverse geocoding.

use tracing::debug;

use crate::domain::LatLon;
use crate::planner::{Geocoder, Place, PlaceName, ProviderError, ReverseGeocoder};

use super::config::OsmConfig;
use super::convert::{place_name, place_position};
use super::http::{HttpClient, parse_json};
use super::types::{NominatimPlace, NominatimReverse};

/// Public Nominatim instance.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Reverse lookups resolve to settlement level.
const REVERSE_ZOOM: u8 = 10;

/// Client for a Nominatim server.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: HttpClient,
}

impl NominatimClient {
    pub fn new(config: &OsmConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Search for `text`, returning the best hit if there is one.
    pub async fn search(&self, text: &str) -> Result<Option<NominatimPlace>, ProviderError> {
        let query = [
            ("q", text.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", "1".to_string()),
            ("addressdetails", "1".to_string()),
        ];
        let hits: Vec<NominatimPlace> = self.http.get_json("/search", &query).await?;
        Ok(hits.into_iter().next())
    }

    /// Reverse geocode `at`. `Ok(None)` when there is nothing there.
    pub async fn reverse(&self, at: LatLon) -> Result<Option<NominatimPlace>, ProviderError> {
        let query = [
            ("lat", format!("{:.6}", at.lat)),
            ("lon", format!("{:.6}", at.lon)),
            ("format", "jsonv2".to_string()),
            ("zoom", REVERSE_ZOOM.to_string()),
            ("addressdetails", "1".to_string()),
        ];
        let (status, body) = self.http.get_text("/reverse", &query).await?;
        if !(200..300).contains(&status) {
            return Err(ProviderError::Api {
                status,
                message: body.chars().take(200).collect(),
            });
        }
        match parse_json::<NominatimReverse>(&body)? {
            NominatimReverse::Place(place) => Ok(Some(place)),
            NominatimReverse::Error { error } => {
                debug!(at = %at, error = %error, "Nothing to reverse geocode");
                Ok(None)
            }
        }
    }
}

impl Geocoder for NominatimClient {
    async fn resolve(&self, text: &str) -> Result<Place, ProviderError> {
        let text = text.trim();
        let place = self
            .search(text)
            .await?
            .ok_or_else(|| ProviderError::NotFound(text.to_string()))?;

        let position = place_position(&place)?;
        let display_name = place
            .display_name
            .clone()
            .unwrap_or_else(|| text.to_string());
        Ok(Place {
            position,
            display_name,
        })
    }
}

impl ReverseGeocoder for NominatimClient {
    async fn lookup(&self, at: LatLon) -> Option<PlaceName> {
        match self.reverse(at).await {
            Ok(place) => place.as_ref().and_then(place_name),
            Err(e) => {
                debug!(at = %at, error = %e, "Reverse geocode failed, using fallback name");
                None
            }
        }
    }
}
