//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, Cached};
use crate::domain::PointOfInterest;
use crate::osm::{NominatimClient, OsmEndpoints, OsrmClient, OverpassClient, WikipediaClient};
use crate::planner::{PlannerConfig, PoiKind, PoiProvider, ProviderError, SearchArea, Throttled};

/// One of the attraction sources the planner queries.
pub enum PoiBackend {
    Overpass(Cached<Throttled<OverpassClient>>),
    Wikipedia(Cached<Throttled<WikipediaClient>>),
}

impl PoiProvider for PoiBackend {
    async fn search_pois(
        &self,
        area: SearchArea,
        kind: PoiKind,
    ) -> Result<Vec<PointOfInterest>, ProviderError> {
        match self {
            PoiBackend::Overpass(p) => p.search_pois(area, kind).await,
            PoiBackend::Wikipedia(p) => p.search_pois(area, kind).await,
        }
    }
}

/// Shared application state.
///
/// Each service has one rate limiter, shared by every wrapper that talks to
/// it. Place lookups are cached in front of the limiter; geocoding and
/// routing are one-off per request and go straight through.
#[derive(Clone)]
pub struct AppState {
    /// Free-text place search
    pub geocoder: Arc<Throttled<NominatimClient>>,

    /// Stop naming
    pub names: Arc<Cached<Throttled<NominatimClient>>>,

    /// Driving routes
    pub router: Arc<Throttled<OsrmClient>>,

    /// Places to stay
    pub lodging: Arc<Cached<Throttled<OverpassClient>>>,

    /// Attraction and food sources, queried in order
    pub pois: Arc<Vec<PoiBackend>>,

    /// Itinerary planner configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state talking to `endpoints`.
    pub fn new(
        endpoints: &OsmEndpoints,
        cache: &CacheConfig,
        config: PlannerConfig,
    ) -> Result<Self, ProviderError> {
        let nominatim = NominatimClient::new(&endpoints.nominatim)?;
        let nominatim_limiter = endpoints.nominatim.limiter();
        let overpass = OverpassClient::new(&endpoints.overpass)?;
        let overpass_limiter = endpoints.overpass.limiter();
        let wikipedia = WikipediaClient::new(&endpoints.wikipedia)?;
        let osrm = OsrmClient::new(&endpoints.osrm)?;

        let pois = vec![
            PoiBackend::Overpass(Cached::new(
                Throttled::new(overpass.clone(), overpass_limiter.clone()),
                cache,
            )),
            PoiBackend::Wikipedia(Cached::new(
                Throttled::new(wikipedia, endpoints.wikipedia.limiter()),
                cache,
            )),
        ];

        Ok(Self {
            geocoder: Arc::new(Throttled::new(nominatim.clone(), nominatim_limiter.clone())),
            names: Arc::new(Cached::new(
                Throttled::new(nominatim, nominatim_limiter),
                cache,
            )),
            router: Arc::new(Throttled::new(osrm, endpoints.osrm.limiter())),
            lodging: Arc::new(Cached::new(
                Throttled::new(overpass, overpass_limiter),
                cache,
            )),
            pois: Arc::new(pois),
            config: Arc::new(config),
        })
    }
}
