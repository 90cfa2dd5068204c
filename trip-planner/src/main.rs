use std::net::SocketAddr;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use trip_planner::cache::CacheConfig;
use trip_planner::osm::{DEFAULT_USER_AGENT, OsmEndpoints};
use trip_planner::planner::PlannerConfig;
use trip_planner::web::{AppState, create_router};

/// Default listen address.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Read endpoint overrides from the environment.
fn endpoints_from_env() -> OsmEndpoints {
    let mut endpoints = OsmEndpoints::default();
    let overrides = [
        ("NOMINATIM_URL", &mut endpoints.nominatim),
        ("OSRM_URL", &mut endpoints.osrm),
        ("OVERPASS_URL", &mut endpoints.overpass),
        ("WIKIPEDIA_URL", &mut endpoints.wikipedia),
    ];
    for (var, config) in overrides {
        if let Ok(url) = std::env::var(var) {
            *config = config.clone().with_base_url(url);
        }
    }

    match std::env::var("TRIP_PLANNER_USER_AGENT") {
        Ok(agent) => endpoints.with_user_agent(&agent),
        Err(_) => {
            warn!(
                user_agent = DEFAULT_USER_AGENT,
                "TRIP_PLANNER_USER_AGENT not set; public OSM services ask for contact details"
            );
            endpoints
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("trip_planner=info,tower_http=info")),
        )
        .init();

    let addr: SocketAddr = match std::env::var("TRIP_PLANNER_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
    {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, "Invalid TRIP_PLANNER_ADDR");
            std::process::exit(2);
        }
    };

    let endpoints = endpoints_from_env();
    let state = AppState::new(&endpoints, &CacheConfig::default(), PlannerConfig::default())
        .expect("Failed to create HTTP clients");

    // Create router
    let app = create_router(state);

    info!(
        %addr,
        nominatim = %endpoints.nominatim.base_url,
        osrm = %endpoints.osrm.base_url,
        overpass = %endpoints.overpass.base_url,
        wikipedia = %endpoints.wikipedia.base_url,
        "Road trip planner listening"
    );
    info!("  GET  /health          - Health check");
    info!("  GET  /api/paces       - Pace presets");
    info!("  POST /itinerary/plan  - Plan an itinerary");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
