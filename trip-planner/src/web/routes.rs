//! HTTP route handlers.

use std::future::Future;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::domain::{Category, LatLon, PaceConfig};
use crate::planner::{
    Geocoder, LodgingProvider, PlanError, PlannerConfig, Planner, PoiProvider, ProviderError,
    ReverseGeocoder, RouteProvider,
};

use super::dto::*;
use super::state::AppState;

/// Longest trip a single request may plan.
pub const MAX_DAYS: i64 = 30;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/paces", get(list_paces))
        .route("/itinerary/plan", post(plan_itinerary))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List the pace presets.
async fn list_paces() -> Json<PacesResponse> {
    Json(PacesResponse {
        paces: PaceConfig::PRESETS.to_vec(),
    })
}

/// Plan a multi-day itinerary between two places.
async fn plan_itinerary(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlanItineraryResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanItineraryRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, body = %String::from_utf8_lossy(&body), "Invalid plan request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let backends = Backends {
        geocoder: state.geocoder.as_ref(),
        router: state.router.as_ref(),
        lodging: state.lodging.as_ref(),
        pois: state.pois.as_slice(),
        names: state.names.as_ref(),
        config: state.config.as_ref(),
    };
    Ok(Json(plan(&backends, req).await?))
}

/// The collaborators a plan request needs.
struct Backends<'a, G, R, L, P, N> {
    geocoder: &'a G,
    router: &'a R,
    lodging: &'a L,
    pois: &'a [P],
    names: &'a N,
    config: &'a PlannerConfig,
}

/// Validate a request, resolve its endpoints, route and plan.
async fn plan<G, R, L, P, N>(
    backends: &Backends<'_, G, R, L, P, N>,
    req: PlanItineraryRequest,
) -> Result<PlanItineraryResponse, AppError>
where
    G: Geocoder,
    R: RouteProvider,
    L: LodgingProvider,
    P: PoiProvider,
    N: ReverseGeocoder,
{
    if !(1..=MAX_DAYS).contains(&req.days) {
        return Err(AppError::BadRequest {
            message: format!("days must be between 1 and {MAX_DAYS}, got {}", req.days),
        });
    }
    let days = req.days as usize;

    let pace = match req.pace.as_deref() {
        Some(name) => PaceConfig::preset(name).map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?,
        None => PaceConfig::default(),
    };
    let preferences = parse_preferences(&req.preferences)?;

    info!(
        days,
        pace = pace.name,
        preferences = preferences.len(),
        "Plan request"
    );

    let timeout = backends.config.request_timeout();
    let (start, end) = tokio::join!(
        resolve(backends.geocoder, &req.start, timeout),
        resolve(backends.geocoder, &req.end, timeout)
    );
    let (start, end) = (start?, end?);

    let route = with_timeout(
        timeout,
        backends.router.route(start.position(), end.position()),
    )
    .await?;

    let on_progress = |percent: u8, message: &str| {
        info!(percent, message, "Planning progress");
    };
    let mut planner = Planner::new(
        backends.lodging,
        backends.pois,
        backends.names,
        backends.config,
    )
    .with_preferences(&preferences);
    if let Some(date) = req.start_date {
        planner = planner.with_start_date(date);
    }
    let itinerary = planner
        .plan_itinerary(&route, days, &pace, Some(&on_progress))
        .await?;

    Ok(PlanItineraryResponse {
        start,
        end,
        itinerary,
    })
}

fn parse_preferences(names: &[String]) -> Result<Vec<Category>, AppError> {
    let mut preferences = Vec::with_capacity(names.len());
    for name in names {
        let category = Category::from_name(name).ok_or_else(|| AppError::BadRequest {
            message: format!("Unknown preference: {name}"),
        })?;
        if !preferences.contains(&category) {
            preferences.push(category);
        }
    }
    Ok(preferences)
}

async fn resolve<G: Geocoder>(
    geocoder: &G,
    input: &PlaceInput,
    timeout: std::time::Duration,
) -> Result<ResolvedPlace, AppError> {
    match input {
        PlaceInput::Coordinates { lat, lon } => {
            let at = LatLon::parse(*lat, *lon).map_err(|e| AppError::BadRequest {
                message: e.to_string(),
            })?;
            Ok(ResolvedPlace::new(format!("{:.5}, {:.5}", at.lat, at.lon), at))
        }
        PlaceInput::Text(text) if text.trim().is_empty() => Err(AppError::BadRequest {
            message: "Place name must not be empty".to_string(),
        }),
        PlaceInput::Text(text) => {
            let place = with_timeout(timeout, geocoder.resolve(text)).await?;
            Ok(ResolvedPlace::new(place.display_name, place.position))
        }
    }
}

/// Bound a collaborator call that sits outside the planner.
async fn with_timeout<T>(
    timeout: std::time::Duration,
    call: impl Future<Output = Result<T, ProviderError>>,
) -> Result<T, ProviderError> {
    tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| ProviderError::Timeout(timeout))?
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unprocessable { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        let message = e.to_string();
        match e {
            ProviderError::NotFound(_) => AppError::NotFound { message },
            ProviderError::NoRoute { .. } => AppError::Unprocessable { message },
            _ => AppError::BadGateway { message },
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        let message = e.to_string();
        match e {
            PlanError::InvalidDays(_) => AppError::BadRequest { message },
            PlanError::DegenerateRoute => AppError::Unprocessable { message },
            PlanError::InvalidConfig(_) => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            warn!(%status, message, "Request failed");
        } else {
            debug!(%status, message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use chrono::NaiveDate;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::cache::CacheConfig;
    use crate::osm::{OsmConfig, OsmEndpoints};
    use crate::planner::mock::{MockGeocoder, MockNames, MockPlaces, MockRouter};

    const WEST: LatLon = LatLon::new(0.0, 0.0);
    const EAST: LatLon = LatLon::new(0.0, 9.0);

    struct Fixture {
        geocoder: MockGeocoder,
        router: MockRouter,
        places: MockPlaces,
        pois: Vec<MockPlaces>,
        names: MockNames,
        config: PlannerConfig,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                geocoder: MockGeocoder::default()
                    .with_place("Westport", WEST)
                    .with_place("Eastbury", EAST),
                router: MockRouter::default(),
                places: MockPlaces::new().with_lodging("Halfway Inn", LatLon::new(0.0, 4.5)),
                pois: vec![MockPlaces::new()],
                names: MockNames::default(),
                config: PlannerConfig::default(),
            }
        }

        async fn plan(&self, body: Value) -> Result<PlanItineraryResponse, AppError> {
            let backends = Backends {
                geocoder: &self.geocoder,
                router: &self.router,
                lodging: &self.places,
                pois: &self.pois,
                names: &self.names,
                config: &self.config,
            };
            plan(&backends, serde_json::from_value(body).unwrap()).await
        }
    }

    #[tokio::test]
    async fn plans_between_named_places() {
        let response = Fixture::new()
            .plan(json!({
                "start": "westport",
                "end": "Eastbury",
                "days": 2,
                "pace": "relaxed",
                "start_date": "2026-07-04"
            }))
            .await
            .unwrap();

        assert_eq!(response.start.name, "Westport");
        assert_eq!(response.end.position(), EAST);
        let itinerary = response.itinerary;
        assert_eq!(itinerary.pace, "relaxed");
        assert_eq!(itinerary.days.len(), 2);
        assert_eq!(itinerary.days[0].date, NaiveDate::from_ymd_opt(2026, 7, 4));
        let night = itinerary.days[0].overnight_stop.as_ref().unwrap();
        assert_eq!(night.accommodations()[0].title, "Halfway Inn");
    }

    #[tokio::test]
    async fn coordinates_skip_geocoding() {
        let fixture = Fixture {
            geocoder: MockGeocoder::default(),
            ..Fixture::new()
        };
        let response = fixture
            .plan(json!({
                "start": {"lat": 0.0, "lon": 0.0},
                "end": {"lat": 0.0, "lon": 9.0},
                "days": 1
            }))
            .await
            .unwrap();
        assert_eq!(response.start.name, "0.00000, 0.00000");
        assert_eq!(response.itinerary.pace, "moderate");
    }

    #[tokio::test]
    async fn invalid_input_is_a_bad_request() {
        let fixture = Fixture::new();
        for body in [
            json!({"start": "Westport", "end": "Eastbury", "days": 0}),
            json!({"start": "Westport", "end": "Eastbury", "days": 31}),
            json!({"start": "Westport", "end": "Eastbury", "days": 2, "pace": "sprint"}),
            json!({"start": "Westport", "end": "Eastbury", "days": 2, "preferences": ["shopping"]}),
            json!({"start": {"lat": 95.0, "lon": 0.0}, "end": "Eastbury", "days": 2}),
            json!({"start": "  ", "end": "Eastbury", "days": 2}),
        ] {
            let result = fixture.plan(body.clone()).await;
            assert!(
                matches!(result, Err(AppError::BadRequest { .. })),
                "{body} gave {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn unknown_place_is_not_found() {
        let result = Fixture::new()
            .plan(json!({"start": "Atlantis", "end": "Eastbury", "days": 2}))
            .await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn unroutable_or_empty_trips_are_unprocessable() {
        let fixture = Fixture {
            router: MockRouter { no_route: true },
            ..Fixture::new()
        };
        let result = fixture
            .plan(json!({"start": "Westport", "end": "Eastbury", "days": 2}))
            .await;
        assert!(matches!(result, Err(AppError::Unprocessable { .. })));

        let result = Fixture::new()
            .plan(json!({"start": "Westport", "end": "Westport", "days": 2}))
            .await;
        assert!(matches!(result, Err(AppError::Unprocessable { .. })));
    }

    #[test]
    fn duplicate_preferences_collapse() {
        let names = vec!["museum".to_string(), "Museums".to_string(), "park".to_string()];
        assert_eq!(
            parse_preferences(&names).unwrap(),
            vec![Category::Museum, Category::Park]
        );
    }

    #[test]
    fn provider_errors_map_to_statuses() {
        let status = |e: ProviderError| AppError::from(e).into_response().status();
        assert_eq!(status(ProviderError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status(ProviderError::NoRoute { from: WEST, to: EAST }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(status(ProviderError::RateLimited), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status(ProviderError::Timeout(Duration::from_secs(1))),
            StatusCode::BAD_GATEWAY
        );
    }

    /// State whose collaborators all point at a closed local port.
    fn offline_state() -> AppState {
        let closed = OsmConfig::new("http://127.0.0.1:9")
            .with_timeout(2)
            .with_min_interval(Duration::ZERO);
        let endpoints = OsmEndpoints {
            nominatim: closed.clone(),
            osrm: closed.clone(),
            overpass: closed.clone(),
            wikipedia: closed,
        };
        AppState::new(&endpoints, &CacheConfig::default(), PlannerConfig::default()).unwrap()
    }

    async fn send(request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = create_router(offline_state())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    fn post_plan(body: &str) -> Request<Body> {
        Request::post("/itinerary/plan")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }

    #[tokio::test]
    async fn paces_endpoint() {
        let (status, body) = send(Request::get("/api/paces").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        let names: Vec<&str> = json["paces"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|p| p["name"].as_str())
            .collect();
        assert_eq!(names, vec!["relaxed", "moderate", "active"]);
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let (status, body) = send(post_plan("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn unreachable_router_is_a_bad_gateway() {
        let (status, _) = send(post_plan(
            r#"{"start": {"lat": 44.98, "lon": -93.27}, "end": {"lat": 41.88, "lon": -87.63}, "days": 2}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
