//! End-to-end tests for the planning pipeline over in-memory providers.

use std::sync::Mutex;

use chrono::NaiveDate;

use super::mock::{MockNames, MockPlaces};
use super::*;
use crate::domain::{Category, Itinerary, LatLon, PaceConfig, Route, Stop, StopKind};

/// Straight road along the equator from 0°E to 9°E (~1000 km), with road
/// distance equal to its great-circle length and a steady 25 m/s.
fn equator_route() -> Route {
    let vertices: Vec<LatLon> = (0..=9).map(|d| LatLon::new(0.0, d as f64)).collect();
    let geometric = Route::new(vertices.clone(), 1.0, 1.0)
        .unwrap()
        .distance_index()
        .geometric_length();
    Route::new(vertices, geometric, geometric / 25.0).unwrap()
}

fn on_equator(lon: f64) -> LatLon {
    LatLon::new(0.0, lon)
}

fn distances<'a>(stops: impl Iterator<Item = &'a Stop>) -> Vec<f64> {
    stops.map(Stop::distance_from_start).collect()
}

#[tokio::test]
async fn rejects_invalid_input() {
    let config = PlannerConfig::default();
    let places = MockPlaces::new();
    let pois = [MockPlaces::new()];
    let names = MockNames::default();
    let planner = Planner::new(&places, &pois, &names, &config);
    let pace = PaceConfig::MODERATE;

    let result = planner.plan_itinerary(&equator_route(), 0, &pace, None).await;
    assert_eq!(result, Err(PlanError::InvalidDays(0)));

    let flat = Route::new(vec![on_equator(0.0), on_equator(1.0)], 0.0, 0.0).unwrap();
    let result = planner.plan_itinerary(&flat, 3, &pace, None).await;
    assert_eq!(result, Err(PlanError::DegenerateRoute));

    let bad = PlannerConfig {
        batch_size: 0,
        ..PlannerConfig::default()
    };
    let planner = Planner::new(&places, &pois, &names, &bad);
    let result = planner.plan_itinerary(&equator_route(), 3, &pace, None).await;
    assert!(matches!(result, Err(PlanError::InvalidConfig(_))));
}

#[tokio::test]
async fn no_lodging_anywhere_falls_back_to_basic_stops() {
    let config = PlannerConfig::default();
    let places = MockPlaces::new();
    let pois = [MockPlaces::new(), MockPlaces::new()];
    let names = MockNames::default();
    let route = equator_route();

    let itinerary = Planner::new(&places, &pois, &names, &config)
        .plan_itinerary(&route, 4, &PaceConfig::MODERATE, None)
        .await
        .unwrap();

    let ideal = route.total_distance_m() / 4.0;
    assert_eq!(itinerary.days.len(), 4);
    assert_eq!(
        distances(itinerary.overnight_stops()),
        vec![ideal, ideal * 2.0, ideal * 3.0]
    );
    for stop in itinerary.overnight_stops() {
        assert_eq!(stop.kind, StopKind::Basic);
        assert!(stop.name.starts_with("Town "));
    }
    assert!(itinerary.days[3].overnight_stop.is_none());
    assert!(itinerary.days.iter().all(|d| d.roadside_stops.is_empty()));
    assert!(itinerary.days.iter().all(|d| d.food_options.is_empty()));
    assert!((itinerary.planned_distance_m() - route.total_distance_m()).abs() < 1e-6);
}

#[tokio::test]
async fn picks_lodging_near_day_boundaries() {
    let config = PlannerConfig::default();
    let places = MockPlaces::new()
        .with_lodging("Inn West", on_equator(3.0))
        .with_lodging("Inn East", on_equator(6.0));
    let pois = [MockPlaces::new()
        .with_poi("Grand Museum", Category::Museum, on_equator(4.5))
        .with_poi("Roadhouse Diner", Category::Food, on_equator(2.885))];
    let names = MockNames::default();
    let route = equator_route();

    let itinerary = Planner::new(&places, &pois, &names, &config)
        .plan_itinerary(&route, 3, &PaceConfig::MODERATE, None)
        .await
        .unwrap();

    let ideal = route.total_distance_m() / 3.0;
    let tolerance = ideal * config.tolerance_factor;
    let nights: Vec<&Stop> = itinerary.overnight_stops().collect();
    assert_eq!(nights.len(), 2);
    assert!((nights[0].distance_from_start() - ideal).abs() <= tolerance);
    assert!((nights[1].distance_from_start() - 2.0 * ideal).abs() <= tolerance);
    assert_eq!(nights[0].accommodations()[0].title, "Inn West");
    assert_eq!(nights[1].accommodations()[0].title, "Inn East");
    assert_eq!(nights[0].full_address.as_deref(), Some("Town 2.9, Mockshire"));

    // The museum sits mid-route, so only the middle day visits it.
    assert!(itinerary.days[0].roadside_stops.is_empty());
    assert!(!itinerary.days[1].roadside_stops.is_empty());
    assert!(itinerary.days[2].roadside_stops.is_empty());
    for stop in &itinerary.days[1].roadside_stops {
        assert!(stop.attractions().iter().all(|a| a.title == "Grand Museum"));
    }

    let food: Vec<&str> = itinerary.days[0]
        .food_options
        .iter()
        .map(|f| f.title.as_str())
        .collect();
    assert_eq!(food, vec!["Roadhouse Diner"]);
    assert!(itinerary.days[1].food_options.is_empty());
}

/// Night stops: one per night, in route order, never crowding each other.
fn assert_nights_spaced(itinerary: &Itinerary, days: usize, spacing_factor: f64) {
    let nights = distances(itinerary.overnight_stops());
    assert_eq!(nights.len(), days - 1);
    for pair in nights.windows(2) {
        assert!(pair[0] < pair[1]);
        assert!(pair[1] - pair[0] >= itinerary.ideal_daily_distance_m * spacing_factor);
    }
}

#[tokio::test]
async fn lodging_clustered_early_still_fills_every_night() {
    let config = PlannerConfig::default();
    // Both inns lie before the first day boundary (~334 km).
    let places = MockPlaces::new()
        .with_lodging("Inn Near", on_equator(0.9))
        .with_lodging("Inn Far", on_equator(2.7));
    let pois = [MockPlaces::new()];
    let names = MockNames::default();
    let route = equator_route();

    let itinerary = Planner::new(&places, &pois, &names, &config)
        .plan_itinerary(&route, 3, &PaceConfig::MODERATE, None)
        .await
        .unwrap();

    assert_nights_spaced(&itinerary, 3, config.spacing_factor);
    for stop in itinerary.overnight_stops() {
        assert!(matches!(stop.kind, StopKind::Overnight { .. }));
    }
    assert!(itinerary.days[2].overnight_stop.is_none());
    assert!((itinerary.planned_distance_m() - route.total_distance_m()).abs() < 1e-6);
}

#[tokio::test]
async fn sparse_lodging_mixes_real_and_basic_stops() {
    let config = PlannerConfig::default();
    let places = MockPlaces::new().with_lodging("Lonely Motel", on_equator(0.9));
    let pois = [MockPlaces::new()];
    let names = MockNames::default();
    let route = equator_route();

    let itinerary = Planner::new(&places, &pois, &names, &config)
        .plan_itinerary(&route, 4, &PaceConfig::MODERATE, None)
        .await
        .unwrap();

    assert_nights_spaced(&itinerary, 4, config.spacing_factor);
    let kinds: Vec<&StopKind> = itinerary.overnight_stops().map(|s| &s.kind).collect();
    assert!(kinds.iter().any(|k| matches!(k, StopKind::Overnight { .. })));
    assert!(kinds.iter().any(|k| matches!(k, StopKind::Basic)));
    let last = itinerary.days[2].overnight_stop.as_ref().unwrap();
    assert_eq!(last.kind, StopKind::Basic);
    assert!((last.distance_from_start() - itinerary.ideal_daily_distance_m * 3.0).abs() < 1e-6);
    assert!((itinerary.planned_distance_m() - route.total_distance_m()).abs() < 1e-6);
}

#[tokio::test]
async fn stop_order_does_not_depend_on_batching() {
    let places = MockPlaces::new()
        .with_lodging("Inn A", on_equator(2.0))
        .with_lodging("Inn B", on_equator(4.0))
        .with_lodging("Inn C", on_equator(7.0));
    let pois = [
        MockPlaces::new()
            .with_poi("Zoo", Category::Zoo, on_equator(1.0))
            .with_poi("Falls", Category::Nature, on_equator(5.5)),
        MockPlaces::new().with_poi("Fort", Category::Cultural, on_equator(8.0)),
    ];
    let names = MockNames::default();
    let route = equator_route();

    let one_at_a_time = PlannerConfig {
        batch_size: 1,
        ..PlannerConfig::default()
    };
    let wide = PlannerConfig {
        batch_size: 16,
        ..PlannerConfig::default()
    };

    let a = Planner::new(&places, &pois, &names, &one_at_a_time)
        .plan_itinerary(&route, 4, &PaceConfig::ACTIVE, None)
        .await
        .unwrap();
    let b = Planner::new(&places, &pois, &names, &wide)
        .plan_itinerary(&route, 4, &PaceConfig::ACTIVE, None)
        .await
        .unwrap();

    assert_eq!(a, b);
    let nights = distances(a.overnight_stops());
    assert_eq!(nights.len(), 3);
    for pair in nights.windows(2) {
        assert!(pair[0] < pair[1]);
        assert!(pair[1] - pair[0] >= a.ideal_daily_distance_m * 0.2);
    }
    for day in &a.days {
        let roadside = distances(day.roadside_stops.iter());
        assert!(roadside.windows(2).all(|p| p[0] <= p[1]));
        assert!(day.roadside_stops.len() <= PaceConfig::ACTIVE.max_roadside_stops);
    }
}

#[tokio::test]
async fn single_day_drives_the_whole_route() {
    let config = PlannerConfig::default();
    let places = MockPlaces::new().with_lodging("Inn", on_equator(4.5));
    let pois = [MockPlaces::new()];
    let names = MockNames::default();
    let route = equator_route();

    let itinerary = Planner::new(&places, &pois, &names, &config)
        .plan_itinerary(&route, 1, &PaceConfig::RELAXED, None)
        .await
        .unwrap();

    assert_eq!(itinerary.days.len(), 1);
    assert!(itinerary.days[0].overnight_stop.is_none());
    assert_eq!(
        itinerary.days[0].driving_distance_meters,
        route.total_distance_m()
    );
    assert!((itinerary.days[0].driving_hours - route.total_duration_s() / 3600.0).abs() < 1e-9);
    assert!(places.calls().is_empty());
}

#[tokio::test]
async fn unnamed_stops_fall_back_to_distance() {
    let config = PlannerConfig::default();
    let places = MockPlaces::new();
    let pois = [MockPlaces::new()];
    let names = MockNames { fail: true };
    let route = equator_route();

    let itinerary = Planner::new(&places, &pois, &names, &config)
        .plan_itinerary(&route, 2, &PaceConfig::MODERATE, None)
        .await
        .unwrap();

    let stop = itinerary.days[0].overnight_stop.as_ref().unwrap();
    let km = (route.total_distance_m() / 2.0 / 1000.0).round();
    assert_eq!(stop.name, format!("Stop at {km:.0} km"));
    assert_eq!(stop.full_address, None);
}

#[tokio::test]
async fn preferences_and_dates_flow_through() {
    let config = PlannerConfig::default();
    let places = MockPlaces::new();
    let pois = [MockPlaces::new()
        .with_poi("Old Museum", Category::Museum, on_equator(1.5))
        .with_poi("River Trail", Category::Nature, on_equator(1.52))];
    let names = MockNames::default();
    let route = equator_route();
    let start = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
    let preferences = [Category::Nature];

    let itinerary = Planner::new(&places, &pois, &names, &config)
        .with_preferences(&preferences)
        .with_start_date(start)
        .plan_itinerary(&route, 2, &PaceConfig::ACTIVE, None)
        .await
        .unwrap();

    assert_eq!(itinerary.days[0].date, Some(start));
    assert_eq!(itinerary.days[1].date, NaiveDate::from_ymd_opt(2026, 5, 2));

    let attractions: Vec<&str> = itinerary
        .days
        .iter()
        .flat_map(|d| &d.roadside_stops)
        .flat_map(|s| s.attractions())
        .map(|a| a.title.as_str())
        .collect();
    assert!(!attractions.is_empty());
    assert!(attractions.iter().all(|t| *t == "River Trail"));
}

#[tokio::test]
async fn progress_is_reported_in_order() {
    let config = PlannerConfig::default();
    let places = MockPlaces::new();
    let pois = [MockPlaces::new()];
    let names = MockNames::default();
    let seen = Mutex::new(Vec::new());
    let on_progress = |percent: u8, message: &str| {
        seen.lock().unwrap().push((percent, message.to_string()));
    };

    Planner::new(&places, &pois, &names, &config)
        .plan_itinerary(&equator_route(), 3, &PaceConfig::MODERATE, Some(&on_progress))
        .await
        .unwrap();

    let seen = seen.into_inner().unwrap();
    let percents: Vec<u8> = seen.iter().map(|(p, _)| *p).collect();
    assert!(percents.windows(2).all(|p| p[0] < p[1]));
    assert_eq!(percents.last(), Some(&100));
    assert_eq!(seen.last().map(|(_, m)| m.as_str()), Some("Done"));
}
