//! Behavioural tests for directions providers.
//!
//! Most scenarios use [`StubDirectionsProvider`]; the HTTP provider is only
//! exercised on paths that never reach a live service.

use culturemap_core::{
    Directions, DirectionsError, DirectionsProvider, DirectionsRequest, GeoPoint, Itinerary,
    LegSource, RateLimitScope, RoutePlan, RoutePlanner, Stop, TransportMode, TravelEstimator,
};
use culturemap_data::routing::test_support::StubDirectionsProvider;
use culturemap_data::{
    DisabledDirectionsProvider, HttpDirectionsProvider, HttpDirectionsProviderConfig,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use std::time::Duration;

type ProviderCell = RefCell<Option<Box<dyn DirectionsProvider>>>;
type ResultCell = RefCell<Option<Result<Directions, DirectionsError>>>;
type PlanCell = RefCell<Option<RoutePlan>>;

#[fixture]
fn provider() -> ProviderCell {
    RefCell::new(None)
}

#[fixture]
fn result() -> ResultCell {
    RefCell::new(None)
}

#[fixture]
fn plan() -> PlanCell {
    RefCell::new(None)
}

fn city_hall() -> GeoPoint {
    GeoPoint::new(37.5665, 126.9780)
}

fn gangnam() -> GeoPoint {
    GeoPoint::new(37.4979, 127.0276)
}

fn set_provider(cell: &ProviderCell, provider: impl DirectionsProvider + 'static) {
    *cell.borrow_mut() = Some(Box::new(provider));
}

fn request(provider: &ProviderCell, result: &ResultCell, request: &DirectionsRequest) {
    let guard = provider.borrow();
    let directions = guard.as_ref().expect("provider must be initialised");
    *result.borrow_mut() = Some(directions.directions(request));
}

fn outcome(result: &ResultCell) -> Result<Directions, DirectionsError> {
    result.borrow().clone().expect("a request must have been made")
}

// --- Given steps ---

#[given("a routing service returning a 4 km route")]
fn stub_route(#[from(provider)] provider: &ProviderCell) {
    set_provider(provider, StubDirectionsProvider::with_route(4_000.0, 600.0));
}

#[given("a routing service that rejects the API key")]
fn stub_unauthorized(#[from(provider)] provider: &ProviderCell) {
    set_provider(
        provider,
        StubDirectionsProvider::with_error(DirectionsError::Unauthorized),
    );
}

#[given("an HTTP directions provider with no call budget")]
fn http_without_budget(#[from(provider)] provider: &ProviderCell) {
    let http = HttpDirectionsProvider::with_config(
        HttpDirectionsProviderConfig::new("test-key").with_limits(0, 0),
    )
    .expect("provider should build");
    set_provider(provider, http);
}

#[given("an HTTP directions provider pointing at a closed port")]
fn http_closed_port(#[from(provider)] provider: &ProviderCell) {
    let http = HttpDirectionsProvider::with_config(
        HttpDirectionsProviderConfig::new("test-key")
            .with_base_url("http://127.0.0.1:9/v1/directions")
            .with_timeout(Duration::from_secs(5)),
    )
    .expect("provider should build");
    set_provider(provider, http);
}

#[given("a directions provider without an API key")]
fn disabled(#[from(provider)] provider: &ProviderCell) {
    set_provider(provider, DisabledDirectionsProvider::new());
}

// --- When steps ---

#[when("I request directions between two points")]
fn request_two_points(#[from(provider)] provider: &ProviderCell, #[from(result)] result: &ResultCell) {
    request(provider, result, &DirectionsRequest::new(city_hall(), gangnam()));
}

#[when("I request directions from a point to itself")]
fn request_same_point(#[from(provider)] provider: &ProviderCell, #[from(result)] result: &ResultCell) {
    request(
        provider,
        result,
        &DirectionsRequest::new(city_hall(), city_hall()),
    );
}

#[when("I plan a two stop itinerary")]
fn plan_two_stops(#[from(provider)] provider: &ProviderCell, #[from(plan)] plan: &PlanCell) {
    let guard = provider.borrow();
    let directions = guard.as_ref().expect("provider must be initialised");
    let itinerary = Itinerary::new(vec![
        Stop::new(1, "Seoul City Hall", Some(city_hall())),
        Stop::new(2, "Gangnam Station", Some(gangnam())),
    ]);
    let planner = RoutePlanner::new(directions.as_ref(), TravelEstimator::default());
    *plan.borrow_mut() = Some(planner.plan(&itinerary));
}

// --- Then steps ---

#[then("a ten minute drive of four kilometres is returned")]
fn then_drive(#[from(result)] result: &ResultCell) {
    let directions = outcome(result).expect("expected a route");
    assert_eq!(directions.transport_mode, TransportMode::Drive);
    assert_eq!(directions.distance_text(), "4.0km");
    assert_eq!(directions.duration_text(), "약 10분");
}

#[then("a same origin and destination error is returned")]
fn then_same_origin(#[from(result)] result: &ResultCell) {
    assert_eq!(
        outcome(result),
        Err(DirectionsError::SameOriginAndDestination)
    );
}

#[then("a per-minute rate limit error is returned")]
fn then_rate_limited(#[from(result)] result: &ResultCell) {
    assert_eq!(
        outcome(result),
        Err(DirectionsError::RateLimited {
            scope: RateLimitScope::Minute
        })
    );
}

#[then("a disabled error is returned")]
fn then_disabled(#[from(result)] result: &ResultCell) {
    assert_eq!(outcome(result), Err(DirectionsError::Disabled));
}

#[then("a network error is returned")]
fn then_network_error(#[from(result)] result: &ResultCell) {
    let outcome = outcome(result);
    assert!(
        matches!(
            outcome,
            Err(DirectionsError::NetworkError { .. } | DirectionsError::Timeout { .. })
        ),
        "expected NetworkError, got {outcome:?}"
    );
}

#[then("the leg is estimated as a drive")]
fn then_leg_estimated(#[from(plan)] plan: &PlanCell) {
    let borrowed = plan.borrow();
    let plan = borrowed.as_ref().expect("plan recorded");
    assert_eq!(plan.legs.len(), 1);
    match &plan.legs[0].source {
        LegSource::Estimated(estimate) => {
            assert_eq!(estimate.transport_mode, TransportMode::Drive);
        }
        other => panic!("expected an estimate, got {other:?}"),
    }
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/directions.feature", name = $title)]
        fn $fn_name(provider: ProviderCell, result: ResultCell, plan: PlanCell) {
            let _ = (provider, result, plan);
        }
    };
}

register_scenario!(
    returning_a_route,
    "returning a route from the routing service"
);
register_scenario!(rejecting_identical_endpoints, "rejecting identical endpoints");
register_scenario!(
    blocking_spent_quota,
    "blocking requests once the quota is spent"
);
register_scenario!(
    refusing_without_key,
    "refusing requests without an API key"
);
register_scenario!(
    handling_unreachable_service,
    "handling an unreachable routing service"
);
register_scenario!(
    falling_back_to_estimates,
    "falling back to estimates when the service rejects the key"
);
