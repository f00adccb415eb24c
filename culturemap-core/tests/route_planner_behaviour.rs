//! Behavioural tests for [`RoutePlanner`].

use culturemap_core::test_support::{FailingDirectionsProvider, StraightLineDirectionsProvider};
use culturemap_core::{
    DirectionsError, DirectionsProvider, GeoPoint, Itinerary, LegSource, RateLimitScope,
    RoutePlan, RoutePlanner, Stop, SummaryError, TravelEstimator,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

type ProviderCell = RefCell<Option<Box<dyn DirectionsProvider>>>;
type PlanCell = RefCell<Option<RoutePlan>>;

#[fixture]
fn provider() -> ProviderCell {
    RefCell::new(None)
}

#[fixture]
fn plan() -> PlanCell {
    RefCell::new(None)
}

fn three_stops() -> Itinerary {
    Itinerary::new(vec![
        Stop::new(1, "Gwanghwamun", Some(GeoPoint::new(37.5759, 126.9768))).with_visit_order(1),
        Stop::new(2, "Jogyesa", Some(GeoPoint::new(37.5740, 126.9817))).with_visit_order(2),
        Stop::new(3, "Dongdaemun", Some(GeoPoint::new(37.5663, 127.0092))).with_visit_order(3),
    ])
}

fn run_planner(provider: &ProviderCell, plan: &PlanCell, itinerary: &Itinerary) {
    let guard = provider.borrow();
    let directions = guard.as_ref().expect("provider must be initialised");
    let planner = RoutePlanner::new(directions.as_ref(), TravelEstimator::default());
    *plan.borrow_mut() = Some(planner.plan(itinerary));
}

#[given("a directions provider that answers every request")]
fn answering_provider(#[from(provider)] provider: &ProviderCell) {
    *provider.borrow_mut() = Some(Box::new(StraightLineDirectionsProvider));
}

#[given("a directions provider that is rate limited")]
fn rate_limited_provider(#[from(provider)] provider: &ProviderCell) {
    *provider.borrow_mut() = Some(Box::new(FailingDirectionsProvider::new(
        DirectionsError::RateLimited {
            scope: RateLimitScope::Day,
        },
    )));
}

#[when("I plan a three stop itinerary")]
fn plan_three_stops(#[from(provider)] provider: &ProviderCell, #[from(plan)] plan: &PlanCell) {
    run_planner(provider, plan, &three_stops());
}

#[when("I plan an itinerary with a stop lacking coordinates")]
fn plan_with_gap(#[from(provider)] provider: &ProviderCell, #[from(plan)] plan: &PlanCell) {
    let mut itinerary = three_stops();
    if let Some(stop) = itinerary.stops.get_mut(1) {
        stop.location = None;
    }
    run_planner(provider, plan, &itinerary);
}

#[then("every leg is routed")]
fn every_leg_routed(#[from(plan)] plan: &PlanCell) {
    let borrowed = plan.borrow();
    let plan = borrowed.as_ref().expect("plan recorded");
    assert_eq!(plan.legs.len(), 2);
    assert_eq!(plan.routed_legs(), 2);
}

#[then("the whole route summary is present")]
fn summary_present(#[from(plan)] plan: &PlanCell) {
    let borrowed = plan.borrow();
    let plan = borrowed.as_ref().expect("plan recorded");
    let summary = plan.summary.as_ref().expect("summary present");
    assert_eq!(summary.path.len(), 3, "origin, waypoint and destination");
}

#[then("every leg is estimated")]
fn every_leg_estimated(#[from(plan)] plan: &PlanCell) {
    let borrowed = plan.borrow();
    let plan = borrowed.as_ref().expect("plan recorded");
    assert!(
        plan.legs
            .iter()
            .all(|leg| matches!(leg.source, LegSource::Estimated(_))),
        "expected estimates, got {:?}",
        plan.legs
    );
}

#[then("the summary records the provider error")]
fn summary_records_error(#[from(plan)] plan: &PlanCell) {
    let borrowed = plan.borrow();
    let plan = borrowed.as_ref().expect("plan recorded");
    assert!(plan.summary.is_none());
    match &plan.summary_error {
        Some(SummaryError::Provider(message)) => assert!(message.contains("daily")),
        other => panic!("expected provider error, found {other:?}"),
    }
}

#[then("the legs touching that stop are unavailable")]
fn legs_unavailable(#[from(plan)] plan: &PlanCell) {
    let borrowed = plan.borrow();
    let plan = borrowed.as_ref().expect("plan recorded");
    assert!(
        plan.legs
            .iter()
            .all(|leg| matches!(leg.source, LegSource::Unavailable))
    );
    assert!(plan.summary.is_some(), "first and last stops are located");
}

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/route_planner.feature", name = $title)]
        fn $fn_name(provider: ProviderCell, plan: PlanCell) {
            let _ = (provider, plan);
        }
    };
}

register_scenario!(
    routed_legs_from_provider,
    "routed legs come from the directions provider"
);
register_scenario!(
    failing_directions_fall_back,
    "failing directions fall back to straight-line estimates"
);
register_scenario!(
    stops_without_coordinates,
    "stops without coordinates have no travel information"
);
