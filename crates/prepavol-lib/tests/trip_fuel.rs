mod common;

use prepavol_lib::loading::LoadState;
use prepavol_lib::trip::{plan_trip, FlightCategory, TripLeg, TripPlan};

#[test]
fn night_navigation_with_full_tanks_is_authorized() {
    let profile = common::profile("F-GTZR");
    let mut state = LoadState::new(&profile);
    for tank in ["main", "left_wing", "right_wing", "aux"] {
        state.set_fuel_gauge(tank, 4.0).unwrap();
    }

    let plan = TripPlan::new(
        FlightCategory::Night,
        vec![TripLeg::new(10.0, 90.0), TripLeg::new(10.0, 90.0)],
        TripLeg::new(-10.0, 55.0),
    )
    .with_margin(20.0);
    let report = plan_trip(&state, &plan).expect("valid plan");

    // 120 legs + 10 taxi + 20 arrival + 30 alternate + 20 margin + 45 reserve.
    assert!((report.total_time_min - 245.0).abs() < 1e-9);
    assert!((report.required_litres - (0.5 * 245.0 + 4.0)).abs() < 1e-9);
    assert!((report.carried_litres - 240.0).abs() < 1e-9);
    assert!((report.endurance_min - 472.0).abs() < 1e-9);
    assert!((report.max_flight_time_min - 427.0).abs() < 1e-9);
    assert_eq!(report.shortfall_litres, 0.0);
    assert!(report.authorized);
}

#[test]
fn quarter_tank_is_short_for_a_long_leg() {
    let profile = common::profile("F-HAAC");
    let mut state = LoadState::new(&profile);
    state.set_fuel_gauge("main", 1.0).unwrap();

    let plan = TripPlan::new(
        FlightCategory::Navigation,
        vec![TripLeg::new(0.0, 100.0)],
        TripLeg::new(0.0, 20.0),
    );
    let report = plan_trip(&state, &plan).unwrap();

    // 60 leg + 5 taxi + 10 arrival + 12 alternate + 30 reserve at 0.4 L/min, plus 2 L unusable.
    assert!((report.required_litres - (0.4 * 117.0 + 2.0)).abs() < 1e-9);
    assert!((report.shortfall_litres - (report.required_litres - 27.5)).abs() < 1e-9);
    assert!(!report.authorized);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["category"], "navigation");
    assert_eq!(json["authorized"], false);
}
