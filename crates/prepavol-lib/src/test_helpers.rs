// Test-only helpers for `prepavol-lib` unit tests
#![allow(dead_code)]

use std::io::Cursor;

use crate::aircraft::{AircraftProfile, FleetCatalog};
use crate::performance::{HandbookTable, Operation};
use crate::reference::FuelTable;

const FLEET_JSON: &str = include_str!("../../../docs/fixtures/fleet.json");
const FUELS_JSON: &str = include_str!("../../../docs/fixtures/fuels.json");
const DR400_120_TAKEOFF: &str =
    include_str!("../../../docs/fixtures/performance/DR400-120_takeoff.csv");
const DR400_120_LANDING: &str =
    include_str!("../../../docs/fixtures/performance/DR400-120_landing.csv");

pub fn fuels() -> FuelTable {
    FuelTable::from_reader(Cursor::new(FUELS_JSON)).expect("fixture fuels parse")
}

pub fn fleet() -> FleetCatalog {
    FleetCatalog::from_reader(Cursor::new(FLEET_JSON), &fuels()).expect("fixture fleet parses")
}

fn profile(callsign: &str) -> AircraftProfile {
    fleet()
        .get(callsign)
        .cloned()
        .unwrap_or_else(|| panic!("{callsign} is in the fixture fleet"))
}

/// Single main tank, one baggage zone, no combined limit.
pub fn dr400_120() -> AircraftProfile {
    profile("F-HAAC")
}

/// Main, wing and auxiliary tanks.
pub fn dr400_140b() -> AircraftProfile {
    profile("F-GTZR")
}

/// Wing tanks only, two baggage zones with a combined limit.
pub fn s201() -> AircraftProfile {
    profile("OO-SBA")
}

pub fn dr400_120_table(operation: Operation) -> HandbookTable {
    let text = match operation {
        Operation::Takeoff => DR400_120_TAKEOFF,
        Operation::Landing => DR400_120_LANDING,
    };
    HandbookTable::from_reader("DR400-120", operation, Cursor::new(text))
        .expect("fixture handbook table parses")
}
