//! Prepavol library entry points.
//!
//! This crate loads the fleet and reference data of a flying club, computes
//! the weight and balance of a loaded aircraft, predicts take-off and landing
//! distances from handbook tables, and checks fuel on board against a planned
//! flight. Front ends (the CLI) should only depend on the functions exported
//! here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod aircraft;
pub mod altitude;
pub mod error;
pub mod fuel;
pub mod loading;
pub mod paths;
pub mod performance;
pub mod reference;
pub mod trip;

#[cfg(test)]
mod test_helpers;

pub use aircraft::{AircraftProfile, Envelope, FleetCatalog};
pub use altitude::{density_altitude, pressure_altitude, FieldConditions};
pub use error::{Error, Result};
pub use loading::{
    FuelAdjustment, FuelQuantity, LoadState, LoadingPlan, Violation, WeightBalanceReport,
};
pub use paths::{default_data_dir, ReferencePaths};
pub use performance::{
    DistanceTable, HandbookLibrary, Operation, PerformanceGrid, PerformanceModel,
    PerformanceRequest, RunwaySurface,
};
pub use reference::{Airfield, AirfieldDirectory, FuelTable, ReferenceData};
pub use trip::{plan_trip, FlightCategory, TripLeg, TripPlan, TripReport};
