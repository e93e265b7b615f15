//! Aircraft profiles, centre-of-gravity envelopes and the fleet catalog.
//!
//! - [`profile`] - Validated per-aircraft characteristics and the catalog record schema
//! - [`envelope`] - CG envelope polygon with boundary-inclusive containment
//! - [`catalog`] - Fleet catalog loading and callsign lookup
//! - [`constants`] - Standard station names
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use prepavol_lib::aircraft::FleetCatalog;
//! use prepavol_lib::reference::FuelTable;
//!
//! let fuels = FuelTable::from_path(Path::new("fuels.json")).unwrap();
//! let fleet = FleetCatalog::from_path(Path::new("fleet.json"), &fuels).unwrap();
//! let profile = fleet.require("F-HAAC").unwrap();
//! assert!(profile.envelope.contains(0.43, 825.0));
//! ```

pub mod catalog;
pub mod constants;
pub mod envelope;
pub mod profile;

pub use catalog::FleetCatalog;
pub use constants::{ENVELOPE_EDGE_TOLERANCE, STANDARD_BAGGAGE_ZONES, STANDARD_TANKS};
pub use envelope::{Envelope, EnvelopePoint};
pub use profile::{AircraftProfile, BaggageZone, FleetRecord, Seat, Tank};
