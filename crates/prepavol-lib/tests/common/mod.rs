//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use prepavol_lib::paths::ReferencePaths;
use prepavol_lib::reference::ReferenceData;
use prepavol_lib::AircraftProfile;

/// Path to fixtures directory used by tests (fleet, fuels, handbook tables).
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Every fixture reference file, loaded.
#[allow(dead_code)]
pub fn reference_data() -> ReferenceData {
    ReferenceData::load(&ReferencePaths::in_dir(&fixtures_dir())).expect("load fixture data")
}

/// Convenience helper to load one aircraft of the fixture fleet.
#[allow(dead_code)]
pub fn profile(callsign: &str) -> AircraftProfile {
    reference_data()
        .fleet
        .require(callsign)
        .expect("callsign present in fixtures")
        .clone()
}
