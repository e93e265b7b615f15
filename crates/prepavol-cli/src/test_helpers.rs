// Test utilities used across `prepavol-cli` unit tests.
// Kept under `#[cfg(test)]` so it is not part of the public crate API.
use std::path::PathBuf;

use prepavol_lib::paths::ReferencePaths;
use prepavol_lib::reference::ReferenceData;

/// Reference data loaded from the checked-in fixtures.
pub fn fixture_data() -> ReferenceData {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures");
    ReferenceData::load(&ReferencePaths::in_dir(&dir)).expect("fixture data loads")
}
