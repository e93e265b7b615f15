//! Reference data consumed by the engines: fuel grades, airfields, and the
//! bundle of every reference file found in a data directory.

pub mod airfields;
pub mod fuels;

use tracing::debug;

use crate::aircraft::FleetCatalog;
use crate::error::Result;
use crate::paths::ReferencePaths;
use crate::performance::HandbookLibrary;

pub use airfields::{Airfield, AirfieldDirectory, GeoPoint};
pub use fuels::{FuelGrade, FuelTable};

/// Every reference file of a data directory, loaded.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub paths: ReferencePaths,
    pub fuels: FuelTable,
    pub fleet: FleetCatalog,
    /// Empty when the directory has no airfield file.
    pub airfields: AirfieldDirectory,
    pub handbooks: HandbookLibrary,
}

impl ReferenceData {
    /// Load the fuel table, the fleet catalog and the airfield directory.
    ///
    /// Handbook tables are only read when a prediction needs them.
    pub fn load(paths: &ReferencePaths) -> Result<Self> {
        let fuels = FuelTable::from_path(&paths.fuels)?;
        let fleet = FleetCatalog::from_path(&paths.fleet, &fuels)?;
        let airfields = if paths.airfields.is_file() {
            AirfieldDirectory::from_path(&paths.airfields)?
        } else {
            debug!(path = %paths.airfields.display(), "no airfield directory");
            AirfieldDirectory::default()
        };
        Ok(Self {
            paths: paths.clone(),
            fuels,
            fleet,
            airfields,
            handbooks: HandbookLibrary::new(&paths.performance),
        })
    }

    /// Resolve the data directory (see [`ReferencePaths::resolve`]) and load it.
    pub fn resolve_and_load(dir: Option<&std::path::Path>) -> Result<Self> {
        Self::load(&ReferencePaths::resolve(dir)?)
    }
}
