//! Fleet catalog loading and lookup.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{closest_matches, Error, Result};
use crate::reference::FuelTable;

use super::profile::{AircraftProfile, FleetRecord};

/// Aircraft profiles keyed by callsign, loaded from `fleet.json`.
#[derive(Debug, Clone, Default)]
pub struct FleetCatalog {
    aircraft: HashMap<String, AircraftProfile>,
    source: Option<PathBuf>,
}

impl FleetCatalog {
    /// Load a fleet catalog from a file path, resolving fuel densities from `fuels`.
    pub fn from_path(path: &Path, fuels: &FuelTable) -> Result<Self> {
        let file = fs::File::open(path)?;
        let mut catalog = Self::from_reader(file, fuels)?;
        catalog.source = Some(path.to_path_buf());
        info!(
            path = %path.display(),
            aircraft = catalog.len(),
            "loaded fleet catalog"
        );
        Ok(catalog)
    }

    /// Load a fleet catalog from a reader holding a JSON object keyed by callsign.
    pub fn from_reader<R: Read>(reader: R, fuels: &FuelTable) -> Result<Self> {
        let records: BTreeMap<String, FleetRecord> = serde_json::from_reader(reader)?;
        Self::from_records(records, fuels)
    }

    /// Build a catalog from already-parsed records.
    ///
    /// # Errors
    /// Fails on the first record whose fuel grade is unknown or whose figures
    /// do not validate, and with [`Error::DuplicateCallsign`] when two
    /// callsigns normalize to the same key (e.g. `F-HAAC` and `FHAAC`).
    pub fn from_records<I>(records: I, fuels: &FuelTable) -> Result<Self>
    where
        I: IntoIterator<Item = (String, FleetRecord)>,
    {
        let mut aircraft = HashMap::new();
        for (callsign, record) in records {
            let density = fuels.require(&record.fuel)?.density;
            let profile = AircraftProfile::from_record(&callsign, record, density)?;
            debug!(
                callsign = %profile.callsign,
                planetype = %profile.planetype,
                "validated aircraft profile"
            );

            let key = normalize_callsign(&profile.callsign);
            if aircraft.contains_key(&key) {
                return Err(Error::DuplicateCallsign {
                    callsign: profile.callsign,
                });
            }
            aircraft.insert(key, profile);
        }

        Ok(Self {
            aircraft,
            source: None,
        })
    }

    /// Get an aircraft by callsign, ignoring case, dashes and spaces.
    pub fn get(&self, callsign: &str) -> Option<&AircraftProfile> {
        self.aircraft.get(&normalize_callsign(callsign))
    }

    /// Get an aircraft by callsign, suggesting close callsigns when it is unknown.
    pub fn require(&self, callsign: &str) -> Result<&AircraftProfile> {
        self.get(callsign).ok_or_else(|| Error::UnknownCallsign {
            callsign: callsign.to_string(),
            suggestions: closest_matches(
                callsign,
                self.aircraft.values().map(|p| p.callsign.as_str()),
                3,
            ),
        })
    }

    /// Get a sorted list of all callsigns.
    pub fn callsigns(&self) -> Vec<String> {
        let mut callsigns: Vec<String> =
            self.aircraft.values().map(|p| p.callsign.clone()).collect();
        callsigns.sort();
        callsigns
    }

    /// Get all profiles sorted by callsign.
    pub fn profiles_sorted(&self) -> Vec<&AircraftProfile> {
        let mut profiles: Vec<&AircraftProfile> = self.aircraft.values().collect();
        profiles.sort_by(|a, b| a.callsign.cmp(&b.callsign));
        profiles
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }

    /// Get the source path if the catalog was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Normalize a callsign for lookup: `F-HAAC`, `f haac` and `fhaac` are the same aircraft.
fn normalize_callsign(callsign: &str) -> String {
    callsign
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
