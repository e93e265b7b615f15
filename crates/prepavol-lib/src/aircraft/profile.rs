//! Per-aircraft characteristics and the on-disk fleet record schema.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::constants::{STANDARD_BAGGAGE_ZONES, STANDARD_TANKS};
use super::envelope::{Envelope, EnvelopePoint};

/// Seat definition as stored in the fleet catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub name: String,
    /// Moment arm in metres from the reference datum.
    pub arm: f64,
}

/// Baggage zone definition as stored in the fleet catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaggageZone {
    pub name: String,
    pub arm: f64,
    /// Structural limit of the zone in kilograms.
    pub max: f64,
}

/// Fuel tank definition as stored in the fleet catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tank {
    pub name: String,
    pub arm: f64,
    /// Rated capacity in litres. Zero means the aircraft has no such tank.
    pub capacity: f64,
    /// Unusable fuel in litres.
    #[serde(default)]
    pub unusable: f64,
}

/// One aircraft entry of `fleet.json`, keyed by callsign in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetRecord {
    pub planetype: String,
    /// Fuel grade name, resolved against the fuel table.
    pub fuel: String,
    pub empty_weight: f64,
    pub empty_arm: f64,
    pub mtow: f64,
    /// Cruise consumption in litres per hour.
    pub fuel_burn_rate: f64,
    #[serde(default)]
    pub seats: Vec<Seat>,
    #[serde(default)]
    pub baggage: Vec<BaggageZone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combined_baggage_max: Option<f64>,
    #[serde(default)]
    pub tanks: Vec<Tank>,
    pub envelope: Vec<EnvelopePoint>,
}

/// Validated, immutable description of one aircraft.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AircraftProfile {
    pub callsign: String,
    pub planetype: String,
    pub fuel_name: String,
    /// Fuel density in kg per litre.
    pub fuel_density: f64,
    pub empty_weight: f64,
    pub empty_arm: f64,
    pub mtow: f64,
    pub fuel_burn_rate: f64,
    pub seats: Vec<Seat>,
    pub baggage_zones: Vec<BaggageZone>,
    pub combined_baggage_max: Option<f64>,
    pub tanks: Vec<Tank>,
    pub envelope: Envelope,
}

impl AircraftProfile {
    /// Validate a catalog record and build the station lists.
    ///
    /// Standard baggage zones and tanks missing from the record are appended
    /// with a zero limit or capacity so that every profile can be addressed
    /// with the same station names.
    ///
    /// # Errors
    /// Returns [`Error::FleetDataValidation`] for non-finite, negative or
    /// inconsistent figures and duplicate station names, and
    /// [`Error::InvalidEnvelope`] when the envelope is not a simple polygon.
    pub fn from_record(callsign: &str, record: FleetRecord, fuel_density: f64) -> Result<Self> {
        let callsign = callsign.trim().to_string();
        let invalid = |message: String| Error::FleetDataValidation {
            callsign: callsign.clone(),
            message,
        };

        if callsign.is_empty() {
            return Err(invalid("callsign must not be empty".to_string()));
        }
        if record.planetype.trim().is_empty() {
            return Err(invalid("planetype must not be empty".to_string()));
        }

        for (value, field) in [
            (record.empty_weight, "empty_weight"),
            (record.mtow, "mtow"),
            (record.fuel_burn_rate, "fuel_burn_rate"),
            (fuel_density, "fuel density"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{field} must be a finite positive number")));
            }
        }

        let mut non_negative = vec![(record.empty_arm, "empty_arm".to_string())];
        non_negative.extend(
            record
                .seats
                .iter()
                .map(|s| (s.arm, format!("arm of seat {}", s.name))),
        );
        for zone in &record.baggage {
            non_negative.push((zone.arm, format!("arm of baggage zone {}", zone.name)));
            non_negative.push((zone.max, format!("max of baggage zone {}", zone.name)));
        }
        for tank in &record.tanks {
            non_negative.push((tank.arm, format!("arm of tank {}", tank.name)));
            non_negative.push((tank.capacity, format!("capacity of tank {}", tank.name)));
            non_negative.push((tank.unusable, format!("unusable fuel of tank {}", tank.name)));
        }
        if let Some(limit) = record.combined_baggage_max {
            non_negative.push((limit, "combined_baggage_max".to_string()));
        }
        for (value, field) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{field} must be finite and non-negative")));
            }
        }

        if let Some(tank) = record.tanks.iter().find(|t| t.unusable > t.capacity) {
            return Err(invalid(format!(
                "unusable fuel of tank {} exceeds its capacity",
                tank.name
            )));
        }

        let mut seen = HashSet::new();
        let names = record
            .seats
            .iter()
            .map(|s| &s.name)
            .chain(record.baggage.iter().map(|z| &z.name))
            .chain(record.tanks.iter().map(|t| &t.name));
        for name in names {
            if name.trim().is_empty() {
                return Err(invalid("station names must not be empty".to_string()));
            }
            if !seen.insert(name.trim().to_lowercase()) {
                return Err(invalid(format!("station {name} is defined twice")));
            }
        }

        let envelope = Envelope::new(record.envelope).map_err(|err| match err {
            Error::InvalidEnvelope { message } => Error::InvalidEnvelope {
                message: format!("{callsign}: {message}"),
            },
            other => other,
        })?;

        let mut baggage_zones = record.baggage;
        for zone in STANDARD_BAGGAGE_ZONES {
            if !baggage_zones.iter().any(|z| z.name.eq_ignore_ascii_case(zone)) {
                baggage_zones.push(BaggageZone {
                    name: zone.to_string(),
                    arm: 0.0,
                    max: 0.0,
                });
            }
        }

        let mut tanks = record.tanks;
        for tank in STANDARD_TANKS {
            if !tanks.iter().any(|t| t.name.eq_ignore_ascii_case(tank)) {
                tanks.push(Tank {
                    name: tank.to_string(),
                    arm: 0.0,
                    capacity: 0.0,
                    unusable: 0.0,
                });
            }
        }

        Ok(Self {
            callsign,
            planetype: record.planetype.trim().to_string(),
            fuel_name: record.fuel.trim().to_string(),
            fuel_density,
            empty_weight: record.empty_weight,
            empty_arm: record.empty_arm,
            mtow: record.mtow,
            fuel_burn_rate: record.fuel_burn_rate,
            seats: record.seats,
            baggage_zones,
            combined_baggage_max: record.combined_baggage_max,
            tanks,
            envelope,
        })
    }

    /// Index of a seat, matched case-insensitively.
    pub fn seat_index(&self, name: &str) -> Option<usize> {
        position(self.seats.iter().map(|s| s.name.as_str()), name)
    }

    /// Index of a baggage zone, matched case-insensitively.
    pub fn baggage_index(&self, name: &str) -> Option<usize> {
        position(self.baggage_zones.iter().map(|z| z.name.as_str()), name)
    }

    /// Index of a tank, matched case-insensitively.
    pub fn tank_index(&self, name: &str) -> Option<usize> {
        position(self.tanks.iter().map(|t| t.name.as_str()), name)
    }

    /// Look up a tank by name.
    pub fn tank(&self, name: &str) -> Option<&Tank> {
        self.tank_index(name).map(|i| &self.tanks[i])
    }

    /// Combined baggage limit when one is configured.
    ///
    /// An absent or zero limit means the zones are only constrained
    /// individually.
    pub fn combined_baggage_limit(&self) -> Option<f64> {
        self.combined_baggage_max.filter(|limit| *limit > 0.0)
    }

    /// Total unusable fuel across all tanks, in litres.
    pub fn unusable_fuel(&self) -> f64 {
        self.tanks.iter().map(|t| t.unusable).sum()
    }

    /// Total rated fuel capacity, in litres.
    pub fn fuel_capacity(&self) -> f64 {
        self.tanks.iter().map(|t| t.capacity).sum()
    }

    /// Every station name, used to suggest corrections for typos.
    pub fn station_names(&self) -> impl Iterator<Item = &str> {
        self.seats
            .iter()
            .map(|s| s.name.as_str())
            .chain(self.baggage_zones.iter().map(|z| z.name.as_str()))
            .chain(self.tanks.iter().map(|t| t.name.as_str()))
    }
}

fn position<'a>(mut names: impl Iterator<Item = &'a str>, wanted: &str) -> Option<usize> {
    let wanted = wanted.trim();
    names.position(|name| name.eq_ignore_ascii_case(wanted))
}
