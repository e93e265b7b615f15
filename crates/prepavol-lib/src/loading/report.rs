//! Results of a weight-and-balance evaluation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::aircraft::EnvelopePoint;

use super::plan::FuelQuantity;

/// A business-rule violation. Violations never abort a computation; they
/// make the aircraft not ready to fly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// All-up weight above the maximum take-off weight.
    MtowExceeded { all_up_weight: f64, mtow: f64 },
    /// The `(cg, weight)` point lies outside the envelope.
    CgOutOfEnvelope {
        center_of_gravity: f64,
        all_up_weight: f64,
    },
    /// A baggage zone is loaded above its structural limit.
    BaggageOverLimit { zone: String, load: f64, limit: f64 },
    /// All baggage zones together exceed the aircraft's combined limit.
    CombinedBaggageOverLimit {
        total: f64,
        limit: f64,
        planetype: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MtowExceeded { .. } => write!(f, "All-up weight above MTOW"),
            Violation::CgOutOfEnvelope { .. } => write!(f, "Balance out of cg envelope"),
            Violation::BaggageOverLimit { zone, .. } => match zone.as_str() {
                "baggage" => write!(f, "Baggage weight over max weight"),
                "baggage2" => write!(f, "Zone 2 baggage weight over max weight"),
                other => write!(f, "{other} weight over max weight"),
            },
            Violation::CombinedBaggageOverLimit {
                limit, planetype, ..
            } => write!(f, "Baggage + baggage2 over {limit}kg for type {planetype}"),
        }
    }
}

/// Why a fuel request was changed before being applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// The aircraft has no such tank (zero capacity).
    NoTank,
    /// The request exceeded the tank's capacity.
    OverCapacity,
}

/// Record of a fuel request that was clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelAdjustment {
    pub tank: String,
    pub requested: FuelQuantity,
    pub applied_litres: f64,
    pub kind: AdjustmentKind,
    pub message: String,
}

impl fmt::Display for FuelAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Quantity held by one tank, kept consistent in all three representations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TankLevel {
    pub volume_l: f64,
    pub mass_kg: f64,
    /// Quarters of the tank, 0 to 4.
    pub gauge: f64,
}

/// What occupies a row of the loading sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationKind {
    Empty,
    Seat,
    Baggage,
    Tank,
}

/// One row of the loading sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationLoad {
    pub name: String,
    pub kind: StationKind,
    pub mass_kg: f64,
    pub arm: f64,
    pub moment: f64,
}

/// Snapshot produced by [`super::LoadState::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightBalanceReport {
    pub callsign: String,
    pub planetype: String,
    pub mtow: f64,
    pub all_up_weight: f64,
    pub moment: f64,
    pub center_of_gravity: f64,
    pub baggage_total: f64,
    pub fuel_volume_l: f64,
    pub fuel_mass_kg: f64,
    pub endurance_hours: f64,
    pub flight_time_day_hours: f64,
    pub flight_time_night_hours: f64,
    pub stations: Vec<StationLoad>,
    pub reasons: Vec<Violation>,
    pub is_ready_to_fly: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fuel_adjustments: Vec<FuelAdjustment>,
}

impl WeightBalanceReport {
    /// Human-readable reason strings, in report order.
    pub fn reason_messages(&self) -> Vec<String> {
        self.reasons.iter().map(ToString::to_string).collect()
    }
}

/// Data behind the balance chart: the envelope and the loaded and zero-fuel points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceTrace {
    /// Envelope outline, closed (first vertex repeated at the end).
    pub envelope: Vec<EnvelopePoint>,
    pub loaded: EnvelopePoint,
    pub zero_fuel: EnvelopePoint,
    pub loaded_inside: bool,
    pub zero_fuel_inside: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_messages() {
        let zone = |name: &str| Violation::BaggageOverLimit {
            zone: name.to_string(),
            load: 70.0,
            limit: 60.0,
        };
        assert_eq!(zone("baggage").to_string(), "Baggage weight over max weight");
        assert_eq!(
            zone("baggage2").to_string(),
            "Zone 2 baggage weight over max weight"
        );
        assert_eq!(zone("hold").to_string(), "hold weight over max weight");

        let combined = Violation::CombinedBaggageOverLimit {
            total: 30.0,
            limit: 25.0,
            planetype: "S201".to_string(),
        };
        assert_eq!(
            combined.to_string(),
            "Baggage + baggage2 over 25kg for type S201"
        );
    }

    #[test]
    fn violations_serialize_with_a_kind_tag() {
        let value = serde_json::to_value(Violation::MtowExceeded {
            all_up_weight: 1065.2,
            mtow: 900.0,
        })
        .unwrap();
        assert_eq!(value["kind"], "mtow_exceeded");
        assert_eq!(value["mtow"], 900.0);
    }
}
