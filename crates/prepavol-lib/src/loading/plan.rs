//! Serializable description of a loading.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Quantity requested for one tank, in any of its representations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelQuantity {
    /// Litres.
    Volume(f64),
    /// Kilograms.
    Mass(f64),
    /// Quarters of the tank, in steps of 0.5.
    Gauge(f64),
}

impl fmt::Display for FuelQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuelQuantity::Volume(litres) => write!(f, "{litres} L"),
            FuelQuantity::Mass(kg) => write!(f, "{kg} kg"),
            FuelQuantity::Gauge(gauge) => write!(f, "{gauge}/4"),
        }
    }
}

/// Masses per seat and baggage zone plus a quantity per tank, by station name.
///
/// ```
/// use prepavol_lib::loading::{FuelQuantity, LoadingPlan};
///
/// let plan: LoadingPlan = serde_json::from_str(
///     r#"{ "seats": { "pax0": 80, "pax1": 80 }, "fuel": { "main": { "gauge": 4 } } }"#,
/// ).unwrap();
/// assert_eq!(plan.fuel["main"], FuelQuantity::Gauge(4.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadingPlan {
    #[serde(default)]
    pub seats: BTreeMap<String, f64>,
    #[serde(default)]
    pub baggage: BTreeMap<String, f64>,
    #[serde(default)]
    pub fuel: BTreeMap<String, FuelQuantity>,
}

impl LoadingPlan {
    pub fn seat(mut self, name: &str, kg: f64) -> Self {
        self.seats.insert(name.to_string(), kg);
        self
    }

    pub fn baggage(mut self, zone: &str, kg: f64) -> Self {
        self.baggage.insert(zone.to_string(), kg);
        self
    }

    pub fn fuel(mut self, tank: &str, quantity: FuelQuantity) -> Self {
        self.fuel.insert(tank.to_string(), quantity);
        self
    }
}
