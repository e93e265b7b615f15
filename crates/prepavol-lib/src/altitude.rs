//! Pressure and density altitude.
//!
//! These are the rule-of-thumb formulas found in light-aircraft handbooks,
//! not the ISA atmosphere model: 27 ft per hPa, and a linear density-altitude
//! correction in °C.

use serde::{Deserialize, Serialize};

use crate::reference::Airfield;

/// Standard sea-level pressure in hPa.
pub const QNH_STANDARD_HPA: f64 = 1013.0;

/// Altitude change per hPa of pressure difference.
pub const FEET_PER_HPA: f64 = 27.0;

/// Offset between °C and K used by the handbook tables.
pub const KELVIN_OFFSET: f64 = 273.0;

/// Pressure altitude (Zp) in feet.
///
/// # Examples
/// ```
/// use prepavol_lib::altitude::pressure_altitude;
///
/// assert_eq!(pressure_altitude(1200.0, 1010.0), 1281.0);
/// ```
pub fn pressure_altitude(elevation_ft: f64, qnh_hpa: f64) -> f64 {
    elevation_ft - FEET_PER_HPA * (qnh_hpa - QNH_STANDARD_HPA)
}

/// Density altitude (Zd) in feet.
pub fn density_altitude(elevation_ft: f64, temperature_c: f64, qnh_hpa: f64) -> f64 {
    1.2376 * pressure_altitude(elevation_ft, qnh_hpa) + 118.8 * temperature_c - 1782.0
}

/// Temperature in Kelvin with the integer offset used by the handbook tables.
pub fn celsius_to_kelvin(temperature_c: f64) -> f64 {
    temperature_c + KELVIN_OFFSET
}

/// Conditions on the field at the time of the operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldConditions {
    pub elevation_ft: f64,
    pub temperature_c: f64,
    pub qnh_hpa: f64,
}

impl FieldConditions {
    pub fn new(elevation_ft: f64, temperature_c: f64, qnh_hpa: f64) -> Self {
        Self {
            elevation_ft,
            temperature_c,
            qnh_hpa,
        }
    }

    /// Conditions at an airfield's published elevation.
    pub fn at_airfield(airfield: &Airfield, temperature_c: f64, qnh_hpa: f64) -> Self {
        Self::new(airfield.elevation_ft, temperature_c, qnh_hpa)
    }

    pub fn pressure_altitude(&self) -> f64 {
        pressure_altitude(self.elevation_ft, self.qnh_hpa)
    }

    pub fn density_altitude(&self) -> f64 {
        density_altitude(self.elevation_ft, self.temperature_c, self.qnh_hpa)
    }

    pub fn temperature_k(&self) -> f64 {
        celsius_to_kelvin(self.temperature_c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_pressure_leaves_elevation_unchanged() {
        assert_eq!(pressure_altitude(2606.0, 1013.0), 2606.0);
        assert_eq!(pressure_altitude(0.0, 1023.0), -270.0);
    }

    #[test]
    fn density_altitude_grows_with_temperature() {
        let conditions = FieldConditions::new(1200.0, 25.0, 1010.0);
        let expected = 1.2376 * 1281.0 + 118.8 * 25.0 - 1782.0;
        assert!((conditions.density_altitude() - expected).abs() < 1e-9);

        let colder = FieldConditions::new(1200.0, 5.0, 1010.0);
        assert!(colder.density_altitude() < conditions.density_altitude());
    }

    #[test]
    fn kelvin_uses_integer_offset() {
        assert_eq!(celsius_to_kelvin(15.0), 288.0);
        assert_eq!(FieldConditions::new(0.0, -30.0, 1013.0).temperature_k(), 243.0);
    }
}
