//! Fuel unit conversions.
//!
//! A tank quantity can be expressed three ways: a volume in litres, a mass in
//! kilograms, or a gauge reading in quarters of the tank. The helpers below
//! convert between them for a tank of known capacity holding fuel of known
//! density. They never clamp: an impossible input is an error here, and the
//! business decision to clamp belongs to [`crate::loading::LoadState`].

use crate::error::{Error, Result};

/// Gauge reading of a full tank.
pub const GAUGE_FULL: f64 = 4.0;

/// Smallest gauge increment accepted by [`gauge_to_volume`].
pub const GAUGE_STEP: f64 = 0.5;

const GAUGE_TOLERANCE: f64 = 1e-9;

fn require_finite(label: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidFuelQuantity {
            message: format!("{label} must be finite, got {value}"),
        })
    }
}

fn require_non_negative(label: &str, value: f64) -> Result<()> {
    require_finite(label, value)?;
    if value < 0.0 {
        return Err(Error::InvalidFuelQuantity {
            message: format!("{label} must not be negative, got {value}"),
        });
    }
    Ok(())
}

fn require_positive(label: &str, value: f64) -> Result<()> {
    require_finite(label, value)?;
    if value <= 0.0 {
        return Err(Error::InvalidFuelQuantity {
            message: format!("{label} must be positive, got {value}"),
        });
    }
    Ok(())
}

/// Convert a volume in litres to a mass in kilograms.
///
/// # Errors
/// Returns [`Error::InvalidFuelQuantity`] for a negative or non-finite volume
/// or a non-positive density.
///
/// # Examples
/// ```
/// use prepavol_lib::fuel::volume_to_mass;
///
/// let mass = volume_to_mass(110.0, 0.72).unwrap();
/// assert!((mass - 79.2).abs() < 1e-9);
/// ```
pub fn volume_to_mass(volume: f64, density: f64) -> Result<f64> {
    require_non_negative("volume", volume)?;
    require_positive("density", density)?;
    Ok(volume * density)
}

/// Convert a mass in kilograms to a volume in litres.
///
/// The mass must be strictly positive; an empty tank is expressed as a zero
/// volume instead.
///
/// # Errors
/// Returns [`Error::InvalidFuelQuantity`] for a zero, negative or non-finite
/// mass or a non-positive density.
pub fn mass_to_volume(mass: f64, density: f64) -> Result<f64> {
    require_positive("mass", mass)?;
    require_positive("density", density)?;
    Ok(mass / density)
}

/// Convert a volume to a gauge reading (quarters of the tank).
///
/// A tank with zero capacity always reads 0.
///
/// # Errors
/// Returns [`Error::InvalidFuelQuantity`] for a negative or non-finite volume
/// or capacity.
pub fn volume_to_gauge(volume: f64, capacity: f64) -> Result<f64> {
    require_non_negative("volume", volume)?;
    require_non_negative("capacity", capacity)?;
    if capacity == 0.0 {
        return Ok(0.0);
    }
    Ok(volume / capacity * GAUGE_FULL)
}

/// Convert a gauge reading to a volume.
///
/// Only readings from the discrete set `{0, 0.5, 1, ..., 4}` are accepted.
///
/// # Errors
/// Returns [`Error::InvalidFuelQuantity`] for readings outside that set or a
/// negative capacity.
///
/// # Examples
/// ```
/// use prepavol_lib::fuel::gauge_to_volume;
///
/// assert_eq!(gauge_to_volume(2.0, 110.0).unwrap(), 55.0);
/// assert!(gauge_to_volume(1.25, 110.0).is_err());
/// ```
pub fn gauge_to_volume(gauge: f64, capacity: f64) -> Result<f64> {
    validate_gauge(gauge)?;
    require_non_negative("capacity", capacity)?;
    Ok(gauge * capacity / GAUGE_FULL)
}

/// Convert a mass to a gauge reading via the volume.
pub fn mass_to_gauge(mass: f64, density: f64, capacity: f64) -> Result<f64> {
    let volume = mass_to_volume(mass, density)?;
    volume_to_gauge(volume, capacity)
}

/// Convert a gauge reading to a mass via the volume.
pub fn gauge_to_mass(gauge: f64, density: f64, capacity: f64) -> Result<f64> {
    let volume = gauge_to_volume(gauge, capacity)?;
    volume_to_mass(volume, density)
}

/// Check that a gauge reading is one of the marks on the gauge.
pub fn validate_gauge(gauge: f64) -> Result<()> {
    require_finite("gauge", gauge)?;
    let steps = gauge / GAUGE_STEP;
    let on_mark = (steps - steps.round()).abs() < GAUGE_TOLERANCE;
    if !(0.0..=GAUGE_FULL).contains(&gauge) || !on_mark {
        return Err(Error::InvalidFuelQuantity {
            message: format!(
                "gauge must be a multiple of {GAUGE_STEP} between 0 and {GAUGE_FULL}, got {gauge}"
            ),
        });
    }
    Ok(())
}
