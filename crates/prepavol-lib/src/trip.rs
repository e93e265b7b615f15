//! Fuel-on-board planning.
//!
//! Checks that the fuel loaded in a [`LoadState`] covers a planned flight:
//! every leg, taxi and arrival allowances, the diversion to an alternate, a
//! pilot margin and the final reserve of the flight category.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::loading::LoadState;

/// Cruise speed assumed when a plan does not set one, in knots.
pub const DEFAULT_CRUISE_KT: f64 = 100.0;
/// Taxi allowance per leg, in minutes.
pub const TAXI_MINUTES_PER_LEG: f64 = 5.0;
/// Arrival allowance per leg, in minutes.
pub const ARRIVAL_MINUTES_PER_LEG: f64 = 10.0;

/// Kind of flight, which sets the final reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightCategory {
    CircuitPattern,
    LocalInSight,
    LocalOutOfSight,
    Navigation,
    Night,
}

impl FlightCategory {
    pub const ALL: [FlightCategory; 5] = [
        FlightCategory::CircuitPattern,
        FlightCategory::LocalInSight,
        FlightCategory::LocalOutOfSight,
        FlightCategory::Navigation,
        FlightCategory::Night,
    ];

    /// Final reserve in minutes.
    pub fn reserve_minutes(self) -> f64 {
        match self {
            FlightCategory::CircuitPattern | FlightCategory::LocalInSight => 10.0,
            FlightCategory::LocalOutOfSight | FlightCategory::Navigation => 30.0,
            FlightCategory::Night => 45.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FlightCategory::CircuitPattern => "circuit_pattern",
            FlightCategory::LocalInSight => "local_in_sight",
            FlightCategory::LocalOutOfSight => "local_out_of_sight",
            FlightCategory::Navigation => "navigation",
            FlightCategory::Night => "night",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FlightCategory::CircuitPattern => "circuit pattern",
            FlightCategory::LocalInSight => "local day flight in sight of the airfield",
            FlightCategory::LocalOutOfSight => "local day flight out of sight of the airfield",
            FlightCategory::Navigation => "day navigation",
            FlightCategory::Night => "night flight",
        }
    }
}

impl fmt::Display for FlightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlightCategory {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "circuit_pattern" | "circuit" => Ok(FlightCategory::CircuitPattern),
            "local_in_sight" => Ok(FlightCategory::LocalInSight),
            "local_out_of_sight" => Ok(FlightCategory::LocalOutOfSight),
            "navigation" | "nav" => Ok(FlightCategory::Navigation),
            "night" => Ok(FlightCategory::Night),
            _ => Err(Error::UnknownFlightCategory {
                name: s.to_string(),
            }),
        }
    }
}

/// One leg of the flight, or the diversion to the alternate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripLeg {
    /// Wind component in knots. Positive values slow the aircraft down.
    pub wind_kt: f64,
    pub distance_nm: f64,
}

impl TripLeg {
    pub fn new(wind_kt: f64, distance_nm: f64) -> Self {
        Self {
            wind_kt,
            distance_nm,
        }
    }
}

impl FromStr for TripLeg {
    type Err = Error;

    /// Parse `WIND:DISTANCE`, e.g. `15:42`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || Error::InvalidTripPlan {
            message: format!("leg '{s}' is not WIND:DISTANCE"),
        };
        let (wind, distance) = s.split_once(':').ok_or_else(invalid)?;
        let wind_kt = wind.trim().parse::<f64>().map_err(|_| invalid())?;
        let distance_nm = distance.trim().parse::<f64>().map_err(|_| invalid())?;
        Ok(Self::new(wind_kt, distance_nm))
    }
}

/// Planned flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    pub category: FlightCategory,
    pub legs: Vec<TripLeg>,
    pub alternate: TripLeg,
    /// Pilot margin in minutes.
    #[serde(default)]
    pub margin_min: f64,
    #[serde(default = "default_cruise_kt")]
    pub cruise_kt: f64,
}

fn default_cruise_kt() -> f64 {
    DEFAULT_CRUISE_KT
}

impl TripPlan {
    pub fn new(category: FlightCategory, legs: Vec<TripLeg>, alternate: TripLeg) -> Self {
        Self {
            category,
            legs,
            alternate,
            margin_min: 0.0,
            cruise_kt: DEFAULT_CRUISE_KT,
        }
    }

    pub fn with_margin(mut self, minutes: f64) -> Self {
        self.margin_min = minutes;
        self
    }

    pub fn with_cruise_speed(mut self, knots: f64) -> Self {
        self.cruise_kt = knots;
        self
    }

    /// Reject plans whose times cannot be computed.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidTripPlan { message });

        if !self.cruise_kt.is_finite() || self.cruise_kt <= 0.0 {
            return invalid(format!(
                "cruise speed must be positive, got {}",
                self.cruise_kt
            ));
        }
        if !self.margin_min.is_finite() || self.margin_min < 0.0 {
            return invalid(format!(
                "margin must be non-negative, got {}",
                self.margin_min
            ));
        }
        if self.legs.is_empty() {
            return invalid("at least one leg is required".to_string());
        }
        for (index, leg) in self.legs.iter().enumerate() {
            self.check_leg(&format!("leg {}", index + 1), leg, leg.wind_kt.abs())?;
        }
        self.check_leg("alternate", &self.alternate, self.alternate.wind_kt)
    }

    fn check_leg(&self, label: &str, leg: &TripLeg, slowdown_kt: f64) -> Result<()> {
        if !leg.wind_kt.is_finite() || !leg.distance_nm.is_finite() || leg.distance_nm < 0.0 {
            return Err(Error::InvalidTripPlan {
                message: format!(
                    "{label}: distance must be non-negative, got {} nm",
                    leg.distance_nm
                ),
            });
        }
        if self.cruise_kt - slowdown_kt <= 0.0 {
            return Err(Error::InvalidTripPlan {
                message: format!(
                    "{label}: wind {} kt leaves no ground speed at {} kt",
                    leg.wind_kt, self.cruise_kt
                ),
            });
        }
        Ok(())
    }

    /// Leg time in minutes. Wind always counts against the aircraft.
    pub fn leg_minutes(&self, leg: &TripLeg) -> f64 {
        60.0 / (self.cruise_kt - leg.wind_kt.abs()) * leg.distance_nm
    }

    /// Diversion time in minutes. A negative wind is a tailwind here.
    pub fn alternate_minutes(&self) -> f64 {
        60.0 / (self.cruise_kt - self.alternate.wind_kt) * self.alternate.distance_nm
    }
}

/// Time and fuel of one item of the fuel budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuelItem {
    pub minutes: f64,
    pub litres: f64,
}

/// Fuel-on-board verdict for a planned flight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripReport {
    pub callsign: String,
    pub planetype: String,
    pub category: FlightCategory,
    pub legs: Vec<FuelItem>,
    pub taxi: FuelItem,
    pub arrival: FuelItem,
    pub alternate: FuelItem,
    pub margin: FuelItem,
    pub reserve: FuelItem,
    pub unusable_litres: f64,
    /// Minutes of the whole budget, reserve included.
    pub total_time_min: f64,
    pub required_litres: f64,
    pub carried_litres: f64,
    /// Minutes the usable fuel on board lasts.
    pub endurance_min: f64,
    /// Endurance minus the final reserve.
    pub max_flight_time_min: f64,
    pub shortfall_litres: f64,
    pub authorized: bool,
}

/// Check the fuel of `state` against `plan`.
///
/// # Errors
/// Returns [`Error::InvalidTripPlan`] when the plan fails [`TripPlan::validate`].
pub fn plan_trip(state: &LoadState<'_>, plan: &TripPlan) -> Result<TripReport> {
    plan.validate()?;

    let profile = state.profile();
    let per_minute = profile.fuel_burn_rate / 60.0;
    let item = |minutes: f64| FuelItem {
        minutes,
        litres: per_minute * minutes,
    };

    let leg_count = plan.legs.len() as f64;
    let legs: Vec<FuelItem> = plan.legs.iter().map(|leg| item(plan.leg_minutes(leg))).collect();
    let taxi = item(TAXI_MINUTES_PER_LEG * leg_count);
    let arrival = item(ARRIVAL_MINUTES_PER_LEG * leg_count);
    let alternate = item(plan.alternate_minutes());
    let margin = item(plan.margin_min);
    let reserve = item(plan.category.reserve_minutes());

    let total_time_min = legs.iter().map(|l| l.minutes).sum::<f64>()
        + taxi.minutes
        + arrival.minutes
        + alternate.minutes
        + margin.minutes
        + reserve.minutes;
    let unusable_litres = state.unusable_fuel();
    let required_litres = per_minute * total_time_min + unusable_litres;

    let carried_litres = state.total_fuel_volume();
    let endurance_min = ((carried_litres - unusable_litres) / profile.fuel_burn_rate * 60.0).max(0.0);
    let max_flight_time_min = (endurance_min - reserve.minutes).max(0.0);
    let shortfall_litres = (required_litres - carried_litres).max(0.0);
    let authorized = carried_litres >= required_litres;

    debug!(
        callsign = %profile.callsign,
        category = %plan.category,
        required_litres,
        carried_litres,
        authorized,
        "planned trip fuel"
    );

    Ok(TripReport {
        callsign: profile.callsign.clone(),
        planetype: profile.planetype.clone(),
        category: plan.category,
        legs,
        taxi,
        arrival,
        alternate,
        margin,
        reserve,
        unusable_litres,
        total_time_min,
        required_litres,
        carried_litres,
        endurance_min,
        max_flight_time_min,
        shortfall_litres,
        authorized,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::dr400_120;

    fn navigation() -> TripPlan {
        TripPlan::new(
            FlightCategory::Navigation,
            vec![TripLeg::new(20.0, 40.0), TripLeg::new(-20.0, 40.0)],
            TripLeg::new(0.0, 25.0),
        )
        .with_margin(15.0)
    }

    #[test]
    fn reserves_follow_the_category() {
        let minutes: Vec<f64> = FlightCategory::ALL
            .iter()
            .map(|c| c.reserve_minutes())
            .collect();
        assert_eq!(minutes, vec![10.0, 10.0, 30.0, 30.0, 45.0]);
    }

    #[test]
    fn parses_categories_and_legs() {
        assert_eq!(
            "nav".parse::<FlightCategory>().unwrap(),
            FlightCategory::Navigation
        );
        assert_eq!(
            "local-out-of-sight".parse::<FlightCategory>().unwrap(),
            FlightCategory::LocalOutOfSight
        );
        assert!(matches!(
            "aerobatics".parse::<FlightCategory>(),
            Err(Error::UnknownFlightCategory { .. })
        ));
        assert_eq!("-10:35".parse::<TripLeg>().unwrap(), TripLeg::new(-10.0, 35.0));
        assert!("10".parse::<TripLeg>().is_err());
    }

    #[test]
    fn wind_always_slows_legs_but_not_the_alternate() {
        let mut plan = navigation();
        assert!((plan.leg_minutes(&plan.legs[0]) - 30.0).abs() < 1e-9);
        assert!((plan.leg_minutes(&plan.legs[1]) - 30.0).abs() < 1e-9);
        plan.alternate = TripLeg::new(-25.0, 25.0);
        assert!((plan.alternate_minutes() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn full_tanks_cover_a_short_navigation() {
        let profile = dr400_120();
        let mut state = LoadState::new(&profile);
        state.set_fuel_gauge("main", 4.0).unwrap();

        let report = plan_trip(&state, &navigation()).unwrap();
        // 60 legs + 10 taxi + 20 arrival + 15 alternate + 15 margin + 30 reserve.
        assert!((report.total_time_min - 150.0).abs() < 1e-9);
        let expected = profile.fuel_burn_rate / 60.0 * 150.0 + profile.unusable_fuel();
        assert!((report.required_litres - expected).abs() < 1e-9);
        assert_eq!(report.authorized, report.carried_litres >= expected);
        assert!(report.max_flight_time_min <= report.endurance_min);
    }

    #[test]
    fn empty_tanks_report_the_shortfall() {
        let profile = dr400_120();
        let state = LoadState::new(&profile);
        let report = plan_trip(&state, &navigation()).unwrap();
        assert!(!report.authorized);
        assert_eq!(report.endurance_min, 0.0);
        assert_eq!(report.max_flight_time_min, 0.0);
        assert!((report.shortfall_litres - report.required_litres).abs() < 1e-9);
    }

    #[test]
    fn rejects_impossible_plans() {
        let profile = dr400_120();
        let state = LoadState::new(&profile);

        let headwind = TripPlan::new(
            FlightCategory::CircuitPattern,
            vec![TripLeg::new(-100.0, 10.0)],
            TripLeg::new(0.0, 0.0),
        );
        let negative = navigation().with_margin(-5.0);
        let no_legs = TripPlan::new(FlightCategory::Night, Vec::new(), TripLeg::new(0.0, 0.0));
        for plan in [headwind, negative, no_legs] {
            assert!(matches!(
                plan_trip(&state, &plan),
                Err(Error::InvalidTripPlan { .. })
            ));
        }
    }
}
