//! Mutable loading of one aircraft for one flight.

use tracing::{debug, warn};

use crate::aircraft::{AircraftProfile, EnvelopePoint};
use crate::error::{closest_matches, Error, Result};
use crate::fuel::{
    gauge_to_volume, mass_to_volume, validate_gauge, volume_to_gauge, volume_to_mass,
};

use super::plan::{FuelQuantity, LoadingPlan};
use super::report::{
    AdjustmentKind, BalanceTrace, FuelAdjustment, StationKind, StationLoad, TankLevel, Violation,
    WeightBalanceReport,
};

/// Reserve subtracted from the endurance for a day flight, in hours.
pub const DAY_RESERVE_HOURS: f64 = 0.5;
/// Reserve subtracted from the endurance for a night flight, in hours.
pub const NIGHT_RESERVE_HOURS: f64 = 0.75;
/// Endurance is floored to this many minutes.
pub const ENDURANCE_STEP_MINUTES: f64 = 5.0;

/// One loading scenario for one aircraft.
///
/// Stations start empty. Setters only reject structurally invalid input
/// (unknown station, negative mass); limits are checked by
/// [`LoadState::validate`], which derives every figure from the current state.
#[derive(Debug, Clone)]
pub struct LoadState<'a> {
    profile: &'a AircraftProfile,
    seats: Vec<f64>,
    baggage: Vec<f64>,
    tanks: Vec<TankLevel>,
    adjustments: Vec<FuelAdjustment>,
}

impl<'a> LoadState<'a> {
    pub fn new(profile: &'a AircraftProfile) -> Self {
        Self {
            profile,
            seats: vec![0.0; profile.seats.len()],
            baggage: vec![0.0; profile.baggage_zones.len()],
            tanks: vec![TankLevel::default(); profile.tanks.len()],
            adjustments: Vec::new(),
        }
    }

    /// Build a state and apply every entry of `plan`.
    pub fn from_plan(profile: &'a AircraftProfile, plan: &LoadingPlan) -> Result<Self> {
        let mut state = Self::new(profile);
        state.apply(plan)?;
        Ok(state)
    }

    /// Apply every entry of `plan` on top of the current state.
    pub fn apply(&mut self, plan: &LoadingPlan) -> Result<()> {
        for (seat, kg) in &plan.seats {
            self.set_occupant(seat, *kg)?;
        }
        for (zone, kg) in &plan.baggage {
            self.set_baggage(zone, *kg)?;
        }
        for (tank, quantity) in &plan.fuel {
            self.set_fuel(tank, *quantity)?;
        }
        Ok(())
    }

    pub fn profile(&self) -> &'a AircraftProfile {
        self.profile
    }

    /// Set the occupant mass of a named seat.
    pub fn set_occupant(&mut self, seat: &str, kg: f64) -> Result<()> {
        check_mass(seat, kg)?;
        let index = self
            .profile
            .seat_index(seat)
            .ok_or_else(|| self.unknown_station(seat))?;
        self.seats[index] = kg;
        Ok(())
    }

    /// Set the occupant mass of the seat at `index` (`pax0` is index 0).
    pub fn set_pax(&mut self, index: usize, kg: f64) -> Result<()> {
        let name = format!("pax{index}");
        check_mass(&name, kg)?;
        if index >= self.seats.len() {
            return Err(self.unknown_station(&name));
        }
        self.seats[index] = kg;
        Ok(())
    }

    /// Set the load of a baggage zone.
    pub fn set_baggage(&mut self, zone: &str, kg: f64) -> Result<()> {
        check_mass(zone, kg)?;
        let index = self
            .profile
            .baggage_index(zone)
            .ok_or_else(|| self.unknown_station(zone))?;
        self.baggage[index] = kg;
        Ok(())
    }

    /// Set a tank quantity in whichever representation `quantity` uses.
    pub fn set_fuel(
        &mut self,
        tank: &str,
        quantity: FuelQuantity,
    ) -> Result<Option<FuelAdjustment>> {
        match quantity {
            FuelQuantity::Volume(litres) => self.set_fuel_volume(tank, litres),
            FuelQuantity::Mass(kg) => self.set_fuel_mass(tank, kg),
            FuelQuantity::Gauge(gauge) => self.set_fuel_gauge(tank, gauge),
        }
    }

    /// Set a tank quantity in litres.
    ///
    /// Requests above capacity are clamped to the capacity, and any fuel put
    /// in a tank the aircraft does not have is dropped. Both cases return the
    /// adjustment that was made.
    ///
    /// # Errors
    /// Returns [`Error::UnknownStation`] for an unknown tank and
    /// [`Error::InvalidFuelQuantity`] for a negative or non-finite volume.
    pub fn set_fuel_volume(&mut self, tank: &str, litres: f64) -> Result<Option<FuelAdjustment>> {
        let index = self.tank_index(tank)?;
        // Validates the volume.
        volume_to_mass(litres, self.profile.fuel_density)?;
        self.store_fuel(index, FuelQuantity::Volume(litres), litres)
    }

    /// Set a tank quantity in kilograms. Zero empties the tank.
    pub fn set_fuel_mass(&mut self, tank: &str, kg: f64) -> Result<Option<FuelAdjustment>> {
        let index = self.tank_index(tank)?;
        let litres = if kg == 0.0 {
            0.0
        } else {
            mass_to_volume(kg, self.profile.fuel_density)?
        };
        self.store_fuel(index, FuelQuantity::Mass(kg), litres)
    }

    /// Set a tank quantity from a gauge reading in quarters (steps of 0.5).
    ///
    /// # Errors
    /// Returns [`Error::InvalidFuelQuantity`] for a reading that is not a
    /// mark on the gauge.
    pub fn set_fuel_gauge(&mut self, tank: &str, gauge: f64) -> Result<Option<FuelAdjustment>> {
        let index = self.tank_index(tank)?;
        validate_gauge(gauge)?;
        let capacity = self.profile.tanks[index].capacity;
        let litres = if capacity == 0.0 && gauge > 0.0 {
            // Reported as a request for fuel the tank cannot hold.
            f64::INFINITY
        } else {
            gauge_to_volume(gauge, capacity)?
        };
        self.store_fuel(index, FuelQuantity::Gauge(gauge), litres)
    }

    fn store_fuel(
        &mut self,
        index: usize,
        requested: FuelQuantity,
        litres: f64,
    ) -> Result<Option<FuelAdjustment>> {
        let profile = self.profile;
        let tank = &profile.tanks[index];
        let (applied, kind) = if tank.capacity == 0.0 && litres > 0.0 {
            (0.0, Some(AdjustmentKind::NoTank))
        } else if litres > tank.capacity {
            (tank.capacity, Some(AdjustmentKind::OverCapacity))
        } else {
            (litres, None)
        };

        self.tanks[index] = TankLevel {
            volume_l: applied,
            mass_kg: volume_to_mass(applied, profile.fuel_density)?,
            gauge: volume_to_gauge(applied, tank.capacity)?,
        };
        self.adjustments.retain(|a| !a.tank.eq_ignore_ascii_case(&tank.name));

        let Some(kind) = kind else {
            return Ok(None);
        };
        let message = match kind {
            AdjustmentKind::NoTank => format!(
                "{} has no {} fuel tank. Setting volume to 0.",
                profile.callsign, tank.name
            ),
            AdjustmentKind::OverCapacity => format!(
                "{} tank max volume is {} L. Setting volume to {} L.",
                tank.name, tank.capacity, tank.capacity
            ),
        };
        warn!(
            callsign = %profile.callsign,
            tank = %tank.name,
            requested = %requested,
            applied_litres = applied,
            "{message}"
        );
        let adjustment = FuelAdjustment {
            tank: tank.name.clone(),
            requested,
            applied_litres: applied,
            kind,
            message,
        };
        self.adjustments.push(adjustment.clone());
        Ok(Some(adjustment))
    }

    /// Fuel adjustments made by the latest request on each tank.
    pub fn adjustments(&self) -> &[FuelAdjustment] {
        &self.adjustments
    }

    /// Current level of a tank.
    pub fn fuel_level(&self, tank: &str) -> Option<TankLevel> {
        self.profile.tank_index(tank).map(|i| self.tanks[i])
    }

    /// Mass of a seat occupant.
    pub fn occupant(&self, seat: &str) -> Option<f64> {
        self.profile.seat_index(seat).map(|i| self.seats[i])
    }

    /// Load of a baggage zone.
    pub fn baggage(&self, zone: &str) -> Option<f64> {
        self.profile.baggage_index(zone).map(|i| self.baggage[i])
    }

    pub fn baggage_total(&self) -> f64 {
        self.baggage.iter().sum()
    }

    pub fn total_fuel_volume(&self) -> f64 {
        self.tanks.iter().map(|t| t.volume_l).sum()
    }

    pub fn total_fuel_mass(&self) -> f64 {
        self.tanks.iter().map(|t| t.mass_kg).sum()
    }

    /// Unusable fuel of the aircraft, in litres.
    pub fn unusable_fuel(&self) -> f64 {
        self.profile.unusable_fuel()
    }

    /// Fuel on board minus the unusable fuel, never negative.
    pub fn usable_fuel(&self) -> f64 {
        (self.total_fuel_volume() - self.unusable_fuel()).max(0.0)
    }

    /// All-up weight in kilograms.
    pub fn all_up_weight(&self) -> f64 {
        self.profile.empty_weight
            + self.seats.iter().sum::<f64>()
            + self.baggage_total()
            + self.total_fuel_mass()
    }

    /// Sum of mass times arm over every station, in m·kg.
    pub fn moment(&self) -> f64 {
        self.stations().iter().map(|s| s.moment).sum()
    }

    /// Centre of gravity in metres from the datum.
    pub fn center_of_gravity(&self) -> f64 {
        self.moment() / self.all_up_weight()
    }

    /// Endurance in hours on usable fuel, floored to 5 minutes.
    ///
    /// ```
    /// # use prepavol_lib::loading::state::endurance_from;
    /// // 35 usable litres at 24 L/h is 87.5 minutes.
    /// assert_eq!(endurance_from(35.0, 24.0), 85.0 / 60.0);
    /// ```
    pub fn endurance_hours(&self) -> f64 {
        endurance_from(self.usable_fuel(), self.profile.fuel_burn_rate)
    }

    /// Endurance left after the day reserve, never negative.
    pub fn flight_time_day(&self) -> f64 {
        (self.endurance_hours() - DAY_RESERVE_HOURS).max(0.0)
    }

    /// Endurance left after the night reserve, never negative.
    pub fn flight_time_night(&self) -> f64 {
        (self.endurance_hours() - NIGHT_RESERVE_HOURS).max(0.0)
    }

    /// Loading sheet rows: empty aircraft, seats, baggage zones and tanks.
    pub fn stations(&self) -> Vec<StationLoad> {
        let profile = self.profile;
        let row = |name: &str, kind, mass_kg: f64, arm: f64| StationLoad {
            name: name.to_string(),
            kind,
            mass_kg,
            arm,
            moment: mass_kg * arm,
        };

        let mut rows = vec![row(
            "empty",
            StationKind::Empty,
            profile.empty_weight,
            profile.empty_arm,
        )];
        rows.extend(
            profile
                .seats
                .iter()
                .zip(&self.seats)
                .map(|(seat, kg)| row(&seat.name, StationKind::Seat, *kg, seat.arm)),
        );
        rows.extend(
            profile
                .baggage_zones
                .iter()
                .zip(&self.baggage)
                .map(|(zone, kg)| row(&zone.name, StationKind::Baggage, *kg, zone.arm)),
        );
        rows.extend(
            profile
                .tanks
                .iter()
                .zip(&self.tanks)
                .map(|(tank, level)| row(&tank.name, StationKind::Tank, level.mass_kg, tank.arm)),
        );
        rows
    }

    /// Active violations, in report order.
    pub fn reasons(&self) -> Vec<Violation> {
        self.violations(self.all_up_weight(), self.center_of_gravity())
    }

    pub fn is_ready_to_fly(&self) -> bool {
        self.reasons().is_empty()
    }

    /// Evaluate the loading: every derived figure and the active violations.
    ///
    /// The report is a pure function of the current state, so calling this
    /// repeatedly without mutation yields the same result.
    pub fn validate(&self) -> WeightBalanceReport {
        let all_up_weight = self.all_up_weight();
        let moment = self.moment();
        let center_of_gravity = moment / all_up_weight;
        let reasons = self.violations(all_up_weight, center_of_gravity);

        debug!(
            callsign = %self.profile.callsign,
            all_up_weight,
            center_of_gravity,
            violations = reasons.len(),
            "evaluated weight and balance"
        );
        for reason in &reasons {
            warn!(callsign = %self.profile.callsign, "{reason}");
        }

        WeightBalanceReport {
            callsign: self.profile.callsign.clone(),
            planetype: self.profile.planetype.clone(),
            mtow: self.profile.mtow,
            all_up_weight,
            moment,
            center_of_gravity,
            baggage_total: self.baggage_total(),
            fuel_volume_l: self.total_fuel_volume(),
            fuel_mass_kg: self.total_fuel_mass(),
            endurance_hours: self.endurance_hours(),
            flight_time_day_hours: self.flight_time_day(),
            flight_time_night_hours: self.flight_time_night(),
            stations: self.stations(),
            is_ready_to_fly: reasons.is_empty(),
            reasons,
            fuel_adjustments: self.adjustments.clone(),
        }
    }

    /// Envelope outline with the loaded and zero-fuel points.
    pub fn balance_trace(&self) -> BalanceTrace {
        let envelope = &self.profile.envelope;
        let loaded: EnvelopePoint = (self.center_of_gravity(), self.all_up_weight());

        let mut dry = self.clone();
        dry.tanks.fill(TankLevel::default());
        let zero_fuel: EnvelopePoint = (dry.center_of_gravity(), dry.all_up_weight());

        BalanceTrace {
            envelope: envelope.closed_outline(),
            loaded,
            zero_fuel,
            loaded_inside: envelope.contains(loaded.0, loaded.1),
            zero_fuel_inside: envelope.contains(zero_fuel.0, zero_fuel.1),
        }
    }

    fn violations(&self, all_up_weight: f64, center_of_gravity: f64) -> Vec<Violation> {
        let profile = self.profile;
        let mut reasons = Vec::new();

        if all_up_weight > profile.mtow {
            reasons.push(Violation::MtowExceeded {
                all_up_weight,
                mtow: profile.mtow,
            });
        }
        if !profile.envelope.contains(center_of_gravity, all_up_weight) {
            reasons.push(Violation::CgOutOfEnvelope {
                center_of_gravity,
                all_up_weight,
            });
        }
        for (zone, load) in profile.baggage_zones.iter().zip(&self.baggage) {
            if *load > zone.max {
                reasons.push(Violation::BaggageOverLimit {
                    zone: zone.name.clone(),
                    load: *load,
                    limit: zone.max,
                });
            }
        }
        if let Some(limit) = profile.combined_baggage_limit() {
            let total = self.baggage_total();
            if total > limit {
                reasons.push(Violation::CombinedBaggageOverLimit {
                    total,
                    limit,
                    planetype: profile.planetype.clone(),
                });
            }
        }
        reasons
    }

    fn tank_index(&self, tank: &str) -> Result<usize> {
        self.profile
            .tank_index(tank)
            .ok_or_else(|| self.unknown_station(tank))
    }

    fn unknown_station(&self, station: &str) -> Error {
        Error::UnknownStation {
            callsign: self.profile.callsign.clone(),
            station: station.to_string(),
            suggestions: closest_matches(station, self.profile.station_names(), 3),
        }
    }
}

/// Endurance in hours for `usable_litres` at `burn_rate` L/h, floored to 5 minutes.
pub fn endurance_from(usable_litres: f64, burn_rate: f64) -> f64 {
    if usable_litres <= 0.0 || burn_rate <= 0.0 {
        return 0.0;
    }
    let minutes = usable_litres / burn_rate * 60.0;
    // Absorb representation error so that exact multiples are not floored down.
    let steps = ((minutes + 1e-9) / ENDURANCE_STEP_MINUTES).floor();
    steps * ENDURANCE_STEP_MINUTES / 60.0
}

fn check_mass(station: &str, kg: f64) -> Result<()> {
    if !kg.is_finite() || kg < 0.0 {
        return Err(Error::InvalidStationMass {
            station: station.to_string(),
            value: kg,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{dr400_120, s201};

    #[test]
    fn fuel_representations_stay_consistent() {
        let profile = dr400_120();
        let mut state = LoadState::new(&profile);

        state.set_fuel_gauge("main", 2.0).unwrap();
        let level = state.fuel_level("main").unwrap();
        assert!((level.volume_l - 55.0).abs() < 1e-9);
        assert!((level.mass_kg - 39.6).abs() < 1e-9);

        state.set_fuel_mass("main", 72.0).unwrap();
        let level = state.fuel_level("main").unwrap();
        assert!((level.volume_l - 100.0).abs() < 1e-9);
        assert!((level.gauge - 100.0 / 110.0 * 4.0).abs() < 1e-9);

        state.set_fuel_mass("main", 0.0).unwrap();
        assert_eq!(state.fuel_level("main"), Some(TankLevel::default()));
    }

    #[test]
    fn over_capacity_request_is_clamped() {
        let profile = dr400_120();
        let mut state = LoadState::new(&profile);
        let adjustment = state.set_fuel_volume("main", 150.0).unwrap().unwrap();
        assert_eq!(adjustment.kind, AdjustmentKind::OverCapacity);
        assert_eq!(adjustment.applied_litres, 110.0);
        assert_eq!(state.fuel_level("main").unwrap().gauge, 4.0);

        // A later valid request clears the stale notice.
        assert!(state.set_fuel_volume("main", 50.0).unwrap().is_none());
        assert!(state.adjustments().is_empty());
    }

    #[test]
    fn missing_tank_cannot_be_fuelled() {
        let profile = dr400_120();
        let mut state = LoadState::new(&profile);

        for quantity in [
            FuelQuantity::Volume(20.0),
            FuelQuantity::Mass(10.0),
            FuelQuantity::Gauge(2.0),
        ] {
            let adjustment = state.set_fuel("aux", quantity).unwrap().unwrap();
            assert_eq!(adjustment.kind, AdjustmentKind::NoTank);
            assert_eq!(state.fuel_level("aux").unwrap().volume_l, 0.0);
        }
        assert_eq!(state.adjustments().len(), 1);
        assert!(state.adjustments()[0].message.contains("has no aux fuel tank"));
        assert!(state.set_fuel_volume("aux", 0.0).unwrap().is_none());
    }

    #[test]
    fn structural_errors_are_rejected() {
        let profile = dr400_120();
        let mut state = LoadState::new(&profile);
        assert!(matches!(
            state.set_occupant("pax9", 80.0),
            Err(Error::UnknownStation { .. })
        ));
        assert!(matches!(
            state.set_pax(4, 80.0),
            Err(Error::UnknownStation { .. })
        ));
        assert!(matches!(
            state.set_baggage("baggage", -1.0),
            Err(Error::InvalidStationMass { .. })
        ));
        assert!(matches!(
            state.set_fuel_volume("main", -5.0),
            Err(Error::InvalidFuelQuantity { .. })
        ));
        assert!(matches!(
            state.set_fuel_gauge("main", 1.3),
            Err(Error::InvalidFuelQuantity { .. })
        ));
        let err = state.set_fuel_volume("mian", 10.0).unwrap_err();
        assert!(err.to_string().contains("'main'"), "{err}");
    }

    #[test]
    fn endurance_is_floored_to_five_minutes() {
        let profile = dr400_120();
        let mut state = LoadState::new(&profile);
        assert_eq!(state.endurance_hours(), 0.0);
        assert_eq!(state.flight_time_day(), 0.0);

        state.set_fuel_volume("main", 37.0).unwrap();
        assert!((state.endurance_hours() - 85.0 / 60.0).abs() < 1e-12);

        state.set_fuel_volume("main", 100.0).unwrap();
        assert!((state.endurance_hours() - 245.0 / 60.0).abs() < 1e-12);

        state.set_fuel_gauge("main", 4.0).unwrap();
        assert!((state.endurance_hours() - 4.5).abs() < 1e-12);
        assert!((state.flight_time_day() - 4.0).abs() < 1e-12);
        assert!((state.flight_time_night() - 3.75).abs() < 1e-12);

        // Below the unusable reserve.
        state.set_fuel_volume("main", 1.0).unwrap();
        assert_eq!(state.endurance_hours(), 0.0);
    }

    #[test]
    fn combined_baggage_limit_applies_when_configured() {
        let profile = s201();
        let mut state = LoadState::new(&profile);
        state.set_pax(0, 75.0).unwrap();
        state.set_fuel_volume("left_wing", 30.0).unwrap();
        state.set_fuel_volume("right_wing", 30.0).unwrap();
        state.set_baggage("baggage", 18.0).unwrap();
        state.set_baggage("baggage2", 12.0).unwrap();

        let messages = state.validate().reason_messages();
        assert_eq!(messages, vec!["Baggage + baggage2 over 25kg for type S201"]);

        state.set_baggage("baggage2", 7.0).unwrap();
        assert!(state.is_ready_to_fly());
    }

    #[test]
    fn zero_fuel_point_drops_fuel_mass() {
        let profile = dr400_120();
        let mut state = LoadState::new(&profile);
        state.set_pax(0, 80.0).unwrap();
        state.set_fuel_gauge("main", 4.0).unwrap();

        let trace = state.balance_trace();
        assert!((trace.loaded.1 - 745.2).abs() < 1e-9);
        assert!((trace.zero_fuel.1 - 666.0).abs() < 1e-9);
        assert!(trace.zero_fuel.0 < trace.loaded.0);
        assert_eq!(trace.envelope.first(), trace.envelope.last());
        // The trace leaves the state untouched.
        assert!((state.all_up_weight() - 745.2).abs() < 1e-9);
    }
}
