// Module exports for CLI subcommands.
//
// Each module handles one subcommand. main.rs parses the arguments and
// dispatches to these handlers; the argument groups shared by several
// subcommands live here.

pub mod airfield;
pub mod balance;
pub mod fleet;
pub mod performance;
pub mod trip;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use prepavol_lib::altitude::{FieldConditions, QNH_STANDARD_HPA};
use prepavol_lib::loading::{FuelQuantity, LoadState, LoadingPlan};
use prepavol_lib::reference::{AirfieldDirectory, ReferenceData};
use prepavol_lib::AircraftProfile;

/// Resolve the data directory and load every reference file.
pub fn load_reference(data_dir: Option<&Path>) -> Result<ReferenceData> {
    ReferenceData::resolve_and_load(data_dir).context("failed to load reference data")
}

/// Aircraft and loading shared by `balance`, `perf`, `grid` and `trip`.
#[derive(Args, Debug, Clone)]
pub struct LoadingArgs {
    /// Aircraft callsign, e.g. F-HAAC.
    #[arg(long)]
    pub callsign: String,
    /// Pilot mass in kg.
    #[arg(long, default_value_t = 0.0)]
    pub pax0: f64,
    /// Front passenger mass in kg.
    #[arg(long, default_value_t = 0.0)]
    pub pax1: f64,
    /// Rear left passenger mass in kg.
    #[arg(long, default_value_t = 0.0)]
    pub pax2: f64,
    /// Rear right passenger mass in kg.
    #[arg(long, default_value_t = 0.0)]
    pub pax3: f64,
    /// Baggage mass in kg.
    #[arg(long, default_value_t = 0.0)]
    pub baggage: f64,
    /// Zone 2 baggage mass in kg.
    #[arg(long, default_value_t = 0.0)]
    pub baggage2: f64,
    #[command(flatten)]
    pub fuel: FuelArgs,
}

/// Fuel per tank, in litres, gauge quarters or kilograms.
#[derive(Args, Debug, Clone, Default)]
pub struct FuelArgs {
    /// Main tank volume in litres.
    #[arg(long, conflicts_with_all = ["main_gauge", "main_mass"])]
    pub main: Option<f64>,
    /// Main tank gauge reading (0 to 4, steps of 0.5).
    #[arg(long, conflicts_with = "main_mass")]
    pub main_gauge: Option<f64>,
    /// Main tank fuel mass in kg.
    #[arg(long)]
    pub main_mass: Option<f64>,
    /// Left wing tank volume in litres.
    #[arg(long, conflicts_with_all = ["left_wing_gauge", "left_wing_mass"])]
    pub left_wing: Option<f64>,
    /// Left wing tank gauge reading.
    #[arg(long, conflicts_with = "left_wing_mass")]
    pub left_wing_gauge: Option<f64>,
    /// Left wing tank fuel mass in kg.
    #[arg(long)]
    pub left_wing_mass: Option<f64>,
    /// Right wing tank volume in litres.
    #[arg(long, conflicts_with_all = ["right_wing_gauge", "right_wing_mass"])]
    pub right_wing: Option<f64>,
    /// Right wing tank gauge reading.
    #[arg(long, conflicts_with = "right_wing_mass")]
    pub right_wing_gauge: Option<f64>,
    /// Right wing tank fuel mass in kg.
    #[arg(long)]
    pub right_wing_mass: Option<f64>,
    /// Auxiliary tank volume in litres.
    #[arg(long, conflicts_with_all = ["aux_gauge", "aux_mass"])]
    pub aux: Option<f64>,
    /// Auxiliary tank gauge reading.
    #[arg(long, conflicts_with = "aux_mass")]
    pub aux_gauge: Option<f64>,
    /// Auxiliary tank fuel mass in kg.
    #[arg(long)]
    pub aux_mass: Option<f64>,
}

impl FuelArgs {
    /// Requested quantity per tank, for the tanks given on the command line.
    pub fn quantities(&self) -> Vec<(&'static str, FuelQuantity)> {
        [
            ("main", self.main, self.main_gauge, self.main_mass),
            (
                "left_wing",
                self.left_wing,
                self.left_wing_gauge,
                self.left_wing_mass,
            ),
            (
                "right_wing",
                self.right_wing,
                self.right_wing_gauge,
                self.right_wing_mass,
            ),
            ("aux", self.aux, self.aux_gauge, self.aux_mass),
        ]
        .into_iter()
        .filter_map(|(tank, volume, gauge, mass)| {
            let quantity = volume
                .map(FuelQuantity::Volume)
                .or(gauge.map(FuelQuantity::Gauge))
                .or(mass.map(FuelQuantity::Mass))?;
            Some((tank, quantity))
        })
        .collect()
    }
}

impl LoadingArgs {
    /// Convert the arguments to a loading plan.
    ///
    /// Empty seats and zones are left out so that aircraft with fewer
    /// seats accept the defaults.
    pub fn to_plan(&self) -> LoadingPlan {
        let mut plan = LoadingPlan::default();
        for (seat, kg) in [
            ("pax0", self.pax0),
            ("pax1", self.pax1),
            ("pax2", self.pax2),
            ("pax3", self.pax3),
        ] {
            if kg != 0.0 {
                plan = plan.seat(seat, kg);
            }
        }
        for (zone, kg) in [("baggage", self.baggage), ("baggage2", self.baggage2)] {
            if kg != 0.0 {
                plan = plan.baggage(zone, kg);
            }
        }
        for (tank, quantity) in self.fuel.quantities() {
            plan = plan.fuel(tank, quantity);
        }
        plan
    }

    /// Apply the loading to `profile`.
    pub fn load<'a>(&self, profile: &'a AircraftProfile) -> Result<LoadState<'a>> {
        LoadState::from_plan(profile, &self.to_plan())
            .with_context(|| format!("invalid loading for {}", profile.callsign))
    }
}

/// Field conditions shared by `perf` and `altitude`.
#[derive(Args, Debug, Clone)]
pub struct ConditionsArgs {
    /// Field elevation in ft.
    #[arg(
        long,
        allow_negative_numbers = true,
        required_unless_present = "airfield",
        conflicts_with = "airfield"
    )]
    pub elevation: Option<f64>,
    /// Take the field elevation from the airfield directory (ICAO code).
    #[arg(long)]
    pub airfield: Option<String>,
    /// Outside air temperature in °C.
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: f64,
    /// QNH in hPa.
    #[arg(long, default_value_t = QNH_STANDARD_HPA)]
    pub qnh: f64,
}

impl ConditionsArgs {
    /// Build the field conditions, looking the airfield up when one is given.
    pub fn conditions(&self, airfields: Option<&AirfieldDirectory>) -> Result<FieldConditions> {
        match (&self.airfield, self.elevation) {
            (Some(code), _) => {
                let directory = airfields.context("no airfield directory loaded")?;
                let airfield = directory.require(code)?;
                Ok(FieldConditions::at_airfield(
                    airfield,
                    self.temperature,
                    self.qnh,
                ))
            }
            (None, Some(elevation)) => Ok(FieldConditions::new(
                elevation,
                self.temperature,
                self.qnh,
            )),
            (None, None) => anyhow::bail!("either --elevation or --airfield is required"),
        }
    }
}
