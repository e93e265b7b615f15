//! Trip command handler for the fuel-on-board check.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use prepavol_cli::output::{format_trip_text, print_json, OutputFormat};
use prepavol_cli::terminal::ColorPalette;
use prepavol_lib::trip::{plan_trip, FlightCategory, TripLeg, TripPlan, DEFAULT_CRUISE_KT};

use super::{load_reference, LoadingArgs};

/// Arguments for the trip command.
#[derive(Args, Debug, Clone)]
pub struct TripArgs {
    #[command(flatten)]
    pub loading: LoadingArgs,
    /// circuit_pattern, local_in_sight, local_out_of_sight, navigation (nav) or night.
    #[arg(long, default_value = "navigation")]
    pub category: FlightCategory,
    /// Leg as WIND:DISTANCE (kt:nm); repeat for each leg.
    #[arg(long = "leg", required = true, allow_hyphen_values = true)]
    pub legs: Vec<TripLeg>,
    /// Diversion to the alternate as WIND:DISTANCE (kt:nm).
    #[arg(long, default_value = "0:0", allow_hyphen_values = true)]
    pub alternate: TripLeg,
    /// Pilot margin in minutes.
    #[arg(long, default_value_t = 0.0)]
    pub margin: f64,
    /// Cruise speed in kt.
    #[arg(long, default_value_t = DEFAULT_CRUISE_KT)]
    pub cruise: f64,
}

impl TripArgs {
    fn to_plan(&self) -> TripPlan {
        TripPlan::new(self.category, self.legs.clone(), self.alternate)
            .with_margin(self.margin)
            .with_cruise_speed(self.cruise)
    }
}

/// Handle the trip subcommand.
///
/// An unauthorized trip is a result: the command still succeeds and
/// reports the missing fuel.
pub fn handle_trip(data_dir: Option<&Path>, format: OutputFormat, args: &TripArgs) -> Result<()> {
    let data = load_reference(data_dir)?;
    let profile = data.fleet.require(&args.loading.callsign)?;
    let state = args.loading.load(profile)?;
    let report = plan_trip(&state, &args.to_plan())?;

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            print!("{}", format_trip_text(&report, &ColorPalette::detect()));
            Ok(())
        }
    }
}
