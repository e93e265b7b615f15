//! Perf and grid command handlers for take-off and landing distances.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use prepavol_cli::output::{
    format_distance_table_text, format_grid_text, print_json, OutputFormat,
};
use prepavol_lib::loading::WeightBalanceReport;
use prepavol_lib::performance::{
    DistanceTable, GridSpec, Operation, PerformanceModel, PerformanceRequest, RunwaySurface,
};

use super::{load_reference, ConditionsArgs, LoadingArgs};

/// Arguments for the perf command.
#[derive(Args, Debug, Clone)]
pub struct PerfArgs {
    #[command(flatten)]
    pub loading: LoadingArgs,
    #[command(flatten)]
    pub conditions: ConditionsArgs,
    /// takeoff or landing.
    #[arg(long, default_value = "takeoff")]
    pub operation: Operation,
    /// Runway surface to report; repeat for several (default: dry and grass).
    #[arg(long = "surface")]
    pub surfaces: Vec<RunwaySurface>,
}

/// Arguments for the grid command.
#[derive(Args, Debug, Clone)]
pub struct GridArgs {
    #[command(flatten)]
    pub loading: LoadingArgs,
    /// takeoff or landing.
    #[arg(long, default_value = "takeoff")]
    pub operation: Operation,
    /// Highest pressure altitude of the grid in ft.
    #[arg(long, default_value_t = 10_000.0)]
    pub max_altitude: f64,
    /// Samples per axis.
    #[arg(long, default_value_t = 10)]
    pub steps: usize,
}

impl GridArgs {
    fn spec(&self) -> GridSpec {
        GridSpec {
            altitude_max_ft: self.max_altitude,
            altitude_steps: self.steps,
            temperature_steps: self.steps,
            ..GridSpec::default()
        }
    }
}

#[derive(Debug, Serialize)]
struct PerfOutput<'a> {
    loading: &'a WeightBalanceReport,
    distances: &'a DistanceTable,
}

/// Handle the perf subcommand.
///
/// Computes the all-up weight of the loading, then the distance table of
/// its aircraft type for the requested operation and surfaces.
pub fn handle_perf(data_dir: Option<&Path>, format: OutputFormat, args: &PerfArgs) -> Result<()> {
    let data = load_reference(data_dir)?;
    let profile = data.fleet.require(&args.loading.callsign)?;
    let report = args.loading.load(profile)?.validate();
    let conditions = args.conditions.conditions(Some(&data.airfields))?;

    let table = PerformanceRequest::for_loading(&report, conditions)
        .predict(&data.handbooks, args.operation, &args.surfaces)
        .with_context(|| {
            format!(
                "failed to predict {} distances for {}",
                args.operation, profile.planetype
            )
        })?;

    match format {
        OutputFormat::Json => print_json(&PerfOutput {
            loading: &report,
            distances: &table,
        }),
        OutputFormat::Text => {
            print!("{}", format_distance_table_text(&table));
            if !report.is_ready_to_fly {
                println!("\nLoading is not ready to fly:");
                for reason in &report.reasons {
                    println!("- {reason}");
                }
            }
            Ok(())
        }
    }
}

/// Handle the grid subcommand.
pub fn handle_grid(data_dir: Option<&Path>, format: OutputFormat, args: &GridArgs) -> Result<()> {
    let data = load_reference(data_dir)?;
    let profile = data.fleet.require(&args.loading.callsign)?;
    let report = args.loading.load(profile)?.validate();

    let model = PerformanceModel::load(&data.handbooks, &profile.planetype, args.operation)?;
    let grid = model.contour_grid(report.all_up_weight, &args.spec());

    match format {
        OutputFormat::Json => print_json(&grid),
        OutputFormat::Text => {
            print!("{}", format_grid_text(&grid));
            Ok(())
        }
    }
}
