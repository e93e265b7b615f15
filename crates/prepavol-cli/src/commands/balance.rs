//! Balance command handler for the weight-and-balance report.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use prepavol_cli::output::{format_balance_text, print_json, OutputFormat};
use prepavol_cli::terminal::ColorPalette;
use prepavol_lib::loading::{BalanceTrace, WeightBalanceReport};

use super::{load_reference, LoadingArgs};

#[derive(Debug, Serialize)]
struct BalanceOutput<'a> {
    #[serde(flatten)]
    report: &'a WeightBalanceReport,
    balance_trace: &'a BalanceTrace,
}

/// Handle the balance subcommand.
///
/// A loading that is not ready to fly is a result, not a failure: the
/// command still succeeds and lists the reasons.
pub fn handle_balance(
    data_dir: Option<&Path>,
    format: OutputFormat,
    args: &LoadingArgs,
) -> Result<()> {
    let data = load_reference(data_dir)?;
    let profile = data.fleet.require(&args.callsign)?;
    let state = args.load(profile)?;
    let report = state.validate();
    let trace = state.balance_trace();

    match format {
        OutputFormat::Json => print_json(&BalanceOutput {
            report: &report,
            balance_trace: &trace,
        }),
        OutputFormat::Text => {
            print!("{}", format_balance_text(&report, &ColorPalette::detect()));
            println!(
                "Zero-fuel centre of gravity: {:.3} m at {:.1} kg ({} envelope)",
                trace.zero_fuel.0,
                trace.zero_fuel.1,
                if trace.zero_fuel_inside {
                    "inside"
                } else {
                    "outside"
                }
            );
            Ok(())
        }
    }
}
