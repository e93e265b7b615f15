//! Airfield and altitude command handlers.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use prepavol_cli::output::{format_airfield_text, format_altitude_text, print_json, OutputFormat};
use prepavol_lib::altitude::FieldConditions;

use super::{load_reference, ConditionsArgs};

#[derive(Debug, Serialize)]
struct AltitudeOutput {
    #[serde(flatten)]
    conditions: FieldConditions,
    pressure_altitude_ft: f64,
    density_altitude_ft: f64,
}

/// Handle the airfield subcommand.
pub fn handle_airfield(data_dir: Option<&Path>, format: OutputFormat, code: &str) -> Result<()> {
    let data = load_reference(data_dir)?;
    let airfield = data.airfields.require(code)?;

    match format {
        OutputFormat::Json => print_json(airfield),
        OutputFormat::Text => {
            print!("{}", format_airfield_text(airfield));
            Ok(())
        }
    }
}

/// Handle the altitude subcommand.
///
/// Reference data is only loaded when the elevation comes from an airfield.
pub fn handle_altitude(
    data_dir: Option<&Path>,
    format: OutputFormat,
    args: &ConditionsArgs,
) -> Result<()> {
    let conditions = if args.airfield.is_some() {
        let data = load_reference(data_dir)?;
        args.conditions(Some(&data.airfields))?
    } else {
        args.conditions(None)?
    };

    match format {
        OutputFormat::Json => print_json(&AltitudeOutput {
            conditions,
            pressure_altitude_ft: conditions.pressure_altitude(),
            density_altitude_ft: conditions.density_altitude(),
        }),
        OutputFormat::Text => {
            print!("{}", format_altitude_text(&conditions));
            Ok(())
        }
    }
}
