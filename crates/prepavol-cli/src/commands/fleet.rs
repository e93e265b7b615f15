//! Fleet command handler for listing the aircraft of the catalog.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use prepavol_cli::output::{format_fleet_text, print_json, OutputFormat};

use super::load_reference;

#[derive(Debug, Serialize)]
struct FleetEntry<'a> {
    callsign: &'a str,
    planetype: &'a str,
    empty_weight: f64,
    mtow: f64,
    fuel: &'a str,
    fuel_capacity: f64,
}

/// Handle the fleet subcommand.
pub fn handle_fleet(data_dir: Option<&Path>, format: OutputFormat) -> Result<()> {
    let data = load_reference(data_dir)?;
    let profiles = data.fleet.profiles_sorted();

    match format {
        OutputFormat::Json => {
            let entries: Vec<FleetEntry<'_>> = profiles
                .iter()
                .map(|p| FleetEntry {
                    callsign: &p.callsign,
                    planetype: &p.planetype,
                    empty_weight: p.empty_weight,
                    mtow: p.mtow,
                    fuel: &p.fuel_name,
                    fuel_capacity: p.fuel_capacity(),
                })
                .collect();
            print_json(&entries)
        }
        OutputFormat::Text => {
            print!("{}", format_fleet_text(&profiles));
            Ok(())
        }
    }
}
