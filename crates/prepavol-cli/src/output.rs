//! Output formatting for command results.
//!
//! Every command renders its result either as JSON or as plain text. The
//! text formatters return strings so they can be tested without a terminal.

use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use prepavol_lib::altitude::FieldConditions;
use prepavol_lib::loading::{StationKind, WeightBalanceReport};
use prepavol_lib::performance::{DistanceTable, PerformanceGrid};
use prepavol_lib::reference::Airfield;
use prepavol_lib::trip::TripReport;
use prepavol_lib::AircraftProfile;

use crate::terminal::{format_hours, format_minutes, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Print any serializable result as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Fleet listing, one aircraft per line.
pub fn format_fleet_text(profiles: &[&AircraftProfile]) -> String {
    if profiles.is_empty() {
        return "No aircraft in fleet catalog.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Fleet ({} aircraft):", profiles.len());
    let _ = writeln!(
        out,
        "{:<10} {:<12} {:>10} {:>9} {:>8} {:<6}",
        "Callsign", "Type", "Empty (kg)", "MTOW (kg)", "Fuel (L)", "Grade"
    );
    for profile in profiles {
        let _ = writeln!(
            out,
            "{:<10} {:<12} {:>10.1} {:>9.0} {:>8.0} {:<6}",
            profile.callsign,
            profile.planetype,
            profile.empty_weight,
            profile.mtow,
            profile.fuel_capacity(),
            profile.fuel_name
        );
    }
    out
}

/// Loading sheet and verdict of a weight-and-balance report.
pub fn format_balance_text(report: &WeightBalanceReport, palette: &ColorPalette) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}{}{} ({}) {}",
        palette.white_bold,
        report.callsign,
        palette.reset,
        report.planetype,
        palette.verdict(report.is_ready_to_fly)
    );
    let _ = writeln!(
        out,
        "{:<12} {:>10} {:>8} {:>14}",
        "Station", "Mass (kg)", "Arm (m)", "Moment (m.kg)"
    );
    for station in report
        .stations
        .iter()
        .filter(|s| s.kind == StationKind::Empty || s.mass_kg > 0.0)
    {
        let _ = writeln!(
            out,
            "{:<12} {:>10.1} {:>8.3} {:>14.2}",
            station.name, station.mass_kg, station.arm, station.moment
        );
    }
    let _ = writeln!(
        out,
        "\nAll-up weight: {:.1} kg (MTOW {:.0} kg)",
        report.all_up_weight, report.mtow
    );
    let _ = writeln!(out, "Centre of gravity: {:.3} m", report.center_of_gravity);
    let _ = writeln!(out, "Baggage: {:.1} kg", report.baggage_total);
    let _ = writeln!(
        out,
        "Fuel: {:.1} L ({:.1} kg)",
        report.fuel_volume_l, report.fuel_mass_kg
    );
    let _ = writeln!(
        out,
        "Endurance: {}  day flight time: {}  night flight time: {}",
        format_hours(report.endurance_hours),
        format_hours(report.flight_time_day_hours),
        format_hours(report.flight_time_night_hours)
    );

    for adjustment in &report.fuel_adjustments {
        let _ = writeln!(out, "{}! {}{}", palette.yellow, adjustment, palette.reset);
    }
    for reason in &report.reasons {
        let _ = writeln!(out, "{}- {}{}", palette.red, reason, palette.reset);
    }
    out
}

/// Distance table with one row per runway surface.
pub fn format_distance_table_text(table: &DistanceTable) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} distances for {} at {:.1} kg",
        table.operation, table.planetype, table.auw_kg
    );
    let _ = writeln!(
        out,
        "Pressure altitude: {:.0} ft  Density altitude: {:.0} ft  Temperature: {:.0} K",
        table.pressure_altitude_ft, table.density_altitude_ft, table.temperature_k
    );

    let _ = write!(out, "{:<14}", "Surface");
    for headwind in table.headwinds_kt {
        let _ = write!(out, " {:>8}", format!("{headwind} kt"));
    }
    out.push('\n');
    for row in &table.rows {
        let _ = write!(out, "{:<14}", row.surface.as_str());
        for distance in row.distances_m {
            let _ = write!(out, " {:>6} m", distance);
        }
        out.push('\n');
    }
    out
}

/// Contour grid as comma-separated values: one row per temperature (°C),
/// one column per pressure altitude (ft).
pub fn format_grid_text(grid: &PerformanceGrid) -> String {
    let mut out = String::new();
    let _ = write!(out, "temp_c");
    for altitude in &grid.altitudes_ft {
        let _ = write!(out, ",{altitude:.0}");
    }
    out.push('\n');
    for (temperature, row) in grid.temperatures_c.iter().zip(&grid.distances_m) {
        let _ = write!(out, "{temperature:.1}");
        for distance in row {
            let _ = write!(out, ",{distance:.0}");
        }
        out.push('\n');
    }
    out
}

/// Pressure and density altitude of field conditions.
pub fn format_altitude_text(conditions: &FieldConditions) -> String {
    format!(
        "Pressure altitude: {:.0} ft\nDensity altitude: {:.0} ft\n",
        conditions.pressure_altitude(),
        conditions.density_altitude()
    )
}

/// Fuel budget and verdict of a planned trip.
pub fn format_trip_text(report: &TripReport, palette: &ColorPalette) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}{}{} ({}) {} {}",
        palette.white_bold,
        report.callsign,
        palette.reset,
        report.planetype,
        report.category.description(),
        palette.verdict(report.authorized)
    );
    let _ = writeln!(out, "{:<12} {:>8} {:>10}", "Item", "Time", "Fuel (L)");
    let mut line = |label: &str, minutes: f64, litres: f64| {
        let _ = writeln!(
            out,
            "{:<12} {:>8} {:>10.1}",
            label,
            format_minutes(minutes),
            litres
        );
    };
    for (index, leg) in report.legs.iter().enumerate() {
        line(&format!("leg {}", index + 1), leg.minutes, leg.litres);
    }
    line("taxi", report.taxi.minutes, report.taxi.litres);
    line("arrival", report.arrival.minutes, report.arrival.litres);
    line("alternate", report.alternate.minutes, report.alternate.litres);
    line("margin", report.margin.minutes, report.margin.litres);
    line("reserve", report.reserve.minutes, report.reserve.litres);
    line("unusable", 0.0, report.unusable_litres);

    let _ = writeln!(
        out,
        "\nRequired: {:.1} L for {}",
        report.required_litres,
        format_minutes(report.total_time_min)
    );
    let _ = writeln!(
        out,
        "On board: {:.1} L, endurance {}",
        report.carried_litres,
        format_minutes(report.endurance_min)
    );
    if report.authorized {
        let _ = writeln!(
            out,
            "Maximum flight time: {}",
            format_minutes(report.max_flight_time_min)
        );
    } else {
        let _ = writeln!(
            out,
            "{}Missing {:.1} L of fuel{}",
            palette.red, report.shortfall_litres, palette.reset
        );
    }
    out
}

/// Airfield details.
pub fn format_airfield_text(airfield: &Airfield) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", airfield.code, airfield.name);
    let _ = writeln!(out, "Elevation: {:.0} ft", airfield.elevation_ft);
    if let Some(threshold) = airfield.threshold_elevation_ft {
        let _ = writeln!(out, "Threshold elevation: {threshold:.0} ft");
    }
    let _ = writeln!(out, "Magnetic variation: {}°", airfield.magnetic_variation);
    if let Some(position) = airfield.position {
        let _ = writeln!(
            out,
            "Position: {:.5}, {:.5}",
            position.latitude, position.longitude
        );
    }
    if !airfield.traffic.is_empty() {
        let _ = writeln!(out, "Traffic: {}", airfield.traffic);
    }
    if !airfield.status.is_empty() {
        let _ = writeln!(out, "Status: {}", airfield.status);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::fixture_data;
    use prepavol_lib::loading::LoadState;
    use prepavol_lib::performance::Operation;
    use prepavol_lib::trip::{plan_trip, FlightCategory, TripLeg, TripPlan};
    use prepavol_lib::PerformanceRequest;

    #[test]
    fn fleet_lists_every_callsign() {
        let data = fixture_data();
        let text = format_fleet_text(&data.fleet.profiles_sorted());
        assert!(text.starts_with("Fleet (3 aircraft):"));
        assert!(text.contains("F-HAAC"));
        assert!(text.contains("DR400-140B"));
        assert!(text.contains("UL91"));
    }

    #[test]
    fn balance_text_lists_loaded_stations_and_reasons() {
        let data = fixture_data();
        let profile = data.fleet.require("F-HAAC").unwrap();
        let mut state = LoadState::new(profile);
        state.set_fuel_gauge("main", 4.0).unwrap();
        for seat in 0..4 {
            state.set_pax(seat, 100.0).unwrap();
        }
        state.set_fuel_gauge("aux", 1.0).unwrap();

        let text = format_balance_text(&state.validate(), &ColorPalette::plain());
        assert!(text.contains("F-HAAC (DR400-120)  NO GO"));
        assert!(text.contains("pax3"));
        assert!(!text.contains("baggage2"));
        assert!(text.contains("All-up weight: 1065.2 kg (MTOW 900 kg)"));
        assert!(text.contains("- All-up weight above MTOW"));
        assert!(text.contains("! F-HAAC has no aux fuel tank. Setting volume to 0."));
    }

    #[test]
    fn distance_table_has_a_column_per_headwind() {
        let data = fixture_data();
        let request = PerformanceRequest::new(
            "DR400-120",
            825.2,
            FieldConditions::new(1200.0, 25.0, 1010.0),
        );
        let table = request
            .predict(&data.handbooks, Operation::Takeoff, &[])
            .unwrap();

        let text = format_distance_table_text(&table);
        assert!(text.starts_with("takeoff distances for DR400-120 at 825.2 kg"));
        assert!(text.contains("Pressure altitude: 1281 ft"));
        assert!(text.contains("30 kt"));
        assert_eq!(text.lines().filter(|l| l.starts_with("grass")).count(), 1);
    }

    #[test]
    fn grid_text_is_comma_separated() {
        let data = fixture_data();
        let grid = PerformanceRequest::new("S201", 700.0, FieldConditions::new(0.0, 15.0, 1013.0))
            .plot_performance(&data.handbooks, Operation::Landing)
            .unwrap();

        let text = format_grid_text(&grid);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[0].starts_with("temp_c,0,"));
        assert!(lines[0].ends_with(",10000"));
        assert!(lines[1].starts_with("-30.0,"));
        assert_eq!(lines[1].split(',').count(), 11);
    }

    #[test]
    fn altitude_text_rounds_to_the_foot() {
        let text = format_altitude_text(&FieldConditions::new(1200.0, 25.0, 1010.0));
        assert_eq!(
            text,
            "Pressure altitude: 1281 ft\nDensity altitude: 2773 ft\n"
        );
    }

    #[test]
    fn trip_text_reports_the_shortfall() {
        let data = fixture_data();
        let profile = data.fleet.require("F-HAAC").unwrap();
        let state = LoadState::new(profile);
        let plan = TripPlan::new(
            FlightCategory::Navigation,
            vec![TripLeg::new(0.0, 100.0)],
            TripLeg::new(0.0, 20.0),
        );
        let report = plan_trip(&state, &plan).unwrap();

        let text = format_trip_text(&report, &ColorPalette::plain());
        assert!(text.contains("day navigation  NO GO"));
        assert!(text.contains("leg 1"));
        assert!(text.contains("reserve"));
        assert!(text.contains("Missing 48.8 L of fuel"));
    }

    #[test]
    fn airfield_text_shows_position() {
        let data = fixture_data();
        let text = format_airfield_text(data.airfields.require("LFMT").unwrap());
        assert!(text.starts_with("LFMT MONTPELLIER MEDITERRANEE\n"));
        assert!(text.contains("Elevation: 17 ft"));
        assert!(text.contains("Position: 43.58278, 3.96306"));
    }
}
