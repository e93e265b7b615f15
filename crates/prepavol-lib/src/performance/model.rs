//! Distance predictions from a fitted handbook surface.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::altitude::{FieldConditions, KELVIN_OFFSET};
use crate::error::Result;
use crate::loading::WeightBalanceReport;

use super::handbook::{HandbookLibrary, HandbookTable};
use super::operation::{Operation, RunwaySurface, HEADWINDS_KT};
use super::regression::QuadraticSurface;

/// Regression model of one aircraft type for one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceModel {
    pub planetype: String,
    pub operation: Operation,
    surface: QuadraticSurface,
    /// Worst fit error at the handbook points, in metres.
    pub max_residual_m: f64,
}

/// One row of a distance table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceRow {
    pub surface: RunwaySurface,
    /// Distance to 50 ft per headwind column, in metres.
    pub distances_m: [i64; 4],
}

/// Predicted distances: one row per runway surface, one column per headwind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceTable {
    pub planetype: String,
    pub operation: Operation,
    pub auw_kg: f64,
    pub pressure_altitude_ft: f64,
    pub density_altitude_ft: f64,
    pub temperature_k: f64,
    /// Unrounded dry, no-wind distance.
    pub baseline_m: f64,
    pub headwinds_kt: [u32; 4],
    pub rows: Vec<DistanceRow>,
}

impl DistanceTable {
    pub fn row(&self, surface: RunwaySurface) -> Option<&DistanceRow> {
        self.rows.iter().find(|row| row.surface == surface)
    }
}

/// Sampling of the altitude/temperature plane for contour plots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub altitude_min_ft: f64,
    pub altitude_max_ft: f64,
    pub altitude_steps: usize,
    pub temperature_min_k: f64,
    pub temperature_max_k: f64,
    pub temperature_steps: usize,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            altitude_min_ft: 0.0,
            altitude_max_ft: 10_000.0,
            altitude_steps: 10,
            temperature_min_k: 243.0,
            temperature_max_k: 323.0,
            temperature_steps: 10,
        }
    }
}

/// Predicted distances over a grid, for isoline plots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceGrid {
    pub planetype: String,
    pub operation: Operation,
    pub auw_kg: f64,
    pub altitudes_ft: Vec<f64>,
    pub temperatures_k: Vec<f64>,
    pub temperatures_c: Vec<f64>,
    /// `distances_m[t][a]` is the dry, no-wind distance at
    /// `temperatures_k[t]` and `altitudes_ft[a]`.
    pub distances_m: Vec<Vec<f64>>,
}

impl PerformanceModel {
    /// Fit the model to a handbook table.
    pub fn fit(table: &HandbookTable) -> Result<Self> {
        let inputs = table.inputs();
        let targets = table.distances();
        let surface = QuadraticSurface::fit(&inputs, &targets)?;
        let max_residual_m = surface.max_residual(&inputs, &targets);
        debug!(
            planetype = %table.planetype,
            operation = %table.operation,
            points = inputs.len(),
            max_residual_m,
            "fitted performance model"
        );
        Ok(Self {
            planetype: table.planetype.clone(),
            operation: table.operation,
            surface,
            max_residual_m,
        })
    }

    /// Load the handbook table of `planetype` and fit it.
    pub fn load(library: &HandbookLibrary, planetype: &str, operation: Operation) -> Result<Self> {
        Self::fit(&library.load(planetype, operation)?)
    }

    /// Dry hard-runway, no-wind distance in metres, never negative.
    pub fn baseline_distance(
        &self,
        pressure_altitude_ft: f64,
        temperature_k: f64,
        auw_kg: f64,
    ) -> f64 {
        self.surface
            .evaluate([pressure_altitude_ft, temperature_k, auw_kg])
            .max(0.0)
    }

    /// Distance table for the field conditions and all-up weight.
    ///
    /// Headwind columns scale the baseline; surface rows scale the dry row.
    /// Every cell is rounded to the metre, half away from zero. An empty
    /// `surfaces` slice selects dry and grass.
    pub fn predict(
        &self,
        conditions: &FieldConditions,
        auw_kg: f64,
        surfaces: &[RunwaySurface],
    ) -> DistanceTable {
        let pressure_altitude_ft = conditions.pressure_altitude();
        let temperature_k = conditions.temperature_k();
        let baseline_m = self.baseline_distance(pressure_altitude_ft, temperature_k, auw_kg);

        let factors = self.operation.headwind_factors();
        let dry = factors.map(|factor| (baseline_m * factor).round() as i64);

        let wanted: &[RunwaySurface] = if surfaces.is_empty() {
            &RunwaySurface::DEFAULT_SELECTION
        } else {
            surfaces
        };
        let rows = RunwaySurface::ALL
            .into_iter()
            .filter(|surface| wanted.contains(surface))
            .map(|surface| {
                let multiplier = surface.multiplier(self.operation);
                DistanceRow {
                    surface,
                    distances_m: dry.map(|cell| (cell as f64 * multiplier).round() as i64),
                }
            })
            .collect();

        DistanceTable {
            planetype: self.planetype.clone(),
            operation: self.operation,
            auw_kg,
            pressure_altitude_ft,
            density_altitude_ft: conditions.density_altitude(),
            temperature_k,
            baseline_m,
            headwinds_kt: HEADWINDS_KT,
            rows,
        }
    }

    /// Evaluate the baseline distance over a grid at the given all-up weight.
    pub fn contour_grid(&self, auw_kg: f64, spec: &GridSpec) -> PerformanceGrid {
        let altitudes_ft = linspace(
            spec.altitude_min_ft,
            spec.altitude_max_ft,
            spec.altitude_steps,
        );
        let temperatures_k = linspace(
            spec.temperature_min_k,
            spec.temperature_max_k,
            spec.temperature_steps,
        );
        let distances_m = temperatures_k
            .iter()
            .map(|&temperature_k| {
                altitudes_ft
                    .iter()
                    .map(|&altitude_ft| self.baseline_distance(altitude_ft, temperature_k, auw_kg))
                    .collect()
            })
            .collect();

        PerformanceGrid {
            planetype: self.planetype.clone(),
            operation: self.operation,
            auw_kg,
            temperatures_c: temperatures_k.iter().map(|k| k - KELVIN_OFFSET).collect(),
            altitudes_ft,
            temperatures_k,
            distances_m,
        }
    }
}

/// Evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let span = end - start;
            let last = (steps - 1) as f64;
            (0..steps).map(|i| start + span * i as f64 / last).collect()
        }
    }
}

/// Inputs of a prediction: aircraft type, all-up weight and field conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRequest {
    pub planetype: String,
    pub auw_kg: f64,
    pub conditions: FieldConditions,
}

impl PerformanceRequest {
    pub fn new(planetype: &str, auw_kg: f64, conditions: FieldConditions) -> Self {
        Self {
            planetype: planetype.to_string(),
            auw_kg,
            conditions,
        }
    }

    /// Request for the aircraft and all-up weight of an evaluated loading.
    pub fn for_loading(report: &WeightBalanceReport, conditions: FieldConditions) -> Self {
        Self::new(&report.planetype, report.all_up_weight, conditions)
    }

    pub fn pressure_altitude(&self) -> f64 {
        self.conditions.pressure_altitude()
    }

    pub fn density_altitude(&self) -> f64 {
        self.conditions.density_altitude()
    }

    /// Fit the model of this aircraft type for `operation` and predict distances.
    pub fn predict(
        &self,
        library: &HandbookLibrary,
        operation: Operation,
        surfaces: &[RunwaySurface],
    ) -> Result<DistanceTable> {
        let model = PerformanceModel::load(library, &self.planetype, operation)?;
        Ok(model.predict(&self.conditions, self.auw_kg, surfaces))
    }

    /// Fit the model of this aircraft type for `operation` and sample the default grid.
    pub fn plot_performance(
        &self,
        library: &HandbookLibrary,
        operation: Operation,
    ) -> Result<PerformanceGrid> {
        let model = PerformanceModel::load(library, &self.planetype, operation)?;
        Ok(model.contour_grid(self.auw_kg, &GridSpec::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::dr400_120_table;

    #[test]
    fn reproduces_handbook_points() {
        for operation in Operation::ALL {
            let model = PerformanceModel::fit(&dr400_120_table(operation)).unwrap();
            assert!(model.max_residual_m < 1.0, "{}", model.max_residual_m);
        }
        let model = PerformanceModel::fit(&dr400_120_table(Operation::Takeoff)).unwrap();
        // Sea level, 15 °C, 900 kg is a table point.
        assert!((model.baseline_distance(0.0, 288.0, 900.0) - 475.0).abs() < 1.0);
    }

    #[test]
    fn takeoff_table_applies_wind_and_surface_factors() {
        let model = PerformanceModel::fit(&dr400_120_table(Operation::Takeoff)).unwrap();
        let conditions = FieldConditions::new(1200.0, 25.0, 1010.0);
        let table = model.predict(&conditions, 825.2, &[]);

        assert_eq!(table.pressure_altitude_ft, 1281.0);
        assert_eq!(table.temperature_k, 298.0);
        let surfaces: Vec<_> = table.rows.iter().map(|r| r.surface).collect();
        assert_eq!(surfaces, [RunwaySurface::Dry, RunwaySurface::Grass]);

        let dry = table.row(RunwaySurface::Dry).unwrap().distances_m;
        assert!((dry[0] - 504).abs() <= 2, "{dry:?}");
        for (cell, factor) in dry.iter().zip(Operation::Takeoff.headwind_factors()) {
            assert_eq!(*cell, (table.baseline_m * factor).round() as i64);
        }
        let grass = table.row(RunwaySurface::Grass).unwrap().distances_m;
        for (g, d) in grass.iter().zip(dry) {
            assert_eq!(*g, (d as f64 * 1.2).round() as i64);
        }
    }

    #[test]
    fn distances_shrink_into_headwind() {
        for operation in Operation::ALL {
            let model = PerformanceModel::fit(&dr400_120_table(operation)).unwrap();
            let conditions = FieldConditions::new(3054.0, 32.0, 998.0);
            let table = model.predict(&conditions, 880.0, &RunwaySurface::ALL);
            assert_eq!(table.rows.len(), 7);
            for row in &table.rows {
                assert!(
                    row.distances_m.windows(2).all(|w| w[1] <= w[0]),
                    "{operation} {:?}",
                    row
                );
            }
        }
    }

    #[test]
    fn requested_surfaces_come_back_in_table_order() {
        let model = PerformanceModel::fit(&dr400_120_table(Operation::Landing)).unwrap();
        let conditions = FieldConditions::new(0.0, 15.0, 1013.0);
        let table = model.predict(
            &conditions,
            900.0,
            &[RunwaySurface::Multiple, RunwaySurface::Wet],
        );
        let surfaces: Vec<_> = table.rows.iter().map(|r| r.surface).collect();
        assert_eq!(surfaces, [RunwaySurface::Wet, RunwaySurface::Multiple]);
        assert!((table.row(RunwaySurface::Wet).unwrap().distances_m[0] - 541).abs() <= 2);
    }

    #[test]
    fn default_grid_is_ten_by_ten() {
        let model = PerformanceModel::fit(&dr400_120_table(Operation::Takeoff)).unwrap();
        let grid = model.contour_grid(825.2, &GridSpec::default());
        assert_eq!(grid.altitudes_ft.len(), 10);
        assert_eq!(grid.temperatures_k.len(), 10);
        assert_eq!(grid.distances_m.len(), 10);
        assert!(grid.distances_m.iter().all(|row| row.len() == 10));
        assert_eq!(grid.altitudes_ft[9], 10_000.0);
        assert_eq!(grid.temperatures_c[0], -30.0);
        // Hotter and higher is longer.
        assert!(grid.distances_m[9][9] > grid.distances_m[0][0]);
    }

    #[test]
    fn linspace_includes_both_ends() {
        assert_eq!(linspace(0.0, 10.0, 3), vec![0.0, 5.0, 10.0]);
        assert_eq!(linspace(5.0, 10.0, 1), vec![5.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
