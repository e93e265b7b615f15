//! Handbook performance tables.
//!
//! Tables are stored per aircraft type and operation as tab-separated files
//! in the wide layout used by the flight manuals:
//!
//! ```text
//! alt   temp  800  900
//! 0     -5    384  435
//! 0     15    420  475
//! ```
//!
//! One row per (pressure altitude in ft, temperature in °C) and one distance
//! column per reference mass in kg.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use serde::Serialize;
use tracing::{debug, info};

use crate::altitude::celsius_to_kelvin;
use crate::error::{Error, Result};

use super::operation::Operation;

/// One handbook observation in long form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandbookPoint {
    pub altitude_ft: f64,
    pub temperature_k: f64,
    pub mass_kg: f64,
    pub distance_m: f64,
}

impl HandbookPoint {
    /// Regression inputs of the observation.
    pub fn inputs(&self) -> [f64; 3] {
        [self.altitude_ft, self.temperature_k, self.mass_kg]
    }
}

/// Handbook table of one aircraft type for one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandbookTable {
    pub planetype: String,
    pub operation: Operation,
    /// Reference masses of the table columns.
    pub masses_kg: Vec<f64>,
    pub points: Vec<HandbookPoint>,
}

impl HandbookTable {
    /// Load a table from a file.
    pub fn from_path(planetype: &str, operation: Operation, path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let table = Self::from_reader(planetype, operation, file)?;
        info!(
            path = %path.display(),
            planetype,
            %operation,
            points = table.points.len(),
            "loaded handbook table"
        );
        Ok(table)
    }

    /// Parse a wide tab-separated table and reshape it to long form.
    ///
    /// # Errors
    /// Returns [`Error::InvalidHandbookTable`] when a mass header or a cell is
    /// not a number, a row has the wrong number of cells, or the table holds
    /// no rows.
    pub fn from_reader<R: Read>(planetype: &str, operation: Operation, reader: R) -> Result<Self> {
        let invalid = |message: String| Error::InvalidHandbookTable {
            planetype: planetype.to_string(),
            message: format!("{operation} table: {message}"),
        };

        let mut csv_reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .trim(Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|err| invalid(format!("failed to read headers: {err}")))?
            .clone();
        if headers.len() < 3 {
            return Err(invalid(
                "expected altitude, temperature and at least one mass column".to_string(),
            ));
        }
        let masses_kg = headers
            .iter()
            .skip(2)
            .map(|h| {
                h.parse::<f64>()
                    .ok()
                    .filter(|m| m.is_finite() && *m > 0.0)
                    .ok_or_else(|| invalid(format!("mass header '{h}' is not a positive number")))
            })
            .collect::<Result<Vec<f64>>>()?;

        let mut points = Vec::new();
        for (index, result) in csv_reader.records().enumerate() {
            let line = index + 2;
            let record = result.map_err(|err| invalid(err.to_string()))?;
            let cell = |column: usize| -> Result<f64> {
                let text = record.get(column).unwrap_or_default();
                text.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| invalid(format!("line {line}: '{text}' is not a number")))
            };

            let altitude_ft = cell(0)?;
            let temperature_k = celsius_to_kelvin(cell(1)?);
            for (offset, mass_kg) in masses_kg.iter().enumerate() {
                points.push(HandbookPoint {
                    altitude_ft,
                    temperature_k,
                    mass_kg: *mass_kg,
                    distance_m: cell(offset + 2)?,
                });
            }
        }

        if points.is_empty() {
            return Err(invalid("table has no rows".to_string()));
        }

        Ok(Self {
            planetype: planetype.to_string(),
            operation,
            masses_kg,
            points,
        })
    }

    /// Regression inputs `(altitude ft, temperature K, mass kg)` per observation.
    pub fn inputs(&self) -> Vec<[f64; 3]> {
        self.points.iter().map(HandbookPoint::inputs).collect()
    }

    /// Observed distances in metres.
    pub fn distances(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.distance_m).collect()
    }
}

/// Directory of handbook tables named `<planetype>_<operation>.csv`.
#[derive(Debug, Clone)]
pub struct HandbookLibrary {
    dir: PathBuf,
}

impl HandbookLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the table of `planetype` for `operation`.
    pub fn table_path(&self, planetype: &str, operation: Operation) -> PathBuf {
        self.dir
            .join(format!("{planetype}_{}.csv", operation.file_suffix()))
    }

    /// Load the table of `planetype` for `operation`.
    ///
    /// # Errors
    /// Returns [`Error::MissingHandbookTable`] when no table exists. Tables of
    /// other aircraft types are never substituted.
    pub fn load(&self, planetype: &str, operation: Operation) -> Result<HandbookTable> {
        let path = self.table_path(planetype, operation);
        if !path.is_file() {
            debug!(path = %path.display(), "handbook table not found");
            return Err(Error::MissingHandbookTable {
                planetype: planetype.to_string(),
                operation: operation.to_string(),
            });
        }
        HandbookTable::from_path(planetype, operation, &path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TABLE: &str = "alt\ttemp\t800\t900\n0\t-5\t384\t435\n4000\t15\t580\t653\n";

    #[test]
    fn reshapes_wide_rows_to_long_form() {
        let table =
            HandbookTable::from_reader("DR400-120", Operation::Takeoff, Cursor::new(TABLE))
                .unwrap();
        assert_eq!(table.masses_kg, vec![800.0, 900.0]);
        assert_eq!(table.points.len(), 4);
        assert_eq!(table.inputs()[1], [0.0, 268.0, 900.0]);
        assert_eq!(table.distances(), vec![384.0, 435.0, 580.0, 653.0]);
    }

    #[test]
    fn rejects_malformed_tables() {
        let cases = [
            "alt\ttemp\theavy\n0\t15\t400\n",
            "alt\ttemp\t800\n0\t15\tfar\n",
            "alt\ttemp\t800\n0\t15\n",
            "alt\ttemp\t800\n",
        ];
        for text in cases {
            let result = HandbookTable::from_reader("X", Operation::Landing, Cursor::new(text));
            assert!(
                matches!(result, Err(Error::InvalidHandbookTable { .. })),
                "{text:?}"
            );
        }
    }

    #[test]
    fn missing_table_is_a_hard_error() {
        let dir = tempfile::tempdir().unwrap();
        let library = HandbookLibrary::new(dir.path());
        let err = library.load("CAP10", Operation::Takeoff).unwrap_err();
        assert!(matches!(err, Error::MissingHandbookTable { .. }));
        assert_eq!(
            err.to_string(),
            "no takeoff handbook table for aircraft type CAP10"
        );
    }
}
