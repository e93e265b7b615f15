//! Fuel grades and their densities.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{closest_matches, Error, Result};

/// A fuel grade with its density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelGrade {
    pub name: String,
    pub title: String,
    /// Density in kg per litre.
    pub density: f64,
}

#[derive(Debug, Deserialize)]
struct FuelRecord {
    title: String,
    density: f64,
}

/// Fuel grades keyed by name, loaded from `fuels.json`.
#[derive(Debug, Clone, Default)]
pub struct FuelTable {
    grades: HashMap<String, FuelGrade>,
    source: Option<PathBuf>,
}

impl FuelTable {
    /// Load the fuel table from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let mut table = Self::from_reader(file)?;
        table.source = Some(path.to_path_buf());
        info!(
            path = %path.display(),
            grades = table.len(),
            "loaded fuel table"
        );
        Ok(table)
    }

    /// Load the fuel table from a reader holding a JSON object keyed by grade name.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let records: BTreeMap<String, FuelRecord> = serde_json::from_reader(reader)?;
        Self::from_grades(records.into_iter().map(|(name, record)| FuelGrade {
            name,
            title: record.title,
            density: record.density,
        }))
    }

    /// Build a table from already-parsed grades.
    ///
    /// # Errors
    /// Returns [`Error::FuelDataValidation`] for a non-positive density or a
    /// name that collides with another grade once case is ignored.
    pub fn from_grades<I>(grades: I) -> Result<Self>
    where
        I: IntoIterator<Item = FuelGrade>,
    {
        let mut table = HashMap::new();
        for mut grade in grades {
            grade.name = grade.name.trim().to_string();
            if grade.name.is_empty() {
                return Err(Error::FuelDataValidation {
                    name: grade.name,
                    message: "grade name must not be empty".to_string(),
                });
            }
            if !grade.density.is_finite() || grade.density <= 0.0 {
                return Err(Error::FuelDataValidation {
                    name: grade.name,
                    message: format!(
                        "density must be a finite positive number, got {}",
                        grade.density
                    ),
                });
            }
            let key = normalize_grade(&grade.name);
            if table.contains_key(&key) {
                return Err(Error::FuelDataValidation {
                    name: grade.name,
                    message: "grade is defined twice".to_string(),
                });
            }
            table.insert(key, grade);
        }
        Ok(Self {
            grades: table,
            source: None,
        })
    }

    /// Get a fuel grade by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&FuelGrade> {
        self.grades.get(&normalize_grade(name))
    }

    /// Get a fuel grade by name, suggesting close names when it is unknown.
    pub fn require(&self, name: &str) -> Result<&FuelGrade> {
        self.get(name).ok_or_else(|| Error::UnknownFuel {
            name: name.to_string(),
            suggestions: closest_matches(name, self.grades.values().map(|g| g.name.as_str()), 3),
        })
    }

    /// Sorted list of grade names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.grades.values().map(|g| g.name.clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.grades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }

    /// Get the source path if the table was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

fn normalize_grade(name: &str) -> String {
    name.trim().to_uppercase()
}
