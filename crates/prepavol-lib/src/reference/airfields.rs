//! Airfield directory: elevation, magnetic variation and position by ICAO code.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{closest_matches, Error, Result};

/// Geographic position in signed decimal degrees (south and west negative).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Parse a degrees-minutes-seconds pair such as `43°34'58"N 003°57'47"E`.
    ///
    /// Each component is rounded to five decimal places.
    pub fn from_dms(text: &str) -> std::result::Result<Self, String> {
        let mut parts = text.split_whitespace();
        let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(format!("expected a latitude and a longitude, got '{text}'"));
        };
        let latitude = parse_dms(lat, ['N', 'S'], 90.0)?;
        let longitude = parse_dms(lon, ['E', 'W'], 180.0)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

fn parse_dms(text: &str, hemispheres: [char; 2], limit: f64) -> std::result::Result<f64, String> {
    let malformed = || format!("malformed coordinate '{text}'");

    let hemisphere = text
        .chars()
        .last()
        .map(|c| c.to_ascii_uppercase())
        .ok_or_else(malformed)?;
    if !hemispheres.contains(&hemisphere) {
        return Err(format!(
            "coordinate '{text}' must end with {} or {}",
            hemispheres[0], hemispheres[1]
        ));
    }
    let body = &text[..text.len() - hemisphere.len_utf8()];

    let (degrees, rest) = body.split_once('°').ok_or_else(malformed)?;
    let (minutes, rest) = rest.split_once('\'').ok_or_else(malformed)?;
    let seconds = rest.strip_suffix('"').unwrap_or(rest);

    let number = |s: &str| s.trim().parse::<f64>().map_err(|_| malformed());
    let (degrees, minutes, seconds) = (number(degrees)?, number(minutes)?, number(seconds)?);
    if !(0.0..60.0).contains(&minutes) || !(0.0..60.0).contains(&seconds) {
        return Err(malformed());
    }

    let value = degrees + minutes / 60.0 + seconds / 3600.0;
    if !(0.0..=limit).contains(&value) {
        return Err(format!("coordinate '{text}' is out of range"));
    }
    let rounded = (value * 1e5).round() / 1e5;
    Ok(if hemisphere == hemispheres[1] {
        -rounded
    } else {
        rounded
    })
}

/// One airfield from the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airfield {
    pub code: String,
    pub name: String,
    pub elevation_ft: f64,
    pub threshold_elevation_ft: Option<f64>,
    /// Magnetic variation in degrees, east positive.
    pub magnetic_variation: f64,
    pub position: Option<GeoPoint>,
    pub traffic: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct AirfieldRow {
    code: String,
    name: String,
    elevation_ft: f64,
    threshold_elevation_ft: Option<f64>,
    variation: Option<f64>,
    position: Option<String>,
    #[serde(default)]
    traffic: String,
    #[serde(default)]
    status: String,
}

/// Airfields keyed by ICAO code, loaded from `airfields.csv`.
#[derive(Debug, Clone, Default)]
pub struct AirfieldDirectory {
    airfields: HashMap<String, Airfield>,
    source: Option<PathBuf>,
}

impl AirfieldDirectory {
    /// Load the directory from a CSV file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let mut directory = Self::from_reader(file)?;
        directory.source = Some(path.to_path_buf());
        info!(
            path = %path.display(),
            airfields = directory.len(),
            "loaded airfield directory"
        );
        Ok(directory)
    }

    /// Load the directory from a reader holding comma-separated rows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let mut airfields = HashMap::new();

        // Data rows start on line 2.
        for (index, result) in csv_reader.deserialize::<AirfieldRow>().enumerate() {
            let row = index as u64 + 2;
            let invalid = |message: String| Error::AirfieldDataValidation { row, message };

            let record = result.map_err(|err| invalid(err.to_string()))?;
            let code = record.code.trim().to_uppercase();
            if code.is_empty() {
                return Err(invalid("airfield code must not be empty".to_string()));
            }
            if !record.elevation_ft.is_finite() {
                return Err(invalid(format!("elevation of {code} must be finite")));
            }
            let position = match record.position.as_deref().map(str::trim) {
                Some(text) if !text.is_empty() => {
                    Some(GeoPoint::from_dms(text).map_err(invalid)?)
                }
                _ => None,
            };

            let airfield = Airfield {
                code: code.clone(),
                name: record.name,
                elevation_ft: record.elevation_ft,
                threshold_elevation_ft: record.threshold_elevation_ft,
                magnetic_variation: record.variation.unwrap_or(0.0),
                position,
                traffic: record.traffic,
                status: record.status,
            };
            if airfields.insert(code.clone(), airfield).is_some() {
                return Err(invalid(format!("duplicate airfield code {code}")));
            }
        }

        Ok(Self {
            airfields,
            source: None,
        })
    }

    /// Get an airfield by ICAO code (case-insensitive).
    pub fn get(&self, code: &str) -> Option<&Airfield> {
        self.airfields.get(&code.trim().to_uppercase())
    }

    /// Get an airfield by code, suggesting close codes when it is unknown.
    pub fn require(&self, code: &str) -> Result<&Airfield> {
        self.get(code).ok_or_else(|| Error::UnknownAirfield {
            code: code.to_string(),
            suggestions: closest_matches(code, self.airfields.keys().map(String::as_str), 3),
        })
    }

    /// Sorted list of airfield codes.
    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.airfields.keys().cloned().collect();
        codes.sort();
        codes
    }

    pub fn len(&self) -> usize {
        self.airfields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airfields.is_empty()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const CSV: &str = "code,name,elevation_ft,threshold_elevation_ft,variation,position,traffic,status\n\
LFMT,MONTPELLIER MEDITERRANEE,17,15,2,\"43°34'58\"\"N 003°57'47\"\"E\",IFR-VFR,CAP\n\
LFCM,MILLAU LARZAC,2606,,1,,VFR,CAP\n";

    #[test]
    fn parses_dms_positions() {
        let point = GeoPoint::from_dms("43°34'58\"N 003°57'47\"E").unwrap();
        assert!((point.latitude - 43.58278).abs() < 1e-9);
        assert!((point.longitude - 3.96306).abs() < 1e-9);

        let point = GeoPoint::from_dms("33°56'33\"S 151°10'38\"W").unwrap();
        assert!(point.latitude < 0.0);
        assert!((point.longitude + 151.17722).abs() < 1e-9);
    }

    #[test]
    fn rejects_malformed_positions() {
        assert!(GeoPoint::from_dms("43°34'58\"N").is_err());
        assert!(GeoPoint::from_dms("43°34'58\"E 003°57'47\"N").is_err());
        assert!(GeoPoint::from_dms("43°74'58\"N 003°57'47\"E").is_err());
        assert!(GeoPoint::from_dms("north east").is_err());
    }

    #[test]
    fn loads_rows_with_optional_columns() {
        let directory = AirfieldDirectory::from_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(directory.codes(), vec!["LFCM", "LFMT"]);

        let lfmt = directory.get("lfmt").unwrap();
        assert_eq!(lfmt.elevation_ft, 17.0);
        assert_eq!(lfmt.threshold_elevation_ft, Some(15.0));
        assert!(lfmt.position.is_some());

        let lfcm = directory.require("LFCM").unwrap();
        assert_eq!(lfcm.threshold_elevation_ft, None);
        assert_eq!(lfcm.position, None);
    }

    #[test]
    fn malformed_row_reports_its_line() {
        let csv = "code,name,elevation_ft,threshold_elevation_ft,variation,position,traffic,status\n\
LFMT,X,17,15,2,\"garbage\",VFR,CAP\n";
        let err = AirfieldDirectory::from_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, Error::AirfieldDataValidation { row: 2, .. }), "{err}");
    }

    #[test]
    fn unknown_code_suggests_alternatives() {
        let directory = AirfieldDirectory::from_reader(Cursor::new(CSV)).unwrap();
        let err = directory.require("LFMX").unwrap_err();
        assert!(err.to_string().contains("LFMT"), "{err}");
    }
}
