use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the prepavol library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Only structural problems end up here: unknown identifiers, malformed
/// reference data, or inputs that break a precondition. Loadings that are
/// merely outside the aircraft limits are reported through
/// [`crate::loading::Violation`] instead.
#[derive(Debug, Error)]
pub enum Error {
    /// No reference-data directory could be located.
    #[error("reference data not found; searched {}", format_paths(.searched))]
    ReferenceDataMissing { searched: Vec<PathBuf> },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for reference data")]
    ProjectDirsUnavailable,

    /// Raised when a callsign is not part of the fleet catalog.
    #[error("unknown callsign: {callsign}{}", format_suggestions(.suggestions))]
    UnknownCallsign {
        callsign: String,
        suggestions: Vec<String>,
    },

    /// Raised when duplicate callsigns are encountered during catalog load.
    #[error("duplicate callsign encountered: {callsign}")]
    DuplicateCallsign { callsign: String },

    /// Raised when a fleet record fails validation.
    #[error("invalid fleet data for {callsign}: {message}")]
    FleetDataValidation { callsign: String, message: String },

    /// Raised when a centre-of-gravity envelope is not a usable polygon.
    #[error("invalid cg envelope: {message}")]
    InvalidEnvelope { message: String },

    /// Raised when a fuel grade is not part of the fuel table.
    #[error("unknown fuel grade: {name}{}", format_suggestions(.suggestions))]
    UnknownFuel {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when the fuel table contains an unusable entry.
    #[error("invalid fuel data for {name}: {message}")]
    FuelDataValidation { name: String, message: String },

    /// Raised when an airfield code is not part of the airfield directory.
    #[error("unknown airfield: {code}{}", format_suggestions(.suggestions))]
    UnknownAirfield {
        code: String,
        suggestions: Vec<String>,
    },

    /// Raised when an airfield row cannot be parsed.
    #[error("invalid airfield data at row {row}: {message}")]
    AirfieldDataValidation { row: u64, message: String },

    /// Raised when a loading refers to a seat, baggage zone or tank the aircraft does not have.
    #[error("{callsign} has no station named {station}{}", format_suggestions(.suggestions))]
    UnknownStation {
        callsign: String,
        station: String,
        suggestions: Vec<String>,
    },

    /// Raised when a station mass is negative or not a number.
    #[error("invalid mass for station {station}: {value}")]
    InvalidStationMass { station: String, value: f64 },

    /// Raised when a fuel quantity breaks a conversion precondition.
    #[error("invalid fuel quantity: {message}")]
    InvalidFuelQuantity { message: String },

    /// Raised when no handbook table exists for a planetype and operation.
    #[error("no {operation} handbook table for aircraft type {planetype}")]
    MissingHandbookTable { planetype: String, operation: String },

    /// Raised when a handbook table cannot be parsed.
    #[error("invalid handbook table for {planetype}: {message}")]
    InvalidHandbookTable { planetype: String, message: String },

    /// Raised when the performance regression cannot be fitted.
    #[error("performance regression failed: {message}")]
    RegressionFailed { message: String },

    /// Raised when an operation name is neither takeoff nor landing.
    #[error("unknown operation: {name} (expected takeoff or landing)")]
    UnknownOperation { name: String },

    /// Raised when a runway surface name is not recognised.
    #[error("unknown runway surface: {name}")]
    UnknownRunwaySurface { name: String },

    /// Raised when a flight category name is not recognised.
    #[error("unknown flight category: {name}")]
    UnknownFlightCategory { name: String },

    /// Raised when a trip plan cannot be evaluated.
    #[error("invalid trip plan: {message}")]
    InvalidTripPlan { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no candidate locations".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Rank `candidates` by similarity to `query` and keep the closest `limit` names.
///
/// Used to build the "did you mean" hints carried by the lookup errors.
pub(crate) fn closest_matches<'a, I>(query: &str, candidates: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = query.trim().to_lowercase();
    let mut scored: Vec<(f64, &str)> = candidates
        .into_iter()
        .map(|candidate| {
            (
                strsim::jaro_winkler(&query, &candidate.to_lowercase()),
                candidate,
            )
        })
        .filter(|(score, _)| *score >= 0.7)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, name)| name.to_string())
        .collect()
}
