//! Operations, runway surfaces and their fixed correction factors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Headwind components of the distance table columns, in knots.
pub const HEADWINDS_KT: [u32; 4] = [0, 10, 20, 30];

/// Phase of flight a distance is predicted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Takeoff,
    Landing,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::Takeoff, Operation::Landing];

    /// Distance factors for each column of [`HEADWINDS_KT`].
    pub fn headwind_factors(self) -> [f64; 4] {
        match self {
            Operation::Takeoff => [1.0, 0.85, 0.65, 0.55],
            Operation::Landing => [1.0, 0.78, 0.63, 0.52],
        }
    }

    /// Suffix of the handbook table file name.
    pub fn file_suffix(self) -> &'static str {
        match self {
            Operation::Takeoff => "takeoff",
            Operation::Landing => "landing",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_suffix())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "takeoff" | "take-off" | "take_off" => Ok(Operation::Takeoff),
            "landing" => Ok(Operation::Landing),
            _ => Err(Error::UnknownOperation {
                name: s.to_string(),
            }),
        }
    }
}

/// Runway condition, each scaling the dry hard-runway distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunwaySurface {
    Dry,
    Grass,
    Wet,
    WetGrass,
    /// 2% upslope.
    Upslope,
    Contaminated,
    /// Several adverse factors combined.
    Multiple,
}

impl RunwaySurface {
    /// Every surface, in table order.
    pub const ALL: [RunwaySurface; 7] = [
        RunwaySurface::Dry,
        RunwaySurface::Grass,
        RunwaySurface::Wet,
        RunwaySurface::WetGrass,
        RunwaySurface::Upslope,
        RunwaySurface::Contaminated,
        RunwaySurface::Multiple,
    ];

    /// Surfaces returned when a caller does not ask for specific ones.
    pub const DEFAULT_SELECTION: [RunwaySurface; 2] = [RunwaySurface::Dry, RunwaySurface::Grass];

    /// Multiplier relative to the dry hard-runway distance.
    pub fn multiplier(self, operation: Operation) -> f64 {
        match (self, operation) {
            (RunwaySurface::Dry, _) => 1.0,
            (RunwaySurface::Grass, Operation::Takeoff) => 1.2,
            (RunwaySurface::Grass, Operation::Landing) => 1.15,
            (RunwaySurface::Wet, Operation::Takeoff) => 1.0,
            (RunwaySurface::Wet, Operation::Landing) => 1.15,
            (RunwaySurface::WetGrass, Operation::Takeoff) => 1.3,
            (RunwaySurface::WetGrass, Operation::Landing) => 1.35,
            (RunwaySurface::Upslope, _) => 1.1,
            (RunwaySurface::Contaminated, _) => 1.2,
            (RunwaySurface::Multiple, Operation::Takeoff) => 1.33,
            (RunwaySurface::Multiple, Operation::Landing) => 1.43,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunwaySurface::Dry => "dry",
            RunwaySurface::Grass => "grass",
            RunwaySurface::Wet => "wet",
            RunwaySurface::WetGrass => "wet_grass",
            RunwaySurface::Upslope => "upslope",
            RunwaySurface::Contaminated => "contaminated",
            RunwaySurface::Multiple => "multiple",
        }
    }
}

impl fmt::Display for RunwaySurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunwaySurface {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        RunwaySurface::ALL
            .into_iter()
            .find(|surface| surface.as_str() == wanted)
            .ok_or_else(|| Error::UnknownRunwaySurface {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names() {
        assert_eq!("Takeoff".parse::<Operation>().unwrap(), Operation::Takeoff);
        assert_eq!("landing".parse::<Operation>().unwrap(), Operation::Landing);
        assert!("taxi".parse::<Operation>().is_err());

        assert_eq!(
            "wet-grass".parse::<RunwaySurface>().unwrap(),
            RunwaySurface::WetGrass
        );
        assert_eq!(
            "contaminated".parse::<RunwaySurface>().unwrap(),
            RunwaySurface::Contaminated
        );
        assert!(matches!(
            "ice".parse::<RunwaySurface>(),
            Err(Error::UnknownRunwaySurface { .. })
        ));
    }

    #[test]
    fn headwind_factors_never_increase() {
        for operation in Operation::ALL {
            let factors = operation.headwind_factors();
            assert!(factors.windows(2).all(|w| w[1] <= w[0]));
        }
    }

    #[test]
    fn surface_multipliers_match_the_handbook() {
        assert_eq!(RunwaySurface::Grass.multiplier(Operation::Takeoff), 1.2);
        assert_eq!(RunwaySurface::Wet.multiplier(Operation::Landing), 1.15);
        assert_eq!(RunwaySurface::Multiple.multiplier(Operation::Landing), 1.43);
        assert_eq!(RunwaySurface::Dry.to_string(), "dry");
    }
}
