//! Quadratic response surface fitted by least squares.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::error::{Error, Result};

/// Number of regression inputs.
pub const INPUTS: usize = 3;

/// Non-constant monomials of degree at most 2 over three inputs.
pub const FEATURES: usize = 9;

/// Singular values below this fraction of the largest one are treated as zero.
const RELATIVE_RANK_TOLERANCE: f64 = 1e-10;

/// Degree-2 polynomial surface over three inputs.
///
/// Inputs are standardised before expansion so that altitudes in thousands
/// of feet and masses in hundreds of kilograms carry comparable weight. The
/// system is solved by SVD, which yields the minimum-norm solution when the
/// design is rank deficient. A handbook with only two reference masses cannot
/// determine the squared mass term, so its coefficient comes out as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuadraticSurface {
    means: [f64; INPUTS],
    scales: [f64; INPUTS],
    intercept: f64,
    coefficients: [f64; FEATURES],
}

impl QuadraticSurface {
    /// Fit the surface to `targets` observed at `inputs`.
    ///
    /// # Errors
    /// Returns [`Error::RegressionFailed`] when fewer than two observations
    /// are supplied, the slices differ in length, a value is not finite, or
    /// the decomposition cannot be solved.
    pub fn fit(inputs: &[[f64; INPUTS]], targets: &[f64]) -> Result<Self> {
        let failed = |message: String| Error::RegressionFailed { message };

        if inputs.len() != targets.len() {
            return Err(failed(format!(
                "{} input rows but {} targets",
                inputs.len(),
                targets.len()
            )));
        }
        if inputs.len() < 2 {
            return Err(failed(format!(
                "at least 2 observations are required, got {}",
                inputs.len()
            )));
        }
        if inputs.iter().flatten().chain(targets).any(|v| !v.is_finite()) {
            return Err(failed("observations must be finite".to_string()));
        }

        let n = inputs.len() as f64;
        let mut means = [0.0; INPUTS];
        let mut scales = [1.0; INPUTS];
        for column in 0..INPUTS {
            let mean = inputs.iter().map(|row| row[column]).sum::<f64>() / n;
            let variance = inputs
                .iter()
                .map(|row| (row[column] - mean).powi(2))
                .sum::<f64>()
                / n;
            means[column] = mean;
            if variance > 0.0 {
                scales[column] = variance.sqrt();
            }
        }

        let rows: Vec<[f64; FEATURES]> = inputs
            .iter()
            .map(|row| expand(standardise(row, &means, &scales)))
            .collect();

        let mut feature_means = [0.0; FEATURES];
        for (j, mean) in feature_means.iter_mut().enumerate() {
            *mean = rows.iter().map(|row| row[j]).sum::<f64>() / n;
        }
        let target_mean = targets.iter().sum::<f64>() / n;

        // Centring removes the intercept from the system.
        let design = DMatrix::from_fn(rows.len(), FEATURES, |i, j| rows[i][j] - feature_means[j]);
        let observed =
            DVector::from_iterator(targets.len(), targets.iter().map(|y| y - target_mean));

        let svd = design.svd(true, true);
        let largest = svd.singular_values.max();
        let solution = if largest > 0.0 {
            svd.solve(&observed, largest * RELATIVE_RANK_TOLERANCE)
                .map_err(|err| failed(err.to_string()))?
        } else {
            DVector::zeros(FEATURES)
        };

        let mut coefficients = [0.0; FEATURES];
        for (j, coefficient) in coefficients.iter_mut().enumerate() {
            *coefficient = solution[j];
        }
        let intercept = target_mean
            - coefficients
                .iter()
                .zip(&feature_means)
                .map(|(c, m)| c * m)
                .sum::<f64>();

        Ok(Self {
            means,
            scales,
            intercept,
            coefficients,
        })
    }

    /// Evaluate the surface at raw (unstandardised) inputs.
    pub fn evaluate(&self, input: [f64; INPUTS]) -> f64 {
        let features = expand(standardise(&input, &self.means, &self.scales));
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features.iter())
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }

    /// Largest absolute difference between the surface and `targets`.
    pub fn max_residual(&self, inputs: &[[f64; INPUTS]], targets: &[f64]) -> f64 {
        inputs
            .iter()
            .zip(targets)
            .map(|(input, target)| (self.evaluate(*input) - target).abs())
            .fold(0.0, f64::max)
    }
}

fn standardise(
    input: &[f64; INPUTS],
    means: &[f64; INPUTS],
    scales: &[f64; INPUTS],
) -> [f64; INPUTS] {
    [
        (input[0] - means[0]) / scales[0],
        (input[1] - means[1]) / scales[1],
        (input[2] - means[2]) / scales[2],
    ]
}

fn expand([a, b, c]: [f64; INPUTS]) -> [f64; FEATURES] {
    [a, b, c, a * a, a * b, a * c, b * b, b * c, c * c]
}
