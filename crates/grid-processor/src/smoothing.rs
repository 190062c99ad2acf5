//! Separable Gaussian smoothing of a gridded field.
//!
//! The kernel is truncated at four standard deviations and borders are
//! handled by half-sample reflection (`d c b a | a b c d | d c b a`), so the
//! output has the same shape as the input and a constant field is unchanged.

use tracing::trace;

use crate::error::{GridProcessorError, Result};
use crate::types::GridValues;

/// Kernel half-width in standard deviations.
const TRUNCATE: f64 = 4.0;

/// Smooth `values` with an isotropic Gaussian of standard deviation `sigma`
/// (in grid cells). `sigma == 0` returns the input unchanged.
pub fn smooth(values: &GridValues, sigma: f64) -> Result<GridValues> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(GridProcessorError::InvalidSigma(sigma));
    }
    if sigma == 0.0 || values.is_empty() {
        return Ok(values.clone());
    }

    let kernel = gaussian_kernel(sigma);
    trace!(sigma, radius = kernel.len() / 2, "Applying Gaussian smoothing");

    let (rows, cols) = values.shape();

    // Along rows (x direction).
    let mut horizontal = GridValues::filled(cols, rows, 0.0);
    let mut line = Vec::with_capacity(cols.max(rows));
    for row in 0..rows {
        line.clear();
        line.extend_from_slice(values.row(row));
        for (col, v) in convolve(&line, &kernel).into_iter().enumerate() {
            horizontal.set(row, col, v);
        }
    }

    // Along columns (y direction).
    let mut out = GridValues::filled(cols, rows, 0.0);
    for col in 0..cols {
        line.clear();
        line.extend((0..rows).map(|row| horizontal.data[row * cols + col]));
        for (row, v) in convolve(&line, &kernel).into_iter().enumerate() {
            out.set(row, col, v);
        }
    }

    Ok(out)
}

/// Normalised 1-D Gaussian weights, radius `floor(TRUNCATE * sigma + 0.5)`.
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (TRUNCATE * sigma + 0.5) as usize;
    let two_var = 2.0 * sigma * sigma;
    let mut weights: Vec<f64> = (0..=2 * radius)
        .map(|i| {
            let x = i as f64 - radius as f64;
            (-x * x / two_var).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights
}

fn convolve(input: &[f64], kernel: &[f64]) -> Vec<f64> {
    let n = input.len() as isize;
    let radius = (kernel.len() / 2) as isize;
    (0..n)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, w)| w * input[reflect(i + k as isize - radius, n)])
                .sum()
        })
        .collect()
}

/// Half-sample symmetric index into `0..n`.
fn reflect(i: isize, n: isize) -> usize {
    let period = 2 * n;
    let m = i.rem_euclid(period);
    (if m < n { m } else { period - 1 - m }) as usize
}
