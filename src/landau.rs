//! Landau Distribution: Bistable 1D Density
//!
//! A one-dimensional Landau-type distribution with relative log-density
//!
//!   u(x) = -c/2·(x - μ)² - d/4·(x - μ)⁴
//!
//! For c < 0 and d > 0 the density is bimodal, with wells at
//! x = μ ± sqrt(-c/d). The normalized density over an equally spaced
//! grid is approximated by a Riemann sum:
//!
//!   p(xₖ) = exp(u(xₖ)) / (Σⱼ exp(u(xⱼ)) · Δx)

use ndarray::Array1;
use crate::error::{NetworkError, Result};

/// Tolerance on the difference between first and last grid spacing
pub const GRID_SPACING_TOLERANCE: f64 = 1e-6;

/// Unnormalized log-density u(x)
pub fn landau_log_density(x: f64, mu: f64, c: f64, d: f64) -> f64 {
    let dx = x - mu;
    -c / 2.0 * dx * dx - d / 4.0 * dx.powi(4)
}

/// Normalized density over an equally spaced grid
///
/// The returned values are non-negative and satisfy Σ p·Δx = 1.
///
/// # Errors
/// `InvalidParameter` if the grid has fewer than two points, or its first
/// and last spacings differ by more than [`GRID_SPACING_TOLERANCE`].
pub fn landau_pdf(grid: &Array1<f64>, mu: f64, c: f64, d: f64) -> Result<Array1<f64>> {
    let n = grid.len();
    if n < 2 {
        return Err(NetworkError::InvalidParameter {
            name: "grid",
            value: n as f64,
            reason: "need at least two grid points",
        });
    }

    let spacing = grid[1] - grid[0];
    let last_spacing = grid[n - 1] - grid[n - 2];
    if !((spacing - last_spacing).abs() < GRID_SPACING_TOLERANCE) {
        return Err(NetworkError::InvalidParameter {
            name: "grid",
            value: last_spacing - spacing,
            reason: "grid must be equally spaced",
        });
    }
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(NetworkError::InvalidParameter {
            name: "grid",
            value: spacing,
            reason: "grid must be increasing",
        });
    }

    let log_density = grid.mapv(|x| landau_log_density(x, mu, c, d));
    // Shift by the maximum so exp never overflows; cancels in the ratio
    let peak = log_density.fold(f64::NEG_INFINITY, |acc, &u| acc.max(u));
    let weights = log_density.mapv(|u| (u - peak).exp());
    let z = weights.sum();

    Ok(weights / (z * spacing))
}
