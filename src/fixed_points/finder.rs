//! Fixed-Point Scan of the Noiseless Rate Dynamics
//!
//! Equilibria satisfy
//!
//!   c - x* + W·tanh(x*) = 0
//!
//! and a network may have several. The scan runs a root solver from a
//! battery of uniform starting vectors x₀ = s·(1, …, 1):
//!
//! - **Mean-field mode**: if the mean column sum m of W exceeds 1, the
//!   linearized theory predicts symmetric equilibria near ±2√(m - 1), so
//!   only s ∈ {-x_MF, 0, +x_MF} is tried.
//! - **Grid mode**: otherwise s runs over an evenly spaced grid.
//!
//! Results are rounded to a fixed number of decimals and deduplicated;
//! two equilibria agreeing to that precision are the same fixed point.

use std::cmp::Ordering;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::solver::RootSolver;
use crate::error::{NetworkError, Result};
use crate::network::{check_weight_matrix, mean_column_sum, unit_labels, NetworkDrift};

/// An equilibrium candidate returned by the root solver
#[derive(Debug, Clone, PartialEq)]
pub struct FixedPoint {
    /// Unit activations at the candidate
    pub state: Array1<f64>,
    /// Did the solver reach tolerance?
    pub converged: bool,
    /// Max-norm of the drift at the solver's iterate
    pub residual: f64,
}

/// Scan parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedPointConfig {
    /// Constant input c
    pub input_const: f64,
    /// Use the three mean-field starting points when m > 1
    pub use_mean_field: bool,
    /// Lower end of the starting grid
    pub start_min: f64,
    /// Upper end of the starting grid (inclusive)
    pub start_max: f64,
    /// Number of grid starting points
    pub num_to_test: usize,
    /// Decimal places kept when deciding whether two points coincide
    pub decimals: u32,
    /// Drop trials whose solver did not converge
    pub discard_unconverged: bool,
}

impl Default for FixedPointConfig {
    fn default() -> Self {
        Self {
            input_const: 0.0,
            use_mean_field: true,
            start_min: -10.0,
            start_max: 10.0,
            num_to_test: 100,
            decimals: 5,
            discard_unconverged: false,
        }
    }
}

impl FixedPointConfig {
    /// Grid-only configuration
    pub fn grid(start_min: f64, start_max: f64, num_to_test: usize) -> Self {
        Self {
            use_mean_field: false,
            start_min,
            start_max,
            num_to_test,
            ..Self::default()
        }
    }

    /// Check parameter domains
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("input_const", self.input_const),
            ("start_min", self.start_min),
            ("start_max", self.start_max),
        ] {
            if !value.is_finite() {
                return Err(NetworkError::InvalidParameter {
                    name,
                    value,
                    reason: "must be finite",
                });
            }
        }
        if self.decimals > 15 {
            return Err(NetworkError::InvalidParameter {
                name: "decimals",
                value: self.decimals as f64,
                reason: "rounding beyond 15 decimals exceeds f64 precision",
            });
        }
        Ok(())
    }
}

/// Unique fixed points, one row per equilibrium, in lexicographic row order
#[derive(Debug, Clone)]
pub struct FixedPointSet {
    points: Vec<FixedPoint>,
    labels: Vec<String>,
    decimals: u32,
}

impl FixedPointSet {
    /// Number of distinct fixed points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if no fixed point was found
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fixed points in row order
    pub fn points(&self) -> &[FixedPoint] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &FixedPoint> {
        self.points.iter()
    }

    /// Unit labels in column order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Rounding precision used for deduplication
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Fixed points as a matrix, one row per point
    pub fn states(&self) -> Array2<f64> {
        let mut states = Array2::zeros((self.points.len(), self.labels.len()));
        for (mut row, point) in states.rows_mut().into_iter().zip(&self.points) {
            row.assign(&point.state);
        }
        states
    }

    /// Number of points whose solver converged
    pub fn converged_count(&self) -> usize {
        self.points.iter().filter(|p| p.converged).count()
    }

    /// Is there a fixed point within `tolerance` (max-norm) of `state`?
    pub fn contains(&self, state: &Array1<f64>, tolerance: f64) -> bool {
        self.points.iter().any(|p| {
            p.state.len() == state.len()
                && p.state
                    .iter()
                    .zip(state.iter())
                    .all(|(a, b)| (a - b).abs() <= tolerance)
        })
    }
}

/// Root-find the noiseless drift from one starting state
///
/// Non-convergence is not an error: inspect `converged` and `residual` on
/// the returned point.
pub fn find_fixed_point<S: RootSolver + ?Sized>(
    weights: &Array2<f64>,
    initial_guess: &Array1<f64>,
    input_const: f64,
    solver: &S,
) -> Result<FixedPoint> {
    let drift = NetworkDrift::new(weights, input_const)?;
    if initial_guess.len() != drift.n_units() {
        return Err(NetworkError::Shape {
            what: "initial guess",
            expected: drift.n_units(),
            found: initial_guess.len(),
        });
    }

    let f = |x: &Array1<f64>| drift.evaluate(x.view());
    let solution = solver.solve(&f, initial_guess);

    debug!(
        solver = solver.name(),
        iterations = solution.iterations,
        residual = solution.residual,
        converged = solution.converged,
        "fixed point trial"
    );

    Ok(FixedPoint {
        state: solution.x,
        converged: solution.converged,
        residual: solution.residual,
    })
}

/// Scalar starting values for a scan
///
/// Three mean-field values when enabled and the mean column sum exceeds
/// one, otherwise `num_to_test` evenly spaced values from `start_min` to
/// `start_max` inclusive.
pub fn starting_points(weights: &Array2<f64>, config: &FixedPointConfig) -> Vec<f64> {
    let gain = mean_column_sum(weights);
    if config.use_mean_field && gain > 1.0 {
        let x_mf = 2.0 * (gain - 1.0).sqrt();
        vec![-x_mf, 0.0, x_mf]
    } else {
        evenly_spaced(config.start_min, config.start_max, config.num_to_test)
    }
}

/// `n` values from `start` to `stop`, with both endpoints hit exactly
fn evenly_spaced(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = stop;
            values
        }
    }
}

/// Find all distinguishable fixed points reachable from the starting battery
///
/// Every starting value is broadcast to a uniform vector and handed to
/// [`find_fixed_point`]. Results are rounded to `config.decimals` places,
/// sorted lexicographically and deduplicated, so the output does not
/// depend on trial order.
///
/// # Errors
/// * `NonSquare` if `weights` is not a non-empty square matrix
/// * `InvalidParameter` for non-finite inputs or excessive `decimals`
pub fn find_fixed_points<S: RootSolver + ?Sized>(
    weights: &Array2<f64>,
    config: &FixedPointConfig,
    solver: &S,
) -> Result<FixedPointSet> {
    let n_units = check_weight_matrix(weights)?;
    config.validate()?;

    let starts = starting_points(weights, config);
    let mut candidates = Vec::with_capacity(starts.len());
    let mut unconverged = 0;

    for &start in &starts {
        let guess = Array1::from_elem(n_units, start);
        let point = find_fixed_point(weights, &guess, config.input_const, solver)?;

        if !point.converged {
            unconverged += 1;
            warn!(
                start,
                residual = point.residual,
                "root solver did not converge"
            );
            if config.discard_unconverged {
                continue;
            }
        }
        candidates.push(point);
    }

    let points = deduplicate(candidates, config.decimals);

    info!(
        n_units,
        trials = starts.len(),
        unconverged,
        unique = points.len(),
        "fixed point scan complete"
    );

    Ok(FixedPointSet {
        points,
        labels: unit_labels(n_units),
        decimals: config.decimals,
    })
}

/// Round, sort and merge candidates that coincide to `decimals` places
///
/// A merged point is `converged` if any of its trials converged and keeps
/// the smallest residual.
pub(crate) fn deduplicate(candidates: Vec<FixedPoint>, decimals: u32) -> Vec<FixedPoint> {
    let mut rounded: Vec<FixedPoint> = candidates
        .into_iter()
        .map(|p| FixedPoint {
            state: p.state.mapv(|v| round_to(v, decimals)),
            ..p
        })
        .collect();
    rounded.sort_by(|a, b| compare_rows(&a.state, &b.state));

    let mut unique: Vec<FixedPoint> = Vec::with_capacity(rounded.len());
    for point in rounded {
        match unique.last_mut() {
            Some(last) if compare_rows(&last.state, &point.state) == Ordering::Equal => {
                last.converged |= point.converged;
                last.residual = last.residual.min(point.residual);
            }
            _ => unique.push(point),
        }
    }
    unique
}

/// Round half to even at `decimals` places; -0.0 becomes 0.0
fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round_ties_even() / scale + 0.0
}

fn compare_rows(a: &Array1<f64>, b: &Array1<f64>) -> Ordering {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x.total_cmp(y))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}
