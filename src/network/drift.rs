//! Deterministic drift of the rate network
//!
//!   f(x) = c - x + W·tanh(x)
//!
//! Its Jacobian is
//!
//!   J(x) = -I + W·diag(sech²(x))
//!
//! Fixed points of the noiseless dynamics are exactly the roots of f.

use ndarray::{Array1, Array2, ArrayView1};
use super::check_weight_matrix;
use crate::error::Result;

/// Drift function of a rate network with constant input
#[derive(Debug, Clone)]
pub struct NetworkDrift<'a> {
    weights: &'a Array2<f64>,
    input_const: f64,
}

impl<'a> NetworkDrift<'a> {
    /// Wrap a validated weight matrix
    pub fn new(weights: &'a Array2<f64>, input_const: f64) -> Result<Self> {
        check_weight_matrix(weights)?;
        Ok(Self::from_validated(weights, input_const))
    }

    /// Wrap a weight matrix already known to be square and non-empty
    pub(crate) fn from_validated(weights: &'a Array2<f64>, input_const: f64) -> Self {
        Self { weights, input_const }
    }

    /// Number of units
    pub fn n_units(&self) -> usize {
        self.weights.nrows()
    }

    /// Constant input c
    pub fn input_const(&self) -> f64 {
        self.input_const
    }

    /// Evaluate f(x)
    pub fn evaluate(&self, x: ArrayView1<f64>) -> Array1<f64> {
        let activation = x.mapv(f64::tanh);
        let recurrent = self.weights.dot(&activation);
        recurrent - &x + self.input_const
    }

    /// Analytic Jacobian J(x) = -I + W·diag(sech²(x))
    pub fn jacobian(&self, x: ArrayView1<f64>) -> Array2<f64> {
        let n = self.n_units();
        let sech2 = x.mapv(|v| {
            let t = v.tanh();
            1.0 - t * t
        });
        Array2::from_shape_fn((n, n), |(i, j)| {
            let diag = if i == j { -1.0 } else { 0.0 };
            diag + self.weights[[i, j]] * sech2[j]
        })
    }

    /// Max-norm of the drift, i.e. how far x is from being a fixed point
    pub fn residual(&self, x: ArrayView1<f64>) -> f64 {
        self.evaluate(x).iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }
}
