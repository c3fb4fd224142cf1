//! Network Module: Coupling Matrices and Deterministic Drift
//!
//! A recurrent rate network of N units is described by an N×N weight
//! matrix W, where W[i, j] is the synaptic strength from unit j onto
//! unit i. The noiseless dynamics are
//!
//!   dx/dt = c - x + W·tanh(x)
//!
//! and this module provides the pieces shared by the simulator and the
//! fixed-point finder:
//!
//! - **Adjacency**: canonical test networks (all-to-all coupling)
//! - **Drift**: the right-hand side above and its Jacobian
//! - **Validation**: square-matrix checks and unit labelling

mod adjacency;
mod drift;

pub use adjacency::all_to_all_network_adjacency;
pub use drift::NetworkDrift;

use ndarray::Array2;
use crate::error::{NetworkError, Result};

/// Check that a weight matrix is square and non-empty, returning N
pub fn check_weight_matrix(weights: &Array2<f64>) -> Result<usize> {
    let (rows, cols) = weights.dim();
    if rows != cols || rows == 0 {
        return Err(NetworkError::NonSquare { rows, cols });
    }
    Ok(rows)
}

/// Column labels "Neuron 0" .. "Neuron N-1", in weight-matrix column order
pub fn unit_labels(n_units: usize) -> Vec<String> {
    (0..n_units).map(|i| format!("Neuron {}", i)).collect()
}

/// Mean over columns of the column sums of W
///
/// This is the effective mean-field gain of the network: the total input
/// a unit receives when every unit sits at tanh(x) = 1.
pub fn mean_column_sum(weights: &Array2<f64>) -> f64 {
    let n = weights.ncols();
    if n == 0 {
        return 0.0;
    }
    weights.sum_axis(ndarray::Axis(0)).sum() / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_check_square() {
        let w = Array2::<f64>::zeros((3, 3));
        assert_eq!(check_weight_matrix(&w), Ok(3));
    }

    #[test]
    fn test_check_non_square() {
        let w = Array2::<f64>::zeros((2, 3));
        let err = check_weight_matrix(&w).unwrap_err();
        assert_eq!(err, NetworkError::NonSquare { rows: 2, cols: 3 });
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_check_empty() {
        let w = Array2::<f64>::zeros((0, 0));
        assert!(check_weight_matrix(&w).is_err());
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(unit_labels(3), vec!["Neuron 0", "Neuron 1", "Neuron 2"]);
        assert!(unit_labels(0).is_empty());
    }

    #[test]
    fn test_mean_column_sum() {
        let w = array![[0.0, 2.0], [1.0, 0.0]];
        // column sums are 1 and 2
        assert!((mean_column_sum(&w) - 1.5).abs() < 1e-12);
        assert_eq!(mean_column_sum(&all_to_all_network_adjacency(4)), 3.0);
    }
}
