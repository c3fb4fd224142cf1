use ndarray::Array2;

/// All-to-all coupling with unit strength and no self-coupling
///
/// Returns the N×N matrix with ones off the diagonal and zeros on it.
/// `n = 0` yields an empty matrix, which the simulator and fixed-point
/// finder reject as malformed.
pub fn all_to_all_network_adjacency(n: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, n), |(i, j)| if i == j { 0.0 } else { 1.0 })
}
