//! Trajectory recording for the rate network
//!
//! Drives a [`RateNetwork`] across the inclusive time grid of a
//! [`SimulationConfig`] and stores every state, starting with the
//! noise-free initial state at t = 0.

use ndarray::{Array1, Array2};
use rand::Rng;
use tracing::debug;

use super::rate_network::{RateNetwork, SimulationConfig};
use super::traits::DynamicalSystem;
use super::trajectory::Trajectory;
use crate::error::Result;
use crate::network::unit_labels;

/// Simulate the noisy rate network and record the full trajectory
///
/// The time grid runs from 0 to `config.t_final` inclusive in steps of
/// `config.deltat`. Row 0 is `initial_state` (zeros when `None`), taken
/// without noise; each later row is one Euler–Maruyama step from the
/// previous one.
///
/// Noise is drawn from `rng`, N standard normals per step in unit order.
/// Pass a seeded generator (e.g. `StdRng::seed_from_u64`) for
/// reproducible output. With `noise_var = 0` the generator is untouched.
///
/// # Errors
/// * `NonSquare` if `weights` is not a non-empty square matrix
/// * `Shape` if `initial_state` does not have one entry per unit
/// * `InvalidParameter` if `deltat <= 0`, `t_final < 0` or `noise_var < 0`
pub fn simulate<R: Rng + ?Sized>(
    weights: &Array2<f64>,
    config: &SimulationConfig,
    initial_state: Option<&Array1<f64>>,
    rng: &mut R,
) -> Result<Trajectory> {
    let mut network = RateNetwork::with_rng(weights.clone(), config, initial_state, rng)?;

    let times = config.time_grid();
    let n_points = times.len();
    let n_units = network.n_elements();

    debug!(
        n_units,
        n_points,
        deltat = config.deltat,
        noise_var = config.noise_var,
        input_const = config.input_const,
        "simulating rate network"
    );

    let mut states = Array2::zeros((n_points, n_units));
    states.row_mut(0).assign(network.activations());
    for k in 1..n_points {
        network.step();
        states.row_mut(k).assign(network.activations());
    }

    Ok(Trajectory::new(times, states, unit_labels(n_units)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::StandardNormal;
    use crate::error::NetworkError;
    use crate::network::all_to_all_network_adjacency;

    #[test]
    fn test_default_run_starts_at_zero() {
        let w = all_to_all_network_adjacency(2);
        let mut rng = StdRng::seed_from_u64(1);
        let traj = simulate(&w, &SimulationConfig::default(), None, &mut rng).unwrap();

        let t0 = traj.state_at(0.0).unwrap();
        assert_eq!(t0[0], 0.0);
        assert_eq!(t0[1], 0.0);
        assert_eq!(traj.labels(), &["Neuron 0", "Neuron 1"]);
    }

    #[test]
    fn test_zero_interactions_zero_noise() {
        let w = array![[0.0, 0.0], [0.0, 0.0]];
        let config = SimulationConfig { t_final: 1.0, ..SimulationConfig::deterministic() };
        let mut rng = StdRng::seed_from_u64(1);
        let traj = simulate(&w, &config, None, &mut rng).unwrap();

        let end = traj.state_at(1.0).unwrap();
        assert_eq!(end[0], 0.0);
        assert_eq!(end[1], 0.0);
        assert_eq!(traj.len(), 1001);
    }

    #[test]
    fn test_length_matches_grid() {
        let w = all_to_all_network_adjacency(3);
        let config = SimulationConfig { t_final: 1.0, deltat: 0.25, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(9);
        let traj = simulate(&w, &config, None, &mut rng).unwrap();

        assert_eq!(traj.len(), 5);
        assert_eq!(traj.times(), &array![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(traj.states().dim(), (5, 3));
    }

    #[test]
    fn test_initial_state_recorded_exactly() {
        let w = all_to_all_network_adjacency(3);
        let x0 = array![0.1, -0.2, 0.3];
        let mut rng = StdRng::seed_from_u64(5);
        let traj = simulate(&w, &SimulationConfig::default(), Some(&x0), &mut rng).unwrap();
        assert_eq!(traj.initial_state().unwrap(), x0);
    }

    #[test]
    fn test_zero_horizon_single_point() {
        let w = all_to_all_network_adjacency(2);
        let config = SimulationConfig { t_final: 0.0, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(5);
        let traj = simulate(&w, &config, None, &mut rng).unwrap();
        assert_eq!(traj.len(), 1);
    }

    #[test]
    fn test_shape_errors() {
        let mut rng = StdRng::seed_from_u64(0);
        let rect = Array2::zeros((2, 3));
        let err = simulate(&rect, &SimulationConfig::default(), None, &mut rng).unwrap_err();
        assert!(err.is_shape_error());

        let w = all_to_all_network_adjacency(2);
        let err = simulate(&w, &SimulationConfig::default(), Some(&array![0.0]), &mut rng)
            .unwrap_err();
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_non_positive_timestep() {
        let mut rng = StdRng::seed_from_u64(0);
        let w = all_to_all_network_adjacency(2);
        let config = SimulationConfig { deltat: -1e-3, ..Default::default() };
        let err = simulate(&w, &config, None, &mut rng).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidParameter { name: "deltat", .. }));
    }

    #[test]
    fn test_noise_draw_order_and_scale() {
        // W = 0, c = 0, x0 = 0: one step leaves exactly sqrt(dt·σ²)·η
        let n = 4;
        let w = Array2::zeros((n, n));
        let config = SimulationConfig { noise_var: 2.0, t_final: 0.01, deltat: 0.01, ..Default::default() };
        let traj = simulate(&w, &config, None, &mut StdRng::seed_from_u64(21)).unwrap();
        assert_eq!(traj.len(), 2);

        let mut reference = StdRng::seed_from_u64(21);
        let scale = (0.01f64 * 2.0).sqrt();
        let expected: Vec<f64> = (0..n)
            .map(|_| scale * reference.sample::<f64, _>(StandardNormal))
            .collect();
        assert_eq!(traj.state(1).unwrap().to_vec(), expected);
    }

    #[test]
    fn test_noiseless_run_draws_nothing() {
        let w = all_to_all_network_adjacency(3);
        let config = SimulationConfig { t_final: 0.1, ..SimulationConfig::deterministic() };
        let mut rng = StdRng::seed_from_u64(8);
        simulate(&w, &config, None, &mut rng).unwrap();

        let next: f64 = rng.sample(StandardNormal);
        let fresh: f64 = StdRng::seed_from_u64(8).sample(StandardNormal);
        assert_eq!(next, fresh);
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let w = all_to_all_network_adjacency(3);
        let config = SimulationConfig { t_final: 0.5, ..Default::default() };
        let a = simulate(&w, &config, None, &mut StdRng::seed_from_u64(11)).unwrap();
        let b = simulate(&w, &config, None, &mut StdRng::seed_from_u64(11)).unwrap();
        let c = simulate(&w, &config, None, &mut StdRng::seed_from_u64(12)).unwrap();
        assert_eq!(a.states(), b.states());
        assert_ne!(a.states(), c.states());
    }
}
