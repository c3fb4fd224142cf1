//! End-to-end properties of simulation, fixed-point scans and the Landau density

use approx::assert_abs_diff_eq;
use ndarray::{array, Array1, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rate_network_dynamics::{
    all_to_all_network_adjacency,
    find_fixed_points,
    landau_pdf,
    simulate,
    BroydenSolver,
    FixedPointConfig,
    NetworkDrift,
    NetworkError,
    NewtonSolver,
    RootSolver,
    SimulationConfig,
};

fn sample_networks() -> Vec<Array2<f64>> {
    vec![
        all_to_all_network_adjacency(1),
        all_to_all_network_adjacency(4),
        array![[0.0, -2.0], [3.0, 0.5]],
        Array2::from_shape_fn((5, 5), |(i, j)| ((i * 7 + j * 3) % 5) as f64 - 2.0),
    ]
}

#[test]
fn noiseless_zero_state_stays_zero() {
    for weights in sample_networks() {
        let config = SimulationConfig { t_final: 2.0, ..SimulationConfig::deterministic() };
        let mut rng = StdRng::seed_from_u64(0);
        let traj = simulate(&weights, &config, None, &mut rng).unwrap();
        assert!(traj.states().iter().all(|&v| v == 0.0));
    }
}

#[test]
fn trajectory_length_and_start() {
    let cases = [(1.0, 0.25, 5), (2.0, 0.5, 5), (0.0, 0.1, 1), (1.0, 1e-3, 1001), (3.0, 1.0, 4)];
    for (t_final, deltat, expected) in cases {
        let weights = all_to_all_network_adjacency(3);
        let config = SimulationConfig { t_final, deltat, ..Default::default() };
        let x0 = array![0.4, -1.0, 2.5];
        let mut rng = StdRng::seed_from_u64(3);
        let traj = simulate(&weights, &config, Some(&x0), &mut rng).unwrap();
        assert_eq!(traj.len(), expected, "t_final = {}, deltat = {}", t_final, deltat);
        assert_eq!(traj.initial_state().unwrap(), x0);
        assert_eq!(traj.times()[0], 0.0);
    }
}

#[test]
fn two_unit_regression_scenarios() {
    let mut rng = StdRng::seed_from_u64(10);

    let w = all_to_all_network_adjacency(2);
    let traj = simulate(&w, &SimulationConfig::default(), None, &mut rng).unwrap();
    assert_eq!(traj.state_at(0.0).unwrap(), array![0.0, 0.0]);

    let zero = Array2::zeros((2, 2));
    let config = SimulationConfig { t_final: 1.0, ..SimulationConfig::deterministic() };
    let traj = simulate(&zero, &config, None, &mut rng).unwrap();
    assert_eq!(traj.state_at(1.0).unwrap(), array![0.0, 0.0]);
}

#[test]
fn all_to_all_adjacency_shape() {
    for n in 1..10 {
        let w = all_to_all_network_adjacency(n);
        assert!(w.diag().iter().all(|&v| v == 0.0));
        assert_eq!(w.sum(), (n * (n - 1)) as f64);
    }
}

#[test]
fn zero_network_fixed_point_is_origin() {
    for n in 1..5 {
        let w = Array2::zeros((n, n));
        let set = find_fixed_points(&w, &FixedPointConfig::default(), &NewtonSolver::default())
            .unwrap();
        assert!(set.contains(&Array1::zeros(n), 0.0));
    }
}

#[test]
fn fixed_points_satisfy_drift() {
    let solvers: [&dyn RootSolver; 2] = [&NewtonSolver::default(), &BroydenSolver::default()];
    for solver in solvers {
        for weights in sample_networks() {
            let config = FixedPointConfig { input_const: 0.2, ..Default::default() };
            let set = find_fixed_points(&weights, &config, solver).unwrap();
            let drift = NetworkDrift::new(&weights, 0.2).unwrap();
            for point in set.iter().filter(|p| p.converged) {
                // Rounding to 5 decimals moves the point by at most 5e-6 per unit
                assert!(drift.residual(point.state.view()) < 1e-4 * weights.ncols() as f64);
            }
        }
    }
}

#[test]
fn repeated_scans_are_identical() {
    for weights in sample_networks() {
        let config = FixedPointConfig::grid(-4.0, 4.0, 25);
        let solver = NewtonSolver::default();
        let first = find_fixed_points(&weights, &config, &solver).unwrap();
        let second = find_fixed_points(&weights, &config, &solver).unwrap();
        assert_eq!(first.states(), second.states());
    }
}

#[test]
fn malformed_inputs_rejected() {
    let mut rng = StdRng::seed_from_u64(0);
    let rect = Array2::zeros((2, 4));
    assert!(simulate(&rect, &SimulationConfig::default(), None, &mut rng)
        .unwrap_err()
        .is_shape_error());
    assert!(find_fixed_points(&rect, &FixedPointConfig::default(), &NewtonSolver::default())
        .unwrap_err()
        .is_shape_error());

    let empty = all_to_all_network_adjacency(0);
    assert!(simulate(&empty, &SimulationConfig::default(), None, &mut rng).is_err());

    let w = all_to_all_network_adjacency(2);
    let config = SimulationConfig { deltat: 0.0, ..Default::default() };
    assert!(matches!(
        simulate(&w, &config, None, &mut rng),
        Err(NetworkError::InvalidParameter { .. })
    ));
}

#[test]
fn landau_density_normalized() {
    for n in [2usize, 3, 50, 1000] {
        let grid = Array1::linspace(-2.5, 4.0, n);
        let spacing = grid[1] - grid[0];
        let p = landau_pdf(&grid, 0.7, -1.5, 0.8).unwrap();
        assert!(p.iter().all(|&v| v >= 0.0));
        assert_abs_diff_eq!(p.sum() * spacing, 1.0, epsilon = 1e-9);
    }
}

#[test]
fn simulation_config_from_json() {
    let config: SimulationConfig = serde_json::from_str(r#"{"noise_var": 0.0, "t_final": 1.0}"#).unwrap();
    assert_eq!(config.deltat, 1e-3);
    assert_eq!(config.input_const, 0.0);
    assert!(config.validate().is_ok());
}
