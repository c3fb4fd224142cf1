//! Rate Network: Noisy Recurrent Firing-Rate Dynamics
//!
//! Each unit carries an activation xᵢ obeying
//!
//!   dxᵢ/dt = c - xᵢ + Σⱼ Wᵢⱼ tanh(xⱼ) + ξᵢ(t)
//!
//! where ξ is uncorrelated Gaussian white noise with variance σ² per
//! unit time. The system is integrated with the explicit Euler–Maruyama
//! scheme:
//!
//!   x(t + dt) = x(t) + dt·f(x(t)) + sqrt(dt·σ²)·η,   η ~ N(0, I)
//!
//! The noise draws are taken per step in unit-index order, so a seeded
//! generator reproduces a run exactly.
//!
//! ## References
//!
//! - Daniels, Flack & Krakauer (2017). Dual coding theory explains
//!   biphasic collective computation in neural decision-making.
//!   Frontiers in Neuroscience 11, 313.

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use super::traits::{Controllable, DynamicalSystem};
use crate::error::{NetworkError, Result};
use crate::network::{check_weight_matrix, NetworkDrift};

/// Integration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Constant input c shared by all units
    pub input_const: f64,
    /// Noise variance σ² per unit time
    pub noise_var: f64,
    /// Final simulation time
    pub t_final: f64,
    /// Integration timestep
    pub deltat: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            input_const: 0.0,
            noise_var: 1.0,
            t_final: 10.0,
            deltat: 1e-3,
        }
    }
}

impl SimulationConfig {
    /// Noiseless configuration with otherwise default parameters
    pub fn deterministic() -> Self {
        Self {
            noise_var: 0.0,
            ..Self::default()
        }
    }

    /// Check parameter domains
    pub fn validate(&self) -> Result<()> {
        if !(self.deltat.is_finite() && self.deltat > 0.0) {
            return Err(NetworkError::InvalidParameter {
                name: "deltat",
                value: self.deltat,
                reason: "timestep must be positive and finite",
            });
        }
        if !(self.t_final.is_finite() && self.t_final >= 0.0) {
            return Err(NetworkError::InvalidParameter {
                name: "t_final",
                value: self.t_final,
                reason: "final time must be non-negative and finite",
            });
        }
        if !(self.noise_var.is_finite() && self.noise_var >= 0.0) {
            return Err(NetworkError::InvalidParameter {
                name: "noise_var",
                value: self.noise_var,
                reason: "noise variance must be non-negative and finite",
            });
        }
        if !self.input_const.is_finite() {
            return Err(NetworkError::InvalidParameter {
                name: "input_const",
                value: self.input_const,
                reason: "input must be finite",
            });
        }
        Ok(())
    }

    /// Number of points on the grid 0, dt, 2dt, ... up to and including t_final
    ///
    /// Matches half-open range semantics with upper bound `t_final + dt`,
    /// so floating-point rounding decides whether a point landing just
    /// past `t_final` is kept.
    pub fn n_time_points(&self) -> usize {
        ((self.t_final + self.deltat) / self.deltat).ceil() as usize
    }

    /// The time grid itself, t_k = k·dt
    pub fn time_grid(&self) -> Array1<f64> {
        Array1::from_iter((0..self.n_time_points()).map(|k| k as f64 * self.deltat))
    }
}

/// Snapshot of a rate network
#[derive(Debug, Clone)]
pub struct RateNetworkState {
    /// Unit activations xᵢ
    pub activations: Array1<f64>,
    /// Constant input c
    pub input_const: f64,
    /// Simulation time
    pub time: f64,
}

/// Recurrent rate network integrated with Euler–Maruyama
pub struct RateNetwork<R: Rng = StdRng> {
    /// Number of units
    n_units: usize,
    /// Synaptic weights, W[i, j] from unit j onto unit i
    weights: Array2<f64>,
    /// Current activations
    x: Array1<f64>,
    /// Constant input (control parameter)
    input_const: f64,
    /// Noise variance per unit time
    noise_var: f64,
    /// Integration timestep
    dt: f64,
    /// Steps taken so far
    steps: usize,
    /// Noise source
    rng: R,
}

impl RateNetwork<StdRng> {
    /// Create a network starting at rest, with noise seeded from OS entropy
    pub fn new(weights: Array2<f64>, config: &SimulationConfig) -> Result<Self> {
        Self::with_rng(weights, config, None, StdRng::from_os_rng())
    }

    /// Create a network with a reproducible noise sequence
    pub fn seeded(weights: Array2<f64>, config: &SimulationConfig, seed: u64) -> Result<Self> {
        Self::with_rng(weights, config, None, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RateNetwork<R> {
    /// Create a network with an explicit noise source and optional initial state
    ///
    /// The initial state defaults to all zeros.
    pub fn with_rng(
        weights: Array2<f64>,
        config: &SimulationConfig,
        initial_state: Option<&Array1<f64>>,
        rng: R,
    ) -> Result<Self> {
        let n_units = check_weight_matrix(&weights)?;
        config.validate()?;

        let x = match initial_state {
            Some(state) if state.len() != n_units => {
                return Err(NetworkError::Shape {
                    what: "initial state",
                    expected: n_units,
                    found: state.len(),
                });
            }
            Some(state) => state.clone(),
            None => Array1::zeros(n_units),
        };

        Ok(Self {
            n_units,
            weights,
            x,
            input_const: config.input_const,
            noise_var: config.noise_var,
            dt: config.deltat,
            steps: 0,
            rng,
        })
    }

    /// Drift of the noiseless dynamics for the current weights and input
    fn network_drift(&self) -> NetworkDrift<'_> {
        NetworkDrift::from_validated(&self.weights, self.input_const)
    }

    /// Euler–Maruyama step
    fn euler_maruyama_step(&mut self) {
        let deterministic = self.network_drift().evaluate(self.x.view()) * self.dt;
        self.x += &deterministic;

        if self.noise_var > 0.0 {
            let scale = (self.dt * self.noise_var).sqrt();
            for i in 0..self.n_units {
                let eta: f64 = self.rng.sample(StandardNormal);
                self.x[i] += scale * eta;
            }
        }

        self.steps += 1;
    }

    /// Current activations
    pub fn activations(&self) -> &Array1<f64> {
        &self.x
    }

    /// Current simulation time
    pub fn time(&self) -> f64 {
        self.steps as f64 * self.dt
    }

    /// Weight matrix
    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Set noise variance
    pub fn set_noise_var(&mut self, noise_var: f64) -> Result<()> {
        if !(noise_var.is_finite() && noise_var >= 0.0) {
            return Err(NetworkError::InvalidParameter {
                name: "noise_var",
                value: noise_var,
                reason: "noise variance must be non-negative and finite",
            });
        }
        self.noise_var = noise_var;
        Ok(())
    }

    /// Distance of the current state from equilibrium (max-norm of the drift)
    pub fn residual(&self) -> f64 {
        self.network_drift().residual(self.x.view())
    }
}

impl<R: Rng> DynamicalSystem for RateNetwork<R> {
    type State = RateNetworkState;

    fn step(&mut self) {
        self.euler_maruyama_step();
    }

    fn state(&self) -> RateNetworkState {
        RateNetworkState {
            activations: self.x.clone(),
            input_const: self.input_const,
            time: self.time(),
        }
    }

    fn n_elements(&self) -> usize {
        self.n_units
    }

    /// Mean activation across units
    fn order_parameter(&self) -> f64 {
        self.x.mean().unwrap_or(0.0)
    }
}

impl<R: Rng> Controllable for RateNetwork<R> {
    type Parameter = f64;

    fn set_parameter(&mut self, param: f64) {
        self.input_const = param;
    }

    fn get_parameter(&self) -> f64 {
        self.input_const
    }

    fn ramp_parameter(&mut self, target: f64, rate: f64, steps_per_increment: usize) {
        let rate = rate.abs();
        if !(rate.is_finite() && rate > 0.0) {
            self.input_const = target;
            return;
        }
        while (self.input_const - target).abs() > rate {
            self.run(steps_per_increment);
            if self.input_const < target {
                self.input_const += rate;
            } else {
                self.input_const -= rate;
            }
        }
        self.input_const = target;
    }
}
