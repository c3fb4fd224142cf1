//! # rate-network-dynamics
//!
//! Stochastic simulation and equilibrium analysis of recurrent
//! firing-rate networks.
//!
//! ## Model
//!
//! A network of N units with activations xᵢ and synaptic weights Wᵢⱼ
//! (from unit j onto unit i) obeys
//!
//!   dxᵢ/dt = c - xᵢ + Σⱼ Wᵢⱼ tanh(xⱼ) + ξᵢ(t)
//!
//! with constant input c and Gaussian white noise ξ of variance σ² per
//! unit time.
//!
//! ## Components
//!
//! 1. **Dynamics**: Euler–Maruyama integration producing a labeled
//!    trajectory ([`simulate`], [`RateNetwork`])
//!
//! 2. **Fixed points**: root finding on the noiseless drift from a
//!    battery of starting states, with rounding-based deduplication
//!    ([`find_fixed_points`])
//!
//! 3. **Landau density**: a normalized bistable 1D density over an
//!    equally spaced grid ([`landau_pdf`])
//!
//! ## Reproducibility
//!
//! No global random state is used. Noise comes from a caller-supplied
//! generator; seed it (`StdRng::seed_from_u64`) for reproducible runs.
//! The fixed-point scan is deterministic.
//!
//! ## References
//!
//! - Daniels, Flack & Krakauer (2017). Dual coding theory explains
//!   biphasic collective computation in neural decision-making.
//!   Frontiers in Neuroscience 11, 313.

pub mod error;
pub mod network;
pub mod dynamics;
pub mod fixed_points;
pub mod landau;

pub use error::{NetworkError, Result};

// Re-exports from network
pub use network::{
    all_to_all_network_adjacency,
    check_weight_matrix,
    mean_column_sum,
    unit_labels,
    NetworkDrift,
};

// Re-exports from dynamics
pub use dynamics::{
    // Traits
    DynamicalSystem,
    Controllable,
    // Simulation
    simulate,
    RateNetwork,
    RateNetworkState,
    SimulationConfig,
    Trajectory,
};

// Re-exports from fixed_points
pub use fixed_points::{
    find_fixed_point,
    find_fixed_points,
    starting_points,
    BroydenSolver,
    FixedPoint,
    FixedPointConfig,
    FixedPointSet,
    NewtonSolver,
    ResidualFn,
    RootSolution,
    RootSolver,
};

// Re-exports from landau
pub use landau::{landau_log_density, landau_pdf};
