//! Dynamics Module: Stochastic Simulation of Rate Networks
//!
//! - **RateNetwork**: stateful system stepped with Euler–Maruyama
//! - **simulate**: run a network over a time grid and record a
//!   labeled [`Trajectory`]
//!
//! Randomness is always supplied by the caller, either as an owned
//! generator inside a [`RateNetwork`] or as `&mut R` to [`simulate`].

mod traits;
mod rate_network;
mod simulate;
mod trajectory;

pub use traits::{DynamicalSystem, Controllable};
pub use rate_network::{RateNetwork, RateNetworkState, SimulationConfig};
pub use simulate::simulate;
pub use trajectory::Trajectory;
