//! Fixed Points Module: Equilibria of the Noiseless Dynamics
//!
//! - **solver**: the [`RootSolver`] capability and its Newton / Broyden
//!   backends
//! - **finder**: single-start root finding and the deduplicated scan
//!   over a battery of starting points

mod solver;
mod finder;

pub use solver::{BroydenSolver, NewtonSolver, ResidualFn, RootSolution, RootSolver};
pub use finder::{
    find_fixed_point,
    find_fixed_points,
    starting_points,
    FixedPoint,
    FixedPointConfig,
    FixedPointSet,
};
