//! Dynamical System Traits: Standardized Stepping API
//!
//! Systems that advance a state in discrete time steps implement
//! [`DynamicalSystem`]; those with a tunable control parameter also
//! implement [`Controllable`], which gives slow parameter sweeps for
//! hysteresis and bifurcation studies.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    DynamicalSystem Trait                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  + step()              - Advance system by dt               │
//! │  + run(n)              - Run n steps                        │
//! │  + state()             - Snapshot of the current state      │
//! │  + n_elements()        - Number of units                    │
//! │  + order_parameter()   - System-specific summary metric     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

/// Trait for systems advanced by a fixed timestep
pub trait DynamicalSystem {
    /// State type for this system
    type State;

    /// Advance system by one timestep
    fn step(&mut self);

    /// Run multiple timesteps
    fn run(&mut self, n_steps: usize) {
        for _ in 0..n_steps {
            self.step();
        }
    }

    /// Get current state snapshot
    fn state(&self) -> Self::State;

    /// Number of elements (units, oscillators, particles)
    fn n_elements(&self) -> usize;

    /// System-specific order parameter
    fn order_parameter(&self) -> f64;
}

/// Trait for systems with controllable parameters
pub trait Controllable {
    /// Parameter type (input current, coupling, temperature, ...)
    type Parameter;

    /// Set control parameter
    fn set_parameter(&mut self, param: Self::Parameter);

    /// Get current parameter value
    fn get_parameter(&self) -> Self::Parameter;

    /// Ramp parameter gradually, running `steps_per_increment` steps
    /// between increments of size `rate`
    fn ramp_parameter(&mut self, target: Self::Parameter, rate: f64, steps_per_increment: usize);
}
