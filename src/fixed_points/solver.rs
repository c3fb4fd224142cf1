//! Nonlinear Root Solvers
//!
//! Solves f(x) = 0 for f: ℝᴺ → ℝᴺ from a starting guess. Backends share
//! the [`RootSolver`] interface so the fixed-point finder does not depend
//! on any particular method:
//!
//! - [`NewtonSolver`]: damped Newton, Jacobian re-estimated every step
//! - [`BroydenSolver`]: Broyden's "good" rank-one Jacobian updates
//!
//! Both estimate the Jacobian by central differences, solve the Newton
//! system with an LU factorization, globalize with a backtracking line
//! search on ½‖f‖², and report whether the residual dropped below
//! tolerance rather than failing.

use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Residual function handed to a solver
pub type ResidualFn<'a> = dyn Fn(&Array1<f64>) -> Array1<f64> + 'a;

/// Outcome of a root search
#[derive(Debug, Clone)]
pub struct RootSolution {
    /// Final iterate
    pub x: Array1<f64>,
    /// Did the residual reach tolerance?
    pub converged: bool,
    /// Max-norm of f at `x`
    pub residual: f64,
    /// Iterations performed
    pub iterations: usize,
}

/// Capability interface for nonlinear root finding
pub trait RootSolver {
    /// Search for a root of `f` starting at `initial_guess`
    fn solve(&self, f: &ResidualFn<'_>, initial_guess: &Array1<f64>) -> RootSolution;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}

/// Damped Newton iteration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewtonSolver {
    /// Residual max-norm accepted as a root
    pub tolerance: f64,
    /// Relative step size below which iteration stops
    pub step_tolerance: f64,
    /// Iteration cap
    pub max_iterations: usize,
    /// Relative finite-difference step for the Jacobian
    pub fd_step: f64,
}

impl Default for NewtonSolver {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            step_tolerance: 1.49012e-8,
            max_iterations: 200,
            fd_step: 1e-6,
        }
    }
}

impl RootSolver for NewtonSolver {
    fn solve(&self, f: &ResidualFn<'_>, initial_guess: &Array1<f64>) -> RootSolution {
        let mut x = initial_guess.clone();
        let mut fx = f(&x);
        let mut residual = max_norm(&fx);
        let mut iterations = 0;

        while iterations < self.max_iterations && residual > self.tolerance {
            iterations += 1;

            let jac = finite_difference_jacobian(f, &x, &fx, self.fd_step);
            let Some(direction) = solve_linear_system(jac, fx.mapv(|v| -v)) else {
                break;
            };

            let Some((x_new, f_new, step)) = backtrack(f, &x, &fx, &direction) else {
                break;
            };

            x = x_new;
            fx = f_new;
            residual = max_norm(&fx);

            if step <= self.step_tolerance * (1.0 + max_norm(&x)) {
                break;
            }
        }

        RootSolution {
            converged: is_converged(residual, self.tolerance),
            x,
            residual,
            iterations,
        }
    }

    fn name(&self) -> &'static str {
        "newton"
    }
}

/// Quasi-Newton iteration with Broyden's rank-one Jacobian update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BroydenSolver {
    /// Residual max-norm accepted as a root
    pub tolerance: f64,
    /// Relative step size below which iteration stops
    pub step_tolerance: f64,
    /// Iteration cap
    pub max_iterations: usize,
    /// Relative finite-difference step for the initial Jacobian
    pub fd_step: f64,
}

impl Default for BroydenSolver {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            step_tolerance: 1.49012e-8,
            max_iterations: 400,
            fd_step: 1e-6,
        }
    }
}

impl RootSolver for BroydenSolver {
    fn solve(&self, f: &ResidualFn<'_>, initial_guess: &Array1<f64>) -> RootSolution {
        let mut x = initial_guess.clone();
        let mut fx = f(&x);
        let mut residual = max_norm(&fx);
        let mut iterations = 0;

        let mut jac = finite_difference_jacobian(f, &x, &fx, self.fd_step);
        let mut fresh = true;

        while iterations < self.max_iterations && residual > self.tolerance {
            iterations += 1;

            let step = solve_linear_system(jac.clone(), fx.mapv(|v| -v))
                .and_then(|direction| backtrack(f, &x, &fx, &direction));

            let Some((x_new, f_new, step_size)) = step else {
                // A stale secant Jacobian may not give a descent direction
                if fresh {
                    break;
                }
                jac = finite_difference_jacobian(f, &x, &fx, self.fd_step);
                fresh = true;
                continue;
            };

            let s = &x_new - &x;
            let y = &f_new - &fx;
            let ss = s.dot(&s);
            if ss > 0.0 {
                // J ← J + (y - J s) sᵀ / (sᵀ s)
                let correction = (&y - &jac.dot(&s)) / ss;
                for i in 0..jac.nrows() {
                    for j in 0..jac.ncols() {
                        jac[[i, j]] += correction[i] * s[j];
                    }
                }
            }
            fresh = false;

            x = x_new;
            fx = f_new;
            residual = max_norm(&fx);

            if step_size <= self.step_tolerance * (1.0 + max_norm(&x)) {
                break;
            }
        }

        RootSolution {
            converged: is_converged(residual, self.tolerance),
            x,
            residual,
            iterations,
        }
    }

    fn name(&self) -> &'static str {
        "broyden"
    }
}

fn is_converged(residual: f64, tolerance: f64) -> bool {
    residual.is_finite() && residual <= tolerance
}

/// Max-norm, NaN-propagating
fn max_norm(v: &Array1<f64>) -> f64 {
    v.iter().fold(0.0, |acc: f64, x| {
        if x.is_nan() || acc.is_nan() {
            f64::NAN
        } else {
            acc.max(x.abs())
        }
    })
}

/// Central-difference Jacobian of f at x
fn finite_difference_jacobian(
    f: &ResidualFn<'_>,
    x: &Array1<f64>,
    fx: &Array1<f64>,
    rel_step: f64,
) -> Array2<f64> {
    let n = x.len();
    let m = fx.len();
    let mut jac = Array2::zeros((m, n));
    let mut probe = x.clone();

    for j in 0..n {
        let h = rel_step * x[j].abs().max(1.0);
        probe[j] = x[j] + h;
        let f_plus = f(&probe);
        probe[j] = x[j] - h;
        let f_minus = f(&probe);
        probe[j] = x[j];

        let column = (f_plus - f_minus) / (2.0 * h);
        jac.column_mut(j).assign(&column);
    }

    jac
}

/// Backtracking line search along `direction` on φ(x) = ½‖f(x)‖²
///
/// Returns the accepted point, its residual vector, and the max-norm of
/// the step taken. `None` if no step of length ≥ 2⁻³⁰ decreases φ.
fn backtrack(
    f: &ResidualFn<'_>,
    x: &Array1<f64>,
    fx: &Array1<f64>,
    direction: &Array1<f64>,
) -> Option<(Array1<f64>, Array1<f64>, f64)> {
    const ARMIJO: f64 = 1e-4;
    const MAX_HALVINGS: usize = 30;

    let phi0 = 0.5 * fx.dot(fx);
    let dir_norm = max_norm(direction);
    if !dir_norm.is_finite() {
        return None;
    }

    let mut lambda = 1.0;
    for _ in 0..=MAX_HALVINGS {
        let candidate = x + &(direction * lambda);
        let f_candidate = f(&candidate);
        let phi = 0.5 * f_candidate.dot(&f_candidate);

        // Newton direction: φ'(0) = -2φ₀
        if phi.is_finite() && phi <= (1.0 - 2.0 * ARMIJO * lambda) * phi0 {
            return Some((candidate, f_candidate, lambda * dir_norm));
        }
        lambda *= 0.5;
    }

    None
}

/// Solve A x = b through an LU factorization with partial pivoting
///
/// Returns `None` for a singular (or numerically singular) matrix.
pub(crate) fn solve_linear_system(a: Array2<f64>, b: Array1<f64>) -> Option<Array1<f64>> {
    let n = b.len();
    if a.dim() != (n, n) {
        return None;
    }

    let scale = a.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    if !(scale.is_finite() && scale > 0.0) {
        return None;
    }

    let lu = DMatrix::from_fn(n, n, |i, j| a[[i, j]]).lu();
    let singular = scale * 1e-14;
    if lu.u().diagonal().iter().any(|pivot| pivot.abs() <= singular) {
        return None;
    }

    let x = lu.solve(&DVector::from_iterator(n, b.iter().copied()))?;
    Some(Array1::from_iter(x.iter().copied()))
}
