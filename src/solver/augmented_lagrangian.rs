//! Augmented-Lagrangian backend for box-bounded, equality-constrained
//! nonlinear programs.
//!
//! Outer loop: classic multiplier/penalty updates. Inner loop: spectral
//! projected gradient (Barzilai-Borwein step, Armijo backtracking along the
//! projection arc), which handles the box bounds natively. Gradients of the
//! augmented Lagrangian are approximated by central differences; the
//! objective and constraint records stay black boxes.

use finitediff::FiniteDiff;
use tracing::debug;

use super::{Bound, NlpBackend, NlpProblem, SolverConfig, SolverResult};

const ARMIJO_SIGMA: f64 = 1e-4;
const MAX_BACKTRACKS: usize = 40;
const PENALTY_GROWTH: f64 = 10.0;
const MAX_PENALTY: f64 = 1e8;
// Constraint violation must shrink by this factor before multipliers are
// trusted; otherwise the penalty is raised instead.
const SUFFICIENT_DECREASE: f64 = 0.25;

#[derive(Debug, Default)]
pub struct AugmentedLagrangian;

impl AugmentedLagrangian {
    pub fn new() -> Self {
        Self
    }

    fn project(bounds: &[Bound], x: &[f64]) -> Vec<f64> {
        x.iter()
            .zip(bounds)
            .map(|(v, b)| b.clamp(*v))
            .collect()
    }

    fn project_step(bounds: &[Bound], x: &[f64], grad: &[f64], t: f64) -> Vec<f64> {
        x.iter()
            .zip(grad)
            .zip(bounds)
            .map(|((v, g), b)| b.clamp(v - t * g))
            .collect()
    }

    /// Infinity norm of `x - P(x - grad)`, zero exactly at a stationary
    /// point of the box-constrained subproblem.
    fn projected_gradient_norm(bounds: &[Bound], x: &[f64], grad: &[f64]) -> f64 {
        Self::project_step(bounds, x, grad, 1.0)
            .iter()
            .zip(x)
            .fold(0.0f64, |acc, (p, v)| acc.max((v - p).abs()))
    }

    fn augmented_value(problem: &NlpProblem, lambda: &[f64], mu: f64, x: &[f64]) -> f64 {
        let mut value = problem.objective.evaluate(x);
        for (c, l) in problem.residuals(x).iter().zip(lambda) {
            value += l * c + 0.5 * mu * c * c;
        }
        value
    }

    /// Minimize the augmented Lagrangian over the box for fixed multipliers
    /// and penalty. Returns the iterate, iterations spent, and the final
    /// projected-gradient norm.
    fn minimize_subproblem(
        problem: &NlpProblem,
        lambda: &[f64],
        mu: f64,
        start: Vec<f64>,
        config: &SolverConfig,
    ) -> (Vec<f64>, usize, f64) {
        let bounds = &problem.bounds;
        let al = |x: &Vec<f64>| Self::augmented_value(problem, lambda, mu, x);

        let mut x = Self::project(bounds, &start);
        let mut f_x = al(&x);
        let mut grad = x.central_diff(&al);
        let grad_scale = grad.iter().fold(1.0f64, |acc, g| acc.max(g.abs()));
        let mut step = 1.0 / grad_scale;
        let mut pg_norm = Self::projected_gradient_norm(bounds, &x, &grad);
        let mut iterations = 0;

        while iterations < config.max_inner_iterations && pg_norm > config.tolerance {
            iterations += 1;

            // Armijo backtracking along the projection arc
            let mut t = step;
            let mut x_new = Self::project_step(bounds, &x, &grad, t);
            let mut f_new = al(&x_new);
            for _ in 0..MAX_BACKTRACKS {
                let directional: f64 = grad
                    .iter()
                    .zip(x_new.iter().zip(&x))
                    .map(|(g, (xn, xo))| g * (xn - xo))
                    .sum();
                if f_new <= f_x + ARMIJO_SIGMA * directional {
                    break;
                }
                t *= 0.5;
                x_new = Self::project_step(bounds, &x, &grad, t);
                f_new = al(&x_new);
            }

            let grad_new = x_new.central_diff(&al);

            // Barzilai-Borwein spectral step for the next iteration
            let mut ss = 0.0;
            let mut sy = 0.0;
            for ((xn, xo), (gn, go)) in x_new.iter().zip(&x).zip(grad_new.iter().zip(&grad)) {
                let s = xn - xo;
                ss += s * s;
                sy += s * (gn - go);
            }
            step = if sy > 1e-12 {
                (ss / sy).clamp(1e-10, 1e10)
            } else {
                1.0 / grad_scale
            };

            x = x_new;
            f_x = f_new;
            grad = grad_new;
            pg_norm = Self::projected_gradient_norm(bounds, &x, &grad);
        }

        (x, iterations, pg_norm)
    }
}

impl NlpBackend for AugmentedLagrangian {
    fn id(&self) -> &'static str {
        "augmented-lagrangian"
    }

    fn minimize(&self, problem: &NlpProblem, config: &SolverConfig) -> SolverResult {
        let mut x = Self::project(&problem.bounds, &problem.initial_guess);
        let mut lambda = vec![0.0; problem.residuals(&x).len()];
        let mut mu = config.initial_penalty;
        let mut best_violation = f64::INFINITY;
        let mut total_iterations = 0;
        let mut violation = f64::INFINITY;
        let mut success = false;
        let mut outer_steps = 0;

        for outer in 0..config.max_outer_iterations {
            outer_steps = outer + 1;
            let (x_next, iterations, pg_norm) =
                Self::minimize_subproblem(problem, &lambda, mu, x, config);
            x = x_next;
            total_iterations += iterations;

            let residuals = problem.residuals(&x);
            violation = residuals.iter().fold(0.0f64, |acc, c| acc.max(c.abs()));
            debug!(outer, mu, pg_norm, violation, "outer step");

            if violation <= config.constraint_tolerance && pg_norm <= 10.0 * config.tolerance {
                success = true;
                break;
            }

            if violation <= SUFFICIENT_DECREASE * best_violation {
                // First-order multiplier estimate
                for (l, c) in lambda.iter_mut().zip(&residuals) {
                    *l += mu * c;
                }
                best_violation = violation;
            } else {
                mu = (mu * PENALTY_GROWTH).min(MAX_PENALTY);
            }
        }

        let objective = problem.objective.evaluate(&x);
        let message = if success {
            format!(
                "converged after {} outer steps, {} iterations",
                outer_steps, total_iterations
            )
        } else {
            format!(
                "terminated after {} outer steps without satisfying constraints \
                 (max violation {:.3e})",
                outer_steps, violation
            )
        };

        SolverResult {
            x,
            objective,
            success,
            iterations: total_iterations,
            max_constraint_violation: violation,
            message,
        }
    }
}
