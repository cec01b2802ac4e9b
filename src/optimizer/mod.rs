//! Dispatch Optimizer
//!
//! Strict per-solve pipeline: build the problem, hand objective and
//! constraints to the solver backend, extract the schedule. Each call
//! constructs everything fresh; nothing is shared between calls.

pub mod constraints;
pub mod extract;
pub mod objective;
pub mod problem;

pub use problem::{build_problem, DecisionLayout, DispatchProblem};

use tracing::{info, warn};

use crate::domain::battery::{BatteryParameters, CostParameters};
use crate::domain::schedule::DispatchSchedule;
use crate::error::DispatchError;
use crate::solver::{AugmentedLagrangian, NlpBackend, SolverConfig};

/// Optimizer front: a solver backend plus its stopping criteria.
pub struct DispatchOptimizer {
    backend: Box<dyn NlpBackend>,
    config: SolverConfig,
}

impl Default for DispatchOptimizer {
    fn default() -> Self {
        Self {
            backend: Box::new(AugmentedLagrangian::new()),
            config: SolverConfig::default(),
        }
    }
}

impl DispatchOptimizer {
    pub fn new(backend: Box<dyn NlpBackend>, config: SolverConfig) -> Self {
        Self { backend, config }
    }

    /// Compute the optimal dispatch schedule for one price horizon.
    ///
    /// Parameter problems are rejected as [`DispatchError`] before the
    /// solver is touched; solver non-convergence comes back as data in the
    /// schedule's diagnostics.
    pub fn solve(
        &self,
        battery: &BatteryParameters,
        costs: &CostParameters,
        prices: &[f64],
    ) -> Result<DispatchSchedule, DispatchError> {
        let problem = build_problem(battery, costs, prices)?;
        let result = self.backend.minimize(&problem.nlp, &self.config);

        if result.success {
            info!(
                backend = self.backend.id(),
                objective = result.objective,
                iterations = result.iterations,
                "dispatch solve converged"
            );
        } else {
            warn!(
                backend = self.backend.id(),
                max_violation = result.max_constraint_violation,
                message = %result.message,
                "dispatch solve did not converge; returning best-effort schedule"
            );
        }

        Ok(extract::extract_schedule(&problem, result))
    }
}

/// Solve with the default backend and stopping criteria.
pub fn solve(
    battery: &BatteryParameters,
    costs: &CostParameters,
    prices: &[f64],
) -> Result<DispatchSchedule, DispatchError> {
    DispatchOptimizer::default().solve(battery, costs, prices)
}
