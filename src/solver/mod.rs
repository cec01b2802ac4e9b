//! Constrained nonlinear solver abstraction.
//!
//! The optimizer hands a fully-specified problem (objective record,
//! equality-constraint records, box bounds, initial guess) to a backend
//! behind [`NlpBackend`], so alternate QP/SQP implementations can be
//! substituted without touching problem construction or result extraction.

pub mod augmented_lagrangian;

pub use augmented_lagrangian::AugmentedLagrangian;

/// Scalar objective evaluated on the full decision vector.
///
/// Implementations are plain records carrying their own constants; the
/// solver treats them as black boxes and differentiates numerically.
pub trait Objective: Send + Sync {
    fn evaluate(&self, x: &[f64]) -> f64;
}

/// Equality constraint: a residual vector that must equal zero at any
/// feasible point.
pub trait EqualityConstraint: Send + Sync {
    /// Short identifier used in logs and diagnostics.
    fn label(&self) -> &'static str;

    /// Residual of this constraint at `x`.
    fn residual(&self, x: &[f64]) -> Vec<f64>;
}

/// Inclusive per-variable interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub lower: f64,
    pub upper: f64,
}

impl Bound {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }
}

/// A box-bounded, equality-constrained minimization problem.
pub struct NlpProblem {
    pub objective: Box<dyn Objective>,
    pub constraints: Vec<Box<dyn EqualityConstraint>>,
    pub bounds: Vec<Bound>,
    pub initial_guess: Vec<f64>,
}

impl NlpProblem {
    /// Number of decision variables.
    pub fn dimension(&self) -> usize {
        self.initial_guess.len()
    }

    /// Concatenated residual of every equality constraint at `x`.
    pub fn residuals(&self, x: &[f64]) -> Vec<f64> {
        let mut out = Vec::new();
        for constraint in &self.constraints {
            out.extend(constraint.residual(x));
        }
        out
    }
}

/// Stopping criteria passed to backend solvers.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Iteration cap for each inner (projected-gradient) minimization
    pub max_inner_iterations: usize,
    /// Cap on outer multiplier/penalty updates
    pub max_outer_iterations: usize,
    /// Projected-gradient norm below which the inner loop is stationary
    pub tolerance: f64,
    /// Largest equality residual accepted as feasible
    pub constraint_tolerance: f64,
    /// Initial quadratic-penalty weight
    pub initial_penalty: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_inner_iterations: 800,
            max_outer_iterations: 60,
            tolerance: 1e-6,
            constraint_tolerance: 1e-6,
            initial_penalty: 10.0,
        }
    }
}

/// What a backend hands back. Non-convergence is data, not an error:
/// the (possibly infeasible) point is returned alongside the flag.
#[derive(Debug, Clone)]
pub struct SolverResult {
    pub x: Vec<f64>,
    pub objective: f64,
    pub success: bool,
    pub iterations: usize,
    pub max_constraint_violation: f64,
    pub message: String,
}

/// Implements the actual solving. Backends are stateless across calls and
/// reentrant, so concurrent solves need no synchronization.
pub trait NlpBackend: Send + Sync {
    /// Unique identifier (e.g. "augmented-lagrangian")
    fn id(&self) -> &'static str;

    /// Minimize the objective subject to bounds and equality constraints.
    fn minimize(&self, problem: &NlpProblem, config: &SolverConfig) -> SolverResult;
}
