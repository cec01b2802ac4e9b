//! Result Extractor: slices the solution vector into named series and
//! normalizes SoC to a fraction of volume.

use crate::domain::schedule::{DispatchSchedule, SolverDiagnostics};
use crate::optimizer::problem::DispatchProblem;
use crate::solver::SolverResult;

pub fn extract_schedule(problem: &DispatchProblem, result: SolverResult) -> DispatchSchedule {
    let layout = problem.layout;
    let charge_mw = layout.charge(&result.x).to_vec();
    let discharge_mw = layout.discharge(&result.x).to_vec();
    let soc_fraction: Vec<f64> = layout
        .soc(&result.x)
        .iter()
        .map(|soc| soc / problem.volume_mwh)
        .collect();

    DispatchSchedule {
        charge_mw,
        discharge_mw,
        soc_fraction,
        diagnostics: SolverDiagnostics {
            success: result.success,
            objective: result.objective,
            iterations: result.iterations,
            max_constraint_violation: result.max_constraint_violation,
            message: result.message,
        },
    }
}
