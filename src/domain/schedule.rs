use serde::{Deserialize, Serialize};

/// Solver outcome attached to a schedule.
///
/// `success == false` means the backend terminated without driving the
/// equality constraints to tolerance; the schedule is still returned so the
/// caller can decide whether to use, warn on, or discard it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverDiagnostics {
    pub success: bool,
    /// Final objective value (net cost; negative means profit)
    pub objective: f64,
    /// Total inner iterations spent across the solve
    pub iterations: usize,
    /// Largest equality-constraint residual at the returned point
    pub max_constraint_violation: f64,
    pub message: String,
}

/// Optimal dispatch profile over the price horizon.
///
/// All three series are aligned one-to-one with the input price series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchSchedule {
    /// Charging power per period (MW)
    pub charge_mw: Vec<f64>,
    /// Discharging power per period (MW)
    pub discharge_mw: Vec<f64>,
    /// State of charge per period, normalized to a fraction of volume
    pub soc_fraction: Vec<f64>,
    pub diagnostics: SolverDiagnostics,
}

impl DispatchSchedule {
    /// Number of periods in the schedule.
    pub fn periods(&self) -> usize {
        self.charge_mw.len()
    }

    /// Net power per period (MW), positive while charging.
    pub fn net_power_mw(&self) -> Vec<f64> {
        self.charge_mw
            .iter()
            .zip(&self.discharge_mw)
            .map(|(c, d)| c - d)
            .collect()
    }
}
