//! Equality constraints of the dispatch problem, one record per condition.
//!
//! SoC carries volume units (MWh) throughout, consistent with its
//! `[0, volume]` bounds; the start/end targets are pre-scaled by the
//! problem builder.

use crate::optimizer::problem::DecisionLayout;
use crate::solver::EqualityConstraint;

/// SoC dynamics between consecutive periods:
/// `soc[i+1] - soc[i] - charge[i]*efficiency*soc_step[i] + discharge[i]*soc_step[i] = 0`
/// for every transition `i` in `0..period-1`.
///
/// All `period - 1` transitions are covered. The final period's charge and
/// discharge feed no later SoC (there is no `soc[period]`), which is why
/// [`NoFinalDischarge`] exists as a separate condition and why charging in
/// the final period can never pay off.
pub struct SocRecurrence {
    pub layout: DecisionLayout,
    pub efficiency: f64,
    pub soc_step: Vec<f64>,
}

impl EqualityConstraint for SocRecurrence {
    fn label(&self) -> &'static str {
        "soc_recurrence"
    }

    fn residual(&self, x: &[f64]) -> Vec<f64> {
        let charge = self.layout.charge(x);
        let discharge = self.layout.discharge(x);
        let soc = self.layout.soc(x);

        (0..self.layout.period - 1)
            .map(|i| {
                soc[i + 1] - soc[i] - charge[i] * self.efficiency * self.soc_step[i]
                    + discharge[i] * self.soc_step[i]
            })
            .collect()
    }
}

/// `soc[0]` pinned to the starting state of charge (in MWh).
pub struct StartSoc {
    pub layout: DecisionLayout,
    pub target_mwh: f64,
}

impl EqualityConstraint for StartSoc {
    fn label(&self) -> &'static str {
        "start_soc"
    }

    fn residual(&self, x: &[f64]) -> Vec<f64> {
        vec![self.layout.soc(x)[0] - self.target_mwh]
    }
}

/// `soc[period-1]` pinned to the required final state of charge (in MWh).
pub struct EndSoc {
    pub layout: DecisionLayout,
    pub target_mwh: f64,
}

impl EqualityConstraint for EndSoc {
    fn label(&self) -> &'static str {
        "end_soc"
    }

    fn residual(&self, x: &[f64]) -> Vec<f64> {
        vec![self.layout.soc(x)[self.layout.period - 1] - self.target_mwh]
    }
}

/// No discharge permitted in the final period.
pub struct NoFinalDischarge {
    pub layout: DecisionLayout,
}

impl EqualityConstraint for NoFinalDischarge {
    fn label(&self) -> &'static str {
        "no_final_discharge"
    }

    fn residual(&self, x: &[f64]) -> Vec<f64> {
        vec![self.layout.discharge(x)[self.layout.period - 1]]
    }
}
