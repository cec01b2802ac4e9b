//! Problem Builder: turns battery/cost parameters and a price series into
//! the numeric problem handed to the solver backend.

use tracing::debug;

use crate::domain::battery::{BatteryParameters, CostParameters};
use crate::error::DispatchError;
use crate::optimizer::constraints::{EndSoc, NoFinalDischarge, SocRecurrence, StartSoc};
use crate::optimizer::objective::NetCostObjective;
use crate::solver::{Bound, NlpProblem};

/// Fixed offsets of the three variable blocks inside the decision vector:
/// charge at 0, discharge at `period`, soc at `2 * period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionLayout {
    pub period: usize,
}

impl DecisionLayout {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Total number of decision variables.
    pub fn dimension(&self) -> usize {
        3 * self.period
    }

    pub fn charge<'a>(&self, x: &'a [f64]) -> &'a [f64] {
        &x[..self.period]
    }

    pub fn discharge<'a>(&self, x: &'a [f64]) -> &'a [f64] {
        &x[self.period..2 * self.period]
    }

    pub fn soc<'a>(&self, x: &'a [f64]) -> &'a [f64] {
        &x[2 * self.period..3 * self.period]
    }
}

/// A fully-built dispatch problem: the solver-facing NLP plus the layout
/// and scaling the extractor needs to interpret its solution.
pub struct DispatchProblem {
    pub layout: DecisionLayout,
    pub nlp: NlpProblem,
    pub volume_mwh: f64,
}

/// Build the optimization problem for one solve call. Pure construction:
/// validates, derives constants, and assembles the objective/constraint
/// records, bounds, and all-zero initial guess.
pub fn build_problem(
    battery: &BatteryParameters,
    costs: &CostParameters,
    prices: &[f64],
) -> Result<DispatchProblem, DispatchError> {
    battery.validate()?;
    let period = prices.len();
    // The SoC recurrence needs at least one transition
    if period < 2 {
        return Err(DispatchError::HorizonTooShort(period));
    }

    let layout = DecisionLayout::new(period);

    // Cost vectors, uniform today but per-period by construction
    let charge_cost = vec![costs.charge_cost; period];
    let discharge_cost = vec![costs.discharge_cost; period];
    let activation = vec![costs.activation; period];

    // Energy moved per period per MW of power, and the SoC increment (in
    // volume units) of one period at full power
    let mw_to_mwh = battery.time_frequency_h;
    let steps_full_trip =
        (battery.volume_mwh / battery.capacity_mw) * (1.0 / battery.time_frequency_h);
    let soc_step = vec![
        (battery.volume_mwh / battery.capacity_mw) * (1.0 / steps_full_trip);
        period
    ];

    let mut bounds = Vec::with_capacity(layout.dimension());
    bounds.extend(std::iter::repeat(Bound::new(0.0, battery.capacity_mw)).take(2 * period));
    bounds.extend(std::iter::repeat(Bound::new(0.0, battery.volume_mwh)).take(period));

    let objective = NetCostObjective {
        layout,
        prices: prices.to_vec(),
        charge_cost,
        discharge_cost,
        activation,
        mw_to_mwh,
        efficiency: battery.efficiency,
    };

    // SoC targets are scaled to volume units here so the constraints stay
    // consistent with the [0, volume] soc bounds for any volume
    let nlp = NlpProblem {
        objective: Box::new(objective),
        constraints: vec![
            Box::new(SocRecurrence {
                layout,
                efficiency: battery.efficiency,
                soc_step,
            }),
            Box::new(StartSoc {
                layout,
                target_mwh: battery.input_soc * battery.volume_mwh,
            }),
            Box::new(EndSoc {
                layout,
                target_mwh: battery.final_soc * battery.volume_mwh,
            }),
            Box::new(NoFinalDischarge { layout }),
        ],
        bounds,
        initial_guess: vec![0.0; layout.dimension()],
    };

    debug!(
        period,
        variables = layout.dimension(),
        mw_to_mwh,
        steps_full_trip,
        "built dispatch problem"
    );

    Ok(DispatchProblem {
        layout,
        nlp,
        volume_mwh: battery.volume_mwh,
    })
}
