//! Net-cost objective. Minimizing this is equivalent to maximizing
//! arbitrage profit.

use itertools::izip;

use crate::optimizer::problem::DecisionLayout;
use crate::solver::Objective;

/// Explicit objective record: carries the price and cost vectors plus the
/// energy-conversion constants, so it can be evaluated and tested on its
/// own without capturing any outer scope.
///
/// Charging is billed for the pre-loss energy drawn from the grid
/// (`charge * mw_to_mwh * efficiency` priced at market plus surcharge);
/// discharging is credited for energy delivered at market minus the
/// discharge cost and activation spread, with no further efficiency
/// scaling, matching the SoC recurrence which books the loss on the
/// charging leg.
pub struct NetCostObjective {
    pub layout: DecisionLayout,
    pub prices: Vec<f64>,
    pub charge_cost: Vec<f64>,
    pub discharge_cost: Vec<f64>,
    pub activation: Vec<f64>,
    pub mw_to_mwh: f64,
    pub efficiency: f64,
}

impl Objective for NetCostObjective {
    fn evaluate(&self, x: &[f64]) -> f64 {
        let charge = self.layout.charge(x);
        let discharge = self.layout.discharge(x);

        let charging: f64 = izip!(charge, &self.prices, &self.charge_cost)
            .map(|(c, p, cc)| c * self.mw_to_mwh * self.efficiency * (p + cc))
            .sum();
        let discharging: f64 = izip!(discharge, &self.prices, &self.discharge_cost, &self.activation)
            .map(|(d, p, dc, a)| d * self.mw_to_mwh * (p - dc - a))
            .sum();

        charging - discharging
    }
}
