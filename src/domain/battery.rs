use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

/// Physical limits and boundary conditions of the battery being scheduled.
///
/// A 1 MW / 2 MWh battery takes 2 h to fully charge from 0%. SoC boundary
/// conditions are fractions of `volume_mwh`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BatteryParameters {
    /// Battery power in MW
    pub capacity_mw: f64,
    /// Battery volume in MWh
    pub volume_mwh: f64,
    /// Round-trip efficiency as a fraction; the loss is modeled entirely
    /// on the charging leg
    pub efficiency: f64,
    /// State of charge at the first period, as a fraction of volume
    pub input_soc: f64,
    /// Required state of charge at the last period, as a fraction of volume
    pub final_soc: f64,
    /// Hours per price period (30 min data = 0.5, hourly = 1.0)
    pub time_frequency_h: f64,
}

impl Default for BatteryParameters {
    fn default() -> Self {
        Self {
            capacity_mw: 1.0,
            volume_mwh: 1.0,
            efficiency: 0.9,
            input_soc: 0.5,
            final_soc: 0.5,
            time_frequency_h: 0.5,
        }
    }
}

impl BatteryParameters {
    /// Validate that the parameters describe a physically meaningful,
    /// non-degenerate battery. Capacity, volume and time frequency are
    /// used as divisors downstream, so zero is rejected here rather than
    /// surfacing as NaN bounds inside the solver.
    pub fn validate(&self) -> Result<(), DispatchError> {
        if !(self.capacity_mw > 0.0) {
            return Err(DispatchError::NonPositiveCapacity(self.capacity_mw));
        }
        if !(self.volume_mwh > 0.0) {
            return Err(DispatchError::NonPositiveVolume(self.volume_mwh));
        }
        if !(0.0..=1.0).contains(&self.efficiency) {
            return Err(DispatchError::EfficiencyOutOfRange(self.efficiency));
        }
        if !(0.0..=1.0).contains(&self.input_soc) {
            return Err(DispatchError::SocOutOfRange {
                name: "input",
                value: self.input_soc,
            });
        }
        if !(0.0..=1.0).contains(&self.final_soc) {
            return Err(DispatchError::SocOutOfRange {
                name: "final",
                value: self.final_soc,
            });
        }
        if !(self.time_frequency_h > 0.0) {
            return Err(DispatchError::NonPositiveTimeFrequency(self.time_frequency_h));
        }
        Ok(())
    }
}

/// Operating costs applied per period.
///
/// Uniform across the horizon today; the problem builder expands each to a
/// vector of length *period* so per-period variation stays possible.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CostParameters {
    /// Cost added to the market price on every MWh drawn while charging
    pub charge_cost: f64,
    /// Cost subtracted from the market price on every MWh delivered
    pub discharge_cost: f64,
    /// Activation spread subtracted from discharge revenue
    pub activation: f64,
}

impl Default for CostParameters {
    fn default() -> Self {
        Self {
            charge_cost: 5.0,
            discharge_cost: 5.0,
            activation: 5.0,
        }
    }
}
