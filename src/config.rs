use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::domain::battery::{BatteryParameters, CostParameters};
use crate::solver::SolverConfig;

/// CLI configuration: battery and cost parameters plus solver stopping
/// criteria, merged from a TOML file and `DISPATCH__`-prefixed environment
/// variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub battery: BatteryConfig,
    #[serde(default)]
    pub costs: CostsConfig,
    #[serde(default)]
    pub solver: SolverSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatteryConfig {
    pub capacity_mw: f64,
    pub volume_mwh: f64,
    pub efficiency: f64,
    pub input_soc: f64,
    pub final_soc: f64,
    pub time_frequency_h: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CostsConfig {
    pub charge_cost: f64,
    pub discharge_cost: f64,
    pub activation: f64,
}

impl Default for CostsConfig {
    fn default() -> Self {
        let defaults = CostParameters::default();
        Self {
            charge_cost: defaults.charge_cost,
            discharge_cost: defaults.discharge_cost,
            activation: defaults.activation,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SolverSettings {
    pub max_inner_iterations: usize,
    pub max_outer_iterations: usize,
    pub tolerance: f64,
    pub constraint_tolerance: f64,
    pub initial_penalty: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        let defaults = SolverConfig::default();
        Self {
            max_inner_iterations: defaults.max_inner_iterations,
            max_outer_iterations: defaults.max_outer_iterations,
            tolerance: defaults.tolerance,
            constraint_tolerance: defaults.constraint_tolerance,
            initial_penalty: defaults.initial_penalty,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("DISPATCH__").split("__"));
        Ok(figment.extract()?)
    }

    pub fn battery_parameters(&self) -> BatteryParameters {
        BatteryParameters {
            capacity_mw: self.battery.capacity_mw,
            volume_mwh: self.battery.volume_mwh,
            efficiency: self.battery.efficiency,
            input_soc: self.battery.input_soc,
            final_soc: self.battery.final_soc,
            time_frequency_h: self.battery.time_frequency_h,
        }
    }

    pub fn cost_parameters(&self) -> CostParameters {
        CostParameters {
            charge_cost: self.costs.charge_cost,
            discharge_cost: self.costs.discharge_cost,
            activation: self.costs.activation,
        }
    }

    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            max_inner_iterations: self.solver.max_inner_iterations,
            max_outer_iterations: self.solver.max_outer_iterations,
            tolerance: self.solver.tolerance,
            constraint_tolerance: self.solver.constraint_tolerance,
            initial_penalty: self.solver.initial_penalty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_toml() {
        let config: Config = figment::Figment::new()
            .merge(Toml::string(
                r#"
                [battery]
                capacity_mw = 2.0
                volume_mwh = 4.0
                efficiency = 0.85
                input_soc = 0.5
                final_soc = 0.5
                time_frequency_h = 0.5

                [costs]
                charge_cost = 3.0
                discharge_cost = 3.0
                activation = 1.0
            "#,
            ))
            .extract()
            .unwrap();

        assert_eq!(config.battery.capacity_mw, 2.0);
        assert_eq!(config.costs.activation, 1.0);
        // solver section falls back to defaults
        assert_eq!(config.solver.max_outer_iterations, 60);
        assert!(config.battery_parameters().validate().is_ok());
    }
}
