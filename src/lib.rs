//! Dispatch optimizer for a grid-connected battery.
//!
//! Turns a price horizon plus battery physical limits into an optimal
//! charge/discharge schedule by building a constrained nonlinear program
//! (decision variables, net-cost objective, SoC equality constraints, box
//! bounds) and handing it to a pluggable solver backend.

pub mod config;
pub mod domain;
pub mod error;
pub mod optimizer;
pub mod prices;
pub mod solver;
pub mod telemetry;

pub use domain::battery::{BatteryParameters, CostParameters};
pub use domain::schedule::{DispatchSchedule, SolverDiagnostics};
pub use error::DispatchError;
pub use optimizer::{solve, DispatchOptimizer};
pub use solver::{NlpBackend, SolverConfig, SolverResult};
