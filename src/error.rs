use thiserror::Error;

/// Parameter-validation errors, rejected before any problem is built.
///
/// Solver non-convergence is deliberately not represented here: a
/// best-effort schedule is still informative, so it travels back as data
/// in [`crate::SolverDiagnostics`] instead of being raised.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("battery capacity must be positive, got {0} MW")]
    NonPositiveCapacity(f64),
    #[error("battery volume must be positive, got {0} MWh")]
    NonPositiveVolume(f64),
    #[error("round-trip efficiency must lie in [0, 1], got {0}")]
    EfficiencyOutOfRange(f64),
    #[error("{name} state of charge must lie in [0, 1], got {value}")]
    SocOutOfRange { name: &'static str, value: f64 },
    #[error("time frequency must be positive, got {0} h")]
    NonPositiveTimeFrequency(f64),
    #[error("price series must span at least two periods, got {0}")]
    HorizonTooShort(usize),
}
