use thiserror::Error;

/// Failures raised while validating parameters or evaluating the population model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Initial population must be finite and positive (got {0}).")]
    InvalidInitialPopulation(f64),
    #[error("Decay rate must be finite and positive (got {0}).")]
    InvalidDecayRate(f64),
    #[error("Growth constant K is undefined for an initial population of -1.")]
    UndefinedGrowthConstant,
    #[error("Time sample {index} must be finite and non-negative (got {value}).")]
    InvalidTime { index: usize, value: f64 },
    #[error("Population model is singular at t = {t} (denominator {denominator}).")]
    Singular { t: f64, denominator: f64 },
    #[error("Sample range for {name} is invalid: {reason}")]
    InvalidRange { name: &'static str, reason: String },
    #[error("{name} = {value} is outside the control bounds [{min}, {max}].")]
    OutOfBounds {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Failures raised while packaging series into chart specifications.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("Trace \"{trace}\" has {x} x values but {y} y values.")]
    LengthMismatch { trace: String, x: usize, y: usize },
    #[error("Trace \"{0}\" has no data points.")]
    EmptySeries(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Chart(#[from] ChartError),
}
