use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Upper bound on samples per range; keeps a render pass bounded.
pub const MAX_SAMPLES: usize = 100_000;

/// An evenly sampled closed interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    pub min: f64,
    pub max: f64,
    pub samples: usize,
}

impl SampleRange {
    pub const fn new(min: f64, max: f64, samples: usize) -> Self {
        Self { min, max, samples }
    }

    pub fn validate(&self, name: &'static str) -> Result<(), ModelError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ModelError::InvalidRange {
                name,
                reason: format!("bounds must be finite (got [{}, {}])", self.min, self.max),
            });
        }
        if self.max <= self.min {
            return Err(ModelError::InvalidRange {
                name,
                reason: format!("max must exceed min (got [{}, {}])", self.min, self.max),
            });
        }
        if self.samples < 2 {
            return Err(ModelError::InvalidRange {
                name,
                reason: format!("at least 2 samples are required (got {})", self.samples),
            });
        }
        if self.samples > MAX_SAMPLES {
            return Err(ModelError::InvalidRange {
                name,
                reason: format!(
                    "at most {MAX_SAMPLES} samples are allowed (got {})",
                    self.samples
                ),
            });
        }
        Ok(())
    }

    /// Validates the range and returns its sample points.
    pub fn points(&self, name: &'static str) -> Result<Vec<f64>, ModelError> {
        self.validate(name)?;
        Ok(linspace(self.min, self.max, self.samples))
    }
}

/// `samples` evenly spaced values from `start` to `end`, both inclusive.
///
/// The last value is pinned to `end` so the sampled interval never falls short
/// through accumulated rounding.
pub fn linspace(start: f64, end: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (samples - 1) as f64;
            let mut values: Vec<f64> = (0..samples).map(|i| start + step * i as f64).collect();
            values[samples - 1] = end;
            values
        }
    }
}
