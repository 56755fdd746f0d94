use crate::error::ModelError;
use crate::population::SimulationParameters;
use crate::sampling::SampleRange;
use crate::stability::StabilityCoefficients;
use serde::{Deserialize, Serialize};

/// A numeric slider exposed to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderControl {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl SliderControl {
    fn validate(&self, name: &'static str) -> Result<(), ModelError> {
        let invalid = |reason: String| ModelError::InvalidRange { name, reason };
        if ![self.min, self.max, self.step, self.default]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(invalid("slider bounds must be finite".to_string()));
        }
        if self.max <= self.min {
            return Err(invalid(format!(
                "slider max must exceed min (got [{}, {}])",
                self.min, self.max
            )));
        }
        if self.step <= 0.0 {
            return Err(invalid(format!("slider step must be positive (got {})", self.step)));
        }
        self.check(name, self.default)?;
        Ok(())
    }

    /// Returns `value` when it lies within the slider bounds.
    pub fn check(&self, name: &'static str, value: f64) -> Result<f64, ModelError> {
        if value.is_nan() || value < self.min || value > self.max {
            return Err(ModelError::OutOfBounds {
                name,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    pub initial_population: SliderControl,
    pub decay_rate: SliderControl,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            initial_population: SliderControl {
                label: "Initial population".to_string(),
                min: 1e3,
                max: 1e7,
                step: 1.0,
                default: 1e6,
            },
            decay_rate: SliderControl {
                label: "Decay rate".to_string(),
                min: 0.0001,
                max: 0.01,
                step: 0.0001,
                default: 0.001,
            },
        }
    }
}

/// Everything a render pass needs besides the slider values.
///
/// Deserializes from partial configuration; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub time: SampleRange,
    pub population: SampleRange,
    /// y-axis range of the zoomed trajectory chart.
    pub zoom: [f64; 2],
    pub coefficients: StabilityCoefficients,
    pub controls: ControlSettings,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            time: SampleRange::new(0.0, 5000.0, 1000),
            population: SampleRange::new(0.5, 2.5, 100),
            zoom: [0.5, 2.5],
            coefficients: StabilityCoefficients::default(),
            controls: ControlSettings::default(),
        }
    }
}

impl DashboardSettings {
    pub fn validate(&self) -> Result<(), ModelError> {
        self.time.validate("time")?;
        if self.time.min < 0.0 {
            return Err(ModelError::InvalidRange {
                name: "time",
                reason: format!("time must start at or after 0 (got {})", self.time.min),
            });
        }
        self.population.validate("population")?;
        let [low, high] = self.zoom;
        if !low.is_finite() || !high.is_finite() || high <= low {
            return Err(ModelError::InvalidRange {
                name: "zoom",
                reason: format!("expected finite bounds with max > min (got [{low}, {high}])"),
            });
        }
        let StabilityCoefficients {
            growth,
            crowding,
            removal,
        } = self.coefficients;
        if ![growth, crowding, removal].iter().all(|v| v.is_finite()) {
            return Err(ModelError::InvalidRange {
                name: "coefficients",
                reason: "stability coefficients must be finite".to_string(),
            });
        }
        self.controls
            .initial_population
            .validate("initial_population")?;
        self.controls.decay_rate.validate("decay_rate")?;
        Ok(())
    }

    /// Checks slider values against the control bounds and builds the parameters.
    pub fn parameters(
        &self,
        initial_population: f64,
        decay_rate: f64,
    ) -> Result<SimulationParameters, ModelError> {
        let p0 = self
            .controls
            .initial_population
            .check("initial_population", initial_population)?;
        let r = self.controls.decay_rate.check("decay_rate", decay_rate)?;
        SimulationParameters::new(p0, r)
    }

    pub fn default_parameters(&self) -> Result<SimulationParameters, ModelError> {
        self.parameters(
            self.controls.initial_population.default,
            self.controls.decay_rate.default,
        )
    }
}
