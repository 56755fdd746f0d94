use crate::error::ModelError;
use crate::sampling::SampleRange;
use crate::traits::{RateLaw, Scalar};
use serde::{Deserialize, Serialize};

/// Rate samples closer to zero than this are treated as exact zeros.
const ZERO_TOLERANCE: f64 = 1e-12;

/// Coefficients of the rate law `dp/dt = r p - c p^2 - d`.
///
/// These are fixed for the phase-plane view and are independent of the decay rate
/// that drives the trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilityCoefficients<T = f64> {
    /// Linear growth rate `r`.
    pub growth: T,
    /// Crowding coefficient `c`.
    pub crowding: T,
    /// Constant removal `d`.
    pub removal: T,
}

impl Default for StabilityCoefficients<f64> {
    fn default() -> Self {
        Self {
            growth: 0.003,
            crowding: 0.001,
            removal: 0.002,
        }
    }
}

impl<T: Scalar> RateLaw<T> for StabilityCoefficients<T> {
    fn rate(&self, p: T) -> T {
        self.growth * p - self.crowding * p * p - self.removal
    }

    fn slope(&self, p: T) -> T {
        self.growth - (self.crowding + self.crowding) * p
    }
}

/// Evaluates `dp/dt` at every population in `populations`.
pub fn derivative_analysis(populations: &[f64], coefficients: &StabilityCoefficients) -> Vec<f64> {
    populations.iter().map(|&p| coefficients.rate(p)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossingDirection {
    /// Decline below the crossing, growth above it.
    Rising,
    /// Growth below the crossing, decline above it.
    Falling,
}

impl CrossingDirection {
    fn between(before: f64, after: f64) -> Self {
        if after > before {
            Self::Rising
        } else {
            Self::Falling
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignChange {
    pub population: f64,
    pub direction: CrossingDirection,
}

/// Rate of change sampled over population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StabilitySeries {
    pub population: Vec<f64>,
    pub rate: Vec<f64>,
}

impl StabilitySeries {
    pub fn len(&self) -> usize {
        self.population.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    /// Zero crossings of the sampled rate, located by linear interpolation
    /// between neighbouring samples.
    ///
    /// A run of samples at zero counts once, at its midpoint, and only when the
    /// rate has opposite signs on either side of the run.
    pub fn sign_changes(&self) -> Vec<SignChange> {
        let n = self.len().min(self.rate.len());
        let is_zero = |value: f64| value.abs() <= ZERO_TOLERANCE;
        let mut changes = Vec::new();
        let mut i = 0;
        while i < n {
            let value = self.rate[i];
            if is_zero(value) {
                let mut end = i;
                while end + 1 < n && is_zero(self.rate[end + 1]) {
                    end += 1;
                }
                if i > 0 && end + 1 < n {
                    let before = self.rate[i - 1];
                    let after = self.rate[end + 1];
                    if before.signum() != after.signum() {
                        changes.push(SignChange {
                            population: 0.5 * (self.population[i] + self.population[end]),
                            direction: CrossingDirection::between(before, after),
                        });
                    }
                }
                i = end + 1;
                continue;
            }
            if i + 1 < n {
                let next = self.rate[i + 1];
                if !is_zero(next) && value.signum() != next.signum() {
                    let fraction = value / (value - next);
                    let p0 = self.population[i];
                    let p1 = self.population[i + 1];
                    changes.push(SignChange {
                        population: p0 + (p1 - p0) * fraction,
                        direction: CrossingDirection::between(value, next),
                    });
                }
            }
            i += 1;
        }
        changes
    }
}

pub fn sample_stability(
    range: &SampleRange,
    coefficients: &StabilityCoefficients,
) -> Result<StabilitySeries, ModelError> {
    let population = range.points("population")?;
    let rate = derivative_analysis(&population, coefficients);
    tracing::debug!(samples = population.len(), "stability series sampled");
    Ok(StabilitySeries { population, rate })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_series() -> StabilitySeries {
        sample_stability(
            &SampleRange::new(0.5, 2.5, 100),
            &StabilityCoefficients::default(),
        )
        .expect("series")
    }

    #[test]
    fn rate_vanishes_at_documented_equilibria() {
        let rates = derivative_analysis(&[1.0, 2.0], &StabilityCoefficients::default());
        assert_eq!(rates.len(), 2);
        assert!(rates.iter().all(|r| r.abs() < 1e-15), "rates = {rates:?}");
    }

    #[test]
    fn rate_signs_match_growth_and_decline_regions() {
        let coefficients = StabilityCoefficients::default();
        assert!(coefficients.rate(0.5) < 0.0);
        assert!(coefficients.rate(1.5) > 0.0);
        assert!(coefficients.rate(2.5) < 0.0);
    }

    #[test]
    fn rate_is_concave() {
        let rates = derivative_analysis(&[0.7, 1.4, 2.1], &StabilityCoefficients::default());
        let second_difference = rates[0] - 2.0 * rates[1] + rates[2];
        assert!(second_difference < 0.0);
    }

    #[test]
    fn slope_matches_finite_difference() {
        let coefficients = StabilityCoefficients::default();
        let h = 1e-6;
        for p in [0.5, 1.0, 1.5, 2.0] {
            let numeric = (coefficients.rate(p + h) - coefficients.rate(p - h)) / (2.0 * h);
            assert!((numeric - coefficients.slope(p)).abs() < 1e-9);
        }
    }

    #[test]
    fn sampled_series_covers_population_range() {
        let series = default_series();
        assert_eq!(series.len(), 100);
        assert_eq!(series.rate.len(), 100);
        assert_eq!(series.population[0], 0.5);
        assert_eq!(series.population[99], 2.5);
        assert!(series.rate[0] < 0.0);
    }

    #[test]
    fn sign_changes_bracket_both_equilibria() {
        let changes = default_series().sign_changes();
        assert_eq!(changes.len(), 2, "changes = {changes:?}");
        assert!((changes[0].population - 1.0).abs() < 1e-3);
        assert_eq!(changes[0].direction, CrossingDirection::Rising);
        assert!((changes[1].population - 2.0).abs() < 1e-3);
        assert_eq!(changes[1].direction, CrossingDirection::Falling);
    }

    #[test]
    fn sign_changes_report_exact_zero_samples_once() {
        let series = StabilitySeries {
            population: vec![0.0, 1.0, 2.0, 3.0, 4.0],
            rate: vec![-0.002, 0.0, 0.0005, 0.0, -0.001],
        };
        let changes = series.sign_changes();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].population, 1.0);
        assert_eq!(changes[0].direction, CrossingDirection::Rising);
        assert_eq!(changes[1].population, 3.0);
        assert_eq!(changes[1].direction, CrossingDirection::Falling);
    }

    #[test]
    fn sign_changes_skip_touches_and_collapse_plateaus() {
        let touch = StabilitySeries {
            population: vec![0.0, 1.0, 2.0],
            rate: vec![-1.0, 0.0, -1.0],
        };
        assert!(touch.sign_changes().is_empty());

        let plateau = StabilitySeries {
            population: vec![0.0, 1.0, 2.0, 3.0, 4.0],
            rate: vec![-1.0, 0.0, 0.0, 0.0, 1.0],
        };
        let changes = plateau.sign_changes();
        assert_eq!(changes.len(), 1, "changes = {changes:?}");
        assert_eq!(changes[0].population, 2.0);
        assert_eq!(changes[0].direction, CrossingDirection::Rising);

        let flat_plateau = StabilitySeries {
            population: vec![0.0, 1.0, 2.0, 3.0],
            rate: vec![1.0, 0.0, 0.0, 1.0],
        };
        assert!(flat_plateau.sign_changes().is_empty());

        let zero_at_edge = StabilitySeries {
            population: vec![0.0, 1.0],
            rate: vec![0.0, 1.0],
        };
        assert!(zero_at_edge.sign_changes().is_empty());
    }

    #[test]
    fn coefficients_are_generic_over_scalars() {
        let coefficients = StabilityCoefficients::<f32> {
            growth: 0.003,
            crowding: 0.001,
            removal: 0.002,
        };
        assert!(coefficients.rate(1.5_f32) > 0.0);
        assert!(coefficients.slope(2.0_f32) < 0.0);
    }
}
