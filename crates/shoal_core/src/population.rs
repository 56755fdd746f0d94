use crate::error::ModelError;
use crate::sampling::SampleRange;
use crate::traits::Scalar;
use serde::Serialize;

/// Population the closed-form trajectory converges to.
pub const STABLE_EQUILIBRIUM: f64 = 2.0;
/// Population the phase-plane analysis reports as the repelling equilibrium.
pub const UNSTABLE_EQUILIBRIUM: f64 = 1.0;

/// Slider values driving one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationParameters {
    initial_population: f64,
    decay_rate: f64,
}

impl SimulationParameters {
    pub fn new(initial_population: f64, decay_rate: f64) -> Result<Self, ModelError> {
        if !initial_population.is_finite() || initial_population <= 0.0 {
            return Err(ModelError::InvalidInitialPopulation(initial_population));
        }
        if !decay_rate.is_finite() || decay_rate <= 0.0 {
            return Err(ModelError::InvalidDecayRate(decay_rate));
        }
        Ok(Self {
            initial_population,
            decay_rate,
        })
    }

    pub fn initial_population(&self) -> f64 {
        self.initial_population
    }

    pub fn decay_rate(&self) -> f64 {
        self.decay_rate
    }
}

/// `K = (p0 - 2) / (p0 + 1)`, or an error when `p0 = -1`.
pub fn growth_constant<T: Scalar>(p0: T) -> Result<T, ModelError> {
    let two = T::one() + T::one();
    let shifted = p0 + T::one();
    if shifted.is_zero() {
        return Err(ModelError::UndefinedGrowthConstant);
    }
    Ok((p0 - two) / shifted)
}

/// Evaluates `p(t) = (K e^{-rt} + 2) / (1 - K e^{-rt})`.
///
/// Numerator and denominator are both scaled by `p0 + 1`, which removes the
/// cancellation in `1 - K` for large `p0` and makes `p(0) = p0` exact for
/// integral populations. Returns the offending denominator as the error when it
/// vanishes.
pub fn population_at<T: Scalar>(p0: T, r: T, t: T) -> Result<T, T> {
    let two = T::one() + T::one();
    let decay = (-r * t).exp();
    let shifted = p0 + T::one();
    let numerator = (p0 - two) * decay + two * shifted;
    let denominator = shifted - (p0 - two) * decay;
    if denominator.abs() <= T::epsilon() * shifted.abs().max(T::one()) {
        return Err(denominator);
    }
    Ok(numerator / denominator)
}

/// Evaluates the closed-form model at every time in `times`.
pub fn population_model(
    times: &[f64],
    params: &SimulationParameters,
) -> Result<Vec<f64>, ModelError> {
    let p0 = params.initial_population();
    let r = params.decay_rate();
    growth_constant(p0)?;

    times
        .iter()
        .enumerate()
        .map(|(index, &t)| {
            if !t.is_finite() || t < 0.0 {
                return Err(ModelError::InvalidTime { index, value: t });
            }
            population_at(p0, r, t).map_err(|denominator| ModelError::Singular { t, denominator })
        })
        .collect()
}

/// Population trajectory sampled over time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    pub time: Vec<f64>,
    pub population: Vec<f64>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn first(&self) -> Option<(f64, f64)> {
        Some((*self.time.first()?, *self.population.first()?))
    }

    pub fn last(&self) -> Option<(f64, f64)> {
        Some((*self.time.last()?, *self.population.last()?))
    }
}

pub fn sample_trajectory(
    range: &SampleRange,
    params: &SimulationParameters,
) -> Result<TimeSeries, ModelError> {
    let time = range.points("time")?;
    let population = population_model(&time, params)?;
    tracing::debug!(
        initial_population = params.initial_population(),
        decay_rate = params.decay_rate(),
        samples = time.len(),
        "population trajectory sampled"
    );
    Ok(TimeSeries { time, population })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_err_contains<T: std::fmt::Debug>(result: Result<T, ModelError>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    fn relative_error(actual: f64, expected: f64) -> f64 {
        ((actual - expected) / expected).abs()
    }

    #[test]
    fn parameters_reject_non_positive_values() {
        assert_err_contains(SimulationParameters::new(0.0, 0.001), "Initial population");
        assert_err_contains(SimulationParameters::new(-1.0, 0.001), "Initial population");
        assert_err_contains(SimulationParameters::new(f64::NAN, 0.001), "Initial population");
        assert_err_contains(SimulationParameters::new(1e6, 0.0), "Decay rate");
        assert_err_contains(SimulationParameters::new(1e6, f64::INFINITY), "Decay rate");
    }

    #[test]
    fn growth_constant_is_undefined_at_minus_one() {
        assert_eq!(
            growth_constant(-1.0_f64),
            Err(ModelError::UndefinedGrowthConstant)
        );
        let k = growth_constant(1e6_f64).expect("K should be defined");
        assert!((k - 999_998.0 / 1_000_001.0).abs() < 1e-15);
    }

    #[test]
    fn trajectory_starts_at_initial_population() {
        for p0 in [0.25, 1.0, 2.0, 1e3, 123_456.0, 1e6, 1e7] {
            let params = SimulationParameters::new(p0, 0.001).expect("params");
            let values = population_model(&[0.0], &params).expect("model");
            assert!(
                relative_error(values[0], p0) < 1e-12,
                "p(0) = {} for p0 = {p0}",
                values[0]
            );
        }
    }

    #[test]
    fn trajectory_converges_to_stable_equilibrium() {
        for (p0, r) in [(1e3, 0.0001), (1e6, 0.001), (1e7, 0.01), (0.5, 0.003)] {
            let params = SimulationParameters::new(p0, r).expect("params");
            let values = population_model(&[1e7], &params).expect("model");
            assert!(
                (values[0] - STABLE_EQUILIBRIUM).abs() < 1e-9,
                "p(inf) = {} for p0 = {p0}, r = {r}",
                values[0]
            );
        }
    }

    #[test]
    fn trajectory_from_above_decreases_monotonically() {
        let params = SimulationParameters::new(1e6, 0.001).expect("params");
        let series =
            sample_trajectory(&SampleRange::new(0.0, 5000.0, 1000), &params).expect("series");
        assert_eq!(series.len(), 1000);
        assert!(series
            .population
            .windows(2)
            .all(|pair| pair[1] < pair[0] && pair[1] > STABLE_EQUILIBRIUM));
    }

    #[test]
    fn default_scenario_endpoints() {
        let params = SimulationParameters::new(1e6, 0.001).expect("params");
        let series =
            sample_trajectory(&SampleRange::new(0.0, 5000.0, 1000), &params).expect("series");

        let (t0, p_start) = series.first().expect("first");
        assert_eq!(t0, 0.0);
        assert_eq!(p_start, 1_000_000.0);

        // r * t = 5 at the end of the window, so the trajectory is still ~1% above 2.
        let (t_end, p_end) = series.last().expect("last");
        assert_eq!(t_end, 5000.0);
        assert!(p_end > STABLE_EQUILIBRIUM);
        assert!((p_end - STABLE_EQUILIBRIUM).abs() < 0.05, "p_end = {p_end}");
    }

    #[test]
    fn fast_decay_reaches_equilibrium_within_window() {
        let params = SimulationParameters::new(1e6, 0.01).expect("params");
        let series =
            sample_trajectory(&SampleRange::new(0.0, 5000.0, 1000), &params).expect("series");
        let (_, p_end) = series.last().expect("last");
        assert!((p_end - STABLE_EQUILIBRIUM).abs() < 1e-3, "p_end = {p_end}");
    }

    #[test]
    fn population_model_rejects_negative_time() {
        let params = SimulationParameters::new(1e6, 0.001).expect("params");
        assert_err_contains(population_model(&[0.0, -1.0], &params), "Time sample 1");
        assert_err_contains(population_model(&[f64::NAN], &params), "Time sample 0");
    }

    #[test]
    fn population_at_is_generic_over_scalars() {
        let single = population_at(1000.0_f32, 0.001, 0.0).expect("defined");
        assert!((single - 1000.0).abs() < 1e-2);
        let double = population_at(1000.0_f64, 0.001, 0.0).expect("defined");
        assert_eq!(double, 1000.0);
    }

    #[test]
    fn population_at_reports_vanishing_denominator() {
        // p0 = -4 gives K = 2; the denominator crosses zero at t = ln(2) / r.
        let t = 2.0_f64.ln();
        let denominator = population_at(-4.0, 1.0, t).expect_err("singular");
        assert!(denominator.abs() < 1e-15);
        assert_eq!(population_at(-4.0, 1.0, 0.0), Ok(-4.0));
    }

    #[test]
    fn population_model_reports_singular_denominator() {
        // Bypasses `new`, which would reject a negative population.
        let params = SimulationParameters {
            initial_population: -4.0,
            decay_rate: 1.0,
        };
        let t = 2.0_f64.ln();
        let err = population_model(&[0.0, t], &params).expect_err("singular");
        match err {
            ModelError::Singular { t: at, denominator } => {
                assert_eq!(at, t);
                assert!(denominator.abs() < 1e-15);
            }
            other => panic!("expected singular error, got {other:?}"),
        }
        assert_err_contains(population_model(&[t], &params), "singular at t =");
    }
}
