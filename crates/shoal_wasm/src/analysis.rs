//! Raw series and equilibrium helpers for custom frontend plots.

use crate::dashboard::{to_js_error, WasmDashboard};
use anyhow::Context;
use js_sys::Float64Array;
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use shoal_core::equilibrium::{find_equilibria, Equilibrium};
use shoal_core::population::{sample_trajectory, TimeSeries};
use shoal_core::stability::{sample_stability, SignChange, StabilitySeries};
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
pub(crate) struct EquilibriaPayload {
    equilibria: Vec<Equilibrium>,
    sign_changes: Vec<SignChange>,
}

impl WasmDashboard {
    pub(crate) fn trajectory_checked(
        &self,
        initial_population: f64,
        decay_rate: f64,
    ) -> anyhow::Result<TimeSeries> {
        let parameters = self
            .settings
            .parameters(initial_population, decay_rate)
            .context("Invalid simulation parameters")?;
        let series = sample_trajectory(&self.settings.time, &parameters)?;
        Ok(series)
    }

    pub(crate) fn stability_checked(&self) -> anyhow::Result<StabilitySeries> {
        let series = sample_stability(&self.settings.population, &self.settings.coefficients)?;
        Ok(series)
    }

    pub(crate) fn equilibria_checked(&self) -> anyhow::Result<EquilibriaPayload> {
        let stability = self.stability_checked()?;
        Ok(EquilibriaPayload {
            equilibria: find_equilibria(&self.settings.coefficients),
            sign_changes: stability.sign_changes(),
        })
    }
}

#[wasm_bindgen]
impl WasmDashboard {
    pub fn time_samples(&self) -> Result<Float64Array, JsValue> {
        let time = self
            .settings
            .time
            .points("time")
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Float64Array::from(time.as_slice()))
    }

    pub fn population_series(
        &self,
        initial_population: f64,
        decay_rate: f64,
    ) -> Result<Float64Array, JsValue> {
        let series = self
            .trajectory_checked(initial_population, decay_rate)
            .map_err(to_js_error)?;
        Ok(Float64Array::from(series.population.as_slice()))
    }

    /// Interleaved `[p0, dpdt0, p1, dpdt1, ...]` pairs.
    pub fn stability_series(&self) -> Result<Float64Array, JsValue> {
        let series = self.stability_checked().map_err(to_js_error)?;
        let mut flat = Vec::with_capacity(series.len() * 2);
        for (p, rate) in series.population.iter().zip(&series.rate) {
            flat.push(*p);
            flat.push(*rate);
        }
        Ok(Float64Array::from(flat.as_slice()))
    }

    pub fn equilibria(&self) -> Result<JsValue, JsValue> {
        let payload = self.equilibria_checked().map_err(to_js_error)?;
        to_value(&payload).map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }
}
