//! Dashboard wrapper exposed to the frontend.

use anyhow::Context;
use serde_wasm_bindgen::{from_value, to_value};
use shoal_core::dashboard::{render_dashboard, Dashboard};
use shoal_core::settings::DashboardSettings;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmDashboard {
    pub(crate) settings: DashboardSettings,
}

impl WasmDashboard {
    pub(crate) fn with_settings(settings: DashboardSettings) -> anyhow::Result<Self> {
        settings.validate().context("Invalid dashboard settings")?;
        Ok(Self { settings })
    }

    pub(crate) fn render_checked(
        &self,
        initial_population: f64,
        decay_rate: f64,
    ) -> anyhow::Result<Dashboard> {
        let parameters = self
            .settings
            .parameters(initial_population, decay_rate)
            .context("Invalid simulation parameters")?;
        let dashboard = render_dashboard(&self.settings, parameters)?;
        Ok(dashboard)
    }
}

pub(crate) fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{err:#}"))
}

#[wasm_bindgen]
impl WasmDashboard {
    /// `settings` may be `undefined`, `null`, or a partial settings object.
    #[wasm_bindgen(constructor)]
    pub fn new(settings: JsValue) -> Result<WasmDashboard, JsValue> {
        console_error_panic_hook::set_once();

        let settings = if settings.is_undefined() || settings.is_null() {
            DashboardSettings::default()
        } else {
            from_value(settings)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse settings: {e}")))?
        };
        Self::with_settings(settings).map_err(to_js_error)
    }

    pub fn controls(&self) -> Result<JsValue, JsValue> {
        to_value(&self.settings.controls)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    pub fn render(&self, initial_population: f64, decay_rate: f64) -> Result<JsValue, JsValue> {
        let dashboard = self
            .render_checked(initial_population, decay_rate)
            .map_err(|err| {
                tracing::warn!(initial_population, decay_rate, error = %err, "render failed");
                to_js_error(err)
            })?;
        to_value(&dashboard).map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoal_core::sampling::SampleRange;

    fn default_dashboard() -> WasmDashboard {
        WasmDashboard::with_settings(DashboardSettings::default()).expect("dashboard")
    }

    #[test]
    fn with_settings_rejects_invalid_ranges() {
        let settings = DashboardSettings {
            time: SampleRange::new(0.0, 5000.0, 1),
            ..DashboardSettings::default()
        };
        let err = WasmDashboard::with_settings(settings)
            .err()
            .expect("expected invalid settings");
        let message = format!("{err:#}");
        assert!(message.contains("Invalid dashboard settings"), "got {message}");
        assert!(message.contains("at least 2 samples"), "got {message}");
    }

    #[test]
    fn render_checked_builds_three_charts() {
        let dashboard = default_dashboard()
            .render_checked(1e6, 0.001)
            .expect("render");
        assert_eq!(dashboard.charts.trajectory.trace_count(), 3);
        assert_eq!(dashboard.charts.equilibrium_zoom.trace_count(), 3);
        assert_eq!(dashboard.charts.phase_plane.trace_count(), 4);
    }

    #[test]
    fn render_checked_enforces_slider_bounds() {
        let err = default_dashboard()
            .render_checked(1e8, 0.001)
            .expect_err("out of bounds");
        let message = format!("{err:#}");
        assert!(message.contains("Invalid simulation parameters"), "got {message}");
        assert!(message.contains("initial_population"), "got {message}");
    }

    #[test]
    #[cfg(target_arch = "wasm32")]
    fn constructor_accepts_undefined_settings() {
        let dashboard = WasmDashboard::new(JsValue::UNDEFINED).expect("dashboard");
        assert!(dashboard.render(1e6, 0.001).is_ok());
    }

    #[test]
    #[cfg(target_arch = "wasm32")]
    fn render_reports_out_of_bounds_parameters() {
        let dashboard = WasmDashboard::new(JsValue::NULL).expect("dashboard");
        assert!(dashboard.render(10.0, 0.001).is_err());
    }
}
