//! One render pass: slider values in, charts, layout and notes out.

use crate::chart::{create_three_plots, ChartSet};
use crate::equilibrium::{find_equilibria, Equilibrium};
use crate::error::DashboardError;
use crate::population::{sample_trajectory, SimulationParameters, TimeSeries};
use crate::settings::DashboardSettings;
use crate::stability::{sample_stability, SignChange};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSlot {
    Trajectory,
    EquilibriumZoom,
    PhasePlane,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelWidth {
    Full,
    Half,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub chart: ChartSlot,
    pub width: PanelWidth,
}

/// Rows of panels: the full trajectory on top, zoom and phase plane side by side below.
pub fn dashboard_layout() -> Vec<Vec<Panel>> {
    vec![
        vec![Panel {
            chart: ChartSlot::Trajectory,
            width: PanelWidth::Full,
        }],
        vec![
            Panel {
                chart: ChartSlot::EquilibriumZoom,
                width: PanelWidth::Half,
            },
            Panel {
                chart: ChartSlot::PhasePlane,
                width: PanelWidth::Half,
            },
        ],
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub parameters: SimulationParameters,
    pub charts: ChartSet,
    pub layout: Vec<Vec<Panel>>,
    pub equilibria: Vec<Equilibrium>,
    pub sign_changes: Vec<SignChange>,
    pub notes: Vec<String>,
}

fn interpretation_notes(trajectory: &TimeSeries, equilibria: &[Equilibrium]) -> Vec<String> {
    let mut notes = vec![
        "Stable equilibrium: the population converges towards p = 2.".to_string(),
        "Non-linear dynamics: the path to equilibrium depends on the initial population and the decay rate."
            .to_string(),
    ];
    for equilibrium in equilibria {
        notes.push(format!(
            "p = {:.3}: {} equilibrium (d(dp/dt)/dp = {:.4}).",
            equilibrium.population,
            equilibrium.stability.label(),
            equilibrium.slope
        ));
    }
    if let Some((t, p)) = trajectory.last() {
        notes.push(format!("At t = {t}, the population is {p:.4}."));
    }
    notes.push("The population tends naturally towards the stable equilibrium.".to_string());
    notes
}

/// Recomputes every series and chart for `parameters`.
pub fn render_dashboard(
    settings: &DashboardSettings,
    parameters: SimulationParameters,
) -> Result<Dashboard, DashboardError> {
    settings.validate()?;

    let trajectory = sample_trajectory(&settings.time, &parameters)?;
    let stability = sample_stability(&settings.population, &settings.coefficients)?;
    let charts = create_three_plots(&trajectory, &stability, settings.zoom)?;
    let equilibria = find_equilibria(&settings.coefficients);
    let sign_changes = stability.sign_changes();
    let notes = interpretation_notes(&trajectory, &equilibria);

    tracing::debug!(
        initial_population = parameters.initial_population(),
        decay_rate = parameters.decay_rate(),
        equilibria = equilibria.len(),
        sign_changes = sign_changes.len(),
        "dashboard rendered"
    );

    Ok(Dashboard {
        parameters,
        charts,
        layout: dashboard_layout(),
        equilibria,
        sign_changes,
        notes,
    })
}
