//! Chart specifications for the three dashboard views.
//!
//! Specs serialize to the Plotly figure shape (`{data, layout}`) so the frontend can
//! hand them to `Plotly.newPlot` without reshaping.

use crate::error::ChartError;
use crate::population::{TimeSeries, STABLE_EQUILIBRIUM, UNSTABLE_EQUILIBRIUM};
use crate::sampling::linspace;
use crate::stability::StabilitySeries;
use serde::Serialize;

/// Vertical extent of the equilibrium markers on the phase-plane chart.
const PHASE_MARKER_SPAN: [f64; 2] = [-0.01, 0.01];
const LEGEND_ANCHOR: Legend = Legend { x: 0.01, y: 0.99 };
const TEMPLATE: &str = "plotly_white";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Green,
    Red,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dash {
    Dash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineStyle {
    pub color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<Dash>,
}

/// What a trace depicts. Fixes the trace's color coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceRole {
    Data,
    StableEquilibrium,
    UnstableEquilibrium,
    ZeroLine,
}

impl TraceRole {
    pub fn style(self) -> LineStyle {
        match self {
            Self::Data => LineStyle {
                color: Color::Blue,
                dash: None,
            },
            Self::StableEquilibrium => LineStyle {
                color: Color::Green,
                dash: Some(Dash::Dash),
            },
            Self::UnstableEquilibrium => LineStyle {
                color: Color::Red,
                dash: Some(Dash::Dash),
            },
            Self::ZeroLine => LineStyle {
                color: Color::Black,
                dash: Some(Dash::Dash),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    kind: &'static str,
    mode: &'static str,
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub line: LineStyle,
    #[serde(skip)]
    pub role: TraceRole,
}

impl Trace {
    /// A line trace; fails when `x` and `y` differ in length or are empty.
    pub fn new(
        name: impl Into<String>,
        role: TraceRole,
        x: Vec<f64>,
        y: Vec<f64>,
    ) -> Result<Self, ChartError> {
        let name = name.into();
        if x.len() != y.len() {
            return Err(ChartError::LengthMismatch {
                trace: name,
                x: x.len(),
                y: y.len(),
            });
        }
        if x.is_empty() {
            return Err(ChartError::EmptySeries(name));
        }
        Ok(Self {
            kind: "scatter",
            mode: "lines",
            name,
            x,
            y,
            line: role.style(),
            role,
        })
    }

    fn horizontal(
        name: &str,
        role: TraceRole,
        x: &[f64],
        level: f64,
    ) -> Result<Self, ChartError> {
        Self::new(name, role, x.to_vec(), vec![level; x.len()])
    }

    fn vertical(
        name: &str,
        role: TraceRole,
        at: f64,
        span: [f64; 2],
        samples: usize,
    ) -> Result<Self, ChartError> {
        Self::new(name, role, vec![at; samples], linspace(span[0], span[1], samples))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl From<&str> for Title {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

impl Axis {
    fn titled(text: &str) -> Self {
        Self {
            title: text.into(),
            range: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Legend {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub legend: Legend,
    pub template: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub data: Vec<Trace>,
    pub layout: ChartLayout,
}

impl ChartSpec {
    fn new(title: &str, x_title: &str, y_title: &str, data: Vec<Trace>) -> Self {
        Self {
            data,
            layout: ChartLayout {
                title: title.into(),
                xaxis: Axis::titled(x_title),
                yaxis: Axis::titled(y_title),
                legend: LEGEND_ANCHOR,
                template: TEMPLATE.to_string(),
            },
        }
    }

    fn with_y_range(mut self, range: [f64; 2]) -> Self {
        self.layout.yaxis.range = Some(range);
        self
    }

    pub fn trace_count(&self) -> usize {
        self.data.len()
    }
}

/// The three dashboard charts, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub trajectory: ChartSpec,
    pub equilibrium_zoom: ChartSpec,
    pub phase_plane: ChartSpec,
}

fn trajectory_traces(series: &TimeSeries) -> Result<Vec<Trace>, ChartError> {
    Ok(vec![
        Trace::new(
            "Population p(t)",
            TraceRole::Data,
            series.time.clone(),
            series.population.clone(),
        )?,
        Trace::horizontal(
            "Stable equilibrium p=2",
            TraceRole::StableEquilibrium,
            &series.time,
            STABLE_EQUILIBRIUM,
        )?,
        Trace::horizontal(
            "Unstable equilibrium p=1",
            TraceRole::UnstableEquilibrium,
            &series.time,
            UNSTABLE_EQUILIBRIUM,
        )?,
    ])
}

/// Builds the full trajectory, zoomed equilibrium and phase-plane charts.
///
/// `zoom` clamps the y-axis of the second chart.
pub fn create_three_plots(
    trajectory: &TimeSeries,
    stability: &StabilitySeries,
    zoom: [f64; 2],
) -> Result<ChartSet, ChartError> {
    let full = ChartSpec::new(
        "Fish population over time",
        "Time (minutes)",
        "Population p(t)",
        trajectory_traces(trajectory)?,
    );

    let zoomed = ChartSpec::new(
        "Zoom on the equilibria p=1 (unstable) and p=2 (stable)",
        "Time (minutes)",
        "Population p(t)",
        trajectory_traces(trajectory)?,
    )
    .with_y_range(zoom);

    let samples = stability.rate.len();
    let phase = ChartSpec::new(
        "Stability analysis around the equilibria",
        "Population p",
        "Rate of change dp/dt",
        vec![
            Trace::new(
                "Rate of change dp/dt",
                TraceRole::Data,
                stability.population.clone(),
                stability.rate.clone(),
            )?,
            Trace::vertical(
                "Stable equilibrium p=2",
                TraceRole::StableEquilibrium,
                STABLE_EQUILIBRIUM,
                PHASE_MARKER_SPAN,
                samples,
            )?,
            Trace::vertical(
                "Unstable equilibrium p=1",
                TraceRole::UnstableEquilibrium,
                UNSTABLE_EQUILIBRIUM,
                PHASE_MARKER_SPAN,
                samples,
            )?,
            Trace::horizontal(
                "Steady state dp/dt = 0",
                TraceRole::ZeroLine,
                &stability.population,
                0.0,
            )?,
        ],
    );

    Ok(ChartSet {
        trajectory: full,
        equilibrium_zoom: zoomed,
        phase_plane: phase,
    })
}
