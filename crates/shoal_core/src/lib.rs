pub mod chart;
pub mod dashboard;
pub mod equilibrium;
pub mod error;
pub mod population;
pub mod sampling;
pub mod settings;
pub mod stability;
/// The `shoal_core` crate provides the model and chart construction behind the Shoal
/// population dashboard. Everything here is a pure transformation from parameters to
/// series and chart specifications; rendering is left to the frontend.
///
/// Key components:
/// - **Population**: the closed-form trajectory `p(t)` and its validated parameters.
/// - **Stability**: the quadratic rate law `dp/dt = r p - c p^2 - d` sampled over population.
/// - **Equilibrium**: closed-form roots of the rate law and their stability classification.
/// - **Chart**: Plotly-shaped chart specifications for the three dashboard views.
/// - **Dashboard**: one render pass from slider values to charts, layout and notes.
pub mod traits;
