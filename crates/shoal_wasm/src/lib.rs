//! Browser bindings for the Shoal dashboard.
//!
//! The frontend owns widgets and Plotly rendering; this crate turns slider values into
//! chart specifications and raw series.

mod analysis;
mod dashboard;

pub use dashboard::WasmDashboard;
