//! Viewing lattice random walks.
//!
//! The walk itself comes from [`wander_core`]; this crate flattens it onto
//! the plane, summarises it as text and draws it with vello in a winit
//! window.

mod error;
mod layout;
mod plot;
mod projection;
mod report;
mod winit;

pub use error::PlotError;
pub use layout::{Bounds, Interval, Padding, PlotLayout};
pub use plot::{DataLayer, PaddingLayer, Plot};
pub use projection::{Projection, project};
pub use report::StatsReport;

/// Opens a window showing `plot` and blocks until it is closed.
pub fn launch(plot: &Plot) -> Result<(), PlotError> {
    let mut app = winit::WanderApp::new(plot);
    app.display()
}

/// Plots a walk with the given layout. See [`launch`].
pub fn plot_walk(path: &wander_core::Path, layout: PlotLayout) -> Result<(), PlotError> {
    let plot = Plot::from_walk(path, layout)?;
    launch(&plot)
}
