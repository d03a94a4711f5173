//! Model plots
//!
//! The renderers in this module turn model queries into drawings on a
//! [`Figure`](crate::output::surface::Figure):
//!
//! - [`geometry`]: cross-section line parametrization
//! - [`layers`]: aquifer / leaky-layer label numbering
//! - [`xsection`]: banded, annotated cross-sections (multi-layer and 1D strip models)
//! - [`layout`]: plan view stacked above a cross-section
//! - [`stream`]: cumulative stream-function grid from per-aquifer discharge
//! - [`trace`]: batches of colored pathlines
//! - [`base`], [`steady`], [`transient`]: the user-facing [`PlotBase`] surface
//!   and its two variants
//!
//! # Example
//!
//! ```rust,ignore
//! use aquiplot::prelude::*;
//!
//! let plots = SteadyPlots::new(&model);
//! let mut figure = Figure::new((800, 600));
//! let [top, bottom] = plots.topview_and_xsection(&mut figure, None, &CompositeOptions::default())?;
//! render_figure(&figure, "layout.png", None)?;
//! ```

pub mod base;
pub mod config;
pub mod geometry;
pub mod layers;
pub mod layout;
pub mod steady;
pub mod stream;
pub mod trace;
pub mod transient;
pub mod xsection;

use crate::output::surface::AxesId;

pub use base::PlotBase;
pub use config::{
    CompositeOptions, ContourOptions, FluxContourOptions, HeadAlongLineOptions, HorizontalAxis,
    IntoLayerSelection, Legend, LayoutAxis, Orientation, Separator, TraceOptions, Units,
    VContourOptions, XsectionOptions,
};
pub use geometry::CrossSectionLine;
pub use layers::LayerIndexer;
pub use stream::FluxGrid;
pub use steady::SteadyPlots;
pub use trace::Tracelines;
pub use transient::TransientPlots;

/// Errors raised by the plot renderers
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// Option value outside its allowed set; raised before anything is drawn
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Operation only available on a specialized renderer variant
    #[error("{0}() must be implemented by a specialized plot variant")]
    NotImplemented(&'static str),
    #[error("model query failed: {0}")]
    Model(String),
    #[error("pathline tracing failed: {0}")]
    Tracer(String),
    #[error("{0} does not exist in this figure")]
    MissingAxes(AxesId),
    #[error("failed to write progress output: {0}")]
    Io(#[from] std::io::Error),
}
