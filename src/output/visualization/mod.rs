//! Visualization module for groundwater plots
//!
//! This module turns a recorded [`Figure`](crate::output::surface::Figure)
//! into an image using the `plotters` library, and owns the color
//! conventions shared by every plot.
//!
//! # Organization
//!
//! - **config**: Raster configuration (`PlotConfig`) and color assignment (`Palette`)
//! - **render**: `plotters` rendering of figures to PNG/SVG
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use aquiplot::output::visualization::{render_figure, PlotConfig};
//!
//! let mut figure = Figure::new((800, 600));
//! plots.topview_and_xsection(&mut figure, None, &CompositeOptions::default())?;
//!
//! // PNG with the figure's own size
//! render_figure(&figure, "layout.png", None)?;
//!
//! // SVG rescaled to full HD
//! render_figure(&figure, "layout.svg", Some(&PlotConfig::sized(1920, 1080)))?;
//! ```

pub mod config;
pub mod render;

pub use config::{ColorSource, Palette, PlotConfig, INACTIVE_COLOR, LEAKY_LAYER_COLOR};
pub use render::render_figure;
