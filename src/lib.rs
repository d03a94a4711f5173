//! aquiplot: Diagnostic Plots for Analytic-Element Groundwater Models
//!
//! Plan views, annotated cross-sections, head and stream-function contours
//! and traced pathlines for multi-layer analytic-element models.
//!
//! # Architecture
//!
//! aquiplot is built on two core principles:
//!
//! 1. **Separation of Model and Drawing**
//!    - Models answer queries (what the heads and discharges are)
//!    - Renderers turn the answers into drawings (how they look)
//!
//! 2. **Retained Drawing Surface**
//!    - Every plot records primitives on a caller-owned [`Figure`](output::surface::Figure)
//!    - Plots compose by drawing on the same panels
//!    - Rasterisation to PNG/SVG happens once, at the end
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use aquiplot::prelude::*;
//!
//! // 1. Wrap a solved model
//! let plots = SteadyPlots::new(&model);
//!
//! // 2. Draw a plan view above a cross-section
//! let mut figure = Figure::new((800, 600));
//! let opts = CompositeOptions::with_window([-100.0, 100.0, -50.0, 50.0]);
//! plots.topview_and_xsection(&mut figure, None, &opts)?;
//!
//! // 3. Write the figure
//! render_figure(&figure, "model.png", None)?;
//! ```
//!
//! # Modules
//!
//! - [`model`]: Collaborator interfaces (model, elements, tracer)
//! - [`output`]: Drawing surface, contour extraction and rasterisation
//! - [`plots`]: Plan views, cross-sections, contours and pathlines

// Core modules
pub mod model;

pub mod output;
pub mod plots;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use aquiplot::prelude::*;
    //! ```
    pub use crate::model::{AquiferData,
                           Element,
                           Inhomogeneity,
                           LayerType,
                           Model,
                           ModelType,
                           ModelVariant,
                           Pathline,
                           TraceResult,
                           Tracer};
    pub use crate::output::{render_figure,
                            AxesId,
                            Figure,
                            Levels,
                            PlotConfig,
                            Window};
    pub use crate::plots::{CompositeOptions,
                           ContourOptions,
                           FluxContourOptions,
                           HeadAlongLineOptions,
                           PlotBase,
                           PlotError,
                           SteadyPlots,
                           TraceOptions,
                           TransientPlots,
                           VContourOptions,
                           XsectionOptions};
}
