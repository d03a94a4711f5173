//! Output module: the plotting surface and its rendering
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── surface.rs          ← Figure / Axes / artists (retained drawing state)
//! ├── contour.rs          ← Marching-squares iso-lines
//! └── visualization/      ← Rasterisation and colors
//!     ├── mod.rs
//!     ├── config.rs
//!     └── render.rs
//! ```
//!
//! # Design Philosophy
//!
//! Plot operations never touch a backend. They record artists on a caller
//! owned [`Figure`], which keeps every layout decision inspectable (panel
//! positions, limits, labels) and leaves the choice of file format to the
//! caller.

pub mod contour;
pub mod surface;
pub mod visualization;

pub use contour::{contour, ContourSet, Levels};
pub use surface::{Aspect, Axes, AxesId, Bbox, Figure, LineCollection, Window};
pub use visualization::{render_figure, ColorSource, Palette, PlotConfig};
