//! Model collaborators
//!
//! This module defines what the plotting core needs from the outside world:
//! a solved analytic-element [`Model`], the [`Element`]s and
//! [`Inhomogeneity`]s that draw themselves, and a [`Tracer`] that integrates
//! single pathlines.
//!
//! # Core Concepts
//!
//! - **AquiferData**: the layer stack (`ltype`, `z`) with per-layer parameters
//! - **ModelType / ModelVariant**: discriminators chosen when the model is
//!   built, read by the renderers instead of inspecting concrete model types
//! - **Pathline / TraceResult**: immutable tracer output
//!
//! # Implementing a Model
//!
//! ```rust,ignore
//! use aquiplot::model::{AquiferData, Element, Model, ModelType, ModelVariant};
//!
//! struct Uniform { aq: AquiferData }
//!
//! impl Model for Uniform {
//!     fn name(&self) -> &str { "Uniform" }
//!     fn model_type(&self) -> ModelType { ModelType::Steady }
//!     fn variant(&self) -> ModelVariant { ModelVariant::MultiLayer }
//!     fn aq(&self) -> &AquiferData { &self.aq }
//!     fn elements(&self) -> Vec<&dyn Element> { Vec::new() }
//!     // headgrid, headalongline, disvec ...
//! }
//! ```

pub mod data;
pub mod traits;

pub use data::{
    AquiferData, LayerType, ModelType, ModelVariant, PathSample, Pathline, TraceRecord, TraceResult,
};
pub use traits::{Element, InhomPlotRequest, Inhoms, Inhomogeneity, Model, TraceControls, Tracer};
