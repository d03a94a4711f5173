//! Collaborator traits
//!
//! The plotting core never solves anything. It queries a [`Model`] for
//! heads, discharge and layer data, asks [`Element`]s and
//! [`Inhomogeneity`]s to draw themselves, and asks a [`Tracer`] for
//! pathlines. All collaborator failures are reported as `Err(String)`.

use nalgebra::DVector;
use ndarray::Array3;

use super::data::{AquiferData, ModelType, ModelVariant, TraceResult};
use crate::output::surface::{Axes, Window};
use crate::plots::config::{Separator, Units};

// =================================================================================================
// Model
// =================================================================================================

/// Analytic-element model queried by the plots
///
/// # Responsibility
///
/// Provides heads and discharges of an already solved model and the layer
/// metadata needed to annotate cross-sections. Read-only during a render.
pub trait Model {
    /// Name used in log messages
    fn name(&self) -> &str;

    /// Steady or transient
    fn model_type(&self) -> ModelType;

    /// Variant chosen at construction; selects annotation content and the
    /// cross-section rendering path
    fn variant(&self) -> ModelVariant;

    /// Layer stack of the background aquifer
    fn aq(&self) -> &AquiferData;

    /// Layer stack valid at `(x, y)` (inside an inhomogeneity, if any)
    fn find_aquifer_data(&self, x: f64, y: f64) -> &AquiferData {
        let _ = (x, y);
        self.aq()
    }

    /// Elements drawn in plan view and on 1D cross-sections
    fn elements(&self) -> Vec<&dyn Element>;

    /// Inhomogeneities of a cross-section model
    fn inhoms(&self) -> Inhoms<'_> {
        Inhoms::Ordered(Vec::new())
    }

    /// Heads on a grid, shape `(layers.len(), yg.len(), xg.len())`
    ///
    /// `t` is the time for transient models and ignored by steady ones.
    fn headgrid(&self, xg: &[f64], yg: &[f64], layers: &[usize], t: Option<f64>) -> Result<Array3<f64>, String>;

    /// Heads at points `(x[k], y[k])`, shape `(nlayers, ntimes, x.len())`
    ///
    /// `layers = None` returns every aquifer; steady models return one time.
    fn headalongline(
        &self,
        x: &[f64],
        y: &[f64],
        times: Option<&[f64]>,
        layers: Option<&[usize]>,
    ) -> Result<Array3<f64>, String>;

    /// Discharge vector `(Qx, Qy)` per aquifer at `(x, y)`
    fn disvec(&self, x: f64, y: f64) -> Result<(DVector<f64>, DVector<f64>), String>;
}

/// Inhomogeneity collection as held by the model
pub enum Inhoms<'a> {
    /// Plain ordered list (steady models)
    Ordered(Vec<&'a dyn Inhomogeneity>),
    /// Named entries in insertion order (transient models)
    Keyed(Vec<(String, &'a dyn Inhomogeneity)>),
}

impl<'a> Inhoms<'a> {
    /// Inhomogeneities in drawing order
    pub fn values(&self) -> Vec<&'a dyn Inhomogeneity> {
        match self {
            Inhoms::Ordered(list) => list.clone(),
            Inhoms::Keyed(entries) => entries.iter().map(|(_, inhom)| *inhom).collect(),
        }
    }
}

// =================================================================================================
// Elements
// =================================================================================================

/// Analytic element with its own plot primitive
pub trait Element {
    /// Layers the element acts in
    fn layers(&self) -> &[usize];

    /// Draw the element; `layers` restricts drawing when given
    fn plot(&self, ax: &mut Axes, layers: Option<&[usize]>);

    /// Left and right x-extent of strip elements, when defined
    fn strip_bounds(&self) -> [Option<f64>; 2] {
        [None, None]
    }

    /// Draw on a 1D cross-section with an optional reference water level
    ///
    /// Elements without an overridable reference level ignore `hstar`.
    fn plot_with_reference_level(&self, ax: &mut Axes, hstar: Option<f64>) {
        let _ = hstar;
        self.plot(ax, None);
    }
}

/// Request passed to an inhomogeneity drawing its own label/parameter block
#[derive(Debug, Clone)]
pub struct InhomPlotRequest<'a> {
    pub labels: bool,
    pub params: bool,
    pub names: bool,
    pub x1: f64,
    pub x2: f64,
    pub fmt: &'a str,
    pub units: Option<&'a Units>,
    pub sep: Separator,
}

/// Strip inhomogeneity of a 1D cross-section model
pub trait Inhomogeneity {
    fn plot(&self, ax: &mut Axes, request: &InhomPlotRequest<'_>);
}

// =================================================================================================
// Tracer
// =================================================================================================

/// Step and termination controls of a single trace
#[derive(Debug, Clone, PartialEq)]
pub struct TraceControls {
    /// Maximum horizontal step
    pub hstepmax: f64,
    /// Maximum vertical step as a fraction of the layer thickness
    pub vstepfrac: f64,
    /// Maximum travel time
    pub tmax: f64,
    /// Maximum number of steps
    pub nstepmax: usize,
    /// Tracing stops when the particle leaves this window
    pub win: Window,
    /// Suppress the tracer's own messages
    pub silent: bool,
}

/// Single-pathline integrator
pub trait Tracer {
    /// Trace one particle from `start = [x, y, z]`
    ///
    /// With `metadata = true` the result must be [`TraceResult::Detailed`].
    fn trace(
        &self,
        model: &dyn Model,
        start: [f64; 3],
        controls: &TraceControls,
        metadata: bool,
    ) -> Result<TraceResult, String>;
}
