//! Mock collaborators for testing
//!
//! The model has a closed-form head field (uniform flow plus a layer offset),
//! so grids, contours and stream functions can be checked exactly.

use std::cell::RefCell;

use aquiplot::model::{
    AquiferData, Element, InhomPlotRequest, Inhomogeneity, Inhoms, LayerType, Model, ModelType, ModelVariant,
    PathSample, Pathline, TraceControls, TraceRecord, TraceResult, Tracer,
};
use aquiplot::output::surface::Axes;
use nalgebra::DVector;
use ndarray::Array3;
use plotters::style::{BLACK, BLUE};

// =================================================================================================
// Elements
// =================================================================================================

/// Element drawn as a polyline through its points
pub struct MockElement {
    pub layers: Vec<usize>,
    pub points: Vec<(f64, f64)>,
    pub bounds: [Option<f64>; 2],
    /// Draws its reference level as a horizontal line on cross-sections
    pub uses_reference_level: bool,
}

impl MockElement {
    pub fn well(x: f64, y: f64, layers: Vec<usize>) -> Self {
        Self { layers, points: vec![(x, y)], bounds: [None, None], uses_reference_level: false }
    }

    pub fn line(points: Vec<(f64, f64)>, layers: Vec<usize>) -> Self {
        Self { layers, points, bounds: [None, None], uses_reference_level: false }
    }

    /// Strip element of a 1D model from `xl` to `xr`
    pub fn strip(xl: f64, xr: f64) -> Self {
        Self {
            layers: vec![0],
            points: vec![(xl, 0.0), (xr, 0.0)],
            bounds: [Some(xl), Some(xr)],
            uses_reference_level: false,
        }
    }

    pub fn with_reference_level(mut self) -> Self {
        self.uses_reference_level = true;
        self
    }
}

impl Element for MockElement {
    fn layers(&self) -> &[usize] {
        &self.layers
    }

    fn plot(&self, ax: &mut Axes, _layers: Option<&[usize]>) {
        if self.points.len() == 1 {
            ax.scatter(self.points.clone(), BLACK, 3);
        } else {
            ax.plot(self.points.clone(), BLACK, 1.0, None);
        }
    }

    fn strip_bounds(&self) -> [Option<f64>; 2] {
        self.bounds
    }

    fn plot_with_reference_level(&self, ax: &mut Axes, hstar: Option<f64>) {
        if self.uses_reference_level {
            ax.axhline(hstar.unwrap_or(0.0), BLUE, 1.0);
        } else {
            self.plot(ax, None);
        }
    }
}

/// Strip inhomogeneity writing its name (and a parameter tag) into its strip
pub struct MockInhom {
    pub name: String,
    pub x1: f64,
    pub x2: f64,
}

impl MockInhom {
    pub fn new(name: &str, x1: f64, x2: f64) -> Self {
        Self { name: name.to_string(), x1, x2 }
    }
}

impl Inhomogeneity for MockInhom {
    fn plot(&self, ax: &mut Axes, request: &InhomPlotRequest<'_>) {
        let left = self.x1.max(request.x1);
        let right = self.x2.min(request.x2);
        let xc = 0.5 * (left + right);
        if request.names {
            ax.text(xc, 1.0, self.name.clone(), BLACK);
        }
        if request.params {
            ax.text(xc, -1.0, format!("params{}", request.sep.as_str()), BLACK);
        }
        if request.labels {
            ax.text(xc, 0.0, format!("strip [{left}, {right}]"), BLACK);
        }
    }
}

// =================================================================================================
// Model
// =================================================================================================

/// Uniform flow to the right with gradient `gradient`
///
/// - head: `h = -gradient * x + layer (+ 0.1 t)`
/// - discharge in aquifer `i`: `Qx = kaq[i] * gradient`
pub struct LayeredModel {
    pub aq: AquiferData,
    pub model_type: ModelType,
    pub variant: ModelVariant,
    pub elements: Vec<MockElement>,
    pub inhoms: Vec<MockInhom>,
    pub gradient: f64,
}

impl LayeredModel {
    pub fn steady(aq: AquiferData) -> Self {
        Self {
            aq,
            model_type: ModelType::Steady,
            variant: ModelVariant::MultiLayer,
            elements: Vec::new(),
            inhoms: Vec::new(),
            gradient: 0.01,
        }
    }

    pub fn transient(aq: AquiferData) -> Self {
        Self { model_type: ModelType::Transient, ..Self::steady(aq) }
    }

    pub fn with_variant(mut self, variant: ModelVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_elements(mut self, elements: Vec<MockElement>) -> Self {
        self.elements = elements;
        self
    }

    pub fn with_inhoms(mut self, inhoms: Vec<MockInhom>) -> Self {
        self.inhoms = inhoms;
        self
    }

    fn head(&self, x: f64, layer: usize, t: Option<f64>) -> f64 {
        -self.gradient * x + layer as f64 + 0.1 * t.unwrap_or(0.0)
    }
}

impl Model for LayeredModel {
    fn name(&self) -> &str {
        "LayeredModel"
    }

    fn model_type(&self) -> ModelType {
        self.model_type
    }

    fn variant(&self) -> ModelVariant {
        self.variant
    }

    fn aq(&self) -> &AquiferData {
        &self.aq
    }

    fn elements(&self) -> Vec<&dyn Element> {
        self.elements.iter().map(|e| e as &dyn Element).collect()
    }

    fn inhoms(&self) -> Inhoms<'_> {
        let list = self.inhoms.iter().map(|i| i as &dyn Inhomogeneity);
        match self.model_type {
            ModelType::Steady => Inhoms::Ordered(list.collect()),
            ModelType::Transient => Inhoms::Keyed(
                self.inhoms
                    .iter()
                    .map(|i| (i.name.clone(), i as &dyn Inhomogeneity))
                    .collect(),
            ),
        }
    }

    fn headgrid(&self, xg: &[f64], yg: &[f64], layers: &[usize], t: Option<f64>) -> Result<Array3<f64>, String> {
        if let Some(bad) = layers.iter().find(|l| **l >= self.aq.naq()) {
            return Err(format!("layer {bad} does not exist"));
        }
        Ok(Array3::from_shape_fn((layers.len(), yg.len(), xg.len()), |(l, _, i)| {
            self.head(xg[i], layers[l], t)
        }))
    }

    fn headalongline(
        &self,
        x: &[f64],
        _y: &[f64],
        times: Option<&[f64]>,
        layers: Option<&[usize]>,
    ) -> Result<Array3<f64>, String> {
        let all: Vec<usize> = (0..self.aq.naq()).collect();
        let layers = layers.unwrap_or(&all);
        let times: Vec<Option<f64>> = match times {
            Some(ts) => ts.iter().map(|t| Some(*t)).collect(),
            None => vec![None],
        };
        Ok(Array3::from_shape_fn((layers.len(), times.len(), x.len()), |(l, j, k)| {
            self.head(x[k], layers[l], times[j])
        }))
    }

    fn disvec(&self, _x: f64, _y: f64) -> Result<(DVector<f64>, DVector<f64>), String> {
        let qx = DVector::from_iterator(self.aq.naq(), self.aq.kaq().iter().map(|k| k * self.gradient));
        Ok((qx, DVector::zeros(self.aq.naq())))
    }
}

// =================================================================================================
// Tracers
// =================================================================================================

/// Layer containing elevation `z` (top layer above the model, base layer below)
pub fn layer_at(aq: &AquiferData, z: f64) -> usize {
    let bounds = aq.z();
    (0..aq.nlayers())
        .find(|&i| bounds[i] >= z && z > bounds[i + 1])
        .unwrap_or(if z > aq.top() { 0 } else { aq.nlayers() - 1 })
}

/// Straight pathlines: `nsteps` steps of `hstepmax` in +x, dropping `dz` per step
pub struct StraightTracer {
    pub nsteps: usize,
    pub dz: f64,
    /// Metadata flag of every call
    pub calls: RefCell<Vec<bool>>,
}

impl StraightTracer {
    pub fn new(nsteps: usize, dz: f64) -> Self {
        Self { nsteps, dz, calls: RefCell::new(Vec::new()) }
    }
}

impl Tracer for StraightTracer {
    fn trace(
        &self,
        model: &dyn Model,
        start: [f64; 3],
        controls: &TraceControls,
        metadata: bool,
    ) -> Result<TraceResult, String> {
        self.calls.borrow_mut().push(metadata);
        let aq = model.aq();
        let samples: Vec<PathSample> = (0..=self.nsteps)
            .map(|k| {
                let k = k as f64;
                PathSample::from([start[0] + k * controls.hstepmax, start[1], start[2] - k * self.dz, k])
            })
            .collect();
        let layers = samples.iter().map(|s| layer_at(aq, s.z)).collect();
        let pathline = Pathline::new(samples, layers)?;

        if metadata {
            Ok(TraceResult::Detailed(TraceRecord {
                pathline,
                status: 1,
                message: "reached maximum number of steps".to_string(),
                complete: true,
            }))
        } else {
            Ok(TraceResult::Plain(pathline))
        }
    }
}

/// Tracer that always fails
pub struct FailingTracer;

impl Tracer for FailingTracer {
    fn trace(&self, _: &dyn Model, start: [f64; 3], _: &TraceControls, _: bool) -> Result<TraceResult, String> {
        Err(format!("start point {start:?} lies outside the model"))
    }
}

/// Layer type at elevation `z`, for assertions
pub fn ltype_at(aq: &AquiferData, z: f64) -> LayerType {
    aq.ltype()[layer_at(aq, z)]
}
