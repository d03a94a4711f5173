//! Per-call plot options
//!
//! Every user-facing plot takes one options struct with a `Default` impl
//! holding the usual values, so callers only spell out what they change:
//!
//! ```rust,ignore
//! let opts = XsectionOptions {
//!     xy: Some([(0.0, 0.0), (100.0, 0.0)]),
//!     params: true,
//!     ..XsectionOptions::default()
//! };
//! ```
//!
//! String-valued selectors (`"s"`, `"hor"`, ...) are parsed with `FromStr`
//! into the enums below; an unknown value is a
//! [`PlotError::InvalidConfiguration`].

use std::str::FromStr;

use plotters::style::RGBColor;

use super::PlotError;
use crate::output::contour::Levels;
use crate::output::surface::Window;
use crate::output::visualization::ColorSource;

// =================================================================================================
// Selectors
// =================================================================================================

/// Quantity along the horizontal axis of a cross-section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAxis {
    /// Distance along the line, starting at 0 (`"s"`)
    #[default]
    Distance,
    /// x-coordinate (`"x"`)
    X,
    /// y-coordinate (`"y"`)
    Y,
}

impl FromStr for HorizontalAxis {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s" => Ok(HorizontalAxis::Distance),
            "x" => Ok(HorizontalAxis::X),
            "y" => Ok(HorizontalAxis::Y),
            other => Err(PlotError::InvalidConfiguration(format!(
                "horizontal_axis must be 'x', 'y', or 's', got '{other}'"
            ))),
        }
    }
}

/// Direction of the cross-section in a plan + cross-section layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutAxis {
    /// Along x through the vertical middle of the window
    #[default]
    X,
    /// Along y through the horizontal middle of the window
    Y,
}

impl FromStr for LayoutAxis {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(LayoutAxis::X),
            "y" => Ok(LayoutAxis::Y),
            other => Err(PlotError::InvalidConfiguration(format!(
                "horizontal_axis must be 'x' or 'y', got '{other}'"
            ))),
        }
    }
}

impl From<LayoutAxis> for HorizontalAxis {
    fn from(axis: LayoutAxis) -> Self {
        match axis {
            LayoutAxis::X => HorizontalAxis::X,
            LayoutAxis::Y => HorizontalAxis::Y,
        }
    }
}

/// Panels drawn by the pathline tracer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Plan view only (`"hor"`)
    #[default]
    Plan,
    /// Vertical cross-section only (`"ver"`)
    Profile,
    /// Plan view above cross-section (`"both"`)
    Both,
}

impl Orientation {
    pub fn plan(&self) -> bool {
        matches!(self, Orientation::Plan | Orientation::Both)
    }

    pub fn profile(&self) -> bool {
        matches!(self, Orientation::Profile | Orientation::Both)
    }
}

impl FromStr for Orientation {
    type Err = PlotError;

    /// Accepts `"both"` and anything starting with `"hor"` or `"ver"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "both" {
            Ok(Orientation::Both)
        } else if s.starts_with("hor") {
            Ok(Orientation::Plan)
        } else if s.starts_with("ver") {
            Ok(Orientation::Profile)
        } else {
            Err(PlotError::InvalidConfiguration(format!(
                "orientation must be 'hor', 'ver', or 'both', got '{s}'"
            )))
        }
    }
}

/// Separator between parameter fragments of a layer annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    /// `", "`
    #[default]
    Comma,
    /// `"\n"`, one parameter per line
    Newline,
}

impl Separator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Separator::Comma => ", ",
            Separator::Newline => "\n",
        }
    }
}

impl FromStr for Separator {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ", " => Ok(Separator::Comma),
            "\n" => Ok(Separator::Newline),
            other => Err(PlotError::InvalidConfiguration(format!(
                "sep must be ', ' or '\\n', got {other:?}"
            ))),
        }
    }
}

/// Unit strings appended to steady parameter annotations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Units {
    /// Unit of hydraulic conductivity, e.g. `"m/d"`
    pub k: Option<String>,
    /// Unit of resistance, e.g. `"d"`
    pub c: Option<String>,
}

impl Units {
    pub fn new(k: impl Into<String>, c: impl Into<String>) -> Self {
        Self { k: Some(k.into()), c: Some(c.into()) }
    }
}

/// Legend of a contour plot
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Legend {
    Off,
    /// `"layer {i}"` per contoured layer
    #[default]
    Layers,
    /// Caller-supplied names, one per contoured layer
    Names(Vec<String>),
}

impl From<bool> for Legend {
    fn from(on: bool) -> Self {
        if on { Legend::Layers } else { Legend::Off }
    }
}

impl From<Vec<String>> for Legend {
    fn from(names: Vec<String>) -> Self {
        Legend::Names(names)
    }
}

// =================================================================================================
// Layer selections
// =================================================================================================

/// Trait for accepting a single layer, a list of layers, or "all layers"
///
/// Allows `with_layers(0)`, `with_layers(vec![0, 2])`, `with_layers(&[1, 2][..])`
/// and `with_layers(ALL_LAYERS)`.
pub trait IntoLayerSelection {
    fn into_layer_selection(self) -> Option<Vec<usize>>;
}

impl IntoLayerSelection for usize {
    fn into_layer_selection(self) -> Option<Vec<usize>> {
        Some(vec![self])
    }
}

impl IntoLayerSelection for Vec<usize> {
    fn into_layer_selection(self) -> Option<Vec<usize>> {
        Some(self)
    }
}

impl IntoLayerSelection for &[usize] {
    fn into_layer_selection(self) -> Option<Vec<usize>> {
        Some(self.to_vec())
    }
}

impl<const N: usize> IntoLayerSelection for [usize; N] {
    fn into_layer_selection(self) -> Option<Vec<usize>> {
        Some(self.to_vec())
    }
}

impl<T: IntoLayerSelection> IntoLayerSelection for Option<T> {
    fn into_layer_selection(self) -> Option<Vec<usize>> {
        self.and_then(|l| l.into_layer_selection())
    }
}

/// Constant selecting every layer
pub const ALL_LAYERS: Option<usize> = None;

// =================================================================================================
// Number formatting
// =================================================================================================

/// Format `value` with a format spec: `""`, `".Nf"`, `".Ne"` or `".Ng"`
///
/// `""` gives the shortest representation that round-trips (`10.0`, `1e-05`).
/// Exponents always carry a sign and at least two digits.
pub fn format_value(value: f64, fmt: &str) -> Result<String, PlotError> {
    if fmt.is_empty() {
        return Ok(format_shortest(value));
    }

    let invalid = || PlotError::InvalidConfiguration(format!("unsupported number format '{fmt}'"));
    let spec = fmt.strip_prefix('.').ok_or_else(invalid)?;
    let kind = spec.chars().last().ok_or_else(invalid)?;
    let precision: usize = spec[..spec.len() - kind.len_utf8()].parse().map_err(|_| invalid())?;

    match kind {
        'f' => Ok(format!("{value:.precision$}")),
        'e' => Ok(with_exponent_padding(&format!("{value:.precision$e}"))),
        'g' => Ok(format_general(value, precision)),
        _ => Err(invalid()),
    }
}

fn format_shortest(value: f64) -> String {
    let magnitude = value.abs();
    if value.is_finite() && magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        with_exponent_padding(&format!("{value:e}"))
    } else {
        format!("{value:?}")
    }
}

fn format_general(value: f64, precision: usize) -> String {
    let p = precision.max(1);
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    let sci = format!("{:.*e}", p - 1, value);
    let exp: i32 = sci
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);

    if exp < -4 || exp >= p as i32 {
        let (mantissa, _) = sci.split_once('e').unwrap_or((&sci, "0"));
        with_exponent_padding(&format!("{}e{exp}", trim_zeros(mantissa)))
    } else {
        let decimals = (p as i32 - 1 - exp).max(0) as usize;
        trim_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// `1.5e-5` → `1.5e-05`, `2e3` → `2e+03`
fn with_exponent_padding(s: &str) -> String {
    match s.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(e) => format!("{mantissa}e{}{:02}", if e < 0 { '-' } else { '+' }, e.abs()),
            Err(_) => s.to_string(),
        },
        None => s.to_string(),
    }
}

// =================================================================================================
// Option structs
// =================================================================================================

/// Options of a single cross-section
#[derive(Debug, Clone, PartialEq)]
pub struct XsectionOptions {
    /// Line endpoints `[(x0, y0), (x1, y1)]`; `None` draws a unit-length section without ticks
    pub xy: Option<[(f64, f64); 2]>,
    /// Layer labels ("aquifer 0", "leaky layer 1")
    pub labels: bool,
    /// Parameter annotation
    pub params: bool,
    /// Inhomogeneity names (1D strip models only)
    pub names: bool,
    /// Number format of parameter values
    pub fmt: String,
    pub units: Option<Units>,
    /// Reference water level override for 1D strip elements
    pub hstar: Option<f64>,
    pub horizontal_axis: HorizontalAxis,
    pub sep: Separator,
}

impl Default for XsectionOptions {
    fn default() -> Self {
        Self {
            xy: None,
            labels: true,
            params: false,
            names: false,
            fmt: String::new(),
            units: None,
            hstar: None,
            horizontal_axis: HorizontalAxis::Distance,
            sep: Separator::Comma,
        }
    }
}

impl XsectionOptions {
    /// Section along `xy` with default annotation
    pub fn along(xy: [(f64, f64); 2]) -> Self {
        Self { xy: Some(xy), ..Self::default() }
    }
}

/// Options of the plan view + cross-section layout
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeOptions {
    /// Plot window; derived from the plan view limits when `None`
    pub win: Option<Window>,
    /// Height fraction of the plan view panel
    pub topfigfrac: f64,
    pub layers: Option<Vec<usize>>,
    pub horizontal_axis: LayoutAxis,
    /// Cross-section options; `xy` and `horizontal_axis` are overridden by the layout
    pub xsection: XsectionOptions,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            win: None,
            topfigfrac: 0.8,
            layers: None,
            horizontal_axis: LayoutAxis::X,
            xsection: XsectionOptions { labels: false, ..XsectionOptions::default() },
        }
    }
}

impl CompositeOptions {
    pub fn with_window(win: impl Into<Window>) -> Self {
        Self { win: Some(win.into()), ..Self::default() }
    }

    pub fn with_layers(mut self, layers: impl IntoLayerSelection) -> Self {
        self.layers = layers.into_layer_selection();
        self
    }
}

/// Options of a plan-view head contour plot
#[derive(Debug, Clone, PartialEq)]
pub struct ContourOptions {
    pub win: Window,
    /// Grid points `(nx, ny)`
    pub ngr: (usize, usize),
    /// Contoured layers; `None` contours every aquifer
    pub layers: Option<Vec<usize>>,
    pub levels: Levels,
    /// Overlay the plan view of the elements
    pub layout: bool,
    /// Label contours
    pub labels: bool,
    /// Label decimals; `None` uses the renderer default (steady 0, transient 1)
    pub decimals: Option<usize>,
    /// One color per contoured layer, cycled
    pub color: ColorSource,
    pub legend: Legend,
    /// Keep the contour sets in the result
    pub return_contours: bool,
    /// Time of a transient model
    pub t: f64,
}

impl ContourOptions {
    pub fn new(win: impl Into<Window>) -> Self {
        Self {
            win: win.into(),
            ngr: (20, 20),
            layers: Some(vec![0]),
            levels: Levels::default(),
            layout: true,
            labels: true,
            decimals: None,
            color: ColorSource::Cycle,
            legend: Legend::Layers,
            return_contours: false,
            t: 1.0,
        }
    }

    /// Same number of grid points along x and y
    pub fn with_ngr(mut self, n: usize) -> Self {
        self.ngr = (n, n);
        self
    }

    pub fn with_layers(mut self, layers: impl IntoLayerSelection) -> Self {
        self.layers = layers.into_layer_selection();
        self
    }

    pub fn with_levels(mut self, levels: impl Into<Levels>) -> Self {
        self.levels = levels.into();
        self
    }

    pub fn at_time(mut self, t: f64) -> Self {
        self.t = t;
        self
    }
}

/// Options of a head contour plot in a vertical cross-section
#[derive(Debug, Clone, PartialEq)]
pub struct VContourOptions {
    /// Line from `(x1, y1)` to `(x2, y2)`
    pub win: Window,
    /// Points along the line
    pub n: usize,
    pub levels: Levels,
    pub labels: bool,
    pub decimals: usize,
    /// Contour color; next color of the panel cycle when `None`
    pub color: Option<RGBColor>,
    /// Interpolate between layer centers instead of constant heads per layer
    pub vinterp: bool,
    /// Offset of the first and last point from the window corners
    pub nudge: f64,
    /// Overlay a label-free cross-section
    pub layout: bool,
    pub horizontal_axis: HorizontalAxis,
}

impl VContourOptions {
    pub fn new(win: impl Into<Window>, n: usize) -> Self {
        Self {
            win: win.into(),
            n,
            levels: Levels::default(),
            labels: true,
            decimals: 0,
            color: None,
            vinterp: true,
            nudge: 1e-6,
            layout: true,
            horizontal_axis: HorizontalAxis::Distance,
        }
    }
}

/// Options of a stream-function contour plot of a 1D model
#[derive(Debug, Clone, PartialEq)]
pub struct FluxContourOptions {
    pub x1: f64,
    pub x2: f64,
    pub nx: usize,
    pub levels: Levels,
    pub labels: bool,
    pub decimals: usize,
    pub color: Option<RGBColor>,
    pub nudge: f64,
    pub layout: bool,
    pub horizontal_axis: HorizontalAxis,
}

impl FluxContourOptions {
    pub fn new(x1: f64, x2: f64, nx: usize, levels: impl Into<Levels>) -> Self {
        Self {
            x1,
            x2,
            nx,
            levels: levels.into(),
            labels: false,
            decimals: 0,
            color: None,
            nudge: 1e-6,
            layout: true,
            horizontal_axis: HorizontalAxis::Distance,
        }
    }
}

/// Options of a transient head-along-line plot
#[derive(Debug, Clone, PartialEq)]
pub struct HeadAlongLineOptions {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
    pub npoints: usize,
    /// Times to plot
    pub t: Vec<f64>,
    pub layers: Vec<usize>,
    /// Distance added to the start of the line
    pub sstart: f64,
    /// Line color; panel cycle when `None`
    pub color: Option<RGBColor>,
    pub lw: f64,
    pub legend: bool,
    pub grid: bool,
}

impl Default for HeadAlongLineOptions {
    fn default() -> Self {
        Self {
            x1: 0.0,
            x2: 1.0,
            y1: 0.0,
            y2: 0.0,
            npoints: 100,
            t: vec![1.0],
            layers: vec![0],
            sstart: 0.0,
            color: None,
            lw: 1.0,
            legend: true,
            grid: true,
        }
    }
}

impl HeadAlongLineOptions {
    pub fn with_layers(mut self, layers: impl IntoLayerSelection) -> Self {
        if let Some(layers) = layers.into_layer_selection() {
            self.layers = layers;
        }
        self
    }
}

/// Options of a batch of traced pathlines
#[derive(Debug, Clone, PartialEq)]
pub struct TraceOptions {
    /// Maximum horizontal step
    pub hstepmax: f64,
    pub vstepfrac: f64,
    pub tmax: f64,
    pub nstepmax: usize,
    /// Print one `.` per trace and a final newline
    pub progress: bool,
    /// Passed to the tracer to suppress its own messages
    pub silent: bool,
    /// Colors indexed by aquifer number, cycled
    pub color: ColorSource,
    pub orientation: Orientation,
    /// Tracing window; unbounded when `None`
    pub win: Option<Window>,
    /// Keep the traces in the result
    pub return_traces: bool,
    /// Ask the tracer for termination metadata
    pub metadata: bool,
}

impl TraceOptions {
    pub fn new(hstepmax: f64) -> Self {
        Self {
            hstepmax,
            vstepfrac: 0.2,
            tmax: 1e12,
            nstepmax: 100,
            progress: true,
            silent: false,
            color: ColorSource::Cycle,
            orientation: Orientation::Plan,
            win: None,
            return_traces: false,
            metadata: false,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
