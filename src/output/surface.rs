//! Retained-mode plotting surface
//!
//! A [`Figure`] owns a list of [`Axes`] panels. Every plotting operation in
//! this crate receives `&mut Figure` (plus an [`AxesId`] when it should draw
//! into an existing panel) and records drawing primitives ([`Artist`]s) on
//! the panels. Nothing is rasterised until the caller hands the figure to
//! [`crate::output::visualization::render_figure`].
//!
//! # Coordinates
//!
//! - Panel positions ([`Bbox`]) are fractions of the figure, origin at the
//!   bottom-left corner.
//! - Artist coordinates are data coordinates of the panel they live on.
//!
//! # Aspect handling
//!
//! A panel with [`Aspect::Equal`] shrinks its box (centered in the original
//! slot) until one data unit covers the same number of pixels along both
//! axes. [`Figure::position`] applies this adjustment before reporting the
//! active position, so layouts that align panels always see the final box.

use plotters::style::RGBColor;

use crate::output::contour::ContourSet;
use crate::plots::PlotError;

/// Default figure size in pixels (6.4 x 4.8 inches at 100 dpi)
pub const DEFAULT_FIGURE_SIZE: (u32, u32) = (640, 480);

// Subplot margins as figure fractions
const SUBPLOT_LEFT: f64 = 0.125;
const SUBPLOT_RIGHT: f64 = 0.9;
const SUBPLOT_BOTTOM: f64 = 0.11;
const SUBPLOT_TOP: f64 = 0.88;
const SUBPLOT_HSPACE: f64 = 0.2;

// =================================================================================================
// Geometry helpers
// =================================================================================================

/// Rectangular plot window `[x1, x2, y1, y2]` in model coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
}

impl Window {
    pub fn new(x1: f64, x2: f64, y1: f64, y2: f64) -> Self {
        Self { x1, x2, y1, y2 }
    }

    /// Window used by the tracer when the caller gives none
    pub fn unbounded() -> Self {
        Self::new(-1e30, 1e30, -1e30, 1e30)
    }

    pub fn x_mid(&self) -> f64 {
        0.5 * (self.x1 + self.x2)
    }

    pub fn y_mid(&self) -> f64 {
        0.5 * (self.y1 + self.y2)
    }
}

impl From<[f64; 4]> for Window {
    fn from(w: [f64; 4]) -> Self {
        Self::new(w[0], w[1], w[2], w[3])
    }
}

/// Panel bounding box in figure fractions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bbox {
    pub x0: f64,
    pub y0: f64,
    pub width: f64,
    pub height: f64,
}

impl Bbox {
    pub fn new(x0: f64, y0: f64, width: f64, height: f64) -> Self {
        Self { x0, y0, width, height }
    }
}

/// Handle to a panel of a [`Figure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxesId(usize);

impl AxesId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for AxesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "axes #{}", self.0)
    }
}

/// Data aspect ratio policy of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aspect {
    /// Fill the panel box, independent axis scales
    #[default]
    Auto,
    /// One data unit has the same length on both axes; the box shrinks to fit
    Equal,
}

// =================================================================================================
// Artists
// =================================================================================================

/// Set of two-point segments sharing one draw call, each with its own color
///
/// Segments are appended one polyline at a time so the collection remembers
/// how many polylines contributed to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineCollection {
    segments: Vec<[(f64, f64); 2]>,
    colors: Vec<RGBColor>,
    polylines: usize,
}

impl LineCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the segments joining consecutive `points`
    ///
    /// `colors[k]` colors the segment `points[k] -> points[k + 1]`.
    pub fn push_polyline(&mut self, points: &[(f64, f64)], colors: &[RGBColor]) {
        debug_assert_eq!(colors.len(), points.len().saturating_sub(1));
        for (pair, color) in points.windows(2).zip(colors) {
            self.segments.push([pair[0], pair[1]]);
            self.colors.push(*color);
        }
        self.polylines += 1;
    }

    pub fn segments(&self) -> &[[(f64, f64); 2]] {
        &self.segments
    }

    pub fn colors(&self) -> &[RGBColor] {
        &self.colors
    }

    pub fn polyline_count(&self) -> usize {
        self.polylines
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Drawing primitive recorded on a panel
#[derive(Debug, Clone, PartialEq)]
pub enum Artist {
    /// Horizontal band spanning the full panel width
    HSpan { ymin: f64, ymax: f64, color: RGBColor },
    /// Horizontal line spanning the full panel width
    HLine { y: f64, color: RGBColor, width: f64 },
    /// Text centered on `(x, y)`; `\n` starts a new line
    Text { x: f64, y: f64, text: String, color: RGBColor },
    /// Polyline with optional legend label
    Line { points: Vec<(f64, f64)>, color: RGBColor, width: f64, label: Option<String> },
    /// Point markers
    Markers { points: Vec<(f64, f64)>, color: RGBColor, size: u32 },
    /// Closed filled polygon
    Polygon { points: Vec<(f64, f64)>, color: RGBColor },
    Collection(LineCollection),
    Contour(ContourSet),
}

impl Artist {
    /// Data-space extent `(xmin, xmax, ymin, ymax)`, `None` along an axis the
    /// artist does not constrain
    fn data_bounds(&self) -> (Option<(f64, f64)>, Option<(f64, f64)>) {
        fn span<I: Iterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
            values
                .filter(|v| v.is_finite())
                .fold(None, |acc, v| match acc {
                    None => Some((v, v)),
                    Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                })
        }

        match self {
            Artist::HSpan { ymin, ymax, .. } => (None, span([*ymin, *ymax].into_iter())),
            Artist::HLine { y, .. } => (None, span(std::iter::once(*y))),
            Artist::Text { .. } => (None, None),
            Artist::Line { points, .. }
            | Artist::Markers { points, .. }
            | Artist::Polygon { points, .. } => (
                span(points.iter().map(|p| p.0)),
                span(points.iter().map(|p| p.1)),
            ),
            Artist::Collection(lc) => (
                span(lc.segments().iter().flat_map(|s| [s[0].0, s[1].0])),
                span(lc.segments().iter().flat_map(|s| [s[0].1, s[1].1])),
            ),
            Artist::Contour(cs) => {
                let (x, y) = cs.extent();
                (Some(x), Some(y))
            }
        }
    }
}

/// Legend row: label and line color
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: RGBColor,
}

// =================================================================================================
// Axes
// =================================================================================================

/// One plotting panel
#[derive(Debug, Clone)]
pub struct Axes {
    original_position: Bbox,
    position: Bbox,
    xlim: Option<(f64, f64)>,
    ylim: Option<(f64, f64)>,
    aspect: Aspect,
    artists: Vec<Artist>,
    show_xticks: bool,
    xlabel: Option<String>,
    ylabel: Option<String>,
    legend: Vec<LegendEntry>,
    grid: bool,
    cycle_index: usize,
}

impl Axes {
    fn new(position: Bbox) -> Self {
        Self {
            original_position: position,
            position,
            xlim: None,
            ylim: None,
            aspect: Aspect::Auto,
            artists: Vec::new(),
            show_xticks: true,
            xlabel: None,
            ylabel: None,
            legend: Vec::new(),
            grid: false,
            cycle_index: 0,
        }
    }

    // ---------------------------------------------------------------- drawing

    pub fn axhspan(&mut self, ymin: f64, ymax: f64, color: RGBColor) {
        self.artists.push(Artist::HSpan { ymin, ymax, color });
    }

    pub fn axhline(&mut self, y: f64, color: RGBColor, width: f64) {
        self.artists.push(Artist::HLine { y, color, width });
    }

    pub fn text(&mut self, x: f64, y: f64, text: impl Into<String>, color: RGBColor) {
        self.artists.push(Artist::Text { x, y, text: text.into(), color });
    }

    pub fn plot(&mut self, points: Vec<(f64, f64)>, color: RGBColor, width: f64, label: Option<String>) {
        self.artists.push(Artist::Line { points, color, width, label });
    }

    pub fn scatter(&mut self, points: Vec<(f64, f64)>, color: RGBColor, size: u32) {
        self.artists.push(Artist::Markers { points, color, size });
    }

    pub fn fill(&mut self, points: Vec<(f64, f64)>, color: RGBColor) {
        self.artists.push(Artist::Polygon { points, color });
    }

    pub fn add_collection(&mut self, collection: LineCollection) {
        self.artists.push(Artist::Collection(collection));
    }

    pub fn add_contour(&mut self, contour: ContourSet) {
        self.artists.push(Artist::Contour(contour));
    }

    /// Next color of the default property cycle, advancing the cycle
    pub fn next_cycle_color(&mut self) -> RGBColor {
        let color = crate::output::visualization::Palette::default_cycle().color(self.cycle_index);
        self.cycle_index += 1;
        color
    }

    // ----------------------------------------------------------------- limits

    pub fn set_xlim(&mut self, left: f64, right: f64) {
        self.xlim = Some((left, right));
    }

    pub fn set_ylim(&mut self, bottom: f64, top: f64) {
        self.ylim = Some((bottom, top));
    }

    /// Set both limits from a window (`ax.axis(win)`)
    pub fn set_window(&mut self, win: Window) {
        self.set_xlim(win.x1, win.x2);
        self.set_ylim(win.y1, win.y2);
    }

    /// Equal aspect with limits fitted to the current data (`ax.axis("scaled")`)
    pub fn axis_scaled(&mut self) {
        let (x, y) = (self.autoscale_x(), self.autoscale_y());
        self.xlim = Some(x);
        self.ylim = Some(y);
        self.aspect = Aspect::Equal;
    }

    /// Current x limits, autoscaled from the artists when never set
    pub fn xlim(&self) -> (f64, f64) {
        self.xlim.unwrap_or_else(|| self.autoscale_x())
    }

    /// Current y limits, autoscaled from the artists when never set
    pub fn ylim(&self) -> (f64, f64) {
        self.ylim.unwrap_or_else(|| self.autoscale_y())
    }

    /// Current limits as a window (`ax.axis()`)
    pub fn axis(&self) -> Window {
        let (x1, x2) = self.xlim();
        let (y1, y2) = self.ylim();
        Window::new(x1, x2, y1, y2)
    }

    fn autoscale_x(&self) -> (f64, f64) {
        Self::merge(self.artists.iter().map(|a| a.data_bounds().0))
    }

    fn autoscale_y(&self) -> (f64, f64) {
        Self::merge(self.artists.iter().map(|a| a.data_bounds().1))
    }

    fn merge<I: Iterator<Item = Option<(f64, f64)>>>(bounds: I) -> (f64, f64) {
        let merged = bounds.flatten().fold(None, |acc: Option<(f64, f64)>, (lo, hi)| match acc {
            None => Some((lo, hi)),
            Some((a, b)) => Some((a.min(lo), b.max(hi))),
        });
        match merged {
            Some((lo, hi)) if hi > lo => (lo, hi),
            Some((v, _)) => (v - 0.5, v + 0.5),
            None => (0.0, 1.0),
        }
    }

    // ----------------------------------------------------------- decorations

    pub fn set_aspect(&mut self, aspect: Aspect) {
        self.aspect = aspect;
    }

    pub fn aspect(&self) -> Aspect {
        self.aspect
    }

    /// Remove ticks and tick labels from the horizontal axis
    pub fn hide_xticks(&mut self) {
        self.show_xticks = false;
    }

    pub fn shows_xticks(&self) -> bool {
        self.show_xticks
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.xlabel = Some(label.into());
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.ylabel = Some(label.into());
    }

    pub fn xlabel(&self) -> Option<&str> {
        self.xlabel.as_deref()
    }

    pub fn ylabel(&self) -> Option<&str> {
        self.ylabel.as_deref()
    }

    pub fn set_legend(&mut self, entries: Vec<LegendEntry>) {
        self.legend = entries;
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    pub fn set_grid(&mut self, on: bool) {
        self.grid = on;
    }

    pub fn grid(&self) -> bool {
        self.grid
    }

    // -------------------------------------------------------------- inspection

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn collections(&self) -> impl Iterator<Item = &LineCollection> {
        self.artists.iter().filter_map(|a| match a {
            Artist::Collection(lc) => Some(lc),
            _ => None,
        })
    }

    pub fn contours(&self) -> impl Iterator<Item = &ContourSet> {
        self.artists.iter().filter_map(|a| match a {
            Artist::Contour(cs) => Some(cs),
            _ => None,
        })
    }

    /// `(x, y, text)` of every text artist, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = (f64, f64, &str)> {
        self.artists.iter().filter_map(|a| match a {
            Artist::Text { x, y, text, .. } => Some((*x, *y, text.as_str())),
            _ => None,
        })
    }

    /// Active (possibly aspect-adjusted) position
    pub fn active_position(&self) -> Bbox {
        self.position
    }

    /// Position before any aspect adjustment
    pub fn original_position(&self) -> Bbox {
        self.original_position
    }

    fn set_position(&mut self, position: Bbox) {
        self.original_position = position;
        self.position = position;
    }

    /// Shrink the active box so the data aspect is honoured
    fn apply_aspect(&mut self, figure_size: (u32, u32)) {
        if self.aspect == Aspect::Auto {
            self.position = self.original_position;
            return;
        }
        let (x1, x2) = self.xlim();
        let (y1, y2) = self.ylim();
        let (dx, dy) = ((x2 - x1).abs(), (y2 - y1).abs());
        if dx <= 0.0 || dy <= 0.0 || !dx.is_finite() || !dy.is_finite() {
            self.position = self.original_position;
            return;
        }

        let orig = self.original_position;
        let box_w = orig.width * figure_size.0 as f64;
        let box_h = orig.height * figure_size.1 as f64;
        let data_ratio = dy / dx;

        let (new_w, new_h) = if box_h / box_w > data_ratio {
            (box_w, box_w * data_ratio)
        } else {
            (box_h / data_ratio, box_h)
        };
        let width = new_w / figure_size.0 as f64;
        let height = new_h / figure_size.1 as f64;
        self.position = Bbox::new(
            orig.x0 + 0.5 * (orig.width - width),
            orig.y0 + 0.5 * (orig.height - height),
            width,
            height,
        );
    }
}

// =================================================================================================
// Figure
// =================================================================================================

/// Mutable drawing surface owned by the top-level caller
#[derive(Debug, Clone)]
pub struct Figure {
    size: (u32, u32),
    axes: Vec<Axes>,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new(DEFAULT_FIGURE_SIZE)
    }
}

impl Figure {
    /// Create an empty figure of `size` pixels
    pub fn new(size: (u32, u32)) -> Self {
        Self { size, axes: Vec::new() }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn axes_ids(&self) -> Vec<AxesId> {
        (0..self.axes.len()).map(AxesId).collect()
    }

    /// Add a panel at an explicit position
    pub fn add_axes(&mut self, position: Bbox) -> AxesId {
        self.axes.push(Axes::new(position));
        AxesId(self.axes.len() - 1)
    }

    /// Add a single panel filling the default subplot area
    pub fn add_subplot(&mut self) -> AxesId {
        self.add_axes(Bbox::new(
            SUBPLOT_LEFT,
            SUBPLOT_BOTTOM,
            SUBPLOT_RIGHT - SUBPLOT_LEFT,
            SUBPLOT_TOP - SUBPLOT_BOTTOM,
        ))
    }

    /// Add a column of panels whose heights follow `height_ratios`, top first
    pub fn subplots_column(&mut self, height_ratios: &[f64]) -> Vec<AxesId> {
        let nrows = height_ratios.len();
        if nrows == 0 {
            return Vec::new();
        }
        let total: f64 = height_ratios.iter().sum();
        let tot_height = SUBPLOT_TOP - SUBPLOT_BOTTOM;
        let cell_h = tot_height / (nrows as f64 + SUBPLOT_HSPACE * (nrows as f64 - 1.0));
        let sep_h = SUBPLOT_HSPACE * cell_h;
        let norm = cell_h * nrows as f64 / total;

        let mut top = SUBPLOT_TOP;
        let mut ids = Vec::with_capacity(nrows);
        for ratio in height_ratios {
            let h = ratio * norm;
            ids.push(self.add_axes(Bbox::new(
                SUBPLOT_LEFT,
                top - h,
                SUBPLOT_RIGHT - SUBPLOT_LEFT,
                h,
            )));
            top -= h + sep_h;
        }
        ids
    }

    pub fn axes(&self, id: AxesId) -> Result<&Axes, PlotError> {
        self.axes.get(id.0).ok_or(PlotError::MissingAxes(id))
    }

    pub fn axes_mut(&mut self, id: AxesId) -> Result<&mut Axes, PlotError> {
        self.axes.get_mut(id.0).ok_or(PlotError::MissingAxes(id))
    }

    /// Active position of a panel, after applying its aspect constraint
    pub fn position(&mut self, id: AxesId) -> Result<Bbox, PlotError> {
        let size = self.size;
        let axes = self.axes_mut(id)?;
        axes.apply_aspect(size);
        Ok(axes.active_position())
    }

    /// Move a panel; resets any aspect adjustment
    pub fn set_position(&mut self, id: AxesId, position: Bbox) -> Result<(), PlotError> {
        self.axes_mut(id)?.set_position(position);
        Ok(())
    }

    /// Apply aspect constraints of every panel (done before rasterising)
    pub fn apply_aspects(&mut self) {
        let size = self.size;
        for axes in &mut self.axes {
            axes.apply_aspect(size);
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
