//! Plots of steady models

use std::fmt;
use std::io::Write;

use ndarray::{Array2, Axis};

use super::base::{contour_grid, describe, draw_layer_contours, ContourPlot, PlotBase};
use super::config::{ContourOptions, FluxContourOptions, HorizontalAxis, TraceOptions, VContourOptions, XsectionOptions};
use super::geometry::linspace;
use super::layout::draw_topview;
use super::stream::build_flux_grid;
use super::trace::{draw_tracelines, Tracelines};
use super::xsection::draw_xsection;
use super::PlotError;
use crate::model::{Model, Tracer};
use crate::output::contour::{contour, ContourSet};
use crate::output::surface::{AxesId, Figure};

const METHODS: &[&str] = &[
    "contour",
    "tracelines",
    "topview",
    "topview_and_xsection",
    "vcontour",
    "vcontoursf1d",
    "xsection",
];

/// Renderer for steady models
///
/// # Example
///
/// ```rust,ignore
/// let plots = SteadyPlots::new(&model);
/// let mut figure = Figure::default();
/// let result = plots.contour(&mut figure, None, &ContourOptions::new([-50.0, 50.0, -50.0, 50.0]))?;
/// render_figure(&figure, "heads.png", None)?;
/// ```
pub struct SteadyPlots<'a> {
    model: &'a dyn Model,
}

impl<'a> SteadyPlots<'a> {
    pub fn new(model: &'a dyn Model) -> Self {
        Self { model }
    }

    /// Head contours in a vertical section from `(x1, y1)` to `(x2, y2)` of the window
    ///
    /// With `vinterp` heads are interpolated between layer centers (the top
    /// and bottom rows repeat the outer layers); otherwise each aquifer is a
    /// constant band between its top and bottom.
    pub fn vcontour(
        &self,
        fig: &mut Figure,
        ax: Option<AxesId>,
        opts: &VContourOptions,
    ) -> Result<(AxesId, ContourSet), PlotError> {
        if opts.n < 2 {
            return Err(PlotError::InvalidConfiguration(format!(
                "vcontour needs at least 2 points, got {}",
                opts.n
            )));
        }
        let win = opts.win;
        let xg = linspace(win.x1 + opts.nudge, win.x2 - opts.nudge, opts.n);
        let yg = linspace(win.y1 + opts.nudge, win.y2 - opts.nudge, opts.n);
        let h = self.model.headalongline(&xg, &yg, None, None).map_err(PlotError::Model)?;

        let aq = self.model.aq();
        let naq = aq.naq();
        let (nl, nt, np) = h.dim();
        if nl != naq || nt == 0 || np != opts.n {
            return Err(PlotError::Model(format!(
                "head along line has shape {:?}, expected ({naq}, _, {})",
                h.dim(),
                opts.n
            )));
        }
        let h = h.index_axis(Axis(1), 0);

        let horizontal = match opts.horizontal_axis {
            HorizontalAxis::X => xg,
            HorizontalAxis::Y => yg,
            HorizontalAxis::Distance => {
                let length = (win.x2 - win.x1).hypot(win.y2 - win.y1);
                linspace(0.0, length, opts.n)
            }
        };

        let (zaqtop, zaqbot) = (aq.zaqtop(), aq.zaqbot());
        let (zg, grid) = if opts.vinterp {
            let mut zg = Vec::with_capacity(naq + 2);
            zg.push(zaqtop[0]);
            zg.extend(zaqtop.iter().zip(&zaqbot).map(|(t, b)| 0.5 * (t + b)));
            zg.push(zaqbot[naq - 1]);
            let grid = Array2::from_shape_fn((naq + 2, opts.n), |(r, k)| {
                h[[r.saturating_sub(1).min(naq - 1), k]]
            });
            (zg, grid)
        } else {
            let zg: Vec<f64> = zaqtop.iter().zip(&zaqbot).flat_map(|(t, b)| [*t, *b]).collect();
            let grid = Array2::from_shape_fn((2 * naq, opts.n), |(r, k)| h[[r / 2, k]]);
            (zg, grid)
        };

        let id = ax.unwrap_or_else(|| fig.add_subplot());
        if opts.layout {
            let xsection = XsectionOptions {
                xy: Some([(win.x1, win.y1), (win.x2, win.y2)]),
                labels: false,
                horizontal_axis: opts.horizontal_axis,
                ..XsectionOptions::default()
            };
            draw_xsection(fig, id, self.model, &xsection)?;
        }

        let axes = fig.axes_mut(id)?;
        let color = opts.color.unwrap_or_else(|| axes.next_cycle_color());
        let mut cs = contour(&horizontal, &zg, grid.view(), &opts.levels, color);
        if opts.labels {
            cs.label(opts.decimals);
        }
        log::debug!("{}: vertical contour with {} segment(s)", self.model.name(), cs.segment_count());
        axes.add_contour(cs.clone());
        Ok((id, cs))
    }

    /// Trace pathlines from every start point, printing progress to stdout
    pub fn tracelines(
        &self,
        fig: &mut Figure,
        axes: Option<&[AxesId]>,
        tracer: &dyn Tracer,
        start: (&[f64], &[f64], &[f64]),
        opts: &TraceOptions,
    ) -> Result<Tracelines, PlotError> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.tracelines_with_progress(fig, axes, tracer, start, opts, &mut out)
    }

    /// [`SteadyPlots::tracelines`] with progress markers written to `progress`
    pub fn tracelines_with_progress<W: Write>(
        &self,
        fig: &mut Figure,
        axes: Option<&[AxesId]>,
        tracer: &dyn Tracer,
        (xstart, ystart, zstart): (&[f64], &[f64], &[f64]),
        opts: &TraceOptions,
        progress: &mut W,
    ) -> Result<Tracelines, PlotError> {
        draw_tracelines(fig, self.model, tracer, xstart, ystart, zstart, axes, opts, progress)
    }

    /// Stream-function contours of a 1D model between `x1` and `x2`
    ///
    /// Contours of the cumulative discharge are flow lines of the section;
    /// a label-free cross-section is drawn on top when `layout` is set.
    pub fn vcontoursf1d(
        &self,
        fig: &mut Figure,
        ax: Option<AxesId>,
        opts: &FluxContourOptions,
    ) -> Result<AxesId, PlotError> {
        if opts.nx < 2 {
            return Err(PlotError::InvalidConfiguration(format!(
                "vcontoursf1d needs at least 2 points, got {}",
                opts.nx
            )));
        }
        let (xa, xb) = (opts.x1 + opts.nudge, opts.x2 - opts.nudge);
        let xflow = linspace(xa, xb, opts.nx);
        let grid = build_flux_grid((xa, 0.0), (xb, 0.0), opts.nx, |x, y| {
            self.model.disvec(x, y).map(|(qx, _)| qx)
        })
        .map_err(PlotError::Model)?;

        let aq = self.model.find_aquifer_data(xflow[0], 0.0);
        let zflow: Vec<f64> = aq
            .zaqtop()
            .into_iter()
            .zip(aq.zaqbot())
            .flat_map(|(t, b)| [t, b])
            .collect();
        if zflow.len() != grid.nrows() {
            return Err(PlotError::Model(format!(
                "discharge has {} aquifers, layer data has {}",
                grid.nrows() / 2,
                zflow.len() / 2
            )));
        }

        let id = ax.unwrap_or_else(|| fig.add_subplot());
        {
            let axes = fig.axes_mut(id)?;
            let color = opts.color.unwrap_or_else(|| axes.next_cycle_color());
            let psi = grid.to_array();
            let mut cs = contour(&xflow, &zflow, psi.view(), &opts.levels, color);
            if opts.labels {
                cs.label(opts.decimals);
            }
            log::debug!("{}: stream-function contour with {} segment(s)", self.model.name(), cs.segment_count());
            axes.add_contour(cs);
        }

        if opts.layout {
            let xsection = XsectionOptions {
                xy: Some([(opts.x1, 0.0), (opts.x2, 0.0)]),
                labels: false,
                horizontal_axis: opts.horizontal_axis,
                ..XsectionOptions::default()
            };
            draw_xsection(fig, id, self.model, &xsection)?;
        }
        Ok(id)
    }
}

impl PlotBase for SteadyPlots<'_> {
    fn model(&self) -> &dyn Model {
        self.model
    }

    fn methods(&self) -> &'static [&'static str] {
        METHODS
    }

    /// Steady head contours; the panel ends up scaled to the window
    fn contour(&self, fig: &mut Figure, ax: Option<AxesId>, opts: &ContourOptions) -> Result<ContourPlot, PlotError> {
        let (xg, yg, layers) = contour_grid(self.model, opts)?;
        let h = self.model.headgrid(&xg, &yg, &layers, None).map_err(PlotError::Model)?;

        let id = ax.unwrap_or_else(|| fig.add_subplot());
        let axes = fig.axes_mut(id)?;
        let sets = draw_layer_contours(axes, &xg, &yg, &h, &layers, opts, opts.decimals.unwrap_or(0))?;
        axes.axis_scaled();
        if opts.layout {
            draw_topview(axes, self.model, Some(opts.win), Some(&layers));
        }

        Ok(ContourPlot {
            axes: id,
            contours: opts.return_contours.then_some(sets),
        })
    }
}

impl fmt::Display for SteadyPlots<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(self, f)
    }
}
