//! Plot capability shared by every renderer variant
//!
//! [`PlotBase`] carries the operations that only need layer data and element
//! primitives (plan view, cross-section, composite layout). Grid-based
//! operations depend on how a model evaluates heads in time and are left to
//! [`SteadyPlots`](super::SteadyPlots) and
//! [`TransientPlots`](super::TransientPlots); the base versions fail with
//! [`PlotError::NotImplemented`].

use std::fmt;

use ndarray::Array3;

use super::config::{CompositeOptions, ContourOptions, HeadAlongLineOptions, Legend, XsectionOptions};
use super::geometry::linspace;
use super::layout::{draw_composite, draw_topview};
use super::xsection::draw_xsection;
use super::PlotError;
use crate::model::Model;
use crate::output::contour::{contour, ContourSet};
use crate::output::surface::{Aspect, Axes, AxesId, Figure, LegendEntry, Window};
use crate::output::visualization::Palette;

/// Panel and optionally retained contour sets of a contour plot
#[derive(Debug, Clone, PartialEq)]
pub struct ContourPlot {
    pub axes: AxesId,
    /// One set per contoured layer when `return_contours` was requested
    pub contours: Option<Vec<ContourSet>>,
}

/// User-facing plot operations of a model
///
/// Every operation draws on a caller-owned [`Figure`]. Passing `None` for the
/// panel creates a new one; the ids of the panels drawn on are returned for
/// further composition.
pub trait PlotBase {
    fn model(&self) -> &dyn Model;

    /// Names of the operations this variant supports
    fn methods(&self) -> &'static [&'static str];

    /// Plan view of the model elements
    ///
    /// A new panel gets an equal aspect; `win` sets the limits exactly.
    fn topview(
        &self,
        fig: &mut Figure,
        ax: Option<AxesId>,
        win: Option<Window>,
        layers: Option<&[usize]>,
    ) -> Result<AxesId, PlotError> {
        let id = match ax {
            Some(id) => id,
            None => {
                let id = fig.add_subplot();
                fig.axes_mut(id)?.set_aspect(Aspect::Equal);
                id
            }
        };
        draw_topview(fig.axes_mut(id)?, self.model(), win, layers);
        Ok(id)
    }

    /// Vertical cross-section with layer bands and annotation
    fn xsection(&self, fig: &mut Figure, ax: Option<AxesId>, opts: &XsectionOptions) -> Result<AxesId, PlotError> {
        let id = ax.unwrap_or_else(|| fig.add_subplot());
        draw_xsection(fig, id, self.model(), opts)?;
        Ok(id)
    }

    /// Plan view above a cross-section through the middle of the window
    fn topview_and_xsection(
        &self,
        fig: &mut Figure,
        axes: Option<[AxesId; 2]>,
        opts: &CompositeOptions,
    ) -> Result<[AxesId; 2], PlotError> {
        draw_composite(fig, self.model(), axes, opts)
    }

    /// Head contours in plan view
    fn contour(&self, fig: &mut Figure, ax: Option<AxesId>, opts: &ContourOptions) -> Result<ContourPlot, PlotError> {
        let _ = (fig, ax, opts);
        Err(PlotError::NotImplemented("contour"))
    }

    /// Head along a line for several layers and times
    fn head_along_line(
        &self,
        fig: &mut Figure,
        ax: Option<AxesId>,
        opts: &HeadAlongLineOptions,
    ) -> Result<AxesId, PlotError> {
        let _ = (fig, ax, opts);
        Err(PlotError::NotImplemented("headalongline"))
    }
}

/// `"aquiplot {model_type} plots, available methods:\n - ..."`
pub(crate) fn describe(plots: &dyn PlotBase, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "aquiplot {} plots, available methods:", plots.model().model_type())?;
    for method in plots.methods() {
        write!(f, "\n - {method}")?;
    }
    Ok(())
}

/// Evaluation grid of a plan contour: `(xg, yg, contoured layers)`
pub(crate) fn contour_grid(model: &dyn Model, opts: &ContourOptions) -> Result<(Vec<f64>, Vec<f64>, Vec<usize>), PlotError> {
    let (nx, ny) = opts.ngr;
    if nx < 2 || ny < 2 {
        return Err(PlotError::InvalidConfiguration(format!(
            "ngr must have at least 2 points per direction, got ({nx}, {ny})"
        )));
    }
    let layers = opts
        .layers
        .clone()
        .unwrap_or_else(|| (0..model.aq().naq()).collect());
    if layers.is_empty() {
        return Err(PlotError::InvalidConfiguration("no layers selected for contouring".to_string()));
    }
    let win = opts.win;
    Ok((linspace(win.x1, win.x2, nx), linspace(win.y1, win.y2, ny), layers))
}

/// Contour every layer of `h` (shape `(layers, y, x)`) with its own color,
/// label the contours and add the legend
pub(crate) fn draw_layer_contours(
    ax: &mut Axes,
    xg: &[f64],
    yg: &[f64],
    h: &Array3<f64>,
    layers: &[usize],
    opts: &ContourOptions,
    decimals: usize,
) -> Result<Vec<ContourSet>, PlotError> {
    if h.dim() != (layers.len(), yg.len(), xg.len()) {
        return Err(PlotError::Model(format!(
            "head grid has shape {:?}, expected {:?}",
            h.dim(),
            (layers.len(), yg.len(), xg.len())
        )));
    }

    let palette = Palette::resolve(&opts.color, layers.len());
    let mut sets = Vec::with_capacity(layers.len());
    let mut legend = Vec::with_capacity(layers.len());

    for (i, layer) in layers.iter().enumerate() {
        let color = palette.color(i);
        let grid = h.index_axis(ndarray::Axis(0), i);
        let mut cs = contour(xg, yg, grid, &opts.levels, color);
        if opts.labels {
            cs.label(decimals);
        }
        log::debug!("layer {layer}: {} contour segment(s)", cs.segment_count());

        let label = match &opts.legend {
            Legend::Names(names) => names.get(i).cloned(),
            Legend::Layers => Some(format!("layer {layer}")),
            Legend::Off => None,
        };
        if let Some(label) = label {
            legend.push(LegendEntry { label, color });
        }

        ax.add_contour(cs.clone());
        sets.push(cs);
    }

    if !legend.is_empty() {
        ax.set_legend(legend);
    }
    Ok(sets)
}
