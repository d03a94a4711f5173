//! Plots of transient models

use std::fmt;

use ndarray::s;

use super::base::{contour_grid, describe, draw_layer_contours, ContourPlot, PlotBase};
use super::config::{format_value, ContourOptions, HeadAlongLineOptions};
use super::geometry::linspace;
use super::layout::draw_topview;
use super::PlotError;
use crate::model::Model;
use crate::output::surface::{Aspect, AxesId, Figure, LegendEntry};

const METHODS: &[&str] = &["contour", "head_along_line", "topview", "topview_and_xsection", "xsection"];

/// Renderer for transient models
pub struct TransientPlots<'a> {
    model: &'a dyn Model,
}

impl<'a> TransientPlots<'a> {
    pub fn new(model: &'a dyn Model) -> Self {
        Self { model }
    }
}

impl PlotBase for TransientPlots<'_> {
    fn model(&self) -> &dyn Model {
        self.model
    }

    fn methods(&self) -> &'static [&'static str] {
        METHODS
    }

    /// Head contours at time `opts.t`; a new panel gets an equal aspect
    fn contour(&self, fig: &mut Figure, ax: Option<AxesId>, opts: &ContourOptions) -> Result<ContourPlot, PlotError> {
        let (xg, yg, layers) = contour_grid(self.model, opts)?;
        let h = self
            .model
            .headgrid(&xg, &yg, &layers, Some(opts.t))
            .map_err(PlotError::Model)?;

        let id = match ax {
            Some(id) => id,
            None => {
                let id = fig.add_subplot();
                fig.axes_mut(id)?.set_aspect(Aspect::Equal);
                id
            }
        };
        let axes = fig.axes_mut(id)?;
        let sets = draw_layer_contours(axes, &xg, &yg, &h, &layers, opts, opts.decimals.unwrap_or(1))?;
        if opts.layout {
            draw_topview(axes, self.model, Some(opts.win), None);
        }
        log::debug!("{}: contoured {} layer(s) at t = {}", self.model.name(), layers.len(), opts.t);

        Ok(ContourPlot {
            axes: id,
            contours: opts.return_contours.then_some(sets),
        })
    }

    /// Head against distance along the line for every layer/time pair
    fn head_along_line(
        &self,
        fig: &mut Figure,
        ax: Option<AxesId>,
        opts: &HeadAlongLineOptions,
    ) -> Result<AxesId, PlotError> {
        if opts.npoints == 0 || opts.t.is_empty() || opts.layers.is_empty() {
            return Err(PlotError::InvalidConfiguration(
                "head_along_line needs points, times and layers".to_string(),
            ));
        }
        let x = linspace(opts.x1, opts.x2, opts.npoints);
        let y = linspace(opts.y1, opts.y2, opts.npoints);
        let distance: Vec<f64> = x
            .iter()
            .zip(&y)
            .map(|(xi, yi)| (xi - x[0]).hypot(yi - y[0]) + opts.sstart)
            .collect();

        let h = self
            .model
            .headalongline(&x, &y, Some(&opts.t), Some(&opts.layers))
            .map_err(PlotError::Model)?;
        let (nlayers, ntimes, npoints) = h.dim();
        if nlayers > opts.layers.len() || ntimes > opts.t.len() || npoints != opts.npoints {
            return Err(PlotError::Model(format!(
                "head along line has shape {:?}, expected ({}, {}, {})",
                h.dim(),
                opts.layers.len(),
                opts.t.len(),
                opts.npoints
            )));
        }

        let id = ax.unwrap_or_else(|| fig.add_subplot());
        let axes = fig.axes_mut(id)?;
        let mut legend = Vec::with_capacity(nlayers * ntimes);
        for i in 0..nlayers {
            for j in 0..ntimes {
                let label = format!("head (t={}, layer={})", format_value(opts.t[j], "")?, opts.layers[i]);
                let color = opts.color.unwrap_or_else(|| axes.next_cycle_color());
                let points: Vec<(f64, f64)> = distance
                    .iter()
                    .zip(h.slice(s![i, j, ..]))
                    .map(|(si, hi)| (*si, *hi))
                    .collect();
                axes.plot(points, color, opts.lw, Some(label.clone()));
                legend.push(LegendEntry { label, color });
            }
        }
        if opts.legend {
            axes.set_legend(legend);
        }
        if opts.grid {
            axes.set_grid(true);
        }
        Ok(id)
    }
}

impl fmt::Display for TransientPlots<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(self, f)
    }
}
