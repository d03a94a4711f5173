//! Batches of traced pathlines
//!
//! Each start point is handed to the [`Tracer`]; the returned pathline is
//! cut into segments colored by the aquifer the particle occupies at the
//! start of the segment. All segments of a batch end up in one
//! [`LineCollection`] per panel: plan view `(x, y)`, profile `(x, z)`.

use std::io::Write;

use plotters::style::RGBColor;

use super::config::{CompositeOptions, HorizontalAxis, LayoutAxis, Orientation, TraceOptions, XsectionOptions};
use super::layout::{draw_composite, draw_topview, section_through};
use super::xsection::draw_xsection;
use super::PlotError;
use crate::model::{LayerType, Model, Pathline, TraceControls, TraceResult, Tracer};
use crate::output::surface::{Aspect, AxesId, Figure, LineCollection, Window};
use crate::output::visualization::{Palette, INACTIVE_COLOR};

/// Panels and retained traces of a traceline batch
#[derive(Debug, Clone, PartialEq)]
pub struct Tracelines {
    /// Plan view panel, if drawn
    pub plan: Option<AxesId>,
    /// Profile panel, if drawn
    pub profile: Option<AxesId>,
    /// One result per start point, in start-point order, when requested
    pub traces: Option<Vec<TraceResult>>,
}

/// Segment colors of `pathline`: palette entry of the aquifer number, or the
/// inactive color outside aquifers
pub fn segment_colors(model: &dyn Model, pathline: &Pathline, palette: &Palette) -> Vec<RGBColor> {
    pathline
        .samples()
        .iter()
        .zip(pathline.layers())
        .take(pathline.segment_count())
        .map(|(sample, &layer)| {
            let aq = model.find_aquifer_data(sample.x, sample.y);
            match (aq.ltype().get(layer), aq.layernumber(layer)) {
                (Some(LayerType::Aquifer), Some(number)) => palette.color(number),
                _ => INACTIVE_COLOR,
            }
        })
        .collect()
}

/// Resolve the plan and profile panels for `orientation`, creating them when needed
fn prepare_panels(
    fig: &mut Figure,
    model: &dyn Model,
    axes: Option<&[AxesId]>,
    orientation: Orientation,
    win: Window,
) -> Result<(Option<AxesId>, Option<AxesId>), PlotError> {
    match (orientation, axes) {
        (Orientation::Both, None) => {
            let opts = CompositeOptions { win: Some(win), ..CompositeOptions::default() };
            let [plan, profile] = draw_composite(fig, model, None, &opts)?;
            Ok((Some(plan), Some(profile)))
        }
        (Orientation::Both, Some(ids)) => match ids {
            [plan, profile, ..] => Ok((Some(*plan), Some(*profile))),
            _ => Err(PlotError::InvalidConfiguration(
                "orientation 'both' needs a plan and a profile panel".to_string(),
            )),
        },
        (Orientation::Plan, None) => {
            let id = fig.add_subplot();
            let ax = fig.axes_mut(id)?;
            ax.set_aspect(Aspect::Equal);
            draw_topview(ax, model, Some(win), None);
            Ok((Some(id), None))
        }
        (Orientation::Profile, None) => {
            let id = fig.add_subplot();
            let opts = XsectionOptions {
                xy: Some(section_through(win, LayoutAxis::X)),
                horizontal_axis: HorizontalAxis::X,
                ..XsectionOptions::default()
            };
            draw_xsection(fig, id, model, &opts)?;
            Ok((None, Some(id)))
        }
        (Orientation::Plan, Some(ids)) => match ids.first() {
            Some(id) => Ok((Some(*id), None)),
            None => Err(PlotError::InvalidConfiguration("no panel given for the plan view".to_string())),
        },
        (Orientation::Profile, Some(ids)) => match ids.last() {
            Some(id) => Ok((None, Some(*id))),
            None => Err(PlotError::InvalidConfiguration("no panel given for the profile".to_string())),
        },
    }
}

/// Trace one pathline per start point and draw them
///
/// Progress markers (one `.` per trace, then a newline) go to `progress`
/// when [`TraceOptions::progress`] is set.
#[allow(clippy::too_many_arguments)]
pub fn draw_tracelines<W: Write>(
    fig: &mut Figure,
    model: &dyn Model,
    tracer: &dyn Tracer,
    xstart: &[f64],
    ystart: &[f64],
    zstart: &[f64],
    axes: Option<&[AxesId]>,
    opts: &TraceOptions,
    progress: &mut W,
) -> Result<Tracelines, PlotError> {
    if xstart.len() != ystart.len() || xstart.len() != zstart.len() {
        return Err(PlotError::InvalidConfiguration(format!(
            "start coordinates differ in length: x {}, y {}, z {}",
            xstart.len(),
            ystart.len(),
            zstart.len()
        )));
    }

    let win = opts.win.unwrap_or_else(Window::unbounded);
    let palette = Palette::resolve(&opts.color, model.aq().naq());
    let (plan, profile) = prepare_panels(fig, model, axes, opts.orientation, win)?;

    // layer occupancy is only guaranteed in the detailed result
    let metadata = opts.metadata || !opts.return_traces;
    let controls = TraceControls {
        hstepmax: opts.hstepmax,
        vstepfrac: opts.vstepfrac,
        tmax: opts.tmax,
        nstepmax: opts.nstepmax,
        win,
        silent: opts.silent,
    };

    let mut plan_lines = LineCollection::new();
    let mut profile_lines = LineCollection::new();
    let mut traces = opts.return_traces.then(|| Vec::with_capacity(xstart.len()));

    for ((&x, &y), &z) in xstart.iter().zip(ystart).zip(zstart) {
        let result = tracer
            .trace(model, [x, y, z], &controls, metadata)
            .map_err(PlotError::Tracer)?;
        if metadata && matches!(result, TraceResult::Plain(_)) {
            log::warn!("tracer returned no metadata for start point ({x}, {y}, {z})");
        }

        let pathline = result.pathline();
        log::trace!("pathline from ({x}, {y}, {z}): {} samples", pathline.len());
        if opts.progress {
            write!(progress, ".")?;
            progress.flush()?;
        }

        let colors = segment_colors(model, pathline, &palette);
        if plan.is_some() {
            let points: Vec<(f64, f64)> = pathline.samples().iter().map(|s| (s.x, s.y)).collect();
            plan_lines.push_polyline(&points, &colors);
        }
        if profile.is_some() {
            let points: Vec<(f64, f64)> = pathline.samples().iter().map(|s| (s.x, s.z)).collect();
            profile_lines.push_polyline(&points, &colors);
        }

        if let Some(traces) = traces.as_mut() {
            traces.push(result);
        }
    }

    if let Some(id) = plan {
        fig.axes_mut(id)?.add_collection(plan_lines);
    }
    if let Some(id) = profile {
        let aq = model.aq();
        let ax = fig.axes_mut(id)?;
        ax.add_collection(profile_lines);
        ax.set_ylim(aq.bottom(), aq.top());
    }
    if opts.progress {
        writeln!(progress)?;
    }

    log::debug!("{}: traced {} pathline(s)", model.name(), xstart.len());
    Ok(Tracelines { plan, profile, traces })
}
