//! Plan view and the plan view + cross-section layout

use super::config::{CompositeOptions, LayoutAxis, XsectionOptions};
use super::xsection::draw_xsection;
use super::PlotError;
use crate::model::Model;
use crate::output::surface::{Aspect, Axes, AxesId, Bbox, Figure, Window};

/// Draw every element acting in one of `layers` (all elements when `None`)
///
/// A given window sets the panel limits exactly.
pub fn draw_topview(ax: &mut Axes, model: &dyn Model, win: Option<Window>, layers: Option<&[usize]>) {
    let mut drawn = 0;
    for element in model.elements() {
        let selected = layers.map_or(true, |sel| element.layers().iter().any(|l| sel.contains(l)));
        if selected {
            element.plot(ax, layers);
            drawn += 1;
        }
    }
    if let Some(win) = win {
        ax.set_window(win);
    }
    log::debug!("{}: plan view with {drawn} element(s)", model.name());
}

/// Cross-section endpoints through the middle of `win`
pub fn section_through(win: Window, axis: LayoutAxis) -> [(f64, f64); 2] {
    match axis {
        LayoutAxis::X => [(win.x1, win.y_mid()), (win.x2, win.y_mid())],
        LayoutAxis::Y => [(win.x_mid(), win.y1), (win.x_mid(), win.y2)],
    }
}

/// Plan view above a cross-section of the same horizontal extent
///
/// The plan panel keeps an equal aspect, which shrinks its box; the
/// cross-section panel takes over the shrunk box's left edge and width so
/// both panels line up. Returns `[plan, cross-section]`.
pub fn draw_composite(
    fig: &mut Figure,
    model: &dyn Model,
    axes: Option<[AxesId; 2]>,
    opts: &CompositeOptions,
) -> Result<[AxesId; 2], PlotError> {
    if !(opts.topfigfrac > 0.0 && opts.topfigfrac < 1.0) {
        return Err(PlotError::InvalidConfiguration(format!(
            "topfigfrac must lie strictly between 0 and 1, got {}",
            opts.topfigfrac
        )));
    }

    let [top, bottom] = match axes {
        Some(ids) => ids,
        None => {
            let ids = fig.subplots_column(&[opts.topfigfrac, 1.0 - opts.topfigfrac]);
            fig.axes_mut(ids[0])?.set_aspect(Aspect::Equal);
            [ids[0], ids[1]]
        }
    };

    draw_topview(fig.axes_mut(top)?, model, opts.win, opts.layers.as_deref());

    let top_pos = fig.position(top)?;
    let bottom_pos = fig.axes(bottom)?.original_position();
    fig.set_position(bottom, Bbox::new(top_pos.x0, bottom_pos.y0, top_pos.width, bottom_pos.height))?;

    let win = match opts.win {
        Some(win) => win,
        None => fig.axes(top)?.axis(),
    };
    let xsection = XsectionOptions {
        xy: Some(section_through(win, opts.horizontal_axis)),
        horizontal_axis: opts.horizontal_axis.into(),
        ..opts.xsection.clone()
    };
    log::debug!(
        "{}: composite layout, section {:?} along {:?}",
        model.name(),
        xsection.xy,
        opts.horizontal_axis
    );
    draw_xsection(fig, bottom, model, &xsection)?;
    Ok([top, bottom])
}
