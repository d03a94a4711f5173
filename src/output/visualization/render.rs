//! Rasterisation of a [`Figure`] with `plotters`
//!
//! Each panel becomes a cartesian chart placed at its (aspect-adjusted)
//! figure position; tick labels are drawn just outside the panel box. Artists
//! are replayed in recording order so later artists paint over earlier ones.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;

use super::config::PlotConfig;
use crate::output::surface::{Artist, Axes, Figure};

const X_LABEL_AREA: u32 = 40;
const Y_LABEL_AREA: u32 = 60;

// =================================================================================================
// Public API
// =================================================================================================

/// Write `figure` to `output_path`
///
/// The backend is chosen from the extension: `.svg` → vector, anything else
/// → bitmap (PNG).
///
/// # Errors
///
/// Returns `Err` if the backend cannot write to `output_path`.
///
/// # Example
///
/// ```rust,ignore
/// use aquiplot::output::visualization::render_figure;
///
/// let mut figure = Figure::new((800, 400));
/// plots.xsection(&mut figure, None, &XsectionOptions::default())?;
/// render_figure(&figure, "xsection.svg", None)?;
/// ```
pub fn render_figure(
    figure: &Figure,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::default();
    let config = config.unwrap_or(&default_config);

    let mut figure = figure.clone();
    figure.apply_aspects();
    let size = config.output_size(figure.size());

    log::debug!("rendering {} panel(s) to {output_path} at {size:?}", figure.len());

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, size);
            render_figure_impl(backend, &figure, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, size);
            render_figure_impl(backend, &figure, config)
        }
    }
}

// =================================================================================================
// Private Plot Implementations
// =================================================================================================

fn render_figure_impl<DB: DrawingBackend>(
    backend: DB,
    figure: &Figure,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    for id in figure.axes_ids() {
        draw_axes(&root, figure.axes(id)?, config)?;
    }

    root.present()?;
    Ok(())
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) }
}

/// Draw one panel and its artists
fn draw_axes<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    axes: &Axes,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (w, h) = root.dim_in_pixel();
    let (w, h) = (w as f64, h as f64);
    let pos = axes.active_position();

    let x_area = if axes.shows_xticks() || axes.xlabel().is_some() { X_LABEL_AREA } else { 0 };
    let left = (pos.x0 * w - Y_LABEL_AREA as f64).max(0.0);
    let top = ((1.0 - pos.y0 - pos.height) * h).max(0.0);
    let right = ((pos.x0 + pos.width) * w).min(w);
    let bottom = ((1.0 - pos.y0) * h + x_area as f64).min(h);
    let area = root.clone().shrink(
        (left as u32, top as u32),
        ((right - left).max(1.0) as u32, (bottom - top).max(1.0) as u32),
    );

    let (x0, x1) = ordered(axes.xlim());
    let (y0, y1) = ordered(axes.ylim());

    let mut chart = ChartBuilder::on(&area)
        .x_label_area_size(x_area)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    let mut mesh = chart.configure_mesh();
    mesh.label_style(("sans-serif", config.tick_font_size));
    if !axes.grid() {
        mesh.disable_mesh();
    }
    if !axes.shows_xticks() {
        mesh.x_labels(0);
    }
    if let Some(label) = axes.xlabel() {
        mesh.x_desc(label);
    }
    if let Some(label) = axes.ylabel() {
        mesh.y_desc(label);
    }
    mesh.draw()?;

    let text_style = |color: &RGBColor| {
        ("sans-serif", config.font_size)
            .into_font()
            .color(color)
            .pos(Pos::new(HPos::Center, VPos::Center))
    };
    let line_height = config.font_size as i32 + 2;

    for artist in axes.artists() {
        match artist {
            Artist::HSpan { ymin, ymax, color } => {
                if ymax > ymin {
                    chart.draw_series(std::iter::once(Rectangle::new(
                        [(x0, *ymin), (x1, *ymax)],
                        color.filled(),
                    )))?;
                } else {
                    // zero-height span renders as its edge
                    chart.draw_series(std::iter::once(PathElement::new(
                        vec![(x0, *ymin), (x1, *ymin)],
                        color.stroke_width(1),
                    )))?;
                }
            }
            Artist::HLine { y, color, width } => {
                chart.draw_series(std::iter::once(PathElement::new(
                    vec![(x0, *y), (x1, *y)],
                    color.stroke_width(width.round().max(1.0) as u32),
                )))?;
            }
            Artist::Text { x, y, text, color } => {
                let lines: Vec<&str> = text.split('\n').collect();
                let first = -((lines.len() as i32 - 1) * line_height) / 2;
                for (k, line) in lines.iter().enumerate() {
                    let dy = first + k as i32 * line_height;
                    chart.draw_series(std::iter::once(
                        EmptyElement::at((*x, *y)) + Text::new(line.to_string(), (0, dy), text_style(color)),
                    ))?;
                }
            }
            Artist::Line { points, color, width, .. } => {
                chart.draw_series(LineSeries::new(
                    points.iter().copied(),
                    color.stroke_width(width.round().max(1.0) as u32),
                ))?;
            }
            Artist::Markers { points, color, size } => {
                chart.draw_series(points.iter().map(|p| Circle::new(*p, *size, color.filled())))?;
            }
            Artist::Polygon { points, color } => {
                chart.draw_series(std::iter::once(Polygon::new(points.clone(), color.filled())))?;
            }
            Artist::Collection(lc) => {
                chart.draw_series(
                    lc.segments()
                        .iter()
                        .zip(lc.colors())
                        .map(|(s, c)| PathElement::new(vec![s[0], s[1]], c.stroke_width(1))),
                )?;
            }
            Artist::Contour(cs) => {
                let color = cs.color();
                chart.draw_series(cs.lines().iter().flat_map(|l| l.segments.iter()).map(|s| {
                    PathElement::new(vec![s[0], s[1]], color.stroke_width(1))
                }))?;
                chart.draw_series(cs.labels().iter().map(|l| {
                    EmptyElement::at((l.x, l.y)) + Text::new(l.text.clone(), (0, 0), text_style(&color))
                }))?;
            }
        }
    }

    if !axes.legend().is_empty() {
        for entry in axes.legend() {
            let color = entry.color;
            chart
                .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())?
                .label(entry.label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
        chart
            .configure_series_labels()
            .label_font(("sans-serif", config.font_size))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
