//! Cross-section rendering
//!
//! Two paths, selected by [`ModelVariant`]:
//!
//! - **Layer stack** (multi-layer and 3D models): grey bands for leaky
//!   layers, optional labels and parameter text per layer, thin separators
//!   between adjacent aquifers, a thin top line and a heavy base line.
//! - **Strip stack** (1D cross-section models): the horizontal extent comes
//!   from the strip elements, each inhomogeneity draws its own block and
//!   every element is drawn on top.

use plotters::style::BLACK;

use super::config::{format_value, XsectionOptions};
use super::geometry::CrossSectionLine;
use super::layers::LayerIndexer;
use super::PlotError;
use crate::model::{AquiferData, InhomPlotRequest, LayerType, Model, ModelType, ModelVariant};
use crate::output::surface::{AxesId, Figure};
use crate::output::visualization::LEAKY_LAYER_COLOR;

const TOP_LINE_WIDTH: f64 = 0.75;
const BASE_LINE_WIDTH: f64 = 3.0;
const STORAGE_FORMAT: &str = ".2e";
const STRIP_PADDING: f64 = 0.25;

/// Draw the cross-section of `model` on panel `ax`
pub fn draw_xsection(
    fig: &mut Figure,
    ax: AxesId,
    model: &dyn Model,
    opts: &XsectionOptions,
) -> Result<(), PlotError> {
    match model.variant() {
        ModelVariant::CrossSection => draw_strip_xsection(fig, ax, model, opts),
        ModelVariant::MultiLayer | ModelVariant::ThreeD => draw_layer_xsection(fig, ax, model, opts),
    }
}

// =================================================================================================
// Layer stack
// =================================================================================================

fn draw_layer_xsection(
    fig: &mut Figure,
    ax: AxesId,
    model: &dyn Model,
    opts: &XsectionOptions,
) -> Result<(), PlotError> {
    let aq = model.aq();
    let z = aq.z();
    let line = CrossSectionLine::resolve(opts.xy, opts.horizontal_axis);
    let annotated = opts.labels || opts.params;

    // build every annotation first so a formatting error leaves the panel untouched
    let mut indexer = LayerIndexer::new(aq.ltype());
    let mut texts = Vec::new();
    for (i, ltype) in aq.ltype().iter().enumerate() {
        let index = indexer.current(*ltype);
        let y = 0.5 * (z[i] + z[i + 1]);

        if opts.labels {
            let x = if opts.params { line.at(0.25) } else { line.at(0.5) };
            let label = match ltype {
                LayerType::Leaky => format!("leaky layer {index}"),
                LayerType::Aquifer => format!("aquifer {index}"),
            };
            texts.push((x, y, label));
        }
        if opts.params {
            let x = if opts.labels { line.at(0.75) } else { line.at(0.5) };
            let text = match ltype {
                LayerType::Leaky => leaky_params(aq, model.model_type(), index, opts)?,
                LayerType::Aquifer => aquifer_params(aq, model.model_type(), model.variant(), index, opts)?,
            };
            texts.push((x, y, text));
        }
        indexer.advance(*ltype, annotated);
    }

    log::debug!(
        "{}: cross-section over {} layers, {} annotation(s)",
        model.name(),
        aq.nlayers(),
        texts.len()
    );

    let axes = fig.axes_mut(ax)?;
    line.apply(axes);

    for (i, ltype) in aq.ltype().iter().enumerate() {
        if *ltype == LayerType::Leaky {
            axes.axhspan(z[i + 1], z[i], LEAKY_LAYER_COLOR);
        }
    }
    for (x, y, text) in texts {
        axes.text(x, y, text, BLACK);
    }
    for i in 1..aq.nlayers() {
        let ltype = aq.ltype();
        if ltype[i] == LayerType::Aquifer && ltype[i - 1] == LayerType::Aquifer {
            axes.axhspan(z[i], z[i], LEAKY_LAYER_COLOR);
        }
    }
    axes.axhline(aq.top(), BLACK, TOP_LINE_WIDTH);
    axes.axhline(aq.bottom(), BLACK, BASE_LINE_WIDTH);
    axes.set_ylabel("elevation");
    Ok(())
}

fn parameter<'a>(values: &'a [f64], index: usize, name: &str) -> Result<&'a f64, PlotError> {
    values
        .get(index)
        .ok_or_else(|| PlotError::Model(format!("{name} has no entry for index {index}")))
}

fn unit_suffix(unit: Option<&String>) -> String {
    unit.map(|u| format!(" {u}")).unwrap_or_default()
}

/// Parameter text of leaky layer number `lli`
///
/// Steady models show the resistance only; transient models add the
/// specific storage in scientific notation.
pub fn leaky_params(
    aq: &AquiferData,
    model_type: ModelType,
    lli: usize,
    opts: &XsectionOptions,
) -> Result<String, PlotError> {
    let c = format_value(*parameter(aq.c(), lli, "c")?, &opts.fmt)?;
    match model_type {
        ModelType::Steady => {
            let unit = unit_suffix(opts.units.as_ref().and_then(|u| u.c.as_ref()));
            Ok(format!("$c$ = {c}{unit}"))
        }
        ModelType::Transient => {
            let cstr = format!("$c$ = {c}");
            let sstr = format!(
                "$S_s$ = {}",
                format_value(*parameter(aq.sll(), lli, "Sll")?, STORAGE_FORMAT)?
            );
            let sep = opts.sep.as_str();
            if sep == "\n" {
                let pad = sstr.chars().count().saturating_sub(cstr.chars().count()).max(1);
                Ok(format!("{cstr}{}{sep}{sstr}", " ".repeat(pad)))
            } else {
                Ok(format!("{cstr}{sep}{sstr}"))
            }
        }
    }
}

/// Parameter text of aquifer number `aqi`
///
/// Conductivity always, anisotropy for 3D models, storage for transient
/// models (total storage for a phreatic top aquifer).
pub fn aquifer_params(
    aq: &AquiferData,
    model_type: ModelType,
    variant: ModelVariant,
    aqi: usize,
    opts: &XsectionOptions,
) -> Result<String, PlotError> {
    let sep = opts.sep.as_str();
    let unit = unit_suffix(opts.units.as_ref().and_then(|u| u.k.as_ref()));
    let mut text = format!("$k_h$ = {}{unit}", format_value(*parameter(aq.kaq(), aqi, "kaq")?, &opts.fmt)?);

    if variant == ModelVariant::ThreeD {
        let ratio = format_value(*parameter(aq.kzoverkh(), aqi, "kzoverkh")?, &opts.fmt)?;
        text.push_str(&format!("{sep}$k_z/k_h$ = {ratio}"));
    }

    if model_type == ModelType::Transient {
        let s = *parameter(aq.saq(), aqi, "Saq")?;
        if aqi == 0 && aq.phreatictop() {
            text.push_str(&format!("{sep}$S$ = {}", format_value(s, &opts.fmt)?));
        } else {
            text.push_str(&format!("{sep}$S_s$ = {}", format_value(s, STORAGE_FORMAT)?));
        }
    }
    Ok(text)
}

// =================================================================================================
// Strip stack
// =================================================================================================

/// Horizontal extent of a strip model: explicit endpoints, else element extents padded by 25%
fn strip_extent(model: &dyn Model, opts: &XsectionOptions) -> Result<(f64, f64), PlotError> {
    if let Some([(x1, _), (x2, _)]) = opts.xy {
        return Ok((x1, x2));
    }

    let bounds: Vec<f64> = model
        .elements()
        .iter()
        .flat_map(|e| e.strip_bounds())
        .flatten()
        .filter(|v| v.is_finite())
        .collect();
    let xmin = bounds.iter().copied().fold(f64::INFINITY, f64::min);
    let xmax = bounds.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if bounds.is_empty() {
        return Err(PlotError::InvalidConfiguration(
            "cross-section model has no element with a horizontal extent; pass xy".to_string(),
        ));
    }

    let dx = xmax - xmin;
    Ok((xmin - STRIP_PADDING * dx, xmax + STRIP_PADDING * dx))
}

fn draw_strip_xsection(
    fig: &mut Figure,
    ax: AxesId,
    model: &dyn Model,
    opts: &XsectionOptions,
) -> Result<(), PlotError> {
    let (x1, x2) = strip_extent(model, opts)?;
    log::debug!("{}: strip cross-section over [{x1}, {x2}]", model.name());

    let axes = fig.axes_mut(ax)?;
    let request = InhomPlotRequest {
        labels: opts.labels,
        params: opts.params,
        names: opts.names,
        x1,
        x2,
        fmt: &opts.fmt,
        units: opts.units.as_ref(),
        sep: opts.sep,
    };
    for inhom in model.inhoms().values() {
        inhom.plot(axes, &request);
    }
    axes.set_xlim(x1, x2);
    axes.set_ylabel("elevation");
    axes.set_xlabel("x");

    for element in model.elements() {
        element.plot_with_reference_level(axes, opts.hstar);
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
