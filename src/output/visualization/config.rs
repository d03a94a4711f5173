//! Render configuration and color assignment
//!
//! This module defines the raster settings used when a [`Figure`] is written
//! to disk ([`PlotConfig`]) and the cyclic color mapping shared by contour
//! and pathline plots ([`Palette`], [`ColorSource`]).
//!
//! [`Figure`]: crate::output::surface::Figure

use plotters::prelude::*;

/// Color of pathline segments outside an aquifer
pub const INACTIVE_COLOR: RGBColor = BLACK;

/// Fill color of leaky layers and aquifer separators (grey 0.8)
pub const LEAKY_LAYER_COLOR: RGBColor = RGBColor(204, 204, 204);

/// Default property cycle (tab10)
const DEFAULT_CYCLE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),  // blue
    RGBColor(255, 127, 14),  // orange
    RGBColor(44, 160, 44),   // green
    RGBColor(214, 39, 40),   // red
    RGBColor(148, 103, 189), // purple
    RGBColor(140, 86, 75),   // brown
    RGBColor(227, 119, 194), // pink
    RGBColor(127, 127, 127), // grey
    RGBColor(188, 189, 34),  // olive
    RGBColor(23, 190, 207),  // cyan
];

/// Configuration for rasterising a figure
///
/// # Fields
///
/// - `width`, `height`: Output dimensions in pixels; `None` keeps the figure size
/// - `background`: Background color
/// - `font_size`: Text size of annotations, contour labels and legends
/// - `tick_font_size`: Text size of axis tick labels
///
/// # Example
///
/// ```rust,ignore
/// use aquiplot::output::visualization::{render_figure, PlotConfig};
///
/// let mut config = PlotConfig::default();
/// config.width = Some(1920);
/// config.height = Some(1080);
/// render_figure(&figure, "xsection.png", Some(&config))?;
/// ```
#[derive(Clone, Debug)]
pub struct PlotConfig {
    /// Image width in pixels (default: figure width)
    pub width: Option<u32>,

    /// Image height in pixels (default: figure height)
    pub height: Option<u32>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Annotation font size (default: 14)
    pub font_size: u32,

    /// Tick label font size (default: 12)
    pub tick_font_size: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            background: WHITE,
            font_size: 14,
            tick_font_size: 12,
        }
    }
}

impl PlotConfig {
    /// Config that rescales the output to `(width, height)` pixels
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Output size for a figure of `figure_size` pixels
    pub(crate) fn output_size(&self, figure_size: (u32, u32)) -> (u32, u32) {
        (
            self.width.unwrap_or(figure_size.0),
            self.height.unwrap_or(figure_size.1),
        )
    }
}

// =================================================================================================
// Color assignment
// =================================================================================================

/// Caller-selected color specification
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ColorSource {
    /// Default property cycle
    #[default]
    Cycle,
    /// Same color for everything
    Single(RGBColor),
    /// Explicit list, recycled when shorter than needed
    List(Vec<RGBColor>),
}

impl From<RGBColor> for ColorSource {
    fn from(color: RGBColor) -> Self {
        ColorSource::Single(color)
    }
}

impl From<Vec<RGBColor>> for ColorSource {
    fn from(colors: Vec<RGBColor>) -> Self {
        ColorSource::List(colors)
    }
}

/// Fixed-length color sequence indexed modulo its length
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<RGBColor>,
}

impl Palette {
    /// The default property cycle
    pub fn default_cycle() -> Self {
        Self { colors: DEFAULT_CYCLE.to_vec() }
    }

    /// Resolve a color source for `count` layers
    ///
    /// A single color is replicated `count` times; an empty list falls back to
    /// the default cycle.
    pub fn resolve(source: &ColorSource, count: usize) -> Self {
        match source {
            ColorSource::Cycle => Self::default_cycle(),
            ColorSource::Single(color) => Self { colors: vec![*color; count.max(1)] },
            ColorSource::List(colors) if colors.is_empty() => Self::default_cycle(),
            ColorSource::List(colors) => Self { colors: colors.clone() },
        }
    }

    /// Color for layer number `index`
    pub fn color(&self, index: usize) -> RGBColor {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
