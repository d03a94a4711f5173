//! Cross-section line parametrization

use super::config::HorizontalAxis;
use super::PlotError;
use crate::output::surface::Axes;

/// Horizontal parametrization of a cross-section
///
/// Text and bands are positioned at `offset + fraction * length` along the
/// horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSectionLine {
    /// Horizontal origin (`r0`)
    pub offset: f64,
    /// Euclidean line length (`r`)
    pub length: f64,
    pub start: (f64, f64),
    pub end: (f64, f64),
    xlim: Option<(f64, f64)>,
    show_ticks: bool,
}

impl CrossSectionLine {
    /// Resolve a line from optional endpoints
    ///
    /// Without endpoints the line is the unit segment `(0, 0)-(1, 0)` and
    /// horizontal ticks are suppressed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use aquiplot::plots::{CrossSectionLine, HorizontalAxis};
    ///
    /// let line = CrossSectionLine::resolve(Some([(0.0, 0.0), (3.0, 4.0)]), HorizontalAxis::Distance);
    /// assert_eq!(line.length, 5.0);
    /// assert_eq!(line.offset, 0.0);
    /// ```
    pub fn resolve(xy: Option<[(f64, f64); 2]>, axis: HorizontalAxis) -> Self {
        let Some([start, end]) = xy else {
            return Self {
                offset: 0.0,
                length: 1.0,
                start: (0.0, 0.0),
                end: (1.0, 0.0),
                xlim: None,
                show_ticks: false,
            };
        };

        let length = (end.0 - start.0).hypot(end.1 - start.1);
        let (offset, xlim) = match axis {
            HorizontalAxis::Distance => (0.0, (0.0, length)),
            HorizontalAxis::X => {
                let lo = start.0.min(end.0);
                (lo, (lo, start.0.max(end.0)))
            }
            HorizontalAxis::Y => {
                let lo = start.1.min(end.1);
                (lo, (lo, start.1.max(end.1)))
            }
        };

        Self { offset, length, start, end, xlim: Some(xlim), show_ticks: true }
    }

    /// Same as [`CrossSectionLine::resolve`] with the axis mode given as `"s"`, `"x"` or `"y"`
    pub fn parse(xy: Option<[(f64, f64); 2]>, axis: &str) -> Result<Self, PlotError> {
        Ok(Self::resolve(xy, axis.parse()?))
    }

    /// Horizontal coordinate at `fraction` of the line
    pub fn at(&self, fraction: f64) -> f64 {
        self.offset + fraction * self.length
    }

    /// Horizontal limits, `None` for the degenerate unit line
    pub fn xlim(&self) -> Option<(f64, f64)> {
        self.xlim
    }

    pub fn show_ticks(&self) -> bool {
        self.show_ticks
    }

    /// Endpoints as `[x0, y0, x1, y1]`
    pub fn endpoints(&self) -> [f64; 4] {
        [self.start.0, self.start.1, self.end.0, self.end.1]
    }

    /// Set the panel's horizontal limits and tick visibility
    pub fn apply(&self, ax: &mut Axes) {
        if let Some((lo, hi)) = self.xlim {
            ax.set_xlim(lo, hi);
        }
        if !self.show_ticks {
            ax.hide_xticks();
        }
    }
}

/// `n` evenly spaced values from `a` to `b` inclusive
pub fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![a],
        _ => {
            let step = (b - a) / (n - 1) as f64;
            (0..n).map(|i| if i == n - 1 { b } else { a + i as f64 * step }).collect()
        }
    }
}
