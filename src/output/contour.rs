//! Iso-line extraction on rectilinear grids
//!
//! Marching squares over a grid `z[row, col]` sampled at `y[row]`, `x[col]`.
//! The coordinate vectors only need to be monotonic: vertical cross-sections
//! run from the top of the model downwards, so `y` is often decreasing, and
//! layer boundaries make it non-uniform.
//!
//! Each level is traced independently; with the `parallel` feature the levels
//! are distributed over the rayon pool and collected back in level order.

use ndarray::ArrayView2;
use plotters::style::RGBColor;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Contour levels requested by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum Levels {
    /// Number of levels spread evenly over the data range
    Count(usize),
    /// Explicit level values
    Values(Vec<f64>),
}

impl Default for Levels {
    fn default() -> Self {
        Levels::Count(20)
    }
}

impl From<usize> for Levels {
    fn from(n: usize) -> Self {
        Levels::Count(n)
    }
}

impl From<Vec<f64>> for Levels {
    fn from(values: Vec<f64>) -> Self {
        Levels::Values(values)
    }
}

impl Levels {
    /// Resolve to concrete values for data spanning `[zmin, zmax]`
    ///
    /// A count of `n` yields `n` values strictly inside the range, so the
    /// extreme values themselves (often a single grid node) are not traced.
    pub fn resolve(&self, zmin: f64, zmax: f64) -> Vec<f64> {
        match self {
            Levels::Values(v) => v.clone(),
            Levels::Count(0) => Vec::new(),
            Levels::Count(n) => {
                if !(zmax > zmin) {
                    return Vec::new();
                }
                let step = (zmax - zmin) / (*n as f64 + 1.0);
                (1..=*n).map(|k| zmin + k as f64 * step).collect()
            }
        }
    }
}

/// Segments of a single iso-line level
#[derive(Debug, Clone, PartialEq)]
pub struct ContourLine {
    pub level: f64,
    pub segments: Vec<[(f64, f64); 2]>,
}

/// Label placed on a contour line
#[derive(Debug, Clone, PartialEq)]
pub struct ContourLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// All iso-lines of one contoured field, drawn in a single color
#[derive(Debug, Clone, PartialEq)]
pub struct ContourSet {
    lines: Vec<ContourLine>,
    color: RGBColor,
    labels: Vec<ContourLabel>,
    extent: ((f64, f64), (f64, f64)),
}

impl ContourSet {
    pub fn lines(&self) -> &[ContourLine] {
        &self.lines
    }

    /// Levels that produced at least one segment
    pub fn levels(&self) -> Vec<f64> {
        self.lines
            .iter()
            .filter(|l| !l.segments.is_empty())
            .map(|l| l.level)
            .collect()
    }

    pub fn color(&self) -> RGBColor {
        self.color
    }

    pub fn labels(&self) -> &[ContourLabel] {
        &self.labels
    }

    /// Grid extent `((xmin, xmax), (ymin, ymax))`
    pub fn extent(&self) -> ((f64, f64), (f64, f64)) {
        self.extent
    }

    pub fn segment_count(&self) -> usize {
        self.lines.iter().map(|l| l.segments.len()).sum()
    }

    /// Attach one label per non-empty level, formatted with `decimals` digits
    ///
    /// The label sits on the middle segment of the level.
    pub fn label(&mut self, decimals: usize) {
        self.labels = self
            .lines
            .iter()
            .filter(|l| !l.segments.is_empty())
            .map(|l| {
                let [a, b] = l.segments[l.segments.len() / 2];
                ContourLabel {
                    x: 0.5 * (a.0 + b.0),
                    y: 0.5 * (a.1 + b.1),
                    text: format!("{:.*}", decimals, l.level),
                }
            })
            .collect();
    }
}

/// Trace iso-lines of `z` (shape `[y.len(), x.len()]`)
///
/// Non-finite grid values are skipped cell by cell.
pub fn contour(x: &[f64], y: &[f64], z: ArrayView2<'_, f64>, levels: &Levels, color: RGBColor) -> ContourSet {
    debug_assert_eq!(z.dim(), (y.len(), x.len()));

    let (zmin, zmax) = z
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let values = levels.resolve(zmin, zmax);

    #[cfg(feature = "parallel")]
    let lines: Vec<ContourLine> = values
        .par_iter()
        .map(|&level| trace_level(x, y, z, level))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let lines: Vec<ContourLine> = values
        .iter()
        .map(|&level| trace_level(x, y, z, level))
        .collect();

    ContourSet {
        lines,
        color,
        labels: Vec::new(),
        extent: (min_max(x), min_max(y)),
    }
}

fn min_max(v: &[f64]) -> (f64, f64) {
    v.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| (lo.min(c), hi.max(c)))
}

fn trace_level(x: &[f64], y: &[f64], z: ArrayView2<'_, f64>, level: f64) -> ContourLine {
    let mut segments = Vec::new();
    let (ny, nx) = z.dim();

    for j in 0..ny.saturating_sub(1) {
        for i in 0..nx.saturating_sub(1) {
            let v00 = z[[j, i]];
            let v10 = z[[j, i + 1]];
            let v01 = z[[j + 1, i]];
            let v11 = z[[j + 1, i + 1]];
            if !(v00.is_finite() && v10.is_finite() && v01.is_finite() && v11.is_finite()) {
                continue;
            }

            let case = (v00 >= level) as u8
                | ((v10 >= level) as u8) << 1
                | ((v01 >= level) as u8) << 2
                | ((v11 >= level) as u8) << 3;
            if case == 0 || case == 15 {
                continue;
            }

            let frac = |va: f64, vb: f64| -> f64 {
                if (vb - va).abs() < f64::EPSILON {
                    0.5
                } else {
                    (level - va) / (vb - va)
                }
            };
            let lerp = |a: f64, b: f64, t: f64| a + t * (b - a);

            let bottom = (lerp(x[i], x[i + 1], frac(v00, v10)), y[j]);
            let top = (lerp(x[i], x[i + 1], frac(v01, v11)), y[j + 1]);
            let left = (x[i], lerp(y[j], y[j + 1], frac(v00, v01)));
            let right = (x[i + 1], lerp(y[j], y[j + 1], frac(v10, v11)));

            match case {
                1 | 14 => segments.push([bottom, left]),
                2 | 13 => segments.push([bottom, right]),
                3 | 12 => segments.push([left, right]),
                4 | 11 => segments.push([left, top]),
                5 | 10 => segments.push([bottom, top]),
                7 | 8 => segments.push([right, top]),
                // saddles: bit 0 = (i, j), bit 1 = (i+1, j), bit 2 = (i, j+1), bit 3 = (i+1, j+1)
                6 => {
                    segments.push([bottom, left]);
                    segments.push([top, right]);
                }
                9 => {
                    segments.push([bottom, right]);
                    segments.push([left, top]);
                }
                _ => {}
            }
        }
    }

    ContourLine { level, segments }
}

// =================================================================================================
// Tests
// =================================================================================================
