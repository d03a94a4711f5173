//! Stream-function grid of a layered flow field
//!
//! Between two aquifers the stream function is constant, so every aquifer
//! contributes two grid rows (its top and bottom). Integrating the discharge
//! from the base upwards gives 0 at the bottom of the lowest aquifer and
//! `-sum(Q)` at the top of the highest one; contours of this grid are flow
//! lines of the vertical cross-section.

use nalgebra::{DMatrix, DVector};
use ndarray::Array2;

use super::geometry::linspace;

/// Cumulative stream-function values sampled along a probe line
///
/// Row 0 is the top of the highest aquifer, row `2 * naq - 1` the bottom of
/// the lowest; column `k` belongs to sample point `k`.
#[derive(Debug, Clone, PartialEq)]
pub struct FluxGrid {
    values: DMatrix<f64>,
}

impl FluxGrid {
    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    pub fn column(&self, k: usize) -> Vec<f64> {
        self.values.column(k).iter().copied().collect()
    }

    /// Copy into an `ndarray` grid for contouring
    pub fn to_array(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.nrows(), self.ncols()), |(i, j)| self.values[(i, j)])
    }
}

/// Stream-function column for one discharge sample (index 0 = top aquifer)
///
/// The layers are reversed, integrated from the base upwards, and reversed
/// again so the top row comes first.
///
/// # Example
///
/// ```rust
/// use aquiplot::plots::stream::flux_column;
///
/// assert_eq!(flux_column(&[3.0, 2.0]), vec![-5.0, -2.0, -2.0, 0.0]);
/// ```
pub fn flux_column(discharge: &[f64]) -> Vec<f64> {
    let naq = discharge.len();
    if naq == 0 {
        return Vec::new();
    }

    let upside_down: Vec<f64> = discharge.iter().rev().copied().collect();
    let mut column = vec![0.0; 2 * naq];
    for i in 0..naq - 1 {
        column[2 * i + 1] = column[2 * i] - upside_down[i];
        column[2 * i + 2] = column[2 * i + 1];
    }
    column[2 * naq - 1] = column[2 * naq - 2] - upside_down[naq - 1];
    column.reverse();
    column
}

/// Sample `n` points from `start` to `end`, query the per-aquifer discharge
/// and stack the stream-function columns
///
/// # Errors
///
/// Propagates the first failing query, and rejects samples whose aquifer
/// count differs from the first one.
pub fn build_flux_grid<F>(start: (f64, f64), end: (f64, f64), n: usize, mut discharge: F) -> Result<FluxGrid, String>
where
    F: FnMut(f64, f64) -> Result<DVector<f64>, String>,
{
    let xs = linspace(start.0, end.0, n);
    let ys = linspace(start.1, end.1, n);

    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(n);
    for (x, y) in xs.into_iter().zip(ys) {
        let q = discharge(x, y)?;
        let column = flux_column(q.as_slice());
        if let Some(first) = columns.first() {
            if first.len() != column.len() {
                return Err(format!(
                    "discharge at ({x}, {y}) has {} aquifers, expected {}",
                    q.len(),
                    first.len() / 2
                ));
            }
        }
        columns.push(column);
    }

    let nrows = columns.first().map_or(0, Vec::len);
    let values = DMatrix::from_fn(nrows, columns.len(), |i, j| columns[j][i]);
    Ok(FluxGrid { values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_two_aquifer_column() {
        assert_eq!(flux_column(&[2.0, 3.0]), vec![-5.0, -3.0, -3.0, 0.0]);
        assert_eq!(flux_column(&[3.0, 2.0]), vec![-5.0, -2.0, -2.0, 0.0]);
    }

    #[test]
    fn test_single_aquifer_column() {
        assert_eq!(flux_column(&[4.0]), vec![-4.0, 0.0]);
    }

    #[test]
    fn test_net_drop_is_minus_total_discharge() {
        let q = [1.5, -0.5, 2.25, 0.75];
        let column = flux_column(&q);
        assert_eq!(column.len(), 8);
        assert_relative_eq!(column[0] - column[7], -q.iter().sum::<f64>());
        // constant across each leaky interface
        assert_eq!(column[1], column[2]);
        assert_eq!(column[3], column[4]);
        assert_eq!(column[5], column[6]);
    }

    #[test]
    fn test_grid_columns_follow_probe_line() {
        let grid = build_flux_grid((0.0, 0.0), (4.0, 0.0), 5, |x, _| Ok(DVector::from_vec(vec![x, 1.0]))).unwrap();
        assert_eq!((grid.nrows(), grid.ncols()), (4, 5));
        assert_eq!(grid.column(2), vec![-3.0, -1.0, -1.0, 0.0]);
        assert_eq!(grid.to_array()[[0, 4]], -5.0);
    }

    #[test]
    fn test_grid_propagates_query_error() {
        let result = build_flux_grid((0.0, 0.0), (1.0, 0.0), 3, |_, _| Err("outside model".to_string()));
        assert_eq!(result.unwrap_err(), "outside model");
    }

    #[test]
    fn test_grid_rejects_changing_aquifer_count() {
        let result = build_flux_grid((0.0, 0.0), (1.0, 0.0), 2, |x, _| {
            Ok(DVector::from_vec(if x < 0.5 { vec![1.0] } else { vec![1.0, 2.0] }))
        });
        assert!(result.is_err());
    }
}
