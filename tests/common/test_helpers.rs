//! Helper functions for integration tests

use aquiplot::model::AquiferData;
use aquiplot::output::surface::{Artist, Axes, Bbox};

/// Aquifer, leaky layer, aquifer, aquifer
///
/// ```text
///  10 ┬ aquifer 0      kaq 5
///   0 ┼ leaky layer 1  c 100
///  -2 ┼ aquifer 1      kaq 10
/// -10 ┼ aquifer 2      kaq 20
/// -20 ┴
/// ```
pub fn mixed_stack() -> AquiferData {
    AquiferData::new("alaa", vec![10.0, 0.0, -2.0, -10.0, -20.0], vec![5.0, 10.0, 20.0], vec![0.0, 100.0, 0.0])
        .unwrap()
        .with_storage(vec![0.1, 1e-4, 2e-4], vec![0.0, 1e-5, 0.0])
        .unwrap()
        .with_kzoverkh(vec![0.1, 0.2, 0.5])
        .unwrap()
}

/// Leaky top layer above two aquifers
pub fn leaky_top_stack() -> AquiferData {
    AquiferData::new("lala", vec![12.0, 10.0, 0.0, -2.0, -20.0], vec![5.0, 10.0], vec![50.0, 100.0])
        .unwrap()
}

/// Single aquifer, used for 1D strip models
pub fn single_aquifer() -> AquiferData {
    AquiferData::new("a", vec![0.0, -10.0], vec![10.0], vec![0.0]).unwrap()
}

/// Text contents of a panel, in drawing order
pub fn texts(ax: &Axes) -> Vec<String> {
    ax.texts().map(|(_, _, t)| t.to_string()).collect()
}

/// `(ymin, ymax)` of every horizontal band
pub fn spans(ax: &Axes) -> Vec<(f64, f64)> {
    ax.artists()
        .iter()
        .filter_map(|a| match a {
            Artist::HSpan { ymin, ymax, .. } => Some((*ymin, *ymax)),
            _ => None,
        })
        .collect()
}

/// `(y, width)` of every horizontal line
pub fn hlines(ax: &Axes) -> Vec<(f64, f64)> {
    ax.artists()
        .iter()
        .filter_map(|a| match a {
            Artist::HLine { y, width, .. } => Some((*y, *width)),
            _ => None,
        })
        .collect()
}

/// Assert two boxes are equal within `tol`
pub fn assert_bbox_close(a: Bbox, b: Bbox, tol: f64) {
    assert!(
        (a.x0 - b.x0).abs() < tol
            && (a.y0 - b.y0).abs() < tol
            && (a.width - b.width).abs() < tol
            && (a.height - b.height).abs() < tol,
        "boxes differ: {a:?} vs {b:?}"
    );
}
