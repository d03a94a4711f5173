//! Integration tests: plan, vertical and stream-function contours

use aquiplot::model::Model;
use aquiplot::output::surface::{Artist, Aspect, Figure};
use aquiplot::output::visualization::Palette;
use aquiplot::plots::{
    ContourOptions, FluxContourOptions, HeadAlongLineOptions, Legend, PlotBase, PlotError, SteadyPlots,
    TransientPlots, VContourOptions,
};
use approx::assert_relative_eq;

mod common;
use common::{mixed_stack, spans, LayeredModel, MockElement};

const WINDOW: [f64; 4] = [0.0, 100.0, -50.0, 50.0];

/// Renderer with only the shared operations
struct BarePlots<'a>(&'a LayeredModel);

impl PlotBase for BarePlots<'_> {
    fn model(&self) -> &dyn Model {
        self.0
    }

    fn methods(&self) -> &'static [&'static str] {
        &["topview", "xsection"]
    }
}

// =================================================================================================
// Base variant
// =================================================================================================

#[test]
fn test_base_variant_has_no_grid_operations() {
    let model = LayeredModel::steady(mixed_stack());
    let plots = BarePlots(&model);
    let mut fig = Figure::default();

    let err = plots.contour(&mut fig, None, &ContourOptions::new(WINDOW)).unwrap_err();
    assert!(matches!(err, PlotError::NotImplemented("contour")));
    assert_eq!(err.to_string(), "contour() must be implemented by a specialized plot variant");

    let err = plots.head_along_line(&mut fig, None, &HeadAlongLineOptions::default()).unwrap_err();
    assert!(matches!(err, PlotError::NotImplemented("headalongline")));
    assert!(fig.is_empty());
}

#[test]
fn test_steady_variant_has_no_head_along_line() {
    let model = LayeredModel::steady(mixed_stack());
    let mut fig = Figure::default();
    let err = SteadyPlots::new(&model)
        .head_along_line(&mut fig, None, &HeadAlongLineOptions::default())
        .unwrap_err();
    assert!(matches!(err, PlotError::NotImplemented(_)));
}

// =================================================================================================
// Plan contours
// =================================================================================================

#[test]
fn test_steady_contour_panel() {
    let model = LayeredModel::steady(mixed_stack()).with_elements(vec![MockElement::well(50.0, 0.0, vec![0])]);
    let plots = SteadyPlots::new(&model);
    let mut fig = Figure::default();
    let opts = ContourOptions { return_contours: true, ..ContourOptions::new(WINDOW) };

    let result = plots.contour(&mut fig, None, &opts).unwrap();
    let ax = fig.axes(result.axes).unwrap();

    assert_eq!(ax.aspect(), Aspect::Equal);
    assert_eq!(ax.xlim(), (0.0, 100.0));
    assert_eq!(ax.ylim(), (-50.0, 50.0));
    assert_eq!(ax.legend().len(), 1);
    assert_eq!(ax.legend()[0].label, "layer 0");
    assert_eq!(ax.contours().count(), 1);
    assert!(ax.artists().iter().any(|a| matches!(a, Artist::Markers { .. })));

    let sets = result.contours.unwrap();
    assert_eq!(sets.len(), 1);
    assert!(sets[0].segment_count() > 0);
    assert_eq!(sets[0].color(), Palette::default_cycle().color(0));
}

#[test]
fn test_contours_not_returned_by_default() {
    let model = LayeredModel::steady(mixed_stack());
    let mut fig = Figure::default();
    let result = SteadyPlots::new(&model).contour(&mut fig, None, &ContourOptions::new(WINDOW)).unwrap();
    assert!(result.contours.is_none());
}

#[test]
fn test_contour_levels_are_vertical_lines() {
    let model = LayeredModel::steady(mixed_stack());
    let plots = SteadyPlots::new(&model);
    let mut fig = Figure::default();
    let opts = ContourOptions {
        return_contours: true,
        ..ContourOptions::new(WINDOW).with_levels(vec![-0.3, -0.6])
    };

    let sets = plots.contour(&mut fig, None, &opts).unwrap().contours.unwrap();
    let lines = sets[0].lines();
    for (line, x) in lines.iter().zip([30.0, 60.0]) {
        assert!(!line.segments.is_empty());
        for [a, b] in &line.segments {
            assert_relative_eq!(a.0, x, epsilon = 1e-9);
            assert_relative_eq!(b.0, x, epsilon = 1e-9);
        }
    }
    assert_eq!(sets[0].labels().len(), 2);
}

#[test]
fn test_all_aquifers_with_named_legend() {
    let model = LayeredModel::steady(mixed_stack());
    let plots = SteadyPlots::new(&model);
    let mut fig = Figure::default();
    let names: Vec<String> = ["upper", "middle", "lower"].iter().map(|s| s.to_string()).collect();
    let opts = ContourOptions {
        layers: None,
        legend: Legend::Names(names.clone()),
        return_contours: true,
        ..ContourOptions::new(WINDOW)
    };

    let result = plots.contour(&mut fig, None, &opts).unwrap();
    let ax = fig.axes(result.axes).unwrap();
    let labels: Vec<String> = ax.legend().iter().map(|e| e.label.clone()).collect();
    assert_eq!(labels, names);

    let colors: Vec<_> = result.contours.unwrap().iter().map(|cs| cs.color()).collect();
    let cycle = Palette::default_cycle();
    assert_eq!(colors, vec![cycle.color(0), cycle.color(1), cycle.color(2)]);
}

#[test]
fn test_legend_off() {
    let model = LayeredModel::steady(mixed_stack());
    let mut fig = Figure::default();
    let opts = ContourOptions { legend: Legend::from(false), ..ContourOptions::new(WINDOW) };
    let result = SteadyPlots::new(&model).contour(&mut fig, None, &opts).unwrap();
    assert!(fig.axes(result.axes).unwrap().legend().is_empty());
}

#[test]
fn test_contour_rejects_coarse_grid() {
    let model = LayeredModel::steady(mixed_stack());
    let mut fig = Figure::default();
    let err = SteadyPlots::new(&model)
        .contour(&mut fig, None, &ContourOptions::new(WINDOW).with_ngr(1))
        .unwrap_err();
    assert!(matches!(err, PlotError::InvalidConfiguration(_)));
    assert!(fig.is_empty());
}

#[test]
fn test_contour_propagates_model_failure() {
    let model = LayeredModel::steady(mixed_stack());
    let mut fig = Figure::default();
    let err = SteadyPlots::new(&model)
        .contour(&mut fig, None, &ContourOptions::new(WINDOW).with_layers(5))
        .unwrap_err();
    assert!(matches!(err, PlotError::Model(_)));
}

#[test]
fn test_transient_contour_uses_time_and_one_decimal() {
    let model = LayeredModel::transient(mixed_stack());
    let plots = TransientPlots::new(&model);
    let mut fig = Figure::default();
    // at t = 2 heads are shifted by 0.2: level -0.3 sits at x = 50
    let opts = ContourOptions {
        return_contours: true,
        ..ContourOptions::new(WINDOW).with_levels(vec![-0.3, -0.6]).at_time(2.0)
    };

    let result = plots.contour(&mut fig, None, &opts).unwrap();
    let ax = fig.axes(result.axes).unwrap();
    assert_eq!(ax.aspect(), Aspect::Equal);
    assert_eq!(ax.xlim(), (0.0, 100.0));

    let sets = result.contours.unwrap();
    let labels: Vec<&str> = sets[0].labels().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(labels, vec!["-0.3", "-0.6"]);
    let [a, _] = sets[0].lines()[0].segments[0];
    assert_relative_eq!(a.0, 50.0, epsilon = 1e-9);
}

// =================================================================================================
// Head along a line
// =================================================================================================

#[test]
fn test_head_along_line_default() {
    let model = LayeredModel::transient(mixed_stack());
    let mut fig = Figure::default();

    let id = TransientPlots::new(&model)
        .head_along_line(&mut fig, None, &HeadAlongLineOptions::default())
        .unwrap();
    let ax = fig.axes(id).unwrap();
    assert_eq!(ax.legend().len(), 1);
    assert_eq!(ax.legend()[0].label, "head (t=1.0, layer=0)");
    assert!(ax.grid());
}

#[test]
fn test_head_along_line_layers_and_times() {
    let model = LayeredModel::transient(mixed_stack());
    let mut fig = Figure::default();
    let opts = HeadAlongLineOptions {
        x2: 100.0,
        npoints: 11,
        t: vec![1.0, 2.5],
        sstart: 10.0,
        legend: false,
        ..HeadAlongLineOptions::default().with_layers(vec![0, 2])
    };

    let id = TransientPlots::new(&model).head_along_line(&mut fig, None, &opts).unwrap();
    let ax = fig.axes(id).unwrap();
    assert!(ax.legend().is_empty());

    let lines: Vec<(&Vec<(f64, f64)>, Option<&String>)> = ax
        .artists()
        .iter()
        .filter_map(|a| match a {
            Artist::Line { points, label, .. } => Some((points, label.as_ref())),
            _ => None,
        })
        .collect();
    let labels: Vec<&str> = lines.iter().filter_map(|(_, l)| l.map(|s| s.as_str())).collect();
    assert_eq!(
        labels,
        vec![
            "head (t=1.0, layer=0)",
            "head (t=2.5, layer=0)",
            "head (t=1.0, layer=2)",
            "head (t=2.5, layer=2)",
        ]
    );

    // distance starts at sstart; head = -0.01 x + layer + 0.1 t
    let (points, _) = lines[3];
    assert_relative_eq!(points[0].0, 10.0);
    assert_relative_eq!(points[10].0, 110.0);
    assert_relative_eq!(points[0].1, 2.25, epsilon = 1e-12);
    assert_relative_eq!(points[10].1, 1.25, epsilon = 1e-12);
}

// =================================================================================================
// Vertical contours
// =================================================================================================

#[test]
fn test_vcontour_with_layout() {
    let model = LayeredModel::steady(mixed_stack());
    let plots = SteadyPlots::new(&model);
    let mut fig = Figure::default();

    let (id, cs) = plots
        .vcontour(&mut fig, None, &VContourOptions::new([0.0, 100.0, 0.0, 0.0], 10))
        .unwrap();
    let ax = fig.axes(id).unwrap();

    assert!(cs.segment_count() > 0);
    assert_eq!(cs.color(), Palette::default_cycle().color(0));
    assert_eq!(cs.extent(), ((0.0, 100.0), (-20.0, 10.0)));

    assert_eq!(spans(ax), vec![(-2.0, 0.0), (-10.0, -10.0)]);
    assert_eq!(ax.contours().count(), 1);
}

#[test]
fn test_vcontour_needs_two_points() {
    let model = LayeredModel::steady(mixed_stack());
    let mut fig = Figure::default();
    let err = SteadyPlots::new(&model)
        .vcontour(&mut fig, None, &VContourOptions::new([0.0, 100.0, 0.0, 0.0], 1))
        .unwrap_err();
    assert!(matches!(err, PlotError::InvalidConfiguration(_)));
}

#[test]
fn test_stream_function_contours() {
    let model = LayeredModel::steady(mixed_stack());
    let plots = SteadyPlots::new(&model);
    let mut fig = Figure::default();
    // discharge [0.05, 0.1, 0.2] gives rows [-0.35, -0.3, -0.3, -0.2, -0.2, 0]
    let opts = FluxContourOptions::new(0.0, 100.0, 5, vec![-0.1, -0.25]);

    let id = plots.vcontoursf1d(&mut fig, None, &opts).unwrap();
    let ax = fig.axes(id).unwrap();
    let cs = ax.contours().next().unwrap();

    assert_eq!(cs.levels(), vec![-0.1, -0.25]);
    for (line, z) in cs.lines().iter().zip([-15.0, -6.0]) {
        for [a, b] in &line.segments {
            assert_relative_eq!(a.1, z, epsilon = 1e-9);
            assert_relative_eq!(b.1, z, epsilon = 1e-9);
        }
    }
    assert!(cs.labels().is_empty());
    assert_eq!(ax.xlim(), (0.0, 100.0));
}

// =================================================================================================
// Description
// =================================================================================================

#[test]
fn test_display_lists_methods() {
    let steady = LayeredModel::steady(mixed_stack());
    let text = SteadyPlots::new(&steady).to_string();
    assert!(text.starts_with("aquiplot steady plots, available methods:\n - contour\n - tracelines"));
    assert!(text.ends_with(" - xsection"));

    let transient = LayeredModel::transient(mixed_stack());
    let text = TransientPlots::new(&transient).to_string();
    assert!(text.starts_with("aquiplot transient plots"));
    assert!(text.contains(" - head_along_line"));
}
