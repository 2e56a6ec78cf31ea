use std::time::Duration;

use chart_interaction::api::{ChartEngine, ChartEngineConfig};
use chart_interaction::core::{DataPoint, Series, SeriesId, Viewport};
use chart_interaction::render::NullRenderer;

fn line_engine() -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(800, 400)).with_y_domain(0.0, 100.0);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine
        .set_series(vec![
            Series::line(
                "L1",
                vec![
                    DataPoint::new(0.0, 50.0),
                    DataPoint::new(1.0, 50.0),
                    DataPoint::new(2.0, 50.0),
                ],
            ),
            Series::line(
                "L2",
                vec![
                    DataPoint::new(0.0, 25.0),
                    DataPoint::new(1.0, 25.0),
                    DataPoint::new(2.0, 25.0),
                ],
            ),
        ])
        .expect("series");
    engine
}

#[test]
fn idle_chart_renders_empty_overlay() {
    let mut engine = line_engine();
    let frame = engine.build_overlay_frame();
    assert!(frame.is_empty());

    engine.render().expect("render");
    let renderer = engine.into_renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_line_count, 0);
}

#[test]
fn point_highlight_draws_marker_line_points_and_popover() {
    let mut engine = line_engine();
    engine.pointer_move(400.0, 200.0, Duration::ZERO);

    let frame = engine.build_overlay_frame();
    frame.validate().expect("valid frame");
    assert_eq!(frame.lines.len(), 1);
    assert_eq!(frame.lines[0].x1, 400.0);
    assert_eq!(frame.lines[0].y2, 400.0);

    let radii: Vec<f64> = frame.markers.iter().map(|marker| marker.radius).collect();
    assert_eq!(radii, vec![5.0, 3.0]);

    assert_eq!(frame.rects.len(), 1);
    assert_eq!((frame.rects[0].x, frame.rects[0].y), (412.0, 140.0));
    let texts: Vec<&str> = frame.texts.iter().map(|text| text.text.as_str()).collect();
    assert_eq!(texts, vec!["1", "L1: 50"]);

    engine.render().expect("render");
    let renderer = engine.into_renderer();
    assert_eq!(renderer.last_line_count, 1);
    assert_eq!(renderer.last_marker_count, 2);
    assert_eq!(renderer.last_rect_count, 1);
    assert_eq!(renderer.last_text_count, 2);
}

#[test]
fn popover_rect_is_plot_relative() {
    let mut engine = line_engine();
    engine.set_plot_origin(100.0, 50.0).expect("origin");
    engine.pointer_move(500.0, 250.0, Duration::ZERO);

    let placement = engine.popover_view().placement.expect("placement");
    assert_eq!(placement.rect.x, 512.0);

    let frame = engine.build_overlay_frame();
    assert_eq!(frame.rects[0].x, 412.0);
    assert_eq!(frame.rects[0].y, 140.0);
}

#[test]
fn group_highlight_adds_group_shading() {
    let config = ChartEngineConfig::new(Viewport::new(800, 400));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine
        .set_series(vec![Series::bar(
            "sales",
            vec![
                DataPoint::new(1.0, 10.0),
                DataPoint::new(2.0, 20.0),
                DataPoint::new(3.0, 30.0),
            ],
        )])
        .expect("series");
    engine.pointer_move(400.0, 200.0, Duration::ZERO);

    let frame = engine.build_overlay_frame();
    frame.validate().expect("valid frame");
    assert_eq!(frame.rects.len(), 2);
    assert_eq!(frame.rects[0].x, 300.0);
    assert_eq!(frame.rects[0].width, 200.0);
    assert_eq!(frame.lines.len(), 1);
    assert_eq!(frame.markers.len(), 1);
    let texts: Vec<&str> = frame.texts.iter().map(|text| text.text.as_str()).collect();
    assert_eq!(texts, vec!["2", "sales: 20"]);
}

#[test]
fn legend_highlight_draws_nothing() {
    let mut engine = line_engine();
    engine.legend_highlight(Some(SeriesId(1)));
    assert!(engine.build_overlay_frame().is_empty());
}

#[test]
fn pinned_popover_survives_legend_hover_in_frame() {
    let mut engine = line_engine();
    engine.pointer_move(400.0, 200.0, Duration::ZERO);
    engine.pointer_down();
    engine.legend_highlight(Some(SeriesId(1)));

    let frame = engine.build_overlay_frame();
    assert!(frame.lines.is_empty());
    assert_eq!(frame.rects.len(), 1);
    assert_eq!(frame.texts.len(), 2);
}
