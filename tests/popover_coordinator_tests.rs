use std::time::Duration;

use approx::assert_relative_eq;
use chart_interaction::api::{ChartEngine, ChartEngineConfig, PointerTarget};
use chart_interaction::core::{DataPoint, Rect, Series, SeriesId, Viewport};
use chart_interaction::interaction::{
    ChartKey, DismissReason, FocusTarget, FocusTrigger, Highlight, PopoverAnchor, PopoverBehavior,
    PopoverSide, compute_placement,
};
use chart_interaction::render::NullRenderer;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn engine() -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(800, 400)).with_y_domain(0.0, 100.0);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine
        .set_series(vec![
            Series::line(
                "revenue",
                vec![
                    DataPoint::new(0.0, 50.0),
                    DataPoint::new(1.0, 50.0),
                    DataPoint::new(2.0, 50.0),
                ],
            ),
            Series::line(
                "cost",
                vec![
                    DataPoint::new(0.0, 12.5),
                    DataPoint::new(1.0, 3.14159),
                    DataPoint::new(2.0, 20.0),
                ],
            ),
            Series::x_threshold("launch", 1.0),
        ])
        .expect("series");
    engine
}

#[test]
fn point_highlight_opens_popover_to_the_right() {
    let mut engine = engine();
    engine.pointer_move(400.0, 200.0, ms(0));

    let view = engine.popover_view();
    assert!(view.open);
    assert!(!view.pinned);
    let placement = view.placement.expect("placement");
    assert_eq!(placement.side, PopoverSide::Right);
    assert_eq!(placement.anchor, PopoverAnchor { x: 400.0, y: 200.0 });
    assert_eq!(placement.rect, Rect::new(412.0, 140.0, 240.0, 120.0));

    let details = view.details.as_ref().expect("details");
    assert_eq!(details.title, "1");
    let rows: Vec<(&str, &str)> = details
        .rows
        .iter()
        .map(|row| (row.label.as_str(), row.value.as_str()))
        .collect();
    assert_eq!(rows, vec![("revenue", "50"), ("launch", "")]);
}

#[test]
fn popover_flips_left_near_right_edge() {
    let mut engine = engine();
    engine.pointer_move(800.0, 200.0, ms(0));

    let placement = engine.popover_view().placement.expect("placement");
    assert_eq!(placement.side, PopoverSide::Left);
    assert_relative_eq!(placement.rect.x, 800.0 - 12.0 - 240.0);
}

#[test]
fn column_popover_lists_every_series_with_precision() {
    let mut engine = engine();
    engine.focus(FocusTrigger::Keyboard);
    engine.key_down(ChartKey::ArrowRight);

    let view = engine.popover_view();
    let placement = view.placement.expect("placement");
    assert_relative_eq!(placement.anchor.x, 400.0);
    assert_relative_eq!(placement.anchor.y, 200.0);

    let details = view.details.as_ref().expect("details");
    let values: Vec<&str> = details.rows.iter().map(|row| row.value.as_str()).collect();
    assert_eq!(values, vec!["50", "3.14", ""]);
}

#[test]
fn legend_highlight_does_not_open_popover() {
    let mut engine = engine();
    engine.legend_highlight(Some(SeriesId(1)));
    assert_eq!(engine.snapshot().highlight, Highlight::Series(SeriesId(1)));
    assert!(!engine.is_popover_open());
    assert!(engine.popover_bounds().is_none());
}

#[test]
fn pinned_popover_retains_content_after_highlight_changes() {
    let mut engine = engine();
    engine.pointer_move(400.0, 200.0, ms(0));
    engine.pointer_down();
    let pinned_view = engine.popover_view().clone();
    assert!(pinned_view.pinned);

    engine.legend_highlight(Some(SeriesId(1)));
    let view = engine.popover_view();
    assert!(view.open);
    assert_eq!(view.placement, pinned_view.placement);
    assert_eq!(view.details, pinned_view.details);
}

#[test]
fn pointer_down_on_pinned_popover_releases_it() {
    let mut engine = engine();
    engine.pointer_move(400.0, 200.0, ms(0));
    engine.pointer_down();
    engine.pointer_down();

    assert!(!engine.snapshot().popover_pinned);
    assert_eq!(engine.snapshot().highlighted_point().map(|p| p.index.x), Some(1));

    let outcome = engine.tick(ms(1));
    assert_eq!(outcome.focus, Some(FocusTarget::Application));
}

#[test]
fn pointer_down_without_popover_is_noop() {
    let mut engine = engine();
    engine.pointer_down();
    assert!(!engine.snapshot().popover_pinned);
    assert_eq!(engine.snapshot().revision, 0);
}

#[test]
fn escape_dismiss_clears_and_returns_focus_to_plot() {
    let mut engine = engine();
    engine.pointer_move(400.0, 200.0, ms(0));
    engine.pointer_down();

    assert!(engine.key_down(ChartKey::Escape));
    assert!(engine.snapshot().is_idle());
    assert!(!engine.is_popover_open());

    let outcome = engine.tick(ms(1));
    assert_eq!(outcome.focus, Some(FocusTarget::Plot));
    assert!(engine.is_focused());
    assert_eq!(engine.tick(ms(2)).focus, None);
}

#[test]
fn escape_without_popover_is_not_consumed() {
    let mut engine = engine();
    assert!(!engine.key_down(ChartKey::Escape));
}

#[test]
fn outside_click_resets_everything_without_focus_return() {
    let mut engine = engine();
    engine.focus(FocusTrigger::Keyboard);
    engine.key_down(ChartKey::Space);
    assert!(engine.snapshot().popover_pinned);

    engine.document_pointer_down(PointerTarget::Outside);
    assert!(engine.snapshot().is_idle());
    assert!(!engine.snapshot().popover_pinned);
    assert!(engine.vertical_marker().is_none());
    assert_eq!(engine.tick(ms(1)).focus, None);
}

#[test]
fn document_pointer_down_inside_plot_keeps_popover() {
    let mut engine = engine();
    engine.pointer_move(400.0, 200.0, ms(0));
    engine.document_pointer_down(PointerTarget::InsidePlot);
    assert!(engine.is_popover_open());
}

#[test]
fn dismiss_button_keeps_highlight() {
    let mut engine = engine();
    engine.focus(FocusTrigger::Keyboard);
    engine.key_down(ChartKey::Space);

    engine.dismiss_popover(DismissReason::DismissButton);
    assert!(!engine.snapshot().popover_pinned);
    assert!(!engine.snapshot().is_idle());
    assert_eq!(engine.tick(ms(1)).focus, Some(FocusTarget::Application));
}

#[test]
fn container_blur_resets_pin_and_highlight() {
    let mut engine = engine();
    engine.focus(FocusTrigger::Keyboard);
    engine.key_down(ChartKey::Space);
    engine.container_blur();

    assert!(engine.snapshot().is_idle());
    assert!(!engine.snapshot().popover_pinned);
    assert!(!engine.is_popover_open());
}

#[test]
fn placement_is_idempotent() {
    let anchor = PopoverAnchor { x: 640.0, y: 20.0 };
    let container = Rect::new(10.0, 10.0, 800.0, 400.0);
    let behavior = PopoverBehavior::default();

    let first = compute_placement(anchor, behavior, container);
    let second = compute_placement(anchor, behavior, container);
    assert_eq!(first, second);
    // Vertical position is clamped into the container.
    assert_relative_eq!(first.rect.y, 10.0);
}

#[test]
fn engine_resync_does_not_move_anchor() {
    let mut engine = engine();
    engine.pointer_move(400.0, 200.0, ms(0));
    let before = engine.popover_view().placement;

    engine.set_plot_origin(0.0, 0.0).expect("same origin");
    engine.pointer_move(400.0, 200.0, ms(50));
    assert_eq!(engine.popover_view().placement, before);
}

#[test]
fn vertical_marker_follows_highlight() {
    let mut engine = engine();
    engine.pointer_move(400.0, 200.0, ms(0));

    let marker = engine.vertical_marker().expect("marker");
    assert_relative_eq!(marker.x, 400.0);
    let series: Vec<SeriesId> = marker.points.iter().map(|p| p.series).collect();
    assert_eq!(series, vec![SeriesId(0), SeriesId(1), SeriesId(2)]);

    engine.legend_highlight(Some(SeriesId(0)));
    assert!(engine.vertical_marker().is_none());
}

#[test]
fn popover_view_serializes_for_host_renderers() {
    let mut engine = engine();
    engine.pointer_move(400.0, 200.0, ms(0));
    let view = engine.popover_view().clone();
    assert!(view.open);

    let json = serde_json::to_string(&view).expect("serialize view");
    assert!(json.contains("\"rows\":["));
    let restored: chart_interaction::interaction::PopoverView =
        serde_json::from_str(&json).expect("parse view");

    assert_eq!(restored.open, view.open);
    assert_eq!(restored.placement, view.placement);
    let (before, after) = (
        view.details.as_ref().expect("details"),
        restored.details.as_ref().expect("restored details"),
    );
    assert_eq!(after.title, before.title);
    assert_eq!(after.rows.len(), before.rows.len());
    for (left, right) in before.rows.iter().zip(after.rows.iter()) {
        assert_eq!(left.label, right.label);
        assert_eq!(left.value, right.value);
        assert_relative_eq!(left.color.red, right.color.red);
        assert_relative_eq!(left.color.alpha, right.color.alpha);
    }
}
