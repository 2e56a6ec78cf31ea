use std::time::Duration;

use chart_interaction::api::{ChartEngine, ChartEngineConfig};
use chart_interaction::core::{DataPoint, Rect, Series, SeriesId, Viewport};
use chart_interaction::interaction::{
    ChartKey, FocusTrigger, Highlight, InteractionStore, PopoverAnchor, PopoverBehavior,
    compute_placement,
};
use chart_interaction::render::NullRenderer;
use proptest::prelude::*;

fn line_engine(columns: usize, series: usize) -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(1000, 500)).with_y_domain(0.0, 100.0);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    let series = (0..series)
        .map(|s| {
            Series::line(
                format!("s{s}"),
                (0..columns)
                    .map(|x| DataPoint::new(x as f64, 10.0 + (s * 20 + x % 7) as f64))
                    .collect(),
            )
        })
        .collect::<Vec<_>>();
    engine.set_series(series).expect("series");
    engine
}

fn bar_engine(groups: usize) -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(1000, 500));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine
        .set_series(vec![Series::bar(
            "bars",
            (0..groups)
                .map(|x| DataPoint::new(x as f64, 5.0 + x as f64))
                .collect(),
        )])
        .expect("series");
    engine
}

proptest! {
    #[test]
    fn clear_highlight_returns_to_idle_and_keeps_pin(
        columns in 1usize..12,
        pick in 0usize..64,
        pinned in any::<bool>()
    ) {
        let engine = line_engine(columns, 2);
        let points = engine.model().series_points(SeriesId(1));
        let point = points[pick % points.len()];

        let mut store = InteractionStore::new();
        if pinned {
            store.pin_popover();
        }
        store.highlight_point(point);
        store.clear_highlight();

        prop_assert!(store.get().is_idle());
        prop_assert_eq!(store.get().popover_pinned, pinned);
    }

    #[test]
    fn right_arrow_cycles_through_every_column(
        columns in 1usize..16,
        series in 2usize..5
    ) {
        let mut engine = line_engine(columns, series);
        engine.focus(FocusTrigger::Keyboard);
        let start = engine.snapshot().highlight;
        prop_assert!(matches!(start, Highlight::Column(_)));

        for _ in 0..columns {
            prop_assert!(engine.key_down(ChartKey::ArrowRight));
        }
        prop_assert_eq!(engine.snapshot().highlight, start);
    }

    #[test]
    fn pointer_inside_group_box_highlights_that_group(
        groups in 1usize..10,
        pick in 0usize..64,
        fx in 0.01f64..0.99,
        fy in 0.01f64..0.99
    ) {
        let mut engine = bar_engine(groups);
        let index = pick % groups;
        let rect = engine.model().bar_groups()[index].rect;

        engine.pointer_move(rect.x + rect.width * fx, rect.y + rect.height * fy, Duration::ZERO);
        prop_assert_eq!(engine.snapshot().highlight, Highlight::Group(index));
    }

    #[test]
    fn placement_is_deterministic_and_stays_in_container(
        anchor_x in 0.0f64..1000.0,
        anchor_y in 0.0f64..600.0,
        width in 50.0f64..300.0,
        height in 20.0f64..200.0
    ) {
        let container = Rect::new(0.0, 0.0, 1000.0, 600.0);
        let behavior = PopoverBehavior {
            width_px: width,
            height_px: height,
            ..PopoverBehavior::default()
        };
        let anchor = PopoverAnchor { x: anchor_x, y: anchor_y };

        let first = compute_placement(anchor, behavior, container);
        prop_assert_eq!(first, compute_placement(anchor, behavior, container));
        prop_assert!(first.rect.x >= container.x);
        prop_assert!(first.rect.y >= container.y);
        prop_assert!(first.rect.bottom() <= container.bottom() + 1e-9);
    }

    #[test]
    fn throttled_burst_matches_last_move_applied_directly(
        first in (0.0f64..200.0, 0.0f64..500.0),
        middle in prop::collection::vec((0.0f64..1000.0, 0.0f64..500.0), 0..6),
        last in (600.0f64..1000.0, 0.0f64..500.0)
    ) {
        // Columns sit 200px apart; the first popover box and its dead zone end
        // before x=600, so the last move is never swallowed by it.
        let moves: Vec<(f64, f64)> = std::iter::once(first)
            .chain(middle)
            .chain(std::iter::once(last))
            .collect();

        let mut burst = line_engine(6, 2);
        for (step, (x, y)) in moves.iter().enumerate() {
            burst.pointer_move(*x, *y, Duration::from_millis(step as u64 * 3));
        }
        prop_assert!(burst.tick(Duration::from_millis(100)).pointer_applied);

        let mut direct = line_engine(6, 2);
        direct.pointer_move(first.0, first.1, Duration::ZERO);
        let first_highlight = direct.snapshot().highlight;
        direct.pointer_move(last.0, last.1, Duration::from_millis(100));

        let expected_column = direct.model().nearest_column(last.0).map(|column| column.index);
        prop_assert_eq!(burst.snapshot().highlight, direct.snapshot().highlight);
        prop_assert_eq!(burst.snapshot().highlight.column_index(), expected_column);
        prop_assert_ne!(burst.snapshot().highlight, first_highlight);
    }
}
