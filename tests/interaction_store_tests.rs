use std::cell::RefCell;
use std::rc::Rc;

use chart_interaction::ChartError;
use chart_interaction::api::{ChartEngine, ChartEngineConfig};
use chart_interaction::core::{DataPoint, Series, SeriesId, Viewport};
use chart_interaction::extensions::{InteractionObserver, observer_fn};
use chart_interaction::interaction::{
    FocusTrigger, Highlight, InteractionPhase, InteractionSnapshot, InteractionStore,
};
use chart_interaction::render::NullRenderer;

struct RecordingObserver {
    id: String,
    seen: Rc<RefCell<Vec<InteractionSnapshot>>>,
}

impl InteractionObserver for RecordingObserver {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_state_changed(&mut self, snapshot: &InteractionSnapshot) {
        self.seen.borrow_mut().push(*snapshot);
    }
}

fn engine() -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(800, 400)).with_y_domain(0.0, 100.0);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine
        .set_series(vec![
            Series::line("L1", vec![DataPoint::new(0.0, 10.0), DataPoint::new(1.0, 20.0)]),
            Series::line("L2", vec![DataPoint::new(0.0, 30.0), DataPoint::new(1.0, 40.0)]),
        ])
        .expect("series");
    engine
}

#[test]
fn observers_receive_every_committed_change_in_order() {
    let mut engine = engine();
    let seen = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_observer(Box::new(RecordingObserver {
            id: "recorder".to_owned(),
            seen: seen.clone(),
        }))
        .expect("register observer");

    engine.focus(FocusTrigger::Keyboard);
    engine.legend_highlight(Some(SeriesId(1)));
    engine.legend_highlight(Some(SeriesId(1)));
    engine.blur();

    let phases: Vec<InteractionPhase> = seen.borrow().iter().map(|s| s.phase()).collect();
    assert_eq!(
        phases,
        vec![
            InteractionPhase::ColumnHighlighted,
            InteractionPhase::SeriesHighlighted,
            InteractionPhase::Idle,
        ]
    );
    let revisions: Vec<u64> = seen.borrow().iter().map(|s| s.revision).collect();
    assert!(revisions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn observer_ids_must_be_unique_and_non_empty() {
    let mut engine = engine();
    engine
        .register_observer(observer_fn("legend", |_| {}))
        .expect("first registration");

    let duplicate = engine
        .register_observer(observer_fn("legend", |_| {}))
        .expect_err("duplicate id must fail");
    assert!(matches!(duplicate, ChartError::InvalidData(_)));

    let empty = engine
        .register_observer(observer_fn("", |_| {}))
        .expect_err("empty id must fail");
    assert!(matches!(empty, ChartError::InvalidData(_)));

    assert_eq!(engine.observer_count(), 1);
    assert!(engine.has_observer("legend"));
    assert!(engine.unregister_observer("legend"));
    assert!(!engine.unregister_observer("legend"));
    assert_eq!(engine.observer_count(), 0);
}

#[test]
fn unregistered_observer_stops_receiving_updates() {
    let mut engine = engine();
    let count = Rc::new(RefCell::new(0usize));
    let counter = count.clone();
    engine
        .register_observer(observer_fn("counter", move |_| *counter.borrow_mut() += 1))
        .expect("register");

    engine.legend_highlight(Some(SeriesId(0)));
    assert!(engine.unregister_observer("counter"));
    engine.legend_highlight(None);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn legend_highlight_ignores_unknown_series() {
    let mut engine = engine();
    engine.legend_highlight(Some(SeriesId(9)));
    assert!(engine.snapshot().is_idle());
}

#[test]
fn store_highlight_point_marks_series_as_emphasized() {
    let engine = engine();
    let point = engine.model().series_points(SeriesId(1))[0];

    let mut store = InteractionStore::new();
    store.highlight_point(point);
    assert_eq!(store.get().emphasized_series(), Some(SeriesId(1)));
    assert_eq!(store.get().highlighted_point(), Some(point));

    store.highlight_series(None);
    assert_eq!(store.get().highlight, Highlight::None);
}

#[test]
fn clear_state_unpins_while_clear_highlight_does_not() {
    let mut store = InteractionStore::new();
    store.highlight_group(Some(1));
    store.pin_popover();
    store.clear_highlight();
    let snapshot = store.get();
    assert!(snapshot.is_idle());
    assert!(snapshot.popover_pinned);

    store.clear_state();
    assert!(!store.get().popover_pinned);
}

#[test]
fn new_series_snapshot_resets_interaction_state() {
    let mut engine = engine();
    engine.focus(FocusTrigger::Keyboard);
    engine.pointer_down();
    assert!(engine.snapshot().popover_pinned);

    engine
        .set_series(vec![Series::line("only", vec![DataPoint::new(0.0, 1.0)])])
        .expect("series");
    assert!(engine.snapshot().is_idle());
    assert!(!engine.snapshot().popover_pinned);
    assert!(!engine.is_popover_open());
}

#[test]
fn same_series_snapshot_keeps_state() {
    let config = ChartEngineConfig::new(Viewport::new(800, 400));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    let series: chart_interaction::core::SeriesSet =
        vec![Series::line("a", vec![DataPoint::new(0.0, 1.0), DataPoint::new(1.0, 2.0)])].into();
    engine.set_series(series.clone()).expect("series");
    engine.focus(FocusTrigger::Keyboard);
    let before = engine.snapshot();

    engine.set_series(series).expect("same snapshot");
    assert_eq!(engine.snapshot(), before);
}
