use crate::core::{PlotModel, SeriesSet};
use crate::error::ChartResult;
use crate::interaction::{InteractionStore, KeyboardNavigator, PopoverCoordinator, Throttle};
use crate::render::{OverlayFrame, Renderer};

use super::interaction_controller::PointerSample;
use super::overlay_frame_builder::build_overlay_frame;
use super::validation::validate_config;
use super::ChartEngineConfig;

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the plot geometry for the current series snapshot, the
/// interaction store, the keyboard navigator and the popover coordinator, and
/// translates host input events into store operations.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartEngineConfig,
    pub(super) model: PlotModel,
    pub(super) store: InteractionStore,
    pub(super) navigator: KeyboardNavigator,
    pub(super) popover: PopoverCoordinator,
    pub(super) pointer_throttle: Throttle<PointerSample>,
    pub(super) focused: bool,
}

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine with an empty series snapshot.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        let config = validate_config(config)?;
        let model = PlotModel::build(SeriesSet::default(), config.plot_layout())?;

        Ok(Self {
            renderer,
            config,
            model,
            store: InteractionStore::new(),
            navigator: KeyboardNavigator::new(),
            popover: PopoverCoordinator::new(
                config.popover_behavior(),
                config.interaction_tuning.popover_dead_zone_px,
            ),
            pointer_throttle: Throttle::new(config.interaction_tuning.pointer_throttle()),
            focused: false,
        })
    }

    /// Materializes the interaction overlay for the current state.
    #[must_use]
    pub fn build_overlay_frame(&self) -> OverlayFrame {
        build_overlay_frame(
            &self.model,
            &self.store.get(),
            self.popover.view(),
            self.config.plot_rect(),
        )
    }

    /// Builds the overlay for the current state and hands it to the renderer.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_overlay_frame();
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Refreshes derived interaction views after a store mutation.
    pub(super) fn sync_derived_state(&mut self) {
        let snapshot = self.store.get();
        self.navigator.sync(&snapshot);
        self.popover
            .sync(&self.model, &snapshot, self.config.plot_rect());
    }
}
