mod focus;
mod highlight;
mod hover;
mod marker;
mod navigation;
mod popover;
mod store;
mod throttle;

pub use focus::{FocusTrigger, InputModality};
pub use highlight::{Highlight, InteractionPhase, InteractionSnapshot};
pub use hover::{HoverTarget, resolve_hover};
pub use marker::{VerticalMarker, resolve_vertical_marker};
pub use navigation::{ChartKey, KeyboardNavigator, NavigationCommand};
pub use popover::{
    DetailRow, DismissReason, FocusTarget, PopoverAnchor, PopoverBehavior, PopoverCoordinator,
    PopoverDetails, PopoverPlacement, PopoverSide, PopoverView, compute_placement, format_details,
    resolve_anchor,
};
pub use store::InteractionStore;
pub use throttle::Throttle;
