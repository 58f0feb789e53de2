//! Side-by-side comparison control for interactive maps.
//!
//! Two candidate layer lists are shown in two clipped panes separated by a
//! divider that follows a range slider. The control is host-agnostic: it
//! talks to the map through [`HostMap`] and to its divider and slider through
//! [`ControlSurface`]. [`headless`] provides an in-memory host.

pub mod control;
pub mod drag;
pub mod error;
pub mod events;
pub mod headless;
pub mod host;
pub mod options;
pub mod position;

pub use control::*;
pub use drag::*;
pub use error::*;
pub use events::{DIVIDER_MOVE_EVENT, DividerMove, LayerChange, LayerEvent, layer_event_name};
pub use host::*;
pub use options::*;
pub use position::*;

pub use layers::{Candidates, Side};

/// Shorthand for [`SideBySide::new`].
pub fn side_by_side<M: HostMap>(
    left: impl Into<Candidates<M::Layer>>,
    right: impl Into<Candidates<M::Layer>>,
    options: SideBySideOptions,
) -> SideBySide<M> {
    SideBySide::new(left, right, options)
}
