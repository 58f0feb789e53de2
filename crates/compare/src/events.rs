use std::cell::RefCell;

use layers::Side;
use runtime::{Observers, SubscriptionId, deliver};

/// Payload of `dividermove`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DividerMove {
    /// Divider offset in pixels from the container's left edge.
    pub x: f64,
}

/// Whether a layer became or stopped being the active layer of its side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LayerChange {
    Add,
    Remove,
}

/// Payload of `leftlayeradd`, `leftlayerremove`, `rightlayeradd` and
/// `rightlayerremove`.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerEvent<L> {
    pub side: Side,
    pub layer: L,
}

/// Event name as exposed to script hosts, e.g. `leftlayeradd`.
pub const fn layer_event_name(side: Side, change: LayerChange) -> &'static str {
    match (side, change) {
        (Side::Left, LayerChange::Add) => "leftlayeradd",
        (Side::Left, LayerChange::Remove) => "leftlayerremove",
        (Side::Right, LayerChange::Add) => "rightlayeradd",
        (Side::Right, LayerChange::Remove) => "rightlayerremove",
    }
}

pub const DIVIDER_MOVE_EVENT: &str = "dividermove";

/// A notification produced while the control's state is borrowed and
/// delivered once it has been released.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Notification<L> {
    DividerMove(DividerMove),
    Layer(LayerChange, LayerEvent<L>),
}

/// One typed subscriber list per notification kind.
pub(crate) struct EventHub<L> {
    divider_move: RefCell<Observers<DividerMove>>,
    left_add: RefCell<Observers<LayerEvent<L>>>,
    left_remove: RefCell<Observers<LayerEvent<L>>>,
    right_add: RefCell<Observers<LayerEvent<L>>>,
    right_remove: RefCell<Observers<LayerEvent<L>>>,
}

impl<L> Default for EventHub<L> {
    fn default() -> Self {
        Self {
            divider_move: RefCell::default(),
            left_add: RefCell::default(),
            left_remove: RefCell::default(),
            right_add: RefCell::default(),
            right_remove: RefCell::default(),
        }
    }
}

impl<L> EventHub<L> {
    fn layer_list(&self, side: Side, change: LayerChange) -> &RefCell<Observers<LayerEvent<L>>> {
        match (side, change) {
            (Side::Left, LayerChange::Add) => &self.left_add,
            (Side::Left, LayerChange::Remove) => &self.left_remove,
            (Side::Right, LayerChange::Add) => &self.right_add,
            (Side::Right, LayerChange::Remove) => &self.right_remove,
        }
    }

    pub fn on_divider_move(&self, handler: impl Fn(&DividerMove) + 'static) -> SubscriptionId {
        self.divider_move.borrow_mut().subscribe(handler)
    }

    pub fn on_layer(
        &self,
        side: Side,
        change: LayerChange,
        handler: impl Fn(&LayerEvent<L>) + 'static,
    ) -> SubscriptionId {
        self.layer_list(side, change).borrow_mut().subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        if self.divider_move.borrow_mut().unsubscribe(id) {
            return true;
        }
        Side::BOTH.into_iter().any(|side| {
            [LayerChange::Add, LayerChange::Remove]
                .into_iter()
                .any(|change| self.layer_list(side, change).borrow_mut().unsubscribe(id))
        })
    }

    /// Delivers `notes` in order. Handlers run with no borrow held, so they
    /// may call back into the control.
    pub fn dispatch(&self, notes: Vec<Notification<L>>) {
        for note in notes {
            match note {
                Notification::DividerMove(event) => {
                    let handlers = self.divider_move.borrow().snapshot();
                    deliver(&handlers, &event);
                }
                Notification::Layer(change, event) => {
                    let handlers = self.layer_list(event.side, change).borrow().snapshot();
                    deliver(&handlers, &event);
                }
            }
        }
    }
}
