//! The side-by-side control: candidate lists, active-layer selection and the
//! divider/clip synchronization.
//!
//! State lives behind `Rc<RefCell<_>>` because the host calls back into the
//! control from its own event dispatch. Two rules keep that sound:
//! - notifications are collected while the state is borrowed and delivered
//!   after the borrow is released, so subscribers may call back in;
//! - host events that arrive while the state is already borrowed (the
//!   control re-adding a layer to move it to its pane) are absorbed, since
//!   the running recomputation already observes the final map state.
//!
//! `attach` or `detach` called while the state is borrowed is queued and
//! runs as soon as the current recomputation finishes.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use foundation::{ClipRect, Point};
use layers::{Candidates, Side};
use runtime::SubscriptionId;
use tracing::{debug, trace, warn};

use crate::drag::DragSession;
use crate::events::{DividerMove, EventHub, LayerChange, LayerEvent, Notification};
use crate::host::{ControlSurface, HostMap, MapEventKind, SliderConfig, SliderEventKind};
use crate::options::SideBySideOptions;
use crate::position::divider_position;

/// Slider value set on every attach.
pub const INITIAL_FRACTION: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
struct ActiveLayers<L> {
    left: Option<L>,
    right: Option<L>,
}

impl<L> Default for ActiveLayers<L> {
    fn default() -> Self {
        Self {
            left: None,
            right: None,
        }
    }
}

impl<L> ActiveLayers<L> {
    fn get(&self, side: Side) -> Option<&L> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut Option<L> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Everything that exists only while bound to a map.
struct Attachment<M: HostMap> {
    map: M,
    surface: M::Surface,
    /// Queried once per attach.
    tap: Option<M::Gesture>,
    map_listeners: Vec<(MapEventKind, SubscriptionId)>,
    slider_listeners: Vec<(SliderEventKind, SubscriptionId)>,
    drag: Option<DragSession>,
}

struct State<M: HostMap> {
    options: SideBySideOptions,
    left: Candidates<M::Layer>,
    right: Candidates<M::Layer>,
    /// Kept across detach; the next attach diffs against it.
    active: ActiveLayers<M::Layer>,
    attachment: Option<Attachment<M>>,
}

impl<M: HostMap> State<M> {
    fn candidates_mut(&mut self, side: Side) -> &mut Candidates<M::Layer> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    fn update_layers(&mut self) -> Vec<Notification<M::Layer>> {
        let Some(att) = &self.attachment else {
            return Vec::new();
        };

        let mut notes = Vec::new();
        for side in Side::BOTH {
            let candidates = match side {
                Side::Left => &self.left,
                Side::Right => &self.right,
            };
            let next = candidates
                .first_present(|layer| att.map.has_layer(layer))
                .cloned();
            if let Some(layer) = &next {
                claim_pane(&att.map, layer, side);
            }

            let slot = self.active.slot_mut(side);
            if *slot == next {
                continue;
            }
            debug!(side = side.as_str(), active = ?next, "active layer changed");
            if let Some(layer) = slot.take() {
                notes.push(Notification::Layer(
                    LayerChange::Remove,
                    LayerEvent { side, layer },
                ));
            }
            if let Some(layer) = next.clone() {
                notes.push(Notification::Layer(LayerChange::Add, LayerEvent { side, layer }));
            }
            *slot = next;
        }

        notes.extend(self.update_clip());
        notes
    }

    fn position(&self) -> Option<f64> {
        let att = self.attachment.as_ref()?;
        Some(divider_position(
            att.map.size().x,
            att.surface.slider_fraction(),
            &self.options,
        ))
    }

    fn update_clip(&self) -> Option<Notification<M::Layer>> {
        let att = self.attachment.as_ref()?;
        let size = att.map.size();
        let nw = att.map.container_point_to_layer_point(Point::ORIGIN);
        let se = att.map.container_point_to_layer_point(size);
        let divider_x = divider_position(size.x, att.surface.slider_fraction(), &self.options);

        att.surface.set_divider_offset(divider_x);

        let (left, right) = ClipRect::split_at(nw, se, nw.x + divider_x);
        for (side, clip) in [(Side::Left, left), (Side::Right, right)] {
            // Sides without an active layer keep whatever clip their pane has.
            if self.active.get(side).is_none() {
                continue;
            }
            if !att.map.set_pane_clip(side.pane_name(), Some(clip)) {
                trace!(pane = side.pane_name(), "pane missing, clip skipped");
            }
        }

        Some(Notification::DividerMove(DividerMove { x: divider_x }))
    }
}

/// Moves `layer` onto `side`'s pane. The host only honours a pane change
/// when the layer is added, hence the remove/add.
fn claim_pane<M: HostMap>(map: &M, layer: &M::Layer, side: Side) {
    let pane = side.pane_name();
    if map.layer_pane(layer).as_deref() == Some(pane) {
        return;
    }
    map.set_layer_pane(layer, pane);
    map.remove_layer(layer);
    map.add_layer(layer);
}

/// Binding request made while the state was borrowed; runs once the
/// current recomputation finishes. The latest request wins.
enum Deferred<M> {
    Detach,
    Attach(M),
}

/// Lifecycle bookkeeping readable while the state is borrowed.
struct Lifecycle<M> {
    attached: Cell<bool>,
    deferred: RefCell<Option<Deferred<M>>>,
}

impl<M> Default for Lifecycle<M> {
    fn default() -> Self {
        Self {
            attached: Cell::new(false),
            deferred: RefCell::new(None),
        }
    }
}

/// Side-by-side comparison control.
///
/// Cloning yields another handle to the same control.
pub struct SideBySide<M: HostMap> {
    options: SideBySideOptions,
    state: Rc<RefCell<State<M>>>,
    events: Rc<EventHub<M::Layer>>,
    lifecycle: Rc<Lifecycle<M>>,
}

impl<M: HostMap> Clone for SideBySide<M> {
    fn clone(&self) -> Self {
        Self {
            options: self.options,
            state: Rc::clone(&self.state),
            events: Rc::clone(&self.events),
            lifecycle: Rc::clone(&self.lifecycle),
        }
    }
}

struct WeakControl<M: HostMap> {
    options: SideBySideOptions,
    state: Weak<RefCell<State<M>>>,
    events: Weak<EventHub<M::Layer>>,
    lifecycle: Weak<Lifecycle<M>>,
}

impl<M: HostMap> Clone for WeakControl<M> {
    fn clone(&self) -> Self {
        Self {
            options: self.options,
            state: Weak::clone(&self.state),
            events: Weak::clone(&self.events),
            lifecycle: Weak::clone(&self.lifecycle),
        }
    }
}

impl<M: HostMap> WeakControl<M> {
    fn upgrade(&self) -> Option<SideBySide<M>> {
        Some(SideBySide {
            options: self.options,
            state: self.state.upgrade()?,
            events: self.events.upgrade()?,
            lifecycle: self.lifecycle.upgrade()?,
        })
    }

    /// Host callback running `action` on the control if it is still alive.
    fn callback(&self, action: fn(&SideBySide<M>)) -> Box<dyn Fn()> {
        let weak = self.clone();
        Box::new(move || {
            if let Some(control) = weak.upgrade() {
                action(&control);
            }
        })
    }
}

impl<M: HostMap> SideBySide<M> {
    pub fn new(
        left: impl Into<Candidates<M::Layer>>,
        right: impl Into<Candidates<M::Layer>>,
        options: SideBySideOptions,
    ) -> Self {
        let state = State {
            options,
            left: left.into(),
            right: right.into(),
            active: ActiveLayers::default(),
            attachment: None,
        };
        Self {
            options,
            state: Rc::new(RefCell::new(state)),
            events: Rc::new(EventHub::default()),
            lifecycle: Rc::default(),
        }
    }

    pub fn options(&self) -> SideBySideOptions {
        self.options
    }

    /// Whether the control is bound to a map. A binding change requested
    /// during a recomputation is reflected once it has run.
    pub fn is_attached(&self) -> bool {
        self.lifecycle.attached.get()
    }

    /// Binds the control to `map`, detaching from any previous map first.
    pub fn attach(&self, map: M) -> &Self {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            debug!("attach deferred: control is recomputing");
            self.defer(Deferred::Attach(map));
            return self;
        };
        if state.attachment.is_some() {
            drop(state);
            self.detach();
            return self.attach(map);
        }

        for side in Side::BOTH {
            map.create_pane(side.pane_name(), side.z_index());
        }
        let slider = SliderConfig {
            value: INITIAL_FRACTION,
            padding_px: self.options.padding,
        };
        let Some(surface) = map.create_surface(slider) else {
            warn!("host could not build the divider and slider; control stays detached");
            return self;
        };

        let weak = self.downgrade();
        let map_listeners: Vec<_> = [
            (MapEventKind::Move, weak.callback(Self::update_clip)),
            (MapEventKind::LayerAdd, weak.callback(Self::update_layers)),
            (MapEventKind::LayerRemove, weak.callback(Self::update_layers)),
        ]
        .into_iter()
        .map(|(kind, handler)| (kind, map.on(kind, handler)))
        .collect();
        let slider_listeners: Vec<_> = [
            (SliderEventKind::Input, weak.callback(Self::update_clip)),
            (SliderEventKind::Press, weak.callback(Self::begin_drag)),
            (SliderEventKind::Release, weak.callback(Self::end_drag)),
        ]
        .into_iter()
        .map(|(kind, handler)| (kind, surface.on(kind, handler)))
        .collect();

        let tap = map.tap();
        state.attachment = Some(Attachment {
            map,
            surface,
            tap,
            map_listeners,
            slider_listeners,
            drag: None,
        });
        self.lifecycle.attached.set(true);
        drop(state);

        debug!("side-by-side control attached");
        self.update_layers();
        self
    }

    /// Unbinds from the current map. Does nothing when detached.
    pub fn detach(&self) -> &Self {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            debug!("detach deferred: control is recomputing");
            self.defer(Deferred::Detach);
            return self;
        };
        let Some(att) = state.attachment.take() else {
            return self;
        };
        self.lifecycle.attached.set(false);

        if let Some(session) = att.drag {
            session.end(&att.map.dragging(), att.tap.as_ref());
        }
        for side in Side::BOTH {
            if state.active.get(side).is_some() {
                att.map.set_pane_clip(side.pane_name(), None);
            }
        }
        for (kind, id) in att.map_listeners {
            att.map.off(kind, id);
        }
        for (kind, id) in att.slider_listeners {
            att.surface.off(kind, id);
        }
        att.surface.remove();
        drop(state);

        debug!("side-by-side control detached");
        self.settle();
        self
    }

    pub fn set_left_layers(&self, layers: impl Into<Candidates<M::Layer>>) -> &Self {
        self.set_layers(Side::Left, layers)
    }

    pub fn set_right_layers(&self, layers: impl Into<Candidates<M::Layer>>) -> &Self {
        self.set_layers(Side::Right, layers)
    }

    pub fn set_layers(&self, side: Side, layers: impl Into<Candidates<M::Layer>>) -> &Self {
        match self.state.try_borrow_mut() {
            Ok(mut state) => *state.candidates_mut(side) = layers.into(),
            Err(_) => {
                debug!(side = side.as_str(), "candidate update ignored: control is recomputing");
                return self;
            }
        }
        self.update_layers();
        self
    }

    /// Divider offset in pixels, or `None` while detached.
    pub fn get_position(&self) -> Option<f64> {
        self.state.try_borrow().ok()?.position()
    }

    /// The divider follows the slider only; this does nothing.
    pub fn set_position(&self, _x: f64) -> &Self {
        self
    }

    pub fn active_layer(&self, side: Side) -> Option<M::Layer> {
        self.state.try_borrow().ok()?.active.get(side).cloned()
    }

    pub fn on_divider_move(&self, handler: impl Fn(&DividerMove) + 'static) -> SubscriptionId {
        self.events.on_divider_move(handler)
    }

    pub fn on_layer_add(
        &self,
        side: Side,
        handler: impl Fn(&LayerEvent<M::Layer>) + 'static,
    ) -> SubscriptionId {
        self.events.on_layer(side, LayerChange::Add, handler)
    }

    pub fn on_layer_remove(
        &self,
        side: Side,
        handler: impl Fn(&LayerEvent<M::Layer>) + 'static,
    ) -> SubscriptionId {
        self.events.on_layer(side, LayerChange::Remove, handler)
    }

    /// Returns `true` if `id` was subscribed to this control.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    fn downgrade(&self) -> WeakControl<M> {
        WeakControl {
            options: self.options,
            state: Rc::downgrade(&self.state),
            events: Rc::downgrade(&self.events),
            lifecycle: Rc::downgrade(&self.lifecycle),
        }
    }

    fn update_layers(&self) {
        let notes = match self.state.try_borrow_mut() {
            Ok(mut state) => state.update_layers(),
            Err(_) => {
                trace!("layer event absorbed during recomputation");
                return;
            }
        };
        self.settle();
        self.events.dispatch(notes);
    }

    fn update_clip(&self) {
        let note = match self.state.try_borrow() {
            Ok(state) => state.update_clip(),
            Err(_) => {
                trace!("move event absorbed during recomputation");
                return;
            }
        };
        self.settle();
        self.events.dispatch(note.into_iter().collect());
    }

    fn begin_drag(&self) {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            return;
        };
        let Some(att) = state.attachment.as_mut() else {
            return;
        };
        // touchstart is usually followed by an emulated mousedown.
        if att.drag.is_some() {
            return;
        }
        att.drag = Some(DragSession::begin(&att.map.dragging(), att.tap.as_ref()));
    }

    fn end_drag(&self) {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            return;
        };
        let Some(att) = state.attachment.as_mut() else {
            return;
        };
        if let Some(session) = att.drag.take() {
            session.end(&att.map.dragging(), att.tap.as_ref());
        }
    }

    fn defer(&self, request: Deferred<M>) {
        *self.lifecycle.deferred.borrow_mut() = Some(request);
    }

    /// Runs the binding change requested while the state was borrowed.
    fn settle(&self) {
        let request = self.lifecycle.deferred.borrow_mut().take();
        match request {
            Some(Deferred::Detach) => {
                self.detach();
            }
            Some(Deferred::Attach(map)) => {
                self.attach(map);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SideBySide;
    use crate::headless::MemoryMap;
    use crate::host::{GestureHandler, HostMap, MapEventKind};
    use crate::options::SideBySideOptions;
    use foundation::{ClipRect, Point};
    use layers::{Candidates, LayerId, Side};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    const X: LayerId = LayerId(1);
    const Y: LayerId = LayerId(2);

    #[derive(Debug, Clone, PartialEq)]
    enum Seen {
        Divider(f64),
        Add(Side, LayerId),
        Remove(Side, LayerId),
    }

    fn record(control: &SideBySide<MemoryMap>) -> Rc<RefCell<Vec<Seen>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        control.on_divider_move(move |e| s.borrow_mut().push(Seen::Divider(e.x)));
        for side in Side::BOTH {
            let s = Rc::clone(&seen);
            control.on_layer_add(side, move |e| s.borrow_mut().push(Seen::Add(e.side, e.layer)));
            let s = Rc::clone(&seen);
            control.on_layer_remove(side, move |e| {
                s.borrow_mut().push(Seen::Remove(e.side, e.layer))
            });
        }
        seen
    }

    fn new_control(
        left: impl Into<Candidates<LayerId>>,
        right: impl Into<Candidates<LayerId>>,
    ) -> SideBySide<MemoryMap> {
        SideBySide::new(left, right, SideBySideOptions::default())
    }

    fn map_with(layers: &[LayerId]) -> MemoryMap {
        let map = MemoryMap::new(800.0, 600.0);
        for layer in layers {
            map.add_layer(layer);
        }
        map
    }

    #[test]
    fn attach_activates_both_sides() {
        let map = map_with(&[X, Y]);
        let control = new_control([X], [Y]);
        let seen = record(&control);

        control.attach(map.clone());

        assert_eq!(control.active_layer(Side::Left), Some(X));
        assert_eq!(control.active_layer(Side::Right), Some(Y));
        assert_eq!(control.get_position(), Some(400.0));
        assert_eq!(
            *seen.borrow(),
            vec![
                Seen::Add(Side::Left, X),
                Seen::Add(Side::Right, Y),
                Seen::Divider(400.0),
            ]
        );
        assert_eq!(map.layer_pane(&X).as_deref(), Some("leftPane"));
        assert_eq!(map.layer_pane(&Y).as_deref(), Some("rightPane"));
        assert!(map.has_layer(&X) && map.has_layer(&Y));
    }

    #[test]
    fn attach_builds_panes_and_surface() {
        let map = map_with(&[]);
        let options = SideBySideOptions::new(42.0, 6.0).unwrap();
        let control =
            SideBySide::<MemoryMap>::new(Candidates::none(), Candidates::none(), options);
        control.attach(map.clone());

        assert_eq!(map.pane("leftPane").unwrap().z_index, 400);
        assert_eq!(map.pane("rightPane").unwrap().z_index, 401);
        let surface = map.surface().unwrap();
        assert_eq!(surface.padding_px(), 6.0);
        assert_eq!(surface.divider_offset(), Some(400.0));
        assert!(control.is_attached());
    }

    #[test]
    fn first_present_candidate_wins() {
        let (a, b, c) = (LayerId(10), LayerId(11), LayerId(12));
        let map = map_with(&[c, b]);
        let control = new_control([a, b, c], Candidates::none());
        control.attach(map.clone());

        assert_eq!(control.active_layer(Side::Left), Some(b));
        assert_eq!(map.layer_pane(&b).as_deref(), Some("leftPane"));
        assert_eq!(map.layer_pane(&c).as_deref(), Some("overlayPane"));
    }

    #[test]
    fn position_tracks_slider_extremes() {
        let map = map_with(&[]);
        let options = SideBySideOptions::new(42.0, 4.0).unwrap();
        let control =
            SideBySide::<MemoryMap>::new(Candidates::none(), Candidates::none(), options);
        control.attach(map.clone());
        let surface = map.surface().unwrap();

        surface.slide_to(0.0);
        assert_eq!(control.get_position(), Some(25.0));
        surface.slide_to(1.0);
        assert_eq!(control.get_position(), Some(775.0));
        assert_eq!(surface.divider_offset(), Some(775.0));
    }

    #[test]
    fn position_is_none_when_detached() {
        let control = new_control([X], [Y]);
        assert_eq!(control.get_position(), None);
        control.set_position(100.0);
        assert_eq!(control.get_position(), None);
    }

    #[test]
    fn slider_input_reclips_active_panes() {
        let map = map_with(&[X, Y]);
        let control = new_control([X], [Y]);
        control.attach(map.clone());
        let seen = record(&control);

        map.surface().unwrap().slide_to(0.25);

        // 800 * 0.25 + 0.25 * 42
        let x = 210.5;
        assert_eq!(*seen.borrow(), vec![Seen::Divider(x)]);
        assert_eq!(
            map.pane_clip("leftPane"),
            Some(ClipRect::new(0.0, x, 600.0, 0.0))
        );
        assert_eq!(
            map.pane_clip("rightPane"),
            Some(ClipRect::new(0.0, 800.0, 600.0, x))
        );
    }

    #[test]
    fn clips_are_in_layer_space_after_pan() {
        let map = map_with(&[X, Y]);
        let control = new_control([X], [Y]);
        control.attach(map.clone());

        map.pan_by(Point::new(-100.0, 50.0));

        assert_eq!(control.get_position(), Some(400.0));
        assert_eq!(
            map.pane_clip("leftPane"),
            Some(ClipRect::new(50.0, 300.0, 650.0, -100.0))
        );
        assert_eq!(
            map.pane_clip("rightPane"),
            Some(ClipRect::new(50.0, 700.0, 650.0, 300.0))
        );
    }

    #[test]
    fn inactive_side_is_never_clipped() {
        let map = map_with(&[X]);
        let control = new_control([X], [Y]);
        control.attach(map.clone());

        assert!(map.pane_clip("leftPane").is_some());
        assert_eq!(map.pane_clip("rightPane"), None);
    }

    #[test]
    fn host_layer_events_update_activity() {
        let map = map_with(&[X]);
        let control = new_control([X], [Y]);
        control.attach(map.clone());
        let seen = record(&control);

        map.add_layer(&Y);
        assert_eq!(control.active_layer(Side::Right), Some(Y));
        map.remove_layer(&X);
        assert_eq!(control.active_layer(Side::Left), None);

        let seen = seen.borrow();
        assert!(seen.contains(&Seen::Add(Side::Right, Y)));
        assert!(seen.contains(&Seen::Remove(Side::Left, X)));
        assert_eq!(
            seen.iter().filter(|s| matches!(s, Seen::Add(..))).count(),
            1
        );
    }

    #[test]
    fn clearing_right_candidates_emits_one_remove_and_keeps_clip() {
        let map = map_with(&[X, Y]);
        let control = new_control([X], [Y]);
        control.attach(map.clone());
        let clip_before = map.pane_clip("rightPane");
        assert!(clip_before.is_some());
        let seen = record(&control);

        control.set_right_layers(Vec::<LayerId>::new());

        let seen = seen.borrow();
        let removes: Vec<_> = seen
            .iter()
            .filter(|s| matches!(s, Seen::Remove(Side::Right, _)))
            .collect();
        assert_eq!(removes, vec![&Seen::Remove(Side::Right, Y)]);
        assert!(!seen.iter().any(|s| matches!(s, Seen::Add(Side::Right, _))));
        assert_eq!(control.active_layer(Side::Right), None);
        assert_eq!(map.pane_clip("rightPane"), clip_before);
    }

    #[test]
    fn setters_chain_and_are_harmless_when_detached() {
        let control = new_control(Candidates::none(), Candidates::none());
        let seen = record(&control);
        control.set_left_layers([X]).set_right_layers(Candidates::one(Y));
        assert!(seen.borrow().is_empty());
        assert_eq!(control.active_layer(Side::Left), None);
    }

    #[test]
    fn detach_round_trip_unclips_and_unsubscribes() {
        let map = map_with(&[X, Y]);
        let control = new_control([X], [Y]);
        control.attach(map.clone());
        let surface = map.surface().unwrap();
        assert!(map.pane_clip("leftPane").is_some());

        control.detach();

        assert!(!control.is_attached());
        assert_eq!(map.pane_clip("leftPane"), None);
        assert_eq!(map.pane_clip("rightPane"), None);
        assert!(surface.is_removed());
        assert_eq!(surface.listener_count(), 0);
        for kind in [MapEventKind::Move, MapEventKind::LayerAdd, MapEventKind::LayerRemove] {
            assert_eq!(map.listener_count(kind), 0);
        }

        let seen = record(&control);
        map.pan_by(Point::new(10.0, 10.0));
        map.remove_layer(&X);
        map.add_layer(&X);
        assert!(seen.borrow().is_empty());
        assert_eq!(map.pane_clip("leftPane"), None);
    }

    #[test]
    fn detach_twice_is_a_no_op() {
        let map = map_with(&[X]);
        let control = new_control([X], Candidates::none());
        control.attach(map.clone());
        control.detach().detach();
        assert!(!control.is_attached());
        assert_eq!(map.listener_count(MapEventKind::Move), 0);
    }

    #[test]
    fn reattach_moves_to_new_map() {
        let first = map_with(&[X]);
        let second = map_with(&[X]);
        let control = new_control([X], Candidates::none());
        control.attach(first.clone());
        control.attach(second.clone());

        assert!(first.surface().unwrap().is_removed());
        assert_eq!(first.listener_count(MapEventKind::LayerAdd), 0);
        assert_eq!(first.pane_clip("leftPane"), None);
        assert_eq!(second.listener_count(MapEventKind::LayerAdd), 1);
        assert!(second.pane_clip("leftPane").is_some());
    }

    #[test]
    fn missing_pane_is_skipped() {
        let map = map_with(&[X]);
        let control = new_control([X], Candidates::none());
        control.attach(map.clone());
        map.remove_pane("leftPane");

        map.surface().unwrap().slide_to(0.1);
        control.detach();

        assert_eq!(map.pane("leftPane"), None);
    }

    #[test]
    fn drag_disables_and_restores_gestures() {
        let map = map_with(&[]);
        let control = new_control(Candidates::none(), Candidates::none());
        control.attach(map.clone());
        let surface = map.surface().unwrap();
        let tap = map.tap_gesture().unwrap().clone();
        tap.disable();

        surface.press();
        surface.press();
        assert!(!map.dragging_gesture().enabled());
        surface.release();
        assert!(map.dragging_gesture().enabled());
        assert!(!tap.enabled());
        surface.release();
        assert!(map.dragging_gesture().enabled());
    }

    #[test]
    fn drag_state_is_per_control() {
        let map = MemoryMap::with_tap(800.0, 600.0, None);
        let a = new_control(Candidates::none(), Candidates::none());
        let b = new_control(Candidates::none(), Candidates::none());
        a.attach(map.clone());
        let surface_a = map.surface().unwrap();
        b.attach(map.clone());
        let surface_b = map.surface().unwrap();

        surface_a.press();
        surface_b.press();
        surface_b.release();
        assert!(!map.dragging_gesture().enabled());
        surface_a.release();
        assert!(map.dragging_gesture().enabled());
    }

    #[test]
    fn detach_mid_drag_restores_gestures() {
        let map = map_with(&[]);
        let control = new_control(Candidates::none(), Candidates::none());
        control.attach(map.clone());
        map.surface().unwrap().press();
        control.detach();
        assert!(map.dragging_gesture().enabled());
        assert!(map.tap_gesture().unwrap().enabled());
    }

    #[test]
    fn subscriber_may_detach_from_a_notification() {
        let map = map_with(&[X]);
        let control = new_control([X], Candidates::none());
        control.attach(map.clone());
        let handle = control.clone();
        control.on_divider_move(move |_| {
            handle.detach();
        });

        map.surface().unwrap().slide_to(0.3);

        assert!(!control.is_attached());
        assert_eq!(map.listener_count(MapEventKind::Move), 0);
    }

    #[test]
    fn attach_from_host_listener_moves_to_the_new_map() {
        let first = map_with(&[X]);
        let second = map_with(&[X]);
        let control = new_control([X], Candidates::none());
        let handle = control.clone();
        let target = second.clone();
        first.on(
            MapEventKind::LayerAdd,
            Box::new(move || {
                handle.attach(target.clone());
            }),
        );

        control.attach(first.clone());

        assert!(control.is_attached());
        assert_eq!(first.listener_count(MapEventKind::Move), 0);
        assert_eq!(first.listener_count(MapEventKind::LayerAdd), 1);
        assert!(first.surface().unwrap().is_removed());
        assert_eq!(first.pane_clip("leftPane"), None);
        assert_eq!(second.listener_count(MapEventKind::Move), 1);
        assert!(second.pane_clip("leftPane").is_some());
        assert_eq!(second.layer_pane(&X).as_deref(), Some("leftPane"));
    }

    #[test]
    fn detach_from_host_listener_runs_after_recomputation() {
        let map = map_with(&[X]);
        let control = new_control([X], Candidates::none());
        let handle = control.clone();
        let attached_during = Rc::new(RefCell::new(Vec::new()));
        let a = Rc::clone(&attached_during);
        map.on(
            MapEventKind::LayerAdd,
            Box::new(move || {
                a.borrow_mut().push(handle.is_attached());
                handle.detach();
            }),
        );

        control.attach(map.clone());

        assert_eq!(*attached_during.borrow(), vec![true]);
        assert!(!control.is_attached());
        assert_eq!(map.listener_count(MapEventKind::Move), 0);
        assert_eq!(map.listener_count(MapEventKind::LayerRemove), 0);
        assert_eq!(map.listener_count(MapEventKind::LayerAdd), 1);
        assert_eq!(map.pane_clip("leftPane"), None);
        let surface = map.surface().unwrap();
        assert!(surface.is_removed());
        assert_eq!(surface.listener_count(), 0);
    }

    #[test]
    fn divider_move_is_delivered_after_clips_apply() {
        let map = map_with(&[X, Y]);
        let control = new_control([X], [Y]);
        control.attach(map.clone());
        let observed = Rc::new(RefCell::new(None));
        let o = Rc::clone(&observed);
        let m = map.clone();
        control.on_divider_move(move |e| {
            *o.borrow_mut() = Some((e.x, m.pane_clip("leftPane")));
        });

        map.surface().unwrap().slide_to(0.75);

        // 800 * 0.75 - 0.25 * 42
        let x = 589.5;
        assert_eq!(
            *observed.borrow(),
            Some((x, Some(ClipRect::new(0.0, x, 600.0, 0.0))))
        );
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let map = map_with(&[]);
        let control = new_control(Candidates::none(), Candidates::none());
        control.attach(map.clone());
        let hits = Rc::new(RefCell::new(0));
        let h = Rc::clone(&hits);
        let id = control.on_divider_move(move |_| *h.borrow_mut() += 1);

        map.surface().unwrap().slide_to(0.2);
        assert!(control.unsubscribe(id));
        map.surface().unwrap().slide_to(0.4);

        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn dropping_the_control_silences_callbacks() {
        let map = map_with(&[X]);
        {
            let control = new_control([X], Candidates::none());
            control.attach(map.clone());
        }
        map.pan_by(Point::new(5.0, 0.0));
        map.surface().unwrap().slide_to(0.9);
        assert_eq!(map.surface().unwrap().divider_offset(), Some(400.0));
    }
}
