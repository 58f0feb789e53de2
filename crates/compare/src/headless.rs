//! In-memory host: a map, control surface and gestures with no browser
//! behind them.
//!
//! Events are dispatched synchronously, like a browser event loop running
//! one handler to completion. Handlers are invoked from a snapshot so they
//! may subscribe, unsubscribe or mutate the map while being called.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use foundation::{ClipRect, Point};
use layers::LayerId;
use runtime::{Observers, SubscriptionId, deliver};

use crate::host::{
    ControlSurface, GestureHandler, HostMap, MapEventKind, SliderConfig, SliderEventKind,
};

/// Pane a layer renders into unless told otherwise.
pub const DEFAULT_PANE: &str = "overlayPane";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneState {
    pub z_index: i32,
    pub clip: Option<ClipRect>,
}

#[derive(Debug, Clone)]
pub struct MemoryGesture {
    enabled: Rc<Cell<bool>>,
}

impl MemoryGesture {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Rc::new(Cell::new(enabled)),
        }
    }
}

impl GestureHandler for MemoryGesture {
    fn enabled(&self) -> bool {
        self.enabled.get()
    }

    fn enable(&self) {
        self.enabled.set(true);
    }

    fn disable(&self) {
        self.enabled.set(false);
    }
}

#[derive(Debug, Default)]
struct MapEvents {
    moved: Observers<()>,
    layer_add: Observers<()>,
    layer_remove: Observers<()>,
}

impl MapEvents {
    fn list(&mut self, kind: MapEventKind) -> &mut Observers<()> {
        match kind {
            MapEventKind::Move => &mut self.moved,
            MapEventKind::LayerAdd => &mut self.layer_add,
            MapEventKind::LayerRemove => &mut self.layer_remove,
        }
    }
}

#[derive(Debug)]
struct MapState {
    size: Point,
    /// Offset of the map pane inside the container; layer points are
    /// container points minus this.
    pane_offset: Cell<Point>,
    panes: RefCell<BTreeMap<String, PaneState>>,
    layers: RefCell<Vec<LayerId>>,
    layer_panes: RefCell<HashMap<LayerId, String>>,
    events: RefCell<MapEvents>,
    dragging: MemoryGesture,
    tap: Option<MemoryGesture>,
    surfaces: RefCell<Vec<MemorySurface>>,
}

/// In-memory map. Clones share the same map.
#[derive(Debug, Clone)]
pub struct MemoryMap {
    state: Rc<MapState>,
}

impl MemoryMap {
    /// Map of the given viewport size with drag and tap enabled.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_tap(width, height, Some(true))
    }

    /// `tap` is the initial tap state, or `None` for a host without tap.
    pub fn with_tap(width: f64, height: f64, tap: Option<bool>) -> Self {
        Self {
            state: Rc::new(MapState {
                size: Point::new(width, height),
                pane_offset: Cell::new(Point::ORIGIN),
                panes: RefCell::default(),
                layers: RefCell::default(),
                layer_panes: RefCell::default(),
                events: RefCell::default(),
                dragging: MemoryGesture::new(true),
                tap: tap.map(MemoryGesture::new),
                surfaces: RefCell::default(),
            }),
        }
    }

    /// Pans the viewport by `delta` container pixels and fires `move`.
    pub fn pan_by(&self, delta: Point) {
        let offset = self.state.pane_offset.get();
        self.state.pane_offset.set(offset - delta);
        self.fire(MapEventKind::Move);
    }

    pub fn pane(&self, name: &str) -> Option<PaneState> {
        self.state.panes.borrow().get(name).copied()
    }

    pub fn pane_clip(&self, name: &str) -> Option<ClipRect> {
        self.pane(name).and_then(|pane| pane.clip)
    }

    /// Drops a pane as if some other code removed it.
    pub fn remove_pane(&self, name: &str) {
        self.state.panes.borrow_mut().remove(name);
    }

    pub fn listener_count(&self, kind: MapEventKind) -> usize {
        self.state.events.borrow_mut().list(kind).len()
    }

    pub fn dragging_gesture(&self) -> &MemoryGesture {
        &self.state.dragging
    }

    pub fn tap_gesture(&self) -> Option<&MemoryGesture> {
        self.state.tap.as_ref()
    }

    /// Most recently created control surface.
    pub fn surface(&self) -> Option<MemorySurface> {
        self.state.surfaces.borrow().last().cloned()
    }

    fn fire(&self, kind: MapEventKind) {
        let handlers = self.state.events.borrow_mut().list(kind).snapshot();
        deliver(&handlers, &());
    }
}

impl HostMap for MemoryMap {
    type Layer = LayerId;
    type Surface = MemorySurface;
    type Gesture = MemoryGesture;

    fn create_pane(&self, name: &str, z_index: i32) {
        self.state
            .panes
            .borrow_mut()
            .entry(name.to_string())
            .and_modify(|pane| pane.z_index = z_index)
            .or_insert(PaneState { z_index, clip: None });
    }

    fn set_pane_clip(&self, name: &str, clip: Option<ClipRect>) -> bool {
        match self.state.panes.borrow_mut().get_mut(name) {
            Some(pane) => {
                pane.clip = clip;
                true
            }
            None => false,
        }
    }

    fn size(&self) -> Point {
        self.state.size
    }

    fn container_point_to_layer_point(&self, point: Point) -> Point {
        point - self.state.pane_offset.get()
    }

    fn on(&self, kind: MapEventKind, handler: Box<dyn Fn()>) -> SubscriptionId {
        self.state
            .events
            .borrow_mut()
            .list(kind)
            .subscribe(move |_| handler())
    }

    fn off(&self, kind: MapEventKind, id: SubscriptionId) {
        self.state.events.borrow_mut().list(kind).unsubscribe(id);
    }

    fn has_layer(&self, layer: &LayerId) -> bool {
        self.state.layers.borrow().contains(layer)
    }

    fn layer_pane(&self, layer: &LayerId) -> Option<String> {
        Some(
            self.state
                .layer_panes
                .borrow()
                .get(layer)
                .cloned()
                .unwrap_or_else(|| DEFAULT_PANE.to_string()),
        )
    }

    fn set_layer_pane(&self, layer: &LayerId, pane: &str) {
        self.state
            .layer_panes
            .borrow_mut()
            .insert(*layer, pane.to_string());
    }

    fn add_layer(&self, layer: &LayerId) {
        {
            let mut layers = self.state.layers.borrow_mut();
            if layers.contains(layer) {
                return;
            }
            layers.push(*layer);
        }
        self.fire(MapEventKind::LayerAdd);
    }

    fn remove_layer(&self, layer: &LayerId) {
        {
            let mut layers = self.state.layers.borrow_mut();
            let before = layers.len();
            layers.retain(|l| l != layer);
            if layers.len() == before {
                return;
            }
        }
        self.fire(MapEventKind::LayerRemove);
    }

    fn dragging(&self) -> MemoryGesture {
        self.state.dragging.clone()
    }

    fn tap(&self) -> Option<MemoryGesture> {
        self.state.tap.clone()
    }

    fn create_surface(&self, slider: SliderConfig) -> Option<MemorySurface> {
        let surface = MemorySurface::new(slider);
        self.state.surfaces.borrow_mut().push(surface.clone());
        Some(surface)
    }
}

#[derive(Debug, Default)]
struct SliderEvents {
    input: Observers<()>,
    press: Observers<()>,
    release: Observers<()>,
}

impl SliderEvents {
    fn list(&mut self, kind: SliderEventKind) -> &mut Observers<()> {
        match kind {
            SliderEventKind::Input => &mut self.input,
            SliderEventKind::Press => &mut self.press,
            SliderEventKind::Release => &mut self.release,
        }
    }
}

#[derive(Debug)]
struct SurfaceState {
    fraction: Cell<f64>,
    padding_px: f64,
    divider_offset: Cell<Option<f64>>,
    removed: Cell<bool>,
    events: RefCell<SliderEvents>,
}

/// In-memory divider and slider. Clones share the same surface.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    state: Rc<SurfaceState>,
}

impl MemorySurface {
    fn new(slider: SliderConfig) -> Self {
        Self {
            state: Rc::new(SurfaceState {
                fraction: Cell::new(slider.value),
                padding_px: slider.padding_px,
                divider_offset: Cell::new(None),
                removed: Cell::new(false),
                events: RefCell::default(),
            }),
        }
    }

    /// Moves the slider as a user would and fires `input`.
    pub fn slide_to(&self, fraction: f64) {
        let fraction = fraction.clamp(SliderConfig::MIN, SliderConfig::MAX);
        self.state.fraction.set(fraction);
        self.fire(SliderEventKind::Input);
    }

    pub fn press(&self) {
        self.fire(SliderEventKind::Press);
    }

    pub fn release(&self) {
        self.fire(SliderEventKind::Release);
    }

    pub fn padding_px(&self) -> f64 {
        self.state.padding_px
    }

    /// Last divider offset set by the control.
    pub fn divider_offset(&self) -> Option<f64> {
        self.state.divider_offset.get()
    }

    pub fn is_removed(&self) -> bool {
        self.state.removed.get()
    }

    pub fn listener_count(&self) -> usize {
        let mut events = self.state.events.borrow_mut();
        [
            SliderEventKind::Input,
            SliderEventKind::Press,
            SliderEventKind::Release,
        ]
        .into_iter()
        .map(|kind| events.list(kind).len())
        .sum()
    }

    fn fire(&self, kind: SliderEventKind) {
        let handlers = self.state.events.borrow_mut().list(kind).snapshot();
        deliver(&handlers, &());
    }
}

impl ControlSurface for MemorySurface {
    fn slider_fraction(&self) -> f64 {
        self.state.fraction.get()
    }

    fn set_divider_offset(&self, x_px: f64) {
        self.state.divider_offset.set(Some(x_px));
    }

    fn on(&self, kind: SliderEventKind, handler: Box<dyn Fn()>) -> SubscriptionId {
        self.state
            .events
            .borrow_mut()
            .list(kind)
            .subscribe(move |_| handler())
    }

    fn off(&self, kind: SliderEventKind, id: SubscriptionId) {
        self.state.events.borrow_mut().list(kind).unsubscribe(id);
    }

    fn remove(&self) {
        self.state.removed.set(true);
    }
}
