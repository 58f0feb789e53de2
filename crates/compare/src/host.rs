//! Capabilities the control consumes from the map engine it is attached to.
//!
//! Every method takes `&self`: hosts are cheap handles onto shared state (a
//! JS map object, an `Rc` around an in-memory map) and the control only ever
//! holds a clone.

use std::fmt;

use foundation::{ClipRect, Point};
use runtime::SubscriptionId;

/// Map notifications the control listens to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MapEventKind {
    /// Viewport panned or zoomed.
    Move,
    LayerAdd,
    LayerRemove,
}

impl MapEventKind {
    pub const fn name(self) -> &'static str {
        match self {
            MapEventKind::Move => "move",
            MapEventKind::LayerAdd => "layeradd",
            MapEventKind::LayerRemove => "layerremove",
        }
    }
}

/// Slider interactions the control listens to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SliderEventKind {
    /// Slider value changed.
    Input,
    /// Pointer or touch pressed on the slider.
    Press,
    /// Pointer or touch released.
    Release,
}

/// Initial state of the range input created on attach.
///
/// The range is fixed to `[0, 1]` with continuous precision.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SliderConfig {
    pub value: f64,
    /// Applied as left and right padding of the input, in pixels.
    pub padding_px: f64,
}

impl SliderConfig {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 1.0;
}

/// A map interaction that can be switched off temporarily.
pub trait GestureHandler {
    fn enabled(&self) -> bool;
    fn enable(&self);
    fn disable(&self);
}

/// Divider element and range input living in the map's control layer.
pub trait ControlSurface {
    /// Current slider value in `[0, 1]`.
    fn slider_fraction(&self) -> f64;

    /// Moves the divider to `x_px` from the container's left edge.
    fn set_divider_offset(&self, x_px: f64);

    fn on(&self, kind: SliderEventKind, handler: Box<dyn Fn()>) -> SubscriptionId;

    fn off(&self, kind: SliderEventKind, id: SubscriptionId);

    /// Detaches the surface's nodes from the map.
    fn remove(&self);
}

pub trait HostMap: Clone + 'static {
    /// Layer handle. Equality must be identity of the underlying layer.
    type Layer: Clone + PartialEq + fmt::Debug + 'static;
    type Surface: ControlSurface + 'static;
    type Gesture: GestureHandler + 'static;

    /// Creates `name` if missing and sets its stacking order.
    fn create_pane(&self, name: &str, z_index: i32);

    /// Sets or clears (`None`) the clip of pane `name`.
    ///
    /// Returns `false` when the pane does not exist; nothing is applied then.
    fn set_pane_clip(&self, name: &str, clip: Option<ClipRect>) -> bool;

    /// Viewport size in pixels.
    fn size(&self) -> Point;

    fn container_point_to_layer_point(&self, point: Point) -> Point;

    fn on(&self, kind: MapEventKind, handler: Box<dyn Fn()>) -> SubscriptionId;

    fn off(&self, kind: MapEventKind, id: SubscriptionId);

    fn has_layer(&self, layer: &Self::Layer) -> bool;

    fn layer_pane(&self, layer: &Self::Layer) -> Option<String>;

    /// Changes the pane a layer renders into the next time it is added.
    fn set_layer_pane(&self, layer: &Self::Layer, pane: &str);

    fn add_layer(&self, layer: &Self::Layer);

    fn remove_layer(&self, layer: &Self::Layer);

    fn dragging(&self) -> Self::Gesture;

    /// Tap gesture, when the host has one.
    fn tap(&self) -> Option<Self::Gesture>;

    /// Builds the divider and slider inside the map's control container.
    ///
    /// `None` when the host cannot build them; the control then stays
    /// detached.
    fn create_surface(&self, slider: SliderConfig) -> Option<Self::Surface>;
}
