//! Bindings to a Leaflet map object and the `HostMap` implementation over it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use compare::{GestureHandler, HostMap, MapEventKind, SliderConfig};
use foundation::{ClipRect, Point};
use js_sys::{Array, Object, Reflect};
use runtime::SubscriptionId;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::surface::WebSurface;

#[wasm_bindgen]
extern "C" {
    /// `L.Map`.
    #[derive(Debug, Clone)]
    pub type LeafletMap;

    #[wasm_bindgen(method, js_name = createPane)]
    fn create_pane(this: &LeafletMap, name: &str) -> HtmlElement;

    #[wasm_bindgen(method, js_name = getPane)]
    fn get_pane(this: &LeafletMap, name: &str) -> Option<HtmlElement>;

    #[wasm_bindgen(method, js_name = getSize)]
    fn get_size(this: &LeafletMap) -> LeafletPoint;

    #[wasm_bindgen(method, js_name = containerPointToLayerPoint)]
    fn container_point_to_layer_point(this: &LeafletMap, point: &Array) -> LeafletPoint;

    #[wasm_bindgen(method)]
    fn on(this: &LeafletMap, types: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method)]
    fn off(this: &LeafletMap, types: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = hasLayer)]
    fn has_layer(this: &LeafletMap, layer: &JsValue) -> bool;

    #[wasm_bindgen(method, js_name = addLayer)]
    fn add_layer(this: &LeafletMap, layer: &JsValue);

    #[wasm_bindgen(method, js_name = removeLayer)]
    fn remove_layer(this: &LeafletMap, layer: &JsValue);

    #[wasm_bindgen(method, getter)]
    fn dragging(this: &LeafletMap) -> LeafletHandler;

    /// Only present on touch-capable builds of Leaflet.
    #[wasm_bindgen(method, getter)]
    fn tap(this: &LeafletMap) -> Option<LeafletHandler>;

    #[wasm_bindgen(method, getter, js_name = _controlContainer)]
    fn control_container(this: &LeafletMap) -> Option<HtmlElement>;

    /// `L.Point`.
    pub type LeafletPoint;

    #[wasm_bindgen(method, getter)]
    fn x(this: &LeafletPoint) -> f64;

    #[wasm_bindgen(method, getter)]
    fn y(this: &LeafletPoint) -> f64;

    /// `L.Handler`, e.g. `map.dragging`.
    #[derive(Debug, Clone)]
    pub type LeafletHandler;

    #[wasm_bindgen(method, js_name = enabled)]
    fn is_enabled(this: &LeafletHandler) -> bool;

    #[wasm_bindgen(method, js_name = enable)]
    fn turn_on(this: &LeafletHandler);

    #[wasm_bindgen(method, js_name = disable)]
    fn turn_off(this: &LeafletHandler);
}

impl From<LeafletPoint> for Point {
    fn from(p: LeafletPoint) -> Self {
        Point::new(p.x(), p.y())
    }
}

impl GestureHandler for LeafletHandler {
    fn enabled(&self) -> bool {
        self.is_enabled()
    }

    fn enable(&self) {
        self.turn_on();
    }

    fn disable(&self) {
        self.turn_off();
    }
}

/// Any Leaflet layer. Two handles are equal when they are the same object.
#[derive(Debug, Clone)]
pub struct JsLayer(JsValue);

impl JsLayer {
    pub fn new(value: JsValue) -> Self {
        Self(value)
    }

    pub fn as_js(&self) -> &JsValue {
        &self.0
    }

    fn options(&self) -> Option<Object> {
        Reflect::get(&self.0, &JsValue::from_str("options"))
            .ok()?
            .dyn_into::<Object>()
            .ok()
    }
}

impl PartialEq for JsLayer {
    fn eq(&self, other: &Self) -> bool {
        Object::is(&self.0, &other.0)
    }
}

/// A Leaflet map plus the closures registered on it.
#[derive(Clone)]
pub struct WebMap {
    map: LeafletMap,
    listeners: Rc<RefCell<HashMap<SubscriptionId, Closure<dyn Fn()>>>>,
}

impl WebMap {
    pub fn new(map: LeafletMap) -> Self {
        Self {
            map,
            listeners: Rc::default(),
        }
    }
}

impl HostMap for WebMap {
    type Layer = JsLayer;
    type Surface = WebSurface;
    type Gesture = LeafletHandler;

    fn create_pane(&self, name: &str, z_index: i32) {
        // createPane replaces an existing pane element, so reuse it instead.
        let pane = match self.map.get_pane(name) {
            Some(pane) => pane,
            None => self.map.create_pane(name),
        };
        let _ = pane.style().set_property("z-index", &z_index.to_string());
    }

    fn set_pane_clip(&self, name: &str, clip: Option<ClipRect>) -> bool {
        let Some(pane) = self.map.get_pane(name) else {
            return false;
        };
        let css = clip.map(|c| c.to_css()).unwrap_or_default();
        let _ = pane.style().set_property("clip", &css);
        true
    }

    fn size(&self) -> Point {
        self.map.get_size().into()
    }

    fn container_point_to_layer_point(&self, point: Point) -> Point {
        let arg = Array::of2(&point.x.into(), &point.y.into());
        self.map.container_point_to_layer_point(&arg).into()
    }

    fn on(&self, kind: MapEventKind, handler: Box<dyn Fn()>) -> SubscriptionId {
        let closure = Closure::wrap(handler);
        self.map.on(kind.name(), closure.as_ref().unchecked_ref());
        let id = SubscriptionId::next();
        self.listeners.borrow_mut().insert(id, closure);
        id
    }

    fn off(&self, kind: MapEventKind, id: SubscriptionId) {
        let Some(closure) = self.listeners.borrow_mut().remove(&id) else {
            return;
        };
        self.map.off(kind.name(), closure.as_ref().unchecked_ref());
    }

    fn has_layer(&self, layer: &JsLayer) -> bool {
        self.map.has_layer(layer.as_js())
    }

    fn layer_pane(&self, layer: &JsLayer) -> Option<String> {
        let options = layer.options()?;
        Reflect::get(&options, &JsValue::from_str("pane"))
            .ok()?
            .as_string()
    }

    fn set_layer_pane(&self, layer: &JsLayer, pane: &str) {
        let Some(options) = layer.options() else {
            web_sys::console::warn_1(&JsValue::from_str("side-by-side: layer has no options"));
            return;
        };
        let _ = Reflect::set(&options, &JsValue::from_str("pane"), &JsValue::from_str(pane));
    }

    fn add_layer(&self, layer: &JsLayer) {
        self.map.add_layer(layer.as_js());
    }

    fn remove_layer(&self, layer: &JsLayer) {
        self.map.remove_layer(layer.as_js());
    }

    fn dragging(&self) -> LeafletHandler {
        self.map.dragging()
    }

    fn tap(&self) -> Option<LeafletHandler> {
        self.map.tap()
    }

    fn create_surface(&self, slider: SliderConfig) -> Option<WebSurface> {
        let parent = self.map.control_container()?;
        match WebSurface::build(&parent, slider) {
            Ok(surface) => Some(surface),
            Err(err) => {
                web_sys::console::error_1(&err);
                None
            }
        }
    }
}
