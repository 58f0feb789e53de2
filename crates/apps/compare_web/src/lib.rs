//! Browser build of the side-by-side control for Leaflet maps.
//!
//! ```js
//! import init, { SideBySide } from "./compare_web.js";
//! await init();
//! const control = new SideBySide(osmLayer, satelliteLayer, { thumbSize: 42 });
//! control.addTo(map);
//! control.on("dividermove", (e) => console.log(e.x));
//! ```

use compare::{
    Candidates, DIVIDER_MOVE_EVENT, LayerChange, LayerEvent, Side, SideBySide, SideBySideOptions,
    layer_event_name,
};
use console_error_panic_hook::set_once;
use js_sys::{Array, Function, Object, Reflect};
use runtime::SubscriptionId;
use wasm_bindgen::prelude::*;

mod leaflet;
mod surface;

pub use leaflet::{JsLayer, LeafletMap, WebMap};
pub use surface::WebSurface;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// `undefined`/`null` → none, array → in order, anything else → one layer.
fn to_candidates(value: JsValue) -> Candidates<JsLayer> {
    if value.is_undefined() || value.is_null() {
        Candidates::none()
    } else if Array::is_array(&value) {
        Array::from(&value).iter().map(JsLayer::new).collect()
    } else {
        Candidates::one(JsLayer::new(value))
    }
}

fn parse_options(value: &JsValue) -> Result<SideBySideOptions, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(SideBySideOptions::default());
    }
    let text: String = js_sys::JSON::stringify(value)?.into();
    SideBySideOptions::from_json(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn call(callback: &Function, payload: &Object) {
    if let Err(err) = callback.call1(&JsValue::NULL, payload) {
        web_sys::console::error_1(&err);
    }
}

fn payload(key: &str, value: &JsValue) -> Object {
    let obj = Object::new();
    let _ = Reflect::set(&obj, &JsValue::from_str(key), value);
    obj
}

/// Script handle; methods that chain return another handle onto the same
/// control.
#[wasm_bindgen(js_name = SideBySide)]
#[derive(Clone)]
pub struct SideBySideHandle {
    control: SideBySide<WebMap>,
}

#[wasm_bindgen(js_class = SideBySide)]
impl SideBySideHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(
        left: JsValue,
        right: JsValue,
        options: JsValue,
    ) -> Result<SideBySideHandle, JsValue> {
        let options = parse_options(&options)?;
        Ok(Self {
            control: SideBySide::new(to_candidates(left), to_candidates(right), options),
        })
    }

    #[wasm_bindgen(js_name = addTo)]
    pub fn add_to(&self, map: LeafletMap) -> SideBySideHandle {
        self.control.attach(WebMap::new(map));
        self.clone()
    }

    pub fn remove(&self) -> SideBySideHandle {
        self.control.detach();
        self.clone()
    }

    #[wasm_bindgen(js_name = setLeftLayers)]
    pub fn set_left_layers(&self, layers: JsValue) -> SideBySideHandle {
        self.control.set_left_layers(to_candidates(layers));
        self.clone()
    }

    #[wasm_bindgen(js_name = setRightLayers)]
    pub fn set_right_layers(&self, layers: JsValue) -> SideBySideHandle {
        self.control.set_right_layers(to_candidates(layers));
        self.clone()
    }

    /// `undefined` while the control is not on a map.
    #[wasm_bindgen(js_name = getPosition)]
    pub fn get_position(&self) -> Option<f64> {
        self.control.get_position()
    }

    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&self, x: f64) -> SideBySideHandle {
        self.control.set_position(x);
        self.clone()
    }

    /// Subscribes `callback` to `event`; returns an id for [`off`].
    ///
    /// [`off`]: SideBySideHandle::off
    pub fn on(&self, event: &str, callback: Function) -> Result<f64, JsValue> {
        if event == DIVIDER_MOVE_EVENT {
            let id = self.control.on_divider_move(move |e| {
                call(&callback, &payload("x", &JsValue::from_f64(e.x)));
            });
            return Ok(id.get() as f64);
        }

        for side in Side::BOTH {
            for change in [LayerChange::Add, LayerChange::Remove] {
                if layer_event_name(side, change) != event {
                    continue;
                }
                let callback = callback.clone();
                let handler = move |e: &LayerEvent<JsLayer>| {
                    call(&callback, &payload("layer", e.layer.as_js()));
                };
                let id = match change {
                    LayerChange::Add => self.control.on_layer_add(side, handler),
                    LayerChange::Remove => self.control.on_layer_remove(side, handler),
                };
                return Ok(id.get() as f64);
            }
        }

        Err(JsValue::from_str(&format!("unknown side-by-side event: {event}")))
    }

    pub fn off(&self, id: f64) -> bool {
        self.control.unsubscribe(SubscriptionId::from_raw(id as u64))
    }
}

/// Factory matching `L.control.sideBySide`.
#[wasm_bindgen(js_name = sideBySide)]
pub fn side_by_side(
    left: JsValue,
    right: JsValue,
    options: JsValue,
) -> Result<SideBySideHandle, JsValue> {
    SideBySideHandle::new(left, right, options)
}
