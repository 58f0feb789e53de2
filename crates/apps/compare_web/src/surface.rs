//! Divider and range input as real DOM nodes.

use std::cell::RefCell;
use std::collections::HashMap;

use compare::{ControlSurface, INITIAL_FRACTION, SliderConfig, SliderEventKind};
use js_sys::Reflect;
use runtime::SubscriptionId;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

pub const CONTAINER_CLASS: &str = "leaflet-sbs";
pub const DIVIDER_CLASS: &str = "leaflet-sbs-divider";
pub const RANGE_CLASS: &str = "leaflet-sbs-range";

type Listener = (&'static [&'static str], Closure<dyn Fn()>);

pub struct WebSurface {
    container: HtmlElement,
    divider: HtmlElement,
    range: HtmlInputElement,
    /// `input` where supported, `change` on older engines.
    input_event: &'static str,
    listeners: RefCell<HashMap<SubscriptionId, Listener>>,
}

fn create_child(
    document: &Document,
    parent: &Element,
    tag: &str,
    class: &str,
) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    el.set_class_name(class);
    parent.append_child(&el)?;
    Ok(el)
}

impl WebSurface {
    /// Appends `div.leaflet-sbs` with the divider and range input to `parent`.
    pub fn build(parent: &Element, slider: SliderConfig) -> Result<Self, JsValue> {
        let document = parent
            .owner_document()
            .ok_or_else(|| JsValue::from_str("control container is not in a document"))?;

        let container: HtmlElement =
            create_child(&document, parent, "div", CONTAINER_CLASS)?.dyn_into()?;
        let divider: HtmlElement =
            create_child(&document, &container, "div", DIVIDER_CLASS)?.dyn_into()?;
        let range: HtmlInputElement =
            create_child(&document, &container, "input", RANGE_CLASS)?.dyn_into()?;

        range.set_type("range");
        range.set_min(&SliderConfig::MIN.to_string());
        range.set_max(&SliderConfig::MAX.to_string());
        range.set_step("any");
        range.set_value(&slider.value.to_string());
        let padding = format!("{}px", slider.padding_px);
        range.style().set_property("padding-left", &padding)?;
        range.style().set_property("padding-right", &padding)?;

        let has_oninput = Reflect::has(&range, &JsValue::from_str("oninput")).unwrap_or(false);
        let input_event = if has_oninput { "input" } else { "change" };

        Ok(Self {
            container,
            divider,
            range,
            input_event,
            listeners: RefCell::default(),
        })
    }

    fn event_names(&self, kind: SliderEventKind) -> &'static [&'static str] {
        match kind {
            SliderEventKind::Input if self.input_event == "input" => &["input"],
            SliderEventKind::Input => &["change"],
            SliderEventKind::Press => &["mousedown", "touchstart"],
            SliderEventKind::Release => &["mouseup", "touchend"],
        }
    }
}

impl ControlSurface for WebSurface {
    fn slider_fraction(&self) -> f64 {
        self.range.value().parse().unwrap_or(INITIAL_FRACTION)
    }

    fn set_divider_offset(&self, x_px: f64) {
        let _ = self.divider.style().set_property("left", &format!("{x_px}px"));
    }

    fn on(&self, kind: SliderEventKind, handler: Box<dyn Fn()>) -> SubscriptionId {
        let closure = Closure::wrap(handler);
        let names = self.event_names(kind);
        for name in names {
            if let Err(err) = self
                .range
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            {
                web_sys::console::error_1(&err);
            }
        }
        let id = SubscriptionId::next();
        self.listeners.borrow_mut().insert(id, (names, closure));
        id
    }

    fn off(&self, _kind: SliderEventKind, id: SubscriptionId) {
        let Some((names, closure)) = self.listeners.borrow_mut().remove(&id) else {
            return;
        };
        for name in names {
            let _ = self
                .range
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
    }

    fn remove(&self) {
        self.container.remove();
    }
}
