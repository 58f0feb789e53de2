#![cfg(target_arch = "wasm32")]

use compare_web::SideBySideHandle;
use js_sys::Array;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::wasm_bindgen_test;

fn detached_control() -> SideBySideHandle {
    SideBySideHandle::new(JsValue::UNDEFINED, JsValue::UNDEFINED, JsValue::UNDEFINED)
        .expect("default options")
}

#[wasm_bindgen_test]
fn setters_return_a_handle_onto_the_same_control() {
    let control = detached_control();
    let id = control
        .on("dividermove", js_sys::Function::new_no_args(""))
        .expect("known event");

    let chained = control
        .set_left_layers(Array::new().into())
        .set_right_layers(JsValue::UNDEFINED)
        .set_position(10.0);

    assert_eq!(chained.get_position(), None);
    assert!(chained.off(id));
    assert!(!control.off(id));
}

#[wasm_bindgen_test]
fn remove_on_a_detached_control_chains() {
    let control = detached_control();
    let again = control.remove().remove();
    assert_eq!(again.get_position(), None);
}

#[wasm_bindgen_test]
fn unknown_event_is_rejected() {
    let control = detached_control();
    assert!(
        control
            .on("zoomend", js_sys::Function::new_no_args(""))
            .is_err()
    );
}

#[wasm_bindgen_test]
fn options_are_read_from_a_plain_object() {
    let options = js_sys::JSON::parse(r#"{"thumbSize": -3}"#).expect("valid json");
    assert!(SideBySideHandle::new(JsValue::UNDEFINED, JsValue::UNDEFINED, options).is_err());
}
