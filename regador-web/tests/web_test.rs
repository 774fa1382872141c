#![cfg(all(feature = "wasm", target_arch = "wasm32"))]

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_globals_are_bound_on_window() {
    regador_web::wasm::expose_globals().unwrap();

    let window = web_sys::window().unwrap();
    for name in regador_web::wasm::GLOBALS {
        let value = Reflect::get(&window, &JsValue::from_str(name)).unwrap();
        assert!(value.is_function(), "{name} is not callable from window");
    }
}

#[wasm_bindgen_test]
fn test_format_duration_from_window() {
    regador_web::wasm::expose_globals().unwrap();

    let window = web_sys::window().unwrap();
    let format: Function = Reflect::get(&window, &JsValue::from_str("formatarDuracao"))
        .unwrap()
        .unchecked_into();

    let formatted = format.call1(&JsValue::NULL, &JsValue::from(90)).unwrap();
    assert_eq!(formatted.as_string().as_deref(), Some("1 min 30s"));
}

#[wasm_bindgen_test]
fn test_validation_without_page_blocks_submit() {
    regador_web::wasm::expose_globals().unwrap();

    let window = web_sys::window().unwrap();
    let validate: Function = Reflect::get(&window, &JsValue::from_str("validarLogin"))
        .unwrap()
        .unchecked_into();

    assert_eq!(validate.call0(&JsValue::NULL).unwrap().as_bool(), Some(false));
}
