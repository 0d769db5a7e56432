#![cfg(all(target_arch = "wasm32", feature = "wasm"))]

use camview::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlElement, WheelEvent, WheelEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn preview_element() -> HtmlElement {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .expect("document");
    let element: HtmlElement = document
        .create_element("div")
        .expect("div")
        .dyn_into()
        .expect("html element");
    element.style().set_property("width", "200px").expect("width");
    element.style().set_property("height", "100px").expect("height");
    document
        .body()
        .expect("body")
        .append_child(&element)
        .expect("append");
    element
}

fn wheel_up(element: &HtmlElement) -> bool {
    let init = WheelEventInit::new();
    init.set_delta_y(-100.0);
    init.set_cancelable(true);
    let event = WheelEvent::new_with_event_init_dict("wheel", &init).expect("wheel event");
    element.dispatch_event(&event).expect("dispatch")
}

#[wasm_bindgen_test]
fn wheel_zooms_the_element_and_cancels_scrolling() {
    let element = preview_element();
    let zoom = PreviewZoom::attach(element.clone()).expect("attach");

    // dispatch_event returns false once a listener calls preventDefault
    assert!(!wheel_up(&element));
    assert!((zoom.scale() - 1.1).abs() < 1e-9);
    let transform = element
        .style()
        .get_property_value("transform")
        .expect("transform");
    assert!(transform.starts_with("scale(1.1"), "got {}", transform);
}

#[wasm_bindgen_test]
fn detached_preview_ignores_input() {
    let element = preview_element();
    let mut zoom = PreviewZoom::attach(element.clone()).expect("attach");
    wheel_up(&element);

    zoom.detach();
    assert!(wheel_up(&element));
    assert!((zoom.scale() - 1.1).abs() < 1e-9);

    // Nothing left to remove
    zoom.detach();
    assert!((zoom.scale() - 1.1).abs() < 1e-9);
}
