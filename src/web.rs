//! DOM binding for the live preview element
//!
//! Touch, wheel and mouse-down listeners sit on the element itself. Mouse
//! move and up are observed on the window so a drag that leaves the element
//! keeps tracking until the button is released.

use crate::{
    core::{bounds::Bounds, config::ZoomConfig, geo::Point, transform::Transform},
    input::{
        events::{Cursor, InputEvent, TouchPoint},
        handler::{TransformController, TransformSink},
    },
};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, HtmlElement, MouseEvent, TouchEvent, TouchList,
    WheelEvent,
};

/// Writes the transform and cursor into the element's inline style
pub struct ElementSink {
    element: HtmlElement,
}

impl ElementSink {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Err(e) = self.element.style().set_property(property, value) {
            log::warn!("failed to set {} on preview: {:?}", property, e);
        }
    }
}

impl TransformSink for ElementSink {
    fn render(&mut self, transform: &Transform) {
        self.set_style("transform", &transform.to_css());
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.set_style("cursor", cursor.as_css());
    }
}

type SharedController = Rc<RefCell<TransformController<ElementSink>>>;

struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn remove(&self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove {} listener: {:?}", self.kind, e);
        }
    }
}

/// Pinch, wheel and drag zoom attached to one preview element
#[wasm_bindgen]
pub struct PreviewZoom {
    controller: SharedController,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl PreviewZoom {
    /// Attaches with the default limits (1x to 4x, 0.1 per wheel tick)
    #[wasm_bindgen(constructor)]
    pub fn attach(element: HtmlElement) -> Result<PreviewZoom, JsValue> {
        Self::attach_with_config(element, ZoomConfig::default())
    }

    /// Attaches with limits read from a JSON `ZoomConfig`
    #[wasm_bindgen(js_name = attachWithConfig)]
    pub fn attach_with_config_json(element: HtmlElement, json: &str) -> Result<PreviewZoom, JsValue> {
        let config = ZoomConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::attach_with_config(element, config)
    }

    pub fn scale(&self) -> f64 {
        self.controller.borrow().transform().scale
    }

    #[wasm_bindgen(js_name = panX)]
    pub fn pan_x(&self) -> f64 {
        self.controller.borrow().transform().pan.x
    }

    #[wasm_bindgen(js_name = panY)]
    pub fn pan_y(&self) -> f64 {
        self.controller.borrow().transform().pan.y
    }

    /// Returns the preview to 1x with no offset
    pub fn reset(&self) {
        self.controller.borrow_mut().reset();
    }

    /// Removes every listener; the element keeps its last transform
    pub fn detach(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.remove();
        }
    }
}

impl PreviewZoom {
    pub fn attach_with_config(element: HtmlElement, config: ZoomConfig) -> Result<PreviewZoom, JsValue> {
        #[cfg(target_arch = "wasm32")]
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let controller = TransformController::with_config(config, ElementSink::new(element.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let controller: SharedController = Rc::new(RefCell::new(controller));

        let element_target: EventTarget = element.clone().into();
        let window_target: EventTarget = window.into();
        let mut listeners = Vec::new();

        for kind in ["touchstart", "touchmove", "touchend", "touchcancel"] {
            let controller = controller.clone();
            listeners.push(listen(&element_target, kind, move |event: Event| {
                let Some(touch) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let touches = touch_points(&touch.touches());
                let input = match kind {
                    "touchstart" => InputEvent::TouchStart { touches },
                    "touchmove" => InputEvent::TouchMove { touches },
                    _ => InputEvent::TouchEnd { touches },
                };
                dispatch(&controller, &event, &input);
            })?);
        }

        {
            let controller = controller.clone();
            let element = element.clone();
            listeners.push(listen(&element_target, "wheel", move |event: Event| {
                let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                let rect = element.get_bounding_client_rect();
                let input = InputEvent::Wheel {
                    delta_y: wheel.delta_y(),
                    position: client_position(wheel),
                    bounds: Bounds::from_rect(rect.left(), rect.top(), rect.width(), rect.height()),
                };
                dispatch(&controller, &event, &input);
            })?);
        }

        let mouse_listeners: [(&EventTarget, &'static str); 3] = [
            (&element_target, "mousedown"),
            (&window_target, "mousemove"),
            (&window_target, "mouseup"),
        ];
        for (target, kind) in mouse_listeners {
            let controller = controller.clone();
            listeners.push(listen(target, kind, move |event: Event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let position = client_position(mouse);
                let input = match kind {
                    "mousedown" => InputEvent::MouseDown { position },
                    "mousemove" => InputEvent::MouseMove { position },
                    _ => InputEvent::MouseUp { position },
                };
                dispatch(&controller, &event, &input);
            })?);
        }

        log::info!("preview zoom attached");
        Ok(PreviewZoom {
            controller,
            listeners,
        })
    }

    /// Runs `f` against the underlying controller
    pub fn with_controller<R>(
        &self,
        f: impl FnOnce(&mut TransformController<ElementSink>) -> R,
    ) -> R {
        f(&mut self.controller.borrow_mut())
    }
}

impl Drop for PreviewZoom {
    fn drop(&mut self) {
        self.detach();
    }
}

fn dispatch(controller: &SharedController, event: &Event, input: &InputEvent) {
    let handled = controller.borrow_mut().handle_event(input);
    if handled.is_handled() && event.cancelable() {
        event.prevent_default();
    }
}

/// Registers a non-passive listener so the handler may call `preventDefault`
fn listen(
    target: &EventTarget,
    kind: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<Listener, JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    Ok(Listener {
        target: target.clone(),
        kind,
        closure,
    })
}

fn client_position(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

fn touch_points(list: &TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .map(|touch| {
            TouchPoint::new(
                u64::from(touch.identifier() as u32),
                Point::new(f64::from(touch.client_x()), f64::from(touch.client_y())),
            )
        })
        .collect()
}
