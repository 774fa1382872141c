use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlInputElement, HtmlOptionElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::dom::{Browser, Document, Element, ElementRef, Listener};
use crate::error::Error;

const CLICK: &str = "click";

pub(crate) fn js_error(value: JsValue) -> Error {
    let message = match value.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => value.as_string().unwrap_or_else(|| format!("{value:?}")),
    };

    Error::Browser(message)
}

fn log_failure(action: &str, value: JsValue) {
    tracing::error!("Failed to {}: {}", action, js_error(value));
}

pub struct WebElement {
    element: web_sys::Element,
}

impl WebElement {
    pub fn new(element: web_sys::Element) -> Self {
        Self { element }
    }

    fn wrap(element: web_sys::Element) -> ElementRef {
        Rc::new(Self::new(element))
    }
}

impl Element for WebElement {
    fn add_class(&self, class: &str) {
        if let Err(e) = self.element.class_list().add_1(class) {
            log_failure("add class", e);
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(e) = self.element.class_list().remove_1(class) {
            log_failure("remove class", e);
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.element.class_list().contains(class)
    }

    fn set_class_name(&self, value: &str) {
        self.element.set_class_name(value);
    }

    fn set_text(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn value(&self) -> String {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = self.element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(text_area) = self.element.dyn_ref::<HtmlTextAreaElement>() {
            text_area.value()
        } else {
            String::new()
        }
    }

    fn selected_values(&self) -> Vec<String> {
        let Some(select) = self.element.dyn_ref::<HtmlSelectElement>() else {
            return Vec::new();
        };

        let options = select.selected_options();
        (0..options.length())
            .filter_map(|i| options.item(i))
            .filter_map(|option| option.dyn_into::<HtmlOptionElement>().ok())
            .map(|option| option.value())
            .collect()
    }

    fn closest(&self, selector: &str) -> Option<ElementRef> {
        match self.element.closest(selector) {
            Ok(found) => found.map(Self::wrap),
            Err(e) => {
                log_failure("match selector", e);
                None
            }
        }
    }

    fn on_click(&self, handler: Box<dyn FnMut()>) -> Listener {
        let closure = Closure::wrap(handler);
        if let Err(e) = self
            .element
            .add_event_listener_with_callback(CLICK, closure.as_ref().unchecked_ref())
        {
            log_failure("add click listener", e);
        }

        let target = self.element.clone();
        Listener::new(move || {
            if let Err(e) =
                target.remove_event_listener_with_callback(CLICK, closure.as_ref().unchecked_ref())
            {
                log_failure("remove click listener", e);
            }
        })
    }
}

pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

impl Document for WebDocument {
    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.document.get_element_by_id(id).map(WebElement::wrap)
    }

    fn query_selector_all(&self, selector: &str) -> Vec<ElementRef> {
        let nodes = match self.document.query_selector_all(selector) {
            Ok(nodes) => nodes,
            Err(e) => {
                log_failure("query selector", e);
                return Vec::new();
            }
        };

        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(WebElement::wrap)
            .collect()
    }
}

pub struct WebBrowser {
    window: web_sys::Window,
}

impl WebBrowser {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl Browser for WebBrowser {
    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log_failure("show alert", e);
        }
    }

    fn confirm(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or_else(|e| {
            log_failure("show confirmation", e);
            false
        })
    }

    fn reload(&self) {
        if let Err(e) = self.window.location().reload() {
            log_failure("reload page", e);
        }
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or_default()
    }

    fn current_path(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }
}
