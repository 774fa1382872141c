//! Narrow view of the browser that the components depend on.
//!
//! The wasm build backs these traits with `web-sys`; tests use the doubles in
//! [`crate::mock`].

use std::rc::Rc;

pub type ElementRef = Rc<dyn Element>;

pub trait Element {
    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    fn has_class(&self, class: &str) -> bool;

    /// Replace the whole `class` attribute.
    fn set_class_name(&self, value: &str);

    fn set_text(&self, text: &str);

    fn attribute(&self, name: &str) -> Option<String>;

    /// Current value of a form control, empty for anything else.
    fn value(&self) -> String;

    /// Values of the selected options of a `<select multiple>`, in document order.
    fn selected_values(&self) -> Vec<String>;

    /// Nearest inclusive ancestor matching a CSS selector.
    fn closest(&self, selector: &str) -> Option<ElementRef>;

    fn on_click(&self, handler: Box<dyn FnMut()>) -> Listener;
}

pub trait Document {
    fn element_by_id(&self, id: &str) -> Option<ElementRef>;

    fn query_selector_all(&self, selector: &str) -> Vec<ElementRef>;
}

pub trait Browser {
    /// Blocking message box.
    fn alert(&self, message: &str);

    /// Blocking yes/no question.
    fn confirm(&self, message: &str) -> bool;

    fn reload(&self);

    fn viewport_width(&self) -> f64;

    fn current_path(&self) -> String;
}

pub fn set_class(element: &dyn Element, class: &str, enabled: bool) {
    if enabled {
        element.add_class(class);
    } else {
        element.remove_class(class);
    }
}

/// Registered event handler. Dropping it removes the handler from its element.
#[must_use = "dropping a listener detaches it"]
pub struct Listener {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Listener {
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    pub fn detach(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}
