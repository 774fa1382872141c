//! In-memory stand-ins for the browser and the backend.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use serde_json::Value;

use crate::dom::{Browser, Document, Element, ElementRef, Listener};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpRequest, HttpResponse, Method};

type Handlers = Rc<RefCell<Vec<(usize, Box<dyn FnMut()>)>>>;

pub struct MockElement {
    this: Weak<MockElement>,
    classes: RefCell<Vec<String>>,
    text: RefCell<Option<String>>,
    attributes: RefCell<HashMap<String, String>>,
    value: RefCell<String>,
    selected: RefCell<Vec<String>>,
    parent: RefCell<Option<Rc<MockElement>>>,
    handlers: Handlers,
    next_handler: Cell<usize>,
}

impl MockElement {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            classes: RefCell::new(Vec::new()),
            text: RefCell::new(None),
            attributes: RefCell::new(HashMap::new()),
            value: RefCell::new(String::new()),
            selected: RefCell::new(Vec::new()),
            parent: RefCell::new(None),
            handlers: Rc::new(RefCell::new(Vec::new())),
            next_handler: Cell::new(0),
        })
    }

    pub fn with_value<S: Into<String>>(value: S) -> Rc<Self> {
        let element = Self::new();
        element.set_value(value);
        element
    }

    pub fn with_attribute(name: &str, value: &str) -> Rc<Self> {
        let element = Self::new();
        element
            .attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        element
    }

    pub fn set_value<S: Into<String>>(&self, value: S) {
        *self.value.borrow_mut() = value.into();
    }

    pub fn select(&self, values: &[&str]) {
        *self.selected.borrow_mut() = values.iter().map(|v| v.to_string()).collect();
    }

    pub fn set_parent(&self, parent: &Rc<MockElement>) {
        *self.parent.borrow_mut() = Some(parent.clone());
    }

    pub fn text(&self) -> Option<String> {
        self.text.borrow().clone()
    }

    pub fn class_name(&self) -> String {
        self.classes.borrow().join(" ")
    }

    pub fn listener_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Run every click handler, in registration order.
    pub fn click(&self) {
        let mut handlers = self.handlers.borrow_mut();
        for (_, handler) in handlers.iter_mut() {
            handler();
        }
    }
}

impl Element for MockElement {
    fn add_class(&self, class: &str) {
        let mut classes = self.classes.borrow_mut();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().retain(|c| c != class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().iter().any(|c| c == class)
    }

    fn set_class_name(&self, value: &str) {
        *self.classes.borrow_mut() = value.split_whitespace().map(String::from).collect();
    }

    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = Some(text.to_string());
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn selected_values(&self) -> Vec<String> {
        self.selected.borrow().clone()
    }

    /// Only class selectors (`.name`) are understood.
    fn closest(&self, selector: &str) -> Option<ElementRef> {
        let class = selector.strip_prefix('.')?;
        let mut current = self.this.upgrade();

        while let Some(element) = current {
            if element.has_class(class) {
                return Some(element as ElementRef);
            }
            current = element.parent.borrow().clone();
        }

        None
    }

    fn on_click(&self, handler: Box<dyn FnMut()>) -> Listener {
        let id = self.next_handler.get();
        self.next_handler.set(id + 1);
        self.handlers.borrow_mut().push((id, handler));

        let handlers = Rc::downgrade(&self.handlers);
        Listener::new(move || {
            if let Some(handlers) = handlers.upgrade() {
                handlers.borrow_mut().retain(|(i, _)| *i != id);
            }
        })
    }
}

#[derive(Default)]
pub struct MockDocument {
    elements: RefCell<HashMap<String, Rc<MockElement>>>,
    selections: RefCell<HashMap<String, Vec<Rc<MockElement>>>>,
}

impl MockDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: &str, element: Rc<MockElement>) -> Rc<MockElement> {
        self.elements
            .borrow_mut()
            .insert(id.to_string(), element.clone());
        element
    }

    /// Make `element` part of what `query_selector_all(selector)` returns.
    pub fn register(&self, selector: &str, element: Rc<MockElement>) -> Rc<MockElement> {
        self.selections
            .borrow_mut()
            .entry(selector.to_string())
            .or_default()
            .push(element.clone());
        element
    }
}

impl Document for MockDocument {
    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.elements
            .borrow()
            .get(id)
            .map(|element| element.clone() as ElementRef)
    }

    fn query_selector_all(&self, selector: &str) -> Vec<ElementRef> {
        self.selections
            .borrow()
            .get(selector)
            .map(|elements| {
                elements
                    .iter()
                    .map(|element| element.clone() as ElementRef)
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub struct MockBrowser {
    alerts: RefCell<Vec<String>>,
    confirms: RefCell<Vec<String>>,
    confirm_answer: Cell<bool>,
    reloads: Cell<usize>,
    width: Cell<f64>,
    path: RefCell<String>,
}

impl MockBrowser {
    pub fn new() -> Self {
        Self {
            alerts: RefCell::new(Vec::new()),
            confirms: RefCell::new(Vec::new()),
            confirm_answer: Cell::new(true),
            reloads: Cell::new(0),
            width: Cell::new(1280.0),
            path: RefCell::new(String::from("/")),
        }
    }

    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    pub fn set_width(&self, width: f64) {
        self.width.set(width);
    }

    pub fn set_path(&self, path: &str) {
        *self.path.borrow_mut() = path.to_string();
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.borrow().clone()
    }

    pub fn reloads(&self) -> usize {
        self.reloads.get()
    }
}

impl Default for MockBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl Browser for MockBrowser {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.confirm_answer.get()
    }

    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }

    fn viewport_width(&self) -> f64 {
        self.width.get()
    }

    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }
}

#[derive(Debug, Clone)]
pub enum MockReply {
    /// `200` with a JSON body.
    Json(Value),
    /// Arbitrary status and raw body.
    Status(u16, String),
    /// The request never completes.
    Fail(String),
}

/// Canned backend. Routes without a reply fail as unreachable.
#[derive(Default)]
pub struct MockHttp {
    replies: RefCell<HashMap<(Method, String), MockReply>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, method: Method, path: &str, reply: MockReply) {
        self.replies
            .borrow_mut()
            .insert((method, path.to_string()), reply);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttp {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let reply = self
            .replies
            .borrow()
            .get(&(request.method, request.path.clone()))
            .cloned();
        self.requests.borrow_mut().push(request);

        match reply {
            Some(MockReply::Json(body)) => Ok(HttpResponse {
                status: 200,
                body: body.to_string(),
            }),
            Some(MockReply::Status(status, body)) => Ok(HttpResponse { status, body }),
            Some(MockReply::Fail(reason)) => Err(Error::connection(reason)),
            None => Err(Error::connection("no route")),
        }
    }
}
