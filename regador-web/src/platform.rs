use std::rc::Rc;

use crate::api::ApiClient;
use crate::dom::{Browser, Document};
use crate::http::HttpClient;
use crate::timer::Timer;

/// Shared handles to the host environment.
#[derive(Clone)]
pub struct Platform {
    pub document: Rc<dyn Document>,
    pub browser: Rc<dyn Browser>,
    pub http: Rc<dyn HttpClient>,
    pub timer: Rc<dyn Timer>,
}

impl Platform {
    pub fn new(
        document: Rc<dyn Document>,
        browser: Rc<dyn Browser>,
        http: Rc<dyn HttpClient>,
        timer: Rc<dyn Timer>,
    ) -> Self {
        Self {
            document,
            browser,
            http,
            timer,
        }
    }

    pub fn api(&self) -> ApiClient {
        ApiClient::new(self.http.clone())
    }
}
