//! Periodic refresh of the irrigation status line.

use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{AbortHandle, Abortable, LocalBoxFuture};
use futures::stream::{FuturesUnordered, StreamExt};
use regador_api::StatusSnapshot;
use time::format_description::OwnedFormatItem;

use crate::api::ApiClient;
use crate::dom::{Document, ElementRef};
use crate::error::Result;
use crate::format::{format_timestamp, timestamp_format};
use crate::messages;
use crate::timer::Timer;

pub const STATUS_ID: &str = "status-atual";
pub const TIMESTAMP_ID: &str = "ultimo-timestamp";
pub const CONTAINER_SELECTOR: &str = ".status";

pub const IRRIGATING_CLASS: &str = "regando";
pub const WAITING_CLASS: &str = "aguardando";

pub struct StatusView {
    status: ElementRef,
    timestamp: Option<ElementRef>,
    format: OwnedFormatItem,
}

impl StatusView {
    pub fn new(status: ElementRef, timestamp: Option<ElementRef>, format: OwnedFormatItem) -> Self {
        Self {
            status,
            timestamp,
            format,
        }
    }

    /// `Ok(None)` when the page shows no status.
    pub fn locate(document: &dyn Document, format: &str) -> Result<Option<Self>> {
        let Some(status) = document.element_by_id(STATUS_ID) else {
            return Ok(None);
        };

        Ok(Some(Self::new(
            status,
            document.element_by_id(TIMESTAMP_ID),
            timestamp_format(format)?,
        )))
    }

    /// Write a snapshot to the page. The status line always follows `regar`; a timestamp
    /// that cannot be read leaves the last update line as it was.
    pub fn render(&self, snapshot: &StatusSnapshot) {
        let (text, class) = if snapshot.regar {
            (messages::IRRIGATING, IRRIGATING_CLASS)
        } else {
            (messages::WAITING, WAITING_CLASS)
        };

        self.status.set_text(text);
        if let Some(container) = self.status.closest(CONTAINER_SELECTOR) {
            container.set_class_name(&format!("status {class}"));
        }

        let (Some(element), Some(timestamp)) = (&self.timestamp, &snapshot.timestamp) else {
            return;
        };

        match format_timestamp(timestamp, &self.format) {
            Ok(formatted) => element.set_text(&format!("{}{}", messages::LAST_UPDATE, formatted)),
            Err(e) => tracing::warn!("Unreadable status timestamp {:?}: {}", timestamp, e),
        }
    }
}

pub struct StatusPoller {
    api: ApiClient,
    view: StatusView,
    interval: Duration,
    timer: Rc<dyn Timer>,
}

impl StatusPoller {
    pub fn new(api: ApiClient, view: StatusView, interval: Duration, timer: Rc<dyn Timer>) -> Self {
        Self {
            api,
            view,
            interval,
            timer,
        }
    }

    /// Fetch and render once. A failed fetch is logged and leaves the page as it was.
    pub async fn tick(&self) -> bool {
        match self.api.status().await {
            Ok(snapshot) => {
                self.view.render(&snapshot);
                true
            }
            Err(e) => {
                tracing::warn!("Failed to refresh status: {}", e);
                false
            }
        }
    }

    /// Tick now and then once per interval. A tick starts on schedule even while earlier
    /// ones are still waiting for the backend. The returned future runs until the handle is
    /// disposed and must be driven by the caller's executor.
    pub fn start(self: Rc<Self>) -> (LocalBoxFuture<'static, ()>, PollHandle) {
        let (handle, registration) = AbortHandle::new_pair();

        let task = Abortable::new(
            async move {
                let mut in_flight = FuturesUnordered::new();
                loop {
                    in_flight.push(self.tick());

                    let mut next = self.timer.sleep(self.interval).fuse();
                    loop {
                        futures::select! {
                            () = next => break,
                            _ = in_flight.select_next_some() => {}
                        }
                    }
                }
            },
            registration,
        );

        (task.map(|_| ()).boxed_local(), PollHandle { handle })
    }
}

/// Stops a running [`StatusPoller`]. Dropping the handle leaves the poller running.
#[derive(Debug, Clone)]
pub struct PollHandle {
    handle: AbortHandle,
}

impl PollHandle {
    pub fn dispose(&self) {
        self.handle.abort();
    }

    pub fn is_disposed(&self) -> bool {
        self.handle.is_aborted()
    }
}
