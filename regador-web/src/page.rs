use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::error::Result;
use crate::platform::Platform;
use crate::schedule::ScheduleClient;
use crate::settings::Settings;
use crate::sidebar::{self, Sidebar};
use crate::status::{PollHandle, StatusPoller, StatusView};

/// Everything wired into a loaded page. Disposing it detaches handlers and stops polling.
pub struct Page {
    platform: Platform,
    sidebar: Option<Sidebar>,
    poller: Option<PollHandle>,
}

impl Page {
    /// Wire the components whose elements are present. `spawn` receives the polling task
    /// when the page shows a status.
    pub fn mount<S>(platform: Platform, settings: &Settings, spawn: S) -> Result<Self>
    where
        S: FnOnce(LocalBoxFuture<'static, ()>),
    {
        let view = StatusView::locate(platform.document.as_ref(), &settings.status.timestamp_format)?;

        let sidebar = match Sidebar::locate(
            platform.document.as_ref(),
            platform.browser.clone(),
            settings.sidebar.breakpoint,
        ) {
            Some(mut sidebar) => {
                sidebar.attach();
                Some(sidebar)
            }
            None => {
                let links = platform.document.query_selector_all(sidebar::LINK_SELECTOR);
                sidebar::mark_active_links(&links, &platform.browser.current_path());
                None
            }
        };

        let poller = view.map(|view| {
            let poller = Rc::new(StatusPoller::new(
                platform.api(),
                view,
                settings.status.interval(),
                platform.timer.clone(),
            ));
            let (task, handle) = poller.start();
            spawn(task);
            handle
        });

        tracing::debug!(
            "page mounted, sidebar: {}, status polling: {}",
            sidebar.is_some(),
            poller.is_some()
        );

        Ok(Self {
            platform,
            sidebar,
            poller,
        })
    }

    pub fn schedules(&self) -> ScheduleClient {
        ScheduleClient::new(self.platform.api(), self.platform.browser.clone())
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn has_sidebar(&self) -> bool {
        self.sidebar.is_some()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|handle| !handle.is_disposed())
    }

    pub fn dispose(&mut self) {
        if let Some(mut sidebar) = self.sidebar.take() {
            sidebar.dispose();
        }
        if let Some(poller) = self.poller.take() {
            poller.dispose();
        }
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.dispose();
    }
}
