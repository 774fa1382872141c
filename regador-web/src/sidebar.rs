//! Collapsible navigation panel.

use std::rc::Rc;

use crate::dom::{Browser, Document, ElementRef, Listener, set_class};

pub const TOGGLE_ID: &str = "sidebar-toggle";
pub const SIDEBAR_ID: &str = "sidebar";
pub const OVERLAY_ID: &str = "sidebar-overlay";
pub const CONTENT_ID: &str = "main-content";
pub const LINK_SELECTOR: &str = ".sidebar-menu a";

pub const ACTIVE_CLASS: &str = "active";
pub const EXPANDED_CLASS: &str = "expanded";

/// The three elements whose markers always move together.
pub struct SidebarPanel {
    sidebar: ElementRef,
    overlay: ElementRef,
    content: ElementRef,
}

impl SidebarPanel {
    pub fn new(sidebar: ElementRef, overlay: ElementRef, content: ElementRef) -> Self {
        Self {
            sidebar,
            overlay,
            content,
        }
    }

    pub fn is_open(&self) -> bool {
        self.sidebar.has_class(ACTIVE_CLASS)
    }

    pub fn toggle(&self) {
        self.set_open(!self.is_open());
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    fn set_open(&self, open: bool) {
        set_class(self.sidebar.as_ref(), ACTIVE_CLASS, open);
        set_class(self.overlay.as_ref(), ACTIVE_CLASS, open);
        set_class(self.content.as_ref(), EXPANDED_CLASS, open);
    }
}

pub struct Sidebar {
    panel: Rc<SidebarPanel>,
    toggle: Option<ElementRef>,
    links: Vec<ElementRef>,
    browser: Rc<dyn Browser>,
    breakpoint: f64,
    listeners: Vec<Listener>,
}

impl Sidebar {
    pub fn new(
        panel: SidebarPanel,
        toggle: Option<ElementRef>,
        links: Vec<ElementRef>,
        browser: Rc<dyn Browser>,
        breakpoint: u32,
    ) -> Self {
        Self {
            panel: Rc::new(panel),
            toggle,
            links,
            browser,
            breakpoint: f64::from(breakpoint),
            listeners: Vec::new(),
        }
    }

    /// Look the sidebar up by its fixed ids. `None` when the page has no sidebar panel.
    pub fn locate(document: &dyn Document, browser: Rc<dyn Browser>, breakpoint: u32) -> Option<Self> {
        let panel = SidebarPanel::new(
            document.element_by_id(SIDEBAR_ID)?,
            document.element_by_id(OVERLAY_ID)?,
            document.element_by_id(CONTENT_ID)?,
        );

        Some(Self::new(
            panel,
            document.element_by_id(TOGGLE_ID),
            document.query_selector_all(LINK_SELECTOR),
            browser,
            breakpoint,
        ))
    }

    pub fn panel(&self) -> &SidebarPanel {
        &self.panel
    }

    pub fn is_attached(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Register the click handlers and mark the links pointing at the current page.
    pub fn attach(&mut self) {
        self.dispose();

        if let Some(toggle) = &self.toggle {
            let panel = self.panel.clone();
            self.listeners
                .push(toggle.on_click(Box::new(move || panel.toggle())));
        }

        let panel = self.panel.clone();
        self.listeners
            .push(self.panel.overlay.on_click(Box::new(move || panel.close())));

        for link in &self.links {
            let panel = self.panel.clone();
            let browser = self.browser.clone();
            let breakpoint = self.breakpoint;

            self.listeners.push(link.on_click(Box::new(move || {
                // Desktop layouts keep the panel open while navigating.
                if browser.viewport_width() <= breakpoint {
                    panel.close();
                }
            })));
        }

        let marked = mark_active_links(&self.links, &self.browser.current_path());
        tracing::debug!("sidebar attached, {} active link(s)", marked);
    }

    pub fn dispose(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
    }
}

impl Drop for Sidebar {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Mark every link whose `href` is exactly `path`. Returns how many were marked.
pub fn mark_active_links(links: &[ElementRef], path: &str) -> usize {
    let mut marked = 0;
    for link in links {
        if link.attribute("href").as_deref() == Some(path) {
            link.add_class(ACTIVE_CLASS);
            marked += 1;
        }
    }
    marked
}

#[cfg(test)]
mod tests {
    use crate::dom::Element;
    use crate::mock::{MockBrowser, MockDocument, MockElement};

    use super::*;

    struct Page {
        document: MockDocument,
        browser: Rc<MockBrowser>,
        toggle: Rc<MockElement>,
        sidebar: Rc<MockElement>,
        overlay: Rc<MockElement>,
        content: Rc<MockElement>,
        links: Vec<Rc<MockElement>>,
    }

    fn page() -> Page {
        let document = MockDocument::new();
        let browser = Rc::new(MockBrowser::new());
        browser.set_path("/horarios");

        let toggle = document.insert(TOGGLE_ID, MockElement::new());
        let sidebar = document.insert(SIDEBAR_ID, MockElement::new());
        let overlay = document.insert(OVERLAY_ID, MockElement::new());
        let content = document.insert(CONTENT_ID, MockElement::new());
        let links = ["/dashboard", "/horarios", "/horarios", "/logout"]
            .iter()
            .map(|href| document.register(LINK_SELECTOR, MockElement::with_attribute("href", href)))
            .collect();

        Page {
            document,
            browser,
            toggle,
            sidebar,
            overlay,
            content,
            links,
        }
    }

    fn attached(page: &Page) -> Sidebar {
        let mut sidebar = Sidebar::locate(&page.document, page.browser.clone(), 768).unwrap();
        sidebar.attach();
        sidebar
    }

    fn assert_open(page: &Page, open: bool) {
        assert_eq!(page.sidebar.has_class(ACTIVE_CLASS), open);
        assert_eq!(page.overlay.has_class(ACTIVE_CLASS), open);
        assert_eq!(page.content.has_class(EXPANDED_CLASS), open);
    }

    #[test]
    fn test_toggle_moves_all_markers() {
        let page = page();
        let _sidebar = attached(&page);

        page.toggle.click();
        assert_open(&page, true);

        page.toggle.click();
        assert_open(&page, false);
    }

    #[test]
    fn test_toggle_repairs_partial_state() {
        let page = page();
        let _sidebar = attached(&page);

        // Only the overlay carries the marker; the sidebar decides the next state.
        page.overlay.add_class(ACTIVE_CLASS);
        page.toggle.click();
        assert_open(&page, true);
    }

    #[test]
    fn test_double_overlay_click_stays_closed() {
        let page = page();
        let _sidebar = attached(&page);

        page.toggle.click();
        page.overlay.click();
        page.overlay.click();
        assert_open(&page, false);
    }

    #[test]
    fn test_link_click_closes_on_narrow_viewport() {
        let page = page();
        let _sidebar = attached(&page);

        page.browser.set_width(768.0);
        page.toggle.click();
        page.links[0].click();
        assert_open(&page, false);
    }

    #[test]
    fn test_link_click_keeps_desktop_layout() {
        let page = page();
        let _sidebar = attached(&page);

        page.browser.set_width(769.0);
        page.toggle.click();
        page.links[3].click();
        assert_open(&page, true);
    }

    #[test]
    fn test_marks_every_matching_link() {
        let page = page();
        let _sidebar = attached(&page);

        let active: Vec<bool> = page
            .links
            .iter()
            .map(|link| link.has_class(ACTIVE_CLASS))
            .collect();
        assert_eq!(active, vec![false, true, true, false]);
    }

    #[test]
    fn test_dispose_detaches_handlers() {
        let page = page();
        let mut sidebar = attached(&page);
        assert!(sidebar.is_attached());
        assert_eq!(page.toggle.listener_count(), 1);

        sidebar.dispose();
        assert!(!sidebar.is_attached());
        assert_eq!(page.toggle.listener_count(), 0);
        assert_eq!(page.overlay.listener_count(), 0);

        page.toggle.click();
        assert_open(&page, false);
    }

    #[test]
    fn test_attach_twice_does_not_stack_handlers() {
        let page = page();
        let mut sidebar = attached(&page);
        sidebar.attach();

        assert_eq!(page.toggle.listener_count(), 1);
        page.toggle.click();
        assert_open(&page, true);
    }

    #[test]
    fn test_without_toggle() {
        let page = page();
        let document = MockDocument::new();
        document.insert(SIDEBAR_ID, page.sidebar.clone());
        document.insert(OVERLAY_ID, page.overlay.clone());
        document.insert(CONTENT_ID, page.content.clone());

        let mut sidebar = Sidebar::locate(&document, page.browser.clone(), 768).unwrap();
        sidebar.attach();

        page.sidebar.add_class(ACTIVE_CLASS);
        page.overlay.click();
        assert!(!sidebar.panel().is_open());
    }

    #[test]
    fn test_missing_panel() {
        let document = MockDocument::new();
        document.insert(SIDEBAR_ID, MockElement::new());

        assert!(Sidebar::locate(&document, Rc::new(MockBrowser::new()), 768).is_none());
    }
}
