//! Documentation page state
//!
//! Ties navigation, rendering, scroll tracking and the table of contents
//! together the way a browser page uses them: every navigation re-renders the
//! document, swaps blocks and headings in one step and re-tracks the new
//! heading list before the next scroll signal.

use crate::markdown::{MarkdownRenderer, RenderedDocument};
use crate::navigation::{LoadedDocument, Navigation, NavigationController};
use crate::scroll_spy::{AnchorResolver, ScrollSignal, ScrollSpyTracker};
use crate::toc::TableOfContentsView;

/// What the page is currently showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    /// Nothing opened yet
    Blank,
    /// A rendered document
    Document,
    /// The "Page Not Found" panel
    NotFound,
}

/// Maximum redirects followed by a single [`DocumentationPage::open`]
const MAX_REDIRECTS: usize = 4;

/// A live documentation page
pub struct DocumentationPage<'a> {
    navigation: NavigationController<'a>,
    signal: ScrollSignal,
    tracker: ScrollSpyTracker,
    document: RenderedDocument,
    loaded: Option<LoadedDocument>,
    view: PageView,
}

impl<'a> DocumentationPage<'a> {
    /// Create a page with the given activation offset
    pub fn new(navigation: NavigationController<'a>, scroll_offset: i32) -> Self {
        Self {
            navigation,
            signal: ScrollSignal::new(),
            tracker: ScrollSpyTracker::new(scroll_offset),
            document: RenderedDocument::default(),
            loaded: None,
            view: PageView::Blank,
        }
    }

    /// Open a URL path, following redirects
    ///
    /// # Parameters
    /// * `path` - URL path to open
    /// * `anchors` - Anchor positions of the freshly rendered document
    ///
    /// # Returns
    /// * `String` - The path finally shown after redirects
    pub fn open<R>(&mut self, path: &str, anchors: &R) -> String
    where
        R: AnchorResolver + ?Sized,
    {
        let mut target = path.to_string();
        for _ in 0..=MAX_REDIRECTS {
            match self.navigation.navigate(&target) {
                Navigation::Redirect(next) => target = next,
                Navigation::Document(loaded) => {
                    self.show(loaded, anchors);
                    return target;
                }
                Navigation::NotFound => break,
            }
        }
        self.show_not_found();
        target
    }

    /// Select an item from the sidebar
    pub fn select_item<R>(&mut self, section_id: &str, item_id: &str, anchors: &R) -> Option<String>
    where
        R: AnchorResolver + ?Sized,
    {
        let (path, navigation) = self.navigation.select_item(section_id, item_id)?;
        match navigation {
            Navigation::Document(loaded) => self.show(loaded, anchors),
            Navigation::Redirect(next) => {
                return Some(self.open(&next, anchors));
            }
            Navigation::NotFound => self.show_not_found(),
        }
        Some(path)
    }

    /// Deliver a scroll signal
    pub fn scroll<R>(&mut self, anchors: &R) -> Option<&str>
    where
        R: AnchorResolver + ?Sized,
    {
        self.tracker.on_scroll(&self.signal, anchors)
    }

    /// Tear the page down, releasing the scroll listener
    pub fn close(&mut self) {
        self.tracker.unsubscribe(&mut self.signal);
    }

    pub fn document(&self) -> &RenderedDocument {
        &self.document
    }

    pub fn loaded(&self) -> Option<&LoadedDocument> {
        self.loaded.as_ref()
    }

    pub fn view(&self) -> &PageView {
        &self.view
    }

    pub fn navigation(&self) -> &NavigationController<'a> {
        &self.navigation
    }

    pub fn active_heading(&self) -> Option<&str> {
        self.tracker.active_id()
    }

    /// Number of scroll listeners currently registered by this page
    pub fn listener_count(&self) -> usize {
        self.signal.listener_count()
    }

    /// "On This Page" fragment for the current document
    pub fn toc_html(&self) -> String {
        TableOfContentsView::new(&self.document.headings, self.tracker.active_id()).render_html()
    }

    fn show<R>(&mut self, loaded: LoadedDocument, anchors: &R)
    where
        R: AnchorResolver + ?Sized,
    {
        let rendered = MarkdownRenderer::new()
            .with_trust(loaded.trust)
            .render(&loaded.content);
        for warning in &rendered.warnings {
            log::warn!("{}: {}", loaded.section_id, warning);
        }

        self.document = rendered;
        self.loaded = Some(loaded);
        self.view = PageView::Document;
        self.tracker
            .track(&self.document.headings, &mut self.signal, anchors);
    }

    fn show_not_found(&mut self) {
        self.document = RenderedDocument::default();
        self.loaded = None;
        self.view = PageView::NotFound;
        self.tracker.unsubscribe(&mut self.signal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_store::ContentStore;
    use crate::markdown::Block;
    use crate::scroll_spy::AnchorTable;

    #[test]
    fn test_open_follows_root_redirect() {
        let store = ContentStore::builtin();
        let mut page = DocumentationPage::new(NavigationController::new(&store), 100);

        let shown = page.open("/", &AnchorTable::new());
        assert_eq!(shown, "/docs/getting-started/introduction");
        assert_eq!(page.view(), &PageView::Document);
        assert_eq!(
            page.document().headings[0].id,
            "flux-the-gopowerhouse"
        );
        assert_eq!(page.active_heading(), Some("flux-the-gopowerhouse"));
        assert_eq!(page.listener_count(), 1);
    }

    #[test]
    fn test_navigation_replaces_document_and_tracking() {
        let store = ContentStore::builtin();
        let mut page = DocumentationPage::new(NavigationController::new(&store), 100);
        page.open("/docs/getting-started/introduction", &AnchorTable::new());
        let previous = page.document().headings.clone();

        let anchors: AnchorTable = [("installation", -400.0), ("prerequisites", 20.0)]
            .into_iter()
            .collect();
        page.open("/docs/getting-started/installation", &anchors);

        assert!(!previous.same_list(&page.document().headings));
        assert_eq!(page.document().headings[0].id, "installation");
        assert_eq!(page.active_heading(), Some("prerequisites"));
        assert_eq!(page.listener_count(), 1);
    }

    #[test]
    fn test_missing_item_renders_fallback_heading() {
        let store = ContentStore::builtin();
        let mut page = DocumentationPage::new(NavigationController::new(&store), 100);
        page.open("/docs/getting-started/nope", &AnchorTable::new());

        assert_eq!(page.document().blocks.len(), 1);
        assert!(matches!(
            &page.document().blocks[0],
            Block::Heading(h) if h.text == "Item not found"
        ));
        assert_eq!(page.active_heading(), Some("item-not-found"));
    }

    #[test]
    fn test_unknown_path_shows_not_found_and_releases_listener() {
        let store = ContentStore::builtin();
        let mut page = DocumentationPage::new(NavigationController::new(&store), 100);
        page.open("/docs/database/models", &AnchorTable::new());
        assert_eq!(page.listener_count(), 1);

        page.open("/pricing", &AnchorTable::new());
        assert_eq!(page.view(), &PageView::NotFound);
        assert!(page.document().blocks.is_empty());
        assert_eq!(page.listener_count(), 0);
    }

    #[test]
    fn test_scroll_and_close() {
        let store = ContentStore::builtin();
        let mut page = DocumentationPage::new(NavigationController::new(&store), 100);
        page.open("/docs/getting-started/quick-start", &AnchorTable::new());

        let anchors: AnchorTable = [
            ("quick-start", -900.0),
            ("creating-a-new-project", -600.0),
            ("project-structure", 80.0),
            ("running-the-application", 600.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(page.scroll(&anchors), Some("project-structure"));
        assert!(page.toc_html().contains("toc-link active\" href=\"#project-structure\""));

        page.close();
        assert_eq!(page.listener_count(), 0);
        assert_eq!(page.active_heading(), None);
    }

    #[test]
    fn test_select_item_opens_document() {
        let store = ContentStore::builtin();
        let mut page = DocumentationPage::new(NavigationController::new(&store), 100);

        let path = page
            .select_item("database", "migration", &AnchorTable::new())
            .unwrap();
        assert_eq!(path, "/docs/database/migration");
        assert_eq!(page.navigation().active_section_id(), Some("database"));
        assert_eq!(page.loaded().unwrap().title.as_deref(), Some("Migration"));
    }
}
