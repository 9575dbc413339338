//! Route handling and content lookup
//!
//! Maps `/docs/{sectionId}/{itemId}` paths onto the content store and tracks
//! which section and item are selected. Lookups that fail never error: they
//! produce a one-line fallback document that renders as a single heading.

use crate::content_store::ContentStore;
use crate::markdown::ContentTrust;

/// Route that `/` and `/docs` redirect to
pub const DEFAULT_ROUTE: &str = "/docs/getting-started/introduction";

/// Fallback document for an unknown section
pub const SECTION_NOT_FOUND: &str = "# Section not found";
/// Fallback document for an unknown item
pub const ITEM_NOT_FOUND: &str = "# Item not found";
/// Fallback document for an item without content
pub const CONTENT_NOT_FOUND: &str = "# Content not found";

/// A parsed URL path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Root,
    /// `/docs`
    DocsIndex,
    /// `/docs/{section_id}` with no item
    Section { section_id: String },
    /// `/docs/{section_id}/{item_id}`
    Item { section_id: String, item_id: String },
    /// Anything else
    NotFound,
}

impl Route {
    /// Parse a URL path; trailing slashes are ignored
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Root,
            ["docs"] => Route::DocsIndex,
            ["docs", section] => Route::Section {
                section_id: (*section).to_string(),
            },
            ["docs", section, item] => Route::Item {
                section_id: (*section).to_string(),
                item_id: (*item).to_string(),
            },
            _ => Route::NotFound,
        }
    }
}

/// Why a fallback document was served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingContent {
    Section,
    Item,
    Content,
}

impl MissingContent {
    /// The fallback document fed to the renderer
    pub fn fallback_document(self) -> &'static str {
        match self {
            MissingContent::Section => SECTION_NOT_FOUND,
            MissingContent::Item => ITEM_NOT_FOUND,
            MissingContent::Content => CONTENT_NOT_FOUND,
        }
    }
}

/// Content resolved for an item route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    /// Section id from the route
    pub section_id: String,
    /// Resolved item id (not the slug), when the item exists
    pub item_id: Option<String>,
    /// Item title, when the item exists
    pub title: Option<String>,
    /// Raw content to render (a fallback document when something is missing)
    pub content: String,
    /// Trust level of `content`
    pub trust: ContentTrust,
    /// Set when `content` is a fallback document
    pub missing: Option<MissingContent>,
}

/// Result of navigating to a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Go to another path instead
    Redirect(String),
    /// Render this document
    Document(LoadedDocument),
    /// Show the "Page Not Found" panel
    NotFound,
}

/// Resolves routes against the content store and keeps the active selection
#[derive(Debug)]
pub struct NavigationController<'a> {
    store: &'a ContentStore,
    default_route: String,
    active_section_id: Option<String>,
    active_item_id: Option<String>,
    current_path: Option<String>,
}

impl<'a> NavigationController<'a> {
    /// Create a controller redirecting `/` and `/docs` to [`DEFAULT_ROUTE`]
    pub fn new(store: &'a ContentStore) -> Self {
        Self {
            store,
            default_route: DEFAULT_ROUTE.to_string(),
            active_section_id: None,
            active_item_id: None,
            current_path: None,
        }
    }

    /// Override the redirect target for `/` and `/docs`
    #[must_use]
    pub fn with_default_route(mut self, route: impl Into<String>) -> Self {
        self.default_route = route.into();
        self
    }

    /// The content store being navigated
    pub fn store(&self) -> &'a ContentStore {
        self.store
    }

    pub fn active_section_id(&self) -> Option<&str> {
        self.active_section_id.as_deref()
    }

    pub fn active_item_id(&self) -> Option<&str> {
        self.active_item_id.as_deref()
    }

    /// Path of the last document navigated to
    pub fn current_path(&self) -> Option<&str> {
        self.current_path.as_deref()
    }

    /// Navigate to a URL path
    pub fn navigate(&mut self, path: &str) -> Navigation {
        log::info!("Navigating to {}", path);
        match Route::parse(path) {
            Route::Root | Route::DocsIndex => Navigation::Redirect(self.default_route.clone()),
            Route::Section { .. } => match self.store.first_route() {
                Some(first) => Navigation::Redirect(first),
                None => Navigation::NotFound,
            },
            Route::Item {
                section_id,
                item_id,
            } => {
                let loaded = self.load(&section_id, &item_id);
                self.current_path = Some(format!("/docs/{section_id}/{item_id}"));
                Navigation::Document(loaded)
            }
            Route::NotFound => Navigation::NotFound,
        }
    }

    /// Select an item from the sidebar
    ///
    /// The item is looked up by id; the path is built from its slug, or its id
    /// when the slug is empty. Unknown sections or items leave the selection
    /// unchanged and return `None`.
    pub fn select_item(&mut self, section_id: &str, item_id: &str) -> Option<(String, Navigation)> {
        let section = self.store.section(section_id)?;
        let item = section.item_by_id(item_id)?;
        let path = format!("/docs/{}/{}", section.id, item.path_segment());
        let navigation = self.navigate(&path);
        Some((path, navigation))
    }

    /// Resolve an item route against the store
    fn load(&mut self, section_id: &str, item_key: &str) -> LoadedDocument {
        self.active_section_id = Some(section_id.to_string());

        let Some(section) = self.store.section(section_id) else {
            log::warn!("Section not found: {}", section_id);
            return self.fallback(section_id, None, None, MissingContent::Section);
        };

        let Some(item) = section.find_item(item_key) else {
            log::warn!("Item '{}' not found in section '{}'", item_key, section_id);
            return self.fallback(section_id, None, None, MissingContent::Item);
        };

        self.active_item_id = Some(item.id.clone());

        match &item.content {
            Some(content) => LoadedDocument {
                section_id: section_id.to_string(),
                item_id: Some(item.id.clone()),
                title: Some(item.title.clone()),
                content: content.clone(),
                trust: self.store.trust,
                missing: None,
            },
            None => {
                log::warn!("Content not found for {}/{}", section_id, item_key);
                self.fallback(
                    section_id,
                    Some(item.id.clone()),
                    Some(item.title.clone()),
                    MissingContent::Content,
                )
            }
        }
    }

    fn fallback(
        &self,
        section_id: &str,
        item_id: Option<String>,
        title: Option<String>,
        missing: MissingContent,
    ) -> LoadedDocument {
        LoadedDocument {
            section_id: section_id.to_string(),
            item_id,
            title,
            content: missing.fallback_document().to_string(),
            trust: ContentTrust::Trusted,
            missing: Some(missing),
        }
    }
}
