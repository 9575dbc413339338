//! fluxdocs - documentation site engine
//!
//! Renders the Markdown subset used by the Flux documentation into blocks and a
//! heading outline, tracks the active heading while a reader scrolls, and
//! builds the static documentation site.
//!
//! # Example
//!
//! ```
//! use fluxdocs::{render, AnchorTable, ScrollSignal, ScrollSpyTracker};
//!
//! let document = render("# Routing\n\nText\n\n## Route Groups");
//! assert_eq!(document.headings.len(), 2);
//!
//! let anchors: AnchorTable = [("routing", -250.0), ("route-groups", 40.0)]
//!     .into_iter()
//!     .collect();
//! let mut signal = ScrollSignal::new();
//! let mut tracker = ScrollSpyTracker::default();
//! tracker.track(&document.headings, &mut signal, &anchors);
//! assert_eq!(tracker.active_id(), Some("route-groups"));
//! ```

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_precision_loss)]

pub mod content_store;
pub mod html_exporter;
pub mod markdown;
pub mod navigation;
pub mod page;
pub mod scroll_spy;
pub mod site_builder;
pub mod site_config;
pub mod toc;

pub use content_store::{ContentStore, ContentStoreError, DocItem, DocSection};
pub use html_exporter::{render_blocks, render_page, PageContext};
pub use markdown::{
    escape_html, heading_id, highlight_language, render, Block, ContentTrust, Heading,
    HeadingList, InlineFormatter, MarkdownRenderer, RenderedDocument, TrustedMarkup,
};
pub use navigation::{LoadedDocument, Navigation, NavigationController, Route, DEFAULT_ROUTE};
pub use page::{DocumentationPage, PageView};
pub use scroll_spy::{
    resolve_active_id, AnchorResolver, AnchorTable, ScrollSignal, ScrollSpyTracker,
    DEFAULT_SCROLL_OFFSET,
};
pub use site_builder::{build_site, document_routes, BuildError, BuildSummary};
pub use site_config::{SiteConfig, SiteConfigError, CONFIG_FILE_NAME};
pub use toc::{TableOfContentsView, TocEntry};
