//! Static site generation
//!
//! Builds the documentation site in two stages:
//! 1. **Rendering**: open every item route through a [`DocumentationPage`]
//! 2. **Writing**: emit one `index.html` per route plus redirect and 404 pages

use crate::content_store::{ContentStore, ContentStoreError};
use crate::html_exporter::{render_not_found_page, render_page, render_redirect_page, PageContext};
use crate::navigation::{NavigationController, Route};
use crate::page::{DocumentationPage, PageView};
use crate::scroll_spy::AnchorTable;
use crate::site_config::SiteConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Outcome of a successful build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// Directory the site was written to
    pub out_dir: PathBuf,
    /// Documentation pages written
    pub pages: usize,
    /// Redirect pages written
    pub redirects: usize,
    /// Pages served from a fallback document
    pub fallbacks: usize,
    /// Renderer warnings across all pages
    pub warnings: usize,
}

/// A rendered page waiting to be written
struct PlannedPage {
    route: String,
    html: String,
}

/// Build the static site
///
/// # Parameters
/// * `config` - Site configuration
/// * `store` - Content to publish
/// * `out_dir` - Output directory, created if missing
///
/// # Returns
/// * `Ok(BuildSummary)` - Counts of what was written
/// * `Err(BuildError)` - Invalid store, invalid default route or an I/O failure
pub fn build_site(
    config: &SiteConfig,
    store: &ContentStore,
    out_dir: &Path,
) -> Result<BuildSummary, BuildError> {
    store.validate()?;
    let default_route = resolve_default_route(config, store)?;

    log::info!("Rendering {} documents", store.items().count());
    let mut summary = BuildSummary {
        out_dir: out_dir.to_path_buf(),
        pages: 0,
        redirects: 0,
        fallbacks: 0,
        warnings: 0,
    };
    let planned = render_documents(config, store, &default_route, &mut summary);

    log::info!("Writing site to {}", out_dir.display());
    for page in &planned {
        write_file(&route_file(out_dir, &page.route), &page.html)?;
        summary.pages += 1;
    }

    let docs_target = directory_url(&default_route);
    write_file(&out_dir.join("index.html"), &render_redirect_page(&docs_target))?;
    write_file(
        &out_dir.join("docs").join("index.html"),
        &render_redirect_page(&docs_target),
    )?;
    summary.redirects += 2;

    if let Some(first) = store.first_route() {
        let first_target = directory_url(&first);
        for section in &store.sections {
            let path = out_dir.join("docs").join(&section.id).join("index.html");
            write_file(&path, &render_redirect_page(&first_target))?;
            summary.redirects += 1;
        }
    }

    write_file(
        &out_dir.join("404.html"),
        &render_not_found_page(&config.site_title, &docs_target),
    )?;

    log::info!(
        "Built {} pages and {} redirects ({} fallback, {} warnings)",
        summary.pages,
        summary.redirects,
        summary.fallbacks,
        summary.warnings
    );
    Ok(summary)
}

/// Every item route in sidebar order
pub fn document_routes(store: &ContentStore) -> Vec<String> {
    store
        .items()
        .map(|(section, item)| format!("/docs/{}/{}", section.id, item.path_segment()))
        .collect()
}

/// The configured default route must point at a document of this store
fn resolve_default_route(config: &SiteConfig, store: &ContentStore) -> Result<String, BuildError> {
    let route = config.default_route.clone();
    let resolves = match Route::parse(&route) {
        Route::Item {
            section_id,
            item_id,
        } => store
            .section(&section_id)
            .and_then(|section| section.find_item(&item_id))
            .is_some(),
        _ => false,
    };
    if resolves {
        Ok(route)
    } else {
        Err(BuildError::InvalidDefaultRoute(route))
    }
}

fn render_documents(
    config: &SiteConfig,
    store: &ContentStore,
    default_route: &str,
    summary: &mut BuildSummary,
) -> Vec<PlannedPage> {
    let navigation = NavigationController::new(store).with_default_route(default_route);
    let mut page = DocumentationPage::new(navigation, config.scroll_offset);
    let anchors = AnchorTable::new();

    let mut planned = Vec::new();
    for route in document_routes(store) {
        page.open(&route, &anchors);
        if page.view() != &PageView::Document {
            log::warn!("Skipping {}: no document", route);
            continue;
        }

        let document = page.document();
        for warning in &document.warnings {
            log::warn!("{}: {}", route, warning);
        }
        summary.warnings += document.warnings.len();

        let loaded = page.loaded();
        if loaded.is_some_and(|doc| doc.missing.is_some()) {
            summary.fallbacks += 1;
        }

        let html = render_page(&PageContext {
            site_title: &config.site_title,
            page_title: loaded.and_then(|doc| doc.title.as_deref()),
            store,
            active_section_id: page.navigation().active_section_id(),
            active_item_id: page.navigation().active_item_id(),
            document,
            active_heading: page.active_heading(),
            scroll_offset: config.scroll_offset,
            repository_url: &config.repository_url,
            version_label: &config.version_label,
        });
        log::debug!("Rendered {}", route);
        planned.push(PlannedPage { route, html });
    }
    page.close();
    planned
}

/// `/docs/a/b` becomes `<out>/docs/a/b/index.html`
fn route_file(out_dir: &Path, route: &str) -> PathBuf {
    route
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(out_dir.to_path_buf(), |path, segment| path.join(segment))
        .join("index.html")
}

fn directory_url(route: &str) -> String {
    if route.ends_with('/') {
        route.to_string()
    } else {
        format!("{route}/")
    }
}

/// Write a file, creating parent directories if they don't exist
fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| BuildError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Errors that can occur while building the site
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error writing {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Default route '{0}' does not point at a document")]
    InvalidDefaultRoute(String),

    #[error("Invalid content store: {0}")]
    Content(#[from] ContentStoreError),
}
