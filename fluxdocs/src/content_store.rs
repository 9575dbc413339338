//! Documentation content store
//!
//! Sections of documentation items, each carrying the raw Markdown-subset
//! content handed to the renderer. The built-in store is compiled into the
//! binary; an external store can be loaded from a TOML manifest.

use crate::markdown::ContentTrust;
use itertools::Itertools;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A single documentation page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocItem {
    /// Stable identifier
    pub id: String,
    /// Title shown in the sidebar
    pub title: String,
    /// URL segment, preferred over `id` when routing
    pub slug: String,
    /// Raw content; `None` when the item has no body
    pub content: Option<String>,
}

impl DocItem {
    /// URL segment for this item: the slug, or the id when the slug is empty
    pub fn path_segment(&self) -> &str {
        if self.slug.is_empty() {
            &self.id
        } else {
            &self.slug
        }
    }
}

/// A group of documentation items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSection {
    pub id: String,
    pub title: String,
    pub items: Vec<DocItem>,
}

impl DocSection {
    /// Find an item by URL key, trying the slug first and the id second
    pub fn find_item(&self, key: &str) -> Option<&DocItem> {
        self.items
            .iter()
            .find(|item| item.slug == key)
            .or_else(|| self.items.iter().find(|item| item.id == key))
    }

    /// Find an item by id only
    pub fn item_by_id(&self, id: &str) -> Option<&DocItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Errors that can occur when loading a content store
#[derive(Error, Debug)]
pub enum ContentStoreError {
    #[error("Failed to read {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse content manifest {path}: {source}", path = .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Duplicate section id '{0}'")]
    DuplicateSection(String),

    #[error("Duplicate item slug '{slug}' in section '{section}'")]
    DuplicateSlug { section: String, slug: String },

    #[error("Content store has no sections")]
    Empty,

    #[error("Invalid path segment '{segment}' in section '{section}'")]
    InvalidSegment { section: String, segment: String },
}

/// Whether a section id or item segment can be used as one URL path segment
///
/// Segments become directory names in the built site, so separators, drive
/// prefixes and the `.`/`..` entries are rejected.
fn is_path_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', ':'])
}

/// The full set of documentation sections
#[derive(Debug, Clone)]
pub struct ContentStore {
    /// Sections in sidebar order
    pub sections: Vec<DocSection>,
    /// How the renderer must treat content from this store
    pub trust: ContentTrust,
}

/// Compiled-in pages: (section id, section title, [(item id, title, slug, content)])
type BuiltinSection = (
    &'static str,
    &'static str,
    &'static [(&'static str, &'static str, &'static str, &'static str)],
);

const BUILTIN: &[BuiltinSection] = &[
    (
        "getting-started",
        "Getting Started",
        &[
            (
                "introduction",
                "Introduction",
                "introduction",
                include_str!("../content/getting-started/introduction.md"),
            ),
            (
                "installation",
                "Installation",
                "installation",
                include_str!("../content/getting-started/installation.md"),
            ),
            (
                "quick-start",
                "Quick Start",
                "quick-start",
                include_str!("../content/getting-started/quick-start.md"),
            ),
        ],
    ),
    (
        "core-concepts",
        "Core Concepts",
        &[
            (
                "architecture",
                "Architecture",
                "architecture",
                include_str!("../content/core-concepts/architecture.md"),
            ),
            (
                "routing",
                "Routing",
                "routing",
                include_str!("../content/core-concepts/routing.md"),
            ),
            (
                "middleware",
                "Middleware",
                "middleware",
                include_str!("../content/core-concepts/middleware.md"),
            ),
            (
                "cli-overview",
                "CLI Overview",
                "cli-overview",
                include_str!("../content/core-concepts/cli-overview.md"),
            ),
            (
                "scaffolding",
                "Scaffolding",
                "scaffolding",
                include_str!("../content/core-concepts/scaffolding.md"),
            ),
        ],
    ),
    (
        "database",
        "Database",
        &[
            (
                "database-setup",
                "Database Setup",
                "database-setup",
                include_str!("../content/database/database-setup.md"),
            ),
            (
                "migration",
                "Migration",
                "migration",
                include_str!("../content/database/migration.md"),
            ),
            (
                "models",
                "Models",
                "models",
                include_str!("../content/database/models.md"),
            ),
        ],
    ),
];

/// TOML manifest describing an external content store
#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    sections: Vec<ManifestSection>,
}

#[derive(Debug, Deserialize)]
struct ManifestSection {
    id: String,
    title: String,
    #[serde(default)]
    items: Vec<ManifestItem>,
}

#[derive(Debug, Deserialize)]
struct ManifestItem {
    id: String,
    title: String,
    #[serde(default)]
    slug: String,
    /// Content file relative to the manifest
    file: Option<PathBuf>,
}

impl ContentStore {
    /// The compiled-in Flux documentation
    pub fn builtin() -> Self {
        let sections = BUILTIN
            .iter()
            .map(|(id, title, items)| DocSection {
                id: (*id).to_string(),
                title: (*title).to_string(),
                items: items
                    .iter()
                    .map(|(id, title, slug, content)| DocItem {
                        id: (*id).to_string(),
                        title: (*title).to_string(),
                        slug: (*slug).to_string(),
                        content: Some((*content).to_string()),
                    })
                    .collect(),
            })
            .collect();

        Self {
            sections,
            trust: ContentTrust::Trusted,
        }
    }

    /// Load a content store from a TOML manifest
    ///
    /// Content loaded this way did not go through the build, so it is marked
    /// [`ContentTrust::Untrusted`] and paragraphs are escaped when rendered.
    ///
    /// # Parameters
    /// * `path` - Path to the manifest; item `file` entries are relative to its directory
    ///
    /// # Returns
    /// * `Ok(ContentStore)` - Loaded and validated store
    /// * `Err(ContentStoreError)` - Unreadable files, invalid TOML or duplicate keys
    pub fn from_manifest(path: &Path) -> Result<Self, ContentStoreError> {
        let text = fs::read_to_string(path).map_err(|source| ContentStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest: Manifest =
            toml::from_str(&text).map_err(|source| ContentStoreError::Manifest {
                path: path.to_path_buf(),
                source,
            })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let mut sections = Vec::with_capacity(manifest.sections.len());
        for section in manifest.sections {
            let mut items = Vec::with_capacity(section.items.len());
            for item in section.items {
                let content = match &item.file {
                    Some(file) => {
                        let file_path = base.join(file);
                        let body = fs::read_to_string(&file_path).map_err(|source| {
                            ContentStoreError::Io {
                                path: file_path.clone(),
                                source,
                            }
                        })?;
                        Some(body)
                    }
                    None => None,
                };
                items.push(DocItem {
                    id: item.id,
                    title: item.title,
                    slug: item.slug,
                    content,
                });
            }
            sections.push(DocSection {
                id: section.id,
                title: section.title,
                items,
            });
        }

        let store = Self {
            sections,
            trust: ContentTrust::Untrusted,
        };
        store.validate()?;
        log::info!(
            "Loaded {} sections from {}",
            store.sections.len(),
            path.display()
        );
        Ok(store)
    }

    /// Check that section ids and item slugs are unambiguous and usable as
    /// single path segments
    pub fn validate(&self) -> Result<(), ContentStoreError> {
        if self.sections.is_empty() {
            return Err(ContentStoreError::Empty);
        }

        if let Some(id) = self.sections.iter().map(|s| s.id.as_str()).duplicates().next() {
            return Err(ContentStoreError::DuplicateSection(id.to_string()));
        }

        for section in &self.sections {
            let invalid = std::iter::once(section.id.as_str())
                .chain(section.items.iter().map(DocItem::path_segment))
                .find(|segment| !is_path_segment(segment));
            if let Some(segment) = invalid {
                return Err(ContentStoreError::InvalidSegment {
                    section: section.id.clone(),
                    segment: segment.to_string(),
                });
            }

            if let Some(slug) = section
                .items
                .iter()
                .map(DocItem::path_segment)
                .duplicates()
                .next()
            {
                return Err(ContentStoreError::DuplicateSlug {
                    section: section.id.clone(),
                    slug: slug.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Find a section by id
    pub fn section(&self, id: &str) -> Option<&DocSection> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// Path of the first item of the first section
    pub fn first_route(&self) -> Option<String> {
        let section = self.sections.first()?;
        let item = section.items.first()?;
        Some(format!("/docs/{}/{}", section.id, item.path_segment()))
    }

    /// Every `(section, item)` pair in sidebar order
    pub fn items(&self) -> impl Iterator<Item = (&DocSection, &DocItem)> + '_ {
        self.sections
            .iter()
            .flat_map(|section| section.items.iter().map(move |item| (section, item)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn item(id: &str, slug: &str) -> DocItem {
        DocItem {
            id: id.to_string(),
            title: id.to_string(),
            slug: slug.to_string(),
            content: None,
        }
    }

    #[test]
    fn test_builtin_store_layout() {
        let store = ContentStore::builtin();
        let ids: Vec<&str> = store.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["getting-started", "core-concepts", "database"]);
        assert_eq!(store.items().count(), 11);
        assert_eq!(store.trust, ContentTrust::Trusted);
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_builtin_first_route() {
        assert_eq!(
            ContentStore::builtin().first_route().as_deref(),
            Some("/docs/getting-started/introduction")
        );
    }

    #[test]
    fn test_builtin_items_have_content() {
        let store = ContentStore::builtin();
        for (_, item) in store.items() {
            assert!(item.content.is_some(), "{} should have content", item.id);
        }
        let intro = store
            .section("getting-started")
            .and_then(|s| s.find_item("introduction"))
            .unwrap();
        assert!(intro
            .content
            .as_deref()
            .unwrap()
            .contains("# Flux! the GoPowerhouse"));
    }

    #[test]
    fn test_find_item_prefers_slug_over_id() {
        let section = DocSection {
            id: "guides".to_string(),
            title: "Guides".to_string(),
            items: vec![item("setup", "install"), item("install", "install-legacy")],
        };
        assert_eq!(section.find_item("install").unwrap().id, "setup");
        assert_eq!(section.find_item("setup").unwrap().id, "setup");
        assert!(section.find_item("missing").is_none());
    }

    #[test]
    fn test_path_segment_falls_back_to_id() {
        assert_eq!(item("setup", "").path_segment(), "setup");
        assert_eq!(item("setup", "getting-set-up").path_segment(), "getting-set-up");
    }

    #[test]
    fn test_validate_rejects_duplicate_slugs() {
        let store = ContentStore {
            sections: vec![DocSection {
                id: "guides".to_string(),
                title: "Guides".to_string(),
                items: vec![item("a", "same"), item("b", "same")],
            }],
            trust: ContentTrust::Trusted,
        };
        assert!(matches!(
            store.validate(),
            Err(ContentStoreError::DuplicateSlug { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_sections() {
        let section = DocSection {
            id: "guides".to_string(),
            title: "Guides".to_string(),
            items: Vec::new(),
        };
        let store = ContentStore {
            sections: vec![section.clone(), section],
            trust: ContentTrust::Trusted,
        };
        assert!(matches!(
            store.validate(),
            Err(ContentStoreError::DuplicateSection(id)) if id == "guides"
        ));
    }

    #[test]
    fn test_validate_rejects_unsafe_path_segments() {
        let section = |id: &str, items: Vec<DocItem>| ContentStore {
            sections: vec![DocSection {
                id: id.to_string(),
                title: "Guides".to_string(),
                items,
            }],
            trust: ContentTrust::Untrusted,
        };

        for bad in ["", ".", "..", "/tmp/out", "a/b", "a\\b", "C:"] {
            assert!(
                matches!(
                    section(bad, Vec::new()).validate(),
                    Err(ContentStoreError::InvalidSegment { segment, .. }) if segment == bad
                ),
                "section id {bad:?} should be rejected"
            );
            assert!(
                matches!(
                    section("guides", vec![item("ok", bad)]).validate(),
                    Err(ContentStoreError::InvalidSegment { .. })
                ) || bad.is_empty(),
                "slug {bad:?} should be rejected"
            );
        }

        assert!(matches!(
            section("guides", vec![item("..", "")]).validate(),
            Err(ContentStoreError::InvalidSegment { segment, .. }) if segment == ".."
        ));
        assert!(section("guides", vec![item("setup", "getting-started.v2")])
            .validate()
            .is_ok());
    }

    #[test]
    fn test_from_manifest_rejects_absolute_section_id() {
        let dir = tempfile::tempdir().unwrap();
        let outside = dir.path().join("outside");
        fs::write(
            dir.path().join("docs.toml"),
            format!(
                "[[sections]]\nid = {:?}\ntitle = \"Escaped\"\n\n[[sections.items]]\nid = \"page\"\ntitle = \"Page\"\n",
                outside.display().to_string()
            ),
        )
        .unwrap();

        let err = ContentStore::from_manifest(&dir.path().join("docs.toml")).unwrap_err();
        assert!(matches!(err, ContentStoreError::InvalidSegment { .. }));
    }

    #[test]
    fn test_from_manifest_loads_untrusted_store() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("intro.md"), "# Hello\n\nWorld").unwrap();
        fs::write(
            dir.path().join("docs.toml"),
            r#"
[[sections]]
id = "guides"
title = "Guides"

[[sections.items]]
id = "intro"
title = "Intro"
slug = "intro"
file = "intro.md"

[[sections.items]]
id = "draft"
title = "Draft"
"#,
        )
        .unwrap();

        let store = ContentStore::from_manifest(&dir.path().join("docs.toml")).unwrap();
        assert_eq!(store.trust, ContentTrust::Untrusted);
        let section = store.section("guides").unwrap();
        assert_eq!(
            section.find_item("intro").unwrap().content.as_deref(),
            Some("# Hello\n\nWorld")
        );
        assert_eq!(section.find_item("draft").unwrap().content, None);
    }

    #[test]
    fn test_from_manifest_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("docs.toml"),
            "[[sections]]\nid = \"a\"\ntitle = \"A\"\n\n[[sections.items]]\nid = \"x\"\ntitle = \"X\"\nfile = \"nope.md\"\n",
        )
        .unwrap();

        let err = ContentStore::from_manifest(&dir.path().join("docs.toml")).unwrap_err();
        assert!(matches!(err, ContentStoreError::Io { .. }));
    }

    #[test]
    fn test_from_manifest_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("docs.toml"), "[[sections]\n").unwrap();

        let err = ContentStore::from_manifest(&dir.path().join("docs.toml")).unwrap_err();
        assert!(matches!(err, ContentStoreError::Manifest { .. }));
    }
}
