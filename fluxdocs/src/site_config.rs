//! Site configuration from fluxdocs.toml

use crate::content_store::{ContentStore, ContentStoreError};
use crate::navigation::DEFAULT_ROUTE;
use crate::scroll_spy::DEFAULT_SCROLL_OFFSET;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "fluxdocs.toml";

/// Site configuration from fluxdocs.toml
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Title shown in the header and page titles
    pub site_title: String,

    /// Route that `/` and `/docs` redirect to
    pub default_route: String,

    /// Distance from the top of the viewport, in pixels, at which a heading
    /// becomes active in the table of contents
    pub scroll_offset: i32,

    /// Repository link in the sidebar footer; empty hides the link
    pub repository_url: String,

    /// Version label in the sidebar footer
    pub version_label: String,

    /// External content manifest, relative to the configuration file.
    /// When absent the built-in documentation is used.
    pub content_manifest: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "Flux Documentation".to_string(),
            default_route: DEFAULT_ROUTE.to_string(),
            scroll_offset: DEFAULT_SCROLL_OFFSET,
            repository_url: "https://github.com/Fluxgo/flux".to_string(),
            version_label: "v1.0.0".to_string(),
            content_manifest: None,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a fluxdocs.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(SiteConfig)` - Successfully loaded configuration
    /// * `Err(SiteConfigError)` - Error reading or parsing the configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SiteConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SiteConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: SiteConfig =
            toml::from_str(&content).map_err(|source| SiteConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(config)
    }

    /// Load configuration if the file exists, otherwise use the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, SiteConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("{} not found, using default configuration", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to a fluxdocs.toml file
    ///
    /// # Parameters
    /// * `path` - Path where the configuration file will be written
    ///
    /// # Returns
    /// * `Ok(())` - Successfully saved configuration
    /// * `Err(SiteConfigError)` - Error serializing or writing the configuration file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SiteConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;

        fs::write(path, content).map_err(|source| SiteConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Open the content store this configuration points at
    ///
    /// # Parameters
    /// * `config_dir` - Directory of the configuration file; `content_manifest` is relative to it
    pub fn content_store(&self, config_dir: &Path) -> Result<ContentStore, ContentStoreError> {
        match &self.content_manifest {
            Some(manifest) => ContentStore::from_manifest(&config_dir.join(manifest)),
            None => Ok(ContentStore::builtin()),
        }
    }
}

/// Errors that can occur when loading or saving site configuration
#[derive(Error, Debug)]
pub enum SiteConfigError {
    #[error("Failed to access {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}", path = .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::ContentTrust;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.scroll_offset, 100);
        assert_eq!(config.default_route, "/docs/getting-started/introduction");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: SiteConfig = toml::from_str(
            r#"
site_title = "Internal Docs"
scroll_offset = 64
content_manifest = "content/manifest.toml"
"#,
        )
        .unwrap();

        assert_eq!(config.site_title, "Internal Docs");
        assert_eq!(config.scroll_offset, 64);
        assert_eq!(
            config.content_manifest,
            Some(PathBuf::from("content/manifest.toml"))
        );
        assert_eq!(config.version_label, "v1.0.0");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let config = SiteConfig {
            site_title: "Flux".to_string(),
            repository_url: String::new(),
            ..SiteConfig::default()
        };

        config.save(&path).unwrap();
        assert_eq!(SiteConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = SiteConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, SiteConfigError::Io { .. }));
        assert_eq!(
            SiteConfig::load_or_default(dir.path().join("missing.toml")).unwrap(),
            SiteConfig::default()
        );
    }

    #[test]
    fn test_load_invalid_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "scroll_offset = \"far\"").unwrap();
        assert!(matches!(
            SiteConfig::load(&path).unwrap_err(),
            SiteConfigError::Parse { .. }
        ));
    }

    #[test]
    fn test_content_store_from_manifest_is_untrusted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("intro.md"), "# Hello").unwrap();
        fs::write(
            dir.path().join("manifest.toml"),
            r#"
[[sections]]
id = "guides"
title = "Guides"

[[sections.items]]
id = "intro"
title = "Intro"
slug = "intro"
file = "intro.md"
"#,
        )
        .unwrap();

        let config = SiteConfig {
            content_manifest: Some(PathBuf::from("manifest.toml")),
            ..SiteConfig::default()
        };
        let store = config.content_store(dir.path()).unwrap();
        assert_eq!(store.trust, ContentTrust::Untrusted);
        assert_eq!(store.first_route().as_deref(), Some("/docs/guides/intro"));

        let builtin = SiteConfig::default().content_store(dir.path()).unwrap();
        assert_eq!(builtin.trust, ContentTrust::Trusted);
    }
}
