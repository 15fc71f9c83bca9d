//! Template loaders
//!
//! A [`TemplateLoader`] fetches external page markup by path. The navigator
//! prefixes the path with its configured base template path before asking.

use crate::error::TemplateError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::debug;
use url::Url;

/// Trait for all template loaders
#[async_trait]
pub trait TemplateLoader: Send + Sync {
    /// Fetch the markup stored at `path`
    async fn load(&self, path: &str) -> Result<String, TemplateError>;
}

/// Loads templates from a directory on disk
#[derive(Debug, Clone)]
pub struct FsTemplateLoader {
    root: PathBuf,
}

impl FsTemplateLoader {
    /// Create a loader resolving paths against `root`
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Directory paths are resolved against
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl TemplateLoader for FsTemplateLoader {
    async fn load(&self, path: &str) -> Result<String, TemplateError> {
        let full_path = self.root.join(path.trim_start_matches('/'));
        debug!("Loading template from {}", full_path.display());

        match tokio::fs::read_to_string(&full_path).await {
            Ok(markup) => Ok(markup),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(TemplateError::NotFound {
                path: path.to_string(),
            }),
            Err(source) => Err(TemplateError::Io {
                path: path.to_string(),
                source,
            }),
        }
    }
}

/// Loads templates over HTTP relative to a base URL
#[derive(Debug, Clone)]
pub struct HttpTemplateLoader {
    client: reqwest::Client,
    base: Url,
}

impl HttpTemplateLoader {
    /// Create a loader resolving paths against `base`
    pub fn new(base: &str) -> Result<Self, TemplateError> {
        // A base without a trailing slash would have its last segment replaced on join
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        };
        let base = Url::parse(&normalized).map_err(|_| TemplateError::InvalidBase {
            base: base.to_string(),
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            base,
        })
    }

    /// Absolute URL a template path resolves to
    pub fn resolve(&self, path: &str) -> Result<Url, TemplateError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| TemplateError::Network {
                path: path.to_string(),
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl TemplateLoader for HttpTemplateLoader {
    async fn load(&self, path: &str) -> Result<String, TemplateError> {
        let url = self.resolve(path)?;
        debug!("Fetching template {}", url);

        let network = |e: reqwest::Error| TemplateError::Network {
            path: path.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TemplateError::Http {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(network)
    }
}

/// Serves templates from memory
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateLoader {
    templates: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryTemplateLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template
    pub fn with_template(self, path: impl Into<String>, markup: impl Into<String>) -> Self {
        self.insert(path, markup);
        self
    }

    /// Add or replace a template
    pub fn insert(&self, path: impl Into<String>, markup: impl Into<String>) {
        let mut templates = self
            .templates
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        templates.insert(path.into(), markup.into());
    }
}

#[async_trait]
impl TemplateLoader for MemoryTemplateLoader {
    async fn load(&self, path: &str) -> Result<String, TemplateError> {
        let templates = self
            .templates
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        templates
            .get(path)
            .cloned()
            .ok_or_else(|| TemplateError::NotFound {
                path: path.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_fs_loader_reads_relative_to_root() {
        let temp_dir = tempdir().unwrap();
        let html_dir = temp_dir.path().join("assets").join("html");
        std::fs::create_dir_all(&html_dir).unwrap();
        std::fs::write(html_dir.join("settings.html"), "<form></form>").unwrap();

        let loader = FsTemplateLoader::new(temp_dir.path());
        let markup = loader.load("assets/html/settings.html").await.unwrap();
        assert_eq!(markup, "<form></form>");
    }

    #[tokio::test]
    async fn test_fs_loader_missing_file() {
        let temp_dir = tempdir().unwrap();
        let loader = FsTemplateLoader::new(temp_dir.path());

        let err = loader.load("assets/html/missing.html").await.unwrap_err();
        assert!(matches!(err, TemplateError::NotFound { ref path } if path == "assets/html/missing.html"));
    }

    #[test]
    fn test_http_loader_resolves_against_base() {
        let loader = HttpTemplateLoader::new("http://localhost:8080/app").unwrap();
        let url = loader.resolve("assets/html/settings.html").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/app/assets/html/settings.html"
        );
    }

    #[test]
    fn test_http_loader_rejects_bad_base() {
        assert!(matches!(
            HttpTemplateLoader::new("not a url"),
            Err(TemplateError::InvalidBase { .. })
        ));
    }

    #[tokio::test]
    async fn test_memory_loader() {
        let loader = MemoryTemplateLoader::new().with_template("a.html", "<p>A</p>");
        assert_eq!(loader.load("a.html").await.unwrap(), "<p>A</p>");
        assert!(loader.load("b.html").await.is_err());
    }
}
