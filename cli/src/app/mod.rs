//! The game collection shell
//!
//! Wires the shell pages, the navigation chrome, the record store and the
//! template source into a [`Navigator`].

pub mod chrome;
pub mod library;
pub mod pages;
pub mod seed;
pub mod settings;
pub mod stats;
pub mod view;

use crate::config::{ResolvedConfig, TemplateSource};
use anyhow::{Context, Result};
use chrome::chrome_document;
use pages::shell_pages;
use pagenav_core::store::FileStorage;
use pagenav_core::{
    FsTemplateLoader, HistoryMode, HttpTemplateLoader, NavigationOutcome, Navigator, RecordStore,
    TemplateLoader,
};
use std::sync::Arc;
use tracing::debug;

/// A navigator over the shell pages and the store they read from
pub struct App {
    pub navigator: Arc<Navigator>,
    pub store: RecordStore,
}

impl App {
    /// Build the shell with the configured file store, opened at `location`
    pub fn build(config: &ResolvedConfig, location: &str) -> Result<Self> {
        debug!("Using record store at {}", config.store_path.display());
        let store = RecordStore::new(Arc::new(FileStorage::new(&config.store_path)));
        Self::with_store(config, location, store)
    }

    /// Build the shell over an existing store
    pub fn with_store(config: &ResolvedConfig, location: &str, store: RecordStore) -> Result<Self> {
        let loader = template_loader(&config.templates)?;
        let navigator = Navigator::builder()
            .config(config.navigator.clone())
            .registry(shell_pages(store.clone(), &config.navigator))
            .document(chrome_document(&config.navigator, location))
            .loader(loader)
            .build()
            .context("Failed to build navigator")?;

        Ok(Self {
            navigator: Arc::new(navigator),
            store,
        })
    }

    /// Render the current page again, in place, after its data changed
    ///
    /// Returns `None` when no page is showing.
    pub async fn refresh(&self) -> Result<Option<NavigationOutcome>> {
        let Some(current) = self.navigator.current() else {
            return Ok(None);
        };
        let outcome = self
            .navigator
            .navigate_to(current.page_key, current.params, HistoryMode::Replace)
            .await?;
        Ok(Some(outcome))
    }
}

/// Loader for the configured template source
pub fn template_loader(source: &TemplateSource) -> Result<Arc<dyn TemplateLoader>> {
    Ok(match source {
        TemplateSource::Directory(root) => {
            debug!("Loading templates from {}", root.display());
            Arc::new(FsTemplateLoader::new(root))
        }
        TemplateSource::Http(base) => {
            debug!("Fetching templates from {}", base);
            Arc::new(HttpTemplateLoader::new(base).context("Invalid template base URL")?)
        }
    })
}
