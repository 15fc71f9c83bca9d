//! Page definition types

use crate::document::ContentHost;
use crate::error::SetupError;
use crate::route::PageKey;
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Markup source of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    /// Markup injected as-is
    Inline(String),
    /// Path of an external template, relative to the configured base path
    External(String),
}

/// Everything a setup procedure gets to work with
#[derive(Clone)]
pub struct SetupContext {
    /// Key of the page being set up
    pub page_key: PageKey,
    /// Record identifier from the navigation parameters
    pub record_id: Option<String>,
    /// The content host the page markup was injected into
    pub host: Arc<dyn ContentHost>,
}

impl SetupContext {
    /// Get the record identifier, if any
    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }
}

impl fmt::Debug for SetupContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetupContext")
            .field("page_key", &self.page_key)
            .field("record_id", &self.record_id)
            .field("host", &self.host.selector())
            .finish()
    }
}

/// Procedure run after a page's markup has been injected
#[async_trait]
pub trait PageSetup: Send + Sync {
    /// Wire up the page. Errors propagate to whoever requested the navigation.
    async fn setup(&self, ctx: SetupContext) -> Result<(), SetupError>;
}

struct FnSetup<F>(F);

#[async_trait]
impl<F, Fut> PageSetup for FnSetup<F>
where
    F: Fn(SetupContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), SetupError>> + Send + 'static,
{
    async fn setup(&self, ctx: SetupContext) -> Result<(), SetupError> {
        (self.0)(ctx).await
    }
}

/// Wrap an async closure as a [`PageSetup`]
pub fn setup_fn<F, Fut>(f: F) -> Arc<dyn PageSetup>
where
    F: Fn(SetupContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), SetupError>> + Send + 'static,
{
    Arc::new(FnSetup(f))
}

/// Static definition of a page
#[derive(Clone)]
pub struct PageDefinition {
    /// Document title while the page is active
    pub title: String,
    /// Markup source
    pub content: PageContent,
    /// Optional setup procedure
    pub setup: Option<Arc<dyn PageSetup>>,
}

impl PageDefinition {
    /// Create a page with inline markup
    pub fn inline(title: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: PageContent::Inline(markup.into()),
            setup: None,
        }
    }

    /// Create a page whose markup lives in an external template
    pub fn external(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: PageContent::External(path.into()),
            setup: None,
        }
    }

    /// Attach a setup procedure
    pub fn with_setup(mut self, setup: Arc<dyn PageSetup>) -> Self {
        self.setup = Some(setup);
        self
    }

    /// Attach an async closure as the setup procedure
    pub fn with_setup_fn<F, Fut>(self, f: F) -> Self
    where
        F: Fn(SetupContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), SetupError>> + Send + 'static,
    {
        self.with_setup(setup_fn(f))
    }
}

impl fmt::Debug for PageDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageDefinition")
            .field("title", &self.title)
            .field("content", &self.content)
            .field("setup", &self.setup.is_some())
            .finish()
    }
}
