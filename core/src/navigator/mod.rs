//! Page navigator
//!
//! Owns the current page, renders pages into the content host and keeps the
//! URL fragment, session history, document title and active links in step
//! with what is displayed. Every navigation path (initial load, link clicks,
//! navigation requests, back/forward) funnels into [`Navigator::navigate_to`].

pub mod click;
pub mod links;

#[cfg(test)]
mod tests;

pub use click::ClickInterceptor;
pub use links::{link_target, sync_active_links, ACTIVE_CLASS};

use crate::config::NavigatorConfig;
use crate::document::{ContentHost, Document};
use crate::error::{NavigatorError, Result};
use crate::events::{DocumentEvent, EventReceiver};
use crate::history::HistoryState;
use crate::page::{PageContent, PageDefinition, PageRegistry, SetupContext};
use crate::route::{decode_fragment, encode_fragment, NavigationParams, PageKey};
use crate::template::{FsTemplateLoader, TemplateLoader};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, error, info, warn};

/// Lifecycle of a navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, listeners not attached
    Idle,
    /// Listening, first page resolved
    Ready,
}

/// The page currently displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub page_key: PageKey,
    pub params: NavigationParams,
}

/// How a navigation records itself in session history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// Add a new entry (forward navigation)
    Push,
    /// Rewrite the active entry (resume and back/forward replays)
    Replace,
}

impl HistoryMode {
    /// Mode for a `record_to_history` flag
    pub fn from_record(record_to_history: bool) -> Self {
        if record_to_history {
            Self::Push
        } else {
            Self::Replace
        }
    }
}

/// What a navigation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The page was rendered. `degraded` is set when its template failed to
    /// load and an inline error was shown instead.
    Rendered { page_key: PageKey, degraded: bool },
    /// The key is not registered; nothing changed
    UnknownRoute(PageKey),
    /// A newer navigation started while this one was suspended; its remaining
    /// side effects were discarded
    Superseded,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Escape text for element content and quoted attribute values
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Inline fragment shown in place of a page whose template failed to load
pub fn load_error_fragment(message: &str) -> String {
    format!(
        r#"<p class="page-error" style="color:red;">Error loading page: {}</p>"#,
        escape_html(message)
    )
}

/// Hash-routed page navigator
pub struct Navigator {
    config: NavigatorConfig,
    registry: PageRegistry,
    document: Document,
    host: Arc<dyn ContentHost>,
    loader: Arc<dyn TemplateLoader>,
    lifecycle: Mutex<Lifecycle>,
    state: Mutex<Option<NavigationState>>,
    sequence: AtomicU64,
    events: tokio::sync::Mutex<Option<EventReceiver>>,
}

impl Navigator {
    /// Create a navigator. Validates the configuration against the registry
    /// and the document.
    pub fn new(
        config: NavigatorConfig,
        registry: PageRegistry,
        document: Document,
        loader: Arc<dyn TemplateLoader>,
    ) -> Result<Self> {
        config.validate()?;

        if registry.is_empty() {
            return Err(NavigatorError::NoPages.into());
        }
        if !registry.contains(&config.landing_page) {
            return Err(NavigatorError::LandingPageMissing(config.landing_page.clone()).into());
        }
        let host = document
            .region(&config.content_area)
            .ok_or_else(|| NavigatorError::ContentAreaMissing(config.content_area.clone()))?;

        Ok(Self {
            config,
            registry,
            document,
            host: Arc::new(host),
            loader,
            lifecycle: Mutex::new(Lifecycle::Idle),
            state: Mutex::new(None),
            sequence: AtomicU64::new(0),
            events: tokio::sync::Mutex::new(None),
        })
    }

    /// Start building a navigator
    pub fn builder() -> NavigatorBuilder {
        NavigatorBuilder::new()
    }

    /// Navigator configuration
    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Page registry
    pub fn registry(&self) -> &PageRegistry {
        &self.registry
    }

    /// The document this navigator drives
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Current lifecycle state
    pub fn lifecycle(&self) -> Lifecycle {
        *lock(&self.lifecycle)
    }

    /// The page currently displayed, if any navigation has completed
    pub fn current(&self) -> Option<NavigationState> {
        lock(&self.state).clone()
    }

    /// Key of the page currently displayed
    pub fn current_page_key(&self) -> Option<PageKey> {
        lock(&self.state).as_ref().map(|state| state.page_key.clone())
    }

    /// Attach listeners and show the first page
    ///
    /// The URL fragment, when present, is resumed in place; otherwise the
    /// landing page is shown. Either way session history does not grow.
    /// Calling this twice is an error.
    pub async fn initialize(&self) -> Result<NavigationOutcome> {
        {
            let mut lifecycle = lock(&self.lifecycle);
            if *lifecycle != Lifecycle::Idle {
                return Err(NavigatorError::AlreadyInitialized.into());
            }
            *lifecycle = Lifecycle::Ready;
        }

        self.document.add_click_listener(Arc::new(ClickInterceptor::new(
            &self.config,
            &self.registry,
            self.document.bus().clone(),
        )));
        *self.events.lock().await = Some(self.document.subscribe());

        let fragment = self.document.location_fragment();
        info!(
            "Initializing navigator at '{}' ({} pages)",
            fragment,
            self.registry.len()
        );

        let (page_key, params) = self.resolve_location(&fragment);
        self.navigate_to(page_key, params, HistoryMode::Replace).await
    }

    /// Page key and parameters a URL fragment resolves to
    ///
    /// A fragment that names no page resolves to the landing page.
    pub fn resolve_location(&self, fragment: &str) -> (PageKey, NavigationParams) {
        let parsed = decode_fragment(fragment);
        let page_key = parsed
            .page_key
            .unwrap_or_else(|| PageKey::from(self.config.landing_page.as_str()));
        (page_key, parsed.params)
    }

    /// Navigate to a page
    ///
    /// Unknown keys are ignored. Template failures render an inline error and
    /// still complete the navigation. Setup failures propagate after the page
    /// markup has been injected, leaving history, title, links and state
    /// untouched.
    pub async fn navigate_to(
        &self,
        page_key: PageKey,
        params: NavigationParams,
        mode: HistoryMode,
    ) -> Result<NavigationOutcome> {
        let Some(page) = self.registry.get(page_key.as_str()) else {
            warn!("Ignoring navigation to unknown page '{}'", page_key);
            return Ok(NavigationOutcome::UnknownRoute(page_key));
        };

        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            "Navigation #{} to '{}' (record: {:?}, {:?})",
            ticket,
            page_key,
            params.record_id(),
            mode
        );

        let (markup, degraded) = self.resolve_markup(&page_key, page).await;
        if !self.is_latest(ticket) {
            debug!("Navigation #{} superseded before render", ticket);
            return Ok(NavigationOutcome::Superseded);
        }
        self.host.replace_contents(markup);

        if let Some(setup) = &page.setup {
            let ctx = SetupContext {
                page_key: page_key.clone(),
                record_id: params.record_id.clone(),
                host: Arc::clone(&self.host),
            };
            setup
                .setup(ctx)
                .await
                .map_err(|source| NavigatorError::Setup {
                    page: page_key.to_string(),
                    source,
                })?;
        }
        if !self.is_latest(ticket) {
            debug!("Navigation #{} superseded during setup", ticket);
            return Ok(NavigationOutcome::Superseded);
        }

        let fragment = encode_fragment(&page_key, &params);
        let history_state = HistoryState::new(page_key.clone(), params.clone()).to_value();
        match mode {
            HistoryMode::Push => self.document.push_state(history_state, &fragment),
            HistoryMode::Replace => self.document.replace_state(history_state, &fragment),
        }

        self.document.set_title(page.title.clone());
        self.sync_active_links(&page_key);

        *lock(&self.state) = Some(NavigationState {
            page_key: page_key.clone(),
            params,
        });
        info!("Showing '{}' at {}", page_key, fragment);

        Ok(NavigationOutcome::Rendered { page_key, degraded })
    }

    async fn resolve_markup(&self, page_key: &PageKey, page: &PageDefinition) -> (String, bool) {
        match &page.content {
            PageContent::Inline(markup) => (markup.clone(), false),
            PageContent::External(path) => {
                let full_path = self.config.template_path(path);
                match self.loader.load(&full_path).await {
                    Ok(markup) => (markup, false),
                    Err(e) => {
                        warn!("Template for '{}' failed to load: {}", page_key, e);
                        (load_error_fragment(&e.to_string()), true)
                    }
                }
            }
        }
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.sequence.load(Ordering::SeqCst) == ticket
    }

    fn sync_active_links(&self, page_key: &PageKey) {
        let active = self.document.update_elements(|elements| {
            sync_active_links(
                elements,
                page_key,
                &self.config.link_attribute,
                &self.config.group_attribute,
            )
        });
        debug!("{} navigation link(s) active for '{}'", active, page_key);
    }

    /// Handle one document event
    pub async fn handle_event(&self, event: DocumentEvent) -> Result<NavigationOutcome> {
        match event {
            DocumentEvent::Navigate(request) => {
                let params = request.params();
                self.navigate_to(request.page_key, params, HistoryMode::Push)
                    .await
            }
            DocumentEvent::PopState(event) => {
                let (page_key, params) =
                    match event.state.as_ref().and_then(HistoryState::from_value) {
                        Some(state) => (state.page_key, state.params),
                        None => {
                            debug!("Popstate without navigator state, re-reading the URL");
                            self.resolve_location(&self.document.location_fragment())
                        }
                    };
                self.navigate_to(page_key, params, HistoryMode::Replace)
                    .await
            }
        }
    }

    /// Handle every event queued since the last call
    ///
    /// Stops at, and returns, the first failing navigation; events after it
    /// stay queued. Fails with [`NavigatorError::EventLoopBusy`] while
    /// [`Navigator::run`] owns the queue.
    pub async fn process_pending(&self) -> Result<Vec<NavigationOutcome>> {
        let mut events = self
            .events
            .try_lock()
            .map_err(|_| NavigatorError::EventLoopBusy)?;
        let receiver = events.as_mut().ok_or(NavigatorError::NotInitialized)?;

        let mut outcomes = Vec::new();
        loop {
            match receiver.try_recv() {
                Ok(event) => outcomes.push(self.handle_event(event).await?),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        Ok(outcomes)
    }

    /// Handle events until the bus closes
    ///
    /// Failed navigations are logged and the loop keeps going. The event queue
    /// belongs to the loop for as long as it runs, so a second `run` or a
    /// `process_pending` fails with [`NavigatorError::EventLoopBusy`].
    pub async fn run(&self) -> Result<()> {
        let mut events = self
            .events
            .try_lock()
            .map_err(|_| NavigatorError::EventLoopBusy)?;
        let receiver = events.as_mut().ok_or(NavigatorError::NotInitialized)?;

        while let Some(event) = receiver.recv().await {
            if let Err(e) = self.handle_event(event).await {
                error!("Navigation failed: {}", e);
            }
        }
        debug!("Document bus closed, navigator loop stopped");
        Ok(())
    }

    /// Run the event loop on a background task
    pub fn spawn(self: &Arc<Self>) -> tokio::task::JoinHandle<Result<()>> {
        let navigator = Arc::clone(self);
        tokio::spawn(async move { navigator.run().await })
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("config", &self.config)
            .field("pages", &self.registry.len())
            .field("lifecycle", &self.lifecycle())
            .field("current", &self.current())
            .finish()
    }
}

/// Builder for navigators
pub struct NavigatorBuilder {
    config: NavigatorConfig,
    registry: PageRegistry,
    document: Option<Document>,
    loader: Option<Arc<dyn TemplateLoader>>,
}

impl NavigatorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: NavigatorConfig::default(),
            registry: PageRegistry::new(),
            document: None,
            loader: None,
        }
    }

    /// Use the given configuration
    pub fn config(mut self, config: NavigatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a page
    pub fn page(mut self, key: impl Into<PageKey>, page: PageDefinition) -> Self {
        self.registry = self.registry.add_page(key, page);
        self
    }

    /// Use a prepared registry, replacing any pages added so far
    pub fn registry(mut self, registry: PageRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set the landing page
    pub fn landing_page(mut self, key: impl Into<String>) -> Self {
        self.config = self.config.with_landing_page(key);
        self
    }

    /// Drive the given document
    pub fn document(mut self, document: Document) -> Self {
        self.document = Some(document);
        self
    }

    /// Load external templates with the given loader
    pub fn loader(mut self, loader: Arc<dyn TemplateLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Build the navigator
    ///
    /// Without a document, an empty one with just the content area is used;
    /// without a loader, templates are read relative to the working directory.
    pub fn build(self) -> Result<Navigator> {
        let document = self
            .document
            .unwrap_or_else(|| Document::default().with_region(self.config.content_area.clone()));
        let loader = self
            .loader
            .unwrap_or_else(|| Arc::new(FsTemplateLoader::new(".")) as Arc<dyn TemplateLoader>);
        Navigator::new(self.config, self.registry, document, loader)
    }
}

impl Default for NavigatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
