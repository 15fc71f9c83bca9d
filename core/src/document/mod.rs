//! In-process document model
//!
//! Stands in for the browser document the navigator drives: content regions
//! addressed by selector, the title, navigation chrome elements, the session
//! history behind the address bar, click listeners and the document-scoped
//! event bus. [`Document`] is a cheap, cloneable handle.

pub mod element;
pub mod host;

pub use element::{ClickEvent, ClickListener, Element};
pub use host::{ContentHost, ContentRegion};

use crate::events::{DocumentEvent, EventBus, EventReceiver, NavigationRequest, PopStateEvent};
use crate::history::{HistoryEntry, SessionHistory};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub(crate) struct DocumentInner {
    pub(crate) title: String,
    pub(crate) regions: BTreeMap<String, String>,
    pub(crate) elements: Vec<Element>,
    pub(crate) history: SessionHistory,
    pub(crate) click_listeners: Vec<Arc<dyn ClickListener>>,
}

/// Shared handle to a document
#[derive(Clone)]
pub struct Document {
    inner: Arc<Mutex<DocumentInner>>,
    bus: EventBus,
}

impl Document {
    /// Create a document whose address bar shows `location_fragment`
    pub fn new(location_fragment: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(DocumentInner {
                title: String::new(),
                regions: BTreeMap::new(),
                elements: Vec::new(),
                history: SessionHistory::new(location_fragment),
                click_listeners: Vec::new(),
            })),
            bus: EventBus::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DocumentInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add an empty region addressable by `selector`
    pub fn with_region(self, selector: impl Into<String>) -> Self {
        self.lock().regions.insert(selector.into(), String::new());
        self
    }

    /// Add a navigation chrome element
    pub fn with_element(self, element: Element) -> Self {
        self.lock().elements.push(element);
        self
    }

    /// Resolve a region by selector
    pub fn region(&self, selector: &str) -> Option<ContentRegion> {
        let exists = self.lock().regions.contains_key(selector);
        exists.then(|| ContentRegion::new(selector.to_string(), Arc::clone(&self.inner)))
    }

    /// Markup of a region, if it exists
    pub fn region_markup(&self, selector: &str) -> Option<String> {
        self.lock().regions.get(selector).cloned()
    }

    /// Current document title
    pub fn title(&self) -> String {
        self.lock().title.clone()
    }

    /// Set the document title
    pub fn set_title(&self, title: impl Into<String>) {
        self.lock().title = title.into();
    }

    /// Snapshot of the chrome elements
    pub fn elements(&self) -> Vec<Element> {
        self.lock().elements.clone()
    }

    /// Mutate the chrome elements in place
    pub fn update_elements<R>(&self, f: impl FnOnce(&mut [Element]) -> R) -> R {
        f(&mut self.lock().elements)
    }

    /// Elements currently carrying `class`
    pub fn elements_with_class(&self, class: &str) -> Vec<Element> {
        self.lock()
            .elements
            .iter()
            .filter(|element| element.has_class(class))
            .cloned()
            .collect()
    }

    /// Fragment shown in the address bar, including the marker
    pub fn location_fragment(&self) -> String {
        self.lock().history.current().fragment.clone()
    }

    /// Number of session history entries
    pub fn history_len(&self) -> usize {
        self.lock().history.len()
    }

    /// Snapshot of the session history and the active index
    pub fn history_entries(&self) -> (Vec<HistoryEntry>, usize) {
        let inner = self.lock();
        (inner.history.entries().to_vec(), inner.history.index())
    }

    /// State stored with the active history entry
    pub fn history_state(&self) -> Option<serde_json::Value> {
        self.lock().history.current().state.clone()
    }

    /// Add a history entry
    pub fn push_state(&self, state: serde_json::Value, fragment: &str) {
        self.lock().history.push_state(state, fragment);
    }

    /// Rewrite the active history entry
    pub fn replace_state(&self, state: serde_json::Value, fragment: &str) {
        self.lock().history.replace_state(state, fragment);
    }

    /// Browser back button. Returns false when there is nothing to go back to.
    pub fn back(&self) -> bool {
        self.go(-1)
    }

    /// Browser forward button
    pub fn forward(&self) -> bool {
        self.go(1)
    }

    /// Move through history and fire popstate if the entry changed
    pub fn go(&self, delta: isize) -> bool {
        let event = self.lock().history.go(delta);
        self.fire_popstate(event)
    }

    /// User edits the fragment in the address bar
    pub fn edit_location_fragment(&self, fragment: &str) -> bool {
        let event = self.lock().history.edit_fragment(fragment);
        self.fire_popstate(event)
    }

    fn fire_popstate(&self, event: Option<PopStateEvent>) -> bool {
        match event {
            Some(event) => {
                self.bus.dispatch(DocumentEvent::PopState(event));
                true
            }
            None => false,
        }
    }

    /// Register a click listener
    pub fn add_click_listener(&self, listener: Arc<dyn ClickListener>) {
        self.lock().click_listeners.push(listener);
    }

    /// Deliver a click. Returns true when a listener prevented the default action.
    pub fn click(&self, event: &ClickEvent) -> bool {
        let listeners = self.lock().click_listeners.clone();
        let mut prevented = false;
        for listener in listeners {
            prevented |= listener.handle_click(event);
        }
        prevented
    }

    /// The document event bus
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Dispatch an event on the document bus
    pub fn dispatch(&self, event: DocumentEvent) -> usize {
        self.bus.dispatch(event)
    }

    /// Request navigation through the document bus
    pub fn request_navigation(&self, request: NavigationRequest) -> usize {
        self.dispatch(DocumentEvent::Navigate(request))
    }

    /// Subscribe to document events
    pub fn subscribe(&self) -> EventReceiver {
        self.bus.subscribe()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("")
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("Document")
            .field("title", &inner.title)
            .field("regions", &inner.regions.keys().collect::<Vec<_>>())
            .field("elements", &inner.elements.len())
            .field("history", &inner.history.len())
            .finish()
    }
}
