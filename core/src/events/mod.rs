//! Document-scoped events
//!
//! Navigation is requested by dispatching a [`NavigationRequest`] on the
//! document's [`EventBus`]; the navigator is the only subscriber that acts on
//! it. Browser back/forward arrives on the same bus as a [`PopStateEvent`].
//!
//! Every subscriber gets its own unbounded queue, so events are never lost
//! while a subscriber is busy.

use crate::route::{NavigationParams, PageKey};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;
use tracing::debug;

/// Typed navigation request message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationRequest {
    pub page_key: PageKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

impl NavigationRequest {
    /// Request navigation to a page without a record
    pub fn new(page_key: impl Into<PageKey>) -> Self {
        Self {
            page_key: page_key.into(),
            record_id: None,
        }
    }

    /// Attach a record identifier
    pub fn with_record(mut self, record_id: impl Into<String>) -> Self {
        self.record_id = Some(record_id.into());
        self
    }

    /// Parameters carried by this request
    pub fn params(&self) -> NavigationParams {
        NavigationParams {
            record_id: self.record_id.clone(),
        }
    }
}

/// Browser back/forward notification
#[derive(Debug, Clone, PartialEq)]
pub struct PopStateEvent {
    /// State stored with the history entry that became current, if any
    pub state: Option<serde_json::Value>,
}

/// Events published on the document bus
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentEvent {
    /// Request to navigate to a page
    Navigate(NavigationRequest),
    /// The active history entry changed
    PopState(PopStateEvent),
}

/// Receiving end of a bus subscription
pub type EventReceiver = mpsc::UnboundedReceiver<DocumentEvent>;

/// Shared publish/subscribe channel scoped to one document
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<DocumentEvent>>>>,
}

impl EventBus {
    /// Create a bus with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to events dispatched from now on
    pub fn subscribe(&self) -> EventReceiver {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sender);
        receiver
    }

    /// Dispatch an event, returning how many subscribers saw it
    ///
    /// Dispatching with no subscribers is not an error; the event is dropped.
    /// Subscribers whose receiver is gone are detached.
    pub fn dispatch(&self, event: DocumentEvent) -> usize {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|sender| sender.send(event.clone()).is_ok());

        if subscribers.is_empty() {
            debug!("Dropping {:?}: no listeners attached", event);
        }
        subscribers.len()
    }

    /// Number of attached subscribers
    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|sender| !sender.is_closed());
        subscribers.len()
    }
}
