//! Delegated click interception
//!
//! Turns clicks on navigation links into [`NavigationRequest`]s published on
//! the document bus. The interceptor never navigates by itself.

use crate::config::NavigatorConfig;
use crate::document::{ClickEvent, ClickListener};
use crate::events::{DocumentEvent, EventBus, NavigationRequest};
use crate::page::PageRegistry;
use crate::route::{decode_fragment, PageKey, FRAGMENT_MARKER};
use std::collections::HashSet;
use tracing::debug;

/// Click listener that publishes navigation requests for internal links
#[derive(Debug, Clone)]
pub struct ClickInterceptor {
    link_attribute: String,
    record_id_attribute: String,
    known_pages: HashSet<PageKey>,
    bus: EventBus,
}

impl ClickInterceptor {
    /// Create an interceptor for the given configuration and pages
    pub fn new(config: &NavigatorConfig, registry: &PageRegistry, bus: EventBus) -> Self {
        Self {
            link_attribute: config.link_attribute.clone(),
            record_id_attribute: config.record_id_attribute.clone(),
            known_pages: registry.keys().into_iter().cloned().collect(),
            bus,
        }
    }

    /// Navigation request for a click, or `None` when the browser should
    /// handle it
    pub fn resolve(&self, event: &ClickEvent) -> Option<NavigationRequest> {
        let link = event.closest(&self.link_attribute)?;
        let target = link.attr(&self.link_attribute)?.trim();

        let mut request = if target.starts_with(FRAGMENT_MARKER) {
            let parsed = decode_fragment(target);
            NavigationRequest {
                page_key: parsed.page_key?,
                record_id: parsed.params.record_id,
            }
        } else if self.known_pages.contains(target) {
            NavigationRequest::new(target)
        } else {
            return None;
        };

        if let Some(record_id) = link.attr(&self.record_id_attribute) {
            request.record_id = Some(record_id.to_string());
        }
        Some(request)
    }
}

impl ClickListener for ClickInterceptor {
    fn handle_click(&self, event: &ClickEvent) -> bool {
        match self.resolve(event) {
            Some(request) => {
                debug!("Intercepted click for page '{}'", request.page_key);
                self.bus.dispatch(DocumentEvent::Navigate(request));
                true
            }
            None => false,
        }
    }
}
