//! # pagenav Core
//!
//! Core library for pagenav - a hash-routed page navigator.
//!
//! This library provides the building blocks of a single-document
//! application shell: a registry of pages, a navigator that renders them into
//! a content area while keeping the URL fragment, session history, title and
//! navigation links in step, and a small record store for page data.

// Core modules
pub mod config;
pub mod document;
pub mod error;
pub mod events;
pub mod history;
pub mod navigator;
pub mod page;
pub mod route;
pub mod store;
pub mod template;

// Re-export commonly used types
pub use config::NavigatorConfig;
pub use document::{ClickEvent, ContentHost, Document, Element};
pub use error::{Error, Result};
pub use events::{DocumentEvent, EventBus, NavigationRequest};
pub use navigator::{HistoryMode, Lifecycle, NavigationOutcome, Navigator, NavigatorBuilder};
pub use page::{PageDefinition, PageRegistry, PageSetup, SetupContext};
pub use route::{NavigationParams, PageKey};
pub use store::{Record, RecordStore};
pub use template::{FsTemplateLoader, HttpTemplateLoader, MemoryTemplateLoader, TemplateLoader};

/// Current version of the pagenav-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log filter used when `RUST_LOG` is not set
pub fn default_log_filter(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}

/// Initialize tracing on stderr
///
/// `RUST_LOG` takes precedence over the debug flag.
pub fn init_tracing_with_debug(debug: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_log_filter(debug)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
