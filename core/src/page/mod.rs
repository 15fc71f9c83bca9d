//! Page definitions and the page registry
//!
//! A page is a title, its markup (inline or an external template reference)
//! and an optional setup procedure that wires the page once its markup is in
//! place.

pub mod definition;
pub mod registry;

// Re-export commonly used types
pub use definition::{setup_fn, PageContent, PageDefinition, PageSetup, SetupContext};
pub use registry::PageRegistry;
