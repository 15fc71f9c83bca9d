//! Document elements and click events

use std::collections::{BTreeMap, BTreeSet};

/// An element of the navigation chrome
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name, e.g. `a` or `li`
    pub tag: String,
    /// Text label
    pub text: String,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
}

impl Element {
    /// Create an element with the given tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set the text label
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add a class
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Check whether an attribute is present
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Check whether a class is set
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Add or remove a class
    pub fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
    }

    /// All classes, sorted
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }
}

/// A click, delivered as its propagation path
#[derive(Debug, Clone, Default)]
pub struct ClickEvent {
    /// Clicked element first, then its ancestors
    pub path: Vec<Element>,
}

impl ClickEvent {
    /// Click on a single element with no interesting ancestors
    pub fn on(element: Element) -> Self {
        Self {
            path: vec![element],
        }
    }

    /// Nearest element on the path carrying `attribute`
    pub fn closest(&self, attribute: &str) -> Option<&Element> {
        self.path.iter().find(|element| element.has_attr(attribute))
    }
}

/// Synchronous click listener registered on a document
pub trait ClickListener: Send + Sync {
    /// Handle a click. Returns true when the default action was prevented.
    fn handle_click(&self, event: &ClickEvent) -> bool;
}
