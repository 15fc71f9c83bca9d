//! Navigation chrome of the shell document

use super::pages::{DASHBOARD_PAGE, DETAILS_PAGE, LIBRARY_PAGE, SETTINGS_PAGE};
use pagenav_core::{Document, Element, NavigatorConfig};

/// Active group shared by the library list and the detail page
pub const LIBRARY_GROUP: &str = "library";

/// Attribute marking chrome that is not shown in the link bar
pub const HIDDEN_ATTRIBUTE: &str = "hidden";

fn nav_link(config: &NavigatorConfig, label: &str, target: &str, group: Option<&str>) -> Element {
    let link = Element::new("a")
        .with_text(label)
        .with_class("nav-link")
        .with_attr(config.link_attribute.as_str(), target);
    match group {
        Some(group) => link.with_attr(config.group_attribute.as_str(), group),
        None => link,
    }
}

/// Links of the navigation bar, in display order
pub fn chrome_elements(config: &NavigatorConfig) -> Vec<Element> {
    vec![
        nav_link(config, "Dashboard", DASHBOARD_PAGE, None),
        nav_link(config, "Library", LIBRARY_PAGE, Some(LIBRARY_GROUP)),
        nav_link(config, "Settings", SETTINGS_PAGE, None),
        nav_link(config, "Details", DETAILS_PAGE, Some(LIBRARY_GROUP))
            .with_attr(HIDDEN_ATTRIBUTE, "true"),
    ]
}

/// A document with the content area and the navigation chrome, opened at
/// `location`
pub fn chrome_document(config: &NavigatorConfig, location: &str) -> Document {
    chrome_elements(config)
        .into_iter()
        .fold(
            Document::new(location).with_region(config.content_area.clone()),
            Document::with_element,
        )
}
