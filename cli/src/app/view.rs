//! Terminal rendering of the navigator's document

use super::chrome::HIDDEN_ATTRIBUTE;
use colored::Colorize;
use pagenav_core::navigator::{link_target, ACTIVE_CLASS};
use pagenav_core::page::PageContent;
use pagenav_core::{Navigator, PageRegistry};

/// Title, location and content of the current page
pub fn render_page(navigator: &Navigator) -> String {
    let document = navigator.document();
    let config = navigator.config();
    let content = document
        .region_markup(&config.content_area)
        .unwrap_or_default();

    let title = document.title();
    let title = if title.is_empty() {
        "(untitled)".dimmed().to_string()
    } else {
        title.bold().to_string()
    };

    format!(
        "{} {}\n{}\n{}",
        title,
        document.location_fragment().cyan(),
        render_links(navigator),
        content.trim()
    )
}

/// The navigation bar, active links highlighted
pub fn render_links(navigator: &Navigator) -> String {
    navigator
        .document()
        .elements()
        .iter()
        .filter(|element| !element.has_attr(HIDDEN_ATTRIBUTE))
        .map(|element| {
            if element.has_class(ACTIVE_CLASS) {
                format!("[{}]", element.text).green().bold().to_string()
            } else {
                format!(" {} ", element.text)
            }
        })
        .collect::<Vec<_>>()
        .join(&"|".dimmed().to_string())
}

/// Every chrome link with its index, target and state
pub fn render_link_table(navigator: &Navigator) -> String {
    let config = navigator.config();
    navigator
        .document()
        .elements()
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let target = link_target(element, &config.link_attribute)
                .map(|key| key.to_string())
                .unwrap_or_default();
            let mut line = format!("{:>2}. {:<10} -> {}", index + 1, element.text, target);
            if let Some(group) = element.attr(&config.group_attribute) {
                line.push_str(&format!(" (group {})", group));
            }
            if element.has_attr(HIDDEN_ATTRIBUTE) {
                line.push_str(" hidden");
            }
            if element.has_class(ACTIVE_CLASS) {
                line.green().to_string()
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Session history, the active entry marked
pub fn render_history(navigator: &Navigator) -> String {
    let (entries, index) = navigator.document().history_entries();
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let fragment = if entry.fragment.is_empty() {
                "(empty)".to_string()
            } else {
                entry.fragment.clone()
            };
            let state = if entry.state.is_some() { "" } else { " (no state)" };
            if i == index {
                format!("{} {}{}", ">".green().bold(), fragment.green(), state)
            } else {
                format!("  {}{}", fragment, state)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Registered pages
pub fn render_routes(registry: &PageRegistry, landing_page: &str) -> String {
    registry
        .keys()
        .into_iter()
        .filter_map(|key| registry.get(key.as_str()).map(|page| (key, page)))
        .map(|(key, page)| {
            let source = match &page.content {
                PageContent::Inline(_) => "inline".to_string(),
                PageContent::External(path) => format!("template {}", path),
            };
            let marker = if key.as_str() == landing_page {
                " (landing)".yellow().to_string()
            } else {
                String::new()
            };
            format!(
                "{} {:<14} {}{}",
                format!("{:<20}", key).bold(),
                page.title,
                source.dimmed(),
                marker
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
