//! Active-link synchronization

use crate::document::Element;
use crate::route::{decode_fragment, PageKey};

/// Class toggled on active navigation links
pub const ACTIVE_CLASS: &str = "active";

/// Page key a link points at, accepting both `key` and `#key` forms
pub fn link_target(element: &Element, link_attribute: &str) -> Option<PageKey> {
    let value = element.attr(link_attribute)?;
    decode_fragment(value.trim()).page_key
}

fn link_group<'a>(element: &'a Element, group_attribute: &str) -> Option<&'a str> {
    element
        .attr(group_attribute)
        .map(str::trim)
        .filter(|group| !group.is_empty())
}

/// Mark links active for `page_key` and return how many are active
///
/// A link is active when it targets `page_key` exactly, or when it shares a
/// non-empty group with the first link that does.
pub fn sync_active_links(
    elements: &mut [Element],
    page_key: &PageKey,
    link_attribute: &str,
    group_attribute: &str,
) -> usize {
    let active_group = elements
        .iter()
        .find(|element| link_target(element, link_attribute).as_ref() == Some(page_key))
        .and_then(|element| link_group(element, group_attribute))
        .map(str::to_string);

    let mut active = 0;
    for element in elements.iter_mut() {
        let Some(target) = link_target(element, link_attribute) else {
            continue;
        };
        let exact = &target == page_key;
        let grouped = active_group.is_some()
            && link_group(element, group_attribute) == active_group.as_deref();

        element.toggle_class(ACTIVE_CLASS, exact || grouped);
        if exact || grouped {
            active += 1;
        }
    }
    active
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = "data-page-target";
    const GROUP: &str = "data-active-group";

    fn link(target: &str, group: Option<&str>) -> Element {
        let element = Element::new("a").with_attr(LINK, target);
        match group {
            Some(group) => element.with_attr(GROUP, group),
            None => element,
        }
    }

    fn active_targets(elements: &[Element]) -> Vec<String> {
        elements
            .iter()
            .filter(|e| e.has_class(ACTIVE_CLASS))
            .filter_map(|e| e.attr(LINK).map(str::to_string))
            .collect()
    }

    #[test]
    fn test_exact_match_only() {
        let mut elements = vec![link("home", None), link("games", None)];
        let count = sync_active_links(&mut elements, &"games".into(), LINK, GROUP);
        assert_eq!(count, 1);
        assert_eq!(active_targets(&elements), vec!["games"]);
    }

    #[test]
    fn test_group_keeps_section_highlighted() {
        let mut elements = vec![
            link("dashboard", None),
            link("games-list", Some("library")),
            link("game-details", Some("library")),
            link("settings", None),
        ];

        sync_active_links(&mut elements, &"game-details".into(), LINK, GROUP);
        assert_eq!(active_targets(&elements), vec!["games-list", "game-details"]);

        sync_active_links(&mut elements, &"settings".into(), LINK, GROUP);
        assert_eq!(active_targets(&elements), vec!["settings"]);
    }

    #[test]
    fn test_empty_group_is_not_shared() {
        let mut elements = vec![link("a", Some("")), link("b", Some(""))];
        sync_active_links(&mut elements, &"a".into(), LINK, GROUP);
        assert_eq!(active_targets(&elements), vec!["a"]);
    }

    #[test]
    fn test_hash_form_targets_match() {
        let mut elements = vec![link("#games", None), link("#games?id=4", None)];
        let count = sync_active_links(&mut elements, &"games".into(), LINK, GROUP);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_unmatched_page_clears_everything() {
        let mut elements = vec![link("home", Some("main"))];
        elements[0].toggle_class(ACTIVE_CLASS, true);
        let count = sync_active_links(&mut elements, &"elsewhere".into(), LINK, GROUP);
        assert_eq!(count, 0);
        assert!(active_targets(&elements).is_empty());
    }
}
