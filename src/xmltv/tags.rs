//! Namespace-aware tag resolution and child lookup helpers
//!
//! XMLTV feeds sometimes declare a default namespace on `<tv>`. Every stage
//! builds its element names through [`tag_qualifier`] so lookups and newly
//! created elements land in the root's namespace either way.

use crate::xmltv::document::{Element, QName};

pub const PROGRAMME: &str = "programme";
pub const CATEGORY: &str = "category";
pub const EPISODE_NUM: &str = "episode-num";
pub const DESC: &str = "desc";

/// The only episode numbering system the stages read or write
pub const XMLTV_NS: &str = "xmltv_ns";

/// Returns a closure qualifying local names with the namespace of `root`
///
/// With an unnamespaced root the closure yields bare local names.
pub fn tag_qualifier(root: &QName) -> impl Fn(&str) -> QName + '_ {
    move |local: &str| root.sibling(local)
}

/// Index of the first item matching `predicate`, in sequence order
pub fn position_of_first<T, P>(items: &[T], predicate: P) -> Option<usize>
where
    P: FnMut(&T) -> bool,
{
    items.iter().position(predicate)
}

/// Whether `element` is an `episode-num` in the `xmltv_ns` system
///
/// The system attribute is trimmed and compared case-insensitively.
pub fn is_xmltv_ns_episode(element: &Element, episode_num: &QName) -> bool {
    &element.name == episode_num
        && element
            .attribute("system")
            .is_some_and(|system| system.trim().eq_ignore_ascii_case(XMLTV_NS))
}

/// Index of the programme's first direct `xmltv_ns` episode-num child
pub fn find_xmltv_ns_episode(programme: &Element, episode_num: &QName) -> Option<usize> {
    position_of_first(&programme.children, |child| {
        is_xmltv_ns_episode(child, episode_num)
    })
}

/// A fresh `<episode-num system="xmltv_ns">` carrying `value`
pub fn new_xmltv_ns_episode(episode_num: &QName, value: &str) -> Element {
    Element::new(episode_num.clone())
        .with_attribute("system", XMLTV_NS)
        .with_text(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifier_unnamespaced_root() {
        let root = QName::local("tv");
        let qualify = tag_qualifier(&root);

        assert_eq!(qualify(PROGRAMME), QName::local("programme"));
        assert_eq!(qualify(EPISODE_NUM).to_string(), "episode-num");
    }

    #[test]
    fn test_qualifier_inherits_namespace_and_prefix() {
        let root = QName::namespaced("urn:xmltv", Some("x".to_string()), "tv");
        let qualify = tag_qualifier(&root);
        let category = qualify(CATEGORY);

        assert_eq!(category.to_string(), "{urn:xmltv}category");
        assert_eq!(category.raw_name(), "x:category");
        assert_ne!(category, QName::local("category"));
    }

    #[test]
    fn test_position_of_first_returns_earliest_match() {
        let values = [3, 8, 10, 12];
        assert_eq!(position_of_first(&values, |v| v % 2 == 0), Some(1));
        assert_eq!(position_of_first(&values, |v| *v > 100), None);
        assert_eq!(position_of_first::<i32, _>(&[], |_| true), None);
    }

    #[test]
    fn test_system_match_is_trimmed_and_case_insensitive() {
        let name = QName::local("episode-num");
        let loose = Element::new(name.clone()).with_attribute("system", "  XMLTV_NS ");
        let other = Element::new(name.clone()).with_attribute("system", "onscreen");
        let missing = Element::new(name.clone());

        assert!(is_xmltv_ns_episode(&loose, &name));
        assert!(!is_xmltv_ns_episode(&other, &name));
        assert!(!is_xmltv_ns_episode(&missing, &name));
    }

    #[test]
    fn test_find_first_xmltv_ns_episode_by_document_order() {
        let name = QName::local("episode-num");
        let mut programme = Element::new(QName::local("programme"));
        programme.append(Element::new(name.clone()).with_attribute("system", "dd_progid"));
        programme.append(new_xmltv_ns_episode(&name, "1.2."));
        programme.append(new_xmltv_ns_episode(&name, "3.4."));

        let index = find_xmltv_ns_episode(&programme, &name).unwrap();
        assert_eq!(programme.children[index].text(), "1.2.");
    }
}
