//! In-memory XMLTV document tree
//!
//! The tree follows the text/tail layout: an element owns the text that
//! precedes its first child (`text`) and the text that follows its own end tag
//! (`tail`). Mutations are limited to appending children and rewriting text,
//! which is all the normalization stages need.

use std::fmt;

/// Namespace-qualified element name
///
/// Equality only considers the namespace URI and the local name; the prefix is
/// kept so that serialization reproduces the source's spelling.
#[derive(Debug, Clone)]
pub struct QName {
    namespace: Option<String>,
    prefix: Option<String>,
    local: String,
}

impl QName {
    /// Name without a namespace
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            namespace: None,
            prefix: None,
            local: local.into(),
        }
    }

    /// Name bound to `namespace`, written with `prefix` (or unprefixed when `None`)
    pub fn namespaced(
        namespace: impl Into<String>,
        prefix: Option<String>,
        local: impl Into<String>,
    ) -> Self {
        Self {
            namespace: Some(namespace.into()),
            prefix,
            local: local.into(),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn local_name(&self) -> &str {
        &self.local
    }

    /// Same namespace and prefix as `self`, different local name
    pub fn sibling(&self, local: &str) -> Self {
        Self {
            namespace: self.namespace.clone(),
            prefix: self.prefix.clone(),
            local: local.to_string(),
        }
    }

    /// Name as written in markup (`prefix:local` or `local`)
    pub fn raw_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local),
            None => self.local.clone(),
        }
    }
}

impl PartialEq for QName {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.local == other.local
    }
}

impl Eq for QName {}

/// Clark notation: `{uri}local`, or the bare local name
impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{{{namespace}}}{}", self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// Prefix declared by an `xmlns` attribute key: `Some(None)` for the default
/// namespace, `Some(Some(prefix))` for `xmlns:prefix`, `None` for other keys
pub fn namespace_declaration(key: &str) -> Option<Option<&str>> {
    if key == "xmlns" {
        Some(None)
    } else {
        key.strip_prefix("xmlns:").map(Some)
    }
}

/// A single element with its attributes, text and element children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: QName,
    /// Attributes in source order, keys as written (including `xmlns` declarations)
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub tail: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            text: None,
            tail: None,
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the value of `key`, or append it when missing
    pub fn set_attribute(&mut self, key: &str, value: &str) {
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((key.to_string(), value.to_string())),
        }
    }

    /// Leading text, empty when absent
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Append `child` at the end and return a handle to it
    pub fn append(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Direct children with the given name, in document order
    pub fn children_named<'a>(&'a self, name: &'a QName) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| &child.name == name)
    }

    /// First direct child with the given name
    pub fn find_child(&self, name: &QName) -> Option<&Element> {
        self.children.iter().find(|child| &child.name == name)
    }

    /// Visit every descendant named `name` in document order, at any depth
    ///
    /// Children appended by `visit` are not themselves visited when they are
    /// appended to the element being visited.
    pub fn visit_descendants_mut<F>(&mut self, name: &QName, visit: &mut F)
    where
        F: FnMut(&mut Element),
    {
        for child in self.children.iter_mut() {
            child.visit_subtree_mut(name, visit);
        }
    }

    fn visit_subtree_mut<F>(&mut self, name: &QName, visit: &mut F)
    where
        F: FnMut(&mut Element),
    {
        let existing = self.children.len();
        if &self.name == name {
            visit(self);
        }
        for child in self.children.iter_mut().take(existing) {
            child.visit_subtree_mut(name, visit);
        }
    }

    /// Count of descendants named `name`, at any depth
    pub fn count_descendants(&self, name: &QName) -> usize {
        self.children
            .iter()
            .map(|child| usize::from(&child.name == name) + child.count_descendants(name))
            .sum()
    }

    fn indent_children(&mut self, level: usize, space: &str) {
        if self.children.is_empty() {
            return;
        }
        let child_indentation = format!("\n{}", space.repeat(level + 1));
        if self.text().trim().is_empty() {
            self.text = Some(child_indentation.clone());
        }
        for child in self.children.iter_mut() {
            child.indent_children(level + 1, space);
            if child.tail.as_deref().unwrap_or("").trim().is_empty() {
                child.tail = Some(child_indentation.clone());
            }
        }
        if let Some(last) = self.children.last_mut()
            && last.tail.as_deref().unwrap_or("").trim().is_empty()
        {
            last.tail = Some(format!("\n{}", space.repeat(level)));
        }
    }
}

/// A parsed XMLTV document: exactly one root element
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Re-indent whitespace-only text so each nesting level sits on its own line
    ///
    /// Text that carries content is never touched, so leaf values such as
    /// descriptions survive unchanged.
    pub fn indent(&mut self, width: usize) {
        let space = " ".repeat(width);
        self.root.indent_children(0, &space);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn programme(start: &str) -> Element {
        Element::new(QName::local("programme")).with_attribute("start", start)
    }

    #[test]
    fn test_qname_equality_ignores_prefix() {
        let a = QName::namespaced("urn:tv", Some("tv".to_string()), "programme");
        let b = QName::namespaced("urn:tv", None, "programme");
        let c = QName::local("programme");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.raw_name(), "tv:programme");
        assert_eq!(b.raw_name(), "programme");
        assert_eq!(a.to_string(), "{urn:tv}programme");
        assert_eq!(c.to_string(), "programme");
    }

    #[test]
    fn test_set_attribute_replaces_existing() {
        let mut element = programme("20240101000000");
        element.set_attribute("start", "20240202000000");
        element.set_attribute("channel", "bbc1");

        assert_eq!(element.attribute("start"), Some("20240202000000"));
        assert_eq!(element.attribute("channel"), Some("bbc1"));
        assert_eq!(element.attributes.len(), 2);
    }

    #[test]
    fn test_visit_descendants_reaches_nested_elements() {
        let mut root = Element::new(QName::local("tv"));
        root.append(programme("1"));
        let mut wrapper = Element::new(QName::local("group"));
        wrapper.append(programme("2"));
        root.append(wrapper);

        let mut seen = Vec::new();
        root.visit_descendants_mut(&QName::local("programme"), &mut |p| {
            seen.push(p.attribute("start").unwrap_or_default().to_string());
        });

        assert_eq!(seen, vec!["1", "2"]);
        assert_eq!(root.count_descendants(&QName::local("programme")), 2);
    }

    #[test]
    fn test_visit_skips_children_appended_during_visit() {
        let mut root = Element::new(QName::local("tv"));
        root.append(Element::new(QName::local("programme")));
        let name = QName::local("programme");

        let mut visits = 0;
        root.visit_descendants_mut(&name, &mut |p| {
            visits += 1;
            p.append(Element::new(QName::local("programme")));
        });

        assert_eq!(visits, 1);
    }

    #[test]
    fn test_indent_leaves_leaf_text_alone() {
        let mut root = Element::new(QName::local("tv"));
        let prog = root.append(programme("1"));
        prog.append(Element::new(QName::local("title")).with_text("  News  "));
        let mut doc = Document::new(root);

        doc.indent(2);

        assert_eq!(doc.root.text.as_deref(), Some("\n  "));
        let prog = &doc.root.children[0];
        assert_eq!(prog.text.as_deref(), Some("\n    "));
        assert_eq!(prog.tail.as_deref(), Some("\n"));
        assert_eq!(prog.children[0].text(), "  News  ");
        assert_eq!(prog.children[0].tail.as_deref(), Some("\n  "));
    }
}
