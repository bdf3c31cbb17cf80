//! Quick-XML based document parser
//!
//! Builds the full [`Document`] tree from decoded XMLTV text. Namespace
//! prefixes are resolved against the `xmlns` declarations in scope so that
//! element names compare by URI, while the declarations themselves stay in
//! the attribute lists and serialize back unchanged.
//!
//! Comments, processing instructions, the XML declaration and any DOCTYPE are
//! not part of the tree. CDATA sections become plain text.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::errors::{XmlError, XmlResult};
use crate::xmltv::document::{Document, Element, QName, namespace_declaration};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// One element's `xmlns` declarations: `(prefix, uri)`, `None` prefix is the default namespace
type NamespaceScope = Vec<(Option<String>, String)>;

/// Parse XMLTV text into a document tree
pub fn parse_document(content: &str) -> XmlResult<Document> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(false);

    let mut builder = TreeBuilder::default();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| XmlError::syntax(e, reader.error_position()))?;

        match event {
            Event::Start(ref e) => {
                let element = builder.open_element(e)?;
                builder.stack.push(element);
            }
            Event::Empty(ref e) => {
                let element = builder.open_element(e)?;
                builder.scopes.pop();
                builder.attach(element)?;
            }
            Event::End(_) => {
                if let Some(element) = builder.stack.pop() {
                    builder.scopes.pop();
                    builder.attach(element)?;
                }
            }
            Event::Text(ref e) => {
                let raw = std::str::from_utf8(e)
                    .map_err(|e| XmlError::syntax(e, reader.buffer_position()))?;
                let text = unescape(raw).map_err(|e| XmlError::Escape(e.to_string()))?;
                builder.push_text(&text)?;
            }
            Event::CData(ref e) => {
                let text = std::str::from_utf8(e)
                    .map_err(|e| XmlError::syntax(e, reader.buffer_position()))?;
                builder.push_text(text)?;
            }
            Event::GeneralRef(ref e) => {
                let name = std::str::from_utf8(e)
                    .map_err(|e| XmlError::syntax(e, reader.buffer_position()))?;
                let reference = format!("&{name};");
                let text = unescape(&reference).map_err(|e| XmlError::Escape(e.to_string()))?;
                builder.push_text(&text)?;
            }
            Event::Eof => break,
            _ => {} // declaration, doctype, comments, processing instructions
        }
    }

    builder.finish()
}

#[derive(Default)]
struct TreeBuilder {
    root: Option<Element>,
    stack: Vec<Element>,
    scopes: Vec<NamespaceScope>,
}

impl TreeBuilder {
    /// Create the element for a start (or empty) tag and push its namespace scope
    fn open_element(&mut self, start: &BytesStart) -> XmlResult<Element> {
        let raw_name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| XmlError::syntax(e, 0))?
            .to_string();

        if self.stack.is_empty()
            && let Some(root) = &self.root
        {
            debug!("Second root <{}> after <{}>", raw_name, root.name);
            return Err(XmlError::MultipleRoots { name: raw_name });
        }

        let mut attributes = Vec::new();
        let mut scope = NamespaceScope::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| XmlError::syntax(e, 0))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| XmlError::syntax(e, 0))?
                .to_string();
            let raw_value = std::str::from_utf8(&attr.value).map_err(|e| XmlError::syntax(e, 0))?;
            let value = unescape(raw_value)
                .map_err(|e| XmlError::Escape(e.to_string()))?
                .into_owned();

            if let Some(prefix) = namespace_declaration(&key) {
                scope.push((prefix.map(str::to_string), value.clone()));
            }
            attributes.push((key, value));
        }
        self.scopes.push(scope);

        let name = self.resolve(&raw_name)?;
        Ok(Element {
            name,
            attributes,
            text: None,
            tail: None,
            children: Vec::new(),
        })
    }

    fn resolve(&self, raw_name: &str) -> XmlResult<QName> {
        let (prefix, local) = match raw_name.split_once(':') {
            Some((prefix, local)) => (Some(prefix), local),
            None => (None, raw_name),
        };

        if prefix == Some("xml") {
            return Ok(QName::namespaced(XML_NAMESPACE, Some("xml".to_string()), local));
        }

        let declared = self
            .scopes
            .iter()
            .rev()
            .flat_map(|scope| scope.iter())
            .find(|(declared_prefix, _)| declared_prefix.as_deref() == prefix)
            .map(|(_, uri)| uri.as_str());

        match (prefix, declared) {
            // xmlns="" undeclares the default namespace
            (None, Some("")) | (None, None) => Ok(QName::local(local)),
            (_, Some(uri)) => Ok(QName::namespaced(uri, prefix.map(str::to_string), local)),
            (Some(prefix), None) => Err(XmlError::UnboundPrefix {
                prefix: prefix.to_string(),
                name: raw_name.to_string(),
            }),
        }
    }

    /// Attach a completed element to its parent, or make it the root
    fn attach(&mut self, element: Element) -> XmlResult<()> {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None => {
                if self.root.is_some() {
                    return Err(XmlError::MultipleRoots {
                        name: element.name.raw_name(),
                    });
                }
                self.root = Some(element);
            }
        }
        Ok(())
    }

    fn push_text(&mut self, text: &str) -> XmlResult<()> {
        let Some(current) = self.stack.last_mut() else {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(XmlError::TextOutsideRoot);
        };

        let slot = match current.children.last_mut() {
            Some(last_child) => &mut last_child.tail,
            None => &mut current.text,
        };
        slot.get_or_insert_with(String::new)
            .push_str(&normalize_line_endings(text));
        Ok(())
    }

    fn finish(self) -> XmlResult<Document> {
        if let Some(open) = self.stack.first() {
            return Err(XmlError::Syntax {
                message: format!("Unclosed element <{}>", open.name.raw_name()),
                position: 0,
            });
        }
        self.root.map(Document::new).ok_or(XmlError::MissingRoot)
    }
}

/// `\r\n` and lone `\r` become `\n`, as XML end-of-line handling requires
fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}
