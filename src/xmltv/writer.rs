//! Document serialization
//!
//! Writes a [`Document`] back out as UTF-8 with an XML declaration. Element
//! names keep their source prefixes and attribute lists are written in their
//! original order, so namespace declarations round-trip untouched.
//!
//! Elements created by the stages carry the root's prefix. Where that prefix
//! is bound to a different URI at the insertion point, the element gets its
//! own `xmlns` declaration so it reparses into the intended namespace.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::errors::{XmlError, XmlResult};
use crate::xmltv::document::{Document, Element, QName, namespace_declaration};

/// In-scope `xmlns` bindings, innermost last: `(prefix, uri)`
type Bindings = Vec<(Option<String>, String)>;

/// Serialize `document` into a UTF-8 byte buffer
pub fn to_xml_bytes(document: &Document) -> XmlResult<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| XmlError::Serialize(e.to_string()))?;
    writer.get_mut().push(b'\n');

    write_element(&mut writer, &document.root, &mut Bindings::new())?;
    writer.get_mut().push(b'\n');

    Ok(writer.into_inner())
}

/// Serialize `document` into a string
pub fn to_xml_string(document: &Document) -> XmlResult<String> {
    let bytes = to_xml_bytes(document)?;
    String::from_utf8(bytes).map_err(|e| XmlError::Serialize(e.to_string()))
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &Element,
    bindings: &mut Bindings,
) -> XmlResult<()> {
    let outer_depth = bindings.len();
    bindings.extend(element.attributes.iter().filter_map(|(key, value)| {
        namespace_declaration(key).map(|prefix| (prefix.map(str::to_string), value.clone()))
    }));
    let missing = missing_declaration(&element.name, bindings);

    let name = element.name.raw_name();
    let mut start = BytesStart::new(name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    if let Some((prefix, uri)) = missing {
        let key = match &prefix {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        start.push_attribute((key.as_str(), uri.as_str()));
        bindings.push((prefix, uri));
    }

    let has_text = element.text.as_deref().is_some_and(|text| !text.is_empty());
    if element.children.is_empty() && !has_text {
        writer
            .write_event(Event::Empty(start))
            .map_err(|e| XmlError::Serialize(e.to_string()))?;
    } else {
        writer
            .write_event(Event::Start(start))
            .map_err(|e| XmlError::Serialize(e.to_string()))?;
        if let Some(text) = element.text.as_deref() {
            write_text(writer, text)?;
        }
        for child in &element.children {
            write_element(writer, child, bindings)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(name.as_str())))
            .map_err(|e| XmlError::Serialize(e.to_string()))?;
    }
    bindings.truncate(outer_depth);

    if let Some(tail) = element.tail.as_deref() {
        write_text(writer, tail)?;
    }
    Ok(())
}

/// The declaration `name` needs when its prefix does not resolve to its namespace here
fn missing_declaration(name: &QName, bindings: &Bindings) -> Option<(Option<String>, String)> {
    if name.prefix() == Some("xml") {
        return None;
    }
    let bound = bindings
        .iter()
        .rev()
        .find(|(prefix, _)| prefix.as_deref() == name.prefix())
        .map(|(_, uri)| uri.as_str())
        .filter(|uri| !uri.is_empty());
    if bound == name.namespace() {
        return None;
    }
    Some((
        name.prefix().map(str::to_string),
        name.namespace().unwrap_or_default().to_string(),
    ))
}

fn write_text(writer: &mut Writer<Vec<u8>>, text: &str) -> XmlResult<()> {
    if text.is_empty() {
        return Ok(());
    }
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(|e| XmlError::Serialize(e.to_string()))
}
