//! XMLTV document handling
//!
//! - **framing**: lenient decoding and DOCTYPE removal ahead of parsing
//! - **parser**: quick-xml event stream into an owned element tree
//! - **document**: the tree itself (`Document`, `Element`, `QName`)
//! - **tags**: namespace-aware tag names and lookup helpers shared by stages
//! - **writer**: serialization back to UTF-8 bytes

pub mod document;
pub mod framing;
pub mod parser;
pub mod tags;
pub mod writer;

pub use document::{Document, Element, QName};
pub use framing::{prepare_document_text, strip_doctype};
pub use parser::parse_document;
pub use tags::{position_of_first, tag_qualifier};
pub use writer::{to_xml_bytes, to_xml_string};

use crate::errors::XmlResult;

/// Decode raw feed bytes, repair framing and parse into a document
pub fn load_document(bytes: &[u8]) -> XmlResult<Document> {
    let text = prepare_document_text(bytes);
    parse_document(&text)
}
