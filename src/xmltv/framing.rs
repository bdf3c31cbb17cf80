//! Pre-parse repair of raw XMLTV bytes
//!
//! Many XMLTV feeds carry `<!DOCTYPE tv SYSTEM "xmltv.dtd">` pointing at an
//! external subset nobody can fetch. The declaration is dropped before the
//! text reaches the parser. Invalid UTF-8 is replaced rather than rejected.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

fn doctype_regex() -> &'static Regex {
    static DOCTYPE: OnceLock<Regex> = OnceLock::new();
    DOCTYPE.get_or_init(|| Regex::new(r"(?i)<!DOCTYPE[^>]*>").expect("valid DOCTYPE regex"))
}

/// Decode `bytes` leniently and strip any DOCTYPE declarations
pub fn prepare_document_text(bytes: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(bytes);
    let decoded = decoded.trim_start_matches('\u{feff}');
    let stripped = strip_doctype(decoded);
    debug!(
        "Prepared {} bytes of XMLTV text ({} bytes before DOCTYPE removal)",
        stripped.len(),
        decoded.len()
    );
    stripped
}

/// Remove every `<!DOCTYPE ...>` up to its first `>`
pub fn strip_doctype(text: &str) -> String {
    doctype_regex().replace_all(text, "").into_owned()
}
