//! Error type definitions for epg-series
//!
//! Every variant of [`AppError`] maps to one failure class reported by the
//! binary: reading the input, parsing it, or writing the result.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Input acquisition failed (missing source, file read, HTTP fetch)
    #[error("Failed to read input: {0}")]
    Source(#[from] SourceError),

    /// The acquired bytes could not be parsed into a document tree
    #[error("Failed to parse XML: {0}")]
    Parse(#[from] XmlError),

    /// The normalized document could not be written
    #[error("Failed to write output: {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Input acquisition errors
#[derive(Error, Debug)]
pub enum SourceError {
    /// Neither a URL nor an input file was supplied
    #[error("Either --url or --input must be provided")]
    Missing,

    /// Local file could not be read
    #[error("{path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Transport level failure talking to the remote host
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// Remote host answered with a non-success status
    #[error("HTTP error: {status} {reason} - URL: {url}")]
    Http {
        status: u16,
        reason: String,
        url: String,
    },

    /// Compressed payload could not be inflated
    #[error("Failed to decompress {format} content: {message}")]
    Decompression { format: String, message: String },
}

/// XML document errors
#[derive(Error, Debug)]
pub enum XmlError {
    /// Syntax error reported by the underlying reader
    #[error("{message} at byte {position}")]
    Syntax { message: String, position: u64 },

    /// An entity or character reference could not be resolved
    #[error("Invalid escape sequence: {0}")]
    Escape(String),

    /// Element or attribute uses a prefix with no xmlns declaration in scope
    #[error("Undeclared namespace prefix '{prefix}' on <{name}>")]
    UnboundPrefix { prefix: String, name: String },

    /// Input contained no root element
    #[error("Document has no root element")]
    MissingRoot,

    /// A second top-level element followed the root
    #[error("Document has more than one root element (second root: <{name}>)")]
    MultipleRoots { name: String },

    /// Non-whitespace text outside the root element
    #[error("Unexpected text outside the root element")]
    TextOutsideRoot,

    /// Serialization into the output buffer failed
    #[error("Failed to serialize document: {0}")]
    Serialize(String),
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a write error for the given output path
    pub fn write<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

impl SourceError {
    /// Create a file read error
    pub fn file_read<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create a request error
    pub fn request<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Request {
            url: url.into(),
            message: message.into(),
        }
    }
}

impl XmlError {
    /// Wrap a quick-xml reader error with the reader position
    pub fn syntax<E, P>(error: E, position: P) -> Self
    where
        E: std::fmt::Display,
        P: TryInto<u64>,
    {
        Self::Syntax {
            message: error.to_string(),
            position: position.try_into().unwrap_or_default(),
        }
    }
}
