//! Centralized error handling for epg-series
//!
//! The normalization stages never fail: malformed programmes are skipped and
//! simply not counted. Errors only exist at the edges of a run, and each of
//! them is fatal to that run.
//!
//! # Error Categories
//!
//! - **Source Errors**: acquiring the XMLTV bytes from a file or URL
//! - **XML Errors**: parsing the document tree (and serializing it back)
//! - **Write Errors**: persisting the normalized document
//! - **Configuration Errors**: loading config files and environment overrides
//!
//! # Usage
//!
//! ```rust
//! use epg_series::errors::{AppError, AppResult, SourceError};
//!
//! fn require_source(url: Option<&str>) -> AppResult<&str> {
//!     url.ok_or_else(|| AppError::from(SourceError::Missing))
//! }
//!
//! assert!(require_source(None).is_err());
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;

/// Convenience type alias for XML document Results
pub type XmlResult<T> = Result<T, XmlError>;
