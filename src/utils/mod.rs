//! Utility modules for epg-series
//!
//! Reusable helpers for input acquisition: HTTP fetching, payload
//! decompression and URL handling.

pub mod decompression;
pub mod http_client;
pub mod url;

// Re-export commonly used types for convenience
pub use decompression::{CompressionFormat, DecompressionService};
pub use http_client::StandardHttpClient;
