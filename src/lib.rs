//! epg-series: XMLTV programme guide normalization
//!
//! Reads an XMLTV guide, makes sure every programme carries a category and an
//! `xmltv_ns` episode number, and writes the corrected guide back out.

pub mod config;
pub mod errors;
pub mod output;
pub mod pipeline;
pub mod processor;
pub mod sources;
pub mod utils;
pub mod xmltv;

pub use processor::{ProcessReport, normalize_bytes, process_guide};
