//! End-to-end guide processing: acquire, parse, normalize, write

use std::path::PathBuf;

use tracing::info;

use crate::config::Config;
use crate::errors::AppResult;
use crate::output::write_document;
use crate::pipeline::{NormalizationSummary, normalize};
use crate::sources::InputSource;
use crate::xmltv::load_document;

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    pub output: PathBuf,
    pub summary: NormalizationSummary,
}

impl ProcessReport {
    /// One-line human-readable summary
    pub fn summary_line(&self) -> String {
        format!("Wrote {} ({})", self.output.display(), self.summary)
    }
}

/// Run the whole guide normalization once
pub async fn process_guide(source: &InputSource, output: PathBuf, config: &Config) -> AppResult<ProcessReport> {
    info!("Reading XMLTV guide from {}", source);
    let bytes = source.read_bytes(&config.fetch).await?;

    let mut document = load_document(&bytes)?;
    let summary = normalize(&mut document);

    write_document(&mut document, &output, config.output.indent).await?;

    Ok(ProcessReport { output, summary })
}

/// Normalize an in-memory guide and return the serialized result
///
/// Same stages as [`process_guide`], without any I/O.
pub fn normalize_bytes(bytes: &[u8], indent: usize) -> AppResult<(Vec<u8>, NormalizationSummary)> {
    let mut document = load_document(bytes)?;
    let summary = normalize(&mut document);
    document.indent(indent);
    let serialized = crate::xmltv::to_xml_bytes(&document)?;
    Ok((serialized, summary))
}
