//! Magic-byte detection and decompression of fetched feeds
//!
//! XMLTV guides are commonly published as `.xml.gz`. The format is detected
//! from the payload rather than the file name or content type.

#[cfg(feature = "compression-gzip")]
use std::io::Read;

use tracing::debug;

use crate::errors::{SourceError, SourceResult};

/// Supported compression formats detected by magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    Gzip,
    Uncompressed,
}

/// Magic file detection and decompression utility
pub struct DecompressionService;

impl DecompressionService {
    /// Detect compression format using magic bytes
    pub fn detect_compression_format(data: &[u8]) -> CompressionFormat {
        match infer::get(data) {
            Some(kind) if kind.mime_type() == "application/gzip" => CompressionFormat::Gzip,
            _ => CompressionFormat::Uncompressed,
        }
    }

    /// Decompress data based on detected format
    ///
    /// Uncompressed data is returned as-is. Gzip data is inflated when the
    /// `compression-gzip` feature is enabled and rejected otherwise.
    pub fn decompress(data: Vec<u8>) -> SourceResult<Vec<u8>> {
        let format = Self::detect_compression_format(&data);
        debug!("Detected compression format: {:?}", format);

        match format {
            CompressionFormat::Gzip => Self::decompress_gzip(data),
            CompressionFormat::Uncompressed => Ok(data),
        }
    }

    #[cfg(feature = "compression-gzip")]
    fn decompress_gzip(data: Vec<u8>) -> SourceResult<Vec<u8>> {
        let mut decoder = flate2::read::GzDecoder::new(data.as_slice());
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|e| SourceError::Decompression {
                format: "gzip".to_string(),
                message: e.to_string(),
            })?;
        debug!(
            "Decompressed {} gzip bytes into {} bytes",
            data.len(),
            decompressed.len()
        );
        Ok(decompressed)
    }

    #[cfg(not(feature = "compression-gzip"))]
    fn decompress_gzip(_data: Vec<u8>) -> SourceResult<Vec<u8>> {
        Err(SourceError::Decompression {
            format: "gzip".to_string(),
            message: "built without the compression-gzip feature".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_uncompressed() {
        let data = b"<?xml version=\"1.0\"?><tv/>";
        assert_eq!(
            DecompressionService::detect_compression_format(data),
            CompressionFormat::Uncompressed
        );
        assert_eq!(DecompressionService::decompress(data.to_vec()).unwrap(), data);
    }

    #[cfg(feature = "compression-gzip")]
    #[test]
    fn test_detect_and_decompress_gzip() {
        use flate2::Compression;
        use flate2::write::GzEncoder;
        use std::io::Write;

        let original_data = b"<tv><programme start=\"20240101\"/></tv>";
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(original_data).unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(
            DecompressionService::detect_compression_format(&compressed),
            CompressionFormat::Gzip
        );
        assert_eq!(DecompressionService::decompress(compressed).unwrap(), original_data);
    }

    #[cfg(feature = "compression-gzip")]
    #[test]
    fn test_truncated_gzip_is_an_error() {
        let truncated = vec![0x1f, 0x8b, 0x08, 0x00, 0x00];
        let err = DecompressionService::decompress(truncated).unwrap_err();
        assert!(matches!(err, SourceError::Decompression { .. }));
    }
}
