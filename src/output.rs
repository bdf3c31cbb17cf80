//! Output sink for normalized guides

use std::io;
use std::path::Path;

use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::xmltv::{Document, to_xml_bytes};

/// Indent, serialize and write `document` to `path`, creating parent directories
pub async fn write_document(document: &mut Document, path: &Path, indent: usize) -> AppResult<()> {
    document.indent(indent);
    let bytes = to_xml_bytes(document).map_err(|e| AppError::write(path, io::Error::other(e)))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::write(path, e))?;
    }

    tokio::fs::write(path, &bytes)
        .await
        .map_err(|e| AppError::write(path, e))?;
    info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xmltv::parse_document;

    #[tokio::test]
    async fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/guide.xml");
        let mut doc = parse_document(r#"<tv><programme start="1"><title>A</title></programme></tv>"#).unwrap();

        write_document(&mut doc, &path, 2).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <tv>\n  <programme start=\"1\">\n    <title>A</title>\n  </programme>\n</tv>\n"
        );
    }

    #[tokio::test]
    async fn test_unwritable_path_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let mut doc = parse_document("<tv/>").unwrap();

        let err = write_document(&mut doc, &blocker.join("guide.xml"), 2).await.unwrap_err();

        assert!(matches!(err, AppError::Write { .. }));
    }
}
