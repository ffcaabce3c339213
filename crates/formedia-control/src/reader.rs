//! File read seam
//!
//! Reading the selected file as a data URI is the pipeline's single
//! suspension point, so it sits behind a trait: the default reader encodes
//! the bytes the browser already handed over, and `FsFileReader` covers
//! hosts that pass a path instead of a buffer.

use anyhow::{Context, Result};
use async_trait::async_trait;

use formedia_core::data_uri;
use formedia_core::ControlError;

use crate::dom::SelectedFile;

/// Asynchronous file-to-data-URI reading primitive.
#[async_trait]
pub trait FileReader: Send + Sync {
    async fn read_as_data_url(&self, file: &SelectedFile) -> Result<String>;
}

/// Default reader: encodes the in-memory file bytes under the
/// browser-reported content type.
#[derive(Debug, Default)]
pub struct DataUrlReader;

#[async_trait]
impl FileReader for DataUrlReader {
    async fn read_as_data_url(&self, file: &SelectedFile) -> Result<String> {
        Ok(data_uri::encode(&file.content_type, &file.data))
    }
}

/// Filesystem-backed reader: treats the file's `name` as a path and reads
/// the bytes from disk. The content type still comes from the selection,
/// the way a browser reports it alongside the file handle.
#[derive(Debug, Default)]
pub struct FsFileReader;

#[async_trait]
impl FileReader for FsFileReader {
    async fn read_as_data_url(&self, file: &SelectedFile) -> Result<String> {
        let data = tokio::fs::read(&file.name)
            .await
            .map_err(ControlError::ReadFailed)
            .with_context(|| format!("Failed to read file: {}", file.name))?;
        Ok(data_uri::encode(&file.content_type, &data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn data_url_reader_encodes_the_selection() {
        let file = SelectedFile::new("clip.mp4", "video/mp4", &b"frames"[..]);
        let uri = DataUrlReader.read_as_data_url(&file).await.unwrap();
        assert!(uri.starts_with("data:video/mp4;base64,"));
    }

    #[tokio::test]
    async fn fs_reader_reads_from_disk() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"on-disk-bytes").unwrap();
        let path = tmp.path().to_str().unwrap().to_string();

        let file = SelectedFile::new(&path, "audio/mpeg", &b""[..]);
        let uri = FsFileReader.read_as_data_url(&file).await.unwrap();
        assert_eq!(
            uri,
            formedia_core::data_uri::encode("audio/mpeg", b"on-disk-bytes")
        );
    }

    #[tokio::test]
    async fn fs_reader_propagates_missing_file() {
        let file = SelectedFile::new("/nonexistent/clip.mp3", "audio/mpeg", &b""[..]);
        assert!(FsFileReader.read_as_data_url(&file).await.is_err());
    }
}
