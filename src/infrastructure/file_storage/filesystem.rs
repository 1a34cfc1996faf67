//! Local filesystem file storage implementation

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use futures::StreamExt;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};
use url::Url;

use super::path::validate_segment;
use crate::domain::{DomainError, DownloadResponse, FileStorage, FileStream};

/// Configuration for filesystem storage
#[derive(Debug, Clone)]
pub struct FileSystemStorageConfig {
    /// Directory containing one sub-directory per folder name
    pub root: PathBuf,
}

impl FileSystemStorageConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Serves files stored under `<root>/<folder>/<file>` through the gateway
#[derive(Debug, Clone)]
pub struct FileSystemFileStorage {
    root: PathBuf,
}

impl FileSystemFileStorage {
    pub fn new(config: FileSystemStorageConfig) -> Self {
        Self { root: config.root }
    }

    fn file_path(&self, folder_name: &str, file_name: &str) -> Result<PathBuf, DomainError> {
        validate_segment(folder_name)?;
        validate_segment(file_name)?;
        Ok(self.root.join(folder_name).join(file_name))
    }
}

#[async_trait]
impl FileStorage for FileSystemFileStorage {
    async fn create_download(
        &self,
        _request_url: &Url,
        folder_name: &str,
        file_name: &str,
    ) -> Result<DownloadResponse, DomainError> {
        let path = self.file_path(folder_name, file_name)?;

        let file = match tokio::fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(DownloadResponse::not_found(folder_name, file_name));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to open file");
                return Err(e.into());
            }
        };

        let size = file.metadata().await?.len();
        debug!(path = %path.display(), size, "Streaming file from disk");

        Ok(DownloadResponse::Stream(FileStream::streamed(
            file_name,
            size,
            ReaderStream::new(file).boxed(),
        )))
    }

    async fn file_exists(&self, folder_name: &str, file_name: &str) -> Result<bool, DomainError> {
        let path = self.file_path(folder_name, file_name)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }

    async fn file_read_uri(&self, folder_name: &str, file_name: &str) -> Result<Url, DomainError> {
        let path = self.file_path(folder_name, file_name)?;

        if !tokio::fs::try_exists(&path).await? {
            return Err(DomainError::not_found(format!(
                "{}/{}",
                folder_name, file_name
            )));
        }

        let absolute = std::path::absolute(&path)?;
        Url::from_file_path(&absolute).map_err(|_| {
            DomainError::internal(format!(
                "Cannot build file URI for '{}'",
                absolute.display()
            ))
        })
    }

    async fn delete_file(&self, folder_name: &str, file_name: &str) -> Result<(), DomainError> {
        let path = self.file_path(folder_name, file_name)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Deleted file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "filesystem"
    }
}
