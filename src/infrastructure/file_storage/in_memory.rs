//! In-memory file storage implementation

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;
use url::Url;

use super::path::validate_segment;
use crate::domain::{DomainError, DownloadResponse, FileLocation, FileStorage, FileStream};

/// Thread-safe in-memory file storage
///
/// Useful for testing and development. Files are streamed back through the
/// gateway and lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryFileStorage {
    files: RwLock<HashMap<FileLocation, Bytes>>,
}

impl InMemoryFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores file content, replacing any previous content
    pub fn put_file(
        &self,
        folder_name: &str,
        file_name: &str,
        content: impl Into<Bytes>,
    ) -> Result<(), DomainError> {
        let location = location(folder_name, file_name)?;
        let mut files = self.files.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        files.insert(location, content.into());
        Ok(())
    }

    pub fn with_file(
        self,
        folder_name: &str,
        file_name: &str,
        content: impl Into<Bytes>,
    ) -> Result<Self, DomainError> {
        self.put_file(folder_name, file_name, content)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.files.read().map(|files| files.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, location: &FileLocation) -> Result<Option<Bytes>, DomainError> {
        let files = self.files.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(files.get(location).cloned())
    }
}

fn location(folder_name: &str, file_name: &str) -> Result<FileLocation, DomainError> {
    validate_segment(folder_name)?;
    validate_segment(file_name)?;
    Ok(FileLocation::new(folder_name, file_name))
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn create_download(
        &self,
        _request_url: &Url,
        folder_name: &str,
        file_name: &str,
    ) -> Result<DownloadResponse, DomainError> {
        let location = location(folder_name, file_name)?;

        match self.get(&location)? {
            Some(body) => {
                debug!(file = %location, size = body.len(), "Serving file from memory");
                Ok(DownloadResponse::Stream(FileStream::new(file_name, body)))
            }
            None => Ok(DownloadResponse::NotFound(location)),
        }
    }

    async fn file_exists(&self, folder_name: &str, file_name: &str) -> Result<bool, DomainError> {
        let location = location(folder_name, file_name)?;
        Ok(self.get(&location)?.is_some())
    }

    async fn file_read_uri(&self, folder_name: &str, file_name: &str) -> Result<Url, DomainError> {
        let location = location(folder_name, file_name)?;

        if self.get(&location)?.is_none() {
            return Err(DomainError::not_found(location.to_string()));
        }

        Url::parse(&format!("memory:///{}", location))
            .map_err(|e| DomainError::internal(format!("Invalid memory URI: {}", e)))
    }

    async fn delete_file(&self, folder_name: &str, file_name: &str) -> Result<(), DomainError> {
        let location = location(folder_name, file_name)?;
        let mut files = self.files.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        files.remove(&location);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FileBody;

    fn request_url() -> Url {
        Url::parse("http://localhost:8080/api/v2/symbolpackage/foo/1.0.0").unwrap()
    }

    #[tokio::test]
    async fn test_download_stored_file() {
        let storage = InMemoryFileStorage::new()
            .with_file("symbol-packages", "foo.1.0.0.snupkg", Bytes::from_static(b"symbols"))
            .unwrap();

        let response = storage
            .create_download(&request_url(), "symbol-packages", "foo.1.0.0.snupkg")
            .await
            .unwrap();

        match response {
            DownloadResponse::Stream(stream) => {
                assert_eq!(stream.file_name, "foo.1.0.0.snupkg");
                assert_eq!(stream.body, FileBody::Buffered(Bytes::from_static(b"symbols")));
            }
            other => panic!("expected stream, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_download_missing_file() {
        let storage = InMemoryFileStorage::new();

        let response = storage
            .create_download(&request_url(), "symbol-packages", "missing.1.0.0.snupkg")
            .await
            .unwrap();

        assert_eq!(
            response,
            DownloadResponse::not_found("symbol-packages", "missing.1.0.0.snupkg")
        );
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let storage = InMemoryFileStorage::new();
        storage.put_file("symbol-packages", "foo.1.0.0.snupkg", "x").unwrap();

        assert!(storage.file_exists("symbol-packages", "foo.1.0.0.snupkg").await.unwrap());

        storage.delete_file("symbol-packages", "foo.1.0.0.snupkg").await.unwrap();
        assert!(!storage.file_exists("symbol-packages", "foo.1.0.0.snupkg").await.unwrap());
        assert!(storage.is_empty());

        // deleting again is not an error
        storage.delete_file("symbol-packages", "foo.1.0.0.snupkg").await.unwrap();
    }

    #[tokio::test]
    async fn test_read_uri() {
        let storage = InMemoryFileStorage::new()
            .with_file("symbol-packages", "foo.1.0.0.snupkg", "x")
            .unwrap();

        let uri = storage
            .file_read_uri("symbol-packages", "foo.1.0.0.snupkg")
            .await
            .unwrap();
        assert_eq!(uri.as_str(), "memory:///symbol-packages/foo.1.0.0.snupkg");

        let missing = storage.file_read_uri("symbol-packages", "bar.1.0.0.snupkg").await;
        assert!(matches!(missing, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let storage = InMemoryFileStorage::new();
        let result = storage.file_exists("..", "foo.1.0.0.snupkg").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
}
