use async_trait::async_trait;
use url::Url;

#[cfg(test)]
use mockall::automock;

use super::DownloadResponse;
use crate::domain::DomainError;

/// Blob storage backend able to serve files from named folders.
///
/// Implementations must be safe to call concurrently; error and retry
/// semantics are owned by the backend.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Produce a download response for the file, addressed to `request_url`
    async fn create_download(
        &self,
        request_url: &Url,
        folder_name: &str,
        file_name: &str,
    ) -> Result<DownloadResponse, DomainError>;

    /// Check whether the file is stored
    async fn file_exists(&self, folder_name: &str, file_name: &str) -> Result<bool, DomainError>;

    /// Direct URI of the stored file
    async fn file_read_uri(&self, folder_name: &str, file_name: &str) -> Result<Url, DomainError>;

    /// Delete the file; deleting a missing file succeeds
    async fn delete_file(&self, folder_name: &str, file_name: &str) -> Result<(), DomainError>;

    /// Get backend name for logging/debugging
    fn backend_name(&self) -> &'static str;
}
