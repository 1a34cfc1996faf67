//! Cloud blob storage reached over HTTP
//!
//! Downloads are never proxied: clients are redirected to the blob endpoint
//! (or a CDN in front of it). Existence checks use `HEAD` requests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;

use super::path::validate_segment;
use crate::domain::{DomainError, DownloadResponse, FileStorage};

/// Configuration for cloud blob storage
#[derive(Debug, Clone)]
pub struct CloudStorageConfig {
    /// Public base URL of the blob container root, e.g. `https://cdn.example.org/`
    pub base_url: Url,
    /// Redirect with the scheme of the incoming request (http stays http)
    pub match_request_scheme: bool,
    /// Timeout for `HEAD`/`DELETE` calls against the blob endpoint
    pub timeout: Duration,
}

impl CloudStorageConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            match_request_scheme: true,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_match_request_scheme(mut self, enabled: bool) -> Self {
        self.match_request_scheme = enabled;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Redirecting file storage backed by an HTTP blob endpoint
#[derive(Debug, Clone)]
pub struct CloudRedirectFileStorage {
    client: reqwest::Client,
    config: CloudStorageConfig,
}

impl CloudRedirectFileStorage {
    pub fn new(config: CloudStorageConfig) -> Result<Self, DomainError> {
        if config.base_url.cannot_be_a_base() {
            return Err(DomainError::configuration(format!(
                "Blob base URL '{}' cannot be used as a base",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    /// URL of the blob in the container
    pub fn blob_url(&self, folder_name: &str, file_name: &str) -> Result<Url, DomainError> {
        validate_segment(folder_name)?;
        validate_segment(file_name)?;

        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DomainError::configuration("Blob base URL cannot be a base"))?
            .pop_if_empty()
            .push(folder_name)
            .push(file_name);

        Ok(url)
    }

    /// Location sent to the client: the blob URL, switched to the request's
    /// scheme when configured and the request came over http(s)
    fn redirect_url(&self, request_url: &Url, blob_url: Url) -> Url {
        if !self.config.match_request_scheme {
            return blob_url;
        }

        let scheme = request_url.scheme();
        if scheme == blob_url.scheme() || !matches!(scheme, "http" | "https") {
            return blob_url;
        }

        let mut redirect = blob_url.clone();
        if redirect.set_scheme(scheme).is_err() || redirect.set_port(None).is_err() {
            return blob_url;
        }

        redirect
    }
}

fn status_error(status: StatusCode, url: &Url) -> DomainError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            DomainError::access_denied(format!("Blob endpoint refused access to {}", url))
        }
        s if s.is_server_error() || s == StatusCode::TOO_MANY_REQUESTS => {
            DomainError::unavailable(format!("Blob endpoint returned {} for {}", s, url))
        }
        s => DomainError::storage(format!("Unexpected status {} for {}", s, url)),
    }
}

fn request_error(err: reqwest::Error, url: &Url) -> DomainError {
    DomainError::unavailable(format!("Request to {} failed: {}", url, err))
}

#[async_trait]
impl FileStorage for CloudRedirectFileStorage {
    async fn create_download(
        &self,
        request_url: &Url,
        folder_name: &str,
        file_name: &str,
    ) -> Result<DownloadResponse, DomainError> {
        let blob_url = self.blob_url(folder_name, file_name)?;
        let location = self.redirect_url(request_url, blob_url);

        debug!(location = %location, "Redirecting download to blob endpoint");
        Ok(DownloadResponse::redirect(location))
    }

    async fn file_exists(&self, folder_name: &str, file_name: &str) -> Result<bool, DomainError> {
        let url = self.blob_url(folder_name, file_name)?;

        let response = self
            .client
            .head(url.clone())
            .send()
            .await
            .map_err(|e| request_error(e, &url))?;

        match response.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            s => {
                warn!(url = %url, status = %s, "Blob existence check failed");
                Err(status_error(s, &url))
            }
        }
    }

    async fn file_read_uri(&self, folder_name: &str, file_name: &str) -> Result<Url, DomainError> {
        self.blob_url(folder_name, file_name)
    }

    async fn delete_file(&self, folder_name: &str, file_name: &str) -> Result<(), DomainError> {
        let url = self.blob_url(folder_name, file_name)?;

        let response = self
            .client
            .delete(url.clone())
            .send()
            .await
            .map_err(|e| request_error(e, &url))?;

        match response.status() {
            s if s.is_success() || s == StatusCode::NOT_FOUND => Ok(()),
            s => Err(status_error(s, &url)),
        }
    }

    fn backend_name(&self) -> &'static str {
        "cloud"
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn storage(base: &str) -> CloudRedirectFileStorage {
        CloudRedirectFileStorage::new(CloudStorageConfig::new(Url::parse(base).unwrap())).unwrap()
    }

    #[test]
    fn test_blob_url() {
        let storage = storage("https://cdn.example.org/packages/");
        let url = storage.blob_url("symbol-packages", "foo.1.0.0.snupkg").unwrap();

        assert_eq!(
            url.as_str(),
            "https://cdn.example.org/packages/symbol-packages/foo.1.0.0.snupkg"
        );
    }

    #[test]
    fn test_blob_url_rejects_traversal() {
        let storage = storage("https://cdn.example.org/");
        assert!(storage.blob_url("symbol-packages", "..").is_err());
    }

    #[tokio::test]
    async fn test_redirect_keeps_https_for_https_request() {
        let storage = storage("https://cdn.example.org/");
        let request = Url::parse("https://www.example.org/api/v2/symbolpackage/foo/1.0.0").unwrap();

        let response = storage
            .create_download(&request, "symbol-packages", "foo.1.0.0.snupkg")
            .await
            .unwrap();

        assert_eq!(
            response,
            DownloadResponse::redirect(
                Url::parse("https://cdn.example.org/symbol-packages/foo.1.0.0.snupkg").unwrap()
            )
        );
    }

    #[tokio::test]
    async fn test_redirect_follows_request_scheme() {
        let storage = storage("https://cdn.example.org:8443/");
        let request = Url::parse("http://localhost:8080/api/v2/symbolpackage/foo/1.0.0").unwrap();

        let response = storage
            .create_download(&request, "symbol-packages", "foo.1.0.0.snupkg")
            .await
            .unwrap();

        match response {
            DownloadResponse::Redirect { location } => {
                assert_eq!(location.scheme(), "http");
                assert_eq!(location.port(), None);
                assert_eq!(location.host_str(), Some("cdn.example.org"));
            }
            other => panic!("expected redirect, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_redirect_scheme_matching_disabled() {
        let config = CloudStorageConfig::new(Url::parse("https://cdn.example.org/").unwrap())
            .with_match_request_scheme(false);
        let storage = CloudRedirectFileStorage::new(config).unwrap();
        let request = Url::parse("http://localhost:8080/").unwrap();

        let response = storage
            .create_download(&request, "symbol-packages", "foo.1.0.0.snupkg")
            .await
            .unwrap();

        assert_eq!(
            response,
            DownloadResponse::redirect(
                Url::parse("https://cdn.example.org/symbol-packages/foo.1.0.0.snupkg").unwrap()
            )
        );
    }

    #[tokio::test]
    async fn test_file_exists_via_head() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/symbol-packages/foo.1.0.0.snupkg"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/symbol-packages/bar.1.0.0.snupkg"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let storage = storage(&server.uri());

        assert!(storage.file_exists("symbol-packages", "foo.1.0.0.snupkg").await.unwrap());
        assert!(!storage.file_exists("symbol-packages", "bar.1.0.0.snupkg").await.unwrap());
    }

    #[tokio::test]
    async fn test_file_exists_maps_errors() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/symbol-packages/denied.1.0.0.snupkg"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/symbol-packages/down.1.0.0.snupkg"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let storage = storage(&server.uri());

        assert!(matches!(
            storage.file_exists("symbol-packages", "denied.1.0.0.snupkg").await,
            Err(DomainError::AccessDenied { .. })
        ));
        assert!(matches!(
            storage.file_exists("symbol-packages", "down.1.0.0.snupkg").await,
            Err(DomainError::Unavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_treats_missing_as_success() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/symbol-packages/foo.1.0.0.snupkg"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let storage = storage(&server.uri());
        storage
            .delete_file("symbol-packages", "foo.1.0.0.snupkg")
            .await
            .unwrap();
    }
}
