//! File storage factory for runtime backend selection

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::config::{StorageBackend, StorageSettings};
use crate::domain::{DomainError, FileStorage};

use super::cloud::{CloudRedirectFileStorage, CloudStorageConfig};
use super::filesystem::{FileSystemFileStorage, FileSystemStorageConfig};
use super::in_memory::InMemoryFileStorage;

/// File storage configuration
#[derive(Debug, Clone)]
pub enum FileStorageConfig {
    /// In-memory storage (for testing/development)
    InMemory,
    /// Local filesystem storage
    FileSystem(FileSystemStorageConfig),
    /// Redirects to an HTTP blob endpoint
    Cloud(CloudStorageConfig),
}

impl FileStorageConfig {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    pub fn filesystem(root: impl Into<PathBuf>) -> Self {
        Self::FileSystem(FileSystemStorageConfig::new(root))
    }

    pub fn cloud(base_url: Url) -> Self {
        Self::Cloud(CloudStorageConfig::new(base_url))
    }

    /// Build from the `storage` section of the application configuration
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, DomainError> {
        match settings.backend {
            StorageBackend::Memory => Ok(Self::InMemory),
            StorageBackend::Filesystem => {
                let root = settings.root.as_deref().ok_or_else(|| {
                    DomainError::configuration(
                        "storage.root is required for the filesystem backend",
                    )
                })?;
                Ok(Self::filesystem(root))
            }
            StorageBackend::Cloud => {
                let base_url = settings.base_url.as_deref().ok_or_else(|| {
                    DomainError::configuration("storage.base_url is required for the cloud backend")
                })?;
                let base_url = Url::parse(base_url).map_err(|e| {
                    DomainError::configuration(format!(
                        "Invalid storage.base_url '{}': {}",
                        base_url, e
                    ))
                })?;

                Ok(Self::Cloud(
                    CloudStorageConfig::new(base_url)
                        .with_match_request_scheme(settings.match_request_scheme)
                        .with_timeout(Duration::from_secs(settings.timeout_secs)),
                ))
            }
        }
    }
}

/// Factory for creating file storage instances
#[derive(Debug)]
pub struct FileStorageFactory;

impl FileStorageFactory {
    pub fn create(config: &FileStorageConfig) -> Result<Arc<dyn FileStorage>, DomainError> {
        match config {
            FileStorageConfig::InMemory => Ok(Arc::new(InMemoryFileStorage::new())),
            FileStorageConfig::FileSystem(fs_config) => {
                Ok(Arc::new(FileSystemFileStorage::new(fs_config.clone())))
            }
            FileStorageConfig::Cloud(cloud_config) => {
                Ok(Arc::new(CloudRedirectFileStorage::new(cloud_config.clone())?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_in_memory() {
        let storage = FileStorageFactory::create(&FileStorageConfig::in_memory()).unwrap();
        assert_eq!(storage.backend_name(), "memory");
    }

    #[test]
    fn test_create_filesystem() {
        let storage =
            FileStorageFactory::create(&FileStorageConfig::filesystem("/tmp/symbols")).unwrap();
        assert_eq!(storage.backend_name(), "filesystem");
    }

    #[test]
    fn test_create_cloud() {
        let config = FileStorageConfig::cloud(Url::parse("https://cdn.example.org/").unwrap());
        let storage = FileStorageFactory::create(&config).unwrap();
        assert_eq!(storage.backend_name(), "cloud");
    }

    #[test]
    fn test_from_settings_requires_root() {
        let settings = StorageSettings {
            backend: StorageBackend::Filesystem,
            root: None,
            ..StorageSettings::default()
        };

        assert!(matches!(
            FileStorageConfig::from_settings(&settings),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[test]
    fn test_from_settings_cloud() {
        let settings = StorageSettings {
            backend: StorageBackend::Cloud,
            base_url: Some("https://cdn.example.org/".to_string()),
            match_request_scheme: false,
            timeout_secs: 5,
            ..StorageSettings::default()
        };

        match FileStorageConfig::from_settings(&settings).unwrap() {
            FileStorageConfig::Cloud(config) => {
                assert!(!config.match_request_scheme);
                assert_eq!(config.timeout, Duration::from_secs(5));
            }
            other => panic!("expected cloud config, got {:?}", other),
        }
    }

    #[test]
    fn test_from_settings_rejects_bad_url() {
        let settings = StorageSettings {
            backend: StorageBackend::Cloud,
            base_url: Some("not a url".to_string()),
            ..StorageSettings::default()
        };

        assert!(FileStorageConfig::from_settings(&settings).is_err());
    }
}
