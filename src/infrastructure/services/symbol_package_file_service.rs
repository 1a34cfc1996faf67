//! Symbol package file service - locates symbol archives in file storage

use std::sync::Arc;

use url::Url;

use crate::domain::file_storage::{
    PACKAGE_FILE_SAVE_PATH_TEMPLATE, SYMBOL_PACKAGES_FOLDER_NAME, SYMBOL_PACKAGE_FILE_EXTENSION,
};
use crate::domain::{
    DomainError, DownloadResponse, FileLocation, FileNamingPolicy, FileStorage,
    LowercaseFileNamingPolicy, PackageIdentity, SymbolPackage,
};

/// Builds download results for symbol packages by naming the archive and
/// handing it to the storage backend. Backend results and errors are passed
/// through untouched.
#[derive(Clone)]
pub struct SymbolPackageFileService {
    storage: Arc<dyn FileStorage>,
    naming: Arc<dyn FileNamingPolicy>,
}

impl std::fmt::Debug for SymbolPackageFileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolPackageFileService")
            .field("storage", &self.storage.backend_name())
            .field("naming", &self.naming)
            .finish()
    }
}

impl SymbolPackageFileService {
    /// Create a service using the lower-case naming policy
    pub fn new(storage: Arc<dyn FileStorage>) -> Self {
        Self::with_naming_policy(storage, Arc::new(LowercaseFileNamingPolicy::new()))
    }

    pub fn with_naming_policy(
        storage: Arc<dyn FileStorage>,
        naming: Arc<dyn FileNamingPolicy>,
    ) -> Self {
        Self { storage, naming }
    }

    pub fn storage(&self) -> &Arc<dyn FileStorage> {
        &self.storage
    }

    /// Download result for a symbol package entity
    pub async fn download_result_for_package(
        &self,
        request_url: &Url,
        symbol_package: &SymbolPackage,
    ) -> Result<DownloadResponse, DomainError> {
        let identity = symbol_package.identity()?;
        self.create_download(request_url, &identity).await
    }

    /// Download result for a raw id and version
    pub async fn download_result(
        &self,
        request_url: &Url,
        id: &str,
        version: &str,
    ) -> Result<DownloadResponse, DomainError> {
        self.create_download(request_url, &PackageIdentity::new(id, version))
            .await
    }

    /// Where the symbol archive for `id`/`version` is stored
    pub fn symbol_package_location(
        &self,
        id: &str,
        version: &str,
    ) -> Result<FileLocation, DomainError> {
        self.locate(&PackageIdentity::new(id, version))
    }

    pub async fn symbol_package_exists(
        &self,
        symbol_package: &SymbolPackage,
    ) -> Result<bool, DomainError> {
        let location = self.locate(&symbol_package.identity()?)?;
        self.storage
            .file_exists(&location.folder_name, &location.file_name)
            .await
    }

    pub async fn symbol_package_exists_by_id(
        &self,
        id: &str,
        version: &str,
    ) -> Result<bool, DomainError> {
        let location = self.symbol_package_location(id, version)?;
        self.storage
            .file_exists(&location.folder_name, &location.file_name)
            .await
    }

    /// Direct URI of the stored archive, bypassing the gateway
    pub async fn symbol_package_read_uri(
        &self,
        symbol_package: &SymbolPackage,
    ) -> Result<Url, DomainError> {
        let location = self.locate(&symbol_package.identity()?)?;
        self.storage
            .file_read_uri(&location.folder_name, &location.file_name)
            .await
    }

    pub async fn delete_symbol_package_file(
        &self,
        id: &str,
        version: &str,
    ) -> Result<(), DomainError> {
        let location = self.symbol_package_location(id, version)?;
        self.storage
            .delete_file(&location.folder_name, &location.file_name)
            .await
    }

    async fn create_download(
        &self,
        request_url: &Url,
        identity: &PackageIdentity,
    ) -> Result<DownloadResponse, DomainError> {
        let location = self.locate(identity)?;
        self.storage
            .create_download(request_url, &location.folder_name, &location.file_name)
            .await
    }

    fn locate(&self, identity: &PackageIdentity) -> Result<FileLocation, DomainError> {
        let file_name = self.naming.build_file_name(
            identity.id(),
            identity.version(),
            PACKAGE_FILE_SAVE_PATH_TEMPLATE,
            SYMBOL_PACKAGE_FILE_EXTENSION,
        )?;

        Ok(FileLocation::new(SYMBOL_PACKAGES_FOLDER_NAME, file_name))
    }
}
