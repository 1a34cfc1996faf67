//! Package and symbol package entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::version::normalize_version;
use crate::domain::DomainError;

/// Package id and version pair used to address stored files
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageIdentity {
    id: String,
    version: String,
}

impl PackageIdentity {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl std::fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.id, self.version)
    }
}

/// A published package as known to the gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Registration id, in the casing it was first published with
    id: String,
    /// Version string as uploaded
    version: String,
    /// Normalized version, when already computed at upload time
    #[serde(skip_serializing_if = "Option::is_none", default)]
    normalized_version: Option<String>,
}

impl Package {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            normalized_version: None,
        }
    }

    pub fn with_normalized_version(mut self, normalized_version: impl Into<String>) -> Self {
        self.normalized_version = Some(normalized_version.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Stored normalized version, or the original version normalized on demand
    pub fn normalized_version(&self) -> Result<String, DomainError> {
        match self.normalized_version.as_deref() {
            Some(normalized) if !normalized.trim().is_empty() => Ok(normalized.to_string()),
            _ => normalize_version(&self.version),
        }
    }

    /// Identity used for storage naming
    pub fn identity(&self) -> Result<PackageIdentity, DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::validation(
                "Package registration id is required to locate its files",
            ));
        }

        Ok(PackageIdentity::new(&self.id, self.normalized_version()?))
    }
}

/// Lifecycle status of an uploaded symbol package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolPackageStatus {
    #[default]
    Available,
    Validating,
    FailedValidation,
    Deleted,
}

/// Symbol archive published alongside a package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolPackage {
    /// Owning package
    package: Package,
    status: SymbolPackageStatus,
    /// Base64 SHA-512 of the archive
    #[serde(skip_serializing_if = "Option::is_none", default)]
    hash: Option<String>,
    file_size: u64,
    created_at: DateTime<Utc>,
}

impl SymbolPackage {
    pub fn new(package: Package) -> Self {
        Self {
            package,
            status: SymbolPackageStatus::default(),
            hash: None,
            file_size: 0,
            created_at: Utc::now(),
        }
    }

    pub fn with_status(mut self, status: SymbolPackageStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    pub fn with_file_size(mut self, file_size: u64) -> Self {
        self.file_size = file_size;
        self
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn status(&self) -> SymbolPackageStatus {
        self.status
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn identity(&self) -> Result<PackageIdentity, DomainError> {
        self.package.identity()
    }
}
