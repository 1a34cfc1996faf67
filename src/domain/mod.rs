//! Domain layer - Core business logic and entities

pub mod error;
pub mod file_storage;
pub mod package;

pub use error::DomainError;
pub use file_storage::{
    DownloadResponse, FileBody, FileLocation, FileNamingPolicy, FileStorage, FileStream,
    LowercaseFileNamingPolicy,
};
pub use package::{Package, PackageIdentity, PackageVersion, SymbolPackage, SymbolPackageStatus};
