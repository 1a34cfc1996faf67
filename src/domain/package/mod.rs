//! Package domain - identities, symbol packages and version handling

mod entity;
mod validation;
mod version;

pub use entity::{Package, PackageIdentity, SymbolPackage, SymbolPackageStatus};
pub use validation::{
    validate_package_id, validate_package_version, PackageValidationError,
    MAX_PACKAGE_ID_LENGTH, MAX_PACKAGE_VERSION_LENGTH,
};
pub use version::{normalize_version, PackageVersion};
