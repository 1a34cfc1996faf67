//! Package identity validation utilities

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::DomainError;

/// Maximum length for package IDs
pub const MAX_PACKAGE_ID_LENGTH: usize = 100;

/// Maximum length for package versions
pub const MAX_PACKAGE_VERSION_LENGTH: usize = 64;

/// Word characters separated by single dots, dashes or underscores
static PACKAGE_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\w+(?:[_.-]\w+)*$").unwrap());

/// Package identity validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum PackageValidationError {
    /// Package ID is empty
    EmptyId,
    /// Package ID exceeds maximum length
    IdTooLong { length: usize, max: usize },
    /// Package ID contains invalid characters
    InvalidIdFormat { id: String },
    /// Version is empty
    EmptyVersion,
    /// Version exceeds maximum length
    VersionTooLong { length: usize, max: usize },
}

impl fmt::Display for PackageValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Package ID cannot be empty"),
            Self::IdTooLong { length, max } => {
                write!(f, "Package ID too long: {} characters (max {})", length, max)
            }
            Self::InvalidIdFormat { id } => write!(
                f,
                "Invalid package ID '{}': must be word characters separated by '.', '-' or '_'",
                id
            ),
            Self::EmptyVersion => write!(f, "Package version cannot be empty"),
            Self::VersionTooLong { length, max } => write!(
                f,
                "Package version too long: {} characters (max {})",
                length, max
            ),
        }
    }
}

impl std::error::Error for PackageValidationError {}

impl From<PackageValidationError> for DomainError {
    fn from(err: PackageValidationError) -> Self {
        DomainError::validation(err.to_string())
    }
}

/// Validate a package ID as accepted by the gallery
pub fn validate_package_id(id: &str) -> Result<(), PackageValidationError> {
    if id.trim().is_empty() {
        return Err(PackageValidationError::EmptyId);
    }

    if id.len() > MAX_PACKAGE_ID_LENGTH {
        return Err(PackageValidationError::IdTooLong {
            length: id.len(),
            max: MAX_PACKAGE_ID_LENGTH,
        });
    }

    if !PACKAGE_ID_PATTERN.is_match(id) {
        return Err(PackageValidationError::InvalidIdFormat { id: id.to_string() });
    }

    Ok(())
}

/// Validate that a version string is present and bounded
pub fn validate_package_version(version: &str) -> Result<(), PackageValidationError> {
    if version.trim().is_empty() {
        return Err(PackageValidationError::EmptyVersion);
    }

    if version.len() > MAX_PACKAGE_VERSION_LENGTH {
        return Err(PackageValidationError::VersionTooLong {
            length: version.len(),
            max: MAX_PACKAGE_VERSION_LENGTH,
        });
    }

    Ok(())
}
