use thiserror::Error;

/// Core domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::AccessDenied {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::not_found(err.to_string()),
            std::io::ErrorKind::PermissionDenied => Self::access_denied(err.to_string()),
            _ => Self::storage(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("symbol-packages/foo.1.0.0.snupkg");
        assert_eq!(
            error.to_string(),
            "Not found: symbol-packages/foo.1.0.0.snupkg"
        );
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Package id cannot be empty");
        assert_eq!(
            error.to_string(),
            "Validation error: Package id cannot be empty"
        );
    }

    #[test]
    fn test_unavailable_error() {
        let error = DomainError::unavailable("connection reset");
        assert_eq!(error.to_string(), "Storage unavailable: connection reset");
    }

    #[test]
    fn test_io_error_conversion() {
        let not_found = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(matches!(
            DomainError::from(not_found),
            DomainError::NotFound { .. }
        ));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(
            DomainError::from(denied),
            DomainError::AccessDenied { .. }
        ));

        let other = std::io::Error::other("disk on fire");
        assert!(matches!(DomainError::from(other), DomainError::Storage { .. }));
    }
}
