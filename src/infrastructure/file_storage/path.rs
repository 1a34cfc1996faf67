use crate::domain::DomainError;

/// Folder and file names must be single, non-relative path segments
pub fn validate_segment(segment: &str) -> Result<(), DomainError> {
    if segment.is_empty() || segment == "." || segment == ".." {
        return Err(DomainError::validation(format!(
            "Invalid storage path segment '{}'",
            segment
        )));
    }

    if segment.contains(['/', '\\', '\0']) {
        return Err(DomainError::validation(format!(
            "Storage path segment '{}' contains a separator",
            segment
        )));
    }

    Ok(())
}
