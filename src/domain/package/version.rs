//! NuGet package version parsing and normalization

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::DomainError;

/// Matches `major[.minor[.patch[.revision]]][-release][+metadata]`
static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:\.(\d+))?(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$",
    )
    .unwrap()
});

/// A parsed package version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageVersion {
    major: u64,
    minor: u64,
    patch: u64,
    revision: u64,
    release: Option<String>,
}

impl PackageVersion {
    /// Parse a version string, accepting one to four numeric parts
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        let captures = VERSION_PATTERN
            .captures(trimmed)
            .ok_or_else(|| {
                DomainError::validation(format!("Invalid package version '{}'", input))
            })?;

        let part = |index: usize| -> Result<u64, DomainError> {
            match captures.get(index) {
                Some(m) => m.as_str().parse::<u64>().map_err(|_| {
                    DomainError::validation(format!(
                        "Version component '{}' out of range in '{}'",
                        m.as_str(),
                        input
                    ))
                }),
                None => Ok(0),
            }
        };

        Ok(Self {
            major: part(1)?,
            minor: part(2)?,
            patch: part(3)?,
            revision: part(4)?,
            release: captures.get(5).map(|m| m.as_str().to_string()),
        })
    }

    /// Normalized form: at least three numeric parts, a fourth only when
    /// non-zero, release label kept, build metadata dropped
    pub fn to_normalized_string(&self) -> String {
        let mut normalized = format!("{}.{}.{}", self.major, self.minor, self.patch);

        if self.revision > 0 {
            normalized.push_str(&format!(".{}", self.revision));
        }

        if let Some(release) = &self.release {
            normalized.push('-');
            normalized.push_str(release);
        }

        normalized
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_normalized_string())
    }
}

/// Normalize a version string
pub fn normalize_version(input: &str) -> Result<String, DomainError> {
    Ok(PackageVersion::parse(input)?.to_normalized_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pads_missing_parts() {
        assert_eq!(normalize_version("1").unwrap(), "1.0.0");
        assert_eq!(normalize_version("1.2").unwrap(), "1.2.0");
        assert_eq!(normalize_version("1.2.3").unwrap(), "1.2.3");
    }

    #[test]
    fn test_normalize_drops_zero_revision() {
        assert_eq!(normalize_version("1.2.3.0").unwrap(), "1.2.3");
        assert_eq!(normalize_version("1.2.3.4").unwrap(), "1.2.3.4");
    }

    #[test]
    fn test_normalize_strips_leading_zeros() {
        assert_eq!(normalize_version("01.002.0003").unwrap(), "1.2.3");
    }

    #[test]
    fn test_normalize_keeps_release_label_and_drops_metadata() {
        assert_eq!(
            normalize_version("2.0.0-beta.1+build.42").unwrap(),
            "2.0.0-beta.1"
        );
        assert_eq!(
            PackageVersion::parse("2.0.0+build.42").unwrap(),
            PackageVersion::parse("2.0.0").unwrap()
        );
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize_version("  12.0.3 ").unwrap(), "12.0.3");
    }

    #[test]
    fn test_invalid_versions() {
        for input in ["", "abc", "1.2.3.4.5", "1..2", "1.0.0-", "v1.0.0", "1.0.0-beta..1"] {
            let result = PackageVersion::parse(input);
            assert!(
                matches!(result, Err(DomainError::Validation { .. })),
                "expected '{}' to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_component_overflow_is_rejected() {
        let result = PackageVersion::parse("99999999999999999999999.0.0");
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
}
