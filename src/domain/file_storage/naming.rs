//! Storage file naming
//!
//! Path templates use positional placeholders:
//! - `{0}` - package id
//! - `{1}` - package version
//! - `{2}` - file extension
//!
//! `{{` and `}}` render literal braces.

use std::fmt::Debug;

use crate::domain::DomainError;

/// Template shared by package and symbol package files: `<id>.<version><extension>`
pub const PACKAGE_FILE_SAVE_PATH_TEMPLATE: &str = "{0}.{1}{2}";

/// Extension of NuGet symbol packages
pub const SYMBOL_PACKAGE_FILE_EXTENSION: &str = ".snupkg";

/// Storage folder holding symbol packages
pub const SYMBOL_PACKAGES_FOLDER_NAME: &str = "symbol-packages";

/// Maps a package identity onto a storage file name
pub trait FileNamingPolicy: Send + Sync + Debug {
    fn build_file_name(
        &self,
        id: &str,
        version: &str,
        path_template: &str,
        extension: &str,
    ) -> Result<String, DomainError>;
}

/// Renders the template and lower-cases the result.
///
/// Blob storage is case sensitive while package ids have changed case over
/// time, so files are always addressed by their lower-cased name.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowercaseFileNamingPolicy;

impl LowercaseFileNamingPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl FileNamingPolicy for LowercaseFileNamingPolicy {
    fn build_file_name(
        &self,
        id: &str,
        version: &str,
        path_template: &str,
        extension: &str,
    ) -> Result<String, DomainError> {
        if id.trim().is_empty() {
            return Err(DomainError::validation("Package id cannot be empty"));
        }

        if version.trim().is_empty() {
            return Err(DomainError::validation("Package version cannot be empty"));
        }

        let rendered = render_path_template(path_template, &[id, version, extension])?;
        Ok(rendered.to_lowercase())
    }
}

/// Substitute positional `{n}` placeholders in a path template
pub fn render_path_template(template: &str, args: &[&str]) -> Result<String, DomainError> {
    let capacity = template.len() + args.iter().map(|a| a.len()).sum::<usize>();
    let mut output = String::with_capacity(capacity);
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    output.push('{');
                    continue;
                }

                let mut index = String::new();
                let mut closed = false;

                for (_, next) in chars.by_ref() {
                    if next == '}' {
                        closed = true;
                        break;
                    }
                    index.push(next);
                }

                if !closed {
                    return Err(DomainError::configuration(format!(
                        "Unclosed placeholder at position {} in path template '{}'",
                        position, template
                    )));
                }

                let arg = index
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| args.get(i))
                    .ok_or_else(|| {
                        DomainError::configuration(format!(
                            "Unknown placeholder '{{{}}}' in path template '{}'",
                            index, template
                        ))
                    })?;

                output.push_str(arg);
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                    output.push('}');
                } else {
                    return Err(DomainError::configuration(format!(
                        "Unmatched '}}' at position {} in path template '{}'",
                        position, template
                    )));
                }
            }
            _ => output.push(c),
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol_file_name(id: &str, version: &str) -> Result<String, DomainError> {
        LowercaseFileNamingPolicy::new().build_file_name(
            id,
            version,
            PACKAGE_FILE_SAVE_PATH_TEMPLATE,
            SYMBOL_PACKAGE_FILE_EXTENSION,
        )
    }

    #[test]
    fn test_symbol_package_file_name() {
        assert_eq!(
            symbol_file_name("Newtonsoft.Json", "12.0.3").unwrap(),
            "newtonsoft.json.12.0.3.snupkg"
        );
    }

    #[test]
    fn test_file_name_is_lowercased() {
        assert_eq!(
            symbol_file_name("My.Package", "1.0.0-RC.1").unwrap(),
            "my.package.1.0.0-rc.1.snupkg"
        );
    }

    #[test]
    fn test_file_name_is_deterministic() {
        let first = symbol_file_name("Foo", "1.0.0").unwrap();
        let second = symbol_file_name("Foo", "1.0.0").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_identity_is_rejected() {
        assert!(matches!(
            symbol_file_name("", "1.0.0"),
            Err(DomainError::Validation { .. })
        ));
        assert!(matches!(
            symbol_file_name("Foo", "  "),
            Err(DomainError::Validation { .. })
        ));
    }

    #[test]
    fn test_render_reorders_and_repeats_placeholders() {
        let rendered =
            render_path_template("{1}/{0}/{0}.{1}{2}", &["foo", "1.0.0", ".nupkg"]).unwrap();
        assert_eq!(rendered, "1.0.0/foo/foo.1.0.0.nupkg");
    }

    #[test]
    fn test_render_escaped_braces() {
        let rendered = render_path_template("{{{0}}}", &["id"]).unwrap();
        assert_eq!(rendered, "{id}");
    }

    #[test]
    fn test_render_rejects_malformed_templates() {
        for template in ["{0", "{3}", "{name}", "0}", "{}"] {
            assert!(
                matches!(
                    render_path_template(template, &["a", "b", "c"]),
                    Err(DomainError::Configuration { .. })
                ),
                "expected '{}' to be rejected",
                template
            );
        }
    }
}
