//! Android package identifier rules
//!
//! The two entry points accept different identifiers:
//!
//! - [`PackageIdProfile::Template`] guards `generate-wrapper`. Every segment
//!   is lowercase (`[a-z][a-z0-9_]*`) since segments become directory names
//!   in the generated source tree.
//! - [`PackageIdProfile::Strict`] guards configuration files and general
//!   input validation. Segments may use either case but may not be Java
//!   keywords.
//!
//! Neither profile is a superset of the other: `com.class.app` passes
//! `Template` and fails `Strict`, `com.Example.app` does the reverse.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::InputError;

/// Reserved words that cannot appear as a package segment
pub const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while",
];

static TEMPLATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9_]*(\.[a-z][a-z0-9_]*)+$").expect("static pattern compiles")
});

/// Which package identifier rules to apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PackageIdProfile {
    /// Lowercase-only segments, used when generating a wrapper project
    Template,
    /// Mixed-case segments without Java keywords, used for config files
    #[default]
    Strict,
}

/// Validate `package_id` under `profile`
///
/// # Errors
///
/// Returns the first rule the identifier breaks.
pub fn validate_package_id(package_id: &str, profile: PackageIdProfile) -> Result<(), InputError> {
    match profile {
        PackageIdProfile::Template => validate_template(package_id),
        PackageIdProfile::Strict => validate_strict(package_id),
    }
}

fn validate_template(package_id: &str) -> Result<(), InputError> {
    if package_id.is_empty() {
        return Err(InputError::Empty("Package ID"));
    }
    if TEMPLATE_PATTERN.is_match(package_id) {
        Ok(())
    } else {
        Err(InputError::PackageFormat(package_id.to_string()))
    }
}

fn validate_strict(package_id: &str) -> Result<(), InputError> {
    if package_id.is_empty() {
        return Err(InputError::Empty("Package ID"));
    }

    let parts: Vec<&str> = package_id.split('.').collect();
    if parts.len() < 2 {
        return Err(InputError::PackageTooShort);
    }

    for part in parts {
        let Some(first) = part.chars().next() else {
            return Err(InputError::PackageEmptySegment);
        };
        if !first.is_ascii_alphabetic() {
            return Err(InputError::PackageSegmentStart(part.to_string()));
        }
        if !part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(InputError::PackageSegmentChars(part.to_string()));
        }
        if JAVA_KEYWORDS.contains(&part) {
            return Err(InputError::PackageKeyword(part.to_string()));
        }
    }

    Ok(())
}
