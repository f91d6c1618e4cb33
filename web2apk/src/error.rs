//! Error types for the web2apk library

use std::path::PathBuf;
use thiserror::Error;

/// Result type for template generation
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Result type for icon generation
pub type IconResult<T> = Result<T, IconError>;

/// Errors raised while generating a wrapper project
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The template root directory does not exist
    #[error("template directory not found: {}", .0.display())]
    TemplateMissing(PathBuf),

    /// The generated project has no Android manifest
    #[error("AndroidManifest.xml not found: {}", .0.display())]
    ManifestMissing(PathBuf),

    /// Package relocation could not place a directory entry
    #[error("cannot move {} into {}: destination already exists", .from.display(), .to.display())]
    RelocationConflict {
        /// Entry being moved
        from: PathBuf,
        /// Destination that already holds an entry with the same name
        to: PathBuf,
    },

    /// Filesystem operation failed
    #[error("{action} {}: {source}", .path.display())]
    Io {
        /// What was being attempted (e.g. "failed to copy")
        action: &'static str,
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Walking the output tree failed
    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        /// Root of the walk
        path: PathBuf,
        /// Underlying walk error
        #[source]
        source: walkdir::Error,
    },
}

impl GenerateError {
    /// Create an I/O error tagged with the action and path
    #[must_use]
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while loading an app configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file does not exist
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Path exists but is not a regular file
    #[error("configuration path is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    /// Extension is not one of yaml, yml, json
    #[error("unsupported config file format: {0}. Use .yaml, .yml, or .json")]
    UnsupportedFormat(String),

    /// Document is empty or null
    #[error("configuration file is empty")]
    Empty,

    /// Reading the file failed
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// YAML could not be parsed or serialized
    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON could not be parsed or serialized
    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// One or more schema constraints were violated
    #[error("configuration validation failed:\n{0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Errors raised while generating launcher icons
#[derive(Debug, Error)]
pub enum IconError {
    /// No image processing backend is compiled in
    #[error("image processing is not available; rebuild with the `icons` feature")]
    Unavailable,

    /// The source image does not exist
    #[error("icon file not found: {}", .0.display())]
    SourceMissing(PathBuf),

    /// The source image could not be decoded
    #[error("failed to decode {}: {message}", .path.display())]
    Decode {
        /// Source image path
        path: PathBuf,
        /// Decoder message
        message: String,
    },

    /// An icon could not be encoded or written
    #[error("failed to write {}: {message}", .path.display())]
    Encode {
        /// Output icon path
        path: PathBuf,
        /// Encoder message
        message: String,
    },

    /// Creating a mipmap directory failed
    #[error("failed to create {}: {source}", .path.display())]
    Io {
        /// Directory path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Input validation failures reported before anything is mutated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A required value was empty
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    /// URL does not use http or https
    #[error("URL must start with http:// or https://")]
    UrlScheme,

    /// URL has an unrecognized host or shape
    #[error("Invalid URL format: {0}")]
    UrlFormat(String),

    /// Package identifier has fewer than two segments
    #[error("Package ID must have at least two segments (e.g., com.example)")]
    PackageTooShort,

    /// Package identifier contains an empty segment
    #[error("Package ID segments cannot be empty")]
    PackageEmptySegment,

    /// Segment does not start with a letter
    #[error("Package ID segment must start with a letter: {0}")]
    PackageSegmentStart(String),

    /// Segment contains characters outside the allowed set
    #[error("Package ID segment contains invalid characters: {0}")]
    PackageSegmentChars(String),

    /// Segment is a reserved Java keyword
    #[error("Package ID segment cannot be a Java keyword: {0}")]
    PackageKeyword(String),

    /// Package identifier does not match the lowercase template rule
    #[error("Invalid package name: {0}. Use lowercase segments such as com.example.myapp")]
    PackageFormat(String),

    /// Application name is longer than 50 characters
    #[error("Application name is too long (max 50 characters): {0}")]
    AppNameTooLong(usize),

    /// Application name is only whitespace
    #[error("Application name cannot be only whitespace")]
    AppNameBlank,

    /// A path that must exist does not
    #[error("{what} does not exist: {}", .path.display())]
    Missing {
        /// Description of the path
        what: String,
        /// Offending path
        path: PathBuf,
    },

    /// A path that must be a regular file is not
    #[error("{what} path is not a file: {}", .path.display())]
    NotAFile {
        /// Description of the path
        what: String,
        /// Offending path
        path: PathBuf,
    },

    /// A file has an unsupported extension
    #[error("{what} must be one of {allowed}: {}", .path.display())]
    Extension {
        /// Description of the path
        what: String,
        /// Comma separated list of accepted extensions
        allowed: String,
        /// Offending path
        path: PathBuf,
    },

    /// Output path exists and is not a directory
    #[error("Output path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Output directory cannot be written
    #[error("Output directory is not writable: {}", .0.display())]
    NotWritable(PathBuf),

    /// Output directory could not be created
    #[error("Failed to create output directory {}: {message}", .path.display())]
    CreateFailed {
        /// Directory path
        path: PathBuf,
        /// I/O error message
        message: String,
    },
}
