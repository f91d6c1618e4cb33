//! Input validation
//!
//! Checks run before any command touches the filesystem. Each check returns
//! an [`InputError`] describing exactly what is wrong so the CLI can report
//! it and exit without side effects.

mod package;

pub use package::{validate_package_id, PackageIdProfile, JAVA_KEYWORDS};

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::error::InputError;
use crate::icons::Density;

/// Image extensions accepted for icons and splash screens
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Extensions accepted for app configuration files
pub const CONFIG_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^https?://",
        r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+[A-Z]{2,6}\.?|",
        r"localhost|",
        r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
        r"(?::\d+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .expect("static pattern compiles")
});

/// Stateless collection of input checks
#[derive(Debug, Clone, Copy, Default)]
pub struct InputValidator;

impl InputValidator {
    /// Check the scheme and overall shape of a URL
    ///
    /// # Errors
    ///
    /// Returns an error for an empty URL, a non-http(s) scheme, or a host
    /// that is not a domain name, `localhost` or an IPv4 address.
    pub fn validate_url(url: &str) -> Result<(), InputError> {
        check_url_scheme(url)?;
        if !URL_PATTERN.is_match(url) {
            return Err(InputError::UrlFormat(url.to_string()));
        }
        debug!(url, "URL is valid");
        Ok(())
    }

    /// Check a package identifier under the given profile
    ///
    /// # Errors
    ///
    /// Returns the first rule the identifier breaks.
    pub fn validate_package_id(package_id: &str, profile: PackageIdProfile) -> Result<(), InputError> {
        validate_package_id(package_id, profile)?;
        debug!(package_id, ?profile, "package ID is valid");
        Ok(())
    }

    /// Check an application name
    ///
    /// # Errors
    ///
    /// Returns an error for an empty, blank, or over-long name.
    pub fn validate_app_name(app_name: &str) -> Result<(), InputError> {
        if app_name.is_empty() {
            return Err(InputError::Empty("Application name"));
        }
        let length = app_name.chars().count();
        if length > 50 {
            return Err(InputError::AppNameTooLong(length));
        }
        if app_name.trim().is_empty() {
            return Err(InputError::AppNameBlank);
        }
        debug!(app_name, "application name is valid");
        Ok(())
    }

    /// Check that an output directory exists and is writable
    ///
    /// When the directory is missing and `create_if_missing` is set, it is
    /// created along with any parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is a file, is read-only, is missing
    /// (without `create_if_missing`) or cannot be created.
    pub fn validate_output_dir(output_dir: &Path, create_if_missing: bool) -> Result<(), InputError> {
        if output_dir.as_os_str().is_empty() {
            return Err(InputError::Empty("Output directory path"));
        }

        if output_dir.exists() {
            if !output_dir.is_dir() {
                return Err(InputError::NotADirectory(output_dir.to_path_buf()));
            }
            let read_only = fs::metadata(output_dir)
                .map(|meta| meta.permissions().readonly())
                .unwrap_or(true);
            if read_only {
                return Err(InputError::NotWritable(output_dir.to_path_buf()));
            }
            debug!(path = %output_dir.display(), "output directory exists and is writable");
            return Ok(());
        }

        if !create_if_missing {
            return Err(InputError::Missing {
                what: "Output directory".to_string(),
                path: output_dir.to_path_buf(),
            });
        }

        fs::create_dir_all(output_dir).map_err(|e| InputError::CreateFailed {
            path: output_dir.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %output_dir.display(), "created output directory");
        Ok(())
    }

    /// Check that `path` is an existing regular file
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty, missing, or not a file.
    pub fn validate_file_exists(path: &Path, what: &str) -> Result<(), InputError> {
        if path.as_os_str().is_empty() {
            return Err(InputError::Empty("File path"));
        }
        if !path.exists() {
            return Err(InputError::Missing {
                what: what.to_string(),
                path: path.to_path_buf(),
            });
        }
        if !path.is_file() {
            return Err(InputError::NotAFile {
                what: what.to_string(),
                path: path.to_path_buf(),
            });
        }
        debug!(path = %path.display(), "{what} exists");
        Ok(())
    }

    /// Check that `path` is an existing image with a supported extension
    ///
    /// # Errors
    ///
    /// Returns an error if the file check fails or the extension is not
    /// png, jpg, jpeg or webp.
    pub fn validate_image_file(path: &Path, what: &str) -> Result<(), InputError> {
        Self::validate_file_exists(path, what)?;
        check_extension(path, what, IMAGE_EXTENSIONS)
    }

    /// Check that `path` is an existing YAML or JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file check fails or the extension is not
    /// yaml, yml or json.
    pub fn validate_config_file(path: &Path) -> Result<(), InputError> {
        let what = "Configuration file";
        Self::validate_file_exists(path, what)?;
        check_extension(path, what, CONFIG_EXTENSIONS)
    }

    /// Check that `path` points at an APK
    ///
    /// A missing `.apk` extension is only logged.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty, missing, or not a file.
    pub fn validate_apk_path(path: &Path) -> Result<(), InputError> {
        Self::validate_file_exists(path, "APK file")?;
        if !has_extension(path, &["apk"]) {
            warn!(path = %path.display(), "file does not have .apk extension");
        }
        Ok(())
    }
}

/// Check only that a URL is non-empty and uses http or https
///
/// # Errors
///
/// Returns an error for an empty URL or any other scheme.
pub fn check_url_scheme(url: &str) -> Result<(), InputError> {
    if url.is_empty() {
        return Err(InputError::Empty("URL"));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(InputError::UrlScheme)
    }
}

/// Check every asset a configuration references
///
/// Unlike the other checks this collects all failures, so the user can fix
/// a configuration in one pass.
#[must_use]
pub fn validate_config_assets(config: &AppConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(icons) = &config.icons {
        for density in Density::ALL {
            if let Some(path) = icons.path_for(density) {
                let what = format!("Icon ({})", density.name());
                if let Err(e) = InputValidator::validate_image_file(Path::new(path), &what) {
                    errors.push(e.to_string());
                }
            }
        }
    }

    if let Some(image) = config.splash.as_ref().and_then(|s| s.image.as_deref()) {
        if let Err(e) = InputValidator::validate_image_file(Path::new(image), "Splash screen image") {
            errors.push(e.to_string());
        }
    }

    if let Some(keystore) = config.signing.as_ref().and_then(|s| s.keystore_path.as_deref()) {
        if let Err(e) = InputValidator::validate_file_exists(Path::new(keystore), "Keystore file") {
            errors.push(e.to_string());
        }
    }

    errors
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)))
}

fn check_extension(path: &Path, what: &str, allowed: &[&str]) -> Result<(), InputError> {
    if has_extension(path, allowed) {
        debug!(path = %path.display(), "{what} format is valid");
        Ok(())
    } else {
        Err(InputError::Extension {
            what: what.to_string(),
            allowed: allowed
                .iter()
                .map(|ext| format!(".{ext}"))
                .collect::<Vec<_>>()
                .join(", "),
            path: path.to_path_buf(),
        })
    }
}
