//! App configuration files
//!
//! An app configuration describes the website to wrap and how the resulting
//! APK should look. Files are YAML (`.yaml`, `.yml`) or JSON (`.json`).
//!
//! # Example Configuration
//!
//! ```yaml
//! url: https://example.com
//! app_name: My Web App
//! package_id: com.example.mywebapp
//! permissions:
//!   - android.permission.INTERNET
//! build_variant: release
//! orientation: portrait
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use web2apk::config::ConfigLoader;
//!
//! # fn example() -> Result<(), web2apk::ConfigError> {
//! let config = ConfigLoader::load("config.yaml")?;
//! println!("{} -> {}", config.url, config.package_id);
//! # Ok(())
//! # }
//! ```
//!
//! Validation collects every violated constraint rather than stopping at
//! the first, so a single run reports everything that needs fixing.

pub mod permissions;

pub use permissions::{is_allowed, uses_permission_xml, ALLOWED_PERMISSIONS};

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::ConfigError;
use crate::icons::Density;
use crate::template::DEFAULT_USER_AGENT;
use crate::validation::{check_url_scheme, validate_package_id, PackageIdProfile};

/// APK signing configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningConfig {
    /// Path to the keystore
    pub keystore_path: Option<String>,
    /// Keystore password
    pub keystore_password: Option<String>,
    /// Alias of the signing key
    pub key_alias: Option<String>,
    /// Password of the signing key
    pub key_password: Option<String>,
}

/// Icon paths for each density bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// 48px icon
    pub mdpi: Option<String>,
    /// 72px icon
    pub hdpi: Option<String>,
    /// 96px icon
    pub xhdpi: Option<String>,
    /// 144px icon
    pub xxhdpi: Option<String>,
    /// 192px icon
    pub xxxhdpi: Option<String>,
}

impl IconConfig {
    /// Configured path for `density`, if any
    #[must_use]
    pub fn path_for(&self, density: Density) -> Option<&str> {
        let path = match density {
            Density::Mdpi => &self.mdpi,
            Density::Hdpi => &self.hdpi,
            Density::Xhdpi => &self.xhdpi,
            Density::Xxhdpi => &self.xxhdpi,
            Density::Xxxhdpi => &self.xxxhdpi,
        };
        path.as_deref()
    }
}

/// Splash screen configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashConfig {
    /// Splash image path
    pub image: Option<String>,
    /// Background color as `#RRGGBB`
    pub background_color: Option<String>,
    /// How long the splash stays visible
    pub duration_ms: Option<u64>,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            image: None,
            background_color: Some("#FFFFFF".to_string()),
            duration_ms: Some(2000),
        }
    }
}

/// Offline and caching configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Serve cached pages when offline
    pub enable_offline: bool,
    /// WebView cache size
    pub cache_size_mb: u32,
    /// Cache strategy name
    pub cache_strategy: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enable_offline: false,
            cache_size_mb: 50,
            cache_strategy: "default".to_string(),
        }
    }
}

/// Build variant of the produced APK
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BuildVariant {
    /// Debuggable build
    Debug,
    /// Optimized, signed build
    #[default]
    Release,
}

impl BuildVariant {
    /// Lowercase name as written in configuration files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }
}

impl TryFrom<String> for BuildVariant {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            _ => Err("Build variant must be one of: debug, release".to_string()),
        }
    }
}

impl From<BuildVariant> for String {
    fn from(value: BuildVariant) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screen orientation of the wrapper activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Orientation {
    /// Locked to portrait
    #[default]
    Portrait,
    /// Locked to landscape
    Landscape,
    /// Follows the device
    Unspecified,
}

impl Orientation {
    /// Lowercase name as written in configuration files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
            Self::Unspecified => "unspecified",
        }
    }
}

impl TryFrom<String> for Orientation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            "unspecified" => Ok(Self::Unspecified),
            _ => Err("Orientation must be one of: portrait, landscape, unspecified".to_string()),
        }
    }
}

impl From<Orientation> for String {
    fn from(value: Orientation) -> Self {
        value.as_str().to_string()
    }
}

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Website URL to wrap
    pub url: String,

    /// Application name shown on the launcher
    #[validate(length(min = 1, max = 50, message = "Application name must be 1-50 characters"))]
    pub app_name: String,

    /// Android package identifier (e.g. `com.example.app`)
    pub package_id: String,

    /// Human readable version
    #[serde(default = "default_version_name")]
    pub version_name: String,

    /// Monotonic version number
    #[serde(default = "default_version_code")]
    #[validate(range(min = 1, message = "Version code must be at least 1"))]
    pub version_code: u32,

    /// Requested Android permissions
    #[serde(default)]
    pub permissions: Vec<String>,

    /// Prepared icons per density
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icons: Option<IconConfig>,

    /// Splash screen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splash: Option<SplashConfig>,

    /// Debug or release
    #[serde(default)]
    pub build_variant: BuildVariant,

    /// Signing credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing: Option<SigningConfig>,

    /// Offline cache settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheConfig>,

    /// Custom WebView user agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Activity orientation
    #[serde(default)]
    pub orientation: Orientation,

    /// Toolbar / status bar color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
}

fn default_version_name() -> String {
    "1.0.0".to_string()
}

const fn default_version_code() -> u32 {
    1
}

impl AppConfig {
    /// Validate every constraint, collecting all violations
    ///
    /// # Errors
    ///
    /// Returns every violated constraint keyed by field name.
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if let Err(e) = check_url_scheme(&self.url) {
            errors.add("url", violation("url", e.to_string()));
        }

        if let Err(e) = validate_package_id(&self.package_id, PackageIdProfile::Strict) {
            errors.add("package_id", violation("package_id", e.to_string()));
        }

        for permission in &self.permissions {
            if !is_allowed(permission) {
                errors.add(
                    "permissions",
                    violation(
                        "permission_not_allowed",
                        format!(
                            "Permission not allowed: {permission}\nAllowed permissions: {}",
                            ALLOWED_PERMISSIONS.join(", ")
                        ),
                    ),
                );
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The configuration written by `init-config`
    #[must_use]
    pub fn sample() -> Self {
        Self {
            url: "https://example.com".to_string(),
            app_name: "My Web App".to_string(),
            package_id: "com.example.mywebapp".to_string(),
            version_name: default_version_name(),
            version_code: default_version_code(),
            permissions: vec![
                "android.permission.INTERNET".to_string(),
                "android.permission.ACCESS_NETWORK_STATE".to_string(),
            ],
            icons: Some(IconConfig {
                mdpi: Some("assets/icon-mdpi.png".to_string()),
                hdpi: Some("assets/icon-hdpi.png".to_string()),
                xhdpi: Some("assets/icon-xhdpi.png".to_string()),
                xxhdpi: Some("assets/icon-xxhdpi.png".to_string()),
                xxxhdpi: Some("assets/icon-xxxhdpi.png".to_string()),
            }),
            splash: Some(SplashConfig {
                image: Some("assets/splash.png".to_string()),
                ..SplashConfig::default()
            }),
            build_variant: BuildVariant::Release,
            signing: Some(SigningConfig {
                keystore_path: Some("path/to/keystore.jks".to_string()),
                keystore_password: Some("keystore_password".to_string()),
                key_alias: Some("key_alias".to_string()),
                key_password: Some("key_password".to_string()),
            }),
            cache: Some(CacheConfig {
                enable_offline: true,
                ..CacheConfig::default()
            }),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            orientation: Orientation::Portrait,
            theme_color: Some("#2196F3".to_string()),
        }
    }
}

fn violation(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

/// Serialization format of an app configuration file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML document
    #[default]
    Yaml,
    /// JSON document
    Json,
}

impl ConfigFormat {
    /// Format implied by a file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Default file name for `init-config`
    #[must_use]
    pub const fn default_file_name(self) -> &'static str {
        match self {
            Self::Yaml => "config.yaml",
            Self::Json => "config.json",
        }
    }
}

impl FromStr for ConfigFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => f.write_str("yaml"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Loads and validates app configuration files
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, has an unsupported
    /// extension, is empty, cannot be parsed, or violates the schema.
    pub fn load(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(ConfigError::NotAFile(path.to_path_buf()));
        }

        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            let ext = path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default();
            ConfigError::UnsupportedFormat(ext)
        })?;

        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content, format)?;
        config.check()?;

        debug!(path = %path.display(), "configuration loaded and validated");
        Ok(config)
    }

    /// Parse a configuration document without touching the filesystem
    ///
    /// # Errors
    ///
    /// Returns an error if the document is empty or does not match the
    /// schema's shape. Constraint checks are left to [`AppConfig::check`].
    pub fn parse(content: &str, format: ConfigFormat) -> Result<AppConfig, ConfigError> {
        if content.trim().is_empty() {
            return Err(ConfigError::Empty);
        }

        match format {
            ConfigFormat::Yaml => {
                let value: serde_yaml::Value = serde_yaml::from_str(content)?;
                let empty = match &value {
                    serde_yaml::Value::Null => true,
                    serde_yaml::Value::Mapping(map) => map.is_empty(),
                    _ => false,
                };
                if empty {
                    return Err(ConfigError::Empty);
                }
                Ok(serde_yaml::from_value(value)?)
            }
            ConfigFormat::Json => {
                let value: serde_json::Value = serde_json::from_str(content)?;
                let empty = match &value {
                    serde_json::Value::Null => true,
                    serde_json::Value::Object(map) => map.is_empty(),
                    _ => false,
                };
                if empty {
                    return Err(ConfigError::Empty);
                }
                Ok(serde_json::from_value(value)?)
            }
        }
    }

    /// Render the sample configuration
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn sample(format: ConfigFormat) -> Result<String, ConfigError> {
        let sample = AppConfig::sample();
        Ok(match format {
            ConfigFormat::Yaml => serde_yaml::to_string(&sample)?,
            ConfigFormat::Json => serde_json::to_string_pretty(&sample)?,
        })
    }
}
