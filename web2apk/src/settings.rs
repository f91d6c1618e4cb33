//! Tool settings
//!
//! Settings are layered with clear precedence:
//!
//! 1. Environment variables (highest priority, `WEB2APK_` prefix)
//! 2. `./web2apk.toml`
//! 3. Hardcoded defaults (fallback)
//!
//! Command-line flags override whatever this resolves to.
//!
//! # Example Configuration
//!
//! ```toml
//! # web2apk.toml
//! template_dir = "/opt/web2apk/templates/android_wrapper"
//! wrapper_output_dir = "./android_wrapper"
//! dist_dir = "./dist"
//! decompile_output_dir = "./output"
//! log_format = "compact"
//! ```

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::observability::LogFormat;

/// File name searched in the working directory
pub const SETTINGS_FILE: &str = "web2apk.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "WEB2APK_";

/// Template tree bundled with this crate
///
/// This is an absolute path into the source checkout at build time. A
/// binary moved to another machine needs `template_dir` set in
/// `web2apk.toml` or `WEB2APK_TEMPLATE_DIR`.
#[must_use]
pub fn bundled_template_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("templates")
        .join("android_wrapper")
}

/// Resolved tool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of the Android wrapper template tree
    pub template_dir: PathBuf,

    /// Default output for `generate-wrapper`
    pub wrapper_output_dir: PathBuf,

    /// Default output for `build`
    pub dist_dir: PathBuf,

    /// Default output for the decompiler commands
    pub decompile_output_dir: PathBuf,

    /// Diagnostic log format
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template_dir: bundled_template_dir(),
            wrapper_output_dir: PathBuf::from("./android_wrapper"),
            dist_dir: PathBuf::from("./dist"),
            decompile_output_dir: PathBuf::from("./output"),
            log_format: LogFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from defaults, `./web2apk.toml` and `WEB2APK_*`
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file or an environment variable
    /// holds a value of the wrong type.
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(SETTINGS_FILE)
    }

    /// Load settings using a specific settings file
    ///
    /// A missing file is not an error; its layer is simply empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file or an environment variable
    /// holds a value of the wrong type.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, figment::Error> {
        Self::figment(path.as_ref()).extract()
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.template_dir.ends_with("templates/android_wrapper"));
        assert_eq!(settings.wrapper_output_dir, PathBuf::from("./android_wrapper"));
        assert_eq!(settings.dist_dir, PathBuf::from("./dist"));
        assert_eq!(settings.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let settings = Settings::load()?;
            assert_eq!(settings, Settings::default());
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env_precedence() {
        Jail::expect_with(|jail| {
            jail.create_file(
                SETTINGS_FILE,
                r#"
                dist_dir = "out/dist"
                log_format = "json"
                "#,
            )?;
            jail.set_env("WEB2APK_DIST_DIR", "env/dist");

            let settings = Settings::load()?;
            assert_eq!(settings.dist_dir, PathBuf::from("env/dist"));
            assert_eq!(settings.log_format, LogFormat::Json);
            assert_eq!(settings.wrapper_output_dir, PathBuf::from("./android_wrapper"));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_log_format_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(SETTINGS_FILE, r#"log_format = "xml""#)?;
            assert!(Settings::load().is_err());
            Ok(())
        });
    }
}
