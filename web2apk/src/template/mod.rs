//! Android wrapper project generation
//!
//! [`TemplateManager`] turns the bundled template tree into a project for a
//! specific website:
//!
//! 1. [`materialize`] copies the template into the output directory
//! 2. [`Placeholders::apply_to_tree`] fills in `{{TOKEN}}` placeholders
//! 3. [`relocate_package`] moves `com/template/webview` to the real package
//!
//! Launcher icons and manifest permissions are optional extras that log
//! their failures instead of aborting generation.

mod manifest;
mod materialize;
mod package;
mod placeholders;

pub use manifest::{inject_permissions, manifest_path, Injection, MANIFEST_PATH};
pub use materialize::materialize;
pub use package::{package_dir, relocate_package, Relocation, JAVA_ROOT, PLACEHOLDER_PACKAGE_PATH};
pub use placeholders::{keys, Placeholders, Substitution, TEXT_EXTENSIONS};

use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::config::uses_permission_xml;
use crate::error::GenerateResult;
use crate::icons::IconGenerator;
use crate::settings::bundled_template_dir;

/// Package the template sources are declared in
pub const DEFAULT_PACKAGE: &str = "com.template.webview";

/// User agent used when none is configured
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 10) AppleWebKit/537.36";

/// Values applied to a generated wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperOptions {
    /// Android package identifier
    pub package_name: String,
    /// Launcher label
    pub app_name: String,
    /// Website loaded by the WebView
    pub target_url: String,
    /// Custom user agent; the template default is kept when `None`
    pub user_agent: Option<String>,
    /// Show the bundled offline page when the network is unavailable
    pub enable_offline: bool,
    /// Allow `file://` access
    pub enable_file_access: bool,
    /// Extra permissions substituted into `{{EXTRA_PERMISSIONS}}`
    pub extra_permissions: Vec<String>,
}

impl WrapperOptions {
    /// Options with offline mode on and file access off
    #[must_use]
    pub fn new(package_name: impl Into<String>, app_name: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            app_name: app_name.into(),
            target_url: target_url.into(),
            user_agent: None,
            enable_offline: true,
            enable_file_access: false,
            extra_permissions: Vec::new(),
        }
    }

    /// Set a custom user agent
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Toggle offline mode
    #[must_use]
    pub const fn offline(mut self, enabled: bool) -> Self {
        self.enable_offline = enabled;
        self
    }

    /// Toggle file access
    #[must_use]
    pub const fn file_access(mut self, enabled: bool) -> Self {
        self.enable_file_access = enabled;
        self
    }

    /// Add extra permissions
    #[must_use]
    pub fn permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_permissions.extend(permissions.into_iter().map(Into::into));
        self
    }
}

const fn flag(enabled: bool) -> &'static str {
    if enabled {
        "true"
    } else {
        "false"
    }
}

/// Generates a wrapper project into an output directory
#[derive(Debug, Clone)]
pub struct TemplateManager {
    template_dir: PathBuf,
    output_dir: PathBuf,
    placeholders: Placeholders,
}

impl TemplateManager {
    /// Manager writing to `output_dir` from the bundled template
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: bundled_template_dir(),
            output_dir: output_dir.into(),
            placeholders: Placeholders::default(),
        }
    }

    /// Use a different template tree
    #[must_use]
    pub fn with_template_dir(mut self, template_dir: impl Into<PathBuf>) -> Self {
        self.template_dir = template_dir.into();
        self
    }

    /// Template tree in use
    #[must_use]
    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    /// Output directory
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Current placeholder values
    #[must_use]
    pub const fn placeholders(&self) -> &Placeholders {
        &self.placeholders
    }

    /// Apply `options` to the placeholder values
    pub fn configure(&mut self, options: &WrapperOptions) {
        let values = &mut self.placeholders;
        values.set(keys::PACKAGE_NAME, options.package_name.as_str());
        values.set(keys::APP_NAME, options.app_name.as_str());
        values.set(keys::TARGET_URL, options.target_url.as_str());
        if let Some(user_agent) = options.user_agent.as_deref().filter(|ua| !ua.is_empty()) {
            values.set(keys::USER_AGENT, user_agent);
        }
        values.set(keys::ENABLE_OFFLINE_MODE, flag(options.enable_offline));
        values.set(keys::ENABLE_FILE_ACCESS, flag(options.enable_file_access));
        if !options.extra_permissions.is_empty() {
            values.set(keys::EXTRA_PERMISSIONS, uses_permission_xml(&options.extra_permissions));
        }
    }

    /// Copy the template tree into the output directory
    ///
    /// # Errors
    ///
    /// See [`materialize`].
    pub fn copy_template(&self) -> GenerateResult<usize> {
        materialize(&self.template_dir, &self.output_dir)
    }

    /// Substitute placeholders in the output directory
    ///
    /// # Errors
    ///
    /// Returns an error only if the output directory cannot be walked.
    pub fn replace_placeholders(&self) -> GenerateResult<Substitution> {
        info!("replacing placeholders in template files");
        let summary = self.placeholders.apply_to_tree(&self.output_dir)?;
        info!(
            updated = summary.updated,
            failed = summary.failed,
            "placeholders replaced"
        );
        Ok(summary)
    }

    /// Move the placeholder package to the configured package
    ///
    /// # Errors
    ///
    /// See [`relocate_package`].
    pub fn rename_package(&self) -> GenerateResult<Relocation> {
        let package = self.placeholders.get(keys::PACKAGE_NAME).unwrap_or(DEFAULT_PACKAGE);
        info!(package, "renaming package");
        relocate_package(&self.output_dir, package)
    }

    /// Copy, substitute and relocate, stopping at the first failure
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that fails.
    pub fn generate(&self) -> GenerateResult<()> {
        self.copy_template()?;
        self.replace_placeholders()?;
        self.rename_package()?;
        info!(path = %self.output_dir.display(), "template generated");
        Ok(())
    }

    /// Render launcher icons from `icon_path`
    ///
    /// Failures are logged and reported as `false`; generation itself is
    /// never aborted by a bad icon.
    pub fn add_icon(&self, icon_path: &Path) -> bool {
        self.add_icon_with(&IconGenerator::new(), icon_path)
    }

    /// Render launcher icons with a specific generator
    pub fn add_icon_with(&self, generator: &IconGenerator, icon_path: &Path) -> bool {
        if !generator.is_available() {
            warn!("image processing not available, cannot generate app icons");
            return false;
        }
        info!(icon = %icon_path.display(), "generating app icons");
        match generator.generate(icon_path, &self.output_dir) {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, "failed to generate icons");
                false
            }
        }
    }

    /// Inject `<uses-permission>` elements into the manifest
    ///
    /// Failures are logged and reported as `None`.
    pub fn add_permissions<S: AsRef<str>>(&self, permissions: &[S]) -> Option<Injection> {
        match inject_permissions(&self.output_dir, permissions) {
            Ok(injection) => Some(injection),
            Err(e) => {
                error!(error = %e, "failed to add permissions");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::UnavailableProcessor;
    use tempfile::TempDir;

    #[test]
    fn test_configure_sets_values() {
        let mut manager = TemplateManager::new("out");
        manager.configure(
            &WrapperOptions::new("com.acme.shop", "Shop", "https://shop.acme.io")
                .offline(false)
                .file_access(true)
                .permissions(["android.permission.CAMERA", "android.permission.VIBRATE"]),
        );
        let values = manager.placeholders();
        assert_eq!(values.get(keys::PACKAGE_NAME), Some("com.acme.shop"));
        assert_eq!(values.get(keys::APP_NAME), Some("Shop"));
        assert_eq!(values.get(keys::TARGET_URL), Some("https://shop.acme.io"));
        assert_eq!(values.get(keys::USER_AGENT), Some(DEFAULT_USER_AGENT));
        assert_eq!(values.get(keys::ENABLE_OFFLINE_MODE), Some("false"));
        assert_eq!(values.get(keys::ENABLE_FILE_ACCESS), Some("true"));
        assert_eq!(
            values.get(keys::EXTRA_PERMISSIONS),
            Some(
                "<uses-permission android:name=\"android.permission.CAMERA\" />\n    \
                 <uses-permission android:name=\"android.permission.VIBRATE\" />"
            )
        );
    }

    #[test]
    fn test_configure_user_agent() {
        let mut manager = TemplateManager::new("out");
        manager.configure(&WrapperOptions::new("a.b", "A", "https://a.io").user_agent("Bot/1.0"));
        assert_eq!(manager.placeholders().get(keys::USER_AGENT), Some("Bot/1.0"));
        assert_eq!(manager.placeholders().get(keys::EXTRA_PERMISSIONS), Some(""));
    }

    #[test]
    fn test_generate_fails_fast_on_missing_template() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        let manager = TemplateManager::new(&out).with_template_dir(temp.path().join("missing"));
        assert!(manager.generate().is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_optional_steps_do_not_fail() {
        let temp = TempDir::new().unwrap();
        let manager = TemplateManager::new(temp.path());
        let generator = IconGenerator::with_processor(Box::new(UnavailableProcessor));
        assert!(!manager.add_icon_with(&generator, &temp.path().join("icon.png")));
        assert_eq!(manager.add_permissions(&["android.permission.CAMERA"]), None);
    }
}
