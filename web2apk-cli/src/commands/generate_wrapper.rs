//! Android wrapper generation command

use anyhow::{bail, Context, Result};
use clap::Args;
use console::style;
use std::path::{Path, PathBuf};
use web2apk::{InputValidator, PackageIdProfile, Settings, TemplateManager, WrapperOptions};

use super::{print_banner, print_error, print_success, print_warning, spinner};

/// Generate an Android WebView wrapper project from the template
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateWrapperCommand {
    /// Target URL to load in the WebView
    #[arg(short, long)]
    pub url: String,

    /// Android package name (e.g., com.example.myapp)
    #[arg(short, long)]
    pub package: String,

    /// Application name
    #[arg(short, long)]
    pub name: String,

    /// Output directory for the generated project (default: ./android_wrapper)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// App icon (PNG/JPEG, resized for all densities)
    #[arg(short, long)]
    pub icon: Option<PathBuf>,

    /// Custom user agent string
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Enable offline caching support (default)
    #[arg(long, overrides_with = "no_offline")]
    pub offline: bool,

    /// Disable offline caching support
    #[arg(long, overrides_with = "offline")]
    pub no_offline: bool,

    /// Enable file access in the WebView
    #[arg(long, overrides_with = "no_file_access")]
    pub file_access: bool,

    /// Disable file access in the WebView (default)
    #[arg(long, overrides_with = "file_access")]
    pub no_file_access: bool,

    /// Additional Android permission (repeatable)
    #[arg(long = "permission", value_name = "PERMISSION")]
    pub permissions: Vec<String>,

    /// Template tree to generate from
    ///
    /// Defaults to `template_dir` in web2apk.toml or `WEB2APK_TEMPLATE_DIR`,
    /// falling back to the tree in the web2apk source checkout the binary
    /// was built from. Set one of these when the binary is installed
    /// elsewhere.
    #[arg(long)]
    pub template_dir: Option<PathBuf>,
}

impl GenerateWrapperCommand {
    /// Wrapper values described by the flags
    #[must_use]
    pub fn options(&self) -> WrapperOptions {
        let mut options = WrapperOptions::new(&self.package, &self.name, &self.url)
            .offline(!self.no_offline)
            .file_access(self.file_access && !self.no_file_access)
            .permissions(self.permissions.iter().cloned());
        if let Some(user_agent) = &self.user_agent {
            options = options.user_agent(user_agent);
        }
        options
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The package name, URL or icon path is invalid (nothing is written)
    /// - The template is missing
    /// - Copying, substitution or package relocation fails
    pub fn execute(&self, settings: &Settings) -> Result<()> {
        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| settings.wrapper_output_dir.clone());
        let template_dir = self
            .template_dir
            .clone()
            .unwrap_or_else(|| settings.template_dir.clone());

        print_banner("Android WebView Wrapper Generator");
        self.validate()?;

        let options = self.options();
        print_configuration(&options, &output_dir, self.icon.as_deref());

        let mut manager = TemplateManager::new(&output_dir).with_template_dir(template_dir);
        manager.configure(&options);

        let spinner = spinner()?;
        spinner.set_message("Generating wrapper project...");
        let generated = manager.generate();
        spinner.finish_and_clear();
        if let Err(e) = generated {
            print_error(&format!("Failed to generate wrapper: {e}"));
            return Err(e).context("Failed to generate wrapper");
        }

        if let Some(icon) = &self.icon {
            if !manager.add_icon(icon) {
                print_warning("App icons were not generated; the template defaults remain");
            }
        }

        print_success("Android wrapper generated successfully!");
        print_next_steps(&output_dir);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if let Err(e) = InputValidator::validate_package_id(&self.package, PackageIdProfile::Template) {
            print_error(&e.to_string());
            eprintln!("Package name must follow Java package naming conventions:");
            eprintln!("  - Start with lowercase letter");
            eprintln!("  - Contain at least one dot");
            eprintln!("  - Use only lowercase letters, numbers, and underscores");
            eprintln!("  - Example: com.example.myapp");
            bail!("invalid package name: {}", self.package);
        }

        if let Err(e) = InputValidator::validate_url(&self.url) {
            print_error(&e.to_string());
            bail!("invalid URL: {}", self.url);
        }

        if let Err(e) = InputValidator::validate_app_name(&self.name) {
            print_error(&e.to_string());
            bail!("invalid application name: {:?}", self.name);
        }

        if let Some(icon) = &self.icon {
            if let Err(e) = InputValidator::validate_file_exists(icon, "Icon file") {
                print_error(&e.to_string());
                bail!("invalid icon: {}", icon.display());
            }
        }

        Ok(())
    }
}

fn print_configuration(options: &WrapperOptions, output_dir: &Path, icon: Option<&Path>) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  URL:          {}", style(&options.target_url).cyan());
    println!("  Package:      {}", style(&options.package_name).cyan());
    println!("  Name:         {}", style(&options.app_name).cyan());
    println!("  Output:       {}", style(output_dir.display()).cyan());
    println!("  Offline Mode: {}", options.enable_offline);
    println!("  File Access:  {}", options.enable_file_access);
    if let Some(user_agent) = &options.user_agent {
        println!("  User Agent:   {user_agent}");
    }
    if let Some(icon) = icon {
        println!("  Icon:         {}", icon.display());
    }
    if !options.extra_permissions.is_empty() {
        println!("  Extra Permissions: {}", options.extra_permissions.join(", "));
    }
    println!();
}

fn print_next_steps(output_dir: &Path) {
    println!();
    println!("{}", style("Next steps:").bold());
    println!("  {} {}", style("1.").cyan(), style(format!("cd {}", output_dir.display())).cyan());
    println!("  {} {}", style("2.").cyan(), style("./gradlew assembleDebug").cyan());
    println!("  {} Find APK in: app/build/outputs/apk/debug/", style("3.").cyan());
    println!();
    println!("For release build:");
    println!("  {}", style("./gradlew assembleRelease").cyan());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn command(output_dir: PathBuf, package: &str, url: &str) -> GenerateWrapperCommand {
        GenerateWrapperCommand {
            url: url.to_string(),
            package: package.to_string(),
            name: "Test App".to_string(),
            output_dir: Some(output_dir),
            icon: None,
            user_agent: None,
            offline: false,
            no_offline: false,
            file_access: false,
            no_file_access: false,
            permissions: Vec::new(),
            template_dir: None,
        }
    }

    #[test]
    fn test_default_options() {
        let options = command(PathBuf::from("out"), "com.a.b", "https://a.io").options();
        assert!(options.enable_offline);
        assert!(!options.enable_file_access);
        assert_eq!(options.user_agent, None);
    }

    #[test]
    fn test_invalid_package_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("wrapper");
        let cmd = command(output.clone(), "com.Example.app", "https://a.io");
        assert!(cmd.execute(&Settings::default()).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_invalid_url_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("wrapper");
        let cmd = command(output.clone(), "com.example.app", "ftp://a.io");
        assert!(cmd.execute(&Settings::default()).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_malformed_url_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("wrapper");
        let cmd = command(output.clone(), "com.example.app", "https://");
        assert!(cmd.execute(&Settings::default()).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_invalid_app_name_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("wrapper");
        let long = "x".repeat(51);
        for name in ["", "   ", long.as_str()] {
            let mut cmd = command(output.clone(), "com.example.app", "https://a.io");
            cmd.name = name.to_string();
            assert!(cmd.execute(&Settings::default()).is_err(), "{name:?}");
            assert!(!output.exists());
        }
    }

    #[test]
    fn test_missing_icon_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("wrapper");
        let mut cmd = command(output.clone(), "com.example.app", "https://a.io");
        cmd.icon = Some(temp.path().join("missing.png"));
        assert!(cmd.execute(&Settings::default()).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_generates_project() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("wrapper");
        let mut cmd = command(output.clone(), "com.example.app", "https://example.org");
        cmd.permissions = vec!["android.permission.CAMERA".to_string()];
        cmd.execute(&Settings::default()).unwrap();

        assert!(output.join("app/src/main/java/com/example/app/MainActivity.kt").is_file());
        let manifest = fs::read_to_string(output.join("app/src/main/AndroidManifest.xml")).unwrap();
        assert!(manifest.contains("android.permission.CAMERA"));
    }

    #[test]
    fn test_missing_template_fails() {
        let temp = TempDir::new().unwrap();
        let mut cmd = command(temp.path().join("wrapper"), "com.example.app", "https://a.io");
        cmd.template_dir = Some(temp.path().join("no-template"));
        assert!(cmd.execute(&Settings::default()).is_err());
    }
}
