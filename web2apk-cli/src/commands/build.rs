//! APK build preparation command

use anyhow::{bail, Result};
use clap::Args;
use console::style;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use web2apk::validation::validate_config_assets;
use web2apk::{AppConfig, ConfigLoader, DependencyChecker, InputValidator, Settings, Toolset};

use super::check::print_report;
use super::{print_banner, print_error, print_step, print_success, print_warning};

/// Validate a configuration and check that an APK can be built
#[derive(Debug, Args)]
pub struct BuildCommand {
    /// Path to configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Output directory for the generated APK (default: ./dist)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip asset file validation (not recommended)
    #[arg(long)]
    pub skip_validation: bool,
}

impl BuildCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration file is missing or has an unsupported extension
    /// - The configuration does not parse or violates the schema
    /// - A referenced asset is missing (unless skipped)
    /// - The output directory cannot be prepared
    /// - A required build tool is missing
    pub fn execute(&self, settings: &Settings) -> Result<()> {
        self.execute_with(settings, &DependencyChecker::new())
    }

    /// Execute the command with a specific dependency checker
    ///
    /// # Errors
    ///
    /// See [`BuildCommand::execute`].
    pub fn execute_with(&self, settings: &Settings, checker: &DependencyChecker) -> Result<()> {
        let output = self.output.clone().unwrap_or_else(|| settings.dist_dir.clone());

        print_banner(concat!("Web2APK Builder v", env!("CARGO_PKG_VERSION")));
        println!();
        println!("Configuration:    {}", style(self.config.display()).cyan());
        println!("Output Directory: {}", style(output.display()).cyan());

        print_step(1, "Validating configuration file...");
        if let Err(e) = InputValidator::validate_config_file(&self.config) {
            print_error(&format!("Configuration file validation failed: {e}"));
            bail!("invalid configuration file: {e}");
        }

        print_step(2, "Loading and parsing configuration...");
        let config = match ConfigLoader::load(&self.config) {
            Ok(config) => config,
            Err(e) => {
                print_error(&format!("Failed to load configuration: {e}"));
                bail!("failed to load configuration");
            }
        };
        print_success("Configuration loaded successfully");
        print_summary(&config);

        print_step(3, "Validating configuration values...");
        if self.skip_validation {
            print_warning("Skipping asset validation (--skip-validation flag set)");
            warn!("asset validation skipped");
        } else {
            let errors = validate_config_assets(&config);
            if !errors.is_empty() {
                print_error("Configuration validation failed:");
                for error in &errors {
                    eprintln!("  - {error}");
                }
                bail!("{} asset(s) failed validation", errors.len());
            }
            print_success("Configuration validation passed");
        }

        print_step(4, "Validating output directory...");
        if let Err(e) = InputValidator::validate_output_dir(&output, true) {
            print_error(&format!("Output directory validation failed: {e}"));
            bail!("invalid output directory: {e}");
        }
        print_success(&format!("Output directory ready: {}", display_absolute(&output)));

        print_step(5, "Checking dependencies...");
        let report = checker.check(Toolset::Web2Apk);
        print_report(&report);
        if !report.all_available() {
            print_error("Cannot proceed: Required dependencies are missing");
            bail!("required dependencies are missing");
        }

        info!(package = %config.package_id, "build preparation complete");
        print_ready(&config, &output);
        Ok(())
    }
}

fn print_summary(config: &AppConfig) {
    println!("  - App Name:      {}", style(&config.app_name).cyan());
    println!("  - Package ID:    {}", style(&config.package_id).cyan());
    println!("  - URL:           {}", style(&config.url).cyan());
    println!(
        "  - Version:       {} (code: {})",
        config.version_name, config.version_code
    );
    println!("  - Build Variant: {}", config.build_variant);
}

fn print_ready(config: &AppConfig, output: &Path) {
    println!();
    print_banner("Build Preparation Complete");
    println!();
    println!("Note: APK building is not implemented yet.");
    println!("The configuration has been validated and all dependencies are available.");
    println!();
    print_success("Ready to build APK!");
    println!();
    println!("{}", style("Build specification:").bold());
    println!("  - Source URL:     {}", config.url);
    println!("  - Target Package: {}", config.package_id);
    println!("  - Output:         {}", display_absolute(output));
}

pub(crate) fn display_absolute(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
