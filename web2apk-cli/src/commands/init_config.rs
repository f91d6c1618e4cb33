//! Sample configuration command

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use console::style;
use std::fs;
use std::path::PathBuf;
use tracing::debug;
use web2apk::{ConfigFormat, ConfigLoader};

use super::build::display_absolute;
use super::{print_banner, print_error, print_success};

/// Configuration file format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// YAML (default)
    #[default]
    Yaml,
    /// JSON
    Json,
}

impl From<FormatArg> for ConfigFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Yaml => Self::Yaml,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Generate a sample configuration file
#[derive(Debug, Args)]
pub struct InitConfigCommand {
    /// Configuration file format
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = FormatArg::Yaml)]
    pub format: FormatArg,

    /// Output file path (default: config.yaml or config.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite the file if it exists
    #[arg(long)]
    pub force: bool,
}

impl InitConfigCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the output exists and `--force` was not given,
    /// or the file cannot be written.
    pub fn execute(&self) -> Result<()> {
        let format = ConfigFormat::from(self.format);
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format.default_file_name()));

        print_banner("Web2APK Configuration Generator");

        if output.exists() && !self.force {
            print_error(&format!("Output file already exists: {}", output.display()));
            eprintln!("Use --force to overwrite the existing file");
            bail!("refusing to overwrite {}", output.display());
        }

        println!();
        println!("Generating sample {} configuration...", format.to_string().to_uppercase());
        let content = ConfigLoader::sample(format).context("Failed to generate configuration")?;
        fs::write(&output, content)
            .with_context(|| format!("Failed to write configuration: {}", output.display()))?;
        debug!(path = %output.display(), %format, "sample configuration written");

        print_success(&format!("Sample configuration saved to: {}", display_absolute(&output)));
        println!();
        println!("{}", style("Next steps:").bold());
        println!("  {} Edit {} with your website details", style("1.").cyan(), output.display());
        println!("  {} Prepare icon and splash screen assets", style("2.").cyan());
        println!(
            "  {} Run: {}",
            style("3.").cyan(),
            style(format!("web2apk build --config {}", output.display())).cyan()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_sample_that_loads() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("app.json");
        let cmd = InitConfigCommand {
            format: FormatArg::Json,
            output: Some(output.clone()),
            force: false,
        };
        cmd.execute().unwrap();

        let config = ConfigLoader::load(&output).unwrap();
        assert_eq!(config.package_id, "com.example.mywebapp");
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("config.yaml");
        fs::write(&output, "keep me").unwrap();

        let mut cmd = InitConfigCommand {
            format: FormatArg::Yaml,
            output: Some(output.clone()),
            force: false,
        };
        assert!(cmd.execute().is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "keep me");

        cmd.force = true;
        cmd.execute().unwrap();
        assert!(fs::read_to_string(&output).unwrap().contains("app_name: My Web App"));
    }
}
