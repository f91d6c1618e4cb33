//! APK decompiler commands
//!
//! `decompile`, `analyze` and `extract` check their input and report what
//! they would do. The external decompilers are not driven yet.

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use console::style;
use serde_json::json;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;
use web2apk::{InputValidator, Settings};

use super::build::display_absolute;
use super::{print_banner, print_error, print_warning};

const NOT_IMPLEMENTED: &str = "Feature not yet implemented.";

/// Decompiler backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DecompileTool {
    /// Resources and smali via apktool
    Apktool,
    /// Java sources via jadx
    Jadx,
    /// Both
    #[default]
    All,
}

impl fmt::Display for DecompileTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Apktool => "apktool",
            Self::Jadx => "jadx",
            Self::All => "all",
        })
    }
}

/// Analysis report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human readable text
    #[default]
    Text,
    /// JSON document
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

/// Decompile an APK file
#[derive(Debug, Args)]
pub struct DecompileCommand {
    /// Path to the APK file
    pub apk: PathBuf,

    /// Output directory for decompiled files (default: ./output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Decompiler to use
    #[arg(short, long, value_enum, default_value_t = DecompileTool::All)]
    pub tool: DecompileTool,
}

/// Analyze an APK file
#[derive(Debug, Args)]
pub struct AnalyzeCommand {
    /// Path to the APK file
    pub apk: PathBuf,

    /// Where to write the analysis report
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Extract resources from an APK file
#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Path to the APK file
    pub apk: PathBuf,

    /// Output directory for extracted resources (default: ./output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl DecompileCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the APK path is invalid.
    pub fn execute(&self, settings: &Settings) -> Result<()> {
        let output = resolve_output(self.output.as_ref(), settings);
        run_stub(
            "Decompile",
            &self.apk,
            &[
                ("Output Directory", display_absolute(&output)),
                ("Tool", self.tool.to_string()),
            ],
        )
    }
}

impl AnalyzeCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the APK path is invalid.
    pub fn execute(&self, settings: &Settings) -> Result<()> {
        let output = resolve_output(self.output.as_ref(), settings);
        run_stub(
            "Analyze",
            &self.apk,
            &[
                ("Output", display_absolute(&output)),
                ("Format", self.format.to_string()),
            ],
        )?;

        if self.format == ReportFormat::Json {
            let params = json!({
                "apk": self.apk.display().to_string(),
                "output": display_absolute(&output),
                "format": self.format.to_string(),
                "status": "not_implemented",
            });
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
        Ok(())
    }
}

impl ExtractCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the APK path is invalid.
    pub fn execute(&self, settings: &Settings) -> Result<()> {
        let output = resolve_output(self.output.as_ref(), settings);
        run_stub("Extract", &self.apk, &[("Output Directory", display_absolute(&output))])
    }
}

fn resolve_output(output: Option<&PathBuf>, settings: &Settings) -> PathBuf {
    output.cloned().unwrap_or_else(|| settings.decompile_output_dir.clone())
}

fn run_stub(action: &str, apk: &Path, params: &[(&str, String)]) -> Result<()> {
    print_banner(concat!("APK Decompiler v", env!("CARGO_PKG_VERSION")));

    if let Err(e) = InputValidator::validate_apk_path(apk) {
        print_error(&format!("Validation failed: {e}"));
        bail!("invalid APK: {e}");
    }

    println!();
    println!("{}", style(format!("{action}:")).bold());
    println!("  APK File: {}", style(apk.display()).cyan());
    for (name, value) in params {
        println!("  {name}: {}", style(value).cyan());
    }
    println!();
    info!(action, apk = %apk.display(), "command accepted");
    print_warning(NOT_IMPLEMENTED);
    Ok(())
}
