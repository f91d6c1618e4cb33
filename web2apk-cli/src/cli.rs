//! Argument parsers for both binaries

use anyhow::Result;
use clap::{Parser, Subcommand};
use web2apk::Settings;

use crate::commands::{
    AnalyzeCommand, BuildCommand, CheckDepsCommand, DecompileCommand, ExtractCommand,
    GenerateWrapperCommand, InitConfigCommand,
};

/// Web2APK - convert websites to Android APK applications
#[derive(Debug, Parser)]
#[command(name = "web2apk")]
#[command(version)]
#[command(about = "Convert websites to Android APK applications", long_about = None)]
pub struct Web2ApkCli {
    /// Enable verbose logging (DEBUG level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Web2ApkCommand,
}

/// `web2apk` commands
#[derive(Debug, Subcommand)]
pub enum Web2ApkCommand {
    /// Validate a configuration and check that an APK can be built
    ///
    /// Example:
    ///   web2apk build --config config.yaml --output ./dist
    Build(BuildCommand),

    /// Generate a sample configuration file
    ///
    /// Examples:
    ///   web2apk init-config --format yaml
    ///   web2apk init-config --format json --output myconfig.json
    InitConfig(InitConfigCommand),

    /// Generate an Android WebView wrapper project from the template
    ///
    /// Example:
    ///   web2apk generate-wrapper --url https://example.com \
    ///       --package com.example.myapp --name "My App" --icon ./icon.png
    GenerateWrapper(GenerateWrapperCommand),

    /// Check for the Android build toolchain
    CheckDeps,
}

impl Web2ApkCommand {
    /// Run the selected command
    ///
    /// # Errors
    ///
    /// Returns the command's error; the binary exits with status 1.
    pub fn execute(&self, settings: &Settings) -> Result<()> {
        match self {
            Self::Build(cmd) => cmd.execute(settings),
            Self::InitConfig(cmd) => cmd.execute(),
            Self::GenerateWrapper(cmd) => cmd.execute(settings),
            Self::CheckDeps => CheckDepsCommand::web2apk().execute(),
        }
    }
}

/// APK Decompiler - decompile and analyze Android APK files
#[derive(Debug, Parser)]
#[command(name = "apk-decompiler")]
#[command(version)]
#[command(about = "Decompile and analyze Android APK files", long_about = None)]
pub struct DecompilerCli {
    /// Enable verbose logging (DEBUG level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: DecompilerCommand,
}

/// `apk-decompiler` commands
#[derive(Debug, Subcommand)]
pub enum DecompilerCommand {
    /// Decompile an APK file
    Decompile(DecompileCommand),

    /// Analyze an APK file
    Analyze(AnalyzeCommand),

    /// Extract resources from an APK file
    Extract(ExtractCommand),

    /// Check for the decompiler toolchain
    CheckDeps,
}

impl DecompilerCommand {
    /// Run the selected command
    ///
    /// # Errors
    ///
    /// Returns the command's error; the binary exits with status 1.
    pub fn execute(&self, settings: &Settings) -> Result<()> {
        match self {
            Self::Decompile(cmd) => cmd.execute(settings),
            Self::Analyze(cmd) => cmd.execute(settings),
            Self::Extract(cmd) => cmd.execute(settings),
            Self::CheckDeps => CheckDepsCommand::decompiler().execute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_web2apk_cli_is_well_formed() {
        Web2ApkCli::command().debug_assert();
    }

    #[test]
    fn test_decompiler_cli_is_well_formed() {
        DecompilerCli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_wrapper() {
        let cli = Web2ApkCli::try_parse_from([
            "web2apk",
            "-v",
            "generate-wrapper",
            "--url",
            "https://example.com",
            "--package",
            "com.example.app",
            "--name",
            "Example",
            "--no-offline",
            "--file-access",
            "--permission",
            "android.permission.CAMERA",
            "--permission",
            "android.permission.VIBRATE",
        ])
        .unwrap();

        assert!(cli.verbose);
        let Web2ApkCommand::GenerateWrapper(cmd) = cli.command else {
            panic!("expected generate-wrapper");
        };
        let options = cmd.options();
        assert!(!options.enable_offline);
        assert!(options.enable_file_access);
        assert_eq!(options.extra_permissions.len(), 2);
    }

    #[test]
    fn test_offline_flags_last_one_wins() {
        let cli = Web2ApkCli::try_parse_from([
            "web2apk",
            "generate-wrapper",
            "-u",
            "https://a.io",
            "-p",
            "a.b",
            "-n",
            "A",
            "--no-offline",
            "--offline",
        ])
        .unwrap();
        let Web2ApkCommand::GenerateWrapper(cmd) = cli.command else {
            panic!("expected generate-wrapper");
        };
        assert!(cmd.options().enable_offline);
    }

    #[test]
    fn test_template_dir_help_names_overrides() {
        let mut command = Web2ApkCli::command();
        let generate = command
            .find_subcommand_mut("generate-wrapper")
            .expect("generate-wrapper subcommand");
        let arg = generate
            .get_arguments()
            .find(|arg| arg.get_id() == "template_dir")
            .expect("--template-dir argument");
        let help = arg.get_long_help().expect("long help").to_string();
        assert!(help.contains("web2apk.toml"));
        assert!(help.contains("WEB2APK_TEMPLATE_DIR"));
    }

    #[test]
    fn test_build_requires_config() {
        assert!(Web2ApkCli::try_parse_from(["web2apk", "build"]).is_err());
    }

    #[test]
    fn test_decompile_tool_values() {
        assert!(DecompilerCli::try_parse_from(["apk-decompiler", "decompile", "a.apk", "--tool", "jadx"]).is_ok());
        assert!(DecompilerCli::try_parse_from(["apk-decompiler", "decompile", "a.apk", "--tool", "ghidra"]).is_err());
        assert!(DecompilerCli::try_parse_from(["apk-decompiler", "analyze", "a.apk", "--format", "json"]).is_ok());
    }
}
