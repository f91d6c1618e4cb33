//! CLI command implementations

pub mod build;
pub mod check;
pub mod decompile;
pub mod generate_wrapper;
pub mod init_config;

pub use build::BuildCommand;
pub use check::CheckDepsCommand;
pub use decompile::{AnalyzeCommand, DecompileCommand, ExtractCommand};
pub use generate_wrapper::GenerateWrapperCommand;
pub use init_config::InitConfigCommand;

use anyhow::{Context, Result};
use console::{style, Emoji};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub(crate) static SUCCESS: Emoji = Emoji("✓ ", "");
pub(crate) static FAILURE: Emoji = Emoji("✗ ", "x ");
pub(crate) static WARNING: Emoji = Emoji("⚠ ", "! ");

const RULE_WIDTH: usize = 60;

/// Print a title between two horizontal rules
pub(crate) fn print_banner(title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("{}", style(&rule).dim());
    println!("{}", style(title).bold());
    println!("{}", style(&rule).dim());
}

/// Numbered step heading
pub(crate) fn print_step(number: u8, title: &str) {
    println!();
    println!("{} {}", style(format!("Step {number}:")).cyan().bold(), title);
}

pub(crate) fn print_success(message: &str) {
    println!("{}{}", SUCCESS, style(message).green().bold());
}

pub(crate) fn print_error(message: &str) {
    eprintln!("{}{}", FAILURE, style(message).red().bold());
}

pub(crate) fn print_warning(message: &str) {
    println!("{}{}", WARNING, style(message).yellow());
}

/// Spinner used while a long step runs
pub(crate) fn spinner() -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Failed to set progress style")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}
