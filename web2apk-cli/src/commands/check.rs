//! Dependency check command

use anyhow::{bail, Result};
use console::style;
use web2apk::{DependencyChecker, DependencyReport, Toolset};

use super::{print_error, print_success, print_warning, FAILURE, RULE_WIDTH, SUCCESS};

/// Check the external tools a toolset needs
#[derive(Debug)]
pub struct CheckDepsCommand {
    toolset: Toolset,
    checker: DependencyChecker,
}

impl CheckDepsCommand {
    /// Check for `java`, `zipalign`, `apksigner`, Gradle and the Android SDK
    #[must_use]
    pub fn web2apk() -> Self {
        Self::new(Toolset::Web2Apk, DependencyChecker::new())
    }

    /// Check for `apktool`, `jadx`, `adb` and `aapt`
    #[must_use]
    pub fn decompiler() -> Self {
        Self::new(Toolset::Decompiler, DependencyChecker::new())
    }

    /// Check `toolset` with a specific checker
    #[must_use]
    pub const fn new(toolset: Toolset, checker: DependencyChecker) -> Self {
        Self { toolset, checker }
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// For `web2apk`, returns an error when a required tool is missing.
    /// The decompiler only warns.
    pub fn execute(&self) -> Result<()> {
        let report = self.checker.check(self.toolset);
        print_report(&report);

        if report.all_available() {
            return Ok(());
        }
        match self.toolset {
            Toolset::Web2Apk => bail!("Required dependencies are missing"),
            Toolset::Decompiler => {
                print_warning("Some dependencies are missing. The tool may not function properly.");
                Ok(())
            }
        }
    }
}

/// Print a dependency report
pub fn print_report(report: &DependencyReport) {
    let rule = "=".repeat(RULE_WIDTH);
    println!();
    println!("{}", style(&rule).dim());
    println!("{}", style("Dependency Check Summary").bold());
    println!("{}", style(&rule).dim());

    if !report.available.is_empty() {
        println!();
        println!("{}Available ({}):", SUCCESS, report.available.len());
        for (name, path) in &report.available {
            println!("  - {} {}", style(name).green(), style(path.display()).dim());
        }
    }

    if !report.missing.is_empty() {
        println!();
        println!("{}{}", FAILURE, style(format!("Missing ({}):", report.missing.len())).red());
        for name in &report.missing {
            println!("  - {}", style(name).red());
        }
    }

    if let Some(version) = &report.java_version {
        println!();
        println!("Java: {}", style(version).cyan());
    }

    if report.toolset == Toolset::Web2Apk {
        print_android_status(report);
    }

    println!();
    if report.all_available() {
        print_success("All required dependencies are available!");
    } else {
        print_error("Some required dependencies are missing!");
        if report.toolset == Toolset::Web2Apk {
            print_install_hints();
        }
    }
    println!("{}", style(&rule).dim());
}

fn print_android_status(report: &DependencyReport) {
    println!();
    println!("{}", style("Gradle Status:").bold());
    if report.gradle.is_empty() {
        println!("  {}{}", FAILURE, style("Neither gradle nor gradlew found in PATH").red());
    } else {
        println!("  {}Available: {}", SUCCESS, report.gradle.join(", "));
    }

    println!();
    println!("{}", style("Android SDK Environment:").bold());
    for var in &report.env_vars {
        match &var.value {
            Some(value) if var.exists => println!("  {}{}: {}", SUCCESS, var.name, value),
            Some(value) => println!(
                "  {}{}: {} {}",
                SUCCESS,
                var.name,
                value,
                style("(path does not exist)").yellow()
            ),
            None => println!("  {}{}: {}", FAILURE, var.name, style("Not set").red()),
        }
    }
    if !report.android_sdk_configured() {
        print_warning("Android SDK not configured! Set ANDROID_HOME or ANDROID_SDK_ROOT");
    }

    if let Some(version) = &report.build_tools {
        println!("  Build tools: {}", style(version).cyan());
    }
}

fn print_install_hints() {
    println!();
    println!("{}", style("Required tools installation:").bold());
    println!("  - Java: Install JDK 8 or higher");
    println!("  - Android SDK: Download from https://developer.android.com/studio");
    println!("  - zipalign & apksigner: Included in Android SDK build-tools");
    println!("  - Gradle: Install from https://gradle.org/ or use gradlew");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_web2apk_fails_when_tools_missing() {
        let empty = TempDir::new().unwrap();
        let checker = DependencyChecker::new()
            .with_search_path(empty.path())
            .with_env(Vec::<(String, String)>::new());
        assert!(CheckDepsCommand::new(Toolset::Web2Apk, checker).execute().is_err());
    }

    #[test]
    fn test_decompiler_only_warns() {
        let empty = TempDir::new().unwrap();
        let checker = DependencyChecker::new().with_search_path(empty.path());
        assert!(CheckDepsCommand::new(Toolset::Decompiler, checker).execute().is_ok());
    }
}
