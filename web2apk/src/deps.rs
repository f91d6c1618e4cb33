//! External tool dependency checks
//!
//! Neither tool ships the Android toolchain; both look for it on `PATH`.
//! [`DependencyChecker::check`] produces a [`DependencyReport`] that the
//! command line renders and uses to decide whether to continue.

use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Environment variables that locate the Android SDK, in lookup order
pub const ANDROID_ENV_VARS: &[&str] = &["ANDROID_HOME", "ANDROID_SDK_ROOT"];

/// Longest time `java -version` may run
pub const JAVA_VERSION_TIMEOUT: Duration = Duration::from_secs(5);

const GRADLE_BINARIES: &[&str] = &["gradle", "gradlew"];

/// Which tool's requirements to check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toolset {
    /// `apk-decompiler`
    Decompiler,
    /// `web2apk`
    Web2Apk,
}

impl Toolset {
    /// Binaries that must be on `PATH`
    #[must_use]
    pub const fn required_binaries(self) -> &'static [&'static str] {
        match self {
            Self::Decompiler => &["apktool", "jadx", "adb", "aapt"],
            Self::Web2Apk => &["java", "zipalign", "apksigner"],
        }
    }
}

/// Value of an Android SDK environment variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVarStatus {
    /// Variable name
    pub name: &'static str,
    /// Value, when set
    pub value: Option<String>,
    /// Whether the value names an existing path
    pub exists: bool,
}

/// Outcome of a dependency check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyReport {
    /// Toolset that was checked
    pub toolset: Toolset,
    /// Required binaries found, with their resolved paths
    pub available: Vec<(String, PathBuf)>,
    /// Required binaries not found
    pub missing: Vec<String>,
    /// `gradle` / `gradlew` found on `PATH`
    pub gradle: Vec<String>,
    /// Android SDK environment variables
    pub env_vars: Vec<EnvVarStatus>,
    /// Newest directory under `<sdk>/build-tools`
    pub build_tools: Option<String>,
    /// First line of `java -version`
    pub java_version: Option<String>,
}

impl DependencyReport {
    /// Whether any Android SDK variable is set
    #[must_use]
    pub fn android_sdk_configured(&self) -> bool {
        self.env_vars.iter().any(|var| var.value.is_some())
    }

    /// Whether everything the toolset needs is present
    ///
    /// The decompiler only needs its binaries; `web2apk` additionally
    /// needs Gradle and a configured Android SDK.
    #[must_use]
    pub fn all_available(&self) -> bool {
        match self.toolset {
            Toolset::Decompiler => self.missing.is_empty(),
            Toolset::Web2Apk => {
                self.missing.is_empty() && !self.gradle.is_empty() && self.android_sdk_configured()
            }
        }
    }
}

/// Looks up binaries and SDK settings
#[derive(Debug, Clone, Default)]
pub struct DependencyChecker {
    search_path: Option<OsString>,
    env_overrides: Option<BTreeMap<String, String>>,
}

impl DependencyChecker {
    /// Checker using the process `PATH` and environment
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Search `path` instead of the process `PATH`
    #[must_use]
    pub fn with_search_path(mut self, path: impl Into<OsString>) -> Self {
        self.search_path = Some(path.into());
        self
    }

    /// Read SDK variables from `vars` instead of the process environment
    #[must_use]
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_overrides = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Resolve `binary` on the search path
    #[must_use]
    pub fn find_binary(&self, binary: &str) -> Option<PathBuf> {
        let found = match &self.search_path {
            Some(path) => {
                let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                which::which_in(binary, Some(path), cwd)
            }
            None => which::which(binary),
        };

        match found {
            Ok(path) => {
                debug!(binary, path = %path.display(), "found");
                Some(path)
            }
            Err(_) => {
                warn!(binary, "not found in PATH");
                None
            }
        }
    }

    fn env_var(&self, name: &str) -> Option<String> {
        let value = match &self.env_overrides {
            Some(vars) => vars.get(name).cloned(),
            None => env::var(name).ok(),
        };
        value.filter(|v| !v.is_empty())
    }

    /// Check everything `toolset` depends on
    #[must_use]
    pub fn check(&self, toolset: Toolset) -> DependencyReport {
        info!(?toolset, "checking for required external dependencies");

        let mut available = Vec::new();
        let mut missing = Vec::new();
        for &binary in toolset.required_binaries() {
            match self.find_binary(binary) {
                Some(path) => available.push((binary.to_string(), path)),
                None => missing.push(binary.to_string()),
            }
        }

        let mut report = DependencyReport {
            toolset,
            available,
            missing,
            gradle: Vec::new(),
            env_vars: Vec::new(),
            build_tools: None,
            java_version: None,
        };

        if toolset == Toolset::Web2Apk {
            if let Some((_, java)) = report.available.iter().find(|(name, _)| name == "java") {
                report.java_version = java_version(java, JAVA_VERSION_TIMEOUT);
            }

            report.gradle = GRADLE_BINARIES
                .iter()
                .filter(|binary| self.find_binary(binary).is_some())
                .map(|binary| (*binary).to_string())
                .collect();

            report.env_vars = self.android_env();
            if let Some(sdk) = report.env_vars.iter().find_map(|var| var.value.as_deref()) {
                report.build_tools = latest_build_tools(Path::new(sdk));
            }
        }

        report
    }

    fn android_env(&self) -> Vec<EnvVarStatus> {
        ANDROID_ENV_VARS
            .iter()
            .map(|&name| {
                let value = self.env_var(name);
                let exists = value.as_deref().is_some_and(|v| Path::new(v).exists());
                match &value {
                    Some(v) if exists => debug!(name, value = %v, "SDK variable set"),
                    Some(v) => warn!(name, value = %v, "SDK path does not exist"),
                    None => warn!(name, "not set"),
                }
                EnvVarStatus { name, value, exists }
            })
            .collect()
    }
}

/// Newest version directory under `<sdk_root>/build-tools`
#[must_use]
pub fn latest_build_tools(sdk_root: &Path) -> Option<String> {
    let dir = sdk_root.join("build-tools");
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "build tools directory not readable");
            return None;
        }
    };

    let latest = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .max_by(|a, b| compare_versions(a, b));

    match &latest {
        Some(version) => debug!(version, "found Android build tools"),
        None => warn!("no build tools versions found"),
    }
    latest
}

/// Order dotted version strings numerically where possible
fn compare_versions(a: &str, b: &str) -> std::cmp::Ordering {
    let numeric = |s: &str| -> Vec<u64> { s.split(['.', '-']).map(|p| p.parse().unwrap_or(0)).collect() };
    numeric(a).cmp(&numeric(b)).then_with(|| a.cmp(b))
}

/// First line of `<java> -version`, killed after `timeout`
#[must_use]
pub fn java_version(java: &Path, timeout: Duration) -> Option<String> {
    let mut child = match Command::new(java)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            debug!(error = %e, "failed to run java -version");
            return None;
        }
    };

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(_)) => break,
            Ok(None) if Instant::now() >= deadline => {
                warn!(?timeout, "java -version timed out");
                let _ = child.kill();
                let _ = child.wait();
                return None;
            }
            Ok(None) => thread::sleep(Duration::from_millis(25)),
            Err(e) => {
                debug!(error = %e, "failed to wait for java -version");
                return None;
            }
        }
    }

    // java prints its version on stderr
    let mut output = String::new();
    if let Some(mut stderr) = child.stderr.take() {
        let _ = stderr.read_to_string(&mut output);
    }
    if output.trim().is_empty() {
        if let Some(mut stdout) = child.stdout.take() {
            let _ = stdout.read_to_string(&mut output);
        }
    }

    let line = output.lines().next().map(str::trim).filter(|l| !l.is_empty())?;
    debug!(version = line, "java version");
    Some(line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn fake_binary(dir: &Path, name: &str, script: &str) {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn test_required_binaries() {
        assert_eq!(Toolset::Decompiler.required_binaries(), &["apktool", "jadx", "adb", "aapt"]);
        assert_eq!(Toolset::Web2Apk.required_binaries(), &["java", "zipalign", "apksigner"]);
    }

    #[test]
    fn test_empty_search_path_reports_everything_missing() {
        let temp = TempDir::new().unwrap();
        let report = DependencyChecker::new()
            .with_search_path(temp.path())
            .with_env(Vec::<(String, String)>::new())
            .check(Toolset::Web2Apk);

        assert!(report.available.is_empty());
        assert_eq!(report.missing, vec!["java", "zipalign", "apksigner"]);
        assert!(report.gradle.is_empty());
        assert!(!report.android_sdk_configured());
        assert!(!report.all_available());
    }

    #[cfg(unix)]
    #[test]
    fn test_decompiler_toolset_found() {
        let temp = TempDir::new().unwrap();
        for name in ["apktool", "jadx", "adb", "aapt"] {
            fake_binary(temp.path(), name, "exit 0");
        }
        let report = DependencyChecker::new()
            .with_search_path(temp.path())
            .check(Toolset::Decompiler);

        assert!(report.missing.is_empty());
        assert_eq!(report.available.len(), 4);
        assert!(report.all_available());
        // SDK variables only matter to web2apk
        assert!(report.env_vars.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_web2apk_toolset_with_sdk() {
        let bin = TempDir::new().unwrap();
        let sdk = TempDir::new().unwrap();
        fake_binary(bin.path(), "java", "echo 'openjdk version \"17.0.2\" 2022-01-18' >&2\necho second >&2");
        fake_binary(bin.path(), "zipalign", "exit 0");
        fake_binary(bin.path(), "apksigner", "exit 0");
        fake_binary(bin.path(), "gradlew", "exit 0");
        for version in ["30.0.3", "34.0.0", "9.0.0"] {
            fs::create_dir_all(sdk.path().join("build-tools").join(version)).unwrap();
        }

        let report = DependencyChecker::new()
            .with_search_path(bin.path())
            .with_env([("ANDROID_HOME", sdk.path().to_string_lossy().into_owned())])
            .check(Toolset::Web2Apk);

        assert!(report.missing.is_empty());
        assert_eq!(report.gradle, vec!["gradlew"]);
        assert_eq!(report.java_version.as_deref(), Some("openjdk version \"17.0.2\" 2022-01-18"));
        assert_eq!(report.build_tools.as_deref(), Some("34.0.0"));
        assert!(report.env_vars[0].exists);
        assert_eq!(report.env_vars[1].value, None);
        assert!(report.all_available());
    }

    #[cfg(unix)]
    #[test]
    fn test_java_version_timeout() {
        let temp = TempDir::new().unwrap();
        fake_binary(temp.path(), "java", "sleep 5");
        let started = Instant::now();
        assert_eq!(java_version(&temp.path().join("java"), Duration::from_millis(200)), None);
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_sdk_path_missing_on_disk() {
        let temp = TempDir::new().unwrap();
        let report = DependencyChecker::new()
            .with_search_path(temp.path())
            .with_env([("ANDROID_SDK_ROOT", "/definitely/not/here")])
            .check(Toolset::Web2Apk);

        assert!(report.android_sdk_configured());
        assert!(!report.env_vars[1].exists);
        assert_eq!(report.build_tools, None);
    }

    #[test]
    fn test_compare_versions() {
        let mut versions = vec!["9.0.0", "34.0.0", "30.0.3", "34.0.0-rc1"];
        versions.sort_by(|a, b| compare_versions(a, b));
        assert_eq!(versions, vec!["9.0.0", "30.0.3", "34.0.0", "34.0.0-rc1"]);
    }
}
