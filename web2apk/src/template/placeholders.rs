//! `{{TOKEN}}` substitution across a generated project

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, error};
use walkdir::WalkDir;

use crate::error::{GenerateError, GenerateResult};

/// Extensions of files that may contain placeholders
pub const TEXT_EXTENSIONS: &[&str] = &["kt", "java", "xml", "gradle", "pro", "properties"];

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Z_]+)\}\}").expect("static pattern compiles"));

/// Placeholder names
pub mod keys {
    /// Java/Kotlin package and application id
    pub const PACKAGE_NAME: &str = "PACKAGE_NAME";
    /// Launcher label
    pub const APP_NAME: &str = "APP_NAME";
    /// URL loaded by the WebView
    pub const TARGET_URL: &str = "TARGET_URL";
    /// WebView user agent
    pub const USER_AGENT: &str = "USER_AGENT";
    /// Serve the offline page when the network is down
    pub const ENABLE_OFFLINE_MODE: &str = "ENABLE_OFFLINE_MODE";
    /// Allow `file://` access in the WebView
    pub const ENABLE_FILE_ACCESS: &str = "ENABLE_FILE_ACCESS";
    /// `<uses-permission>` elements for the manifest
    pub const EXTRA_PERMISSIONS: &str = "EXTRA_PERMISSIONS";
}

/// Counts from one substitution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Substitution {
    /// Files whose content changed and was rewritten
    pub updated: usize,
    /// Files that were visited but left as they were
    pub unchanged: usize,
    /// Files that could not be read or written
    pub failed: usize,
}

/// Ordered placeholder values
///
/// The key set is fixed at construction; [`Placeholders::set`] only
/// overwrites existing keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    entries: Vec<(&'static str, String)>,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            entries: vec![
                (keys::PACKAGE_NAME, super::DEFAULT_PACKAGE.to_string()),
                (keys::APP_NAME, "WebView App".to_string()),
                (keys::TARGET_URL, "https://example.com".to_string()),
                (keys::USER_AGENT, super::DEFAULT_USER_AGENT.to_string()),
                (keys::ENABLE_OFFLINE_MODE, "true".to_string()),
                (keys::ENABLE_FILE_ACCESS, "false".to_string()),
                (keys::EXTRA_PERMISSIONS, String::new()),
            ],
        }
    }
}

impl Placeholders {
    /// Current value of `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Overwrite the value of an existing key
    ///
    /// Returns `false` and changes nothing when `key` is not a placeholder.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => {
                *v = value.into();
                true
            }
            None => false,
        }
    }

    /// Iterate over `(key, value)` pairs in definition order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Substitute every known token in `content` in a single pass
    ///
    /// Replacement values are not rescanned, and tokens whose name is not a
    /// placeholder are left intact.
    #[must_use]
    pub fn apply<'a>(&self, content: &'a str) -> Cow<'a, str> {
        TOKEN_PATTERN.replace_all(content, |caps: &Captures<'_>| {
            self.get(&caps[1]).map_or_else(|| caps[0].to_string(), str::to_string)
        })
    }

    /// Substitute tokens in every text file under `root`
    ///
    /// Failures on individual files are logged and counted; the walk
    /// continues.
    ///
    /// # Errors
    ///
    /// Returns an error only if `root` itself cannot be walked.
    pub fn apply_to_tree(&self, root: &Path) -> GenerateResult<Substitution> {
        let mut summary = Substitution::default();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|source| GenerateError::Walk {
                path: root.to_path_buf(),
                source,
            })?;
            if !entry.file_type().is_file() || !is_text_file(entry.path()) {
                continue;
            }

            match self.apply_to_file(entry.path()) {
                Ok(true) => {
                    summary.updated += 1;
                    debug!(file = %entry.path().display(), "placeholders replaced");
                }
                Ok(false) => summary.unchanged += 1,
                Err(e) => {
                    summary.failed += 1;
                    error!(file = %entry.path().display(), error = %e, "failed to process file");
                }
            }
        }

        Ok(summary)
    }

    fn apply_to_file(&self, path: &Path) -> std::io::Result<bool> {
        let content = fs::read_to_string(path)?;
        match self.apply(&content) {
            Cow::Borrowed(_) => Ok(false),
            Cow::Owned(updated) if updated == content => Ok(false),
            Cow::Owned(updated) => {
                fs::write(path, updated)?;
                Ok(true)
            }
        }
    }
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext))
}
