//! Move the placeholder package directory to the configured package

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{GenerateError, GenerateResult};

/// Kotlin/Java source root relative to the project root
pub const JAVA_ROOT: &str = "app/src/main/java";

/// Package directory shipped in the template, relative to [`JAVA_ROOT`]
pub const PLACEHOLDER_PACKAGE_PATH: &str = "com/template/webview";

const STAGING_DIR: &str = ".web2apk-relocating";

/// What [`relocate_package`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relocation {
    /// Sources now live under `to`
    Moved {
        /// Former package directory
        from: PathBuf,
        /// New package directory
        to: PathBuf,
    },
    /// Target package equals the placeholder package
    Unchanged,
    /// The placeholder package directory was not found
    Skipped,
}

/// Directory for `package` under the source root of `project_root`
#[must_use]
pub fn package_dir(project_root: &Path, package: &str) -> PathBuf {
    package
        .split('.')
        .fold(project_root.join(JAVA_ROOT), |dir, segment| dir.join(segment))
}

/// Move `com/template/webview` to the directory of `package`
///
/// The subtree is first moved to a staging directory so that targets nested
/// inside, or enclosing, the placeholder path work. Ancestors of the old
/// directory left empty are removed, stopping at the source root. An
/// existing target directory is merged into.
///
/// # Errors
///
/// Returns [`GenerateError::RelocationConflict`] when a file already exists
/// at a destination, in which case nothing is moved, or the first
/// filesystem error.
pub fn relocate_package(project_root: &Path, package: &str) -> GenerateResult<Relocation> {
    let java_root = project_root.join(JAVA_ROOT);
    let old = java_root.join(PLACEHOLDER_PACKAGE_PATH);
    let new = package_dir(project_root, package);

    if !old.is_dir() {
        warn!(path = %old.display(), "original package path not found, skipping rename");
        return Ok(Relocation::Skipped);
    }
    if old == new {
        debug!(package, "package already matches template");
        return Ok(Relocation::Unchanged);
    }

    check_conflicts(&old, &new, &old)?;

    let staging = java_root.join(STAGING_DIR);
    if staging.exists() {
        fs::remove_dir_all(&staging).map_err(|e| GenerateError::io("failed to remove", &staging, e))?;
    }
    fs::rename(&old, &staging).map_err(|e| GenerateError::io("failed to move", &old, e))?;
    prune_empty_ancestors(&old, &java_root)?;

    if let Some(parent) = new.parent() {
        fs::create_dir_all(parent).map_err(|e| GenerateError::io("failed to create", parent, e))?;
    }

    if new.exists() {
        merge_dir(&staging, &new)?;
        fs::remove_dir_all(&staging).map_err(|e| GenerateError::io("failed to remove", &staging, e))?;
    } else {
        fs::rename(&staging, &new).map_err(|e| GenerateError::io("failed to move", &staging, e))?;
    }

    info!(package, "package structure renamed");
    Ok(Relocation::Moved { from: old, to: new })
}

fn prune_empty_ancestors(leaf: &Path, stop: &Path) -> GenerateResult<()> {
    let mut current = leaf.parent();
    while let Some(dir) = current {
        if dir == stop || !dir.starts_with(stop) {
            break;
        }
        let empty = fs::read_dir(dir)
            .map_err(|e| GenerateError::io("failed to read", dir, e))?
            .next()
            .is_none();
        if !empty {
            break;
        }
        fs::remove_dir(dir).map_err(|e| GenerateError::io("failed to remove", dir, e))?;
        debug!(dir = %dir.display(), "removed empty package directory");
        current = dir.parent();
    }
    Ok(())
}

/// Fail if merging `from` into `into` would hit an existing file
///
/// Runs before anything moves. Paths under `moving` are ignored since they
/// leave with the subtree.
fn check_conflicts(from: &Path, into: &Path, moving: &Path) -> GenerateResult<()> {
    if !remains(into, moving) {
        return Ok(());
    }
    if !into.is_dir() {
        return Err(GenerateError::RelocationConflict {
            from: from.to_path_buf(),
            to: into.to_path_buf(),
        });
    }

    let entries = fs::read_dir(from).map_err(|e| GenerateError::io("failed to read", from, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| GenerateError::io("failed to read", from, e))?;
        let source = entry.path();
        let target = into.join(entry.file_name());
        if !remains(&target, moving) {
            continue;
        }
        if source.is_dir() && target.is_dir() {
            check_conflicts(&source, &target, moving)?;
        } else {
            return Err(GenerateError::RelocationConflict { from: source, to: target });
        }
    }
    Ok(())
}

fn remains(path: &Path, moving: &Path) -> bool {
    path.exists() && !path.starts_with(moving)
}

fn merge_dir(from: &Path, into: &Path) -> GenerateResult<()> {
    if !into.is_dir() {
        return Err(GenerateError::RelocationConflict {
            from: from.to_path_buf(),
            to: into.to_path_buf(),
        });
    }

    let entries = fs::read_dir(from).map_err(|e| GenerateError::io("failed to read", from, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| GenerateError::io("failed to read", from, e))?;
        let source = entry.path();
        let target = into.join(entry.file_name());

        if !target.exists() {
            fs::rename(&source, &target).map_err(|e| GenerateError::io("failed to move", &source, e))?;
        } else if source.is_dir() {
            merge_dir(&source, &target)?;
        } else {
            return Err(GenerateError::RelocationConflict { from: source, to: target });
        }
    }
    Ok(())
}
