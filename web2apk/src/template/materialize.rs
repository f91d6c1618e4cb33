//! Copy the template tree into a fresh output directory

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{GenerateError, GenerateResult};

/// Replace `destination` with a byte-for-byte copy of `template_dir`
///
/// Any existing destination is removed first, so repeated runs never leave
/// stale files behind.
///
/// # Errors
///
/// Returns [`GenerateError::TemplateMissing`] if the template does not
/// exist, or the first filesystem error encountered.
pub fn materialize(template_dir: &Path, destination: &Path) -> GenerateResult<usize> {
    if !template_dir.is_dir() {
        return Err(GenerateError::TemplateMissing(template_dir.to_path_buf()));
    }

    if destination.exists() {
        warn!(path = %destination.display(), "output directory exists, removing");
        fs::remove_dir_all(destination)
            .map_err(|e| GenerateError::io("failed to remove", destination, e))?;
    }

    let mut copied = 0;
    for entry in WalkDir::new(template_dir) {
        let entry = entry.map_err(|source| GenerateError::Walk {
            path: template_dir.to_path_buf(),
            source,
        })?;
        let relative = entry
            .path()
            .strip_prefix(template_dir)
            .unwrap_or_else(|_| entry.path());
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| GenerateError::io("failed to create", &target, e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| GenerateError::io("failed to copy", entry.path(), e))?;
            copied += 1;
            debug!(file = %relative.display(), "copied");
        }
    }

    info!(
        from = %template_dir.display(),
        to = %destination.display(),
        files = copied,
        "template copied"
    );
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn template(root: &Path) {
        fs::create_dir_all(root.join("app/src/main")).unwrap();
        fs::write(root.join("settings.gradle"), "rootProject.name = 'x'").unwrap();
        fs::write(root.join("app/src/main/logo.bin"), [0u8, 159, 146, 150]).unwrap();
    }

    #[test]
    fn test_missing_template() {
        let temp = TempDir::new().unwrap();
        let err = materialize(&temp.path().join("nope"), &temp.path().join("out")).unwrap_err();
        assert!(matches!(err, GenerateError::TemplateMissing(_)));
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn test_copies_bytes_exactly() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("tpl");
        let out = temp.path().join("out");
        template(&src);

        assert_eq!(materialize(&src, &out).unwrap(), 2);
        assert_eq!(
            fs::read(out.join("app/src/main/logo.bin")).unwrap(),
            vec![0u8, 159, 146, 150]
        );
    }

    #[test]
    fn test_replaces_previous_output() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("tpl");
        let out = temp.path().join("out");
        template(&src);
        fs::create_dir_all(out.join("stale")).unwrap();
        fs::write(out.join("stale/file.txt"), "old").unwrap();

        materialize(&src, &out).unwrap();
        assert!(!out.join("stale").exists());
        assert!(out.join("settings.gradle").is_file());
    }
}
