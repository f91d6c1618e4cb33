//! Permission injection into `AndroidManifest.xml`

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::config::uses_permission_xml;
use crate::error::{GenerateError, GenerateResult};

/// Manifest location relative to the project root
pub const MANIFEST_PATH: &str = "app/src/main/AndroidManifest.xml";

const PERMISSIONS_TOKEN: &str = "{{EXTRA_PERMISSIONS}}";

/// How permissions were placed into the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Injection {
    /// The `{{EXTRA_PERMISSIONS}}` token was replaced
    Replaced,
    /// Elements were inserted after the opening `<manifest>` tag
    Inserted,
    /// No `<manifest` element was found; the file is untouched
    NoManifestElement,
}

/// Manifest path inside `project_root`
#[must_use]
pub fn manifest_path(project_root: &Path) -> PathBuf {
    project_root.join(MANIFEST_PATH)
}

/// Add `<uses-permission>` elements for `permissions` to the manifest
///
/// # Errors
///
/// Returns [`GenerateError::ManifestMissing`] when the manifest does not
/// exist, or an I/O error when it cannot be read or written.
pub fn inject_permissions<S: AsRef<str>>(project_root: &Path, permissions: &[S]) -> GenerateResult<Injection> {
    let path = manifest_path(project_root);
    if !path.is_file() {
        error!(path = %path.display(), "AndroidManifest.xml not found");
        return Err(GenerateError::ManifestMissing(path));
    }

    info!(count = permissions.len(), "adding permissions to manifest");
    let content = fs::read_to_string(&path).map_err(|e| GenerateError::io("failed to read", &path, e))?;
    let xml = uses_permission_xml(permissions);

    let (updated, injection) = if content.contains(PERMISSIONS_TOKEN) {
        (content.replace(PERMISSIONS_TOKEN, &xml), Injection::Replaced)
    } else if let Some(insert_at) = opening_tag_end(&content) {
        let mut updated = String::with_capacity(content.len() + xml.len() + 6);
        updated.push_str(&content[..insert_at]);
        updated.push_str("\n\n    ");
        updated.push_str(&xml);
        updated.push_str(&content[insert_at..]);
        (updated, Injection::Inserted)
    } else {
        warn!(path = %path.display(), "no <manifest> element found, permissions not added");
        return Ok(Injection::NoManifestElement);
    };

    fs::write(&path, updated).map_err(|e| GenerateError::io("failed to write", &path, e))?;
    info!("permissions added");
    Ok(injection)
}

/// Byte offset just past the `>` closing the first `<manifest` tag
fn opening_tag_end(content: &str) -> Option<usize> {
    let start = content.find("<manifest")?;
    content[start..].find('>').map(|offset| start + offset + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project(manifest: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let path = manifest_path(temp.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, manifest).unwrap();
        temp
    }

    fn read(temp: &TempDir) -> String {
        fs::read_to_string(manifest_path(temp.path())).unwrap()
    }

    #[test]
    fn test_replaces_token() {
        let temp = project("<manifest>\n    {{EXTRA_PERMISSIONS}}\n</manifest>");
        let outcome = inject_permissions(temp.path(), &["android.permission.CAMERA"]).unwrap();
        assert_eq!(outcome, Injection::Replaced);
        assert_eq!(
            read(&temp),
            "<manifest>\n    <uses-permission android:name=\"android.permission.CAMERA\" />\n</manifest>"
        );
    }

    #[test]
    fn test_inserts_after_opening_tag() {
        let temp = project("<?xml version=\"1.0\"?>\n<manifest xmlns:android=\"x\">\n</manifest>");
        let outcome = inject_permissions(
            temp.path(),
            &["android.permission.CAMERA", "android.permission.VIBRATE"],
        )
        .unwrap();
        assert_eq!(outcome, Injection::Inserted);
        assert_eq!(
            read(&temp),
            "<?xml version=\"1.0\"?>\n<manifest xmlns:android=\"x\">\n\n    \
             <uses-permission android:name=\"android.permission.CAMERA\" />\n    \
             <uses-permission android:name=\"android.permission.VIBRATE\" />\n</manifest>"
        );
    }

    #[test]
    fn test_no_manifest_element() {
        let temp = project("<application/>");
        let outcome = inject_permissions(temp.path(), &["android.permission.CAMERA"]).unwrap();
        assert_eq!(outcome, Injection::NoManifestElement);
        assert_eq!(read(&temp), "<application/>");
    }

    #[test]
    fn test_missing_manifest() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            inject_permissions(temp.path(), &["android.permission.CAMERA"]),
            Err(GenerateError::ManifestMissing(_))
        ));
    }
}
