//! Android permissions a configuration may request

/// Permissions accepted in the `permissions` list of an app configuration
pub const ALLOWED_PERMISSIONS: &[&str] = &[
    "android.permission.INTERNET",
    "android.permission.ACCESS_NETWORK_STATE",
    "android.permission.ACCESS_WIFI_STATE",
    "android.permission.WRITE_EXTERNAL_STORAGE",
    "android.permission.READ_EXTERNAL_STORAGE",
    "android.permission.CAMERA",
    "android.permission.ACCESS_FINE_LOCATION",
    "android.permission.ACCESS_COARSE_LOCATION",
    "android.permission.RECORD_AUDIO",
    "android.permission.VIBRATE",
    "android.permission.WAKE_LOCK",
];

/// Whether `permission` is in [`ALLOWED_PERMISSIONS`]
#[must_use]
pub fn is_allowed(permission: &str) -> bool {
    ALLOWED_PERMISSIONS.contains(&permission)
}

/// Render `<uses-permission>` elements, one per line, indented for the manifest
#[must_use]
pub fn uses_permission_xml<S: AsRef<str>>(permissions: &[S]) -> String {
    permissions
        .iter()
        .map(|p| format!(r#"<uses-permission android:name="{}" />"#, escape_attr(p.as_ref())))
        .collect::<Vec<_>>()
        .join("\n    ")
}

/// Escape a string for use in an XML attribute value
fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list() {
        assert_eq!(ALLOWED_PERMISSIONS.len(), 11);
        assert!(is_allowed("android.permission.CAMERA"));
        assert!(!is_allowed("android.permission.BOGUS"));
    }

    #[test]
    fn test_uses_permission_xml() {
        let xml = uses_permission_xml(&["android.permission.CAMERA", "android.permission.VIBRATE"]);
        assert_eq!(
            xml,
            "<uses-permission android:name=\"android.permission.CAMERA\" />\n    \
             <uses-permission android:name=\"android.permission.VIBRATE\" />"
        );
        assert_eq!(uses_permission_xml::<&str>(&[]), "");
    }

    #[test]
    fn test_uses_permission_xml_escapes_attribute() {
        let xml = uses_permission_xml(&[r#"a" /><evil x="&'"#]);
        assert_eq!(
            xml,
            r#"<uses-permission android:name="a&quot; /&gt;&lt;evil x=&quot;&amp;&apos;" />"#
        );
    }
}
