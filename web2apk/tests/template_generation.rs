//! Integration tests for wrapper project generation against the bundled template

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;
use web2apk::template::{
    inject_permissions, Injection, Relocation, TemplateManager, WrapperOptions, MANIFEST_PATH,
    TEXT_EXTENSIONS,
};

fn generate(output: &Path, options: &WrapperOptions) -> TemplateManager {
    let mut manager = TemplateManager::new(output);
    manager.configure(options);
    manager.generate().unwrap();
    manager
}

fn text_files(root: &Path) -> Vec<std::path::PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext))
        })
        .map(|e| e.into_path())
        .collect()
}

/// Test that the copied template has the expected Gradle layout
#[test]
fn test_template_copy() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("wrapper");
    let manager = TemplateManager::new(&output);

    let copied = manager.copy_template().unwrap();
    assert!(copied > 10);
    for file in ["build.gradle", "settings.gradle", "gradle.properties", "app/build.gradle", MANIFEST_PATH] {
        assert!(output.join(file).is_file(), "missing {file}");
    }
}

/// Test that the package directory is moved to the configured package
#[test]
fn test_package_relocation() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("wrapper");
    generate(&output, &WrapperOptions::new("io.github.test", "Test", "https://test.com"));

    let java = output.join("app/src/main/java");
    assert!(java.join("io/github/test/MainActivity.kt").is_file());
    assert!(java.join("io/github/test/OfflineHandler.kt").is_file());
    assert!(!java.join("com/template/webview").exists());
    assert!(!java.join("com").exists());

    let activity = fs::read_to_string(java.join("io/github/test/MainActivity.kt")).unwrap();
    assert!(activity.starts_with("package io.github.test\n"));
}

/// Test that no configured token survives in any text file
#[test]
fn test_no_tokens_remain() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("wrapper");
    let manager = generate(
        &output,
        &WrapperOptions::new("com.test.myapp", "My Test App", "https://example.org")
            .permissions(["android.permission.CAMERA"]),
    );

    for file in text_files(&output) {
        let content = fs::read_to_string(&file).unwrap();
        for (key, _) in manager.placeholders().iter() {
            let token = format!("{{{{{key}}}}}");
            assert!(!content.contains(&token), "{token} left in {}", file.display());
        }
    }

    let strings = fs::read_to_string(output.join("app/src/main/res/values/strings.xml")).unwrap();
    assert!(strings.contains("<string name=\"app_name\">My Test App</string>"));

    let manifest = fs::read_to_string(output.join(MANIFEST_PATH)).unwrap();
    assert!(manifest.contains("<uses-permission android:name=\"android.permission.CAMERA\" />"));
}

/// Test that build.gradle carries the configured values
#[test]
fn test_build_gradle_values() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("wrapper");
    generate(
        &output,
        &WrapperOptions::new("com.acme.shop", "Shop", "https://shop.acme.io")
            .user_agent("ShopBot/2.0")
            .offline(false)
            .file_access(true),
    );

    let gradle = fs::read_to_string(output.join("app/build.gradle")).unwrap();
    assert!(gradle.contains("applicationId \"com.acme.shop\""));
    assert!(gradle.contains("namespace 'com.acme.shop'"));
    assert!(gradle.contains(r#"buildConfigField "String", "TARGET_URL", "\"https://shop.acme.io\"""#));
    assert!(gradle.contains(r#"buildConfigField "String", "USER_AGENT", "\"ShopBot/2.0\"""#));
    assert!(gradle.contains(r#"buildConfigField "boolean", "ENABLE_OFFLINE_MODE", "false""#));
    assert!(gradle.contains(r#"buildConfigField "boolean", "ENABLE_FILE_ACCESS", "true""#));
}

/// Test that generating twice leaves exactly the second result
#[test]
fn test_rerun_replaces_previous_output() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("wrapper");

    generate(&output, &WrapperOptions::new("com.first.app", "First", "https://first.io"));
    fs::write(output.join("leftover.txt"), "stale").unwrap();
    generate(&output, &WrapperOptions::new("com.second.app", "Second", "https://second.io"));

    let java = output.join("app/src/main/java");
    assert!(!output.join("leftover.txt").exists());
    assert!(!java.join("com/first").exists());
    assert!(java.join("com/second/app/MainActivity.kt").is_file());

    let gradle = fs::read_to_string(output.join("app/build.gradle")).unwrap();
    assert!(gradle.contains("https://second.io"));
    assert!(!gradle.contains("https://first.io"));
}

/// Test that renaming again after generation is a no-op
#[test]
fn test_rename_after_generate_is_skipped() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("wrapper");
    let manager = generate(&output, &WrapperOptions::new("com.acme.shop", "Shop", "https://a.io"));
    assert_eq!(manager.rename_package().unwrap(), Relocation::Skipped);
}

/// Test that permissions can be injected after substitution removed the token
#[test]
fn test_inject_permissions_after_generation() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("wrapper");
    generate(&output, &WrapperOptions::new("com.acme.shop", "Shop", "https://a.io"));

    let outcome = inject_permissions(&output, &["android.permission.VIBRATE"]).unwrap();
    assert_eq!(outcome, Injection::Inserted);

    let manifest = fs::read_to_string(output.join(MANIFEST_PATH)).unwrap();
    let manifest_tag_end = manifest.find("android\">").unwrap() + "android\">".len();
    assert!(manifest[manifest_tag_end..]
        .starts_with("\n\n    <uses-permission android:name=\"android.permission.VIBRATE\" />"));
}
