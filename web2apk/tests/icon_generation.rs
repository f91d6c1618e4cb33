//! Integration tests for launcher icon generation
#![cfg(feature = "icons")]

use image::{Rgba, RgbaImage};
use std::path::Path;
use tempfile::TempDir;
use web2apk::icons::{Density, IconGenerator};
use web2apk::template::{TemplateManager, WrapperOptions};

fn write_source(path: &Path) {
    RgbaImage::from_fn(512, 512, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    })
    .save(path)
    .unwrap();
}

/// Test that ten icons of the exact density sizes are written
#[test]
fn test_ten_icons_of_exact_sizes() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("logo.png");
    write_source(&source);
    let project = temp.path().join("project");

    let written = IconGenerator::new().generate(&source, &project).unwrap();
    assert_eq!(written.len(), 10);

    for density in Density::ALL {
        let dir = project.join(format!("app/src/main/res/mipmap-{}", density.name()));
        for name in ["ic_launcher.png", "ic_launcher_round.png"] {
            let path = dir.join(name);
            assert!(written.contains(&path), "{} not reported", path.display());
            let image = image::open(&path).unwrap();
            assert_eq!(image.width(), density.size(), "{}", path.display());
            assert_eq!(image.height(), density.size(), "{}", path.display());
        }

        let round = image::open(dir.join("ic_launcher_round.png")).unwrap().to_rgba8();
        let size = density.size();
        assert_eq!(round.get_pixel(0, 0)[3], 0);
        assert_eq!(round.get_pixel(size - 1, size - 1)[3], 0);
        assert_eq!(round.get_pixel(size / 2, size / 2)[3], 255);
    }
}

/// Test that icons land in a generated wrapper and a bad icon is not fatal
#[test]
fn test_add_icon_to_generated_wrapper() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("logo.png");
    write_source(&source);
    let output = temp.path().join("wrapper");

    let mut manager = TemplateManager::new(&output);
    manager.configure(&WrapperOptions::new("com.acme.shop", "Shop", "https://a.io"));
    manager.generate().unwrap();

    assert!(manager.add_icon(&source));
    assert!(output.join("app/src/main/res/mipmap-xxxhdpi/ic_launcher.png").is_file());

    assert!(!manager.add_icon(&temp.path().join("missing.png")));
}
