//! web2apk
//!
//! Generates Android WebView wrapper projects from a bundled template and
//! provides the validation, configuration and tooling checks shared by the
//! `web2apk` and `apk-decompiler` command-line tools.
//!
//! The wrapper pipeline runs in a fixed order, each stage failing fast:
//!
//! 1. copy the template tree into the output directory
//! 2. substitute `{{TOKEN}}` placeholders in text sources
//! 3. move the placeholder package directory to the configured package
//! 4. optionally render launcher icons and inject manifest permissions
//!
//! # Example
//!
//! ```rust,no_run
//! use web2apk::template::{TemplateManager, WrapperOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut manager = TemplateManager::new("./android_wrapper");
//! manager.configure(&WrapperOptions::new(
//!     "com.example.myapp",
//!     "My App",
//!     "https://example.com",
//! ));
//! manager.generate()?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod deps;
pub mod error;
pub mod icons;
pub mod observability;
pub mod settings;
pub mod template;
pub mod validation;

pub use config::{AppConfig, ConfigFormat, ConfigLoader};
pub use deps::{DependencyChecker, DependencyReport, Toolset};
pub use error::{ConfigError, GenerateError, IconError, InputError};
pub use icons::{IconGenerator, ImageProcessor};
pub use observability::Logging;
pub use settings::Settings;
pub use template::{TemplateManager, WrapperOptions};
pub use validation::{InputValidator, PackageIdProfile};
