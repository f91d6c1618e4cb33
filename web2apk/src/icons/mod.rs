//! Launcher icon generation
//!
//! A single source image is rendered into every mipmap density bucket, once
//! as the square `ic_launcher.png` and once as the circular
//! `ic_launcher_round.png`.
//!
//! Rendering goes through the [`ImageProcessor`] trait. With the `icons`
//! feature (default) the [`RasterProcessor`] backed by the `image` crate is
//! used; without it [`UnavailableProcessor`] reports the capability as
//! missing and generation fails with [`IconError::Unavailable`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use web2apk::icons::IconGenerator;
//!
//! # fn example() -> Result<(), web2apk::IconError> {
//! let written = IconGenerator::new().generate("logo.png", "./android_wrapper")?;
//! assert_eq!(written.len(), 10);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "icons")]
mod raster;

#[cfg(feature = "icons")]
pub use raster::RasterProcessor;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{IconError, IconResult};

/// Resource directory relative to the project root
pub const RES_DIR: &str = "app/src/main/res";

/// Android screen density bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Density {
    /// ~160 dpi
    Mdpi,
    /// ~240 dpi
    Hdpi,
    /// ~320 dpi
    Xhdpi,
    /// ~480 dpi
    Xxhdpi,
    /// ~640 dpi
    Xxxhdpi,
}

impl Density {
    /// Every bucket, smallest first
    pub const ALL: [Self; 5] = [Self::Mdpi, Self::Hdpi, Self::Xhdpi, Self::Xxhdpi, Self::Xxxhdpi];

    /// Bucket name used in resource directory names
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mdpi => "mdpi",
            Self::Hdpi => "hdpi",
            Self::Xhdpi => "xhdpi",
            Self::Xxhdpi => "xxhdpi",
            Self::Xxxhdpi => "xxxhdpi",
        }
    }

    /// Launcher icon edge length in pixels
    #[must_use]
    pub const fn size(self) -> u32 {
        match self {
            Self::Mdpi => 48,
            Self::Hdpi => 72,
            Self::Xhdpi => 96,
            Self::Xxhdpi => 144,
            Self::Xxxhdpi => 192,
        }
    }

    /// `mipmap-<density>` directory under `project_root`
    #[must_use]
    pub fn mipmap_dir(self, project_root: &Path) -> PathBuf {
        project_root.join(RES_DIR).join(format!("mipmap-{}", self.name()))
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One square size to render, with its two output files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconTarget {
    /// Edge length in pixels
    pub size: u32,
    /// Square icon output
    pub launcher: PathBuf,
    /// Circular icon output
    pub round: PathBuf,
}

impl IconTarget {
    /// Target for `density` inside `project_root`
    #[must_use]
    pub fn for_density(density: Density, project_root: &Path) -> Self {
        let dir = density.mipmap_dir(project_root);
        Self {
            size: density.size(),
            launcher: dir.join("ic_launcher.png"),
            round: dir.join("ic_launcher_round.png"),
        }
    }
}

/// Capability to decode, resize and encode launcher icons
pub trait ImageProcessor: fmt::Debug {
    /// Whether this processor can render anything
    fn is_available(&self) -> bool;

    /// Render `source` into every target, returning the written paths
    ///
    /// Parent directories of the targets must already exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be decoded or any output
    /// cannot be written.
    fn render(&self, source: &Path, targets: &[IconTarget]) -> IconResult<Vec<PathBuf>>;
}

/// Processor used when no image backend is compiled in
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableProcessor;

impl ImageProcessor for UnavailableProcessor {
    fn is_available(&self) -> bool {
        false
    }

    fn render(&self, _source: &Path, _targets: &[IconTarget]) -> IconResult<Vec<PathBuf>> {
        Err(IconError::Unavailable)
    }
}

/// Writes launcher icons for every density bucket
#[derive(Debug)]
pub struct IconGenerator {
    processor: Box<dyn ImageProcessor>,
}

impl Default for IconGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IconGenerator {
    /// Generator using the best processor compiled in
    #[must_use]
    pub fn new() -> Self {
        #[cfg(feature = "icons")]
        let processor: Box<dyn ImageProcessor> = Box::new(RasterProcessor::new());
        #[cfg(not(feature = "icons"))]
        let processor: Box<dyn ImageProcessor> = Box::new(UnavailableProcessor);

        Self { processor }
    }

    /// Generator using a specific processor
    #[must_use]
    pub fn with_processor(processor: Box<dyn ImageProcessor>) -> Self {
        Self { processor }
    }

    /// Whether icons can be generated at all
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.processor.is_available()
    }

    /// Render `source` into the mipmap directories of `project_root`
    ///
    /// # Errors
    ///
    /// Returns [`IconError::Unavailable`] without an image backend,
    /// [`IconError::SourceMissing`] when `source` does not exist, or the
    /// first decode, directory or encode failure.
    pub fn generate(&self, source: impl AsRef<Path>, project_root: impl AsRef<Path>) -> IconResult<Vec<PathBuf>> {
        let source = source.as_ref();
        let project_root = project_root.as_ref();

        if !self.processor.is_available() {
            return Err(IconError::Unavailable);
        }
        if !source.exists() {
            return Err(IconError::SourceMissing(source.to_path_buf()));
        }

        let targets: Vec<IconTarget> = Density::ALL
            .iter()
            .map(|&density| IconTarget::for_density(density, project_root))
            .collect();

        for density in Density::ALL {
            let dir = density.mipmap_dir(project_root);
            fs::create_dir_all(&dir).map_err(|source| IconError::Io { path: dir.clone(), source })?;
            debug!(dir = %dir.display(), "mipmap directory ready");
        }

        let written = self.processor.render(source, &targets)?;
        info!(count = written.len(), source = %source.display(), "launcher icons generated");
        Ok(written)
    }
}
