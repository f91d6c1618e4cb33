//! Icon rendering with the `image` crate

use image::{imageops, imageops::FilterType, ImageFormat, ImageReader, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{IconTarget, ImageProcessor};
use crate::error::{IconError, IconResult};

/// Renders icons by resampling the source image
///
/// Images are converted to RGBA and resized to exact dimensions, so
/// non-square sources are stretched.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterProcessor;

const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

impl RasterProcessor {
    /// Processor resampling with `FilterType::Lanczos3`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn load(source: &Path) -> IconResult<RgbaImage> {
        let decode_error = |message: String| IconError::Decode {
            path: source.to_path_buf(),
            message,
        };

        let reader = ImageReader::open(source)
            .map_err(|e| decode_error(e.to_string()))?
            .with_guessed_format()
            .map_err(|e| decode_error(e.to_string()))?;

        let image = reader.decode().map_err(|e| decode_error(e.to_string()))?;
        Ok(image.to_rgba8())
    }

    fn save(image: &RgbaImage, path: &Path) -> IconResult<()> {
        image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| IconError::Encode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}

/// Replace the alpha channel with an inscribed filled circle
///
/// A pixel is opaque when its centre lies inside the circle, otherwise it
/// is fully transparent.
pub(crate) fn apply_circle_mask(image: &mut RgbaImage) {
    let size = f64::from(image.width().min(image.height()));
    let radius = size / 2.0;

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = f64::from(x) + 0.5 - radius;
        let dy = f64::from(y) + 0.5 - radius;
        pixel[3] = if dx.mul_add(dx, dy * dy) <= radius * radius { 255 } else { 0 };
    }
}

impl ImageProcessor for RasterProcessor {
    fn is_available(&self) -> bool {
        true
    }

    fn render(&self, source: &Path, targets: &[IconTarget]) -> IconResult<Vec<PathBuf>> {
        let image = Self::load(source)?;
        let mut written = Vec::with_capacity(targets.len() * 2);

        for target in targets {
            let mut resized = imageops::resize(&image, target.size, target.size, RESIZE_FILTER);
            Self::save(&resized, &target.launcher)?;
            written.push(target.launcher.clone());

            apply_circle_mask(&mut resized);
            Self::save(&resized, &target.round)?;
            written.push(target.round.clone());

            debug!(size = target.size, "rendered launcher and round icons");
        }

        Ok(written)
    }
}
