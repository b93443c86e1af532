//! I/O helpers for RGBA images and JSON.
//!
//! - `load_rgba_image`: read a PNG/JPEG/WebP into an owned RGBA buffer.
//! - `save_rgba_image`: write a `RasterImage` (e.g. one exported slice) to disk.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::RasterImage;
use crate::error::{SplitError, SplitResult};
use image::RgbaImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

impl TryFrom<RgbaImage> for RasterImage {
    type Error = SplitError;

    fn try_from(img: RgbaImage) -> SplitResult<Self> {
        let width = img.width() as usize;
        let height = img.height() as usize;
        RasterImage::new(width, height, img.into_raw())
    }
}

impl RasterImage {
    /// Convert into an `image` crate buffer for encoding.
    pub fn to_rgba_image(&self) -> SplitResult<RgbaImage> {
        RgbaImage::from_raw(
            self.width() as u32,
            self.height() as u32,
            self.pixels().to_vec(),
        )
        .ok_or_else(|| SplitError::Io("Failed to create image buffer".to_string()))
    }
}

/// Load an image from disk and convert to 8-bit RGBA.
pub fn load_rgba_image(path: &Path) -> SplitResult<RasterImage> {
    let img = image::open(path)
        .map_err(|e| SplitError::Io(format!("Failed to open {}: {e}", path.display())))?
        .into_rgba8();
    RasterImage::try_from(img)
}

/// Save an RGBA image; the format follows the file extension.
pub fn save_rgba_image(image: &RasterImage, path: &Path) -> SplitResult<()> {
    ensure_parent_dir(path)?;
    image
        .to_rgba_image()?
        .save(path)
        .map_err(|e| SplitError::Io(format!("Failed to save {}: {e}", path.display())))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> SplitResult<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        SplitError::Io(format!(
            "Failed to serialize JSON for {}: {e}",
            path.display()
        ))
    })?;
    fs::write(path, json)
        .map_err(|e| SplitError::Io(format!("Failed to write JSON {}: {e}", path.display())))
}

fn ensure_parent_dir(path: &Path) -> SplitResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                SplitError::Io(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }
    }
    Ok(())
}
