//! Cutting an image into horizontal bands at finalized seams.
use crate::error::{SplitError, SplitResult};
use crate::image::{RasterImage, RgbaView};
use serde::Serialize;

/// One horizontal band `[y_start, y_end)` of the source image, full width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slice {
    pub y_start: usize,
    pub y_end: usize,
    pub image: RasterImage,
}

impl Slice {
    pub fn height(&self) -> usize {
        self.y_end - self.y_start
    }

    pub fn bounds(&self) -> SliceBounds {
        SliceBounds {
            y_start: self.y_start,
            y_end: self.y_end,
        }
    }
}

/// Band extent without pixels, for reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceBounds {
    pub y_start: usize,
    pub y_end: usize,
}

/// Band boundaries `[0, seams..., height]` after checking that `seams` is
/// strictly increasing and inside `(0, height)`.
pub fn band_boundaries(seams: &[usize], height: usize) -> SplitResult<Vec<usize>> {
    let mut prev = 0usize;
    for &y in seams {
        if y <= prev || y >= height {
            return Err(SplitError::InvalidSeams(format!(
                "seam {y} must be greater than {prev} and below height {height}"
            )));
        }
        prev = y;
    }
    let mut boundaries = Vec::with_capacity(seams.len() + 2);
    boundaries.push(0);
    boundaries.extend_from_slice(seams);
    boundaries.push(height);
    Ok(boundaries)
}

/// Copy each band between consecutive boundaries into its own image,
/// top to bottom. Empty `seams` yields one slice covering the whole image.
pub fn slice_image(image: RgbaView<'_>, seams: &[usize]) -> SplitResult<Vec<Slice>> {
    image.validate()?;
    let boundaries = band_boundaries(seams, image.h)?;
    boundaries
        .windows(2)
        .map(|pair| {
            let (y_start, y_end) = (pair[0], pair[1]);
            Ok(Slice {
                y_start,
                y_end,
                image: RasterImage::from_rows(&image, y_start, y_end)?,
            })
        })
        .collect()
}
