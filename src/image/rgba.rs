//! 8-bit RGBA buffers: a borrowed view with stride and an owned, validated
//! image.
//!
//! Samples are interleaved R, G, B, A in row-major order. `stride` is counted
//! in bytes.
use super::ImageView;
use crate::error::{SplitError, SplitResult};

/// Bytes per RGBA pixel.
pub const RGBA_CHANNELS: usize = 4;

#[derive(Clone, Copy, Debug)]
pub struct RgbaView<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> RgbaView<'a> {
    /// Tightly packed view over `data`.
    pub fn packed(w: usize, h: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            stride: w * RGBA_CHANNELS,
            data,
        }
    }

    /// Check dimensions and buffer length.
    ///
    /// Packed views must match `w * h * 4` exactly; strided views need room
    /// for every row up to the last pixel.
    pub fn validate(&self) -> SplitResult<()> {
        let fail = |reason| SplitError::InvalidImage {
            width: self.w,
            height: self.h,
            stride: self.stride,
            len: self.data.len(),
            reason,
        };
        if self.w == 0 || self.h == 0 {
            return Err(fail("width and height must be positive"));
        }
        let row_bytes = self
            .w
            .checked_mul(RGBA_CHANNELS)
            .ok_or_else(|| fail("row size overflows"))?;
        if self.stride < row_bytes {
            return Err(fail("stride shorter than one row"));
        }
        let needed = (self.h - 1)
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(row_bytes))
            .ok_or_else(|| fail("buffer size overflows"))?;
        if self.stride == row_bytes && self.data.len() != needed {
            return Err(fail("buffer length differs from width*height*4"));
        }
        if self.data.len() < needed {
            return Err(fail("buffer too short for declared dimensions"));
        }
        Ok(())
    }
}

impl<'a> ImageView for RgbaView<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w * RGBA_CHANNELS]
    }
}

/// Owned, tightly packed RGBA image. Dimensions are validated on
/// construction and the pixels never change afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RasterImage {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> SplitResult<Self> {
        RgbaView::packed(width, height, &data).validate()?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Copy rows `[y_start, y_end)` of a view into a new packed image.
    pub fn from_rows(view: &RgbaView<'_>, y_start: usize, y_end: usize) -> SplitResult<Self> {
        view.validate()?;
        if y_start >= y_end || y_end > view.h {
            return Err(SplitError::InvalidSeams(format!(
                "row range {y_start}..{y_end} outside image height {}",
                view.h
            )));
        }
        let row_bytes = view.w * RGBA_CHANNELS;
        let mut data = Vec::with_capacity(row_bytes * (y_end - y_start));
        for y in y_start..y_end {
            data.extend_from_slice(view.row(y));
        }
        Self::new(view.w, y_end - y_start, data)
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Borrow as a read-only `RgbaView`
    pub fn as_view(&self) -> RgbaView<'_> {
        RgbaView::packed(self.width, self.height, &self.data)
    }
}
