//! Owned single-channel f32 image in row-major layout (stride == width).
//!
//! Used for the luminance plane and gradient buffers of the detector.
use super::{ImageView, ImageViewMut, RgbaView};

/// Rec. 601 luma weights applied to R, G, B.
const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

#[derive(Clone, Debug)]
pub struct ImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of f32 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0.0; w * h],
        }
    }

    /// Luminance plane of an RGBA view, in the 0..=255 range. Alpha is ignored.
    pub fn luminance(view: &RgbaView<'_>) -> Self {
        let mut out = Self::new(view.w, view.h);
        for (y, src) in view.rows().enumerate() {
            let start = y * out.stride;
            let dst = &mut out.data[start..start + out.w];
            for (px, d) in src.chunks_exact(4).zip(dst.iter_mut()) {
                *d = LUMA_WEIGHTS[0] * px[0] as f32
                    + LUMA_WEIGHTS[1] * px[1] as f32
                    + LUMA_WEIGHTS[2] * px[2] as f32;
            }
        }
        out
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }
}

impl ImageView for ImageF32 {
    type Pixel = f32;

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
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

impl ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::RasterImage;

    #[test]
    fn luminance_ignores_alpha() {
        let data = vec![255, 255, 255, 0, 0, 0, 0, 255];
        let img = RasterImage::new(2, 1, data).unwrap();
        let l = ImageF32::luminance(&img.as_view());
        assert!((l.get(0, 0) - 255.0).abs() < 1e-3);
        assert_eq!(l.get(1, 0), 0.0);
    }
}
