//! Vertical image gradients (Sobel/Scharr) and per-row edge strength.
//!
//! - Convolves the Y kernel of a 3×3 pair with border clamping (replicate).
//! - Kernel output is divided by the weight of one kernel row, so a step of
//!   `d` luminance levels yields `|gy| = d` for either kernel.
//! - Row strength is the mean `|gy|` across the row; the strength of a seam
//!   at `y` averages the two rows straddling the cut.
//!
//! Complexity: O(W·H) per pass; memory: one float buffer.
use crate::image::{ImageF32, ImageView, ImageViewMut};
use serde::{Deserialize, Serialize};

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];
const SCHARR_KERNEL_Y: Kernel3 = [[-3.0, -10.0, -3.0], [0.0, 0.0, 0.0], [3.0, 10.0, 3.0]];

/// Derivative kernel used for the vertical edge signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalKernel {
    #[default]
    Sobel,
    Scharr,
}

impl VerticalKernel {
    fn taps(self) -> (&'static Kernel3, f32) {
        match self {
            VerticalKernel::Sobel => (&SOBEL_KERNEL_Y, 4.0),
            VerticalKernel::Scharr => (&SCHARR_KERNEL_Y, 16.0),
        }
    }
}

/// Normalised vertical derivative `gy` of a single-channel image.
pub fn vertical_gradient(l: &ImageF32, kernel: VerticalKernel) -> ImageF32 {
    let (w, h) = (l.w, l.h);
    let mut gy = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return gy;
    }
    let (k, norm) = kernel.taps();
    let inv = 1.0 / norm;

    for y in 0..h {
        let rows = [l.row(y.saturating_sub(1)), l.row((y + 1).min(h - 1))];
        let (k_up, k_down) = (&k[0], &k[2]);
        let out = gy.row_mut(y);
        for (x, dst) in out.iter_mut().enumerate() {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];
            let mut sum = 0.0;
            for i in 0..3 {
                sum += rows[0][x_idx[i]] * k_up[i] + rows[1][x_idx[i]] * k_down[i];
            }
            *dst = sum * inv;
        }
    }
    gy
}

/// Mean absolute value of each row of a gradient image.
pub fn row_edge_strength(gy: &ImageF32) -> Vec<f32> {
    if gy.w == 0 {
        return vec![0.0; gy.h];
    }
    let inv_w = 1.0 / gy.w as f32;
    gy.rows()
        .map(|row| row.iter().map(|v| v.abs()).sum::<f32>() * inv_w)
        .collect()
}

/// Edge strength of a cut between rows `y - 1` and `y`.
#[inline]
pub fn seam_edge_strength(row_strength: &[f32], y: usize) -> f32 {
    match (y.checked_sub(1), row_strength.get(y)) {
        (Some(up), Some(&down)) => 0.5 * (row_strength[up] + down),
        (None, Some(&down)) => down,
        (Some(up), None) => row_strength.get(up).copied().unwrap_or(0.0),
        (None, None) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_image(width: usize, height: usize, split_y: usize, delta: f32) -> ImageF32 {
        let mut img = ImageF32::new(width, height);
        for y in split_y..height {
            for x in 0..width {
                img.set(x, y, delta);
            }
        }
        img
    }

    #[test]
    fn step_edge_straddles_the_cut() {
        let img = step_image(8, 12, 6, 100.0);
        for kernel in [VerticalKernel::Sobel, VerticalKernel::Scharr] {
            let strength = row_edge_strength(&vertical_gradient(&img, kernel));
            assert!((strength[5] - 100.0).abs() < 1e-3, "{kernel:?} {strength:?}");
            assert!((strength[6] - 100.0).abs() < 1e-3);
            assert_eq!(strength[3], 0.0);
            assert_eq!(strength[8], 0.0);
            assert!((seam_edge_strength(&strength, 6) - 100.0).abs() < 1e-3);
            assert!((seam_edge_strength(&strength, 7) - 50.0).abs() < 1e-3);
        }
    }

    #[test]
    fn flat_image_has_no_edges() {
        let img = step_image(5, 5, 0, 42.0);
        let strength = row_edge_strength(&vertical_gradient(&img, VerticalKernel::Sobel));
        assert!(strength.iter().all(|&v| v == 0.0));
    }
}
