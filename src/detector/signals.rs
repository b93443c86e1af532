//! Per-row boundary evidence and its fusion into one score.
//!
//! Four signals are computed for every row `y` (a seam at `y` cuts between
//! rows `y - 1` and `y`):
//! - row difference against the previous row,
//! - row variance (flat rows are typical of the padding between captures),
//! - color distance between the regions just above and just below `y`,
//! - vertical edge strength straddling the cut.
use super::color::rgb_distance;
use super::params::{FusionWeights, SignalParams};
use super::stats::RowProfile;
use crate::edges::seam_edge_strength;
use serde::Serialize;

/// Raw signals (before normalisation) and the fused score, one entry per row.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSignals {
    pub row_diff: Vec<f32>,
    pub variance: Vec<f32>,
    pub color_boundary: Vec<f32>,
    pub edge: Vec<f32>,
    pub fused: Vec<f32>,
}

pub(crate) fn compute_signals(
    profile: &RowProfile,
    row_edges: &[f32],
    signals: &SignalParams,
    weights: &FusionWeights,
) -> RowSignals {
    let h = profile.height();
    let region = signals.region_size(h);

    let row_diff: Vec<f32> = (0..h).map(|y| profile.row_diff(y)).collect();
    let variance: Vec<f32> = (0..h).map(|y| profile.row_variance(y) as f32).collect();
    let color_boundary: Vec<f32> = (0..h)
        .map(|y| {
            if y < region || y + region > h {
                return 0.0;
            }
            let above = profile.region_mean(y - region, y);
            let below = profile.region_mean(y, y + region);
            rgb_distance(above, below) as f32
        })
        .collect();
    let edge: Vec<f32> = (0..h)
        .map(|y| {
            if y == 0 {
                0.0
            } else {
                seam_edge_strength(row_edges, y)
            }
        })
        .collect();

    let fused = (0..h)
        .map(|y| {
            weights.row_diff * unit(row_diff[y], signals.row_diff_scale)
                + weights.color_boundary * unit(color_boundary[y], signals.color_scale)
                + weights.edge * unit(edge[y], signals.edge_scale)
                + weights.inverse_variance * (1.0 - unit(variance[y], signals.variance_scale))
        })
        .collect();

    RowSignals {
        row_diff,
        variance,
        color_boundary,
        edge,
        fused,
    }
}

/// `value / scale` clamped into [0, 1].
#[inline]
fn unit(value: f32, scale: f32) -> f32 {
    if scale <= 0.0 {
        return if value > 0.0 { 1.0 } else { 0.0 };
    }
    (value / scale).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::{row_edge_strength, vertical_gradient, VerticalKernel};
    use crate::image::{ImageF32, RasterImage};

    fn bands(width: usize, split: usize, height: usize) -> RasterImage {
        let mut data = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            let c = if y < split { [20, 20, 20] } else { [220, 220, 220] };
            for _ in 0..width {
                data.extend_from_slice(&[c[0], c[1], c[2], 255]);
            }
        }
        RasterImage::new(width, height, data).unwrap()
    }

    fn signals_for(img: &RasterImage) -> RowSignals {
        let view = img.as_view();
        let profile = RowProfile::build(&view);
        let gy = vertical_gradient(&ImageF32::luminance(&view), VerticalKernel::Sobel);
        compute_signals(
            &profile,
            &row_edge_strength(&gy),
            &SignalParams::default(),
            &FusionWeights::default(),
        )
    }

    #[test]
    fn fused_score_peaks_on_the_boundary() {
        let img = bands(16, 40, 100);
        let s = signals_for(&img);
        let (argmax, _) = s
            .fused
            .iter()
            .enumerate()
            .fold((0, f32::MIN), |best, (i, &v)| if v > best.1 { (i, v) } else { best });
        assert_eq!(argmax, 40);
        assert!(s.row_diff[40] > 500.0);
        assert_eq!(s.row_diff[39], 0.0);
    }

    #[test]
    fn flat_rows_score_only_inverse_variance() {
        let img = bands(8, 0, 50);
        let s = signals_for(&img);
        assert!(s.fused.iter().all(|&v| (v - 0.1).abs() < 1e-6));
        assert!(s.color_boundary.iter().all(|&v| v == 0.0));
    }
}
