//! Parameter types configuring the detector stages.
//!
//! This module groups knobs for the per-row signals and their fusion, the
//! smoothing and adaptive threshold, peak picking, local refinement, and the
//! spacing rules applied when merging and filtering seams.
//!
//! The defaults are empirically chosen for chat-style screenshots stacked
//! vertically. For tuning, start with the refinement `min_score` and the peak
//! prominence ratio.

use crate::edges::VerticalKernel;
use crate::types::Spacing;
use serde::Deserialize;

/// Detector-wide parameters controlling the multi-stage pipeline.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    pub spacing: SpacingParams,
    pub signals: SignalParams,
    pub fusion: FusionWeights,
    /// Half-width of the moving average applied to the fused score.
    pub smoothing_radius: usize,
    pub threshold: ThresholdParams,
    pub peaks: PeakParams,
    pub refine: RefineParams,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            spacing: SpacingParams::default(),
            signals: SignalParams::default(),
            fusion: FusionWeights::default(),
            smoothing_radius: 3,
            threshold: ThresholdParams::default(),
            peaks: PeakParams::default(),
            refine: RefineParams::default(),
        }
    }
}

impl DetectorParams {
    /// Peak parameters for an image of `height` rows.
    ///
    /// The prominence span is widened past the color-boundary region plus the
    /// smoothing radius, so the side minima of a faint step are taken on the
    /// flat baseline rather than on the slope of its own boundary signal.
    pub fn peaks_for(&self, height: usize) -> PeakParams {
        let reach = self.signals.region_size(height) + self.smoothing_radius + 1;
        PeakParams {
            prominence_span: self.peaks.prominence_span.max(reach),
            ..self.peaks
        }
    }
}

/// Height-relative spacing rules. Each value is `max(floor, frac * height)`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpacingParams {
    pub min_gap_px: usize,
    pub min_gap_frac: f32,
    pub min_slice_px: usize,
    pub min_slice_frac: f32,
}

impl Default for SpacingParams {
    fn default() -> Self {
        Self {
            min_gap_px: 15,
            min_gap_frac: 0.02,
            min_slice_px: 30,
            min_slice_frac: 0.03,
        }
    }
}

impl SpacingParams {
    /// Resolve the spacing for an image of `height` rows.
    pub fn resolve(&self, height: usize) -> Spacing {
        Spacing {
            min_gap: scaled_floor(height, self.min_gap_frac).max(self.min_gap_px),
            min_slice: scaled_floor(height, self.min_slice_frac)
                .max(self.min_slice_px)
                .max(1),
        }
    }
}

/// Per-row signal extraction and the fixed divisors that map each raw signal
/// into [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SignalParams {
    /// Rows averaged on each side of the color-boundary probe, as a fraction
    /// of the height.
    pub region_frac: f32,
    pub region_min_px: usize,
    pub edge_kernel: VerticalKernel,
    /// Mean per-pixel |ΔR|+|ΔG|+|ΔB| that saturates the row-difference signal.
    pub row_diff_scale: f32,
    /// RGB distance that saturates the color-boundary signal.
    pub color_scale: f32,
    /// Mean |gy| that saturates the edge signal.
    pub edge_scale: f32,
    /// Row variance at or above which the inverse-variance evidence is zero.
    pub variance_scale: f32,
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            region_frac: 0.01,
            region_min_px: 3,
            edge_kernel: VerticalKernel::Sobel,
            row_diff_scale: 255.0,
            color_scale: 255.0,
            edge_scale: 255.0,
            variance_scale: 2500.0,
        }
    }
}

impl SignalParams {
    pub fn region_size(&self, height: usize) -> usize {
        scaled_floor(height, self.region_frac).max(self.region_min_px).max(1)
    }
}

/// Weights of the fused per-row score.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FusionWeights {
    pub row_diff: f32,
    pub color_boundary: f32,
    pub edge: f32,
    pub inverse_variance: f32,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            row_diff: 0.4,
            color_boundary: 0.3,
            edge: 0.2,
            inverse_variance: 0.1,
        }
    }
}

/// Percentile-based adaptive threshold.
///
/// When `high - low` percentiles differ by more than `contrast_spread` the
/// image is treated as high contrast and the `mid` percentile is used,
/// otherwise the `low` one.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThresholdParams {
    pub low_percentile: f32,
    pub mid_percentile: f32,
    pub high_percentile: f32,
    pub contrast_spread: f32,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            low_percentile: 0.90,
            mid_percentile: 0.95,
            high_percentile: 0.99,
            contrast_spread: 0.3,
        }
    }
}

/// Peak picking on the smoothed score.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PeakParams {
    /// A peak must be >= every sample within this many rows.
    pub local_window: usize,
    /// Rows inspected on each side when measuring prominence.
    pub prominence_span: usize,
    /// Required prominence as a fraction of the threshold.
    pub prominence_ratio: f32,
}

impl Default for PeakParams {
    fn default() -> Self {
        Self {
            local_window: 2,
            prominence_span: 10,
            prominence_ratio: 0.3,
        }
    }
}

/// Local search around each rough peak. All scores are on a 0–100 scale.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RefineParams {
    pub search_radius: usize,
    /// Rows averaged above and below a probe, as a fraction of the height,
    /// clamped into `[1, check_max_px]`.
    pub check_frac: f32,
    pub check_max_px: usize,
    pub color_weight: f32,
    pub consistency_weight: f32,
    pub edge_weight: f32,
    /// Perceptual distance mapped to a color score of 100.
    pub color_full_scale: f32,
    /// Region standard deviation at which the consistency score reaches 0.
    pub std_full_scale: f32,
    /// Edge strength mapped to an edge score of 100.
    pub edge_full_scale: f32,
    /// Candidates whose best combined score is not above this are dropped.
    pub min_score: f32,
}

impl Default for RefineParams {
    fn default() -> Self {
        Self {
            search_radius: 8,
            check_frac: 0.02,
            check_max_px: 10,
            color_weight: 0.5,
            consistency_weight: 0.3,
            edge_weight: 0.2,
            color_full_scale: 128.0,
            std_full_scale: 64.0,
            edge_full_scale: 128.0,
            min_score: 30.0,
        }
    }
}

impl RefineParams {
    pub fn check_height(&self, height: usize) -> usize {
        scaled_floor(height, self.check_frac).clamp(1, self.check_max_px.max(1))
    }
}

#[inline]
fn scaled_floor(height: usize, frac: f32) -> usize {
    if frac.is_finite() && frac > 0.0 {
        // epsilon absorbs the f32 representation error of fractions like 0.02
        (height as f64 * frac as f64 + 1e-4).floor() as usize
    } else {
        0
    }
}
