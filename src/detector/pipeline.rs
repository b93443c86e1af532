//! Detector pipeline turning an RGBA buffer into ordered seam rows.
//!
//! Typical usage:
//! ```no_run
//! use seam_splitter::{DetectorParams, SeamDetector};
//! use seam_splitter::image::RgbaView;
//!
//! # fn example(view: RgbaView<'_>) -> seam_splitter::SplitResult<()> {
//! let detector = SeamDetector::new(DetectorParams::default());
//! let seams = detector.detect(view)?;
//! println!("cut at rows {seams:?}");
//! # Ok(())
//! # }
//! ```

// Stages
// - Profile: per-row color sums, squares and row differences (parallel).
// - Edges: luminance plane, vertical derivative, per-row edge strength.
// - Signals: four per-row signals fused into one score, then smoothed.
// - Threshold + peaks: percentile threshold and prominent local maxima.
// - Refine: snap each peak to the best nearby row, drop weak ones.
// - Merge + filter: collapse close seams, enforce the minimum slice height.

use super::merge::{enforce_min_slice, merge_close};
use super::params::DetectorParams;
use super::peaks::{adaptive_threshold, find_peaks, moving_average};
use super::refine::refine_candidate;
use super::signals::compute_signals;
use super::stats::RowProfile;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{DetectionReport, RefineSample};
use crate::edges::{row_edge_strength, vertical_gradient};
use crate::error::SplitResult;
use crate::image::{ImageF32, RgbaView};
use crate::types::Spacing;
use log::debug;
use std::time::Instant;

/// Refined scores within this margin of the cut-off count as not above it.
const SCORE_EPS: f64 = 1e-3;

/// Stateless seam detector. Identical input always yields identical output.
#[derive(Clone, Debug, Default)]
pub struct SeamDetector {
    params: DetectorParams,
}

impl SeamDetector {
    /// Create a detector with the supplied parameters.
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    /// Spacing rules for an image of `height` rows.
    pub fn spacing_for(&self, height: usize) -> Spacing {
        self.params.spacing.resolve(height)
    }

    /// Candidate seam rows, strictly increasing, each at least `min_slice`
    /// away from both edges and from each other. No seams is `Ok(vec![])`.
    pub fn detect(&self, image: RgbaView<'_>) -> SplitResult<Vec<usize>> {
        Ok(self.detect_with_report(image)?.seams)
    }

    /// Run the full pipeline and keep every intermediate result.
    pub fn detect_with_report(&self, image: RgbaView<'_>) -> SplitResult<DetectionReport> {
        image.validate()?;
        let total_start = Instant::now();
        let (w, h) = (image.w, image.h);
        let spacing = self.spacing_for(h);
        let mut report = DetectionReport::empty(w, h, spacing);

        if h < 2 * spacing.min_slice {
            debug!(
                "SeamDetector::detect image {}x{} shorter than two slices (min_slice={})",
                w, h, spacing.min_slice
            );
            report.timings.total_ms = elapsed_ms(total_start);
            return Ok(report);
        }

        let params = &self.params;
        let timings = &mut report.timings;
        let profile = timings.measure("profile", || RowProfile::build(&image));
        let row_edges = timings.measure("edges", || {
            let luma = ImageF32::luminance(&image);
            row_edge_strength(&vertical_gradient(&luma, params.signals.edge_kernel))
        });
        let signals = timings.measure("signals", || {
            compute_signals(&profile, &row_edges, &params.signals, &params.fusion)
        });
        let smoothed = moving_average(&signals.fused, params.smoothing_radius);

        let threshold = adaptive_threshold(&smoothed, &params.threshold);
        let peak_params = params.peaks_for(h);
        let peaks = timings.measure("peaks", || {
            find_peaks(&smoothed, threshold.value, &peak_params)
        });
        debug!(
            "SeamDetector::detect threshold={:.4} ({:?} contrast, p_low={:.4} p_high={:.4}) span={} peaks={}",
            threshold.value,
            threshold.contrast,
            threshold.low,
            threshold.high,
            peak_params.prominence_span,
            peaks.len()
        );

        let refined: Vec<RefineSample> = timings.measure("refine", || {
            peaks
                .iter()
                .filter_map(|p| refine_candidate(&profile, &row_edges, p.y, &params.refine))
                .map(|seam| RefineSample {
                    seam,
                    accepted: seam.score > params.refine.min_score as f64 + SCORE_EPS,
                })
                .collect()
        });
        for sample in refined.iter().filter(|s| !s.accepted) {
            debug!(
                "SeamDetector::detect dropped rough row {} (best y={} score={:.1})",
                sample.seam.rough_y, sample.seam.y, sample.seam.score
            );
        }

        let mut accepted: Vec<usize> = refined
            .iter()
            .filter(|s| s.accepted)
            .map(|s| s.seam.y)
            .collect();
        accepted.sort_unstable();
        let merged = merge_close(&accepted, spacing.min_gap);
        let seams = enforce_min_slice(&merged, h, spacing.min_slice);
        debug!(
            "SeamDetector::detect refined={} merged={} final={:?}",
            accepted.len(),
            merged.len(),
            seams
        );

        report.signals = Some(signals);
        report.smoothed = smoothed;
        report.threshold = Some(threshold);
        report.peaks = peaks;
        report.refined = refined;
        report.merged = merged;
        report.seams = seams;
        report.timings.total_ms = elapsed_ms(total_start);
        Ok(report)
    }
}

/// Detect seams with default parameters.
pub fn detect_seams(image: RgbaView<'_>) -> SplitResult<Vec<usize>> {
    SeamDetector::default().detect(image)
}
