//! Smoothing, adaptive thresholding and peak picking on the fused row score.
use super::params::{PeakParams, ThresholdParams};
use serde::Serialize;

/// Symmetric moving average with the window clamped at the borders.
pub fn moving_average(signal: &[f32], radius: usize) -> Vec<f32> {
    let n = signal.len();
    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(radius);
            let hi = (i + radius + 1).min(n);
            let sum: f64 = signal[lo..hi].iter().map(|&v| v as f64).sum();
            (sum / (hi - lo) as f64) as f32
        })
        .collect()
}

/// Value at index `floor(p * n)` of an ascending slice (clamped).
pub fn percentile(sorted: &[f32], p: f32) -> f32 {
    if sorted.is_empty() {
        return 0.0;
    }
    // epsilon absorbs the f32 representation error of p (0.9f32 < 0.9)
    let pos = p.clamp(0.0, 1.0) as f64 * sorted.len() as f64 + 1e-4;
    let idx = (pos.floor() as usize).min(sorted.len() - 1);
    sorted[idx]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Contrast {
    /// Strong, sparse peaks: the stricter middle percentile is used.
    High,
    Low,
}

/// Threshold picked for one smoothed signal, with the percentiles behind it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Threshold {
    pub value: f32,
    pub low: f32,
    pub mid: f32,
    pub high: f32,
    pub contrast: Contrast,
}

pub fn adaptive_threshold(smoothed: &[f32], params: &ThresholdParams) -> Threshold {
    let mut sorted = smoothed.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let low = percentile(&sorted, params.low_percentile);
    let mid = percentile(&sorted, params.mid_percentile);
    let high = percentile(&sorted, params.high_percentile);
    let contrast = if high - low > params.contrast_spread {
        Contrast::High
    } else {
        Contrast::Low
    };
    let value = match contrast {
        Contrast::High => mid,
        Contrast::Low => low,
    };
    Threshold {
        value,
        low,
        mid,
        high,
        contrast,
    }
}

/// A rough seam candidate on the smoothed score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Peak {
    pub y: usize,
    pub score: f32,
    pub prominence: f32,
}

/// Rows above `threshold` that are local maxima within `local_window` and
/// stand out from the lowest points within `prominence_span` on either side.
pub fn find_peaks(smoothed: &[f32], threshold: f32, params: &PeakParams) -> Vec<Peak> {
    let n = smoothed.len();
    let min_prominence = params.prominence_ratio * threshold;
    let mut peaks = Vec::new();
    for (y, &score) in smoothed.iter().enumerate() {
        if score <= threshold {
            continue;
        }
        let lo = y.saturating_sub(params.local_window);
        let hi = (y + params.local_window + 1).min(n);
        if smoothed[lo..hi].iter().any(|&v| v > score) {
            continue;
        }
        let prominence = prominence(smoothed, y, params.prominence_span);
        if prominence > min_prominence {
            peaks.push(Peak {
                y,
                score,
                prominence,
            });
        }
    }
    peaks
}

/// Score at `y` minus the higher of the two side minima. Rows without any
/// neighbours have no prominence.
fn prominence(signal: &[f32], y: usize, span: usize) -> f32 {
    let left = &signal[y.saturating_sub(span)..y];
    let right = &signal[(y + 1).min(signal.len())..(y + 1 + span).min(signal.len())];
    let side_min = |side: &[f32]| side.iter().copied().reduce(f32::min);
    let reference = match (side_min(left), side_min(right)) {
        (Some(l), Some(r)) => l.max(r),
        (Some(v), None) | (None, Some(v)) => v,
        (None, None) => return 0.0,
    };
    signal[y] - reference
}
