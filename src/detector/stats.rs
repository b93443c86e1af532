//! Per-row color statistics with prefix sums for O(1) region queries.
//!
//! Sums are kept as integers so region means and variances over identical
//! pixels come out exactly equal, independent of where the region starts.
use crate::image::{ImageView, RgbaView};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct RowStats {
    /// Per-channel (R, G, B) sum over the row.
    pub sum: [u64; 3],
    /// Per-channel sum of squares over the row.
    pub sum_sq: [u64; 3],
    /// Sum of |ΔR|+|ΔG|+|ΔB| against the previous row (0 for row 0).
    pub diff: u64,
}

fn row_stats(view: &RgbaView<'_>, y: usize) -> RowStats {
    let row = view.row(y);
    let mut stats = RowStats::default();
    for px in row.chunks_exact(4) {
        for c in 0..3 {
            let v = px[c] as u64;
            stats.sum[c] += v;
            stats.sum_sq[c] += v * v;
        }
    }
    if y > 0 {
        let prev = view.row(y - 1);
        stats.diff = prev
            .chunks_exact(4)
            .zip(row.chunks_exact(4))
            .map(|(a, b)| {
                (0..3)
                    .map(|c| (a[c] as i32 - b[c] as i32).unsigned_abs() as u64)
                    .sum::<u64>()
            })
            .sum();
    }
    stats
}

#[cfg(feature = "parallel")]
fn collect_rows(view: &RgbaView<'_>) -> Vec<RowStats> {
    use rayon::prelude::*;

    (0..view.h)
        .into_par_iter()
        .map(|y| row_stats(view, y))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn collect_rows(view: &RgbaView<'_>) -> Vec<RowStats> {
    (0..view.h).map(|y| row_stats(view, y)).collect()
}

/// Row statistics of one image plus prefix sums over rows.
#[derive(Clone, Debug)]
pub(crate) struct RowProfile {
    width: usize,
    rows: Vec<RowStats>,
    prefix_sum: Vec<[u64; 3]>,
    prefix_sq: Vec<[u64; 3]>,
}

impl RowProfile {
    /// The view must already be validated.
    pub fn build(view: &RgbaView<'_>) -> Self {
        let rows = collect_rows(view);
        let mut prefix_sum = Vec::with_capacity(rows.len() + 1);
        let mut prefix_sq = Vec::with_capacity(rows.len() + 1);
        let (mut acc, mut acc_sq) = ([0u64; 3], [0u64; 3]);
        prefix_sum.push(acc);
        prefix_sq.push(acc_sq);
        for r in &rows {
            for c in 0..3 {
                acc[c] += r.sum[c];
                acc_sq[c] += r.sum_sq[c];
            }
            prefix_sum.push(acc);
            prefix_sq.push(acc_sq);
        }
        Self {
            width: view.w,
            rows,
            prefix_sum,
            prefix_sq,
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Mean per-pixel |ΔR|+|ΔG|+|ΔB| against the previous row.
    pub fn row_diff(&self, y: usize) -> f32 {
        self.rows[y].diff as f32 / self.width as f32
    }

    /// Mean over R, G, B of the per-channel variance across row `y`.
    pub fn row_variance(&self, y: usize) -> f64 {
        let r = &self.rows[y];
        channel_variance(r.sum, r.sum_sq, self.width as u64)
    }

    /// Mean color of rows `[y0, y1)`. Returns zeros for an empty range.
    pub fn region_mean(&self, y0: usize, y1: usize) -> [f64; 3] {
        let n = (y1.saturating_sub(y0) * self.width) as f64;
        if n == 0.0 {
            return [0.0; 3];
        }
        let (a, b) = (&self.prefix_sum[y0], &self.prefix_sum[y1]);
        [
            (b[0] - a[0]) as f64 / n,
            (b[1] - a[1]) as f64 / n,
            (b[2] - a[2]) as f64 / n,
        ]
    }

    /// Mean over R, G, B of the per-channel pixel variance inside rows
    /// `[y0, y1)`.
    pub fn region_variance(&self, y0: usize, y1: usize) -> f64 {
        if y1 <= y0 {
            return 0.0;
        }
        let mut sum = [0u64; 3];
        let mut sum_sq = [0u64; 3];
        for c in 0..3 {
            sum[c] = self.prefix_sum[y1][c] - self.prefix_sum[y0][c];
            sum_sq[c] = self.prefix_sq[y1][c] - self.prefix_sq[y0][c];
        }
        channel_variance(sum, sum_sq, ((y1 - y0) * self.width) as u64)
    }
}

/// `(n·Σx² − (Σx)²) / n²` per channel, averaged over the three channels.
fn channel_variance(sum: [u64; 3], sum_sq: [u64; 3], n: u64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n2 = (n as u128) * (n as u128);
    let total: f64 = (0..3)
        .map(|c| {
            let s = sum[c] as u128;
            let num = (n as u128) * (sum_sq[c] as u128) - s * s;
            num as f64 / n2 as f64
        })
        .sum();
    total / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::RasterImage;

    fn two_rows() -> RasterImage {
        // row 0: black, white; row 1: two mid-gray pixels
        let data = vec![0, 0, 0, 255, 255, 255, 255, 255, 100, 100, 100, 255, 100, 100, 100, 255];
        RasterImage::new(2, 2, data).unwrap()
    }

    #[test]
    fn row_diff_is_mean_abs_difference() {
        let img = two_rows();
        let profile = RowProfile::build(&img.as_view());
        assert_eq!(profile.row_diff(0), 0.0);
        // |0-100|*3 + |255-100|*3 = 300 + 465, averaged over two pixels
        assert!((profile.row_diff(1) - 382.5).abs() < 1e-4);
    }

    #[test]
    fn variances_match_direct_formula() {
        let img = two_rows();
        let profile = RowProfile::build(&img.as_view());
        // each channel holds {0, 255}: variance 127.5^2
        assert!((profile.row_variance(0) - 16256.25).abs() < 1e-6);
        assert_eq!(profile.row_variance(1), 0.0);
        let mean = profile.region_mean(0, 2);
        assert!((mean[0] - 113.75).abs() < 1e-9);
        assert!(profile.region_variance(1, 2) == 0.0);
        assert_eq!(profile.region_mean(1, 1), [0.0; 3]);
    }
}
