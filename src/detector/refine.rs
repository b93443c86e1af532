//! Local refinement of rough peaks into exact seam rows.
//!
//! Each rough row is re-examined within `search_radius` rows. For every probe
//! `y` the mean colors of the `check_height` rows above and below the cut are
//! compared perceptually, the two regions are checked for internal
//! consistency, and the straddling edge strength is read. Sub-scores live on
//! a 0–100 scale.
use super::color::perceptual_distance;
use super::params::RefineParams;
use super::stats::RowProfile;
use crate::edges::seam_edge_strength;
use serde::Serialize;

/// Best probe found around one rough peak.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinedSeam {
    pub rough_y: usize,
    pub y: usize,
    pub score: f64,
    pub color: f64,
    pub consistency: f64,
    pub edge: f64,
}

/// Score every probe around `rough_y` and return the best one (first on
/// ties). `None` when the image is too short for a single probe.
pub(crate) fn refine_candidate(
    profile: &RowProfile,
    row_edges: &[f32],
    rough_y: usize,
    params: &RefineParams,
) -> Option<RefinedSeam> {
    let h = profile.height();
    let ch = params.check_height(h);
    let lo = rough_y.saturating_sub(params.search_radius).max(ch);
    let hi = (rough_y + params.search_radius).min(h.checked_sub(ch)?);

    let mut best: Option<RefinedSeam> = None;
    for y in lo..=hi {
        let probe = score_probe(profile, row_edges, y, ch, params);
        if best.map_or(true, |b| probe.score > b.score) {
            best = Some(RefinedSeam { rough_y, ..probe });
        }
    }
    best
}

fn score_probe(
    profile: &RowProfile,
    row_edges: &[f32],
    y: usize,
    ch: usize,
    params: &RefineParams,
) -> RefinedSeam {
    let above = profile.region_mean(y - ch, y);
    let below = profile.region_mean(y, y + ch);
    let color = to_score(perceptual_distance(above, below), params.color_full_scale);

    let std_above = profile.region_variance(y - ch, y).sqrt();
    let std_below = profile.region_variance(y, y + ch).sqrt();
    let spread = 0.5 * (std_above + std_below);
    let consistency = 100.0 - to_score(spread, params.std_full_scale);

    let edge = to_score(
        seam_edge_strength(row_edges, y) as f64,
        params.edge_full_scale,
    );

    let score = params.color_weight as f64 * color
        + params.consistency_weight as f64 * consistency
        + params.edge_weight as f64 * edge;
    RefinedSeam {
        rough_y: y,
        y,
        score,
        color,
        consistency,
        edge,
    }
}

/// Map `value` onto 0–100 with `full_scale` reaching 100.
#[inline]
fn to_score(value: f64, full_scale: f32) -> f64 {
    if full_scale <= 0.0 {
        return if value > 0.0 { 100.0 } else { 0.0 };
    }
    (100.0 * value / full_scale as f64).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::RasterImage;

    fn bands(split: usize, height: usize, top: [u8; 3], bottom: [u8; 3]) -> RasterImage {
        let width = 10;
        let mut data = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            let c = if y < split { top } else { bottom };
            for _ in 0..width {
                data.extend_from_slice(&[c[0], c[1], c[2], 255]);
            }
        }
        RasterImage::new(width, height, data).unwrap()
    }

    fn edges_of(img: &RasterImage) -> Vec<f32> {
        use crate::edges::{row_edge_strength, vertical_gradient, VerticalKernel};
        use crate::image::ImageF32;
        let l = ImageF32::luminance(&img.as_view());
        row_edge_strength(&vertical_gradient(&l, VerticalKernel::Sobel))
    }

    #[test]
    fn snaps_to_the_color_step() {
        let img = bands(103, 300, [250, 250, 250], [30, 90, 160]);
        let profile = RowProfile::build(&img.as_view());
        let edges = edges_of(&img);
        let params = RefineParams::default();
        for rough in [96, 100, 103, 109] {
            let best = refine_candidate(&profile, &edges, rough, &params).unwrap();
            assert_eq!(best.y, 103, "rough={rough}");
            assert_eq!(best.rough_y, rough);
            assert!(best.score > params.min_score as f64);
        }
    }

    #[test]
    fn flat_region_does_not_clear_the_bar() {
        let img = bands(0, 300, [0, 0, 0], [128, 128, 128]);
        let profile = RowProfile::build(&img.as_view());
        let edges = edges_of(&img);
        let best = refine_candidate(&profile, &edges, 150, &RefineParams::default()).unwrap();
        assert_eq!(best.color, 0.0);
        assert_eq!(best.edge, 0.0);
        assert_eq!(best.consistency, 100.0);
        assert!(best.score < 30.0 + 1e-3);
    }

    #[test]
    fn window_is_clamped_to_the_image() {
        let img = bands(50, 100, [0, 0, 0], [255, 255, 255]);
        let profile = RowProfile::build(&img.as_view());
        let edges = edges_of(&img);
        let best = refine_candidate(&profile, &edges, 0, &RefineParams::default()).unwrap();
        assert!(best.y >= RefineParams::default().check_height(100));
    }
}
