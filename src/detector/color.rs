//! Color distances between mean region colors.

/// Channel weights (R, G, B) approximating the eye's sensitivity.
pub const PERCEPTUAL_WEIGHTS: [f64; 3] = [2.0, 4.0, 3.0];

/// Plain Euclidean distance in RGB.
#[inline]
pub fn rgb_distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let (dr, dg, db) = (a[0] - b[0], a[1] - b[1], a[2] - b[2]);
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Weighted Euclidean distance, normalised by the weight sum so that black
/// against white is 255 like a single-channel step.
#[inline]
pub fn perceptual_distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let w = PERCEPTUAL_WEIGHTS;
    let sum: f64 = (0..3).map(|c| w[c] * (a[c] - b[c]).powi(2)).sum();
    (sum / (w[0] + w[1] + w[2])).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_white_distances() {
        let (black, white) = ([0.0; 3], [255.0; 3]);
        assert!((rgb_distance(black, white) - 441.672_955_930_063_7).abs() < 1e-9);
        assert!((perceptual_distance(black, white) - 255.0).abs() < 1e-9);
    }

    #[test]
    fn green_weighs_more_than_red() {
        let base = [100.0; 3];
        let red = perceptual_distance(base, [130.0, 100.0, 100.0]);
        let green = perceptual_distance(base, [100.0, 130.0, 100.0]);
        let blue = perceptual_distance(base, [100.0, 100.0, 130.0]);
        assert!(green > blue && blue > red);
    }
}
