#![allow(dead_code)]

use seam_splitter::image::RasterImage;

/// Stacks solid full-width RGB bands, top to bottom, into an opaque RGBA image.
pub fn solid_bands(width: usize, bands: &[(usize, [u8; 3])]) -> RasterImage {
    assert!(width > 0, "image width must be positive");
    assert!(!bands.is_empty(), "at least one band is required");

    let height: usize = bands.iter().map(|(h, _)| h).sum();
    let mut data = Vec::with_capacity(width * height * 4);
    for &(rows, [r, g, b]) in bands {
        for _ in 0..rows * width {
            data.extend_from_slice(&[r, g, b, 255]);
        }
    }
    RasterImage::new(width, height, data).expect("valid synthetic image")
}

/// Like [`solid_bands`] but adds deterministic per-pixel noise in
/// `[-amplitude, amplitude]` to every color channel.
pub fn noisy_bands(
    width: usize,
    bands: &[(usize, [u8; 3])],
    amplitude: u8,
    seed: u64,
) -> RasterImage {
    let base = solid_bands(width, bands);
    let mut rng = Lcg(seed);
    let span = 2 * amplitude as i32 + 1;
    let data = base
        .pixels()
        .chunks_exact(4)
        .flat_map(|px| {
            let mut out = [0u8; 4];
            for c in 0..3 {
                let delta = (rng.next() % span as u32) as i32 - amplitude as i32;
                out[c] = (px[c] as i32 + delta).clamp(0, 255) as u8;
            }
            out[3] = px[3];
            out
        })
        .collect();
    RasterImage::new(base.width(), base.height(), data).expect("valid synthetic image")
}

/// Single-color image.
pub fn uniform(width: usize, height: usize, rgb: [u8; 3]) -> RasterImage {
    solid_bands(width, &[(height, rgb)])
}

struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }
}
