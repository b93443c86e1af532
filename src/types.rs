use serde::{Deserialize, Serialize};

/// Resolved spacing constraints for one image height.
///
/// - `min_gap`: seams closer than this collapse into one during detection,
///   and no seam may sit closer than this to an image edge while editing.
/// - `min_slice`: smallest band height a finished split should contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacing {
    pub min_gap: usize,
    pub min_slice: usize,
}

impl Spacing {
    /// Valid seam range `[min_gap, height - min_gap]`, or `None` when the
    /// image is too short to hold any seam.
    pub fn seam_range(&self, height: usize) -> Option<(usize, usize)> {
        let lo = self.min_gap.max(1);
        let hi = height.checked_sub(lo)?;
        (lo <= hi).then_some((lo, hi))
    }
}
