use serde::Serialize;

/// A band shorter than the configured minimum slice height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortBand {
    /// Position of the band, top to bottom.
    pub index: usize,
    pub y_start: usize,
    pub y_end: usize,
}

impl ShortBand {
    pub fn height(&self) -> usize {
        self.y_end - self.y_start
    }
}

/// Finalize-time condition: cutting now would produce short bands.
///
/// Not an error. The host should ask the operator to confirm before calling
/// [`super::EditSession::finalize`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortSliceWarning {
    pub min_slice: usize,
    pub bands: Vec<ShortBand>,
}

/// Bands of `[0, seams..., height]` shorter than `min_slice`. `seams` must be
/// sorted.
pub(crate) fn short_bands(seams: &[usize], height: usize, min_slice: usize) -> Vec<ShortBand> {
    let mut bands = Vec::new();
    let mut y_start = 0usize;
    for (index, &y_end) in seams.iter().chain(std::iter::once(&height)).enumerate() {
        if y_end.saturating_sub(y_start) < min_slice {
            bands.push(ShortBand {
                index,
                y_start,
                y_end,
            });
        }
        y_start = y_end;
    }
    bands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_first_and_last_bands() {
        let bands = short_bands(&[20, 100, 290], 300, 30);
        let idx: Vec<usize> = bands.iter().map(|b| b.index).collect();
        assert_eq!(idx, vec![0, 3]);
        assert_eq!(bands[0].height(), 20);
        assert_eq!(bands[1].height(), 10);
    }

    #[test]
    fn whole_image_band_can_be_short() {
        assert_eq!(short_bands(&[], 10, 30).len(), 1);
        assert!(short_bands(&[], 30, 30).is_empty());
    }
}
